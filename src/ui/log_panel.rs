use dungeon_runner::core::events::EventTone;
use dungeon_runner::core::game_state::LogEntry;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::VecDeque;

fn tone_color(tone: EventTone) -> Color {
    match tone {
        EventTone::Good => Color::Green,
        EventTone::Bad => Color::Red,
        EventTone::Neutral => Color::White,
    }
}

/// Truncate to `max_width` characters, marking the cut with an ellipsis.
fn fit_width(message: &str, max_width: usize) -> String {
    if message.chars().count() > max_width {
        let kept: String = message.chars().take(max_width.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        message.to_string()
    }
}

/// Draws the narration log, newest line at the bottom.
pub fn draw_log_panel(frame: &mut Frame, area: Rect, log: &VecDeque<LogEntry>) {
    let block = Block::default().borders(Borders::ALL).title(" Log ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_entries = inner.height as usize;
    let max_width = inner.width as usize;
    let skip = log.len().saturating_sub(max_entries);

    let lines: Vec<Line> = log
        .iter()
        .skip(skip)
        .map(|entry| {
            Line::from(Span::styled(
                fit_width(&entry.message, max_width),
                Style::default().fg(tone_color(entry.tone)),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
