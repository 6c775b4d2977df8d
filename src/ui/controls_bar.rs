use dungeon_runner::core::game_state::{Controls, GameSnapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One key hint: (key, label, enabled).
type Hint = (&'static str, &'static str, bool);

fn hints(controls: &Controls) -> [Hint; 6] {
    [
        ("A", "Attack", controls.attack),
        ("P", "Potion", controls.use_potion),
        ("F", "Flee", controls.flee),
        ("N", "Next Level", controls.advance_level),
        ("R", "Restart", true),
        ("Q", "Quit", true),
    ]
}

/// Draws the key hints; disabled actions are dimmed.
pub fn draw_controls_bar(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = Vec::new();
    for (key, label, enabled) in hints(&snapshot.controls) {
        let style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(
            format!("[{key}]"),
            style.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {label}   "), style));
    }
    if snapshot.awaiting_follow_up {
        spans.push(Span::styled(
            "…",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        inner,
    );
}
