pub mod controls_bar;
pub mod log_panel;
pub mod name_entry;
pub mod status_panel;

use dungeon_runner::core::constants::FINAL_LEVEL;
use dungeon_runner::core::game_state::{GameSnapshot, LogEntry, Phase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::VecDeque;

/// Draws the in-game screen: header, HUD, log, key hints.
pub fn draw_game(frame: &mut Frame, snapshot: &GameSnapshot, log: &VecDeque<LogEntry>) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(7), // Status panel
            Constraint::Min(5),    // Log
            Constraint::Length(3), // Controls
        ])
        .split(size);

    draw_header(frame, chunks[0], snapshot);
    status_panel::draw_status_panel(frame, chunks[1], snapshot);
    log_panel::draw_log_panel(frame, chunks[2], log);
    controls_bar::draw_controls_bar(frame, chunks[3], snapshot);
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let banner = match snapshot.phase {
        Phase::GameOver => Some(("GAME OVER  press R to try again", Color::Red)),
        _ if snapshot.controls.advance_level => {
            Some(("Level cleared!  press N to go deeper", Color::Green))
        }
        Phase::LevelCleared if !snapshot.awaiting_follow_up && snapshot.level >= FINAL_LEVEL => {
            Some(("The dungeon is conquered!", Color::Yellow))
        }
        _ => None,
    };

    let mut spans = vec![Span::styled(
        "Dungeon Runner",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some((text, color)) = banner {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
