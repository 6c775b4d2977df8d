use dungeon_runner::core::game_state::{GameSnapshot, Phase};
use dungeon_runner::{Enemy, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draws the HUD: player on the left, enemy on the right, status line below.
pub fn draw_status_panel(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Combatants
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_player(frame, columns[0], snapshot.player.as_ref());
    draw_enemy(frame, columns[1], snapshot);
    draw_status_line(frame, rows[1], snapshot);
}

/// Green above two thirds, yellow above one third, red below.
fn hp_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn draw_player(frame: &mut Frame, area: Rect, player: Option<&Player>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Hero ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(player) = player else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let hp_ratio = if player.max_hp == 0 {
        0.0
    } else {
        player.hp as f64 / player.max_hp as f64
    };
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(hp_color(hp_ratio))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("HP {}/{}", player.hp, player.max_hp))
        .ratio(hp_ratio.clamp(0.0, 1.0));

    let name = Paragraph::new(Line::from(vec![
        Span::styled(
            player.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  Lv {}", player.level)),
    ]));
    let stats = Paragraph::new(format!(
        "Attack {}   Potions {}",
        player.attack, player.potions
    ))
    .style(Style::default().fg(Color::Gray));

    frame.render_widget(name, chunks[0]);
    frame.render_widget(gauge, chunks[1]);
    frame.render_widget(stats, chunks[2]);
}

fn draw_enemy(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Enemy ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match snapshot.enemy.as_ref() {
        Some(enemy) => draw_enemy_details(frame, inner, enemy),
        None => {
            let text = match snapshot.phase {
                Phase::Spawning => "Something stirs in the dark...",
                Phase::LevelCleared => "The level is quiet.",
                Phase::GameOver => "",
                Phase::Idle | Phase::InBattle => "—",
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, inner);
        }
    }
}

fn draw_enemy_details(frame: &mut Frame, area: Rect, enemy: &Enemy) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let name = Paragraph::new(Span::styled(
        enemy.name.clone(),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .label(format!("HP {}/{}", enemy.display_hp(), enemy.max_hp))
        .ratio(enemy.hp_ratio());
    let stats =
        Paragraph::new(format!("Attack {}", enemy.attack)).style(Style::default().fg(Color::Gray));

    frame.render_widget(name, chunks[0]);
    frame.render_widget(gauge, chunks[1]);
    frame.render_widget(stats, chunks[2]);
}

fn draw_status_line(frame: &mut Frame, area: Rect, snapshot: &GameSnapshot) {
    let (label, color) = match snapshot.phase {
        Phase::Idle => ("Not started", Color::Gray),
        Phase::Spawning => ("Between fights", Color::Yellow),
        Phase::InBattle => ("In Combat", Color::Red),
        Phase::LevelCleared => ("Level Cleared", Color::Green),
        Phase::GameOver => ("Game Over", Color::Red),
    };
    let line = Line::from(vec![
        Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " | Dungeon Level {} | Enemies remaining: {}",
            snapshot.level, snapshot.enemies_remaining
        )),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_color_thresholds() {
        assert_eq!(hp_color(1.0), Color::Green);
        assert_eq!(hp_color(0.5), Color::Yellow);
        assert_eq!(hp_color(0.1), Color::Red);
    }
}
