use dungeon_runner::core::constants::{DEFAULT_HERO_NAME, MAX_NAME_CHARS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title screen where the hero is named before a run.
pub struct NameEntryScreen {
    pub name_input: String,
    /// Cursor position in characters, not bytes.
    pub cursor_position: usize,
}

impl NameEntryScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            cursor_position: 0,
        }
    }

    /// Start from a name passed on the command line.
    pub fn with_name(name: &str) -> Self {
        let mut screen = Self::new();
        for c in name.chars() {
            screen.handle_char_input(c);
        }
        screen
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Input label + field
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Rules
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Dungeon Runner")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        f.render_widget(Paragraph::new("Hero Name:"), chunks[2]);

        let input_area = Rect {
            x: chunks[2].x,
            y: chunks[2].y + 1,
            width: chunks[2].width,
            height: chunks[2].height.saturating_sub(1),
        };
        let input_widget = Paragraph::new(self.input_with_cursor())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, input_area);

        let rules = vec![
            Line::from(format!("• Up to {MAX_NAME_CHARS} characters")),
            Line::from(Span::styled(
                format!("• Leave blank to play as \"{DEFAULT_HERO_NAME}\""),
                Style::default().fg(Color::Gray),
            )),
            Line::from("• Two levels: 3 goblins, then 4 tougher foes"),
        ];
        f.render_widget(
            Paragraph::new(rules).style(Style::default().fg(Color::Gray)),
            chunks[4],
        );

        let controls = Paragraph::new("[Enter] Start Adventure    [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[6]);
    }

    fn input_with_cursor(&self) -> String {
        let chars: Vec<char> = self.name_input.chars().collect();
        let (before, after) = chars.split_at(self.cursor_position.min(chars.len()));
        let before: String = before.iter().collect();
        let after: String = after.iter().collect();
        format!("{before}_{after}")
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.name_input
            .char_indices()
            .nth(char_index)
            .map_or(self.name_input.len(), |(i, _)| i)
    }

    pub fn handle_char_input(&mut self, c: char) {
        if c.is_control() || self.name_input.chars().count() >= MAX_NAME_CHARS {
            return;
        }
        let at = self.byte_index(self.cursor_position);
        self.name_input.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            let at = self.byte_index(self.cursor_position - 1);
            self.name_input.remove(at);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor_position = (self.cursor_position + 1).min(self.name_input.chars().count());
    }

    pub fn get_name(&self) -> String {
        self.name_input.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut screen = NameEntryScreen::new();
        for c in "Adaa".chars() {
            screen.handle_char_input(c);
        }
        screen.handle_backspace();
        assert_eq!(screen.get_name(), "Ada");
        assert_eq!(screen.cursor_position, 3);
    }

    #[test]
    fn test_insert_in_middle_with_multibyte_chars() {
        let mut screen = NameEntryScreen::with_name("Zoë");
        screen.move_cursor_left();
        screen.handle_char_input('x');
        assert_eq!(screen.name_input, "Zoxë");
        assert_eq!(screen.input_with_cursor(), "Zox_ë");
    }

    #[test]
    fn test_length_is_capped() {
        let long = "n".repeat(MAX_NAME_CHARS + 10);
        let screen = NameEntryScreen::with_name(&long);
        assert_eq!(screen.name_input.chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_blank_name_is_empty_after_trim() {
        let screen = NameEntryScreen::with_name("   ");
        assert_eq!(screen.get_name(), "");
    }
}
