//! Key bindings for the game screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dungeon_runner::{CombatEngine, CommandOutcome, Dice};

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Attack,
    UsePotion,
    Flee,
    AdvanceLevel,
    Restart,
    Quit,
    Ignored,
}

/// Map a key press. Number keys mirror the console menu.
pub fn map_key(key: KeyEvent) -> GameInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return GameInput::Quit;
    }
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('1') => GameInput::Attack,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char('2') => GameInput::UsePotion,
        KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char('3') => GameInput::Flee,
        KeyCode::Char('n') | KeyCode::Char('N') => GameInput::AdvanceLevel,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => GameInput::Ignored,
    }
}

/// Forward a game command to the engine.
///
/// Restart and Quit are screen-level and handled by the caller.
pub fn dispatch<D: Dice>(engine: &mut CombatEngine<D>, input: GameInput) -> CommandOutcome {
    match input {
        GameInput::Attack => engine.attack(),
        GameInput::UsePotion => engine.use_potion(),
        GameInput::Flee => engine.flee(),
        GameInput::AdvanceLevel => engine.advance_level(),
        GameInput::Restart | GameInput::Quit | GameInput::Ignored => CommandOutcome::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_runner::ScriptedDice;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letter_and_number_bindings() {
        assert_eq!(map_key(key(KeyCode::Char('a'))), GameInput::Attack);
        assert_eq!(map_key(key(KeyCode::Char('2'))), GameInput::UsePotion);
        assert_eq!(map_key(key(KeyCode::Char('F'))), GameInput::Flee);
        assert_eq!(map_key(key(KeyCode::Esc)), GameInput::Quit);
        assert_eq!(map_key(key(KeyCode::Char('x'))), GameInput::Ignored);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), GameInput::Quit);
    }

    #[test]
    fn test_dispatch_before_start_does_nothing() {
        let mut engine = CombatEngine::new(ScriptedDice::default());
        for input in [
            GameInput::Attack,
            GameInput::UsePotion,
            GameInput::Flee,
            GameInput::AdvanceLevel,
        ] {
            assert!(dispatch(&mut engine, input).is_empty());
        }
    }
}
