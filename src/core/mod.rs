//! Core game state and the combat engine.

pub mod combat_engine;
pub mod constants;
pub mod dice;
pub mod events;
pub mod game_state;

pub use combat_engine::{CombatEngine, CommandOutcome, FollowUp, FollowUpAction};
pub use dice::{Dice, ScriptedDice};
pub use events::{EventTone, GameEvent};
pub use game_state::{Controls, GameSnapshot, GameState, LevelState, LogEntry, Phase, Player};
