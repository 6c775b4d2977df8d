//! Dungeon Runner - a two-level, turn-based dungeon crawl.
//!
//! This module exposes the combat engine for testing and for the binaries.

pub mod build_info;
pub mod combat;
pub mod console;
pub mod core;
pub mod error;
pub mod simulator;
pub mod utils;

pub use crate::core::combat_engine::{CombatEngine, CommandOutcome, FollowUp, FollowUpAction};
pub use crate::core::dice::{Dice, ScriptedDice};
pub use crate::core::events::GameEvent;
pub use crate::core::game_state::{Controls, GameSnapshot, GameState, Phase, Player};
pub use combat::Enemy;
pub use error::AppError;
