//! Enemies and the combat rolls.

pub mod logic;
pub mod types;

pub use types::{generate_enemy, Enemy};
