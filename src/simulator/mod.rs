//! Monte Carlo autoplay for balance checks.
//!
//! Plays many seeded sessions through the real [`crate::CombatEngine`] with a
//! simple policy and aggregates:
//! - How often both levels get cleared
//! - Which level the hero falls on
//! - Potion economy (found vs. used)

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{choose_action, run_simulation, simulate_single_run, PolicyAction};
