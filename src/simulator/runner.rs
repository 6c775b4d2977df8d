//! Autoplay runner driving the real [`CombatEngine`].
//!
//! Statistics are tracked externally from the narration events, so the
//! simulator exercises exactly the code the front ends use.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::combat_engine::CombatEngine;
use crate::core::dice::Dice;
use crate::core::events::GameEvent;
use crate::core::game_state::GameSnapshot;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Command the autoplay policy picks for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    Attack,
    UsePotion,
    Flee,
    AdvanceLevel,
    /// Nothing left to do: the session is over or complete.
    Stop,
}

/// Decide the next command from what the HUD would show.
pub fn choose_action(snapshot: &GameSnapshot, config: &SimConfig) -> PolicyAction {
    let controls = snapshot.controls;
    if controls.advance_level {
        return PolicyAction::AdvanceLevel;
    }
    if !controls.any_battle_action() {
        return PolicyAction::Stop;
    }
    let Some(player) = snapshot.player.as_ref() else {
        return PolicyAction::Stop;
    };

    let hp_percent = player.hp * 100 / player.max_hp.max(1);
    if player.potions > 0 && hp_percent < config.potion_below_percent {
        PolicyAction::UsePotion
    } else if hp_percent < config.flee_below_percent {
        PolicyAction::Flee
    } else {
        PolicyAction::Attack
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, rng);
        if config.prints_each_run() {
            println!(
                "Run {}/{} - {} | Level {} | Won {} | Fled {} | Potions {} | HP {}",
                run_idx + 1,
                config.num_runs,
                run_stats.outcome_label(),
                run_stats.final_player_level,
                run_stats.fights_won,
                run_stats.flees,
                run_stats.potions_used,
                run_stats.final_hp,
            );
        }
        all_runs.push(run_stats);
    }

    SimReport::from_runs(all_runs)
}

/// Play one session to the end with the configured policy.
pub fn simulate_single_run<D: Dice>(config: &SimConfig, dice: D) -> RunStats {
    let mut engine = CombatEngine::new(dice);
    let mut stats = RunStats::default();

    let opening = engine.start_game("Simulant");
    stats.record(&opening.events, engine.state().level.number);

    while stats.actions < config.max_actions_per_run {
        let action = choose_action(&engine.snapshot(), config);
        let outcome = match action {
            PolicyAction::Attack => engine.attack(),
            PolicyAction::UsePotion => engine.use_potion(),
            PolicyAction::Flee => engine.flee(),
            PolicyAction::AdvanceLevel => engine.advance_level(),
            PolicyAction::Stop => break,
        };
        stats.actions += 1;
        stats.record(&outcome.events, engine.state().level.number);

        let level = engine.state().level.number;
        let follow_ups: Vec<GameEvent> = engine.settle();
        stats.record(&follow_ups, level);
    }

    let state = engine.state();
    stats.completed = state.is_complete();
    stats.timed_out = !stats.completed && !state.game_over;
    if let Some(player) = state.player.as_ref() {
        stats.final_player_level = player.level;
        stats.final_hp = player.hp;
    }
    debug!(
        completed = stats.completed,
        died_on_level = ?stats.died_on_level,
        actions = stats.actions,
        "simulated run finished"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_state::{Controls, Phase, Player};

    fn snapshot_with(player: Player, controls: Controls) -> GameSnapshot {
        GameSnapshot {
            player: Some(player),
            enemy: None,
            level: 1,
            enemies_remaining: 3,
            in_battle: controls.attack,
            game_over: false,
            phase: Phase::InBattle,
            controls,
            awaiting_follow_up: false,
        }
    }

    fn battle_controls() -> Controls {
        Controls {
            attack: true,
            use_potion: true,
            flee: true,
            advance_level: false,
        }
    }

    #[test]
    fn test_policy_attacks_when_healthy() {
        let player = Player::new("Sim");
        let snapshot = snapshot_with(player, battle_controls());
        assert_eq!(
            choose_action(&snapshot, &SimConfig::default()),
            PolicyAction::Attack
        );
    }

    #[test]
    fn test_policy_drinks_when_low() {
        let mut player = Player::new("Sim");
        player.hp = 10;
        let snapshot = snapshot_with(player, battle_controls());
        assert_eq!(
            choose_action(&snapshot, &SimConfig::default()),
            PolicyAction::UsePotion
        );
    }

    #[test]
    fn test_policy_flees_when_low_without_potions() {
        let mut player = Player::new("Sim");
        player.hp = 5;
        player.potions = 0;
        let snapshot = snapshot_with(player, battle_controls());
        assert_eq!(
            choose_action(&snapshot, &SimConfig::cautious()),
            PolicyAction::Flee
        );
    }

    #[test]
    fn test_policy_advances_and_stops() {
        let player = Player::new("Sim");
        let advance = Controls {
            advance_level: true,
            ..Controls::default()
        };
        assert_eq!(
            choose_action(&snapshot_with(player.clone(), advance), &SimConfig::default()),
            PolicyAction::AdvanceLevel
        );
        assert_eq!(
            choose_action(&snapshot_with(player, Controls::default()), &SimConfig::default()),
            PolicyAction::Stop
        );
    }

    #[test]
    fn test_single_run_finishes() {
        let config = SimConfig::default();
        let stats = simulate_single_run(&config, ChaCha8Rng::seed_from_u64(42));
        assert!(stats.completed || stats.died_on_level.is_some());
        assert!(!stats.timed_out);
        assert!(stats.actions > 0);
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let config = SimConfig {
            num_runs: 20,
            seed: Some(7),
            verbosity: 0,
            ..Default::default()
        };
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.runs_completed, b.runs_completed);
        assert_eq!(a.deaths_per_level, b.deaths_per_level);
        assert_eq!(a.num_runs, 20);
    }

    #[test]
    fn test_run_seeds_wrap_at_u64_max() {
        let config = SimConfig {
            num_runs: 2,
            seed: Some(u64::MAX),
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config);
        assert_eq!(report.num_runs, 2);

        // The second run reuses seed 0
        let second = simulate_single_run(&config, ChaCha8Rng::seed_from_u64(0));
        assert_eq!(report.run_stats[1].actions, second.actions);
        assert_eq!(report.run_stats[1].fights_won, second.fights_won);
    }
}
