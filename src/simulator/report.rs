//! Simulation report generation.

use crate::core::constants::{FINAL_LEVEL, FIRST_LEVEL};
use crate::core::events::GameEvent;
use serde::Serialize;

/// What happened in one simulated session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub completed: bool,
    pub timed_out: bool,
    /// Dungeon level the hero fell on, if they fell.
    pub died_on_level: Option<u32>,
    pub final_player_level: u32,
    pub final_hp: u32,
    pub fights_won: u32,
    pub flees: u32,
    pub potions_used: u32,
    pub potions_found: u32,
    pub actions: u32,
}

impl RunStats {
    /// Fold a batch of narration events into the counters.
    pub fn record(&mut self, events: &[GameEvent], dungeon_level: u32) {
        for event in events {
            match event {
                GameEvent::EnemyDefeated { .. } => self.fights_won += 1,
                GameEvent::FleeSucceeded { .. } => self.flees += 1,
                GameEvent::PotionUsed { .. } => self.potions_used += 1,
                GameEvent::PotionFound => self.potions_found += 1,
                e if e.is_fatal() => self.died_on_level = Some(dungeon_level),
                _ => {}
            }
        }
    }

    pub fn outcome_label(&self) -> &'static str {
        if self.completed {
            "CLEARED"
        } else if self.died_on_level.is_some() {
            "DIED"
        } else {
            "TIMEOUT"
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,
    pub completion_rate: f64,
    /// Index 0 = level 1.
    pub deaths_per_level: Vec<u32>,
    pub avg_fights_won: f64,
    pub avg_flees: f64,
    pub avg_potions_used: f64,
    pub avg_potions_found: f64,
    pub avg_final_hp_on_clear: f64,
    pub avg_actions: f64,
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], value: impl Fn(&RunStats) -> u32) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(|r| value(r) as f64).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.completed).count() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;
        let completion_rate = if num_runs > 0 {
            runs_completed as f64 / num_runs as f64 * 100.0
        } else {
            0.0
        };

        let mut deaths_per_level = vec![0; (FINAL_LEVEL - FIRST_LEVEL + 1) as usize];
        for level in runs.iter().filter_map(|r| r.died_on_level) {
            if let Some(slot) = deaths_per_level.get_mut(level.saturating_sub(FIRST_LEVEL) as usize) {
                *slot += 1;
            }
        }

        let cleared: Vec<RunStats> = runs.iter().filter(|r| r.completed).cloned().collect();

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            completion_rate,
            deaths_per_level,
            avg_fights_won: average(&runs, |r| r.fights_won),
            avg_flees: average(&runs, |r| r.flees),
            avg_potions_used: average(&runs, |r| r.potions_used),
            avg_potions_found: average(&runs, |r| r.potions_found),
            avg_final_hp_on_clear: average(&cleared, |r| r.final_hp),
            avg_actions: average(&runs, |r| r.actions),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} cleared, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Completion Rate:     {:.1}%\n",
            self.completion_rate
        ));
        for (offset, deaths) in self.deaths_per_level.iter().enumerate() {
            let pct = if self.num_runs > 0 {
                *deaths as f64 / self.num_runs as f64 * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  Died on Level {}:    {:>5.1}% {}\n",
                FIRST_LEVEL + offset as u32,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── AVERAGES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Fights Won:          {:.2}\n", self.avg_fights_won));
        report.push_str(&format!("  Flees:               {:.2}\n", self.avg_flees));
        report.push_str(&format!("  Potions Used:        {:.2}\n", self.avg_potions_used));
        report.push_str(&format!("  Potions Found:       {:.2}\n", self.avg_potions_found));
        report.push_str(&format!(
            "  Final HP (cleared):  {:.1}\n",
            self.avg_final_hp_on_clear
        ));
        report.push_str(&format!("  Commands per Run:    {:.1}\n", self.avg_actions));

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
