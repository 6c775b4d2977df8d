//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Drink a potion when HP is below this percent of max HP
    pub potion_below_percent: u32,

    /// Try to flee when HP is below this percent of max HP (0 = never)
    pub flee_below_percent: u32,

    /// Safety cap on commands per session
    pub max_actions_per_run: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            potion_below_percent: 40,
            flee_below_percent: 0,
            max_actions_per_run: 10_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Banner, configuration and final report (verbosity 1 and up).
    pub fn prints_summary(&self) -> bool {
        self.verbosity >= 1
    }

    /// One line per finished run (verbosity 2).
    pub fn prints_each_run(&self) -> bool {
        self.verbosity >= 2
    }

    /// Never drink, never flee: raw attack-only odds.
    pub fn attack_only() -> Self {
        Self {
            potion_below_percent: 0,
            flee_below_percent: 0,
            ..Default::default()
        }
    }

    /// Drinks early and runs when things look grim.
    pub fn cautious() -> Self {
        Self {
            potion_below_percent: 60,
            flee_below_percent: 25,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels_are_distinct() {
        let at = |verbosity| SimConfig {
            verbosity,
            ..Default::default()
        };
        assert!(!at(0).prints_summary());
        assert!(!at(0).prints_each_run());
        assert!(at(1).prints_summary());
        assert!(!at(1).prints_each_run());
        assert!(at(2).prints_summary());
        assert!(at(2).prints_each_run());
    }

    #[test]
    fn test_presets_only_change_policy() {
        let default = SimConfig::default();
        let attack_only = SimConfig::attack_only();
        assert_eq!(attack_only.num_runs, default.num_runs);
        assert_eq!(attack_only.potion_below_percent, 0);

        let cautious = SimConfig::cautious();
        assert!(cautious.flee_below_percent > 0);
        assert!(cautious.potion_below_percent > cautious.flee_below_percent);
    }
}
