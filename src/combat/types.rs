use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::core::dice::Dice;

/// The monster currently being fought.
///
/// `hp` is signed: an overkill blow leaves it negative until the enemy is
/// cleared from the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    /// HP at spawn, for the HUD gauge.
    pub max_hp: u32,
    pub hp: i32,
    pub attack: u32,
}

impl Enemy {
    pub fn new(name: String, hp: u32, attack: u32) -> Self {
        Self {
            name,
            max_hp: hp,
            hp: hp as i32,
            attack,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp -= amount as i32;
    }

    /// HP as shown to the player, never below zero.
    pub fn display_hp(&self) -> u32 {
        self.hp.max(0) as u32
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        (self.display_hp() as f64 / self.max_hp as f64).clamp(0.0, 1.0)
    }
}

/// Name for the `index`-th (0-based) enemy spawned on `level`.
pub fn enemy_name(level: u32, index: u32) -> String {
    if level <= FIRST_LEVEL {
        format!("{} #{}", LEVEL_1_ENEMY_NAME, index + 1)
    } else {
        let roster = LEVEL_2_ENEMY_NAMES[index as usize % LEVEL_2_ENEMY_NAMES.len()];
        format!("{} #{}", roster, index + 1)
    }
}

/// Inclusive (hp_min, hp_max, attack_min, attack_max) for a level.
fn enemy_stat_ranges(level: u32) -> (u32, u32, u32, u32) {
    if level <= FIRST_LEVEL {
        LEVEL_1_ENEMY_STATS
    } else {
        LEVEL_2_ENEMY_STATS
    }
}

/// Builds the `index`-th enemy of a level. HP is rolled before attack.
pub fn generate_enemy(level: u32, index: u32, dice: &mut impl Dice) -> Enemy {
    let (hp_min, hp_max, attack_min, attack_max) = enemy_stat_ranges(level);
    let hp = dice.roll(hp_min, hp_max);
    let attack = dice.roll(attack_min, attack_max);
    Enemy::new(enemy_name(level, index), hp, attack)
}
