//! Pure combat rolls shared by the engine and the simulator.
//!
//! Each function draws from the session [`Dice`] and has no other side
//! effects, so the order of calls here is the order rolls are consumed.

use crate::core::constants::*;
use crate::core::dice::Dice;

/// Roll `stat - low ..= stat + high`, floored at [`MIN_DAMAGE`].
fn roll_spread(stat: u32, (low, high): (u32, u32), dice: &mut impl Dice) -> u32 {
    let min = stat.saturating_sub(low);
    let max = stat + high;
    dice.roll(min, max).max(MIN_DAMAGE)
}

/// Damage the player deals with a basic attack.
pub fn roll_player_damage(attack: u32, dice: &mut impl Dice) -> u32 {
    roll_spread(attack, PLAYER_DAMAGE_SPREAD, dice)
}

/// Damage an enemy deals on its turn.
pub fn roll_enemy_damage(attack: u32, dice: &mut impl Dice) -> u32 {
    roll_spread(attack, ENEMY_DAMAGE_SPREAD, dice)
}

pub fn roll_potion_heal(dice: &mut impl Dice) -> u32 {
    dice.roll(POTION_HEAL_RANGE.0, POTION_HEAL_RANGE.1)
}

pub fn roll_victory_heal(dice: &mut impl Dice) -> u32 {
    dice.roll(VICTORY_HEAL_RANGE.0, VICTORY_HEAL_RANGE.1)
}

pub fn roll_flee_penalty(dice: &mut impl Dice) -> u32 {
    dice.roll(FLEE_PENALTY_RANGE.0, FLEE_PENALTY_RANGE.1)
}

/// d100 roll, succeeding when it lands at or under `threshold`.
pub fn roll_percent(threshold: u32, dice: &mut impl Dice) -> bool {
    dice.roll(PERCENT_ROLL.0, PERCENT_ROLL.1) <= threshold
}

/// Chance (percent) of finding a potion after a fight on `level`.
pub fn potion_drop_percent(level: u32) -> u32 {
    if level <= FIRST_LEVEL {
        LEVEL_1_POTION_DROP_PERCENT
    } else {
        LEVEL_2_POTION_DROP_PERCENT
    }
}

/// (max_hp, attack) gained for clearing `level`.
pub fn level_clear_gains(level: u32) -> (u32, u32) {
    if level <= FIRST_LEVEL {
        LEVEL_1_CLEAR_GAINS
    } else {
        LEVEL_2_CLEAR_GAINS
    }
}

/// Number of enemies that guard `level`.
pub fn enemies_for_level(level: u32) -> u32 {
    if level <= FIRST_LEVEL {
        LEVEL_1_ENEMIES
    } else {
        LEVEL_2_ENEMIES
    }
}

/// Heal `hp` by `amount` without exceeding `max_hp`.
pub fn apply_heal(hp: u32, amount: u32, max_hp: u32) -> u32 {
    hp.saturating_add(amount).min(max_hp)
}

/// Apply damage to HP, returning remaining HP (minimum 0).
pub fn apply_damage(hp: u32, damage: u32) -> u32 {
    hp.saturating_sub(damage)
}
