//! The single source of randomness for a game session.
//!
//! Every roll in the game (enemy stats, damage, healing, loot, flee attempts)
//! goes through [`Dice::roll`], so seeding one generator reproduces a whole
//! session.

use rand::Rng;
use std::collections::VecDeque;

/// Uniform integer generator over inclusive ranges.
pub trait Dice {
    /// Roll a uniformly distributed integer in `min..=max`.
    ///
    /// Callers always pass `min <= max`.
    fn roll(&mut self, min: u32, max: u32) -> u32;
}

impl<R: Rng + ?Sized> Dice for R {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.gen_range(min..=max)
    }
}

/// Replays a fixed sequence of rolls.
///
/// Each scripted value is clamped into the requested range so engine
/// invariants hold no matter what the script contains. Once the script runs
/// out every roll returns `min`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    consumed: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Append more rolls to the end of the script.
    pub fn push(&mut self, rolls: impl IntoIterator<Item = u32>) {
        self.rolls.extend(rolls);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }

    /// How many rolls have been drawn so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.consumed += 1;
        match self.rolls.pop_front() {
            Some(value) => value.clamp(min, max),
            None => min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rng_rolls_stay_in_inclusive_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..2000 {
            let value = rng.roll(3, 6);
            assert!((3..=6).contains(&value));
            saw_min |= value == 3;
            saw_max |= value == 6;
        }
        assert!(saw_min && saw_max, "both bounds should be reachable");
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let rolls_a: Vec<u32> = (0..20).map(|_| a.roll(1, 100)).collect();
        let rolls_b: Vec<u32> = (0..20).map(|_| b.roll(1, 100)).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.roll(5, 5), 5);
    }

    #[test]
    fn test_scripted_dice_replays_in_order() {
        let mut dice = ScriptedDice::new([4, 9, 2]);
        assert_eq!(dice.roll(1, 10), 4);
        assert_eq!(dice.roll(1, 10), 9);
        assert_eq!(dice.roll(1, 10), 2);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.consumed(), 3);
    }

    #[test]
    fn test_scripted_dice_clamps_and_falls_back_to_min() {
        let mut dice = ScriptedDice::new([50, 0]);
        assert_eq!(dice.roll(1, 10), 10);
        assert_eq!(dice.roll(3, 6), 3);
        // Exhausted
        assert_eq!(dice.roll(8, 15), 8);
    }

    #[test]
    fn test_scripted_dice_push_extends_script() {
        let mut dice = ScriptedDice::new([1]);
        dice.push([2, 3]);
        assert_eq!(dice.remaining(), 3);
    }
}
