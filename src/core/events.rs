//! Narration events produced by engine commands.
//!
//! The engine never formats UI; it emits [`GameEvent`]s and each front end
//! renders them. `Display` gives the canonical narration line.

use serde::Serialize;
use std::fmt;

/// A single narrated outcome, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    // ── Session ─────────────────────────────────────────────────
    Welcome {
        player: String,
        level: u32,
        enemies: u32,
    },
    EnteringLevel {
        level: u32,
    },
    /// A spawn was requested but the level has no enemies left.
    NoMoreEnemies {
        level: u32,
    },

    // ── Combat ──────────────────────────────────────────────────
    EnemyAppears {
        enemy: String,
        hp: u32,
        attack: u32,
    },
    PlayerAttack {
        player: String,
        enemy: String,
        damage: u32,
    },
    EnemyAttack {
        enemy: String,
        player: String,
        damage: u32,
    },
    EnemyDefeated {
        enemy: String,
    },
    /// Player HP reached zero in combat.
    PlayerDefeated {
        player: String,
    },

    // ── Potions and rewards ─────────────────────────────────────
    PotionUsed {
        player: String,
        heal: u32,
    },
    NoPotions,
    PotionFound,
    Recovered {
        heal: u32,
    },

    // ── Fleeing ─────────────────────────────────────────────────
    FleeSucceeded {
        player: String,
        enemy: String,
    },
    FleePenalty {
        penalty: u32,
    },
    FleeFailed,
    /// Player HP reached zero from the flee penalty.
    Collapsed {
        player: String,
    },

    // ── Progression ─────────────────────────────────────────────
    LevelCleared {
        level: u32,
    },
    LeveledUp {
        level: u32,
        max_hp: u32,
        attack: u32,
    },
    /// Final level cleared; the run is complete.
    Victory {
        player: String,
        level: u32,
        max_hp: u32,
        attack: u32,
        potions: u32,
    },
    LevelNotCleared {
        remaining: u32,
    },
    NoMoreLevels,
}

/// How a front end should color an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventTone {
    Good,
    Bad,
    Neutral,
}

impl GameEvent {
    pub fn tone(&self) -> EventTone {
        match self {
            GameEvent::PlayerAttack { .. }
            | GameEvent::EnemyDefeated { .. }
            | GameEvent::PotionUsed { .. }
            | GameEvent::PotionFound
            | GameEvent::Recovered { .. }
            | GameEvent::FleeSucceeded { .. }
            | GameEvent::LevelCleared { .. }
            | GameEvent::LeveledUp { .. }
            | GameEvent::Victory { .. } => EventTone::Good,
            GameEvent::EnemyAttack { .. }
            | GameEvent::PlayerDefeated { .. }
            | GameEvent::FleePenalty { .. }
            | GameEvent::FleeFailed
            | GameEvent::Collapsed { .. }
            | GameEvent::NoPotions => EventTone::Bad,
            _ => EventTone::Neutral,
        }
    }

    /// True for the two events that end a session in defeat.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameEvent::PlayerDefeated { .. } | GameEvent::Collapsed { .. }
        )
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Welcome {
                player,
                level,
                enemies,
            } => write!(
                f,
                "Welcome {player}! Level {level} begins. There are {enemies} enemies."
            ),
            GameEvent::EnteringLevel { level } => {
                write!(f, "Entering Level {level}: harder enemies ahead!")
            }
            GameEvent::NoMoreEnemies { level } => write!(f, "No more enemies in Level {level}."),
            GameEvent::EnemyAppears { enemy, hp, attack } => {
                write!(f, "A {enemy} appears! (HP {hp}, Attack {attack})")
            }
            GameEvent::PlayerAttack {
                player,
                enemy,
                damage,
            } => write!(f, "{player} attacks {enemy} for {damage} damage."),
            GameEvent::EnemyAttack {
                enemy,
                player,
                damage,
            } => write!(f, "{enemy} hits {player} for {damage} damage."),
            GameEvent::EnemyDefeated { enemy } => write!(f, "{enemy} was defeated!"),
            GameEvent::PlayerDefeated { player } => {
                write!(f, "{player} has been defeated... Game Over.")
            }
            GameEvent::PotionUsed { player, heal } => {
                write!(f, "{player} uses a potion and heals {heal} HP.")
            }
            GameEvent::NoPotions => write!(f, "No potions available!"),
            GameEvent::PotionFound => write!(f, "You found a potion!"),
            GameEvent::Recovered { heal } => write!(f, "You recovered {heal} HP after the fight."),
            GameEvent::FleeSucceeded { player, enemy } => {
                write!(f, "{player} successfully fled from {enemy}!")
            }
            GameEvent::FleePenalty { penalty } => write!(f, "While fleeing you lost {penalty} HP."),
            GameEvent::FleeFailed => write!(f, "Flee failed! Enemy attacks you as you try to run."),
            GameEvent::Collapsed { player } => {
                write!(f, "{player} collapsed from wounds... Game Over.")
            }
            GameEvent::LevelCleared { level } => write!(f, "Level {level} cleared!"),
            GameEvent::LeveledUp {
                level,
                max_hp,
                attack,
            } => write!(
                f,
                "You leveled up! Now Level {level}. Max HP: {max_hp}, Attack: {attack}"
            ),
            GameEvent::Victory {
                player,
                level,
                max_hp,
                attack,
                potions,
            } => write!(
                f,
                "Congratulations {player}! You finished both levels. \
                 Final stats: Level {level} | Max HP {max_hp} | Attack {attack} | Potions {potions}"
            ),
            GameEvent::LevelNotCleared { remaining } => write!(
                f,
                "Defeat the remaining {remaining} enemies before moving on."
            ),
            GameEvent::NoMoreLevels => {
                write!(f, "No more levels. You already finished both levels!")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_narration() {
        let event = GameEvent::PlayerAttack {
            player: "Rin".to_string(),
            enemy: "Goblin #1".to_string(),
            damage: 7,
        };
        assert_eq!(event.to_string(), "Rin attacks Goblin #1 for 7 damage.");
        assert_eq!(event.tone(), EventTone::Good);
    }

    #[test]
    fn test_enemy_appears_narration() {
        let event = GameEvent::EnemyAppears {
            enemy: "Orc #1".to_string(),
            hp: 25,
            attack: 7,
        };
        assert_eq!(event.to_string(), "A Orc #1 appears! (HP 25, Attack 7)");
    }

    #[test]
    fn test_level_up_narration() {
        let event = GameEvent::LeveledUp {
            level: 2,
            max_hp: 45,
            attack: 7,
        };
        assert_eq!(
            event.to_string(),
            "You leveled up! Now Level 2. Max HP: 45, Attack: 7"
        );
    }

    #[test]
    fn test_fatal_events() {
        assert!(GameEvent::PlayerDefeated {
            player: "Ada".to_string()
        }
        .is_fatal());
        assert!(GameEvent::Collapsed {
            player: "Ada".to_string()
        }
        .is_fatal());
        assert!(!GameEvent::FleeFailed.is_fatal());
        assert_eq!(GameEvent::FleeFailed.tone(), EventTone::Bad);
    }

    #[test]
    fn test_victory_mentions_final_stats() {
        let text = GameEvent::Victory {
            player: "Ada".to_string(),
            level: 3,
            max_hp: 53,
            attack: 9,
            potions: 1,
        }
        .to_string();
        assert!(text.starts_with("Congratulations Ada!"));
        assert!(text.contains("Level 3 | Max HP 53 | Attack 9 | Potions 1"));
    }
}
