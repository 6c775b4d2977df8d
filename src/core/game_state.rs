use crate::combat::types::Enemy;
use crate::core::constants::*;
use crate::core::events::{EventTone, GameEvent};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The hero. Invariant: `hp <= max_hp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub level: u32,
    pub potions: u32,
}

impl Player {
    /// A fresh level 1 hero. Blank names become [`DEFAULT_HERO_NAME`].
    pub fn new(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            max_hp: STARTING_MAX_HP,
            hp: STARTING_MAX_HP,
            attack: STARTING_ATTACK,
            level: STARTING_LEVEL,
            potions: STARTING_POTIONS,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Trim the entered name, fall back to the default and cap its length.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_HERO_NAME.to_string()
    } else {
        trimmed.chars().take(MAX_NAME_CHARS).collect::<String>().trim_end().to_string()
    }
}

/// Progress through the current dungeon level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub number: u32,
    /// Enemies left to spawn or fight (fleeing also consumes one).
    pub enemies_remaining: u32,
    /// Enemies spawned so far on this level; the next spawn's 0-based index.
    pub enemies_spawned: u32,
}

impl LevelState {
    pub fn new(number: u32, enemies: u32) -> Self {
        Self {
            number,
            enemies_remaining: enemies,
            enemies_spawned: 0,
        }
    }

    pub fn is_final(&self) -> bool {
        self.number >= FINAL_LEVEL
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new(FIRST_LEVEL, 0)
    }
}

/// One line of the narration log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub message: String,
    pub tone: EventTone,
}

/// Where the session sits in the combat state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No game started yet.
    Idle,
    /// Between fights, waiting for the next enemy to appear.
    Spawning,
    InBattle,
    /// Every enemy on the level is gone.
    LevelCleared,
    GameOver,
}

/// Which commands a front end should currently allow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub attack: bool,
    pub use_potion: bool,
    pub flee: bool,
    pub advance_level: bool,
}

impl Controls {
    pub fn any_battle_action(&self) -> bool {
        self.attack || self.use_potion || self.flee
    }
}

/// The whole mutable session, owned by a single [`crate::CombatEngine`].
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub player: Option<Player>,
    pub enemy: Option<Enemy>,
    pub level: LevelState,
    pub in_battle: bool,
    pub game_over: bool,
    pub log: VecDeque<LogEntry>,
}

impl GameState {
    pub fn add_log_entry(&mut self, event: &GameEvent) {
        if self.log.len() >= LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            message: event.to_string(),
            tone: event.tone(),
        });
    }

    pub fn phase(&self) -> Phase {
        if self.player.is_none() {
            Phase::Idle
        } else if self.game_over {
            Phase::GameOver
        } else if self.in_battle {
            Phase::InBattle
        } else if self.level.enemies_remaining == 0 {
            Phase::LevelCleared
        } else {
            Phase::Spawning
        }
    }

    /// True once the final level has been cleared.
    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::LevelCleared && self.level.is_final()
    }
}

/// Read-only view handed to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub player: Option<Player>,
    pub enemy: Option<Enemy>,
    pub level: u32,
    pub enemies_remaining: u32,
    pub in_battle: bool,
    pub game_over: bool,
    pub phase: Phase,
    pub controls: Controls,
    /// A delayed continuation is outstanding; input should wait for it.
    pub awaiting_follow_up: bool,
}
