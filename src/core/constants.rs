// Starting hero
pub const DEFAULT_HERO_NAME: &str = "Hero";
pub const MAX_NAME_CHARS: usize = 31;
pub const STARTING_MAX_HP: u32 = 40;
pub const STARTING_ATTACK: u32 = 6;
pub const STARTING_POTIONS: u32 = 2;
pub const STARTING_LEVEL: u32 = 1;

// Levels
pub const FIRST_LEVEL: u32 = 1;
pub const FINAL_LEVEL: u32 = 2;
pub const LEVEL_1_ENEMIES: u32 = 3;
pub const LEVEL_2_ENEMIES: u32 = 4;

// Enemy stat ranges (inclusive): (hp_min, hp_max, attack_min, attack_max)
pub const LEVEL_1_ENEMY_STATS: (u32, u32, u32, u32) = (10, 20, 3, 6);
pub const LEVEL_2_ENEMY_STATS: (u32, u32, u32, u32) = (18, 32, 5, 9);
pub const LEVEL_1_ENEMY_NAME: &str = "Goblin";
pub const LEVEL_2_ENEMY_NAMES: [&str; 3] = ["Orc", "Bandit", "Warrior"];

// Damage spread around the attacker's stat: [attack - LOW, attack + HIGH]
pub const PLAYER_DAMAGE_SPREAD: (u32, u32) = (1, 2);
pub const ENEMY_DAMAGE_SPREAD: (u32, u32) = (1, 1);
pub const MIN_DAMAGE: u32 = 1;

// Potions
pub const POTION_HEAL_RANGE: (u32, u32) = (8, 15);

// Post-fight rewards
pub const VICTORY_HEAL_RANGE: (u32, u32) = (2, 6);
pub const PERCENT_ROLL: (u32, u32) = (1, 100);
pub const LEVEL_1_POTION_DROP_PERCENT: u32 = 40;
pub const LEVEL_2_POTION_DROP_PERCENT: u32 = 25;

// Fleeing
pub const FLEE_SUCCESS_PERCENT: u32 = 50;
pub const FLEE_PENALTY_RANGE: (u32, u32) = (2, 5);

// Level-up gains by cleared level: (max_hp, attack)
pub const LEVEL_1_CLEAR_GAINS: (u32, u32) = (5, 1);
pub const LEVEL_2_CLEAR_GAINS: (u32, u32) = (8, 2);

// Pacing of delayed continuations
pub const ENEMY_TURN_DELAY_MS: u64 = 300;
pub const LEVEL_ENTRY_DELAY_MS: u64 = 600;
pub const NEXT_ENEMY_DELAY_MS: u64 = 700;

// Narration log
pub const LOG_CAPACITY: usize = 200;
