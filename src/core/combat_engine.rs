//! The combat state machine.
//!
//! [`CombatEngine`] owns the whole session ([`GameState`]) and the session's
//! [`Dice`]. Front ends call the five commands and render the returned
//! [`GameEvent`]s; they never touch the state directly.
//!
//! Some commands end with a paced continuation (the enemy's turn after a
//! potion, the next spawn after a victory). Instead of owning a timer, the
//! engine returns a [`FollowUp`] describing the action and its delay and keeps
//! it as the single pending continuation. The host waits however it likes and
//! then calls [`CombatEngine::resume`]. Until then every battle command is a
//! no-op and [`CombatEngine::controls`] reports them disabled.

use super::constants::*;
use super::dice::Dice;
use super::events::GameEvent;
use super::game_state::{Controls, GameSnapshot, GameState, LevelState, LogEntry, Phase, Player};
use crate::combat::logic::*;
use crate::combat::types::generate_enemy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info};

/// A continuation to run after a cosmetic delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpAction {
    /// The enemy retaliates after the player drank a potion.
    EnemyTurn,
    /// The next enemy of the level steps up.
    SpawnEnemy,
    /// The level's last slot was consumed by fleeing; wrap the level up.
    ClearLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp {
    pub action: FollowUpAction,
    pub delay: Duration,
}

/// Everything one command (or one resumed continuation) produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub events: Vec<GameEvent>,
    pub follow_up: Option<FollowUp>,
}

impl CommandOutcome {
    /// Narration lines in order.
    pub fn narration(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.follow_up.is_none()
    }
}

/// Owns one game session.
pub struct CombatEngine<D: Dice> {
    state: GameState,
    dice: D,
    pending: Option<FollowUp>,
}

impl CombatEngine<ChaCha8Rng> {
    /// Engine whose whole session is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<D: Dice> CombatEngine<D> {
    /// A new engine in the `Idle` phase.
    pub fn new(dice: D) -> Self {
        Self {
            state: GameState::default(),
            dice,
            pending: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Mutable access, e.g. to append rolls to a [`ScriptedDice`](super::dice::ScriptedDice).
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn log(&self) -> &VecDeque<LogEntry> {
        &self.state.log
    }

    /// The outstanding continuation, if any.
    pub fn pending(&self) -> Option<FollowUp> {
        self.pending
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.state.player.clone(),
            enemy: self.state.enemy.clone(),
            level: self.state.level.number,
            enemies_remaining: self.state.level.enemies_remaining,
            in_battle: self.state.in_battle,
            game_over: self.state.game_over,
            phase: self.phase(),
            controls: self.controls(),
            awaiting_follow_up: self.pending.is_some(),
        }
    }

    pub fn controls(&self) -> Controls {
        let battle = self.battle_ready();
        let advance_level = self.state.player.is_some()
            && self.pending.is_none()
            && !self.state.in_battle
            && !self.state.game_over
            && self.state.level.enemies_remaining == 0
            && !self.state.level.is_final();
        Controls {
            attack: battle,
            use_potion: battle,
            flee: battle,
            advance_level,
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Start (or restart) a session with a fresh hero on level 1.
    pub fn start_game(&mut self, name: &str) -> CommandOutcome {
        let mut out = CommandOutcome::default();
        let player = Player::new(name);
        let enemies = enemies_for_level(FIRST_LEVEL);
        info!(player = %player.name, "starting new game");

        let welcome = GameEvent::Welcome {
            player: player.name.clone(),
            level: FIRST_LEVEL,
            enemies,
        };
        self.pending = None;
        self.state = GameState {
            player: Some(player),
            level: LevelState::new(FIRST_LEVEL, enemies),
            ..GameState::default()
        };
        self.emit(&mut out, welcome);
        self.spawn_enemy(&mut out);
        out
    }

    /// Strike the current enemy; it retaliates if it survives.
    pub fn attack(&mut self) -> CommandOutcome {
        let mut out = CommandOutcome::default();
        if !self.battle_ready() {
            return out;
        }
        let Some(player) = self.state.player.as_ref() else {
            return out;
        };
        let player_name = player.name.clone();
        let damage = roll_player_damage(player.attack, &mut self.dice);

        let Some(enemy) = self.state.enemy.as_mut() else {
            return out;
        };
        enemy.take_damage(damage);
        let enemy_name = enemy.name.clone();
        let defeated = !enemy.is_alive();
        debug!(damage, enemy_hp = enemy.hp, "player attack");

        self.emit(
            &mut out,
            GameEvent::PlayerAttack {
                player: player_name,
                enemy: enemy_name.clone(),
                damage,
            },
        );
        if defeated {
            self.emit(&mut out, GameEvent::EnemyDefeated { enemy: enemy_name });
            self.after_enemy_defeat(&mut out);
        } else {
            self.enemy_turn(&mut out);
        }
        out
    }

    /// Drink a potion. The enemy still gets its turn, after a short pause.
    pub fn use_potion(&mut self) -> CommandOutcome {
        let mut out = CommandOutcome::default();
        if !self.battle_ready() {
            return out;
        }
        let potions = self.state.player.as_ref().map_or(0, |p| p.potions);
        if potions == 0 {
            self.emit(&mut out, GameEvent::NoPotions);
            return out;
        }

        let heal = roll_potion_heal(&mut self.dice);
        let Some(player) = self.state.player.as_mut() else {
            return out;
        };
        player.hp = apply_heal(player.hp, heal, player.max_hp);
        player.potions -= 1;
        let player_name = player.name.clone();
        debug!(heal, hp = player.hp, potions = player.potions, "potion used");

        self.emit(
            &mut out,
            GameEvent::PotionUsed {
                player: player_name,
                heal,
            },
        );
        if self.state.in_battle && self.state.enemy.is_some() {
            self.schedule(&mut out, FollowUpAction::EnemyTurn, ENEMY_TURN_DELAY_MS);
        }
        out
    }

    /// Try to run. Success costs a little HP and the enemy's slot on the level.
    pub fn flee(&mut self) -> CommandOutcome {
        let mut out = CommandOutcome::default();
        if !self.battle_ready() {
            return out;
        }
        let escaped = roll_percent(FLEE_SUCCESS_PERCENT, &mut self.dice);
        if !escaped {
            debug!("flee failed");
            self.emit(&mut out, GameEvent::FleeFailed);
            self.enemy_turn(&mut out);
            return out;
        }

        let (Some(player), Some(enemy)) = (self.state.player.as_ref(), self.state.enemy.as_ref())
        else {
            return out;
        };
        let player_name = player.name.clone();
        let enemy_name = enemy.name.clone();
        self.emit(
            &mut out,
            GameEvent::FleeSucceeded {
                player: player_name.clone(),
                enemy: enemy_name,
            },
        );

        let penalty = roll_flee_penalty(&mut self.dice);
        let alive = match self.state.player.as_mut() {
            Some(player) => {
                player.hp = apply_damage(player.hp, penalty);
                player.is_alive()
            }
            None => return out,
        };
        self.emit(&mut out, GameEvent::FleePenalty { penalty });

        // The fled-from enemy counts against the level as if it were beaten
        self.end_encounter();
        debug!(
            penalty,
            remaining = self.state.level.enemies_remaining,
            "fled from battle"
        );

        if !alive {
            self.state.game_over = true;
            info!(player = %player_name, "player collapsed while fleeing");
            self.emit(
                &mut out,
                GameEvent::Collapsed {
                    player: player_name,
                },
            );
            return out;
        }

        let next = if self.state.level.enemies_remaining > 0 {
            FollowUpAction::SpawnEnemy
        } else {
            FollowUpAction::ClearLevel
        };
        self.schedule(&mut out, next, NEXT_ENEMY_DELAY_MS);
        out
    }

    /// Move on to the next level once the current one is cleared.
    pub fn advance_level(&mut self) -> CommandOutcome {
        let mut out = CommandOutcome::default();
        if self.state.player.is_none() || self.state.game_over || self.pending.is_some() {
            return out;
        }
        if self.state.level.is_final() {
            self.emit(&mut out, GameEvent::NoMoreLevels);
            return out;
        }
        let remaining = self.state.level.enemies_remaining;
        if self.state.in_battle || remaining > 0 {
            self.emit(&mut out, GameEvent::LevelNotCleared { remaining });
            return out;
        }

        let next = self.state.level.number + 1;
        self.state.level = LevelState::new(next, enemies_for_level(next));
        self.state.enemy = None;
        self.state.in_battle = false;
        self.state.game_over = false;
        info!(level = next, "entering level");

        self.emit(&mut out, GameEvent::EnteringLevel { level: next });
        self.schedule(&mut out, FollowUpAction::SpawnEnemy, LEVEL_ENTRY_DELAY_MS);
        out
    }

    /// Run the pending continuation, if any.
    ///
    /// Continuations are dropped once the game is over.
    pub fn resume(&mut self) -> CommandOutcome {
        let mut out = CommandOutcome::default();
        let Some(follow_up) = self.pending.take() else {
            return out;
        };
        if self.state.game_over {
            debug!(action = ?follow_up.action, "dropping continuation after game over");
            return out;
        }
        debug!(action = ?follow_up.action, "resuming");

        match follow_up.action {
            FollowUpAction::EnemyTurn => {
                if self.state.in_battle && self.state.enemy.is_some() {
                    self.enemy_turn(&mut out);
                }
            }
            FollowUpAction::SpawnEnemy => self.spawn_enemy(&mut out),
            FollowUpAction::ClearLevel => self.clear_level(&mut out),
        }
        out
    }

    /// Run continuations back to back, ignoring their delays.
    pub fn settle(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while self.pending.is_some() {
            events.extend(self.resume().events);
        }
        events
    }

    // ── Transitions ─────────────────────────────────────────────

    fn battle_ready(&self) -> bool {
        self.pending.is_none()
            && self.state.in_battle
            && !self.state.game_over
            && self.state.player.is_some()
            && self.state.enemy.is_some()
    }

    fn emit(&mut self, out: &mut CommandOutcome, event: GameEvent) {
        self.state.add_log_entry(&event);
        out.events.push(event);
    }

    fn schedule(&mut self, out: &mut CommandOutcome, action: FollowUpAction, delay_ms: u64) {
        let follow_up = FollowUp {
            action,
            delay: Duration::from_millis(delay_ms),
        };
        debug!(?action, delay_ms, "scheduled continuation");
        self.pending = Some(follow_up);
        out.follow_up = Some(follow_up);
    }

    fn spawn_enemy(&mut self, out: &mut CommandOutcome) {
        let level = self.state.level.number;
        if self.state.level.enemies_remaining == 0 {
            self.state.enemy = None;
            self.state.in_battle = false;
            self.emit(out, GameEvent::NoMoreEnemies { level });
            return;
        }

        let index = self.state.level.enemies_spawned;
        let enemy = generate_enemy(level, index, &mut self.dice);
        self.state.level.enemies_spawned += 1;
        debug!(name = %enemy.name, hp = enemy.hp, attack = enemy.attack, "enemy spawned");

        let appears = GameEvent::EnemyAppears {
            enemy: enemy.name.clone(),
            hp: enemy.display_hp(),
            attack: enemy.attack,
        };
        self.state.enemy = Some(enemy);
        self.state.in_battle = true;
        self.emit(out, appears);
    }

    fn enemy_turn(&mut self, out: &mut CommandOutcome) {
        let Some(enemy) = self.state.enemy.as_ref() else {
            return;
        };
        let enemy_name = enemy.name.clone();
        let damage = roll_enemy_damage(enemy.attack, &mut self.dice);

        let Some(player) = self.state.player.as_mut() else {
            return;
        };
        player.hp = apply_damage(player.hp, damage);
        let player_name = player.name.clone();
        let alive = player.is_alive();
        debug!(damage, hp = player.hp, "enemy attack");

        self.emit(
            out,
            GameEvent::EnemyAttack {
                enemy: enemy_name,
                player: player_name.clone(),
                damage,
            },
        );
        if !alive {
            self.state.game_over = true;
            self.state.in_battle = false;
            info!(player = %player_name, level = self.state.level.number, "player defeated");
            self.emit(
                out,
                GameEvent::PlayerDefeated {
                    player: player_name,
                },
            );
        }
    }

    /// Post-fight reward, then either queue the next enemy or close the level.
    fn after_enemy_defeat(&mut self, out: &mut CommandOutcome) {
        let heal = roll_victory_heal(&mut self.dice);
        let found_potion = roll_percent(potion_drop_percent(self.state.level.number), &mut self.dice);
        if let Some(player) = self.state.player.as_mut() {
            player.hp = apply_heal(player.hp, heal, player.max_hp);
            if found_potion {
                player.potions += 1;
            }
        }
        if found_potion {
            self.emit(out, GameEvent::PotionFound);
        }
        self.emit(out, GameEvent::Recovered { heal });
        self.end_encounter();

        if self.state.game_over {
            return;
        }
        if self.state.level.enemies_remaining > 0 {
            self.schedule(out, FollowUpAction::SpawnEnemy, NEXT_ENEMY_DELAY_MS);
        } else {
            self.clear_level(out);
        }
    }

    fn end_encounter(&mut self) {
        self.state.level.enemies_remaining = self.state.level.enemies_remaining.saturating_sub(1);
        self.state.in_battle = false;
        self.state.enemy = None;
    }

    /// Level-up for the level just cleared, plus the victory line on the last one.
    fn clear_level(&mut self, out: &mut CommandOutcome) {
        let level = self.state.level.number;
        self.state.enemy = None;
        self.state.in_battle = false;
        self.emit(out, GameEvent::LevelCleared { level });

        let (hp_gain, attack_gain) = level_clear_gains(level);
        let Some(player) = self.state.player.as_mut() else {
            return;
        };
        player.level += 1;
        player.max_hp += hp_gain;
        player.attack += attack_gain;
        player.hp = player.max_hp;
        let leveled_up = GameEvent::LeveledUp {
            level: player.level,
            max_hp: player.max_hp,
            attack: player.attack,
        };
        let victory = (level >= FINAL_LEVEL).then(|| GameEvent::Victory {
            player: player.name.clone(),
            level: player.level,
            max_hp: player.max_hp,
            attack: player.attack,
            potions: player.potions,
        });
        info!(cleared = level, player_level = player.level, "level cleared");

        self.emit(out, leveled_up);
        if let Some(victory) = victory {
            self.emit(out, victory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;

    /// Engine already in battle with a scripted Goblin #1 (hp, attack).
    fn scripted_battle(enemy_hp: u32, enemy_attack: u32) -> CombatEngine<ScriptedDice> {
        let mut engine = CombatEngine::new(ScriptedDice::new([enemy_hp, enemy_attack]));
        engine.start_game("Ada");
        engine
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = CombatEngine::new(ScriptedDice::default());
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.controls(), Controls::default());
    }

    #[test]
    fn test_start_game_spawns_first_goblin() {
        let engine = scripted_battle(15, 4);
        let state = engine.state();
        assert_eq!(engine.phase(), Phase::InBattle);
        assert_eq!(state.level.enemies_remaining, 3);
        let enemy = state.enemy.as_ref().expect("enemy spawned");
        assert_eq!(enemy.name, "Goblin #1");
        assert_eq!(enemy.hp, 15);
        assert_eq!(enemy.attack, 4);
        assert_eq!(engine.log().len(), 2);
    }

    #[test]
    fn test_attack_then_retaliation_order() {
        let mut engine = scripted_battle(15, 4);
        engine.dice.push([6, 4]);
        let out = engine.attack();
        assert_eq!(
            out.narration(),
            vec![
                "Ada attacks Goblin #1 for 6 damage.".to_string(),
                "Goblin #1 hits Ada for 4 damage.".to_string(),
            ]
        );
        assert_eq!(engine.state().enemy.as_ref().map(|e| e.hp), Some(9));
        assert_eq!(engine.state().player.as_ref().map(|p| p.hp), Some(36));
        assert!(out.follow_up.is_none());
    }

    #[test]
    fn test_kill_schedules_next_spawn() {
        let mut engine = scripted_battle(10, 4);
        // damage 8, retaliation 4, then damage 5, victory heal 2, potion roll 100
        engine.dice.push([8, 4]);
        engine.attack();
        engine.dice.push([5, 2, 100]);
        let out = engine.attack();
        assert_eq!(
            out.follow_up,
            Some(FollowUp {
                action: FollowUpAction::SpawnEnemy,
                delay: Duration::from_millis(NEXT_ENEMY_DELAY_MS),
            })
        );
        assert_eq!(engine.phase(), Phase::Spawning);
        assert_eq!(engine.state().level.enemies_remaining, 2);
        assert!(!engine.controls().any_battle_action());

        engine.dice.push([12, 3]);
        let resumed = engine.resume();
        assert_eq!(resumed.narration(), vec!["A Goblin #2 appears! (HP 12, Attack 3)"]);
        assert!(engine.controls().attack);
    }

    #[test]
    fn test_potion_defers_enemy_turn() {
        let mut engine = scripted_battle(15, 4);
        engine.dice.push([10]);
        let out = engine.use_potion();
        assert_eq!(out.events.len(), 1);
        assert_eq!(
            out.follow_up.map(|f| f.action),
            Some(FollowUpAction::EnemyTurn)
        );
        assert_eq!(engine.state().player.as_ref().map(|p| p.potions), Some(1));

        // Input is locked until the continuation runs
        assert!(engine.attack().is_empty());

        engine.dice.push([5]);
        let resumed = engine.resume();
        assert_eq!(resumed.narration(), vec!["Goblin #1 hits Ada for 5 damage."]);
        assert_eq!(engine.state().player.as_ref().map(|p| p.hp), Some(35));
    }

    #[test]
    fn test_resume_without_pending_is_noop() {
        let mut engine = scripted_battle(15, 4);
        assert!(engine.resume().is_empty());
    }

    #[test]
    fn test_restart_discards_pending() {
        let mut engine = scripted_battle(15, 4);
        engine.dice.push([10]);
        engine.use_potion();
        assert!(engine.pending().is_some());
        engine.dice.push([11, 5]);
        engine.start_game("Bo");
        assert!(engine.pending().is_none());
        assert_eq!(engine.log().len(), 2);
        assert_eq!(engine.state().player.as_ref().map(|p| p.name.as_str()), Some("Bo"));
    }
}
