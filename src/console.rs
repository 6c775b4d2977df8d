//! Line-oriented front end: numbered menus over any reader/writer.
//!
//! Used by `dungeon-runner --plain` for terminals without raw mode and by the
//! integration tests, which feed scripted input.

use crate::core::combat_engine::{CombatEngine, CommandOutcome};
use crate::core::constants::FINAL_LEVEL;
use crate::core::dice::Dice;
use crate::core::game_state::{GameState, Phase};
use std::io::{self, BufRead, Write};
use std::thread;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ConsoleOptions {
    /// Skip the name prompt and use this name.
    pub name: Option<String>,
    /// Sleep for each continuation's delay before running it.
    pub paced: bool,
}

/// How a console session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// Both levels cleared.
    Completed,
    Defeated,
    /// Declined to enter the next level.
    Retired,
    /// Quit from the menu or input closed.
    Quit,
}

/// Play one session to its end.
pub fn run_console<D: Dice, R: BufRead, W: Write>(
    engine: &mut CombatEngine<D>,
    input: &mut R,
    output: &mut W,
    options: &ConsoleOptions,
) -> io::Result<ConsoleExit> {
    writeln!(output, "Welcome to Dungeon Runner ({FINAL_LEVEL} levels)!")?;
    let name = match &options.name {
        Some(name) => name.clone(),
        None => {
            write!(output, "\nEnter your hero name: ")?;
            output.flush()?;
            read_line(input)?.unwrap_or_default()
        }
    };

    let opening = engine.start_game(&name);
    print_outcome(output, &opening)?;
    drain_follow_ups(engine, output, options)?;

    loop {
        let state = engine.state();
        match engine.phase() {
            Phase::InBattle => {
                show_status(output, state)?;
                writeln!(
                    output,
                    "\nChoose action:\n1) Attack\n2) Use Potion\n3) Try to Flee (50% chance)\n0) Quit"
                )?;
                write!(output, "Enter choice: ")?;
                output.flush()?;

                let Some(choice) = read_line(input)? else {
                    return Ok(ConsoleExit::Quit);
                };
                let outcome = match choice.as_str() {
                    "1" => engine.attack(),
                    "2" => engine.use_potion(),
                    "3" => engine.flee(),
                    "0" | "q" => return Ok(ConsoleExit::Quit),
                    other => {
                        debug!(input = other, "invalid menu choice");
                        writeln!(output, "Invalid option, choose 1-3 (0 to quit).")?;
                        continue;
                    }
                };
                print_outcome(output, &outcome)?;
                drain_follow_ups(engine, output, options)?;
            }
            Phase::LevelCleared if state.is_complete() => {
                return Ok(ConsoleExit::Completed);
            }
            Phase::LevelCleared => {
                let next = state.level.number + 1;
                write!(
                    output,
                    "\nDo you want to enter Level {next} (harder)?\n1) Yes\n2) No (End game with current progress)\nChoice: "
                )?;
                output.flush()?;
                if read_line(input)?.as_deref() != Some("1") {
                    let level = state.player.as_ref().map_or(0, |p| p.level);
                    writeln!(output, "You chose to end your adventure. Final Level: {level}")?;
                    return Ok(ConsoleExit::Retired);
                }
                let outcome = engine.advance_level();
                print_outcome(output, &outcome)?;
                drain_follow_ups(engine, output, options)?;
            }
            Phase::GameOver => {
                let name = state.player.as_ref().map_or("Hero", |p| p.name.as_str());
                writeln!(output, "\n{name}'s journey ends here. Try again!")?;
                return Ok(ConsoleExit::Defeated);
            }
            // Nothing pending can move the game forward from here
            Phase::Spawning | Phase::Idle => return Ok(ConsoleExit::Quit),
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_outcome<W: Write>(output: &mut W, outcome: &CommandOutcome) -> io::Result<()> {
    for event in &outcome.events {
        writeln!(output, "{event}")?;
    }
    Ok(())
}

fn drain_follow_ups<D: Dice, W: Write>(
    engine: &mut CombatEngine<D>,
    output: &mut W,
    options: &ConsoleOptions,
) -> io::Result<()> {
    while let Some(follow_up) = engine.pending() {
        output.flush()?;
        if options.paced {
            thread::sleep(follow_up.delay);
        }
        let outcome = engine.resume();
        print_outcome(output, &outcome)?;
    }
    Ok(())
}

fn show_status<W: Write>(output: &mut W, state: &GameState) -> io::Result<()> {
    let Some(player) = state.player.as_ref() else {
        return Ok(());
    };
    writeln!(
        output,
        "\n=== {} ===\nHP: {}/{}   Attack: {}   Potions: {}   Level: {}",
        player.name, player.hp, player.max_hp, player.attack, player.potions, player.level
    )?;
    if let Some(enemy) = state.enemy.as_ref() {
        writeln!(
            output,
            "{}: {} HP | {}: {} HP (Attack {})",
            player.name,
            player.hp,
            enemy.name,
            enemy.display_hp(),
            enemy.attack
        )?;
    }
    writeln!(
        output,
        "Dungeon Level {} - enemies remaining: {}",
        state.level.number, state.level.enemies_remaining
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedDice;
    use std::io::Cursor;

    fn play(dice: ScriptedDice, script: &str) -> (ConsoleExit, String) {
        let mut engine = CombatEngine::new(dice);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let exit = run_console(&mut engine, &mut input, &mut output, &ConsoleOptions::default())
            .expect("console io");
        (exit, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn test_quit_from_menu() {
        let (exit, text) = play(ScriptedDice::new([15, 4]), "Ada\n0\n");
        assert_eq!(exit, ConsoleExit::Quit);
        assert!(text.contains("Welcome Ada! Level 1 begins. There are 3 enemies."));
        assert!(text.contains("=== Ada ===\nHP: 40/40   Attack: 6   Potions: 2   Level: 1"));
    }

    #[test]
    fn test_eof_quits() {
        let (exit, _) = play(ScriptedDice::new([15, 4]), "Ada\n");
        assert_eq!(exit, ConsoleExit::Quit);
    }

    #[test]
    fn test_invalid_choice_reprompts_without_acting() {
        let (exit, text) = play(ScriptedDice::new([15, 4]), "Ada\n9\n0\n");
        assert_eq!(exit, ConsoleExit::Quit);
        assert!(text.contains("Invalid option"));
        assert!(!text.contains("attacks"));
    }

    #[test]
    fn test_blank_name_becomes_hero() {
        let (_, text) = play(ScriptedDice::new([15, 4]), "\n0\n");
        assert!(text.contains("Welcome Hero!"));
    }

    #[test]
    fn test_defeat_ends_session() {
        // Six failed flee attempts, each answered by a 7 damage hit: 42 > 40 HP
        let mut rolls = vec![20, 6];
        for _ in 0..6 {
            rolls.extend([100, 7]);
        }
        let script = "Ada\n".to_string() + &"3\n".repeat(6);
        let (exit, text) = play(ScriptedDice::new(rolls), &script);
        assert_eq!(exit, ConsoleExit::Defeated);
        assert_eq!(text.matches("Flee failed!").count(), 6);
        assert!(text.contains("Ada has been defeated... Game Over."));
        assert!(text.contains("Ada's journey ends here."));
    }
}
