//! Integration test: scripted play through the line-oriented front end.

use dungeon_runner::console::{run_console, ConsoleExit, ConsoleOptions};
use dungeon_runner::{CombatEngine, ScriptedDice};
use std::io::Cursor;

/// Plays with an empty script, so every roll is the minimum of its range.
fn play_min_rolls(script: &str, options: &ConsoleOptions) -> (ConsoleExit, String) {
    let mut engine = CombatEngine::new(ScriptedDice::default());
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let exit = run_console(&mut engine, &mut input, &mut output, options).expect("console io");
    (exit, String::from_utf8(output).expect("utf8 output"))
}

/// Two swings per goblin on level 1.
fn level_one_script() -> String {
    "Rin\n".to_string() + &"1\n".repeat(6)
}

#[test]
fn test_console_full_run_to_victory() {
    // Three swings per brute on level 2
    let script = level_one_script() + "1\n" + &"1\n".repeat(12);
    let (exit, text) = play_min_rolls(&script, &ConsoleOptions::default());

    assert_eq!(exit, ConsoleExit::Completed);
    assert!(text.contains("Level 1 cleared!"));
    assert!(text.contains("You leveled up! Now Level 2. Max HP: 45, Attack: 7"));
    assert!(text.contains("Entering Level 2: harder enemies ahead!"));
    assert!(text.contains("A Orc #1 appears! (HP 18, Attack 5)"));
    assert!(text.contains("A Orc #4 appears!"));
    assert!(text.contains("Congratulations Rin! You finished both levels."));
}

#[test]
fn test_console_retire_after_level_one() {
    let script = level_one_script() + "2\n";
    let (exit, text) = play_min_rolls(&script, &ConsoleOptions::default());

    assert_eq!(exit, ConsoleExit::Retired);
    assert!(text.contains("Do you want to enter Level 2 (harder)?"));
    assert!(text.contains("You chose to end your adventure. Final Level: 2"));
    assert!(!text.contains("Entering Level 2"));
}

#[test]
fn test_console_name_option_skips_prompt() {
    let options = ConsoleOptions {
        name: Some("Kestrel".to_string()),
        paced: false,
    };
    let (exit, text) = play_min_rolls("0\n", &options);

    assert_eq!(exit, ConsoleExit::Quit);
    assert!(!text.contains("Enter your hero name"));
    assert!(text.contains("Welcome Kestrel! Level 1 begins."));
}

#[test]
fn test_console_potion_then_enemy_turn_in_order() {
    let (_, text) = play_min_rolls("Rin\n2\n0\n", &ConsoleOptions::default());

    let potion = text.find("Rin uses a potion and heals 8 HP.").expect("potion line");
    let hit = text.find("Goblin #1 hits Rin for 2 damage.").expect("enemy line");
    assert!(potion < hit);
    assert!(text.contains("Potions: 1"));
}

#[test]
fn test_console_flee_moves_straight_to_next_enemy() {
    // Minimum d100 roll: the flee succeeds and costs 2 HP
    let (exit, text) = play_min_rolls("Rin\n3\n0\n", &ConsoleOptions::default());

    assert_eq!(exit, ConsoleExit::Quit);
    assert!(text.contains("Rin successfully fled from Goblin #1!"));
    assert!(text.contains("While fleeing you lost 2 HP."));
    let fled = text.find("While fleeing").expect("penalty line");
    let next = text.find("A Goblin #2 appears!").expect("next enemy");
    assert!(fled < next);
    assert!(!text.contains("retreat"));
    assert!(text.contains("HP: 38/40"));
}
