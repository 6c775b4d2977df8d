mod input;
mod ui;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dungeon_runner::console::{run_console, ConsoleExit, ConsoleOptions};
use dungeon_runner::utils::logging::{init_logging, LogTarget};
use dungeon_runner::utils::paths;
use dungeon_runner::{AppError, CombatEngine, CommandOutcome, Dice};
use input::{dispatch, map_key, GameInput};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use ui::name_entry::NameEntryScreen;

const POLL_INTERVAL_MS: u64 = 50;

/// Two-level dungeon crawl in the terminal.
#[derive(Parser, Debug)]
#[command(name = "dungeon-runner", version = dungeon_runner::build_info::VERSION_LINE)]
struct Cli {
    /// Hero name; skips the name screen
    #[arg(short, long)]
    name: Option<String>,

    /// Seed the dice for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Line-oriented menus on stdin/stdout instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Run delayed turns immediately
    #[arg(long)]
    no_delay: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

enum Screen {
    NameEntry,
    Game,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let _log_guard = init_logging(LogTarget::File(paths::log_dir()?), &cli.log_level)?;
    info!(seed = ?cli.seed, plain = cli.plain, "dungeon-runner starting");

    let mut engine = match cli.seed {
        Some(seed) => CombatEngine::with_seed(seed),
        None => CombatEngine::from_entropy(),
    };

    if cli.plain {
        let options = ConsoleOptions {
            name: cli.name.clone(),
            paced: !cli.no_delay,
        };
        let stdin = io::stdin();
        let exit = run_console(&mut engine, &mut stdin.lock(), &mut io::stdout(), &options)?;
        info!(?exit, "console session ended");
        if exit == ConsoleExit::Completed {
            println!("Thanks for playing!");
        }
        return Ok(());
    }

    run_tui(&mut engine, &cli)
}

fn run_tui<D: Dice>(engine: &mut CombatEngine<D>, cli: &Cli) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = game_loop(&mut terminal, engine, cli);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "game loop failed");
    }
    result?;
    println!("Goodbye!");
    Ok(())
}

fn game_loop<D: Dice>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut CombatEngine<D>,
    cli: &Cli,
) -> io::Result<()> {
    let mut name_screen = cli
        .name
        .as_deref()
        .map_or_else(NameEntryScreen::new, NameEntryScreen::with_name);
    let mut current_screen = match cli.name.as_deref() {
        Some(name) => {
            engine.start_game(name);
            Screen::Game
        }
        None => Screen::NameEntry,
    };
    // When the pending continuation may run
    let mut follow_up_due: Option<Instant> = None;

    loop {
        match current_screen {
            Screen::NameEntry => {
                terminal.draw(|f| {
                    let area = f.size();
                    name_screen.draw(f, area);
                })?;

                if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                    if let Event::Key(key_event) = event::read()? {
                        if key_event.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key_event.code {
                            KeyCode::Char(c) => name_screen.handle_char_input(c),
                            KeyCode::Backspace => name_screen.handle_backspace(),
                            KeyCode::Left => name_screen.move_cursor_left(),
                            KeyCode::Right => name_screen.move_cursor_right(),
                            KeyCode::Enter => {
                                let outcome = engine.start_game(&name_screen.get_name());
                                follow_up_due = due_time(&outcome, cli.no_delay);
                                current_screen = Screen::Game;
                            }
                            KeyCode::Esc => return Ok(()),
                            _ => {}
                        }
                    }
                }
            }
            Screen::Game => {
                let snapshot = engine.snapshot();
                terminal.draw(|frame| {
                    ui::draw_game(frame, &snapshot, engine.log());
                })?;

                if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                    if let Event::Key(key_event) = event::read()? {
                        if key_event.kind != KeyEventKind::Press {
                            continue;
                        }
                        match map_key(key_event) {
                            GameInput::Quit => return Ok(()),
                            GameInput::Restart => {
                                name_screen = NameEntryScreen::with_name(&name_screen.get_name());
                                follow_up_due = None;
                                current_screen = Screen::NameEntry;
                                continue;
                            }
                            command => {
                                let outcome = dispatch(engine, command);
                                if outcome.follow_up.is_some() {
                                    follow_up_due = due_time(&outcome, cli.no_delay);
                                }
                            }
                        }
                    }
                }

                if follow_up_due.is_some_and(|due| Instant::now() >= due) {
                    let outcome = engine.resume();
                    follow_up_due = due_time(&outcome, cli.no_delay);
                }
            }
        }
    }
}

/// Deadline for the continuation an outcome scheduled, if any.
fn due_time(outcome: &CommandOutcome, no_delay: bool) -> Option<Instant> {
    outcome.follow_up.map(|follow_up| {
        if no_delay {
            Instant::now()
        } else {
            Instant::now() + follow_up.delay
        }
    })
}
