use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, info, warn};
use simplelog::{Config, WriteLogger};

use grid_snake::config::{Settings, SettingsOverrides, load_settings, settings_path};
use grid_snake::error::AppError;
use grid_snake::game::{GameState, RunState};
use grid_snake::input::{GameInput, poll_input};
use grid_snake::session::SharedGame;
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use grid_snake::ticker::Ticker;

/// Input poll timeout while no ticks are scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Side length of the square grid.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read instead of the per-user one.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Write logs to this file. Logging is off without it.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        WriteLogger::init(cli.log_level, Config::default(), File::create(path)?)?;
    }

    let settings = resolve_settings(&cli)?;
    info!(
        "starting: grid {0}x{0}, tick {1} ms, seed {2:?}",
        settings.grid_size, settings.tick_interval_ms, settings.seed
    );

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    play(&mut terminal, settings)
}

fn resolve_settings(cli: &Cli) -> Result<Settings, AppError> {
    let base = match &cli.config {
        Some(path) => load_settings(path)?,
        None => load_settings(&settings_path()).unwrap_or_else(|error| {
            warn!("{error}; using default settings");
            Settings::default()
        }),
    };

    let settings = base.with_overrides(SettingsOverrides {
        grid_size: cli.grid_size,
        tick_interval_ms: cli.tick_ms,
        seed: cli.seed,
    });
    settings.validate()?;

    Ok(settings)
}

fn play(terminal: &mut TerminalSession, settings: Settings) -> Result<(), AppError> {
    let mut round = 0_u64;
    let game = SharedGame::new(new_game(&settings, round));
    let mut ticker = Ticker::new(
        Duration::from_millis(settings.tick_interval_ms),
        Instant::now(),
    );

    loop {
        terminal.draw(&game.snapshot())?;

        let timeout = if ticker.is_cancelled() {
            IDLE_POLL
        } else {
            ticker.time_until_next(Instant::now())
        };
        match poll_input(timeout)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Restart) if !game.is_running() => {
                round += 1;
                game.replace(new_game(&settings, round));
                ticker.reset(Instant::now());
                info!("restarted, round {round}");
            }
            Some(GameInput::Direction(direction)) => game.set_direction(direction),
            Some(GameInput::Restart) | None => {}
        }

        if ticker.poll(Instant::now()) && game.tick() == RunState::Terminated {
            ticker.cancel();
        }
    }

    info!("quit after {round} restarts");
    Ok(())
}

fn new_game(settings: &Settings, round: u64) -> GameState {
    match settings.seed {
        Some(seed) => GameState::new_with_seed(settings.bounds(), seed.wrapping_add(round)),
        None => GameState::new(settings.bounds()),
    }
}
