use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use grid_snake::config::{ConfigError, FRAME_INTERVAL, GameSettings, TERMINAL_CELL};
use grid_snake::game::{GameLoop, Phase};
use grid_snake::input::{Command, InputSource, KeyboardInput};
use grid_snake::renderer::{self, RenderInfo};
use grid_snake::scheduler::{ResetTimer, TickScheduler};
use grid_snake::terminal_runtime::{AppTerminal, TerminalSession, fitted_grid, restore_terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON settings file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells; start positions move inward on small grids.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells; start positions move inward on small grids.
    #[arg(long)]
    height: Option<u16>,

    /// Size the grid to the current terminal.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    fit_terminal: bool,

    /// Seed for food placement; every restart reuses it.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {error}");
        return ExitCode::FAILURE;
    }

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Invalid settings: {error}");
            return ExitCode::from(2);
        }
    };

    install_panic_hook();

    if let Err(error) = play(settings, cli.seed) {
        eprintln!("Terminal error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn play(settings: GameSettings, seed: Option<u64>) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), &mut KeyboardInput, &settings, seed)
}

fn resolve_settings(cli: &Cli) -> Result<GameSettings, ConfigError> {
    let mut settings = match &cli.config {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };

    let mut grid = settings.grid;
    if cli.fit_terminal {
        grid = fitted_grid(TERMINAL_CELL).map_err(ConfigError::Surface)?;
    }
    if let Some(width) = cli.width {
        grid.width = width;
    }
    if let Some(height) = cli.height {
        grid.height = height;
    }
    if grid != settings.grid {
        settings.resize(grid);
    }

    settings.validate()?;
    Ok(settings)
}

fn run<I: InputSource>(
    terminal: &mut AppTerminal,
    input: &mut I,
    settings: &GameSettings,
    seed: Option<u64>,
) -> io::Result<()> {
    let mut game = new_game(settings, seed);
    let mut scheduler = TickScheduler::new(Instant::now(), settings.min_tick_interval());
    let mut reset = ResetTimer::new(settings.reset_delay());

    info!(grid = %settings.grid, ?seed, "session started");

    loop {
        let now = Instant::now();
        let render_info = RenderInfo {
            reset_in: reset.remaining(now),
        };
        terminal.draw(|frame| renderer::render(frame, &game.snapshot(), render_info))?;

        let timeout = scheduler.next_due(&game).map_or(FRAME_INTERVAL, |due| {
            due.saturating_duration_since(now).min(FRAME_INTERVAL)
        });
        if let Some(command) = input.poll_command(timeout)? {
            if command == Command::Quit {
                break;
            }
            game.apply(command);
        }

        let now = Instant::now();
        scheduler.poll(&mut game, now);

        if game.phase() == Phase::Over {
            reset.arm(now);
            if reset.is_due(now) {
                info!(score = game.state().score, "restarting");
                game = new_game(settings, seed);
                scheduler = TickScheduler::new(now, settings.min_tick_interval());
                reset.disarm();
            }
        }
    }

    info!("session ended");
    Ok(())
}

fn new_game(settings: &GameSettings, seed: Option<u64>) -> GameLoop {
    match seed {
        Some(seed) => GameLoop::with_seed(settings.clone(), seed),
        None => GameLoop::new(settings.clone()),
    }
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    // Stdout belongs to the terminal UI, so logs only ever go to a file.
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
