use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};

use clap::Parser;
use grid_snake::clock::FrameClock;
use grid_snake::config::GAME_TITLE;
use grid_snake::error::AppError;
use grid_snake::game::GameState;
use grid_snake::runtime;
use grid_snake::settings::{Overrides, Settings, default_log_path};
use grid_snake::terminal_runtime::{RawModeGuard, TerminalInput, TerminalSurface, restore_terminal};
use log::{LevelFilter, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use simplelog::{Config, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Game speed in ticks per second.
    #[arg(long)]
    speed: Option<u32>,

    /// Seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Also log food placement and feeding.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let settings = Settings::resolve(
        cli.config.as_deref(),
        Overrides {
            grid_width: cli.width,
            grid_height: cli.height,
            ticks_per_second: cli.speed,
            seed: cli.seed,
        },
    )?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logger(&cli.log_file.unwrap_or_else(default_log_path), level)?;
    install_panic_hook();

    run(&settings)
}

fn run(settings: &Settings) -> Result<(), AppError> {
    let grid = settings.grid();
    info!(
        "starting {}x{} session at {} ticks/s (seed {:?})",
        grid.width, grid.height, settings.ticks_per_second, settings.seed
    );

    let mut state = match settings.seed {
        Some(seed) => GameState::new_with_seed(grid, seed),
        None => GameState::new(grid),
    };

    let _raw_mode = RawModeGuard::enter(GAME_TITLE)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut surface = TerminalSurface::new(terminal, grid, settings.palette.border);
    let mut input = TerminalInput;
    let mut clock = FrameClock::new(settings.ticks_per_second);

    runtime::run(
        &mut state,
        &settings.palette,
        &mut surface,
        &mut input,
        &mut clock,
    )?;

    Ok(())
}

fn init_logger(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(level, Config::default(), File::create(path)?)?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
