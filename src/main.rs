use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use grid_snake::config::{FRAME_INTERVAL_MS, GameConfig, Settings};
use grid_snake::error::ConfigError;
use grid_snake::game::GameState;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::renderer::{self, RenderOptions};
use grid_snake::terminal_runtime::TerminalSession;
use log::{error, info};
use simplelog::{LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Read settings from this JSON file instead of the per-user config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Board width in board units.
    #[arg(long)]
    width: Option<u32>,

    /// Board height in board units.
    #[arg(long)]
    height: Option<u32>,

    /// Edge length of one grid cell in board units.
    #[arg(long)]
    cell_size: Option<u32>,

    /// Seconds between two movement steps.
    #[arg(long, value_name = "SECS")]
    move_interval: Option<f32>,

    /// Seed food placement for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Draw a dot in every empty cell.
    #[arg(long)]
    grid: bool,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli) {
        eprintln!("grid-snake: failed to set up logging: {error}");
        return ExitCode::FAILURE;
    }

    // Validate before the terminal enters raw mode so errors stay readable.
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            error!("invalid configuration: {error}");
            eprintln!("grid-snake: {}", error_chain(&error));
            return ExitCode::FAILURE;
        }
    };

    info!(
        "starting on a {}x{} board, cell {}, step every {}s",
        config.board().width(),
        config.board().height(),
        config.board().cell_size(),
        config.move_interval_secs()
    );

    let options = RenderOptions {
        show_grid: cli.grid,
    };
    if let Err(error) = run(config, cli.seed, options) {
        error!("game loop failed: {error}");
        eprintln!("grid-snake: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    WriteLogger::init(cli.log_level.into(), simplelog::Config::default(), file)
        .map_err(io::Error::other)
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let file_settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_user_default()?,
    };

    let cli_settings = Settings {
        board_width: cli.width,
        board_height: cli.height,
        cell_size: cli.cell_size,
        move_interval_secs: cli.move_interval,
    };

    file_settings.overlay(cli_settings).resolve()
}

fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

fn run(config: GameConfig, seed: Option<u64>, options: RenderOptions) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut state = match seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_frame = Instant::now();

    loop {
        let inputs = input.poll_frame()?;
        if inputs.contains(&GameInput::Quit) {
            break;
        }

        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        state.update(inputs, delta);

        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state, options))?;

        thread::sleep(frame_interval);
    }

    info!("quit with score {}", state.score);
    Ok(())
}
