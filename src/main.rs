use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use torus_snake::clock::FrameClock;
use torus_snake::config::GameConfig;
use torus_snake::error::AppError;
use torus_snake::input::InputHandler;
use torus_snake::renderer;
use torus_snake::score::ScoreLog;
use torus_snake::session::Session;
use torus_snake::terminal_runtime::RenderContext;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "torus-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Playfield height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Cell edge length in pixels; must divide width and height.
    #[arg(long = "cell-size")]
    cell_size: Option<u32>,

    /// Game ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Fixed RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to append game-over results.
    #[arg(long = "score-log")]
    score_log: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<GameConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tps) = self.tps {
            config.ticks_per_second = tps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.score_log.is_some() {
            config.score_log = self.score_log;
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_config().and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "exiting");
            eprintln!("torus-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &GameConfig) -> Result<(), AppError> {
    let grid = config.grid()?;
    let score_path = config.score_log_path();
    init_logging(&score_path);

    let mut scores = ScoreLog::new(score_path);
    let mut session = Session::new(&grid, config.seed)?;
    info!(
        columns = grid.columns(),
        rows = grid.rows(),
        score_log = %scores.path().display(),
        "game started"
    );

    let mut context = RenderContext::enter()?;
    let mut input = InputHandler::new();
    let mut clock = FrameClock::new(config.ticks_per_second);

    loop {
        clock.wait_for_next_tick();

        let step = session.step(input.drain()?, &mut scores)?;
        context
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session.state()))?;

        if step.quit {
            return Ok(());
        }
    }
}

/// Routes tracing output to a file next to the score log; the terminal is
/// busy with the game. Logging stays off when the file cannot be opened.
fn init_logging(score_path: &Path) {
    let log_path = score_path
        .parent()
        .map_or_else(|| PathBuf::from(LOG_FILE_NAME), |dir| dir.join(LOG_FILE_NAME));

    if let Some(dir) = log_path.parent() {
        if !dir.as_os_str().is_empty() {
            let _ = fs::create_dir_all(dir);
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("Failed to open log file {}: {error}", log_path.display());
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
