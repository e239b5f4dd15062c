use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a configuration cannot produce a playable grid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{axis} extent must be positive")]
    ZeroExtent { axis: &'static str },

    #[error("{axis} extent {extent} exceeds the largest supported extent {max}")]
    ExtentTooLarge {
        axis: &'static str,
        extent: u32,
        max: u32,
    },

    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("{axis} extent {extent} is not a multiple of cell size {cell_size}")]
    IndivisibleExtent {
        axis: &'static str,
        extent: u32,
        cell_size: u32,
    },

    #[error("tick rate must be at least one tick per second")]
    ZeroTickRate,

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Unrecoverable conditions raised by the game core.
#[derive(Debug, Clone, Copy, Error, Eq, PartialEq)]
pub enum GameError {
    /// Every cell is covered by the snake, so food has nowhere to go.
    #[error("no free cell left for food on a {width}x{height} grid")]
    GridExhausted { width: u32, height: u32 },
}

/// Top-level failure of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
