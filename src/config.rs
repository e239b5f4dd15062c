use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::Grid;

/// Largest accepted extent; positions are stored as `i32` pixels.
pub const MAX_EXTENT: u32 = i32::MAX as u32;

/// Default playfield width in pixels.
pub const DEFAULT_SCREEN_WIDTH: u32 = 640;

/// Default playfield height in pixels.
pub const DEFAULT_SCREEN_HEIGHT: u32 = 480;

/// Default edge length of one cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Default game speed.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Startup configuration, built once and passed by reference.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub cell_size: u32,
    pub ticks_per_second: u32,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
    /// Score log location; the platform data directory when unset.
    pub score_log: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
            score_log: None,
        }
    }
}

impl GameConfig {
    /// Loads a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the extents and returns the grid they describe.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        check_extent("width", self.screen_width, self.cell_size)?;
        check_extent("height", self.screen_height, self.cell_size)?;
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        Ok(Grid::new_unchecked(
            self.screen_width,
            self.screen_height,
            self.cell_size,
        ))
    }

    /// Time between two game ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Resolved score log path.
    #[must_use]
    pub fn score_log_path(&self) -> PathBuf {
        self.score_log
            .clone()
            .unwrap_or_else(crate::score::scores_path)
    }
}

fn check_extent(axis: &'static str, extent: u32, cell_size: u32) -> Result<(), ConfigError> {
    if extent == 0 {
        return Err(ConfigError::ZeroExtent { axis });
    }
    if extent > MAX_EXTENT {
        return Err(ConfigError::ExtentTooLarge {
            axis,
            extent,
            max: MAX_EXTENT,
        });
    }
    if extent % cell_size != 0 {
        return Err(ConfigError::IndivisibleExtent {
            axis,
            extent,
            cell_size,
        });
    }
    Ok(())
}

/// Colors applied to the play area.
#[derive(Debug)]
pub struct Palette {
    pub background: Color,
    /// Outline drawn around every occupied cell.
    pub cell_border: Color,
    pub food: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub hud: Color,
}

pub const PALETTE: Palette = Palette {
    background: Color::Rgb(50, 50, 50),
    cell_border: Color::Rgb(93, 216, 228),
    food: Color::Rgb(255, 0, 0),
    snake_head: Color::Rgb(160, 255, 160),
    snake_body: Color::Rgb(0, 255, 0),
    hud: Color::Gray,
};

/// Glyph for an occupied cell; two columns approximate a square.
pub const GLYPH_CELL: &str = "[]";

/// Glyph for an empty cell.
pub const GLYPH_EMPTY: &str = "  ";
