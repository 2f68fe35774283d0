use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Derives the grid that fits a drawing surface of `columns` x `rows`
    /// when every grid cell takes `cell` units of that surface.
    #[must_use]
    pub fn from_surface(columns: u16, rows: u16, cell: CellSize) -> Self {
        Self {
            width: columns / cell.columns.max(1),
            height: rows / cell.rows.max(1),
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Size of one grid cell on the drawing surface.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellSize {
    pub columns: u16,
    pub rows: u16,
}

/// Terminal glyphs are about twice as tall as wide, so a cell spans two columns.
pub const TERMINAL_CELL: CellSize = CellSize {
    columns: 2,
    rows: 1,
};

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Tick interval at the start of a game, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Interval reduction applied on every food pickup, in milliseconds.
pub const DEFAULT_SPEED_STEP_MS: u64 = 5;

/// Lower bound the scheduler waits between ticks, in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 16;

/// Score granted per food pickup.
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Delay between game over and the automatic restart, in milliseconds.
pub const DEFAULT_RESET_DELAY_MS: u64 = 5_000;

/// Frame pacing of the terminal loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Tunable game parameters.
///
/// Every field has a default, so a settings file only needs to list what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    pub grid: GridSize,
    pub initial_snake: Position,
    pub initial_food: Position,
    pub initial_tick_interval_ms: u64,
    pub speed_step_ms: u64,
    pub food_reward: u32,
    pub min_tick_interval_ms: u64,
    pub reset_delay_ms: u64,
    /// Restrict food placement to cells the snake does not occupy.
    pub food_avoids_snake: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            initial_snake: Position::new(10, 10),
            initial_food: Position::new(15, 15),
            initial_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            speed_step_ms: DEFAULT_SPEED_STEP_MS,
            food_reward: DEFAULT_FOOD_REWARD,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            food_avoids_snake: false,
        }
    }
}

/// Reasons a settings file or override is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to query terminal size: {0}")]
    Surface(#[source] io::Error),
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("initial tick interval must be positive")]
    ZeroTickInterval,
    #[error("{what} at {position} lies outside the {grid} grid")]
    OutOfBounds {
        what: &'static str,
        position: Position,
        grid: GridSize,
    },
}

impl GameSettings {
    /// Reads settings from a JSON file and validates them.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Switches to `grid`, pulling the initial snake and food inside it when
    /// the new grid is too small for them.
    pub fn resize(&mut self, grid: GridSize) {
        self.grid = grid;
        self.initial_snake = clamp_into(self.initial_snake, grid);
        self.initial_food = clamp_into(self.initial_food, grid);
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        if self.initial_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        for (what, position) in [
            ("initial snake", self.initial_snake),
            ("initial food", self.initial_food),
        ] {
            if !position.is_within_bounds(self.grid) {
                return Err(ConfigError::OutOfBounds {
                    what,
                    position,
                    grid: self.grid,
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    #[must_use]
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

fn clamp_into(position: Position, grid: GridSize) -> Position {
    let max_x = i32::from(grid.width.saturating_sub(1));
    let max_y = i32::from(grid.height.saturating_sub(1));

    Position {
        x: position.x.clamp(0, max_x),
        y: position.y.clamp(0, max_y),
    }
}

/// Fixed colors for every visual element.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::White,
    snake_body: Color::Rgb(0x00, 0xff, 0x08),
    food: Color::Rgb(0xff, 0x00, 0x00),
    play_bg: Color::Black,
    border_fg: Color::Gray,
    hud_text: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
};

/// Border set drawn around the play area.
pub const BORDER_PLAY_AREA: border::Set = border::THICK;

/// Glyph for one grid cell (two terminal columns wide).
pub const GLYPH_CELL: &str = "██";
