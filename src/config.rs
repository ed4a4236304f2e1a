use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{Axis, ConfigError};
use crate::snake::Position;

/// Edge length of one grid cell in board units.
pub const CELL_SIZE: u16 = 32;

/// Default board width in board units (20 cells).
pub const BOARD_WIDTH: u16 = 640;

/// Default board height in board units (15 cells).
pub const BOARD_HEIGHT: u16 = 480;

/// Seconds of accumulated time between two movement steps.
pub const MOVE_INTERVAL_SECS: f32 = 1.0;

/// Score awarded for each food item eaten.
pub const POINTS_PER_FOOD: u32 = 20;

/// Frame cadence of the terminal loop in milliseconds.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Glyph for one occupied board cell (two terminal columns wide).
pub const GLYPH_CELL: &str = "██";

/// Glyph for an empty cell when the grid overlay is enabled.
pub const GLYPH_GRID: &str = " ·";

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Colors used for every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub grid: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_hint: Color,
    pub menu_title: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    grid: Color::DarkGray,
    border_fg: Color::Gray,
    hud_score: Color::White,
    hud_hint: Color::DarkGray,
    menu_title: Color::Red,
};

/// Validated board geometry in board units.
///
/// Width and height are always exact multiples of the cell size, so wrapping
/// a grid-aligned position keeps it grid-aligned.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoardConfig {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl BoardConfig {
    /// Validates raw dimensions and builds a board.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let width = validate_extent(Axis::Width, width, cell_size)?;
        let height = validate_extent(Axis::Height, height, cell_size)?;

        // Divides a non-zero extent that fits in u16, so it fits as well.
        let cell_size = u16::try_from(cell_size).map_err(|_| ConfigError::TooLarge {
            axis: Axis::Width,
            extent: cell_size,
            max: u32::from(u16::MAX),
        })?;

        let board = Self {
            width,
            height,
            cell_size,
        };

        let cells = u32::from(board.columns()) * u32::from(board.rows());
        if cells < 2 {
            return Err(ConfigError::TooFewCells { cells });
        }

        Ok(board)
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn cell_size(self) -> u16 {
        self.cell_size
    }

    /// Number of cells along the x axis.
    #[must_use]
    pub fn columns(self) -> u16 {
        self.width / self.cell_size
    }

    /// Number of cells along the y axis.
    #[must_use]
    pub fn rows(self) -> u16 {
        self.height / self.cell_size
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.columns()) * usize::from(self.rows())
    }

    /// Returns true when `position` is inside the board and grid-aligned.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        let cell = i32::from(self.cell_size);
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
            && position.x % cell == 0
            && position.y % cell == 0
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cell_size: CELL_SIZE,
        }
    }
}

fn validate_extent(axis: Axis, extent: u32, cell_size: u32) -> Result<u16, ConfigError> {
    if extent == 0 {
        return Err(ConfigError::ZeroExtent { axis });
    }

    let extent_u16 = u16::try_from(extent).map_err(|_| ConfigError::TooLarge {
        axis,
        extent,
        max: u32::from(u16::MAX),
    })?;

    if extent % cell_size != 0 {
        return Err(ConfigError::Misaligned {
            axis,
            extent,
            cell_size,
        });
    }

    Ok(extent_u16)
}

/// Everything the simulation needs to run one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    board: BoardConfig,
    move_interval_secs: f32,
}

impl GameConfig {
    pub fn new(board: BoardConfig, move_interval_secs: f32) -> Result<Self, ConfigError> {
        if !move_interval_secs.is_finite() || move_interval_secs <= 0.0 {
            return Err(ConfigError::InvalidMoveInterval(move_interval_secs));
        }

        Ok(Self {
            board,
            move_interval_secs,
        })
    }

    #[must_use]
    pub fn board(&self) -> BoardConfig {
        self.board
    }

    #[must_use]
    pub fn move_interval_secs(&self) -> f32 {
        self.move_interval_secs
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            move_interval_secs: MOVE_INTERVAL_SECS,
        }
    }
}

/// Unvalidated settings as read from a config file or the command line.
///
/// Every field is optional; missing values fall back to the built-in defaults
/// when the settings are resolved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub board_width: Option<u32>,
    pub board_height: Option<u32>,
    pub cell_size: Option<u32>,
    pub move_interval_secs: Option<f32>,
}

impl Settings {
    /// Reads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&raw, path)
    }

    /// Reads the per-user config file when one exists.
    ///
    /// Returns default settings when there is no config directory or the file
    /// has not been created.
    pub fn load_user_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns these settings with every value present in `other` taking
    /// precedence.
    #[must_use]
    pub fn overlay(self, other: Self) -> Self {
        Self {
            board_width: other.board_width.or(self.board_width),
            board_height: other.board_height.or(self.board_height),
            cell_size: other.cell_size.or(self.cell_size),
            move_interval_secs: other.move_interval_secs.or(self.move_interval_secs),
        }
    }

    /// Fills in defaults and validates the result.
    pub fn resolve(&self) -> Result<GameConfig, ConfigError> {
        let board = BoardConfig::new(
            self.board_width.unwrap_or(u32::from(BOARD_WIDTH)),
            self.board_height.unwrap_or(u32::from(BOARD_HEIGHT)),
            self.cell_size.unwrap_or(u32::from(CELL_SIZE)),
        )?;

        GameConfig::new(
            board,
            self.move_interval_secs.unwrap_or(MOVE_INTERVAL_SECS),
        )
    }
}

/// Returns the platform-correct path of the per-user config file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{BoardConfig, GameConfig, Settings};
    use crate::error::{Axis, ConfigError};
    use crate::snake::Position;

    #[test]
    fn default_board_is_twenty_by_fifteen_cells() {
        let board = BoardConfig::default();

        assert_eq!(board.columns(), 20);
        assert_eq!(board.rows(), 15);
        assert_eq!(board.total_cells(), 300);
        assert_eq!(Settings::default().resolve().unwrap(), GameConfig::default());
    }

    #[test]
    fn misaligned_board_is_rejected() {
        let error = BoardConfig::new(650, 480, 32).unwrap_err();

        assert!(matches!(
            error,
            ConfigError::Misaligned {
                axis: Axis::Width,
                extent: 650,
                cell_size: 32,
            }
        ));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            BoardConfig::new(640, 480, 0),
            Err(ConfigError::ZeroCellSize)
        ));
        assert!(matches!(
            BoardConfig::new(640, 0, 32),
            Err(ConfigError::ZeroExtent {
                axis: Axis::Height
            })
        ));
    }

    #[test]
    fn single_cell_board_is_rejected() {
        assert!(matches!(
            BoardConfig::new(32, 32, 32),
            Err(ConfigError::TooFewCells { cells: 1 })
        ));
        assert!(BoardConfig::new(64, 32, 32).is_ok());
    }

    #[test]
    fn oversized_board_is_rejected() {
        assert!(matches!(
            BoardConfig::new(70_000, 480, 32),
            Err(ConfigError::TooLarge {
                axis: Axis::Width,
                ..
            })
        ));
    }

    #[test]
    fn move_interval_must_be_positive_and_finite() {
        let board = BoardConfig::default();

        assert!(GameConfig::new(board, 0.0).is_err());
        assert!(GameConfig::new(board, -1.0).is_err());
        assert!(GameConfig::new(board, f32::NAN).is_err());
        assert!(GameConfig::new(board, 0.25).is_ok());
    }

    #[test]
    fn board_contains_only_aligned_in_bounds_positions() {
        let board = BoardConfig::default();

        assert!(board.contains(Position { x: 0, y: 0 }));
        assert!(board.contains(Position { x: 608, y: 448 }));
        assert!(!board.contains(Position { x: 640, y: 0 }));
        assert!(!board.contains(Position { x: 0, y: -32 }));
        assert!(!board.contains(Position { x: 16, y: 0 }));
    }

    #[test]
    fn overlay_prefers_values_from_the_other_settings() {
        let file = Settings {
            board_width: Some(320),
            board_height: Some(320),
            cell_size: None,
            move_interval_secs: Some(0.5),
        };
        let cli = Settings {
            board_height: Some(160),
            ..Settings::default()
        };

        let merged = file.overlay(cli);

        assert_eq!(merged.board_width, Some(320));
        assert_eq!(merged.board_height, Some(160));
        assert_eq!(merged.move_interval_secs, Some(0.5));

        let config = merged.resolve().unwrap();
        assert_eq!(config.board().columns(), 10);
        assert_eq!(config.board().rows(), 5);
    }

    #[test]
    fn settings_file_round_trips_through_disk() {
        let path = unique_test_path("settings");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, r#"{ "board_width": 320, "cell_size": 16 }"#)
            .expect("test file write should succeed");

        let settings = Settings::load(&path).expect("valid settings should load");

        assert_eq!(settings.board_width, Some(320));
        assert_eq!(settings.cell_size, Some(16));
        assert_eq!(settings.board_height, None);
        cleanup_test_path(&path);
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let result = Settings::parse(r#"{ "speed": 3 }"#, Path::new("inline.json"));

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_settings_file_reports_read_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &Path) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
