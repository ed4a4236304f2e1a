use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Board axis named in validation errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
        }
    }
}

/// Rejected game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("board {axis} must be positive")]
    ZeroExtent { axis: Axis },

    #[error("board {axis} {extent} is not a multiple of the cell size {cell_size}")]
    Misaligned {
        axis: Axis,
        extent: u32,
        cell_size: u32,
    },

    #[error("board {axis} {extent} exceeds the supported maximum of {max}")]
    TooLarge { axis: Axis, extent: u32, max: u32 },

    #[error("board must contain at least two cells, found {cells}")]
    TooFewCells { cells: u32 },

    #[error("move interval must be a positive number of seconds, got {0}")]
    InvalidMoveInterval(f32),

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
