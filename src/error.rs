//! Error types for configuration, explicit terrain input and session setup.
//!
//! The simulation loop itself never fails; these errors only surface while
//! a session is being set up.

use std::path::PathBuf;

use thiserror::Error;

/// Problems found while loading or validating a [`crate::config::SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The terrain grid would contain no cells.
    #[error("terrain grid must be non-empty, got {cols}x{rows}")]
    EmptyGrid {
        /// Requested column count.
        cols: usize,
        /// Requested row count.
        rows: usize,
    },
    /// A probability lies outside `[0, 1]`.
    #[error("{name} must lie within [0, 1], got {value}")]
    InvalidRatio {
        /// Name of the offending field.
        name: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// A quantity that must be strictly positive was not.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending field.
        name: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// The level has no floor layers to build colliders from.
    #[error("max level height must be at least 1")]
    NoFloorLayers,
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid JSON for [`crate::config::SimConfig`].
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Problems with an explicitly supplied height grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerrainError {
    /// No columns or no rows were supplied.
    #[error("height grid must contain at least one cell")]
    Empty,
    /// Columns have differing lengths.
    #[error("column {column} has {found} rows, expected {expected}")]
    Ragged {
        /// Index of the first mismatching column.
        column: usize,
        /// Row count of the first column.
        expected: usize,
        /// Row count of the mismatching column.
        found: usize,
    },
    /// The grid does not match the configured terrain dimensions.
    #[error("height grid is {cols}x{rows}, configuration expects {expected_cols}x{expected_rows}")]
    Mismatch {
        /// Columns supplied.
        cols: usize,
        /// Rows supplied.
        rows: usize,
        /// Columns configured.
        expected_cols: usize,
        /// Rows configured.
        expected_rows: usize,
    },
}

/// Failures while setting up a [`crate::world::Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The configuration did not validate.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The explicit height grid was unusable.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}
