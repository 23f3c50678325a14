//! Error types for the simulation core

use thiserror::Error;

/// Invalid construction input, reported at initialization
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("ball {index}: mass must be positive and finite, got {mass}")]
    InvalidMass { index: usize, mass: f64 },

    #[error("ball {index}: radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("ball {index}: {field} must be finite")]
    NonFiniteState { index: usize, field: &'static str },

    #[error("fps must be positive, got {0}")]
    InvalidFps(u32),

    #[error("end time must be non-negative and finite, got {0}")]
    InvalidEndTime(f64),

    #[error("history depth must be at least 1")]
    InvalidHistoryDepth,

    #[error("coulomb constant must be finite, got {0}")]
    InvalidCoulombConstant(f64),

    #[error("minimum force distance must be positive and finite, got {0}")]
    InvalidMinDistance(f64),

    #[error("grid cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    #[error("world bounds must have positive extent, got ({min_x}, {min_y})..({max_x}, {max_y})")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
}

/// Attempt to normalize a zero-length or non-finite vector
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("cannot normalize degenerate vector ({x}, {y})")]
pub struct DegenerateVectorError {
    pub x: f64,
    pub y: f64,
}

/// No earlier snapshot is available to step back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no earlier state before frame {frame}")]
pub struct HistoryUnderflow {
    pub frame: u64,
}

/// Failure to load a scenario description
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
