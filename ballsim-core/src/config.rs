//! Simulation configuration and scenario loading
//!
//! A scenario describes the initial world in YAML:
//!
//! ```yaml
//! bounds:
//!   min: [0.0, 0.0]
//!   max: [10000.0, 10000.0]
//!
//! config:
//!   fps: 60
//!   end_time: 100.0
//!   history_depth: 600      # optional, defaults to the whole run
//!   coulomb:
//!     k: 2.30707755e8
//!     min_distance: 1.0
//!   broadphase:
//!     kind: uniform_grid    # or brute_force
//!     cell_size: 400.0
//!
//! balls:
//!   - position: [7000.0, 5000.0]
//!     charge: 1.0
//!   - position: [8000.0, 5000.0]
//!     velocity: [0.0, 10.0]
//!     radius: 100.0
//!     mass: 1.0
//!     charge: -1.0
//! ```
//!
//! Every field except `balls[].position` has a default.

use crate::ball::BallSpec;
use crate::collision::Broadphase;
use crate::error::{ConfigurationError, ScenarioError};
use crate::forces::CoulombParams;
use crate::vector::Vector2;
use crate::world::Bounds;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_END_TIME: f64 = 100.0;

/// Ceiling on the history depth derived from `end_time`
pub const MAX_DEFAULT_HISTORY_DEPTH: usize = 1 << 20;

/// Numerical and physical settings for a run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub coulomb: CoulombParams,
    /// Steps per simulated second; the time slice is `1 / fps`
    pub fps: u32,
    /// Simulated time at which the driver stops ticking
    pub end_time: f64,
    /// Maximum number of retained snapshots, `None` keeps the whole run
    pub history_depth: Option<usize>,
    pub broadphase: Broadphase,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            coulomb: CoulombParams::default(),
            fps: DEFAULT_FPS,
            end_time: DEFAULT_END_TIME,
            history_depth: None,
            broadphase: Broadphase::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.fps == 0 {
            return Err(ConfigurationError::InvalidFps(self.fps));
        }
        if !(self.end_time >= 0.0 && self.end_time.is_finite()) {
            return Err(ConfigurationError::InvalidEndTime(self.end_time));
        }
        if self.history_depth == Some(0) {
            return Err(ConfigurationError::InvalidHistoryDepth);
        }
        self.coulomb.validate()?;
        self.broadphase.validate()
    }

    /// Fixed time slice of one step
    pub fn dt(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Snapshots to retain: the configured depth, or one per frame of the run
    /// capped at [`MAX_DEFAULT_HISTORY_DEPTH`]
    pub fn effective_history_depth(&self) -> usize {
        self.history_depth.unwrap_or_else(|| {
            let frames = (self.end_time * self.fps as f64).ceil();
            if frames >= MAX_DEFAULT_HISTORY_DEPTH as f64 {
                MAX_DEFAULT_HISTORY_DEPTH
            } else {
                (frames as usize).saturating_add(1)
            }
        })
    }
}

/// Initial world description
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default)]
    pub config: SimConfig,
    pub balls: Vec<BallSpec>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ScenarioError> {
        let scenario: ScenarioConfig = serde_yaml::from_str(source)?;
        scenario.config.validate()?;
        scenario.bounds.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Two oppositely charged molecules attracting each other
    pub fn molecule_pair() -> Self {
        Self {
            bounds: Bounds::default(),
            config: SimConfig::default(),
            balls: vec![
                BallSpec::at(Vector2::new(7000.0, 5000.0)).with_charge(1.0),
                BallSpec::at(Vector2::new(8000.0, 5000.0)).with_charge(-1.0),
            ],
        }
    }
}
