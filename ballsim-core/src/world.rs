use crate::ball::{Ball, BallId, BallSpec};
use crate::error::ConfigurationError;
use crate::vector::Vector2;
use serde::Deserialize;

/// Axis-aligned world rectangle in device-independent units
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds {
    pub fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    /// Rectangle from the origin to `(width, height)`
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Vector2::ZERO, Vector2::new(width, height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let finite = [self.min.x, self.min.y, self.max.x, self.max.y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width() <= 0.0 || self.height() <= 0.0 {
            return Err(ConfigurationError::InvalidBounds {
                min_x: self.min.x,
                min_y: self.min.y,
                max_x: self.max.x,
                max_y: self.max.y,
            });
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_size(10_000.0, 10_000.0)
    }
}

/// The simulated world: ordered balls, bounds and the simulation clock
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub(crate) balls: Vec<Ball>,
    pub(crate) bounds: Bounds,
    pub(crate) time: f64,
    pub(crate) frame: u64,
}

impl World {
    /// Build a world at frame 0, assigning ids in `specs` order
    pub fn new(bounds: Bounds, specs: &[BallSpec]) -> Result<Self, ConfigurationError> {
        bounds.validate()?;
        let balls = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Ball::new(BallId(i as u32), spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            balls,
            bounds,
            time: 0.0,
            frame: 0,
        })
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id() == id)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn total_momentum(&self) -> Vector2 {
        self.balls.iter().map(Ball::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }
}
