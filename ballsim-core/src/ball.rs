use crate::error::ConfigurationError;
use crate::vector::{self, Vector2};
use serde::Deserialize;

/// Stable identity of a ball, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BallId(pub u32);

impl std::fmt::Display for BallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn default_radius() -> f64 {
    100.0
}

fn default_mass() -> f64 {
    1.0
}

/// Initial description of a ball
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BallSpec {
    pub position: Vector2,
    #[serde(default)]
    pub velocity: Vector2,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub charge: f64,
}

impl BallSpec {
    /// A ball at rest at `position` with the default radius and mass
    pub fn at(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            radius: default_radius(),
            mass: default_mass(),
            charge: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }
}

/// A simulated circular body
///
/// Fields are read-only outside this module. Position and velocity change only
/// through [`Ball::apply`], so they are always updated together.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    id: BallId,
    position: Vector2,
    velocity: Vector2,
    radius: f64,
    mass: f64,
    charge: f64,
}

impl Ball {
    /// Create a ball from `spec`, validating mass, radius and finiteness
    pub fn new(id: BallId, spec: &BallSpec) -> Result<Self, ConfigurationError> {
        let index = id.0 as usize;
        if !(spec.mass > 0.0 && spec.mass.is_finite()) {
            return Err(ConfigurationError::InvalidMass {
                index,
                mass: spec.mass,
            });
        }
        if !(spec.radius > 0.0 && spec.radius.is_finite()) {
            return Err(ConfigurationError::InvalidRadius {
                index,
                radius: spec.radius,
            });
        }
        if !vector::is_finite(spec.position) {
            return Err(ConfigurationError::NonFiniteState {
                index,
                field: "position",
            });
        }
        if !vector::is_finite(spec.velocity) {
            return Err(ConfigurationError::NonFiniteState {
                index,
                field: "velocity",
            });
        }
        if !spec.charge.is_finite() {
            return Err(ConfigurationError::NonFiniteState {
                index,
                field: "charge",
            });
        }

        Ok(Self {
            id,
            position: spec.position,
            velocity: spec.velocity,
            radius: spec.radius,
            mass: spec.mass,
            charge: spec.charge,
        })
    }

    pub fn id(&self) -> BallId {
        self.id
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Shift position and velocity by the given deltas
    pub fn apply(&mut self, d_position: Vector2, d_velocity: Vector2) {
        self.position += d_position;
        self.velocity += d_velocity;
    }

    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_mass() {
        let spec = BallSpec::at(Vector2::ZERO).with_mass(0.0);
        assert_eq!(
            Ball::new(BallId(3), &spec),
            Err(ConfigurationError::InvalidMass { index: 3, mass: 0.0 })
        );
    }

    #[test]
    fn rejects_non_positive_radius() {
        let spec = BallSpec::at(Vector2::ZERO).with_radius(-1.0);
        assert!(matches!(
            Ball::new(BallId(0), &spec),
            Err(ConfigurationError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn rejects_nan_charge() {
        let spec = BallSpec::at(Vector2::ZERO).with_charge(f64::NAN);
        assert!(matches!(
            Ball::new(BallId(0), &spec),
            Err(ConfigurationError::NonFiniteState { field: "charge", .. })
        ));
    }

    #[test]
    fn apply_moves_position_and_velocity() {
        let spec = BallSpec::at(Vector2::new(1.0, 1.0)).with_velocity(Vector2::new(2.0, 0.0));
        let mut ball = Ball::new(BallId(0), &spec).unwrap();
        ball.apply(Vector2::new(0.5, -0.5), Vector2::new(-1.0, 3.0));
        assert_eq!(ball.position(), Vector2::new(1.5, 0.5));
        assert_eq!(ball.velocity(), Vector2::new(1.0, 3.0));
        assert_eq!(ball.mass(), 1.0);
    }

    #[test]
    fn momentum_and_energy() {
        let spec = BallSpec::at(Vector2::ZERO)
            .with_mass(2.0)
            .with_velocity(Vector2::new(3.0, 4.0));
        let ball = Ball::new(BallId(0), &spec).unwrap();
        assert_eq!(ball.momentum(), Vector2::new(6.0, 8.0));
        assert_eq!(ball.kinetic_energy(), 25.0);
    }
}
