//! Electrostatic force model
//!
//! Coulomb's law between every pair of charged balls, scaled by a configurable
//! constant `k`. Each unordered pair is visited once and the equal and opposite
//! force is applied to both members.

use crate::ball::Ball;
use crate::error::ConfigurationError;
use crate::vector::{self, Vector2, FALLBACK_NORMAL};
use serde::Deserialize;

/// Coulomb constant in picometres, atomic mass units and elementary charges
pub const COULOMB_CONSTANT: f64 = 2.307_077_55e8;

/// Parameters of the electrostatic term
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoulombParams {
    /// Force scale `k` in `F = k·q1·q2 / d²`
    pub k: f64,
    /// Distances below this are clamped before computing the force
    pub min_distance: f64,
}

impl Default for CoulombParams {
    fn default() -> Self {
        Self {
            k: COULOMB_CONSTANT,
            min_distance: 1.0,
        }
    }
}

impl CoulombParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.k.is_finite() {
            return Err(ConfigurationError::InvalidCoulombConstant(self.k));
        }
        if !(self.min_distance > 0.0 && self.min_distance.is_finite()) {
            return Err(ConfigurationError::InvalidMinDistance(self.min_distance));
        }
        Ok(())
    }
}

/// Force on `a` exerted by `b`, or `None` when either charge is zero
fn pair_force(a: &Ball, b: &Ball, params: &CoulombParams) -> Option<Vector2> {
    let qq = a.charge() * b.charge();
    if qq == 0.0 {
        return None;
    }

    let delta = b.position() - a.position();
    let dist = delta.length().max(params.min_distance);
    let normal = vector::normalize_or(delta, FALLBACK_NORMAL);

    // Like charges push `a` away from `b`
    Some(-normal * (params.k * qq / (dist * dist)))
}

/// Net electrostatic force on every ball, indexed like `balls`
pub fn compute_forces(balls: &[Ball], params: &CoulombParams) -> Vec<Vector2> {
    let mut forces = vec![Vector2::ZERO; balls.len()];

    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let Some(force) = pair_force(&balls[i], &balls[j], params) else {
                continue;
            };
            if !vector::is_finite(force) {
                log::warn!(
                    "dropping non-finite coulomb force between {} and {}",
                    balls[i].id(),
                    balls[j].id()
                );
                continue;
            }
            forces[i] += force;
            forces[j] -= force;
        }
    }

    forces
}

/// Electrostatic potential energy of the whole system
pub fn potential_energy(balls: &[Ball], params: &CoulombParams) -> f64 {
    let mut energy = 0.0;
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let qq = balls[i].charge() * balls[j].charge();
            if qq == 0.0 {
                continue;
            }
            let dist = balls[i]
                .position()
                .distance(balls[j].position())
                .max(params.min_distance);
            energy += params.k * qq / dist;
        }
    }
    energy
}
