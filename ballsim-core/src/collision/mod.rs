//! Collision detection and resolution.
//!
//! Runs after integration so that positions already include the force step:
//!
//! 1. **Walls**: balls crossing the world bounds are clamped back inside and
//!    their outward velocity component is reflected.
//! 2. **Detection**: every touching pair is found by the configured
//!    [`Broadphase`], sorted by lower id.
//! 3. **Resolution**: pairs are resolved one at a time in that order. Each
//!    resolution moves bodies that later pairs may share, so the live distance
//!    is checked again before resolving.
//!
//! Simultaneous contacts between three or more balls are resolved pairwise in
//! this fixed order rather than solved jointly. A resolution can push a body
//! into a neighbour that was already handled, or back through a wall, so up to
//! [`MAX_RELAXATION_PASSES`] further passes clamp against the walls again,
//! re-run detection and push apart the pairs still overlapping by more than
//! [`OVERLAP_TOLERANCE`]. These passes only move positions; a ball held
//! against a wall is not pushed into it. Every pass, including the last, ends
//! with the wall clamp, so a finished step never leaves a ball outside the
//! bounds.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;

use crate::ball::{Ball, BallId};
use crate::world::Bounds;

/// Upper bound on extra resolution passes per step
pub const MAX_RELAXATION_PASSES: usize = 16;

/// Overlap left after resolution that counts as touching
pub const OVERLAP_TOLERANCE: f64 = 1e-9;

/// What happened during one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub wall_hits: usize,
    /// Pairs resolved in the main pass, in resolution order
    pub contacts: Vec<(BallId, BallId)>,
    /// Extra passes needed to clear leftover overlaps
    pub relaxation_passes: usize,
}

fn overlap(a: &Ball, b: &Ball) -> f64 {
    a.radius() + b.radius() - a.position().distance(b.position())
}

/// Resolve wall and ball-ball collisions for one step
pub fn resolve_collisions(
    balls: &mut [Ball],
    bounds: Bounds,
    broadphase: Broadphase,
) -> CollisionReport {
    let mut wall_hits = resolve_walls(balls, bounds);

    let mut contacts = Vec::new();
    for (i, j) in detect_contacts(balls, broadphase) {
        if resolve_pair(balls, i, j) {
            contacts.push((balls[i].id(), balls[j].id()));
        }
    }

    let mut relaxation_passes = 0;
    loop {
        wall_hits += resolve_walls(balls, bounds);
        let remaining: Vec<_> = detect_contacts(balls, broadphase)
            .into_iter()
            .filter(|&(i, j)| overlap(&balls[i], &balls[j]) > OVERLAP_TOLERANCE)
            .collect();
        if remaining.is_empty() {
            break;
        }
        if relaxation_passes == MAX_RELAXATION_PASSES {
            log::debug!("{} overlaps left after relaxation", remaining.len());
            break;
        }
        relaxation_passes += 1;
        for (i, j) in remaining {
            separate_pair(balls, i, j, bounds, OVERLAP_TOLERANCE);
        }
    }

    CollisionReport {
        wall_hits,
        contacts,
        relaxation_passes,
    }
}
