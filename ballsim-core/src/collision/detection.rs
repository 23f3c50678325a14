//! Contact detection between balls.
//!
//! Both broad phases return the same pair list: every pair whose center
//! distance is at most the sum of radii, as index pairs `(i, j)` with `i < j`,
//! sorted ascending. Since balls are stored in id order this is also ascending
//! by the pair's lower id.

use crate::ball::Ball;
use crate::error::ConfigurationError;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// Strategy used to find candidate pairs
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Broadphase {
    /// Test every pair, O(n²)
    #[default]
    BruteForce,
    /// Bucket balls into square cells and only test balls sharing a cell.
    /// Cells never get smaller than the largest ball diameter, so each ball
    /// lands in at most four of them.
    UniformGrid { cell_size: f64 },
}

impl Broadphase {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            Broadphase::BruteForce => Ok(()),
            Broadphase::UniformGrid { cell_size } => {
                if cell_size > 0.0 && cell_size.is_finite() {
                    Ok(())
                } else {
                    Err(ConfigurationError::InvalidCellSize(cell_size))
                }
            }
        }
    }
}

/// Whether two balls touch or overlap
pub fn in_contact(a: &Ball, b: &Ball) -> bool {
    let reach = a.radius() + b.radius();
    a.position().distance_squared(b.position()) <= reach * reach
}

/// All touching pairs, sorted by `(i, j)`
pub fn detect_contacts(balls: &[Ball], broadphase: Broadphase) -> Vec<(usize, usize)> {
    match broadphase {
        Broadphase::BruteForce => brute_force_contacts(balls),
        Broadphase::UniformGrid { cell_size } => grid_contacts(balls, cell_size),
    }
}

fn brute_force_contacts(balls: &[Ball]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            if in_contact(&balls[i], &balls[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn cell_of(coord: f64, cell_size: f64) -> i64 {
    (coord / cell_size).floor() as i64
}

fn grid_contacts(balls: &[Ball], cell_size: f64) -> Vec<(usize, usize)> {
    let widest = balls
        .iter()
        .map(|ball| 2.0 * ball.radius())
        .fold(0.0, f64::max);
    let cell_size = cell_size.max(widest);
    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();

    // Insert each ball into every cell its bounding box covers
    for (idx, ball) in balls.iter().enumerate() {
        let p = ball.position();
        let r = ball.radius();
        let (x0, x1) = (cell_of(p.x - r, cell_size), cell_of(p.x + r, cell_size));
        let (y0, y1) = (cell_of(p.y - r, cell_size), cell_of(p.y + r, cell_size));
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                cells.entry((cx, cy)).or_default().push(idx);
            }
        }
    }

    let mut pairs = BTreeSet::new();
    for members in cells.values() {
        for (n, &i) in members.iter().enumerate() {
            for &j in &members[n + 1..] {
                let pair = (i.min(j), i.max(j));
                if !pairs.contains(&pair) && in_contact(&balls[pair.0], &balls[pair.1]) {
                    pairs.insert(pair);
                }
            }
        }
    }

    pairs.into_iter().collect()
}
