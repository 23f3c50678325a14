//! Elastic collision response.
//!
//! Walls are perfectly elastic and frictionless. Ball-ball contacts are
//! resolved as 2-D elastic collisions between unequal masses: the normal
//! components of the velocities exchange momentum according to the 1-D
//! formula, tangential components are untouched.
//!
//! ```text
//!   v1n' = ((m1 - m2)·v1n + 2·m2·v2n) / (m1 + m2)
//!   v2n' = ((m2 - m1)·v2n + 2·m1·v1n) / (m1 + m2)
//! ```

use crate::ball::Ball;
use crate::vector::{self, Vector2, FALLBACK_NORMAL};
use crate::world::Bounds;

/// Clamp one axis into `[min + r, max - r]`, returning `(dp, dv)` along it
fn wall_axis(pos: f64, vel: f64, r: f64, min: f64, max: f64) -> Option<(f64, f64)> {
    if pos - r < min {
        // Only reflect motion that points into the wall
        let dv = if vel < 0.0 { -2.0 * vel } else { 0.0 };
        Some((min + r - pos, dv))
    } else if pos + r > max {
        let dv = if vel > 0.0 { -2.0 * vel } else { 0.0 };
        Some((max - r - pos, dv))
    } else {
        None
    }
}

/// Keep every ball inside `bounds`, returning the number of wall hits
pub fn resolve_walls(balls: &mut [Ball], bounds: Bounds) -> usize {
    let mut hits = 0;
    for ball in balls.iter_mut() {
        let p = ball.position();
        let v = ball.velocity();
        let r = ball.radius();
        let mut dp = Vector2::ZERO;
        let mut dv = Vector2::ZERO;

        if let Some((px, vx)) = wall_axis(p.x, v.x, r, bounds.min.x, bounds.max.x) {
            dp.x = px;
            dv.x = vx;
            hits += 1;
        }
        if let Some((py, vy)) = wall_axis(p.y, v.y, r, bounds.min.y, bounds.max.y) {
            dp.y = py;
            dv.y = vy;
            hits += 1;
        }

        if dp != Vector2::ZERO || dv != Vector2::ZERO {
            ball.apply(dp, dv);
        }
    }
    hits
}

/// Whether `ball` rests against a wall that blocks a push along `dir`
fn pinned(ball: &Ball, dir: Vector2, bounds: Bounds, slack: f64) -> bool {
    let p = ball.position();
    let r = ball.radius();
    (dir.x < 0.0 && p.x - r <= bounds.min.x + slack)
        || (dir.x > 0.0 && p.x + r >= bounds.max.x - slack)
        || (dir.y < 0.0 && p.y - r <= bounds.min.y + slack)
        || (dir.y > 0.0 && p.y + r >= bounds.max.y - slack)
}

/// Push an overlapping pair apart without touching velocities
///
/// A ball held against a wall on the side it would be pushed towards stays
/// put and its partner takes the whole correction. Returns `false` if the
/// pair is no longer touching.
pub fn separate_pair(
    balls: &mut [Ball],
    i: usize,
    j: usize,
    bounds: Bounds,
    slack: f64,
) -> bool {
    debug_assert!(i < j);
    let (head, tail) = balls.split_at_mut(j);
    let a = &mut head[i];
    let b = &mut tail[0];

    let delta = b.position() - a.position();
    let dist = delta.length();
    let reach = a.radius() + b.radius();
    if dist > reach {
        return false;
    }
    let normal = vector::normalize_or(delta, FALLBACK_NORMAL);

    let mut inv_a = 1.0 / a.mass();
    let mut inv_b = 1.0 / b.mass();
    match (pinned(a, -normal, bounds, slack), pinned(b, normal, bounds, slack)) {
        (true, false) => inv_a = 0.0,
        (false, true) => inv_b = 0.0,
        // Squeezed between two walls, nothing better than the mass split
        _ => {}
    }
    let inv_total = inv_a + inv_b;
    let overlap = reach - dist;

    a.apply(-normal * (overlap * inv_a / inv_total), Vector2::ZERO);
    b.apply(normal * (overlap * inv_b / inv_total), Vector2::ZERO);
    true
}

/// Resolve the contact between `balls[i]` and `balls[j]` (`i < j`)
///
/// Returns `false` if the pair is no longer touching.
pub fn resolve_pair(balls: &mut [Ball], i: usize, j: usize) -> bool {
    debug_assert!(i < j);
    let (head, tail) = balls.split_at_mut(j);
    let a = &mut head[i];
    let b = &mut tail[0];

    let delta = b.position() - a.position();
    let dist = delta.length();
    let reach = a.radius() + b.radius();
    if dist > reach {
        return false;
    }

    let normal = match vector::normalize(delta) {
        Ok(n) => n,
        Err(err) => {
            log::debug!("{err} between {} and {}, using x axis", a.id(), b.id());
            FALLBACK_NORMAL
        }
    };

    // Separate along the normal, heavier body moves less
    let inv_a = 1.0 / a.mass();
    let inv_b = 1.0 / b.mass();
    let inv_total = inv_a + inv_b;
    let overlap = reach - dist;
    let dp_a = -normal * (overlap * inv_a / inv_total);
    let dp_b = normal * (overlap * inv_b / inv_total);

    let (m1, m2) = (a.mass(), b.mass());
    let v1n = a.velocity().dot(normal);
    let v2n = b.velocity().dot(normal);

    let (dv_a, dv_b) = if v1n > v2n {
        let v1n_new = ((m1 - m2) * v1n + 2.0 * m2 * v2n) / (m1 + m2);
        let v2n_new = ((m2 - m1) * v2n + 2.0 * m1 * v1n) / (m1 + m2);
        (normal * (v1n_new - v1n), normal * (v2n_new - v2n))
    } else {
        // Already separating
        (Vector2::ZERO, Vector2::ZERO)
    };

    a.apply(dp_a, dv_a);
    b.apply(dp_b, dv_b);
    true
}
