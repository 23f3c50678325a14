//! 2-D vector math
//!
//! All engine code works on [`Vector2`], an alias for `glam::DVec2`. Addition,
//! subtraction, scaling, dot product and magnitude come straight from glam;
//! this module adds the checked normalization the collision and force code
//! rely on.

use crate::error::DegenerateVectorError;
use glam::DVec2;

/// Position, velocity and force vectors in world units
pub type Vector2 = DVec2;

/// Unit normal used when two centers coincide exactly
pub const FALLBACK_NORMAL: Vector2 = DVec2::X;

/// Normalize `v`, failing on zero-length or non-finite input
pub fn normalize(v: Vector2) -> Result<Vector2, DegenerateVectorError> {
    let len = v.length();
    if len == 0.0 || !len.is_finite() {
        return Err(DegenerateVectorError { x: v.x, y: v.y });
    }
    Ok(v / len)
}

/// Normalize `v`, returning `fallback` when `v` is degenerate
pub fn normalize_or(v: Vector2, fallback: Vector2) -> Vector2 {
    normalize(v).unwrap_or(fallback)
}

/// Whether both components are finite
pub fn is_finite(v: Vector2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_unit_length() {
        let n = normalize(Vector2::new(3.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
        assert!((n.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_fails() {
        let err = normalize(Vector2::ZERO).unwrap_err();
        assert_eq!(err.x, 0.0);
        assert_eq!(err.y, 0.0);
    }

    #[test]
    fn normalize_non_finite_fails() {
        assert!(normalize(Vector2::new(f64::NAN, 1.0)).is_err());
        assert!(normalize(Vector2::new(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn normalize_or_uses_fallback() {
        assert_eq!(normalize_or(Vector2::ZERO, FALLBACK_NORMAL), Vector2::X);
        assert_eq!(
            normalize_or(Vector2::new(0.0, -2.0), FALLBACK_NORMAL),
            Vector2::new(0.0, -1.0)
        );
    }

    #[test]
    fn basic_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(-3.0, 0.5);
        assert_eq!(a + b, Vector2::new(-2.0, 2.5));
        assert_eq!(a - b, Vector2::new(4.0, 1.5));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(a.dot(b), -2.0);
    }
}
