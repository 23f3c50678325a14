use crate::ball::{Ball, BallId};
use crate::vector::{self, Vector2};

/// Outcome of one integration pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationReport {
    /// Balls whose update was skipped because it produced non-finite values
    pub skipped: Vec<BallId>,
}

/// Advance every ball by `dt` using semi-implicit Euler integration
///
/// `v' = v + (F/m)·dt`, then `p' = p + v'·dt`. A ball whose force, velocity or
/// position would become non-finite keeps its previous state.
pub fn integrate(balls: &mut [Ball], forces: &[Vector2], dt: f64) -> IntegrationReport {
    debug_assert_eq!(balls.len(), forces.len());
    let mut report = IntegrationReport::default();

    for (ball, force) in balls.iter_mut().zip(forces) {
        let dv = *force / ball.mass() * dt;
        let new_velocity = ball.velocity() + dv;
        let dp = new_velocity * dt;

        if !vector::is_finite(*force)
            || !vector::is_finite(new_velocity)
            || !vector::is_finite(ball.position() + dp)
        {
            log::warn!(
                "skipping update of ball {}: non-finite state (force {:?})",
                ball.id(),
                force
            );
            report.skipped.push(ball.id());
            continue;
        }

        ball.apply(dp, dv);
    }

    report
}
