//! Gravity well: a radial pull hazard that self-expires.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::{direction_to, within_radius, Aabb};
use barrage_core::state::PatternHint;

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::{BlackHoleSpec, PatternOutput};

/// Displacement applied to a point at `target` for one tick.
///
/// Points outside `radius` and points on the center are unaffected.
pub fn gravity_pull(center: Vec2, radius: f32, pull: f32, target: Vec2) -> Vec2 {
    if !within_radius(center, target, radius) {
        return Vec2::ZERO;
    }
    match direction_to(target, center) {
        Some(dir) => dir * (radius - target.distance(center)) * pull,
        None => Vec2::ZERO,
    }
}

#[derive(Debug, Clone)]
pub struct GravityWell {
    life: Cooldown,
    center: Option<Vec2>,
}

impl GravityWell {
    pub fn new() -> Self {
        Self {
            life: Cooldown::new(GRAVITY_DURATION_MS),
            center: None,
        }
    }
}

impl Default for GravityWell {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for GravityWell {
    fn attack(&mut self, _body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        if self.center.is_some() {
            return;
        }
        let field = ctx.field;
        let margin = GRAVITY_RADIUS * 0.5;
        let center = Vec2::new(
            ctx.random_between(field.left() + margin, field.right() - margin),
            ctx.random_between(field.top() + field.h * 0.45, field.top() + field.h * 0.85),
        );
        out.push(PatternOutput::BlackHole(BlackHoleSpec {
            center,
            radius: GRAVITY_RADIUS,
            pull: GRAVITY_PULL,
            duration_ms: GRAVITY_DURATION_MS,
        }));
        self.center = Some(center);
        self.life.reset(ctx.now_ms);
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        self.center.is_some() && self.life.is_finished(now_ms)
    }

    // No suspend/resume: the spawned hazard runs on its own clock and the
    // outline has to disappear with it.

    fn hint(&self, _body: &Aabb, now_ms: u64) -> Option<PatternHint> {
        let center = self.center?;
        (!self.life.is_finished(now_ms)).then_some(PatternHint::GravityOutline {
            center,
            radius: GRAVITY_RADIUS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_toward_center() {
        let center = Vec2::new(100.0, 100.0);
        let d = gravity_pull(center, 50.0, 0.1, Vec2::new(140.0, 100.0));
        // (50 - 40) * 0.1 = 1 pixel toward the center.
        assert!((d - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_pull_grows_toward_center() {
        let center = Vec2::ZERO;
        let near = gravity_pull(center, 100.0, 0.05, Vec2::new(10.0, 0.0)).length();
        let far = gravity_pull(center, 100.0, 0.05, Vec2::new(90.0, 0.0)).length();
        assert!(near > far);
    }
}
