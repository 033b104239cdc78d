//! Time-gapped laser barrage.

use glam::Vec2;
use rand::Rng;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::{direction_to, Aabb, Segment};

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::{LaserSpec, PatternOutput};

#[derive(Debug, Clone)]
pub struct LaserBarrage {
    gate: Cooldown,
    fired: u32,
    /// Set when no valid target remained.
    exhausted: bool,
}

impl LaserBarrage {
    pub fn new() -> Self {
        Self {
            gate: Cooldown::new(BARRAGE_GAP_MS),
            fired: 0,
            exhausted: false,
        }
    }

    pub fn lasers_fired(&self) -> u32 {
        self.fired
    }
}

impl Default for LaserBarrage {
    fn default() -> Self {
        Self::new()
    }
}

/// Random point just outside the left, right or top edge of `field`.
fn random_origin(ctx: &mut PatternContext<'_>) -> Vec2 {
    let field = ctx.field;
    match ctx.rng.gen_range(0..3) {
        0 => Vec2::new(
            field.left() - LASER_ORIGIN_MARGIN,
            ctx.random_between(field.top(), field.bottom()),
        ),
        1 => Vec2::new(
            field.right() + LASER_ORIGIN_MARGIN,
            ctx.random_between(field.top(), field.bottom()),
        ),
        _ => Vec2::new(
            ctx.random_between(field.left(), field.right()),
            field.top() - LASER_ORIGIN_MARGIN,
        ),
    }
}

impl Pattern for LaserBarrage {
    fn attack(&mut self, _body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        if self.exhausted || self.fired >= BARRAGE_LASERS || !self.gate.is_finished(ctx.now_ms) {
            return;
        }
        let Some(target) = ctx.random_target() else {
            self.exhausted = true;
            return;
        };
        let origin = random_origin(ctx);
        let Some(dir) = direction_to(origin, target.bounds.center()) else {
            return;
        };
        // Long enough to cross the whole field from any origin.
        let reach = ctx.field.w + ctx.field.h + LASER_ORIGIN_MARGIN * 2.0;
        out.push(PatternOutput::Laser(LaserSpec {
            segment: Segment::new(origin, origin + dir * reach),
            target: target.id,
        }));
        self.fired += 1;
        self.gate.reset(ctx.now_ms);
    }

    fn is_complete(&self, _now_ms: u64) -> bool {
        self.exhausted || self.fired >= BARRAGE_LASERS
    }

    fn suspend(&mut self, now_ms: u64) {
        self.gate.pause(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.gate.resume(now_ms);
    }
}
