//! Fan of bullets aimed at the nearest player, fired in a fixed number of volleys.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::Aabb;

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::{BulletSpec, PatternOutput};

#[derive(Debug, Clone)]
pub struct SpreadShot {
    gate: Cooldown,
    volleys: u32,
}

impl SpreadShot {
    pub fn new() -> Self {
        Self {
            gate: Cooldown::new(SPREAD_INTERVAL_MS),
            volleys: 0,
        }
    }

    pub fn volleys_fired(&self) -> u32 {
        self.volleys
    }
}

impl Default for SpreadShot {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` bullet velocities spread evenly across `arc` radians around `aim`.
pub fn fan(aim: Vec2, count: u32, arc: f32, speed: f32) -> impl Iterator<Item = Vec2> {
    let base = aim.y.atan2(aim.x);
    let step = if count > 1 { arc / (count - 1) as f32 } else { 0.0 };
    let first = base - step * (count.saturating_sub(1)) as f32 * 0.5;
    (0..count).map(move |i| {
        let angle = first + step * i as f32;
        Vec2::from_angle(angle) * speed
    })
}

impl Pattern for SpreadShot {
    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        if self.volleys >= SPREAD_VOLLEYS || !self.gate.is_finished(ctx.now_ms) {
            return;
        }
        let origin = Vec2::new(body.center().x, body.bottom());
        let aim = ctx.aim_from(origin);
        for velocity in fan(aim, SPREAD_COUNT, SPREAD_ANGLE, BOSS_BULLET_SPEED) {
            out.push(PatternOutput::Bullet(BulletSpec::standard(
                origin,
                velocity,
                BOSS_BULLET_SIZE,
            )));
        }
        self.volleys += 1;
        self.gate.reset(ctx.now_ms);
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        self.volleys >= SPREAD_VOLLEYS && self.gate.is_finished(now_ms)
    }

    fn suspend(&mut self, now_ms: u64) {
        self.gate.pause(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.gate.resume(now_ms);
    }
}
