//! Guided-missile launcher. Steering happens in the orchestrator; this
//! pattern only decides when and where missiles leave the boss.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::enums::BulletKind;
use barrage_core::geometry::Aabb;

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::{BulletSpec, PatternOutput};

#[derive(Debug, Clone)]
pub struct MissileLauncher {
    gate: Cooldown,
    volleys: u32,
    /// Set when there was nobody left to launch at.
    idle: bool,
}

impl MissileLauncher {
    pub fn new() -> Self {
        Self {
            gate: Cooldown::new(MISSILE_GAP_MS),
            volleys: 0,
            idle: false,
        }
    }
}

impl Default for MissileLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for MissileLauncher {
    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        if self.idle || self.volleys >= MISSILE_VOLLEYS || !self.gate.is_finished(ctx.now_ms) {
            return;
        }
        if ctx.targets.is_empty() {
            self.idle = true;
            return;
        }
        // Launch points spaced evenly along the lower edge.
        for i in 0..MISSILE_PER_VOLLEY {
            let t = (i as f32 + 0.5) / MISSILE_PER_VOLLEY as f32;
            let origin = Vec2::new(body.left() + body.w * t, body.bottom());
            out.push(PatternOutput::Bullet(BulletSpec {
                kind: BulletKind::Guided,
                origin,
                velocity: Vec2::Y * MISSILE_SPEED,
                size: MISSILE_SIZE,
                damage: 1,
                lifetime_ms: Some(MISSILE_LIFETIME_MS),
            }));
        }
        self.volleys += 1;
        self.gate.reset(ctx.now_ms);
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        self.idle || (self.volleys >= MISSILE_VOLLEYS && self.gate.is_finished(now_ms))
    }

    fn suspend(&mut self, now_ms: u64) {
        self.gate.pause(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.gate.resume(now_ms);
    }
}
