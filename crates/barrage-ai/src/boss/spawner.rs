//! Background mob spawner: launches waves of child mobs from the boss.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::Aabb;

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::PatternOutput;

#[derive(Debug, Clone)]
pub struct MobSpawner {
    gate: Cooldown,
    waves: u32,
}

impl MobSpawner {
    pub fn new() -> Self {
        Self {
            gate: Cooldown::new(MOB_GAP_MS),
            waves: 0,
        }
    }
}

impl Default for MobSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for MobSpawner {
    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        if self.waves >= MOB_WAVES || !self.gate.is_finished(ctx.now_ms) {
            return;
        }
        out.push(PatternOutput::SpawnMobs {
            origin: Vec2::new(body.center().x, body.bottom()),
            count: MOB_COUNT,
        });
        self.waves += 1;
        self.gate.reset(ctx.now_ms);
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        self.waves >= MOB_WAVES && self.gate.is_finished(now_ms)
    }

    fn suspend(&mut self, now_ms: u64) {
        self.gate.pause(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.gate.resume(now_ms);
    }
}
