//! Diagonal bounce with a temporary slow-down after each loss.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::reflect_within;

use super::strategy::MoveContext;
use super::{group_bounds, translate_all, Column};

#[derive(Debug, Clone)]
pub struct Diagonal {
    /// Components are each +1 or -1.
    dir: Vec2,
    slow: Cooldown,
}

impl Diagonal {
    pub fn new() -> Self {
        Self {
            dir: Vec2::new(1.0, 1.0),
            slow: Cooldown::new(DIAGONAL_SLOW_MS),
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    pub fn is_slowed(&self, now_ms: u64) -> bool {
        !self.slow.is_finished(now_ms)
    }

    pub fn slow_down(&mut self, now_ms: u64) {
        self.slow.reset(now_ms);
    }

    pub fn update(&mut self, columns: &mut [Column], ctx: &MoveContext) {
        let factor = if self.is_slowed(ctx.now_ms) {
            DIAGONAL_SLOW_FACTOR
        } else {
            1.0
        };
        translate_all(columns, self.dir * ctx.speed * SMOOTH_SPEED_FACTOR * factor);

        let Some(bounds) = group_bounds(columns) else {
            return;
        };
        let mut clamped = bounds;
        self.dir = reflect_within(&mut clamped, self.dir, &ctx.area());
        translate_all(columns, Vec2::new(clamped.x - bounds.x, clamped.y - bounds.y));
    }
}

impl Default for Diagonal {
    fn default() -> Self {
        Self::new()
    }
}
