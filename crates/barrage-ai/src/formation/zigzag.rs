//! Stepped zigzag: sideways runs of fixed length with a slow vertical drift.

use glam::Vec2;

use barrage_core::constants::ZIGZAG_SEGMENT_STEPS;
use barrage_core::geometry::reflect_within;

use super::strategy::MoveContext;
use super::{group_bounds, translate_all, Column};

#[derive(Debug, Clone)]
pub struct Zigzag {
    dir: Vec2,
    steps: u32,
}

impl Zigzag {
    pub fn new() -> Self {
        Self {
            dir: Vec2::new(1.0, 1.0),
            steps: 0,
        }
    }

    pub fn update(&mut self, columns: &mut [Column], ctx: &MoveContext) {
        let delta = Vec2::new(self.dir.x * ctx.speed, self.dir.y * ctx.speed * 0.5);
        translate_all(columns, delta);

        self.steps += 1;
        if self.steps >= ZIGZAG_SEGMENT_STEPS {
            self.steps = 0;
            self.dir.x = -self.dir.x;
        }

        let Some(bounds) = group_bounds(columns) else {
            return;
        };
        let mut clamped = bounds;
        let reflected = reflect_within(&mut clamped, self.dir, &ctx.area());
        if reflected.x != self.dir.x {
            // A wall starts a fresh run.
            self.steps = 0;
        }
        self.dir = reflected;
        translate_all(columns, Vec2::new(clamped.x - bounds.x, clamped.y - bounds.y));
    }
}

impl Default for Zigzag {
    fn default() -> Self {
        Self::new()
    }
}
