//! Classic side-to-side march: step sideways, drop and reverse at an edge.

use glam::Vec2;

use barrage_core::constants::SIDE_TO_SIDE_DROP;

use super::strategy::MoveContext;
use super::{group_bounds, translate_all, Column};

#[derive(Debug, Clone)]
pub struct SideToSide {
    dir: f32,
}

impl SideToSide {
    pub fn new() -> Self {
        Self { dir: 1.0 }
    }

    pub fn direction(&self) -> f32 {
        self.dir
    }

    pub fn update(&mut self, columns: &mut [Column], ctx: &MoveContext) {
        let Some(bounds) = group_bounds(columns) else {
            return;
        };
        let step = self.dir * ctx.speed;
        let blocked = (step > 0.0 && bounds.right() + step > ctx.field.right())
            || (step < 0.0 && bounds.left() + step < ctx.field.left());
        if blocked {
            let drop = SIDE_TO_SIDE_DROP.min(ctx.lower_limit - bounds.bottom()).max(0.0);
            translate_all(columns, Vec2::new(0.0, drop));
            self.dir = -self.dir;
        } else {
            translate_all(columns, Vec2::new(step, 0.0));
        }
    }
}

impl Default for SideToSide {
    fn default() -> Self {
        Self::new()
    }
}
