//! Vertical fall-and-respawn loop.
//!
//! Members fall fast, slow down past a threshold height, and once they drop
//! below the field wait off-screen for a fixed delay before reappearing at
//! their spawn height.

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;

use super::strategy::MoveContext;
use super::Column;

#[derive(Debug, Clone, Default)]
pub struct VerticalLoop;

impl VerticalLoop {
    /// Record each member's current position as its spawn point.
    pub fn attach(columns: &mut [Column]) {
        for ship in columns.iter_mut().flat_map(|c| c.ships.iter_mut()) {
            ship.motion.home = glam::Vec2::new(ship.bounds.x, ship.bounds.y);
            ship.motion.respawn = None;
        }
    }

    pub fn update(&mut self, columns: &mut [Column], ctx: &MoveContext) {
        let field = ctx.field;
        let threshold = field.top() + field.h * LOOP_SLOW_THRESHOLD_RATIO;

        for ship in columns.iter_mut().flat_map(|c| c.ships.iter_mut()) {
            if let Some(wait) = ship.motion.respawn {
                if wait.is_finished(ctx.now_ms) {
                    ship.bounds.x = ship.motion.home.x;
                    ship.bounds.y = ship.motion.home.y;
                    ship.motion.respawn = None;
                }
                continue;
            }

            let speed = if ship.bounds.y < threshold {
                LOOP_FAST_SPEED
            } else {
                LOOP_SLOW_SPEED
            };
            ship.bounds.y += speed;

            if ship.bounds.top() > field.bottom() {
                ship.bounds.y = field.top() - ship.bounds.h - PARK_MARGIN;
                ship.motion.respawn = Some(Cooldown::started(LOOP_RESPAWN_MS, ctx.now_ms));
            }
        }
    }
}
