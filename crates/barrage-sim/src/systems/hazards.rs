//! Laser lifecycles and gravity-well pull.

use hecs::World;

use barrage_core::components::{BlackHole, Laser, PlayerShip};
use barrage_core::enums::LaserState;
use barrage_core::types::{Hitbox, Position};

use barrage_ai::boss::gravity_well::gravity_pull;

use crate::context::SimContext;

/// Advance one laser through charge, visible and fade.
pub fn advance_laser(laser: &mut Laser, now_ms: u64) {
    match laser.state {
        LaserState::Charging if laser.charge.is_finished(now_ms) => {
            laser.state = LaserState::Firing;
            laser.visible.reset(now_ms);
        }
        LaserState::Firing if laser.visible.is_finished(now_ms) => {
            laser.state = LaserState::Fading;
            laser.fade.reset(now_ms);
        }
        LaserState::Fading if laser.fade.is_finished(now_ms) => {
            laser.state = LaserState::Expired;
        }
        _ => {}
    }
}

pub fn run(world: &mut World, ctx: &SimContext) {
    for (_entity, laser) in world.query_mut::<&mut Laser>() {
        advance_laser(laser, ctx.now_ms);
    }

    let wells: Vec<BlackHole> = world
        .query::<&BlackHole>()
        .iter()
        .filter(|(_, hole)| !hole.life.is_finished(ctx.now_ms))
        .map(|(_, hole)| *hole)
        .collect();
    if wells.is_empty() {
        return;
    }

    for (_entity, (ship, pos, hitbox)) in world.query_mut::<(&PlayerShip, &mut Position, &Hitbox)>() {
        if !ship.is_alive() {
            continue;
        }
        let mut rect = pos.rect(hitbox);
        for well in &wells {
            rect.translate(gravity_pull(well.center, well.radius, well.pull, rect.center()));
        }
        rect.clamp_within(&ctx.field);
        pos.x = rect.x;
        pos.y = rect.y;
    }
}
