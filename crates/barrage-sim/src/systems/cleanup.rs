//! Cleanup system: hands spent bullets and items back to their pools and
//! despawns everything else that has finished.

use hecs::{Entity, World};

use barrage_core::components::*;
use barrage_core::constants::OFF_SCREEN_MARGIN;
use barrage_core::enums::LaserState;
use barrage_core::geometry::is_off_screen;
use barrage_core::types::{Hitbox, Position};

use crate::context::SimContext;
use crate::pool::Pool;

/// Remove finished entities. Pooled components are detached before the
/// entity is despawned so the instance can be reused.
pub fn run(
    world: &mut World,
    ctx: &SimContext,
    bullet_pool: &mut Pool<Bullet>,
    item_pool: &mut Pool<DropItem>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let field = ctx.field;

    // Bullets: consumed or out of the field.
    for (entity, (bullet, pos, hitbox)) in world.query_mut::<(&Bullet, &Position, &Hitbox)>() {
        let off_screen = is_off_screen(&pos.rect(hitbox), &field, OFF_SCREEN_MARGIN);
        if !bullet.is_active() || off_screen {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        if let Ok(bullet) = world.remove_one::<Bullet>(entity) {
            bullet_pool.release(bullet);
        }
        let _ = world.despawn(entity);
    }

    // Items: picked up or fallen past the bottom.
    for (entity, (item, pos, hitbox)) in world.query_mut::<(&DropItem, &Position, &Hitbox)>() {
        let off_screen = is_off_screen(&pos.rect(hitbox), &field, OFF_SCREEN_MARGIN);
        if item.removed || off_screen {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        if let Ok(item) = world.remove_one::<DropItem>(entity) {
            item_pool.release(item);
        }
        let _ = world.despawn(entity);
    }

    let now = ctx.now_ms;
    for (entity, laser) in world.query_mut::<&Laser>() {
        if laser.state == LaserState::Expired {
            despawn_buffer.push(entity);
        }
    }
    for (entity, beam) in world.query_mut::<&Beam>() {
        if beam.visible.is_finished(now) {
            despawn_buffer.push(entity);
        }
    }
    for (entity, hole) in world.query_mut::<&BlackHole>() {
        if hole.life.is_finished(now) {
            despawn_buffer.push(entity);
        }
    }
    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion.life.is_finished(now) {
            despawn_buffer.push(entity);
        }
    }
    for (entity, sub) in world.query_mut::<&SubShip>() {
        if sub.removed {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
