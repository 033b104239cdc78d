//! Entity spawn factories.
//!
//! Every entity is created fully valid in one call. Bullets and items come
//! from their pools and are re-initialised in place.

use glam::Vec2;
use hecs::{Entity, World};

use barrage_core::components::*;
use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::enums::*;
use barrage_core::geometry::{Aabb, Segment};
use barrage_core::types::{Hitbox, PlayerId, Position, Velocity};

use barrage_ai::output::{BlackHoleSpec, BulletSpec, LaserSpec};

use crate::pool::Pool;

/// Spawn player `id` of `players` along the bottom of the field.
pub fn spawn_player(world: &mut World, id: PlayerId, players: usize, field: &Aabb) -> Entity {
    let lanes = players.max(1) as f32 + 1.0;
    let x = field.left() + field.w * (id.slot() as f32 + 1.0) / lanes - PLAYER_WIDTH * 0.5;
    let y = field.bottom() - PLAYER_HEIGHT - 24.0;
    world.spawn((
        PlayerShip::new(id),
        Position::new(x, y),
        Hitbox::new(PLAYER_WIDTH, PLAYER_HEIGHT),
    ))
}

/// Attach an option drone to `owner`. `index` picks the left or right side.
pub fn spawn_sub_ship(world: &mut World, owner: PlayerId, owner_pos: Position, index: usize) -> Entity {
    let offset = if index % 2 == 0 {
        Vec2::new(-SUB_SHIP_OFFSET_X, SUB_SHIP_OFFSET_Y)
    } else {
        Vec2::new(PLAYER_WIDTH + SUB_SHIP_OFFSET_X - SUB_SHIP_WIDTH, SUB_SHIP_OFFSET_Y)
    };
    world.spawn((
        SubShip {
            owner,
            offset,
            removed: false,
        },
        Position::from(owner_pos.vec() + offset),
        Hitbox::new(SUB_SHIP_WIDTH, SUB_SHIP_HEIGHT),
    ))
}

fn spawn_bullet_entity(world: &mut World, bullet: Bullet, rect: Aabb, velocity: Vec2) -> Entity {
    world.spawn((
        bullet,
        Position::new(rect.x, rect.y),
        Velocity::from(velocity),
        Hitbox::new(rect.w, rect.h),
    ))
}

/// Player shot travelling straight up from `muzzle` (top center).
pub fn spawn_player_bullet(
    world: &mut World,
    pool: &mut Pool<Bullet>,
    owner: PlayerId,
    muzzle: Vec2,
    max_penetration: u32,
) -> Entity {
    let mut bullet = pool.acquire();
    bullet.reinit(
        BulletKind::Standard,
        Faction::Player,
        Some(owner),
        PLAYER_BULLET_DAMAGE,
        max_penetration,
    );
    let rect = Aabb::centered(
        muzzle - Vec2::new(0.0, PLAYER_BULLET_HEIGHT * 0.5),
        PLAYER_BULLET_WIDTH,
        PLAYER_BULLET_HEIGHT,
    );
    spawn_bullet_entity(world, bullet, rect, Vec2::new(0.0, -PLAYER_BULLET_SPEED))
}

/// Enemy or boss projectile described by a behaviour spawn request.
pub fn spawn_hostile_bullet(
    world: &mut World,
    pool: &mut Pool<Bullet>,
    spec: &BulletSpec,
    now_ms: u64,
) -> Entity {
    let mut bullet = pool.acquire();
    bullet.reinit(spec.kind, Faction::Enemy, None, spec.damage, 0);
    bullet.lifetime = spec.lifetime_ms.map(|ms| Cooldown::started(ms, now_ms));
    let rect = Aabb::centered(spec.origin, spec.size, spec.size);
    spawn_bullet_entity(world, bullet, rect, spec.velocity)
}

/// Bomb launched upward by `owner`; detonates on command or when its fuse runs out.
pub fn spawn_bomb(
    world: &mut World,
    pool: &mut Pool<Bullet>,
    owner: PlayerId,
    muzzle: Vec2,
    now_ms: u64,
) -> Entity {
    let mut bullet = pool.acquire();
    bullet.reinit(BulletKind::Bomb, Faction::Player, Some(owner), BOMB_DAMAGE, 0);
    bullet.lifetime = Some(Cooldown::started(BOMB_FUSE_MS, now_ms));
    let rect = Aabb::centered(muzzle, BOMB_SIZE, BOMB_SIZE);
    spawn_bullet_entity(world, bullet, rect, Vec2::new(0.0, -BOMB_SPEED))
}

/// Falling pickup centered on `center`.
pub fn spawn_item(world: &mut World, pool: &mut Pool<DropItem>, kind: ItemKind, center: Vec2) -> Entity {
    let mut item = pool.acquire();
    item.kind = kind;
    item.removed = false;
    let rect = Aabb::centered(center, ITEM_SIZE, ITEM_SIZE);
    world.spawn((
        item,
        Position::new(rect.x, rect.y),
        Velocity::new(0.0, ITEM_FALL_SPEED),
        Hitbox::new(ITEM_SIZE, ITEM_SIZE),
    ))
}

pub fn spawn_laser(world: &mut World, spec: &LaserSpec, now_ms: u64) -> Entity {
    world.spawn((Laser {
        segment: spec.segment,
        state: LaserState::Charging,
        charge: Cooldown::started(LASER_CHARGE_MS, now_ms),
        visible: Cooldown::new(LASER_VISIBLE_MS),
        fade: Cooldown::new(LASER_FADE_MS),
        hit_players: Vec::new(),
    },))
}

pub fn spawn_beam(world: &mut World, owner: PlayerId, segment: Segment, damage: u32, now_ms: u64) -> Entity {
    world.spawn((Beam {
        owner,
        segment,
        damage,
        visible: Cooldown::started(BEAM_VISIBLE_MS, now_ms),
        hit_units: Vec::new(),
    },))
}

pub fn spawn_black_hole(world: &mut World, spec: &BlackHoleSpec, now_ms: u64) -> Entity {
    world.spawn((BlackHole {
        center: spec.center,
        radius: spec.radius,
        pull: spec.pull,
        life: Cooldown::started(spec.duration_ms, now_ms),
    },))
}

/// Visual blast; its position is the top-left of the blast's bounding square.
pub fn spawn_explosion(world: &mut World, center: Vec2, radius: f32, now_ms: u64) -> Entity {
    world.spawn((
        Explosion {
            radius,
            life: Cooldown::started(EXPLOSION_VISIBLE_MS, now_ms),
        },
        Position::from(center - Vec2::splat(radius)),
    ))
}
