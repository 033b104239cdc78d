//! Player commands and per-tick ship upkeep.
//!
//! Commands are applied at the tick boundary, before any other system runs.
//! Dead ships ignore every command.

use glam::Vec2;
use hecs::{Entity, World};

use barrage_core::commands::PlayerCommand;
use barrage_core::components::*;
use barrage_core::constants::*;
use barrage_core::enums::*;
use barrage_core::events::SoundCue;
use barrage_core::geometry::{Aabb, Segment};
use barrage_core::types::{Hitbox, PlayerId, Position};

use crate::context::SimContext;
use crate::pool::Pool;
use crate::score::{Feedback, ScoreState};
use crate::world_setup;

/// Entity of player `id`, if it exists.
pub fn find_player(world: &World, id: PlayerId) -> Option<Entity> {
    world
        .query::<&PlayerShip>()
        .iter()
        .find(|(_, ship)| ship.id == id)
        .map(|(entity, _)| entity)
}

/// Beam damage for a charge held `held_ms`, scaling from the minimum to
/// the full charge time.
pub fn beam_damage(held_ms: u64) -> u32 {
    let span = CHARGE_FULL_MS.saturating_sub(CHARGE_MIN_MS).max(1) as f32;
    let t = (held_ms.saturating_sub(CHARGE_MIN_MS) as f32 / span).clamp(0.0, 1.0);
    BEAM_MIN_DAMAGE + ((BEAM_MAX_DAMAGE - BEAM_MIN_DAMAGE) as f32 * t).round() as u32
}

fn clamp_to_field(pos: &mut Position, hitbox: &Hitbox, field: &Aabb) {
    let mut rect = pos.rect(hitbox);
    rect.clamp_within(field);
    pos.x = rect.x;
    pos.y = rect.y;
}

fn muzzle(pos: &Position, hitbox: &Hitbox) -> Vec2 {
    Vec2::new(pos.x + hitbox.w * 0.5, pos.y)
}

/// Apply one queued command.
pub fn apply_command(
    world: &mut World,
    command: &PlayerCommand,
    ctx: &mut SimContext,
    bullet_pool: &mut Pool<Bullet>,
    score: &mut ScoreState,
    feedback: &mut Feedback,
) {
    let Some(player) = command.player() else {
        return;
    };
    let Some(entity) = find_player(world, player) else {
        tracing::debug!(%player, "command for unknown player ignored");
        return;
    };

    match *command {
        PlayerCommand::Move { direction, .. } => move_ship(world, entity, direction, &ctx.field),
        PlayerCommand::Fire { .. } => fire(world, entity, ctx.now_ms, bullet_pool, score, feedback),
        PlayerCommand::Teleport { direction, .. } => {
            teleport(world, entity, direction, ctx, feedback)
        }
        PlayerCommand::StartCharge { .. } => start_charge(world, entity, ctx.now_ms),
        PlayerCommand::StopCharge { .. } => stop_charge(world, entity, ctx, feedback),
        PlayerCommand::UseSkill { skill, .. } => {
            use_skill(world, entity, skill, ctx, bullet_pool, feedback)
        }
        PlayerCommand::Pause | PlayerCommand::Resume => {}
    }
}

fn move_ship(world: &mut World, entity: Entity, direction: Direction, field: &Aabb) {
    let Ok((ship, pos, hitbox)) =
        world.query_one_mut::<(&PlayerShip, &mut Position, &Hitbox)>(entity)
    else {
        return;
    };
    if !ship.is_alive() || ship.controls_locked {
        return;
    }
    pos.translate(direction.unit() * PLAYER_SPEED);
    clamp_to_field(pos, hitbox, field);
}

fn fire(
    world: &mut World,
    entity: Entity,
    now_ms: u64,
    bullet_pool: &mut Pool<Bullet>,
    score: &mut ScoreState,
    feedback: &mut Feedback,
) {
    let (id, main_muzzle, penetration) = {
        let Ok((ship, pos, hitbox)) =
            world.query_one_mut::<(&mut PlayerShip, &Position, &Hitbox)>(entity)
        else {
            return;
        };
        if !ship.is_alive() || ship.controls_locked || !ship.fire.is_finished(now_ms) {
            return;
        }
        ship.fire.reset(now_ms);
        (ship.id, muzzle(pos, hitbox), ship.penetration)
    };

    // Sub-ships fire alongside their owner.
    let mut muzzles = vec![main_muzzle];
    muzzles.extend(
        world
            .query::<(&SubShip, &Position, &Hitbox)>()
            .iter()
            .filter(|(_, (sub, _, _))| sub.owner == id && !sub.removed)
            .map(|(_, (_, pos, hitbox))| muzzle(pos, hitbox)),
    );

    for m in muzzles {
        world_setup::spawn_player_bullet(world, bullet_pool, id, m, penetration);
        score.bullets_shot += 1;
    }
    feedback.play(SoundCue::ShotFired);
}

fn teleport(
    world: &mut World,
    entity: Entity,
    direction: Direction,
    ctx: &SimContext,
    feedback: &mut Feedback,
) {
    let Ok((ship, pos, hitbox)) =
        world.query_one_mut::<(&mut PlayerShip, &mut Position, &Hitbox)>(entity)
    else {
        return;
    };
    if !ship.is_alive() || ship.controls_locked || !ship.teleport.is_finished(ctx.now_ms) {
        return;
    }
    ship.teleport.reset(ctx.now_ms);
    pos.translate(direction.unit() * TELEPORT_DISTANCE);
    clamp_to_field(pos, hitbox, &ctx.field);
    feedback.play(SoundCue::Teleport);
}

fn start_charge(world: &mut World, entity: Entity, now_ms: u64) {
    let Ok(ship) = world.query_one_mut::<&mut PlayerShip>(entity) else {
        return;
    };
    if !ship.is_alive() || ship.charge.charging {
        return;
    }
    ship.charge = ChargeState {
        charging: true,
        started_ms: now_ms,
    };
    ship.controls_locked = true;
}

fn stop_charge(world: &mut World, entity: Entity, ctx: &SimContext, feedback: &mut Feedback) {
    let (owner, origin, held_ms) = {
        let Ok((ship, pos, hitbox)) =
            world.query_one_mut::<(&mut PlayerShip, &Position, &Hitbox)>(entity)
        else {
            return;
        };
        if !ship.charge.charging {
            return;
        }
        let held_ms = ctx.now_ms.saturating_sub(ship.charge.started_ms);
        ship.cancel_charge();
        (ship.id, muzzle(pos, hitbox), held_ms)
    };
    if held_ms < CHARGE_MIN_MS {
        return;
    }
    let segment = Segment::new(origin, Vec2::new(origin.x, ctx.field.top()));
    world_setup::spawn_beam(world, owner, segment, beam_damage(held_ms), ctx.now_ms);
    feedback.play(SoundCue::BeamFired);
}

fn use_skill(
    world: &mut World,
    entity: Entity,
    skill: SkillKind,
    ctx: &mut SimContext,
    bullet_pool: &mut Pool<Bullet>,
    feedback: &mut Feedback,
) {
    let now = ctx.now_ms;
    let Ok((id, alive)) = world
        .query_one_mut::<&PlayerShip>(entity)
        .map(|s| (s.id, s.is_alive()))
    else {
        return;
    };
    if !alive {
        return;
    }

    if skill == SkillKind::Bomb {
        // A bomb already in flight is detonated instead of launching another.
        let in_flight = world
            .query_mut::<&mut Bullet>()
            .into_iter()
            .find(|(_, b)| {
                b.kind == BulletKind::Bomb && b.owner == Some(id) && b.is_active() && !b.detonate
            });
        if let Some((_, bomb)) = in_flight {
            bomb.detonate = true;
            return;
        }
    }

    let launch = {
        let Ok((ship, pos, hitbox)) =
            world.query_one_mut::<(&mut PlayerShip, &Position, &Hitbox)>(entity)
        else {
            return;
        };
        if !ship.is_alive() || !ship.skills.get(skill).is_ready(now) {
            return;
        }
        let slot = ship.skills.get_mut(skill);
        slot.cooldown.reset(now);
        slot.effect.reset(now);
        if let Some(charges) = slot.charges.as_mut() {
            *charges -= 1;
        }
        match skill {
            SkillKind::Bomb => Some(muzzle(pos, hitbox)),
            SkillKind::TimeStop => {
                ctx.time_stop.start(TIME_STOP_MS, now);
                None
            }
            SkillKind::Shield => {
                ship.invincible.start(SHIELD_MS, now);
                None
            }
        }
    };
    tracing::debug!(player = %id, ?skill, "skill used");

    if let Some(m) = launch {
        world_setup::spawn_bomb(world, bullet_pool, id, m, now);
        feedback.play(SoundCue::ShotFired);
    }
}

/// Keep sub-ships attached to their owners; a dead owner loses its drones.
pub fn run(world: &mut World) {
    let owners: Vec<(PlayerId, Position, bool)> = world
        .query::<(&PlayerShip, &Position)>()
        .iter()
        .map(|(_, (ship, pos))| (ship.id, *pos, ship.is_alive()))
        .collect();

    for (_, (sub, pos)) in world.query_mut::<(&mut SubShip, &mut Position)>() {
        match owners.iter().find(|(id, _, _)| *id == sub.owner) {
            Some((_, owner_pos, true)) => *pos = Position::from(owner_pos.vec() + sub.offset),
            _ => sub.removed = true,
        }
    }
}

/// Number of live drones owned by `owner`.
pub fn sub_ship_count(world: &World, owner: PlayerId) -> usize {
    world
        .query::<&SubShip>()
        .iter()
        .filter(|(_, sub)| sub.owner == owner && !sub.removed)
        .count()
}
