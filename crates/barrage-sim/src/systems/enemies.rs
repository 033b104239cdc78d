//! Formation and boss updates.
//!
//! Formations and bosses are aggregates owned by the engine rather than ECS
//! entities. Their spawn requests are turned into entities here. Nothing
//! advances while time is stopped.

use glam::Vec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::{Bullet, PlayerShip};
use barrage_core::constants::MAX_LIVE_MOBS;
use barrage_core::enums::EnemyKind;
use barrage_core::events::SoundCue;
use barrage_core::geometry::Aabb;
use barrage_core::types::{Hitbox, Position};

use barrage_ai::boss::{Boss, PatternContext, TargetInfo};
use barrage_ai::formation::Formation;
use barrage_ai::output::PatternOutput;

use crate::context::SimContext;
use crate::pool::Pool;
use crate::score::Feedback;
use crate::systems::collision::{Contact, HitCause};
use crate::systems::players::find_player;
use crate::world_setup;

/// Live players as pattern targets, ordered by id.
pub fn live_targets(world: &World) -> Vec<TargetInfo> {
    let mut targets: Vec<TargetInfo> = world
        .query::<(&PlayerShip, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (ship, _, _))| ship.is_alive())
        .map(|(_, (ship, pos, hitbox))| TargetInfo {
            id: ship.id,
            bounds: pos.rect(hitbox),
        })
        .collect();
    targets.sort_by_key(|t| t.id);
    targets
}

/// Child mobs currently alive in any formation.
pub fn live_mobs(formations: &[Formation]) -> usize {
    formations
        .iter()
        .flat_map(|f| f.ships())
        .filter(|s| s.kind == EnemyKind::Mob)
        .count()
}

/// Add a looping formation of `count` mobs at `origin` unless it would
/// push the live total past `MAX_LIVE_MOBS`. Returns whether it was added.
pub fn release_mobs(
    formations: &mut Vec<Formation>,
    origin: Vec2,
    count: u32,
    next_unit_id: &mut u32,
    next_formation_id: &mut u32,
    field: &Aabb,
) -> bool {
    let live = live_mobs(formations);
    if live + count as usize > MAX_LIVE_MOBS {
        tracing::debug!(live, count, "mob wave dropped at cap");
        return false;
    }
    let id = *next_formation_id;
    *next_formation_id += 1;
    formations.push(Formation::mobs(id, origin, count, next_unit_id, field));
    tracing::debug!(formation = id, count, "boss released mobs");
    true
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    formations: &mut Vec<Formation>,
    bosses: &mut [Boss],
    ctx: &SimContext,
    rng: &mut ChaCha8Rng,
    bullet_pool: &mut Pool<Bullet>,
    next_unit_id: &mut u32,
    next_formation_id: &mut u32,
    contacts: &mut Vec<Contact>,
    feedback: &mut Feedback,
) {
    if ctx.is_time_stopped() {
        return;
    }

    let mut shots = Vec::new();
    for formation in formations.iter_mut() {
        formation.update(ctx.now_ms, &ctx.field, rng, &mut shots);
    }
    for spec in &shots {
        world_setup::spawn_hostile_bullet(world, bullet_pool, spec, ctx.now_ms);
    }

    let targets = live_targets(world);
    let mut outputs = Vec::new();
    for boss in bosses.iter_mut() {
        let mut pattern_ctx = PatternContext {
            now_ms: ctx.now_ms,
            field: ctx.field,
            targets: &targets,
            rng: &mut *rng,
        };
        boss.update(&mut pattern_ctx);
        outputs.extend(boss.drain_produced());
    }

    for output in outputs {
        match output {
            PatternOutput::Bullet(spec) => {
                world_setup::spawn_hostile_bullet(world, bullet_pool, &spec, ctx.now_ms);
            }
            PatternOutput::Laser(spec) => {
                world_setup::spawn_laser(world, &spec, ctx.now_ms);
                feedback.play(SoundCue::LaserCharge);
            }
            PatternOutput::BlackHole(spec) => {
                world_setup::spawn_black_hole(world, &spec, ctx.now_ms);
            }
            PatternOutput::SpawnMobs { origin, count } => {
                release_mobs(formations, origin, count, next_unit_id, next_formation_id, &ctx.field);
            }
            PatternOutput::AreaDamage { target } => {
                if let Some(player) = find_player(world, target) {
                    contacts.push(Contact::PlayerHit {
                        player,
                        cause: HitCause::Area,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::constants::*;
    use barrage_core::enums::MovementKind;

    #[test]
    fn test_mob_wave_becomes_vertical_loop() {
        let field = Aabb::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT);
        let mut formations = Vec::new();
        let (mut unit_id, mut formation_id) = (1, 1);
        assert!(release_mobs(
            &mut formations,
            Vec2::new(400.0, 120.0),
            MOB_COUNT,
            &mut unit_id,
            &mut formation_id,
            &field,
        ));
        assert_eq!(formations.len(), 1);
        let formation = &formations[0];
        assert_eq!(formation.ship_count(), MOB_COUNT as usize);
        assert!(formation.ships().all(|s| s.kind == EnemyKind::Mob));
        assert_eq!(formation.subgroups().len(), 1);
        assert_eq!(formation.subgroups()[0].strategy.kind(), MovementKind::VerticalLoop);
        assert_eq!(formation_id, 2);
        assert_eq!(unit_id, 1 + MOB_COUNT);
    }

    #[test]
    fn test_mob_waves_stop_at_cap() {
        let field = Aabb::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT);
        let mut formations = Vec::new();
        let (mut unit_id, mut formation_id) = (1, 1);
        let origin = Vec2::new(400.0, 120.0);
        let mut added = 0;
        for _ in 0..20 {
            if release_mobs(&mut formations, origin, MOB_COUNT, &mut unit_id, &mut formation_id, &field) {
                added += 1;
            }
        }
        assert_eq!(added, MAX_LIVE_MOBS / MOB_COUNT as usize);
        assert!(live_mobs(&formations) <= MAX_LIVE_MOBS);

        // Losing a whole wave frees room for the next one.
        let ids: Vec<u32> = formations[0].ships().map(|s| s.id).collect();
        for id in ids {
            formations[0].destroy_member(id, 0);
        }
        assert!(release_mobs(&mut formations, origin, MOB_COUNT, &mut unit_id, &mut formation_id, &field));
        assert_eq!(live_mobs(&formations), MAX_LIVE_MOBS);
    }
}
