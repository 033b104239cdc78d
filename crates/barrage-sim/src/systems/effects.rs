//! Effect resolution.
//!
//! Applies the contacts found by collision detection in order: damage,
//! destruction with score and coin credit, item drops, pickups, life loss
//! and invincibility. A unit destroyed earlier in the tick is skipped by
//! every later contact, and a bullet only spends penetration on hits that
//! actually land.

use glam::Vec2;
use hecs::{Entity, World};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::*;
use barrage_core::config::{DropChance, LevelConfig};
use barrage_core::constants::*;
use barrage_core::enums::{ItemKind, SkillKind};
use barrage_core::events::{SoundCue, ACHIEVEMENT_BOSS_DOWN, ACHIEVEMENT_FIRST_KILL};
use barrage_core::types::{PlayerId, Position};

use barrage_ai::boss::Boss;
use barrage_ai::formation::{Formation, MemberHit};

use crate::context::SimContext;
use crate::pool::Pool;
use crate::score::{Feedback, ScoreState};
use crate::systems::collision::{Contact, HitCause, HostileUnit, StrikeSource};
use crate::systems::players::sub_ship_count;
use crate::world_setup;

/// Roll an enemy's drop table. Whatever probability the entries leave
/// unclaimed means "no drop".
pub fn roll_drop<R: Rng + ?Sized>(chances: &[DropChance], rng: &mut R) -> Option<ItemKind> {
    if chances.is_empty() {
        return None;
    }
    let mut weights: Vec<f64> = chances
        .iter()
        .map(|c| c.probability.clamp(0.0, 1.0))
        .collect();
    let claimed: f64 = weights.iter().sum();
    weights.push((1.0 - claimed).max(0.0));
    let dist = WeightedIndex::new(&weights).ok()?;
    chances.get(dist.sample(rng)).map(|c| c.item)
}

/// Spend the source's hit on `unit`. Returns the credited owner and damage,
/// or `None` if the source can no longer hit it.
fn claim_strike(world: &World, source: StrikeSource, unit: u32) -> Option<(Option<PlayerId>, u32)> {
    match source {
        StrikeSource::Bullet(entity) => {
            let mut bullet = world.get::<&mut Bullet>(entity).ok()?;
            if !bullet.is_active() || !bullet.register_hit(unit) {
                return None;
            }
            Some((bullet.owner, bullet.damage))
        }
        StrikeSource::Beam(entity) => {
            let mut beam = world.get::<&mut Beam>(entity).ok()?;
            if beam.hit_units.contains(&unit) {
                return None;
            }
            beam.hit_units.push(unit);
            Some((Some(beam.owner), beam.damage))
        }
        StrikeSource::Blast { owner, damage } => Some((owner, damage)),
    }
}

/// Take one life unless the ship is dead or invincible.
fn damage_player(world: &World, entity: Entity, now_ms: u64, feedback: &mut Feedback) {
    let Ok(mut ship) = world.get::<&mut PlayerShip>(entity) else {
        return;
    };
    if !ship.is_alive() || ship.is_invincible(now_ms) {
        return;
    }
    ship.lives -= 1;
    ship.cancel_charge();
    ship.invincible.start(INVINCIBILITY_MS, now_ms);
    feedback.play(SoundCue::PlayerHit);
    tracing::info!(player = %ship.id, lives = ship.lives, "player hit");
}

fn apply_pickup(
    world: &World,
    entity: Entity,
    kind: ItemKind,
    score: &mut ScoreState,
    new_subs: &mut Vec<(PlayerId, Position)>,
) {
    let Ok(mut query) = world.query_one::<(&mut PlayerShip, &Position)>(entity) else {
        return;
    };
    let Some((ship, pos)) = query.get() else {
        return;
    };
    match kind {
        ItemKind::Coin => score.coins += ITEM_COIN_VALUE,
        ItemKind::ExtraLife => ship.lives = (ship.lives + 1).min(PLAYER_MAX_LIVES),
        ItemKind::PowerUp => ship.penetration = (ship.penetration + 1).min(PLAYER_MAX_PENETRATION),
        ItemKind::BombRefill => {
            let slot = ship.skills.get_mut(SkillKind::Bomb);
            slot.charges = Some(slot.charges.map_or(1, |c| (c + 1).min(BOMB_MAX_CHARGES)));
        }
        ItemKind::SubShip => {
            let pending = new_subs.iter().filter(|(id, _)| *id == ship.id).count();
            if sub_ship_count(world, ship.id) + pending < MAX_SUB_SHIPS {
                new_subs.push((ship.id, *pos));
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    contacts: &mut Vec<Contact>,
    formations: &mut [Formation],
    bosses: &mut [Boss],
    ctx: &SimContext,
    level: &LevelConfig,
    rng: &mut ChaCha8Rng,
    item_pool: &mut Pool<DropItem>,
    score: &mut ScoreState,
    feedback: &mut Feedback,
) {
    let now = ctx.now_ms;
    let mut destroyed: Vec<u32> = Vec::new();
    let mut drops: Vec<(ItemKind, Vec2)> = Vec::new();
    let mut blasts: Vec<Vec2> = Vec::new();
    let mut new_subs: Vec<(PlayerId, Position)> = Vec::new();

    for contact in contacts.drain(..) {
        match contact {
            Contact::Strike { source, target } => {
                let unit = target.unit();
                if destroyed.contains(&unit) {
                    continue;
                }
                let Some((owner, damage)) = claim_strike(world, source, unit) else {
                    continue;
                };
                match target {
                    HostileUnit::Enemy { formation, .. } => {
                        let Some(formation) = formations.iter_mut().find(|f| f.id == formation)
                        else {
                            continue;
                        };
                        match formation.damage_member(unit, damage, now) {
                            MemberHit::Destroyed(ship) => {
                                destroyed.push(unit);
                                score.credit_kill(owner, ship.points());
                                feedback.play(SoundCue::Explosion);
                                if score.ships_destroyed == 1 {
                                    feedback.unlock(ACHIEVEMENT_FIRST_KILL);
                                }
                                let table = level.drop_table.get(&ship.kind);
                                if let Some(item) = table.and_then(|t| roll_drop(t, rng)) {
                                    drops.push((item, ship.bounds.center()));
                                }
                            }
                            MemberHit::Damaged => feedback.play(SoundCue::Hit),
                            MemberHit::Missed => {}
                        }
                    }
                    HostileUnit::Boss { .. } => {
                        let Some(boss) = bosses.iter_mut().find(|b| b.id == unit) else {
                            continue;
                        };
                        let phase_before = boss.phase();
                        if boss.apply_damage(damage) {
                            destroyed.push(unit);
                            score.credit_kill(owner, boss.points);
                            feedback.play(SoundCue::BossDefeated {
                                archetype: boss.archetype,
                            });
                            feedback.unlock(ACHIEVEMENT_BOSS_DOWN);
                            tracing::info!(archetype = ?boss.archetype, "boss defeated");
                        } else {
                            feedback.play(SoundCue::Hit);
                            let phase = boss.phase();
                            if phase > phase_before {
                                feedback.popup(format!("Boss phase {}", phase + 1), now);
                            }
                        }
                    }
                }
            }
            Contact::PlayerHit { player, cause } => {
                let Ok(id) = world.get::<&PlayerShip>(player).map(|s| s.id) else {
                    continue;
                };
                match cause {
                    HitCause::Bullet(entity) => {
                        let Ok(mut bullet) = world.get::<&mut Bullet>(entity) else {
                            continue;
                        };
                        if !bullet.is_active() {
                            continue;
                        }
                        bullet.removed = true;
                    }
                    HitCause::Laser(entity) => {
                        let Ok(mut laser) = world.get::<&mut Laser>(entity) else {
                            continue;
                        };
                        if laser.hit_players.contains(&id) {
                            continue;
                        }
                        laser.hit_players.push(id);
                    }
                    HitCause::Body | HitCause::Area => {}
                }
                damage_player(world, player, now, feedback);
            }
            Contact::SubShipHit { sub, bullet } => {
                let Ok(mut bullet) = world.get::<&mut Bullet>(bullet) else {
                    continue;
                };
                let Ok(mut sub) = world.get::<&mut SubShip>(sub) else {
                    continue;
                };
                if !bullet.is_active() || sub.removed {
                    continue;
                }
                bullet.removed = true;
                sub.removed = true;
                feedback.play(SoundCue::Explosion);
            }
            Contact::Pickup { item, player } => {
                let kind = {
                    let Ok(mut pickup) = world.get::<&mut DropItem>(item) else {
                        continue;
                    };
                    if pickup.removed {
                        continue;
                    }
                    pickup.removed = true;
                    pickup.kind
                };
                apply_pickup(world, player, kind, score, &mut new_subs);
                feedback.play(SoundCue::Pickup { item: kind });
            }
            Contact::Detonation { bomb, center } => {
                if let Ok(mut bullet) = world.get::<&mut Bullet>(bomb) {
                    bullet.removed = true;
                }
                blasts.push(center);
                feedback.play(SoundCue::Explosion);
            }
        }
    }

    for (kind, center) in drops {
        world_setup::spawn_item(world, item_pool, kind, center);
    }
    for center in blasts {
        world_setup::spawn_explosion(world, center, BOMB_RADIUS, now);
    }
    for (owner, pos) in new_subs {
        let index = sub_ship_count(world, owner);
        world_setup::spawn_sub_ship(world, owner, pos, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_roll_drop_certain_and_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let certain = [DropChance {
            item: ItemKind::Coin,
            probability: 1.0,
        }];
        for _ in 0..50 {
            assert_eq!(roll_drop(&certain, &mut rng), Some(ItemKind::Coin));
        }
        assert_eq!(roll_drop(&[], &mut rng), None);
        let never = [DropChance {
            item: ItemKind::PowerUp,
            probability: 0.0,
        }];
        for _ in 0..50 {
            assert_eq!(roll_drop(&never, &mut rng), None);
        }
    }

    #[test]
    fn test_roll_drop_mixes_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let half = [DropChance {
            item: ItemKind::ExtraLife,
            probability: 0.5,
        }];
        let hits = (0..1_000).filter(|_| roll_drop(&half, &mut rng).is_some()).count();
        assert!((400..600).contains(&hits), "got {hits} drops out of 1000");
    }
}
