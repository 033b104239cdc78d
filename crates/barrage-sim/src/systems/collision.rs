//! Collision detection.
//!
//! Read-only: flattens every active body into one list, tests all pairs with
//! the strict AABB check, then runs separate passes for laser and beam
//! segments and for detonating bombs (radius check). Bombs never take part
//! in the pairwise pass. Detected contacts are resolved later by the effects
//! system.

use glam::Vec2;
use hecs::{Entity, World};

use barrage_core::components::*;
use barrage_core::constants::*;
use barrage_core::enums::{BulletKind, Faction, LaserState};
use barrage_core::geometry::{aabb_overlap, segment_intersects_rect, within_radius, Aabb};
use barrage_core::types::{Hitbox, PlayerId, Position};

use barrage_ai::boss::Boss;
use barrage_ai::formation::Formation;

use crate::context::SimContext;

/// An enemy-side unit that player weapons can damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostileUnit {
    Enemy { formation: u32, unit: u32 },
    Boss { unit: u32 },
}

impl HostileUnit {
    pub fn unit(&self) -> u32 {
        match *self {
            HostileUnit::Enemy { unit, .. } | HostileUnit::Boss { unit } => unit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeSource {
    Bullet(Entity),
    Beam(Entity),
    Blast { owner: Option<PlayerId>, damage: u32 },
}

/// What hurt a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCause {
    Bullet(Entity),
    Laser(Entity),
    /// Touched an enemy or boss.
    Body,
    /// Area-denial sweep.
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Strike {
        source: StrikeSource,
        target: HostileUnit,
    },
    PlayerHit {
        player: Entity,
        cause: HitCause,
    },
    SubShipHit {
        sub: Entity,
        bullet: Entity,
    },
    Pickup {
        item: Entity,
        player: Entity,
    },
    Detonation {
        bomb: Entity,
        center: Vec2,
    },
}

#[derive(Debug, Clone, Copy)]
enum BodyKind {
    Player(Entity),
    SubShip(Entity),
    Hostile(HostileUnit),
    Bullet { entity: Entity, faction: Faction },
    Item(Entity),
}

#[derive(Debug, Clone, Copy)]
struct Body {
    rect: Aabb,
    kind: BodyKind,
}

fn grown(rect: &Aabb, by: f32) -> Aabb {
    Aabb::new(rect.x - by, rect.y - by, rect.w + by * 2.0, rect.h + by * 2.0)
}

fn collect_bodies(
    world: &World,
    formations: &[Formation],
    bosses: &[Boss],
    field: &Aabb,
) -> Vec<Body> {
    let mut bodies = Vec::new();

    for (entity, (ship, pos, hitbox)) in world.query::<(&PlayerShip, &Position, &Hitbox)>().iter() {
        if ship.is_alive() {
            bodies.push(Body {
                rect: pos.rect(hitbox),
                kind: BodyKind::Player(entity),
            });
        }
    }
    for (entity, (sub, pos, hitbox)) in world.query::<(&SubShip, &Position, &Hitbox)>().iter() {
        if !sub.removed {
            bodies.push(Body {
                rect: pos.rect(hitbox),
                kind: BodyKind::SubShip(entity),
            });
        }
    }
    for formation in formations {
        // Members parked off-screen cannot be hit.
        for ship in formation.ships().filter(|s| aabb_overlap(&s.bounds, field)) {
            bodies.push(Body {
                rect: ship.bounds,
                kind: BodyKind::Hostile(HostileUnit::Enemy {
                    formation: formation.id,
                    unit: ship.id,
                }),
            });
        }
    }
    for boss in bosses.iter().filter(|b| !b.is_defeated()) {
        bodies.push(Body {
            rect: boss.body,
            kind: BodyKind::Hostile(HostileUnit::Boss { unit: boss.id }),
        });
    }
    for (entity, (bullet, pos, hitbox)) in world.query::<(&Bullet, &Position, &Hitbox)>().iter() {
        if bullet.is_active() && bullet.kind != BulletKind::Bomb {
            bodies.push(Body {
                rect: pos.rect(hitbox),
                kind: BodyKind::Bullet {
                    entity,
                    faction: bullet.faction,
                },
            });
        }
    }
    for (entity, (item, pos, hitbox)) in world.query::<(&DropItem, &Position, &Hitbox)>().iter() {
        if !item.removed {
            bodies.push(Body {
                rect: pos.rect(hitbox),
                kind: BodyKind::Item(entity),
            });
        }
    }

    bodies
}

/// Contact for an overlapping ordered pair, if the pair interacts.
fn classify(a: BodyKind, b: BodyKind) -> Option<Contact> {
    match (a, b) {
        (
            BodyKind::Bullet {
                entity,
                faction: Faction::Player,
            },
            BodyKind::Hostile(target),
        ) => Some(Contact::Strike {
            source: StrikeSource::Bullet(entity),
            target,
        }),
        (
            BodyKind::Bullet {
                entity,
                faction: Faction::Enemy,
            },
            BodyKind::Player(player),
        ) => Some(Contact::PlayerHit {
            player,
            cause: HitCause::Bullet(entity),
        }),
        (
            BodyKind::Bullet {
                entity,
                faction: Faction::Enemy,
            },
            BodyKind::SubShip(sub),
        ) => Some(Contact::SubShipHit {
            sub,
            bullet: entity,
        }),
        (BodyKind::Hostile(_), BodyKind::Player(player)) => Some(Contact::PlayerHit {
            player,
            cause: HitCause::Body,
        }),
        (BodyKind::Item(item), BodyKind::Player(player)) => Some(Contact::Pickup { item, player }),
        _ => None,
    }
}

/// Detect this tick's contacts and append them to `contacts`.
pub fn run(
    world: &World,
    formations: &[Formation],
    bosses: &[Boss],
    ctx: &SimContext,
    contacts: &mut Vec<Contact>,
) {
    let bodies = collect_bodies(world, formations, bosses, &ctx.field);

    // Pairwise AABB pass.
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if !aabb_overlap(&a.rect, &b.rect) {
                continue;
            }
            if let Some(contact) = classify(a.kind, b.kind).or_else(|| classify(b.kind, a.kind)) {
                contacts.push(contact);
            }
        }
    }

    let players: Vec<(Entity, PlayerId, Aabb)> = world
        .query::<(&PlayerShip, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (ship, _, _))| ship.is_alive())
        .map(|(entity, (ship, pos, hitbox))| (entity, ship.id, pos.rect(hitbox)))
        .collect();
    let hostiles = || {
        bodies.iter().filter_map(|body| match body.kind {
            BodyKind::Hostile(unit) => Some((unit, body.rect)),
            _ => None,
        })
    };

    // Boss lasers against players.
    for (entity, laser) in world.query::<&Laser>().iter() {
        if laser.state != LaserState::Firing {
            continue;
        }
        for (player, id, rect) in &players {
            if !laser.hit_players.contains(id)
                && segment_intersects_rect(&laser.segment, &grown(rect, LASER_WIDTH * 0.5))
            {
                contacts.push(Contact::PlayerHit {
                    player: *player,
                    cause: HitCause::Laser(entity),
                });
            }
        }
    }

    // Charge beams against enemies and bosses.
    for (entity, beam) in world.query::<&Beam>().iter() {
        if beam.visible.is_finished(ctx.now_ms) {
            continue;
        }
        for (target, rect) in hostiles() {
            if !beam.hit_units.contains(&target.unit())
                && segment_intersects_rect(&beam.segment, &grown(&rect, BEAM_WIDTH * 0.5))
            {
                contacts.push(Contact::Strike {
                    source: StrikeSource::Beam(entity),
                    target,
                });
            }
        }
    }

    // Detonating bombs: radius check instead of pairwise collision.
    for (entity, (bullet, pos, hitbox)) in world.query::<(&Bullet, &Position, &Hitbox)>().iter() {
        if bullet.kind != BulletKind::Bomb || !bullet.detonate || !bullet.is_active() {
            continue;
        }
        let center = pos.rect(hitbox).center();
        contacts.push(Contact::Detonation {
            bomb: entity,
            center,
        });
        for (target, rect) in hostiles() {
            if within_radius(center, rect.center(), BOMB_RADIUS) {
                contacts.push(Contact::Strike {
                    source: StrikeSource::Blast {
                        owner: bullet.owner,
                        damage: bullet.damage,
                    },
                    target,
                });
            }
        }
    }
}
