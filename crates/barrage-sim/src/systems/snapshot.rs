//! Snapshot system: builds the render-facing `GameStateSnapshot`.
//!
//! This system is read-only. Its output depends only on simulation state, so
//! two engines fed the same seed and commands produce identical snapshots.

use glam::Vec2;
use hecs::World;

use barrage_core::components::*;
use barrage_core::constants::*;
use barrage_core::enums::*;
use barrage_core::events::SoundCue;
use barrage_core::state::*;
use barrage_core::types::{Hitbox, Position, SimTime, Velocity};

use barrage_ai::boss::Boss;
use barrage_ai::formation::Formation;

use crate::score::{Popup, ScoreState};

const PLAYER_COLORS: [u32; 2] = [0x4fc3f7, 0xffb74d];
const SUB_SHIP_COLOR: u32 = 0x81d4fa;
const PLAYER_BULLET_COLOR: u32 = 0xffffff;
const ENEMY_BULLET_COLOR: u32 = 0xff5252;
const MISSILE_COLOR: u32 = 0xff9100;
const BOMB_COLOR: u32 = 0xffeb3b;
const LASER_COLOR: u32 = 0xe040fb;
const BEAM_COLOR: u32 = 0x18ffff;
const BLACK_HOLE_COLOR: u32 = 0x311b92;
const EXPLOSION_COLOR: u32 = 0xff6d00;

fn enemy_color(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Grunt => 0x66bb6a,
        EnemyKind::Striker => 0xef5350,
        EnemyKind::Elite => 0xab47bc,
        EnemyKind::Mob => 0x8d6e63,
    }
}

fn item_color(kind: ItemKind) -> u32 {
    match kind {
        ItemKind::Coin => 0xffd600,
        ItemKind::ExtraLife => 0xf06292,
        ItemKind::PowerUp => 0x00e676,
        ItemKind::SubShip => 0x40c4ff,
        ItemKind::BombRefill => 0xffab40,
    }
}

/// Everything the snapshot needs besides the ECS world.
pub struct SnapshotInput<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub stage: Stage,
    pub level_name: &'a str,
    pub formations: &'a [Formation],
    pub bosses: &'a [Boss],
    pub score: &'a ScoreState,
    pub popups: &'a [Popup],
    pub audio_events: Vec<SoundCue>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(world: &World, input: SnapshotInput<'_>) -> GameStateSnapshot {
    let now = input.time.now_ms();
    let live_boss = input.bosses.iter().find(|b| !b.is_defeated());

    GameStateSnapshot {
        time: input.time,
        phase: input.phase,
        stage: input.stage,
        drawables: build_drawables(world, input.formations, input.bosses, now),
        hud: HudView {
            level_name: input.level_name.to_string(),
            players: build_player_huds(world, input.score, now),
            coins: input.score.coins,
            elapsed_secs: input.time.elapsed_secs(),
            boss_health: live_boss.map(|b| b.health_ratio()),
        },
        popups: input
            .popups
            .iter()
            .map(|p| PopupView {
                text: p.text.clone(),
                visibility: p.life.remaining_ratio(now),
            })
            .collect(),
        hints: input.bosses.iter().flat_map(|b| b.hints(now)).collect(),
        audio_events: input.audio_events,
    }
}

fn rect_drawable(kind: DrawKind, pos: &Position, hitbox: &Hitbox, color: u32) -> Drawable {
    Drawable {
        kind,
        x: pos.x,
        y: pos.y,
        w: hitbox.w,
        h: hitbox.h,
        rotation: 0.0,
        color,
    }
}

/// A beam-like drawable anchored at `from`, `width` thick, rotated along the segment.
fn segment_drawable(kind: DrawKind, from: Vec2, length: f32, width: f32, angle: f32, color: u32) -> Drawable {
    Drawable {
        kind,
        x: from.x,
        y: from.y,
        w: length,
        h: width,
        rotation: angle,
        color,
    }
}

fn build_drawables(world: &World, formations: &[Formation], bosses: &[Boss], now_ms: u64) -> Vec<Drawable> {
    let mut drawables = Vec::new();

    let mut players: Vec<(u8, Drawable)> = world
        .query::<(&PlayerShip, &Position, &Hitbox)>()
        .iter()
        .filter(|(_, (ship, _, _))| ship.is_alive())
        .map(|(_, (ship, pos, hitbox))| {
            let color = PLAYER_COLORS[ship.id.slot() % PLAYER_COLORS.len()];
            let kind = DrawKind::Player { player: ship.id.0 };
            (ship.id.0, rect_drawable(kind, pos, hitbox, color))
        })
        .collect();
    players.sort_by_key(|(id, _)| *id);
    drawables.extend(players.into_iter().map(|(_, d)| d));

    for (_, (sub, pos, hitbox)) in world.query::<(&SubShip, &Position, &Hitbox)>().iter() {
        if !sub.removed {
            drawables.push(rect_drawable(DrawKind::SubShip, pos, hitbox, SUB_SHIP_COLOR));
        }
    }

    for ship in formations.iter().flat_map(|f| f.ships()) {
        let b = ship.bounds;
        drawables.push(Drawable {
            kind: DrawKind::Enemy { kind: ship.kind },
            x: b.x,
            y: b.y,
            w: b.w,
            h: b.h,
            rotation: 0.0,
            color: enemy_color(ship.kind),
        });
    }

    for boss in bosses.iter().filter(|b| !b.is_defeated()) {
        let b = boss.body;
        drawables.push(Drawable {
            kind: DrawKind::Boss {
                archetype: boss.archetype,
            },
            x: b.x,
            y: b.y,
            w: b.w,
            h: b.h,
            rotation: 0.0,
            color: boss.profile().color,
        });
    }

    for (_, (bullet, pos, vel, hitbox)) in world
        .query::<(&Bullet, &Position, &Velocity, &Hitbox)>()
        .iter()
    {
        if !bullet.is_active() {
            continue;
        }
        let color = match (bullet.kind, bullet.faction) {
            (BulletKind::Bomb, _) => BOMB_COLOR,
            (BulletKind::Guided, _) => MISSILE_COLOR,
            (BulletKind::Standard, Faction::Player) => PLAYER_BULLET_COLOR,
            (BulletKind::Standard, Faction::Enemy) => ENEMY_BULLET_COLOR,
        };
        let mut d = rect_drawable(
            DrawKind::Bullet {
                kind: bullet.kind,
                faction: bullet.faction,
            },
            pos,
            hitbox,
            color,
        );
        if bullet.kind == BulletKind::Guided {
            d.rotation = vel.heading();
        }
        drawables.push(d);
    }

    for (_, (item, pos, hitbox)) in world.query::<(&DropItem, &Position, &Hitbox)>().iter() {
        if !item.removed {
            let kind = DrawKind::Item { kind: item.kind };
            drawables.push(rect_drawable(kind, pos, hitbox, item_color(item.kind)));
        }
    }

    for (_, laser) in world.query::<&Laser>().iter() {
        if laser.state == LaserState::Expired {
            continue;
        }
        let s = laser.segment;
        drawables.push(segment_drawable(
            DrawKind::Laser { state: laser.state },
            s.a,
            s.length(),
            LASER_WIDTH,
            s.angle(),
            LASER_COLOR,
        ));
    }

    for (_, beam) in world.query::<&Beam>().iter() {
        if beam.visible.is_finished(now_ms) {
            continue;
        }
        let s = beam.segment;
        drawables.push(segment_drawable(
            DrawKind::Beam,
            s.a,
            s.length(),
            BEAM_WIDTH,
            s.angle(),
            BEAM_COLOR,
        ));
    }

    for (_, hole) in world.query::<&BlackHole>().iter() {
        if hole.life.is_finished(now_ms) {
            continue;
        }
        drawables.push(Drawable {
            kind: DrawKind::BlackHole,
            x: hole.center.x - hole.radius,
            y: hole.center.y - hole.radius,
            w: hole.radius * 2.0,
            h: hole.radius * 2.0,
            rotation: 0.0,
            color: BLACK_HOLE_COLOR,
        });
    }

    for (_, (explosion, pos)) in world.query::<(&Explosion, &Position)>().iter() {
        if explosion.life.is_finished(now_ms) {
            continue;
        }
        drawables.push(Drawable {
            kind: DrawKind::Explosion,
            x: pos.x,
            y: pos.y,
            w: explosion.radius * 2.0,
            h: explosion.radius * 2.0,
            rotation: 0.0,
            color: EXPLOSION_COLOR,
        });
    }

    drawables
}

fn build_player_huds(world: &World, score: &ScoreState, now_ms: u64) -> Vec<PlayerHud> {
    let mut huds: Vec<PlayerHud> = world
        .query::<&PlayerShip>()
        .iter()
        .map(|(_, ship)| {
            let charge = if ship.charge.charging {
                let held = now_ms.saturating_sub(ship.charge.started_ms);
                (held as f32 / CHARGE_FULL_MS as f32).min(1.0)
            } else {
                0.0
            };
            PlayerHud {
                player: ship.id,
                score: score.score(ship.id),
                lives: ship.lives,
                teleport_cooldown: ship.teleport.remaining_ratio(now_ms),
                charge,
                bombs: ship.skills.get(SkillKind::Bomb).charges.unwrap_or(0),
            }
        })
        .collect();
    huds.sort_by_key(|h| h.player);
    huds
}
