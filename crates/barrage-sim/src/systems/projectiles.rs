//! Projectile and pickup kinematics.
//!
//! Integrates position from per-tick velocity. Guided missiles turn toward
//! the nearest live player by at most a fixed angle per tick and expire with
//! their lifetime; bombs arm themselves when their fuse runs out. Enemy
//! projectiles hold still while time is stopped.

use glam::Vec2;
use hecs::World;

use barrage_core::components::{Bullet, DropItem};
use barrage_core::constants::MISSILE_TURN_RATE;
use barrage_core::enums::{BulletKind, Faction};
use barrage_core::types::{Hitbox, Position, Velocity};

use crate::context::SimContext;
use crate::systems::enemies::live_targets;

/// Rotate `velocity` toward `desired` by no more than `max_turn` radians,
/// keeping its speed.
pub fn steer(velocity: Vec2, desired: Vec2, max_turn: f32) -> Vec2 {
    let speed = velocity.length();
    if speed == 0.0 || desired.length_squared() == 0.0 {
        return velocity;
    }
    let current = velocity.y.atan2(velocity.x);
    let wanted = desired.y.atan2(desired.x);
    let mut delta = wanted - current;
    delta = (delta + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU) - std::f32::consts::PI;
    let heading = current + delta.clamp(-max_turn, max_turn);
    Vec2::from_angle(heading) * speed
}

pub fn run(world: &mut World, ctx: &SimContext) {
    let frozen = ctx.is_time_stopped();
    let targets = live_targets(world);

    for (_entity, (bullet, pos, vel, hitbox)) in
        world.query_mut::<(&mut Bullet, &mut Position, &mut Velocity, &Hitbox)>()
    {
        if !bullet.is_active() || (frozen && bullet.faction == Faction::Enemy) {
            continue;
        }

        match bullet.kind {
            BulletKind::Guided => {
                if bullet.lifetime.is_some_and(|l| l.is_finished(ctx.now_ms)) {
                    bullet.removed = true;
                    continue;
                }
                let center = pos.rect(hitbox).center();
                let nearest = targets.iter().min_by(|a, b| {
                    let da = a.bounds.center().distance_squared(center);
                    let db = b.bounds.center().distance_squared(center);
                    da.total_cmp(&db)
                });
                if let Some(target) = nearest {
                    let desired = target.bounds.center() - center;
                    *vel = Velocity::from(steer(vel.vec(), desired, MISSILE_TURN_RATE));
                }
            }
            BulletKind::Bomb => {
                if bullet.lifetime.is_some_and(|l| l.is_finished(ctx.now_ms)) {
                    bullet.detonate = true;
                }
            }
            BulletKind::Standard => {}
        }

        pos.translate(vel.vec());
    }

    for (_entity, (item, pos, vel)) in world.query_mut::<(&DropItem, &mut Position, &Velocity)>() {
        if !item.removed {
            pos.translate(vel.vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_is_bounded() {
        let v = Vec2::new(0.0, 3.0);
        let turned = steer(v, Vec2::new(1.0, 0.0), 0.1);
        assert!((turned.length() - 3.0).abs() < 1e-4);
        let angle = turned.y.atan2(turned.x);
        assert!((angle - (std::f32::consts::FRAC_PI_2 - 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_steer_reaches_small_turns() {
        let v = Vec2::new(2.0, 0.0);
        let desired = Vec2::from_angle(0.02);
        let turned = steer(v, desired, 0.1);
        assert!((turned.y.atan2(turned.x) - 0.02).abs() < 1e-5);
    }
}
