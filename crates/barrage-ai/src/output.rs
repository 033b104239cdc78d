//! Spawn requests produced by patterns and formations.
//!
//! Behaviour code never creates entities itself. It describes what should
//! appear and the orchestrator turns each request into pooled entities.

use glam::Vec2;

use barrage_core::enums::BulletKind;
use barrage_core::geometry::Segment;
use barrage_core::types::PlayerId;

/// A hostile projectile to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpec {
    pub kind: BulletKind,
    /// Center of the projectile at spawn.
    pub origin: Vec2,
    /// Pixels per tick.
    pub velocity: Vec2,
    pub size: f32,
    pub damage: u32,
    /// Lifetime for guided missiles.
    pub lifetime_ms: Option<u64>,
}

impl BulletSpec {
    /// A plain bullet travelling along `velocity`.
    pub fn standard(origin: Vec2, velocity: Vec2, size: f32) -> Self {
        Self {
            kind: BulletKind::Standard,
            origin,
            velocity,
            size,
            damage: 1,
            lifetime_ms: None,
        }
    }
}

/// A boss laser aimed at one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserSpec {
    pub segment: Segment,
    pub target: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackHoleSpec {
    pub center: Vec2,
    pub radius: f32,
    pub pull: f32,
    pub duration_ms: u64,
}

/// Everything a boss pattern can ask the orchestrator to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatternOutput {
    Bullet(BulletSpec),
    Laser(LaserSpec),
    BlackHole(BlackHoleSpec),
    /// Launch a wave of child mobs from `origin`.
    SpawnMobs { origin: Vec2, count: u32 },
    /// Direct damage to a player (area-denial sweeps).
    AreaDamage { target: PlayerId },
}
