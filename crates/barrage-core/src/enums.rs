//! Enumeration types used throughout the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which side an entity fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    #[default]
    Enemy,
}

/// Discrete input direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in screen space.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Top-level engine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    Active,
    Paused,
    LevelComplete,
    GameOver,
}

/// Progress within an active level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Formations,
    Boss,
    Cleared,
}

/// Bullet behaviour variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    #[default]
    Standard,
    /// Explodes only on explicit trigger or fuse expiry; never collides pairwise.
    Bomb,
    /// Steers toward the nearest player for a limited lifetime.
    Guided,
}

/// Enemy formation member types.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Grunt,
    Striker,
    Elite,
    /// Child mob spawned by a boss.
    Mob,
}

impl EnemyKind {
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Grunt => 50,
            EnemyKind::Striker => 80,
            EnemyKind::Elite => 120,
            EnemyKind::Mob => 20,
        }
    }

    pub fn health(self) -> u32 {
        match self {
            EnemyKind::Elite => 2,
            _ => 1,
        }
    }

    /// Kind for a formation row, top row toughest.
    pub fn for_row(row: usize, rows: usize) -> EnemyKind {
        if rows >= 3 && row == 0 {
            EnemyKind::Elite
        } else if row < rows / 2 {
            EnemyKind::Striker
        } else {
            EnemyKind::Grunt
        }
    }
}

/// Pickup types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Coin,
    ExtraLife,
    PowerUp,
    SubShip,
    BombRefill,
}

/// Closed set of player skills, indexable into fixed arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    Bomb,
    TimeStop,
    Shield,
}

impl SkillKind {
    pub const COUNT: usize = 3;
    pub const ALL: [SkillKind; SkillKind::COUNT] =
        [SkillKind::Bomb, SkillKind::TimeStop, SkillKind::Shield];

    pub const fn index(self) -> usize {
        match self {
            SkillKind::Bomb => 0,
            SkillKind::TimeStop => 1,
            SkillKind::Shield => 2,
        }
    }
}

/// Boss archetypes, selected by the level's boss identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossArchetype {
    Sentinel,
    Warden,
    Overlord,
}

impl BossArchetype {
    pub fn from_id(id: &str) -> Option<BossArchetype> {
        match id.trim().to_ascii_lowercase().as_str() {
            "sentinel" => Some(BossArchetype::Sentinel),
            "warden" => Some(BossArchetype::Warden),
            "overlord" => Some(BossArchetype::Overlord),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            BossArchetype::Sentinel => "sentinel",
            BossArchetype::Warden => "warden",
            BossArchetype::Overlord => "overlord",
        }
    }
}

/// Named formation movement algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    #[default]
    SideToSide,
    Diagonal,
    PursuitLine,
    PursuitBezier,
    VerticalLoop,
    Zigzag,
}

impl MovementKind {
    pub fn from_name(name: &str) -> Option<MovementKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "side_to_side" | "default" => Some(MovementKind::SideToSide),
            "diagonal" => Some(MovementKind::Diagonal),
            "pursuit_line" => Some(MovementKind::PursuitLine),
            "pursuit_bezier" => Some(MovementKind::PursuitBezier),
            "vertical_loop" => Some(MovementKind::VerticalLoop),
            "zigzag" => Some(MovementKind::Zigzag),
            _ => None,
        }
    }
}

/// Boss pattern variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    SpreadShot,
    Horizontal,
    Diagonal,
    Zigzag,
    Dash,
    LaserBarrage,
    GravityWell,
    Apocalypse,
    MobSpawner,
    MissileLauncher,
}

impl PatternKind {
    /// Patterns that move the boss themselves while active as the attack.
    pub fn drives_movement(self) -> bool {
        matches!(
            self,
            PatternKind::Horizontal | PatternKind::Diagonal | PatternKind::Zigzag | PatternKind::Dash
        )
    }
}

/// Boss laser lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserState {
    /// Thin warning line; harmless.
    #[default]
    Charging,
    /// Full beam; damages players it crosses.
    Firing,
    /// Fading out; harmless.
    Fading,
    Expired,
}

/// What the renderer should draw for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawKind {
    Player { player: u8 },
    SubShip,
    Enemy { kind: EnemyKind },
    Boss { archetype: BossArchetype },
    Bullet { kind: BulletKind, faction: Faction },
    Item { kind: ItemKind },
    Laser { state: LaserState },
    Beam,
    BlackHole,
    Explosion,
}
