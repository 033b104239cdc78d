//! Fundamental positional and simulation-time types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;

/// Top-left position on the playfield (pixels, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Per-tick velocity (pixels per tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Width and height of an entity's hitbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub w: f32,
    pub h: f32,
}

/// Stable identifier of a player (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Player credited when a kill has no known owner.
    pub const DEFAULT: PlayerId = PlayerId(1);

    /// Zero-based slot index for fixed per-player arrays.
    pub fn slot(self) -> usize {
        usize::from(self.0.saturating_sub(1))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: u64,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bounding rectangle for an entity at this position with the given hitbox.
    pub fn rect(&self, hitbox: &Hitbox) -> Aabb {
        Aabb::new(self.x, self.y, hitbox.w, hitbox.h)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn speed(&self) -> f32 {
        self.vec().length()
    }

    /// Heading in radians in screen space (0 = right, PI/2 = down).
    pub fn heading(&self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl From<Vec2> for Velocity {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Hitbox {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

impl SimTime {
    /// Milliseconds elapsed at the given tick under the fixed tick rate.
    pub fn ms_at(tick: u64) -> u64 {
        tick * 1000 / crate::constants::TICK_RATE as u64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms = Self::ms_at(self.tick);
    }

    pub fn now_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}
