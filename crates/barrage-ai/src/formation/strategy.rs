//! Pluggable formation movement strategies.
//!
//! Each subgroup of a formation owns exactly one strategy. Stepped
//! strategies move only every N ticks, where N shrinks as the formation
//! thins; smooth strategies follow continuous paths and move every tick.

use barrage_core::enums::MovementKind;
use barrage_core::geometry::Aabb;

use super::diagonal::Diagonal;
use super::pursuit::Pursuit;
use super::side_to_side::SideToSide;
use super::vertical_loop::VerticalLoop;
use super::zigzag::Zigzag;
use super::Column;

/// Inputs for one movement update.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext {
    /// Current formation speed (pixels per stepped move).
    pub speed: f32,
    pub now_ms: u64,
    pub field: Aabb,
    /// Lowest y formations may reach.
    pub lower_limit: f32,
}

impl MoveContext {
    /// Area formations may occupy.
    pub fn area(&self) -> Aabb {
        Aabb::new(
            self.field.x,
            self.field.y,
            self.field.w,
            (self.lower_limit - self.field.y).max(0.0),
        )
    }
}

#[derive(Debug, Clone)]
pub enum MovementStrategy {
    SideToSide(SideToSide),
    Diagonal(Diagonal),
    Pursuit(Pursuit),
    VerticalLoop(VerticalLoop),
    Zigzag(Zigzag),
}

impl MovementStrategy {
    pub fn new(kind: MovementKind) -> Self {
        match kind {
            MovementKind::SideToSide => MovementStrategy::SideToSide(SideToSide::new()),
            MovementKind::Diagonal => MovementStrategy::Diagonal(Diagonal::new()),
            MovementKind::PursuitLine => MovementStrategy::Pursuit(Pursuit::line()),
            MovementKind::PursuitBezier => MovementStrategy::Pursuit(Pursuit::bezier()),
            MovementKind::VerticalLoop => MovementStrategy::VerticalLoop(VerticalLoop),
            MovementKind::Zigzag => MovementStrategy::Zigzag(Zigzag::new()),
        }
    }

    pub fn kind(&self) -> MovementKind {
        match self {
            MovementStrategy::SideToSide(_) => MovementKind::SideToSide,
            MovementStrategy::Diagonal(_) => MovementKind::Diagonal,
            MovementStrategy::Pursuit(p) => p.kind(),
            MovementStrategy::VerticalLoop(_) => MovementKind::VerticalLoop,
            MovementStrategy::Zigzag(_) => MovementKind::Zigzag,
        }
    }

    /// True for continuous paths updated every tick.
    pub fn needs_smooth_movement(&self) -> bool {
        !matches!(
            self,
            MovementStrategy::SideToSide(_) | MovementStrategy::Zigzag(_)
        )
    }

    /// Place members for the strategy's starting layout.
    pub fn attach(&mut self, columns: &mut [Column], field: &Aabb) {
        match self {
            MovementStrategy::Pursuit(p) => p.attach(columns, field),
            MovementStrategy::VerticalLoop(_) => VerticalLoop::attach(columns),
            _ => {}
        }
    }

    /// Move the members. A group with no members is left untouched.
    pub fn update_movement(&mut self, columns: &mut [Column], ctx: &MoveContext) {
        if columns.iter().all(|c| c.ships.is_empty()) {
            return;
        }
        match self {
            MovementStrategy::SideToSide(s) => s.update(columns, ctx),
            MovementStrategy::Diagonal(s) => s.update(columns, ctx),
            MovementStrategy::Pursuit(s) => s.update(columns, ctx),
            MovementStrategy::VerticalLoop(s) => s.update(columns, ctx),
            MovementStrategy::Zigzag(s) => s.update(columns, ctx),
        }
    }

    pub fn on_member_destroyed(&mut self, now_ms: u64) {
        if let MovementStrategy::Diagonal(s) = self {
            s.slow_down(now_ms);
        }
    }
}
