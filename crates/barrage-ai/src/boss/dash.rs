//! Dash with retreat and telegraph.
//!
//! Retreat to a staging point at the top of the field, lock a direction
//! toward the nearest player and show it for a fixed telegraph, then
//! accelerate along that direction until the body reaches a field boundary.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::{direction_to, ray_to_boundary, Aabb};
use barrage_core::state::PatternHint;

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::PatternOutput;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DashState {
    Retreat,
    Telegraph { timer: Cooldown },
    Dashing { speed: f32 },
    /// Reached the boundary.
    Completed,
    /// Gave up without dashing (no target).
    Aborted,
}

#[derive(Debug, Clone)]
pub struct Dash {
    state: DashState,
    direction: Vec2,
    /// Body center when the dash ends.
    endpoint: Vec2,
}

impl Dash {
    pub fn new() -> Self {
        Self {
            state: DashState::Retreat,
            direction: Vec2::ZERO,
            endpoint: Vec2::ZERO,
        }
    }

    pub fn is_showing_path(&self) -> bool {
        matches!(self.state, DashState::Telegraph { .. })
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.state, DashState::Dashing { .. })
    }

    /// True only once the dash has actually reached a boundary.
    pub fn is_dash_completed(&self) -> bool {
        self.state == DashState::Completed
    }

    /// Locked endpoint while telegraphing or dashing.
    pub fn endpoint(&self) -> Option<Vec2> {
        match self.state {
            DashState::Telegraph { .. } | DashState::Dashing { .. } => Some(self.endpoint),
            _ => None,
        }
    }

    fn staging_point(body: &Aabb, field: &Aabb) -> Vec2 {
        Vec2::new(field.center().x, field.top() + DASH_STAGING_Y + body.h * 0.5)
    }

    /// Lock direction and endpoint toward the nearest target, or abort.
    fn lock_on(&mut self, body: &Aabb, ctx: &PatternContext<'_>) {
        let from = body.center();
        let Some(target) = ctx.nearest_target(from) else {
            tracing::debug!("dash aborted: no target");
            self.state = DashState::Aborted;
            return;
        };
        let Some(dir) = direction_to(from, target.bounds.center()) else {
            self.state = DashState::Aborted;
            return;
        };
        // The body center may travel until the body's edge meets the field edge.
        let half = body.half_extents();
        let lane = Aabb::new(
            ctx.field.left() + half.x,
            ctx.field.top() + half.y,
            (ctx.field.w - body.w).max(0.0),
            (ctx.field.h - body.h).max(0.0),
        );
        let distance = ray_to_boundary(from, dir, &lane);
        self.direction = dir;
        self.endpoint = from + dir * distance;
        self.state = DashState::Telegraph {
            timer: Cooldown::started(DASH_TELEGRAPH_MS, ctx.now_ms),
        };
    }
}

impl Default for Dash {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for Dash {
    fn update_movement(&mut self, body: &mut Aabb, ctx: &mut PatternContext<'_>) {
        match self.state {
            DashState::Retreat => {
                let staging = Self::staging_point(body, &ctx.field);
                let center = body.center();
                let distance = center.distance(staging);
                match direction_to(center, staging) {
                    Some(dir) if distance > DASH_RETREAT_SPEED => {
                        body.translate(dir * DASH_RETREAT_SPEED);
                    }
                    _ => {
                        body.set_center(staging);
                        self.lock_on(body, ctx);
                    }
                }
            }
            DashState::Telegraph { timer } => {
                if timer.is_finished(ctx.now_ms) {
                    self.state = DashState::Dashing {
                        speed: DASH_START_SPEED,
                    };
                }
            }
            DashState::Dashing { speed } => {
                let speed = (speed + DASH_ACCELERATION).min(DASH_MAX_SPEED);
                let center = body.center();
                if center.distance(self.endpoint) <= speed {
                    body.set_center(self.endpoint);
                    self.state = DashState::Completed;
                } else {
                    body.translate(self.direction * speed);
                    self.state = DashState::Dashing { speed };
                }
            }
            DashState::Completed | DashState::Aborted => {}
        }
    }

    fn attack(&mut self, _body: &Aabb, _ctx: &mut PatternContext<'_>, _out: &mut Vec<PatternOutput>) {}

    fn is_complete(&self, _now_ms: u64) -> bool {
        matches!(self.state, DashState::Completed | DashState::Aborted)
    }

    fn is_interruptible(&self) -> bool {
        !matches!(
            self.state,
            DashState::Telegraph { .. } | DashState::Dashing { .. }
        )
    }

    fn suspend(&mut self, now_ms: u64) {
        if let DashState::Telegraph { timer } = &mut self.state {
            timer.pause(now_ms);
        }
    }

    fn resume(&mut self, now_ms: u64) {
        if let DashState::Telegraph { timer } = &mut self.state {
            timer.resume(now_ms);
        }
    }

    fn hint(&self, body: &Aabb, _now_ms: u64) -> Option<PatternHint> {
        self.is_showing_path().then(|| PatternHint::DashPath {
            from: body.center(),
            to: self.endpoint,
        })
    }
}
