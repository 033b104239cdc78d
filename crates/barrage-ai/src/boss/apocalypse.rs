//! Area-denial sweep.
//!
//! The field is split into vertical lanes with one safe lane. After a
//! telegraph, a damage front rises from the bottom edge across every other
//! lane. Each target in an unsafe lane is damaged once, when the front
//! passes its center.

use rand::Rng;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::Aabb;
use barrage_core::state::PatternHint;
use barrage_core::types::PlayerId;

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::PatternOutput;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SweepState {
    Telegraph,
    Sweeping,
    Done,
}

#[derive(Debug, Clone)]
pub struct Apocalypse {
    state: SweepState,
    lanes: usize,
    safe_lane: usize,
    field: Aabb,
    telegraph: Cooldown,
    sweep: Cooldown,
    damaged: Vec<PlayerId>,
}

/// Lane index containing `x`, clamped to the field.
pub fn lane_of(x: f32, field: &Aabb, lanes: usize) -> usize {
    if lanes == 0 || field.w <= 0.0 {
        return 0;
    }
    let lane_width = field.w / lanes as f32;
    let index = ((x - field.left()) / lane_width).floor();
    (index.max(0.0) as usize).min(lanes - 1)
}

impl Apocalypse {
    pub fn new(ctx: &mut PatternContext<'_>) -> Self {
        let safe_lane = ctx.rng.gen_range(0..APOCALYPSE_LANES);
        Self::with_safe_lane(safe_lane, ctx.field, ctx.now_ms)
    }

    /// Sweep with a fixed safe lane, telegraph starting at `now_ms`.
    pub fn with_safe_lane(safe_lane: usize, field: Aabb, now_ms: u64) -> Self {
        Self {
            state: SweepState::Telegraph,
            lanes: APOCALYPSE_LANES,
            safe_lane: safe_lane.min(APOCALYPSE_LANES - 1),
            field,
            telegraph: Cooldown::started(APOCALYPSE_TELEGRAPH_MS, now_ms),
            sweep: Cooldown::new(APOCALYPSE_SWEEP_MS),
            damaged: Vec::new(),
        }
    }

    pub fn safe_lane(&self) -> usize {
        self.safe_lane
    }

    pub fn is_firing(&self) -> bool {
        self.state == SweepState::Sweeping
    }

    fn lane_width(&self) -> f32 {
        self.field.w / self.lanes as f32
    }

    /// Current height of the rising front while sweeping.
    fn front_y(&self, now_ms: u64) -> Option<f32> {
        (self.state == SweepState::Sweeping)
            .then(|| self.field.bottom() - self.sweep.progress(now_ms) * self.field.h)
    }
}

impl Pattern for Apocalypse {
    fn attack(&mut self, _body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        if self.state == SweepState::Telegraph && self.telegraph.is_finished(ctx.now_ms) {
            self.state = SweepState::Sweeping;
            self.sweep.reset(ctx.now_ms);
            tracing::debug!(safe_lane = self.safe_lane, "apocalypse sweep firing");
        }
        let Some(front_y) = self.front_y(ctx.now_ms) else {
            return;
        };

        for target in ctx.targets {
            let center = target.bounds.center();
            if lane_of(center.x, &self.field, self.lanes) == self.safe_lane {
                continue;
            }
            if center.y >= front_y && !self.damaged.contains(&target.id) {
                self.damaged.push(target.id);
                out.push(PatternOutput::AreaDamage { target: target.id });
            }
        }

        if self.sweep.is_finished(ctx.now_ms) {
            self.state = SweepState::Done;
        }
    }

    fn is_complete(&self, _now_ms: u64) -> bool {
        self.state == SweepState::Done
    }

    fn is_interruptible(&self) -> bool {
        self.state == SweepState::Done
    }

    fn suspend(&mut self, now_ms: u64) {
        self.telegraph.pause(now_ms);
        self.sweep.pause(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.telegraph.resume(now_ms);
        self.sweep.resume(now_ms);
    }

    fn hint(&self, _body: &Aabb, now_ms: u64) -> Option<PatternHint> {
        (self.state != SweepState::Done).then(|| PatternHint::LaneOverlay {
            lanes: self.lanes,
            safe_lane: self.safe_lane,
            lane_width: self.lane_width(),
            front_y: self.front_y(now_ms),
        })
    }
}
