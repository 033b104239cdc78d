//! Per-boss pattern coordinator.
//!
//! Selects the phase's patterns from the boss profile, cycles attack patterns
//! as each one completes, lets an interrupt pattern pre-empt the cycle on its
//! own cooldown, and defers phase changes until the active patterns can be
//! swapped without a visible jump.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::enums::PatternKind;
use barrage_core::geometry::Aabb;
use barrage_core::state::PatternHint;

use super::context::PatternContext;
use super::pattern::{BossPattern, Pattern};
use crate::output::PatternOutput;
use crate::profiles::BossProfile;

#[derive(Debug, Clone)]
pub struct PatternCoordinator {
    profile: BossProfile,
    /// Phase whose patterns are currently running.
    phase: usize,
    /// Descending into the field; no patterns yet.
    entering: bool,
    movement: Option<BossPattern>,
    attack: Option<BossPattern>,
    cycle_index: usize,
    /// Pre-empting pattern; `attack` is suspended while this is set.
    interrupt: Option<BossPattern>,
    interrupt_gate: Cooldown,
    pending_phase: Option<usize>,
    produced: Vec<PatternOutput>,
}

impl PatternCoordinator {
    pub fn new(profile: BossProfile) -> Self {
        Self {
            profile,
            phase: 0,
            entering: true,
            movement: None,
            attack: None,
            cycle_index: 0,
            interrupt: None,
            interrupt_gate: Cooldown::default(),
            pending_phase: None,
            produced: Vec::new(),
        }
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn is_entering(&self) -> bool {
        self.entering
    }

    pub fn pending_phase(&self) -> Option<usize> {
        self.pending_phase
    }

    pub fn movement_kind(&self) -> Option<PatternKind> {
        self.movement.as_ref().map(BossPattern::kind)
    }

    /// The pattern currently attacking: the interrupt if one is running.
    pub fn active_attack(&self) -> Option<&BossPattern> {
        self.interrupt.as_ref().or(self.attack.as_ref())
    }

    pub fn attack_kind(&self) -> Option<PatternKind> {
        self.active_attack().map(BossPattern::kind)
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_some()
    }

    /// Locked dash endpoint, or the body's own center when no dash is
    /// telegraphing or in flight.
    pub fn dash_endpoint(&self, body: &Aabb) -> Vec2 {
        self.active_attack()
            .and_then(BossPattern::as_dash)
            .and_then(|dash| dash.endpoint())
            .unwrap_or_else(|| body.center())
    }

    /// Hints for the renderer from the running patterns.
    pub fn hints(&self, body: &Aabb, now_ms: u64) -> Vec<PatternHint> {
        self.interrupt
            .iter()
            .chain(self.attack.iter())
            .filter_map(|p| p.hint(body, now_ms))
            .collect()
    }

    /// Hand over everything the patterns produced since the last drain.
    pub fn drain_produced(&mut self) -> std::vec::Drain<'_, PatternOutput> {
        self.produced.drain(..)
    }

    /// Drop every pattern, e.g. when the boss is destroyed.
    pub fn cancel(&mut self) {
        self.movement = None;
        self.attack = None;
        self.interrupt = None;
        self.pending_phase = None;
        self.produced.clear();
    }

    /// Advance one update.
    pub fn update(&mut self, body: &mut Aabb, health_ratio: f32, ctx: &mut PatternContext<'_>) {
        if self.entering {
            let hover = ctx.field.top() + BOSS_HOVER_Y;
            if body.y + BOSS_ENTRY_SPEED < hover {
                body.y += BOSS_ENTRY_SPEED;
                return;
            }
            body.y = hover;
            self.entering = false;
            let phase = self.profile.phase_for_ratio(health_ratio);
            self.start_phase(phase, body, ctx);
        }

        let target = self.profile.phase_for_ratio(health_ratio);
        if target > self.pending_phase.unwrap_or(self.phase) {
            self.pending_phase = Some(target);
        }
        if let Some(next) = self.pending_phase {
            if self.can_swap() {
                self.pending_phase = None;
                self.start_phase(next, body, ctx);
            }
        }

        if self.interrupt.is_none() {
            self.maybe_interrupt(body, ctx);
        }

        if let Some(interrupter) = self.interrupt.as_mut() {
            if let Some(movement) = self.movement.as_mut() {
                movement.update_movement(body, ctx);
            }
            interrupter.attack(body, ctx, &mut self.produced);
            if interrupter.is_complete(ctx.now_ms) {
                self.end_interrupt(ctx.now_ms);
            }
            return;
        }

        let Some(attack) = self.attack.as_mut() else {
            return;
        };
        if attack.kind().drives_movement() {
            attack.update_movement(body, ctx);
        } else if let Some(movement) = self.movement.as_mut() {
            movement.update_movement(body, ctx);
        }
        attack.attack(body, ctx, &mut self.produced);
        if attack.is_complete(ctx.now_ms) {
            self.advance_cycle(body, ctx);
        }
    }

    /// Patterns mid-dash or mid-telegraph may not be swapped out.
    fn can_swap(&self) -> bool {
        self.attack.as_ref().map_or(true, |a| a.is_interruptible())
            && self.interrupt.as_ref().map_or(true, |i| i.is_interruptible())
    }

    fn start_phase(&mut self, phase: usize, body: &Aabb, ctx: &mut PatternContext<'_>) {
        let plan = self.profile.phase_plan(phase);
        self.phase = phase;
        self.cycle_index = 0;
        self.interrupt = None;
        self.movement = Some(BossPattern::new(plan.movement, body, ctx));
        self.attack = plan.cycle.first().map(|&kind| BossPattern::new(kind, body, ctx));
        self.interrupt_gate = match plan.interrupt {
            Some(interrupt) => Cooldown::started(interrupt.every_ms, ctx.now_ms),
            None => Cooldown::default(),
        };
        tracing::info!(phase, attack = ?self.attack_kind(), "boss phase started");
    }

    fn advance_cycle(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>) {
        let cycle = self.profile.phase_plan(self.phase).cycle;
        if cycle.is_empty() {
            self.attack = None;
            return;
        }
        self.cycle_index = (self.cycle_index + 1) % cycle.len();
        let kind = cycle[self.cycle_index];
        self.attack = Some(BossPattern::new(kind, body, ctx));
        tracing::debug!(?kind, "boss pattern switched");
    }

    fn maybe_interrupt(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>) {
        let Some(plan) = self.profile.phase_plan(self.phase).interrupt else {
            return;
        };
        if !self.interrupt_gate.is_finished(ctx.now_ms) {
            return;
        }
        if let Some(attack) = self.attack.as_mut() {
            if !attack.is_interruptible() {
                return;
            }
            attack.suspend(ctx.now_ms);
        }
        self.interrupt = Some(BossPattern::new(plan.kind, body, ctx));
        tracing::info!(kind = ?plan.kind, "boss cycle interrupted");
    }

    fn end_interrupt(&mut self, now_ms: u64) {
        self.interrupt = None;
        if let Some(attack) = self.attack.as_mut() {
            attack.resume(now_ms);
        }
        self.interrupt_gate.reset(now_ms);
    }
}
