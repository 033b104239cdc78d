//! The pattern interface and the closed set of pattern variants.

use barrage_core::enums::PatternKind;
use barrage_core::geometry::Aabb;
use barrage_core::state::PatternHint;

use super::apocalypse::Apocalypse;
use super::context::PatternContext;
use super::dash::Dash;
use super::gravity_well::GravityWell;
use super::laser_barrage::LaserBarrage;
use super::missiles::MissileLauncher;
use super::movers::{DiagonalMover, HorizontalMover, ZigzagMover};
use super::spawner::MobSpawner;
use super::spread::SpreadShot;
use crate::output::PatternOutput;

/// Capabilities every boss pattern exposes to its coordinator.
pub trait Pattern {
    /// Move the boss body for this update. Attack-only patterns leave it alone.
    fn update_movement(&mut self, _body: &mut Aabb, _ctx: &mut PatternContext<'_>) {}

    /// Append any projectiles or hazards produced this update to `out`.
    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>);

    /// Whether the pattern has finished its work and may be replaced.
    fn is_complete(&self, now_ms: u64) -> bool;

    /// False while a swap would cause a visible discontinuity.
    fn is_interruptible(&self) -> bool {
        true
    }

    /// Freeze every internal clock.
    fn suspend(&mut self, _now_ms: u64) {}

    /// Continue after `suspend`, discounting the suspended time.
    fn resume(&mut self, _now_ms: u64) {}

    /// Visual hint for the renderer, if the pattern shows one right now.
    fn hint(&self, _body: &Aabb, _now_ms: u64) -> Option<PatternHint> {
        None
    }
}

/// One active pattern, owned by exactly one coordinator.
#[derive(Debug, Clone)]
pub enum BossPattern {
    SpreadShot(SpreadShot),
    Horizontal(HorizontalMover),
    Diagonal(DiagonalMover),
    Zigzag(ZigzagMover),
    Dash(Dash),
    LaserBarrage(LaserBarrage),
    GravityWell(GravityWell),
    Apocalypse(Apocalypse),
    MobSpawner(MobSpawner),
    MissileLauncher(MissileLauncher),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            BossPattern::SpreadShot($p) => $body,
            BossPattern::Horizontal($p) => $body,
            BossPattern::Diagonal($p) => $body,
            BossPattern::Zigzag($p) => $body,
            BossPattern::Dash($p) => $body,
            BossPattern::LaserBarrage($p) => $body,
            BossPattern::GravityWell($p) => $body,
            BossPattern::Apocalypse($p) => $body,
            BossPattern::MobSpawner($p) => $body,
            BossPattern::MissileLauncher($p) => $body,
        }
    };
}

impl BossPattern {
    /// Build a fresh pattern of `kind` with all its cooldowns reset.
    pub fn new(kind: PatternKind, body: &Aabb, ctx: &mut PatternContext<'_>) -> Self {
        match kind {
            PatternKind::SpreadShot => BossPattern::SpreadShot(SpreadShot::new()),
            PatternKind::Horizontal => BossPattern::Horizontal(HorizontalMover::new(ctx.now_ms)),
            PatternKind::Diagonal => BossPattern::Diagonal(DiagonalMover::new(ctx.now_ms)),
            PatternKind::Zigzag => {
                BossPattern::Zigzag(ZigzagMover::new(body, &ctx.band(), ctx.now_ms))
            }
            PatternKind::Dash => BossPattern::Dash(Dash::new()),
            PatternKind::LaserBarrage => BossPattern::LaserBarrage(LaserBarrage::new()),
            PatternKind::GravityWell => BossPattern::GravityWell(GravityWell::new()),
            PatternKind::Apocalypse => BossPattern::Apocalypse(Apocalypse::new(ctx)),
            PatternKind::MobSpawner => BossPattern::MobSpawner(MobSpawner::new()),
            PatternKind::MissileLauncher => BossPattern::MissileLauncher(MissileLauncher::new()),
        }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            BossPattern::SpreadShot(_) => PatternKind::SpreadShot,
            BossPattern::Horizontal(_) => PatternKind::Horizontal,
            BossPattern::Diagonal(_) => PatternKind::Diagonal,
            BossPattern::Zigzag(_) => PatternKind::Zigzag,
            BossPattern::Dash(_) => PatternKind::Dash,
            BossPattern::LaserBarrage(_) => PatternKind::LaserBarrage,
            BossPattern::GravityWell(_) => PatternKind::GravityWell,
            BossPattern::Apocalypse(_) => PatternKind::Apocalypse,
            BossPattern::MobSpawner(_) => PatternKind::MobSpawner,
            BossPattern::MissileLauncher(_) => PatternKind::MissileLauncher,
        }
    }

    pub fn as_dash(&self) -> Option<&Dash> {
        match self {
            BossPattern::Dash(dash) => Some(dash),
            _ => None,
        }
    }
}

impl Pattern for BossPattern {
    fn update_movement(&mut self, body: &mut Aabb, ctx: &mut PatternContext<'_>) {
        dispatch!(self, p => p.update_movement(body, ctx))
    }

    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        dispatch!(self, p => p.attack(body, ctx, out))
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        dispatch!(self, p => p.is_complete(now_ms))
    }

    fn is_interruptible(&self) -> bool {
        dispatch!(self, p => p.is_interruptible())
    }

    fn suspend(&mut self, now_ms: u64) {
        dispatch!(self, p => p.suspend(now_ms))
    }

    fn resume(&mut self, now_ms: u64) {
        dispatch!(self, p => p.resume(now_ms))
    }

    fn hint(&self, body: &Aabb, now_ms: u64) -> Option<PatternHint> {
        dispatch!(self, p => p.hint(body, now_ms))
    }
}
