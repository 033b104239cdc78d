//! Archetype-specific boss profiles.
//!
//! Consolidates per-archetype stats, phase thresholds and the pattern plan
//! for each phase. The phase computation here is the only one in the crate.

use barrage_core::enums::{BossArchetype, PatternKind};

/// A pattern that pre-empts the cycle whenever its own cooldown expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterruptPlan {
    pub kind: PatternKind,
    pub every_ms: u64,
}

/// Patterns run during one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePlan {
    /// Base movement while the current attack does not move the boss itself.
    pub movement: PatternKind,
    /// Attack patterns cycled in order; the first is the phase's entry pattern.
    pub cycle: &'static [PatternKind],
    pub interrupt: Option<InterruptPlan>,
}

/// Behavioral profile for a boss archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossProfile {
    pub max_health: u32,
    /// Score awarded on defeat.
    pub points: u32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    /// Health ratios at which the next phase begins, strictly decreasing.
    pub thresholds: &'static [f32],
    /// One plan per phase: `thresholds.len() + 1` entries.
    pub phases: &'static [PhasePlan],
}

impl BossProfile {
    /// Phase index for a health ratio. Pure and monotonic: a lower ratio
    /// never yields a lower phase.
    pub fn phase_for_ratio(&self, ratio: f32) -> usize {
        let phase = self.thresholds.iter().filter(|&&t| ratio < t).count();
        phase.min(self.phases.len().saturating_sub(1))
    }

    pub fn phase_plan(&self, phase: usize) -> &'static PhasePlan {
        let phases = self.phases;
        &phases[phase.min(phases.len() - 1)]
    }
}

use PatternKind::*;

const SENTINEL_PHASES: &[PhasePlan] = &[
    PhasePlan {
        movement: Horizontal,
        cycle: &[SpreadShot],
        interrupt: None,
    },
    PhasePlan {
        movement: Diagonal,
        cycle: &[SpreadShot, MissileLauncher],
        interrupt: None,
    },
];

const WARDEN_PHASES: &[PhasePlan] = &[
    PhasePlan {
        movement: Horizontal,
        cycle: &[SpreadShot, LaserBarrage],
        interrupt: None,
    },
    PhasePlan {
        movement: Horizontal,
        cycle: &[Zigzag, LaserBarrage, Dash],
        interrupt: None,
    },
    PhasePlan {
        movement: Diagonal,
        cycle: &[Dash, GravityWell, SpreadShot],
        interrupt: Some(InterruptPlan {
            kind: Apocalypse,
            every_ms: 12_000,
        }),
    },
];

const OVERLORD_PHASES: &[PhasePlan] = &[
    PhasePlan {
        movement: Horizontal,
        cycle: &[MobSpawner, SpreadShot],
        interrupt: None,
    },
    PhasePlan {
        movement: Diagonal,
        cycle: &[GravityWell, MissileLauncher, LaserBarrage],
        interrupt: None,
    },
    PhasePlan {
        movement: Horizontal,
        cycle: &[Zigzag, Dash, LaserBarrage],
        interrupt: Some(InterruptPlan {
            kind: Apocalypse,
            every_ms: 10_000,
        }),
    },
];

/// Get the profile for a given archetype.
pub fn get_profile(archetype: BossArchetype) -> BossProfile {
    match archetype {
        BossArchetype::Sentinel => BossProfile {
            max_health: 60,
            points: 2_000,
            width: 96.0,
            height: 64.0,
            color: 0xd94f4f,
            thresholds: &[0.5],
            phases: SENTINEL_PHASES,
        },
        BossArchetype::Warden => BossProfile {
            max_health: 100,
            points: 4_000,
            width: 112.0,
            height: 72.0,
            color: 0x8f5fd9,
            thresholds: &[0.6, 0.3],
            phases: WARDEN_PHASES,
        },
        BossArchetype::Overlord => BossProfile {
            max_health: 150,
            points: 6_000,
            width: 128.0,
            height: 80.0,
            color: 0xe0a030,
            thresholds: &[0.7, 0.4],
            phases: OVERLORD_PHASES,
        },
    }
}
