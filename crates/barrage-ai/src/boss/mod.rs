//! Boss pattern framework.
//!
//! A `Boss` owns its body, health and a `PatternCoordinator`. Its phase is
//! never stored: it is re-derived from the health ratio through the
//! archetype profile every time it is asked for.

pub mod apocalypse;
pub mod context;
pub mod coordinator;
pub mod dash;
pub mod gravity_well;
pub mod laser_barrage;
pub mod missiles;
pub mod movers;
pub mod pattern;
pub mod spawner;
pub mod spread;

use barrage_core::enums::BossArchetype;
use barrage_core::geometry::Aabb;
use barrage_core::state::PatternHint;

use crate::output::PatternOutput;
use crate::profiles::{get_profile, BossProfile};

pub use context::{PatternContext, TargetInfo};
pub use coordinator::PatternCoordinator;
pub use pattern::{BossPattern, Pattern};

#[derive(Debug, Clone)]
pub struct Boss {
    /// Unit id used for hit bookkeeping.
    pub id: u32,
    pub archetype: BossArchetype,
    pub body: Aabb,
    pub health: u32,
    pub max_health: u32,
    pub points: u32,
    profile: BossProfile,
    coordinator: PatternCoordinator,
}

impl Boss {
    /// A boss positioned just above `field`, horizontally centered, ready to
    /// descend.
    pub fn new(id: u32, archetype: BossArchetype, field: &Aabb) -> Self {
        let profile = get_profile(archetype);
        let body = Aabb::new(
            field.center().x - profile.width * 0.5,
            field.top() - profile.height,
            profile.width,
            profile.height,
        );
        Self {
            id,
            archetype,
            body,
            health: profile.max_health,
            max_health: profile.max_health,
            points: profile.points,
            profile,
            coordinator: PatternCoordinator::new(profile),
        }
    }

    pub fn profile(&self) -> &BossProfile {
        &self.profile
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Phase derived from the current health ratio.
    pub fn phase(&self) -> usize {
        self.profile.phase_for_ratio(self.health_ratio())
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn coordinator(&self) -> &PatternCoordinator {
        &self.coordinator
    }

    /// Apply damage. Returns true if this hit defeated the boss.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if self.is_defeated() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.is_defeated() {
            self.coordinator.cancel();
            return true;
        }
        false
    }

    pub fn update(&mut self, ctx: &mut PatternContext<'_>) {
        if self.is_defeated() {
            return;
        }
        let ratio = self.health_ratio();
        self.coordinator.update(&mut self.body, ratio, ctx);
    }

    pub fn drain_produced(&mut self) -> std::vec::Drain<'_, PatternOutput> {
        self.coordinator.drain_produced()
    }

    pub fn hints(&self, now_ms: u64) -> Vec<PatternHint> {
        self.coordinator.hints(&self.body, now_ms)
    }
}
