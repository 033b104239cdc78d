//! Per-update inputs shared by every boss pattern.

use glam::Vec2;
use rand::{Rng, RngCore};

use barrage_core::constants::BOSS_BAND_RATIO;
use barrage_core::geometry::{direction_to, Aabb};
use barrage_core::types::PlayerId;

/// A live player a pattern may aim at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub id: PlayerId,
    pub bounds: Aabb,
}

/// Input to a pattern for a single update.
pub struct PatternContext<'a> {
    pub now_ms: u64,
    pub field: Aabb,
    /// Live, targetable players.
    pub targets: &'a [TargetInfo],
    pub rng: &'a mut dyn RngCore,
}

impl PatternContext<'_> {
    /// Target whose center is closest to `from`.
    pub fn nearest_target(&self, from: Vec2) -> Option<TargetInfo> {
        self.targets.iter().copied().min_by(|a, b| {
            let da = a.bounds.center().distance_squared(from);
            let db = b.bounds.center().distance_squared(from);
            da.total_cmp(&db)
        })
    }

    /// Unit direction from `from` to the nearest target, or straight down
    /// when there is no target or it sits exactly on `from`.
    pub fn aim_from(&self, from: Vec2) -> Vec2 {
        self.nearest_target(from)
            .and_then(|t| direction_to(from, t.bounds.center()))
            .unwrap_or(Vec2::Y)
    }

    /// Uniformly chosen target.
    pub fn random_target(&mut self) -> Option<TargetInfo> {
        if self.targets.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.targets.len());
        Some(self.targets[index])
    }

    /// Uniform value in `[lo, hi)`, or `lo` when the range is empty.
    pub fn random_between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Upper band of the field that bosses roam in.
    pub fn band(&self) -> Aabb {
        Aabb::new(
            self.field.x,
            self.field.y,
            self.field.w,
            self.field.h * BOSS_BAND_RATIO,
        )
    }
}
