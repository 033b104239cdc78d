//! Formation shooting manager: one shot per interval from the lowest member
//! of a random column.

use glam::Vec2;
use rand::{Rng, RngCore};

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::Aabb;

use super::Column;
use crate::output::BulletSpec;

#[derive(Debug, Clone)]
pub struct ShootingManager {
    gate: Option<Cooldown>,
}

impl ShootingManager {
    /// First shot comes one full interval after `now_ms`.
    pub fn new(frequency_ms: u64, now_ms: u64) -> Self {
        Self {
            gate: Some(Cooldown::started(frequency_ms, now_ms)),
        }
    }

    /// A manager that never fires.
    pub fn disabled() -> Self {
        Self { gate: None }
    }

    pub fn update<'a>(
        &mut self,
        columns: impl Iterator<Item = &'a Column>,
        field: &Aabb,
        now_ms: u64,
        rng: &mut dyn RngCore,
    ) -> Option<BulletSpec> {
        let gate = self.gate.as_mut()?;
        if !gate.is_finished(now_ms) {
            return None;
        }

        // Lowest visible member of each non-empty column.
        let shooters: Vec<Aabb> = columns
            .filter_map(|c| {
                c.ships
                    .iter()
                    .filter(|s| field.contains_rect(&s.bounds))
                    .map(|s| s.bounds)
                    .max_by(|a, b| a.bottom().total_cmp(&b.bottom()))
            })
            .collect();
        if shooters.is_empty() {
            return None;
        }

        let shooter = shooters[rng.gen_range(0..shooters.len())];
        gate.reset(now_ms);
        Some(BulletSpec::standard(
            Vec2::new(shooter.center().x, shooter.bottom()),
            Vec2::new(0.0, ENEMY_BULLET_SPEED),
            ENEMY_BULLET_SIZE,
        ))
    }
}
