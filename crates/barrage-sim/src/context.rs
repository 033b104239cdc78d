//! Per-tick context shared by every system.

use barrage_core::constants::TIME_STOP_MS;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::Aabb;

/// Time, playfield and cross-cutting switches for the current tick.
#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub now_ms: u64,
    pub field: Aabb,
    /// Running while the time-stop skill is active.
    pub time_stop: Cooldown,
}

impl SimContext {
    pub fn new(field: Aabb) -> Self {
        Self {
            now_ms: 0,
            field,
            time_stop: Cooldown::new(TIME_STOP_MS),
        }
    }

    /// Formations, enemy bullets and boss patterns are frozen.
    pub fn is_time_stopped(&self) -> bool {
        !self.time_stop.is_finished(self.now_ms)
    }
}
