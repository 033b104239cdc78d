//! Monotonic countdown timer used for attack intervals, invincibility,
//! telegraphs and phase durations.
//!
//! A `Cooldown` is a pure value: it never reads a clock itself. Callers pass
//! the current simulation time (`SimTime::now_ms`) into every query, so
//! repeated queries never consume state. Only `reset` restarts the clock.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    duration_ms: u64,
    /// `None` until first started; an unstarted cooldown counts as finished.
    start_ms: Option<u64>,
    /// Set while the clock is suspended.
    paused_at: Option<u64>,
}

impl Cooldown {
    /// An unstarted cooldown, immediately finished until `reset` is called.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            start_ms: None,
            paused_at: None,
        }
    }

    /// A cooldown started at `now_ms`.
    pub fn started(duration_ms: u64, now_ms: u64) -> Self {
        Self {
            duration_ms,
            start_ms: Some(now_ms),
            paused_at: None,
        }
    }

    /// Change the duration and restart at `now_ms`.
    pub fn start(&mut self, duration_ms: u64, now_ms: u64) {
        self.duration_ms = duration_ms;
        self.reset(now_ms);
    }

    /// Restart the countdown at `now_ms`.
    pub fn reset(&mut self, now_ms: u64) {
        self.start_ms = Some(now_ms);
        self.paused_at = None;
    }

    /// Force the cooldown into the finished state.
    pub fn finish(&mut self) {
        self.start_ms = None;
        self.paused_at = None;
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Milliseconds counted so far. Frozen while paused, never negative.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.start_ms {
            None => self.duration_ms,
            Some(start) => {
                let reference = self.paused_at.unwrap_or(now_ms);
                reference.saturating_sub(start)
            }
        }
    }

    /// True iff `now - start >= duration`.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    /// Remaining fraction of the duration in `[0, 1]`.
    pub fn remaining_ratio(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        (self.remaining_ms(now_ms) as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Completed fraction of the duration in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        1.0 - self.remaining_ratio(now_ms)
    }

    /// Suspend the clock. Elapsed time stops accumulating until `resume`.
    pub fn pause(&mut self, now_ms: u64) {
        if self.start_ms.is_some() && self.paused_at.is_none() {
            self.paused_at = Some(now_ms);
        }
    }

    /// Continue a suspended clock, discounting the time spent paused.
    pub fn resume(&mut self, now_ms: u64) {
        if let (Some(start), Some(paused_at)) = (self.start_ms, self.paused_at.take()) {
            let suspended = now_ms.saturating_sub(paused_at);
            self.start_ms = Some(start + suspended);
        }
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstarted_is_finished() {
        let cd = Cooldown::new(500);
        assert!(cd.is_finished(0));
        assert_eq!(cd.remaining_ratio(0), 0.0);
    }

    #[test]
    fn test_finished_boundary() {
        let start = 1_000;
        let duration = 250;
        let cd = Cooldown::started(duration, start);
        for t in start..start + duration {
            assert!(!cd.is_finished(t), "should not be finished at {t}");
        }
        for t in start + duration..start + duration + 50 {
            assert!(cd.is_finished(t), "should be finished at {t}");
        }
    }

    #[test]
    fn test_query_does_not_consume() {
        let cd = Cooldown::started(100, 0);
        assert!(cd.is_finished(150));
        assert!(cd.is_finished(150));
        assert!(cd.is_finished(500));
    }

    #[test]
    fn test_reset_restarts() {
        let mut cd = Cooldown::started(100, 0);
        assert!(cd.is_finished(100));
        cd.reset(100);
        assert!(!cd.is_finished(150));
        assert!(cd.is_finished(200));
    }

    #[test]
    fn test_remaining_ratio_bounds() {
        let cd = Cooldown::started(200, 100);
        assert_eq!(cd.remaining_ratio(100), 1.0);
        assert!((cd.remaining_ratio(200) - 0.5).abs() < 1e-6);
        assert_eq!(cd.remaining_ratio(400), 0.0);
        // Time before the start never runs the clock backward.
        assert_eq!(cd.remaining_ratio(50), 1.0);
    }

    #[test]
    fn test_pause_resume_shifts_clock() {
        let mut cd = Cooldown::started(100, 0);
        cd.pause(40);
        assert_eq!(cd.elapsed_ms(1_000), 40);
        assert!(!cd.is_finished(1_000));
        cd.resume(1_000);
        assert!(!cd.is_finished(1_059));
        assert!(cd.is_finished(1_060));
    }

    #[test]
    fn test_zero_duration() {
        let cd = Cooldown::started(0, 10);
        assert!(cd.is_finished(10));
        assert_eq!(cd.remaining_ratio(10), 0.0);
    }
}
