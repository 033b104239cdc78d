//! Timed movers: horizontal sweep, diagonal bounce and zigzag.
//!
//! Each one moves the boss inside its band and fires aimed single shots.
//! Used as a phase's base movement they simply never get replaced; used as a
//! cycle step they complete when their duration elapses. A boss left outside
//! the band (after a dash) glides back instead of snapping.

use std::f32::consts::TAU;

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::cooldown::Cooldown;
use barrage_core::geometry::{reflect_within, Aabb};

use super::context::PatternContext;
use super::pattern::Pattern;
use crate::output::{BulletSpec, PatternOutput};

/// Move `body` vertically toward `band`. Returns true while still outside.
fn return_to_band(body: &mut Aabb, band: &Aabb) -> bool {
    if body.bottom() > band.bottom() {
        body.y = (body.y - BOSS_MOVE_SPEED).max(band.bottom() - body.h);
        true
    } else if body.top() < band.top() {
        body.y = (body.y + BOSS_MOVE_SPEED).min(band.top());
        true
    } else {
        false
    }
}

/// Full-height strip used for horizontal reflection only.
fn lane(band: &Aabb, field: &Aabb) -> Aabb {
    Aabb::new(band.x, field.top() - field.h, band.w, field.h * 3.0)
}

fn aimed_shot(body: &Aabb, ctx: &PatternContext<'_>, out: &mut Vec<PatternOutput>) {
    let origin = Vec2::new(body.center().x, body.bottom());
    let velocity = ctx.aim_from(origin) * BOSS_BULLET_SPEED;
    out.push(PatternOutput::Bullet(BulletSpec::standard(
        origin,
        velocity,
        BOSS_BULLET_SIZE,
    )));
}

/// Duration and shot clocks shared by every mover.
#[derive(Debug, Clone)]
struct MoverClock {
    duration: Cooldown,
    shot: Cooldown,
}

impl MoverClock {
    fn new(duration_ms: u64, shot_ms: u64, now_ms: u64) -> Self {
        Self {
            duration: Cooldown::started(duration_ms, now_ms),
            shot: Cooldown::started(shot_ms, now_ms),
        }
    }

    fn fire_if_ready(&mut self, body: &Aabb, ctx: &PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        if self.shot.is_finished(ctx.now_ms) {
            aimed_shot(body, ctx, out);
            self.shot.reset(ctx.now_ms);
        }
    }

    fn suspend(&mut self, now_ms: u64) {
        self.duration.pause(now_ms);
        self.shot.pause(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.duration.resume(now_ms);
        self.shot.resume(now_ms);
    }
}

#[derive(Debug, Clone)]
pub struct HorizontalMover {
    dir: f32,
    clock: MoverClock,
}

impl HorizontalMover {
    pub fn new(now_ms: u64) -> Self {
        Self {
            dir: 1.0,
            clock: MoverClock::new(MOVER_DURATION_MS, MOVER_SHOT_MS, now_ms),
        }
    }
}

impl Pattern for HorizontalMover {
    fn update_movement(&mut self, body: &mut Aabb, ctx: &mut PatternContext<'_>) {
        let band = ctx.band();
        return_to_band(body, &band);
        body.x += self.dir * BOSS_MOVE_SPEED;
        self.dir = reflect_within(body, Vec2::new(self.dir, 0.0), &lane(&band, &ctx.field)).x;
    }

    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        self.clock.fire_if_ready(body, ctx, out);
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        self.clock.duration.is_finished(now_ms)
    }

    fn suspend(&mut self, now_ms: u64) {
        self.clock.suspend(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.clock.resume(now_ms);
    }
}

#[derive(Debug, Clone)]
pub struct DiagonalMover {
    dir: Vec2,
    clock: MoverClock,
}

impl DiagonalMover {
    pub fn new(now_ms: u64) -> Self {
        Self {
            dir: Vec2::new(1.0, 1.0).normalize(),
            clock: MoverClock::new(MOVER_DURATION_MS, MOVER_SHOT_MS, now_ms),
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.dir
    }
}

impl Pattern for DiagonalMover {
    fn update_movement(&mut self, body: &mut Aabb, ctx: &mut PatternContext<'_>) {
        let band = ctx.band();
        if return_to_band(body, &band) {
            body.x += self.dir.x * BOSS_MOVE_SPEED;
            let dir = reflect_within(body, self.dir, &lane(&band, &ctx.field));
            self.dir.x = dir.x;
            return;
        }
        body.translate(self.dir * BOSS_MOVE_SPEED);
        self.dir = reflect_within(body, self.dir, &band);
    }

    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        self.clock.fire_if_ready(body, ctx, out);
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        self.clock.duration.is_finished(now_ms)
    }

    fn suspend(&mut self, now_ms: u64) {
        self.clock.suspend(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.clock.resume(now_ms);
    }
}

/// Horizontal sweep with a sinusoidal vertical wobble around an anchor
/// height. The wobble begins once the body has settled on the anchor.
#[derive(Debug, Clone)]
pub struct ZigzagMover {
    dir: f32,
    anchor_y: f32,
    /// Clock reading when the body settled on the anchor.
    settled_at: Option<u64>,
    clock: MoverClock,
}

impl ZigzagMover {
    pub fn new(body: &Aabb, band: &Aabb, now_ms: u64) -> Self {
        let low = band.top() + ZIGZAG_AMPLITUDE;
        let high = (band.bottom() - body.h - ZIGZAG_AMPLITUDE).max(low);
        Self {
            dir: 1.0,
            anchor_y: body.y.clamp(low, high),
            settled_at: None,
            clock: MoverClock::new(ZIGZAG_DURATION_MS, ZIGZAG_SHOT_MS, now_ms),
        }
    }
}

impl Pattern for ZigzagMover {
    fn update_movement(&mut self, body: &mut Aabb, ctx: &mut PatternContext<'_>) {
        let band = ctx.band();
        let elapsed = self.clock.duration.elapsed_ms(ctx.now_ms);
        body.x += self.dir * BOSS_MOVE_SPEED;
        match self.settled_at {
            Some(settled) => {
                let wobble = elapsed.saturating_sub(settled) as f32;
                body.y = self.anchor_y + ZIGZAG_AMPLITUDE * (TAU * wobble / ZIGZAG_PERIOD_MS).sin();
            }
            None => {
                let dy = self.anchor_y - body.y;
                if dy.abs() <= BOSS_MOVE_SPEED {
                    body.y = self.anchor_y;
                    self.settled_at = Some(elapsed);
                } else {
                    body.y += dy.signum() * BOSS_MOVE_SPEED;
                }
            }
        }
        self.dir = reflect_within(body, Vec2::new(self.dir, 0.0), &lane(&band, &ctx.field)).x;
    }

    fn attack(&mut self, body: &Aabb, ctx: &mut PatternContext<'_>, out: &mut Vec<PatternOutput>) {
        self.clock.fire_if_ready(body, ctx, out);
    }

    fn is_complete(&self, now_ms: u64) -> bool {
        self.clock.duration.is_finished(now_ms)
    }

    fn suspend(&mut self, now_ms: u64) {
        self.clock.suspend(now_ms);
    }

    fn resume(&mut self, now_ms: u64) {
        self.clock.resume(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_to_band_glides() {
        let band = Aabb::new(0.0, 0.0, 800.0, 270.0);
        let mut body = Aabb::new(300.0, 500.0, 100.0, 60.0);
        let mut steps = 0;
        while return_to_band(&mut body, &band) {
            steps += 1;
            assert!(steps < 1_000);
        }
        assert!(steps > 1);
        assert!((body.bottom() - band.bottom()).abs() < 1e-4);
    }
}
