//! Look-ahead pursuit along a straight line or a cubic Bezier path.
//!
//! Members alternate between a left-entry path and its mirror image. Each
//! member walks its own parameter `t` forward until the path point is at
//! least the look-ahead distance away, then moves toward that point at
//! constant speed. Entries on the same side are staggered. A member that
//! reaches the end of its path parks off-screen; once every member has
//! parked, a new pass begins.

use glam::Vec2;

use barrage_core::constants::*;
use barrage_core::enums::MovementKind;
use barrage_core::geometry::{direction_to, Aabb};

use super::path::Path;
use super::strategy::MoveContext;
use super::{Column, EnemyShip};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathShape {
    Line,
    Bezier,
}

#[derive(Debug, Clone)]
pub struct Pursuit {
    shape: PathShape,
    /// Left-entry path and its mirror.
    paths: [Path; 2],
    passes: u32,
}

/// Advance `t` until `path(t)` is at least `look_ahead` from `from`, or the
/// end of the path is reached.
pub fn look_ahead(path: &Path, t: f32, from: Vec2, look_ahead: f32) -> f32 {
    let mut t = t.clamp(0.0, 1.0);
    while t < 1.0 && path.point(t).distance(from) < look_ahead {
        t = (t + PURSUIT_T_STEP).min(1.0);
    }
    t
}

impl Pursuit {
    pub fn line() -> Self {
        Self::with_shape(PathShape::Line)
    }

    pub fn bezier() -> Self {
        Self::with_shape(PathShape::Bezier)
    }

    fn with_shape(shape: PathShape) -> Self {
        let placeholder = Path::Line {
            from: Vec2::ZERO,
            to: Vec2::ZERO,
        };
        Self {
            shape,
            paths: [placeholder; 2],
            passes: 0,
        }
    }

    pub fn kind(&self) -> MovementKind {
        match self.shape {
            PathShape::Line => MovementKind::PursuitLine,
            PathShape::Bezier => MovementKind::PursuitBezier,
        }
    }

    /// Completed passes.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn path(&self, mirrored: bool) -> &Path {
        &self.paths[usize::from(mirrored)]
    }

    fn left_path(&self, field: &Aabb) -> Path {
        let (l, t, w, h) = (field.left(), field.top(), field.w, field.h);
        match self.shape {
            PathShape::Line => Path::Line {
                from: Vec2::new(l - PURSUIT_ENTRY_MARGIN, t + h * 0.15),
                to: Vec2::new(l + w * 0.85, t + h * 0.55),
            },
            PathShape::Bezier => Path::Bezier {
                p0: Vec2::new(l - PURSUIT_ENTRY_MARGIN, t + h * 0.1),
                p1: Vec2::new(l + w * 0.9, t + h * 0.05),
                p2: Vec2::new(l + w * 0.9, t + h * 0.6),
                p3: Vec2::new(l + w * 0.15, t + h * 0.5),
            },
        }
    }

    /// Build both paths for `field` and line members up at their entries.
    pub fn attach(&mut self, columns: &mut [Column], field: &Aabb) {
        let left = self.left_path(field);
        self.paths = [left, left.mirrored(field.center().x)];
        self.restart(columns);
    }

    fn restart(&mut self, columns: &mut [Column]) {
        let members = columns.iter_mut().flat_map(|c| c.ships.iter_mut());
        for (i, ship) in members.enumerate() {
            let mirrored = i % 2 == 1;
            let order = (i / 2) as u32;
            ship.motion.mirrored = mirrored;
            ship.motion.t = 0.0;
            ship.motion.finished = false;
            ship.motion.delay_ticks = order * PURSUIT_STAGGER_TICKS;
            ship.bounds.set_center(self.paths[usize::from(mirrored)].start());
        }
    }

    fn park(ship: &mut EnemyShip, field: &Aabb) {
        ship.motion.finished = true;
        ship.bounds.y = field.top() - ship.bounds.h - PARK_MARGIN;
    }

    pub fn update(&mut self, columns: &mut [Column], ctx: &MoveContext) {
        let base_step = ctx.speed * SMOOTH_SPEED_FACTOR;

        for ship in columns.iter_mut().flat_map(|c| c.ships.iter_mut()) {
            if ship.motion.finished {
                continue;
            }
            if ship.motion.delay_ticks > 0 {
                ship.motion.delay_ticks -= 1;
                continue;
            }

            let path = self.paths[usize::from(ship.motion.mirrored)];
            let pos = ship.bounds.center();
            let t = look_ahead(&path, ship.motion.t, pos, PURSUIT_LOOK_AHEAD);
            ship.motion.t = t;

            let target = path.point(t);
            let distance = pos.distance(target);
            let step = if distance > PURSUIT_BOOST_RANGE {
                base_step * PURSUIT_BOOST_FACTOR
            } else {
                base_step
            };
            if let Some(dir) = direction_to(pos, target) {
                ship.bounds.translate(dir * step.min(distance));
            }

            if t >= 1.0 && ship.bounds.center().distance(path.end()) <= PURSUIT_FINISH_DISTANCE {
                Self::park(ship, &ctx.field);
            }
        }

        let all_finished = columns
            .iter()
            .flat_map(|c| c.ships.iter())
            .all(|s| s.motion.finished);
        if all_finished {
            self.passes += 1;
            tracing::debug!(passes = self.passes, "pursuit pass complete");
            self.restart(columns);
        }
    }
}
