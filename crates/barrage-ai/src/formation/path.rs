//! Parametric paths for pursuit movement.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Path {
    Line { from: Vec2, to: Vec2 },
    /// Cubic Bezier curve.
    Bezier { p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2 },
}

impl Path {
    /// Point at parameter `t`, clamped to `[0, 1]`.
    pub fn point(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Path::Line { from, to } => from.lerp(to, t),
            Path::Bezier { p0, p1, p2, p3 } => {
                let u = 1.0 - t;
                p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
            }
        }
    }

    pub fn start(&self) -> Vec2 {
        self.point(0.0)
    }

    pub fn end(&self) -> Vec2 {
        self.point(1.0)
    }

    /// Mirror image across the vertical line `x = axis_x`.
    pub fn mirrored(&self, axis_x: f32) -> Path {
        let flip = |p: Vec2| Vec2::new(2.0 * axis_x - p.x, p.y);
        match *self {
            Path::Line { from, to } => Path::Line {
                from: flip(from),
                to: flip(to),
            },
            Path::Bezier { p0, p1, p2, p3 } => Path::Bezier {
                p0: flip(p0),
                p1: flip(p1),
                p2: flip(p2),
                p3: flip(p3),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_endpoints() {
        let path = Path::Bezier {
            p0: Vec2::new(0.0, 0.0),
            p1: Vec2::new(50.0, 100.0),
            p2: Vec2::new(100.0, 100.0),
            p3: Vec2::new(150.0, 0.0),
        };
        assert_eq!(path.start(), Vec2::new(0.0, 0.0));
        assert!((path.end() - Vec2::new(150.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_mirror_keeps_y() {
        let path = Path::Line {
            from: Vec2::new(10.0, 5.0),
            to: Vec2::new(30.0, 50.0),
        };
        let m = path.mirrored(100.0);
        assert_eq!(m.start(), Vec2::new(190.0, 5.0));
        assert_eq!(m.end(), Vec2::new(170.0, 50.0));
    }
}
