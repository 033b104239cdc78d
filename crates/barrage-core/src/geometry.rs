//! Collision geometry: axis-aligned boxes, laser segments and radius checks.
//!
//! All functions are pure and allocation-free; they sit on the per-tick
//! hot path of the collision pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Squared length below which a direction is treated as degenerate.
const DEGENERATE_LEN_SQ: f32 = 1e-6;

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// A line segment between two points (laser beams, dash paths).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.w * 0.5, self.h * 0.5)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w * 0.5;
        self.y = center.y - self.h * 0.5;
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// True if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Aabb) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Aabb::new(left, top, right - left, bottom - top)
    }

    /// Move the rectangle back inside `bounds` (no-op if it already fits).
    pub fn clamp_within(&mut self, bounds: &Aabb) {
        self.x = self.x.clamp(bounds.left(), (bounds.right() - self.w).max(bounds.left()));
        self.y = self.y.clamp(bounds.top(), (bounds.bottom() - self.h).max(bounds.top()));
    }

    /// The four edges, clockwise from the top edge.
    pub fn edges(&self) -> [Segment; 4] {
        let tl = Vec2::new(self.left(), self.top());
        let tr = Vec2::new(self.right(), self.top());
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.left(), self.bottom());
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    /// Angle of the segment in screen space (radians).
    pub fn angle(&self) -> f32 {
        let d = self.b - self.a;
        d.y.atan2(d.x)
    }
}

/// Two rectangles collide iff the distance between their centers on each
/// axis is strictly less than the sum of their half-extents on that axis.
/// Exactly touching edges do not collide.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    let ca = a.center();
    let cb = b.center();
    let ha = a.half_extents();
    let hb = b.half_extents();
    (ca.x - cb.x).abs() < ha.x + hb.x && (ca.y - cb.y).abs() < ha.y + hb.y
}

/// Twice the signed area of triangle (a, b, c).
fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Standard orientation-based segment intersection, including collinear overlap.
pub fn segments_intersect(s: &Segment, t: &Segment) -> bool {
    let d1 = cross(t.a, t.b, s.a);
    let d2 = cross(t.a, t.b, s.b);
    let d3 = cross(s.a, s.b, t.a);
    let d4 = cross(s.a, s.b, t.b);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(t.a, t.b, s.a))
        || (d2 == 0.0 && on_segment(t.a, t.b, s.b))
        || (d3 == 0.0 && on_segment(s.a, s.b, t.a))
        || (d4 == 0.0 && on_segment(s.a, s.b, t.b))
}

/// A laser segment hits a rectangle if either endpoint lies inside it or the
/// segment crosses any of its four edges.
pub fn segment_intersects_rect(segment: &Segment, rect: &Aabb) -> bool {
    if rect.contains_point(segment.a) || rect.contains_point(segment.b) {
        return true;
    }
    rect.edges()
        .iter()
        .any(|edge| segments_intersect(segment, edge))
}

/// Radius containment using squared distances (no square root).
pub fn within_radius(center: Vec2, point: Vec2, radius: f32) -> bool {
    center.distance_squared(point) <= radius * radius
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide.
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let len_sq = delta.length_squared();
    if len_sq < DEGENERATE_LEN_SQ {
        return None;
    }
    Some(delta / len_sq.sqrt())
}

/// True once `rect` has fully left `field` by more than `margin` on any side.
pub fn is_off_screen(rect: &Aabb, field: &Aabb, margin: f32) -> bool {
    rect.right() < field.left() - margin
        || rect.left() > field.right() + margin
        || rect.bottom() < field.top() - margin
        || rect.top() > field.bottom() + margin
}

/// Distance along `dir` from `origin` to the boundary of `bounds`.
/// `origin` is expected to lie inside `bounds`; `dir` must be non-zero.
pub fn ray_to_boundary(origin: Vec2, dir: Vec2, bounds: &Aabb) -> f32 {
    let tx = if dir.x > 0.0 {
        (bounds.right() - origin.x) / dir.x
    } else if dir.x < 0.0 {
        (bounds.left() - origin.x) / dir.x
    } else {
        f32::INFINITY
    };
    let ty = if dir.y > 0.0 {
        (bounds.bottom() - origin.y) / dir.y
    } else if dir.y < 0.0 {
        (bounds.top() - origin.y) / dir.y
    } else {
        f32::INFINITY
    };
    tx.min(ty).max(0.0)
}

/// Flip each component of `dir` independently when `rect` touches the
/// matching side of `bounds` while heading toward it, then pull the rect
/// back inside. Returns the new direction.
pub fn reflect_within(rect: &mut Aabb, dir: Vec2, bounds: &Aabb) -> Vec2 {
    let mut dir = dir;
    if (rect.left() <= bounds.left() && dir.x < 0.0)
        || (rect.right() >= bounds.right() && dir.x > 0.0)
    {
        dir.x = -dir.x;
    }
    if (rect.top() <= bounds.top() && dir.y < 0.0)
        || (rect.bottom() >= bounds.bottom() && dir.y > 0.0)
    {
        dir.y = -dir.y;
    }
    rect.clamp_within(bounds);
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &b));
        let c = Aabb::new(9.9, 0.0, 10.0, 10.0);
        assert!(aabb_overlap(&a, &c));
    }

    #[test]
    fn test_overlap_symmetric() {
        let rects = [
            Aabb::new(0.0, 0.0, 10.0, 10.0),
            Aabb::new(5.0, 5.0, 3.0, 30.0),
            Aabb::new(-4.0, 9.0, 4.0, 4.0),
            Aabb::new(100.0, 100.0, 1.0, 1.0),
            Aabb::new(2.0, -20.0, 2.0, 21.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(aabb_overlap(a, b), aabb_overlap(b, a));
            }
        }
    }

    #[test]
    fn test_segment_crossing_rect() {
        let rect = Aabb::new(10.0, 10.0, 10.0, 10.0);
        let through = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(30.0, 30.0));
        assert!(segment_intersects_rect(&through, &rect));
        let miss = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(30.0, 0.0));
        assert!(!segment_intersects_rect(&miss, &rect));
        let inside = Segment::new(Vec2::new(12.0, 12.0), Vec2::new(13.0, 13.0));
        assert!(segment_intersects_rect(&inside, &rect));
    }

    #[test]
    fn test_within_radius() {
        let c = Vec2::new(0.0, 0.0);
        assert!(within_radius(c, Vec2::new(3.0, 4.0), 5.0));
        assert!(!within_radius(c, Vec2::new(3.0, 4.1), 5.0));
    }

    #[test]
    fn test_direction_to_degenerate() {
        let p = Vec2::new(4.0, 4.0);
        assert!(direction_to(p, p).is_none());
        let d = direction_to(p, Vec2::new(4.0, 10.0)).unwrap();
        assert!((d - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_ray_to_boundary() {
        let bounds = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let d = ray_to_boundary(Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0), &bounds);
        assert!((d - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_reflect_axes_independently() {
        let bounds = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let mut rect = Aabb::new(95.0, 40.0, 10.0, 10.0);
        let dir = reflect_within(&mut rect, Vec2::new(1.0, 1.0), &bounds);
        assert_eq!(dir, Vec2::new(-1.0, 1.0));
        assert!(rect.right() <= bounds.right());

        let mut corner = Aabb::new(-2.0, -2.0, 10.0, 10.0);
        let dir = reflect_within(&mut corner, Vec2::new(-1.0, -1.0), &bounds);
        assert_eq!(dir, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_reflect_ignores_departing_edge() {
        let bounds = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let mut rect = Aabb::new(0.0, 50.0, 10.0, 10.0);
        let dir = reflect_within(&mut rect, Vec2::new(1.0, -1.0), &bounds);
        assert_eq!(dir, Vec2::new(1.0, -1.0));
    }
}
