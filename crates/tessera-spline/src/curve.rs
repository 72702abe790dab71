//! Curve abstraction and a polyline implementation.

use glam::Vec3;

/// Read-only view of a world-space path.
pub trait Curve {
    /// Total arc length in world units.
    fn length(&self) -> f32;

    /// World position at normalized parameter `t`, clamped to `[0, 1]`.
    /// `t` is proportional to arc length: `t = 0.5` is the halfway point of
    /// the path, not of its control points.
    fn position_at(&self, t: f32) -> Vec3;
}

/// A piecewise-linear curve through a sequence of world points.
///
/// Arc length is exact (sum of segment lengths), and `position_at`
/// interpolates linearly inside segments, so parameter spacing is uniform in
/// distance along the path.
#[derive(Clone, Debug)]
pub struct Polyline {
    points: Vec<Vec3>,
    /// `cumulative[i]` is the path distance from the start to `points[i]`.
    cumulative: Vec<f32>,
}

impl Polyline {
    /// Builds a polyline from at least one point. A single point yields a
    /// zero-length curve anchored at that point.
    pub fn new(points: Vec<Vec3>) -> Self {
        assert!(!points.is_empty(), "a polyline needs at least one point");
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    /// The control points.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

impl Curve for Polyline {
    fn length(&self) -> f32 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    fn position_at(&self, t: f32) -> Vec3 {
        let target = t.clamp(0.0, 1.0) * self.length();
        // Index of the first point at or past the target distance.
        let idx = self.cumulative.partition_point(|&d| d < target);
        if idx == 0 {
            return self.points[0];
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let seg_start = self.cumulative[idx - 1];
        let seg_len = self.cumulative[idx] - seg_start;
        if seg_len <= f32::EPSILON {
            return self.points[idx];
        }
        let frac = (target - seg_start) / seg_len;
        self.points[idx - 1].lerp(self.points[idx], frac)
    }
}
