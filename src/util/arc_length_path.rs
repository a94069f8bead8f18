use itertools::Itertools;

use crate::base::state::State;

/// Polyline through Euclidean points, parametrized by arc length.
#[derive(Debug, Clone)]
pub struct ArcLengthPath {
    points: Vec<State>,
    /// `cumulative[k]` is the length of the polyline up to `points[k]`.
    cumulative: Vec<f64>,
}

impl ArcLengthPath {
    /// `None` for an empty point list or points of different dimension.
    pub fn new(points: Vec<State>) -> Option<Self> {
        let dimension = points.first()?.dimension();
        if points.iter().any(|p| p.dimension() != dimension) {
            return None;
        }
        let mut cumulative = Vec::with_capacity(points.len());
        cumulative.push(0.0);
        let mut length = 0.0;
        for (a, b) in points.iter().tuple_windows() {
            length += (&b.values - &a.values).norm();
            cumulative.push(length);
        }
        Some(Self { points, cumulative })
    }

    pub fn points(&self) -> &[State] {
        &self.points
    }

    pub fn dimension(&self) -> usize {
        self.points[0].dimension()
    }

    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at arc length `s`, clamped to the ends of the path.
    pub fn point_at(&self, s: f64) -> State {
        let s = s.clamp(0.0, self.length());
        let segment = self.cumulative.partition_point(|&c| c <= s);
        if segment == 0 {
            return self.points[0].clone();
        }
        if segment >= self.points.len() {
            return self.points[self.points.len() - 1].clone();
        }
        let (a, b) = (&self.points[segment - 1], &self.points[segment]);
        let segment_length = self.cumulative[segment] - self.cumulative[segment - 1];
        let t = (s - self.cumulative[segment - 1]) / segment_length;
        State {
            values: &a.values + (&b.values - &a.values) * t,
        }
    }
}
