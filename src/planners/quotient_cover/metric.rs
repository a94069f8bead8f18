//! Distances on a cover. With a parent level, the distance between two configurations
//! follows the parent cover path between their cosets, lifted into this level.

use itertools::Itertools;

use crate::base::state::State;
use crate::error::{PlannerError, Result};
use crate::planners::level_planner::LevelPlanner;

use super::{parent_cover as parent_cover_of, Configuration, ParentCover, QuotientCover};

impl QuotientCover {
    pub fn distance_q1(&self, a: &Configuration, b: &Configuration) -> f64 {
        self.quotient.get_q1().distance(&a.state, &b.state)
    }

    /// Distance of the fiber components. Without a fiber, the full distance.
    pub fn distance_x1(&self, a: &Configuration, b: &Configuration) -> f64 {
        match self.quotient.get_x1() {
            None => self.distance_q1(a, b),
            Some(x1) => {
                let dimension = self.quotient.x1_dimension();
                let mut xa = State::zeros(dimension);
                let mut xb = State::zeros(dimension);
                self.quotient.extract_x1_subspace(&a.state, &mut xa);
                self.quotient.extract_x1_subspace(&b.state, &mut xb);
                x1.distance(&xa, &xb)
            }
        }
    }

    /// Length of the interpolation path from `a` to `b` plus the fiber distance.
    pub fn distance(&self, a: &Configuration, b: &Configuration, parent: ParentCover) -> Result<f64> {
        if parent.is_none() || a.coset.is_none() || b.coset.is_none() {
            return Ok(self.distance_q1(a, b));
        }
        let si = self.quotient.get_q1();
        let along_path: f64 = self
            .interpolation_path(a, b, parent)?
            .iter()
            .tuple_windows()
            .map(|(s, t)| si.distance(s, t))
            .sum();
        Ok(along_path + self.distance_x1(a, b))
    }

    /// Distance from the state of `q` to the ball of `neighborhood`, zero inside.
    pub fn distance_configuration_neighborhood(
        &self,
        q: &Configuration,
        neighborhood: &Configuration,
        parent: ParentCover,
    ) -> Result<f64> {
        let d = self.distance(q, neighborhood, parent)?;
        Ok((d - neighborhood.radius).max(0.0))
    }

    /// Gap between the balls of `a` and `b`, zero if they overlap.
    pub fn distance_neighborhood_neighborhood(
        &self,
        a: &Configuration,
        b: &Configuration,
        parent: ParentCover,
    ) -> Result<f64> {
        let d = self.distance(a, b, parent)?;
        if d.is_nan() {
            fatal!(
                PlannerError::NaNDistance(a.index, b.index),
                "{}: distance between {:?} and {:?}",
                self.get_name(),
                a.state,
                b.state
            );
        }
        Ok((d - a.radius - b.radius).max(0.0))
    }

    /// States from `a` to `b` that follow the parent cover path between their cosets. The
    /// fiber components are interpolated by the fraction of parent path length covered.
    pub fn interpolation_path(&self, a: &Configuration, b: &Configuration, parent: ParentCover) -> Result<Vec<State>> {
        let direct = || vec![a.state.clone(), b.state.clone()];
        let ((parent_cover, grandparents), a_coset, b_coset) = match (parent, a.coset, b.coset) {
            (Some(parent), Some(a_coset), Some(b_coset)) => (parent, a_coset, b_coset),
            _ => return Ok(direct()),
        };
        let cover_path = parent_cover.get_cover_path(a_coset, b_coset)?;
        if cover_path.len() <= 2 {
            return Ok(direct());
        }
        let interior = &cover_path[1..cover_path.len() - 1];

        let q0_dimension = self.quotient.q0_dimension();
        let project = |q: &Configuration| {
            let mut projected = State::zeros(q0_dimension);
            self.quotient.extract_q0_subspace(&q.state, &mut projected);
            Configuration::new(projected)
        };
        let mut stops = Vec::with_capacity(interior.len() + 2);
        stops.push(project(a));
        for id in interior {
            stops.push(parent_cover.get(*id)?.clone());
        }
        stops.push(project(b));

        let grandparent = parent_cover_of(parent_cover.get_name(), grandparents)?;
        let mut segments = Vec::with_capacity(stops.len() - 1);
        for (s, t) in stops.iter().tuple_windows() {
            segments.push(parent_cover.distance(s, t, grandparent)?);
        }
        let total: f64 = segments.iter().sum();

        let x1_dimension = self.quotient.x1_dimension();
        let mut xa = State::zeros(x1_dimension);
        let mut xb = State::zeros(x1_dimension);
        self.quotient.extract_x1_subspace(&a.state, &mut xa);
        self.quotient.extract_x1_subspace(&b.state, &mut xb);
        let x1_interpolate = |t: f64, out: &mut [f64]| match self.quotient.get_x1() {
            Some(x1) => x1.interpolate(&xa, &xb, t, out),
            None => out.copy_from_slice(&xa),
        };

        let mut path = Vec::with_capacity(interior.len() + 2);
        path.push(a.state.clone());
        let mut travelled = 0.0;
        for (k, id) in interior.iter().enumerate() {
            travelled += segments[k];
            let fraction = if total > 0.0 { travelled / total } else { 0.0 };
            let mut fiber = State::zeros(x1_dimension);
            x1_interpolate(fraction, &mut fiber);
            let mut lifted = self.quotient.get_q1().alloc_state();
            self.quotient
                .merge_states(&parent_cover.get(*id)?.state, &fiber, &mut lifted);
            path.push(lifted);
        }
        path.push(b.state.clone());
        Ok(path)
    }

    /// State at distance `step` from `from` along the interpolation path to `to`. Steps
    /// beyond the end of the path return `to`.
    pub fn interpolate_along_cover(
        &self,
        from: &Configuration,
        to: &Configuration,
        step: f64,
        parent: ParentCover,
    ) -> Result<State> {
        let si = self.quotient.get_q1();
        let path = self.interpolation_path(from, to, parent)?;
        let mut remaining = step;
        for (s, t) in path.iter().tuple_windows() {
            let d = si.distance(s, t);
            if remaining <= d {
                let mut out = si.alloc_state();
                let fraction = if d > 0.0 { remaining / d } else { 0.0 };
                si.interpolate(s, t, fraction, &mut out);
                return Ok(out);
            }
            remaining -= d;
        }
        Ok(to.state.clone())
    }
}
