use core::fmt;
use std::fmt::Debug;
use std::ops::Range;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use downcast_rs::{impl_downcast, DowncastSync};
use quotient_cover_derive::WithStateSpaceData;

use super::param::ParamSet;
use super::state::State;
use super::state_sampler::{CompoundStateSampler, StateSampler};

pub trait HasStateSpaceData {
    fn state_space_data(&self) -> &StateSpaceCommonData;
    fn state_space_data_mut(&mut self) -> &mut StateSpaceCommonData;
}

/// A space of states stored as flat real vectors. Spaces are shared between planners
/// and samplers, so every method takes `&self`; states are passed as slices.
pub trait StateSpace: HasStateSpaceData + DowncastSync + Debug {
    fn is_compound(&self) -> bool {
        false
    }

    fn as_compound_ref(&self) -> Option<&CompoundStateSpace> {
        None
    }

    fn get_name(&self) -> &str {
        &self.state_space_data().name
    }

    fn set_name(&mut self, name: String) {
        self.state_space_data_mut().name = name;
    }

    fn params(&self) -> &ParamSet {
        &self.state_space_data().params
    }

    fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.state_space_data_mut().params
    }

    fn get_longest_valid_segment_fraction(&self) -> f64 {
        self.state_space_data().longest_valid_segment_fraction
    }

    fn set_longest_valid_segment_fraction(&mut self, segment_fraction: f64) {
        if segment_fraction > f64::EPSILON && segment_fraction <= 1.0 {
            self.state_space_data_mut().longest_valid_segment_fraction = segment_fraction;
        }
    }

    fn get_longest_valid_segment_length(&self) -> f64 {
        self.get_longest_valid_segment_fraction() * self.get_maximum_extent()
    }

    /// Number of segments a motion from `state1` to `state2` is split into when it is
    /// checked for validity.
    fn valid_segment_count(&self, state1: &[f64], state2: &[f64]) -> u32 {
        let longest = self.get_longest_valid_segment_length();
        let factor = self.get_valid_segment_count_factor();
        if longest <= 0.0 || !longest.is_finite() {
            return factor;
        }
        factor * ((self.distance(state1, state2) / longest).ceil() as u32).max(1)
    }

    fn set_valid_segment_count_factor(&mut self, factor: u32) {
        if factor >= 1 {
            self.state_space_data_mut().longest_valid_segment_count_factor = factor;
        }
    }

    fn get_valid_segment_count_factor(&self) -> u32 {
        self.state_space_data().longest_valid_segment_count_factor
    }

    fn get_dimension(&self) -> usize;
    fn get_maximum_extent(&self) -> f64;
    fn get_measure(&self) -> f64;
    fn enforce_bounds(&self, state: &mut [f64]);
    fn satisfies_bounds(&self, state: &[f64]) -> bool;
    fn distance(&self, state1: &[f64], state2: &[f64]) -> f64;
    fn equal_states(&self, state1: &[f64], state2: &[f64]) -> bool;
    fn interpolate(&self, from: &[f64], to: &[f64], t: f64, state: &mut [f64]);
    fn alloc_default_state_sampler(&self) -> Box<dyn StateSampler>;

    fn alloc_state(&self) -> State {
        State::zeros(self.get_dimension())
    }

    fn copy_state(&self, destination: &mut [f64], source: &[f64]) {
        destination.copy_from_slice(source);
    }

    fn print_state(&self, state: &[f64]) -> String {
        format!("{} {:?}", self.get_name(), state)
    }
}
impl_downcast!(sync StateSpace);

pub struct StateSpaceCommonData {
    pub name: String,
    pub longest_valid_segment_fraction: f64,
    pub longest_valid_segment_count_factor: u32,
    pub params: ParamSet,
}

impl fmt::Debug for StateSpaceCommonData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSpaceCommonData")
            .field("name", &self.name)
            .field(
                "longest_valid_segment_fraction",
                &self.longest_valid_segment_fraction,
            )
            .field(
                "longest_valid_segment_count_factor",
                &self.longest_valid_segment_count_factor,
            )
            .field("params", &self.params)
            .finish()
    }
}

impl StateSpaceCommonData {
    pub fn new(name: String) -> Self {
        Self {
            name,
            longest_valid_segment_fraction: 0.01, // 1 %
            longest_valid_segment_count_factor: 1,
            params: ParamSet::default(),
        }
    }
}

lazy_static::lazy_static! {
    static ref ALLOCATED_SPACES: AtomicU16 = 0.into();
}

impl Default for StateSpaceCommonData {
    fn default() -> Self {
        // default name to Space + number
        Self::new(format!(
            "Space{}",
            ALLOCATED_SPACES.fetch_add(1, Ordering::Relaxed)
        ))
    }
}

#[derive(WithStateSpaceData)]
pub struct CompoundStateSpace {
    state_space_data: StateSpaceCommonData,
    components: Vec<Arc<dyn StateSpace>>,
    weights: Vec<f64>,
    offsets: Vec<usize>,
    locked: bool,
}

impl fmt::Debug for CompoundStateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundStateSpace")
            .field("state_space_data", &self.state_space_data)
            .field("components", &self.components)
            .field("weights", &self.weights)
            .field("locked", &self.locked)
            .finish()
    }
}

impl Default for CompoundStateSpace {
    fn default() -> Self {
        Self {
            state_space_data: StateSpaceCommonData::default(),
            components: Vec::new(),
            weights: Vec::new(),
            offsets: vec![0],
            locked: false,
        }
    }
}

impl CompoundStateSpace {
    pub fn from_components(
        components: Vec<Arc<dyn StateSpace>>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        if components.len() != weights.len() {
            return Err(anyhow!(
                "The number of components and weights must be equal"
            ));
        }

        let mut space = Self::default();
        for (component, weight) in components.into_iter().zip(weights) {
            space.add_subspace(component, weight)?;
        }
        Ok(space)
    }

    pub fn add_subspace(&mut self, component: Arc<dyn StateSpace>, weight: f64) -> Result<()> {
        if self.locked {
            return Err(anyhow!(
                "This state space is locked. No further components can be added"
            ));
        }
        if weight < 0.0 {
            return Err(anyhow!("Subspace weight cannot be negative"));
        }
        let end = self.get_dimension() + component.get_dimension();
        self.offsets.push(end);
        self.components.push(component);
        self.weights.push(weight);
        Ok(())
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn get_subspace_count(&self) -> usize {
        self.components.len()
    }

    pub fn get_subspace(&self, index: usize) -> &Arc<dyn StateSpace> {
        &self.components[index]
    }

    pub fn get_subspace_weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    /// Range of the flat state occupied by the component at `index`.
    pub fn component_range(&self, index: usize) -> Range<usize> {
        self.offsets[index]..self.offsets[index + 1]
    }

    fn iter_components(&self) -> impl Iterator<Item = (&Arc<dyn StateSpace>, f64, Range<usize>)> {
        self.components
            .iter()
            .zip(&self.weights)
            .enumerate()
            .map(|(i, (component, &weight))| (component, weight, self.component_range(i)))
    }
}

impl StateSpace for CompoundStateSpace {
    fn is_compound(&self) -> bool {
        true
    }

    fn as_compound_ref(&self) -> Option<&CompoundStateSpace> {
        Some(self)
    }

    fn get_dimension(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    fn get_maximum_extent(&self) -> f64 {
        self.components
            .iter()
            .zip(&self.weights)
            .map(|(c, &w)| w * c.get_maximum_extent())
            .sum()
    }

    fn get_measure(&self) -> f64 {
        self.components
            .iter()
            .zip(&self.weights)
            .map(|(c, &w)| w * c.get_measure())
            .product()
    }

    fn enforce_bounds(&self, state: &mut [f64]) {
        for (component, _, range) in self.iter_components() {
            component.enforce_bounds(&mut state[range]);
        }
    }

    fn satisfies_bounds(&self, state: &[f64]) -> bool {
        self.iter_components()
            .all(|(component, _, range)| component.satisfies_bounds(&state[range]))
    }

    fn distance(&self, state1: &[f64], state2: &[f64]) -> f64 {
        self.iter_components()
            .map(|(component, weight, range)| {
                weight * component.distance(&state1[range.clone()], &state2[range])
            })
            .sum()
    }

    fn equal_states(&self, state1: &[f64], state2: &[f64]) -> bool {
        self.iter_components().all(|(component, _, range)| {
            component.equal_states(&state1[range.clone()], &state2[range])
        })
    }

    fn interpolate(&self, from: &[f64], to: &[f64], t: f64, state: &mut [f64]) {
        for (component, _, range) in self.iter_components() {
            component.interpolate(
                &from[range.clone()],
                &to[range.clone()],
                t,
                &mut state[range],
            );
        }
    }

    fn alloc_default_state_sampler(&self) -> Box<dyn StateSampler> {
        let mut sampler = CompoundStateSampler::new();
        for (component, weight, range) in self.iter_components() {
            sampler.add_sampler(component.alloc_default_state_sampler(), weight, range);
        }
        Box::new(sampler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::base::spaces::so2_state_space::SO2StateSpace;
    use std::f64::consts::PI;

    fn se2() -> CompoundStateSpace {
        let r2: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::with_bounds(&[-1.0, -1.0], &[1.0, 1.0]));
        let so2: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
        CompoundStateSpace::from_components(vec![r2, so2], vec![1.0, 0.5]).unwrap()
    }

    #[test]
    fn test_weighted_distance() {
        let space = se2();
        assert_eq!(space.get_dimension(), 3);
        let d = space.distance(&[0.0, 0.0, 0.0], &[0.3, 0.4, PI / 2.0]);
        assert!((d - (0.5 + 0.5 * PI / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_components() {
        let space = se2();
        let mut out = space.alloc_state();
        space.interpolate(&[0.0, 0.0, 0.0], &[1.0, -1.0, 1.0], 0.5, &mut out);
        assert!((out[0] - 0.5).abs() < 1e-12);
        assert!((out[1] + 0.5).abs() < 1e-12);
        assert!((out[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_locked_and_negative_weight() {
        let mut space = se2();
        let r1: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::with_bounds(&[0.0], &[1.0]));
        assert!(space.add_subspace(r1.clone(), -1.0).is_err());
        space.lock();
        assert!(space.add_subspace(r1, 1.0).is_err());
        assert!(space.is_locked());
        assert_eq!(space.component_range(1), 2..3);
    }

    #[test]
    fn test_mismatched_weights() {
        let r1: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::with_bounds(&[0.0], &[1.0]));
        assert!(CompoundStateSpace::from_components(vec![r1], vec![]).is_err());
    }
}
