use std::fmt;
use std::ops::{Deref, DerefMut};

use nalgebra::DVector;

/// A point of a state space, stored as a flat vector of reals. Compound spaces lay their
/// components out one after the other.
#[derive(Clone, PartialEq)]
pub struct State {
    pub values: DVector<f64>,
}

impl State {
    pub fn zeros(dimension: usize) -> Self {
        Self {
            values: DVector::zeros(dimension),
        }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            values: DVector::from_column_slice(values),
        }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Concatenate `first` and `second`.
    pub fn concat(first: &[f64], second: &[f64]) -> Self {
        Self {
            values: DVector::from_iterator(
                first.len() + second.len(),
                first.iter().chain(second).copied(),
            ),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::zeros(0)
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        Self {
            values: DVector::from_vec(values),
        }
    }
}

impl Deref for State {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.values.as_slice()
    }
}

impl DerefMut for State {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.values.as_mut_slice()
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}
