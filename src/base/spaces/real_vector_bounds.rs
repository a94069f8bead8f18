#[derive(Debug, Clone, PartialEq)]
pub struct RealVectorBounds {
    pub(crate) low: Vec<f64>,
    pub(crate) high: Vec<f64>,
}

impl RealVectorBounds {
    /// Constructor; `dim` represents the dimension of the space these bounds are for.
    pub fn new(dim: usize) -> Self {
        RealVectorBounds {
            low: vec![0.0; dim],
            high: vec![0.0; dim],
        }
    }

    pub fn from_low_high(low: &[f64], high: &[f64]) -> Self {
        RealVectorBounds {
            low: low.to_vec(),
            high: high.to_vec(),
        }
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn dimension(&self) -> usize {
        self.low.len()
    }

    /// Change the number of dimensions for the bounds
    pub fn resize(&mut self, size: usize) {
        self.low.resize(size, 0.0);
        self.high.resize(size, 0.0);
    }

    /// Keep only the dimensions in `range`.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        RealVectorBounds {
            low: self.low[range.clone()].to_vec(),
            high: self.high[range].to_vec(),
        }
    }

    /// Compute the volume of the space enclosed by the bounds
    pub fn get_volume(&self) -> f64 {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(l, h)| h - l)
            .product()
    }

    /// Check if the bounds are valid (same length for low and high, high[i] > low[i])
    pub fn check(&self) -> bool {
        self.low.len() == self.high.len()
            && self.low.iter().zip(&self.high).all(|(low, high)| high > low)
    }
}
