use std::collections::HashMap;

/// Handle of an element stored in a [`Pdf`]. Handles stay valid until the element is
/// removed and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdfElement(usize);

/// Discrete distribution over weighted elements.
///
/// Live elements are kept densely packed; removal moves the last element into the freed
/// place, so sampling only visits live elements.
#[derive(Debug, Clone)]
pub struct Pdf<T> {
    entries: Vec<(PdfElement, T, f64)>,
    positions: HashMap<PdfElement, usize>,
    next_handle: usize,
    total_weight: f64,
}

impl<T> Default for Pdf<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            next_handle: 0,
            total_weight: 0.0,
        }
    }
}

impl<T: Clone> Pdf<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative weights are clamped to zero.
    pub fn add(&mut self, data: T, weight: f64) -> PdfElement {
        let weight = weight.max(0.0);
        let element = PdfElement(self.next_handle);
        self.next_handle += 1;
        self.positions.insert(element, self.entries.len());
        self.entries.push((element, data, weight));
        self.total_weight += weight;
        element
    }

    pub fn update(&mut self, element: PdfElement, weight: f64) -> bool {
        let weight = weight.max(0.0);
        match self.positions.get(&element) {
            Some(&index) => {
                let w = &mut self.entries[index].2;
                self.total_weight += weight - *w;
                *w = weight;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, element: PdfElement) -> Option<T> {
        let index = self.positions.remove(&element)?;
        let (_, data, weight) = self.entries.swap_remove(index);
        if let Some((moved, _, _)) = self.entries.get(index) {
            self.positions.insert(*moved, index);
        }
        self.total_weight -= weight;
        if self.entries.is_empty() {
            self.total_weight = 0.0;
        }
        Some(data)
    }

    pub fn weight(&self, element: PdfElement) -> Option<f64> {
        self.positions.get(&element).map(|&index| self.entries[index].2)
    }

    /// Pick an element with probability proportional to its weight, `r` being a uniform
    /// draw from `[0, 1)`. Falls back to a uniform pick if all weights vanish.
    pub fn sample(&self, r: f64) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let r = r.clamp(0.0, 1.0);

        if !(self.total_weight > 0.0) || !self.total_weight.is_finite() {
            let index = ((r * self.entries.len() as f64) as usize).min(self.entries.len() - 1);
            return Some(self.entries[index].1.clone());
        }

        let target = r * self.total_weight;
        let mut accumulated = 0.0;
        let mut last = None;
        for (_, data, weight) in &self.entries {
            accumulated += weight;
            if *weight > 0.0 {
                last = Some(data);
            }
            if accumulated > target && *weight > 0.0 {
                return Some(data.clone());
            }
        }
        last.cloned()
    }

    /// Handles of removed or cleared elements stay invalid.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
        self.total_weight = 0.0;
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::RNG;

    #[test]
    fn test_weighted_sampling() {
        let mut pdf = Pdf::new();
        pdf.add('a', 1.0);
        let b = pdf.add('b', 3.0);
        assert_eq!(pdf.sample(0.1), Some('a'));
        assert_eq!(pdf.sample(0.5), Some('b'));

        let mut rng = RNG::with_seed(11);
        let draws = (0..4000).filter(|_| pdf.sample(rng.uniform01()) == Some('b')).count();
        assert!(draws > 2700 && draws < 3300);

        assert!(pdf.update(b, 0.0));
        assert_eq!(pdf.sample(0.99), Some('a'));
        assert_eq!(pdf.remove(b), Some('b'));
        assert_eq!(pdf.remove(b), None);
        assert_eq!(pdf.size(), 1);
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let mut pdf = Pdf::new();
        pdf.add(1, 0.0);
        pdf.add(2, 0.0);
        assert_eq!(pdf.sample(0.0), Some(1));
        assert_eq!(pdf.sample(0.9), Some(2));
        pdf.clear();
        assert_eq!(pdf.sample(0.5), None);
    }

    #[test]
    fn test_removal_keeps_storage_dense() {
        let mut pdf = Pdf::new();
        let mut kept = Vec::new();
        for round in 0..50 {
            let a = pdf.add(round, 1.0);
            let b = pdf.add(round + 1000, 2.0);
            assert_eq!(pdf.remove(a), Some(round));
            if round % 5 == 0 {
                kept.push(b);
            } else {
                assert_eq!(pdf.remove(b), Some(round + 1000));
                assert_eq!(pdf.weight(b), None);
                assert!(!pdf.update(b, 4.0));
            }
        }
        assert_eq!(pdf.size(), kept.len());
        assert_eq!(pdf.entries.len(), kept.len());
        assert_eq!(pdf.positions.len(), kept.len());
        assert!((pdf.total_weight() - 2.0 * kept.len() as f64).abs() < 1e-9);

        let mut rng = RNG::with_seed(3);
        for _ in 0..200 {
            let value = pdf.sample(rng.uniform01()).unwrap();
            assert!(value >= 1000 && (value - 1000) % 5 == 0);
        }
        for element in kept {
            assert_eq!(pdf.weight(element), Some(2.0));
        }
    }
}
