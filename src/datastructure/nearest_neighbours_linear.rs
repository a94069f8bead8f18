use crate::error::Result;

use super::nearest_neighbours::{DistanceToQuery, NearestNeighbors};

/// Brute force nearest neighbors. Every query evaluates the distance to all elements.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighborsLinear<T> {
    data: Vec<T>,
}

impl<T> NearestNeighborsLinear<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T: Clone + PartialEq> NearestNeighborsLinear<T> {
    fn sorted_by_distance(&self, distance: &mut DistanceToQuery<'_, T>) -> Result<Vec<(f64, &T)>> {
        let mut scored = Vec::with_capacity(self.data.len());
        for d in &self.data {
            scored.push((distance(d)?, d));
        }
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(scored)
    }
}

impl<T: Clone + PartialEq + Send + Sync> NearestNeighbors<T> for NearestNeighborsLinear<T> {
    fn add(&mut self, data: T) {
        self.data.push(data);
    }

    fn add_multiple(&mut self, data: Vec<T>) {
        self.data.extend(data);
    }

    fn remove(&mut self, data: &T) -> bool {
        match self.data.iter().rposition(|d| d == data) {
            Some(i) => {
                self.data.swap_remove(i);
                true
            }
            None => false,
        }
    }

    fn nearest(&self, distance: &mut DistanceToQuery<'_, T>) -> Result<Option<T>> {
        let mut best: Option<(f64, &T)> = None;
        for d in &self.data {
            let dist = distance(d)?;
            if best.map_or(true, |(b, _)| dist < b) {
                best = Some((dist, d));
            }
        }
        Ok(best.map(|(_, d)| d.clone()))
    }

    fn nearest_k(&self, distance: &mut DistanceToQuery<'_, T>, k: usize) -> Result<Vec<T>> {
        Ok(self
            .sorted_by_distance(distance)?
            .into_iter()
            .take(k)
            .map(|(_, d)| d.clone())
            .collect())
    }

    fn nearest_r(&self, distance: &mut DistanceToQuery<'_, T>, radius: f64) -> Result<Vec<T>> {
        Ok(self
            .sorted_by_distance(distance)?
            .into_iter()
            .take_while(|(dist, _)| *dist <= radius)
            .map(|(_, d)| d.clone())
            .collect())
    }

    fn clear(&mut self) {
        self.data.clear();
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn list(&self) -> Vec<T> {
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries() {
        let mut nn = NearestNeighborsLinear::new();
        nn.add_multiple(vec![0.0_f64, 1.0, 2.5, -4.0]);
        let mut dist = |x: &f64| -> Result<f64> { Ok((x - 2.0).abs()) };
        assert_eq!(nn.nearest(&mut dist).unwrap(), Some(2.5));
        assert_eq!(nn.nearest_k(&mut dist, 2).unwrap(), vec![2.5, 1.0]);
        assert_eq!(nn.nearest_r(&mut dist, 2.0).unwrap(), vec![2.5, 1.0, 0.0]);
        assert!(nn.remove(&2.5));
        assert!(!nn.remove(&2.5));
        assert_eq!(nn.size(), 3);
        nn.clear();
        assert_eq!(nn.nearest(&mut dist).unwrap(), None);
    }

    #[test]
    fn test_distance_error_propagates() {
        let mut nn = NearestNeighborsLinear::new();
        nn.add(1usize);
        let mut failing =
            |_: &usize| -> Result<f64> { Err(crate::error::PlannerError::NaNDistance(None, None)) };
        assert!(nn.nearest(&mut failing).is_err());
    }
}
