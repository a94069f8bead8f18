use crate::error::Result;

/// Distance from the query to a stored element. Metrics across a quotient hierarchy
/// depend on more than the two elements, so queries carry their own closure and the
/// structure stores no metric.
pub type DistanceToQuery<'a, T> = dyn FnMut(&T) -> Result<f64> + 'a;

/// A trait for nearest neighbors search algorithms.
pub trait NearestNeighbors<T>: Send + Sync {
    /// Adds a data point to the data structure.
    fn add(&mut self, data: T);

    /// Adds multiple data points to the data structure.
    fn add_multiple(&mut self, data: Vec<T>) {
        for d in data {
            self.add(d);
        }
    }

    /// Removes a data point from the data structure.
    ///
    /// # Returns
    ///
    /// `true` if the data point was successfully removed, `false` otherwise.
    fn remove(&mut self, data: &T) -> bool;

    /// Finds the nearest neighbor of the query described by `distance`.
    ///
    /// # Returns
    ///
    /// `None` if the data structure is empty.
    fn nearest(&self, distance: &mut DistanceToQuery<'_, T>) -> Result<Option<T>>;

    /// Finds the `k` nearest neighbors, closest first.
    fn nearest_k(&self, distance: &mut DistanceToQuery<'_, T>, k: usize) -> Result<Vec<T>>;

    /// Finds all neighbors within `radius` (inclusive), closest first.
    fn nearest_r(&self, distance: &mut DistanceToQuery<'_, T>, radius: f64) -> Result<Vec<T>>;

    /// Clears all data points from the data structure.
    fn clear(&mut self);

    /// Returns the number of data points in the data structure.
    fn size(&self) -> usize;

    fn list(&self) -> Vec<T>;
}
