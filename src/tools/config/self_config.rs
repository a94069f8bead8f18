use tracing::{info, warn};

use crate::base::space_information::SpaceInformation;
use crate::datastructure::nearest_neighbours::NearestNeighbors;
use crate::datastructure::nearest_neighbours_linear::NearestNeighborsLinear;

use super::magic_constants::magic;

/// Automatic configuration of planner defaults for a given space.
pub struct SelfConfig<'a> {
    si: &'a SpaceInformation,
    context: String,
}

impl<'a> SelfConfig<'a> {
    pub fn new(si: &'a SpaceInformation, context: &str) -> Self {
        Self {
            si,
            context: context.to_string(),
        }
    }

    /// Select a default nearest neighbor datastructure for the given space.
    pub fn default_nearest_neighbors<T>(&self) -> Box<dyn NearestNeighbors<T>>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        Box::new(NearestNeighborsLinear::new())
    }

    /// If `range` is unset (close to zero), derive it from the extent of the space.
    pub fn configure_planner_range(&self, range: &mut f64) {
        if *range < f64::EPSILON {
            let extent = self.si.get_maximum_extent();
            if extent.is_finite() {
                *range = extent * magic::MAX_MOTION_LENGTH_AS_SPACE_EXTENT_FRACTION;
                info!("{}: planner range detected to be {}", self.context, range);
            } else {
                warn!("{}: unable to detect planner range of an unbounded space", self.context);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::base::state_validity_checker::AllValidStateValidityChecker;
    use std::sync::Arc;

    #[test]
    fn test_planner_range() {
        let si = SpaceInformation::new(
            Arc::new(RealVectorStateSpace::with_bounds(&[0.0, 0.0], &[3.0, 4.0])),
            Arc::new(AllValidStateValidityChecker),
        );
        let config = SelfConfig::new(&si, "test");
        let mut range = 0.0;
        config.configure_planner_range(&mut range);
        assert!((range - 1.0).abs() < 1e-12);

        let mut fixed = 2.0;
        config.configure_planner_range(&mut fixed);
        assert_eq!(fixed, 2.0);

        let nn = config.default_nearest_neighbors::<usize>();
        assert_eq!(nn.size(), 0);
    }
}
