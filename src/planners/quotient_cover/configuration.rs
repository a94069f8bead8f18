use crate::base::state::State;
use crate::datastructure::pdf::PdfElement;
use crate::planners::ConfigurationId;

/// A state of the cover together with the ball around it that is known to be free.
#[derive(Clone, Debug)]
pub struct Configuration {
    pub state: State,
    /// Set on insertion into a cover.
    pub index: Option<ConfigurationId>,
    /// Clearance of the exact robot. `f64::INFINITY` means the whole space is free.
    pub radius: f64,
    /// Clearance of the outer robot approximation, if the state is sufficient.
    pub outer_radius: f64,
    pub is_sufficient_feasible: bool,
    pub is_start: bool,
    pub is_goal: bool,
    pub is_feasible: bool,
    /// Configuration whose sampling produced this one.
    pub parent_neighbor: Option<ConfigurationId>,
    /// Nearest configuration of the parent cover to the projection of `state`.
    pub coset: Option<ConfigurationId>,
    pub number_attempted_expansions: u32,
    pub number_successful_expansions: u32,
    pub goal_distance: f64,
    /// Sampling weight at insertion, decays with the number of expansion attempts.
    pub importance: f64,
    pub(crate) pdf_all_element: Option<PdfElement>,
    pub(crate) pdf_necessary_element: Option<PdfElement>,
}

impl Configuration {
    pub fn new(state: State) -> Self {
        Self {
            state,
            index: None,
            radius: 0.0,
            outer_radius: 0.0,
            is_sufficient_feasible: false,
            is_start: false,
            is_goal: false,
            is_feasible: false,
            parent_neighbor: None,
            coset: None,
            number_attempted_expansions: 0,
            number_successful_expansions: 0,
            goal_distance: f64::INFINITY,
            importance: 0.0,
            pdf_all_element: None,
            pdf_necessary_element: None,
        }
    }

    /// Blank configuration at the same state, keeping only the start and goal tags.
    pub fn reset(&self) -> Self {
        let mut q = Self::new(self.state.clone());
        q.is_start = self.is_start;
        q.is_goal = self.is_goal;
        q
    }

    pub fn is_saturated(&self) -> bool {
        self.radius.is_infinite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_tags_only() {
        let mut q = Configuration::new(State::from_slice(&[1.0, 2.0]));
        q.is_start = true;
        q.radius = 3.0;
        q.index = Some(ConfigurationId(4));
        q.number_attempted_expansions = 7;
        let fresh = q.reset();
        assert!(fresh.is_start);
        assert_eq!(fresh.radius, 0.0);
        assert_eq!(fresh.index, None);
        assert_eq!(fresh.number_attempted_expansions, 0);
        assert_eq!(&fresh.state[..], &[1.0, 2.0]);
    }
}
