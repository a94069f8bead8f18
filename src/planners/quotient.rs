use std::sync::Arc;

use tracing::debug;

use crate::base::space_information::SpaceInformation;
use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
use crate::base::spaces::so2_state_space::SO2StateSpace;
use crate::base::statespace::{CompoundStateSpace, StateSpace};
use crate::error::{Result, StateSpaceError};

/// How the space of a level decomposes into the space of the level below (Q0) and the
/// fiber X1 on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotientSpaceType {
    /// First level, nothing to project onto.
    Atomic,
    /// `R^(n+m) -> R^n`, dropping the last `m` coordinates.
    RnRm { n: usize, m: usize },
    /// `R^n x SO(2) -> R^n`, dropping the rotation.
    RnSO2Rn { n: usize },
}

/// The space of one level together with its projection onto the level below.
///
/// States of Q1 are stored with the Q0 coordinates first, so projection and lift are
/// slice splits at `q0_dimension`.
pub struct Quotient {
    q1: SpaceInformation,
    q0: Option<Arc<dyn StateSpace>>,
    x1: Option<Arc<dyn StateSpace>>,
    kind: QuotientSpaceType,
}

impl std::fmt::Debug for Quotient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quotient")
            .field("q1", &self.q1)
            .field("q0", &self.q0)
            .field("x1", &self.x1)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Quotient {
    pub fn atomic(q1: SpaceInformation) -> Self {
        Self {
            q1,
            q0: None,
            x1: None,
            kind: QuotientSpaceType::Atomic,
        }
    }

    /// Identify how `q1` projects onto `q0`. Fails for pairs of spaces that are not one of
    /// the known decompositions.
    pub fn new(q1: SpaceInformation, q0: Option<Arc<dyn StateSpace>>) -> Result<Self> {
        let q0 = match q0 {
            None => return Ok(Self::atomic(q1)),
            Some(q0) => q0,
        };
        let (kind, x1) = identify(q1.get_state_space().as_ref(), q0.as_ref())?;
        debug!(
            "quotient {} -> {} identified as {:?}",
            q1.get_state_space().get_name(),
            q0.get_name(),
            kind
        );
        Ok(Self {
            q1,
            q0: Some(q0),
            x1: Some(x1),
            kind,
        })
    }

    pub fn get_q1(&self) -> &SpaceInformation {
        &self.q1
    }

    pub fn get_q0(&self) -> Option<&Arc<dyn StateSpace>> {
        self.q0.as_ref()
    }

    pub fn get_x1(&self) -> Option<&Arc<dyn StateSpace>> {
        self.x1.as_ref()
    }

    pub fn kind(&self) -> QuotientSpaceType {
        self.kind
    }

    pub fn is_atomic(&self) -> bool {
        self.kind == QuotientSpaceType::Atomic
    }

    pub fn q0_dimension(&self) -> usize {
        match self.kind {
            QuotientSpaceType::Atomic => 0,
            QuotientSpaceType::RnRm { n, .. } | QuotientSpaceType::RnSO2Rn { n } => n,
        }
    }

    pub fn x1_dimension(&self) -> usize {
        self.q1.get_state_dimension() - self.q0_dimension()
    }

    pub fn extract_q0_subspace(&self, q: &[f64], out: &mut [f64]) {
        let n = self.q0_dimension();
        out[..n].copy_from_slice(&q[..n]);
    }

    pub fn extract_x1_subspace(&self, q: &[f64], out: &mut [f64]) {
        let n = self.q0_dimension();
        out[..q.len() - n].copy_from_slice(&q[n..]);
    }

    pub fn merge_states(&self, q0: &[f64], x1: &[f64], out: &mut [f64]) {
        let n = self.q0_dimension();
        let len = out.len();
        out[..n].copy_from_slice(&q0[..n]);
        out[n..].copy_from_slice(&x1[..len - n]);
    }
}

fn unsupported(q1: &dyn StateSpace, q0: &dyn StateSpace) -> StateSpaceError {
    StateSpaceError::UnsupportedQuotient {
        q1: q1.get_name().to_string(),
        q0: q0.get_name().to_string(),
    }
}

fn real_vector_dimension(space: &dyn StateSpace) -> Option<usize> {
    space
        .downcast_ref::<RealVectorStateSpace>()
        .map(|space| space.get_dimension())
}

fn identify(
    q1: &dyn StateSpace,
    q0: &dyn StateSpace,
) -> Result<(QuotientSpaceType, Arc<dyn StateSpace>)> {
    let n = real_vector_dimension(q0).ok_or_else(|| unsupported(q1, q0))?;

    if let Some(q1_rn) = q1.downcast_ref::<RealVectorStateSpace>() {
        let total = q1_rn.get_dimension();
        if n >= total {
            return Err(unsupported(q1, q0).into());
        }
        let x1 = RealVectorStateSpace::from_bounds(&q1_rn.get_bounds().slice(n..total));
        return Ok((QuotientSpaceType::RnRm { n, m: total - n }, Arc::new(x1)));
    }

    if let Some(compound) = q1.as_compound_ref() {
        let matches = compound.get_subspace_count() == 2
            && real_vector_dimension(compound.get_subspace(0).as_ref()) == Some(n)
            && compound.get_subspace(1).downcast_ref::<SO2StateSpace>().is_some();
        if matches {
            let rotation: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
            let mut x1 = CompoundStateSpace::from_components(
                vec![rotation],
                vec![compound.get_subspace_weight(1)],
            )
            .map_err(|_| unsupported(q1, q0))?;
            x1.lock();
            return Ok((QuotientSpaceType::RnSO2Rn { n }, Arc::new(x1)));
        }
    }

    Err(unsupported(q1, q0).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::real_vector_bounds::RealVectorBounds;
    use crate::base::spaces::se2_state_space;
    use crate::base::state_validity_checker::AllValidStateValidityChecker;
    use crate::error::PlannerError;

    fn si(space: Arc<dyn StateSpace>) -> SpaceInformation {
        SpaceInformation::new(space, Arc::new(AllValidStateValidityChecker))
    }

    #[test]
    fn test_rn_rm_split_and_merge() {
        let r3: Arc<dyn StateSpace> =
            Arc::new(RealVectorStateSpace::with_bounds(&[0.0, 0.0, -5.0], &[1.0, 1.0, 5.0]));
        let r2: Arc<dyn StateSpace> =
            Arc::new(RealVectorStateSpace::with_bounds(&[0.0, 0.0], &[1.0, 1.0]));
        let quotient = Quotient::new(si(r3), Some(r2)).unwrap();
        assert_eq!(quotient.kind(), QuotientSpaceType::RnRm { n: 2, m: 1 });
        assert_eq!(quotient.x1_dimension(), 1);

        let q = [0.2, 0.3, 4.0];
        let mut q0 = [0.0; 2];
        let mut x1 = [0.0; 1];
        quotient.extract_q0_subspace(&q, &mut q0);
        quotient.extract_x1_subspace(&q, &mut x1);
        assert_eq!(q0, [0.2, 0.3]);
        assert_eq!(x1, [4.0]);

        let mut merged = [0.0; 3];
        quotient.merge_states(&q0, &x1, &mut merged);
        assert_eq!(merged, q);

        let x1_space = quotient.get_x1().unwrap();
        assert!(x1_space.satisfies_bounds(&[-4.0]));
        assert!(!x1_space.satisfies_bounds(&[6.0]));
    }

    #[test]
    fn test_se2_drops_rotation() {
        let bounds = RealVectorBounds::from_low_high(&[-1.0, -1.0], &[1.0, 1.0]);
        let se2: Arc<dyn StateSpace> = Arc::new(se2_state_space(&bounds, 0.5).unwrap());
        let r2: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::from_bounds(&bounds));
        let quotient = Quotient::new(si(se2), Some(r2)).unwrap();
        assert_eq!(quotient.kind(), QuotientSpaceType::RnSO2Rn { n: 2 });

        let x1 = quotient.get_x1().unwrap();
        assert_eq!(x1.get_dimension(), 1);
        assert!((x1.distance(&[0.0], &[1.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unsupported_pairs() {
        let r2: Arc<dyn StateSpace> =
            Arc::new(RealVectorStateSpace::with_bounds(&[0.0, 0.0], &[1.0, 1.0]));
        let so2: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
        let err = Quotient::new(si(r2.clone()), Some(so2)).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::StateSpace(StateSpaceError::UnsupportedQuotient { .. })
        ));
        assert!(Quotient::new(si(r2.clone()), Some(r2)).is_err());
    }

    #[test]
    fn test_atomic() {
        let r2: Arc<dyn StateSpace> =
            Arc::new(RealVectorStateSpace::with_bounds(&[0.0, 0.0], &[1.0, 1.0]));
        let quotient = Quotient::new(si(r2), None).unwrap();
        assert!(quotient.is_atomic());
        assert_eq!(quotient.q0_dimension(), 0);
        assert_eq!(quotient.x1_dimension(), 2);
    }
}
