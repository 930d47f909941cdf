//! Available acquisition criteria used to rank gallery candidates
mod ei;
mod ucb;

pub use ei::{ExpectedImprovement, EI};
pub use ucb::{UpperConfidenceBound, UCB};

use crate::types::{AcquisitionData, AcquisitionStrategy};
use egallery_gp::GpSurrogate;

/// A trait for acquisition criterion which maximum location
/// determines the next most promising point with regards to
/// the surrogate of the objective function (higher is better)
pub trait AcquisitionCriterion: Sync + Send {
    /// Name of the acquisition criterion
    fn name(&self) -> &'static str;

    /// Criterion value at given point x with regards to given
    /// surrogate of the objective function and acquisition data
    /// (best observed value, trade-off, iteration)
    fn value(&self, x: &[f64], model: &dyn GpSurrogate, data: &AcquisitionData) -> f64;
}

impl std::fmt::Debug for dyn AcquisitionCriterion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AcquisitionStrategy {
    /// Criterion implementing the strategy
    pub fn criterion(&self) -> Box<dyn AcquisitionCriterion> {
        match self {
            AcquisitionStrategy::EI => Box::new(EI),
            AcquisitionStrategy::UCB => Box::new(UCB),
        }
    }
}
