use serde::{Deserialize, Serialize};

/// Acquisition criterion used to rank candidate points
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionStrategy {
    /// Expected improvement over the best observed output
    #[default]
    EI,
    /// GP upper confidence bound
    UCB,
}

/// Optimizer used to maximize the acquisition criterion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfillOptimizer {
    /// Cobyla optimizer (gradient free)
    #[default]
    Cobyla,
    /// SLSQP optimizer (gradient based, finite differences)
    Slsqp,
}

/// An interface for objective function to be optimized
///
/// The function is expected to return the objective value at `x`,
/// and to fill in `gradient` when given.
/// * `x` input point
/// * `gradient` gradient of the objective wrt `x`
/// * `u` information provided by the user
pub trait ObjFn<U>: Fn(&[f64], Option<&mut [f64]>, &mut U) -> f64 {}
impl<T, U> ObjFn<U> for T where T: Fn(&[f64], Option<&mut [f64]>, &mut U) -> f64 {}

/// Data used by acquisition criteria evaluation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionData {
    /// Best output value observed by the model the criterion is evaluated against
    pub fbest: f64,
    /// Exploration/exploitation trade-off
    pub xi: f64,
    /// Input dimension
    pub dim: usize,
    /// Acquisition iteration (starting from 1)
    pub iteration: usize,
}
