//! This library implements [Gaussian Process](https://en.wikipedia.org/wiki/Gaussian_process) regression
//! with a fixed covariance kernel, used as the surrogate model of a batch acquisition routine.
//!
//! The model is a zero mean process laid over an optional [`MeanPrior`], a prior belief
//! about where good regions of the search space are likely to be. Observations can be appended
//! one at a time with [`GaussianProcess::add_observation`], which is how fictitious
//! (hallucinated) observations are folded into a working copy of a model.
//!
//! Kernel hyperparameters are given by the user, they are not learnt from the data.
//!
//! Any model exposing its kernel, observations and prior can be used as an input of
//! the acquisition routine by implementing [`UpdatableSurrogate`].
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod algorithm;
pub mod correlation_models;
mod errors;
mod parameters;
mod prior;
mod surrogates;
mod utils;

pub use algorithm::*;
pub use errors::*;
pub use parameters::*;
pub use prior::*;
pub use surrogates::*;
