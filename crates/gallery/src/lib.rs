//! This library implements a greedy batch acquisition strategy for Bayesian optimization:
//! given a gaussian process surrogate of an objective function to be maximized, it proposes
//! a *gallery* of N diverse promising points to be evaluated (or shown to a user) at once.
//!
//! Points are selected one at a time by maximizing an acquisition criterion
//! ([`criteria::EI`] by default) against a working copy of the surrogate. After each selection
//! the working copy is conditioned on a fictitious observation equal to its own predicted mean
//! at the selected point: the mean does not change but the uncertainty around the point collapses,
//! so the following selections favour other regions.
//!
//! The surrogate given by the user is never modified. Any model exposing its kernel, its
//! observations and its prior belief (see [`egallery_gp::UpdatableSurrogate`]) can be used.
//!
//! # Example
//!
//! ```no_run
//! use egallery::GalleryBuilder;
//! use egallery_gp::{correlation_models::SquaredExponentialCorr, GaussianProcess, Kernel};
//! use ndarray::array;
//!
//! let xt = array![[0.5, 0.5], [2.5, 7.5], [8., 1.]];
//! let yt = array![0.2, 1.3, 0.7];
//! let kernel = Kernel::new(SquaredExponentialCorr(), array![0.5, 0.5]);
//! let gp = GaussianProcess::new(kernel, xt, yt, None).expect("GP built");
//!
//! let xlimits = array![[0., 10.], [0., 10.]];
//! let gallery = GalleryBuilder::default()
//!     .configure(|config| config.samples(100).seed(42))
//!     .within(&xlimits)
//!     .expect("gallery configured")
//!     .generate(&gp, 4)
//!     .expect("gallery generated");
//!
//! // the best observation within bounds comes first
//! assert_eq!(gallery.row(0), array![2.5, 7.5]);
//! assert_eq!(gallery.nrows(), 4);
//! ```
//!
//! # Implementation notes
//!
//! * Candidates of an iteration are the continuous maximum of the criterion, random latin
//!   hypercube samples and the prior mean locations if any. Random and prior candidates
//!   closer than `min_distance` from a gallery point are rejected.
//! * The generation can be driven step by step with [`Gallery::bootstrap`] and [`Gallery::step`].
//! * Logs are emitted through the `log` facade. When no logger is installed an `env_logger`
//!   is set up, its level being controlled by the `EGALLERY_LOG` environment variable
//!   (default `info`).
//!
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod acquisition;
mod config;
pub mod criteria;
mod errors;
mod gallery;
mod optimizers;
mod state;
mod types;
pub mod utils;

pub use crate::acquisition::*;
pub use crate::config::*;
pub use crate::errors::*;
pub use crate::gallery::*;
pub use crate::state::*;
pub use crate::types::*;
