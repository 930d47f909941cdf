/*!
This library implements Latin Hypercube Sampling (LHS), the space-filling
sampling method used to draw candidate points when building a gallery
of points to evaluate.

A sampling method generates a set of points within a design (or sample) space `xlimits`.
The design space is defined as a 2D ndarray `(nx, 2)`, specifying lower bound and upper bound
of each `nx` components of the samples `x`.

Example:
```
use egallery_doe::{Lhs, LhsKind, SamplingMethod};
use ndarray::arr2;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Design space is defined as [5., 10.] x [0., 1.], samples are 2-dimensional.
let xlimits = arr2(&[[5., 10.], [0., 1.]]);
// We generate five samples using centered Latin Hypercube sampling.
let samples = Lhs::new(&xlimits).kind(LhsKind::Centered).sample(5);
// or else with a seeded random generator for reproducibility
let samples = Lhs::new(&xlimits)
    .with_rng(Xoshiro256Plus::seed_from_u64(42))
    .sample(5);
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod lhs;
mod traits;
mod utils;

pub use lhs::*;
pub use traits::*;
