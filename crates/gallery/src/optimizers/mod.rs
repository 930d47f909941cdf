//! Optimizers used internally to maximize acquisition criteria
//! and to refine prior belief optima

mod lhs_optimizer;
mod optimizer;

pub(crate) use lhs_optimizer::*;
pub(crate) use optimizer::*;

use crate::types::{AcquisitionData, ObjFn};
use egallery_doe::{Lhs, LhsKind, SamplingMethod};
use log::{debug, warn};
use ndarray::{Array1, Array2};
use ndarray_rand::rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

/// Local minimizations of `obj` started from `n_start` points of a maximin LHS,
/// the best result is returned. When every local minimization fails the best point
/// of a LHS optimization is returned instead.
pub(crate) fn minimize_multistart<R: Rng>(
    algorithm: Algorithm,
    obj: &(dyn ObjFn<AcquisitionData> + Sync),
    data: &AcquisitionData,
    xlimits: &Array2<f64>,
    n_start: usize,
    max_eval: usize,
    rng: &mut R,
) -> (f64, Array1<f64>) {
    let x_start = Lhs::new(xlimits)
        .kind(LhsKind::Maximin)
        .with_rng(Xoshiro256Plus::seed_from_u64(rng.gen()))
        .sample(n_start);

    let res = x_start
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, xinit)| {
            debug!("Begin optim {}", i);
            let optim_res = Optimizer::new(algorithm, obj, data, xlimits)
                .xinit(&xinit)
                .max_eval(max_eval)
                .ftol_rel(1e-4)
                .ftol_abs(1e-4)
                .minimize();
            debug!("End optim {}", i);
            optim_res
        })
        .fold(
            (f64::INFINITY, Array1::ones((xlimits.nrows(),))),
            |a, b| if b.0 < a.0 { b } else { a },
        );

    if res.0.is_nan() || res.0.is_infinite() {
        warn!("All optimizations fail => Trigger LHS optimization");
        LhsOptimizer::new(xlimits, obj, data)
            .with_rng(Xoshiro256Plus::seed_from_u64(rng.gen()))
            .minimize()
    } else {
        res
    }
}
