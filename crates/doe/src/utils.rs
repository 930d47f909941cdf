use linfa::Float;
use ndarray::{Array, Array1, ArrayBase, Data, Ix2};
use ndarray_stats::DeviationExt;
use rayon::prelude::*;

/// Computes the pairwise distances between rows of a 2D-array using parallel processing.
/// The order of the distances is not specified: the result is meant to be reduced
/// (e.g. to get the minimal distance).
pub fn pdist<F: Float>(x: &ArrayBase<impl Data<Elem = F> + Sync, Ix2>) -> Array1<F> {
    let nrows = x.nrows();

    let pairs: Vec<_> = (0..nrows)
        .flat_map(|i| ((i + 1)..nrows).map(move |j| (i, j)))
        .collect();

    let distances: Vec<_> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let a = x.row(i);
            let b = x.row(j);
            F::cast(a.l2_dist(&b).unwrap())
        })
        .collect();

    Array::from_vec(distances)
}
