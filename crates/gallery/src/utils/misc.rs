use libm::erfc;
use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2, Zip};
use ndarray_stats::DeviationExt;

const SQRT_2PI: f64 = 2.5066282746310007;

/// Cumulative distribution function of Standard Normal at x
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Probability density function of Standard Normal at x
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / SQRT_2PI
}

// Domain handling functions
///////////////////////////////////////////////////////////////////////////////

/// Check every component of `x` lies within its `[lower, upper]` interval of `xlimits`
pub fn is_within(
    x: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
) -> bool {
    x.iter()
        .zip(xlimits.rows())
        .all(|(v, b)| b[0] <= *v && *v <= b[1])
}

/// Clip `x` components into the box `[lower, upper]`
pub fn clip(x: &ArrayBase<impl Data<Elem = f64>, Ix1>, lower: f64, upper: f64) -> Array1<f64> {
    x.mapv(|v| v.max(lower).min(upper))
}

/// Clip `x` components into their intervals given by `xlimits`
pub fn clip_within(
    x: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
) -> Array1<f64> {
    let mut res = x.to_owned();
    Zip::from(&mut res)
        .and(xlimits.rows())
        .for_each(|v, b| *v = v.max(b[0]).min(b[1]));
    res
}

/// Index of the observation with the highest output among the ones lying within `xlimits`.
/// The first one wins in case of ties.
pub fn best_within(
    x_data: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    y_data: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (x, y)) in x_data.axis_iter(Axis(0)).zip(y_data.iter()).enumerate() {
        let better = best.map_or(*y > f64::NEG_INFINITY, |(_, ybest)| *y > ybest);
        if better && is_within(&x, xlimits) {
            best = Some((i, *y));
        }
    }
    best.map(|(i, _)| i)
}

/// Check `x_new` is farther than `min_distance` (euclidean) from every point of `x_data`.
/// Always true when `x_data` is empty.
pub fn is_far_enough<'a, I>(
    x_data: I,
    x_new: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    min_distance: f64,
) -> bool
where
    I: IntoIterator<Item = &'a Array1<f64>>,
{
    x_data
        .into_iter()
        .all(|x| x.l2_dist(x_new).map_or(false, |d| d > min_distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_norm() {
        assert_abs_diff_eq!(norm_cdf(0.), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(norm_cdf(1.96), 0.9750021048517795, epsilon = 1e-9);
        assert_abs_diff_eq!(norm_pdf(0.), 1. / SQRT_2PI, epsilon = 1e-12);
    }

    #[test]
    fn test_is_within() {
        let xlimits = array![[0., 10.], [-1., 1.]];
        assert!(is_within(&array![0., 1.], &xlimits));
        assert!(is_within(&array![5., 0.], &xlimits));
        assert!(!is_within(&array![5., 1.5], &xlimits));
        assert!(!is_within(&array![-1e-9, 0.], &xlimits));
    }

    #[test]
    fn test_clip() {
        assert_abs_diff_eq!(clip(&array![-0.2, 0.5, 1.3], 0., 1.), array![0., 0.5, 1.]);
        let xlimits = array![[0., 10.], [-1., 1.]];
        assert_abs_diff_eq!(clip_within(&array![12., -3.], &xlimits), array![10., -1.]);
    }

    #[test]
    fn test_best_within() {
        let xlimits = array![[0., 1.]];
        let x = array![[0.5], [2.], [0.2], [0.9]];
        let y = array![1., 5., 3., 3.];
        assert_eq!(best_within(&x, &y, &xlimits), Some(2));

        let x = array![[2.], [3.]];
        let y = array![1., 5.];
        assert_eq!(best_within(&x, &y, &xlimits), None);
    }

    #[test]
    fn test_is_far_enough() {
        let gallery = vec![array![0., 0.], array![1., 1.]];
        assert!(is_far_enough(&gallery, &array![3., 3.], 0.5));
        assert!(!is_far_enough(&gallery, &array![1.2, 1.2], 0.5));
        let empty: Vec<Array1<f64>> = vec![];
        assert!(is_far_enough(&empty, &array![1.2, 1.2], 0.5));
    }
}
