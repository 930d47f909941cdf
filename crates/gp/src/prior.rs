//! Prior belief about the location of good regions of the search space.
//!
//! The prior is an RBF network laid over normalized coordinates: each mean location
//! contributes a gaussian bump of width `length_scale` to the prior mean function.

use crate::errors::{GpError, Result};
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2, Zip};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Default length scale of the prior gaussian bumps (in normalized coordinates)
pub const DEFAULT_PRIOR_LENGTH_SCALE: f64 = 0.2;

/// A prior mean function defined by a set of candidate mean locations.
///
/// Mean locations are expressed in normalized `[0, 1]^nx` coordinates and
/// mapped back to the search space with `x = u * width + lowerb`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(deserialize = "F: Deserialize<'de>"))
)]
pub struct MeanPrior<F: Float> {
    means: Array2<F>,
    weights: Array1<F>,
    length_scale: F,
    width: Array1<F>,
    lowerb: Array1<F>,
}

impl<F: Float> MeanPrior<F> {
    /// Constructor given prior `means` (m, nx) in normalized coordinates and
    /// search space bounds `xlimits` (nx, 2) used to derive the coordinate transform.
    pub fn new(
        means: Array2<F>,
        xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<Self> {
        if xlimits.ncols() != 2 {
            return Err(GpError::InvalidValueError(format!(
                "xlimits should have 2 columns (lower, upper), got {}",
                xlimits.ncols()
            )));
        }
        if means.ncols() != xlimits.nrows() {
            return Err(GpError::InvalidValueError(format!(
                "prior means dimension {} does not match bounds dimension {}",
                means.ncols(),
                xlimits.nrows()
            )));
        }
        if means.iter().any(|m| !m.is_finite()) {
            return Err(GpError::InvalidValueError(format!(
                "prior means should be finite, got {}",
                means
            )));
        }
        let lowerb = xlimits.column(0).to_owned();
        let width = &xlimits.column(1) - &xlimits.column(0);
        Ok(MeanPrior {
            weights: Array1::ones(means.nrows()),
            means,
            length_scale: F::cast(DEFAULT_PRIOR_LENGTH_SCALE),
            width,
            lowerb,
        })
    }

    /// Set the weights of the mean locations
    pub fn weights(mut self, weights: Array1<F>) -> Result<Self> {
        if weights.len() != self.means.nrows() {
            return Err(GpError::InvalidValueError(format!(
                "expected {} prior weights, got {}",
                self.means.nrows(),
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(GpError::InvalidValueError(format!(
                "prior weights should be finite, got {}",
                weights
            )));
        }
        self.weights = weights;
        Ok(self)
    }

    /// Set the length scale of the gaussian bumps
    pub fn length_scale(mut self, length_scale: F) -> Result<Self> {
        if !length_scale.is_finite() || length_scale <= F::zero() {
            return Err(GpError::InvalidValueError(format!(
                "prior length scale should be positive and finite, got {}",
                length_scale
            )));
        }
        self.length_scale = length_scale;
        Ok(self)
    }

    /// Mean locations (m, nx) in normalized coordinates
    pub fn means(&self) -> &Array2<F> {
        &self.means
    }

    /// Scale of the coordinate transform
    pub fn width(&self) -> &Array1<F> {
        &self.width
    }

    /// Offset of the coordinate transform
    pub fn lowerb(&self) -> &Array1<F> {
        &self.lowerb
    }

    /// Input dimension
    pub fn dim(&self) -> usize {
        self.means.ncols()
    }

    /// Map a normalized point `u` to search space coordinates
    pub fn to_search_space(&self, u: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        u * &self.width + &self.lowerb
    }

    /// Map a search space point `x` to normalized coordinates.
    /// A degenerated dimension (zero width) maps to 0.
    pub fn to_normalized(&self, x: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        let mut u = x - &self.lowerb;
        Zip::from(&mut u).and(&self.width).for_each(|u_j, w_j| {
            *u_j = if *w_j == F::zero() {
                F::zero()
            } else {
                *u_j / *w_j
            };
        });
        u
    }

    /// Prior mean values (n,) at `x` (n, nx) points given in search space coordinates
    pub fn value(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Array1<F> {
        let two_l2 = F::cast(2.) * self.length_scale * self.length_scale;
        let mut res = Array1::zeros(x.nrows());
        Zip::from(&mut res).and(x.rows()).for_each(|r, xi| {
            let u = self.to_normalized(&xi);
            *r = self
                .means
                .axis_iter(Axis(0))
                .zip(self.weights.iter())
                .fold(F::zero(), |acc, (m, w)| {
                    let d2 = (&u - &m).mapv(|v| v * v).sum();
                    acc + *w * F::exp(-d2 / two_l2)
                });
        });
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_transform() {
        let xlimits = array![[-5., 5.], [0., 10.]];
        let prior = MeanPrior::new(array![[0.5, 0.2]], &xlimits).unwrap();
        assert_abs_diff_eq!(prior.width(), &array![10., 10.]);
        assert_abs_diff_eq!(prior.lowerb(), &array![-5., 0.]);
        let x = prior.to_search_space(&prior.means().row(0));
        assert_abs_diff_eq!(x, array![0., 2.]);
        assert_abs_diff_eq!(prior.to_normalized(&x), array![0.5, 0.2], epsilon = 1e-12);
    }

    #[test]
    fn test_value_peaks_at_means() {
        let xlimits = array![[0., 10.]];
        let prior = MeanPrior::new(array![[0.3]], &xlimits)
            .unwrap()
            .weights(array![2.])
            .unwrap();
        let vals = prior.value(&array![[3.], [5.], [0.]]);
        assert_abs_diff_eq!(vals[0], 2., epsilon = 1e-12);
        // |0.5 - 0.3|^2 / (2 * 0.04) = 0.5
        assert_abs_diff_eq!(vals[1], 2. * (-0.5f64).exp(), epsilon = 1e-12);
        assert!(vals[2] < vals[1]);
    }

    #[test]
    fn test_zero_width_dimension() {
        let xlimits = array![[1., 1.], [0., 1.]];
        let prior = MeanPrior::new(array![[0., 0.5]], &xlimits).unwrap();
        let vals = prior.value(&array![[1., 0.5]]);
        assert_abs_diff_eq!(vals[0], 1., epsilon = 1e-12);
    }

    #[test]
    fn test_bad_dimensions() {
        let xlimits = array![[0., 1.], [0., 1.]];
        assert!(MeanPrior::new(array![[0.5]], &xlimits).is_err());
        let prior = MeanPrior::new(array![[0.5, 0.5]], &xlimits).unwrap();
        assert!(prior.weights(array![1., 2.]).is_err());
    }

    #[test]
    fn test_bad_values() {
        let xlimits = array![[0., 1.], [0., 1.]];
        let prior = MeanPrior::new(array![[0.5, 0.5], [0.1, 0.2]], &xlimits).unwrap();
        assert!(matches!(
            prior.clone().weights(array![1., f64::NAN]),
            Err(GpError::InvalidValueError(_))
        ));
        assert!(prior.clone().weights(array![f64::INFINITY, 1.]).is_err());
        assert!(MeanPrior::new(array![[0.5, f64::NAN]], &xlimits).is_err());
        assert!(prior.clone().length_scale(0.).is_err());
        assert!(prior.clone().length_scale(-0.1).is_err());
        assert!(prior.clone().length_scale(f64::NAN).is_err());
        let prior = prior.length_scale(0.1).unwrap();
        assert_abs_diff_eq!(prior.value(&array![[0.5, 0.5]])[0], 1., epsilon = 1e-12);
    }
}
