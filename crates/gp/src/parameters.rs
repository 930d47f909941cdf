use crate::correlation_models::CorrelationModel;
use crate::errors::{GpError, Result};
use crate::utils::pairwise_differences;
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default process variance
pub const DEFAULT_VARIANCE: f64 = 1.0;
/// Default nugget added to the diagonal of the training covariance
pub const DEFAULT_NUGGET: f64 = 100.0 * f64::EPSILON;

/// Covariance kernel of a gaussian process: a correlation model with its
/// fixed hyperparameters `theta`, scaled by the process variance.
///
/// `k(x, x') = sigma2 * r(x - x', theta)`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(
        serialize = "F: Serialize, Corr: Serialize",
        deserialize = "F: Deserialize<'de>, Corr: Deserialize<'de>"
    ))
)]
pub struct Kernel<F: Float, Corr: CorrelationModel<F>> {
    /// Correlation model
    pub(crate) corr: Corr,
    /// Inverse length scales, one per input dimension
    pub(crate) theta: Array1<F>,
    /// Process variance
    pub(crate) sigma2: F,
    /// Regularization added to the diagonal of the training covariance
    pub(crate) nugget: F,
}

impl<F: Float, Corr: CorrelationModel<F>> Kernel<F, Corr> {
    /// Kernel constructor with unit variance and default nugget
    pub fn new(corr: Corr, theta: Array1<F>) -> Self {
        Kernel {
            corr,
            theta,
            sigma2: F::cast(DEFAULT_VARIANCE),
            nugget: F::cast(DEFAULT_NUGGET),
        }
    }

    /// Set the process variance
    pub fn variance(mut self, sigma2: F) -> Self {
        self.sigma2 = sigma2;
        self
    }

    /// Set the nugget
    pub fn nugget(mut self, nugget: F) -> Self {
        self.nugget = nugget;
        self
    }

    /// Correlation model
    pub fn corr(&self) -> &Corr {
        &self.corr
    }

    /// Inverse length scales
    pub fn theta(&self) -> &Array1<F> {
        &self.theta
    }

    /// Process variance
    pub fn sigma2(&self) -> F {
        self.sigma2
    }

    /// Nugget value
    pub fn nugget_value(&self) -> F {
        self.nugget
    }

    /// Number of input dimensions the kernel is defined on
    pub fn dim(&self) -> usize {
        self.theta.len()
    }

    /// Check hyperparameters values
    pub fn check(&self) -> Result<()> {
        if self.theta.iter().any(|t| !t.is_finite() || *t <= F::zero()) {
            return Err(GpError::InvalidValueError(format!(
                "theta should be positive and finite, got {}",
                self.theta
            )));
        }
        if !self.sigma2.is_finite() || self.sigma2 <= F::zero() {
            return Err(GpError::InvalidValueError(format!(
                "variance should be positive and finite, got {}",
                self.sigma2
            )));
        }
        if !self.nugget.is_finite() || self.nugget < F::zero() {
            return Err(GpError::InvalidValueError(format!(
                "nugget should be non negative, got {}",
                self.nugget
            )));
        }
        Ok(())
    }

    /// Covariance matrix (na, nb) between points `xa` (na, nx) and `xb` (nb, nx)
    pub fn covariance(
        &self,
        xa: &ArrayBase<impl Data<Elem = F>, Ix2>,
        xb: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<Array2<F>> {
        if xa.ncols() != self.dim() || xb.ncols() != self.dim() {
            return Err(GpError::InvalidValueError(format!(
                "points dimension ({}, {}) do not match kernel dimension {}",
                xa.ncols(),
                xb.ncols(),
                self.dim()
            )));
        }
        let d = pairwise_differences(xa, xb);
        let r = self.corr.value(&d, &self.theta);
        let k = r
            .into_shape((xa.nrows(), xb.nrows()))
            .map_err(|e| GpError::InvalidValueError(e.to_string()))?;
        Ok(k.mapv(|v| self.sigma2 * v))
    }
}

impl<F: Float, Corr: CorrelationModel<F>> fmt::Display for Kernel<F, Corr> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Kernel(corr={}, theta={}, variance={})",
            self.corr, self.theta, self.sigma2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation_models::{Matern52Corr, SquaredExponentialCorr};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_covariance_is_symmetric_with_variance_diagonal() {
        let kernel = Kernel::new(SquaredExponentialCorr(), array![1., 0.5]).variance(2.5);
        let x = array![[0., 0.], [1., 2.], [-1., 0.3]];
        let k = kernel.covariance(&x, &x).unwrap();
        assert_eq!(k.dim(), (3, 3));
        assert_abs_diff_eq!(k, k.t().to_owned(), epsilon = 1e-14);
        for i in 0..3 {
            assert_abs_diff_eq!(k[[i, i]], 2.5, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_cross_covariance_shape() {
        let kernel = Kernel::new(Matern52Corr(), array![1.]);
        let xa = array![[0.], [1.]];
        let xb = Array2::zeros((5, 1));
        let k = kernel.covariance(&xa, &xb).unwrap();
        assert_eq!(k.dim(), (2, 5));
        assert_abs_diff_eq!(k.row(0).to_owned(), Array1::ones(5));
    }

    #[test]
    fn test_bad_dimension() {
        let kernel = Kernel::new(SquaredExponentialCorr(), array![1.]);
        let x = array![[0., 1.]];
        assert!(kernel.covariance(&x, &x).is_err());
    }

    #[test]
    fn test_check() {
        assert!(Kernel::new(SquaredExponentialCorr(), array![1., 2.]).check().is_ok());
        assert!(Kernel::new(SquaredExponentialCorr(), array![0., 2.]).check().is_err());
        assert!(Kernel::new(SquaredExponentialCorr(), array![1.])
            .variance(-1.)
            .check()
            .is_err());
    }
}
