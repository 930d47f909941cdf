use crate::correlation_models::*;
use crate::errors::{GpError, Result};
use crate::parameters::Kernel;
use crate::prior::MeanPrior;

use linfa::Float;
use linfa_linalg::{cholesky::*, triangular::*};
use ndarray::{concatenate, Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};

use log::debug;
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal parameters computed when factorizing the training covariance,
/// used later on in prediction computations
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(deserialize = "F: Deserialize<'de>"))
)]
pub(crate) struct GpInnerParams<F: Float> {
    /// Cholesky decomposition (lower) of the training covariance \[K\]
    k_chol: Array2<F>,
    /// Solution of the linear equation system : \[K\] x alpha = y - prior(x)
    alpha: Array1<F>,
}

/// A gaussian process regression model with a fixed covariance kernel.
///
/// The process has zero mean on residuals `y - prior(x)` when a [`MeanPrior`]
/// is given, hence the predictive mean falls back to the prior mean far from
/// the training data, or to zero without prior.
///
/// ```
/// use egallery_gp::{correlation_models::SquaredExponentialCorr, GaussianProcess, Kernel};
/// use ndarray::array;
///
/// let xt: ndarray::Array2<f64> = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
/// let yt = array![0.0, 1.0, 1.5, 0.9, 1.0];
/// let kernel = Kernel::new(SquaredExponentialCorr(), array![1.0]);
/// let gp = GaussianProcess::new(kernel, xt, yt, None).expect("GP fitted");
/// let (mean, var) = gp.predict_valvar(&array![[1.0], [2.5]]).expect("GP prediction");
/// assert!((mean[0] - 1.0).abs() < 1e-6);
/// assert!(var[1] > var[0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(
        serialize = "F: Serialize, Corr: Serialize",
        deserialize = "F: Deserialize<'de>, Corr: Deserialize<'de>"
    ))
)]
pub struct GaussianProcess<F: Float, Corr: CorrelationModel<F>> {
    /// Covariance kernel
    kernel: Kernel<F, Corr>,
    /// Training inputs (n, nx)
    xt: Array2<F>,
    /// Training outputs (n,)
    yt: Array1<F>,
    /// Prior belief on the mean
    prior: Option<MeanPrior<F>>,
    /// Factorization of the training data, none without observation
    inner_params: Option<GpInnerParams<F>>,
}

/// GP with squared exponential kernel, the usual kriging setting
pub type Kriging<F> = GaussianProcess<F, SquaredExponentialCorr>;

impl<F: Float, Corr: CorrelationModel<F>> fmt::Display for GaussianProcess<F, Corr> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GP(corr={}, theta={}, variance={}, nobs={}, prior={})",
            self.kernel.corr,
            self.kernel.theta,
            self.kernel.sigma2,
            self.nobs(),
            self.prior.as_ref().map_or(0, |p| p.means().nrows())
        )
    }
}

impl<F: Float, Corr: CorrelationModel<F>> GaussianProcess<F, Corr> {
    /// Build a GP conditioned on `xt` (n, nx) inputs and `yt` (n,) outputs.
    ///
    /// Fails when the dimensions do not agree or when the training covariance
    /// is not positive definite (duplicated points with a null nugget for instance).
    pub fn new(
        kernel: Kernel<F, Corr>,
        xt: Array2<F>,
        yt: Array1<F>,
        prior: Option<MeanPrior<F>>,
    ) -> Result<Self> {
        kernel.check()?;
        check_dims(&kernel, &xt, &yt, prior.as_ref())?;
        let inner_params = factorize(&kernel, &xt, &yt, prior.as_ref())?;
        Ok(GaussianProcess {
            kernel,
            xt,
            yt,
            prior,
            inner_params,
        })
    }

    /// Build a GP with no observation in dimension `nx`
    pub fn without_data(
        kernel: Kernel<F, Corr>,
        nx: usize,
        prior: Option<MeanPrior<F>>,
    ) -> Result<Self> {
        Self::new(kernel, Array2::zeros((0, nx)), Array1::zeros(0), prior)
    }

    /// Covariance kernel
    pub fn kernel(&self) -> &Kernel<F, Corr> {
        &self.kernel
    }

    /// Prior belief if any
    pub fn prior(&self) -> Option<&MeanPrior<F>> {
        self.prior.as_ref()
    }

    /// Training inputs
    pub fn xt(&self) -> &Array2<F> {
        &self.xt
    }

    /// Training outputs
    pub fn yt(&self) -> &Array1<F> {
        &self.yt
    }

    /// Number of observations
    pub fn nobs(&self) -> usize {
        self.xt.nrows()
    }

    /// Retrieve number of input and output dimensions
    pub fn dims(&self) -> (usize, usize) {
        (self.xt.ncols(), 1)
    }

    /// Append one observation `(x, y)` and update the factorization.
    ///
    /// The model is left untouched if the update fails.
    pub fn add_observation(
        &mut self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        y: F,
    ) -> Result<()> {
        if x.len() != self.xt.ncols() {
            return Err(GpError::InvalidValueError(format!(
                "observation dimension {} does not match model dimension {}",
                x.len(),
                self.xt.ncols()
            )));
        }
        let xt = concatenate(Axis(0), &[self.xt.view(), x.view().insert_axis(Axis(0))])
            .map_err(|e| GpError::InvalidValueError(e.to_string()))?;
        let mut yt = self.yt.to_vec();
        yt.push(y);
        let yt = Array1::from(yt);
        let inner_params = factorize(&self.kernel, &xt, &yt, self.prior.as_ref())?;
        debug!("GP updated with observation {} -> {}", x, y);
        self.xt = xt;
        self.yt = yt;
        self.inner_params = inner_params;
        Ok(())
    }

    /// Predict output values at n given `x` points of nx components specified as a (n, nx) matrix.
    /// Returns n scalar output values as a vector (n,).
    pub fn predict(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array1<F>> {
        self.check_input(x)?;
        let mean = self.prior_value(x);
        match &self.inner_params {
            None => Ok(mean),
            Some(inner) => {
                let kx = self.kernel.covariance(x, &self.xt)?;
                Ok(mean + kx.dot(&inner.alpha))
            }
        }
    }

    /// Predict variance values at n given `x` points of nx components specified as a (n, nx) matrix.
    /// Returns n variance values as (n,) column vector.
    pub fn predict_var(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array1<F>> {
        self.check_input(x)?;
        match &self.inner_params {
            None => Ok(Array1::from_elem(x.nrows(), self.kernel.sigma2)),
            Some(inner) => {
                let kx = self.kernel.covariance(x, &self.xt)?;
                self.variance_from(inner, &kx)
            }
        }
    }

    /// Predict both output values and variance at n given `x` points of nx components
    pub fn predict_valvar(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<(Array1<F>, Array1<F>)> {
        self.check_input(x)?;
        let mean = self.prior_value(x);
        match &self.inner_params {
            None => Ok((mean, Array1::from_elem(x.nrows(), self.kernel.sigma2))),
            Some(inner) => {
                let kx = self.kernel.covariance(x, &self.xt)?;
                let var = self.variance_from(inner, &kx)?;
                Ok((mean + kx.dot(&inner.alpha), var))
            }
        }
    }

    fn check_input(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<()> {
        if x.ncols() != self.xt.ncols() {
            return Err(GpError::InvalidValueError(format!(
                "input dimension {} does not match model dimension {}",
                x.ncols(),
                self.xt.ncols()
            )));
        }
        Ok(())
    }

    fn prior_value(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Array1<F> {
        self.prior
            .as_ref()
            .map_or_else(|| Array1::zeros(x.nrows()), |p| p.value(x))
    }

    fn variance_from(&self, inner: &GpInnerParams<F>, kx: &Array2<F>) -> Result<Array1<F>> {
        let v = inner
            .k_chol
            .solve_triangular(&kx.t().to_owned(), UPLO::Lower)?;
        let var = v.mapv(|v| v * v).sum_axis(Axis(0));
        // Variance might be slightly negative depending on
        // machine precision: set to zero in that case
        Ok(var.mapv(|v| {
            let s = self.kernel.sigma2 - v;
            if s < F::zero() {
                F::zero()
            } else {
                s
            }
        }))
    }
}

fn check_dims<F: Float, Corr: CorrelationModel<F>>(
    kernel: &Kernel<F, Corr>,
    xt: &Array2<F>,
    yt: &Array1<F>,
    prior: Option<&MeanPrior<F>>,
) -> Result<()> {
    if xt.nrows() != yt.len() {
        return Err(GpError::InvalidValueError(format!(
            "inputs and outputs numbers differ: {} vs {}",
            xt.nrows(),
            yt.len()
        )));
    }
    if xt.ncols() != kernel.dim() {
        return Err(GpError::InvalidValueError(format!(
            "training inputs dimension {} does not match theta length {}",
            xt.ncols(),
            kernel.dim()
        )));
    }
    if let Some(p) = prior {
        if p.dim() != xt.ncols() {
            return Err(GpError::InvalidValueError(format!(
                "prior dimension {} does not match training inputs dimension {}",
                p.dim(),
                xt.ncols()
            )));
        }
    }
    Ok(())
}

fn factorize<F: Float, Corr: CorrelationModel<F>>(
    kernel: &Kernel<F, Corr>,
    xt: &Array2<F>,
    yt: &Array1<F>,
    prior: Option<&MeanPrior<F>>,
) -> Result<Option<GpInnerParams<F>>> {
    if xt.nrows() == 0 {
        return Ok(None);
    }
    let mut k = kernel.covariance(xt, xt)?;
    let reg = kernel.sigma2 * kernel.nugget;
    k.diag_mut().mapv_inplace(|v| v + reg);
    // K cholesky decomposition
    let k_chol = k.cholesky()?;

    let resid = match prior {
        Some(p) => yt - &p.value(xt),
        None => yt.to_owned(),
    };
    let rho = k_chol.solve_triangular(&resid.insert_axis(Axis(1)), UPLO::Lower)?;
    let alpha = k_chol.t().solve_triangular(&rho, UPLO::Upper)?;
    Ok(Some(GpInnerParams {
        k_chol,
        alpha: alpha.remove_axis(Axis(1)),
    }))
}
