//! Capabilities a surrogate model has to offer to be used by acquisition routines.
use crate::algorithm::GaussianProcess;
use crate::correlation_models::CorrelationModel;
use crate::errors::Result;
use crate::parameters::Kernel;
use crate::prior::MeanPrior;
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::fmt;

/// A trait for gaussian process surrogate predictions
pub trait GpSurrogate: fmt::Display + Sync + Send {
    /// Returns input/output dimensions
    fn dims(&self) -> (usize, usize);
    /// Predict output values at n points given as (n, xdim) matrix.
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>>;
    /// Predict variance values at n points given as (n, xdim) matrix.
    fn predict_var(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>>;
    /// Predict both output values and variance values at n points given as (n, xdim) matrix.
    fn predict_valvar(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)>;
}

/// A surrogate exposing what is needed to build an independent working copy of it,
/// namely its kernel, its observations and its prior belief, and which can be
/// conditioned on new observations.
pub trait UpdatableSurrogate: GpSurrogate {
    /// Correlation model of the kernel
    type Corr: CorrelationModel<f64>;

    /// Covariance kernel
    fn kernel(&self) -> &Kernel<f64, Self::Corr>;
    /// Observed inputs (n, xdim)
    fn xt(&self) -> ArrayView2<f64>;
    /// Observed outputs (n,)
    fn yt(&self) -> ArrayView1<f64>;
    /// Prior belief if any
    fn prior(&self) -> Option<&MeanPrior<f64>>;
    /// Condition the model on a new observation `(x, y)`
    fn add_observation(&mut self, x: &ArrayView1<f64>, y: f64) -> Result<()>;

    /// Build a gaussian process owning copies of the kernel, the observations
    /// and the prior of this surrogate. Updating the copy leaves `self` untouched.
    fn working_copy(&self) -> Result<GaussianProcess<f64, Self::Corr>> {
        GaussianProcess::new(
            self.kernel().clone(),
            self.xt().to_owned(),
            self.yt().to_owned(),
            self.prior().cloned(),
        )
    }
}

impl<Corr: CorrelationModel<f64>> GpSurrogate for GaussianProcess<f64, Corr> {
    fn dims(&self) -> (usize, usize) {
        self.dims()
    }
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>> {
        self.predict(x)
    }
    fn predict_var(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>> {
        self.predict_var(x)
    }
    fn predict_valvar(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        self.predict_valvar(x)
    }
}

impl<Corr: CorrelationModel<f64>> UpdatableSurrogate for GaussianProcess<f64, Corr> {
    type Corr = Corr;

    fn kernel(&self) -> &Kernel<f64, Corr> {
        self.kernel()
    }
    fn xt(&self) -> ArrayView2<f64> {
        GaussianProcess::xt(self).view()
    }
    fn yt(&self) -> ArrayView1<f64> {
        GaussianProcess::yt(self).view()
    }
    fn prior(&self) -> Option<&MeanPrior<f64>> {
        self.prior()
    }
    fn add_observation(&mut self, x: &ArrayView1<f64>, y: f64) -> Result<()> {
        self.add_observation(x, y)
    }
    fn working_copy(&self) -> Result<GaussianProcess<f64, Corr>> {
        Ok(self.clone())
    }
}
