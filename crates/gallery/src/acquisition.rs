//! An acquisition criterion bound to a surrogate model
use crate::criteria::AcquisitionCriterion;
use crate::optimizers::{minimize_multistart, Algorithm};
use crate::types::{AcquisitionData, InfillOptimizer};

use egallery_gp::GpSurrogate;
use finitediff::FiniteDiff;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use ndarray_rand::rand::Rng;

/// Parameters of the acquisition maximization
#[derive(Clone, Copy, Debug)]
pub struct MaximizeParams {
    /// Local optimizer
    pub optimizer: InfillOptimizer,
    /// Number of local optimizations
    pub n_start: usize,
    /// Max number of evaluations per local optimization
    pub max_eval: usize,
}

/// Utility function: a criterion evaluated against a given surrogate and acquisition data
pub struct Acquisition<'a> {
    criterion: Box<dyn AcquisitionCriterion>,
    model: &'a dyn GpSurrogate,
    data: AcquisitionData,
}

impl<'a> Acquisition<'a> {
    /// Constructor
    pub fn new(
        criterion: Box<dyn AcquisitionCriterion>,
        model: &'a dyn GpSurrogate,
        data: AcquisitionData,
    ) -> Self {
        Acquisition {
            criterion,
            model,
            data,
        }
    }

    /// Name of the underlying criterion
    pub fn name(&self) -> &'static str {
        self.criterion.name()
    }

    /// Utility at `x`
    pub fn value(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix1>) -> f64 {
        self.criterion.value(&x.to_vec(), self.model, &self.data)
    }

    /// Utilities at `x` rows
    pub fn values(&self, x: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Array1<f64> {
        x.map_axis(Axis(1), |xi| self.value(&xi))
    }

    /// Maximize the utility within `xlimits`.
    /// Returns the best utility found and its location.
    pub fn maximize<R: Rng>(
        &self,
        xlimits: &Array2<f64>,
        params: &MaximizeParams,
        rng: &mut R,
    ) -> (f64, Array1<f64>) {
        let obj = |x: &[f64], gradient: Option<&mut [f64]>, data: &mut AcquisitionData| -> f64 {
            // Optimizers may pass NaNs
            if x.iter().any(|x| x.is_nan()) {
                return f64::INFINITY;
            }
            let data: &AcquisitionData = data;
            if let Some(grad) = gradient {
                let f = |x: &Vec<f64>| -> f64 { -self.criterion.value(x, self.model, data) };
                grad[..].copy_from_slice(&x.to_vec().central_diff(&f));
            }
            -self.criterion.value(x, self.model, data)
        };
        let algorithm = match params.optimizer {
            InfillOptimizer::Slsqp => Algorithm::Slsqp,
            InfillOptimizer::Cobyla => Algorithm::Cobyla,
        };
        let (y_opt, x_opt) = minimize_multistart(
            algorithm,
            &obj,
            &self.data,
            xlimits,
            params.n_start,
            params.max_eval,
            rng,
        );
        (-y_opt, x_opt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::EI;
    use approx::assert_abs_diff_eq;
    use egallery_gp::correlation_models::SquaredExponentialCorr;
    use egallery_gp::{GaussianProcess, Kernel};
    use ndarray::array;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    fn model() -> GaussianProcess<f64, SquaredExponentialCorr> {
        let kernel = Kernel::new(SquaredExponentialCorr(), array![1.]);
        GaussianProcess::new(kernel, array![[-1.], [0.], [1.]], array![0., 1., 0.], None).unwrap()
    }

    #[test]
    fn test_values() {
        let gp = model();
        let data = AcquisitionData {
            fbest: 1.,
            ..Default::default()
        };
        let acq = Acquisition::new(Box::new(EI), &gp, data);
        assert_eq!(acq.name(), "EI");
        let x = array![[0.], [3.]];
        let vals = acq.values(&x);
        assert_abs_diff_eq!(vals[0], 0., epsilon = 1e-6);
        assert_abs_diff_eq!(vals[1], acq.value(&array![3.]));
    }

    #[test]
    fn test_maximize() {
        let gp = model();
        let data = AcquisitionData {
            fbest: 1.,
            dim: 1,
            iteration: 1,
            ..Default::default()
        };
        let acq = Acquisition::new(Box::new(EI), &gp, data);
        let xlimits = array![[-3., 3.]];
        let params = MaximizeParams {
            optimizer: InfillOptimizer::Cobyla,
            n_start: 5,
            max_eval: 200,
        };
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let (u, x) = acq.maximize(&xlimits, &params, &mut rng);
        assert!(x[0] >= -3. && x[0] <= 3.);
        assert_abs_diff_eq!(u, acq.value(&x), epsilon = 1e-10);
        // no sampled point does much better than the optimum
        let grid = Array1::linspace(-3., 3., 61).insert_axis(Axis(1));
        let best_grid = acq.values(&grid).fold(f64::NEG_INFINITY, |a, b| a.max(*b));
        assert!(u >= best_grid - 1e-3);
    }
}
