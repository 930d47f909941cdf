use crate::criteria::AcquisitionCriterion;
use crate::types::AcquisitionData;
use egallery_gp::GpSurrogate;
use ndarray::ArrayView;

use serde::{Deserialize, Serialize};

/// Default confidence parameter of GP-UCB
pub const UCB_DELTA_DEFAULT: f64 = 0.1;

/// A structure for GP Upper Confidence Bound implementation
/// (Srinivas et al., Gaussian Process Optimization in the Bandit Setting)
///
/// `ucb(x) = mu(x) + sqrt(beta_t) * sigma(x)` where
/// `beta_t = 2 * ln(t^(d/2 + 2) * pi^2 / (3 * delta))`
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct UpperConfidenceBound {
    /// Confidence parameter in ]0, 1[
    pub delta: f64,
}

impl Default for UpperConfidenceBound {
    fn default() -> Self {
        UpperConfidenceBound {
            delta: UCB_DELTA_DEFAULT,
        }
    }
}

impl UpperConfidenceBound {
    /// Exploration weight at iteration `t` in dimension `dim`
    pub fn beta(&self, t: usize, dim: usize) -> f64 {
        let t = t.max(1) as f64;
        let pi2 = std::f64::consts::PI * std::f64::consts::PI;
        2. * ((dim as f64 / 2. + 2.) * t.ln() + (pi2 / (3. * self.delta)).ln())
    }
}

impl AcquisitionCriterion for UpperConfidenceBound {
    fn name(&self) -> &'static str {
        "UCB"
    }

    fn value(&self, x: &[f64], model: &dyn GpSurrogate, data: &AcquisitionData) -> f64 {
        let Ok(pt) = ArrayView::from_shape((1, x.len()), x) else {
            return f64::NEG_INFINITY;
        };
        match model.predict_valvar(&pt) {
            Ok((p, s)) => {
                let beta = self.beta(data.iteration, data.dim);
                p[0] + beta.max(0.).sqrt() * s[0].max(0.).sqrt()
            }
            _ => f64::NEG_INFINITY,
        }
    }
}

/// Upper Confidence Bound criterion with default confidence
pub const UCB: UpperConfidenceBound = UpperConfidenceBound {
    delta: UCB_DELTA_DEFAULT,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use egallery_gp::correlation_models::SquaredExponentialCorr;
    use egallery_gp::{GaussianProcess, Kernel};
    use ndarray::array;

    #[test]
    fn test_beta() {
        let pi2 = std::f64::consts::PI.powi(2);
        assert_abs_diff_eq!(UCB.beta(1, 2), 2. * (pi2 / 0.3).ln(), epsilon = 1e-12);
        // t^(d/2+2) with t = 4, d = 2
        assert_abs_diff_eq!(
            UCB.beta(4, 2),
            2. * ((4f64).powi(3) * pi2 / 0.3).ln(),
            epsilon = 1e-10
        );
        assert!(UCB.beta(10, 2) > UCB.beta(2, 2));
    }

    #[test]
    fn test_ucb_value() {
        let kernel = Kernel::new(SquaredExponentialCorr(), array![1.]).variance(4.);
        let gp = GaussianProcess::new(kernel, array![[0.]], array![1.], None).unwrap();
        let data = AcquisitionData {
            fbest: 1.,
            xi: 0.,
            dim: 1,
            iteration: 3,
        };
        // at the observation the bound is the observed value
        assert_abs_diff_eq!(UCB.value(&[0.], &gp, &data), 1., epsilon = 1e-5);
        // far from the data: prior mean 0 and full uncertainty sigma = 2
        let expected = 2. * UCB.beta(3, 1).sqrt();
        assert_abs_diff_eq!(UCB.value(&[50.], &gp, &data), expected, epsilon = 1e-8);
    }
}
