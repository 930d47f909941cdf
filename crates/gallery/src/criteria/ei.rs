use crate::criteria::AcquisitionCriterion;
use crate::types::AcquisitionData;
use crate::utils::{norm_cdf, norm_pdf};
use egallery_gp::GpSurrogate;
use ndarray::ArrayView;

use serde::{Deserialize, Serialize};

/// A structure for Expected Improvement implementation (maximization form)
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ExpectedImprovement;

impl AcquisitionCriterion for ExpectedImprovement {
    fn name(&self) -> &'static str {
        "EI"
    }

    /// Compute EI criterion at given `x` point using the surrogate model `model`
    /// and the current best `fbest` shifted by the trade-off `xi`.
    /// Returns 0 when the prediction fails or the uncertainty vanishes.
    fn value(&self, x: &[f64], model: &dyn GpSurrogate, data: &AcquisitionData) -> f64 {
        let Ok(pt) = ArrayView::from_shape((1, x.len()), x) else {
            return 0.0;
        };
        match model.predict_valvar(&pt) {
            Ok((p, s)) => {
                if s[0] < f64::EPSILON {
                    0.0
                } else {
                    let sigma = s[0].sqrt();
                    let improvement = p[0] - data.fbest - data.xi;
                    let z = improvement / sigma;
                    improvement * norm_cdf(z) + sigma * norm_pdf(z)
                }
            }
            _ => 0.0,
        }
    }
}

/// Expected Improvement criterion
pub const EI: ExpectedImprovement = ExpectedImprovement {};
