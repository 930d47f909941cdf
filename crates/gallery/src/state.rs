//! Gallery generation state and candidates
use crate::errors::{GalleryError, Result};
use egallery_gp::correlation_models::CorrelationModel;
use egallery_gp::GaussianProcess;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Where a gallery point comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Best observation of the surrogate lying within bounds
    BestObserved,
    /// Center of the search space (no data, no prior)
    Centroid,
    /// Best local optimum of the prior mean (no data)
    PriorOptimum,
    /// Maximum of the acquisition criterion found by the continuous optimizer
    ContinuousOptimizer,
    /// Random LHS sample
    RandomSample,
    /// Prior mean location
    PriorMean,
    /// Best random sample taken regardless of the distance rule
    Fallback,
}

/// A candidate gallery point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Location
    pub x: Array1<f64>,
    /// Acquisition utility, or model output for bootstrap points
    pub utility: f64,
    /// Origin of the candidate
    pub source: CandidateSource,
}

/// State of a gallery generation: the points selected so far and the working
/// model conditioned on the fictitious observations made at those points.
#[derive(Clone, Debug)]
pub struct GalleryState<Corr: CorrelationModel<f64>> {
    points: Vec<Array1<f64>>,
    sources: Vec<CandidateSource>,
    working_model: GaussianProcess<f64, Corr>,
    n_hallucinated: usize,
}

impl<Corr: CorrelationModel<f64>> GalleryState<Corr> {
    pub(crate) fn new(seed: Option<Candidate>, working_model: GaussianProcess<f64, Corr>) -> Self {
        let (points, sources) = seed.map_or((vec![], vec![]), |c| (vec![c.x], vec![c.source]));
        GalleryState {
            points,
            sources,
            working_model,
            n_hallucinated: 0,
        }
    }

    /// Gallery points selected so far
    pub fn points(&self) -> &[Array1<f64>] {
        &self.points
    }

    /// Origins of the gallery points
    pub fn sources(&self) -> &[CandidateSource] {
        &self.sources
    }

    /// Number of gallery points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the gallery is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Model conditioned on the real and the hallucinated observations
    pub fn working_model(&self) -> &GaussianProcess<f64, Corr> {
        &self.working_model
    }

    /// Number of fictitious observations added to the working model
    pub fn n_hallucinated(&self) -> usize {
        self.n_hallucinated
    }

    /// Append the candidate to the gallery and condition the working model on
    /// its own predicted mean at the candidate location.
    /// Returns the hallucinated output.
    pub fn hallucinate(&mut self, candidate: Candidate) -> Result<f64> {
        let mu = self
            .working_model
            .predict(&candidate.x.view().insert_axis(Axis(0)))?[0];
        self.working_model.add_observation(&candidate.x, mu)?;
        self.points.push(candidate.x);
        self.sources.push(candidate.source);
        self.n_hallucinated += 1;
        Ok(mu)
    }

    /// Gallery points as a (n, nx) matrix, limited to the `n` first ones
    pub fn to_array(&self, n: usize) -> Result<Array2<f64>> {
        let nx = self.working_model.dims().0;
        let n = n.min(self.points.len());
        let data: Vec<f64> = self.points[..n]
            .iter()
            .flat_map(|p| p.iter().cloned())
            .collect();
        Array2::from_shape_vec((n, nx), data)
            .map_err(|e| GalleryError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use egallery_gp::correlation_models::SquaredExponentialCorr;
    use egallery_gp::Kernel;
    use ndarray::array;

    fn state() -> GalleryState<SquaredExponentialCorr> {
        let kernel = Kernel::new(SquaredExponentialCorr(), array![1., 1.]);
        let gp = GaussianProcess::new(kernel, array![[0., 0.]], array![2.], None).unwrap();
        let seed = Candidate {
            x: array![0., 0.],
            utility: 2.,
            source: CandidateSource::BestObserved,
        };
        GalleryState::new(Some(seed), gp)
    }

    #[test]
    fn test_hallucinate() {
        let mut state = state();
        assert_eq!(state.len(), 1);
        let x = array![0.5, 0.5];
        let expected = state
            .working_model()
            .predict(&x.view().insert_axis(Axis(0)))
            .unwrap()[0];
        let mu = state
            .hallucinate(Candidate {
                x: x.clone(),
                utility: 0.1,
                source: CandidateSource::RandomSample,
            })
            .unwrap();
        assert_abs_diff_eq!(mu, expected);
        assert_eq!(state.len(), 2);
        assert_eq!(state.n_hallucinated(), 1);
        assert_eq!(state.working_model().nobs(), 2);
        assert_abs_diff_eq!(state.working_model().yt()[1], expected);
        assert_eq!(
            state.sources(),
            &[CandidateSource::BestObserved, CandidateSource::RandomSample]
        );
    }

    #[test]
    fn test_failed_hallucination_keeps_state() {
        let mut state = state();
        let res = state.hallucinate(Candidate {
            x: array![0.5],
            utility: 0.1,
            source: CandidateSource::RandomSample,
        });
        assert!(res.is_err());
        assert_eq!(state.len(), 1);
        assert_eq!(state.working_model().nobs(), 1);
    }

    #[test]
    fn test_to_array() {
        let state = state();
        assert_eq!(state.to_array(5).unwrap(), array![[0., 0.]]);
        assert_eq!(state.to_array(0).unwrap().dim(), (0, 2));
    }
}
