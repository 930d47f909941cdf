//! Gallery generation configuration.
use crate::errors::{GalleryError, Result};
use crate::types::*;

use serde::{Deserialize, Serialize};

/// Default number of random candidates drawn at each gallery iteration
pub const DEFAULT_SAMPLES: usize = 300;
/// Default minimal euclidean distance between a random or prior candidate and the gallery points
pub const DEFAULT_MIN_DISTANCE: f64 = 0.5;

/// Gallery configuration
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Seed the gallery with the best observed point lying within bounds
    pub(crate) use_best: bool,
    /// Number of random candidates (LHS) evaluated at each iteration
    pub(crate) samples: usize,
    /// Use a continuous optimizer of the acquisition criterion as a candidate source
    pub(crate) use_continuous_optimizer: bool,
    /// Exploration/exploitation trade-off of the acquisition criterion
    pub(crate) xi: f64,
    /// Random and prior candidates closer than this distance to a gallery point are rejected
    pub(crate) min_distance: f64,
    /// Criterion used to rank candidates
    pub(crate) acquisition: AcquisitionStrategy,
    /// The optimizer used to optimize the acquisition criterion
    pub(crate) infill_optimizer: InfillOptimizer,
    /// Number of starts of the acquisition criterion multistart optimization
    pub(crate) n_start: usize,
    /// Max number of evaluations of each local optimization
    pub(crate) max_eval: usize,
    /// A random generator seed used to get reproductible results.
    pub(crate) seed: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            use_best: true,
            samples: DEFAULT_SAMPLES,
            use_continuous_optimizer: true,
            xi: 0.0,
            min_distance: DEFAULT_MIN_DISTANCE,
            acquisition: AcquisitionStrategy::EI,
            infill_optimizer: InfillOptimizer::Cobyla,
            n_start: 10,
            max_eval: 500,
            seed: None,
        }
    }
}

impl GalleryConfig {
    /// Sets whether the best observed point seeds the gallery
    pub fn use_best(mut self, use_best: bool) -> Self {
        self.use_best = use_best;
        self
    }

    /// Sets the number of random candidates evaluated per iteration
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Enables or disables the continuous optimizer candidate
    pub fn use_continuous_optimizer(mut self, enabled: bool) -> Self {
        self.use_continuous_optimizer = enabled;
        self
    }

    /// Sets the exploration/exploitation trade-off
    pub fn xi(mut self, xi: f64) -> Self {
        self.xi = xi;
        self
    }

    /// Sets the minimal distance used to reject random and prior candidates
    pub fn min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the acquisition criterion
    pub fn acquisition(mut self, acquisition: AcquisitionStrategy) -> Self {
        self.acquisition = acquisition;
        self
    }

    /// Sets the acquisition criterion optimizer
    pub fn infill_optimizer(mut self, optimizer: InfillOptimizer) -> Self {
        self.infill_optimizer = optimizer;
        self
    }

    /// Sets the number of runs of the acquisition optimization (best result taken)
    pub fn n_start(mut self, n_start: usize) -> Self {
        self.n_start = n_start;
        self
    }

    /// Sets the max number of evaluations of a local optimization
    pub fn max_eval(mut self, max_eval: usize) -> Self {
        self.max_eval = max_eval;
        self
    }

    /// Allow to specify a seed for random number generator to allow
    /// reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check configuration consistency
    pub fn check(&self) -> Result<()> {
        if !self.use_continuous_optimizer && self.samples == 0 {
            return Err(GalleryError::InvalidConfigError(
                "no candidate source: samples should be positive when the continuous optimizer is disabled".to_string(),
            ));
        }
        if self.use_continuous_optimizer && (self.n_start == 0 || self.max_eval == 0) {
            return Err(GalleryError::InvalidConfigError(format!(
                "n_start ({}) and max_eval ({}) should be positive",
                self.n_start, self.max_eval
            )));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0. {
            return Err(GalleryError::InvalidConfigError(format!(
                "min_distance should be finite and non negative, got {}",
                self.min_distance
            )));
        }
        if !self.xi.is_finite() {
            return Err(GalleryError::InvalidConfigError(format!(
                "xi should be finite, got {}",
                self.xi
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert!(config.use_best);
        assert_eq!(config.samples, 300);
        assert!(config.use_continuous_optimizer);
        assert_eq!(config.xi, 0.0);
        assert_eq!(config.min_distance, 0.5);
        assert_eq!(config.acquisition, AcquisitionStrategy::EI);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_check() {
        assert!(GalleryConfig::default()
            .use_continuous_optimizer(false)
            .samples(0)
            .check()
            .is_err());
        assert!(GalleryConfig::default()
            .use_continuous_optimizer(false)
            .n_start(0)
            .check()
            .is_ok());
        assert!(GalleryConfig::default().n_start(0).check().is_err());
        assert!(GalleryConfig::default().min_distance(-1.).check().is_err());
        assert!(GalleryConfig::default().xi(f64::NAN).check().is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: GalleryConfig =
            serde_json::from_str(r#"{"samples": 50, "acquisition": "UCB", "seed": 42}"#).unwrap();
        assert_eq!(config.samples, 50);
        assert_eq!(config.acquisition, AcquisitionStrategy::UCB);
        assert_eq!(config.seed, Some(42));
        assert!(config.use_best);
        assert_eq!(config.infill_optimizer, InfillOptimizer::Cobyla);

        let json = serde_json::to_string(&config).unwrap();
        let back: GalleryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
