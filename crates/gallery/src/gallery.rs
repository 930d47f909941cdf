//! Greedy generation of a gallery of diverse promising points.
//!
//! The gallery is filled one point at a time: each selected point is fed back to a
//! working copy of the surrogate as a fictitious observation equal to the predicted
//! mean at that point (hallucination). The predictive mean is thus left unchanged while
//! the uncertainty collapses around the point, which drives the next selections away from it.
//!
//! Candidates of an iteration come from three sources:
//! * the maximum of the acquisition criterion found by a continuous optimizer,
//! * random LHS samples,
//! * the prior mean locations when the surrogate holds a prior belief.
//!
//! Random and prior candidates must be farther than `min_distance` from the gallery points
//! to replace the current best candidate.
use crate::acquisition::{Acquisition, MaximizeParams};
use crate::config::GalleryConfig;
use crate::errors::{GalleryError, Result};
use crate::optimizers::{Algorithm, Optimizer};
use crate::state::{Candidate, CandidateSource, GalleryState};
use crate::types::AcquisitionData;
use crate::utils::{best_within, clip, clip_within, is_far_enough};

use egallery_doe::{Lhs, SamplingMethod};
use egallery_gp::correlation_models::CorrelationModel;
use egallery_gp::{GaussianProcess, GpSurrogate, MeanPrior, UpdatableSurrogate};

use env_logger::{Builder, Env};
use finitediff::FiniteDiff;
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView, Axis, Data, Ix2};
use ndarray_rand::rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

/// Gallery builder allowing to specify the configuration
/// before building a [`Gallery`] within given bounds
#[derive(Clone, Debug, Default)]
pub struct GalleryBuilder {
    config: GalleryConfig,
}

impl GalleryBuilder {
    /// Set configuration of the gallery
    pub fn configure<F: FnOnce(GalleryConfig) -> GalleryConfig>(mut self, init: F) -> Self {
        self.config = init(self.config);
        self
    }

    /// Build a gallery generator within the continuous `xlimits` specified as
    /// [[lower, upper], ...] array where the number of rows gives the dimension of the inputs
    /// and the ith row is the interval of the ith component of the input x.
    pub fn within(self, xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<Gallery> {
        self.config.check()?;
        check_bounds(xlimits)?;
        Ok(Gallery::new(self.config, xlimits.to_owned()))
    }
}

fn check_bounds(xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<()> {
    if xlimits.ncols() != 2 || xlimits.nrows() == 0 {
        return Err(GalleryError::InvalidValue(format!(
            "bounds should be a (nx, 2) matrix with nx > 0, got {:?}",
            xlimits.dim()
        )));
    }
    for (i, b) in xlimits.rows().into_iter().enumerate() {
        if !b[0].is_finite() || !b[1].is_finite() || b[0] > b[1] {
            return Err(GalleryError::InvalidValue(format!(
                "bad bounds [{}, {}] for component {}",
                b[0], b[1], i
            )));
        }
    }
    Ok(())
}

/// Predictive mean of `model` at a single point
fn predicted_mean<S: GpSurrogate + ?Sized>(model: &S, x: &[f64]) -> Result<f64> {
    let pt = ArrayView::from_shape((1, x.len()), x)
        .map_err(|e| GalleryError::InvalidValue(e.to_string()))?;
    Ok(model.predict(&pt)?[0])
}

/// Gallery generator
#[derive(Clone, Debug)]
pub struct Gallery {
    config: GalleryConfig,
    xlimits: Array2<f64>,
}

impl Gallery {
    fn new(config: GalleryConfig, xlimits: Array2<f64>) -> Self {
        let env = Env::new().filter_or("EGALLERY_LOG", "info");
        let mut builder = Builder::from_env(env);
        let builder = builder.target(env_logger::Target::Stdout);
        builder.try_init().ok();
        Gallery { config, xlimits }
    }

    /// Configuration
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Search space bounds (nx, 2)
    pub fn xlimits(&self) -> &Array2<f64> {
        &self.xlimits
    }

    /// Random generator seeded from the configuration seed if any
    pub fn new_rng(&self) -> Xoshiro256Plus {
        match self.config.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        }
    }

    /// Generate a gallery of `n` points (n, nx) with regards to the given surrogate.
    ///
    /// The surrogate is left untouched: fictitious observations are only added
    /// to a working copy of it.
    pub fn generate<S>(&self, surrogate: &S, n: usize) -> Result<Array2<f64>>
    where
        S: UpdatableSurrogate + ?Sized,
    {
        info!(
            "Generate a gallery of {} point(s) using {:?} acquisition",
            n, self.config.acquisition
        );
        let mut rng = self.new_rng();
        let mut state = self.bootstrap(surrogate)?;
        while state.len() < n {
            self.step(&mut state, &mut rng)?;
        }
        let gallery = state.to_array(n)?;
        info!(
            "Gallery of {} point(s) generated ({} hallucinated observation(s))",
            gallery.nrows(),
            state.n_hallucinated()
        );
        Ok(gallery)
    }

    /// Initial gallery state.
    ///
    /// * with observed data: the best observation within bounds seeds the gallery
    ///   (when `use_best`) and the working model is a copy of the surrogate,
    /// * without data nor prior: the centroid of the search space seeds the gallery
    ///   and the working model holds it with a null output,
    /// * without data but with a prior: the best local optimum of the prior mean seeds
    ///   the gallery and the working model holds it with its mean value.
    ///
    /// The gallery starts empty when no seed can be found.
    pub fn bootstrap<S>(&self, surrogate: &S) -> Result<GalleryState<S::Corr>>
    where
        S: UpdatableSurrogate + ?Sized,
    {
        let nx = self.xlimits.nrows();
        if surrogate.kernel().dim() != nx || surrogate.xt().ncols() != nx {
            return Err(GalleryError::InvalidValue(format!(
                "surrogate dimension {} does not match bounds dimension {}",
                surrogate.kernel().dim(),
                nx
            )));
        }

        let xt = surrogate.xt();
        if xt.nrows() > 0 {
            let mut seed = None;
            if self.config.use_best {
                let yt = surrogate.yt();
                match best_within(&xt, &yt, &self.xlimits) {
                    Some(i) => {
                        debug!("Best observation {} (y={}) seeds the gallery", xt.row(i), yt[i]);
                        seed = Some(Candidate {
                            x: xt.row(i).to_owned(),
                            utility: yt[i],
                            source: CandidateSource::BestObserved,
                        })
                    }
                    None => warn!("No observation within bounds: gallery starts empty"),
                }
            }
            Ok(GalleryState::new(seed, surrogate.working_copy()?))
        } else if let Some(prior) = surrogate.prior() {
            match self.prior_optimum(surrogate, prior) {
                Some((x, mu)) => {
                    debug!("Prior optimum {} (mean={}) seeds the gallery", x, mu);
                    let working = GaussianProcess::new(
                        surrogate.kernel().clone(),
                        x.clone().insert_axis(Axis(0)),
                        Array1::from_elem(1, mu),
                        Some(prior.clone()),
                    )?;
                    let seed = Candidate {
                        x,
                        utility: mu,
                        source: CandidateSource::PriorOptimum,
                    };
                    Ok(GalleryState::new(Some(seed), working))
                }
                None => {
                    warn!("No prior optimum found: gallery starts empty");
                    let working = GaussianProcess::without_data(
                        surrogate.kernel().clone(),
                        nx,
                        Some(prior.clone()),
                    )?;
                    Ok(GalleryState::new(None, working))
                }
            }
        } else {
            let centroid = self.xlimits.map_axis(Axis(1), |b| (b[0] + b[1]) / 2.);
            debug!("Centroid {} seeds the gallery", centroid);
            let working = GaussianProcess::new(
                surrogate.kernel().clone(),
                centroid.clone().insert_axis(Axis(0)),
                Array1::zeros(1),
                None,
            )?;
            let seed = Candidate {
                x: centroid,
                utility: 0.,
                source: CandidateSource::Centroid,
            };
            Ok(GalleryState::new(Some(seed), working))
        }
    }

    /// Best local maximum of the surrogate mean started from each prior mean location,
    /// clipped into bounds. None if no mean value better than -inf is found.
    fn prior_optimum<S>(&self, surrogate: &S, prior: &MeanPrior<f64>) -> Option<(Array1<f64>, f64)>
    where
        S: UpdatableSurrogate + ?Sized,
    {
        let negmu = |x: &[f64], gradient: Option<&mut [f64]>, _u: &mut AcquisitionData| -> f64 {
            let f = |x: &Vec<f64>| -> f64 {
                predicted_mean(surrogate, x).map_or(f64::INFINITY, |mu| -mu)
            };
            if let Some(grad) = gradient {
                grad[..].copy_from_slice(&x.to_vec().central_diff(&f));
            }
            f(&x.to_vec())
        };
        let data = AcquisitionData::default();

        let mut best: Option<(Array1<f64>, f64)> = None;
        for m in prior.means().rows() {
            let xstart = clip_within(&prior.to_search_space(&m), &self.xlimits);
            let (_, x_opt) = Optimizer::new(Algorithm::Slsqp, &negmu, &data, &self.xlimits)
                .xinit(&xstart.view())
                .max_eval(self.config.max_eval)
                .ftol_rel(1e-8)
                .minimize();
            let x_opt = clip_within(&x_opt, &self.xlimits);
            let mu = match predicted_mean(surrogate, &x_opt.to_vec()) {
                Ok(mu) if !mu.is_nan() => mu,
                _ => f64::NEG_INFINITY,
            };
            debug!("Prior mean {} leads to {} (mean={})", m, x_opt, mu);
            if mu > best.as_ref().map_or(f64::NEG_INFINITY, |b| b.1) {
                best = Some((x_opt, mu));
            }
        }
        best
    }

    /// Select the next gallery point with regards to the current working model
    pub fn select_candidate<C, R>(&self, state: &GalleryState<C>, rng: &mut R) -> Result<Candidate>
    where
        C: CorrelationModel<f64>,
        R: Rng,
    {
        let model = state.working_model();
        let fbest = if model.nobs() > 0 {
            model.yt().fold(f64::NEG_INFINITY, |a, b| a.max(*b))
        } else {
            0.
        };
        let data = AcquisitionData {
            fbest,
            xi: self.config.xi,
            dim: self.xlimits.nrows(),
            iteration: model.nobs() + 1,
        };
        let acq = Acquisition::new(self.config.acquisition.criterion(), model, data);
        let min_distance = self.config.min_distance;

        let mut best: Option<Candidate> = None;
        if self.config.use_continuous_optimizer {
            let params = MaximizeParams {
                optimizer: self.config.infill_optimizer,
                n_start: self.config.n_start,
                max_eval: self.config.max_eval,
            };
            let (utility, x) = acq.maximize(&self.xlimits, &params, rng);
            debug!("Continuous optimizer candidate {} ({}={})", x, acq.name(), utility);
            best = Some(Candidate {
                x,
                utility,
                source: CandidateSource::ContinuousOptimizer,
            });
        }

        let mut fallback: Option<Candidate> = None;
        if self.config.samples > 0 {
            let samples = Lhs::new(&self.xlimits)
                .with_rng(Xoshiro256Plus::seed_from_u64(rng.gen()))
                .sample(self.config.samples);
            for x in samples.rows() {
                let utility = acq.value(&x);
                if fallback.as_ref().map_or(true, |c| utility > c.utility) {
                    fallback = Some(Candidate {
                        x: x.to_owned(),
                        utility,
                        source: CandidateSource::Fallback,
                    });
                }
                let best_utility = best.as_ref().map_or(f64::NEG_INFINITY, |c| c.utility);
                if utility > best_utility && is_far_enough(state.points(), &x, min_distance) {
                    best = Some(Candidate {
                        x: x.to_owned(),
                        utility,
                        source: CandidateSource::RandomSample,
                    });
                }
            }
            if let Some(c) = best.as_ref().filter(|c| c.source == CandidateSource::RandomSample) {
                debug!("Random sample candidate {} ({}={})", c.x, acq.name(), c.utility);
            }
        }

        if let Some(prior) = model.prior() {
            for m in prior.means().rows() {
                let x = prior.to_search_space(&clip(&m, 0., 1.));
                let utility = acq.value(&x);
                let best_utility = best.as_ref().map_or(f64::NEG_INFINITY, |c| c.utility);
                if utility > best_utility && is_far_enough(state.points(), &x, min_distance) {
                    debug!("Prior mean candidate {} ({}={})", x, acq.name(), utility);
                    best = Some(Candidate {
                        x,
                        utility,
                        source: CandidateSource::PriorMean,
                    });
                }
            }
        }

        match best {
            Some(candidate) => Ok(candidate),
            None => {
                let candidate = fallback.ok_or_else(|| {
                    GalleryError::InvalidValue("no candidate available".to_string())
                })?;
                warn!(
                    "No candidate farther than {} from the gallery: take best sample {}",
                    min_distance, candidate.x
                );
                Ok(candidate)
            }
        }
    }

    /// Select the next gallery point, append it to the gallery and
    /// hallucinate its observation in the working model
    pub fn step<C, R>(&self, state: &mut GalleryState<C>, rng: &mut R) -> Result<Candidate>
    where
        C: CorrelationModel<f64>,
        R: Rng,
    {
        let candidate = self.select_candidate(state, rng)?;
        let mu = state.hallucinate(candidate.clone())?;
        debug!(
            "Gallery point #{} {} from {:?} (hallucinated y={})",
            state.len(),
            candidate.x,
            candidate.source,
            mu
        );
        Ok(candidate)
    }
}
