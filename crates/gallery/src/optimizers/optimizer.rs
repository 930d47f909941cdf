use crate::types::{AcquisitionData, ObjFn};
use cobyla::RhoBeg;
use ndarray::{arr1, Array1, Array2, ArrayView1};

#[derive(Copy, Clone, Debug)]
pub enum Algorithm {
    Cobyla,
    Slsqp,
}

pub const INFILL_MAX_EVAL_DEFAULT: usize = 2000;

type Cstr = fn(&[f64], &mut AcquisitionData) -> f64;
type SlsqpCstr = fn(&[f64], Option<&mut [f64]>, &mut AcquisitionData) -> f64;

/// Facade for various optimization algorithms minimizing a function within bounds
pub(crate) struct Optimizer<'a> {
    algo: Algorithm,
    fun: &'a (dyn ObjFn<AcquisitionData> + Sync),
    bounds: Array2<f64>,
    user_data: &'a AcquisitionData,
    max_eval: usize,
    xinit: Option<Array1<f64>>,
    ftol_abs: Option<f64>,
    ftol_rel: Option<f64>,
}

impl<'a> Optimizer<'a> {
    pub fn new(
        algo: Algorithm,
        fun: &'a (dyn ObjFn<AcquisitionData> + Sync),
        user_data: &'a AcquisitionData,
        bounds: &Array2<f64>,
    ) -> Self {
        Optimizer {
            algo,
            fun,
            bounds: bounds.clone(),
            user_data,
            max_eval: INFILL_MAX_EVAL_DEFAULT,
            xinit: None,
            ftol_abs: None,
            ftol_rel: None,
        }
    }

    pub fn ftol_abs(&mut self, ftol_abs: f64) -> &mut Self {
        self.ftol_abs = Some(ftol_abs);
        self
    }

    pub fn ftol_rel(&mut self, ftol_rel: f64) -> &mut Self {
        self.ftol_rel = Some(ftol_rel);
        self
    }

    pub fn max_eval(&mut self, max_eval: usize) -> &mut Self {
        self.max_eval = max_eval;
        self
    }

    pub fn xinit(&mut self, xinit: &ArrayView1<f64>) -> &mut Self {
        self.xinit = Some(xinit.to_owned());
        self
    }

    /// Returns the minimum value and its location, `+inf` when the optimizer fails.
    /// Starts from the middle of the bounds when no initial point is given.
    pub fn minimize(&self) -> (f64, Array1<f64>) {
        let xinit = self.xinit.clone().unwrap_or_else(|| {
            self.bounds
                .outer_iter()
                .map(|row| (row[0] + row[1]) / 2.)
                .collect()
        });
        let xinit = xinit.to_vec();
        let bounds: Vec<_> = self
            .bounds
            .outer_iter()
            .map(|row| (row[0], row[1]))
            .collect();
        let res = match self.algo {
            Algorithm::Cobyla => {
                let cstrs: Vec<Cstr> = vec![];
                let res = cobyla::minimize(
                    |x: &[f64], u: &mut AcquisitionData| (self.fun)(x, None, u),
                    &xinit,
                    &bounds,
                    &cstrs,
                    self.user_data.clone(),
                    self.max_eval,
                    RhoBeg::All(0.5),
                    Some(cobyla::StopTols {
                        ftol_rel: self.ftol_rel.unwrap_or(0.0),
                        ftol_abs: self.ftol_abs.unwrap_or(0.0),
                        ..cobyla::StopTols::default()
                    }),
                );
                match res {
                    Ok((_, x_opt, y_opt)) => (y_opt, arr1(&x_opt)),
                    Err((_, x_opt, _)) => (f64::INFINITY, arr1(&x_opt)),
                }
            }
            Algorithm::Slsqp => {
                let cstrs: Vec<SlsqpCstr> = vec![];
                let res = slsqp::minimize(
                    self.fun,
                    &xinit,
                    &bounds,
                    &cstrs,
                    self.user_data.clone(),
                    self.max_eval,
                    Some(slsqp::StopTols {
                        ftol_rel: self.ftol_rel.unwrap_or(0.0),
                        ftol_abs: self.ftol_abs.unwrap_or(0.0),
                        ..slsqp::StopTols::default()
                    }),
                );
                match res {
                    Ok((_, x_opt, y_opt)) => (y_opt, arr1(&x_opt)),
                    Err((_, x_opt, _)) => (f64::INFINITY, arr1(&x_opt)),
                }
            }
        };
        log::debug!("... end optimization");
        res
    }
}
