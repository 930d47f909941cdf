use crate::types::{AcquisitionData, ObjFn};
use egallery_doe::{Lhs, LhsKind, SamplingMethod};
use ndarray::{Array1, Array2, Axis};
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_stats::QuantileExt;
use rand_xoshiro::Xoshiro256Plus;

/// Gradient free minimization taking the best point of several dense LHS designs
pub(crate) struct LhsOptimizer<'a, R: Rng + Clone> {
    xlimits: Array2<f64>,
    n_start: usize,
    n_points: usize,
    obj: &'a (dyn ObjFn<AcquisitionData> + Sync),
    obj_data: AcquisitionData,
    rng: R,
}

impl<'a> LhsOptimizer<'a, Xoshiro256Plus> {
    pub fn new(
        xlimits: &Array2<f64>,
        obj: &'a (dyn ObjFn<AcquisitionData> + Sync),
        obj_data: &AcquisitionData,
    ) -> LhsOptimizer<'a, Xoshiro256Plus> {
        Self::new_with_rng(xlimits, obj, obj_data, Xoshiro256Plus::from_entropy())
    }
}

impl<'a, R: Rng + Clone> LhsOptimizer<'a, R> {
    pub fn new_with_rng(
        xlimits: &Array2<f64>,
        obj: &'a (dyn ObjFn<AcquisitionData> + Sync),
        obj_data: &AcquisitionData,
        rng: R,
    ) -> LhsOptimizer<'a, R> {
        LhsOptimizer {
            xlimits: xlimits.to_owned(),
            n_start: 20,   // hardcoded
            n_points: 100, // hardcoded
            obj,
            obj_data: obj_data.clone(),
            rng,
        }
    }

    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> LhsOptimizer<'a, R2> {
        LhsOptimizer {
            xlimits: self.xlimits,
            n_start: self.n_start,
            n_points: self.n_points,
            obj: self.obj,
            obj_data: self.obj_data,
            rng,
        }
    }

    fn find_lhs_min(&self, lhs: &Lhs<f64, R>) -> Option<(Array1<f64>, f64)> {
        let n = self.n_points * self.xlimits.nrows();
        let doe = lhs.sample(n);

        let y: Array1<f64> = doe.map_axis(Axis(1), |x| {
            (self.obj)(&x.to_vec(), None, &mut self.obj_data.clone())
        });

        let vals: Vec<_> = y
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, v)| (doe.row(i).to_owned(), *v))
            .collect();
        let values: Array1<f64> = vals.iter().map(|(_, y)| *y).collect();
        match values.argmin() {
            Ok(index_min) => Some(vals[index_min].clone()),
            Err(err) => {
                log::warn!("LHS optimization cannot find minimum (Error: {})", err);
                None
            }
        }
    }

    /// Returns the minimum value and its location, `+inf` if every design evaluation fails
    pub fn minimize(&self) -> (f64, Array1<f64>) {
        let lhs = Lhs::new(&self.xlimits)
            .kind(LhsKind::Classic)
            .with_rng(self.rng.clone());

        // Make n_start optim
        let x_optims: Vec<_> = (0..self.n_start)
            .filter_map(|_| self.find_lhs_min(&lhs))
            .collect();

        // Pick best
        let yvals: Array1<_> = x_optims.iter().map(|opt| opt.1).collect();
        match yvals.argmin() {
            Ok(index_min) => (yvals[index_min], x_optims[index_min].0.to_owned()),
            Err(_) => (
                f64::INFINITY,
                self.xlimits.map_axis(Axis(1), |b| (b[0] + b[1]) / 2.),
            ),
        }
    }
}
