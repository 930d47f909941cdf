//! A module for correlation models used to build the covariance kernel of the GP model.
//!
//! The following correlation models are implemented:
//! * squared exponential,
//! * absolute exponential,
//! * matern 3/2,
//! * matern 5/2.

use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2, Zip};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// A trait for using a correlation model in GP regression
pub trait CorrelationModel<F: Float>:
    Clone + Copy + Default + fmt::Display + fmt::Debug + Sync + Send
{
    /// Compute correlation values r(x, x') given componentwise differences `d` between x and x'
    /// and `theta` parameters, where:
    /// `theta` : hyperparameters (nx,), the inverse of length scales
    /// `d`     : differences (n, nx)
    ///
    /// Returns a (n, 1) column of correlation values.
    fn value(
        &self,
        d: &ArrayBase<impl Data<Elem = F>, Ix2>,
        theta: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Array2<F>;
}

macro_rules! string_conversions {
    ($corr:ident, $name:literal) => {
        impl From<$corr> for String {
            fn from(_item: $corr) -> String {
                $name.to_string()
            }
        }

        impl TryFrom<String> for $corr {
            type Error = &'static str;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                if s == $name {
                    Ok(Self::default())
                } else {
                    Err(concat!("Bad string value for ", stringify!($corr), ", should be '", $name, "'"))
                }
            }
        }

        impl fmt::Display for $corr {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, $name)
            }
        }
    };
}

/// Squared exponential correlation models
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(into = "String"),
    serde(try_from = "String")
)]
pub struct SquaredExponentialCorr();

string_conversions!(SquaredExponentialCorr, "SquaredExponential");

impl<F: Float> CorrelationModel<F> for SquaredExponentialCorr {
    ///   d
    /// prod exp( - |theta_j * d_j|^2 / 2 )
    ///  j=1
    fn value(
        &self,
        d: &ArrayBase<impl Data<Elem = F>, Ix2>,
        theta: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Array2<F> {
        let theta2 = theta.mapv(|v| v * v);
        let r = d.mapv(|v| v * v).dot(&theta2);
        r.mapv(|v| F::exp(F::cast(-0.5) * v))
            .insert_axis(Axis(1))
    }
}

/// Absolute exponential correlation models
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(into = "String"),
    serde(try_from = "String")
)]
pub struct AbsoluteExponentialCorr();

string_conversions!(AbsoluteExponentialCorr, "AbsoluteExponential");

impl<F: Float> CorrelationModel<F> for AbsoluteExponentialCorr {
    ///   d
    /// prod exp( - theta_j * |d_j| )
    ///  j=1
    fn value(
        &self,
        d: &ArrayBase<impl Data<Elem = F>, Ix2>,
        theta: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Array2<F> {
        let r = d.mapv(|v| v.abs()).dot(theta);
        r.mapv(|v| F::exp(-v)).insert_axis(Axis(1))
    }
}

/// Matern 3/2 correlation model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(into = "String"),
    serde(try_from = "String")
)]
pub struct Matern32Corr();

string_conversions!(Matern32Corr, "Matern32");

impl<F: Float> CorrelationModel<F> for Matern32Corr {
    ///   d
    /// prod (1 + sqrt(3) * theta_j * |d_j|) exp( - sqrt(3) * theta_j * |d_j| )
    ///  j=1
    fn value(
        &self,
        d: &ArrayBase<impl Data<Elem = F>, Ix2>,
        theta: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Array2<F> {
        let sqrt3 = F::cast(3.).sqrt();
        let abs_d = d.mapv(|v| v.abs());

        let mut a = Array1::ones(d.nrows());
        Zip::from(&mut a).and(abs_d.rows()).for_each(|a_i, abs_d_i| {
            Zip::from(abs_d_i).and(theta).for_each(|abs_d_ij, theta_j| {
                *a_i *= F::one() + sqrt3 * *theta_j * *abs_d_ij;
            });
        });
        let b = abs_d.dot(theta).mapv(|v| F::exp(-sqrt3 * v));
        (a * b).insert_axis(Axis(1))
    }
}

/// Matern 5/2 correlation model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(into = "String"),
    serde(try_from = "String")
)]
pub struct Matern52Corr();

string_conversions!(Matern52Corr, "Matern52");

impl<F: Float> CorrelationModel<F> for Matern52Corr {
    ///   d
    /// prod (1 + sqrt(5) * theta_j * |d_j| + (5./3.) * theta_j^2 * |d_j|^2) exp( - sqrt(5) * theta_j * |d_j| )
    ///  j=1
    fn value(
        &self,
        d: &ArrayBase<impl Data<Elem = F>, Ix2>,
        theta: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Array2<F> {
        let sqrt5 = F::cast(5.).sqrt();
        let div5_3 = F::cast(5. / 3.);
        let abs_d = d.mapv(|v| v.abs());

        let mut a = Array1::ones(d.nrows());
        Zip::from(&mut a).and(abs_d.rows()).for_each(|a_i, abs_d_i| {
            Zip::from(abs_d_i).and(theta).for_each(|abs_d_ij, theta_j| {
                let v = *theta_j * *abs_d_ij;
                *a_i *= F::one() + sqrt5 * v + div5_3 * v * v;
            });
        });
        let b = abs_d.dot(theta).mapv(|v| F::exp(-sqrt5 * v));
        (a * b).insert_axis(Axis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::pairwise_differences;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, array, s};

    // upper triangle differences of the training points (0, 1), (0, 2), (1, 2)
    fn cross_differences(xt: &Array2<f64>) -> Array2<f64> {
        let n = xt.nrows();
        let d = pairwise_differences(xt, xt);
        let rows: Vec<_> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| i * n + j))
            .collect();
        let mut res = Array2::zeros((rows.len(), xt.ncols()));
        for (k, r) in rows.iter().enumerate() {
            res.row_mut(k).assign(&d.slice(s![*r, ..]));
        }
        res
    }

    #[test]
    fn test_squared_exponential_2d() {
        let xt = array![[0., 1.], [2., 3.], [4., 5.]];
        let d = cross_differences(&xt);
        let res = SquaredExponentialCorr::default().value(&d, &arr1(&[f64::sqrt(2.), 2.]));
        let expected = array![[6.14421235e-06], [1.42516408e-21], [6.14421235e-06]];
        assert_abs_diff_eq!(res, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_matern32_2d() {
        let xt = array![[0., 1.], [2., 3.], [4., 5.]];
        let d = cross_differences(&xt);
        let res = Matern32Corr::default().value(&d, &arr1(&[1., 2.]));
        let expected = array![[1.08539595e-03], [1.10776401e-07], [1.08539595e-03]];
        assert_abs_diff_eq!(res, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_matern52_2d() {
        let xt = array![[0., 1.], [2., 3.], [4., 5.]];
        let d = cross_differences(&xt);
        let res = Matern52Corr::default().value(&d, &arr1(&[1., 2.]));
        let expected = array![[6.62391590e-04], [1.02117882e-08], [6.62391590e-04]];
        assert_abs_diff_eq!(res, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_absolute_exponential_1d() {
        let d = array![[0.], [0.5], [-2.]];
        let res = AbsoluteExponentialCorr::default().value(&d, &arr1(&[2.]));
        let expected = array![[1.], [(-1f64).exp()], [(-4f64).exp()]];
        assert_abs_diff_eq!(res, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_correlation_at_zero_distance() {
        let d = Array2::<f64>::zeros((2, 3));
        let theta = arr1(&[0.3, 1., 5.]);
        assert_abs_diff_eq!(
            SquaredExponentialCorr::default().value(&d, &theta),
            Array2::ones((2, 1))
        );
        assert_abs_diff_eq!(
            Matern32Corr::default().value(&d, &theta),
            Array2::ones((2, 1))
        );
        assert_abs_diff_eq!(
            Matern52Corr::default().value(&d, &theta),
            Array2::ones((2, 1))
        );
    }

    #[test]
    fn test_corr_names() {
        assert_eq!(String::from(Matern52Corr()), "Matern52");
        assert!(Matern32Corr::try_from("Matern32".to_string()).is_ok());
        assert!(Matern32Corr::try_from("Matern52".to_string()).is_err());
    }
}
