use egallery_gp::correlation_models::SquaredExponentialCorr;
use egallery_gp::{Kernel, Kriging};
use ndarray::{arr2, concatenate, Array, Array1, Array2, Axis};

fn xsinx(x: &Array2<f64>) -> Array1<f64> {
    ((x - 3.5) * ((x - 3.5) / std::f64::consts::PI).mapv(|v| v.sin())).remove_axis(Axis(1))
}

fn main() {
    let xt = arr2(&[[0.0], [5.0], [10.0], [15.0], [18.0], [20.0], [25.0]]);
    let yt = xsinx(&xt);

    println!("Condition kriging surrogate of 'xsinx' on {}", xt.column(0));
    let kernel = Kernel::new(SquaredExponentialCorr(), Array1::from_elem(1, 0.2)).variance(100.);
    let mut kriging = Kriging::new(kernel, xt, yt, None).expect("GP building");

    let xtest = Array::linspace(0., 25., 26).insert_axis(Axis(1));
    let ytest = xsinx(&xtest);
    let (ypred, yvar) = kriging.predict_valvar(&xtest).expect("Kriging prediction");

    println!("Compute prediction errors (x, err(x), sigma(x))");
    println!(
        "{}",
        concatenate![
            Axis(1),
            xtest,
            (ypred - &ytest).insert_axis(Axis(1)),
            yvar.mapv(f64::sqrt).insert_axis(Axis(1))
        ]
    );

    // Condition on the predicted mean at x = 12: the uncertainty collapses there
    let x = Array1::from_elem(1, 12.);
    let mean = kriging
        .predict(&x.view().insert_axis(Axis(0)))
        .expect("Kriging prediction")[0];
    kriging.add_observation(&x, mean).expect("GP update");
    println!(
        "sigma(12) after conditioning on its own prediction: {}",
        kriging
            .predict_var(&x.view().insert_axis(Axis(0)))
            .expect("Kriging prediction")[0]
            .sqrt()
    );
}
