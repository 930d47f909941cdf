use egallery::{GalleryBuilder, GalleryState};
use egallery_gp::correlation_models::Matern52Corr;
use egallery_gp::{GaussianProcess, Kernel, MeanPrior};
use ndarray::{array, Array2};

fn show(state: &GalleryState<Matern52Corr>) {
    for (x, source) in state.points().iter().zip(state.sources()) {
        println!("  {x} <- {source:?}");
    }
}

fn main() {
    let xlimits = array![[0., 25.]];
    let kernel = Kernel::new(Matern52Corr(), array![0.3]).variance(4.);

    // Cold start with a prior belief on promising regions (normalized coordinates)
    let prior = MeanPrior::new(array![[0.2], [0.8]], &xlimits)
        .expect("prior")
        .weights(array![1., 2.])
        .expect("prior weights");
    let model = GaussianProcess::without_data(kernel.clone(), 1, Some(prior)).expect("GP");
    let gallery = GalleryBuilder::default()
        .configure(|config| config.samples(100).seed(42))
        .within(&xlimits)
        .expect("gallery configured");
    let mut rng = gallery.new_rng();
    let mut state = gallery.bootstrap(&model).expect("gallery bootstrap");
    while state.len() < 4 {
        gallery.step(&mut state, &mut rng).expect("gallery step");
    }
    println!("Gallery from prior belief:");
    show(&state);

    // With observations of `x sin(x)`
    let xt: Array2<f64> = array![[0.0], [5.0], [10.0], [15.0], [18.0], [20.0], [25.0]];
    let yt = xt.column(0).mapv(|v| (v - 3.5) * ((v - 3.5) / std::f64::consts::PI).sin());
    let model = GaussianProcess::new(kernel, xt, yt, None).expect("GP");
    let points = gallery.generate(&model, 5).expect("gallery");
    println!("Gallery from observations:\n{points}");
}
