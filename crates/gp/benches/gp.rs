use criterion::{criterion_group, criterion_main, Criterion};
use egallery_gp::correlation_models::SquaredExponentialCorr;
use egallery_gp::{GaussianProcess, Kernel};
use ndarray::{Array, Array1, Array2, Zip};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;

fn griewank(x: &Array2<f64>) -> Array1<f64> {
    let dim = x.ncols();
    let d = Array1::linspace(1., dim as f64, dim).mapv(|v| v.sqrt());
    let mut y = Array1::zeros(x.nrows());
    Zip::from(&mut y).and(x.rows()).for_each(|y, x| {
        *y = x.mapv(|v| v * v).sum() / 4000.
            - (&x / &d).mapv(|v| v.cos()).fold(1., |acc, x| acc * x)
            + 1.0;
    });
    y
}

fn criterion_gp(c: &mut Criterion) {
    let dims = [2, 5];
    let nts = [100, 300];

    let mut group = c.benchmark_group("gp");
    group.sample_size(20);
    for (dim, nt) in dims.iter().zip(nts.iter()) {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let xt = Array::random_using((*nt, *dim), Uniform::new(-600., 600.), &mut rng);
        let yt = griewank(&xt);
        let kernel =
            Kernel::new(SquaredExponentialCorr(), Array1::from_elem(*dim, 0.01)).nugget(1e-8);

        group.bench_function(format!("gp fit {dim}"), |b| {
            b.iter(|| {
                std::hint::black_box(
                    GaussianProcess::new(kernel.clone(), xt.clone(), yt.clone(), None)
                        .expect("GP fit error"),
                )
            });
        });

        let gp = GaussianProcess::new(kernel.clone(), xt.clone(), yt.clone(), None)
            .expect("GP fit error");
        let x = Array::random_using((1, *dim), Uniform::new(-600., 600.), &mut rng);
        group.bench_function(format!("gp add observation {dim}"), |b| {
            b.iter(|| {
                let mut wc = gp.clone();
                wc.add_observation(&x.row(0), 0.0)
                    .expect("GP update error");
                std::hint::black_box(wc)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_gp);
criterion_main!(benches);
