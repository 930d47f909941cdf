use criterion::{criterion_group, criterion_main, Criterion};
use egallery_doe::{Lhs, LhsKind, SamplingMethod};
use ndarray::aview1;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

fn criterion_lhs(c: &mut Criterion) {
    let dims = [2, 10];
    let sizes = [300, 1000];

    let mut group = c.benchmark_group("doe");
    group.sample_size(10);
    let arr1 = aview1(&[0., 1.]);
    let rng = Xoshiro256Plus::seed_from_u64(42);
    for dim in dims {
        for size in sizes {
            group.bench_function(format!("lhs-classic-{dim}-dim-{size}-size"), |b| {
                let xlimits = arr1.broadcast((dim, 2)).unwrap();
                b.iter(|| {
                    std::hint::black_box(
                        Lhs::new(&xlimits)
                            .kind(LhsKind::Classic)
                            .with_rng(rng.clone())
                            .sample(size),
                    )
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, criterion_lhs);
criterion_main!(benches);
