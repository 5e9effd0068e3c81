use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ellipsoid_method::{Cut, Ellipsoid, EllipsoidStable, SearchSpace};
use ndarray::Array1;

fn rotating_cut(n: usize, k: usize) -> Cut {
    let mut g = Array1::zeros(n);
    g[k % n] = 1.0;
    g[(k + 1) % n] = 0.3;
    Cut::central(g)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for &n in &[4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("Ellipsoid", n), &n, |b, &n| {
            let mut e = Ellipsoid::new(Array1::zeros(n), 100.0).unwrap();
            let mut k = 0usize;
            b.iter(|| {
                let cut = rotating_cut(n, k);
                k += 1;
                black_box(e.update(&cut).unwrap());
            });
        });
        group.bench_with_input(BenchmarkId::new("EllipsoidStable", n), &n, |b, &n| {
            let mut e = EllipsoidStable::new(Array1::zeros(n), 100.0).unwrap();
            let mut k = 0usize;
            b.iter(|| {
                let cut = rotating_cut(n, k);
                k += 1;
                black_box(e.update(&cut).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
