use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cscview::helpers::test_helpers::generate_random_csc;
use cscview::CrossprodParams;

fn bench_crossprod(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossprod");
    group.sample_size(10);

    for n_cols in [50, 200] {
        for density in [0.01, 0.1] {
            let parts = generate_random_csc(1000, n_cols, density, 42);
            let x = parts.view();
            let config_string = format!("{}, {}", n_cols, density);

            group.bench_with_input(
                BenchmarkId::new("serial", &config_string),
                &n_cols,
                |b, _| b.iter(|| x.crossprod()),
            );
            let params = CrossprodParams::new().parallel(true).min_parallel_cols(1);
            group.bench_with_input(
                BenchmarkId::new("parallel", &config_string),
                &n_cols,
                |b, _| b.iter(|| x.crossprod_with(&params).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_row_vs_column(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let parts = generate_random_csc(2000, 500, 0.05, 7);
    let x = parts.view();

    group.bench_function("column", |b| b.iter(|| x.column(250).unwrap()));
    group.bench_function("row", |b| b.iter(|| x.row(1000).unwrap()));
    group.bench_function("row_sums", |b| b.iter(|| x.row_sums()));
    group.bench_function("row_sums_by_rows", |b| {
        b.iter(|| (0..x.rows()).map(|i| x.row(i).unwrap().sum()).sum::<f64>())
    });

    group.finish();
}

criterion_group!(benches, bench_crossprod, bench_row_vs_column);
criterion_main!(benches);
