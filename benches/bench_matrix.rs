use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix_base::{DMatrix, SMatrix};

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    let buf: Vec<f64> = (0..64 * 64).map(|x| x as f64).collect();

    group.bench_function("static 8x8 from_slice", |b| {
        b.iter(|| SMatrix::<f64, 8, 8>::from_slice(black_box(&buf[..64])))
    });
    group.bench_function("dynamic 64x64 from_slice_with_shape", |b| {
        b.iter(|| DMatrix::<f64>::from_slice_with_shape(black_box(&buf), 64, 64))
    });
    group.bench_function("dynamic 64x64 from_fill_with_shape", |b| {
        b.iter(|| DMatrix::from_fill_with_shape(black_box(1.0_f64), 64, 64))
    });
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    let m = DMatrix::<f64>::from_iter_with_shape((0..256 * 256).map(|x| x as f64), 256, 256);

    group.bench_function("row-major sum", |b| b.iter(|| black_box(&m).iter().sum::<f64>()));
    group.bench_function("column-major sum", |b| {
        b.iter(|| black_box(&m).column_iter().sum::<f64>())
    });
    #[cfg(feature = "rayon")]
    group.bench_function("parallel sum", |b| {
        use rayon::prelude::*;
        b.iter(|| black_box(&m).par_iter().sum::<f64>())
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let m = DMatrix::<i64>::from_iter_with_shape(0_i64..100 * 100, 100, 100);
    c.bench_function("render 100x100", |b| b.iter(|| black_box(&m).to_string()));
}

criterion_group!(benches, bench_construct, bench_iterate, bench_render);
criterion_main!(benches);
