//! Benchmarks for the filtering and FFT hot paths

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use filter_workbench::filters::{design_bandpass_butter, low_pass};
use filter_workbench::spectrum::fourier_transform;

fn bench_filter_design(c: &mut Criterion) {
    c.bench_function("design_bandpass_order_4", |b| {
        b.iter(|| design_bandpass_butter(black_box(4), black_box(0.2), black_box(0.4)).unwrap())
    });
}

fn bench_zero_phase_filtering(c: &mut Criterion) {
    let signal: Vec<f64> = (0..48000).map(|n| (n as f64 * 0.01).sin()).collect();

    c.bench_function("low_pass_one_second_48k", |b| {
        b.iter(|| low_pass(black_box(&signal), black_box(0.25), black_box(4)).unwrap())
    });
}

fn bench_full_fft(c: &mut Criterion) {
    let signal: Vec<f64> = (0..16384).map(|n| (n as f64 * 0.01).sin()).collect();

    c.bench_function("fourier_transform_16k", |b| {
        b.iter(|| fourier_transform(black_box(&signal), black_box(48000)))
    });
}

criterion_group!(
    benches,
    bench_filter_design,
    bench_zero_phase_filtering,
    bench_full_fft
);
criterion_main!(benches);
