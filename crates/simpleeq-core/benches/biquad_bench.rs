//! Criterion benchmarks for simpleeq-core primitives
//!
//! Run with: cargo bench -p simpleeq-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use simpleeq_core::{Biquad, butterworth_q, highpass_coefficients, peaking_eq_coefficients};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_biquad_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("Biquad");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut section = Biquad::new();
        section.set_coefficients(peaking_eq_coefficients(1000.0, 1.0, 6.0, SAMPLE_RATE));

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut buffer = input.clone();
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = section.process(*sample);
                    }
                    black_box(buffer[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_coefficient_design(c: &mut Criterion) {
    c.bench_function("design/highpass_8th_order", |b| {
        b.iter(|| {
            for stage in 0..4 {
                black_box(highpass_coefficients(
                    black_box(80.0),
                    butterworth_q(4, stage),
                    SAMPLE_RATE,
                ));
            }
        })
    });

    c.bench_function("design/peak", |b| {
        b.iter(|| {
            black_box(peaking_eq_coefficients(
                black_box(750.0),
                black_box(1.0),
                black_box(6.0),
                SAMPLE_RATE,
            ))
        })
    });
}

criterion_group!(benches, bench_biquad_process, bench_coefficient_design);
criterion_main!(benches);
