//! Benchmarks for the 8-band peaking equalizer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisebed::{graph::equalizer::EqualizerBank, graph::BlockProcessor, BAND_COUNT};

use crate::BLOCK_SIZES;

pub fn bench_equalizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/equalizer");
    let gains = [4.0, 3.0, 1.0, -2.0, -4.0, -6.0, -8.0, -10.0];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 * 0.37).sin() * 0.5)
            .collect();

        let mut bank = EqualizerBank::with_gains(48_000.0, &gains);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bank.process(black_box(&mut buffer));
            })
        });
    }

    // Coefficient recomputation cost, independent of block size
    let mut bank = EqualizerBank::new(48_000.0);
    let mut flip = false;
    group.bench_function("update_gains", |b| {
        b.iter(|| {
            flip = !flip;
            let gain = if flip { 6.0 } else { -6.0 };
            bank.update_gains(black_box(&[gain; BAND_COUNT]));
        })
    });

    group.finish();
}
