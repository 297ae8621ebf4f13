//! Benchmarks for the three noise colors.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisebed::dsp::noise::{NoiseGenerator, NoiseKind};

use crate::BLOCK_SIZES;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for kind in NoiseKind::ALL {
            let mut generator = NoiseGenerator::new(kind, 1);
            group.bench_with_input(
                BenchmarkId::new(kind.name().to_lowercase(), size),
                &size,
                |b, _| b.iter(|| generator.render(black_box(&mut buffer))),
            );
        }
    }

    group.finish();
}
