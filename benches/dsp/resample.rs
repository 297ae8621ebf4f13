//! Benchmarks for the windowed-sinc resampler at typical speeds.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisebed::dsp::{noise::NoiseGenerator, resample::Resampler};

use crate::BLOCK_SIZES;

pub fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resample");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for speed in [0.5f64, 1.5, 2.0] {
            let mut resampler = Resampler::new(speed);
            let mut generator = NoiseGenerator::white(3);
            group.bench_with_input(
                BenchmarkId::new(format!("speed_{speed}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        resampler.process(black_box(&mut buffer), |input| {
                            generator.render(input)
                        })
                    })
                },
            );
        }
    }

    group.finish();
}
