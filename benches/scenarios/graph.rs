//! Benchmarks for rendering the full two-voice graph.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisebed::{
    dsp::noise::NoiseKind,
    engine::{AudioGraph, GainAnimator, GraphConfig, StereoWidth},
    presets,
};

use crate::BLOCK_SIZES;

pub fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/graph");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size * 2];

        // === DEFAULT: white noise, flat EQ, unity speed ===
        let mut graph = AudioGraph::new(GraphConfig::new().seed(1));
        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| graph.render(black_box(&mut buffer)))
        });

        // === SHAPED: Infra preset at 1.5x speed, wide ===
        let mut graph = AudioGraph::new(GraphConfig::new().seed(1));
        let handle = graph.handle();
        if let Some(preset) = presets::find("Infra") {
            handle.apply_preset(preset);
        }
        handle.set_speed(1.5);
        handle.set_width(StereoWidth::Wide);
        group.bench_with_input(BenchmarkId::new("shaped_resampled", size), &size, |b, _| {
            b.iter(|| graph.render(black_box(&mut buffer)))
        });

        // === ANIMATED: a gain snapshot published before every block ===
        let mut graph = AudioGraph::new(GraphConfig::new().seed(1));
        let handle = graph.handle();
        handle.set_noise_kinds(NoiseKind::Pink);
        let mut animator = GainAnimator::new(2);
        group.bench_with_input(BenchmarkId::new("animated", size), &size, |b, _| {
            b.iter(|| {
                animator.tick(&handle);
                graph.render(black_box(&mut buffer))
            })
        });
    }

    group.finish();
}
