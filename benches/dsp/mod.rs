//! Benchmarks for low-level DSP primitives.

mod equalizer;
mod noise;
mod resample;

pub use equalizer::bench_equalizer;
pub use noise::bench_noise;
pub use resample::bench_resample;
