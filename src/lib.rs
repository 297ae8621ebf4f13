pub mod dsp; // Noise, biquad and resampling primitives
pub mod engine; // Voice pipelines, the audio graph and its control handle
pub mod graph; // Pull-based audio stages
pub mod presets;
pub mod profile;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Nominal device rate. Every stage is built for this unless a
/// [`engine::GraphConfig`] says otherwise.
pub const SAMPLE_RATE: u32 = 48_000;

pub const BAND_COUNT: usize = 8;

/// Equalizer center frequencies in Hz, lowest band first.
pub const BAND_CENTERS: [f32; BAND_COUNT] =
    [60.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0];

pub const BAND_Q: f32 = 1.0;

pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_MAX: f32 = 2.0;

pub const DEFAULT_VOLUME: f32 = 0.6;
