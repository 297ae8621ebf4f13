//! Low-level DSP primitives used by the graph stages.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so they can live directly inside the voice pipelines rendered on the audio
//! thread. They stay focused on the signal-processing math; the graph layer
//! adds the block-pulling plumbing.

/// Peaking-EQ biquad (RBJ cookbook).
pub mod biquad;
/// White, pink and brown noise generators.
pub mod noise;
/// Windowed-sinc fractional resampler.
pub mod resample;

pub use biquad::{BiquadCoefficients, BiquadPeakingFilter};
pub use noise::{NoiseGenerator, NoiseKind};
pub use resample::Resampler;
