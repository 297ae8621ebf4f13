use crate::{
    dsp::resample::Resampler,
    graph::node::AudioSource,
};

/// Speeds within this distance of 1.0 are played without resampling.
pub const SPEED_EPSILON: f32 = 0.001;

/// Whether `speed` needs a resampling stage at all.
pub fn needs_resampling(speed: f32) -> bool {
    (speed - 1.0).abs() > SPEED_EPSILON
}

/// Plays an upstream source back at `speed` times its rate.
///
/// Pulling N samples consumes about `N * speed` upstream samples, so pitch and
/// duration change together (tape-style, not time-stretch). Aliasing at
/// speeds above 1.0 is suppressed by the band-limited kernel in
/// [`Resampler`].
///
/// The resampler's internal window is the stage's only state. Replacing the
/// stage (on a speed change) throws it away, which is audible as a small
/// discontinuity.
pub struct SpeedStage<S> {
    source: S,
    resampler: Resampler,
}

impl<S: AudioSource> SpeedStage<S> {
    pub fn new(source: S, speed: f32) -> Self {
        Self {
            source,
            resampler: Resampler::new(speed as f64),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Take the upstream source back, discarding resampler state.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: AudioSource> AudioSource for SpeedStage<S> {
    fn fill(&mut self, out: &mut [f32]) -> usize {
        let source = &mut self.source;
        self.resampler.process(out, |input| source.fill(input));
        out.len()
    }
}
