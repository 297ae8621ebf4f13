use std::mem;

use crate::{
    dsp::noise::{NoiseGenerator, NoiseKind},
    engine::settings::PipelineParameters,
    graph::{
        equalizer::EqualizerBank,
        node::AudioSource,
        speed::{needs_resampling, SpeedStage},
        through::{SourceExt, Through},
        width::{Pan, Side, StereoWidthStage},
    },
    BAND_COUNT,
};

/*
Voice Pipeline
==============

One channel's worth of processing, pulled by the mixer:

    NoiseGenerator → [SpeedStage] → EqualizerBank → StereoWidthStage → mixer

The speed stage only exists when the speed is off unity. Width doesn't touch
the samples; it hands the mixer the gains that place the voice.

Two kinds of change reach a voice:

    gain change      update_gains    EQ coefficients recomputed in place,
                                     every filter keeps its history
    layout change    rebuild         speed and width stages replaced, the
                                     generator and the EQ carried over

A rebuild throws away the resampler's window (a small, accepted glitch when
speed changes) but never the EQ state or the generator's random stream.
*/

/// The front of a voice: the generator, optionally behind a speed stage.
pub enum SourceChain {
    Direct(NoiseGenerator),
    Resampled(SpeedStage<NoiseGenerator>),
}

impl SourceChain {
    pub fn new(generator: NoiseGenerator, speed: f32) -> Self {
        if needs_resampling(speed) {
            SourceChain::Resampled(SpeedStage::new(generator, speed))
        } else {
            SourceChain::Direct(generator)
        }
    }

    pub fn generator(&self) -> &NoiseGenerator {
        match self {
            SourceChain::Direct(generator) => generator,
            SourceChain::Resampled(stage) => stage.source(),
        }
    }

    /// Unwrap the generator, dropping any speed stage around it.
    pub fn into_generator(self) -> NoiseGenerator {
        match self {
            SourceChain::Direct(generator) => generator,
            SourceChain::Resampled(stage) => stage.into_inner(),
        }
    }

    pub fn is_resampling(&self) -> bool {
        matches!(self, SourceChain::Resampled(_))
    }
}

impl Default for SourceChain {
    fn default() -> Self {
        SourceChain::Direct(NoiseGenerator::default())
    }
}

impl AudioSource for SourceChain {
    #[inline]
    fn fill(&mut self, out: &mut [f32]) -> usize {
        match self {
            SourceChain::Direct(generator) => generator.fill(out),
            SourceChain::Resampled(stage) => stage.fill(out),
        }
    }
}

pub struct VoicePipeline {
    side: Side,
    chain: Through<SourceChain, EqualizerBank>,
    width: StereoWidthStage,
}

impl VoicePipeline {
    pub fn new(
        side: Side,
        seed: u64,
        sample_rate: f32,
        gains: &[f32; BAND_COUNT],
        params: &PipelineParameters,
    ) -> Self {
        let generator = NoiseGenerator::new(params.kind(side), seed);
        Self {
            side,
            chain: SourceChain::new(generator, params.speed)
                .through(EqualizerBank::with_gains(sample_rate, gains)),
            width: StereoWidthStage::new(side, params.width.factor()),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> NoiseKind {
        self.chain.source().generator().kind()
    }

    pub fn is_resampling(&self) -> bool {
        self.chain.source().is_resampling()
    }

    pub fn equalizer(&self) -> &EqualizerBank {
        self.chain.effect()
    }

    pub fn width(&self) -> &StereoWidthStage {
        &self.width
    }

    /// Mixer gains for this voice at the current width.
    pub fn pan(&self) -> Pan {
        self.width.pan()
    }

    /// In-place gain change. Nothing is replaced.
    pub fn update_gains(&mut self, gains: &[f32; BAND_COUNT]) {
        self.chain.effect_mut().update_gains(gains);
    }

    /// Replace the speed and width stages for new parameters.
    ///
    /// The generator keeps its state unless its kind changes, in which case
    /// the new kind starts fresh. The equalizer is reused untouched.
    pub fn rebuild(&mut self, params: &PipelineParameters) {
        let source = self.chain.source_mut();
        let mut generator = mem::take(source).into_generator();
        generator.set_kind(params.kind(self.side));
        *source = SourceChain::new(generator, params.speed);
        self.width = StereoWidthStage::new(self.side, params.width.factor());
    }
}

impl AudioSource for VoicePipeline {
    /// Mono output after the equalizer. The width stage is the last step of
    /// the pipeline but acts through [`VoicePipeline::pan`], which the mixer
    /// applies when it spreads these samples over both channels.
    fn fill(&mut self, out: &mut [f32]) -> usize {
        self.chain.fill(out)
    }
}
