use crate::{
    dsp::noise::NoiseKind,
    graph::width::{Side, StereoWidth},
    BAND_COUNT, DEFAULT_VOLUME, SAMPLE_RATE,
};

/// Everything about the pipelines that isn't an equalizer gain.
///
/// Speed, width and noise kinds change the shape of the voice pipelines;
/// volume is a plain scalar on the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineParameters {
    /// Playback speed factor, 0.5..=2.0 (clamped by the caller).
    pub speed: f32,
    pub width: StereoWidth,
    /// Master linear gain, 0.0..=1.0.
    pub volume: f32,
    /// Noise color per voice, indexed by [`Side::index`].
    pub kinds: [NoiseKind; 2],
}

impl PipelineParameters {
    pub fn kind(&self, side: Side) -> NoiseKind {
        self.kinds[side.index()]
    }

    /// Whether moving from `self` to `other` replaces pipeline stages.
    pub fn layout_differs(&self, other: &Self) -> bool {
        self.speed != other.speed || self.width != other.width || self.kinds != other.kinds
    }
}

impl Default for PipelineParameters {
    fn default() -> Self {
        Self {
            speed: 1.0,
            width: StereoWidth::Normal,
            volume: DEFAULT_VOLUME,
            kinds: [NoiseKind::White; 2],
        }
    }
}

/// The immutable snapshot published from the control side to the render side.
///
/// A snapshot is never mutated once published; the control side builds a
/// new one and swaps it in whole. The revisions let the renderer tell which
/// parts changed since the last block it rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSettings {
    pub gains: [f32; BAND_COUNT],
    pub params: PipelineParameters,
    /// Bumped on every gain publication.
    pub gains_revision: u64,
    /// Bumped whenever speed, width or a noise kind changes.
    pub layout_revision: u64,
}

impl GraphSettings {
    pub fn new(gains: [f32; BAND_COUNT], params: PipelineParameters) -> Self {
        Self {
            gains,
            params,
            gains_revision: 0,
            layout_revision: 0,
        }
    }

    /// Copy with new gains and a bumped gain revision.
    pub fn with_gains(&self, gains: [f32; BAND_COUNT]) -> Self {
        Self {
            gains,
            gains_revision: self.gains_revision + 1,
            ..self.clone()
        }
    }

    /// Copy with new parameters. The layout revision only moves if the
    /// change needs a pipeline rebuild.
    pub fn with_params(&self, params: PipelineParameters) -> Self {
        let layout_revision = if self.params.layout_differs(&params) {
            self.layout_revision + 1
        } else {
            self.layout_revision
        };
        Self {
            params,
            layout_revision,
            ..self.clone()
        }
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self::new([0.0; BAND_COUNT], PipelineParameters::default())
    }
}

/// Construction-time configuration for an [`AudioGraph`](super::AudioGraph).
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub sample_rate: u32,
    /// Seed for the voices' random sources. The right voice uses `seed + 1`.
    pub seed: u64,
    pub gains: [f32; BAND_COUNT],
    pub params: PipelineParameters,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            seed: rand::random(),
            gains: [0.0; BAND_COUNT],
            params: PipelineParameters::default(),
        }
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn gains(mut self, gains: [f32; BAND_COUNT]) -> Self {
        self.gains = gains;
        self
    }

    pub fn params(mut self, params: PipelineParameters) -> Self {
        self.params = params;
        self
    }

    pub fn voice_seed(&self, side: Side) -> u64 {
        self.seed.wrapping_add(side.index() as u64)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gains_bump_only_gain_revision() {
        let settings = GraphSettings::default();
        let next = settings.with_gains([1.0; BAND_COUNT]);
        assert_eq!(next.gains_revision, 1);
        assert_eq!(next.layout_revision, 0);
        assert_eq!(next.params, settings.params);
    }

    #[test]
    fn volume_change_is_not_a_layout_change() {
        let settings = GraphSettings::default();
        let params = PipelineParameters {
            volume: 0.2,
            ..settings.params
        };
        let next = settings.with_params(params);
        assert_eq!(next.layout_revision, 0);
        assert_eq!(next.params.volume, 0.2);
    }

    #[test]
    fn speed_width_and_kind_are_layout_changes() {
        let base = GraphSettings::default();
        let p = base.params;

        let speed = base.with_params(PipelineParameters { speed: 1.5, ..p });
        let width = base.with_params(PipelineParameters {
            width: StereoWidth::Wide,
            ..p
        });
        let kind = base.with_params(PipelineParameters {
            kinds: [NoiseKind::Pink, NoiseKind::White],
            ..p
        });

        for next in [speed, width, kind] {
            assert_eq!(next.layout_revision, 1);
            assert_eq!(next.gains_revision, 0);
        }
    }

    #[test]
    fn voices_get_distinct_seeds() {
        let config = GraphConfig::new().seed(u64::MAX);
        assert_ne!(config.voice_seed(Side::Left), config.voice_seed(Side::Right));
    }
}
