use crate::{
    dsp::biquad::{BiquadCoefficients, BiquadPeakingFilter},
    graph::node::BlockProcessor,
    BAND_CENTERS, BAND_COUNT, BAND_Q,
};

/*
Graphic Equalizer Bank
======================

Eight peaking filters at fixed octave-spaced centers, run in series:

    in → [60] → [125] → [250] → [500] → [1k] → [2k] → [4k] → [8k] → out

Each band boosts or cuts around its center and is transparent elsewhere, so
the cascade's response is roughly the sum (in dB) of the individual bells.
With every gain at 0 dB the whole bank is an identity.

The order is fixed lowest band first. In exact arithmetic a cascade of linear
filters commutes; in floating point it does not quite, and a fixed order keeps
the output reproducible.

Gain updates
------------

`update_gains` takes all eight gains at once and recomputes each band's
coefficients in band order. Filter history is kept, so a slider move changes
the tone from the next sample on without a restart transient. Gains are taken
as given; clamping is the caller's business.
*/

#[derive(Debug, Clone)]
struct Band {
    center_hz: f32,
    gain_db: f32,
    filter: BiquadPeakingFilter,
}

#[derive(Debug, Clone)]
pub struct EqualizerBank {
    sample_rate: f32,
    bands: [Band; BAND_COUNT],
}

impl EqualizerBank {
    /// Flat bank at the standard centers.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_gains(sample_rate, &[0.0; BAND_COUNT])
    }

    pub fn with_gains(sample_rate: f32, gains: &[f32; BAND_COUNT]) -> Self {
        let bands = std::array::from_fn(|i| Band {
            center_hz: BAND_CENTERS[i],
            gain_db: gains[i],
            filter: BiquadPeakingFilter::new(sample_rate, BAND_CENTERS[i], BAND_Q, gains[i]),
        });
        Self { sample_rate, bands }
    }

    pub fn update_gains(&mut self, gains: &[f32; BAND_COUNT]) {
        for (band, &gain_db) in self.bands.iter_mut().zip(gains.iter()) {
            band.gain_db = gain_db;
            band.filter
                .set_parameters(self.sample_rate, band.center_hz, BAND_Q, gain_db);
        }
    }

    pub fn gains(&self) -> [f32; BAND_COUNT] {
        std::array::from_fn(|i| self.bands[i].gain_db)
    }

    pub fn centers(&self) -> [f32; BAND_COUNT] {
        std::array::from_fn(|i| self.bands[i].center_hz)
    }

    pub fn coefficients(&self) -> [BiquadCoefficients; BAND_COUNT] {
        std::array::from_fn(|i| self.bands[i].filter.coefficients())
    }

    pub fn history(&self) -> [[f64; 4]; BAND_COUNT] {
        std::array::from_fn(|i| self.bands[i].filter.history())
    }

    #[inline]
    pub fn transform(&mut self, sample: f32) -> f32 {
        self.bands
            .iter_mut()
            .fold(sample, |s, band| band.filter.transform(s))
    }
}

impl BlockProcessor for EqualizerBank {
    fn process(&mut self, block: &mut [f32]) {
        for sample in block.iter_mut() {
            *sample = self.transform(*sample);
        }
    }
}
