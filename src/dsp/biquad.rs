use std::f64::consts::PI;

/*
Peaking EQ Biquad
=================

A biquad is a second-order IIR filter: each output depends on the current
input, the two previous inputs and the two previous outputs.

    y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] - a1·y[n-1] - a2·y[n-2]

Five coefficients describe the response, four history values carry the
state from one sample to the next.

Peaking Response
----------------

A peaking filter raises or lowers a bell-shaped region around a center
frequency and leaves everything else at 0 dB.

     gain (dB)
      +6 ┤         ╭─╮
         │        ╱   ╲
       0 ┼───────╯     ╰───────
         │
      -6 ┤
         └──────────┬──────────→ freq
                    f0

Coefficients come from Robert Bristow-Johnson's Audio EQ Cookbook:

    A     = 10^(gain_db / 40)
    w0    = 2π · f0 / fs
    alpha = sin(w0) / (2·Q)

    b0 = 1 + alpha·A      a0 = 1 + alpha/A
    b1 = -2·cos(w0)       a1 = -2·cos(w0)
    b2 = 1 - alpha·A      a2 = 1 - alpha/A

Everything is divided through by a0. At 0 dB, A = 1 and the numerator equals
the denominator, so the filter collapses to y[n] = x[n].

Live Updates
------------

`set_parameters` only rewrites the coefficients. History is untouched, so a
gain change mid-stream continues from the same state instead of restarting
from silence (which would click).

Precision
---------

Coefficients and history are kept in f64. The 60 Hz band at 48 kHz puts the
poles very close to the unit circle, where f32 rounding audibly shifts the
response.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoefficients {
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    pub fn peaking(sample_rate: f32, center_hz: f32, q: f32, gain_db: f32) -> Self {
        let a = 10f64.powf(gain_db as f64 / 40.0);
        let w0 = 2.0 * PI * center_hz as f64 / sample_rate as f64;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * q as f64);

        let b0 = 1.0 + alpha * a;
        let b1 = -2.0 * cos_w0;
        let b2 = 1.0 - alpha * a;
        let a0 = 1.0 + alpha / a;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha / a;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BiquadPeakingFilter {
    coeffs: BiquadCoefficients,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadPeakingFilter {
    pub fn new(sample_rate: f32, center_hz: f32, q: f32, gain_db: f32) -> Self {
        Self {
            coeffs: BiquadCoefficients::peaking(sample_rate, center_hz, q, gain_db),
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Recompute coefficients. History is preserved.
    pub fn set_parameters(&mut self, sample_rate: f32, center_hz: f32, q: f32, gain_db: f32) {
        self.coeffs = BiquadCoefficients::peaking(sample_rate, center_hz, q, gain_db);
    }

    pub fn coefficients(&self) -> BiquadCoefficients {
        self.coeffs
    }

    #[inline]
    pub fn transform(&mut self, sample: f32) -> f32 {
        let x = sample as f64;
        let c = &self.coeffs;
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        y as f32
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.transform(*sample);
        }
    }

    /// `[x[n-1], x[n-2], y[n-1], y[n-2]]`
    pub fn history(&self) -> [f64; 4] {
        [self.x1, self.x2, self.y1, self.y2]
    }
}
