use std::f64::consts::PI;

/*
Windowed-Sinc Resampling
========================

Playing a stream at speed `r` means reading the input at positions
0, r, 2r, 3r, ... instead of 0, 1, 2, 3. Most of those positions fall between
input samples, so we need a value "in between".

The ideal interpolator is the sinc function: a band-limited signal is exactly
rebuilt from its samples by centering a sinc on each one and summing.

    y(t) = Σ x[k] · sinc(t - k)          sinc(x) = sin(πx) / (πx)

The sinc never ends, so we truncate it to HALF_TAPS samples each side and
taper the edges with a Blackman window to keep the truncation from ringing.

Aliasing
--------

Reading faster than 1:1 (r > 1) squeezes the spectrum upward. Anything that
lands above the output Nyquist folds back down as alias. To prevent that the
kernel is widened in time (narrowed in frequency) by the cutoff factor

    fc = min(1, 1/r)          kernel(x) = fc · sinc(fc · x) · window(x)

so at r = 2 the input is lowpassed to half its band before decimation. For
r ≤ 1 (slowing down) no band-limiting is needed and fc = 1.

Table Lookup
------------

Evaluating sin() for every tap of every output sample is wasteful. The kernel
is tabulated once at OVERSAMPLE points per input sample and linearly
interpolated at run time.

Streaming Layout
----------------

`Resampler` keeps a fixed window of input samples and a fractional read
position inside it. Each output needs the input range
[floor(pos) - HALF_TAPS + 1, floor(pos) + HALF_TAPS]. Before a chunk of
output, the window is topped up from upstream; after it, samples that no
future output can reach are shifted out. No allocation after construction.
*/

pub const HALF_TAPS: usize = 16;
const TAPS: usize = HALF_TAPS * 2;
const OVERSAMPLE: usize = 64;
const TABLE_LEN: usize = TAPS * OVERSAMPLE + 1;

/// Output frames processed between window refills.
pub const CHUNK_FRAMES: usize = 256;

/// Fastest and slowest supported ratios (input samples per output sample).
pub const MAX_RATIO: f64 = 2.0;
pub const MIN_RATIO: f64 = 1.0 / 16.0;

/// Input window capacity: one chunk at the fastest supported ratio plus
/// kernel reach on both sides.
const WINDOW_LEN: usize = CHUNK_FRAMES * MAX_RATIO as usize + TAPS + 8;

/// Tabulated windowed-sinc lowpass kernel for one resampling ratio.
#[derive(Clone)]
pub struct SincKernel {
    table: [f32; TABLE_LEN],
}

impl SincKernel {
    pub fn new(ratio: f64) -> Self {
        let cutoff = if ratio > 1.0 { 1.0 / ratio } else { 1.0 };
        let mut table = [0.0f32; TABLE_LEN];

        for (i, entry) in table.iter_mut().enumerate() {
            let x = i as f64 / OVERSAMPLE as f64 - HALF_TAPS as f64;
            *entry = (cutoff * sinc(cutoff * x) * blackman(x)) as f32;
        }

        Self { table }
    }

    /// Kernel value at offset `x` in input samples, `-HALF_TAPS..=HALF_TAPS`.
    #[inline]
    pub fn at(&self, x: f32) -> f32 {
        let pos = (x + HALF_TAPS as f32) * OVERSAMPLE as f32;
        if pos <= 0.0 || pos >= (TABLE_LEN - 1) as f32 {
            return 0.0;
        }
        let idx = pos as usize;
        let frac = pos - idx as f32;
        self.table[idx] + (self.table[idx + 1] - self.table[idx]) * frac
    }
}

#[inline]
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-9 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Blackman window over `-HALF_TAPS..=HALF_TAPS`.
#[inline]
fn blackman(x: f64) -> f64 {
    let t = x / HALF_TAPS as f64;
    if t.abs() > 1.0 {
        return 0.0;
    }
    0.42 + 0.5 * (PI * t).cos() + 0.08 * (2.0 * PI * t).cos()
}

/// Streaming fractional-ratio resampler.
///
/// The caller supplies input through the closure given to [`Resampler::process`],
/// which must fill the slice it receives and return how many samples it wrote.
/// Anything left unwritten is treated as silence.
#[derive(Clone)]
pub struct Resampler {
    kernel: SincKernel,
    ratio: f64,
    window: [f32; WINDOW_LEN],
    /// Valid samples in `window`.
    filled: usize,
    /// Read position relative to `window[0]`.
    pos: f64,
}

impl Resampler {
    /// `ratio` is input samples consumed per output sample, clamped to
    /// `MIN_RATIO..=MAX_RATIO`.
    pub fn new(ratio: f64) -> Self {
        let ratio = ratio.clamp(MIN_RATIO, MAX_RATIO);
        // Start with HALF_TAPS - 1 samples of silent history so the first
        // output is centered on the first real input sample.
        let history = HALF_TAPS - 1;
        Self {
            kernel: SincKernel::new(ratio),
            ratio,
            window: [0.0; WINDOW_LEN],
            filled: history,
            pos: history as f64,
        }
    }

    pub fn process<F>(&mut self, out: &mut [f32], mut pull: F)
    where
        F: FnMut(&mut [f32]) -> usize,
    {
        for chunk in out.chunks_mut(CHUNK_FRAMES) {
            // Highest input index this chunk will touch
            let last_pos = self.pos + (chunk.len() - 1) as f64 * self.ratio;
            let needed = (last_pos.floor() as usize + HALF_TAPS + 1).min(WINDOW_LEN);

            if needed > self.filled {
                let target = &mut self.window[self.filled..needed];
                let got = pull(target).min(target.len());
                target[got..].fill(0.0);
                self.filled = needed;
            }

            for sample in chunk.iter_mut() {
                *sample = self.interpolate();
                self.pos += self.ratio;
            }

            // Drop input that no later output can reach
            let base = self.pos.floor() as usize;
            let discard = (base + 1).saturating_sub(HALF_TAPS).min(self.filled);
            if discard > 0 {
                self.window.copy_within(discard..self.filled, 0);
                self.filled -= discard;
                self.pos -= discard as f64;
            }
        }
    }

    #[inline]
    fn interpolate(&self) -> f32 {
        let base = self.pos.floor();
        let frac = (self.pos - base) as f32;
        let center = base as usize;

        let mut acc = 0.0f32;
        let first = center + 1 - HALF_TAPS;
        for (k, &x) in self.window[first..=center + HALF_TAPS].iter().enumerate() {
            // Offset of this input sample from the read position
            let offset = frac + (HALF_TAPS - 1) as f32 - k as f32;
            acc += x * self.kernel.at(offset);
        }
        acc
    }
}
