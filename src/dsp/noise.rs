use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/*
Noise Colors
============

All three generators start from the same raw material: a uniform random
number in [-1, 1]. They differ in how much each new random value is allowed
to change the output, which is what gives each color its spectral slope.

  color    power density    per octave    character
  -----    -------------    ----------    ---------------------------
  white    flat             0 dB          hiss, every frequency equal
  pink     ∝ 1/f            -3 dB         rain, balanced per octave
  brown    ∝ 1/f²           -6 dB         rumble, surf, distant thunder


White
-----

    out = uniform(-1, 1) × 0.5

Each sample is independent of the last. Bounded to [-0.5, 0.5].


Pink (Paul Kellet's refined method)
-----------------------------------

A true 1/f slope needs an infinite bank of filters. Kellet approximates it
with seven one-pole lowpass filters at staggered corner frequencies, each fed
the same white sample. Their sum ripples within about ±0.05 dB of -3 dB/octave
across the audio band.

    b0 = 0.99886·b0 + w·0.0555179      (lowest corner)
    b1 = 0.99332·b1 + w·0.0750759
    b2 = 0.96900·b2 + w·0.1538520
    b3 = 0.86650·b3 + w·0.3104856
    b4 = 0.55000·b4 + w·0.5329522
    b5 = -0.7616·b5 - w·0.0168980      (high shelf correction)
    out = (b0 + b1 + b2 + b3 + b4 + b5 + b6 + w·0.5362) × 0.11
    b6 = w·0.115926                     (one-sample delayed term)

The seven b-values are the generator's memory and persist across blocks.


Brown
-----

A random walk: integrate a small white step and clamp so it can't wander off.

    acc = clamp(acc + w·0.02, -1, 1)
    out = acc × 0.7

Clamping (instead of a leaky integrator) keeps the output strictly inside
[-0.7, 0.7].
*/

const WHITE_SCALE: f64 = 0.5;
const PINK_SCALE: f64 = 0.11;
const BROWN_STEP: f64 = 0.02;
const BROWN_SCALE: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseKind {
    #[default]
    White,
    Pink,
    Brown,
}

impl NoiseKind {
    pub const ALL: [NoiseKind; 3] = [NoiseKind::White, NoiseKind::Pink, NoiseKind::Brown];

    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::White => "White",
            NoiseKind::Pink => "Pink",
            NoiseKind::Brown => "Brown",
        }
    }

    /// Cycle White → Pink → Brown → White.
    pub fn next(self) -> Self {
        match self {
            NoiseKind::White => NoiseKind::Pink,
            NoiseKind::Pink => NoiseKind::Brown,
            NoiseKind::Brown => NoiseKind::White,
        }
    }
}

/// Kellet filter memory, b0..b6.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PinkState {
    b: [f64; 7],
}

impl PinkState {
    #[inline]
    fn next(&mut self, white: f64) -> f64 {
        let b = &mut self.b;
        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;
        let pink = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + white * 0.5362;
        b[6] = white * 0.115926;
        pink * PINK_SCALE
    }
}

/// One voice's worth of stochastic noise.
///
/// Owns its random source so the two voices of a graph are statistically
/// independent. Never allocates; safe to run on the audio thread.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    kind: NoiseKind,
    rng: SmallRng,
    pink: PinkState,
    brown: f64,
}

impl NoiseGenerator {
    pub fn new(kind: NoiseKind, seed: u64) -> Self {
        Self {
            kind,
            rng: SmallRng::seed_from_u64(seed),
            pink: PinkState::default(),
            brown: 0.0,
        }
    }

    pub fn white(seed: u64) -> Self {
        Self::new(NoiseKind::White, seed)
    }

    pub fn pink(seed: u64) -> Self {
        Self::new(NoiseKind::Pink, seed)
    }

    pub fn brown(seed: u64) -> Self {
        Self::new(NoiseKind::Brown, seed)
    }

    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    /// Switch color. Changing to a different kind restarts that kind from its
    /// initial state; the memory of the other kinds is left alone (and unused).
    /// Setting the current kind again is a no-op.
    pub fn set_kind(&mut self, kind: NoiseKind) {
        if kind == self.kind {
            return;
        }
        match kind {
            NoiseKind::White => {}
            NoiseKind::Pink => self.pink = PinkState::default(),
            NoiseKind::Brown => self.brown = 0.0,
        }
        self.kind = kind;
    }

    #[inline]
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>() * 2.0 - 1.0
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = match self.kind {
            NoiseKind::White => self.uniform() * WHITE_SCALE,
            NoiseKind::Pink => {
                let white = self.uniform();
                self.pink.next(white)
            }
            NoiseKind::Brown => {
                self.brown = (self.brown + self.uniform() * BROWN_STEP).clamp(-1.0, 1.0);
                self.brown * BROWN_SCALE
            }
        };
        sample as f32
    }

    /// Fill the whole buffer. The source is infinite, so this never comes up
    /// short.
    pub fn render(&mut self, buffer: &mut [f32]) -> usize {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
        buffer.len()
    }

    #[cfg(test)]
    pub(crate) fn brown_accumulator(&self) -> f64 {
        self.brown
    }

    #[cfg(test)]
    pub(crate) fn pink_memory(&self) -> [f64; 7] {
        self.pink.b
    }
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new(NoiseKind::White, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::{num_complex::Complex, FftPlanner};

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn white_stays_within_half_scale() {
        let mut noise = NoiseGenerator::white(1);
        let mut buffer = vec![0.0f32; 48_000];
        assert_eq!(noise.render(&mut buffer), buffer.len());

        assert!(buffer.iter().all(|&s| (-0.5..=0.5).contains(&s)));
        let mean = buffer.iter().map(|&s| s as f64).sum::<f64>() / buffer.len() as f64;
        assert!(mean.abs() < 0.01, "white noise should be zero-mean, got {mean}");
    }

    #[test]
    fn brown_stays_within_clamped_scale() {
        let mut noise = NoiseGenerator::brown(2);
        let mut buffer = vec![0.0f32; 200_000];
        noise.render(&mut buffer);

        assert!(buffer.iter().all(|&s| (-0.7..=0.7).contains(&s)));
        assert!(noise.brown_accumulator().abs() <= 1.0);
    }

    #[test]
    fn brown_moves_in_small_steps() {
        let mut noise = NoiseGenerator::brown(3);
        let mut buffer = vec![0.0f32; 4096];
        noise.render(&mut buffer);

        let max_step = buffer
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .fold(0.0f32, f32::max);
        assert!(max_step <= 0.02 * 0.7 + 1e-6, "step too large: {max_step}");
    }

    #[test]
    fn state_survives_across_blocks() {
        // One long render and two half renders from the same seed must agree.
        let mut whole = NoiseGenerator::pink(7);
        let mut split = NoiseGenerator::pink(7);

        let mut a = vec![0.0f32; 1024];
        whole.render(&mut a);

        let mut b = vec![0.0f32; 1024];
        let (first, second) = b.split_at_mut(512);
        split.render(first);
        split.render(second);

        assert_eq!(a, b);
    }

    #[test]
    fn kind_change_resets_only_the_new_kind() {
        let mut noise = NoiseGenerator::pink(11);
        let mut buffer = vec![0.0f32; 256];
        noise.render(&mut buffer);
        let pink_memory = noise.pink_memory();
        assert!(pink_memory.iter().any(|&b| b != 0.0));

        noise.set_kind(NoiseKind::Brown);
        assert_eq!(noise.brown_accumulator(), 0.0);
        noise.render(&mut buffer);
        assert_ne!(noise.brown_accumulator(), 0.0);

        // Pink memory is latent while brown plays
        assert_eq!(noise.pink_memory(), pink_memory);

        // Re-selecting the current kind keeps its state
        let acc = noise.brown_accumulator();
        noise.set_kind(NoiseKind::Brown);
        assert_eq!(noise.brown_accumulator(), acc);
    }

    /// Average power (dB) in [lo, hi) Hz from a Welch periodogram.
    fn band_power_db(psd: &[f64], bin_hz: f32, lo: f32, hi: f32) -> f64 {
        let start = (lo / bin_hz).ceil() as usize;
        let end = (hi / bin_hz).floor() as usize;
        let mean = psd[start..end].iter().sum::<f64>() / (end - start) as f64;
        10.0 * mean.log10()
    }

    #[test]
    fn pink_falls_three_db_per_octave() {
        const TOTAL: usize = 1 << 16;
        const SEGMENT: usize = 4096;

        let mut noise = NoiseGenerator::pink(42);
        let mut signal = vec![0.0f32; TOTAL];
        noise.render(&mut signal);

        let fft = FftPlanner::<f32>::new().plan_fft_forward(SEGMENT);
        let window: Vec<f32> = (0..SEGMENT)
            .map(|i| {
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (SEGMENT - 1) as f32).cos())
            })
            .collect();

        let mut psd = vec![0.0f64; SEGMENT / 2];
        let mut scratch = vec![Complex::new(0.0f32, 0.0); SEGMENT];
        let mut segments = 0;
        for chunk in signal.chunks_exact(SEGMENT) {
            for (i, (&s, &w)) in chunk.iter().zip(window.iter()).enumerate() {
                scratch[i] = Complex::new(s * w, 0.0);
            }
            fft.process(&mut scratch);
            for (p, bin) in psd.iter_mut().zip(scratch.iter()) {
                *p += bin.norm_sqr() as f64;
            }
            segments += 1;
        }
        for p in psd.iter_mut() {
            *p /= segments as f64;
        }

        let bin_hz = SAMPLE_RATE / SEGMENT as f32;
        let octaves = [250.0f32, 500.0, 1000.0, 2000.0, 4000.0];
        let levels: Vec<f64> = octaves
            .iter()
            .map(|&lo| band_power_db(&psd, bin_hz, lo, lo * 2.0))
            .collect();

        for pair in levels.windows(2) {
            let step = pair[1] - pair[0];
            assert!(
                (-4.5..=-1.5).contains(&step),
                "octave step {step:.2} dB outside pink tolerance, levels={levels:?}"
            );
        }

        let overall = (levels[levels.len() - 1] - levels[0]) / (levels.len() - 1) as f64;
        assert!(
            (-3.8..=-2.2).contains(&overall),
            "mean slope {overall:.2} dB/octave, levels={levels:?}"
        );
    }
}
