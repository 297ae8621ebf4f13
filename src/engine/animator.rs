use std::time::Duration;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{engine::graph::GraphHandle, BAND_COUNT};

/// How often the control context should call [`GainAnimator::tick`].
pub const ANIMATION_INTERVAL: Duration = Duration::from_millis(80);

/// Step size of the random walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationMode {
    #[default]
    Soft,
    Hard,
    SoloDuo,
    Trio,
}

impl AnimationMode {
    pub const ALL: [AnimationMode; 4] = [
        AnimationMode::Soft,
        AnimationMode::Hard,
        AnimationMode::SoloDuo,
        AnimationMode::Trio,
    ];

    /// Maximum change per band per tick is half of this, in dB.
    pub fn scale(self) -> f32 {
        match self {
            AnimationMode::Soft => 0.2,
            AnimationMode::Hard => 0.8,
            AnimationMode::SoloDuo => 0.4,
            AnimationMode::Trio => 0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationMode::Soft => "Soft",
            AnimationMode::Hard => "Hard",
            AnimationMode::SoloDuo => "Solo/Duo",
            AnimationMode::Trio => "Trio",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AnimationMode::Soft => AnimationMode::Hard,
            AnimationMode::Hard => AnimationMode::SoloDuo,
            AnimationMode::SoloDuo => AnimationMode::Trio,
            AnimationMode::Trio => AnimationMode::Soft,
        }
    }
}

/// How far the walk may stray from 0 dB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationRange {
    Tight,
    #[default]
    Normal,
    Wide,
}

impl AnimationRange {
    pub const ALL: [AnimationRange; 3] = [
        AnimationRange::Tight,
        AnimationRange::Normal,
        AnimationRange::Wide,
    ];

    pub fn limit_db(self) -> f32 {
        match self {
            AnimationRange::Tight => 4.0,
            AnimationRange::Normal => 9.0,
            AnimationRange::Wide => 14.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationRange::Tight => "Tight",
            AnimationRange::Normal => "Normal",
            AnimationRange::Wide => "Wide",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AnimationRange::Tight => AnimationRange::Normal,
            AnimationRange::Normal => AnimationRange::Wide,
            AnimationRange::Wide => AnimationRange::Tight,
        }
    }
}

/// Random walk over the equalizer gains.
///
/// Runs on the control context. Each tick draws one step per band, applies
/// the steps to whatever gains are current at publish time (so a slider moved
/// between ticks isn't overwritten), clamps, and publishes all eight at once.
/// With `alternate` on, every tick also swaps the two voices' colors.
pub struct GainAnimator {
    rng: SmallRng,
    pub mode: AnimationMode,
    pub range: AnimationRange,
    pub alternate: bool,
}

impl GainAnimator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            mode: AnimationMode::default(),
            range: AnimationRange::default(),
            alternate: false,
        }
    }

    /// The steps the next tick would take, one per band.
    fn draw_steps(&mut self) -> [f32; BAND_COUNT] {
        let scale = self.mode.scale();
        std::array::from_fn(|_| (self.rng.gen::<f32>() - 0.5) * scale)
    }

    pub fn tick(&mut self, handle: &GraphHandle) {
        let steps = self.draw_steps();
        let limit = self.range.limit_db();
        handle.modify_gains(|gains| {
            for (gain, step) in gains.iter_mut().zip(steps.iter()) {
                *gain = (*gain + step).clamp(-limit, limit);
            }
        });

        if self.alternate {
            handle.swap_voice_kinds();
        }
    }
}

impl Default for GainAnimator {
    fn default() -> Self {
        Self::new(rand::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dsp::noise::NoiseKind,
        engine::{AudioGraph, GraphConfig},
        graph::width::Side,
    };

    fn handle() -> GraphHandle {
        AudioGraph::new(GraphConfig::new().seed(1)).handle()
    }

    #[test]
    fn steps_are_bounded_by_mode() {
        for mode in AnimationMode::ALL {
            let handle = handle();
            let mut animator = GainAnimator::new(7);
            animator.mode = mode;
            animator.range = AnimationRange::Wide;

            let mut previous = handle.gains();
            for _ in 0..100 {
                animator.tick(&handle);
                let gains = handle.gains();
                for (a, b) in previous.iter().zip(gains.iter()) {
                    assert!((a - b).abs() <= mode.scale() * 0.5 + 1e-5);
                }
                previous = gains;
            }
        }
    }

    #[test]
    fn walk_stays_within_range() {
        let handle = handle();
        let mut animator = GainAnimator::new(3);
        animator.mode = AnimationMode::Hard;
        animator.range = AnimationRange::Tight;
        handle.set_gains([12.0; BAND_COUNT]);

        animator.tick(&handle);
        assert!(handle.gains().iter().all(|g| g.abs() <= 4.0));

        for _ in 0..1000 {
            animator.tick(&handle);
            assert!(handle.gains().iter().all(|g| g.abs() <= 4.0));
        }
    }

    #[test]
    fn each_tick_is_one_publication() {
        let handle = handle();
        let mut animator = GainAnimator::new(5);
        for _ in 0..10 {
            animator.tick(&handle);
        }
        assert_eq!(handle.settings().gains_revision, 10);
    }

    #[test]
    fn alternate_swaps_colors_every_tick() {
        let handle = handle();
        handle.set_noise_kind(Side::Left, NoiseKind::Brown);
        let mut animator = GainAnimator::new(5);
        animator.alternate = true;

        animator.tick(&handle);
        assert_eq!(handle.params().kinds, [NoiseKind::White, NoiseKind::Brown]);
        animator.tick(&handle);
        assert_eq!(handle.params().kinds, [NoiseKind::Brown, NoiseKind::White]);
    }
}
