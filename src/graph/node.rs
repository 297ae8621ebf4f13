use crate::dsp::noise::NoiseGenerator;

/// A pull-based producer of mono samples.
///
/// Every stage that hands audio downstream implements this: the noise
/// generator at the head of a voice, the speed stage that resamples it, and
/// chains built with [`Through`](crate::graph::through::Through). Consumers
/// call `fill` with the block they want and the source writes into it.
pub trait AudioSource: Send {
    /// Write up to `out.len()` samples and return how many were written.
    ///
    /// The sources in this crate are infinite and always fill the whole
    /// block. Consumers still honor a short count by treating the remainder
    /// as silence.
    fn fill(&mut self, out: &mut [f32]) -> usize;
}

/// An in-place block effect (equalizer, gain).
pub trait BlockProcessor: Send {
    fn process(&mut self, block: &mut [f32]);
}

/// Allow boxed sources to be used as sources (for dynamic dispatch)
impl AudioSource for Box<dyn AudioSource> {
    fn fill(&mut self, out: &mut [f32]) -> usize {
        (**self).fill(out)
    }
}

impl BlockProcessor for Box<dyn BlockProcessor> {
    fn process(&mut self, block: &mut [f32]) {
        (**self).process(block)
    }
}

impl AudioSource for NoiseGenerator {
    fn fill(&mut self, out: &mut [f32]) -> usize {
        self.render(out)
    }
}
