use crate::graph::node::{AudioSource, BlockProcessor};

/*
Serial Signal Chain (Through)
=============================

Through connects a source and an in-place effect in series, passing the
output of the first into the second. This is the building block for chains
like: noise → equalizer → gain.

How It Works:
-------------
1. Ask the source to fill the output buffer
2. Run the effect over the part that was actually filled

  Source fills:    [0.5, 0.8, -0.3, 0.9, ...]
  Effect processes in-place (e.g., equalizer)
  Final output:    [0.4, 0.6, -0.2, 0.7, ...]

Because the effect only sees what the source produced, a short read stays
short; the consumer decides how to pad it.

Signal Flow Diagram:
--------------------
  Through: [Source] ──→ [Effect] ──→ output

Chains nest, so `Through::new(Through::new(noise, eq), gain)` reads as
noise → eq → gain.
*/

pub struct Through<S, P> {
    source: S,
    effect: P,
}

impl<S, P> Through<S, P> {
    pub fn new(source: S, effect: P) -> Self {
        Self { source, effect }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn effect(&self) -> &P {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut P {
        &mut self.effect
    }
}

impl<S: AudioSource, P: BlockProcessor> AudioSource for Through<S, P> {
    fn fill(&mut self, out: &mut [f32]) -> usize {
        let written = self.source.fill(out).min(out.len());
        self.effect.process(&mut out[..written]);
        written
    }
}

/// Fluent chaining: `source.through(effect)`.
pub trait SourceExt: AudioSource + Sized {
    fn through<P: BlockProcessor>(self, effect: P) -> Through<Self, P> {
        Through::new(self, effect)
    }
}

impl<T: AudioSource> SourceExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::volume::VolumeStage;

    struct Constant(f32);

    impl AudioSource for Constant {
        fn fill(&mut self, out: &mut [f32]) -> usize {
            out.fill(self.0);
            out.len()
        }
    }

    /// Produces a fixed number of samples per call.
    struct Short(usize);

    impl AudioSource for Short {
        fn fill(&mut self, out: &mut [f32]) -> usize {
            let n = self.0.min(out.len());
            out[..n].fill(1.0);
            n
        }
    }

    #[test]
    fn renders_source_then_effect() {
        let mut chain = Constant(0.5).through(VolumeStage::new(0.5));
        let mut buffer = vec![0.0; 128];
        assert_eq!(chain.fill(&mut buffer), 128);
        assert!(buffer.iter().all(|&s| s == 0.25));
    }

    #[test]
    fn chains_nest_in_order() {
        let mut chain = Constant(1.0)
            .through(VolumeStage::new(0.5))
            .through(VolumeStage::new(0.5));
        let mut buffer = vec![0.0; 16];
        chain.fill(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.25));
    }

    #[test]
    fn effect_only_touches_written_samples() {
        let mut chain = Short(4).through(VolumeStage::new(2.0));
        let mut buffer = vec![-1.0; 8];
        assert_eq!(chain.fill(&mut buffer), 4);
        assert_eq!(&buffer[..4], &[2.0; 4]);
        assert_eq!(&buffer[4..], &[-1.0; 4]);
    }
}
