use crate::{
    graph::{node::AudioSource, width::Pan},
    MAX_BLOCK_SIZE,
};

/*
Stereo Mixer
============

The mixer sums any number of mono inputs into one interleaved stereo stream.
Each input carries its own pair of gains:

    for every frame:
        s_i   = next sample of input i        (read once per frame)
        left  = Σ left_gain_i  · s_i
        right = Σ right_gain_i · s_i

Reading each input once and spreading it with two gains is what lets a mono
voice sit anywhere in the stereo field, or leak into the other channel with
inverted polarity for width.

Output layout is interleaved: [L0, R0, L1, R1, ...].

Short inputs
------------

If an input returns fewer samples than asked for, the rest of its block is
treated as silence. The mixer always delivers the full number of frames.

Summing gain
------------

Inputs are summed, not averaged. Two full-scale inputs at unity gain reach
2.0; headroom is the volume stage's job.
*/

pub struct MixerInput<S> {
    pub source: S,
    pub pan: Pan,
}

impl<S> MixerInput<S> {
    pub fn set_pan(&mut self, pan: Pan) {
        self.pan = pan;
    }
}

pub struct Mixer<S> {
    inputs: Vec<MixerInput<S>>,
    scratch: Vec<f32>,
}

impl<S: AudioSource> Mixer<S> {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn add_input(&mut self, source: S, left_gain: f32, right_gain: f32) {
        self.inputs.push(MixerInput {
            source,
            pan: Pan {
                left: left_gain,
                right: right_gain,
            },
        });
    }

    pub fn inputs(&self) -> &[MixerInput<S>] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [MixerInput<S>] {
        &mut self.inputs
    }

    /// Mix into interleaved stereo `out` and return the number of frames
    /// written, which is always `out.len() / 2`.
    pub fn render(&mut self, out: &mut [f32]) -> usize {
        let frames = out.len() / 2;
        let out = &mut out[..frames * 2];
        out.fill(0.0);

        for block in out.chunks_mut(MAX_BLOCK_SIZE * 2) {
            let block_frames = block.len() / 2;

            for input in &mut self.inputs {
                let scratch = &mut self.scratch[..block_frames];
                let read = input.source.fill(scratch).min(block_frames);
                scratch[read..].fill(0.0);

                let Pan { left, right } = input.pan;
                for (frame, &sample) in block.chunks_exact_mut(2).zip(scratch.iter()) {
                    frame[0] += left * sample;
                    frame[1] += right * sample;
                }
            }
        }

        frames
    }
}

impl<S: AudioSource> Default for Mixer<S> {
    fn default() -> Self {
        Self::new()
    }
}
