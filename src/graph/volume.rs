use crate::graph::node::BlockProcessor;

/// Master gain. Multiplies every sample by a scalar.
///
/// A new gain applies from the next processed sample on, with no ramp;
/// volume changes are user-paced so the step is acceptable.
#[derive(Debug, Clone, Copy)]
pub struct VolumeStage {
    gain: f32,
}

impl VolumeStage {
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }
}

impl BlockProcessor for VolumeStage {
    fn process(&mut self, block: &mut [f32]) {
        for sample in block.iter_mut() {
            *sample *= self.gain;
        }
    }
}
