use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::{
    dsp::noise::NoiseKind,
    engine::{
        settings::{GraphConfig, GraphSettings, PipelineParameters},
        voice::VoicePipeline,
    },
    graph::{
        mixer::Mixer,
        node::BlockProcessor,
        volume::VolumeStage,
        width::{Side, StereoWidth},
    },
    presets::{EqShape, Preset},
    profile::Profile,
    BAND_COUNT, SPEED_MAX, SPEED_MIN,
};

/*
Render Side and Control Side
============================

The graph is split in two halves that share one atomic pointer:

    control thread(s)                           audio thread
    -----------------                           ------------
    GraphHandle ──rcu──▶ Arc<ArcSwap<GraphSettings>> ◀──load── AudioGraph
                          (immutable snapshot)                 (owns all DSP)

The control side never touches DSP state. Every request builds a new
`GraphSettings` from the current one and swaps it in. Read-modify-write goes
through `rcu`, so a slider move and an animator tick racing each other end up
with one of them winning, never a blend.

The render side loads the snapshot once at the start of each block and
compares revision counters with what it last applied:

    gains_revision moved   → update_gains on both voices (in place)
    layout_revision moved  → rebuild both voices, re-pan the mixer inputs
    always                 → copy the volume

Everything for a block comes from that single snapshot, so a block sees
either all of a change or none of it. No locks, no allocation. A snapshot the
control side retired while a block was rendering is released by whichever
side drops the last reference.
*/

/// The audio graph, owned by the render context.
///
/// Holds both voice pipelines, the mixer and the master volume. Drive it with
/// [`AudioGraph::read`] or [`AudioGraph::render`] from the device callback
/// and change it through a [`GraphHandle`].
pub struct AudioGraph {
    shared: Arc<ArcSwap<GraphSettings>>,
    mixer: Mixer<VoicePipeline>,
    volume: VolumeStage,
    gains_revision: u64,
    layout_revision: u64,
    sample_rate: u32,
}

impl AudioGraph {
    pub fn new(config: GraphConfig) -> Self {
        let settings = GraphSettings::new(config.gains, config.params);
        let sample_rate = config.sample_rate;

        let mut mixer = Mixer::new();
        for side in Side::BOTH {
            let voice = VoicePipeline::new(
                side,
                config.voice_seed(side),
                sample_rate as f32,
                &settings.gains,
                &settings.params,
            );
            let pan = voice.pan();
            mixer.add_input(voice, pan.left, pan.right);
        }

        Self {
            volume: VolumeStage::new(settings.params.volume),
            gains_revision: settings.gains_revision,
            layout_revision: settings.layout_revision,
            shared: Arc::new(ArcSwap::from_pointee(settings)),
            mixer,
            sample_rate,
        }
    }

    /// A control handle sharing this graph's settings.
    pub fn handle(&self) -> GraphHandle {
        GraphHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn voice(&self, side: Side) -> &VoicePipeline {
        &self.mixer.inputs()[side.index()].source
    }

    /// Pull `frames` interleaved stereo frames into `buffer` starting at
    /// sample `offset`. Returns the number of frames written, which is
    /// `frames` unless the buffer is too short to hold them.
    pub fn read(&mut self, buffer: &mut [f32], offset: usize, frames: usize) -> usize {
        let start = offset.min(buffer.len());
        let frames = frames.min((buffer.len() - start) / 2);
        self.render(&mut buffer[start..start + frames * 2])
    }

    /// Fill an interleaved stereo buffer. Returns frames written
    /// (`out.len() / 2`).
    pub fn render(&mut self, out: &mut [f32]) -> usize {
        self.sync_settings();
        let frames = self.mixer.render(out);
        self.volume.process(&mut out[..frames * 2]);
        frames
    }

    /// Apply whatever the control side has published since the last block.
    fn sync_settings(&mut self) {
        let settings = self.shared.load();

        if settings.gains_revision != self.gains_revision {
            for input in self.mixer.inputs_mut() {
                input.source.update_gains(&settings.gains);
            }
            self.gains_revision = settings.gains_revision;
        }

        if settings.layout_revision != self.layout_revision {
            for input in self.mixer.inputs_mut() {
                input.source.rebuild(&settings.params);
                let pan = input.source.pan();
                input.set_pan(pan);
            }
            self.layout_revision = settings.layout_revision;
        }

        self.volume.set_gain(settings.params.volume);
    }
}

/// The control side of an [`AudioGraph`].
///
/// Cheap to clone and safe to share between threads. Every setter publishes
/// a complete new snapshot; the audio thread picks it up at its next block.
/// Values are taken as given unless the method says it clamps.
#[derive(Clone)]
pub struct GraphHandle {
    shared: Arc<ArcSwap<GraphSettings>>,
}

impl GraphHandle {
    pub fn settings(&self) -> Arc<GraphSettings> {
        self.shared.load_full()
    }

    pub fn gains(&self) -> [f32; BAND_COUNT] {
        self.shared.load().gains
    }

    pub fn params(&self) -> PipelineParameters {
        self.shared.load().params
    }

    /// Read-modify-write all eight gains as one publication.
    pub fn modify_gains<F>(&self, f: F)
    where
        F: Fn(&mut [f32; BAND_COUNT]),
    {
        self.shared.rcu(|current| {
            let mut gains = current.gains;
            f(&mut gains);
            current.with_gains(gains)
        });
    }

    /// Returns whether this write changed the pipeline layout.
    fn modify_params<F>(&self, f: F) -> bool
    where
        F: Fn(&mut PipelineParameters),
    {
        let previous = self.shared.rcu(|current| {
            let mut params = current.params;
            f(&mut params);
            current.with_params(params)
        });
        let mut params = previous.params;
        f(&mut params);
        let changed = previous.params.layout_differs(&params);
        if changed {
            log::debug!(
                "Pipeline layout changed: speed={:.2} width={} kinds={:?}",
                params.speed,
                params.width.name(),
                params.kinds
            );
        }
        changed
    }

    pub fn set_band_gain(&self, index: usize, gain_db: f32) {
        if index >= BAND_COUNT {
            log::warn!("Ignoring gain for band {} (only {} bands)", index, BAND_COUNT);
            return;
        }
        log::debug!("Band {} gain -> {:.1} dB", index, gain_db);
        self.modify_gains(|gains| gains[index] = gain_db);
    }

    pub fn set_gains(&self, gains: [f32; BAND_COUNT]) {
        log::debug!("Gains -> {:?}", gains);
        self.modify_gains(|current| *current = gains);
    }

    pub fn set_noise_kind(&self, side: Side, kind: NoiseKind) {
        log::debug!("{:?} voice -> {}", side, kind.name());
        self.modify_params(|params| params.kinds[side.index()] = kind);
    }

    /// Same color on both voices.
    pub fn set_noise_kinds(&self, kind: NoiseKind) {
        log::debug!("Both voices -> {}", kind.name());
        self.modify_params(|params| params.kinds = [kind; 2]);
    }

    pub fn swap_voice_kinds(&self) {
        self.modify_params(|params| params.kinds.swap(0, 1));
    }

    pub fn set_speed(&self, speed: f32) {
        log::debug!("Speed -> {:.2}", speed);
        self.modify_params(|params| params.speed = speed);
    }

    /// Step the speed by `delta`, clamped to the supported range.
    pub fn nudge_speed(&self, delta: f32) {
        self.modify_params(|params| {
            params.speed = (params.speed + delta).clamp(SPEED_MIN, SPEED_MAX);
        });
        log::debug!("Speed -> {:.2}", self.params().speed);
    }

    pub fn reset_speed(&self) {
        self.set_speed(1.0);
    }

    pub fn set_width(&self, width: StereoWidth) {
        log::debug!("Width -> {}", width.name());
        self.modify_params(|params| params.width = width);
    }

    /// Width from a raw factor, snapped to the nearest supported width.
    pub fn set_width_factor(&self, factor: f32) {
        self.set_width(StereoWidth::from_factor(factor));
    }

    pub fn set_volume(&self, volume: f32) {
        log::debug!("Volume -> {:.2}", volume);
        self.modify_params(|params| params.volume = volume);
    }

    /// Preset color on both voices plus its gains, in one snapshot.
    pub fn apply_preset(&self, preset: &Preset) {
        log::info!("Applying preset {}", preset.name);
        self.shared.rcu(|current| {
            let params = PipelineParameters {
                kinds: [preset.kind; 2],
                ..current.params
            };
            current.with_gains(preset.gains).with_params(params)
        });
    }

    pub fn apply_eq_shape(&self, shape: EqShape) {
        log::info!("Applying EQ shape {}", shape.name());
        self.set_gains(shape.gains());
    }

    /// Back to flat gains, default volume, unity speed, normal width and
    /// white noise on both voices.
    pub fn reset(&self) {
        log::info!("Resetting graph settings");
        self.shared.rcu(|current| {
            current
                .with_gains([0.0; BAND_COUNT])
                .with_params(PipelineParameters::default())
        });
    }

    /// Snapshot the current settings for saving. The left voice's color
    /// stands for both.
    pub fn to_profile(&self) -> Profile {
        let settings = self.shared.load();
        Profile {
            gains: settings.gains,
            volume: settings.params.volume,
            width: settings.params.width.factor(),
            speed: settings.params.speed,
            noise: settings.params.kind(Side::Left),
        }
    }

    /// Apply a loaded profile as one snapshot. Speed and volume are clamped
    /// to their ranges since a profile file can hold anything.
    pub fn apply_profile(&self, profile: &Profile) {
        log::info!("Applying profile");
        let params = PipelineParameters {
            speed: profile.speed.clamp(SPEED_MIN, SPEED_MAX),
            width: StereoWidth::from_factor(profile.width),
            volume: profile.volume.clamp(0.0, 1.0),
            kinds: [profile.noise; 2],
        };
        self.shared
            .rcu(|current| current.with_gains(profile.gains).with_params(params));
    }
}
