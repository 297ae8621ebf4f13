//! Pull-based stages for building noise voices and the stereo output.
//!
//! Sources implement [`node::AudioSource`] and hand audio downstream when
//! asked; in-place effects implement [`node::BlockProcessor`]. Stages compose
//! by ownership (a stage owns its upstream) rather than through a dynamic
//! node graph.

/// Eight-band peaking equalizer.
pub mod equalizer;
/// Stereo summing with per-input pan gains.
pub mod mixer;
/// Core traits shared by all stages.
pub mod node;
/// Playback-speed resampling stage.
pub mod speed;
/// Serial chaining of a source and an effect (source → effect).
pub mod through;
/// Master gain.
pub mod volume;
/// Stereo width as per-voice pan gains.
pub mod width;

pub use node::{AudioSource, BlockProcessor};
