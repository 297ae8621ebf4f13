//! The two-context engine: an [`AudioGraph`] rendered by the audio thread and
//! any number of [`GraphHandle`]s changing it from elsewhere.

pub mod animator;
pub mod graph;
pub mod settings;
pub mod voice;

pub use animator::{AnimationMode, AnimationRange, GainAnimator, ANIMATION_INTERVAL};
pub use graph::{AudioGraph, GraphHandle};
pub use settings::{GraphConfig, GraphSettings, PipelineParameters};
pub use voice::VoicePipeline;

pub use crate::graph::width::{Side, StereoWidth};
