//! Whole-graph benchmarks.
//!
//! These render interleaved stereo exactly as the device callback does.

mod graph;

pub use graph::bench_graph;
