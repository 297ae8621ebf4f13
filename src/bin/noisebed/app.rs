//! Device setup: builds the graph, opens the output stream and hands
//! everything to the UI loop.

use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ratatui::DefaultTerminal;
use rtrb::RingBuffer;

use noisebed::{
    engine::{AudioGraph, GraphConfig},
    MAX_BLOCK_SIZE,
};

use super::ui::{UiApp, VIS_BLOCK_LEN};

/// Capacity in analysis blocks for the audio→UI ring
const AUDIO_RING_BLOCKS: usize = 8;

pub fn run(mut terminal: DefaultTerminal, profile_path: PathBuf) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    log::info!(
        "Output device {} at {} Hz, {} channels",
        device.name().unwrap_or_else(|_| "<unnamed>".into()),
        sample_rate,
        channels
    );

    let graph = AudioGraph::new(GraphConfig::new().sample_rate(sample_rate));
    let handle = graph.handle();

    let (frames_tx, frames_rx) = RingBuffer::<[f32; 2]>::new(VIS_BLOCK_LEN * AUDIO_RING_BLOCKS);

    let stream = device
        .build_output_stream(
            &config.into(),
            {
                let mut graph = graph;
                let mut frames_tx = frames_tx;
                let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE * 2];
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;
                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render * 2];
                        graph.render(block);

                        let out = &mut data[frames_written * channels..];
                        for (device_frame, frame) in
                            out.chunks_mut(channels).zip(block.chunks_exact(2))
                        {
                            write_frame(device_frame, frame[0], frame[1]);
                        }

                        // Non-blocking; the UI just misses frames if it falls behind
                        for frame in block.chunks_exact(2) {
                            if frames_tx.push([frame[0], frame[1]]).is_err() {
                                break;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                }
            },
            move |err| log::error!("Stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    let mut app = UiApp::new(handle, stream, frames_rx, sample_rate as f32, profile_path);
    app.run(&mut terminal)
}

/// Map one stereo frame onto however many channels the device has.
#[inline]
fn write_frame(device_frame: &mut [f32], left: f32, right: f32) {
    match device_frame {
        [mono] => *mono = (left + right) * 0.5,
        [l, r, rest @ ..] => {
            *l = left;
            *r = right;
            rest.fill(0.0);
        }
        [] => {}
    }
}
