//! Stereo oscilloscope

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub fn render_waveform(frame: &mut Frame, area: Rect, frames: &[[f32; 2]]) {
    let block = Block::default().title(" Scope (L/R) ").borders(Borders::ALL);

    // One point per terminal column is plenty for braille
    let width = area.width.max(1) as usize * 2;
    let step = frames.len().div_ceil(width).max(1);
    let channel = |ch: usize| -> Vec<(f64, f64)> {
        frames
            .iter()
            .enumerate()
            .step_by(step)
            .map(|(i, frame)| (i as f64, frame[ch] as f64))
            .collect()
    };
    let left = channel(0);
    let right = channel(1);

    let datasets = vec![
        Dataset::default()
            .name("L")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&left),
        Dataset::default()
            .name("R")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightMagenta))
            .data(&right),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, frames.len().max(1) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(vec!["-1", "0", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
