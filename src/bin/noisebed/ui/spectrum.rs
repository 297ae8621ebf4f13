//! Spectrum view of the output's mid channel
//!
//! Hann-windowed FFT, read out at log-spaced frequencies and smoothed over
//! time so noise reads as a steady curve rather than flicker.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use noisebed::BAND_CENTERS;

const SPECTRUM_POINTS: usize = 64;
const MIN_FREQ: f64 = 20.0;
const FLOOR_DB: f64 = -100.0;
/// Weight of the previous curve in each update
const SMOOTHING: f64 = 0.8;

pub struct SpectrumAnalyzer {
    sample_rate: f32,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin range summed into each displayed point
    bin_ranges: Vec<(usize, usize)>,
    /// (log10 frequency, level in dB)
    points: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(len);

        let window = (0..len)
            .map(|i| {
                let phase = std::f32::consts::TAU * i as f32 / len.max(2) as f32;
                0.5 - 0.5 * phase.cos()
            })
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).min(20_000.0);
        let bin_hz = sample_rate as f64 / len as f64;
        let half = (len / 2).max(1);
        let ratio = (nyquist / MIN_FREQ).max(1.0);

        let mut bin_ranges = Vec::with_capacity(SPECTRUM_POINTS);
        let mut points = Vec::with_capacity(SPECTRUM_POINTS);
        for i in 0..SPECTRUM_POINTS {
            let lo = MIN_FREQ * ratio.powf(i as f64 / SPECTRUM_POINTS as f64);
            let hi = MIN_FREQ * ratio.powf((i + 1) as f64 / SPECTRUM_POINTS as f64);
            let first = ((lo / bin_hz).floor() as usize).clamp(1, half - 1);
            let last = ((hi / bin_hz).ceil() as usize).clamp(first + 1, half);
            bin_ranges.push((first, last));
            points.push(((lo * hi).sqrt().log10(), FLOOR_DB));
        }

        Self {
            sample_rate,
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); len],
            bin_ranges,
            points,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Analyze one window of stereo frames. Ignored unless it's full size.
    pub fn update(&mut self, frames: &[[f32; 2]]) {
        if frames.len() != self.window.len() {
            return;
        }

        for ((bin, frame), &w) in self.scratch.iter_mut().zip(frames).zip(&self.window) {
            *bin = Complex::new((frame[0] + frame[1]) * 0.5 * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = 1.0 / self.window.len() as f64;
        for (point, &(first, last)) in self.points.iter_mut().zip(&self.bin_ranges) {
            let power: f64 = self.scratch[first..last]
                .iter()
                .map(|c| c.norm_sqr() as f64)
                .sum::<f64>()
                / (last - first) as f64;
            let level = (10.0 * (power * norm).max(1e-12).log10()).max(FLOOR_DB);
            point.1 = SMOOTHING * point.1 + (1.0 - SMOOTHING) * level;
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, points: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    // Tick marks at the equalizer centers
    let markers: Vec<(f64, f64)> = BAND_CENTERS
        .iter()
        .map(|&f| ((f as f64).log10(), FLOOR_DB))
        .collect();

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(points),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::DarkGray))
            .data(&markers),
    ];

    let top = points.iter().map(|p| p.1).fold(FLOOR_DB, f64::max);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([MIN_FREQ.log10(), 20_000f64.log10()])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, (top + 10.0).max(0.0)])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
