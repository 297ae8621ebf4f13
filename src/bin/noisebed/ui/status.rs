//! Status bar - play state, output levels and the last message

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Output levels over the last analysis window, per channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioStats {
    pub peak: [f32; 2],
    pub rms: [f32; 2],
}

impl AudioStats {
    pub fn from_frames(frames: &[[f32; 2]]) -> Self {
        if frames.is_empty() {
            return Self::default();
        }
        let mut peak = [0.0f32; 2];
        let mut power = [0.0f32; 2];
        for frame in frames {
            for ch in 0..2 {
                peak[ch] = peak[ch].max(frame[ch].abs());
                power[ch] += frame[ch] * frame[ch];
            }
        }
        let n = frames.len() as f32;
        Self {
            peak,
            rms: power.map(|p| (p / n).sqrt()),
        }
    }
}

fn db(level: f32) -> f32 {
    20.0 * level.max(1e-6).log10()
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    playing: bool,
    stats: &AudioStats,
    sample_rate: f32,
    message: &str,
) {
    let block = Block::default().title(" noisebed ").borders(Borders::ALL);

    let (symbol, state) = if playing {
        ("▶", "Playing")
    } else {
        ("⏸", "Paused")
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", symbol, state),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "Peak L {:6.1} R {:6.1} dB  RMS L {:6.1} R {:6.1} dB  ",
                db(stats.peak[0]),
                db(stats.peak[1]),
                db(stats.rms[0]),
                db(stats.rms[1])
            ),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(message.to_string(), Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
