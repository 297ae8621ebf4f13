//! Equalizer sliders and the settings panel

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use noisebed::{
    engine::{GainAnimator, PipelineParameters, Side},
    BAND_CENTERS, BAND_COUNT,
};

/// Cells on each side of the 0 dB mark
const HALF_BAR: usize = 15;

fn band_label(center_hz: f32) -> String {
    if center_hz >= 1000.0 {
        format!("{:>4}k", center_hz / 1000.0)
    } else {
        format!("{:>5}", center_hz)
    }
}

/// One horizontal slider: cut grows left of the center line, boost right.
fn slider(gain_db: f32, limit_db: f32) -> (String, String) {
    let cells = ((gain_db.abs() / limit_db) * HALF_BAR as f32).round() as usize;
    let cells = cells.min(HALF_BAR);
    let (left, right) = if gain_db < 0.0 {
        (
            format!("{}{}", " ".repeat(HALF_BAR - cells), "━".repeat(cells)),
            " ".repeat(HALF_BAR),
        )
    } else {
        (
            " ".repeat(HALF_BAR),
            format!("{}{}", "━".repeat(cells), " ".repeat(HALF_BAR - cells)),
        )
    };
    (left, right)
}

pub fn render_bands(
    frame: &mut Frame,
    area: Rect,
    gains: &[f32; BAND_COUNT],
    selected: usize,
    limit_db: f32,
) {
    let block = Block::default().title(" Equalizer ").borders(Borders::ALL);

    let lines: Vec<Line> = BAND_CENTERS
        .iter()
        .zip(gains.iter())
        .enumerate()
        .map(|(i, (&center, &gain))| {
            let (cut, boost) = slider(gain, limit_db);
            let label_style = if i == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            Line::from(vec![
                Span::styled(format!(" {} Hz ", band_label(center)), label_style),
                Span::styled(cut, Style::default().fg(Color::LightRed)),
                Span::styled("│", Style::default().fg(Color::DarkGray)),
                Span::styled(boost, Style::default().fg(Color::LightGreen)),
                Span::styled(format!(" {:+5.1} dB", gain), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn row<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<10}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

pub fn render_settings(
    frame: &mut Frame,
    area: Rect,
    params: &PipelineParameters,
    animator: &GainAnimator,
    animating: bool,
    preset: &str,
) {
    let block = Block::default().title(" Settings ").borders(Borders::ALL);

    let on_off = |on: bool| if on { "on" } else { "off" };
    let lines = vec![
        row(
            "Noise",
            format!(
                "L {}  R {}",
                params.kind(Side::Left).name(),
                params.kind(Side::Right).name()
            ),
            Color::LightYellow,
        ),
        row("Width", params.width.name().to_string(), Color::LightBlue),
        row("Speed", format!("{:.2}x", params.speed), Color::LightBlue),
        row("Volume", format!("{:.0}%", params.volume * 100.0), Color::LightBlue),
        row("Preset", preset.to_string(), Color::White),
        row(
            "Animate",
            on_off(animating).to_string(),
            if animating { Color::LightGreen } else { Color::DarkGray },
        ),
        row(
            "Mode",
            format!("{} ({})", animator.mode.name(), animator.range.name()),
            Color::White,
        ),
        row(
            "Alternate",
            on_off(animator.alternate).to_string(),
            Color::White,
        ),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
