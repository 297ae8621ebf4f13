//! TUI for noisebed
//!
//! Keyboard control surface over a [`GraphHandle`], plus live views of the
//! output fed through a ring buffer from the audio callback.

mod controls;
mod spectrum;
mod status;
mod waveform;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use cpal::{traits::StreamTrait, Stream};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use noisebed::{
    dsp::noise::NoiseKind,
    engine::{GainAnimator, GraphHandle, Side, ANIMATION_INTERVAL},
    presets::{EqShape, PRESETS},
    profile::Profile,
    BAND_COUNT,
};

use controls::{render_bands, render_settings};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Frames per analysis window (≈21 ms at 48 kHz)
pub const VIS_BLOCK_LEN: usize = 1024;

/// Slider travel for a band, in dB either way
const GAIN_LIMIT_DB: f32 = 15.0;
const GAIN_STEP_DB: f32 = 1.0;
const SPEED_STEP: f32 = 0.1;
const VOLUME_STEP: f32 = 0.05;

pub struct UiApp {
    handle: GraphHandle,
    stream: Stream,
    frames_rx: Consumer<[f32; 2]>,
    profile_path: PathBuf,

    /// Most recent analysis window, interleaved L/R
    frames: Vec<[f32; 2]>,
    spectrum: SpectrumAnalyzer,
    stats: AudioStats,

    animator: GainAnimator,
    animating: bool,
    last_tick: Instant,

    selected_band: usize,
    preset_index: usize,
    eq_shape: EqShape,
    playing: bool,
    message: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        handle: GraphHandle,
        stream: Stream,
        frames_rx: Consumer<[f32; 2]>,
        sample_rate: f32,
        profile_path: PathBuf,
    ) -> Self {
        Self {
            handle,
            stream,
            frames_rx,
            profile_path,
            frames: Vec::with_capacity(VIS_BLOCK_LEN),
            spectrum: SpectrumAnalyzer::new(VIS_BLOCK_LEN, sample_rate),
            stats: AudioStats::default(),
            animator: GainAnimator::default(),
            animating: false,
            last_tick: Instant::now(),
            selected_band: 0,
            preset_index: 0,
            eq_shape: EqShape::Flat,
            playing: true,
            message: String::from("Ready"),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            if self.animating && self.last_tick.elapsed() >= ANIMATION_INTERVAL {
                self.animator.tick(&self.handle);
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the ring, keeping the newest full window.
    fn poll_audio(&mut self) {
        let available = self.frames_rx.slots();
        if available < VIS_BLOCK_LEN {
            return;
        }
        // Skip to the last whole window so the view doesn't lag
        let skip = available - VIS_BLOCK_LEN;
        for _ in 0..skip {
            let _ = self.frames_rx.pop();
        }

        self.frames.clear();
        while let Ok(frame) = self.frames_rx.pop() {
            self.frames.push(frame);
        }

        self.stats = AudioStats::from_frames(&self.frames);
        self.spectrum.update(&self.frames);
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.toggle_playback(),

            KeyCode::Left => self.selected_band = self.selected_band.saturating_sub(1),
            KeyCode::Right => self.selected_band = (self.selected_band + 1).min(BAND_COUNT - 1),
            KeyCode::Up => self.adjust_band(GAIN_STEP_DB),
            KeyCode::Down => self.adjust_band(-GAIN_STEP_DB),

            KeyCode::Char('n') => self.cycle_kind(None),
            KeyCode::Char('l') => self.cycle_kind(Some(Side::Left)),
            KeyCode::Char('r') => self.cycle_kind(Some(Side::Right)),
            KeyCode::Char('w') => {
                let width = self.handle.params().width.next();
                self.handle.set_width(width);
            }

            KeyCode::Char('[') => self.handle.nudge_speed(-SPEED_STEP),
            KeyCode::Char(']') => self.handle.nudge_speed(SPEED_STEP),
            KeyCode::Char('0') => self.handle.reset_speed(),
            KeyCode::Char('-') => self.adjust_volume(-VOLUME_STEP),
            KeyCode::Char('=') | KeyCode::Char('+') => self.adjust_volume(VOLUME_STEP),

            KeyCode::Char('p') => {
                self.preset_index = (self.preset_index + 1) % PRESETS.len();
                let preset = &PRESETS[self.preset_index];
                self.handle.apply_preset(preset);
                self.message = format!("Preset: {}", preset.name);
            }
            KeyCode::Char('e') => {
                self.eq_shape = self.eq_shape.next();
                self.handle.apply_eq_shape(self.eq_shape);
                self.message = format!("EQ: {}", self.eq_shape.name());
            }

            KeyCode::Char('a') => {
                self.animating = !self.animating;
                self.last_tick = Instant::now();
            }
            KeyCode::Char('m') => self.animator.mode = self.animator.mode.next(),
            KeyCode::Char('g') => self.animator.range = self.animator.range.next(),
            KeyCode::Char('t') => self.animator.alternate = !self.animator.alternate,

            KeyCode::Char('R') => {
                self.handle.reset();
                self.animator.alternate = false;
                self.message = String::from("Reset");
            }
            KeyCode::Char('s') => self.save_profile(),
            KeyCode::Char('o') => self.load_profile(),
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        let result = if self.playing {
            self.stream.pause().map_err(|e| e.to_string())
        } else {
            self.stream.play().map_err(|e| e.to_string())
        };
        match result {
            Ok(()) => self.playing = !self.playing,
            Err(err) => {
                log::error!("Playback toggle failed: {err}");
                self.message = format!("Playback error: {err}");
            }
        }
    }

    fn adjust_band(&mut self, delta: f32) {
        let current = self.handle.gains()[self.selected_band];
        let gain = (current + delta).clamp(-GAIN_LIMIT_DB, GAIN_LIMIT_DB);
        self.handle.set_band_gain(self.selected_band, gain);
    }

    fn adjust_volume(&mut self, delta: f32) {
        let volume = (self.handle.params().volume + delta).clamp(0.0, 1.0);
        self.handle.set_volume(volume);
    }

    fn cycle_kind(&mut self, side: Option<Side>) {
        let params = self.handle.params();
        match side {
            Some(side) => self.handle.set_noise_kind(side, params.kind(side).next()),
            None => {
                let kind: NoiseKind = params.kind(Side::Left).next();
                self.handle.set_noise_kinds(kind);
            }
        }
    }

    fn save_profile(&mut self) {
        self.message = match self.handle.to_profile().save(&self.profile_path) {
            Ok(()) => format!("Saved to {}", self.profile_path.display()),
            Err(err) => err.to_string(),
        };
    }

    fn load_profile(&mut self) {
        // Any failure leaves the current settings alone
        self.message = match Profile::load(&self.profile_path) {
            Ok(profile) => {
                self.handle.apply_profile(&profile);
                format!("Loaded {}", self.profile_path.display())
            }
            Err(err) => err.to_string(),
        };
    }

    fn render(&self, frame: &mut Frame) {
        let settings = self.handle.settings();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Length(12), // Bands + settings
                Constraint::Min(8),     // Scope + spectrum
                Constraint::Length(1),  // Help
            ])
            .split(frame.area());

        render_status(
            frame,
            rows[0],
            self.playing,
            &self.stats,
            self.spectrum.sample_rate(),
            &self.message,
        );

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        render_bands(frame, middle[0], &settings.gains, self.selected_band, GAIN_LIMIT_DB);
        render_settings(
            frame,
            middle[1],
            &settings.params,
            &self.animator,
            self.animating,
            PRESETS[self.preset_index].name,
        );

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        render_waveform(frame, bottom[0], &self.frames);
        render_spectrum(frame, bottom[1], self.spectrum.data());

        let help = Paragraph::new(
            " [Q] Quit [Space] Play/Pause [←→↑↓] EQ [N/L/R] Noise [W] Width [ [ ] ] Speed [0] 1x \
             [-/+] Vol [P] Preset [E] EQ shape [A] Animate [M] Mode [G] Range [T] Alternate \
             [Shift-R] Reset [S/O] Save/Load",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
