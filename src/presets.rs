use crate::{dsp::noise::NoiseKind, BAND_COUNT};

/// A named starting point: one noise color for both voices plus EQ gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub kind: NoiseKind,
    pub gains: [f32; BAND_COUNT],
}

const fn preset(name: &'static str, kind: NoiseKind, gains: [f32; BAND_COUNT]) -> Preset {
    Preset { name, kind, gains }
}

/// Built-in presets, in menu order.
///
/// The single-frequency presets carve everything down by 12 dB except an
/// 8 dB peak at the named band and a -8 dB shoulder on the band below it.
/// "125Hz" is the exception: its shoulder sits on the band above.
pub static PRESETS: [Preset; 13] = [
    preset("White", NoiseKind::White, [0.0; BAND_COUNT]),
    preset("Pink", NoiseKind::Pink, [0.0; BAND_COUNT]),
    preset("Brown", NoiseKind::Brown, [0.0; BAND_COUNT]),
    preset("Grey", NoiseKind::White, [1.0; BAND_COUNT]),
    preset(
        "Infra",
        NoiseKind::Brown,
        [4.0, 3.0, 1.0, -2.0, -4.0, -6.0, -8.0, -10.0],
    ),
    preset(
        "Ultra",
        NoiseKind::White,
        [-8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0],
    ),
    preset(
        "125Hz",
        NoiseKind::White,
        [-12.0, 8.0, -8.0, -12.0, -12.0, -12.0, -12.0, -12.0],
    ),
    preset(
        "250Hz",
        NoiseKind::White,
        [-12.0, -8.0, 8.0, -12.0, -12.0, -12.0, -12.0, -12.0],
    ),
    preset(
        "500Hz",
        NoiseKind::White,
        [-12.0, -12.0, -8.0, 8.0, -12.0, -12.0, -12.0, -12.0],
    ),
    preset(
        "1kHz",
        NoiseKind::White,
        [-12.0, -12.0, -12.0, -8.0, 8.0, -12.0, -12.0, -12.0],
    ),
    preset(
        "2kHz",
        NoiseKind::White,
        [-12.0, -12.0, -12.0, -12.0, -8.0, 8.0, -12.0, -12.0],
    ),
    preset(
        "4kHz",
        NoiseKind::White,
        [-12.0, -12.0, -12.0, -12.0, -12.0, -8.0, 8.0, -12.0],
    ),
    preset(
        "8kHz",
        NoiseKind::White,
        [-12.0, -12.0, -12.0, -12.0, -12.0, -12.0, -8.0, 8.0],
    ),
];

/// Look a preset up by its display name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Gain-only EQ curves. Unlike a [`Preset`] these leave the noise colors alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EqShape {
    #[default]
    Flat,
    Balanced,
    Full,
}

impl EqShape {
    pub const ALL: [EqShape; 3] = [EqShape::Flat, EqShape::Balanced, EqShape::Full];

    pub fn gains(self) -> [f32; BAND_COUNT] {
        match self {
            EqShape::Flat => [0.0; BAND_COUNT],
            EqShape::Balanced => [-2.0, -1.0, 0.0, 1.0, 1.0, 0.0, -1.0, -2.0],
            EqShape::Full => [2.0; BAND_COUNT],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EqShape::Flat => "Flat",
            EqShape::Balanced => "Balanced",
            EqShape::Full => "Full",
        }
    }

    pub fn next(self) -> Self {
        match self {
            EqShape::Flat => EqShape::Balanced,
            EqShape::Balanced => EqShape::Full,
            EqShape::Full => EqShape::Flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(find("infra").map(|p| p.kind), Some(NoiseKind::Brown));
        assert_eq!(find("1KHZ").map(|p| p.gains[4]), Some(8.0));
        assert!(find("purple").is_none());
    }

    #[test]
    fn band_presets_peak_at_their_band() {
        for (band, name) in ["125Hz", "250Hz", "500Hz", "1kHz", "2kHz", "4kHz", "8kHz"]
            .iter()
            .enumerate()
        {
            let preset = find(name).unwrap();
            let loudest = preset
                .gains
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(loudest, band + 1, "{name}");
        }
    }

    #[test]
    fn band_presets_have_one_shoulder_next_to_the_peak() {
        for (band, name) in ["125Hz", "250Hz", "500Hz", "1kHz", "2kHz", "4kHz", "8kHz"]
            .iter()
            .enumerate()
        {
            let gains = find(name).unwrap().gains;
            let peak = band + 1;
            let shoulder = if peak == 1 { 2 } else { peak - 1 };
            assert_eq!(gains[peak], 8.0, "{name}");
            assert_eq!(gains[shoulder], -8.0, "{name}");
            let carved = gains.iter().filter(|&&g| g == -12.0).count();
            assert_eq!(carved, BAND_COUNT - 2, "{name}");
        }
    }

    #[test]
    fn flat_shape_is_zero() {
        assert_eq!(EqShape::Flat.gains(), [0.0; BAND_COUNT]);
        assert_eq!(EqShape::Balanced.gains().iter().sum::<f32>(), -4.0);
    }
}
