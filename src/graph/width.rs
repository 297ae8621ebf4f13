use serde::{Deserialize, Serialize};

/*
Stereo Width
============

Each voice feeds one side of the stereo field. Width decides how much of a
voice also leaks into the opposite channel, and with what sign.

Think of the pair in mid/side terms:

    mid  = (L + R) / 2        what both channels share
    side = (L - R) / 2        what makes them differ

    L' = mid + w·side
    R' = mid - w·side

Expanding for the voice on the left (it only contributes to L):

    L' gets  (1 + w) / 2  of it
    R' gets  (1 - w) / 2  of it

and mirrored for the right voice. So width becomes a pair of pan gains:

    width    w      own side   other side   result
    ------   ----   --------   ----------   --------------------------
    Mono     0.0    0.50       +0.50        both channels identical
    Narrow   0.5    0.75       +0.25        partial blend
    Normal   1.0    1.00        0.00        untouched, hard panned
    Wide     1.5    1.25       -0.25        inverted crossfeed, wider

`mix = w - 1` measures the departure from Normal: zero leaves the voice
untouched, and the crossfeed grows smoothly with |mix|.
*/

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StereoWidth {
    Mono,
    Narrow,
    #[default]
    Normal,
    Wide,
}

impl StereoWidth {
    pub const ALL: [StereoWidth; 4] = [
        StereoWidth::Mono,
        StereoWidth::Narrow,
        StereoWidth::Normal,
        StereoWidth::Wide,
    ];

    pub fn factor(self) -> f32 {
        match self {
            StereoWidth::Mono => 0.0,
            StereoWidth::Narrow => 0.5,
            StereoWidth::Normal => 1.0,
            StereoWidth::Wide => 1.5,
        }
    }

    /// Nearest preset to an arbitrary factor (used when reading profiles).
    pub fn from_factor(factor: f32) -> Self {
        Self::ALL
            .into_iter()
            .min_by(|a, b| {
                (a.factor() - factor)
                    .abs()
                    .total_cmp(&(b.factor() - factor).abs())
            })
            .unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            StereoWidth::Mono => "Mono",
            StereoWidth::Narrow => "Narrow",
            StereoWidth::Normal => "Normal",
            StereoWidth::Wide => "Wide",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StereoWidth::Mono => StereoWidth::Narrow,
            StereoWidth::Narrow => StereoWidth::Normal,
            StereoWidth::Normal => StereoWidth::Wide,
            StereoWidth::Wide => StereoWidth::Mono,
        }
    }
}

/// Which output channel a voice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Left/right gains for placing a mono signal in the stereo field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pan {
    pub left: f32,
    pub right: f32,
}

impl Pan {
    pub fn hard(side: Side) -> Self {
        match side {
            Side::Left => Pan {
                left: 1.0,
                right: 0.0,
            },
            Side::Right => Pan {
                left: 0.0,
                right: 1.0,
            },
        }
    }
}

/// Places one voice in the stereo field according to the width setting.
///
/// The stage never alters the voice's samples. Its output is the pair of gains
/// the mixer applies when it spreads the mono voice over both channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoWidthStage {
    side: Side,
    width: f32,
}

impl StereoWidthStage {
    pub fn new(side: Side, width: f32) -> Self {
        Self { side, width }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Departure from Normal width; 0.0 means the voice passes untouched.
    pub fn mix(&self) -> f32 {
        self.width - 1.0
    }

    pub fn pan(&self) -> Pan {
        let own = (1.0 + self.width) * 0.5;
        let other = (1.0 - self.width) * 0.5;
        match self.side {
            Side::Left => Pan {
                left: own,
                right: other,
            },
            Side::Right => Pan {
                left: other,
                right: own,
            },
        }
    }
}
