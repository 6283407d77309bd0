#![doc = r#"
SMPTE (Society of Motion Picture and Television Engineers) Time Code support

MIDI files can express time in two ways:

1. **Musical Time** - ticks per quarter note
2. **Absolute Time** - SMPTE frames per second and ticks per frame

SMPTE shows up in two places in a file: in the header's resolution word, and
in the `FF 54` SMPTE Offset meta event. Both use the four frame rates below.
"#]

use thiserror::Error;

/// The possible FPS (Frames Per Second) for MIDI tracks and files
///
/// The MIDI specification defines only four possible frame types:
/// - 24 fps: Standard film rate
/// - 25 fps: PAL/SECAM television standard
/// - 29.97 fps: NTSC color television (drop-frame timecode)
/// - 30 fps: NTSC black & white, some digital video formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001), drop-frame
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// Get the actual frame rate as a floating-point value.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }

    /// The 2-bit `rr` code used by the SMPTE Offset meta event.
    pub const fn as_bits(&self) -> u8 {
        match self {
            Self::TwentyFour => 0,
            Self::TwentyFive => 1,
            Self::TwentyNine => 2,
            Self::Thirty => 3,
        }
    }

    /// Parse the 2-bit `rr` code of the SMPTE Offset meta event.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::TwentyFour),
            1 => Some(Self::TwentyFive),
            2 => Some(Self::TwentyNine),
            3 => Some(Self::Thirty),
            _ => None,
        }
    }

    /// The negative frame count stored in the high byte of the header's resolution word.
    pub const fn header_byte(&self) -> i8 {
        match self {
            Self::TwentyFour => -24,
            Self::TwentyFive => -25,
            Self::TwentyNine => -29,
            Self::Thirty => -30,
        }
    }

    /// Parse the high byte of an SMPTE resolution word.
    pub const fn from_header_byte(byte: i8) -> Option<Self> {
        match byte {
            -24 => Some(Self::TwentyFour),
            -25 => Some(Self::TwentyFive),
            -29 => Some(Self::TwentyNine),
            -30 => Some(Self::Thirty),
            _ => None,
        }
    }
}

/// The precise value for NTSC drop-frame rate: 29.97002997... fps
const DROP_FRAME: f64 = 30_000. / 1001.;

/// Errors from interpreting SMPTE data
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// The header's SMPTE frame byte is not -24, -25, -29 or -30
    #[error("Invalid SMPTE header frame rate {0}")]
    HeaderFrameTime(i8),
    /// The SMPTE offset payload must be 5 bytes
    #[error("SMPTE offset must be 5 bytes, found {0}")]
    Length(usize),
    /// The `rr` bits of an SMPTE offset are not a frame rate
    #[error("Invalid SMPTE offset frame rate {0}")]
    TrackFrame(u8),
    /// Hours must be 0-23
    #[error("Invalid SMPTE offset hour {0}")]
    HourOffset(u8),
    /// Minutes must be 0-59
    #[error("Invalid SMPTE offset minute {0}")]
    MinuteOffset(u8),
    /// Seconds must be 0-59
    #[error("Invalid SMPTE offset second {0}")]
    SecondOffset(u8),
    /// Subframes must be 0-99
    #[error("Invalid SMPTE offset subframe {0}")]
    Subframe(u8),
}
