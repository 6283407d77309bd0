mod smpte;
pub use smpte::*;

/// The header timing type.
///
/// The resolution word of the `MThd` chunk is either the number of ticks per
/// quarter note (high bit clear) or an SMPTE frame rate and ticks per frame
/// (high bit set). [`Pattern`](crate::file::Pattern) stores the raw word;
/// this is an interpretation of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(u16),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte {
        /// Frames per second
        fps: SmpteFps,
        /// Ticks per frame
        ticks_per_frame: u8,
    },
}

impl Timing {
    /// Interpret a raw resolution word.
    pub const fn from_resolution(resolution: u16) -> Result<Self, SmpteError> {
        if resolution & 0x8000 == 0 {
            return Ok(Self::TicksPerQuarterNote(resolution));
        }
        //Bits 14 thru 8 contain one of the four values -24, -25, -29, or -30
        let [frame, ticks_per_frame] = resolution.to_be_bytes();
        match SmpteFps::from_header_byte(frame as i8) {
            Some(fps) => Ok(Self::Smpte {
                fps,
                ticks_per_frame,
            }),
            None => Err(SmpteError::HeaderFrameTime(frame as i8)),
        }
    }

    /// The raw resolution word for this timing.
    pub const fn resolution(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(tpqn) => *tpqn & 0x7FFF,
            Self::Smpte {
                fps,
                ticks_per_frame,
            } => u16::from_be_bytes([fps.header_byte() as u8, *ticks_per_frame]),
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            _ => None,
        }
    }
}
