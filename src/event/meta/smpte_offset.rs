#![doc = r#"
SMPTE Offset (`FF 54 05 hr mn se fr ff`)

Specifies the SMPTE time at which a track is to start. It should be present
at the beginning of the track, before any nonzero delta-times.
"#]

use crate::file::{SmpteError, SmpteFps};

/// A representation of a MIDI track's starting position in SMPTE time code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate for this offset.
    pub fps: SmpteFps,
    /// Hour component of the time code (0-23).
    pub hour: u8,
    /// Minute component of the time code (0-59).
    pub minute: u8,
    /// Second component of the time code (0-59).
    pub second: u8,
    /// Frame number within the current second.
    pub frame: u8,
    /// Subframe component, in 100ths of a frame (0-99).
    pub subframe: u8,
}

impl SmpteOffset {
    /// Convert this SMPTE offset to microseconds.
    pub const fn as_micros(&self) -> f64 {
        ((((self.hour as u64 * 3600) + (self.minute as u64) * 60 + self.second as u64) * 1_000_000)
            as f64)
            + ((self.frame as u64) * 1_000_000) as f64 / self.fps.as_f64()
            + ((self.subframe as u32) * 10_000) as f64 / self.fps.as_f64()
    }

    /// Parse a SMPTE offset from a 5-byte meta event payload.
    ///
    /// - Byte 0: `0rrhhhhh` where `rr` is frame rate type, `hhhhh` is hours
    /// - Byte 1: Minutes (0-59)
    /// - Byte 2: Seconds (0-59)
    /// - Byte 3: Frames
    /// - Byte 4: Fractional frames in 100ths (0-99)
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        if data.len() != 5 {
            return Err(SmpteError::Length(data.len()));
        }

        // 0 rr hhhhh
        let fps = match SmpteFps::from_bits(data[0] >> 5) {
            Some(fps) => fps,
            None => return Err(SmpteError::TrackFrame(data[0] >> 5)),
        };
        let offset = Self {
            fps,
            hour: data[0] & 0b0001_1111,
            minute: data[1],
            second: data[2],
            frame: data[3],
            subframe: data[4],
        };
        match offset.validate() {
            Ok(()) => Ok(offset),
            Err(e) => Err(e),
        }
    }

    /// Check the fields against their ranges, hour first.
    ///
    /// Frames are not bounded by the frame rate.
    pub const fn validate(&self) -> Result<(), SmpteError> {
        if self.hour > 23 {
            return Err(SmpteError::HourOffset(self.hour));
        }
        if self.minute > 59 {
            return Err(SmpteError::MinuteOffset(self.minute));
        }
        if self.second > 59 {
            return Err(SmpteError::SecondOffset(self.second));
        }
        if self.subframe > 99 {
            return Err(SmpteError::Subframe(self.subframe));
        }
        Ok(())
    }

    /// The 5-byte meta event payload for this offset.
    ///
    /// Only meaningful for an offset that passes [`SmpteOffset::validate`].
    pub const fn to_bytes(&self) -> [u8; 5] {
        [
            (self.fps.as_bits() << 5) | (self.hour & 0b0001_1111),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // these are the bytes after 00 FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
    assert_eq!(offset.to_bytes(), bytes);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let bytes = [0x7F, 0x17, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let bytes = [0x41, 0x50, 0x2D, 0x0C, 0x22];
    let err = SmpteOffset::parse(&bytes).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));

    let err = SmpteOffset::parse(&bytes[..4]).unwrap_err();
    assert_eq!(err, SmpteError::Length(4));
}

#[test]
fn validate_checks_each_field() {
    use pretty_assertions::assert_eq;
    let valid = SmpteOffset {
        fps: SmpteFps::TwentyFive,
        hour: 23,
        minute: 59,
        second: 59,
        frame: 24,
        subframe: 99,
    };
    assert_eq!(valid.validate(), Ok(()));
    assert_eq!(SmpteOffset::parse(&valid.to_bytes()), Ok(valid));

    assert_eq!(
        SmpteOffset { hour: 40, ..valid }.validate(),
        Err(SmpteError::HourOffset(40))
    );
    assert_eq!(
        SmpteOffset { minute: 60, ..valid }.validate(),
        Err(SmpteError::MinuteOffset(60))
    );
    assert_eq!(
        SmpteOffset { second: 60, ..valid }.validate(),
        Err(SmpteError::SecondOffset(60))
    );
    assert_eq!(
        SmpteOffset { subframe: 100, ..valid }.validate(),
        Err(SmpteError::Subframe(100))
    );
}
