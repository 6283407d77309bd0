#![doc = r#"
Payload types for meta events

Meta events are non-MIDI annotations, always introduced by `0xFF`:

```text
FF <command> <length: VLQ> <payload>
```

Most payloads are short fixed-size records (tempo, time and key signature,
SMPTE offset). The text family (`0x01`-`0x08`) carries a [`Text`] payload.
"#]

mod smpte_offset;
pub use smpte_offset::*;

mod text;
pub use text::*;

#[doc = r#"
Set Tempo (`FF 51 03 tttttt`)

The tempo in microseconds per quarter note, stored as a 24-bit big-endian number.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// The largest tempo a 24-bit field can hold
    pub const MAX: u32 = 0x00FF_FFFF;

    /// 120 beats per minute
    pub const DEFAULT: Self = Self(500_000);

    /// Create a tempo from microseconds per quarter note.
    ///
    /// The value is not checked here; values above [`Tempo::MAX`] are rejected
    /// by the encoder.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Create a tempo from beats per minute
    pub fn from_bpm(bpm: f64) -> Self {
        Self((60_000_000. / bpm).round() as u32)
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Beats per minute
    pub fn bpm(&self) -> f64 {
        60_000_000. / self.0 as f64
    }

    pub(crate) const fn from_be_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    pub(crate) const fn to_be_bytes(self) -> [u8; 3] {
        let [_, a, b, c] = self.0.to_be_bytes();
        [a, b, c]
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[doc = r#"
Time Signature (`FF 58 04 nn dd cc bb`)

The denominator is stored as a negative power of two: `2` means a quarter
note, `3` an eighth, and so on.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// log2 of the beat unit
    pub denominator_pow: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes in a MIDI quarter note (24 clocks)
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// Create a new time signature from its wire fields.
    pub const fn new(
        numerator: u8,
        denominator_pow: u8,
        clocks_per_click: u8,
        thirty_seconds_per_quarter: u8,
    ) -> Self {
        Self {
            numerator,
            denominator_pow,
            clocks_per_click,
            thirty_seconds_per_quarter,
        }
    }

    /// The denominator as a number (4 for x/4).
    ///
    /// Returns `None` if the stored power does not fit in a `u32`.
    pub const fn denominator(&self) -> Option<u32> {
        1u32.checked_shl(self.denominator_pow as u32)
    }

    pub(crate) const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    pub(crate) const fn to_bytes(self) -> [u8; 4] {
        [
            self.numerator,
            self.denominator_pow,
            self.clocks_per_click,
            self.thirty_seconds_per_quarter,
        ]
    }
}

#[doc = r#"
Key Signature (`FF 59 02 sf mi`)

`sf` is the number of sharps (positive) or flats (negative), `mi` is 0 for
a major key and 1 for a minor key.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps if positive, flats if negative
    pub accidentals: i8,
    /// True for a minor key
    pub minor: bool,
}

impl KeySignature {
    /// Create a new key signature
    pub const fn new(accidentals: i8, minor: bool) -> Self {
        Self { accidentals, minor }
    }

    pub(crate) const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self::new(bytes[0] as i8, bytes[1] != 0)
    }

    pub(crate) const fn to_bytes(self) -> [u8; 2] {
        [self.accidentals as u8, self.minor as u8]
    }
}
