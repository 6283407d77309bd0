#![doc = r#"
The header chunk

```text
header_chunk = "MThd" + <header_length> + <format> + <n> + <division>
```

- `"MThd"`: 4 bytes, the literal chunk id
- `<header_length>`: 4 bytes, always 6
- `<format>`: 2 bytes, see [`Format`]
- `<n>`: 2 bytes, number of track chunks that follow
- `<division>`: 2 bytes, the resolution, see [`Timing`](crate::file::Timing)

Numbers larger than one byte are placed most significant byte first.
"#]

use crate::{
    chunk::{ChunkHeader, HEADER_ID},
    file::Format,
    reader::{HeaderError, ReadResult, Reader, ReaderErrorKind},
    writer::{self, WriteResult},
};
use std::io::{Read, Write};

/// The payload length of every header chunk
pub const HEADER_LENGTH: u32 = 6;

#[doc = r#"
The contents of the `MThd` chunk
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiFileHeader {
    format: Format,
    track_count: u16,
    resolution: u16,
}

impl MidiFileHeader {
    /// Create a new header
    pub const fn new(format: Format, track_count: u16, resolution: u16) -> Self {
        Self {
            format,
            track_count,
            resolution,
        }
    }

    /// How the tracks relate to each other
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Number of track chunks that follow the header
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// Raw resolution word (ticks per quarter note, or SMPTE)
    pub const fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Parse the 6-byte payload: format, track count, resolution.
    pub fn parse(payload: [u8; 6]) -> Result<Self, HeaderError> {
        let [f0, f1, n0, n1, r0, r1] = payload;
        let format_word = u16::from_be_bytes([f0, f1]);
        let format =
            Format::try_from(format_word).map_err(|_| HeaderError::Format(format_word))?;
        Ok(Self::new(
            format,
            u16::from_be_bytes([n0, n1]),
            u16::from_be_bytes([r0, r1]),
        ))
    }

    /// Read the header chunk from the start of a file.
    ///
    /// The chunk id and length are checked before the payload is read.
    pub fn read<R: Read>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let chunk = ChunkHeader::read(reader)?;
        if chunk.id != HEADER_ID {
            return Err(reader.error(HeaderError::ChunkId(chunk.id)));
        }
        if chunk.length != HEADER_LENGTH {
            return Err(reader.error(HeaderError::Length(chunk.length)));
        }
        let payload = reader.read_exact_size()?;
        Self::parse(payload).map_err(|e| reader.error(ReaderErrorKind::InvalidHeader(e)))
    }

    /// Write `"MThd"`, the length 6, then format, track count and resolution.
    pub fn write<W: Write>(&self, writer: &mut W) -> WriteResult<()> {
        ChunkHeader {
            id: HEADER_ID,
            length: HEADER_LENGTH,
        }
        .write(writer)?;
        writer::write_bytes(writer, &self.format.to_word().to_be_bytes())?;
        writer::write_bytes(writer, &self.track_count.to_be_bytes())?;
        writer::write_bytes(writer, &self.resolution.to_be_bytes())
    }
}
