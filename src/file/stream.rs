use crate::{
    file::{Format, MidiFileHeader, Track},
    reader::{ReadResult, Reader},
    registry::EventRegistry,
    writer::{WriteResult, WriterError},
};
use std::io::{Read, Write};

#[doc = r#"
Reads a file one track at a time.

The header is parsed on construction. The reader then yields exactly as many
tracks as the header declares, each decoded only when asked for. After the
first error no further tracks are produced.

# Example
```rust
# use midiio::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let reader = SmfReader::new(&bytes[..]).unwrap();
assert_eq!(reader.header().track_count(), 2);

let tracks = reader.collect::<ReadResult<Vec<_>>>().unwrap();
assert_eq!(tracks.len(), 2);
```
"#]
pub struct SmfReader<'reg, R> {
    reader: Reader<R>,
    registry: &'reg EventRegistry,
    header: MidiFileHeader,
    remaining: u16,
}

impl<R: Read> SmfReader<'static, R> {
    /// Parse the header from `source`, using the standard registry.
    pub fn new(source: R) -> ReadResult<Self> {
        Self::with_registry(Reader::new(source), EventRegistry::global())
    }
}

impl<'reg, R: Read> SmfReader<'reg, R> {
    /// Parse the header from `reader`, decoding events with `registry`.
    pub fn with_registry(mut reader: Reader<R>, registry: &'reg EventRegistry) -> ReadResult<Self> {
        let header = MidiFileHeader::read(&mut reader)?;
        Ok(Self {
            reader,
            registry,
            header,
            remaining: header.track_count(),
        })
    }

    /// The parsed header
    pub fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Tracks not yet read
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Read the next track, or `None` once the declared count has been read.
    pub fn read_track(&mut self) -> ReadResult<Option<Track>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        match Track::read(&mut self.reader, self.registry) {
            Ok(track) => {
                self.remaining -= 1;
                Ok(Some(track))
            }
            Err(e) => {
                self.remaining = 0;
                Err(e)
            }
        }
    }

    /// Unwrap the underlying source
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read> Iterator for SmfReader<'_, R> {
    type Item = ReadResult<Track>;
    fn next(&mut self) -> Option<Self::Item> {
        self.read_track().transpose()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

#[doc = r#"
Writes a file one track at a time.

The header, with its declared track count, is written on construction. Each
call to [`write_track`](SmfWriter::write_track) encodes and emits one track
chunk straight to the sink, so tracks can be produced lazily and piped to a
consumer as they are made.

# Example
```rust
# use midiio::prelude::*;
let mut writer = SmfWriter::new(Vec::new(), Format::Simultaneous, 96, 2).unwrap();
for _ in 0..2 {
    let track: Track = [Event::new(0, Message::EndOfTrack)].into_iter().collect();
    writer.write_track(&track).unwrap();
}
let bytes = writer.finish().unwrap();
assert_eq!(bytes.len(), 14 + 2 * 12);
```
"#]
pub struct SmfWriter<'reg, W: Write> {
    writer: W,
    registry: &'reg EventRegistry,
    declared: u16,
    written: usize,
}

impl<W: Write> SmfWriter<'static, W> {
    /// Write the header to `writer`, using the standard registry.
    pub fn new(writer: W, format: Format, resolution: u16, track_count: u16) -> WriteResult<Self> {
        Self::with_registry(
            writer,
            EventRegistry::global(),
            MidiFileHeader::new(format, track_count, resolution),
        )
    }
}

impl<'reg, W: Write> SmfWriter<'reg, W> {
    /// Write `header` to `writer`, encoding events with `registry`.
    pub fn with_registry(
        mut writer: W,
        registry: &'reg EventRegistry,
        header: MidiFileHeader,
    ) -> WriteResult<Self> {
        header.write(&mut writer)?;
        Ok(Self {
            writer,
            registry,
            declared: header.track_count(),
            written: 0,
        })
    }

    /// Encode and write one track chunk.
    ///
    /// Fails without writing anything if the declared number of tracks has
    /// already been written.
    pub fn write_track(&mut self, track: &Track) -> WriteResult<()> {
        if self.written >= self.declared as usize {
            return Err(WriterError::TrackCountMismatch {
                declared: self.declared,
                written: self.written + 1,
            });
        }
        track.write(&mut self.writer, self.registry)?;
        self.written += 1;
        Ok(())
    }

    /// Tracks written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Check that every declared track was written, flush, and return the sink.
    pub fn finish(mut self) -> WriteResult<W> {
        if self.written != self.declared as usize {
            return Err(WriterError::TrackCountMismatch {
                declared: self.declared,
                written: self.written,
            });
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}
