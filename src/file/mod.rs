#![doc = r#"
Rusty representation of a Standard MIDI File

```text
SMF = <header_chunk> + <track_chunk> [+ <track_chunk> ...]
```

[`parse`] reads a header and then exactly as many tracks as it declares.
[`write`] emits the header and then each track in order. For incremental
work use [`SmfReader`] and [`SmfWriter`] directly.
"#]

pub mod header;
pub use header::MidiFileHeader;

mod format;
pub use format::*;

pub mod track;
pub use track::Track;

mod stream;
pub use stream::*;

mod timing;
pub use timing::*;

use crate::{
    reader::{ReadResult, Reader},
    registry::EventRegistry,
    writer::{WriteResult, WriterError},
};
use std::{
    io::{Read, Write},
    ops::Index,
    slice,
};

#[doc = r#"
A whole file: format, resolution and tracks.

The resolution is the raw header word. Values with the high bit set are
SMPTE-based; they are stored as-is, and [`Pattern::timing`] interprets them.
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    format: Format,
    resolution: u16,
    tracks: Vec<Track>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(Format::Simultaneous, 220, Vec::new())
    }
}

impl Pattern {
    /// Create a new pattern
    pub fn new(format: Format, resolution: u16, tracks: Vec<Track>) -> Self {
        Self {
            format,
            resolution,
            tracks,
        }
    }

    /// The file format
    pub fn format(&self) -> Format {
        self.format
    }

    /// Ticks per quarter note, or an SMPTE division
    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Interpret the resolution word
    pub fn timing(&self) -> Result<Timing, SmpteError> {
        Timing::from_resolution(self.resolution)
    }

    /// Returns the tracks
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterate over the tracks
    pub fn iter(&self) -> slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True if there are no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Append a track
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Consume the pattern, returning its tracks
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

impl Index<usize> for Pattern {
    type Output = Track;
    fn index(&self, index: usize) -> &Self::Output {
        &self.tracks[index]
    }
}

impl Extend<Track> for Pattern {
    fn extend<T: IntoIterator<Item = Track>>(&mut self, iter: T) {
        self.tracks.extend(iter);
    }
}

impl IntoIterator for Pattern {
    type Item = Track;
    type IntoIter = std::vec::IntoIter<Track>;
    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Track;
    type IntoIter = slice::Iter<'a, Track>;
    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

/// Parse a header and then every track it declares, using the standard registry.
pub fn parse<R: Read>(reader: &mut Reader<R>) -> ReadResult<Pattern> {
    parse_with_registry(reader, EventRegistry::global())
}

/// Parse a header and then every track it declares.
pub fn parse_with_registry<R: Read>(
    reader: &mut Reader<R>,
    registry: &EventRegistry,
) -> ReadResult<Pattern> {
    let header = MidiFileHeader::read(reader)?;
    let tracks = (0..header.track_count())
        .map(|_| Track::read(reader, registry))
        .collect::<ReadResult<Vec<_>>>()?;
    Ok(Pattern::new(header.format(), header.resolution(), tracks))
}

/// Write the header and then each track, using the standard registry.
pub fn write<W: Write>(pattern: &Pattern, writer: &mut W) -> WriteResult<()> {
    write_with_registry(pattern, writer, EventRegistry::global())
}

/// Write the header and then each track.
///
/// Tracks are emitted one at a time; the whole file is never buffered.
pub fn write_with_registry<W: Write>(
    pattern: &Pattern,
    writer: &mut W,
    registry: &EventRegistry,
) -> WriteResult<()> {
    let track_count =
        u16::try_from(pattern.len()).map_err(|_| WriterError::TooManyTracks(pattern.len()))?;
    let header = MidiFileHeader::new(pattern.format(), track_count, pattern.resolution());
    let mut smf = SmfWriter::with_registry(writer, registry, header)?;
    for track in pattern {
        smf.write_track(track)?;
    }
    smf.finish()?;
    Ok(())
}
