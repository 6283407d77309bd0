#![doc = r#"
Track chunks

```text
track_chunk = "MTrk" + <length> + <track_event> [+ <track_event> ...]
```

The payload is handed to the [event codec](crate::event::codec).
"#]

use crate::{
    chunk::{self, ChunkHeader, TRACK_ID},
    event::{
        Event,
        codec::{self, EventDecoder},
    },
    reader::{ReadResult, Reader, ReaderErrorKind},
    registry::EventRegistry,
    writer::WriteResult,
};
use std::{
    io::{Read, Write},
    ops::Index,
    slice,
};

/// An ordered sequence of events, in playback order.
///
/// Each event's tick is relative to the event before it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<Event>,
}

impl Track {
    /// Create a track from its events
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// The events of the track
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterate over the events
    pub fn iter(&self) -> slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Consume the track, returning its events
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Read one `MTrk` chunk and decode its events.
    pub fn read<R: Read>(reader: &mut Reader<R>, registry: &EventRegistry) -> ReadResult<Self> {
        let header = ChunkHeader::read(reader)?;
        if header.id != TRACK_ID {
            return Err(reader.error(ReaderErrorKind::InvalidTrackHeader { found: header.id }));
        }
        let chunk = chunk::read_payload(reader, header)?;
        let offset = chunk.payload_offset();
        let payload = chunk.into_payload();
        let decoder = EventDecoder::new(Reader::with_offset(payload.as_slice(), offset), registry);
        decoder.collect::<ReadResult<Vec<_>>>().map(Self::new)
    }

    /// Encode every event, then write `"MTrk"`, the payload length, and the payload.
    pub fn write<W: Write>(&self, writer: &mut W, registry: &EventRegistry) -> WriteResult<()> {
        let payload = codec::encode_events(&self.events, registry)?;
        chunk::write_chunk(writer, TRACK_ID, &payload)
    }
}

impl Index<usize> for Track {
    type Output = Event;
    fn index(&self, index: usize) -> &Self::Output {
        &self.events[index]
    }
}

impl FromIterator<Event> for Track {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Event> for Track {
    fn extend<T: IntoIterator<Item = Event>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

impl IntoIterator for Track {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Event;
    type IntoIter = slice::Iter<'a, Event>;
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Channel, Message};
    use pretty_assertions::assert_eq;

    #[test]
    fn wrong_id() {
        let bytes = [b'X', b'X', b'X', b'X', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00];
        let err = Track::read(&mut Reader::from_byte_slice(&bytes), EventRegistry::global())
            .unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::InvalidTrackHeader { found } if found == b"XXXX"
        ));
    }

    #[test]
    fn errors_report_file_offsets() {
        // 14 bytes of something before the track
        let mut bytes = vec![0u8; 14];
        bytes.extend([b'M', b'T', b'r', b'k', 0, 0, 0, 3, 0x00, 0x3C, 0x00]);
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.read_exact_size::<14>().unwrap();
        let err = Track::read(&mut reader, EventRegistry::global()).unwrap_err();
        assert_eq!(err.position(), 14 + 8 + 2);
    }

    #[test]
    fn writes_chunk() {
        let track: Track = [
            Event::new(
                0,
                Message::ControlChange {
                    channel: Channel::Ten,
                    control: 7,
                    value: 100,
                },
            ),
            Event::new(0, Message::EndOfTrack),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        track.write(&mut out, EventRegistry::global()).unwrap();
        assert_eq!(
            out,
            vec![
                b'M', b'T', b'r', b'k', 0, 0, 0, 8, 0x00, 0xB9, 7, 100, 0x00, 0xFF, 0x2F, 0x00
            ]
        );

        let read = Track::read(&mut Reader::from_byte_slice(&out), EventRegistry::global()).unwrap();
        assert_eq!(read, track);
    }
}
