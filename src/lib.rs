#![doc = r#"
Read and write Standard MIDI Files.

A Standard MIDI File (SMF) is a header chunk (`MThd`) followed by track
chunks (`MTrk`). Each track is a sequence of delta-timed events: channel
voice messages, meta events and system exclusive data.

This crate converts between that byte stream and a [`Pattern`](crate::file::Pattern)
of [`Track`](crate::file::Track)s holding [`Event`](crate::event::Event)s.

# Reading
```rust
# use midiio::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00,
];
let pattern = midiio::file::parse(&mut Reader::from_byte_slice(&bytes)).unwrap();

assert_eq!(pattern.format(), Format::SingleMultiChannel);
assert_eq!(pattern.resolution(), 96);
assert_eq!(pattern.tracks()[0].len(), 1);
```

# Writing
```rust
# use midiio::prelude::*;
let track: Track = [
    Event::new(0, Message::NoteOn { channel: Channel::One, pitch: 60, velocity: 100 }),
    Event::new(96, Message::NoteOff { channel: Channel::One, pitch: 60, velocity: 64 }),
    Event::new(0, Message::EndOfTrack),
]
.into_iter()
.collect();

let pattern = Pattern::new(Format::SingleMultiChannel, 96, vec![track]);

let mut bytes = Vec::new();
midiio::file::write(&pattern, &mut bytes).unwrap();
assert_eq!(&bytes[..4], b"MThd");
```
"#]
#![warn(missing_docs)]

pub mod chunk;
pub mod event;
pub mod file;
pub mod fs;
pub mod reader;
pub mod registry;
pub mod varint;
pub mod writer;

#[doc = r#"
Common re-exports
"#]
pub mod prelude {
    pub use crate::{
        event::{
            Channel, Event, EventClass, EventKind, KeySignature, Message, SmpteError, SmpteFps,
            SmpteOffset, Tempo, Text, TimeSignature,
        },
        file::{Format, MidiFileHeader, Pattern, SmfReader, SmfWriter, Timing, Track},
        fs::FsError,
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
        registry::{EventCode, EventDescriptor, EventRegistry, PayloadLength},
        writer::{WriteResult, WriterError},
    };
}
