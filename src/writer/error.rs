use crate::event::EventKind;
use std::io;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while encoding the midi representation into bytes
"#]
#[derive(Debug, Error)]
pub enum WriterError {
    /// The underlying sink failed.
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
    /// An event kind with no descriptor in the registry was handed to the encoder.
    #[error("No descriptor registered for {0:?}")]
    UnregisteredEventKind(EventKind),
    /// A field holds a value its wire encoding cannot represent.
    #[error("Value {value} out of range for {kind:?}")]
    ValueOutOfRange {
        /// The kind of the offending event
        kind: EventKind,
        /// The value that does not fit
        value: i64,
    },
    /// A chunk payload is longer than a 32-bit length can describe.
    #[error("Chunk payload of {0} bytes is too large")]
    ChunkTooLarge(usize),
    /// More tracks than the 16-bit header field can count.
    #[error("{0} tracks do not fit in a MIDI header")]
    TooManyTracks(usize),
    /// A streaming writer wrote a different number of tracks than its header declared.
    #[error("Header declared {declared} tracks, {written} were written")]
    TrackCountMismatch {
        /// The count written into `MThd`
        declared: u16,
        /// The number of `MTrk` chunks emitted
        written: usize,
    },
}

impl WriterError {
    /// True if the sink itself failed, rather than the data being unencodable.
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// The Write Result type (see [`WriterError`])
pub type WriteResult<T> = Result<T, WriterError>;
