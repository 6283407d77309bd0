use crate::{event::EventKind, file::SmpteError, registry::EventCode};
use std::io;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading a byte stream into the midi representation
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The underlying source failed for a reason other than running out of bytes.
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
    /// Fewer bytes were available than a field requires.
    #[error("Truncated read: expected {expected} bytes, found {found}")]
    TruncatedRead {
        /// Bytes the field needed
        expected: usize,
        /// Bytes that were left in the source
        found: usize,
    },
    /// A variable length quantity never terminated, or overflowed 32 bits.
    #[error("Malformed variable length quantity")]
    MalformedVarInt,
    /// The `MThd` chunk was not what it should be.
    #[error("Invalid header: {0}")]
    InvalidHeader(#[from] HeaderError),
    /// A chunk in track position did not carry the `MTrk` id.
    #[error("Invalid track header: found chunk id {found:?}")]
    InvalidTrackHeader {
        /// The id that was read instead
        found: [u8; 4],
    },
    /// A status byte or meta command has no registered event kind.
    #[error("Unknown event code: {0}")]
    UnknownEventCode(EventCode),
    /// A data byte was found where a status byte was required and no running status was active.
    #[error("Malformed event stream: data byte {byte:#04X} without running status")]
    MalformedEventStream {
        /// The offending byte
        byte: u8,
    },
    /// A fixed-length meta event carried a payload of the wrong length.
    #[error("Invalid payload of length {length} for {kind:?}")]
    InvalidMetaPayload {
        /// The meta kind being decoded
        kind: EventKind,
        /// The declared payload length
        length: usize,
    },
    /// An SMPTE Offset meta event carried out of range fields.
    #[error("Invalid SMPTE offset: {0}")]
    Smpte(#[from] SmpteError),
}

/// Errors relating to the `MThd` chunk
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The first chunk did not carry the `MThd` id.
    #[error("expected chunk id \"MThd\", found {0:?}")]
    ChunkId([u8; 4]),
    /// The header payload was not 6 bytes long.
    #[error("expected length 6, found {0}")]
    Length(u32),
    /// The format word was not 0, 1 or 2.
    #[error("unknown format {0}")]
    Format(u16),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the source ran out of bytes in the middle of a field
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedRead { .. })
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Consumes the error, returning its kind.
    pub fn into_kind(self) -> ReaderErrorKind {
        self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new truncated read error
    pub const fn truncated(position: usize, expected: usize, found: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedRead { expected, found },
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
