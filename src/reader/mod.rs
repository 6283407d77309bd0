#![doc = r#"
The byte source consumed by the decoders.

[`Reader`] wraps anything implementing [`std::io::Read`] and keeps count of
how many bytes have been consumed, so that every [`ReaderError`] can name the
offset at which decoding failed. No seeking is ever required.
"#]

mod error;
pub use error::*;

use std::io::{self, Read};

/// A sequential byte source that tracks its position.
pub struct Reader<R> {
    inner: R,
    position: usize,
}

impl<'a> Reader<&'a [u8]> {
    /// Read from an in-memory buffer
    pub fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<R: Read> Reader<R> {
    /// Wrap a [`Read`] implementor, starting at position 0.
    pub fn new(inner: R) -> Self {
        Self::with_offset(inner, 0)
    }

    /// Wrap a source whose first byte lives at `position` of some enclosing stream.
    ///
    /// Track payloads are decoded this way so that errors report file offsets.
    pub(crate) fn with_offset(inner: R, position: usize) -> Self {
        Self { inner, position }
    }

    /// The number of bytes consumed so far (plus any starting offset).
    pub fn buffer_position(&self) -> usize {
        self.position
    }

    /// Unwrap the underlying source
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Create an error of the given kind at the current position.
    pub(crate) fn error(&self, kind: impl Into<ReaderErrorKind>) -> ReaderError {
        ReaderError::new(self.position, kind.into())
    }

    /// Read a single byte, or `None` if the source is exhausted.
    pub fn try_read_byte(&mut self) -> ReadResult<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.fill(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut buf = [0u8; N];
        let found = self.fill(&mut buf)?;
        if found < N {
            return Err(ReaderError::truncated(self.position, N, found));
        }
        Ok(buf)
    }

    /// Read exactly `len` bytes.
    ///
    /// The buffer grows with the data actually read, so a bogus length in a
    /// corrupt file does not allocate up front.
    pub fn read_bytes(&mut self, len: usize) -> ReadResult<Vec<u8>> {
        let mut buf = Vec::new();
        let found = loop {
            let remaining = (len - buf.len()) as u64;
            let result = (&mut self.inner).take(remaining).read_to_end(&mut buf);
            match result {
                Ok(_) => break buf.len(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.position += buf.len();
                    return Err(self.error(e));
                }
            }
        };
        self.position += found;
        if found < len {
            return Err(ReaderError::truncated(self.position, len, found));
        }
        Ok(buf)
    }

    /// Fill as much of `buf` as the source allows, returning the count read.
    fn fill(&mut self, buf: &mut [u8]) -> ReadResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.position += filled;
                    return Err(self.error(e));
                }
            }
        }
        self.position += filled;
        Ok(filled)
    }
}
