#![doc = r#"
Chunk framing

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit big-endian length field and then the chunk data:

```text
<id: 4 bytes> <length: u32 BE> <payload: length bytes>
```

The Standard MIDI File specification defines two chunk types:

- `MThd`, the header chunk, which must be first and always has a 6 byte payload
  (see [`file::header`](crate::file::header))
- `MTrk`, a track chunk, whose payload is a stream of delta-timed events
  (see [`file::track`](crate::file::track))
"#]

use crate::{
    reader::{ReadResult, Reader},
    writer::{self, WriteResult, WriterError},
};
use std::io::{Read, Write};

/// Chunk id of the header chunk
pub const HEADER_ID: [u8; 4] = *b"MThd";

/// Chunk id of a track chunk
pub const TRACK_ID: [u8; 4] = *b"MTrk";

/// The 8 bytes that introduce every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// The 4-character type identifier
    pub id: [u8; 4],
    /// Length of the payload that follows
    pub length: u32,
}

impl ChunkHeader {
    /// Read the id and length of the next chunk.
    pub fn read<R: Read>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let id = reader.read_exact_size()?;
        let length = u32::from_be_bytes(reader.read_exact_size()?);
        Ok(Self { id, length })
    }

    /// Write the id and length.
    pub fn write<W: Write>(&self, writer: &mut W) -> WriteResult<()> {
        writer::write_bytes(writer, &self.id)?;
        writer::write_bytes(writer, &self.length.to_be_bytes())
    }
}

/// A whole chunk with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    id: [u8; 4],
    payload: Vec<u8>,
    payload_offset: usize,
}

impl RawChunk {
    /// The chunk's type identifier
    pub fn id(&self) -> [u8; 4] {
        self.id
    }
    /// The chunk's data
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
    /// Position of the first payload byte in the stream the chunk was read from
    pub fn payload_offset(&self) -> usize {
        self.payload_offset
    }
    /// Consume the chunk, returning the payload
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// Read one chunk: id, length, then exactly `length` bytes of payload.
pub fn read_chunk<R: Read>(reader: &mut Reader<R>) -> ReadResult<RawChunk> {
    let header = ChunkHeader::read(reader)?;
    read_payload(reader, header)
}

/// Read the payload described by an already consumed [`ChunkHeader`].
pub(crate) fn read_payload<R: Read>(
    reader: &mut Reader<R>,
    header: ChunkHeader,
) -> ReadResult<RawChunk> {
    let payload_offset = reader.buffer_position();
    let payload = reader.read_bytes(header.length as usize)?;
    Ok(RawChunk {
        id: header.id,
        payload,
        payload_offset,
    })
}

/// Write `id`, the big-endian length of `payload`, then `payload` verbatim.
pub fn write_chunk<W: Write>(writer: &mut W, id: [u8; 4], payload: &[u8]) -> WriteResult<()> {
    let length =
        u32::try_from(payload.len()).map_err(|_| WriterError::ChunkTooLarge(payload.len()))?;
    ChunkHeader { id, length }.write(writer)?;
    writer::write_bytes(writer, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ReaderErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_id_length_payload() {
        let mut out = Vec::new();
        write_chunk(&mut out, TRACK_ID, &[0x00, 0xFF, 0x2F, 0x00]).unwrap();
        assert_eq!(
            out,
            vec![b'M', b'T', b'r', b'k', 0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00]
        );
    }

    #[test]
    fn reads_back_written_chunk() {
        let mut out = Vec::new();
        write_chunk(&mut out, *b"XFIH", &[1, 2, 3]).unwrap();
        out.push(0xAA);

        let mut reader = Reader::from_byte_slice(&out);
        let chunk = read_chunk(&mut reader).unwrap();
        assert_eq!(chunk.id(), *b"XFIH");
        assert_eq!(chunk.payload(), &[1, 2, 3]);
        assert_eq!(chunk.payload_offset(), 8);
        assert_eq!(reader.read_byte().unwrap(), 0xAA);
    }

    #[test]
    fn truncated_id_length_and_payload() {
        for bytes in [&b"MTr"[..], &b"MTrk\x00\x00"[..], &b"MTrk\x00\x00\x00\x05abc"[..]] {
            let mut reader = Reader::from_byte_slice(bytes);
            let err = read_chunk(&mut reader).unwrap_err();
            assert!(
                matches!(err.error_kind(), ReaderErrorKind::TruncatedRead { .. }),
                "{err}"
            );
        }
    }
}
