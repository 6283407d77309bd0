#![doc = r#"
Variable length quantities

Delta times and meta event lengths are stored as big-endian groups of
7 bits. Every byte but the last has its high bit set:

```text
0x00000000 -> 00
0x00000040 -> 40
0x0000007F -> 7F
0x00000080 -> 81 00
0x00002000 -> C0 00
0x00003FFF -> FF 7F
0x00004000 -> 81 80 00
0x0FFFFFFF -> FF FF FF 7F
```
"#]

use crate::reader::{ReadResult, Reader, ReaderErrorKind};
use std::io::Read;

/// The largest value the SMF format allows in a variable length quantity (4 bytes).
pub const MAX_VARINT: u32 = 0x0FFF_FFFF;

/// Encodes `value`, most significant group first, appending to `out`.
pub fn encode_into(value: u32, out: &mut Vec<u8>) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0x00 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
}

/// Encodes `value` into a new buffer.
pub fn encode(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(4);
    encode_into(value, &mut out);
    out
}

/// Decodes one quantity.
///
/// Fails with [`ReaderErrorKind::MalformedVarInt`] if the source is exhausted
/// before a byte with a clear high bit, or if the value overflows 32 bits.
pub fn decode<R: Read>(reader: &mut Reader<R>) -> ReadResult<u32> {
    match decode_opt(reader)? {
        Some(value) => Ok(value),
        None => Err(reader.error(ReaderErrorKind::MalformedVarInt)),
    }
}

/// Like [`decode`], but returns `None` when the source is exhausted before the first byte.
pub(crate) fn decode_opt<R: Read>(reader: &mut Reader<R>) -> ReadResult<Option<u32>> {
    let Some(mut byte) = reader.try_read_byte()? else {
        return Ok(None);
    };
    let mut value: u32 = 0;
    loop {
        if value > (u32::MAX >> 7) {
            return Err(reader.error(ReaderErrorKind::MalformedVarInt));
        }
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok(Some(value));
        }
        byte = match reader.try_read_byte()? {
            Some(b) => b,
            None => return Err(reader.error(ReaderErrorKind::MalformedVarInt)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_reference_values() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(0x40), vec![0x40]);
        assert_eq!(encode(0x7F), vec![0x7F]);
        assert_eq!(encode(0x80), vec![0x81, 0x00]);
        assert_eq!(encode(0x2000), vec![0xC0, 0x00]);
        assert_eq!(encode(0x3FFF), vec![0xFF, 0x7F]);
        assert_eq!(encode(0x4000), vec![0x81, 0x80, 0x00]);
        assert_eq!(encode(0x10_0000), vec![0xC0, 0x80, 0x00]);
        assert_eq!(encode(MAX_VARINT), vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn round_trips_across_the_range() {
        let step = MAX_VARINT / 1000;
        for value in (0..=MAX_VARINT).step_by(step as usize).chain([MAX_VARINT]) {
            let bytes = encode(value);
            let mut reader = Reader::from_byte_slice(&bytes);
            assert_eq!(decode(&mut reader).unwrap(), value);
            assert_eq!(reader.buffer_position(), bytes.len());
        }
    }

    #[test]
    fn unterminated_is_malformed() {
        let mut reader = Reader::from_byte_slice(&[0x81, 0x80]);
        let err = decode(&mut reader).unwrap_err();
        assert!(matches!(err.error_kind(), ReaderErrorKind::MalformedVarInt));

        let mut reader = Reader::from_byte_slice(&[]);
        let err = decode(&mut reader).unwrap_err();
        assert!(matches!(err.error_kind(), ReaderErrorKind::MalformedVarInt));
    }

    #[test]
    fn overflow_is_malformed() {
        let mut reader = Reader::from_byte_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
        let err = decode(&mut reader).unwrap_err();
        assert!(matches!(err.error_kind(), ReaderErrorKind::MalformedVarInt));
    }

    #[test]
    fn stops_at_terminating_byte() {
        let mut reader = Reader::from_byte_slice(&[0x81, 0x00, 0x90]);
        assert_eq!(decode(&mut reader).unwrap(), 0x80);
        assert_eq!(reader.read_byte().unwrap(), 0x90);
    }
}
