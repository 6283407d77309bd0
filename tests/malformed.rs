use midiio::{prelude::*, reader::HeaderError};
use pretty_assertions::assert_eq;

const HEADER: [u8; 14] = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96];

/// A one-track file around `payload`.
fn single_track(payload: &[u8]) -> Vec<u8> {
    let mut bytes = HEADER.to_vec();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

fn parse(bytes: &[u8]) -> ReaderError {
    midiio::file::parse(&mut Reader::from_byte_slice(bytes)).unwrap_err()
}

#[test]
fn foreign_header_id() {
    let mut bytes = single_track(&[0, 0xFF, 0x2F, 0]);
    bytes[..4].copy_from_slice(b"XXXX");

    let err = parse(&bytes);
    assert_eq!(err.position(), 8);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidHeader(HeaderError::ChunkId(id)) if id == b"XXXX"
    ));
}

#[test]
fn wrong_header_length() {
    let mut bytes = HEADER.to_vec();
    bytes[7] = 7;
    let err = parse(&bytes);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidHeader(HeaderError::Length(7))
    ));
}

#[test]
fn unknown_format() {
    let mut bytes = single_track(&[0, 0xFF, 0x2F, 0]);
    bytes[9] = 3;
    let err = parse(&bytes);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidHeader(HeaderError::Format(3))
    ));
}

#[test]
fn foreign_track_id() {
    let mut bytes = single_track(&[0, 0xFF, 0x2F, 0]);
    bytes[14..18].copy_from_slice(b"XXXX");

    let err = parse(&bytes);
    assert_eq!(err.position(), 22);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidTrackHeader { found } if found == b"XXXX"
    ));
}

#[test]
fn missing_declared_track() {
    let mut bytes = single_track(&[0, 0xFF, 0x2F, 0]);
    bytes[11] = 2;
    let err = parse(&bytes);
    assert!(err.is_truncated());
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::TruncatedRead {
            expected: 4,
            found: 0
        }
    ));
}

#[test]
fn track_shorter_than_declared() {
    let mut bytes = single_track(&[0, 0xFF, 0x2F, 0]);
    bytes[21] = 10;
    let err = parse(&bytes);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::TruncatedRead {
            expected: 10,
            found: 4
        }
    ));
}

#[test]
fn data_byte_without_running_status() {
    let err = parse(&single_track(&[0, 60, 100, 0, 0xFF, 0x2F, 0]));
    // tick and offending byte consumed
    assert_eq!(err.position(), 24);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedEventStream { byte: 60 }
    ));
}

#[test]
fn running_status_is_reset_by_meta() {
    let err = parse(&single_track(&[
        0, 0x90, 60, 100, //
        0, 0xFF, 0x01, 1, b'x', //
        0, 64, 100,
    ]));
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedEventStream { byte: 64 }
    ));
}

#[test]
fn unknown_codes() {
    let err = parse(&single_track(&[0, 0xFF, 0x60, 0]));
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::UnknownEventCode(EventCode::MetaCommand(0x60))
    ));

    let err = parse(&single_track(&[0, 0xF1, 0]));
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::UnknownEventCode(EventCode::Status(0xF1))
    ));
}

#[test]
fn unterminated_delta_time() {
    let err = parse(&single_track(&[0, 0xFF, 0x2F, 0, 0x81]));
    assert!(matches!(err.error_kind(), ReaderErrorKind::MalformedVarInt));
}

#[test]
fn fixed_meta_length() {
    let err = parse(&single_track(&[0, 0xFF, 0x51, 2, 0x07, 0xA1]));
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidMetaPayload {
            kind: EventKind::SetTempo,
            length: 2
        }
    ));
}

#[test]
fn unterminated_sysex() {
    let err = parse(&single_track(&[0, 0xF0, 0x43, 0x12]));
    assert!(err.is_truncated());
}

#[test]
fn first_bad_track_spoils_the_file() {
    let mut bytes = HEADER.to_vec();
    bytes[11] = 2;
    for payload in [&[0u8, 0xFF, 0x2F, 0][..], &[0, 0x55][..]] {
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        bytes.extend_from_slice(payload);
    }
    let err = parse(&bytes);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedEventStream { byte: 0x55 }
    ));

    let mut reader = SmfReader::new(bytes.as_slice()).unwrap();
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
}
