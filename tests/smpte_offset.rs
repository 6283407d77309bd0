use midiio::prelude::*;
use pretty_assertions::assert_eq;

/// A single-track file with SMPTE timing whose track opens with an offset event.
fn smpte_file(fps: SmpteFps, offset: [u8; 5]) -> Vec<u8> {
    let mut payload = vec![0x00, 0xFF, 0x54, 0x05];
    payload.extend_from_slice(&offset);
    payload.extend_from_slice(&[
        0x00, 0x90, 0x3C, 0x64, // note on
        0x28, 0x80, 0x3C, 0x40, // note off a frame later
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0, 0, 0, 6, 0, 0, 0, 1]);
    bytes.push(fps.header_byte() as u8);
    bytes.push(40);
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&payload);
    bytes
}

fn offset_bytes(fps_bits: u8, hour: u8, minute: u8, second: u8, frame: u8, subframe: u8) -> [u8; 5] {
    [(fps_bits << 5) | (hour & 0x1F), minute, second, frame, subframe]
}

fn read_offset(bytes: &[u8]) -> (Pattern, SmpteOffset) {
    let pattern = midiio::file::parse(&mut Reader::from_byte_slice(bytes)).unwrap();
    let Message::SmpteOffset(offset) = pattern[0][0].message().clone() else {
        panic!("Expected SMPTE offset meta event");
    };
    (pattern, offset)
}

#[test]
fn offset_at_each_rate() {
    let cases = [
        (SmpteFps::TwentyFour, 0, [12, 30, 15, 18, 50]),
        (SmpteFps::TwentyFive, 1, [0, 0, 1, 12, 75]),
        (SmpteFps::TwentyNine, 2, [23, 59, 59, 28, 99]),
        (SmpteFps::Thirty, 3, [1, 23, 45, 15, 0]),
    ];
    for (fps, bits, [hour, minute, second, frame, subframe]) in cases {
        let bytes = smpte_file(fps, offset_bytes(bits, hour, minute, second, frame, subframe));
        let (pattern, offset) = read_offset(&bytes);

        assert_eq!(
            pattern.timing().unwrap(),
            Timing::Smpte {
                fps,
                ticks_per_frame: 40
            }
        );
        assert_eq!(
            offset,
            SmpteOffset {
                fps,
                hour,
                minute,
                second,
                frame,
                subframe
            }
        );
    }
}

#[test]
fn offset_in_micros() {
    let bytes = smpte_file(SmpteFps::TwentyFour, offset_bytes(0, 12, 30, 15, 18, 50));
    let (_, offset) = read_offset(&bytes);
    let expected = (12 * 3600 + 30 * 60 + 15) as f64 * 1_000_000.0
        + (18.0 / 24.0) * 1_000_000.0
        + (50.0 / 100.0 / 24.0) * 1_000_000.0;
    assert!((offset.as_micros() - expected).abs() < 0.01);

    // one drop frame is 1001/30000 of a second
    let bytes = smpte_file(SmpteFps::TwentyNine, offset_bytes(2, 0, 0, 0, 1, 0));
    let (_, offset) = read_offset(&bytes);
    assert!((offset.as_micros() - 1_001_000.0 / 30.0).abs() < 0.001);
}

#[test]
fn offsets_on_several_tracks() {
    let mut bytes = smpte_file(SmpteFps::TwentyFive, offset_bytes(1, 0, 0, 10, 0, 0));
    let second = smpte_file(SmpteFps::TwentyFive, offset_bytes(1, 0, 1, 0, 0, 0));
    bytes.extend_from_slice(&second[14..]);
    bytes[11] = 2;

    let pattern = midiio::file::parse(&mut Reader::from_byte_slice(&bytes)).unwrap();
    let offsets = pattern
        .iter()
        .flatten()
        .filter_map(|event| match event.message() {
            Message::SmpteOffset(offset) => Some(*offset),
            _ => None,
        })
        .collect::<Vec<_>>();

    assert_eq!(offsets.len(), 2);
    assert_eq!((offsets[0].minute, offsets[0].second), (0, 10));
    assert_eq!((offsets[1].minute, offsets[1].second), (1, 0));
    let diff = offsets[1].as_micros() - offsets[0].as_micros();
    assert!((diff - 50_000_000.0).abs() < 1.0);
}

#[test]
fn written_offset_reads_back() {
    let offset = SmpteOffset {
        fps: SmpteFps::Thirty,
        hour: 23,
        minute: 59,
        second: 59,
        frame: 29,
        subframe: 99,
    };
    let track: Track = [
        Event::new(0, Message::SmpteOffset(offset)),
        Event::new(0, Message::EndOfTrack),
    ]
    .into_iter()
    .collect();
    let timing = Timing::Smpte {
        fps: SmpteFps::Thirty,
        ticks_per_frame: 80,
    };
    let pattern = Pattern::new(Format::SingleMultiChannel, timing.resolution(), vec![track]);

    let mut bytes = Vec::new();
    midiio::file::write(&pattern, &mut bytes).unwrap();
    assert_eq!(&bytes[12..14], &[0xE2, 80]);

    let (read, decoded) = read_offset(&bytes);
    assert_eq!(read.timing().unwrap(), timing);
    assert_eq!(decoded, offset);
}

#[test]
fn out_of_range_offset_is_not_written() {
    // a masked hour of 40 would read back as 8
    let offset = SmpteOffset {
        fps: SmpteFps::TwentyFour,
        hour: 40,
        minute: 0,
        second: 0,
        frame: 0,
        subframe: 0,
    };
    let track: Track = [
        Event::new(0, Message::SmpteOffset(offset)),
        Event::new(0, Message::EndOfTrack),
    ]
    .into_iter()
    .collect();
    let pattern = Pattern::new(Format::SingleMultiChannel, 0xE828, vec![track]);

    let mut bytes = Vec::new();
    let err = midiio::file::write(&pattern, &mut bytes).unwrap_err();
    assert!(matches!(
        err,
        WriterError::ValueOutOfRange {
            kind: EventKind::SmpteOffset,
            value: 40
        }
    ));
}

#[test]
fn out_of_range_fields() {
    let cases = [
        (offset_bytes(0, 24, 0, 0, 0, 0), SmpteError::HourOffset(24)),
        (offset_bytes(0, 12, 60, 30, 15, 50), SmpteError::MinuteOffset(60)),
        (offset_bytes(1, 12, 30, 255, 15, 50), SmpteError::SecondOffset(255)),
        (offset_bytes(2, 12, 30, 45, 15, 100), SmpteError::Subframe(100)),
        // hour is checked before minute
        (offset_bytes(0, 25, 61, 30, 15, 50), SmpteError::HourOffset(25)),
    ];
    for (offset, expected) in cases {
        let bytes = smpte_file(SmpteFps::TwentyFour, offset);
        let err = midiio::file::parse(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        match err.error_kind() {
            ReaderErrorKind::Smpte(found) => assert_eq!(*found, expected),
            other => panic!("Expected an SMPTE error, got {other:?}"),
        }
    }
}

#[test]
fn undefined_frame_rate_bits() {
    for bits in [0b100, 0b101, 0b111] {
        let bytes = smpte_file(SmpteFps::TwentyFour, offset_bytes(bits, 1, 0, 0, 0, 0));
        let err = midiio::file::parse(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::Smpte(SmpteError::TrackFrame(b)) if *b == bits
        ));
    }
}

#[test]
fn frames_are_not_bounded_by_rate() {
    let bytes = smpte_file(SmpteFps::TwentyFour, offset_bytes(0, 0, 0, 0, 24, 0));
    let (_, offset) = read_offset(&bytes);
    assert_eq!(offset.frame, 24);
}

#[test]
fn undefined_header_rate() {
    let mut bytes = smpte_file(SmpteFps::TwentyFour, offset_bytes(0, 0, 0, 0, 0, 0));
    bytes[12] = 0xE0;
    let pattern = midiio::file::parse(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(pattern.resolution(), 0xE028);
    assert_eq!(pattern.timing(), Err(SmpteError::HeaderFrameTime(-32)));
}
