use super::{EventDescriptor, PayloadLength};
use crate::{
    event::{
        Channel, EventKind, KeySignature, Message, PITCH_WHEEL_CENTER, SmpteError, SmpteOffset,
        Tempo, TimeSignature,
    },
    reader::ReaderErrorKind,
    registry::SYSEX_END,
    writer::{WriteResult, WriterError},
};

use EventKind as K;
use PayloadLength::{Fixed, Variable};

static DESCRIPTORS: [EventDescriptor; EventKind::COUNT] = [
    // channel voice
    EventDescriptor::channel_voice(K::NoteOff, 0x80, 2, note_off, encode_channel_voice),
    EventDescriptor::channel_voice(K::NoteOn, 0x90, 2, note_on, encode_channel_voice),
    EventDescriptor::channel_voice(K::AfterTouch, 0xA0, 2, after_touch, encode_channel_voice),
    EventDescriptor::channel_voice(K::ControlChange, 0xB0, 2, control_change, encode_channel_voice),
    EventDescriptor::channel_voice(K::ProgramChange, 0xC0, 1, program_change, encode_channel_voice),
    EventDescriptor::channel_voice(
        K::ChannelAfterTouch,
        0xD0,
        1,
        channel_after_touch,
        encode_channel_voice,
    ),
    EventDescriptor::channel_voice(K::PitchWheel, 0xE0, 2, pitch_wheel, encode_channel_voice),
    // system exclusive
    EventDescriptor::sysex(K::SysEx, sysex, encode_sysex),
    // meta
    EventDescriptor::meta(K::SequenceNumber, 0x00, Variable, sequence_number, encode_meta),
    EventDescriptor::meta(K::Text, 0x01, Variable, text, encode_meta),
    EventDescriptor::meta(K::Copyright, 0x02, Variable, copyright, encode_meta),
    EventDescriptor::meta(K::TrackName, 0x03, Variable, track_name, encode_meta),
    EventDescriptor::meta(K::InstrumentName, 0x04, Variable, instrument_name, encode_meta),
    EventDescriptor::meta(K::Lyrics, 0x05, Variable, lyrics, encode_meta),
    EventDescriptor::meta(K::Marker, 0x06, Variable, marker, encode_meta),
    EventDescriptor::meta(K::CuePoint, 0x07, Variable, cue_point, encode_meta),
    EventDescriptor::meta(K::ProgramName, 0x08, Variable, program_name, encode_meta),
    EventDescriptor::meta(K::ChannelPrefix, 0x20, Fixed(1), channel_prefix, encode_meta),
    EventDescriptor::meta(K::Port, 0x21, Fixed(1), port, encode_meta),
    EventDescriptor::meta(K::TrackLoop, 0x2E, Variable, track_loop, encode_meta),
    EventDescriptor::meta(K::EndOfTrack, 0x2F, Fixed(0), end_of_track, encode_meta),
    EventDescriptor::meta(K::SetTempo, 0x51, Fixed(3), set_tempo, encode_meta),
    EventDescriptor::meta(K::SmpteOffset, 0x54, Fixed(5), smpte_offset, encode_meta),
    EventDescriptor::meta(K::TimeSignature, 0x58, Fixed(4), time_signature, encode_meta),
    EventDescriptor::meta(K::KeySignature, 0x59, Fixed(2), key_signature, encode_meta),
    EventDescriptor::meta(K::SequencerSpecific, 0x7F, Variable, sequencer_specific, encode_meta),
];

/// The descriptor of every kind this crate knows, in registration order.
pub fn standard_descriptors() -> &'static [EventDescriptor] {
    &DESCRIPTORS
}

fn note_off(channel: Channel, [pitch, velocity]: [u8; 2]) -> Message {
    Message::NoteOff {
        channel,
        pitch,
        velocity,
    }
}

fn note_on(channel: Channel, [pitch, velocity]: [u8; 2]) -> Message {
    Message::NoteOn {
        channel,
        pitch,
        velocity,
    }
}

fn after_touch(channel: Channel, [pitch, value]: [u8; 2]) -> Message {
    Message::AfterTouch {
        channel,
        pitch,
        value,
    }
}

fn control_change(channel: Channel, [control, value]: [u8; 2]) -> Message {
    Message::ControlChange {
        channel,
        control,
        value,
    }
}

fn program_change(channel: Channel, [value, _]: [u8; 2]) -> Message {
    Message::ProgramChange { channel, value }
}

fn channel_after_touch(channel: Channel, [value, _]: [u8; 2]) -> Message {
    Message::ChannelAfterTouch { channel, value }
}

/// lsb first, 7 bits each, centered on 0x2000
fn pitch_wheel(channel: Channel, [lsb, msb]: [u8; 2]) -> Message {
    let raw = (((msb & 0x7F) as i16) << 7) | (lsb & 0x7F) as i16;
    Message::PitchWheel {
        channel,
        value: raw - PITCH_WHEEL_CENTER,
    }
}

fn encode_channel_voice(message: &Message, out: &mut Vec<u8>) -> WriteResult<()> {
    match *message {
        Message::NoteOff {
            pitch, velocity, ..
        }
        | Message::NoteOn {
            pitch, velocity, ..
        } => out.extend([pitch, velocity]),
        Message::AfterTouch { pitch, value, .. } => out.extend([pitch, value]),
        Message::ControlChange { control, value, .. } => out.extend([control, value]),
        Message::ProgramChange { value, .. } | Message::ChannelAfterTouch { value, .. } => {
            out.push(value)
        }
        Message::PitchWheel { value, .. } => {
            if !(-PITCH_WHEEL_CENTER..PITCH_WHEEL_CENTER).contains(&value) {
                return Err(WriterError::ValueOutOfRange {
                    kind: K::PitchWheel,
                    value: value as i64,
                });
            }
            let raw = (value + PITCH_WHEEL_CENTER) as u16;
            out.extend([(raw & 0x7F) as u8, ((raw >> 7) & 0x7F) as u8]);
        }
        ref other => return Err(WriterError::UnregisteredEventKind(other.kind())),
    }
    Ok(())
}

fn sysex(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::SysEx(data))
}

fn encode_sysex(message: &Message, out: &mut Vec<u8>) -> WriteResult<()> {
    let Message::SysEx(data) = message else {
        return Err(WriterError::UnregisteredEventKind(message.kind()));
    };
    if data.contains(&SYSEX_END) {
        return Err(WriterError::ValueOutOfRange {
            kind: K::SysEx,
            value: SYSEX_END as i64,
        });
    }
    out.extend_from_slice(data);
    Ok(())
}

fn fixed<const N: usize>(kind: EventKind, data: &[u8]) -> Result<[u8; N], ReaderErrorKind> {
    data.try_into().map_err(|_| ReaderErrorKind::InvalidMetaPayload {
        kind,
        length: data.len(),
    })
}

fn sequence_number(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    if data.is_empty() {
        return Ok(Message::SequenceNumber(None));
    }
    let number = u16::from_be_bytes(fixed(K::SequenceNumber, &data)?);
    Ok(Message::SequenceNumber(Some(number)))
}

fn text(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::Text(data.into()))
}

fn copyright(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::Copyright(data.into()))
}

fn track_name(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::TrackName(data.into()))
}

fn instrument_name(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::InstrumentName(data.into()))
}

fn lyrics(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::Lyrics(data.into()))
}

fn marker(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::Marker(data.into()))
}

fn cue_point(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::CuePoint(data.into()))
}

fn program_name(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::ProgramName(data.into()))
}

fn channel_prefix(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    let [channel] = fixed::<1>(K::ChannelPrefix, &data)?;
    Ok(Message::ChannelPrefix(channel))
}

fn port(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    let [port] = fixed::<1>(K::Port, &data)?;
    Ok(Message::Port(port))
}

fn track_loop(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::TrackLoop(data))
}

fn end_of_track(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    fixed::<0>(K::EndOfTrack, &data)?;
    Ok(Message::EndOfTrack)
}

fn set_tempo(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    let bytes = fixed(K::SetTempo, &data)?;
    Ok(Message::SetTempo(Tempo::from_be_bytes(bytes)))
}

fn smpte_offset(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::SmpteOffset(SmpteOffset::parse(&data)?))
}

fn time_signature(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    let bytes = fixed(K::TimeSignature, &data)?;
    Ok(Message::TimeSignature(TimeSignature::from_bytes(bytes)))
}

fn key_signature(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    let bytes = fixed(K::KeySignature, &data)?;
    Ok(Message::KeySignature(KeySignature::from_bytes(bytes)))
}

fn sequencer_specific(data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
    Ok(Message::SequencerSpecific(data))
}

fn encode_meta(message: &Message, out: &mut Vec<u8>) -> WriteResult<()> {
    match message {
        Message::SequenceNumber(number) => {
            if let Some(number) = number {
                out.extend(number.to_be_bytes());
            }
        }
        Message::Text(t)
        | Message::Copyright(t)
        | Message::TrackName(t)
        | Message::InstrumentName(t)
        | Message::Lyrics(t)
        | Message::Marker(t)
        | Message::CuePoint(t)
        | Message::ProgramName(t) => out.extend_from_slice(t.as_bytes()),
        Message::ChannelPrefix(byte) | Message::Port(byte) => out.push(*byte),
        Message::TrackLoop(data) | Message::SequencerSpecific(data) => out.extend_from_slice(data),
        Message::EndOfTrack => {}
        Message::SetTempo(tempo) => {
            if tempo.micros_per_quarter_note() > Tempo::MAX {
                return Err(WriterError::ValueOutOfRange {
                    kind: K::SetTempo,
                    value: tempo.micros_per_quarter_note() as i64,
                });
            }
            out.extend(tempo.to_be_bytes());
        }
        Message::SmpteOffset(offset) => {
            if let Err(e) = offset.validate() {
                let value = match e {
                    SmpteError::HourOffset(v)
                    | SmpteError::MinuteOffset(v)
                    | SmpteError::SecondOffset(v)
                    | SmpteError::Subframe(v)
                    | SmpteError::TrackFrame(v) => v as i64,
                    SmpteError::HeaderFrameTime(v) => v as i64,
                    SmpteError::Length(len) => len as i64,
                };
                return Err(WriterError::ValueOutOfRange {
                    kind: K::SmpteOffset,
                    value,
                });
            }
            out.extend(offset.to_bytes());
        }
        Message::TimeSignature(ts) => out.extend(ts.to_bytes()),
        Message::KeySignature(ks) => out.extend(ks.to_bytes()),
        other => return Err(WriterError::UnregisteredEventKind(other.kind())),
    }
    Ok(())
}
