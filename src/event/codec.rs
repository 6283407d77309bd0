#![doc = r#"
The track event stream codec

A track payload is a sequence of `<delta-time> <event>` pairs:

```text
track_event = <v_time> + <midi_event> | <meta_event> | <sysex_event>
```

Channel voice events may omit their status byte when it matches the
previous channel voice event ("running status"). [`EventDecoder`] walks the
payload with an explicit state machine and remembers the last status:

```text
ExpectTick --VLQ--> ExpectStatus --status/data byte--> ExpectPayload --> ExpectTick
    |
    `-- payload exhausted --> Done
```

Encoding never uses running status: every event carries its status byte.
"#]

use crate::{
    event::{Channel, Event, Message, NOTE_OFF_RELEASE_VELOCITY},
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
    registry::{EventDescriptor, EventRegistry, META_STATUS, PayloadLength, SYSEX_END},
    varint::{self, MAX_VARINT},
    writer::{WriteResult, WriterError},
};
use std::io::Read;

#[derive(Debug, Clone, Copy)]
enum State {
    ExpectTick,
    ExpectStatus { tick: u32 },
    ExpectPayload { tick: u32, pending: Pending },
    Done,
}

/// An event whose status is known but whose payload is still on the wire.
#[derive(Debug, Clone, Copy)]
enum Pending {
    ChannelVoice {
        channel: Channel,
        descriptor: &'static EventDescriptor,
        /// The first data byte, already consumed when decoding under running status
        first: Option<u8>,
    },
    Meta {
        descriptor: &'static EventDescriptor,
    },
    SysEx {
        descriptor: &'static EventDescriptor,
    },
}

/// Decodes the events of one track payload, one at a time.
///
/// Yields `ReadResult<Event>`; after the first error it yields nothing more.
pub struct EventDecoder<'reg, R> {
    reader: Reader<R>,
    registry: &'reg EventRegistry,
    running_status: Option<(Channel, &'static EventDescriptor)>,
    state: State,
}

impl<'a> EventDecoder<'static, &'a [u8]> {
    /// Decode an in-memory track payload with the standard registry.
    pub fn from_byte_slice(payload: &'a [u8]) -> Self {
        Self::new(Reader::from_byte_slice(payload), EventRegistry::global())
    }
}

impl<'reg, R: Read> EventDecoder<'reg, R> {
    /// Decode every event `reader` holds, until it is exhausted.
    pub fn new(reader: Reader<R>, registry: &'reg EventRegistry) -> Self {
        Self {
            reader,
            registry,
            running_status: None,
            state: State::ExpectTick,
        }
    }

    /// Decode the next event, or `None` once the payload is exhausted.
    pub fn read_event(&mut self) -> ReadResult<Option<Event>> {
        let result = self.step();
        if result.is_err() {
            self.state = State::Done;
        }
        result
    }

    fn step(&mut self) -> ReadResult<Option<Event>> {
        loop {
            match self.state {
                State::Done => return Ok(None),
                State::ExpectTick => match varint::decode_opt(&mut self.reader)? {
                    Some(tick) => self.state = State::ExpectStatus { tick },
                    None => self.state = State::Done,
                },
                State::ExpectStatus { tick } => {
                    let status = self.reader.read_byte()?;
                    self.state = match self.classify(status)? {
                        Some(pending) => State::ExpectPayload { tick, pending },
                        None => State::ExpectTick,
                    };
                }
                State::ExpectPayload { tick, pending } => {
                    let message = self.read_payload(pending)?;
                    self.state = State::ExpectTick;
                    return Ok(Some(Event::new(tick, message)));
                }
            }
        }
    }

    /// Work out what the byte after a delta time introduces.
    ///
    /// Returns `None` for a sysex status seen under running status, which is discarded.
    fn classify(&mut self, status: u8) -> ReadResult<Option<Pending>> {
        if status < 0x80 {
            let Some((channel, descriptor)) = self.running_status else {
                return Err(self.error(ReaderErrorKind::MalformedEventStream { byte: status }));
            };
            return Ok(Some(Pending::ChannelVoice {
                channel,
                descriptor,
                first: Some(status),
            }));
        }

        if self.registry.is_meta(status) {
            let command = self.reader.read_byte()?;
            let descriptor = self.lookup(|r| r.lookup_meta(command))?;
            self.running_status = None;
            return Ok(Some(Pending::Meta { descriptor }));
        }

        if self.registry.is_sysex(status) {
            if self.running_status.take().is_some() {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Sysex status {status:#04X} at byte {} arrived under running status; discarding it",
                    self.reader.buffer_position()
                );
                return Ok(None);
            }
            let descriptor = self.lookup(|r| r.lookup_sysex(status))?;
            return Ok(Some(Pending::SysEx { descriptor }));
        }

        let descriptor = self.lookup(|r| r.lookup_channel_voice(status))?;
        let channel = Channel::from_status(status);
        self.running_status = Some((channel, descriptor));
        Ok(Some(Pending::ChannelVoice {
            channel,
            descriptor,
            first: None,
        }))
    }

    fn read_payload(&mut self, pending: Pending) -> ReadResult<Message> {
        match pending {
            Pending::ChannelVoice {
                channel,
                descriptor,
                first,
            } => {
                let length = match descriptor.length() {
                    PayloadLength::Fixed(n) => n,
                    PayloadLength::Variable => 0,
                };
                let mut data = Vec::with_capacity(length);
                data.extend(first);
                let rest = self.reader.read_bytes(length.saturating_sub(data.len()))?;
                data.extend(rest);

                let message = self.decode(descriptor, channel, data)?;
                Ok(match message {
                    Message::NoteOn {
                        channel,
                        pitch,
                        velocity: 0,
                    } => Message::NoteOff {
                        channel,
                        pitch,
                        velocity: NOTE_OFF_RELEASE_VELOCITY,
                    },
                    other => other,
                })
            }
            Pending::Meta { descriptor } => {
                let length = varint::decode(&mut self.reader)? as usize;
                let data = self.reader.read_bytes(length)?;
                if let PayloadLength::Fixed(expected) = descriptor.length() {
                    if expected != length {
                        return Err(self.error(ReaderErrorKind::InvalidMetaPayload {
                            kind: descriptor.kind(),
                            length,
                        }));
                    }
                }
                self.decode(descriptor, Channel::One, data)
            }
            Pending::SysEx { descriptor } => {
                let mut data = Vec::new();
                loop {
                    match self.reader.try_read_byte()? {
                        Some(SYSEX_END) => break,
                        Some(byte) => data.push(byte),
                        None => {
                            return Err(ReaderError::truncated(
                                self.reader.buffer_position(),
                                data.len() + 1,
                                data.len(),
                            ));
                        }
                    }
                }
                self.decode(descriptor, Channel::One, data)
            }
        }
    }

    fn decode(
        &self,
        descriptor: &EventDescriptor,
        channel: Channel,
        data: Vec<u8>,
    ) -> ReadResult<Message> {
        descriptor
            .decode(channel, data)
            .map_err(|kind| self.error(kind))
    }

    fn lookup<F>(&self, f: F) -> ReadResult<&'static EventDescriptor>
    where
        F: FnOnce(&EventRegistry) -> Result<&'static EventDescriptor, ReaderErrorKind>,
    {
        f(self.registry).map_err(|kind| self.error(kind))
    }

    fn error(&self, kind: ReaderErrorKind) -> ReaderError {
        self.reader.error(kind)
    }
}

impl<R: Read> Iterator for EventDecoder<'_, R> {
    type Item = ReadResult<Event>;
    fn next(&mut self) -> Option<Self::Item> {
        self.read_event().transpose()
    }
}

/// Decode a whole track payload.
pub fn decode_events<R: Read>(
    reader: Reader<R>,
    registry: &EventRegistry,
) -> ReadResult<Vec<Event>> {
    EventDecoder::new(reader, registry).collect()
}

/// Append the wire form of `event` to `out`, without running status.
///
/// On error `out` is left as it was.
pub fn encode_event(event: &Event, registry: &EventRegistry, out: &mut Vec<u8>) -> WriteResult<()> {
    let start = out.len();
    let result = write_event(event, registry, out);
    if result.is_err() {
        out.truncate(start);
    }
    result
}

fn write_event(event: &Event, registry: &EventRegistry, out: &mut Vec<u8>) -> WriteResult<()> {
    let message = event.message();
    if event.tick() > MAX_VARINT {
        return Err(WriterError::ValueOutOfRange {
            kind: message.kind(),
            value: event.tick() as i64,
        });
    }
    let descriptor = registry.lookup_by_kind(message.kind())?;

    varint::encode_into(event.tick(), out);
    match message.channel() {
        Some(channel) => {
            out.push(descriptor.status() | u8::from(channel));
            descriptor.encode(message, out)?;
        }
        None if descriptor.status() == META_STATUS => {
            let mut payload = Vec::new();
            descriptor.encode(message, &mut payload)?;
            let length = u32::try_from(payload.len())
                .ok()
                .filter(|len| *len <= MAX_VARINT)
                .ok_or(WriterError::ChunkTooLarge(payload.len()))?;
            out.push(META_STATUS);
            out.extend(descriptor.meta_command());
            varint::encode_into(length, out);
            out.extend(payload);
        }
        None => {
            out.push(descriptor.status());
            descriptor.encode(message, out)?;
            out.push(SYSEX_END);
        }
    }
    Ok(())
}

/// Encode a sequence of events into a track payload.
pub fn encode_events<'e, I>(events: I, registry: &EventRegistry) -> WriteResult<Vec<u8>>
where
    I: IntoIterator<Item = &'e Event>,
{
    let mut out = Vec::new();
    for event in events {
        encode_event(event, registry, &mut out)?;
    }
    Ok(out)
}
