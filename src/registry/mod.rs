#![doc = r#"
The event registry

Maps wire codes to event kinds and back. The standard registry is built once,
on first use, from a static table of [`EventDescriptor`]s, and is read-only
from then on, so it can be shared by any number of concurrent decoders and
encoders.

```text
status 0x80..0xEF  --(high nibble)-->  channel voice descriptor
status 0xF0, 0xF7  ----------------->  sysex descriptor
status 0xFF + cmd  --(command byte)->  meta descriptor
EventKind          ----------------->  descriptor (encode path)
```
"#]

mod table;
pub use table::standard_descriptors;

use crate::{
    event::{Channel, EventClass, EventKind, Message},
    reader::ReaderErrorKind,
    writer::{WriteResult, WriterError},
};
use std::{fmt, sync::LazyLock};

/// The status byte shared by every meta event
pub const META_STATUS: u8 = 0xFF;

/// The status byte that introduces a system exclusive event
pub const SYSEX_STATUS: u8 = 0xF0;

/// The alternate sysex introducer, and the sysex terminator
pub const SYSEX_END: u8 = 0xF7;

static REGISTRY: LazyLock<EventRegistry> =
    LazyLock::new(|| EventRegistry::from_descriptors(standard_descriptors()));

/// The size of an event's payload on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLength {
    /// Always exactly this many bytes
    Fixed(usize),
    /// Length given by the stream (meta) or by a terminator (sysex)
    Variable,
}

/// How a descriptor turns payload bytes into a [`Message`].
#[derive(Clone, Copy)]
pub enum DecodeFn {
    /// Channel voice payloads are at most two data bytes. Unused bytes are zero.
    ChannelVoice(fn(Channel, [u8; 2]) -> Message),
    /// Meta and sysex payloads
    Payload(fn(Vec<u8>) -> Result<Message, ReaderErrorKind>),
}

/// Appends the payload bytes of a message (no status, no length) to a buffer.
pub type EncodeFn = fn(&Message, &mut Vec<u8>) -> WriteResult<()>;

/// Static metadata for one event kind.
#[derive(Clone, Copy)]
pub struct EventDescriptor {
    kind: EventKind,
    status: u8,
    meta_command: Option<u8>,
    length: PayloadLength,
    decode: DecodeFn,
    encode: EncodeFn,
}

impl EventDescriptor {
    /// Describe a channel voice kind. `status` is the high nibble with a zero channel.
    pub const fn channel_voice(
        kind: EventKind,
        status: u8,
        length: usize,
        decode: fn(Channel, [u8; 2]) -> Message,
        encode: EncodeFn,
    ) -> Self {
        Self {
            kind,
            status,
            meta_command: None,
            length: PayloadLength::Fixed(length),
            decode: DecodeFn::ChannelVoice(decode),
            encode,
        }
    }

    /// Describe a meta kind
    pub const fn meta(
        kind: EventKind,
        command: u8,
        length: PayloadLength,
        decode: fn(Vec<u8>) -> Result<Message, ReaderErrorKind>,
        encode: EncodeFn,
    ) -> Self {
        Self {
            kind,
            status: META_STATUS,
            meta_command: Some(command),
            length,
            decode: DecodeFn::Payload(decode),
            encode,
        }
    }

    /// Describe a system exclusive kind
    pub const fn sysex(
        kind: EventKind,
        decode: fn(Vec<u8>) -> Result<Message, ReaderErrorKind>,
        encode: EncodeFn,
    ) -> Self {
        Self {
            kind,
            status: SYSEX_STATUS,
            meta_command: None,
            length: PayloadLength::Variable,
            decode: DecodeFn::Payload(decode),
            encode,
        }
    }

    /// The kind described
    pub const fn kind(&self) -> EventKind {
        self.kind
    }
    /// The class, derived from the status byte
    pub const fn class(&self) -> EventClass {
        match self.status {
            META_STATUS => EventClass::Meta,
            SYSEX_STATUS | SYSEX_END => EventClass::SysEx,
            _ => EventClass::ChannelVoice,
        }
    }
    /// Status byte on the wire (channel bits zero for channel voice kinds)
    pub const fn status(&self) -> u8 {
        self.status
    }
    /// Meta command byte, for meta kinds
    pub const fn meta_command(&self) -> Option<u8> {
        self.meta_command
    }
    /// Payload size
    pub const fn length(&self) -> PayloadLength {
        self.length
    }

    /// Build a message from payload bytes.
    ///
    /// `channel` is only read by channel voice kinds, whose payload must be at most 2 bytes.
    pub(crate) fn decode(&self, channel: Channel, data: Vec<u8>) -> Result<Message, ReaderErrorKind> {
        match self.decode {
            DecodeFn::ChannelVoice(f) => {
                let mut bytes = [0u8; 2];
                for (slot, byte) in bytes.iter_mut().zip(data) {
                    *slot = byte;
                }
                Ok(f(channel, bytes))
            }
            DecodeFn::Payload(f) => f(data),
        }
    }

    /// Append the message's payload bytes to `out`.
    pub(crate) fn encode(&self, message: &Message, out: &mut Vec<u8>) -> WriteResult<()> {
        (self.encode)(message, out)
    }
}

impl fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDescriptor")
            .field("kind", &self.kind)
            .field("status", &format_args!("{:#04X}", self.status))
            .field("meta_command", &self.meta_command)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// A wire code that may or may not name a registered event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCode {
    /// A status byte
    Status(u8),
    /// The command byte following a `0xFF` status
    MetaCommand(u8),
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(b) => write!(f, "status byte {b:#04X}"),
            Self::MetaCommand(b) => write!(f, "meta command {b:#04X}"),
        }
    }
}

/// Lookup tables from wire codes to [`EventDescriptor`]s, and from [`EventKind`]s back.
#[derive(Debug, Clone)]
pub struct EventRegistry {
    channel_voice: [Option<&'static EventDescriptor>; 16],
    sysex: [Option<&'static EventDescriptor>; 2],
    meta: [Option<&'static EventDescriptor>; 256],
    by_kind: [Option<&'static EventDescriptor>; EventKind::COUNT],
}

impl EventRegistry {
    /// The registry of every standard (and the three non-standard) event kinds.
    pub fn global() -> &'static EventRegistry {
        &REGISTRY
    }

    /// Build a registry from a set of descriptors.
    ///
    /// A later descriptor for the same code or kind replaces an earlier one,
    /// and the replaced descriptor is dropped from both directions, so every
    /// registered kind keeps exactly one code.
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'static EventDescriptor>,
    {
        let mut registry = Self {
            channel_voice: [None; 16],
            sysex: [None; 2],
            meta: [None; 256],
            by_kind: [None; EventKind::COUNT],
        };
        for descriptor in descriptors {
            if let Some(previous) = registry.by_kind[descriptor.kind.index()].take() {
                registry.set_code(previous, None);
            }
            if let Some(displaced) = registry.at_code(descriptor) {
                registry.by_kind[displaced.kind.index()] = None;
            }
            registry.set_code(descriptor, Some(descriptor));
            registry.by_kind[descriptor.kind.index()] = Some(descriptor);
        }
        registry
    }

    fn at_code(&self, descriptor: &EventDescriptor) -> Option<&'static EventDescriptor> {
        match descriptor.class() {
            EventClass::ChannelVoice => self.channel_voice[(descriptor.status >> 4) as usize],
            EventClass::SysEx => self.sysex[0],
            EventClass::Meta => descriptor
                .meta_command
                .and_then(|command| self.meta[command as usize]),
        }
    }

    fn set_code(&mut self, descriptor: &EventDescriptor, entry: Option<&'static EventDescriptor>) {
        match descriptor.class() {
            EventClass::ChannelVoice => {
                self.channel_voice[(descriptor.status >> 4) as usize] = entry;
            }
            EventClass::SysEx => {
                self.sysex = [entry; 2];
            }
            EventClass::Meta => {
                if let Some(command) = descriptor.meta_command {
                    self.meta[command as usize] = entry;
                }
            }
        }
    }

    /// True if `status` is a channel voice status byte with a registered kind
    pub fn is_channel_voice(&self, status: u8) -> bool {
        (0x80..0xF0).contains(&status) && self.channel_voice[(status >> 4) as usize].is_some()
    }

    /// True if `status` introduces a registered sysex kind
    pub fn is_sysex(&self, status: u8) -> bool {
        sysex_slot(status).is_some_and(|slot| self.sysex[slot].is_some())
    }

    /// True if `status` introduces a meta event
    pub const fn is_meta(&self, status: u8) -> bool {
        status == META_STATUS
    }

    /// Look up a channel voice kind by its status byte (the channel nibble is ignored).
    pub fn lookup_channel_voice(&self, status: u8) -> Result<&'static EventDescriptor, ReaderErrorKind> {
        self.channel_voice[(status >> 4) as usize]
            .filter(|_| status >= 0x80)
            .ok_or(ReaderErrorKind::UnknownEventCode(EventCode::Status(status)))
    }

    /// Look up the sysex kind for `0xF0` or `0xF7`.
    pub fn lookup_sysex(&self, status: u8) -> Result<&'static EventDescriptor, ReaderErrorKind> {
        sysex_slot(status)
            .and_then(|slot| self.sysex[slot])
            .ok_or(ReaderErrorKind::UnknownEventCode(EventCode::Status(status)))
    }

    /// Look up a meta kind by the command byte that follows `0xFF`.
    pub fn lookup_meta(&self, command: u8) -> Result<&'static EventDescriptor, ReaderErrorKind> {
        self.meta[command as usize]
            .ok_or(ReaderErrorKind::UnknownEventCode(EventCode::MetaCommand(command)))
    }

    /// Look up the descriptor used to encode `kind`.
    pub fn lookup_by_kind(&self, kind: EventKind) -> WriteResult<&'static EventDescriptor> {
        self.by_kind[kind.index()].ok_or(WriterError::UnregisteredEventKind(kind))
    }

    /// Every registered descriptor, once each
    pub fn descriptors(&self) -> impl Iterator<Item = &'static EventDescriptor> + '_ {
        self.by_kind.iter().flatten().copied()
    }

    /// Registered channel voice descriptors
    pub fn channel_voice_descriptors(&self) -> impl Iterator<Item = &'static EventDescriptor> + '_ {
        self.descriptors_of(EventClass::ChannelVoice)
    }

    /// Registered sysex descriptors
    pub fn sysex_descriptors(&self) -> impl Iterator<Item = &'static EventDescriptor> + '_ {
        self.descriptors_of(EventClass::SysEx)
    }

    /// Registered meta descriptors
    pub fn meta_descriptors(&self) -> impl Iterator<Item = &'static EventDescriptor> + '_ {
        self.descriptors_of(EventClass::Meta)
    }

    fn descriptors_of(&self, class: EventClass) -> impl Iterator<Item = &'static EventDescriptor> + '_ {
        self.descriptors().filter(move |d| d.class() == class)
    }
}

const fn sysex_slot(status: u8) -> Option<usize> {
    match status {
        SYSEX_STATUS => Some(0),
        SYSEX_END => Some(1),
        _ => None,
    }
}
