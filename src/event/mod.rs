#![doc = r#"
The in-memory event model

A track is an ordered list of [`Event`]s. Each event carries a delta time in
ticks (relative to the previous event in the same track) and a [`Message`].

Messages fall into three classes:

```text
                       |---------|
                       | Message |
                       |---------|
                /           |            \
|---------------|   |------------|   |--------|
| Channel Voice |   |    Meta    |   | SysEx  |
|---------------|   |------------|   |--------|
  0x80 - 0xEF          0xFF cmd        0xF0 / 0xF7
```
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

pub mod codec;

pub use crate::file::{SmpteError, SmpteFps};

/// The velocity a running-status or explicit note on with velocity 0 is given
/// when it is re-tagged as a note off.
pub const NOTE_OFF_RELEASE_VELOCITY: u8 = 0x40;

/// The offset applied to the unsigned 14-bit pitch wheel value.
pub const PITCH_WHEEL_CENTER: i16 = 0x2000;

/// A message paired with its delta time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    tick: u32,
    message: Message,
}

impl Event {
    /// Create an event `tick` ticks after the previous one in its track
    pub const fn new(tick: u32, message: Message) -> Self {
        Self { tick, message }
    }
    /// Ticks since the previous event in the same track
    pub const fn tick(&self) -> u32 {
        self.tick
    }
    /// The message
    pub const fn message(&self) -> &Message {
        &self.message
    }
    /// The kind of the message
    pub const fn kind(&self) -> EventKind {
        self.message.kind()
    }
    /// Split into delta time and message
    pub fn into_parts(self) -> (u32, Message) {
        (self.tick, self.message)
    }
}

/// The set of possible messages in a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// `0x8n`
    NoteOff {
        /// Channel
        channel: Channel,
        /// Key number
        pitch: u8,
        /// Release velocity
        velocity: u8,
    },
    /// `0x9n`
    NoteOn {
        /// Channel
        channel: Channel,
        /// Key number
        pitch: u8,
        /// Attack velocity
        velocity: u8,
    },
    /// `0xAn`, polyphonic key pressure
    AfterTouch {
        /// Channel
        channel: Channel,
        /// Key number
        pitch: u8,
        /// Pressure
        value: u8,
    },
    /// `0xBn`
    ControlChange {
        /// Channel
        channel: Channel,
        /// Controller number
        control: u8,
        /// Controller value
        value: u8,
    },
    /// `0xCn`
    ProgramChange {
        /// Channel
        channel: Channel,
        /// Program number
        value: u8,
    },
    /// `0xDn`, channel pressure
    ChannelAfterTouch {
        /// Channel
        channel: Channel,
        /// Pressure
        value: u8,
    },
    /// `0xEn`
    PitchWheel {
        /// Channel
        channel: Channel,
        /// Offset from center, -8192..=8191
        value: i16,
    },
    /// `0xF0 <data> 0xF7`. The data excludes both framing bytes.
    SysEx(Vec<u8>),
    /// `FF 00`. `None` when the event has an empty payload.
    SequenceNumber(Option<u16>),
    /// `FF 01`
    Text(Text),
    /// `FF 02`
    Copyright(Text),
    /// `FF 03`
    TrackName(Text),
    /// `FF 04`
    InstrumentName(Text),
    /// `FF 05`
    Lyrics(Text),
    /// `FF 06`
    Marker(Text),
    /// `FF 07`
    CuePoint(Text),
    /// `FF 08`, non-standard
    ProgramName(Text),
    /// `FF 20`
    ChannelPrefix(u8),
    /// `FF 21`, non-standard
    Port(u8),
    /// `FF 2E`, non-standard. The payload is kept verbatim.
    TrackLoop(Vec<u8>),
    /// `FF 2F`
    EndOfTrack,
    /// `FF 51`
    SetTempo(Tempo),
    /// `FF 54`
    SmpteOffset(SmpteOffset),
    /// `FF 58`
    TimeSignature(TimeSignature),
    /// `FF 59`
    KeySignature(KeySignature),
    /// `FF 7F`
    SequencerSpecific(Vec<u8>),
}

impl Message {
    /// The kind tag of this message.
    pub const fn kind(&self) -> EventKind {
        use EventKind as K;
        match self {
            Self::NoteOff { .. } => K::NoteOff,
            Self::NoteOn { .. } => K::NoteOn,
            Self::AfterTouch { .. } => K::AfterTouch,
            Self::ControlChange { .. } => K::ControlChange,
            Self::ProgramChange { .. } => K::ProgramChange,
            Self::ChannelAfterTouch { .. } => K::ChannelAfterTouch,
            Self::PitchWheel { .. } => K::PitchWheel,
            Self::SysEx(_) => K::SysEx,
            Self::SequenceNumber(_) => K::SequenceNumber,
            Self::Text(_) => K::Text,
            Self::Copyright(_) => K::Copyright,
            Self::TrackName(_) => K::TrackName,
            Self::InstrumentName(_) => K::InstrumentName,
            Self::Lyrics(_) => K::Lyrics,
            Self::Marker(_) => K::Marker,
            Self::CuePoint(_) => K::CuePoint,
            Self::ProgramName(_) => K::ProgramName,
            Self::ChannelPrefix(_) => K::ChannelPrefix,
            Self::Port(_) => K::Port,
            Self::TrackLoop(_) => K::TrackLoop,
            Self::EndOfTrack => K::EndOfTrack,
            Self::SetTempo(_) => K::SetTempo,
            Self::SmpteOffset(_) => K::SmpteOffset,
            Self::TimeSignature(_) => K::TimeSignature,
            Self::KeySignature(_) => K::KeySignature,
            Self::SequencerSpecific(_) => K::SequencerSpecific,
        }
    }

    /// The class of this message
    pub const fn class(&self) -> EventClass {
        self.kind().class()
    }

    /// The channel, for channel voice messages
    pub const fn channel(&self) -> Option<Channel> {
        match self {
            Self::NoteOff { channel, .. }
            | Self::NoteOn { channel, .. }
            | Self::AfterTouch { channel, .. }
            | Self::ControlChange { channel, .. }
            | Self::ProgramChange { channel, .. }
            | Self::ChannelAfterTouch { channel, .. }
            | Self::PitchWheel { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// The text payload, for the text family of meta events
    pub const fn text(&self) -> Option<&Text> {
        match self {
            Self::Text(t)
            | Self::Copyright(t)
            | Self::TrackName(t)
            | Self::InstrumentName(t)
            | Self::Lyrics(t)
            | Self::Marker(t)
            | Self::CuePoint(t)
            | Self::ProgramName(t) => Some(t),
            _ => None,
        }
    }
}

/// The three classes of events that can appear in a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventClass {
    /// Addressed to one of 16 channels
    ChannelVoice,
    /// `0xFF` annotations
    Meta,
    /// System exclusive vendor data
    SysEx,
}

/// A fieldless tag for every [`Message`] variant.
///
/// This is the key the [`EventRegistry`](crate::registry::EventRegistry) uses
/// to find the wire descriptor of a message on the encode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// [`Message::NoteOff`]
    NoteOff,
    /// [`Message::NoteOn`]
    NoteOn,
    /// [`Message::AfterTouch`]
    AfterTouch,
    /// [`Message::ControlChange`]
    ControlChange,
    /// [`Message::ProgramChange`]
    ProgramChange,
    /// [`Message::ChannelAfterTouch`]
    ChannelAfterTouch,
    /// [`Message::PitchWheel`]
    PitchWheel,
    /// [`Message::SysEx`]
    SysEx,
    /// [`Message::SequenceNumber`]
    SequenceNumber,
    /// [`Message::Text`]
    Text,
    /// [`Message::Copyright`]
    Copyright,
    /// [`Message::TrackName`]
    TrackName,
    /// [`Message::InstrumentName`]
    InstrumentName,
    /// [`Message::Lyrics`]
    Lyrics,
    /// [`Message::Marker`]
    Marker,
    /// [`Message::CuePoint`]
    CuePoint,
    /// [`Message::ProgramName`]
    ProgramName,
    /// [`Message::ChannelPrefix`]
    ChannelPrefix,
    /// [`Message::Port`]
    Port,
    /// [`Message::TrackLoop`]
    TrackLoop,
    /// [`Message::EndOfTrack`]
    EndOfTrack,
    /// [`Message::SetTempo`]
    SetTempo,
    /// [`Message::SmpteOffset`]
    SmpteOffset,
    /// [`Message::TimeSignature`]
    TimeSignature,
    /// [`Message::KeySignature`]
    KeySignature,
    /// [`Message::SequencerSpecific`]
    SequencerSpecific,
}

impl EventKind {
    /// The number of event kinds
    pub const COUNT: usize = 26;

    /// The class this kind belongs to
    pub const fn class(&self) -> EventClass {
        use EventKind::*;
        match self {
            NoteOff | NoteOn | AfterTouch | ControlChange | ProgramChange | ChannelAfterTouch
            | PitchWheel => EventClass::ChannelVoice,
            SysEx => EventClass::SysEx,
            _ => EventClass::Meta,
        }
    }

    /// Dense index, `0..COUNT`
    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_and_class() {
        let msg = Message::PitchWheel {
            channel: Channel::Two,
            value: -1,
        };
        assert_eq!(msg.kind(), EventKind::PitchWheel);
        assert_eq!(msg.class(), EventClass::ChannelVoice);
        assert_eq!(msg.channel(), Some(Channel::Two));

        let msg = Message::Lyrics(Text::from("la"));
        assert_eq!(msg.class(), EventClass::Meta);
        assert_eq!(msg.channel(), None);
        assert_eq!(msg.text().unwrap().as_bytes(), b"la");

        assert_eq!(Message::SysEx(vec![1]).class(), EventClass::SysEx);
        assert_eq!(EventKind::SequencerSpecific.index(), EventKind::COUNT - 1);
    }
}
