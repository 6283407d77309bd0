use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The 16 channels a channel voice message can address.

On the wire the channel is the low nibble of the status byte, so
[`Channel::One`] is `0` and [`Channel::Sixteen`] is `15`.

# Example
```rust
# use midiio::prelude::*;
assert_eq!(Channel::try_from(9u8).unwrap(), Channel::Ten);
assert_eq!(u8::from(Channel::Ten), 9);
assert_eq!(Channel::from_status(0x93), Channel::Four);
```
"#]
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Channel {
    #[default]
    /// 0b0000
    One = 0,
    /// 0b0001
    Two,
    /// 0b0010
    Three,
    /// 0b0011
    Four,
    /// 0b0100
    Five,
    /// 0b0101
    Six,
    /// 0b0110
    Seven,
    /// 0b0111
    Eight,
    /// 0b1000
    Nine,
    /// 0b1001
    Ten,
    /// 0b1010
    Eleven,
    /// 0b1011
    Twelve,
    /// 0b1100
    Thirteen,
    /// 0b1101
    Fourteen,
    /// 0b1110
    Fifteen,
    /// 0b1111
    Sixteen,
}

impl Channel {
    /// Every channel, in wire order.
    pub const ALL: [Channel; 16] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Eleven,
        Self::Twelve,
        Self::Thirteen,
        Self::Fourteen,
        Self::Fifteen,
        Self::Sixteen,
    ];

    /// Extract the channel from the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        Self::ALL[(status & 0x0F) as usize]
    }
}

#[test]
fn all_is_in_wire_order() {
    for (i, channel) in Channel::ALL.iter().enumerate() {
        assert_eq!(u8::from(*channel) as usize, i);
        assert_eq!(Channel::from_status(0x90 | i as u8), *channel);
        assert_eq!(Channel::try_from(i as u8).unwrap(), *channel);
    }
    assert!(Channel::try_from(16u8).is_err());
}
