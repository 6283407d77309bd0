use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The format word of the header chunk, which identifies how tracks should be played.

```text
0 = single multi-channel track
1 = one or more simultaneous tracks of a sequence
2 = one or more sequentially independent single-track patterns
```

# Example
```rust
# use midiio::prelude::*;
assert_eq!(Format::try_from(1u16).unwrap(), Format::Simultaneous);
assert_eq!(u16::from(Format::SequentiallyIndependent), 2);
assert!(Format::try_from(3u16).is_err());
```
"#]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Format {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    #[default]
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl Format {
    /// The value written into the header
    pub const fn to_word(self) -> u16 {
        self as u16
    }
}
