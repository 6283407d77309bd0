use std::{borrow::Cow, fmt};

#[doc = r#"
The payload of a text-like meta event (Text, Copyright, Track Name, Lyrics, ...)

The format does not mandate an encoding, so the bytes are kept verbatim.
Use [`Text::as_str_lossy`] for display.

# Example
```rust
# use midiio::prelude::*;
let text = Text::from("Piano");
assert_eq!(text.as_bytes(), b"Piano");
assert_eq!(text.as_str_lossy(), "Piano");
```
"#]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text(Vec<u8>);

impl Text {
    /// Create text from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }
    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
    /// The bytes interpreted as UTF-8, with invalid sequences replaced
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
    /// Consume the text, returning the raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// True if there are no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for Text {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str_lossy())
    }
}
