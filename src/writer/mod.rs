#![doc = r#"
The byte sink fed by the encoders.

Anything implementing [`std::io::Write`] can receive an encoded file. Every
write goes straight through to the sink, so a file can be streamed to a pipe
track by track.
"#]

mod error;
pub use error::*;

use std::io::Write;

/// Write `bytes` verbatim.
pub(crate) fn write_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> WriteResult<()> {
    writer.write_all(bytes)?;
    Ok(())
}
