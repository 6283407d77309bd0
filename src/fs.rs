#![doc = r#"
Reading and writing files on disk.

These wrap [`parse`](crate::file::parse) and [`write`](crate::file::write)
with buffered file handles.
"#]

use crate::{
    file::{self, Pattern},
    reader::{Reader, ReaderError},
    writer::WriterError,
};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};
use thiserror::Error;

/// An error from [`read_file`] or [`write_file`]
#[derive(Debug, Error)]
pub enum FsError {
    /// The file could not be opened or created
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The file contents could not be parsed
    #[error("Read error: {0}")]
    Read(#[from] ReaderError),
    /// The pattern could not be written
    #[error("Write error: {0}")]
    Write(#[from] WriterError),
}

/// Open `path` and parse the whole file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Pattern, FsError> {
    let path = path.as_ref();
    #[cfg(feature = "tracing")]
    tracing::debug!("Reading midi file {}", path.display());

    let file = File::open(path)?;
    let pattern = file::parse(&mut Reader::new(BufReader::new(file)))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Read {} track(s) from {} ({:?}, resolution {})",
        pattern.len(),
        path.display(),
        pattern.format(),
        pattern.resolution()
    );
    Ok(pattern)
}

/// Create (or truncate) `path` and write `pattern` to it.
pub fn write_file(path: impl AsRef<Path>, pattern: &Pattern) -> Result<(), FsError> {
    let path = path.as_ref();
    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Writing {} track(s) to midi file {}",
        pattern.len(),
        path.display()
    );

    let mut writer = BufWriter::new(File::create(path)?);
    file::write(pattern, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event::{Channel, Event, Message},
        file::{Format, Track},
        reader::ReaderErrorKind,
    };
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("midiio-{}-{name}", std::process::id()))
    }

    #[test]
    fn file_round_trip() {
        let track: Track = [
            Event::new(
                0,
                Message::NoteOn {
                    channel: Channel::Three,
                    pitch: 64,
                    velocity: 90,
                },
            ),
            Event::new(
                48,
                Message::NoteOff {
                    channel: Channel::Three,
                    pitch: 64,
                    velocity: 0x40,
                },
            ),
            Event::new(0, Message::EndOfTrack),
        ]
        .into_iter()
        .collect();
        let pattern = Pattern::new(Format::SingleMultiChannel, 48, vec![track]);

        let path = temp_path("round-trip.mid");
        write_file(&path, &pattern).unwrap();
        let read = read_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read, pattern);
    }

    #[test]
    fn missing_file() {
        let err = read_file(temp_path("does-not-exist.mid")).unwrap_err();
        assert!(matches!(err, FsError::Io(e) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn garbage_file() {
        let path = temp_path("garbage.mid");
        std::fs::write(&path, b"RIFF\0\0\0\x06\0\0\0\x01\0\x60").unwrap();
        let err = read_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        let FsError::Read(err) = err else {
            panic!("expected a read error, got {err:?}");
        };
        assert!(matches!(err.error_kind(), ReaderErrorKind::InvalidHeader(_)));
    }
}
