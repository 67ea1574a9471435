//! SRT serialization, the inverse of [`reader`](super::reader).

use crate::collection::EntryCollection;
use crate::entry::Entry;
use crate::error::Result;
use crate::time::TIME_DELIMITER;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Format entries back to SRT text.
/// The way this works is by writing each entry in ascending order followed by
/// a single blank line.
pub fn format(entries: &EntryCollection) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&render(entry));
    }
    out
}

/// Write entries as SRT text to any writer.
pub fn write_to<W: Write>(mut out: W, entries: &EntryCollection) -> Result<()> {
    for entry in entries {
        out.write_all(render(entry).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Write entries to `path`, replacing its contents.
pub fn write(path: &Path, entries: &EntryCollection) -> Result<()> {
    trace!("write(path={}, entries={})", path.display(), entries.len());
    let file = File::create(path)?;
    write_to(BufWriter::new(file), entries)?;
    debug!("wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}

fn render(entry: &Entry) -> String {
    let mut block = format!(
        "{}\n{}{}{}\n",
        entry.number, entry.start, TIME_DELIMITER, entry.end
    );
    for line in &entry.lines {
        block.push_str(line);
        block.push('\n');
    }
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SrtTime;
    use std::fs;
    use std::io;
    use tempfile::tempdir;

    fn sample() -> EntryCollection {
        let t = |s: &str| s.parse::<SrtTime>().unwrap();
        let mut c = EntryCollection::new();
        c.add(Entry::new(2, t("00:00:24,600"), t("00:00:27,800"), ["Foo Bar", "Bar Foo"]));
        c.add(Entry::new(1, t("00:00:20,000"), t("00:00:24,400"), ["Hello World"]));
        c
    }

    const SAMPLE_TEXT: &str = "1\n00:00:20,000 --> 00:00:24,400\nHello World\n\n\
                               2\n00:00:24,600 --> 00:00:27,800\nFoo Bar\nBar Foo\n\n";

    #[test]
    fn formats_in_ascending_order() {
        assert_eq!(format(&sample()), SAMPLE_TEXT);
        assert_eq!(format(&EntryCollection::new()), "");
    }

    #[test]
    fn writes_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.srt");
        write(&path, &sample()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE_TEXT);
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = write(&dir.path().join("missing").join("out.srt"), &sample()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }

    #[test]
    fn write_failures_propagate() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        assert!(write_to(Broken, &sample()).is_err());
    }
}
