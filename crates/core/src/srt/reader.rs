//! SRT parsing.
//!
//! Each block is read in three steps: the subtitle number (after any empty
//! lines), the `start --> end` timing line, then one or more text lines up to
//! a blank or whitespace-only line or the end of input. Running out of input while looking for
//! the next number is the normal end of a file; running out anywhere else is
//! an error. The first error aborts the whole read.

use crate::collection::EntryCollection;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::time::{SrtTime, TIME_DELIMITER};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::{debug, trace};

const BOM: char = '\u{feff}';

/// Line source that remembers the 1-based number of the last line read.
struct LineReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Next line without its terminator, or `None` at end of input. The line
    /// counter advances either way so errors at EOF point past the last line.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.line_number += 1;
        match self.lines.next() {
            Some(Ok(line)) if self.line_number == 1 => {
                Ok(Some(line.strip_prefix(BOM).map(str::to_string).unwrap_or(line)))
            }
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(err)) => Err(err.into()),
            None => Ok(None),
        }
    }
}

/// Read an SRT file.
/// The path must exist and be a regular file; that is checked before any
/// parsing happens.
pub fn read(path: &Path) -> Result<EntryCollection> {
    trace!("read(path={})", path.display());
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }
    let file = File::open(path)?;
    read_from(BufReader::new(file))
}

/// Parse SRT text from any buffered reader.
pub fn read_from<R: BufRead>(reader: R) -> Result<EntryCollection> {
    let mut reader = LineReader::new(reader);
    let mut entries = EntryCollection::new();
    while let Some(entry) = parse_entry(&mut reader)? {
        if entries.contains(entry.number) {
            debug!("subtitle {} appears more than once, keeping the last", entry.number);
        }
        entries.add(entry);
    }
    debug!(
        "parsed {} entries from {} lines",
        entries.len(),
        reader.line_number - 1
    );
    Ok(entries)
}

/// Parse SRT text held in memory.
pub fn parse(input: &str) -> Result<EntryCollection> {
    read_from(input.as_bytes())
}

fn parse_entry<R: BufRead>(reader: &mut LineReader<R>) -> Result<Option<Entry>> {
    let number_line = loop {
        match reader.read_line()? {
            None => return Ok(None),
            Some(line) if line.is_empty() => continue,
            Some(line) => break line,
        }
    };
    let number = parse_number(&number_line).ok_or_else(|| {
        Error::format(
            reader.line_number,
            format!("{number_line} has an invalid subtitle number"),
        )
    })?;

    let time_line = reader.read_line()?.ok_or_else(|| {
        Error::format(
            reader.line_number,
            "Start time and end time information is not present",
        )
    })?;
    let (start, end) =
        parse_time_range(&time_line).map_err(|msg| Error::format(reader.line_number, msg))?;

    let mut lines = Vec::new();
    while let Some(line) = reader.read_line()? {
        if is_blank(&line) {
            break;
        }
        lines.push(line);
    }
    if lines.is_empty() {
        return Err(Error::format(
            reader.line_number,
            "Missing subtitle text information",
        ));
    }

    Ok(Some(Entry {
        number,
        start,
        end,
        lines,
    }))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Subtitle numbers start at 1.
fn parse_number(line: &str) -> Option<u32> {
    line.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Split a `start --> end` line; the error names the rule that was broken.
fn parse_time_range(line: &str) -> std::result::Result<(SrtTime, SrtTime), String> {
    let times: Vec<&str> = line.split(TIME_DELIMITER).collect();
    if times.len() != 2 {
        return Err(format!("{line} needs to be separated with {TIME_DELIMITER:?}"));
    }
    let start = times[0]
        .parse()
        .map_err(|_| format!("{} has an invalid start time format", times[0]))?;
    let end = times[1]
        .parse()
        .map_err(|_| format!("{} has an invalid end time format", times[1]))?;
    Ok((start, end))
}
