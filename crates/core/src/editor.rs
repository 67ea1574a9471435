//! Editing operations on subtitle collections.
//!
//! Entry-level helpers ([`shift_time`], [`rewrap_text`]) are pure and return a
//! new entry. Collection-level operations write their results back with
//! [`EntryCollection::add`]. Operations that address a subtitle by number check
//! that it exists before touching anything, so a [`Error::NotFound`] leaves the
//! collection as it was. The same holds for [`Error::NumberOverflow`] when a
//! renumbering would go past `u32::MAX`.

use crate::collection::EntryCollection;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::time::{SrtTime, TimeUnit};
use tracing::{debug, trace};

/// Line width used when the caller does not pick one.
pub const DEFAULT_WRAP_WIDTH: usize = 42;

/// Shift both the start and end time of `entry`.
pub fn shift_time(entry: &Entry, unit: TimeUnit, delta: i32) -> Entry {
    Entry {
        start: entry.start.shift(unit, delta),
        end: entry.end.shift(unit, delta),
        ..entry.clone()
    }
}

/// Shift the times of subtitle `number`.
pub fn shift_time_at(
    entries: &mut EntryCollection,
    number: u32,
    unit: TimeUnit,
    delta: i32,
) -> Result<()> {
    trace!("shift_time_at number={number} unit={unit:?} delta={delta}");
    let shifted = shift_time(existing(entries, number)?, unit, delta);
    entries.add(shifted);
    Ok(())
}

/// Shift the times of every subtitle, each exactly once.
pub fn shift_all_times(entries: &mut EntryCollection, unit: TimeUnit, delta: i32) {
    trace!("shift_all_times unit={unit:?} delta={delta}");
    let shifted: Vec<Entry> = entries
        .iter()
        .map(|entry| shift_time(entry, unit, delta))
        .collect();
    debug!("shifted {} entries", shifted.len());
    entries.extend(shifted);
}

/// Re-break the text of `entry` into lines of at most `width` characters.
///
/// The lines are joined with single spaces first. Text that already fits is
/// left with its original line breaks. Otherwise each line ends at the last
/// space at or before `width` characters from its start; once no such space
/// exists, or the rest fits, the remainder becomes the last line as is, even
/// when it is still wider than `width`.
pub fn rewrap_text(entry: &Entry, width: usize) -> Entry {
    let text: Vec<char> = entry.text().chars().collect();
    if text.len() <= width {
        return entry.clone();
    }
    let mut lines = Vec::new();
    let mut begin = 0;
    let mut end = width;
    while end < text.len() {
        while end > begin && text[end] != ' ' {
            end -= 1;
        }
        if end == begin {
            break;
        }
        lines.push(text[begin..end].iter().collect());
        begin = end + 1;
        end = begin + width;
    }
    lines.push(text[begin..].iter().collect());
    Entry {
        lines,
        ..entry.clone()
    }
}

/// Rewrap the text of subtitle `number`.
pub fn rewrap_text_at(entries: &mut EntryCollection, number: u32, width: usize) -> Result<()> {
    trace!("rewrap_text_at number={number} width={width}");
    let wrapped = rewrap_text(existing(entries, number)?, width);
    entries.add(wrapped);
    Ok(())
}

/// Rewrap the text of every subtitle.
pub fn rewrap_all(entries: &mut EntryCollection, width: usize) {
    trace!("rewrap_all width={width}");
    let wrapped: Vec<Entry> = entries
        .iter()
        .map(|entry| rewrap_text(entry, width))
        .collect();
    entries.extend(wrapped);
}

/// Add a subtitle numbered one past the last one (1 when empty) and return its
/// number.
pub fn append_subtitle(
    entries: &mut EntryCollection,
    start: SrtTime,
    end: SrtTime,
    lines: Vec<String>,
) -> Result<u32> {
    let number = match entries.last() {
        Some(last) => next_number(last)?,
        None => 1,
    };
    trace!("append_subtitle number={number}");
    entries.add(Entry {
        number,
        start,
        end,
        lines,
    });
    Ok(number)
}

/// Insert a subtitle as number `at`, moving `at` and everything after it up
/// by one.
pub fn insert_subtitle(
    entries: &mut EntryCollection,
    at: u32,
    start: SrtTime,
    end: SrtTime,
    lines: Vec<String>,
) -> Result<()> {
    trace!("insert_subtitle at={at}");
    existing(entries, at)?;
    if let Some(last) = entries.last() {
        next_number(last)?;
    }
    let moved = entries.split_off(at);
    debug!("renumbering {} entries from {at}", moved.len());
    for entry in moved.into_iter().rev() {
        entries.add(Entry {
            number: entry.number + 1,
            ..entry
        });
    }
    entries.add(Entry {
        number: at,
        start,
        end,
        lines,
    });
    Ok(())
}

/// Insert a subtitle before the first one.
pub fn prepend_subtitle(
    entries: &mut EntryCollection,
    start: SrtTime,
    end: SrtTime,
    lines: Vec<String>,
) -> Result<()> {
    insert_subtitle(entries, 1, start, end, lines)
}

/// Remove subtitle `number` and move everything after it down by one.
/// Returns the removed entry.
pub fn remove_subtitle(entries: &mut EntryCollection, number: u32) -> Result<Entry> {
    trace!("remove_subtitle number={number}");
    let removed = entries.remove(number).ok_or(Error::NotFound(number))?;
    let moved = entries.split_off(number.saturating_add(1));
    debug!("renumbering {} entries after {number}", moved.len());
    for entry in moved {
        entries.add(Entry {
            number: entry.number - 1,
            ..entry
        });
    }
    Ok(removed)
}

/// Replace the subtitle that has `entry`'s number with `entry`.
/// Returns the entry that was replaced.
pub fn update_subtitle(entries: &mut EntryCollection, entry: Entry) -> Result<Entry> {
    trace!("update_subtitle number={}", entry.number);
    let previous = existing(entries, entry.number)?.clone();
    entries.add(entry);
    Ok(previous)
}

fn existing(entries: &EntryCollection, number: u32) -> Result<&Entry> {
    entries.get_exact(number).ok_or(Error::NotFound(number))
}

fn next_number(entry: &Entry) -> Result<u32> {
    entry
        .number
        .checked_add(1)
        .ok_or(Error::NumberOverflow(entry.number))
}
