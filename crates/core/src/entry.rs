//! A single subtitle record.

use crate::time::SrtTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One SRT block: its number, the time range it is shown for and its text
/// lines.
///
/// Entries are compared and ordered by `number` alone, so two entries with
/// the same number are equal even when their times or text differ. Edits
/// build a new entry rather than mutating an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub number: u32,
    pub start: SrtTime,
    pub end: SrtTime,
    pub lines: Vec<String>,
}

impl Entry {
    pub fn new<I, S>(number: u32, start: SrtTime, end: SrtTime, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            number,
            start,
            end,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Same payload under a different number.
    pub fn renumbered(&self, number: u32) -> Self {
        Self {
            number,
            ..self.clone()
        }
    }

    /// All text lines joined with single spaces.
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}
