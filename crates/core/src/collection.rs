//! Ordered, number-keyed storage for subtitle entries.

use crate::entry::Entry;
use std::collections::btree_map::{self, BTreeMap};

/// Entries keyed by their number, iterated in ascending order.
///
/// Holds at most one entry per number; [`add`](Self::add) replaces.
#[derive(Debug, Clone, Default)]
pub struct EntryCollection {
    entries: BTreeMap<u32, Entry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry`, replacing any entry that has the same number.
    pub fn add(&mut self, entry: Entry) {
        self.entries.insert(entry.number, entry);
    }

    /// Remove the entry with exactly this number, if any.
    pub fn remove(&mut self, number: u32) -> Option<Entry> {
        self.entries.remove(&number)
    }

    /// Remove the entry sharing `entry`'s number, if any.
    pub fn remove_entry(&mut self, entry: &Entry) -> Option<Entry> {
        self.remove(entry.number)
    }

    /// Ceiling lookup: the entry with this number if present, otherwise the
    /// lowest-numbered entry above it. `None` when every entry is below
    /// `number`.
    pub fn get(&self, number: u32) -> Option<&Entry> {
        self.entries.range(number..).next().map(|(_, entry)| entry)
    }

    /// Ceiling lookup keyed by `entry`'s number.
    pub fn get_entry(&self, entry: &Entry) -> Option<&Entry> {
        self.get(entry.number)
    }

    pub fn get_exact(&self, number: u32) -> Option<&Entry> {
        self.entries.get(&number)
    }

    pub fn contains(&self, number: u32) -> bool {
        self.entries.contains_key(&number)
    }

    pub fn contains_entry(&self, entry: &Entry) -> bool {
        self.contains(entry.number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&Entry> {
        self.entries.values().next()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.values().next_back()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.values(),
        }
    }

    /// Entry numbers in ascending order.
    pub fn numbers(&self) -> Vec<u32> {
        self.entries.keys().copied().collect()
    }

    /// Detach every entry numbered `from` or above, in ascending order.
    pub(crate) fn split_off(&mut self, from: u32) -> Vec<Entry> {
        self.entries.split_off(&from).into_values().collect()
    }
}

/// Ascending iterator over the entries of an [`EntryCollection`].
pub struct Iter<'a> {
    inner: btree_map::Values<'a, u32, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for EntryCollection {
    type Item = Entry;
    type IntoIter = btree_map::IntoValues<u32, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl FromIterator<Entry> for EntryCollection {
    /// Later entries replace earlier ones with the same number.
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl Extend<Entry> for EntryCollection {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.add(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SrtTime;

    fn entry(number: u32, lines: &[&str]) -> Entry {
        Entry::new(number, SrtTime::MIDNIGHT, SrtTime::MIDNIGHT, lines.iter().copied())
    }

    fn texts(c: &EntryCollection) -> Vec<(u32, String)> {
        c.iter().map(|e| (e.number, e.text())).collect()
    }

    #[test]
    fn add_replaces_same_number() {
        let mut c = EntryCollection::new();
        c.add(entry(2, &["Hello", "World"]));
        c.add(entry(1, &["Foo", "Bar"]));
        c.add(entry(2, &["Bye", "World"]));
        assert_eq!(c.len(), 2);
        assert_eq!(
            texts(&c),
            vec![(1, "Foo Bar".to_string()), (2, "Bye World".to_string())]
        );
    }

    #[test]
    fn remove_by_number_and_entry() {
        let mut c = EntryCollection::new();
        let doomed = entry(3, &["Hello", "World"]);
        c.add(doomed.clone());
        c.add(entry(1, &["Foo", "Bar"]));
        c.add(entry(2, &["Bye", "World"]));

        let mut by_number = c.clone();
        assert!(by_number.remove(3).is_some());
        assert_eq!(by_number.numbers(), vec![1, 2]);

        assert!(c.remove_entry(&doomed).is_some());
        assert_eq!(c.numbers(), vec![1, 2]);
        assert!(c.remove(42).is_none());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn get_and_contains_exact() {
        let mut c = EntryCollection::new();
        let first = entry(1, &["Foo", "Bar"]);
        c.add(first.clone());
        c.add(entry(2, &["Hello", "World"]));
        assert_eq!(c.get(1).map(Entry::text).as_deref(), Some("Foo Bar"));
        assert_eq!(c.get_entry(&first).map(|e| e.number), Some(1));
        assert!(c.contains(1));
        assert!(c.contains_entry(&first));
        assert!(!c.contains(3));
    }

    #[test]
    fn get_falls_back_to_ceiling() {
        let c: EntryCollection = [1, 2, 5].into_iter().map(|n| entry(n, &["x"])).collect();
        assert_eq!(c.get(3).map(|e| e.number), Some(5));
        assert_eq!(c.get(4).map(|e| e.number), Some(5));
        assert!(!c.contains(3));
        assert!(c.get_exact(3).is_none());
        assert!(c.get(6).is_none());
        assert!(EntryCollection::new().get(1).is_none());
    }

    #[test]
    fn clone_is_independent() {
        let mut c = EntryCollection::new();
        c.add(entry(1, &["a"]));
        let snapshot = c.clone();
        c.add(entry(1, &["b"]));
        c.add(entry(2, &["c"]));
        assert_eq!(texts(&snapshot), vec![(1, "a".to_string())]);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn iterates_ascending() {
        let c: EntryCollection = [4, 1, 3].into_iter().map(|n| entry(n, &["x"])).collect();
        assert_eq!(c.iter().map(|e| e.number).collect::<Vec<_>>(), vec![1, 3, 4]);
        assert_eq!(c.iter().rev().map(|e| e.number).collect::<Vec<_>>(), vec![4, 3, 1]);
        assert_eq!(c.first().map(|e| e.number), Some(1));
        assert_eq!(c.last().map(|e| e.number), Some(4));
    }
}
