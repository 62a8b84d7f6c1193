use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A single labelled slot on the wheel.
///
/// Identity is the `id`; the `name` may change without the entry becoming a
/// different entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entry {}

/// Immutable copy of the entry list taken when a spin is accepted.
///
/// Cloning is cheap and never observes later edits to the live list.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    entries: Arc<[Entry]>,
}

impl EntrySnapshot {
    pub fn capture(entries: &[Entry]) -> Self {
        Self {
            entries: entries.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// The live, host-owned list of entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::from_names(["Alice", "Bob", "Charlie", "Diana", "Eve"])
    }
}

impl EntryList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names.into_iter().map(Entry::new).collect(),
        }
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a trimmed, non-empty name. Returns the new entry's id.
    pub fn add(&mut self, name: &str) -> Option<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let entry = Entry::new(name);
        let id = entry.id;
        self.entries.push(entry);
        Some(id)
    }

    /// Adds one entry per non-blank line. Returns how many were added.
    pub fn add_lines(&mut self, text: &str) -> usize {
        text.lines().filter_map(|line| self.add(line)).count()
    }

    pub fn find(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Entry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn rename(&mut self, id: Uuid, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.name = name.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot::capture(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_uses_id_only() {
        let a = Entry::new("Alice");
        let mut renamed = a.clone();
        renamed.name = "Alicia".to_owned();
        assert_eq!(a, renamed);
        assert_ne!(a, Entry::new("Alice"));
    }

    #[test]
    fn test_add_rejects_blank_names() {
        let mut list = EntryList::new();
        assert!(list.add("   ").is_none());
        assert!(list.add("  Bob ").is_some());
        assert_eq!(list.entries()[0].name, "Bob");
    }

    #[test]
    fn test_add_lines_skips_empty_lines() {
        let mut list = EntryList::new();
        let added = list.add_lines("one\n\n two\n   \nthree");
        assert_eq!(added, 3);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_snapshot_is_isolated_from_edits() {
        let mut list = EntryList::from_names(["A", "B", "C"]);
        let snapshot = list.snapshot();
        let b = list.entries()[1].id;
        list.remove(b);
        let a = list.entries()[0].id;
        list.rename(a, "Z");

        assert_eq!(list.len(), 2);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get(0).map(|e| e.name.as_str()), Some("A"));
        assert_eq!(snapshot.get(1).map(|e| e.name.as_str()), Some("B"));
    }

    #[test]
    fn test_rename_unknown_id() {
        let mut list = EntryList::default();
        assert!(!list.rename(Uuid::new_v4(), "X"));
        assert_eq!(list.len(), 5);
    }
}
