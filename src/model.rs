use std::collections::HashMap;

// ── Entry ────────────────────────────────────────────────────────────────────

/// One parsed vocabulary record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Day group the word belongs to, starting at 1.
    pub day: u32,
    pub word: String,
    pub meaning: String,
}

impl Entry {
    pub fn new(day: u32, word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            day,
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

// ── WordIndex ────────────────────────────────────────────────────────────────

/// Day and meaning recorded for a word in book B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub day: u32,
    pub meaning: String,
}

/// Word → `(day, meaning)` lookup built from book B.
///
/// The first occurrence of a word wins; later duplicates are ignored.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    entries: HashMap<String, IndexEntry>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `word` unless it is already present.
    ///
    /// Returns `true` when the word was newly inserted.
    pub fn insert_first(&mut self, word: &str, day: u32, meaning: impl Into<String>) -> bool {
        if self.entries.contains_key(word) {
            return false;
        }
        self.entries.insert(
            word.to_string(),
            IndexEntry {
                day,
                meaning: meaning.into(),
            },
        );
        true
    }

    pub fn get(&self, word: &str) -> Option<&IndexEntry> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── MergedEntry ──────────────────────────────────────────────────────────────

/// A spreadsheet row. `id` only encodes row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    pub id: usize,
    pub day: u32,
    pub word: String,
    pub meaning: String,
}

/// Number merged entries 1, 2, 3, … in their current order.
pub fn assign_ids(entries: Vec<Entry>) -> Vec<MergedEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, e)| MergedEntry {
            id: i + 1,
            day: e.day,
            word: e.word,
            meaning: e.meaning,
        })
        .collect()
}
