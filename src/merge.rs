use crate::{Entry, WordIndex};

/// Merge book A's entries with book B's index.
///
/// Order and day always come from book A. A word known to book B takes
/// book B's meaning; words that only book B knows are dropped.
pub fn merge(entries: &[Entry], index: &WordIndex) -> Vec<Entry> {
    entries
        .iter()
        .map(|entry| match index.get(&entry.word) {
            Some(found) => Entry::new(entry.day, entry.word.clone(), found.meaning.clone()),
            None => entry.clone(),
        })
        .collect()
}

/// Number of book A entries whose meaning [`merge`] replaces.
pub fn count_overrides(entries: &[Entry], index: &WordIndex) -> usize {
    entries.iter().filter(|e| index.contains(&e.word)).count()
}
