//! Parser for book B.
//!
//! ```text
//! Day 1~5
//! 1 abandon 버리다, 포기하다
//! 2 absorb 흡수하다
//! ```

use crate::{Result, WordIndex};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct FormatBParser {
    day_range_re: Regex,
    entry_re: Regex,
}

impl FormatBParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            day_range_re: Regex::new(r"Day (\d+)~(\d+)")?,
            entry_re: Regex::new(r"^(\d+)\s+(\w+)\s+(.*)")?,
        })
    }

    /// Build the word index from text blocks in order.
    pub fn parse<S: AsRef<str>>(&self, blocks: &[S]) -> WordIndex {
        let mut index = WordIndex::new();
        let mut current_day = 1;
        let mut duplicates = 0usize;

        for line in blocks.iter().flat_map(|b| b.as_ref().split('\n')) {
            if line.contains("Day") {
                if let Some(day) = self
                    .day_range_re
                    .captures(line)
                    .and_then(|caps| caps[1].parse::<u32>().ok())
                {
                    current_day = day;
                }
                continue;
            }

            if let Some(caps) = self.entry_re.captures(line) {
                if !index.insert_first(&caps[2], current_day, caps[3].trim()) {
                    duplicates += 1;
                }
            }
        }

        tracing::debug!(words = index.len(), duplicates, "book B parsed");
        index
    }
}
