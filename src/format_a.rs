//! Parser for book A.
//!
//! Layout of the extracted text:
//!
//! ```text
//! 워마 EBS 파이널 Day 3          ← day marker
//! 41: abandon ▶ 버리다,           ← new entry
//! 포기하다                        ← meaning continuation
//! 42: account for ▶ 설명하다
//! (be) accountable ▶ 책임이 있는  ← secondary word/meaning pair
//! ```

use crate::boilerplate::BoilerplateRules;
use crate::{Entry, Result};
use regex::Regex;

const DELIMITER: char = '▶';

/// Stateless configuration for parsing book A. Create once, call
/// [`parse`](Self::parse) per document.
#[derive(Debug, Clone)]
pub struct FormatAParser {
    day_label: String,
    entry_re: Regex,
    number_re: Regex,
    rules: BoilerplateRules,
}

impl FormatAParser {
    pub fn new(day_label: &str) -> Result<Self> {
        Ok(Self {
            day_label: day_label.to_string(),
            entry_re: Regex::new(r"^(\d+):\s*(.+)\s*▶\s*(.+)")?,
            number_re: Regex::new(r"\d+")?,
            rules: BoilerplateRules::book_a()?,
        })
    }

    /// Replace the footer rules used when an entry is flushed.
    pub fn with_rules(mut self, rules: BoilerplateRules) -> Self {
        self.rules = rules;
        self
    }

    /// Parse text blocks in order into entries.
    pub fn parse<S: AsRef<str>>(&self, blocks: &[S]) -> Vec<Entry> {
        let mut state = ParseState::new();
        for block in blocks {
            for line in block.as_ref().split('\n') {
                self.process_line(&mut state, line);
            }
        }
        state.flush(&self.rules);
        tracing::debug!(entries = state.entries.len(), "book A parsed");
        state.entries
    }

    fn process_line(&self, state: &mut ParseState, line: &str) {
        if line.contains(&self.day_label) {
            match self.number_re.find(line) {
                Some(m) => match m.as_str().parse::<u32>() {
                    Ok(day) => state.current_day = day,
                    Err(e) => tracing::warn!(line, "day number out of range: {e}"),
                },
                None => tracing::debug!(line, "day marker without a number"),
            }
            return;
        }

        if let Some(caps) = self.entry_re.captures(line) {
            state.flush(&self.rules);
            state.word = caps[2].to_string();
            state.meaning = caps[3].to_string();
        } else if line.contains(DELIMITER) {
            let parts: Vec<&str> = line.split(DELIMITER).collect();
            if let &[left, right] = parts.as_slice() {
                if state.has_pending() {
                    state.word.push(' ');
                    state.word.push_str(left.trim());
                }
                state.meaning.push(' ');
                state.meaning.push_str(right.trim());
            }
        } else if state.has_pending() {
            state.meaning.push(' ');
            state.meaning.push_str(line.trim());
        }
    }
}

// ── Accumulator ──────────────────────────────────────────────────────────────

struct ParseState {
    current_day: u32,
    word: String,
    meaning: String,
    entries: Vec<Entry>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            current_day: 1,
            word: String::new(),
            meaning: String::new(),
            entries: Vec::new(),
        }
    }

    fn has_pending(&self) -> bool {
        !self.word.is_empty()
    }

    /// Emit the pending word, if any, under the current day.
    fn flush(&mut self, rules: &BoilerplateRules) {
        if self.has_pending() {
            let meaning = rules.strip(&self.meaning);
            self.entries.push(Entry::new(
                self.current_day,
                self.word.trim(),
                meaning.trim(),
            ));
        }
        self.word.clear();
        self.meaning.clear();
    }
}
