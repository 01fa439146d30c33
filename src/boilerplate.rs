//! Removal of footer and watermark text that the column extractor picks up
//! together with the real meanings.

use crate::Result;
use regex::Regex;

/// A single pattern → replacement rule.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    regex: Regex,
    replacement: String,
}

impl Rule {
    pub fn new(name: &'static str, pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }
}

/// Ordered list of [`Rule`]s applied one after another.
#[derive(Debug, Clone)]
pub struct BoilerplateRules {
    rules: Vec<Rule>,
}

impl BoilerplateRules {
    /// The rules for book A's footers.
    ///
    /// The phone rule runs before the page-number rule: `010-1234-5678`
    /// contains `-1234-`, which would otherwise be eaten first and leave
    /// the rest of the number behind.
    pub fn book_a() -> Result<Self> {
        Ok(Self {
            rules: vec![
                // Promotional site reference; everything after it is clutter.
                Rule::new("promo_site", r"애니보카\(anyvoca\.com\).*", "")?,
                Rule::new("phone", r"☎ \d{3}-\d{4}-\d{4}", "")?,
                Rule::new("page_number", r"-\d+-", "")?,
            ],
        })
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after every rule already present.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order. The result is not trimmed.
    pub fn strip(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            let replaced = rule.regex.replace_all(&out, rule.replacement.as_str());
            if let std::borrow::Cow::Owned(s) = replaced {
                tracing::trace!(rule = rule.name, "boilerplate removed");
                out = s;
            }
        }
        out
    }
}
