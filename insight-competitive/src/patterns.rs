//! Case-insensitive, word-bounded term patterns.

use regex::Regex;
use tracing::warn;

/// One configured term and its compiled pattern.
#[derive(Debug, Clone)]
pub struct TermPattern {
    /// Lowercased term as configured.
    pub term: String,
    regex: Regex,
}

impl TermPattern {
    /// Compile `term`. Returns `None` for blank terms or a pattern the regex
    /// engine refuses.
    pub fn compile(term: &str) -> Option<Self> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        // Whitespace inside a phrase matches any run of whitespace.
        let body = term
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        match Regex::new(&format!(r"(?i)\b{body}\b")) {
            Ok(regex) => Some(Self { term, regex }),
            Err(e) => {
                warn!(term = %term, error = %e, "term pattern rejected");
                None
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Compile every term in `terms`, skipping the ones that do not compile.
pub fn compile_all(terms: &[String]) -> Vec<TermPattern> {
    terms.iter().filter_map(|t| TermPattern::compile(t)).collect()
}

/// Terms from `patterns` that occur in `text`.
pub fn matching<'p>(patterns: &'p [TermPattern], text: &str) -> Vec<&'p str> {
    patterns
        .iter()
        .filter(|p| p.is_match(text))
        .map(|p| p.term.as_str())
        .collect()
}
