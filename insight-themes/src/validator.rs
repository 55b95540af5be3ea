//! Structural contract for generated theme statements.

use insight_clustering::algorithms::sentence_splitter::count_sentences;
use insight_competitive::patterns::{compile_all, matching, TermPattern};
use insight_core::config::NarrativeConfig;

/// Checks sentence count, word range, banned phrases and jargon.
#[derive(Debug, Clone)]
pub struct NarrativeValidator {
    required_sentences: usize,
    min_words: usize,
    max_words: usize,
    banned: Vec<TermPattern>,
    jargon: Vec<TermPattern>,
}

impl NarrativeValidator {
    pub fn new(config: &NarrativeConfig) -> Self {
        Self {
            required_sentences: config.required_sentences,
            min_words: config.min_words,
            max_words: config.max_words,
            banned: compile_all(&config.banned_phrases),
            jargon: compile_all(&config.jargon),
        }
    }

    /// Every violation in `text`. Empty means the statement is acceptable.
    pub fn violations(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return vec!["statement is empty".to_string()];
        }

        let mut violations = Vec::new();
        let sentences = count_sentences(text);
        if sentences != self.required_sentences {
            violations.push(format!(
                "expected {} sentences, found {sentences}",
                self.required_sentences
            ));
        }
        let words = text.split_whitespace().count();
        if words < self.min_words {
            violations.push(format!("{words} words, minimum is {}", self.min_words));
        }
        if words > self.max_words {
            violations.push(format!("{words} words, maximum is {}", self.max_words));
        }
        for term in matching(&self.banned, text) {
            violations.push(format!("contains solutioning phrase \"{term}\""));
        }
        for term in matching(&self.jargon, text) {
            violations.push(format!("contains jargon \"{term}\""));
        }
        violations
    }

    pub fn is_valid(&self, text: &str) -> bool {
        self.violations(text).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> NarrativeValidator {
        NarrativeValidator::new(&NarrativeConfig::default())
    }

    const VALID: &str = "Buyers at four companies describe renewal pricing as a consistent \
                         weakness. Finance teams pushed back on the quote in every \
                         late-stage review.";

    #[test]
    fn two_plain_sentences_pass() {
        assert!(validator().is_valid(VALID), "{:?}", validator().violations(VALID));
    }

    #[test]
    fn wrong_sentence_count_fails() {
        let text = "Pricing hurt. Support hurt. Onboarding hurt. Integrations hurt. \
                    Renewals hurt badly across every account we spoke with.";
        let violations = validator().violations(text);
        assert!(violations.iter().any(|v| v.contains("found 5")));
    }

    #[test]
    fn solutioning_language_fails() {
        let text = "Buyers at four companies describe renewal pricing as a weakness. \
                    The vendor should lower prices before the next renewal cycle.";
        let violations = validator().violations(text);
        assert_eq!(violations, vec!["contains solutioning phrase \"should\"".to_string()]);
    }

    #[test]
    fn banned_terms_match_whole_words_only() {
        // "shoulders" contains "should" but is not the banned word.
        let text = "Buyers at four companies say finance shoulders the renewal burden alone. \
                    The pattern repeats across every late-stage review we heard.";
        assert!(validator().is_valid(text));
    }

    #[test]
    fn jargon_and_word_bounds_fail() {
        let violations = validator().violations("Great synergy. Truly.");
        assert!(violations.iter().any(|v| v.contains("jargon \"synergy\"")));
        assert!(violations.iter().any(|v| v.contains("minimum is 12")));
        assert_eq!(validator().violations("   "), vec!["statement is empty".to_string()]);
    }
}
