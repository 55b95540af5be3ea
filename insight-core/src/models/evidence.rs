use serde::{Deserialize, Serialize};

use super::{FindingCategory, Polarity, Sentiment};

/// A truncated quote handed to the text generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteExcerpt {
    pub quote_id: String,
    pub company: String,
    pub sentiment: Sentiment,
    pub excerpt: String,
}

/// Structural contract the generated statement must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConstraints {
    pub required_sentences: usize,
    pub min_words: usize,
    pub max_words: usize,
    pub banned_phrases: Vec<String>,
    /// Recommended sampling temperature. Advisory only.
    pub temperature: f64,
}

/// Bounded evidence sent to the external generator for one theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub theme_id: String,
    pub category: FindingCategory,
    pub polarity: Polarity,
    pub criteria: Vec<String>,
    pub company_count: usize,
    pub quotes: Vec<QuoteExcerpt>,
    pub finding_summaries: Vec<String>,
    pub constraints: NarrativeConstraints,
    /// 1-based attempt number.
    pub attempt: u32,
    /// Violations of the previous attempt, so the backend can correct them.
    pub previous_violations: Vec<String>,
}
