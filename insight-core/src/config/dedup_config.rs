use serde::{Deserialize, Serialize};

use super::defaults;

/// Quote-level dedup and theme-level consolidation thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Quotes above this text similarity are duplicates of each other.
    pub quote_similarity: f64,
    /// Themes above this statement similarity are merged.
    pub theme_similarity: f64,
    /// How many findings a single quote may anchor.
    pub max_findings_per_quote: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            quote_similarity: defaults::DEFAULT_QUOTE_SIMILARITY_THRESHOLD,
            theme_similarity: defaults::DEFAULT_THEME_SIMILARITY_THRESHOLD,
            max_findings_per_quote: defaults::DEFAULT_MAX_FINDINGS_PER_QUOTE,
        }
    }
}
