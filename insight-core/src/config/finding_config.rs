use serde::{Deserialize, Serialize};

use super::defaults;

/// Finding synthesizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FindingConfig {
    /// Quotes below this relevance for the finding's criterion are not cited.
    pub min_quote_relevance: u8,
    pub min_quotes: usize,
    pub min_companies: usize,
    /// Confidence floor (0–10) below which no finding is emitted.
    pub min_confidence: f64,
    /// Confidence at or above this is a priority finding.
    pub priority_threshold: f64,
    /// Confidence at or above this is a standard finding; below is discarded.
    pub standard_threshold: f64,
    pub max_representative_quotes: usize,
    /// Company count above which diversity returns diminish.
    pub diversity_saturation: usize,
    /// Share (0–1) of evidence strength carried by company diversity; the
    /// rest comes from cluster size.
    pub diversity_weight: f64,
    /// Share (0–1) of the diversity term reached linearly at saturation.
    pub diversity_linear_share: f64,
    /// Quote count at which the size term reaches half its maximum.
    pub size_knee: f64,
    /// Number of TF-IDF key phrases quoted in the generated statement.
    pub statement_key_phrases: usize,
}

impl Default for FindingConfig {
    fn default() -> Self {
        Self {
            min_quote_relevance: defaults::DEFAULT_MIN_QUOTE_RELEVANCE,
            min_quotes: defaults::DEFAULT_MIN_FINDING_QUOTES,
            min_companies: defaults::DEFAULT_MIN_FINDING_COMPANIES,
            min_confidence: defaults::DEFAULT_MIN_FINDING_CONFIDENCE,
            priority_threshold: defaults::DEFAULT_PRIORITY_THRESHOLD,
            standard_threshold: defaults::DEFAULT_STANDARD_THRESHOLD,
            max_representative_quotes: defaults::DEFAULT_MAX_REPRESENTATIVE_QUOTES,
            diversity_saturation: defaults::DEFAULT_DIVERSITY_SATURATION,
            diversity_weight: defaults::DEFAULT_EVIDENCE_DIVERSITY_WEIGHT,
            diversity_linear_share: defaults::DEFAULT_DIVERSITY_LINEAR_SHARE,
            size_knee: defaults::DEFAULT_EVIDENCE_SIZE_KNEE,
            statement_key_phrases: defaults::DEFAULT_STATEMENT_KEY_PHRASES,
        }
    }
}
