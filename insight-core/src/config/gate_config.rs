use serde::{Deserialize, Serialize};

use super::defaults;

/// Quality gate thresholds and the bounds of their adaptation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Gate 1: distinct contributing companies.
    pub min_companies: usize,
    /// Gate 1 floor used for single-company datasets.
    pub min_companies_floor: usize,
    /// Gate 2: supporting quote count.
    pub min_quotes: usize,
    /// Gate 2 floor used for small corpora.
    pub min_quotes_floor: usize,
    /// Gate 3: mean impact on the 1–5 scale.
    pub min_impact: f64,
    pub impact_floor: f64,
    pub impact_ceiling: f64,
    /// Gate 4: matching-sentiment fraction for strength/weakness.
    pub coherence: f64,
    /// Corpora with fewer active quotes than this are "small".
    pub small_corpus_quotes: usize,
    /// Corpus mean relevance below this lowers the impact bar to the floor.
    pub low_quality_mean_relevance: f64,
    /// Corpus mean relevance at or above this raises the impact bar to the ceiling.
    pub high_quality_mean_relevance: f64,
    /// Disable to always apply configured thresholds verbatim.
    pub adaptive: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_companies: defaults::DEFAULT_GATE_MIN_COMPANIES,
            min_companies_floor: defaults::DEFAULT_GATE_MIN_COMPANIES_FLOOR,
            min_quotes: defaults::DEFAULT_GATE_MIN_QUOTES,
            min_quotes_floor: defaults::DEFAULT_GATE_MIN_QUOTES_FLOOR,
            min_impact: defaults::DEFAULT_GATE_MIN_IMPACT,
            impact_floor: defaults::DEFAULT_GATE_IMPACT_FLOOR,
            impact_ceiling: defaults::DEFAULT_GATE_IMPACT_CEILING,
            coherence: defaults::DEFAULT_GATE_COHERENCE,
            small_corpus_quotes: defaults::DEFAULT_SMALL_CORPUS_QUOTES,
            low_quality_mean_relevance: defaults::DEFAULT_LOW_QUALITY_MEAN_RELEVANCE,
            high_quality_mean_relevance: defaults::DEFAULT_HIGH_QUALITY_MEAN_RELEVANCE,
            adaptive: defaults::DEFAULT_ADAPTIVE_GATES,
        }
    }
}
