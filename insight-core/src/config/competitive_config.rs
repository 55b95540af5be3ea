use serde::{Deserialize, Serialize};

use super::defaults;
use super::scoring_config::owned_terms;

/// Competitive signal vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveConfig {
    /// Named competitors. Tenant-specific; empty by default.
    pub competitors: Vec<String>,
    /// Generic market language ("alternative", "incumbent").
    pub market_terms: Vec<String>,
    /// Comparison phrases that raise the context tier.
    pub comparison_phrases: Vec<String>,
}

impl Default for CompetitiveConfig {
    fn default() -> Self {
        Self {
            competitors: Vec::new(),
            market_terms: owned_terms(defaults::DEFAULT_MARKET_TERMS),
            comparison_phrases: owned_terms(defaults::DEFAULT_COMPARISON_PHRASES),
        }
    }
}
