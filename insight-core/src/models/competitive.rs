use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Strength of the comparative context around a competitive keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextTier {
    /// Passing mention without comparison language.
    Weak,
    /// Comparison language, no competitor named.
    Moderate,
    /// A named competitor in an explicit comparison.
    Strong,
}

/// Competitive intelligence attached to a Finding or Theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveSignal {
    pub tier: ContextTier,
    /// Keywords that matched, lowercased.
    pub matched_terms: BTreeSet<String>,
    /// Competitor names that matched, lowercased.
    pub named_competitors: BTreeSet<String>,
    /// Quote ids (or `"statement"`) whose text carried a match.
    pub source_ids: BTreeSet<String>,
    /// Weak signals are recorded but never primary.
    pub is_primary: bool,
}
