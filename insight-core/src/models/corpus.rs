use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Quote;

/// Corpus-level statistics that drive threshold adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusProfile {
    /// Quotes with relevance > 0.
    pub quote_count: usize,
    /// Distinct companies among those quotes.
    pub company_count: usize,
    /// Mean relevance of those quotes (0 for an empty corpus).
    pub mean_relevance: f64,
}

impl CorpusProfile {
    pub fn from_quotes<'a>(quotes: impl IntoIterator<Item = &'a Quote>) -> Self {
        let mut companies = BTreeSet::new();
        let mut count = 0usize;
        let mut relevance_sum = 0u64;
        for quote in quotes.into_iter().filter(|q| q.is_relevant()) {
            companies.insert(quote.company.as_str());
            count += 1;
            relevance_sum += quote.relevance as u64;
        }
        Self {
            quote_count: count,
            company_count: companies.len(),
            mean_relevance: if count == 0 {
                0.0
            } else {
                relevance_sum as f64 / count as f64
            },
        }
    }
}
