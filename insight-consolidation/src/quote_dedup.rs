//! Quote-level dedup and cross-finding reuse accounting.

use std::cmp::Ordering;
use std::collections::HashMap;

use insight_clustering::algorithms::similarity::text_similarity;
use insight_core::Quote;
use tracing::debug;

/// Drop quotes whose text similarity to a preferred quote exceeds `threshold`.
///
/// Preference: higher relevance for `criterion`, then longer text, then the
/// smaller id. The survivors are returned in id order. Applying the function
/// to its own output returns the same set.
pub fn dedup_quotes<'a>(quotes: &[&'a Quote], criterion: &str, threshold: f64) -> Vec<&'a Quote> {
    dedup_quotes_across(quotes, &[criterion], threshold)
}

/// [`dedup_quotes`] for evidence spanning several criteria: a quote is
/// ranked by its best relevance among `criteria`.
pub fn dedup_quotes_across<'a>(
    quotes: &[&'a Quote],
    criteria: &[&str],
    threshold: f64,
) -> Vec<&'a Quote> {
    let mut ranked: Vec<&Quote> = quotes.to_vec();
    ranked.sort_by(|a, b| preference(a, b, criteria));

    let mut kept: Vec<&Quote> = Vec::with_capacity(ranked.len());
    for quote in ranked {
        let duplicate_of = kept
            .iter()
            .find(|k| text_similarity(&k.text, &quote.text) > threshold);
        match duplicate_of {
            Some(original) => debug!(
                dropped = %quote.id,
                kept = %original.id,
                "near-duplicate quote dropped"
            ),
            None => kept.push(quote),
        }
    }
    kept.sort_by(|a, b| a.id.cmp(&b.id));
    kept
}

fn preference(a: &Quote, b: &Quote, criteria: &[&str]) -> Ordering {
    best_relevance(b, criteria)
        .cmp(&best_relevance(a, criteria))
        .then_with(|| b.text.len().cmp(&a.text.len()))
        .then_with(|| a.id.cmp(&b.id))
}

fn best_relevance(quote: &Quote, criteria: &[&str]) -> u8 {
    criteria
        .iter()
        .map(|c| quote.relevance_for(c))
        .max()
        .unwrap_or(0)
}

/// How many findings cite each quote, against a per-quote cap.
#[derive(Debug, Clone)]
pub struct QuoteUsageLedger {
    cap: usize,
    uses: HashMap<String, usize>,
}

impl QuoteUsageLedger {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            uses: HashMap::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn uses(&self, quote_id: &str) -> usize {
        self.uses.get(quote_id).copied().unwrap_or(0)
    }

    /// Ids among `quote_ids` that are already at the cap.
    pub fn exhausted<'a, I>(&self, quote_ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        quote_ids
            .into_iter()
            .filter(|id| self.uses(id) >= self.cap)
            .cloned()
            .collect()
    }

    /// Count one more citation of each id.
    pub fn record<'a, I>(&mut self, quote_ids: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for id in quote_ids {
            *self.uses.entry(id.clone()).or_insert(0) += 1;
        }
    }
}
