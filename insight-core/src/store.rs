//! Quote store: the validated, immutable input corpus for one run.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::errors::{InsightError, InsightResult};
use crate::models::{AnalysisScope, CorpusProfile, Quote};
use crate::traits::IQuoteStore;

/// Read-only index over a validated quote corpus.
///
/// Shared by reference across finding-synthesis workers.
#[derive(Debug, Clone, Default)]
pub struct QuoteIndex {
    quotes: BTreeMap<String, Quote>,
}

impl QuoteIndex {
    /// Validate and index `quotes`.
    ///
    /// Rejects empty ids or text, relevance above 5, and duplicate ids.
    pub fn build(quotes: Vec<Quote>) -> InsightResult<Self> {
        let mut index = BTreeMap::new();
        for quote in quotes {
            validate_quote(&quote)?;
            if index.contains_key(&quote.id) {
                return Err(InsightError::DuplicateQuote { id: quote.id });
            }
            index.insert(quote.id.clone(), quote);
        }
        Ok(Self { quotes: index })
    }

    pub fn get(&self, id: &str) -> Option<&Quote> {
        self.quotes.get(id)
    }

    /// Resolve ids, skipping any that are unknown.
    pub fn resolve<'a, I, S>(&'a self, ids: I) -> Vec<&'a Quote>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter_map(|id| self.quotes.get(id.as_ref()))
            .collect()
    }

    /// Quotes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.values()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn profile(&self) -> CorpusProfile {
        CorpusProfile::from_quotes(self.quotes.values())
    }
}

fn validate_quote(quote: &Quote) -> InsightResult<()> {
    let invalid = |reason: &str| InsightError::InvalidQuote {
        id: quote.id.clone(),
        reason: reason.to_string(),
    };
    if quote.id.trim().is_empty() {
        return Err(invalid("empty id"));
    }
    if quote.text.trim().is_empty() {
        return Err(invalid("empty text"));
    }
    if quote.company.trim().is_empty() {
        return Err(invalid("empty company"));
    }
    if quote.relevance > Quote::MAX_RELEVANCE {
        return Err(invalid("relevance above 5"));
    }
    if quote
        .criterion_relevance
        .values()
        .any(|&r| r > Quote::MAX_RELEVANCE)
    {
        return Err(invalid("per-criterion relevance above 5"));
    }
    Ok(())
}

/// In-process quote store keyed by tenant.
#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    tenants: RwLock<HashMap<String, Vec<Quote>>>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add quotes for a tenant.
    pub fn insert(&self, tenant_id: &str, quotes: impl IntoIterator<Item = Quote>) {
        let mut tenants = self
            .tenants
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        tenants
            .entry(tenant_id.to_string())
            .or_default()
            .extend(quotes);
    }
}

impl IQuoteStore for InMemoryQuoteStore {
    fn load(&self, scope: &AnalysisScope) -> InsightResult<Vec<Quote>> {
        let tenants = self
            .tenants
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(tenants.get(&scope.tenant_id).cloned().unwrap_or_default())
    }
}
