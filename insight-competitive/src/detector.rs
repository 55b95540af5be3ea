//! CompetitiveDetector: keyword match plus comparison-context tier.

use std::collections::BTreeSet;

use insight_core::config::CompetitiveConfig;
use insight_core::models::{CompetitiveSignal, ContextTier};
use insight_core::Quote;
use tracing::debug;

use crate::patterns::{compile_all, matching, TermPattern};

/// Source id used when the theme statement itself carries the match.
pub const STATEMENT_SOURCE: &str = "statement";

/// Matches competitor names and market language.
///
/// Each text is graded on its own: a named competitor together with a
/// comparison phrase is strong, a comparison phrase with market language is
/// moderate, any other mention is weak. The signal takes the best tier of
/// any source and is primary from moderate upwards.
#[derive(Debug, Clone)]
pub struct CompetitiveDetector {
    competitors: Vec<TermPattern>,
    market: Vec<TermPattern>,
    comparisons: Vec<TermPattern>,
}

impl CompetitiveDetector {
    pub fn new(config: &CompetitiveConfig) -> Self {
        Self {
            competitors: compile_all(&config.competitors),
            market: compile_all(&config.market_terms),
            comparisons: compile_all(&config.comparison_phrases),
        }
    }

    /// Detect over an optional statement and the supporting quotes.
    pub fn detect<'q>(
        &self,
        statement: Option<&str>,
        quotes: impl IntoIterator<Item = &'q Quote>,
    ) -> Option<CompetitiveSignal> {
        let sources = statement
            .map(|s| (STATEMENT_SOURCE, s))
            .into_iter()
            .chain(quotes.into_iter().map(|q| (q.id.as_str(), q.text.as_str())));

        let mut signal: Option<CompetitiveSignal> = None;
        for (source, text) in sources {
            let names = matching(&self.competitors, text);
            let market = matching(&self.market, text);
            if names.is_empty() && market.is_empty() {
                continue;
            }
            let comparisons = matching(&self.comparisons, text);
            let tier = match (!names.is_empty(), !comparisons.is_empty(), !market.is_empty()) {
                (true, true, _) => ContextTier::Strong,
                (false, true, true) => ContextTier::Moderate,
                _ => ContextTier::Weak,
            };

            let entry = signal.get_or_insert_with(|| CompetitiveSignal {
                tier,
                matched_terms: BTreeSet::new(),
                named_competitors: BTreeSet::new(),
                source_ids: BTreeSet::new(),
                is_primary: false,
            });
            entry.tier = entry.tier.max(tier);
            entry
                .matched_terms
                .extend(market.iter().chain(comparisons.iter()).map(|t| t.to_string()));
            entry
                .named_competitors
                .extend(names.iter().map(|t| t.to_string()));
            entry.source_ids.insert(source.to_string());
        }

        if let Some(signal) = signal.as_mut() {
            signal.is_primary = signal.tier >= ContextTier::Moderate;
            debug!(
                tier = ?signal.tier,
                primary = signal.is_primary,
                sources = signal.source_ids.len(),
                "competitive signal detected"
            );
        }
        signal
    }
}
