//! The measured quantities every gate reads.

use std::collections::{BTreeMap, BTreeSet};

use insight_core::config::ScoringWeights;
use insight_core::models::Polarity;
use insight_core::{Quote, Sentiment};

/// Evidence behind one Finding or Theme, reduced to what the gates measure.
#[derive(Debug, Clone, PartialEq)]
pub struct GateEvidence {
    pub subject_id: String,
    pub polarity: Polarity,
    pub company_count: usize,
    pub quote_count: usize,
    /// Mean per-quote impact on the 1–5 scale.
    pub mean_impact: f64,
    pub sentiments: BTreeMap<Sentiment, usize>,
}

impl GateEvidence {
    /// Measure `quotes` against the criteria the subject is about.
    ///
    /// A quote's impact is taken against whichever of `criteria` it is most
    /// relevant to.
    pub fn from_quotes(
        subject_id: impl Into<String>,
        polarity: Polarity,
        quotes: &[&Quote],
        criteria: &[&str],
        scoring: &ScoringWeights,
    ) -> Self {
        let companies: BTreeSet<&str> = quotes.iter().map(|q| q.company.as_str()).collect();
        let mut sentiments = BTreeMap::new();
        for quote in quotes {
            *sentiments.entry(quote.sentiment).or_insert(0) += 1;
        }
        let mean_impact = if quotes.is_empty() {
            0.0
        } else {
            quotes
                .iter()
                .map(|q| {
                    criteria
                        .iter()
                        .map(|c| quote_impact(q, c, scoring))
                        .fold(0.0, f64::max)
                })
                .sum::<f64>()
                / quotes.len() as f64
        };
        Self {
            subject_id: subject_id.into(),
            polarity,
            company_count: companies.len(),
            quote_count: quotes.len(),
            mean_impact,
            sentiments,
        }
    }

    /// Fraction of quotes carrying the polarity's sentiment. For mixed
    /// signals, the share of the most common sentiment.
    pub fn coherence(&self) -> f64 {
        if self.quote_count == 0 {
            return 0.0;
        }
        let matching = match self.polarity.expected_sentiment() {
            Some(expected) => self.sentiments.get(&expected).copied().unwrap_or(0),
            None => self.sentiments.values().copied().max().unwrap_or(0),
        };
        matching as f64 / self.quote_count as f64
    }
}

/// Impact of one quote on `criterion`, 1–5: its relevance plus a bonus for
/// deal-impact language.
pub fn quote_impact(quote: &Quote, criterion: &str, scoring: &ScoringWeights) -> f64 {
    let relevance = quote.relevance_for(criterion) as f64;
    let lexicon = &scoring.lexicon;
    let bonus = if contains_any(&quote.text, &lexicon.tipping_point)
        || contains_any(&quote.text, &lexicon.differentiator)
    {
        scoring.deal_impact_bonus
    } else {
        0.0
    };
    (relevance + bonus).clamp(1.0, Quote::MAX_RELEVANCE as f64)
}

/// Case-insensitive substring match against any term.
pub fn contains_any(text: &str, terms: &[String]) -> bool {
    let lower = text.to_lowercase();
    terms
        .iter()
        .any(|t| !t.is_empty() && lower.contains(&t.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::QuoteBuilder;

    #[test]
    fn impact_adds_bonus_for_deal_language() {
        let scoring = ScoringWeights::default();
        let plain = QuoteBuilder::new("q1").relevance(3).text("Pricing was high").build();
        let tipping = QuoteBuilder::new("q2")
            .relevance(3)
            .text("Pricing was the deal breaker for us")
            .build();
        assert_eq!(quote_impact(&plain, "pricing", &scoring), 3.0);
        assert_eq!(quote_impact(&tipping, "pricing", &scoring), 4.0);
    }

    #[test]
    fn impact_is_clamped_to_scale() {
        let scoring = ScoringWeights::default();
        let strong = QuoteBuilder::new("q1")
            .relevance(5)
            .text("This was a dealbreaker")
            .build();
        let unrelated = QuoteBuilder::new("q2").criterion("support").build();
        assert_eq!(quote_impact(&strong, "pricing", &scoring), 5.0);
        assert_eq!(quote_impact(&unrelated, "pricing", &scoring), 1.0);
    }

    #[test]
    fn evidence_counts_companies_and_sentiments() {
        let quotes = [
            QuoteBuilder::new("q1").company("Acme").build(),
            QuoteBuilder::new("q2").company("Acme").build(),
            QuoteBuilder::new("q3")
                .company("Globex")
                .sentiment(Sentiment::Positive)
                .build(),
        ];
        let refs: Vec<&Quote> = quotes.iter().collect();
        let evidence = GateEvidence::from_quotes(
            "f1",
            Polarity::Weakness,
            &refs,
            &["pricing"],
            &ScoringWeights::default(),
        );
        assert_eq!(evidence.company_count, 2);
        assert_eq!(evidence.quote_count, 3);
        assert!((evidence.coherence() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(evidence.mean_impact, 4.0);
    }

    #[test]
    fn empty_evidence_is_incoherent() {
        let evidence = GateEvidence::from_quotes(
            "f1",
            Polarity::Strength,
            &[],
            &["pricing"],
            &ScoringWeights::default(),
        );
        assert_eq!(evidence.coherence(), 0.0);
        assert_eq!(evidence.mean_impact, 0.0);
    }
}
