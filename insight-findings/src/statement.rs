//! Deterministic finding statements and categories.

use insight_clustering::algorithms::tfidf::extract_key_phrases;
use insight_core::config::ScoringLexicon;
use insight_core::models::{FindingCategory, Polarity};
use insight_core::Quote;
use insight_validation::evidence::contains_any;

/// One-sentence statement: polarity phrase, company count, criterion, and
/// the cluster's distinctive terms.
pub fn finding_statement(
    polarity: Polarity,
    criterion: &str,
    quotes: &[&Quote],
    companies: usize,
    key_phrases: usize,
) -> String {
    let texts: Vec<&str> = quotes.iter().map(|q| q.text.as_str()).collect();
    let criterion_lower = criterion.to_lowercase();
    // Ask for one spare in case the criterion itself ranks.
    let terms: Vec<String> = extract_key_phrases(&texts, key_phrases + 1)
        .into_iter()
        .map(|(term, _)| term)
        .filter(|term| *term != criterion_lower)
        .take(key_phrases)
        .collect();

    let plural = if companies == 1 { "company" } else { "companies" };
    let stance = match polarity {
        Polarity::Weakness => format!("report friction with {criterion}"),
        Polarity::Strength => format!("credit {criterion} as a strength"),
        Polarity::MixedSignal => format!("are divided on {criterion}"),
    };
    let lead = format!("Buyers at {companies} {plural} {stance}");
    if terms.is_empty() {
        format!("{lead}.")
    } else {
        format!("{lead}, citing {}.", terms.join(", "))
    }
}

/// Weakness is a barrier, strength an opportunity. Mixed signals are
/// strategic when strategic vocabulary appears, otherwise functional.
pub fn finding_category(
    polarity: Polarity,
    quotes: &[&Quote],
    lexicon: &ScoringLexicon,
) -> FindingCategory {
    match polarity {
        Polarity::Weakness => FindingCategory::Barrier,
        Polarity::Strength => FindingCategory::Opportunity,
        Polarity::MixedSignal => {
            if quotes.iter().any(|q| contains_any(&q.text, &lexicon.strategic)) {
                FindingCategory::Strategic
            } else {
                FindingCategory::Functional
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::Sentiment;
    use test_fixtures::QuoteBuilder;

    #[test]
    fn statement_names_companies_criterion_and_terms() {
        let a = QuoteBuilder::new("q1").text("Renewal pricing doubled overnight").build();
        let b = QuoteBuilder::new("q2").text("Renewal pricing doubled again").build();
        let statement = finding_statement(Polarity::Weakness, "pricing", &[&a, &b], 2, 2);
        assert!(
            statement.starts_with("Buyers at 2 companies report friction with pricing, citing ")
        );
        assert!(statement.contains("doubled"));
        assert!(!statement.contains("citing pricing"));
        assert!(statement.ends_with('.'));
    }

    #[test]
    fn statement_is_deterministic() {
        let a = QuoteBuilder::new("q1").text("Support tickets waited days").build();
        let b = QuoteBuilder::new("q2").text("Tickets waited for escalation").build();
        let first = finding_statement(Polarity::Weakness, "support", &[&a, &b], 2, 3);
        let second = finding_statement(Polarity::Weakness, "support", &[&a, &b], 2, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn mixed_signal_category_depends_on_vocabulary() {
        let lexicon = ScoringLexicon::default();
        let strategic = QuoteBuilder::new("q1")
            .sentiment(Sentiment::Mixed)
            .text("Their roadmap fits but the current release does not")
            .build();
        let functional = QuoteBuilder::new("q2")
            .sentiment(Sentiment::Mixed)
            .text("Reports are good but exports are slow")
            .build();
        assert_eq!(
            finding_category(Polarity::MixedSignal, &[&strategic], &lexicon),
            FindingCategory::Strategic
        );
        assert_eq!(
            finding_category(Polarity::MixedSignal, &[&functional], &lexicon),
            FindingCategory::Functional
        );
        assert_eq!(
            finding_category(Polarity::Weakness, &[&functional], &lexicon),
            FindingCategory::Barrier
        );
    }
}
