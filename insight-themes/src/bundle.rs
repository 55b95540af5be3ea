//! Bounded evidence bundles for the external generator.

use std::collections::HashSet;

use insight_core::config::NarrativeConfig;
use insight_core::models::{EvidenceBundle, NarrativeConstraints, QuoteExcerpt};
use insight_core::QuoteIndex;

use crate::grouping::ThemeCandidate;

const ELLIPSIS: char = '…';

/// Bundle for `candidate`: representative quotes taken round-robin across
/// its findings, each truncated, plus every finding statement.
pub fn build_bundle(
    theme_id: &str,
    candidate: &ThemeCandidate<'_>,
    index: &QuoteIndex,
    config: &NarrativeConfig,
) -> EvidenceBundle {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut quotes = Vec::with_capacity(config.max_bundle_quotes);
    let deepest = candidate
        .findings
        .iter()
        .map(|f| f.representative_quote_ids.len())
        .max()
        .unwrap_or(0);

    'rounds: for round in 0..deepest {
        for finding in &candidate.findings {
            if quotes.len() >= config.max_bundle_quotes {
                break 'rounds;
            }
            let Some(id) = finding.representative_quote_ids.get(round) else {
                continue;
            };
            if !seen.insert(id.as_str()) {
                continue;
            }
            if let Some(quote) = index.get(id) {
                quotes.push(QuoteExcerpt {
                    quote_id: quote.id.clone(),
                    company: quote.company.clone(),
                    sentiment: quote.sentiment,
                    excerpt: truncate_excerpt(&quote.text, config.max_excerpt_chars),
                });
            }
        }
    }

    let mut banned_phrases = config.banned_phrases.clone();
    banned_phrases.extend(config.jargon.iter().cloned());

    EvidenceBundle {
        theme_id: theme_id.to_string(),
        category: candidate.category,
        polarity: candidate.polarity,
        criteria: candidate.criteria.iter().cloned().collect(),
        company_count: candidate.companies.len(),
        quotes,
        finding_summaries: candidate.findings.iter().map(|f| f.statement.clone()).collect(),
        constraints: NarrativeConstraints {
            required_sentences: config.required_sentences,
            min_words: config.min_words,
            max_words: config.max_words,
            banned_phrases,
            temperature: config.temperature,
        },
        attempt: 1,
        previous_violations: Vec::new(),
    }
}

/// At most `max_chars` characters, cut on a word boundary where one exists.
pub fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let head: String = text.chars().take(keep).collect();
    let cut = match head.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => head[..pos].trim_end(),
        _ => head.as_str(),
    };
    format!("{cut}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::config::ThemeConfig;
    use test_fixtures::{FindingBuilder, QuoteBuilder};

    use crate::grouping::group_findings;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_excerpt("  Pricing doubled. ", 40), "Pricing doubled.");
    }

    #[test]
    fn long_text_is_cut_on_a_word_boundary() {
        let excerpt = truncate_excerpt("Renewal pricing doubled without any warning", 20);
        assert_eq!(excerpt, "Renewal pricing…");
        assert!(excerpt.chars().count() <= 20);
    }

    #[test]
    fn unbroken_text_is_cut_mid_word() {
        let excerpt = truncate_excerpt("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(excerpt.chars().count(), 10);
        assert!(excerpt.ends_with(ELLIPSIS));
    }

    #[test]
    fn bundle_respects_quote_limit_and_spreads_findings() {
        let quotes: Vec<_> = ["a1", "a2", "b1", "b2", "c1", "c2"]
            .iter()
            .map(|id| QuoteBuilder::new(id).build())
            .collect();
        let index = QuoteIndex::build(quotes).unwrap();
        let findings = vec![
            FindingBuilder::new("fa").company("Acme").quotes(&["a1", "a2"]).build(),
            FindingBuilder::new("fb").company("Globex").quotes(&["b1", "b2"]).build(),
            FindingBuilder::new("fc").company("Initech").quotes(&["c1", "c2"]).build(),
        ];
        let candidates = group_findings(&findings, &ThemeConfig::default(), 2);
        let config = NarrativeConfig {
            max_bundle_quotes: 4,
            ..Default::default()
        };
        let bundle = build_bundle("t1", &candidates[0], &index, &config);
        let ids: Vec<&str> = bundle.quotes.iter().map(|q| q.quote_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b1", "c1", "a2"]);
        assert_eq!(bundle.finding_summaries.len(), 3);
        assert_eq!(bundle.company_count, 3);
        assert!(bundle.constraints.banned_phrases.iter().any(|p| p == "synergy"));
    }
}
