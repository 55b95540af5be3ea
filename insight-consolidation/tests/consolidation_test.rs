//! Theme consolidation scenarios and dedup properties.

use insight_consolidation::{dedup_quotes, ThemeConsolidator};
use insight_core::config::{DedupConfig, ScoringWeights, ThemeConfig};
use insight_core::models::{AppliedThresholds, GateKind, Polarity, StrengthTier, ThemeStatus};
use insight_core::{QuoteIndex, Theme};
use insight_validation::QualityGateEngine;
use proptest::prelude::*;
use test_fixtures::{load_corpus, QuoteBuilder, ThemeBuilder};

const PRICING_A: &str = "Buyers at three companies describe renewal pricing as a consistent \
                         weakness in their evaluation. \
                         Finance teams pushed back on the renewal quote.";
const PRICING_B: &str = "Buyers at four companies describe renewal pricing as a consistent \
                         weakness in their evaluation. \
                         Finance teams pushed back on the renewal quote.";
const SUPPORT: &str = "Support escalations stalled for days across accounts. \
                       Tickets bounced between queues before anyone answered.";

fn thresholds() -> AppliedThresholds {
    AppliedThresholds {
        min_companies: 2,
        min_quotes: 3,
        min_impact: 3.0,
        coherence: 0.7,
        adjustments: Vec::new(),
    }
}

fn theme(id: &str, statement: &str, quotes: &[&str], companies: &[&str], quality: f64) -> Theme {
    ThemeBuilder::new(id)
        .statement(statement)
        .quotes(quotes)
        .companies(companies)
        .quality(quality)
        .build()
}

fn fixtures() -> (QuoteIndex, QualityGateEngine, ScoringWeights, ThemeConfig, DedupConfig) {
    (
        QuoteIndex::build(load_corpus("mixed_corpus")).unwrap(),
        QualityGateEngine::new(thresholds()),
        ScoringWeights::default(),
        ThemeConfig::default(),
        DedupConfig::default(),
    )
}

#[test]
fn near_identical_themes_merge_into_one_active_theme() {
    let (index, gates, scoring, config, dedup) = fixtures();
    let consolidator = ThemeConsolidator::new(&index, &gates, &scoring, &config, &dedup);
    let themes = vec![
        theme("t-a", PRICING_A, &["q-001", "q-002"], &["Acme", "Globex"], 6.0),
        theme("t-b", PRICING_B, &["q-003"], &["Initech"], 4.0),
        theme(
            "t-c",
            SUPPORT,
            &["q-004", "q-005", "q-006"],
            &["Acme", "Umbrella", "Initech"],
            5.0,
        ),
    ];

    let outcome = consolidator.consolidate(themes);
    assert_eq!(outcome.themes.len(), 4, "members are kept, never deleted");
    assert_eq!(outcome.merges.len(), 1);
    let merge = &outcome.merges[0];
    assert_eq!(merge.superseded, vec!["t-a", "t-b"]);
    assert!(merge.similarity > 0.9);

    let active: Vec<&Theme> = outcome.themes.iter().filter(|t| !t.is_superseded()).collect();
    assert_eq!(active.len(), 2);
    let successor = outcome
        .themes
        .iter()
        .find(|t| t.id == merge.successor)
        .unwrap();
    assert_eq!(successor.statement.as_deref(), Some(PRICING_A));
    assert_eq!(successor.supersedes, vec!["t-a", "t-b"]);
    assert_eq!(successor.quote_ids.len(), 3);
    assert_eq!(successor.companies.len(), 3);
    assert_eq!(successor.finding_ids.len(), 6);
    assert!(successor.gate_record.passed);
    assert!(successor.is_published());
    assert_eq!(successor.strength, StrengthTier::Medium);

    for id in ["t-a", "t-b"] {
        let member = outcome.themes.iter().find(|t| t.id == id).unwrap();
        assert_eq!(
            member.status,
            ThemeStatus::Superseded {
                successor: successor.id.clone()
            }
        );
    }
}

#[test]
fn consolidation_is_idempotent() {
    let (index, gates, scoring, config, dedup) = fixtures();
    let consolidator = ThemeConsolidator::new(&index, &gates, &scoring, &config, &dedup);
    let first = consolidator.consolidate(vec![
        theme("t-a", PRICING_A, &["q-001", "q-002"], &["Acme", "Globex"], 6.0),
        theme("t-b", PRICING_B, &["q-003"], &["Initech"], 4.0),
    ]);
    let second = consolidator.consolidate(first.themes.clone());
    assert!(second.merges.is_empty());
    assert_eq!(second.themes, first.themes);
}

#[test]
fn unpublished_themes_are_left_alone() {
    let (index, gates, scoring, config, dedup) = fixtures();
    let consolidator = ThemeConsolidator::new(&index, &gates, &scoring, &config, &dedup);
    let mut pending = theme("t-b", PRICING_B, &["q-003"], &["Initech"], 4.0);
    pending.status = ThemeStatus::RejectedByGate;
    let outcome = consolidator.consolidate(vec![
        theme("t-a", PRICING_A, &["q-001", "q-002"], &["Acme", "Globex"], 6.0),
        pending,
    ]);
    assert!(outcome.merges.is_empty());
    assert_eq!(outcome.themes.len(), 2);
}

#[test]
fn opposite_polarities_never_merge() {
    let (index, gates, scoring, config, dedup) = fixtures();
    let consolidator = ThemeConsolidator::new(&index, &gates, &scoring, &config, &dedup);
    let mut strength = theme("t-b", PRICING_B, &["q-003"], &["Initech"], 4.0);
    strength.polarity = Polarity::Strength;
    let outcome = consolidator.consolidate(vec![
        theme("t-a", PRICING_A, &["q-001", "q-002"], &["Acme", "Globex"], 6.0),
        strength,
    ]);
    assert!(outcome.merges.is_empty());
}

#[test]
fn merged_evidence_counts_near_duplicate_quotes_once() {
    let mut quotes = load_corpus("mixed_corpus");
    let copy = QuoteBuilder::new("q-dup")
        .company("Hooli")
        .relevance(2)
        .text(&quotes[0].text)
        .build();
    quotes.push(copy);
    let index = QuoteIndex::build(quotes).unwrap();
    let (_, gates, scoring, config, dedup) = fixtures();
    let consolidator = ThemeConsolidator::new(&index, &gates, &scoring, &config, &dedup);

    let outcome = consolidator.consolidate(vec![
        theme("t-a", PRICING_A, &["q-001", "q-002"], &["Acme", "Globex"], 6.0),
        theme("t-b", PRICING_B, &["q-003", "q-dup"], &["Initech", "Hooli"], 4.0),
    ]);
    assert_eq!(outcome.merges.len(), 1);
    let successor = outcome
        .themes
        .iter()
        .find(|t| t.id == outcome.merges[0].successor)
        .unwrap();
    let quote_ids: Vec<&str> = successor.quote_ids.iter().map(String::as_str).collect();
    assert_eq!(quote_ids, vec!["q-001", "q-002", "q-003"]);
    let companies: Vec<&str> = successor.companies.iter().map(String::as_str).collect();
    assert_eq!(companies, vec!["Acme", "Globex", "Initech"]);
    let significance = successor
        .gate_record
        .result(GateKind::EvidenceSignificance)
        .unwrap();
    assert_eq!(significance.measured, 3.0);
}

const WORDS: &[&str] = &["renewal", "pricing", "doubled", "finance", "quote", "support", "tickets"];

proptest! {
    #[test]
    fn quote_dedup_is_idempotent(
        texts in prop::collection::vec(
            (prop::collection::vec(prop::sample::select(WORDS.to_vec()), 1..5), 1u8..=5),
            0..12,
        ),
        threshold in 0.3f64..0.95,
    ) {
        let quotes: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, (words, relevance))| {
                QuoteBuilder::new(&format!("q{i:02}"))
                    .text(&words.join(" "))
                    .relevance(*relevance)
                    .build()
            })
            .collect();
        let refs: Vec<_> = quotes.iter().collect();
        let once = dedup_quotes(&refs, "pricing", threshold);
        let twice = dedup_quotes(&once, "pricing", threshold);
        let ids = |qs: &[&insight_core::Quote]| {
            qs.iter().map(|q| q.id.clone()).collect::<Vec<_>>()
        };
        prop_assert_eq!(ids(&once[..]), ids(&twice[..]));
        prop_assert!(!refs.is_empty() || once.is_empty());
        prop_assert!(refs.is_empty() || !once.is_empty());
    }
}
