//! Finding synthesis scenarios over fixture corpora and hand-built clusters.

use std::collections::{BTreeMap, HashSet};

use insight_clustering::PatternClusterer;
use insight_core::config::DedupConfig;
use insight_core::models::{
    CandidateCluster, ClusterKey, ClusterMode, FindingCategory, Polarity, PriorityTier,
    RejectionReason, Verdict,
};
use insight_core::traits::{CancellationToken, ICancellable};
use insight_core::{GenerationId, InsightConfig, Quote, QuoteIndex, Sentiment};
use insight_findings::FindingSynthesizer;
use proptest::prelude::*;
use test_fixtures::{load_corpus, FindingBuilder, QuoteBuilder};

fn cluster(key: &str, mode: ClusterMode, ids: &[&str]) -> CandidateCluster {
    let mut quote_ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    quote_ids.sort();
    CandidateCluster {
        key: ClusterKey::new(key),
        mode,
        subject: match mode {
            ClusterMode::BySubject => Some("pricing".to_string()),
            ClusterMode::CrossCriteria => None,
        },
        sentiment: Sentiment::Negative,
        quote_ids,
        cohesion: 0.5,
    }
}

fn quote(id: &str, company: &str, criterion: &str, text: &str) -> Quote {
    QuoteBuilder::new(id)
        .company(company)
        .criterion(criterion)
        .text(text)
        .build()
}

fn overlapping_corpus() -> QuoteIndex {
    let mut a3 = quote("a3", "Initech", "pricing", "Seat costs kept climbing every quarter");
    a3.secondary_criterion = Some("contracts".to_string());
    QuoteIndex::build(vec![
        quote("a1", "Acme", "pricing", "Renewal pricing doubled overnight for the whole team"),
        quote("a2", "Globex", "pricing", "License tiers confused our procurement review"),
        a3,
        quote("b1", "Umbrella", "contracts", "Lock-in terms scared away our legal team"),
        quote("b2", "Hooli", "contracts", "A multi-year commitment came before any discount"),
    ])
    .unwrap()
}

#[test]
fn three_companies_same_criterion_yield_one_finding() {
    let config = InsightConfig::default();
    let index = QuoteIndex::build(load_corpus("pricing_weakness")).unwrap();
    let clusters = PatternClusterer::new(config.clustering.clone()).cluster(&index);
    let outcome = FindingSynthesizer::new(&config)
        .synthesize_all(
            &clusters.clusters,
            &index,
            &GenerationId::from("gen-1"),
            &BTreeMap::new(),
            &CancellationToken::new(),
        )
        .unwrap();

    assert_eq!(outcome.findings.len(), 1);
    let finding = &outcome.findings[0];
    assert_eq!(finding.criterion, "pricing");
    assert_eq!(finding.polarity, Polarity::Weakness);
    assert_eq!(finding.category, FindingCategory::Barrier);
    assert_eq!(finding.companies.len(), 3);
    assert_eq!(finding.quote_ids.len(), 3);
    assert!(finding.confidence > 0.0);
    assert!(finding.priority >= PriorityTier::Standard);
    assert!((finding.evidence_strength - 5.5).abs() < 1e-9);
    assert!(finding.mean_impact >= 4.0);
    assert_eq!(finding.verdict, Verdict::Pending);
    assert!(finding.statement.contains("3 companies"));
    assert_eq!(finding.representative_quote_ids.len(), 3);
}

#[test]
fn single_quote_produces_no_finding() {
    let index = QuoteIndex::build(vec![QuoteBuilder::new("q1").build()]).unwrap();
    let synthesizer = FindingSynthesizer::new(&InsightConfig::default());
    let rejection = synthesizer
        .synthesize(
            &cluster("cl-one", ClusterMode::BySubject, &["q1"]),
            &index,
            &GenerationId::from("gen-1"),
            &HashSet::new(),
        )
        .unwrap_err();
    assert_eq!(rejection.reason, RejectionReason::TooFewQuotes);
    assert_eq!(rejection.measured, 1.0);
    assert_eq!(rejection.threshold, 2.0);
}

#[test]
fn low_relevance_quotes_are_not_cited() {
    let index = QuoteIndex::build(vec![
        QuoteBuilder::new("q1")
            .relevance(1)
            .text("Pricing came up once in passing")
            .build(),
        QuoteBuilder::new("q2")
            .relevance(1)
            .company("Globex")
            .text("Someone mentioned the price list")
            .build(),
    ])
    .unwrap();
    let rejection = FindingSynthesizer::new(&InsightConfig::default())
        .synthesize(
            &cluster("cl-low", ClusterMode::BySubject, &["q1", "q2"]),
            &index,
            &GenerationId::from("gen-1"),
            &HashSet::new(),
        )
        .unwrap_err();
    assert_eq!(rejection.reason, RejectionReason::TooFewQuotes);
    assert_eq!(rejection.measured, 0.0);
}

#[test]
fn reuse_cap_keeps_each_quote_in_one_finding() {
    let index = overlapping_corpus();
    let clusters = vec![
        cluster("cl-a", ClusterMode::BySubject, &["a1", "a2", "a3"]),
        cluster("cl-b", ClusterMode::CrossCriteria, &["a3", "b1", "b2"]),
    ];
    let outcome = FindingSynthesizer::new(&InsightConfig::default())
        .synthesize_all(
            &clusters,
            &index,
            &GenerationId::from("gen-1"),
            &BTreeMap::new(),
            &CancellationToken::new(),
        )
        .unwrap();

    assert_eq!(outcome.findings.len(), 2);
    let mut seen = HashSet::new();
    for finding in &outcome.findings {
        for id in &finding.quote_ids {
            assert!(seen.insert(id.clone()), "{id} cited twice");
        }
    }
    assert!(seen.contains("a3"));
    let cross = outcome.findings.iter().find(|f| f.cross_criteria).unwrap();
    assert!(!cross.quote_ids.is_empty());
}

#[test]
fn raised_reuse_cap_allows_shared_quotes() {
    let index = overlapping_corpus();
    let config = InsightConfig {
        dedup: DedupConfig {
            max_findings_per_quote: 2,
            ..Default::default()
        },
        ..Default::default()
    };
    let clusters = vec![
        cluster("cl-a", ClusterMode::BySubject, &["a1", "a2", "a3"]),
        cluster("cl-b", ClusterMode::CrossCriteria, &["a3", "b1", "b2"]),
    ];
    let outcome = FindingSynthesizer::new(&config)
        .synthesize_all(
            &clusters,
            &index,
            &GenerationId::from("gen-1"),
            &BTreeMap::new(),
            &CancellationToken::new(),
        )
        .unwrap();
    let citing_a3 = outcome
        .findings
        .iter()
        .filter(|f| f.quote_ids.contains("a3"))
        .count();
    assert_eq!(citing_a3, 2);
}

#[test]
fn checkpointed_clusters_are_not_resynthesized() {
    let config = InsightConfig::default();
    let index = QuoteIndex::build(load_corpus("pricing_weakness")).unwrap();
    let clusters = PatternClusterer::new(config.clustering.clone()).cluster(&index);
    let synthesizer = FindingSynthesizer::new(&config);
    let generation = GenerationId::from("gen-1");
    let token = CancellationToken::new();

    let first = synthesizer
        .synthesize_all(&clusters.clusters, &index, &generation, &BTreeMap::new(), &token)
        .unwrap();
    let completed: BTreeMap<_, _> = first
        .findings
        .iter()
        .map(|f| (f.cluster_key.clone(), f.clone()))
        .collect();
    let second = synthesizer
        .synthesize_all(&clusters.clusters, &index, &generation, &completed, &token)
        .unwrap();
    assert_eq!(second.resumed, 1);
    assert_eq!(second.findings, first.findings);
}

#[test]
fn rebuilt_checkpoint_findings_are_not_counted_as_resumed() {
    let index = overlapping_corpus();
    let clusters = vec![
        cluster("cl-a", ClusterMode::BySubject, &["a1", "a2", "a3"]),
        cluster("cl-b", ClusterMode::CrossCriteria, &["a3", "b1", "b2"]),
    ];
    // A weak checkpointed finding that cites a3, which the fresh cl-a
    // finding claims first.
    let mut stale = FindingBuilder::new("f-stale")
        .criterion("contracts")
        .quotes(&["a3", "b1", "b2"])
        .build();
    stale.cluster_key = ClusterKey::new("cl-b");
    stale.confidence = 0.1;
    let completed = BTreeMap::from([(stale.cluster_key.clone(), stale)]);

    let outcome = FindingSynthesizer::new(&InsightConfig::default())
        .synthesize_all(
            &clusters,
            &index,
            &GenerationId::from("gen-1"),
            &completed,
            &CancellationToken::new(),
        )
        .unwrap();

    assert_eq!(outcome.findings.len(), 2);
    assert_eq!(outcome.resumed, 0);
    let rebuilt = outcome
        .findings
        .iter()
        .find(|f| f.cluster_key.as_str() == "cl-b")
        .unwrap();
    assert_ne!(rebuilt.id, "f-stale");
    assert!(!rebuilt.quote_ids.contains("a3"));
}

#[test]
fn cancelled_pass_returns_without_synthesizing() {
    let config = InsightConfig::default();
    let index = QuoteIndex::build(load_corpus("pricing_weakness")).unwrap();
    let clusters = PatternClusterer::new(config.clustering.clone()).cluster(&index);
    let token = CancellationToken::new();
    token.cancel();
    let outcome = FindingSynthesizer::new(&config)
        .synthesize_all(
            &clusters.clusters,
            &index,
            &GenerationId::from("gen-1"),
            &BTreeMap::new(),
            &token,
        )
        .unwrap();
    assert!(outcome.cancelled);
    assert!(outcome.findings.is_empty());
}

proptest! {
    #[test]
    fn findings_always_cite_evidence(
        relevances in prop::collection::vec(0u8..=5, 1..8),
        companies in prop::collection::vec(0usize..3, 8),
    ) {
        let names = ["Acme", "Globex", "Initech"];
        let words = [
            "renewal", "seats", "invoice", "discount", "tiers", "budget", "quote", "license",
        ];
        let quotes: Vec<Quote> = relevances
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                QuoteBuilder::new(&format!("q{i}"))
                    .relevance(r)
                    .company(names[companies[i]])
                    .text(&format!("Pricing {} concern number {i}", words[i]))
                    .build()
            })
            .collect();
        let ids: Vec<String> = quotes.iter().map(|q| q.id.clone()).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let index = QuoteIndex::build(quotes).unwrap();
        let result = FindingSynthesizer::new(&InsightConfig::default()).synthesize(
            &cluster("cl-prop", ClusterMode::BySubject, &id_refs),
            &index,
            &GenerationId::from("gen-1"),
            &HashSet::new(),
        );
        if let Ok(finding) = result {
            prop_assert!(!finding.quote_ids.is_empty());
            prop_assert!(!finding.companies.is_empty());
            prop_assert!(finding
                .representative_quote_ids
                .iter()
                .all(|id| finding.quote_ids.contains(id)));
            prop_assert!(finding.confidence > 0.0 && finding.confidence <= 10.0);
        }
    }
}
