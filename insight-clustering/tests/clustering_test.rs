//! Clustering over the shared corpora, plus partition properties.

use std::collections::HashSet;

use insight_clustering::PatternClusterer;
use insight_core::config::ClusteringConfig;
use insight_core::models::ClusterMode;
use insight_core::{QuoteIndex, Sentiment};
use proptest::prelude::*;
use test_fixtures::{load_corpus, QuoteBuilder};

fn cluster_corpus(name: &str) -> (QuoteIndex, insight_clustering::ClusteringOutcome) {
    let index = QuoteIndex::build(load_corpus(name)).unwrap();
    let outcome = PatternClusterer::new(ClusteringConfig::default()).cluster(&index);
    (index, outcome)
}

#[test]
fn mixed_corpus_yields_one_cluster_per_subject() {
    let (_, outcome) = cluster_corpus("mixed_corpus");
    let mut subjects: Vec<(String, Sentiment, usize)> = outcome
        .clusters
        .iter()
        .filter(|c| c.mode == ClusterMode::BySubject)
        .map(|c| (c.subject.clone().unwrap(), c.sentiment, c.len()))
        .collect();
    subjects.sort();
    assert_eq!(
        subjects,
        vec![
            ("integration".to_string(), Sentiment::Negative, 3),
            ("onboarding".to_string(), Sentiment::Positive, 2),
            ("pricing".to_string(), Sentiment::Negative, 3),
            ("support".to_string(), Sentiment::Negative, 3),
        ]
    );
    // Lone neutral quote is noise; the irrelevant quote is not even considered.
    assert_eq!(outcome.noise, vec!["q-012"]);
    assert_eq!(outcome.cross_criteria_count(), 0);
}

#[test]
fn irrelevant_quotes_never_reach_a_cluster() {
    let (_, outcome) = cluster_corpus("mixed_corpus");
    assert!(outcome
        .clusters
        .iter()
        .all(|c| !c.quote_ids.iter().any(|id| id == "q-013")));
    assert!(!outcome.noise.iter().any(|id| id == "q-013"));
}

#[test]
fn clusters_are_sorted_by_key() {
    let (_, outcome) = cluster_corpus("mixed_corpus");
    let keys: Vec<_> = outcome.clusters.iter().map(|c| c.key.clone()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

fn sentiment_strategy() -> impl Strategy<Value = Sentiment> {
    prop_oneof![
        Just(Sentiment::Positive),
        Just(Sentiment::Negative),
        Just(Sentiment::Neutral),
        Just(Sentiment::Mixed),
    ]
}

const WORDS: &[&str] = &[
    "pricing", "renewal", "support", "tickets", "escalation", "integration", "salesforce",
    "onboarding", "contract", "finance", "upgrade", "sync",
];

proptest! {
    #[test]
    fn subject_clusters_are_homogeneous_and_disjoint(
        quotes in prop::collection::vec(
            (
                prop::sample::select(vec!["pricing", "support", "integration"]),
                sentiment_strategy(),
                0u8..=5,
                prop::collection::vec(prop::sample::select(WORDS.to_vec()), 2..6),
            ),
            0..24,
        )
    ) {
        let quotes: Vec<_> = quotes
            .into_iter()
            .enumerate()
            .map(|(i, (criterion, sentiment, relevance, words))| {
                QuoteBuilder::new(&format!("q{i:02}"))
                    .criterion(criterion)
                    .sentiment(sentiment)
                    .relevance(relevance)
                    .text(&words.join(" "))
                    .build()
            })
            .collect();
        let index = QuoteIndex::build(quotes).unwrap();
        let outcome = PatternClusterer::new(ClusteringConfig::default()).cluster(&index);

        let mut seen = HashSet::new();
        for cluster in outcome.clusters.iter().filter(|c| c.mode == ClusterMode::BySubject) {
            prop_assert!(cluster.len() >= 2);
            for quote in index.resolve(&cluster.quote_ids) {
                prop_assert!(quote.is_relevant());
                prop_assert_eq!(quote.sentiment, cluster.sentiment);
                prop_assert_eq!(Some(quote.subject_key()), cluster.subject.as_deref());
                prop_assert!(seen.insert(quote.id.clone()));
            }
        }
        for cluster in outcome.clusters.iter().filter(|c| c.is_cross_criteria()) {
            let criteria: HashSet<_> = index
                .resolve(&cluster.quote_ids)
                .into_iter()
                .map(|q| q.criterion.clone())
                .collect();
            prop_assert!(criteria.len() >= 2);
        }
    }
}
