use criterion::{criterion_group, criterion_main, Criterion};
use insight_clustering::PatternClusterer;
use insight_core::config::ClusteringConfig;
use insight_core::QuoteIndex;
use test_fixtures::QuoteBuilder;

const COMPANIES: &[&str] = &["Acme", "Globex", "Initech", "Umbrella", "Hooli"];
const PHRASES: &[&str] = &[
    "renewal pricing doubled",
    "support tickets sit for days",
    "salesforce integration keeps breaking",
    "onboarding took three months",
];

fn corpus(size: usize) -> QuoteIndex {
    let quotes = (0..size)
        .map(|i| {
            let phrase = PHRASES[i % PHRASES.len()];
            QuoteBuilder::new(&format!("q{i}"))
                .company(COMPANIES[i % COMPANIES.len()])
                .criterion(phrase.split(' ').next().unwrap_or("general"))
                .text(&format!("{phrase} and the team noticed it in week {}", i % 7))
                .build()
        })
        .collect();
    QuoteIndex::build(quotes).unwrap()
}

fn bench_clustering(c: &mut Criterion) {
    let clusterer = PatternClusterer::new(ClusteringConfig::default());
    let index = corpus(400);
    c.bench_function("cluster_400_quotes", |b| b.iter(|| clusterer.cluster(&index)));
}

criterion_group!(benches, bench_clustering);
criterion_main!(benches);
