//! Subject/sentiment partitioning. Relevance-0 quotes never enter a partition.

use std::collections::BTreeMap;

use insight_core::models::{Quote, Sentiment};

/// Identity of one clustering partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey {
    /// `None` when the subject partition is ignored (cross-criteria pass).
    pub subject: Option<String>,
    pub sentiment: Sentiment,
}

/// Partition by subject, then sentiment. Quotes inside a partition keep id order.
pub fn by_subject_and_sentiment<'a>(
    quotes: impl IntoIterator<Item = &'a Quote>,
) -> BTreeMap<PartitionKey, Vec<&'a Quote>> {
    group(quotes, |q| PartitionKey {
        subject: Some(q.subject_key().to_string()),
        sentiment: q.sentiment,
    })
}

/// Partition by sentiment only.
pub fn by_sentiment<'a>(
    quotes: impl IntoIterator<Item = &'a Quote>,
) -> BTreeMap<PartitionKey, Vec<&'a Quote>> {
    group(quotes, |q| PartitionKey {
        subject: None,
        sentiment: q.sentiment,
    })
}

fn group<'a>(
    quotes: impl IntoIterator<Item = &'a Quote>,
    key: impl Fn(&Quote) -> PartitionKey,
) -> BTreeMap<PartitionKey, Vec<&'a Quote>> {
    let mut partitions: BTreeMap<PartitionKey, Vec<&'a Quote>> = BTreeMap::new();
    for quote in quotes.into_iter().filter(|q| q.is_relevant()) {
        partitions.entry(key(quote)).or_default().push(quote);
    }
    partitions
}
