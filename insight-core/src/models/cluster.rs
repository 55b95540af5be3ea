use std::fmt;

use serde::{Deserialize, Serialize};

use super::Sentiment;

/// Stable identity of a candidate cluster, derived from its content.
/// Identical input always yields the same key, which makes re-runs resumable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterKey(String);

impl ClusterKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which clustering pass produced a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterMode {
    /// Partitioned by subject, then sentiment.
    BySubject,
    /// Partitioned by sentiment only; spans several criteria.
    CrossCriteria,
}

/// A dense region of similar quotes sharing a subject and sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCluster {
    pub key: ClusterKey,
    pub mode: ClusterMode,
    /// `None` for cross-criteria clusters.
    pub subject: Option<String>,
    pub sentiment: Sentiment,
    /// Sorted quote ids.
    pub quote_ids: Vec<String>,
    /// Mean pairwise similarity among members.
    pub cohesion: f64,
}

impl CandidateCluster {
    pub fn len(&self) -> usize {
        self.quote_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quote_ids.is_empty()
    }

    pub fn is_cross_criteria(&self) -> bool {
        self.mode == ClusterMode::CrossCriteria
    }
}
