use serde::{Deserialize, Serialize};

use super::defaults;

/// Pattern clusterer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Minimum TF-IDF cosine similarity for two quotes to be DBSCAN neighbours.
    pub min_similarity: f64,
    /// Minimum number of quotes in a dense region.
    pub min_cluster_size: usize,
    /// Re-run clustering ignoring the subject partition.
    pub cross_criteria: bool,
    /// A cross-criteria cluster must span at least this many primary criteria.
    pub min_cross_criteria_span: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
            min_cluster_size: defaults::DEFAULT_MIN_CLUSTER_SIZE,
            cross_criteria: defaults::DEFAULT_CROSS_CRITERIA,
            min_cross_criteria_span: defaults::DEFAULT_MIN_CROSS_CRITERIA_SPAN,
        }
    }
}
