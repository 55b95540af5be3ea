//! PatternClusterer: partition → TF-IDF → DBSCAN → candidate clusters.

use std::collections::{BTreeSet, HashSet};

use insight_core::config::ClusteringConfig;
use insight_core::ids::content_id;
use insight_core::models::{CandidateCluster, ClusterKey, ClusterMode, Quote};
use insight_core::QuoteIndex;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::algorithms::dbscan::{dbscan, DbscanParams};
use crate::algorithms::similarity::{mean_pairwise, similarity_matrix};
use crate::algorithms::tfidf::TfIdfModel;
use crate::partition::{self, PartitionKey};

/// Result of clustering one corpus.
#[derive(Debug, Clone, Default)]
pub struct ClusteringOutcome {
    /// Sorted by cluster key.
    pub clusters: Vec<CandidateCluster>,
    /// Quote ids left as noise by the subject pass.
    pub noise: Vec<String>,
}

impl ClusteringOutcome {
    pub fn cross_criteria_count(&self) -> usize {
        self.clusters.iter().filter(|c| c.is_cross_criteria()).count()
    }
}

/// Groups quotes into candidate patterns.
#[derive(Debug, Clone)]
pub struct PatternClusterer {
    config: ClusteringConfig,
}

impl PatternClusterer {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster every relevant quote in the index.
    pub fn cluster(&self, index: &QuoteIndex) -> ClusteringOutcome {
        let by_subject = partition::by_subject_and_sentiment(index.iter());
        let results: Vec<(Vec<CandidateCluster>, Vec<String>)> = by_subject
            .par_iter()
            .map(|(key, quotes)| self.cluster_partition(ClusterMode::BySubject, key, quotes))
            .collect();

        let mut clusters = Vec::new();
        let mut noise = Vec::new();
        for (partition_clusters, partition_noise) in results {
            clusters.extend(partition_clusters);
            noise.extend(partition_noise);
        }

        if self.config.cross_criteria {
            let seen: HashSet<Vec<String>> =
                clusters.iter().map(|c| c.quote_ids.clone()).collect();
            let by_sentiment = partition::by_sentiment(index.iter());
            let cross: Vec<CandidateCluster> = by_sentiment
                .par_iter()
                .flat_map_iter(|(key, quotes)| {
                    self.cluster_partition(ClusterMode::CrossCriteria, key, quotes)
                        .0
                        .into_iter()
                        .filter(|c| self.spans_criteria(index, c))
                })
                .collect();
            let before = clusters.len();
            clusters.extend(cross.into_iter().filter(|c| !seen.contains(&c.quote_ids)));
            debug!(
                cross_criteria = clusters.len() - before,
                "cross-criteria pass complete"
            );
        }

        clusters.sort_by(|a, b| a.key.cmp(&b.key));
        noise.sort();
        info!(
            clusters = clusters.len(),
            noise = noise.len(),
            "pattern clustering complete"
        );
        ClusteringOutcome { clusters, noise }
    }

    fn cluster_partition(
        &self,
        mode: ClusterMode,
        key: &PartitionKey,
        quotes: &[&Quote],
    ) -> (Vec<CandidateCluster>, Vec<String>) {
        if quotes.len() < self.config.min_cluster_size {
            debug!(
                subject = ?key.subject,
                sentiment = key.sentiment.as_str(),
                size = quotes.len(),
                "partition below minimum cluster size"
            );
            return (Vec::new(), quotes.iter().map(|q| q.id.clone()).collect());
        }

        let texts: Vec<&str> = quotes.iter().map(|q| q.text.as_str()).collect();
        let vectors = TfIdfModel::fit_transform(&texts);
        let matrix = similarity_matrix(&vectors);
        let result = dbscan(
            &matrix,
            DbscanParams {
                min_similarity: self.config.min_similarity,
                min_points: self.config.min_cluster_size,
            },
        );

        let clusters = result
            .clusters
            .iter()
            .map(|members| {
                let mut quote_ids: Vec<String> =
                    members.iter().map(|&i| quotes[i].id.clone()).collect();
                quote_ids.sort();
                CandidateCluster {
                    key: cluster_key(mode, key, &quote_ids),
                    mode,
                    subject: key.subject.clone(),
                    sentiment: key.sentiment,
                    cohesion: mean_pairwise(&matrix, members),
                    quote_ids,
                }
            })
            .collect();
        let noise = result.noise.iter().map(|&i| quotes[i].id.clone()).collect();
        (clusters, noise)
    }

    fn spans_criteria(&self, index: &QuoteIndex, cluster: &CandidateCluster) -> bool {
        let criteria: BTreeSet<&str> = index
            .resolve(&cluster.quote_ids)
            .into_iter()
            .map(|q| q.criterion.as_str())
            .collect();
        criteria.len() >= self.config.min_cross_criteria_span
    }
}

/// Content-derived key: same mode, partition and members give the same key.
pub fn cluster_key(
    mode: ClusterMode,
    partition: &PartitionKey,
    quote_ids: &[String],
) -> ClusterKey {
    let mode_tag = match mode {
        ClusterMode::BySubject => "subject",
        ClusterMode::CrossCriteria => "cross",
    };
    let header = [
        mode_tag,
        partition.subject.as_deref().unwrap_or("*"),
        partition.sentiment.as_str(),
    ];
    let parts = header.into_iter().chain(quote_ids.iter().map(String::as_str));
    ClusterKey::new(content_id("cl", parts))
}
