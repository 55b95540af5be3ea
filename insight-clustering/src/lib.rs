//! # insight-clustering
//!
//! Pattern clusterer: partitions quotes by subject and sentiment, then finds
//! dense regions of similar quotes with DBSCAN over TF-IDF cosine similarity.
//! A second, optional pass ignores the subject partition to surface patterns
//! that span several criteria.
//!
//! The text algorithms here (TF-IDF, similarity, sentence splitting) are
//! shared by the rest of the workspace.

pub mod algorithms;
pub mod clusterer;
pub mod partition;

pub use clusterer::{ClusteringOutcome, PatternClusterer};
