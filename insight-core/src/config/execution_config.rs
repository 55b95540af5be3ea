use serde::{Deserialize, Serialize};

use super::defaults;

/// Worker pool sizing for the batch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Threads used for per-cluster finding synthesis.
    pub workers: usize,
    /// Clusters synthesized between cancellation checks.
    pub finding_batch_size: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            workers: defaults::DEFAULT_WORKERS,
            finding_batch_size: defaults::DEFAULT_FINDING_BATCH_SIZE,
        }
    }
}
