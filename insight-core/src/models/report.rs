use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    AnalysisScope, ClusterKey, Finding, GenerationId, Rejection, Theme, ThresholdAdjustment,
};

/// Audit entry for one theme consolidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRecord {
    pub successor: String,
    pub superseded: Vec<String>,
    /// Highest pairwise statement similarity inside the merged group.
    pub similarity: f64,
}

/// Clusters that already produced a valid finding in this generation.
/// Passing it back into a run skips their synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCheckpoint {
    pub generation: GenerationId,
    pub completed: BTreeMap<ClusterKey, Finding>,
}

impl RunCheckpoint {
    pub fn new(generation: GenerationId) -> Self {
        Self {
            generation,
            completed: BTreeMap::new(),
        }
    }
}

/// Counts a human reads after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub generation: GenerationId,
    pub scope: AnalysisScope,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub quotes_considered: usize,
    pub clusters: usize,
    pub cross_criteria_clusters: usize,
    pub noise_quotes: usize,
    pub findings_created: usize,
    pub findings_resumed: usize,
    pub findings_insufficient_evidence: usize,
    pub findings_rejected_by_gate: usize,
    pub findings_promoted_by_override: usize,
    pub themes_created: usize,
    pub themes_published: usize,
    pub themes_rejected_by_gate: usize,
    pub themes_promoted_by_override: usize,
    pub themes_merged: usize,
    pub themes_pending_regeneration: usize,
    pub published_theme_ids: Vec<String>,
    pub pending_theme_ids: Vec<String>,
    pub threshold_adjustments: Vec<ThresholdAdjustment>,
    pub cancelled: bool,
}

impl RunReport {
    pub fn new(generation: GenerationId, scope: AnalysisScope, started_at: DateTime<Utc>) -> Self {
        Self {
            generation,
            scope,
            started_at,
            finished_at: started_at,
            quotes_considered: 0,
            clusters: 0,
            cross_criteria_clusters: 0,
            noise_quotes: 0,
            findings_created: 0,
            findings_resumed: 0,
            findings_insufficient_evidence: 0,
            findings_rejected_by_gate: 0,
            findings_promoted_by_override: 0,
            themes_created: 0,
            themes_published: 0,
            themes_rejected_by_gate: 0,
            themes_promoted_by_override: 0,
            themes_merged: 0,
            themes_pending_regeneration: 0,
            published_theme_ids: Vec::new(),
            pending_theme_ids: Vec::new(),
            threshold_adjustments: Vec::new(),
            cancelled: false,
        }
    }

    /// Some themes are waiting on the generator.
    pub fn is_partial(&self) -> bool {
        self.cancelled || self.themes_pending_regeneration > 0
    }
}

/// Everything a run hands to the result sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    pub report: RunReport,
    pub findings: Vec<Finding>,
    pub rejections: Vec<Rejection>,
    /// Active and superseded themes.
    pub themes: Vec<Theme>,
    pub merges: Vec<MergeRecord>,
    pub checkpoint: RunCheckpoint,
}

impl RunOutput {
    pub fn active_themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter().filter(|t| !t.is_superseded())
    }

    pub fn finding(&self, id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == id)
    }
}
