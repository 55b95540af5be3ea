use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gate verdict as persisted. A manual promotion is distinguishable from a
/// plain pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Not yet evaluated.
    Pending,
    Passed,
    RejectedByGate,
    PromotedByOverride {
        reviewer: String,
        reason: String,
        promoted_at: DateTime<Utc>,
    },
}

impl Verdict {
    /// Whether the record proceeds downstream.
    pub fn admits(&self) -> bool {
        matches!(self, Self::Passed | Self::PromotedByOverride { .. })
    }
}

/// A reviewer's decision to promote a gate-rejected Finding or Theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOverride {
    pub target_id: String,
    pub reviewer: String,
    pub reason: String,
}

/// Overrides supplied to a run, keyed by target id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewOverrides {
    by_target: HashMap<String, ReviewOverride>,
}

impl ReviewOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, review: ReviewOverride) {
        self.by_target.insert(review.target_id.clone(), review);
    }

    pub fn get(&self, target_id: &str) -> Option<&ReviewOverride> {
        self.by_target.get(target_id)
    }

    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

impl FromIterator<ReviewOverride> for ReviewOverrides {
    fn from_iter<I: IntoIterator<Item = ReviewOverride>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for review in iter {
            overrides.insert(review);
        }
        overrides
    }
}
