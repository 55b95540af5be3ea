use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompetitiveSignal, FindingCategory, GateRecord, GenerationId, Polarity, Verdict};

/// Strength of the cross-company evidence behind a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    Emerging,
    Medium,
    High,
}

/// Why a theme is waiting for a new statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationReason {
    /// Every generated statement violated the structural contract.
    ValidationFailed,
    /// The generation service kept failing.
    ServiceUnavailable,
    /// The run was cancelled before this theme was generated.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ThemeStatus {
    Published,
    /// Failed a quality gate and was not overridden. Kept for review.
    RejectedByGate,
    NeedsRegeneration { reason: RegenerationReason },
    /// Merged into `successor` during consolidation.
    Superseded { successor: String },
}

/// A cross-company, quality-gated executive narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub generation: GenerationId,
    /// `None` until a valid statement has been generated.
    pub statement: Option<String>,
    pub category: FindingCategory,
    pub polarity: Polarity,
    pub criteria: BTreeSet<String>,
    pub strength: StrengthTier,
    pub companies: BTreeSet<String>,
    pub finding_ids: BTreeSet<String>,
    pub quote_ids: BTreeSet<String>,
    pub competitive: bool,
    pub competitive_signal: Option<CompetitiveSignal>,
    /// 0–10 weighted blend.
    pub quality_score: f64,
    pub gate_record: GateRecord,
    pub verdict: Verdict,
    pub status: ThemeStatus,
    pub generation_attempts: u32,
    /// Themes this one replaced during consolidation.
    pub supersedes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Theme {
    pub fn is_published(&self) -> bool {
        self.status == ThemeStatus::Published
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self.status, ThemeStatus::Superseded { .. })
    }

    pub fn is_pending_regeneration(&self) -> bool {
        matches!(self.status, ThemeStatus::NeedsRegeneration { .. })
    }

    /// Mark as merged into `successor`. The record is kept for audit.
    pub fn superseded_by(mut self, successor: &str) -> Self {
        self.status = ThemeStatus::Superseded {
            successor: successor.to_string(),
        };
        self
    }

    /// Attach a competitive signal; only a primary signal sets the flag.
    pub fn with_competitive_signal(mut self, signal: Option<CompetitiveSignal>) -> Self {
        self.competitive = signal.as_ref().is_some_and(|s| s.is_primary);
        self.competitive_signal = signal;
        self
    }
}
