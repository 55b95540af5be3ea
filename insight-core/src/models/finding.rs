use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClusterKey, CompetitiveSignal, GateRecord, GenerationId, Sentiment, Verdict};

/// What kind of decision factor a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    Barrier,
    Opportunity,
    Strategic,
    Functional,
    Competitive,
}

impl FindingCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Barrier => "barrier",
            Self::Opportunity => "opportunity",
            Self::Strategic => "strategic",
            Self::Functional => "functional",
            Self::Competitive => "competitive",
        }
    }
}

/// Narrative orientation of a finding or theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Strength,
    Weakness,
    MixedSignal,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Weakness => "weakness",
            Self::MixedSignal => "mixed_signal",
        }
    }

    /// Polarity of a cluster whose quotes carry `sentiment`.
    pub fn from_sentiment(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => Self::Strength,
            Sentiment::Negative => Self::Weakness,
            Sentiment::Mixed | Sentiment::Neutral => Self::MixedSignal,
        }
    }

    /// Sentiment a supporting quote must carry to count as coherent.
    /// `None` for mixed signals, which are exempt from the coherence gate.
    pub fn expected_sentiment(self) -> Option<Sentiment> {
        match self {
            Self::Strength => Some(Sentiment::Positive),
            Self::Weakness => Some(Sentiment::Negative),
            Self::MixedSignal => None,
        }
    }
}

/// Priority tier assigned from confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Low,
    Standard,
    Priority,
}

impl PriorityTier {
    pub fn from_confidence(confidence: f64, priority: f64, standard: f64) -> Self {
        if confidence >= priority {
            Self::Priority
        } else if confidence >= standard {
            Self::Standard
        } else {
            Self::Low
        }
    }
}

/// A synthesized, evidence-backed statement about one criterion.
///
/// Write-once: the `with_*` builders consume the value and are only used
/// before the finding leaves the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub generation: GenerationId,
    pub cluster_key: ClusterKey,
    pub criterion: String,
    pub category: FindingCategory,
    pub polarity: Polarity,
    pub quote_ids: BTreeSet<String>,
    pub companies: BTreeSet<String>,
    pub representative_quote_ids: Vec<String>,
    /// 0–10, from cluster size and company diversity.
    pub evidence_strength: f64,
    /// 0–10, weighted-sum confidence model.
    pub confidence: f64,
    /// Mean per-quote impact on the 1–5 scale.
    pub mean_impact: f64,
    pub priority: PriorityTier,
    pub statement: String,
    pub cross_criteria: bool,
    pub competitive: Option<CompetitiveSignal>,
    pub gate_record: Option<GateRecord>,
    pub verdict: Verdict,
    pub created_at: DateTime<Utc>,
    pub superseded_by: Option<String>,
}

impl Finding {
    pub fn with_gate_record(mut self, record: GateRecord) -> Self {
        self.gate_record = Some(record);
        self
    }

    pub fn with_verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = verdict;
        self
    }

    /// Attach a competitive signal; a primary signal re-categorizes the finding.
    pub fn with_competitive_signal(mut self, signal: Option<CompetitiveSignal>) -> Self {
        if signal.as_ref().is_some_and(|s| s.is_primary) {
            self.category = FindingCategory::Competitive;
        }
        self.competitive = signal;
        self
    }

    /// Whether the finding may feed theme synthesis.
    pub fn is_validated(&self) -> bool {
        self.verdict.admits()
    }
}

/// Why a cluster produced no finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    TooFewQuotes,
    TooFewCompanies,
    LowConfidence,
    LowPriority,
}

/// An insufficient-evidence outcome. Not an error; reported for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub cluster_key: ClusterKey,
    pub reason: RejectionReason,
    pub measured: f64,
    pub threshold: f64,
}
