use serde::{Deserialize, Serialize};

/// The four sequential quality gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    CrossCompany,
    EvidenceSignificance,
    ImpactThreshold,
    NarrativeCoherence,
}

impl GateKind {
    pub const ALL: [GateKind; 4] = [
        GateKind::CrossCompany,
        GateKind::EvidenceSignificance,
        GateKind::ImpactThreshold,
        GateKind::NarrativeCoherence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrossCompany => "cross_company",
            Self::EvidenceSignificance => "evidence_significance",
            Self::ImpactThreshold => "impact_threshold",
            Self::NarrativeCoherence => "narrative_coherence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    Passed,
    Failed,
    /// The gate does not apply (mixed-signal coherence). Not a failure.
    Exempt,
}

/// One gate verdict, always with the number that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub gate: GateKind,
    pub outcome: GateOutcome,
    pub measured: f64,
    pub threshold: f64,
}

impl GateResult {
    pub fn passed(&self) -> bool {
        self.outcome != GateOutcome::Failed
    }
}

/// A threshold relaxed or tightened for this corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdAdjustment {
    pub gate: GateKind,
    pub configured: f64,
    pub applied: f64,
    pub reason: String,
}

/// The thresholds actually in force, and how they differ from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedThresholds {
    pub min_companies: usize,
    pub min_quotes: usize,
    pub min_impact: f64,
    pub coherence: f64,
    pub adjustments: Vec<ThresholdAdjustment>,
}

impl AppliedThresholds {
    /// Whether the evidentiary bar differs from configuration.
    pub fn is_adjusted(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Full gate audit for one Finding or Theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    pub subject_id: String,
    pub results: Vec<GateResult>,
    pub thresholds: AppliedThresholds,
    pub passed: bool,
}

impl GateRecord {
    pub fn result(&self, gate: GateKind) -> Option<&GateResult> {
        self.results.iter().find(|r| r.gate == gate)
    }

    pub fn failed_gates(&self) -> Vec<GateKind> {
        self.results
            .iter()
            .filter(|r| !r.passed())
            .map(|r| r.gate)
            .collect()
    }
}
