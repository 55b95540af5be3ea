//! Gate 3: mean quote impact clears the bar.

use insight_core::models::{AppliedThresholds, GateKind, GateResult};

use crate::evidence::GateEvidence;

pub fn evaluate(evidence: &GateEvidence, thresholds: &AppliedThresholds) -> GateResult {
    super::at_least(GateKind::ImpactThreshold, evidence.mean_impact, thresholds.min_impact)
}
