//! Gate 2: enough supporting quotes.

use insight_core::models::{AppliedThresholds, GateKind, GateResult};

use crate::evidence::GateEvidence;

pub fn evaluate(evidence: &GateEvidence, thresholds: &AppliedThresholds) -> GateResult {
    super::at_least(
        GateKind::EvidenceSignificance,
        evidence.quote_count as f64,
        thresholds.min_quotes as f64,
    )
}
