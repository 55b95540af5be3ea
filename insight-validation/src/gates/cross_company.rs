//! Gate 1: the pattern recurs across independent companies.

use insight_core::models::{AppliedThresholds, GateKind, GateResult};

use crate::evidence::GateEvidence;

pub fn evaluate(evidence: &GateEvidence, thresholds: &AppliedThresholds) -> GateResult {
    super::at_least(
        GateKind::CrossCompany,
        evidence.company_count as f64,
        thresholds.min_companies as f64,
    )
}
