//! The four gates. Each measures one quantity against one threshold.

pub mod coherence;
pub mod cross_company;
pub mod evidence_significance;
pub mod impact;

use insight_core::models::{AppliedThresholds, GateKind, GateOutcome, GateResult};

use crate::evidence::GateEvidence;

/// Evaluate one gate.
pub fn evaluate(
    gate: GateKind,
    evidence: &GateEvidence,
    thresholds: &AppliedThresholds,
) -> GateResult {
    match gate {
        GateKind::CrossCompany => cross_company::evaluate(evidence, thresholds),
        GateKind::EvidenceSignificance => evidence_significance::evaluate(evidence, thresholds),
        GateKind::ImpactThreshold => impact::evaluate(evidence, thresholds),
        GateKind::NarrativeCoherence => coherence::evaluate(evidence, thresholds),
    }
}

pub(crate) fn at_least(gate: GateKind, measured: f64, threshold: f64) -> GateResult {
    GateResult {
        gate,
        outcome: if measured >= threshold {
            GateOutcome::Passed
        } else {
            GateOutcome::Failed
        },
        measured,
        threshold,
    }
}
