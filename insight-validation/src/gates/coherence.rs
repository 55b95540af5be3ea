//! Gate 4: supporting quotes agree with the narrative's polarity.
//!
//! Mixed signals are exempt. The measured share is still recorded.

use insight_core::models::{AppliedThresholds, GateKind, GateOutcome, GateResult};

use crate::evidence::GateEvidence;

pub fn evaluate(evidence: &GateEvidence, thresholds: &AppliedThresholds) -> GateResult {
    let measured = evidence.coherence();
    if evidence.polarity.expected_sentiment().is_none() {
        return GateResult {
            gate: GateKind::NarrativeCoherence,
            outcome: GateOutcome::Exempt,
            measured,
            threshold: thresholds.coherence,
        };
    }
    super::at_least(GateKind::NarrativeCoherence, measured, thresholds.coherence)
}
