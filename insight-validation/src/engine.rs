//! QualityGateEngine: runs all four gates against one subject's evidence.

use insight_core::config::GateConfig;
use insight_core::models::{AppliedThresholds, CorpusProfile, GateKind, GateRecord};
use tracing::debug;

use crate::evidence::GateEvidence;
use crate::gates;
use crate::thresholds::adapt_thresholds;

/// Evaluates gates against a fixed set of applied thresholds.
///
/// Every gate is evaluated and recorded even after an earlier one fails;
/// the record passes when no non-exempt gate failed.
#[derive(Debug, Clone)]
pub struct QualityGateEngine {
    thresholds: AppliedThresholds,
}

impl QualityGateEngine {
    pub fn new(thresholds: AppliedThresholds) -> Self {
        Self { thresholds }
    }

    /// Engine whose thresholds are adapted to `profile`.
    pub fn for_corpus(config: &GateConfig, profile: &CorpusProfile) -> Self {
        Self::new(adapt_thresholds(config, profile))
    }

    pub fn thresholds(&self) -> &AppliedThresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, evidence: &GateEvidence) -> GateRecord {
        let results: Vec<_> = GateKind::ALL
            .iter()
            .map(|&gate| {
                let result = gates::evaluate(gate, evidence, &self.thresholds);
                debug!(
                    subject = %evidence.subject_id,
                    gate = gate.as_str(),
                    measured = result.measured,
                    threshold = result.threshold,
                    outcome = ?result.outcome,
                    "gate evaluated"
                );
                result
            })
            .collect();
        let passed = results.iter().all(|r| r.passed());
        GateRecord {
            subject_id: evidence.subject_id.clone(),
            results,
            thresholds: self.thresholds.clone(),
            passed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use insight_core::models::{GateOutcome, Polarity};
    use insight_core::Sentiment;

    use super::*;

    fn engine() -> QualityGateEngine {
        QualityGateEngine::new(AppliedThresholds {
            min_companies: 2,
            min_quotes: 3,
            min_impact: 3.0,
            coherence: 0.7,
            adjustments: Vec::new(),
        })
    }

    fn evidence(companies: usize, quotes: usize, impact: f64) -> GateEvidence {
        let mut sentiments = BTreeMap::new();
        sentiments.insert(Sentiment::Negative, quotes);
        GateEvidence {
            subject_id: "f1".into(),
            polarity: Polarity::Weakness,
            company_count: companies,
            quote_count: quotes,
            mean_impact: impact,
            sentiments,
        }
    }

    #[test]
    fn all_gates_pass_for_strong_evidence() {
        let record = engine().evaluate(&evidence(3, 5, 4.0));
        assert!(record.passed);
        assert_eq!(record.results.len(), 4);
        assert!(record.failed_gates().is_empty());
    }

    #[test]
    fn every_gate_is_recorded_after_a_failure() {
        let record = engine().evaluate(&evidence(1, 5, 4.0));
        assert!(!record.passed);
        assert_eq!(record.results.len(), 4);
        assert_eq!(record.failed_gates(), vec![GateKind::CrossCompany]);
        let impact = record.result(GateKind::ImpactThreshold).unwrap();
        assert_eq!(impact.outcome, GateOutcome::Passed);
        assert_eq!(impact.measured, 4.0);
    }

    #[test]
    fn exempt_coherence_does_not_block() {
        let mut e = evidence(3, 4, 4.0);
        e.polarity = Polarity::MixedSignal;
        e.sentiments.insert(Sentiment::Positive, 4);
        e.quote_count = 8;
        let record = engine().evaluate(&e);
        assert!(record.passed);
        assert_eq!(
            record.result(GateKind::NarrativeCoherence).unwrap().outcome,
            GateOutcome::Exempt
        );
    }
}
