//! Verdicts from gate records and reviewer overrides.

use chrono::Utc;
use insight_core::models::{GateRecord, ReviewOverride, Verdict};
use tracing::{debug, info};

/// A passing record is `Passed`. A failing record is promoted when a
/// reviewer override targets it, otherwise `RejectedByGate`.
pub fn resolve_verdict(record: &GateRecord, review: Option<&ReviewOverride>) -> Verdict {
    if record.passed {
        if review.is_some() {
            debug!(subject = %record.subject_id, "override ignored: record already passes");
        }
        return Verdict::Passed;
    }
    match review {
        Some(review) => {
            info!(
                subject = %record.subject_id,
                reviewer = %review.reviewer,
                failed = ?record.failed_gates(),
                "gate rejection overridden by reviewer"
            );
            Verdict::PromotedByOverride {
                reviewer: review.reviewer.clone(),
                reason: review.reason.clone(),
                promoted_at: Utc::now(),
            }
        }
        None => Verdict::RejectedByGate,
    }
}

#[cfg(test)]
mod tests {
    use insight_core::models::AppliedThresholds;

    use super::*;

    fn record(passed: bool) -> GateRecord {
        GateRecord {
            subject_id: "f1".into(),
            results: Vec::new(),
            thresholds: AppliedThresholds {
                min_companies: 2,
                min_quotes: 3,
                min_impact: 3.0,
                coherence: 0.7,
                adjustments: Vec::new(),
            },
            passed,
        }
    }

    fn review() -> ReviewOverride {
        ReviewOverride {
            target_id: "f1".into(),
            reviewer: "analyst@example.com".into(),
            reason: "strategic account".into(),
        }
    }

    #[test]
    fn failing_record_without_override_is_rejected() {
        assert_eq!(resolve_verdict(&record(false), None), Verdict::RejectedByGate);
    }

    #[test]
    fn override_promotes_failing_record() {
        let verdict = resolve_verdict(&record(false), Some(&review()));
        assert!(matches!(
            verdict,
            Verdict::PromotedByOverride { ref reviewer, .. } if reviewer == "analyst@example.com"
        ));
        assert!(verdict.admits());
    }

    #[test]
    fn override_on_passing_record_stays_passed() {
        assert_eq!(resolve_verdict(&record(true), Some(&review())), Verdict::Passed);
    }
}
