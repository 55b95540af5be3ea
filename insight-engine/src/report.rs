//! Completion report: per-stage counts and the partial-failure summary.

use insight_clustering::ClusteringOutcome;
use insight_core::models::{MergeRecord, RunReport, Verdict};
use insight_core::{Finding, Theme};
use insight_findings::SynthesisOutcome;
use tracing::{info, warn};

pub fn record_clustering(report: &mut RunReport, quotes: usize, outcome: &ClusteringOutcome) {
    report.quotes_considered = quotes;
    report.clusters = outcome.clusters.len();
    report.cross_criteria_clusters = outcome.cross_criteria_count();
    report.noise_quotes = outcome.noise.len();
}

/// Counts over the annotated findings. `synthesis` supplies the resumed
/// count and the insufficient-evidence rejections; every other finding was
/// synthesized in this run.
pub fn record_findings(
    report: &mut RunReport,
    synthesis: &SynthesisOutcome,
    findings: &[Finding],
) {
    report.findings_resumed = synthesis.resumed;
    report.findings_created = findings.len().saturating_sub(synthesis.resumed);
    report.findings_insufficient_evidence = synthesis.rejections.len();
    report.findings_rejected_by_gate = findings
        .iter()
        .filter(|f| f.verdict == Verdict::RejectedByGate)
        .count();
    report.findings_promoted_by_override = findings
        .iter()
        .filter(|f| matches!(f.verdict, Verdict::PromotedByOverride { .. }))
        .count();
}

/// Counts over the consolidated themes. `created` is the number of themes
/// synthesized before consolidation.
pub fn record_themes(
    report: &mut RunReport,
    created: usize,
    themes: &[Theme],
    merges: &[MergeRecord],
) {
    let active: Vec<&Theme> = themes.iter().filter(|t| !t.is_superseded()).collect();
    report.themes_created = created;
    report.themes_merged = merges.iter().map(|m| m.superseded.len()).sum();
    report.themes_published = active.iter().filter(|t| t.is_published()).count();
    report.themes_rejected_by_gate = active
        .iter()
        .filter(|t| t.verdict == Verdict::RejectedByGate)
        .count();
    report.themes_promoted_by_override = active
        .iter()
        .filter(|t| matches!(t.verdict, Verdict::PromotedByOverride { .. }))
        .count();
    report.published_theme_ids = active
        .iter()
        .filter(|t| t.is_published())
        .map(|t| t.id.clone())
        .collect();
    report.pending_theme_ids = active
        .iter()
        .filter(|t| t.is_pending_regeneration())
        .map(|t| t.id.clone())
        .collect();
    report.themes_pending_regeneration = report.pending_theme_ids.len();
}

/// One structured line per run, plus a warning when the run is partial.
pub fn log_summary(report: &RunReport) {
    info!(
        tenant = %report.scope.tenant_id,
        generation = %report.generation,
        quotes = report.quotes_considered,
        clusters = report.clusters,
        findings_created = report.findings_created,
        findings_resumed = report.findings_resumed,
        findings_insufficient_evidence = report.findings_insufficient_evidence,
        findings_rejected_by_gate = report.findings_rejected_by_gate,
        findings_promoted_by_override = report.findings_promoted_by_override,
        themes_created = report.themes_created,
        themes_published = report.themes_published,
        themes_merged = report.themes_merged,
        themes_rejected_by_gate = report.themes_rejected_by_gate,
        themes_pending_regeneration = report.themes_pending_regeneration,
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "insight run complete"
    );
    if report.is_partial() {
        warn!(
            generation = %report.generation,
            cancelled = report.cancelled,
            published = ?report.published_theme_ids,
            pending = ?report.pending_theme_ids,
            "insight run is partial"
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use insight_core::models::{RegenerationReason, ThemeStatus};
    use insight_core::{AnalysisScope, GenerationId};
    use test_fixtures::{FindingBuilder, ThemeBuilder};

    use super::*;

    fn report() -> RunReport {
        RunReport::new(GenerationId::from("gen-1"), AnalysisScope::new("t"), Utc::now())
    }

    #[test]
    fn finding_counts_split_by_verdict() {
        let findings = vec![
            FindingBuilder::new("f1").build(),
            FindingBuilder::new("f2").verdict(Verdict::RejectedByGate).build(),
            FindingBuilder::new("f3")
                .verdict(Verdict::PromotedByOverride {
                    reviewer: "r".into(),
                    reason: "why".into(),
                    promoted_at: Utc::now(),
                })
                .build(),
        ];
        let synthesis = SynthesisOutcome {
            findings: findings.clone(),
            rejections: Vec::new(),
            resumed: 1,
            cancelled: false,
        };
        let mut report = report();
        record_findings(&mut report, &synthesis, &findings);
        assert_eq!(report.findings_created, 2);
        assert_eq!(report.findings_resumed, 1);
        assert_eq!(report.findings_rejected_by_gate, 1);
        assert_eq!(report.findings_promoted_by_override, 1);
    }

    #[test]
    fn superseded_themes_are_not_counted_as_active() {
        let merged = ThemeBuilder::new("t1").build().superseded_by("t3");
        let pending = ThemeBuilder::new("t2")
            .status(ThemeStatus::NeedsRegeneration {
                reason: RegenerationReason::ServiceUnavailable,
            })
            .build();
        let successor = ThemeBuilder::new("t3").build();
        let merges = vec![MergeRecord {
            successor: "t3".into(),
            superseded: vec!["t1".into(), "t9".into()],
            similarity: 0.9,
        }];
        let mut report = report();
        record_themes(&mut report, 3, &[merged, pending, successor], &merges);
        assert_eq!(report.themes_created, 3);
        assert_eq!(report.themes_merged, 2);
        assert_eq!(report.themes_published, 1);
        assert_eq!(report.published_theme_ids, vec!["t3"]);
        assert_eq!(report.pending_theme_ids, vec!["t2"]);
        assert!(report.is_partial());
    }
}
