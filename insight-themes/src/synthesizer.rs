//! ThemeSynthesizer: validated Findings → gated, narrated Themes.

use std::sync::Arc;

use chrono::Utc;
use insight_core::config::{GateConfig, NarrativeConfig, ScoringWeights, ThemeConfig};
use insight_core::ids::content_id;
use insight_core::models::{CorpusProfile, RegenerationReason, ReviewOverrides, ThemeStatus};
use insight_core::traits::{ICancellable, ITextGenerator};
use insight_core::{
    Finding, GenerationId, InsightConfig, InsightError, InsightResult, QuoteIndex, Theme,
};
use insight_validation::{quality_score, resolve_verdict, GateEvidence, QualityGateEngine};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::bundle::build_bundle;
use crate::generator::{NarrativeGenerator, NarrativeOutcome};
use crate::grouping::{group_findings, theme_company_floor, ThemeCandidate};

/// Themes of one pass, in candidate order, plus generation accounting.
#[derive(Debug, Clone, Default)]
pub struct ThemeSynthesisOutcome {
    pub themes: Vec<Theme>,
    /// Themes for which the generator was invoked.
    pub generation_attempted: usize,
    /// Of those, themes that ended on a service failure.
    pub generation_service_failures: usize,
    pub cancelled: bool,
}

impl ThemeSynthesisOutcome {
    /// Every attempted generation failed on the service side.
    pub fn service_exhausted(&self) -> bool {
        self.generation_attempted > 0
            && self.generation_service_failures == self.generation_attempted
    }
}

pub struct ThemeSynthesizer {
    themes: ThemeConfig,
    gates: GateConfig,
    narrative: NarrativeConfig,
    scoring: ScoringWeights,
    quote_similarity: f64,
    generator: NarrativeGenerator,
}

impl ThemeSynthesizer {
    pub fn new(config: &InsightConfig, backend: Arc<dyn ITextGenerator>) -> Self {
        Self {
            themes: config.themes.clone(),
            gates: config.gates.clone(),
            narrative: config.narrative.clone(),
            scoring: config.scoring.clone(),
            quote_similarity: config.dedup.quote_similarity,
            generator: NarrativeGenerator::new(backend, &config.narrative),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn synthesize(
        &self,
        findings: &[Finding],
        index: &QuoteIndex,
        gates: &QualityGateEngine,
        profile: &CorpusProfile,
        generation: &GenerationId,
        overrides: &ReviewOverrides,
        cancel: &dyn ICancellable,
    ) -> InsightResult<ThemeSynthesisOutcome> {
        let min_companies = theme_company_floor(&self.themes, &self.gates, profile);
        // A theme's evidence is the union of its findings' quotes; near-duplicates
        // across findings count once.
        let candidates: Vec<ThemeCandidate<'_>> =
            group_findings(findings, &self.themes, min_companies)
                .into_iter()
                .filter_map(|candidate| {
                    candidate.with_distinct_evidence(
                        index,
                        self.quote_similarity,
                        &self.themes,
                        min_companies,
                    )
                })
                .collect();

        // Gate every candidate first; only admitted themes reach the generator.
        let mut drafts: Vec<(Theme, Option<ThemeCandidate<'_>>)> = candidates
            .into_iter()
            .map(|candidate| {
                let theme = self.draft(&candidate, index, gates, generation, overrides);
                let pending = theme.verdict.admits().then_some(candidate);
                (theme, pending)
            })
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.narrative.concurrency)
            .thread_name(|i| format!("insight-narrative-{i}"))
            .build()
            .map_err(|e| InsightError::WorkerPool {
                reason: e.to_string(),
            })?;

        let mut outcome = ThemeSynthesisOutcome::default();
        let pending: Vec<usize> = drafts
            .iter()
            .enumerate()
            .filter(|(_, (_, candidate))| candidate.is_some())
            .map(|(i, _)| i)
            .collect();

        for batch in pending.chunks(self.narrative.batch_size.max(1)) {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
            }
            if outcome.cancelled {
                for &i in batch {
                    drafts[i].0.status = ThemeStatus::NeedsRegeneration {
                        reason: RegenerationReason::Cancelled,
                    };
                }
                continue;
            }

            let bundles: Vec<_> = batch
                .iter()
                .filter_map(|&i| {
                    let (theme, candidate) = &drafts[i];
                    candidate
                        .as_ref()
                        .map(|c| (i, build_bundle(&theme.id, c, index, &self.narrative)))
                })
                .collect();
            let results: Vec<(usize, NarrativeOutcome)> = pool.install(|| {
                bundles
                    .into_par_iter()
                    .map(|(i, bundle)| (i, self.generator.generate(bundle)))
                    .collect()
            });

            for (i, result) in results {
                outcome.generation_attempted += 1;
                if result.is_service_failure() {
                    outcome.generation_service_failures += 1;
                }
                let theme = &mut drafts[i].0;
                theme.generation_attempts = result.attempts();
                match result {
                    NarrativeOutcome::Generated { statement, .. } => {
                        theme.statement = Some(statement);
                        theme.status = ThemeStatus::Published;
                    }
                    NarrativeOutcome::Failed { reason, .. } => {
                        theme.status = ThemeStatus::NeedsRegeneration { reason };
                    }
                }
            }
        }

        outcome.themes = drafts.into_iter().map(|(theme, _)| theme).collect();
        info!(
            themes = outcome.themes.len(),
            published = outcome.themes.iter().filter(|t| t.is_published()).count(),
            pending = outcome.themes.iter().filter(|t| t.is_pending_regeneration()).count(),
            generation_attempted = outcome.generation_attempted,
            service_failures = outcome.generation_service_failures,
            backend = self.generator.backend_name(),
            "theme synthesis complete"
        );
        Ok(outcome)
    }

    /// Gate and score a candidate. The statement is filled in later; the
    /// status is final only for gate-rejected themes. Competitive signals
    /// are attached by the caller once statements exist.
    fn draft(
        &self,
        candidate: &ThemeCandidate<'_>,
        index: &QuoteIndex,
        gates: &QualityGateEngine,
        generation: &GenerationId,
        overrides: &ReviewOverrides,
    ) -> Theme {
        let finding_ids = candidate.finding_ids();
        let id = content_id(
            "theme",
            [candidate.category.as_str(), candidate.polarity.as_str()]
                .into_iter()
                .chain(finding_ids.iter().map(String::as_str)),
        );

        let quotes = index.resolve(&candidate.quote_ids);
        let criteria: Vec<&str> = candidate.criteria.iter().map(String::as_str).collect();
        let evidence = GateEvidence::from_quotes(
            id.clone(),
            candidate.polarity,
            &quotes,
            &criteria,
            &self.scoring,
        );
        let gate_record = gates.evaluate(&evidence);
        let verdict = resolve_verdict(&gate_record, overrides.get(&id));
        let status = if verdict.admits() {
            ThemeStatus::NeedsRegeneration {
                reason: RegenerationReason::ServiceUnavailable,
            }
        } else {
            debug!(
                theme = %id,
                failed = ?gate_record.failed_gates(),
                "theme rejected by gate, no statement generated"
            );
            ThemeStatus::RejectedByGate
        };

        Theme {
            id,
            generation: generation.clone(),
            statement: None,
            category: candidate.category,
            polarity: candidate.polarity,
            criteria: candidate.criteria.clone(),
            strength: candidate.strength,
            companies: candidate.companies.clone(),
            finding_ids,
            quote_ids: candidate.quote_ids.clone(),
            competitive: false,
            competitive_signal: None,
            quality_score: quality_score(&evidence, &self.themes.quality),
            gate_record,
            verdict,
            status,
            generation_attempts: 0,
            supersedes: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for ThemeSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSynthesizer")
            .field("grouping", &self.themes.grouping)
            .field("generator", &self.generator)
            .finish()
    }
}
