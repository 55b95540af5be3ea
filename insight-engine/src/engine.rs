//! InsightEngine: one run per scope, guarded against overlap.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use insight_clustering::PatternClusterer;
use insight_competitive::CompetitiveDetector;
use insight_consolidation::ThemeConsolidator;
use insight_core::models::{ReviewOverrides, RunCheckpoint, RunOutput, RunReport};
use insight_core::traits::{CancellationToken, IQuoteStore, IResultSink, ITextGenerator};
use insight_core::{
    AnalysisScope, Finding, GenerationId, InsightConfig, InsightError, InsightResult, Quote,
    QuoteIndex, Theme,
};
use insight_findings::FindingSynthesizer;
use insight_themes::ThemeSynthesizer;
use insight_validation::{resolve_verdict, GateEvidence, QualityGateEngine};
use tracing::{debug, info};

use crate::report;

/// Per-run inputs besides the corpus.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub overrides: ReviewOverrides,
    /// Findings already produced in this generation.
    pub checkpoint: Option<RunCheckpoint>,
    /// Generation to run as. Defaults to the checkpoint's, else a new one.
    pub generation: Option<GenerationId>,
    pub cancel: CancellationToken,
}

/// Runs the discovery pipeline.
///
/// Configuration is validated once at construction. Only one run may be in
/// flight per engine; an overlapping call fails with `RunInProgress`.
pub struct InsightEngine {
    config: InsightConfig,
    generator: Arc<dyn ITextGenerator>,
    /// Guard: only one run at a time.
    is_running: Arc<AtomicBool>,
}

impl InsightEngine {
    pub fn new(config: InsightConfig, generator: Arc<dyn ITextGenerator>) -> InsightResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            is_running: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Load the scope's quotes from `store`, run, and persist to `sink`.
    pub fn run_from_store(
        &self,
        store: &dyn IQuoteStore,
        scope: &AnalysisScope,
        options: &RunOptions,
        sink: &dyn IResultSink,
    ) -> InsightResult<RunOutput> {
        let quotes = store.load(scope)?;
        self.run(scope, quotes, options, sink)
    }

    /// Run over `quotes` and persist the output to `sink`.
    ///
    /// When every attempted theme generation failed on the service side the
    /// output is still persisted, then `ExternalServiceExhausted` is returned.
    pub fn run(
        &self,
        scope: &AnalysisScope,
        quotes: Vec<Quote>,
        options: &RunOptions,
        sink: &dyn IResultSink,
    ) -> InsightResult<RunOutput> {
        // Acquire the single-run guard.
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(InsightError::RunInProgress);
        }

        let result = self.execute(scope, quotes, options).and_then(|execution| {
            sink.persist(&execution.output)?;
            Ok(execution)
        });

        // Release the guard.
        self.is_running.store(false, Ordering::SeqCst);

        let execution = result?;
        if let Some((attempted, failed)) = execution.exhausted {
            return Err(InsightError::ExternalServiceExhausted { attempted, failed });
        }
        Ok(execution.output)
    }

    fn execute(
        &self,
        scope: &AnalysisScope,
        quotes: Vec<Quote>,
        options: &RunOptions,
    ) -> InsightResult<Execution> {
        let started_at = Utc::now();
        let generation = resolve_generation(options)?;
        let span = crate::run_span!(scope.tenant_id, generation);
        let _entered = span.enter();

        let index = QuoteIndex::build(quotes)?;
        let profile = index.profile();
        let gates = QualityGateEngine::for_corpus(&self.config.gates, &profile);
        let detector = CompetitiveDetector::new(&self.config.competitive);
        let mut report = RunReport::new(generation.clone(), scope.clone(), started_at);
        report.threshold_adjustments = gates.thresholds().adjustments.clone();

        let clustering = {
            let _span = crate::clustering_span!(index.len()).entered();
            PatternClusterer::new(self.config.clustering.clone()).cluster(&index)
        };
        report::record_clustering(&mut report, index.len(), &clustering);

        let resumed = options
            .checkpoint
            .as_ref()
            .map(|c| c.completed.clone())
            .unwrap_or_default();
        let synthesis = {
            let _span = crate::findings_span!(clustering.clusters.len()).entered();
            FindingSynthesizer::new(&self.config).synthesize_all(
                &clustering.clusters,
                &index,
                &generation,
                &resumed,
                &options.cancel,
            )?
        };

        let checkpoint = RunCheckpoint {
            generation: generation.clone(),
            completed: synthesis
                .findings
                .iter()
                .map(|f| (f.cluster_key.clone(), f.clone()))
                .collect::<BTreeMap<_, _>>(),
        };

        let findings: Vec<Finding> = {
            let _span = crate::gates_span!(synthesis.findings.len()).entered();
            synthesis
                .findings
                .iter()
                .cloned()
                .map(|f| self.annotate_finding(f, &index, &gates, &detector, &options.overrides))
                .collect()
        };
        report::record_findings(&mut report, &synthesis, &findings);

        let themes = {
            let _span = crate::themes_span!(findings.len()).entered();
            ThemeSynthesizer::new(&self.config, Arc::clone(&self.generator)).synthesize(
                &findings,
                &index,
                &gates,
                &profile,
                &generation,
                &options.overrides,
                &options.cancel,
            )?
        };
        let created = themes.themes.len();
        let annotated: Vec<Theme> = themes
            .themes
            .iter()
            .cloned()
            .map(|t| {
                let quotes = index.resolve(&t.quote_ids);
                let signal = detector.detect(t.statement.as_deref(), quotes);
                t.with_competitive_signal(signal)
            })
            .collect();

        let consolidated = {
            let _span = crate::consolidation_span!(annotated.len()).entered();
            ThemeConsolidator::new(
                &index,
                &gates,
                &self.config.scoring,
                &self.config.themes,
                &self.config.dedup,
            )
            .consolidate(annotated)
        };
        report::record_themes(&mut report, created, &consolidated.themes, &consolidated.merges);

        report.cancelled = synthesis.cancelled || themes.cancelled;
        report.finished_at = Utc::now();
        report::log_summary(&report);

        let exhausted = themes.service_exhausted().then_some((
            themes.generation_attempted,
            themes.generation_service_failures,
        ));
        Ok(Execution {
            output: RunOutput {
                report,
                findings,
                rejections: synthesis.rejections,
                themes: consolidated.themes,
                merges: consolidated.merges,
                checkpoint,
            },
            exhausted,
        })
    }

    /// Competitive signal, gate record and verdict for one finding.
    fn annotate_finding(
        &self,
        finding: Finding,
        index: &QuoteIndex,
        gates: &QualityGateEngine,
        detector: &CompetitiveDetector,
        overrides: &ReviewOverrides,
    ) -> Finding {
        let quotes = index.resolve(&finding.quote_ids);
        let signal = detector.detect(Some(&finding.statement), quotes.iter().copied());
        let evidence = GateEvidence::from_quotes(
            finding.id.clone(),
            finding.polarity,
            &quotes,
            &[finding.criterion.as_str()],
            &self.config.scoring,
        );
        let record = gates.evaluate(&evidence);
        let verdict = resolve_verdict(&record, overrides.get(&finding.id));
        debug!(
            finding = %finding.id,
            passed = record.passed,
            verdict = ?verdict,
            "finding gated"
        );
        finding
            .with_competitive_signal(signal)
            .with_gate_record(record)
            .with_verdict(verdict)
    }
}

impl std::fmt::Debug for InsightEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightEngine")
            .field("generator", &self.generator.name())
            .field("is_running", &self.is_running())
            .finish()
    }
}

struct Execution {
    output: RunOutput,
    /// (attempted, failed) when every theme generation failed on the service.
    exhausted: Option<(usize, usize)>,
}

/// A checkpoint pins the generation; an explicit generation must agree.
fn resolve_generation(options: &RunOptions) -> InsightResult<GenerationId> {
    match (&options.generation, &options.checkpoint) {
        (Some(requested), Some(checkpoint)) if *requested != checkpoint.generation => {
            Err(InsightError::CheckpointMismatch {
                checkpoint: checkpoint.generation.to_string(),
                run: requested.to_string(),
            })
        }
        (Some(requested), _) => Ok(requested.clone()),
        (None, Some(checkpoint)) => {
            info!(
                generation = %checkpoint.generation,
                completed = checkpoint.completed.len(),
                "resuming from checkpoint"
            );
            Ok(checkpoint.generation.clone())
        }
        (None, None) => Ok(GenerationId::new()),
    }
}
