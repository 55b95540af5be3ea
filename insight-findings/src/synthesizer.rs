//! FindingSynthesizer: candidate cluster → Finding or Rejection.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::Utc;
use insight_consolidation::{dedup_quotes, QuoteUsageLedger};
use insight_core::config::{DedupConfig, ExecutionConfig, FindingConfig, ScoringWeights};
use insight_core::ids::content_id;
use insight_core::models::{
    CandidateCluster, ClusterKey, ClusterMode, Polarity, PriorityTier, Rejection, RejectionReason,
    Verdict,
};
use insight_core::traits::ICancellable;
use insight_core::{
    Finding, GenerationId, InsightConfig, InsightError, InsightResult, Quote, QuoteIndex,
};
use insight_validation::quote_impact;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::scoring::{confidence, evidence_strength, quote_score};
use crate::statement::{finding_category, finding_statement};

/// Findings and rejections of one synthesis pass, sorted by cluster key.
#[derive(Debug, Clone, Default)]
pub struct SynthesisOutcome {
    pub findings: Vec<Finding>,
    pub rejections: Vec<Rejection>,
    /// Checkpointed findings kept as they were. A checkpointed finding that
    /// the reuse cap dropped or rebuilt is not counted.
    pub resumed: usize,
    /// Set when cancellation stopped the pass before every cluster was visited.
    pub cancelled: bool,
}

/// Turns candidate clusters into scored, deduplicated Findings.
#[derive(Debug, Clone)]
pub struct FindingSynthesizer {
    findings: FindingConfig,
    scoring: ScoringWeights,
    dedup: DedupConfig,
    execution: ExecutionConfig,
}

impl FindingSynthesizer {
    pub fn new(config: &InsightConfig) -> Self {
        Self {
            findings: config.findings.clone(),
            scoring: config.scoring.clone(),
            dedup: config.dedup.clone(),
            execution: config.execution.clone(),
        }
    }

    /// Synthesize one cluster, ignoring the quote ids in `exclude`.
    pub fn synthesize(
        &self,
        cluster: &CandidateCluster,
        index: &QuoteIndex,
        generation: &GenerationId,
        exclude: &HashSet<String>,
    ) -> Result<Finding, Rejection> {
        let members: Vec<&Quote> =
            index.resolve(cluster.quote_ids.iter().filter(|id| !exclude.contains(*id)));
        let criterion = dominant_criterion(&members);

        // Cross-criteria members count only where they also bear on the
        // dominant criterion.
        let relevant: Vec<&Quote> = members
            .into_iter()
            .filter(|q| q.relevance_for(&criterion) >= self.findings.min_quote_relevance)
            .collect();
        let quotes = dedup_quotes(&relevant, &criterion, self.dedup.quote_similarity);

        let reject = |reason: RejectionReason, measured: f64, threshold: f64| {
            debug!(
                cluster = %cluster.key,
                reason = ?reason,
                measured,
                threshold,
                "cluster rejected for insufficient evidence"
            );
            Rejection {
                cluster_key: cluster.key.clone(),
                reason,
                measured,
                threshold,
            }
        };

        if quotes.is_empty() || quotes.len() < self.findings.min_quotes {
            return Err(reject(
                RejectionReason::TooFewQuotes,
                quotes.len() as f64,
                self.findings.min_quotes as f64,
            ));
        }
        let companies: BTreeSet<String> = quotes.iter().map(|q| q.company.clone()).collect();
        if companies.len() < self.findings.min_companies {
            return Err(reject(
                RejectionReason::TooFewCompanies,
                companies.len() as f64,
                self.findings.min_companies as f64,
            ));
        }

        let scores: Vec<f64> = quotes
            .iter()
            .map(|q| quote_score(q, &criterion, &self.scoring))
            .collect();
        let confidence = confidence(&scores);
        if confidence < self.findings.min_confidence {
            return Err(reject(
                RejectionReason::LowConfidence,
                confidence,
                self.findings.min_confidence,
            ));
        }
        let priority = PriorityTier::from_confidence(
            confidence,
            self.findings.priority_threshold,
            self.findings.standard_threshold,
        );
        if priority == PriorityTier::Low {
            return Err(reject(
                RejectionReason::LowPriority,
                confidence,
                self.findings.standard_threshold,
            ));
        }

        let mean_impact = quotes
            .iter()
            .map(|q| quote_impact(q, &criterion, &self.scoring))
            .sum::<f64>()
            / quotes.len() as f64;
        let polarity = Polarity::from_sentiment(cluster.sentiment);
        let statement = finding_statement(
            polarity,
            &criterion,
            &quotes,
            companies.len(),
            self.findings.statement_key_phrases,
        );
        let category = finding_category(polarity, &quotes, &self.scoring.lexicon);
        let representative_quote_ids =
            representatives(&quotes, &scores, self.findings.max_representative_quotes);

        let quote_ids: BTreeSet<String> = quotes.iter().map(|q| q.id.clone()).collect();
        let id = content_id(
            "finding",
            std::iter::once(cluster.key.as_str()).chain(quote_ids.iter().map(String::as_str)),
        );

        Ok(Finding {
            id,
            generation: generation.clone(),
            cluster_key: cluster.key.clone(),
            criterion,
            category,
            polarity,
            quote_ids,
            evidence_strength: evidence_strength(quotes.len(), companies.len(), &self.findings),
            companies,
            representative_quote_ids,
            confidence,
            mean_impact,
            priority,
            statement,
            cross_criteria: cluster.mode == ClusterMode::CrossCriteria,
            competitive: None,
            gate_record: None,
            verdict: Verdict::Pending,
            created_at: Utc::now(),
            superseded_by: None,
        })
    }

    /// Synthesize every cluster on the worker pool, then enforce the quote
    /// reuse cap. Clusters found in `resumed` are not re-synthesized.
    pub fn synthesize_all(
        &self,
        clusters: &[CandidateCluster],
        index: &QuoteIndex,
        generation: &GenerationId,
        resumed: &BTreeMap<ClusterKey, Finding>,
        cancel: &dyn ICancellable,
    ) -> InsightResult<SynthesisOutcome> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.execution.workers)
            .thread_name(|i| format!("insight-findings-{i}"))
            .build()
            .map_err(|e| InsightError::WorkerPool {
                reason: e.to_string(),
            })?;

        let mut outcome = SynthesisOutcome::default();
        let mut produced: Vec<Finding> = Vec::new();
        let pending: Vec<&CandidateCluster> = clusters
            .iter()
            .filter(|c| match resumed.get(&c.key) {
                Some(finding) => {
                    produced.push(finding.clone());
                    false
                }
                None => true,
            })
            .collect();

        let no_exclusions = HashSet::new();
        for batch in pending.chunks(self.execution.finding_batch_size.max(1)) {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            let results: Vec<Result<Finding, Rejection>> = pool.install(|| {
                batch
                    .par_iter()
                    .map(|cluster| self.synthesize(cluster, index, generation, &no_exclusions))
                    .collect()
            });
            for result in results {
                match result {
                    Ok(finding) => produced.push(finding),
                    Err(rejection) => outcome.rejections.push(rejection),
                }
            }
        }

        let (findings, capped) = self.enforce_reuse_cap(produced, clusters, index, generation);
        outcome.resumed = findings
            .iter()
            .filter(|f| resumed.get(&f.cluster_key).is_some_and(|r| r.id == f.id))
            .count();
        outcome.findings = findings;
        outcome.rejections.extend(capped);
        outcome.findings.sort_by(|a, b| a.cluster_key.cmp(&b.cluster_key));
        outcome.rejections.sort_by(|a, b| a.cluster_key.cmp(&b.cluster_key));

        info!(
            findings = outcome.findings.len(),
            rejected = outcome.rejections.len(),
            resumed = outcome.resumed,
            cancelled = outcome.cancelled,
            "finding synthesis complete"
        );
        Ok(outcome)
    }

    /// Visit findings strongest first; a finding citing a quote already at
    /// its cap is re-synthesized without those quotes.
    fn enforce_reuse_cap(
        &self,
        mut findings: Vec<Finding>,
        clusters: &[CandidateCluster],
        index: &QuoteIndex,
        generation: &GenerationId,
    ) -> (Vec<Finding>, Vec<Rejection>) {
        findings.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.id.cmp(&b.id))
        });
        let by_key: BTreeMap<&ClusterKey, &CandidateCluster> =
            clusters.iter().map(|c| (&c.key, c)).collect();

        let mut ledger = QuoteUsageLedger::new(self.dedup.max_findings_per_quote);
        let mut kept = Vec::with_capacity(findings.len());
        let mut rejections = Vec::new();
        'findings: for mut finding in findings {
            let mut excluded: HashSet<String> = HashSet::new();
            loop {
                let exhausted = ledger.exhausted(&finding.quote_ids);
                if exhausted.is_empty() {
                    ledger.record(&finding.quote_ids);
                    kept.push(finding);
                    continue 'findings;
                }
                let Some(cluster) = by_key.get(&finding.cluster_key) else {
                    // No cluster to rebuild from; the finding cannot be re-cited.
                    debug!(finding = %finding.id, "capped finding has no source cluster");
                    continue 'findings;
                };
                debug!(
                    finding = %finding.id,
                    exhausted = ?exhausted,
                    "quote reuse cap reached, re-synthesizing"
                );
                excluded.extend(exhausted);
                match self.synthesize(cluster, index, generation, &excluded) {
                    Ok(rebuilt) => finding = rebuilt,
                    Err(rejection) => {
                        rejections.push(rejection);
                        continue 'findings;
                    }
                }
            }
        }
        (kept, rejections)
    }
}

/// Most common primary criterion; ties go to the lexicographically smallest.
fn dominant_criterion(quotes: &[&Quote]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for quote in quotes {
        *counts.entry(quote.criterion.as_str()).or_insert(0) += 1;
    }
    // BTreeMap iterates in key order, so the first maximum is the smallest key.
    let mut best: Option<(&str, usize)> = None;
    for (criterion, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((criterion, count));
        }
    }
    best.map(|(c, _)| c.to_string()).unwrap_or_default()
}

/// Up to `limit` ids: the best quote of each company first, then the rest
/// by score.
fn representatives(quotes: &[&Quote], scores: &[f64], limit: usize) -> Vec<String> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| quotes[a.0].id.cmp(&quotes[b.0].id))
    });

    let mut seen_companies: HashSet<&str> = HashSet::new();
    let mut picked: Vec<usize> = Vec::with_capacity(limit);
    for &(i, _) in &ranked {
        if picked.len() == limit {
            break;
        }
        if seen_companies.insert(quotes[i].company.as_str()) {
            picked.push(i);
        }
    }
    for &(i, _) in &ranked {
        if picked.len() == limit {
            break;
        }
        if !picked.contains(&i) {
            picked.push(i);
        }
    }
    picked.into_iter().map(|i| quotes[i].id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::QuoteBuilder;

    #[test]
    fn dominant_criterion_breaks_ties_lexicographically() {
        let a = QuoteBuilder::new("q1").criterion("support").build();
        let b = QuoteBuilder::new("q2").criterion("pricing").build();
        let c = QuoteBuilder::new("q3").criterion("support").build();
        assert_eq!(dominant_criterion(&[&a, &b]), "pricing");
        assert_eq!(dominant_criterion(&[&a, &b, &c]), "support");
        assert_eq!(dominant_criterion(&[]), "");
    }

    #[test]
    fn representatives_prefer_company_diversity() {
        let a = QuoteBuilder::new("q1").company("Acme").build();
        let b = QuoteBuilder::new("q2").company("Acme").build();
        let c = QuoteBuilder::new("q3").company("Globex").build();
        let picked = representatives(&[&a, &b, &c], &[0.9, 0.8, 0.1], 2);
        assert_eq!(picked, vec!["q1", "q3"]);
        let all = representatives(&[&a, &b, &c], &[0.9, 0.8, 0.1], 4);
        assert_eq!(all, vec!["q1", "q3", "q2"]);
    }
}
