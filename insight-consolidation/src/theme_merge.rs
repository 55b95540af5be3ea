//! Theme-level consolidation.
//!
//! Published themes whose statements are more similar than the threshold
//! are grouped transitively with a union-find. Each group of two or more
//! becomes one new successor theme over the union of the members' evidence;
//! the members are kept, marked superseded.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use insight_clustering::algorithms::similarity::text_similarity;
use insight_core::config::{DedupConfig, ScoringWeights, ThemeConfig};
use insight_core::ids::content_id;
use insight_core::models::{MergeRecord, ThemeStatus, Verdict};
use insight_core::{QuoteIndex, Theme};
use insight_validation::{quality_score, strength_tier, GateEvidence, QualityGateEngine};
use petgraph::unionfind::UnionFind;
use tracing::{info, warn};

use crate::quote_dedup::dedup_quotes_across;

/// Themes after consolidation, plus one audit record per merge.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationOutcome {
    /// Unmerged and superseded themes in input order, then successors.
    pub themes: Vec<Theme>,
    pub merges: Vec<MergeRecord>,
}

/// Merges near-duplicate published themes.
pub struct ThemeConsolidator<'a> {
    index: &'a QuoteIndex,
    gates: &'a QualityGateEngine,
    scoring: &'a ScoringWeights,
    themes: &'a ThemeConfig,
    dedup: &'a DedupConfig,
}

impl<'a> ThemeConsolidator<'a> {
    pub fn new(
        index: &'a QuoteIndex,
        gates: &'a QualityGateEngine,
        scoring: &'a ScoringWeights,
        themes: &'a ThemeConfig,
        dedup: &'a DedupConfig,
    ) -> Self {
        Self {
            index,
            gates,
            scoring,
            themes,
            dedup,
        }
    }

    pub fn consolidate(&self, themes: Vec<Theme>) -> ConsolidationOutcome {
        // Candidates: published themes with a statement.
        let candidates: Vec<(usize, &str)> = themes
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_published())
            .filter_map(|(i, t)| t.statement.as_deref().map(|s| (i, s)))
            .collect();

        let mut union_find = UnionFind::<usize>::new(candidates.len());
        let mut edges: Vec<(usize, usize, f64)> = Vec::new();
        for a in 0..candidates.len() {
            for b in (a + 1)..candidates.len() {
                let (ia, ib) = (candidates[a].0, candidates[b].0);
                if themes[ia].polarity != themes[ib].polarity {
                    continue;
                }
                let similarity = text_similarity(candidates[a].1, candidates[b].1);
                if similarity > self.dedup.theme_similarity {
                    union_find.union(a, b);
                    edges.push((a, b, similarity));
                }
            }
        }

        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (position, label) in union_find.into_labeling().into_iter().enumerate() {
            groups.entry(label).or_default().push(position);
        }

        let mut groups: Vec<Vec<usize>> = groups
            .into_values()
            .filter(|members| members.len() > 1)
            .map(|members| members.into_iter().map(|p| candidates[p].0).collect())
            .collect();
        groups.sort_by(|a: &Vec<usize>, b: &Vec<usize>| {
            smallest_id(&themes, a).cmp(smallest_id(&themes, b))
        });

        let mut successors = Vec::new();
        let mut merges = Vec::new();
        let mut successor_of: BTreeMap<usize, String> = BTreeMap::new();
        for members in &groups {
            let similarity = edges
                .iter()
                .filter(|(a, _, _)| members.contains(&candidates[*a].0))
                .map(|(_, _, s)| *s)
                .fold(0.0, f64::max);
            let member_themes: Vec<&Theme> = members.iter().map(|&i| &themes[i]).collect();
            let successor = self.merge(&member_themes);

            let mut superseded: Vec<String> =
                member_themes.iter().map(|t| t.id.clone()).collect();
            superseded.sort();
            info!(
                successor = %successor.id,
                superseded = ?superseded,
                similarity,
                "themes consolidated"
            );
            for &i in members {
                successor_of.insert(i, successor.id.clone());
            }
            merges.push(MergeRecord {
                successor: successor.id.clone(),
                superseded,
                similarity,
            });
            successors.push(successor);
        }

        let mut out: Vec<Theme> = themes
            .into_iter()
            .enumerate()
            .map(|(i, theme)| match successor_of.get(&i) {
                Some(successor) => theme.superseded_by(successor),
                None => theme,
            })
            .collect();
        out.extend(successors);
        ConsolidationOutcome {
            themes: out,
            merges,
        }
    }

    /// Build the successor of `members` from the union of their evidence.
    fn merge(&self, members: &[&Theme]) -> Theme {
        // Highest quality wins; ties go to the smaller id.
        let base = members
            .iter()
            .copied()
            .max_by(|a, b| {
                a.quality_score
                    .total_cmp(&b.quality_score)
                    .then_with(|| b.id.cmp(&a.id))
            })
            .unwrap_or(members[0]);

        let criteria = union_of(members, |t| &t.criteria);
        let finding_ids = union_of(members, |t| &t.finding_ids);
        let criteria_refs: Vec<&str> = criteria.iter().map(String::as_str).collect();

        // Members may cite near-identical quotes; the union counts each once.
        let cited = self.index.resolve(union_of(members, |t| &t.quote_ids));
        let quotes = dedup_quotes_across(&cited, &criteria_refs, self.dedup.quote_similarity);
        let quote_ids: BTreeSet<String> = quotes.iter().map(|q| q.id.clone()).collect();
        let companies: BTreeSet<String> = quotes.iter().map(|q| q.company.clone()).collect();

        let mut supersedes: Vec<String> = members.iter().map(|t| t.id.clone()).collect();
        supersedes.sort();
        let id = content_id("theme", &supersedes);
        let evidence = GateEvidence::from_quotes(
            id.clone(),
            base.polarity,
            &quotes,
            &criteria_refs,
            self.scoring,
        );
        let gate_record = self.gates.evaluate(&evidence);
        let quality = quality_score(&evidence, &self.themes.quality);
        let strength = strength_tier(
            companies.len(),
            finding_ids.len(),
            gate_record.thresholds.min_companies.min(self.themes.min_companies),
            self.themes,
        )
        .unwrap_or(base.strength);

        let (verdict, status) = if gate_record.passed {
            (Verdict::Passed, ThemeStatus::Published)
        } else if let Some(promoted) = members
            .iter()
            .find(|t| matches!(t.verdict, Verdict::PromotedByOverride { .. }))
        {
            (promoted.verdict.clone(), ThemeStatus::Published)
        } else {
            warn!(
                successor = %id,
                failed = ?gate_record.failed_gates(),
                "consolidated theme fails gates over its union evidence"
            );
            (Verdict::RejectedByGate, ThemeStatus::RejectedByGate)
        };

        let signal = members
            .iter()
            .filter_map(|t| t.competitive_signal.clone())
            .max_by(|a, b| a.tier.cmp(&b.tier).then(a.is_primary.cmp(&b.is_primary)));

        Theme {
            id,
            generation: base.generation.clone(),
            statement: base.statement.clone(),
            category: base.category,
            polarity: base.polarity,
            criteria,
            strength,
            companies,
            finding_ids,
            quote_ids,
            competitive: false,
            competitive_signal: None,
            quality_score: quality,
            gate_record,
            verdict,
            status,
            generation_attempts: base.generation_attempts,
            supersedes,
            created_at: Utc::now(),
        }
        .with_competitive_signal(signal)
    }
}

fn union_of(members: &[&Theme], field: fn(&Theme) -> &BTreeSet<String>) -> BTreeSet<String> {
    members
        .iter()
        .flat_map(|t| field(t).iter().cloned())
        .collect()
}

fn smallest_id<'t>(themes: &'t [Theme], members: &[usize]) -> &'t str {
    members
        .iter()
        .map(|&i| themes[i].id.as_str())
        .min()
        .unwrap_or("")
}
