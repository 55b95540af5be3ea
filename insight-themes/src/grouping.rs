//! Validated Findings → theme candidates.

use std::collections::{BTreeMap, BTreeSet};

use insight_consolidation::dedup_quotes_across;
use insight_core::config::{GateConfig, ThemeConfig, ThemeGrouping};
use insight_core::models::{CorpusProfile, FindingCategory, Polarity, StrengthTier};
use insight_core::{Finding, QuoteIndex};
use insight_validation::strength_tier;
use tracing::{debug, info};

/// Findings that may become one Theme.
#[derive(Debug, Clone)]
pub struct ThemeCandidate<'f> {
    pub category: FindingCategory,
    pub polarity: Polarity,
    pub criteria: BTreeSet<String>,
    /// Sorted by id.
    pub findings: Vec<&'f Finding>,
    pub companies: BTreeSet<String>,
    pub quote_ids: BTreeSet<String>,
    pub strength: StrengthTier,
}

impl ThemeCandidate<'_> {
    pub fn finding_ids(&self) -> BTreeSet<String> {
        self.findings.iter().map(|f| f.id.clone()).collect()
    }

    /// Drop near-duplicate quotes from the union evidence, then recompute
    /// companies and strength from what is left. `None` when the group
    /// falls below the theme floor.
    pub fn with_distinct_evidence(
        mut self,
        index: &QuoteIndex,
        threshold: f64,
        config: &ThemeConfig,
        min_companies: usize,
    ) -> Option<Self> {
        let quotes = index.resolve(&self.quote_ids);
        let criteria: Vec<&str> = self.criteria.iter().map(String::as_str).collect();
        let kept = dedup_quotes_across(&quotes, &criteria, threshold);
        if kept.len() < quotes.len() {
            debug!(
                category = self.category.as_str(),
                cited = quotes.len(),
                distinct = kept.len(),
                "near-duplicate quotes dropped from theme evidence"
            );
        }
        self.quote_ids = kept.iter().map(|q| q.id.clone()).collect();
        self.companies = kept.iter().map(|q| q.company.clone()).collect();

        match strength_tier(self.companies.len(), self.findings.len(), min_companies, config) {
            Some(strength) => {
                self.strength = strength;
                Some(self)
            }
            None => {
                debug!(
                    category = self.category.as_str(),
                    companies = self.companies.len(),
                    min_companies,
                    "theme candidate below floor after dedup"
                );
                None
            }
        }
    }
}

/// Minimum companies per theme for this corpus. A single-company corpus can
/// never show a cross-company pattern, so the gate floor applies instead.
pub fn theme_company_floor(
    themes: &ThemeConfig,
    gates: &GateConfig,
    profile: &CorpusProfile,
) -> usize {
    if gates.adaptive && profile.company_count <= 1 {
        let floor = gates.min_companies_floor.min(themes.min_companies);
        if floor != themes.min_companies {
            info!(
                configured = themes.min_companies,
                applied = floor,
                companies = profile.company_count,
                "theme company minimum relaxed for single-company corpus"
            );
        }
        floor
    } else {
        themes.min_companies
    }
}

type GroupKey = (Option<String>, FindingCategory, Polarity);

/// Group validated, unsuperseded findings. Groups below the emerging floor
/// are dropped. Output is sorted by group key.
pub fn group_findings<'f>(
    findings: &'f [Finding],
    config: &ThemeConfig,
    min_companies: usize,
) -> Vec<ThemeCandidate<'f>> {
    let mut groups: BTreeMap<GroupKey, Vec<&Finding>> = BTreeMap::new();
    for finding in findings
        .iter()
        .filter(|f| f.is_validated() && f.superseded_by.is_none())
    {
        let criterion = match config.grouping {
            ThemeGrouping::Category => None,
            ThemeGrouping::CriterionAndCategory => Some(finding.criterion.clone()),
        };
        groups
            .entry((criterion, finding.category, finding.polarity))
            .or_default()
            .push(finding);
    }

    groups
        .into_iter()
        .filter_map(|((criterion, category, polarity), mut members)| {
            members.sort_by(|a, b| a.id.cmp(&b.id));
            let companies: BTreeSet<String> = members
                .iter()
                .flat_map(|f| f.companies.iter().cloned())
                .collect();
            let Some(strength) =
                strength_tier(companies.len(), members.len(), min_companies, config)
            else {
                debug!(
                    category = category.as_str(),
                    criterion = ?criterion,
                    findings = members.len(),
                    companies = companies.len(),
                    min_findings = config.min_findings,
                    min_companies,
                    "finding group below theme floor"
                );
                return None;
            };
            Some(ThemeCandidate {
                category,
                polarity,
                criteria: members.iter().map(|f| f.criterion.clone()).collect(),
                quote_ids: members
                    .iter()
                    .flat_map(|f| f.quote_ids.iter().cloned())
                    .collect(),
                findings: members,
                companies,
                strength,
            })
        })
        .collect()
}
