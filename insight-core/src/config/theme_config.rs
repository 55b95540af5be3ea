use serde::{Deserialize, Serialize};

use super::defaults;

/// How validated findings are grouped into theme candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeGrouping {
    /// One candidate per finding category, spanning criteria.
    Category,
    /// One candidate per (criterion, category).
    CriterionAndCategory,
}

/// Theme synthesizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub grouping: ThemeGrouping,
    pub min_findings: usize,
    pub min_companies: usize,
    pub high_tier_companies: usize,
    pub high_tier_findings: usize,
    pub medium_tier_companies: usize,
    pub medium_tier_findings: usize,
    pub quality: QualityWeights,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            grouping: ThemeGrouping::Category,
            min_findings: defaults::DEFAULT_MIN_FINDINGS_PER_THEME,
            min_companies: defaults::DEFAULT_MIN_COMPANIES_PER_THEME,
            high_tier_companies: defaults::DEFAULT_HIGH_TIER_COMPANIES,
            high_tier_findings: defaults::DEFAULT_HIGH_TIER_FINDINGS,
            medium_tier_companies: defaults::DEFAULT_MEDIUM_TIER_COMPANIES,
            medium_tier_findings: defaults::DEFAULT_MEDIUM_TIER_FINDINGS,
            quality: QualityWeights::default(),
        }
    }
}

/// Weights of the 0–10 theme quality blend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub coverage: f64,
    pub impact: f64,
    pub volume: f64,
    pub coherence: f64,
    /// Company count that earns full coverage credit.
    pub coverage_target_companies: usize,
    /// Quote count that earns full volume credit.
    pub volume_target_quotes: usize,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            coverage: defaults::DEFAULT_QUALITY_W_COVERAGE,
            impact: defaults::DEFAULT_QUALITY_W_IMPACT,
            volume: defaults::DEFAULT_QUALITY_W_VOLUME,
            coherence: defaults::DEFAULT_QUALITY_W_COHERENCE,
            coverage_target_companies: defaults::DEFAULT_COVERAGE_TARGET_COMPANIES,
            volume_target_quotes: defaults::DEFAULT_VOLUME_TARGET_QUOTES,
        }
    }
}
