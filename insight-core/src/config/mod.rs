pub mod clustering_config;
pub mod competitive_config;
pub mod dedup_config;
pub mod defaults;
pub mod execution_config;
pub mod finding_config;
pub mod gate_config;
pub mod narrative_config;
pub mod scoring_config;
pub mod theme_config;

use std::path::Path;

pub use clustering_config::ClusteringConfig;
pub use competitive_config::CompetitiveConfig;
pub use dedup_config::DedupConfig;
pub use execution_config::ExecutionConfig;
pub use finding_config::FindingConfig;
pub use gate_config::GateConfig;
pub use narrative_config::NarrativeConfig;
pub use scoring_config::{RoleWeights, ScoringLexicon, ScoringWeights, SentimentIntensity};
pub use theme_config::{QualityWeights, ThemeConfig, ThemeGrouping};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level engine configuration. Every section defaults independently,
/// so a partial TOML document only overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub clustering: ClusteringConfig,
    pub findings: FindingConfig,
    pub scoring: ScoringWeights,
    pub gates: GateConfig,
    pub themes: ThemeConfig,
    pub narrative: NarrativeConfig,
    pub dedup: DedupConfig,
    pub competitive: CompetitiveConfig,
    pub execution: ExecutionConfig,
}

impl InsightConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Reject thresholds outside their valid ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.clustering;
        unit_interval("clustering.min_similarity", c.min_similarity, false)?;
        at_least_one("clustering.min_cluster_size", c.min_cluster_size)?;
        at_least_one("clustering.min_cross_criteria_span", c.min_cross_criteria_span)?;

        let f = &self.findings;
        if !(1..=5).contains(&f.min_quote_relevance) {
            return Err(ConfigError::out_of_range(
                "findings.min_quote_relevance",
                f.min_quote_relevance as f64,
                "1..=5",
            ));
        }
        at_least_one("findings.min_quotes", f.min_quotes)?;
        at_least_one("findings.min_companies", f.min_companies)?;
        at_least_one("findings.max_representative_quotes", f.max_representative_quotes)?;
        at_least_one("findings.diversity_saturation", f.diversity_saturation)?;
        unit_interval("findings.diversity_weight", f.diversity_weight, true)?;
        unit_interval("findings.diversity_linear_share", f.diversity_linear_share, true)?;
        if !(f.size_knee.is_finite() && f.size_knee > 0.0) {
            return Err(ConfigError::out_of_range("findings.size_knee", f.size_knee, "> 0.0"));
        }
        zero_to_ten("findings.min_confidence", f.min_confidence)?;
        zero_to_ten("findings.priority_threshold", f.priority_threshold)?;
        zero_to_ten("findings.standard_threshold", f.standard_threshold)?;
        if f.priority_threshold < f.standard_threshold {
            return Err(ConfigError::invalid(
                "findings.priority_threshold",
                "must not be below findings.standard_threshold",
            ));
        }

        let s = &self.scoring;
        for (field, value) in [
            ("scoring.salience", s.salience),
            ("scoring.sentiment_strength", s.sentiment_strength),
            ("scoring.specificity", s.specificity),
            ("scoring.business_impact", s.business_impact),
            ("scoring.competitive_dynamics", s.competitive_dynamics),
            ("scoring.roles.executive", s.roles.executive),
            ("scoring.roles.budget_holder", s.roles.budget_holder),
            ("scoring.roles.evaluator", s.roles.evaluator),
            ("scoring.roles.end_user", s.roles.end_user),
            ("scoring.roles.unknown", s.roles.unknown),
            ("scoring.deal_impact_bonus", s.deal_impact_bonus),
        ] {
            non_negative(field, value)?;
        }
        for (field, value) in [
            ("scoring.sentiment_intensity.polar", s.sentiment_intensity.polar),
            ("scoring.sentiment_intensity.mixed", s.sentiment_intensity.mixed),
            ("scoring.sentiment_intensity.neutral", s.sentiment_intensity.neutral),
        ] {
            unit_interval(field, value, true)?;
        }
        if s.component_total() <= 0.0 || s.roles.max() <= 0.0 {
            return Err(ConfigError::invalid(
                "scoring",
                "component weights and role weights may not all be zero",
            ));
        }
        for (field, value) in [
            ("scoring.tipping_point_multiplier", s.tipping_point_multiplier),
            ("scoring.differentiator_multiplier", s.differentiator_multiplier),
        ] {
            if value < 1.0 {
                return Err(ConfigError::out_of_range(field, value, ">= 1.0"));
            }
        }
        at_least_one("scoring.specificity_words", s.specificity_words)?;

        let g = &self.gates;
        at_least_one("gates.min_companies", g.min_companies)?;
        at_least_one("gates.min_companies_floor", g.min_companies_floor)?;
        at_least_one("gates.min_quotes", g.min_quotes)?;
        at_least_one("gates.min_quotes_floor", g.min_quotes_floor)?;
        if g.min_companies_floor > g.min_companies {
            return Err(ConfigError::invalid(
                "gates.min_companies_floor",
                "adaptive floor exceeds the configured minimum",
            ));
        }
        if g.min_quotes_floor > g.min_quotes {
            return Err(ConfigError::invalid(
                "gates.min_quotes_floor",
                "adaptive floor exceeds the configured minimum",
            ));
        }
        for (field, value) in [
            ("gates.min_impact", g.min_impact),
            ("gates.impact_floor", g.impact_floor),
            ("gates.impact_ceiling", g.impact_ceiling),
        ] {
            if !(0.0..=5.0).contains(&value) {
                return Err(ConfigError::out_of_range(field, value, "0.0..=5.0"));
            }
        }
        if !(g.impact_floor <= g.min_impact && g.min_impact <= g.impact_ceiling) {
            return Err(ConfigError::invalid(
                "gates.min_impact",
                "must lie within impact_floor..=impact_ceiling",
            ));
        }
        unit_interval("gates.coherence", g.coherence, true)?;
        if g.low_quality_mean_relevance > g.high_quality_mean_relevance {
            return Err(ConfigError::invalid(
                "gates.low_quality_mean_relevance",
                "must not exceed gates.high_quality_mean_relevance",
            ));
        }

        let t = &self.themes;
        at_least_one("themes.min_findings", t.min_findings)?;
        at_least_one("themes.min_companies", t.min_companies)?;
        let q = &t.quality;
        for (field, value) in [
            ("themes.quality.coverage", q.coverage),
            ("themes.quality.impact", q.impact),
            ("themes.quality.volume", q.volume),
            ("themes.quality.coherence", q.coherence),
        ] {
            non_negative(field, value)?;
        }
        if q.coverage + q.impact + q.volume <= 0.0 {
            return Err(ConfigError::invalid(
                "themes.quality",
                "coverage, impact and volume weights may not all be zero",
            ));
        }
        at_least_one("themes.quality.coverage_target_companies", q.coverage_target_companies)?;
        at_least_one("themes.quality.volume_target_quotes", q.volume_target_quotes)?;

        let n = &self.narrative;
        at_least_one("narrative.required_sentences", n.required_sentences)?;
        if n.min_words > n.max_words {
            return Err(ConfigError::invalid(
                "narrative.min_words",
                "must not exceed narrative.max_words",
            ));
        }
        at_least_one("narrative.max_bundle_quotes", n.max_bundle_quotes)?;
        at_least_one("narrative.max_excerpt_chars", n.max_excerpt_chars)?;
        at_least_one("narrative.batch_size", n.batch_size)?;
        at_least_one("narrative.concurrency", n.concurrency)?;
        at_least_one("narrative.max_validation_attempts", n.max_validation_attempts as usize)?;
        at_least_one("narrative.max_service_attempts", n.max_service_attempts as usize)?;
        if !(0.0..=2.0).contains(&n.temperature) {
            return Err(ConfigError::out_of_range(
                "narrative.temperature",
                n.temperature,
                "0.0..=2.0",
            ));
        }

        let d = &self.dedup;
        unit_interval("dedup.quote_similarity", d.quote_similarity, false)?;
        unit_interval("dedup.theme_similarity", d.theme_similarity, false)?;
        at_least_one("dedup.max_findings_per_quote", d.max_findings_per_quote)?;

        let e = &self.execution;
        at_least_one("execution.workers", e.workers)?;
        at_least_one("execution.finding_batch_size", e.finding_batch_size)?;

        Ok(())
    }
}

fn at_least_one(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::out_of_range(field, 0.0, ">= 1"))
    } else {
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value, ">= 0.0"))
    }
}

fn zero_to_ten(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=10.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, value, "0.0..=10.0"))
    }
}

/// `(0, 1]`, or `[0, 1]` when `allow_zero`.
fn unit_interval(field: &str, value: f64, allow_zero: bool) -> Result<(), ConfigError> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if lower_ok && value <= 1.0 {
        Ok(())
    } else {
        let expected = if allow_zero { "0.0..=1.0" } else { "(0.0, 1.0]" };
        Err(ConfigError::out_of_range(field, value, expected))
    }
}
