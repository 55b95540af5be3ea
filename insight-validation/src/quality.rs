//! Theme quality score on 0–10, and the strength tier of a theme's evidence.

use insight_core::config::{QualityWeights, ThemeConfig};
use insight_core::models::StrengthTier;

use crate::evidence::GateEvidence;

/// Blend of company coverage, mean impact, quote volume and sentiment
/// coherence. Mixed-signal themes omit coherence and the remaining weights
/// are renormalized.
pub fn quality_score(evidence: &GateEvidence, weights: &QualityWeights) -> f64 {
    let coverage =
        (evidence.company_count as f64 / weights.coverage_target_companies.max(1) as f64).min(1.0);
    let impact = ((evidence.mean_impact - 1.0) / 4.0).clamp(0.0, 1.0);
    let volume =
        (evidence.quote_count as f64 / weights.volume_target_quotes.max(1) as f64).min(1.0);

    let mut weighted =
        weights.coverage * coverage + weights.impact * impact + weights.volume * volume;
    let mut total = weights.coverage + weights.impact + weights.volume;
    if evidence.polarity.expected_sentiment().is_some() {
        weighted += weights.coherence * evidence.coherence();
        total += weights.coherence;
    }
    if total <= 0.0 {
        return 0.0;
    }
    (10.0 * weighted / total).clamp(0.0, 10.0)
}

/// Strength tier for a theme backed by `companies` companies and `findings`
/// findings. `None` below the emerging floor.
pub fn strength_tier(
    companies: usize,
    findings: usize,
    min_companies: usize,
    config: &ThemeConfig,
) -> Option<StrengthTier> {
    if companies >= config.high_tier_companies && findings >= config.high_tier_findings {
        Some(StrengthTier::High)
    } else if companies >= config.medium_tier_companies && findings >= config.medium_tier_findings {
        Some(StrengthTier::Medium)
    } else if companies >= min_companies && findings >= config.min_findings {
        Some(StrengthTier::Emerging)
    } else {
        None
    }
}
