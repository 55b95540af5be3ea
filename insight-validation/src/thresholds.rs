//! Corpus-adaptive gate thresholds.
//!
//! Adaptation is a pure function of the configuration and the corpus
//! profile. Every departure from configuration is recorded and logged.

use insight_core::config::GateConfig;
use insight_core::models::{AppliedThresholds, CorpusProfile, GateKind, ThresholdAdjustment};
use tracing::info;

/// Thresholds in force for a corpus described by `profile`.
pub fn adapt_thresholds(config: &GateConfig, profile: &CorpusProfile) -> AppliedThresholds {
    let mut applied = AppliedThresholds {
        min_companies: config.min_companies,
        min_quotes: config.min_quotes,
        min_impact: config.min_impact,
        coherence: config.coherence,
        adjustments: Vec::new(),
    };
    if !config.adaptive {
        return applied;
    }

    if profile.company_count <= 1 && config.min_companies_floor < config.min_companies {
        applied.min_companies = config.min_companies_floor;
        applied.adjustments.push(ThresholdAdjustment {
            gate: GateKind::CrossCompany,
            configured: config.min_companies as f64,
            applied: applied.min_companies as f64,
            reason: format!("single-company corpus ({} companies)", profile.company_count),
        });
    }

    if profile.quote_count < config.small_corpus_quotes
        && config.min_quotes_floor < config.min_quotes
    {
        applied.min_quotes = config.min_quotes_floor;
        applied.adjustments.push(ThresholdAdjustment {
            gate: GateKind::EvidenceSignificance,
            configured: config.min_quotes as f64,
            applied: applied.min_quotes as f64,
            reason: format!(
                "small corpus ({} quotes, below {})",
                profile.quote_count, config.small_corpus_quotes
            ),
        });
    }

    let impact = if profile.mean_relevance < config.low_quality_mean_relevance {
        Some((config.impact_floor, "low"))
    } else if profile.mean_relevance >= config.high_quality_mean_relevance {
        Some((config.impact_ceiling, "high"))
    } else {
        None
    };
    if let Some((value, quality)) = impact {
        if (value - config.min_impact).abs() > f64::EPSILON {
            applied.min_impact = value;
            applied.adjustments.push(ThresholdAdjustment {
                gate: GateKind::ImpactThreshold,
                configured: config.min_impact,
                applied: value,
                reason: format!(
                    "{quality} corpus mean relevance ({:.2})",
                    profile.mean_relevance
                ),
            });
        }
    }

    for adjustment in &applied.adjustments {
        info!(
            gate = adjustment.gate.as_str(),
            configured = adjustment.configured,
            applied = adjustment.applied,
            reason = %adjustment.reason,
            "gate threshold adapted"
        );
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(quote_count: usize, company_count: usize, mean_relevance: f64) -> CorpusProfile {
        CorpusProfile {
            quote_count,
            company_count,
            mean_relevance,
        }
    }

    #[test]
    fn typical_corpus_uses_configured_thresholds() {
        let applied = adapt_thresholds(&GateConfig::default(), &profile(200, 12, 3.4));
        assert_eq!(applied.min_companies, 2);
        assert_eq!(applied.min_quotes, 3);
        assert_eq!(applied.min_impact, 3.0);
        assert!(!applied.is_adjusted());
    }

    #[test]
    fn single_company_corpus_lowers_company_floor() {
        let applied = adapt_thresholds(&GateConfig::default(), &profile(200, 1, 3.4));
        assert_eq!(applied.min_companies, 1);
        assert_eq!(applied.adjustments.len(), 1);
        assert_eq!(applied.adjustments[0].gate, GateKind::CrossCompany);
    }

    #[test]
    fn small_corpus_lowers_quote_floor() {
        let applied = adapt_thresholds(&GateConfig::default(), &profile(20, 5, 3.4));
        assert_eq!(applied.min_quotes, 2);
        assert_eq!(applied.adjustments[0].configured, 3.0);
        assert_eq!(applied.adjustments[0].applied, 2.0);
    }

    #[test]
    fn impact_bar_follows_corpus_quality() {
        let low = adapt_thresholds(&GateConfig::default(), &profile(200, 5, 2.1));
        let high = adapt_thresholds(&GateConfig::default(), &profile(200, 5, 4.2));
        assert_eq!(low.min_impact, 2.5);
        assert_eq!(high.min_impact, 3.5);
    }

    #[test]
    fn non_adaptive_config_is_applied_verbatim() {
        let config = GateConfig {
            adaptive: false,
            ..Default::default()
        };
        let applied = adapt_thresholds(&config, &profile(3, 1, 1.0));
        assert_eq!(applied.min_companies, 2);
        assert_eq!(applied.min_quotes, 3);
        assert_eq!(applied.min_impact, 3.0);
        assert!(!applied.is_adjusted());
    }
}
