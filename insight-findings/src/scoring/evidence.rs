//! Evidence strength (0–10) from cluster size and company diversity.

use insight_core::config::FindingConfig;

/// Diversity grows linearly up to `diversity_saturation` companies, then only
/// slowly approaches its maximum.
pub fn evidence_strength(quotes: usize, companies: usize, config: &FindingConfig) -> f64 {
    if quotes == 0 {
        return 0.0;
    }
    let size = quotes as f64 / (quotes as f64 + config.size_knee);
    let saturation = config.diversity_saturation.max(1) as f64;
    let companies = companies as f64;
    let linear = config.diversity_linear_share;
    let diversity = if companies <= saturation {
        linear * companies / saturation
    } else {
        linear + (1.0 - linear) * (1.0 - saturation / companies)
    };
    let weight = config.diversity_weight;
    (10.0 * ((1.0 - weight) * size + weight * diversity)).clamp(0.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(quotes: usize, companies: usize) -> f64 {
        evidence_strength(quotes, companies, &FindingConfig::default())
    }

    #[test]
    fn empty_cluster_has_no_strength() {
        assert_eq!(strength(0, 0), 0.0);
    }

    #[test]
    fn more_companies_score_higher() {
        assert!(strength(6, 3) > strength(6, 1));
    }

    #[test]
    fn returns_diminish_past_saturation() {
        let below = strength(8, 4) - strength(8, 3);
        let above = strength(8, 5) - strength(8, 4);
        assert!(above < below);
        assert!(strength(1000, 1000) <= 10.0);
    }

    #[test]
    fn three_quotes_three_companies() {
        // size 0.5, diversity 0.6
        assert!((strength(3, 3) - 5.5).abs() < 1e-9);
    }

    #[test]
    fn diversity_weight_is_configurable() {
        let size_only = FindingConfig {
            diversity_weight: 0.0,
            ..Default::default()
        };
        assert_eq!(
            evidence_strength(3, 1, &size_only),
            evidence_strength(3, 3, &size_only)
        );
        // size term alone: 3 / (3 + 3)
        assert!((evidence_strength(3, 3, &size_only) - 5.0).abs() < 1e-9);
    }
}
