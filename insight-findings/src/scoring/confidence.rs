//! Weighted-sum confidence model.
//!
//! Each quote gets a 0–1 score from five additive factors, scaled by its
//! stakeholder-role weight and any deal-impact multipliers. Finding
//! confidence is ten times the mean quote score, capped at 10.

use insight_core::config::ScoringWeights;
use insight_core::models::StakeholderRole;
use insight_core::{Quote, Sentiment};
use insight_validation::evidence::contains_any;

/// Score one quote for `criterion`, in 0–1.
pub fn quote_score(quote: &Quote, criterion: &str, weights: &ScoringWeights) -> f64 {
    let lexicon = &weights.lexicon;

    // Factor 1: Salience, relevance to the criterion.
    let f_salience = quote.relevance_for(criterion) as f64 / Quote::MAX_RELEVANCE as f64;

    // Factor 2: Sentiment strength.
    let intensity = &weights.sentiment_intensity;
    let f_sentiment = match quote.sentiment {
        Sentiment::Positive | Sentiment::Negative => intensity.polar,
        Sentiment::Mixed => intensity.mixed,
        Sentiment::Neutral => intensity.neutral,
    };

    // Factor 3: Specificity, approximated by length.
    let f_specificity =
        (quote.word_count() as f64 / weights.specificity_words.max(1) as f64).min(1.0);

    // Factor 4: Business-impact language.
    let f_business = indicator(contains_any(&quote.text, &lexicon.business_impact));

    // Factor 5: Competitive dynamics.
    let f_competitive = indicator(contains_any(&quote.text, &lexicon.competitive_dynamics));

    let total = weights.component_total();
    if total <= 0.0 {
        return 0.0;
    }
    let base = (weights.salience * f_salience
        + weights.sentiment_strength * f_sentiment
        + weights.specificity * f_specificity
        + weights.business_impact * f_business
        + weights.competitive_dynamics * f_competitive)
        / total;

    let role_max = weights.roles.max();
    let role = if role_max > 0.0 {
        role_weight(quote.stakeholder_role, weights) / role_max
    } else {
        0.0
    };

    let mut multiplier = 1.0;
    if contains_any(&quote.text, &lexicon.tipping_point) {
        multiplier *= weights.tipping_point_multiplier;
    }
    if contains_any(&quote.text, &lexicon.differentiator) {
        multiplier *= weights.differentiator_multiplier;
    }

    (base * role * multiplier).clamp(0.0, 1.0)
}

/// Confidence (0–10) of a finding from its per-quote scores.
pub fn confidence(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    (10.0 * mean).clamp(0.0, 10.0)
}

fn role_weight(role: StakeholderRole, weights: &ScoringWeights) -> f64 {
    let roles = &weights.roles;
    match role {
        StakeholderRole::Executive => roles.executive,
        StakeholderRole::BudgetHolder => roles.budget_holder,
        StakeholderRole::Evaluator => roles.evaluator,
        StakeholderRole::EndUser => roles.end_user,
        StakeholderRole::Unknown => roles.unknown,
    }
}

fn indicator(present: bool) -> f64 {
    if present {
        1.0
    } else {
        0.0
    }
}
