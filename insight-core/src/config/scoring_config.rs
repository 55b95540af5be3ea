use serde::{Deserialize, Serialize};

use super::defaults;

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

/// Weighted-sum confidence model. Tenants tune these without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub salience: f64,
    pub sentiment_strength: f64,
    pub specificity: f64,
    pub business_impact: f64,
    pub competitive_dynamics: f64,
    pub sentiment_intensity: SentimentIntensity,
    pub roles: RoleWeights,
    /// Multiplier for deal-tipping-point language.
    pub tipping_point_multiplier: f64,
    /// Multiplier for differentiator/blocker language.
    pub differentiator_multiplier: f64,
    /// Word count at which a quote earns full specificity credit.
    pub specificity_words: usize,
    /// Impact bonus (on the 1–5 scale) for quotes with deal-impact language.
    pub deal_impact_bonus: f64,
    pub lexicon: ScoringLexicon,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            salience: defaults::DEFAULT_W_SALIENCE,
            sentiment_strength: defaults::DEFAULT_W_SENTIMENT_STRENGTH,
            specificity: defaults::DEFAULT_W_SPECIFICITY,
            business_impact: defaults::DEFAULT_W_BUSINESS_IMPACT,
            competitive_dynamics: defaults::DEFAULT_W_COMPETITIVE_DYNAMICS,
            sentiment_intensity: SentimentIntensity::default(),
            roles: RoleWeights::default(),
            tipping_point_multiplier: defaults::DEFAULT_TIPPING_POINT_MULTIPLIER,
            differentiator_multiplier: defaults::DEFAULT_DIFFERENTIATOR_MULTIPLIER,
            specificity_words: defaults::DEFAULT_SPECIFICITY_WORDS,
            deal_impact_bonus: defaults::DEFAULT_DEAL_IMPACT_BONUS,
            lexicon: ScoringLexicon::default(),
        }
    }
}

impl ScoringWeights {
    /// Sum of the additive component weights.
    pub fn component_total(&self) -> f64 {
        self.salience
            + self.sentiment_strength
            + self.specificity
            + self.business_impact
            + self.competitive_dynamics
    }
}

/// Sentiment-strength factor (0–1) per sentiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentIntensity {
    /// Positive or negative.
    pub polar: f64,
    pub mixed: f64,
    pub neutral: f64,
}

impl Default for SentimentIntensity {
    fn default() -> Self {
        Self {
            polar: defaults::DEFAULT_SENTIMENT_POLAR,
            mixed: defaults::DEFAULT_SENTIMENT_MIXED,
            neutral: defaults::DEFAULT_SENTIMENT_NEUTRAL,
        }
    }
}

/// Stakeholder-role weights. Executive and budget-holder quotes weigh most.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleWeights {
    pub executive: f64,
    pub budget_holder: f64,
    pub evaluator: f64,
    pub end_user: f64,
    pub unknown: f64,
}

impl RoleWeights {
    pub fn max(&self) -> f64 {
        [
            self.executive,
            self.budget_holder,
            self.evaluator,
            self.end_user,
            self.unknown,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self {
            executive: defaults::DEFAULT_ROLE_EXECUTIVE,
            budget_holder: defaults::DEFAULT_ROLE_BUDGET_HOLDER,
            evaluator: defaults::DEFAULT_ROLE_EVALUATOR,
            end_user: defaults::DEFAULT_ROLE_END_USER,
            unknown: defaults::DEFAULT_ROLE_UNKNOWN,
        }
    }
}

/// Keyword lists feeding the confidence model and finding categorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringLexicon {
    pub tipping_point: Vec<String>,
    pub differentiator: Vec<String>,
    pub business_impact: Vec<String>,
    pub competitive_dynamics: Vec<String>,
    pub strategic: Vec<String>,
}

impl Default for ScoringLexicon {
    fn default() -> Self {
        Self {
            tipping_point: owned(defaults::DEFAULT_TIPPING_POINT_TERMS),
            differentiator: owned(defaults::DEFAULT_DIFFERENTIATOR_TERMS),
            business_impact: owned(defaults::DEFAULT_BUSINESS_IMPACT_TERMS),
            competitive_dynamics: owned(defaults::DEFAULT_COMPETITIVE_DYNAMICS_TERMS),
            strategic: owned(defaults::DEFAULT_STRATEGIC_TERMS),
        }
    }
}

pub(crate) fn owned_terms(terms: &[&str]) -> Vec<String> {
    owned(terms)
}
