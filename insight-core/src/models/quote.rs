use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of the deal the interview was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealOutcome {
    Won,
    Lost,
    Other,
}

/// Sentiment assigned by the upstream scoring step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Mixed => "mixed",
        }
    }
}

/// Role of the interviewee in the buying decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderRole {
    Executive,
    BudgetHolder,
    Evaluator,
    EndUser,
    #[default]
    Unknown,
}

/// A single scored verbatim customer statement. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub company: String,
    pub interviewee: String,
    #[serde(default)]
    pub stakeholder_role: StakeholderRole,
    pub deal_outcome: DealOutcome,
    pub criterion: String,
    #[serde(default)]
    pub secondary_criterion: Option<String>,
    #[serde(default)]
    pub tertiary_criterion: Option<String>,
    /// 0–5. Zero means "not relevant" and is never clustered.
    pub relevance: u8,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub criterion_relevance: BTreeMap<String, u8>,
    /// Assigned subject category; the primary criterion when absent.
    #[serde(default)]
    pub subject: Option<String>,
}

impl Quote {
    pub const MAX_RELEVANCE: u8 = 5;

    /// Whether this quote may take part in clustering at all.
    pub fn is_relevant(&self) -> bool {
        self.relevance > 0
    }

    /// The subject used for partitioning.
    pub fn subject_key(&self) -> &str {
        self.subject.as_deref().unwrap_or(&self.criterion)
    }

    /// Primary, secondary and tertiary criteria, in that order.
    pub fn criteria(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.criterion.as_str())
            .chain(self.secondary_criterion.as_deref())
            .chain(self.tertiary_criterion.as_deref())
    }

    /// Relevance of this quote to `criterion`.
    ///
    /// The per-criterion map wins; otherwise the overall relevance applies
    /// to any criterion the quote is mapped to, and 0 to everything else.
    pub fn relevance_for(&self, criterion: &str) -> u8 {
        if let Some(&score) = self.criterion_relevance.get(criterion) {
            return score;
        }
        if self.criteria().any(|c| c == criterion) {
            self.relevance
        } else {
            0
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
