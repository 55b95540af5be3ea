mod cluster;
mod competitive;
mod corpus;
mod evidence;
mod finding;
mod gate;
mod quote;
mod report;
mod review;
mod scope;
mod theme;

pub use cluster::{CandidateCluster, ClusterKey, ClusterMode};
pub use competitive::{CompetitiveSignal, ContextTier};
pub use corpus::CorpusProfile;
pub use evidence::{EvidenceBundle, NarrativeConstraints, QuoteExcerpt};
pub use finding::{
    Finding, FindingCategory, Polarity, PriorityTier, Rejection, RejectionReason,
};
pub use gate::{
    AppliedThresholds, GateKind, GateOutcome, GateRecord, GateResult, ThresholdAdjustment,
};
pub use quote::{DealOutcome, Quote, Sentiment, StakeholderRole};
pub use report::{MergeRecord, RunCheckpoint, RunOutput, RunReport};
pub use review::{ReviewOverride, ReviewOverrides, Verdict};
pub use scope::{AnalysisScope, GenerationId};
pub use theme::{RegenerationReason, StrengthTier, Theme, ThemeStatus};
