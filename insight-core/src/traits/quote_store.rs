use crate::errors::InsightResult;
use crate::models::{AnalysisScope, Quote};

/// Read-only source of scored quotes, supplied by the upstream scoring step.
pub trait IQuoteStore: Send + Sync {
    /// All quotes visible to `scope`.
    fn load(&self, scope: &AnalysisScope) -> InsightResult<Vec<Quote>>;
}
