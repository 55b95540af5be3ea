use crate::errors::InsightResult;
use crate::models::RunOutput;

/// Receives the finalized output of a run. Formatting and storage schema
/// belong to the implementor.
pub trait IResultSink: Send + Sync {
    fn persist(&self, output: &RunOutput) -> InsightResult<()>;
}
