mod config_error;
mod generation_error;
mod sink_error;

pub use config_error::ConfigError;
pub use generation_error::GenerationError;
pub use sink_error::SinkError;

/// Top-level error for the Insight engine.
///
/// Only configuration errors and total exhaustion of the text-generation
/// service abort a run; everything else is isolated per cluster or per theme.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("invalid quote {id}: {reason}")]
    InvalidQuote { id: String, reason: String },

    #[error("duplicate quote id: {id}")]
    DuplicateQuote { id: String },

    #[error("text generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("text generation service exhausted: {failed} of {attempted} theme generations failed")]
    ExternalServiceExhausted { attempted: usize, failed: usize },

    #[error("a run is already in progress on this engine")]
    RunInProgress,

    #[error("worker pool unavailable: {reason}")]
    WorkerPool { reason: String },

    #[error("checkpoint belongs to generation {checkpoint}, run is {run}")]
    CheckpointMismatch { checkpoint: String, run: String },

    #[error("result sink error: {0}")]
    SinkError(#[from] SinkError),
}

/// Convenience alias used across the workspace.
pub type InsightResult<T> = Result<T, InsightError>;
