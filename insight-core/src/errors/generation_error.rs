/// Errors returned by an external text-generation backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// The service could not be reached or refused the connection.
    #[error("generation service unavailable: {reason}")]
    Unavailable { reason: String },

    /// A transient failure (timeout, rate limit, 5xx).
    #[error("transient generation failure: {reason}")]
    Transient { reason: String },

    /// The backend refused this particular bundle. Retrying will not help.
    #[error("generation request rejected: {reason}")]
    Rejected { reason: String },
}

impl GenerationError {
    /// Whether another attempt with backoff may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Transient { .. })
    }
}
