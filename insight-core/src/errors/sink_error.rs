/// Errors raised while handing run output to a result sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink I/O failed: {reason}")]
    Io { reason: String },

    #[error("failed to serialize run output: {reason}")]
    Serialization { reason: String },
}
