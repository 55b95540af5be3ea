/// Configuration errors. Always fatal, raised before any clustering begins.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {reason}")]
    Parse { reason: String },

    #[error("failed to read configuration file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: String,
        value: f64,
        expected: String,
    },

    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(field: &str, value: f64, expected: &str) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            value,
            expected: expected.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
