use insight_core::errors::*;

#[test]
fn invalid_quote_carries_id_and_reason() {
    let err = InsightError::InvalidQuote {
        id: "q-42".into(),
        reason: "empty text".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("q-42"));
    assert!(msg.contains("empty text"));
}

#[test]
fn service_exhaustion_carries_counts() {
    let err = InsightError::ExternalServiceExhausted {
        attempted: 4,
        failed: 4,
    };
    let msg = err.to_string();
    assert!(msg.contains("4 of 4"));
}

#[test]
fn config_error_converts_into_insight_error() {
    let err: InsightError = ConfigError::Parse {
        reason: "bad".into(),
    }
    .into();
    assert!(matches!(err, InsightError::ConfigError(_)));
}

#[test]
fn generation_error_retryability() {
    assert!(GenerationError::Unavailable { reason: "down".into() }.is_retryable());
    assert!(GenerationError::Transient { reason: "429".into() }.is_retryable());
    assert!(!GenerationError::Rejected { reason: "policy".into() }.is_retryable());
}
