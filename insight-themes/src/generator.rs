//! Calls the external generator and validates what comes back.
//!
//! Two independent budgets apply per theme. Service failures (unavailable,
//! transient) are retried with exponential backoff up to
//! `max_service_attempts` per call. Statements that violate the structural
//! contract are regenerated up to `max_validation_attempts`, each retry
//! carrying the previous violations.

use std::sync::Arc;
use std::time::Duration;

use insight_core::config::NarrativeConfig;
use insight_core::errors::GenerationError;
use insight_core::models::{EvidenceBundle, RegenerationReason};
use insight_core::traits::ITextGenerator;
use tracing::{debug, warn};

use crate::validator::NarrativeValidator;

/// Result of generating one theme statement.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    Generated {
        statement: String,
        /// Backend calls made, retries included.
        attempts: u32,
    },
    Failed {
        reason: RegenerationReason,
        attempts: u32,
    },
}

impl NarrativeOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Generated { attempts, .. } | Self::Failed { attempts, .. } => *attempts,
        }
    }

    /// The backend itself failed, as opposed to producing invalid text.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::Failed {
                reason: RegenerationReason::ServiceUnavailable,
                ..
            }
        )
    }
}

/// Generator plus validator plus the retry policy around them.
#[derive(Clone)]
pub struct NarrativeGenerator {
    backend: Arc<dyn ITextGenerator>,
    validator: NarrativeValidator,
    max_validation_attempts: u32,
    max_service_attempts: u32,
    backoff_base: Duration,
}

impl NarrativeGenerator {
    pub fn new(backend: Arc<dyn ITextGenerator>, config: &NarrativeConfig) -> Self {
        Self {
            backend,
            validator: NarrativeValidator::new(config),
            max_validation_attempts: config.max_validation_attempts.max(1),
            max_service_attempts: config.max_service_attempts.max(1),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn generate(&self, mut bundle: EvidenceBundle) -> NarrativeOutcome {
        let mut calls = 0u32;
        for attempt in 1..=self.max_validation_attempts {
            bundle.attempt = attempt;
            let text = match self.call_with_retry(&bundle, &mut calls) {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        theme = %bundle.theme_id,
                        backend = self.backend.name(),
                        error = %e,
                        calls,
                        "generation service exhausted for theme"
                    );
                    return NarrativeOutcome::Failed {
                        reason: RegenerationReason::ServiceUnavailable,
                        attempts: calls,
                    };
                }
            };

            let violations = self.validator.violations(&text);
            if violations.is_empty() {
                return NarrativeOutcome::Generated {
                    statement: text.trim().to_string(),
                    attempts: calls,
                };
            }
            debug!(
                theme = %bundle.theme_id,
                attempt,
                violations = ?violations,
                "generated statement rejected"
            );
            bundle.previous_violations = violations;
        }

        warn!(
            theme = %bundle.theme_id,
            attempts = self.max_validation_attempts,
            "no valid statement within the validation budget"
        );
        NarrativeOutcome::Failed {
            reason: RegenerationReason::ValidationFailed,
            attempts: calls,
        }
    }

    fn call_with_retry(
        &self,
        bundle: &EvidenceBundle,
        calls: &mut u32,
    ) -> Result<String, GenerationError> {
        let mut backoff = self.backoff_base;
        let mut attempt = 1;
        loop {
            *calls += 1;
            match self.backend.generate(bundle) {
                Ok(text) => return Ok(text),
                Err(e) if !e.is_retryable() || attempt >= self.max_service_attempts => {
                    return Err(e)
                }
                Err(e) => {
                    debug!(
                        theme = %bundle.theme_id,
                        attempt,
                        max = self.max_service_attempts,
                        error = %e,
                        ?backoff,
                        "generation call failed, retrying"
                    );
                    std::thread::sleep(backoff);
                    backoff *= 2;
                    attempt += 1;
                }
            }
        }
    }
}

impl std::fmt::Debug for NarrativeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeGenerator")
            .field("backend", &self.backend.name())
            .field("max_validation_attempts", &self.max_validation_attempts)
            .field("max_service_attempts", &self.max_service_attempts)
            .finish()
    }
}
