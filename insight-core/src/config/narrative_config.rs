use serde::{Deserialize, Serialize};

use super::defaults;
use super::scoring_config::owned_terms;

/// Structural contract for generated theme statements and the call policy
/// for the external generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    pub required_sentences: usize,
    pub min_words: usize,
    pub max_words: usize,
    /// Solutioning language that may not appear in a statement.
    pub banned_phrases: Vec<String>,
    /// Industry-specific jargon that may not appear in a statement.
    pub jargon: Vec<String>,
    pub max_bundle_quotes: usize,
    pub max_excerpt_chars: usize,
    /// Recommended to the backend; the engine cannot enforce it.
    pub temperature: f64,
    pub max_validation_attempts: u32,
    pub max_service_attempts: u32,
    pub backoff_base_ms: u64,
    pub batch_size: usize,
    pub concurrency: usize,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            required_sentences: defaults::DEFAULT_REQUIRED_SENTENCES,
            min_words: defaults::DEFAULT_MIN_WORDS,
            max_words: defaults::DEFAULT_MAX_WORDS,
            banned_phrases: owned_terms(defaults::DEFAULT_BANNED_PHRASES),
            jargon: owned_terms(defaults::DEFAULT_JARGON),
            max_bundle_quotes: defaults::DEFAULT_MAX_BUNDLE_QUOTES,
            max_excerpt_chars: defaults::DEFAULT_MAX_EXCERPT_CHARS,
            temperature: defaults::DEFAULT_TEMPERATURE,
            max_validation_attempts: defaults::DEFAULT_MAX_VALIDATION_ATTEMPTS,
            max_service_attempts: defaults::DEFAULT_MAX_SERVICE_ATTEMPTS,
            backoff_base_ms: defaults::DEFAULT_BACKOFF_BASE_MS,
            batch_size: defaults::DEFAULT_GENERATION_BATCH_SIZE,
            concurrency: defaults::DEFAULT_GENERATION_CONCURRENCY,
        }
    }
}
