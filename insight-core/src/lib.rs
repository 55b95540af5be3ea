//! # insight-core
//!
//! Foundation crate for the Insight theme discovery engine.
//! Defines the quote/finding/theme records, traits at the external seams,
//! errors, configuration, and defaults. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod errors;
pub mod ids;
pub mod models;
pub mod store;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::InsightConfig;
pub use errors::{InsightError, InsightResult};
pub use models::{AnalysisScope, Finding, GenerationId, Quote, Sentiment, Theme};
pub use store::{InMemoryQuoteStore, QuoteIndex};
