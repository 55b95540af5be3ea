//! # insight-consolidation
//!
//! Keeps the output free of duplicates at two levels: near-identical quotes
//! are never cited together, and themes with near-identical statements are
//! merged into one successor while the originals are kept as superseded.

pub mod quote_dedup;
pub mod theme_merge;

pub use quote_dedup::{dedup_quotes, dedup_quotes_across, QuoteUsageLedger};
pub use theme_merge::{ConsolidationOutcome, ThemeConsolidator};
