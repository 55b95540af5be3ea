//! # insight-validation
//!
//! Quality gates for Findings and Themes: cross-company validation,
//! evidence significance, impact threshold, and narrative coherence.
//! Thresholds adapt to the corpus through an explicit, logged function.

pub mod engine;
pub mod evidence;
pub mod gates;
pub mod quality;
pub mod review;
pub mod thresholds;

pub use engine::QualityGateEngine;
pub use evidence::{quote_impact, GateEvidence};
pub use quality::{quality_score, strength_tier};
pub use review::resolve_verdict;
pub use thresholds::adapt_thresholds;
