//! Evidence strength and confidence scoring.

pub mod confidence;
pub mod evidence;

pub use confidence::{confidence, quote_score};
pub use evidence::evidence_strength;
