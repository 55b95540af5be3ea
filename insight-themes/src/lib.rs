//! # insight-themes
//!
//! Groups validated Findings into theme candidates, gates them, asks the
//! external generator for a two-sentence statement, and validates whatever
//! comes back before a Theme is published.

pub mod bundle;
pub mod generator;
pub mod grouping;
pub mod synthesizer;
pub mod validator;

pub use generator::{NarrativeGenerator, NarrativeOutcome};
pub use grouping::{group_findings, theme_company_floor, ThemeCandidate};
pub use synthesizer::{ThemeSynthesisOutcome, ThemeSynthesizer};
pub use validator::NarrativeValidator;
