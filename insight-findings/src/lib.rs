//! # insight-findings
//!
//! Turns candidate clusters into Findings: picks the criterion, filters and
//! dedups the evidence, scores evidence strength and confidence, writes a
//! deterministic statement, and enforces the quote reuse cap.

pub mod scoring;
pub mod statement;
pub mod synthesizer;

pub use synthesizer::{FindingSynthesizer, SynthesisOutcome};
