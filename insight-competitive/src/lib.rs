//! # insight-competitive
//!
//! Detects competitor names and market language in theme statements and
//! supporting quotes, and grades the comparative context around them.

pub mod detector;
pub mod patterns;

pub use detector::CompetitiveDetector;
