//! # insight-engine
//!
//! Runs the whole pipeline for one tenant scope: clustering, finding
//! synthesis, gating, theme synthesis, competitive annotation and
//! consolidation. Produces a `RunOutput` with its completion report and a
//! checkpoint, and hands it to a result sink.

pub mod engine;
pub mod report;
pub mod sink;
pub mod spans;
pub mod telemetry;

pub use engine::{InsightEngine, RunOptions};
pub use sink::{InMemorySink, JsonSink};
