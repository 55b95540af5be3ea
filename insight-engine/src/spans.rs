//! Span definitions per pipeline stage.

/// Span for one whole run.
#[macro_export]
macro_rules! run_span {
    ($tenant:expr, $generation:expr) => {
        tracing::info_span!("insight.run", tenant = %$tenant, generation = %$generation)
    };
}

#[macro_export]
macro_rules! clustering_span {
    ($quote_count:expr) => {
        tracing::info_span!("insight.clustering", quote_count = $quote_count)
    };
}

#[macro_export]
macro_rules! findings_span {
    ($cluster_count:expr) => {
        tracing::info_span!("insight.findings", cluster_count = $cluster_count)
    };
}

#[macro_export]
macro_rules! gates_span {
    ($subject_count:expr) => {
        tracing::info_span!("insight.gates", subject_count = $subject_count)
    };
}

#[macro_export]
macro_rules! themes_span {
    ($finding_count:expr) => {
        tracing::info_span!("insight.themes", finding_count = $finding_count)
    };
}

#[macro_export]
macro_rules! consolidation_span {
    ($theme_count:expr) => {
        tracing::info_span!("insight.consolidation", theme_count = $theme_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RUN: &str = "insight.run";
    pub const CLUSTERING: &str = "insight.clustering";
    pub const FINDINGS: &str = "insight.findings";
    pub const GATES: &str = "insight.gates";
    pub const THEMES: &str = "insight.themes";
    pub const CONSOLIDATION: &str = "insight.consolidation";
}
