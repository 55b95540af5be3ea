//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a per-crate filter, e.g.
/// `INSIGHT_LOG=insight_themes=debug,insight_validation=info`.
pub const LOG_ENV: &str = "INSIGHT_LOG";

static INIT: Once = Once::new();

/// Install a global fmt subscriber, JSON when `json` is set.
///
/// `INSIGHT_LOG` takes precedence over `default_level`. Idempotent; a
/// subscriber installed elsewhere is left in place.
pub fn init_tracing(default_level: &str, json: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true);
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing("debug", false);
        init_tracing("info", true);
        assert!(INIT.is_completed());
        tracing::info!(component = "telemetry", "subscriber installed");
    }
}
