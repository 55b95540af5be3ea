//! Cooperative cancellation for a run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Checked by the pipeline between batches. Work already finished is kept.
pub trait ICancellable: Send + Sync {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);
}

/// Shared flag; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ICancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }
}
