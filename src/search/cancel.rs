//! Cooperative cancellation for a running search
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag the caller sets to stop a search at the next checkpoint.
///
/// Clones observe the same flag. The engine only reads it, between walk
/// entries, so a file that is already being extracted still runs to the end.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
