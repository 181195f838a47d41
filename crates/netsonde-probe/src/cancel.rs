//! Cooperative cancellation for probe runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared cancellation signal checked at each chunk boundary.
///
/// Clones share one flag, so a handle kept by the caller (e.g. a Ctrl-C
/// handler) cancels the probe run holding the other clone. Cancellation is
/// cooperative: a read already in flight finishes its bounded wait first.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a new, un-cancelled flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every clone of this flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once any clone has signalled cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
