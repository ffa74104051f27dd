//! Cooperative cancellation via a shared AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable cancellation flag shared between a caller and a running
/// scoring or search task.
///
/// Long-running loops poll [`is_cancelled`](Self::is_cancelled) at coarse
/// checkpoints and return what they have when it flips.
///
/// # Example
///
/// ```
/// use fusionforge_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let worker_view = token.clone();
///
/// assert!(!worker_view.is_cancelled());
/// token.cancel();
/// assert!(worker_view.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// The underlying flag, for callers that already hold an `AtomicBool`.
    pub fn as_flag(&self) -> &AtomicBool {
        &self.flag
    }
}
