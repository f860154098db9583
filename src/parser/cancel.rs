#[cfg(test)]
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::ParseError;

/// Cooperative cancellation flag for a running parse.
///
/// Clones share the same flag, so one clone can be handed to the parsing
/// thread while another stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    /// Checks left before the token cancels itself
    #[cfg(test)]
    budget: Option<Arc<AtomicUsize>>,
}

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Token that cancels itself once `checks` checks have passed
    #[cfg(test)]
    pub(crate) fn cancel_after(checks: usize) -> Self {
        Self {
            budget: Some(Arc::new(AtomicUsize::new(checks))),
            ..Self::default()
        }
    }

    pub(crate) fn check(&self) -> Result<(), ParseError> {
        #[cfg(test)]
        if let Some(budget) = &self.budget {
            if budget
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
                .is_err()
            {
                self.cancel();
            }
        }

        if self.is_cancelled() {
            Err(ParseError::Cancelled)
        } else {
            Ok(())
        }
    }
}
