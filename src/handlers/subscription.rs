//! # Cancellation handles.
//!
//! Every subscribe-style operation (`on`, `once`, `on_all`) returns a
//! [`Subscription`]: a small value object holding a weak reference to the
//! dispatcher core, the registration it targets (key plus handler identity,
//! or the wildcard slot), and an already-cancelled guard flag.
//!
//! ## Rules
//! - [`Subscription::cancel`] removes exactly the registration it was
//!   returned for; calling it again is a guarded no-op.
//! - Dropping the handle does **not** cancel: a registration outlives any
//!   handle pointing at it.
//! - The reference to the dispatcher is weak, so cancelling after the
//!   dispatcher is gone is a safe no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;

use crate::core::DispatcherCore;
use crate::handlers::Handler;
use crate::keys::Key;

enum Target<T> {
    Keyed { key: Key, handler: Handler<T> },
    Wildcard { handler: Handler<T> },
}

/// Idempotent cancellation handle for one registration.
pub struct Subscription<T> {
    core: Weak<DispatcherCore<T>>,
    target: Target<T>,
    cancelled: AtomicBool,
}

impl<T> Subscription<T> {
    pub(crate) fn keyed(core: Weak<DispatcherCore<T>>, key: Key, handler: Handler<T>) -> Self {
        Self {
            core,
            target: Target::Keyed { key, handler },
            cancelled: AtomicBool::new(false),
        }
    }

    pub(crate) fn wildcard(core: Weak<DispatcherCore<T>>, handler: Handler<T>) -> Self {
        Self {
            core,
            target: Target::Wildcard { handler },
            cancelled: AtomicBool::new(false),
        }
    }

    /// Removes the registration this handle was returned for.
    ///
    /// The first call takes effect immediately; later calls are no-ops (the
    /// guard flag wins the race, the registry lock serializes the removal).
    /// Safe to call after the dispatcher has been dropped.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::Relaxed) {
            return;
        }
        let Some(core) = self.core.upgrade() else {
            return;
        };
        let mut registry = core.registry.lock();
        match &self.target {
            Target::Keyed { key, handler } => registry.remove_keyed(key, handler),
            Target::Wildcard { handler } => registry.remove_wildcard(handler),
        }
    }

    /// True once [`Subscription::cancel`] has been called.
    ///
    /// Reports only what this handle did: a registration removed by other
    /// means (`off`, `off_all`, a fired `once`) does not flip this flag.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let target = match &self.target {
            Target::Keyed { key, .. } => format!("key {key}"),
            Target::Wildcard { .. } => "wildcard".to_string(),
        };
        write!(
            f,
            "Subscription({target}, cancelled: {})",
            self.is_cancelled()
        )
    }
}
