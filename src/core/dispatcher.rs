//! # The dispatcher: subscribe, unsubscribe, emit.
//!
//! [`Dispatcher`] owns the registries and performs synchronous fan-out.
//! Everything happens on the caller's stack: when `emit` returns, every
//! handler that was going to run has run.
//!
//! ## Architecture
//! ```text
//!  on(key, h) ────► keyed map ───┐
//!  on_all(h) ────► wildcard list ┼── Registry (one mutex)
//!  off / off_all ────────────────┘
//!
//!  emit(key, payload)
//!      │ lock, copy out the key's handler list, unlock
//!      ├─► handler 1 ─┐
//!      ├─► handler 2 ─┼─ failures isolated, reported to on_error
//!      ├─► ...        ─┘
//!      │ lock, copy out the wildcard list, unlock
//!      └─► wildcard handlers, invoked with (key, payload)
//! ```
//!
//! ## Rules
//! - **Snapshot before iterate**: each dispatch pass copies the relevant
//!   handler list under the lock, then invokes without the lock. An emission
//!   delivers to exactly the handlers registered when it started — handlers
//!   added during dispatch wait for the next emission, handlers removed
//!   during dispatch still receive the current one.
//! - **The lock is never held while a handler runs**, so handlers may call
//!   any dispatcher operation (including `emit`) from inside their own
//!   invocation.
//! - **Failures never escape `emit`**: a handler returning `Err` or panicking
//!   is reported through the configured hook (or the `tracing` sink) and
//!   dispatch continues with the next handler in the snapshot.
//!
//! # Example
//! ```
//! use std::sync::{Arc, Mutex};
//! use fanout::{Dispatcher, Handler};
//!
//! let bus: Dispatcher<String> = Dispatcher::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = {
//!     let seen = Arc::clone(&seen);
//!     Handler::keyed(move |payload: Option<&String>| {
//!         seen.lock().unwrap().push(payload.cloned());
//!         Ok(())
//!     })
//! };
//!
//! let sub = bus.on("saved", sink).unwrap();
//! bus.emit("saved", Some(&"disk".to_string()));
//! sub.cancel();
//! bus.emit("saved", None); // nobody listens anymore
//!
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::Mutex;

use crate::config::Config;
use crate::core::registry::Registry;
use crate::error::{BoxError, DispatchError, HandlerPanic};
use crate::handlers::{Handler, HandlerShape, Subscription};
use crate::keys::Key;

/// Shared state behind a dispatcher and all of its clones.
pub(crate) struct DispatcherCore<T> {
    pub(crate) registry: Mutex<Registry<T>>,
    pub(crate) config: Config<T>,
}

/// Synchronous keyed publish/subscribe dispatcher.
///
/// Cloning is cheap and clones share state: registrations made through one
/// clone are visible to every other. All operations take `&self`; the
/// dispatcher is `Send + Sync` and every mutation is serialized internally.
pub struct Dispatcher<T> {
    core: Arc<DispatcherCore<T>>,
}

impl<T: 'static> Dispatcher<T> {
    /// Creates a dispatcher with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a dispatcher with the given configuration.
    #[must_use]
    pub fn with_config(config: Config<T>) -> Self {
        Self {
            core: Arc::new(DispatcherCore {
                registry: Mutex::new(Registry::new()),
                config,
            }),
        }
    }

    /// The configuration this dispatcher was created with.
    pub fn config(&self) -> &Config<T> {
        &self.core.config
    }

    /// Registers `handler` for emissions on `key`.
    ///
    /// Re-registering a clone of an already-registered handler is a no-op.
    /// Registration always succeeds once the shape check passes; reaching
    /// the configured soft listener cap only logs a warning.
    ///
    /// Returns a [`Subscription`] that removes exactly this registration.
    ///
    /// # Errors
    /// [`DispatchError::InvalidHandler`] if `handler` is wildcard-shaped;
    /// nothing is registered in that case.
    pub fn on(
        &self,
        key: impl Into<Key>,
        handler: Handler<T>,
    ) -> Result<Subscription<T>, DispatchError> {
        handler.expect_shape(HandlerShape::Keyed)?;
        let key = key.into();
        self.insert_keyed(&key, handler.clone());
        Ok(Subscription::keyed(
            Arc::downgrade(&self.core),
            key,
            handler,
        ))
    }

    /// Registers `handler` for the next emission on `key` only.
    ///
    /// The handler is wrapped in an adapter that removes itself after the
    /// first delivery — on every exit path, including a failing or panicking
    /// handler (the failure still reaches the error hook). Overlapping
    /// deliveries of the same adapter (a handler re-emitting the key it is
    /// registered on) invoke the wrapped handler at most once.
    ///
    /// The returned [`Subscription`] targets the adapter: cancelling before
    /// the first emission means the handler never fires; cancelling after is
    /// a no-op.
    ///
    /// # Errors
    /// [`DispatchError::InvalidHandler`] if `handler` is wildcard-shaped;
    /// nothing is registered in that case.
    pub fn once(
        &self,
        key: impl Into<Key>,
        handler: Handler<T>,
    ) -> Result<Subscription<T>, DispatchError> {
        handler.expect_shape(HandlerShape::Keyed)?;
        let key = key.into();

        // The adapter needs its own identity to remove itself, which only
        // exists once it is constructed; the slot closes that loop.
        let slot: Arc<OnceLock<Handler<T>>> = Arc::new(OnceLock::new());
        let adapter = Handler::keyed({
            let core = Arc::downgrade(&self.core);
            let key = key.clone();
            let slot = Arc::clone(&slot);
            let fired = std::sync::atomic::AtomicBool::new(false);
            move |payload| {
                if fired.swap(true, std::sync::atomic::Ordering::Relaxed) {
                    return Ok(());
                }
                let _cleanup = RemoveOnExit {
                    core: core.clone(),
                    key: key.clone(),
                    slot: Arc::clone(&slot),
                };
                handler.invoke(&key, payload)
            }
        });
        let _ = slot.set(adapter.clone());

        self.insert_keyed(&key, adapter.clone());
        Ok(Subscription::keyed(
            Arc::downgrade(&self.core),
            key,
            adapter,
        ))
    }

    /// Registers a wildcard handler: it receives every emission, on any key,
    /// together with the key. Duplicate-free by handler identity.
    ///
    /// # Errors
    /// [`DispatchError::InvalidHandler`] if `handler` is keyed-shaped;
    /// nothing is registered in that case.
    pub fn on_all(&self, handler: Handler<T>) -> Result<Subscription<T>, DispatchError> {
        handler.expect_shape(HandlerShape::Wildcard)?;
        self.core.registry.lock().insert_wildcard(handler.clone());
        Ok(Subscription::wildcard(Arc::downgrade(&self.core), handler))
    }

    /// Removes `handler` from `key`'s registrations.
    ///
    /// Silent no-op when the key has no registrations or the handler is not
    /// among them.
    pub fn off(&self, key: impl Into<Key>, handler: &Handler<T>) {
        let key = key.into();
        self.core.registry.lock().remove_keyed(&key, handler);
    }

    /// Bulk removal.
    ///
    /// - `Some(key)` — drops every registration on that key (silent no-op if
    ///   absent); wildcard registrations are untouched.
    /// - `None` — drops every keyed registration **and** the wildcard list.
    ///   This releases all handler references the dispatcher holds, which is
    ///   the whole teardown story.
    pub fn off_all(&self, key: Option<&Key>) {
        let mut registry = self.core.registry.lock();
        match key {
            Some(key) => registry.clear_key(key),
            None => registry.clear(),
        }
    }

    /// Emits on `key`, invoking every registered handler synchronously.
    ///
    /// Keyed handlers run first (registration order), then wildcard handlers
    /// (registration order) with `(key, payload)`. Each pass iterates a copy
    /// of the list taken when the pass starts; see the module docs for the
    /// re-entrancy rules. Failures are isolated per handler and never reach
    /// the caller. Emitting on a key nobody listens to is a no-op.
    pub fn emit(&self, key: impl Into<Key>, payload: Option<&T>) {
        let key = key.into();

        let keyed = self.core.registry.lock().snapshot_key(&key);
        for handler in &keyed {
            self.deliver(handler, &key, payload);
        }

        let wildcard = self.core.registry.lock().snapshot_wildcard();
        for handler in &wildcard {
            self.deliver(handler, &key, payload);
        }
    }

    /// Detached copy of the keyed registry: every key with at least one
    /// registration, mapped to its handlers in registration order.
    ///
    /// Handler values in the copy share identity with the registered ones,
    /// so they can be fed back into [`Dispatcher::off`]. Mutating the copy
    /// has no effect on the dispatcher. Wildcard handlers are not included.
    #[must_use]
    pub fn all(&self) -> std::collections::HashMap<Key, Vec<Handler<T>>> {
        self.core.registry.lock().snapshot_all()
    }

    fn insert_keyed(&self, key: &Key, handler: Handler<T>) {
        let registered = {
            let mut registry = self.core.registry.lock();
            registry.insert_keyed(key, handler)
        };
        let limit = self.core.config.max_listeners;
        // Outside the lock: the subscriber behind tracing is user code too.
        if limit != 0 && registered >= limit {
            tracing::warn!(
                key = %key,
                limit,
                registered,
                "listener count for key reached the soft cap"
            );
        }
    }

    /// Invokes one handler, containing its failure.
    fn deliver(&self, handler: &Handler<T>, key: &Key, payload: Option<&T>) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.invoke(key, payload)));
        let error: BoxError = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(error)) => error,
            Err(caught) => Box::new(HandlerPanic::from_payload(caught.as_ref())),
        };
        match &self.core.config.on_error {
            Some(hook) => hook(&error, key, payload),
            None => {
                tracing::error!(key = %key, error = %error, "handler failed during dispatch");
            }
        }
    }
}

impl<T: 'static> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.core.config)
            .finish_non_exhaustive()
    }
}

/// Removes the `once` adapter from its key when dropped.
///
/// Constructed before the wrapped handler runs, so the removal happens on
/// every exit path — normal return, `Err`, or unwind.
struct RemoveOnExit<T> {
    core: Weak<DispatcherCore<T>>,
    key: Key,
    slot: Arc<OnceLock<Handler<T>>>,
}

impl<T> Drop for RemoveOnExit<T> {
    fn drop(&mut self) {
        if let (Some(core), Some(adapter)) = (self.core.upgrade(), self.slot.get()) {
            core.registry.lock().remove_keyed(&self.key, adapter);
        }
    }
}
