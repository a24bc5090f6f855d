//! # Dispatcher configuration.
//!
//! [`Config`] controls the two tunable behaviors of a dispatcher: the
//! per-key soft listener cap and the error hook invoked when a handler fails
//! during dispatch.
//!
//! Defaults apply field-by-field: construct with struct-update syntax and
//! only the fields you name are overridden.
//!
//! # Example
//! ```
//! use fanout::Config;
//!
//! let cfg = Config::<String> {
//!     max_listeners: 4,
//!     ..Config::default()
//! };
//!
//! assert_eq!(cfg.max_listeners, 4);
//! assert!(cfg.on_error.is_none()); // default error sink stays in place
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::keys::Key;

/// Callback invoked with `(error, key, payload)` when a handler fails.
pub type ErrorHook<T> = Arc<dyn Fn(&BoxError, &Key, Option<&T>) + Send + Sync>;

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
///
/// Controls the soft listener cap and the handler-failure hook.
pub struct Config<T> {
    /// Soft cap on handlers per key (`0` = unlimited, check disabled).
    ///
    /// Reaching or exceeding the cap logs a warning naming the key and the
    /// limit; it never blocks or rejects a registration.
    pub max_listeners: usize,
    /// Hook receiving `(error, key, payload)` for every handler failure.
    ///
    /// `None` routes failures to the default sink: an error-level `tracing`
    /// event naming the key and the error. The hook observes failures only;
    /// dispatch continues with the next handler either way.
    pub on_error: Option<ErrorHook<T>>,
}

impl<T> Default for Config<T> {
    /// Provides a default configuration:
    /// - `max_listeners = 20`
    /// - `on_error = None` (failures go to the `tracing` sink)
    fn default() -> Self {
        Self {
            max_listeners: 20,
            on_error: None,
        }
    }
}

impl<T> Clone for Config<T> {
    fn clone(&self) -> Self {
        Self {
            max_listeners: self.max_listeners,
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("max_listeners", &self.max_listeners)
            .field(
                "on_error",
                &self.on_error.as_ref().map(|_| "<hook>"),
            )
            .finish()
    }
}
