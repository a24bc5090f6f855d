//! Error types used by the dispatch surface.
//!
//! Two kinds of failure exist in this crate, and they travel different paths:
//!
//! - [`DispatchError`] — programmer errors detected at registration time.
//!   Returned synchronously from `on`/`once`/`on_all`, never routed through
//!   the configured error hook.
//! - Handler failures during dispatch — an `Err` returned by a handler, or a
//!   panic caught inside the dispatch loop (wrapped as [`HandlerPanic`]).
//!   These are always contained inside `emit` and forwarded to the error
//!   hook (or the default `tracing` sink); they never reach `emit`'s caller.

use std::any::Any;

use thiserror::Error;

use crate::handlers::HandlerShape;

/// Boxed error type carried by failing handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors raised by the registration surface.
///
/// These represent misuse of the public API and are surfaced directly to the
/// caller. Nothing here ever flows through the `on_error` hook, because no
/// dispatch is in progress when they occur.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The supplied handler cannot be invoked by the requested registration.
    ///
    /// `on`/`once` accept keyed handlers, `on_all` accepts wildcard handlers.
    /// A mismatched registration fails without touching any registry.
    #[error("expected a {expected} handler, got a {found} handler")]
    InvalidHandler {
        /// Shape the registration requires.
        expected: HandlerShape,
        /// Shape of the handler that was supplied.
        found: HandlerShape,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanout::{DispatchError, HandlerShape};
    ///
    /// let err = DispatchError::InvalidHandler {
    ///     expected: HandlerShape::Keyed,
    ///     found: HandlerShape::Wildcard,
    /// };
    /// assert_eq!(err.as_label(), "invalid_handler");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::InvalidHandler { .. } => "invalid_handler",
        }
    }
}

/// A panic caught while a handler was running.
///
/// The dispatch loop converts caught panics into this type so they flow
/// through the same reporting path as handlers that return `Err`.
#[derive(Error, Debug)]
#[error("handler panicked: {message}")]
pub struct HandlerPanic {
    message: String,
}

impl HandlerPanic {
    /// Extracts a readable message from a caught panic payload.
    ///
    /// `panic!("...")` payloads are `&str` or `String`; anything else is
    /// reported with a placeholder.
    pub(crate) fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }

    /// The panic message, as extracted from the payload.
    pub fn message(&self) -> &str {
        &self.message
    }
}
