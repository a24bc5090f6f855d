//! # Handler values.
//!
//! [`Handler`] wraps a user callback into a cheap-to-clone, shareable value
//! with *reference identity*: clones of one `Handler` compare equal, two
//! independently wrapped callbacks never do — even when they wrap the same
//! function. That identity is what `off` and duplicate-free registration work
//! with, so keep a clone of the `Handler` you registered if you intend to
//! remove it by value later (the returned subscription handle covers the
//! common case).
//!
//! A handler has one of two shapes:
//! - **keyed** (`Fn(Option<&T>)`) — registered against a single key with
//!   `on`/`once`, receives the emission payload;
//! - **wildcard** (`Fn(&Key, Option<&T>)`) — registered with `on_all`,
//!   receives every emission together with its key.
//!
//! Callbacks return [`HandlerResult`]; an `Err` is the failure signal the
//! dispatch loop isolates and reports. A registration that names the wrong
//! shape fails with [`DispatchError::InvalidHandler`] before touching any
//! registry.
//!
//! # Example
//! ```
//! use fanout::{Handler, HandlerShape};
//!
//! let keyed = Handler::<u32>::keyed(|_payload| Ok(()));
//! let wildcard = Handler::<u32>::wildcard(|_key, _payload| Ok(()));
//!
//! assert_eq!(keyed.shape(), HandlerShape::Keyed);
//! assert_eq!(wildcard.shape(), HandlerShape::Wildcard);
//! assert_eq!(keyed, keyed.clone());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, DispatchError};
use crate::keys::Key;

/// Result returned by a handler invocation.
///
/// `Err` marks the invocation as failed; the dispatcher forwards the error to
/// the configured `on_error` hook and continues with the next handler.
pub type HandlerResult = Result<(), BoxError>;

/// Shape of a handler: what arguments its callback accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerShape {
    /// Receives `Option<&T>`; registered against a single key.
    Keyed,
    /// Receives `(&Key, Option<&T>)`; registered for every emission.
    Wildcard,
}

impl fmt::Display for HandlerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerShape::Keyed => f.write_str("keyed"),
            HandlerShape::Wildcard => f.write_str("wildcard"),
        }
    }
}

enum Repr<T> {
    Keyed(Box<dyn Fn(Option<&T>) -> HandlerResult + Send + Sync>),
    Wildcard(Box<dyn Fn(&Key, Option<&T>) -> HandlerResult + Send + Sync>),
}

/// A registered (or registrable) callback with reference identity.
///
/// Cloning is an `Arc` bump; the clone compares equal to the original.
pub struct Handler<T> {
    repr: Arc<Repr<T>>,
}

impl<T> Handler<T> {
    /// Wraps a callback for registration against a single key.
    pub fn keyed<F>(callback: F) -> Self
    where
        F: Fn(Option<&T>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            repr: Arc::new(Repr::Keyed(Box::new(callback))),
        }
    }

    /// Wraps a callback for wildcard registration: it receives every emission
    /// together with the key it was emitted on.
    pub fn wildcard<F>(callback: F) -> Self
    where
        F: Fn(&Key, Option<&T>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            repr: Arc::new(Repr::Wildcard(Box::new(callback))),
        }
    }

    /// The shape this handler was built with.
    pub fn shape(&self) -> HandlerShape {
        match &*self.repr {
            Repr::Keyed(_) => HandlerShape::Keyed,
            Repr::Wildcard(_) => HandlerShape::Wildcard,
        }
    }

    /// Fails with [`DispatchError::InvalidHandler`] unless this handler has
    /// the shape a registration requires.
    pub(crate) fn expect_shape(&self, expected: HandlerShape) -> Result<(), DispatchError> {
        let found = self.shape();
        if found == expected {
            Ok(())
        } else {
            Err(DispatchError::InvalidHandler { expected, found })
        }
    }

    /// Runs the callback. Keyed callbacks ignore the key argument.
    pub(crate) fn invoke(&self, key: &Key, payload: Option<&T>) -> HandlerResult {
        match &*self.repr {
            Repr::Keyed(callback) => callback(payload),
            Repr::Wildcard(callback) => callback(key, payload),
        }
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.repr) as *const () as usize
    }
}

impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Self {
            repr: Arc::clone(&self.repr),
        }
    }
}

impl<T> PartialEq for Handler<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.repr, &other.repr)
    }
}

impl<T> Eq for Handler<T> {}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({} @ 0x{:x})", self.shape(), self.addr())
    }
}
