//! # fanout
//!
//! **Fanout** is a lightweight synchronous publish/subscribe library for Rust.
//!
//! Callers register handlers against a key; emitting on that key invokes
//! every registered handler on the caller's stack, passing an optional
//! payload. One failing handler never stops the others and never reaches the
//! emitter. The crate is a building block for in-process eventing (plugin
//! hooks, cache invalidation and the like), not a message queue.
//!
//! ## Architecture
//! ```text
//!            ┌──────────────────────────────────────────────┐
//!            │ Dispatcher<T>                                │
//!  on ─────► │   keyed registry    key ─► [h1, h2, ...]     │
//!  once ───► │   (insertion order, identity-deduplicated)   │
//!  on_all ─► │   wildcard registry [w1, w2, ...]            │
//!            └──────────────────┬───────────────────────────┘
//!                               │ emit(key, payload)
//!                               ▼
//!                snapshot the key's handlers, unlock
//!                               │
//!                h1 ─► h2 ─► ... (registration order)
//!                               │        failures ─► on_error hook
//!                               ▼                    (or tracing sink)
//!                snapshot the wildcard handlers, unlock
//!                               │
//!                w1(key, p) ─► w2(key, p) ─► ...
//! ```
//!
//! ## Guarantees
//! - **Synchronous**: every side effect of `on`/`off`/`emit` is visible when
//!   the call returns; nothing is deferred or scheduled.
//! - **Snapshot delivery**: an emission delivers to exactly the handlers
//!   registered at the moment it started — re-entrant mutation (handlers
//!   subscribing, unsubscribing, or emitting from inside a handler) never
//!   affects the round in progress.
//! - **Isolation**: a handler returning `Err` (or panicking) is reported to
//!   the configured [`Config::on_error`] hook — by default an error-level
//!   `tracing` event — and dispatch continues.
//! - **At-most-once** for [`Dispatcher::once`] registrations, on every exit
//!   path of the wrapped handler.
//! - **Thread-safe**: `Dispatcher<T>` is `Send + Sync` and cheaply cloneable;
//!   clones share registries.
//!
//! ## What it is not
//! - No cross-process or cross-thread *delivery* — handlers run on whichever
//!   thread called `emit`.
//! - No persistence or replay: an emission nobody listens to is gone.
//! - No ordering guarantee beyond registration order within one emission.
//!
//! ## Quick start
//! ```
//! use std::sync::{Arc, Mutex};
//! use fanout::{Dispatcher, Handler};
//!
//! let bus: Dispatcher<u64> = Dispatcher::new();
//! let log = Arc::new(Mutex::new(Vec::new()));
//!
//! // A keyed handler, fired for one key...
//! let on_saved = {
//!     let log = Arc::clone(&log);
//!     Handler::keyed(move |id: Option<&u64>| {
//!         log.lock().unwrap().push(format!("saved {id:?}"));
//!         Ok(())
//!     })
//! };
//! let sub = bus.on("saved", on_saved).unwrap();
//!
//! // ...and a wildcard handler, fired for every key.
//! let audit = {
//!     let log = Arc::clone(&log);
//!     Handler::wildcard(move |key, _id: Option<&u64>| {
//!         log.lock().unwrap().push(format!("audit {key}"));
//!         Ok(())
//!     })
//! };
//! bus.on_all(audit).unwrap();
//!
//! bus.emit("saved", Some(&7));
//! sub.cancel();
//! bus.emit("saved", Some(&8)); // only the wildcard sees this one
//!
//! assert_eq!(
//!     *log.lock().unwrap(),
//!     vec!["saved Some(7)", "audit saved", "audit saved"],
//! );
//! ```

mod config;
mod core;
mod error;
mod global;
mod handlers;
mod keys;

// ---- Public re-exports ----

pub use config::{Config, ErrorHook};
pub use crate::core::Dispatcher;
pub use error::{BoxError, DispatchError, HandlerPanic};
pub use global::global;
pub use handlers::{Handler, HandlerResult, HandlerShape, Subscription};
pub use keys::{Key, Token};
