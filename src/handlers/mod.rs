//! Handler values and their cancellation handles.
//!
//! ## Contents
//! - [`Handler`] — reference-identity callback wrapper (keyed or wildcard
//!   shape), plus [`HandlerShape`] and the [`HandlerResult`] alias
//! - [`Subscription`] — idempotent cancellation handle returned by the
//!   subscribe operations

mod handler;
mod subscription;

pub use handler::{Handler, HandlerResult, HandlerShape};
pub use subscription::Subscription;
