//! # Process-wide default dispatcher.
//!
//! [`global`] hands out a shared, default-configured [`Dispatcher`] — one per
//! payload type, created lazily on first access and never reset for the life
//! of the process. It is a convenience for code that wants an ambient event
//! channel without threading a dispatcher through every call site;
//! independently configured instances via [`Dispatcher::new`] /
//! [`Dispatcher::with_config`] remain the primary API.
//!
//! Every call returns a clone sharing the same registries, so registrations
//! made anywhere in the process are visible everywhere:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use fanout::{global, Handler, Token};
//!
//! let channel = Token::labeled("cache-invalidated");
//! let seen = Arc::new(Mutex::new(0u32));
//!
//! let sub = {
//!     let seen = Arc::clone(&seen);
//!     global::<u64>()
//!         .on(&channel, Handler::keyed(move |_id| {
//!             *seen.lock().unwrap() += 1;
//!             Ok(())
//!         }))
//!         .unwrap()
//! };
//!
//! global::<u64>().emit(&channel, Some(&17));
//! sub.cancel();
//!
//! assert_eq!(*seen.lock().unwrap(), 1);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::core::Dispatcher;

static INSTANCES: OnceLock<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>> = OnceLock::new();

/// Returns the process-wide default dispatcher for payload type `T`.
///
/// The instance is created with the default [`Config`](crate::Config) on
/// first access; later calls (from any thread) return clones of the same
/// instance. It is never torn down implicitly — use
/// [`Dispatcher::off_all`]`(None)` to release its handlers.
pub fn global<T: 'static>() -> Dispatcher<T> {
    let instances = INSTANCES.get_or_init(|| Mutex::new(HashMap::new()));
    let mut instances = instances.lock();
    instances
        .entry(TypeId::of::<T>())
        .or_insert_with(|| Box::new(Dispatcher::<T>::new()))
        .downcast_ref::<Dispatcher<T>>()
        .expect("a global entry always holds the dispatcher for its own payload type")
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::handlers::Handler;
    use crate::keys::Token;

    #[test]
    fn test_global_instances_share_registries() {
        // Token key: other tests share the process-wide instance.
        let channel = Token::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counting = {
            let count = Arc::clone(&count);
            Handler::keyed(move |_payload: Option<&u32>| {
                count.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })
        };
        let sub = global::<u32>().on(&channel, counting).unwrap();

        global::<u32>().emit(&channel, Some(&1));
        sub.cancel();
        global::<u32>().emit(&channel, Some(&2));

        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_global_instances_are_per_payload_type() {
        let channel = Token::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counting = {
            let count = Arc::clone(&count);
            Handler::keyed(move |_payload: Option<&u8>| {
                count.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })
        };
        let _sub = global::<u8>().on(&channel, counting).unwrap();

        // Same key, different payload type: a different dispatcher.
        global::<u16>().emit(&channel, Some(&7));
        assert_eq!(count.load(Ordering::Relaxed), 0);

        global::<u8>().emit(&channel, Some(&7));
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }
}
