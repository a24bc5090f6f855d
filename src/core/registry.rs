//! # Registration storage.
//!
//! [`Registry`] holds both registries the dispatcher owns:
//! - the keyed map (key → insertion-ordered, duplicate-free handler list);
//! - the wildcard list (same ordering/dedup rules, no key).
//!
//! ## Rules
//! - Membership is handler *identity* (clones of one [`Handler`] are the same
//!   member); re-inserting a member is a no-op.
//! - A key present in the map always has a non-empty list: removal of the
//!   last handler removes the entry itself.
//! - Snapshots are detached copies of handler lists (`Arc` bumps, not deep
//!   copies of callbacks); mutating the registry afterwards does not affect
//!   a snapshot already taken, and vice versa.
//!
//! All synchronization lives in the dispatcher; this type is plain data.

use std::collections::HashMap;

use crate::handlers::Handler;
use crate::keys::Key;

/// Keyed and wildcard registration sets.
pub(crate) struct Registry<T> {
    keyed: HashMap<Key, Vec<Handler<T>>>,
    wildcard: Vec<Handler<T>>,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            keyed: HashMap::new(),
            wildcard: Vec::new(),
        }
    }

    /// Adds `handler` to `key`'s list (identity no-op if present).
    ///
    /// Returns the list length after the insert, for the soft-limit check.
    pub(crate) fn insert_keyed(&mut self, key: &Key, handler: Handler<T>) -> usize {
        let list = self.keyed.entry(key.clone()).or_default();
        if !list.contains(&handler) {
            list.push(handler);
        }
        list.len()
    }

    /// Removes `handler` from `key`'s list; drops the entry when it empties.
    /// Silent no-op when the key or the handler is absent.
    pub(crate) fn remove_keyed(&mut self, key: &Key, handler: &Handler<T>) {
        if let Some(list) = self.keyed.get_mut(key) {
            list.retain(|registered| registered != handler);
            if list.is_empty() {
                self.keyed.remove(key);
            }
        }
    }

    /// Adds `handler` to the wildcard list (identity no-op if present).
    pub(crate) fn insert_wildcard(&mut self, handler: Handler<T>) {
        if !self.wildcard.contains(&handler) {
            self.wildcard.push(handler);
        }
    }

    /// Removes `handler` from the wildcard list; silent no-op if absent.
    pub(crate) fn remove_wildcard(&mut self, handler: &Handler<T>) {
        self.wildcard.retain(|registered| registered != handler);
    }

    /// Drops `key`'s entire list; silent no-op if absent. Wildcards untouched.
    pub(crate) fn clear_key(&mut self, key: &Key) {
        self.keyed.remove(key);
    }

    /// Drops every keyed list and the wildcard list.
    pub(crate) fn clear(&mut self) {
        self.keyed.clear();
        self.wildcard.clear();
    }

    /// Detached copy of `key`'s list, in registration order (empty if absent).
    pub(crate) fn snapshot_key(&self, key: &Key) -> Vec<Handler<T>> {
        self.keyed.get(key).cloned().unwrap_or_default()
    }

    /// Detached copy of the wildcard list, in registration order.
    pub(crate) fn snapshot_wildcard(&self) -> Vec<Handler<T>> {
        self.wildcard.clone()
    }

    /// Detached copy of the whole keyed map (wildcards not included).
    pub(crate) fn snapshot_all(&self) -> HashMap<Key, Vec<Handler<T>>> {
        self.keyed.clone()
    }
}
