//! # Opaque, unforgeable channel identity.
//!
//! [`Token`] names a channel by *allocation identity* instead of content:
//! two independently created tokens never compare equal, even when they carry
//! the same label. This is what makes a token-keyed channel collision-proof —
//! only code holding a clone of the token can subscribe to or emit on it.
//!
//! The label is purely diagnostic; it shows up in `Debug`/`Display` output and
//! plays no part in equality or hashing.
//!
//! # Example
//! ```
//! use fanout::Token;
//!
//! let a = Token::labeled("internal");
//! let b = Token::labeled("internal");
//!
//! assert_ne!(a, b);          // same label, different identity
//! assert_eq!(a, a.clone());  // clones share identity
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Unforgeable channel identity.
///
/// Cheap to clone (an `Arc` handle); clones share identity with the original.
pub struct Token {
    core: Arc<TokenCore>,
}

struct TokenCore {
    label: Option<Arc<str>>,
}

impl Token {
    /// Creates a fresh, unlabeled token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: Arc::new(TokenCore { label: None }),
        }
    }

    /// Creates a fresh token carrying a diagnostic label.
    ///
    /// The label does not participate in equality or hashing.
    #[must_use]
    pub fn labeled(label: impl Into<Arc<str>>) -> Self {
        Self {
            core: Arc::new(TokenCore {
                label: Some(label.into()),
            }),
        }
    }

    /// The diagnostic label, if one was given at creation.
    pub fn label(&self) -> Option<&str> {
        self.core.label.as_deref()
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.core) as usize
    }
}

impl Default for Token {
    /// Equivalent to [`Token::new`]: every default is a fresh identity.
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Token {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "Token({label:?})"),
            None => write!(f, "Token(0x{:x})", self.addr()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "0x{:x}", self.addr()),
        }
    }
}
