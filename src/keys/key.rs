//! # Channel keys.
//!
//! [`Key`] is the identity a handler registers against and an emission names.
//! Two variants cover the two ways callers name channels:
//!
//! - [`Key::Name`] — textual key, compared and hashed by content. Built from
//!   `&str`/`String` via `From`, so the registration surface accepts plain
//!   string literals.
//! - [`Key::Token`] — opaque key, compared by allocation identity (see
//!   [`Token`]). Collision-proof: only holders of the token can address the
//!   channel.
//!
//! The dispatcher only observes keys; it never creates or destroys them.

use std::fmt;
use std::sync::Arc;

use crate::keys::Token;

/// Identity of an event channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Textual key, equal by content.
    Name(Arc<str>),
    /// Opaque key, equal by identity.
    Token(Token),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(Arc::from(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(Arc::from(name))
    }
}

impl From<Token> for Key {
    fn from(token: Token) -> Self {
        Key::Token(token)
    }
}

impl From<&Token> for Key {
    fn from(token: &Token) -> Self {
        Key::Token(token.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Token(token) => write!(f, "{token}"),
        }
    }
}
