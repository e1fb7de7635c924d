//! Admin session management.
//!
//! Tokens live in an injected `SessionStore` rather than process-global
//! state: the store's lifetime is tied to the application context and tests
//! can provide their own.

use std::collections::HashSet;
use std::sync::RwLock;

pub mod handlers;

pub trait SessionStore: Send + Sync {
    fn contains(&self, token: &str) -> bool;
    fn add(&self, token: String);
    fn remove(&self, token: &str);
}

/// Process-local store backing a single-admin deployment. Sessions do not
/// survive a restart; the admin just logs in again.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    tokens: RwLock<HashSet<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn contains(&self, token: &str) -> bool {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .contains(token)
    }

    fn add(&self, token: String) {
        self.tokens
            .write()
            .expect("session lock poisoned")
            .insert(token);
    }

    fn remove(&self, token: &str) {
        self.tokens
            .write()
            .expect("session lock poisoned")
            .remove(token);
    }
}
