//! Locally held session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The user service issues a `token` cookie at login. The store removes it
//! on logout and the HTTP backend attaches it to credentialed requests, so
//! both hold clones of the same [`SessionCredential`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock};

/// Cookie name the user and blog services read the session from.
pub const SESSION_COOKIE_NAME: &str = "token";

#[derive(Clone, Debug, Default)]
pub struct SessionCredential {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionCredential {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        Self { token: Arc::new(RwLock::new(token)) }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.token.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    pub fn set(&self, token: String) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token).filter(|t| !t.is_empty());
    }

    /// Drop the token. Returns whether one was held.
    pub fn clear(&self) -> bool {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    /// `Cookie` header value for credentialed requests, if a token is held.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        self.token().map(|token| format!("{SESSION_COOKIE_NAME}={token}"))
    }
}
