//! Admin sessions for the presentation layer.
//!
//! Logging in with the shop's shared password issues a random token. Every
//! privileged call must present a live token; the store and the formatters
//! never look at it.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};

const TOKEN_LEN: usize = 32;

/// Live sessions kept at once; logging in beyond this ends the oldest
pub const MAX_SESSIONS: usize = 16;

/// Token proving the caller logged in as admin
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdminToken(String);

impl AdminToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// In-memory registry of live admin sessions, oldest first
///
/// Sessions do not survive a restart.
pub struct AdminSessions {
    password: String,
    tokens: Mutex<VecDeque<String>>,
}

impl AdminSessions {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            tokens: Mutex::new(VecDeque::with_capacity(MAX_SESSIONS)),
        }
    }

    /// Exchange the shared password for a session token
    pub fn login(&self, password: &str) -> Option<AdminToken> {
        if password != self.password {
            warn!("Admin login rejected: wrong password");
            return None;
        }

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let mut tokens = self.lock();
        while tokens.len() >= MAX_SESSIONS {
            tokens.pop_front();
            info!("Oldest admin session closed to make room");
        }
        tokens.push_back(token.clone());
        info!("Admin session opened");
        Some(AdminToken(token))
    }

    /// Look up a presented token
    pub fn verify(&self, token: &str) -> Option<AdminToken> {
        self.lock()
            .iter()
            .any(|live| live == token)
            .then(|| AdminToken(token.to_string()))
    }

    pub fn logout(&self, token: &AdminToken) {
        let mut tokens = self.lock();
        if let Some(position) = tokens.iter().position(|live| live == token.as_str()) {
            tokens.remove(position);
            info!("Admin session closed");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        // A poisoned list still holds valid tokens.
        self.tokens.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
