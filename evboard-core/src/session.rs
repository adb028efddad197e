//! Session bootstrapping.
//!
//! Resolves an identity once at startup: a configured bootstrap token is
//! tried first, anonymous sign-up is the fallback. Readiness is always
//! declared so callers never hang waiting for auth, but unlike the classic
//! swallow-the-error pattern a total failure is carried explicitly in
//! [`Session::Degraded`] and surfaced to the user.

use crate::auth::{AuthService, Identity};
use crate::config::BoardConfig;

/// The resolved per-session auth state.
#[derive(Debug, Clone)]
pub enum Session {
    SignedIn(Identity),
    /// Bootstrap failed; the board stays interactive but store operations
    /// will refuse to run.
    Degraded { error: String },
}

impl Session {
    /// Establish a session against the auth service.
    ///
    /// A rejected bootstrap token degrades to anonymous sign-in rather than
    /// failing the session outright.
    pub async fn establish(config: &BoardConfig, auth: &dyn AuthService) -> Session {
        if let Some(token) = config.bootstrap_token.as_deref() {
            match auth.sign_in_with_token(token).await {
                Ok(identity) => return Session::SignedIn(identity),
                Err(e) => {
                    eprintln!("Bootstrap token rejected ({}), signing in anonymously", e);
                }
            }
        }

        match auth.sign_in_anonymously().await {
            Ok(identity) => Session::SignedIn(identity),
            Err(e) => Session::Degraded {
                error: format!("Sign-in failed: {}", e),
            },
        }
    }

    /// The session is always "ready" once `establish` returns — degraded
    /// sessions included — so the caller can render without waiting.
    pub fn is_ready(&self) -> bool {
        true
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::SignedIn(identity) => Some(identity),
            Session::Degraded { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Session::SignedIn(_) => None,
            Session::Degraded { error } => Some(error),
        }
    }
}
