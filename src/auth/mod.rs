//! Session handling for the admin surface.
//!
//! Sessions are issued and owned by the hosted identity provider; this crate
//! only observes them. An [`Identity`] implementation resolves, creates, and
//! ends sessions, and publishes every change on a `tokio` watch channel so
//! that consumers re-evaluate without a reload. The channel receiver is
//! passed around explicitly; there is no ambient session global.
//!
//! [`SessionGuard`] sits in front of protected views and turns the current
//! [`SessionPhase`] into an [`Access`] decision.

mod memory;
mod rest;

pub use memory::MemoryIdentity;
pub use rest::RestIdentity;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

/// Errors from the hosted identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sign-in rejected: bad email or password")]
    BadCredentials,

    #[error("Identity service error: {0}")]
    Service(String),
}

/// An authenticated session issued by the identity provider.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    /// Admin capability flag from the provider's app metadata.
    pub is_admin: bool,
    /// Bearer token for catalog requests made on this user's behalf.
    pub access_token: String,
}

/// Where session resolution currently stands.
#[derive(Debug, Clone)]
pub enum SessionPhase {
    /// The initial session check has not finished.
    Loading,
    SignedOut,
    SignedIn(Session),
}

/// Password-grant sign-in input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Operations the hosted identity provider exposes.
#[async_trait]
pub trait Identity: Send + Sync {
    /// Resolve the current session, if any, and publish the outcome.
    async fn load_session(&self) -> Result<Option<Session>, AuthError>;

    /// Sign in with email and password.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to session changes pushed by the provider.
    fn subscribe(&self) -> watch::Receiver<SessionPhase>;
}

/// Route decision for a guarded view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session check still in flight; render a placeholder, no access yet.
    Wait,
    /// No session; send the visitor to the login entry point.
    RedirectToLogin,
    /// Signed in but missing the required admin flag; send home.
    RedirectHome,
    /// Render the wrapped view.
    Grant,
}

/// Gate in front of protected views.
///
/// Holds its own receiver on the provider's session channel and maps the
/// current phase to an [`Access`] decision. Externally pushed changes (a
/// sign-out in another tab, token expiry) flow through the channel, so the
/// decision stays current without any reload.
pub struct SessionGuard {
    phase: watch::Receiver<SessionPhase>,
    require_admin: bool,
}

impl SessionGuard {
    /// Guard for views any signed-in user may open.
    pub fn new(phase: watch::Receiver<SessionPhase>) -> Self {
        Self {
            phase,
            require_admin: false,
        }
    }

    /// Guard for admin-only views.
    pub fn admin_only(phase: watch::Receiver<SessionPhase>) -> Self {
        Self {
            phase,
            require_admin: true,
        }
    }

    /// Decision for the current session phase.
    pub fn check(&self) -> Access {
        match &*self.phase.borrow() {
            SessionPhase::Loading => Access::Wait,
            SessionPhase::SignedOut => Access::RedirectToLogin,
            SessionPhase::SignedIn(session) => {
                if self.require_admin && !session.is_admin {
                    Access::RedirectHome
                } else {
                    Access::Grant
                }
            }
        }
    }

    /// Wait for the next pushed session change, then decide again.
    pub async fn changed(&mut self) -> Access {
        // A closed channel means the provider is gone; the last phase stands.
        let _ = self.phase.changed().await;
        self.check()
    }
}
