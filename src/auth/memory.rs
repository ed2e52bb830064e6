//! Scriptable identity provider for tests and offline development.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};

use super::{AuthError, Credentials, Identity, Session, SessionPhase};

/// In-memory identity provider.
///
/// Starts in the `Loading` phase until [`Identity::load_session`] resolves
/// it. Accounts are registered up front; [`MemoryIdentity::push_session`]
/// imitates a change arriving from outside the application, such as a
/// sign-out in another tab. Clones share the same state and channel.
pub struct MemoryIdentity {
    inner: Arc<Inner>,
}

struct Inner {
    accounts: Mutex<Vec<(Credentials, Session)>>,
    persisted: Mutex<Option<Session>>,
    tx: watch::Sender<SessionPhase>,
}

impl Clone for MemoryIdentity {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MemoryIdentity {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionPhase::Loading);
        Self {
            inner: Arc::new(Inner {
                accounts: Mutex::new(Vec::new()),
                persisted: Mutex::new(None),
                tx,
            }),
        }
    }

    /// Register an account that [`Identity::sign_in`] will accept.
    pub async fn register(&self, credentials: Credentials, session: Session) {
        self.inner.accounts.lock().await.push((credentials, session));
    }

    /// Replace the session as if the provider pushed the change itself.
    pub async fn push_session(&self, session: Option<Session>) {
        *self.inner.persisted.lock().await = session.clone();
        let phase = match session {
            Some(session) => SessionPhase::SignedIn(session),
            None => SessionPhase::SignedOut,
        };
        self.inner.tx.send_replace(phase);
    }
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Identity for MemoryIdentity {
    async fn load_session(&self) -> Result<Option<Session>, AuthError> {
        let session = self.inner.persisted.lock().await.clone();
        let phase = match &session {
            Some(session) => SessionPhase::SignedIn(session.clone()),
            None => SessionPhase::SignedOut,
        };
        self.inner.tx.send_replace(phase);
        Ok(session)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let accounts = self.inner.accounts.lock().await;
        let matched = accounts.iter().find(|(known, _)| {
            known.email == credentials.email && known.password == credentials.password
        });
        let session = match matched {
            Some((_, session)) => session.clone(),
            None => return Err(AuthError::BadCredentials),
        };
        drop(accounts);
        *self.inner.persisted.lock().await = Some(session.clone());
        self.inner
            .tx
            .send_replace(SessionPhase::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.inner.persisted.lock().await = None;
        self.inner.tx.send_replace(SessionPhase::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.inner.tx.subscribe()
    }
}
