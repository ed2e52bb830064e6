//! REST client for the hosted identity provider.
//!
//! Consumes the provider's token endpoints as-is: password-grant sign-in at
//! `/auth/v1/token`, sign-out at `/auth/v1/logout`, and session resolution
//! at `/auth/v1/user`. No authentication protocol is implemented here.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use crate::config::CatalogConfig;

use super::{AuthError, Credentials, Identity, Session, SessionPhase};

/// REST client for the hosted identity provider.
///
/// Shares the service base URL and publishable key with the catalog client.
/// Clones share the session state and the watch channel.
pub struct RestIdentity {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: String,
    api_key: String,
    client: Client,
    session: Mutex<Option<Session>>,
    tx: watch::Sender<SessionPhase>,
}

/// Successful password-grant response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

/// The provider's user object.
#[derive(Deserialize)]
struct ProviderUser {
    id: Uuid,
    email: String,
    #[serde(default)]
    app_metadata: AppMetadata,
}

#[derive(Deserialize, Default)]
struct AppMetadata {
    #[serde(default)]
    is_admin: bool,
}

impl ProviderUser {
    fn into_session(self, access_token: String) -> Session {
        Session {
            user_id: self.id,
            email: self.email,
            is_admin: self.app_metadata.is_admin,
            access_token,
        }
    }
}

impl Clone for RestIdentity {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl RestIdentity {
    /// Create a client for the configured provider.
    pub fn new(config: &CatalogConfig) -> Self {
        let (tx, _rx) = watch::channel(SessionPhase::Loading);
        Self {
            inner: Arc::new(Inner {
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
                client: Client::new(),
                session: Mutex::new(None),
                tx,
            }),
        }
    }

    /// Create from `SHOWNTELL_*` environment variables.
    pub fn from_env() -> Result<Self, crate::config::ConfigError> {
        Ok(Self::new(&CatalogConfig::from_env()?))
    }

    /// Build a request with the publishable key and the given bearer token.
    fn request(&self, method: Method, path: &str, bearer: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        self.inner
            .client
            .request(method, &url)
            .header("apikey", self.inner.api_key.as_str())
            .bearer_auth(bearer)
    }

    async fn publish(&self, session: Option<Session>) {
        *self.inner.session.lock().await = session.clone();
        let phase = match session {
            Some(session) => SessionPhase::SignedIn(session),
            None => SessionPhase::SignedOut,
        };
        self.inner.tx.send_replace(phase);
    }
}

#[async_trait]
impl Identity for RestIdentity {
    async fn load_session(&self) -> Result<Option<Session>, AuthError> {
        // Clone out of the guard before matching: a `match` scrutinee keeps
        // the temporary MutexGuard alive through every arm, and `publish`
        // locks the same mutex.
        let stored = self.inner.session.lock().await.clone();
        let token = match stored {
            Some(session) => session.access_token,
            None => {
                self.publish(None).await;
                return Ok(None);
            }
        };
        let response = self
            .request(Method::GET, "/auth/v1/user", &token)
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => {
                let user: ProviderUser = response.json().await?;
                let session = user.into_session(token);
                self.publish(Some(session.clone())).await;
                Ok(Some(session))
            }
            StatusCode::UNAUTHORIZED => {
                // Token expired or revoked; the session is gone.
                self.publish(None).await;
                Ok(None)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Service(format!("{}: {}", status, body)))
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let response = self
            .request(Method::POST, "/auth/v1/token?grant_type=password", &self.inner.api_key)
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::BadCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Service(format!("{}: {}", status, body)));
        }
        let token: TokenResponse = response.json().await?;
        let session = token.user.into_session(token.access_token);
        self.publish(Some(session.clone())).await;
        tracing::info!("signed in as {}", session.email);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.inner.session.lock().await.clone();
        if let Some(session) = token {
            let response = self
                .request(Method::POST, "/auth/v1/logout", &session.access_token)
                .send()
                .await?;
            let status = response.status();
            // 401 here means the token was already dead; treat it as signed out.
            if !status.is_success() && status != StatusCode::UNAUTHORIZED {
                let body = response.text().await.unwrap_or_default();
                return Err(AuthError::Service(format!("{}: {}", status, body)));
            }
        }
        self.publish(None).await;
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.inner.tx.subscribe()
    }
}
