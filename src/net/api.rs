//! REST client for the LAYRA auth endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx bodies are surfaced as `AuthFailure::Rejected` with the decoded
//! JSON so validation details reach the normalizer untouched. Transport and
//! decode errors become `AuthFailure::Transport`, which the form shows as the
//! generic fallback.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::{Client, Response, StatusCode};
use tracing::{info, warn};

use super::types::{LoginResponse, RegisteredUser, Session, TokenData};
use crate::auth::{AuthFailure, AuthService};
use crate::config::AuthConfig;

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn status_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Map a non-2xx response body onto an [`AuthFailure`].
fn failure_from_body(status: u16, body: &str) -> AuthFailure {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return AuthFailure::Rejected(value);
    }
    let text = body.trim();
    if text.is_empty() {
        AuthFailure::Message(status_failed_message(status))
    } else {
        AuthFailure::Message(text.to_owned())
    }
}

async fn ensure_success(resp: Response) -> Result<Response, AuthFailure> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    warn!(status = status.as_u16(), "auth endpoint rejected request");
    let body = match resp.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "failed to read rejection body");
            String::new()
        }
    };
    Err(failure_from_body(status.as_u16(), &body))
}

/// [`AuthService`] backed by the LAYRA HTTP API.
pub struct HttpAuthService {
    client: Client,
    base_url: String,
    session: Mutex<Option<Session>>,
}

impl HttpAuthService {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, base_url: config.api_base_url.clone(), session: Mutex::new(None) })
    }

    /// Session stored by the last successful login.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.lock_session().clone()
    }

    /// Check the stored token with `GET /auth/verify-token`.
    ///
    /// Returns `Ok(None)` when no session is stored or the backend does not
    /// recognize the token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure`] on transport failure or a rejected request.
    pub async fn verify_token(&self) -> Result<Option<String>, AuthFailure> {
        let Some(token) = self.session().map(|s| s.access_token) else {
            return Ok(None);
        };
        let resp = self
            .client
            .get(endpoint(&self.base_url, "auth/verify-token"))
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let data: Option<TokenData> = ensure_success(resp).await?.json().await?;
        Ok(data.map(|d| d.username))
    }

    /// End the session with `POST /auth/logout`. The local session is cleared
    /// even when the backend call fails.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure`] on transport failure or a rejected request.
    pub async fn logout(&self) -> Result<(), AuthFailure> {
        let Some(session) = self.lock_session().take() else {
            return Ok(());
        };
        let resp = self
            .client
            .post(endpoint(&self.base_url, "auth/logout"))
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        ensure_success(resp).await?;
        info!(username = %session.user.username, "logged out");
        Ok(())
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, identifier: &str, password: &str) -> Result<(), AuthFailure> {
        let resp = self
            .client
            .post(endpoint(&self.base_url, "auth/login"))
            .form(&[("username", identifier), ("password", password)])
            .send()
            .await?;
        let body: LoginResponse = ensure_success(resp).await?.json().await?;
        info!(username = %body.user.username, "login accepted");
        *self.lock_session() = Some(Session::from(body));
        Ok(())
    }

    async fn register(&self, identifier: &str, email: &str, password: &str) -> Result<(), AuthFailure> {
        #[derive(serde::Serialize)]
        struct RegisterRequest<'a> {
            username: &'a str,
            email: &'a str,
            password: &'a str,
        }

        let resp = self
            .client
            .post(endpoint(&self.base_url, "auth/register"))
            .json(&RegisterRequest { username: identifier, email, password })
            .send()
            .await?;
        let user: RegisteredUser = ensure_success(resp).await?.json().await?;
        info!(id = user.id, username = %user.username, "registration accepted");
        Ok(())
    }
}
