//! Authentication collaborators used by the sign-in form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form controller only knows the `AuthService` trait. `net::api` provides
//! the backend-backed implementation; tests substitute in-memory fakes. Every
//! rejection is carried as an `AuthFailure` and turned into display text by
//! `normalize`.

pub mod normalize;

/// A rejected login or registration attempt.
///
/// The three variants map onto the failure shapes the form can receive:
/// a structured payload returned by the backend, a plain message, or a
/// failure with no usable detail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthFailure {
    /// JSON body of a non-2xx response (usually `{"detail": ...}`).
    #[error("request rejected: {0}")]
    Rejected(serde_json::Value),
    /// Plain-text failure message.
    #[error("{0}")]
    Message(String),
    /// Network, timeout, or decode failure. Never shown verbatim.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for AuthFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Remote login and registration.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate an existing account.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] when the backend rejects the credentials or
    /// cannot be reached.
    async fn login(&self, identifier: &str, password: &str) -> Result<(), AuthFailure>;

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] when validation fails, the name or email is
    /// taken, or the backend cannot be reached.
    async fn register(&self, identifier: &str, email: &str, password: &str) -> Result<(), AuthFailure>;
}
