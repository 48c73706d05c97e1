//! Runtime configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` via `dotenvy` first, so every value here can come from
//! either the process environment or a local `.env` file.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOTIFY_HIDE_MS: u64 = 5000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ADMIN_USER: &str = "layra_admin";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Settings for the sign-in client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Backend API root, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// How long a notification banner stays visible.
    pub notify_hide: Duration,
}

impl AuthConfig {
    /// Build from environment variables.
    ///
    /// Optional:
    /// - `LAYRA_API_BASE_URL`: default `http://127.0.0.1:8000/api/v1`
    /// - `LAYRA_REQUEST_TIMEOUT_SECS`: default 30
    /// - `LAYRA_NOTIFY_HIDE_MS`: default 5000
    #[must_use]
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("LAYRA_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            api_base_url,
            request_timeout: Duration::from_secs(env_parse("LAYRA_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)),
            notify_hide: Duration::from_millis(env_parse("LAYRA_NOTIFY_HIDE_MS", DEFAULT_NOTIFY_HIDE_MS)),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            notify_hide: Duration::from_millis(DEFAULT_NOTIFY_HIDE_MS),
        }
    }
}

/// Administrative role provisioned by the bootstrap migration.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for the database bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// `None` skips admin provisioning.
    pub admin: Option<AdminCredential>,
}

impl DbConfig {
    /// Build from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `LAYRA_ADMIN_PASSWORD`: provisioning is skipped when unset or empty
    /// - `LAYRA_ADMIN_USER`: default `layra_admin`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let admin = std::env::var("LAYRA_ADMIN_PASSWORD")
            .ok()
            .filter(|password| !password.is_empty())
            .map(|password| AdminCredential {
                user: std::env::var("LAYRA_ADMIN_USER").unwrap_or_else(|_| DEFAULT_ADMIN_USER.to_owned()),
                password,
            });
        Ok(Self {
            database_url,
            max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            admin,
        })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
