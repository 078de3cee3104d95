//! Application configuration loaded from environment variables.
//!
//! The storage location and the session signing key are process-wide
//! constants resolved once at startup.

use std::env;

use actix_web::cookie::Key;
use quill_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    session_secret: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://quill.db?mode=rwc".to_string()),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            session_secret: env::var("SESSION_SECRET").ok(),
        }
    }

    /// The cookie signing/encryption key.
    ///
    /// Derived from `SESSION_SECRET` when one of at least 64 bytes is set;
    /// otherwise a fresh key is generated and existing sessions will not
    /// survive a restart.
    pub fn session_key(&self) -> Key {
        match &self.session_secret {
            Some(secret) if secret.len() >= 64 => Key::derive_from(secret.as_bytes()),
            Some(_) => {
                tracing::warn!(
                    "SESSION_SECRET is shorter than 64 bytes; using an ephemeral key instead"
                );
                Key::generate()
            }
            None => {
                tracing::warn!(
                    "SESSION_SECRET not set. Sessions will not survive a server restart."
                );
                Key::generate()
            }
        }
    }
}
