//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default token lifetime: one day
const DEFAULT_JWT_EXPIRES_IN_SECS: u64 = 86_400;

const DEFAULT_PORT: u16 = 3000;

const DEFAULT_RUST_LOG: &str =
    "info,tower_http=debug,hrdocs_app=debug,hrdocs_employees=debug,hrdocs_documents=debug";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (`postgres://...` or `memory://`)
    pub database_url: String,

    /// Token signing
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expires_in_secs: u64,

    /// Public addresses
    pub base_url: String,
    pub storage_base_url: String,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        let storage_base_url = env::var("STORAGE_BASE_URL")
            .unwrap_or_else(|_| format!("{}/files", base_url))
            .trim_end_matches('/')
            .to_string();

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,
            jwt_secret,
            jwt_expires_in_secs: env::var("JWT_EXPIRES_IN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRES_IN_SECS),
            base_url,
            storage_base_url,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
            port,
        };

        Ok(config)
    }

    /// Whether the in-memory store was requested instead of PostgreSQL
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory://")
    }
}
