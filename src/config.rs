//! Application configuration loaded from environment variables.
//!
//! Built once in `main` and shared through `AppState`; nothing in the
//! engine reads the environment directly.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing env var: {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string
    pub database_url: String,
    /// JSON-RPC endpoint for the chain hosting the reward vault
    pub rpc_url: String,
    /// Reward vault contract address (0x format)
    pub vault_address: String,
    /// Private key of the distributor account that signs payouts
    pub distributor_private_key: String,
    /// HTTP email API endpoint
    pub email_api_url: String,
    pub email_api_key: String,
    /// From address for claim notifications
    pub email_from: String,
    /// Base URL used to build claim links in notification emails
    pub app_base_url: String,
    /// Shared secret the external scheduler presents as a bearer token
    pub cron_secret: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(AppConfig {
            database_url: require("DATABASE_URL")?,
            rpc_url: require("RPC_URL")?,
            vault_address: require("VAULT_ADDRESS")?,
            distributor_private_key: require("DISTRIBUTOR_PRIVATE_KEY")?,
            email_api_url: env::var("EMAIL_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            email_api_key: require("EMAIL_API_KEY")?,
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "rewards@fundstack.app".to_string()),
            app_base_url: require("APP_BASE_URL")?,
            cron_secret: require("CRON_SECRET")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}
