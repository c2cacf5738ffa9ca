//! Environment configuration.
//!
//! Everything the binary needs is read once at startup into an explicit
//! struct that gets passed down; nothing reads the environment after this.

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string.
    pub database_url: String,
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
    /// Token lifetime in seconds. `0` issues tokens that never expire.
    pub token_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let token_ttl_secs = match std::env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("TOKEN_TTL_SECS is not a number: {raw:?}"))?,
            Err(_) => 3600,
        };

        Ok(Self {
            database_url,
            bind_addr,
            token_ttl_secs,
        })
    }
}
