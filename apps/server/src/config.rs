use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};
use rand::{rngs::OsRng, RngCore};

use crate::auth::decode_secret_key;

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 24 * 60;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HS256 signing key, exactly 32 bytes.
    pub secret_key: Vec<u8>,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("TALLY_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid TALLY_LISTEN_ADDR")?;
        let db_path = lookup("TALLY_DB_PATH").unwrap_or_else(|| "./db/app.db".into());
        let cors_allow = lookup("TALLY_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = match lookup("TALLY_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("Invalid TALLY_REQUEST_TIMEOUT_MS")?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        let ttl_minutes: u64 = match lookup("TALLY_TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("Invalid TALLY_TOKEN_TTL_MINUTES")?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };
        if ttl_minutes == 0 {
            bail!("TALLY_TOKEN_TTL_MINUTES must be greater than zero");
        }
        let token_ttl_secs = ttl_minutes
            .checked_mul(60)
            .context("TALLY_TOKEN_TTL_MINUTES is too large")?;

        let secret_key = match lookup("TALLY_SECRET_KEY") {
            Some(raw) => decode_secret_key(&raw).context("Invalid TALLY_SECRET_KEY")?,
            None => {
                tracing::warn!(
                    "TALLY_SECRET_KEY is not set; using an ephemeral key, tokens will not survive a restart"
                );
                let mut bytes = vec![0u8; 32];
                OsRng.fill_bytes(&mut bytes);
                bytes
            }
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
        })
    }
}
