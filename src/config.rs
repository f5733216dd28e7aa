use crate::session::TokenStrategy;
use crate::storage::RecoveryMode;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_STORE_PATH: &str = "data/recipes.json";

/// Server configuration
///
/// Read from the environment (and a `.env` file when present); command-line
/// flags in the binary may override individual values afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_path: PathBuf,
    pub recovery: RecoveryMode,
    pub token_strategy: TokenStrategy,
    /// Keep recipes in memory only; nothing is written to `store_path`
    pub in_memory: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            recovery: RecoveryMode::Reset,
            token_strategy: TokenStrategy::Timestamped,
            in_memory: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("APP_HOST").unwrap_or(defaults.host);

        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("APP_PORT must be a valid u16")?,
            None => defaults.port,
        };

        let store_path = lookup("RECIPES_STORE_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        let strict = match lookup("RECIPES_STRICT_STORE") {
            Some(raw) => parse_flag(&raw).context("RECIPES_STRICT_STORE must be a boolean")?,
            None => false,
        };
        let recovery = if strict {
            RecoveryMode::Strict
        } else {
            defaults.recovery
        };

        let token_strategy = match lookup("SESSION_TOKENS") {
            Some(raw) => raw
                .parse::<TokenStrategy>()
                .map_err(anyhow::Error::msg)
                .context("SESSION_TOKENS is invalid")?,
            None => defaults.token_strategy,
        };

        Ok(Self {
            host,
            port,
            store_path,
            recovery,
            token_strategy,
            in_memory: defaults.in_memory,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow::anyhow!("'{}' is not a boolean", other)),
    }
}
