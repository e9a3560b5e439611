//! Runtime configuration, read once at startup from the environment
//! (and an optional `.env` file) and immutable afterwards.
use std::{net::SocketAddr, time::Duration};

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_MODEL_WORKERS: usize = 8;

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "https://smilecare-dentals.vercel.app",
    "https://smilecare-dentals.vercel.app/",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Shared secret expected in `X-API-Key`. `None` rejects every chat call.
    pub chat_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub allowed_origins: Vec<String>,
    pub model_timeout: Duration,
    pub model_workers: usize,
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("chat_api_key_configured", &self.chat_api_key.is_some())
            .field("gemini_api_key_configured", &self.gemini_api_key.is_some())
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("model_timeout", &self.model_timeout)
            .field("model_workers", &self.model_workers)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            chat_api_key: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
            model_workers: DEFAULT_MODEL_WORKERS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = parse_or("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR)?;
        let timeout_secs: u64 = parse_or(
            "MODEL_TIMEOUT_SECS",
            get("MODEL_TIMEOUT_SECS"),
            &DEFAULT_MODEL_TIMEOUT_SECS.to_string(),
        )?;
        let model_workers: usize = parse_or(
            "MODEL_WORKERS",
            get("MODEL_WORKERS"),
            &DEFAULT_MODEL_WORKERS.to_string(),
        )?;
        if model_workers == 0 {
            return Err(ConfigError::Invalid {
                var: "MODEL_WORKERS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Config {
            bind_addr,
            chat_api_key: get("CHAT_API_KEY"),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            allowed_origins,
            model_timeout: Duration::from_secs(timeout_secs),
            model_workers,
        })
    }
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| {
            if *s == "*" {
                warn!("ignoring wildcard entry in ALLOWED_ORIGINS; origins must be listed exactly");
                false
            } else {
                true
            }
        })
        .map(String::from)
        .collect()
}
