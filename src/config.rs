use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::provider::Credentials;

/// Environment variable overriding `credentials.api_key`.
pub const API_KEY_ENV: &str = "DOGA_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default model (optional)
    pub model: Option<String>,

    /// Stream responses by default (optional, default true)
    pub stream: Option<bool>,

    /// Provider credentials, passed to the adapter as-is.
    #[serde(default)]
    pub credentials: Credentials,
}

impl Config {
    /// Load config if the file exists, otherwise return Ok(None).
    pub fn load_optional(path: impl AsRef<Path>) -> anyhow::Result<Option<Self>> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e))
                    .with_context(|| format!("failed to read config: {}", path.display()))
            }
        };

        let s = String::from_utf8(bytes).context("config is not valid UTF-8")?;
        let cfg: Config = toml::from_str(&s)
            .with_context(|| format!("failed to parse TOML: {}", path.display()))?;
        Ok(Some(cfg))
    }
}

/// Config credentials with the API key taken from `api_key_env` when set.
pub fn resolve_credentials(cfg: Option<&Config>, api_key_env: Option<String>) -> Credentials {
    let mut creds = cfg.map(|c| c.credentials.clone()).unwrap_or_default();
    if let Some(key) = api_key_env {
        creds.insert("api_key".to_string(), serde_json::Value::String(key));
    }
    creds
}
