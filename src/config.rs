use anyhow::{bail, Context, Result};

use crate::constants::API_KEY_ENV;

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Reads the API credential from the environment. Startup aborts if it
    /// is missing or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .with_context(|| format!("{} environment variable is required", API_KEY_ENV))?;

        if api_key.trim().is_empty() {
            bail!("{} must not be empty", API_KEY_ENV);
        }

        Ok(Self { api_key })
    }
}
