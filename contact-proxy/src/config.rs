use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.web3forms.com/submit";

pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    /// `None` when the secret is absent. The request handler reports that
    /// per invocation instead of this process refusing to start.
    pub access_key: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PROXY_PORT", "8787"),
            upstream_url: try_load("UPSTREAM_URL", DEFAULT_UPSTREAM_URL),
            access_key: read_secret("WEB3FORMS_ACCESS_KEY"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Secrets come from the environment directly or from a swarm-style mounted
/// file. Empty counts as absent.
fn read_secret(secret_name: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_name) {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name}: {e}");
        })
        .ok()
        .filter(|s| !s.is_empty())
}
