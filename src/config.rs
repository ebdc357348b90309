//! Environment-driven configuration, read once at startup.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub request_timeout: Duration,
}

impl Config {
    /// Load from the environment. Anything missing or unparsable falls back
    /// to its default rather than aborting startup.
    pub fn from_env() -> Self {
        Self {
            port: load_or("QABOARD_PORT", 8080),
            request_timeout: Duration::from_secs(load_or("QABOARD_REQUEST_TIMEOUT_SECS", 10)),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn load_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("invalid {key} value {raw:?}: {e}, using default {default}");
                default
            }
        },
        Err(_) => {
            info!("{key} not set, using default {default}");
            default
        }
    }
}
