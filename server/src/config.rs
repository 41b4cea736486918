//! Environment-driven server configuration.
//!
//! | Variable               | Default     |
//! |------------------------|-------------|
//! | `HOST`                 | `127.0.0.1` |
//! | `PORT`                 | `8000`      |
//! | `REQLINE_TIMEOUT_SECS` | unset       |

use std::time::Duration;

use reqline_core::UreqTransport;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Global bound on each outbound call, enforced by the transport.
    pub transport_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            transport_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            if host.trim().is_empty() {
                return Err(invalid("HOST", host));
            }
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| invalid("PORT", port))?;
        }
        if let Some(secs) = lookup("REQLINE_TIMEOUT_SECS") {
            let parsed: u64 = secs
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| invalid("REQLINE_TIMEOUT_SECS", secs.clone()))?;
            config.transport_timeout = Some(Duration::from_secs(parsed));
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn transport(&self) -> UreqTransport {
        UreqTransport::with_timeout(self.transport_timeout)
    }
}

fn invalid(name: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { name, value }
}
