use anyhow::{Context, Result, anyhow};
use std::{net::SocketAddr, time::Duration};

use weathernow_core::provider::{gnews, weatherapi};

use crate::logging::LogFormat;

pub const DEFAULT_PORT: u16 = 5004;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Gateway settings, read from the process environment at startup.
#[derive(Clone)]
pub struct GatewayConfig {
    pub weather_api_key: String,
    pub gnews_api_key: String,
    pub host: String,
    pub port: u16,
    pub upstream_timeout: Duration,
    pub weather_base_url: String,
    pub gnews_base_url: String,
    pub log_format: LogFormat,
}

// Keys stay out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("weather_api_key", &"<redacted>")
            .field("gnews_api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("weather_base_url", &self.weather_base_url)
            .field("gnews_base_url", &self.gnews_base_url)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup, so tests need not touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let weather_api_key = var("WEATHER_API_KEY")
            .or_else(|| var("REACT_WEATHER_API_KEY"))
            .ok_or_else(|| {
                anyhow!(
                    "No weather provider key configured.\n\
                     Hint: set WEATHER_API_KEY in the environment or in a .env file."
                )
            })?;

        let gnews_api_key = var("GNEWS_API_KEY")
            .or_else(|| var("REACT_GNEWS_API_KEY"))
            .ok_or_else(|| {
                anyhow!(
                    "No news provider key configured.\n\
                     Hint: set GNEWS_API_KEY in the environment or in a .env file."
                )
            })?;

        let port = match var("PORT") {
            Some(p) => p.parse::<u16>().with_context(|| format!("Invalid PORT value '{p}'"))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(t) => t
                .parse::<u64>()
                .with_context(|| format!("Invalid UPSTREAM_TIMEOUT_SECS value '{t}'"))?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(anyhow!("UPSTREAM_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            weather_api_key,
            gnews_api_key,
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            upstream_timeout: Duration::from_secs(timeout_secs),
            weather_base_url: var("WEATHER_API_BASE_URL")
                .unwrap_or_else(|| weatherapi::DEFAULT_BASE_URL.to_string()),
            gnews_base_url: var("GNEWS_BASE_URL")
                .unwrap_or_else(|| gnews::DEFAULT_BASE_URL.to_string()),
            log_format: LogFormat::parse(var("LOG_FORMAT").as_deref()),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}
