use crate::{error::ProviderError, query::LocationQuery};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::{fmt::Debug, time::Duration};

pub mod gnews;
pub mod weatherapi;

/// Forecast horizon requested from the weather provider.
pub const FORECAST_DAYS: u8 = 7;

/// Maximum number of articles requested from the news provider.
pub const NEWS_MAX_RESULTS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    WeatherApi,
    GNews,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => "weatherapi",
            ProviderId::GNews => "gnews",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast lookups. Implementations return the provider body untouched.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, query: &LocationQuery) -> Result<Value, ProviderError>;
}

/// Keyword news search. Implementations return the provider body untouched.
#[async_trait]
pub trait NewsProvider: Send + Sync + Debug {
    async fn search(&self, city: &str) -> Result<Value, ProviderError>;
}

/// HTTP client shared by the provider implementations.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Check the status and decode the body as JSON, without reshaping it.
pub(crate) async fn read_json(
    provider: ProviderId,
    res: reqwest::Response,
) -> Result<Value, ProviderError> {
    let status = res.status();
    let body = res.text().await.map_err(|e| ProviderError::network(provider, e))?;

    if !status.is_success() {
        return Err(ProviderError::Status { provider, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::Malformed { provider, reason: e.to_string() })
}

pub(crate) fn trim_base_url(base_url: impl Into<String>) -> String {
    let mut base_url = base_url.into();
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
