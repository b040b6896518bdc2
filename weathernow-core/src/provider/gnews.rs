use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::ProviderError,
    model::{NEWS_LIMIT, NewsItem},
    provider::{NEWS_MAX_RESULTS, ProviderId, read_json, trim_base_url},
};

use super::NewsProvider;

pub const DEFAULT_BASE_URL: &str = "https://gnews.io";

/// GNews keyword search client.
#[derive(Clone)]
pub struct GNewsProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for GNewsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GNewsProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GNewsProvider {
    pub fn new(api_key: String, http: Client) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url);
        self
    }

    fn search_url(&self) -> String {
        format!("{}/api/v4/search", self.base_url)
    }
}

/// Search term sent upstream for a city.
pub fn search_term(city: &str) -> String {
    format!("{} weather", city.trim())
}

#[async_trait]
impl NewsProvider for GNewsProvider {
    async fn search(&self, city: &str) -> Result<Value, ProviderError> {
        let term = search_term(city);
        let max = NEWS_MAX_RESULTS.to_string();
        tracing::debug!(term = %term, "requesting GNews search");

        let res = self
            .http
            .get(self.search_url())
            .query(&[
                ("q", term.as_str()),
                ("token", self.api_key.as_str()),
                ("lang", "en"),
                ("max", max.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::network(ProviderId::GNews, e))?;

        read_json(ProviderId::GNews, res).await
    }
}

/// Headlines from a search body, in provider order, capped at [`NEWS_LIMIT`].
pub fn items_from_json(body: &Value) -> Result<Vec<NewsItem>, serde_json::Error> {
    let parsed = GnSearchResponse::deserialize(body)?;

    Ok(parsed
        .articles
        .into_iter()
        .take(NEWS_LIMIT)
        .map(|a| NewsItem { title: a.title, url: a.url })
        .collect())
}

#[derive(Debug, Deserialize)]
struct GnArticle {
    title: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct GnSearchResponse {
    #[serde(default)]
    articles: Vec<GnArticle>,
}
