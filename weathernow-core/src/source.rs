use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration as DateSpan, NaiveDate};
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug, sync::Arc, time::Duration};

use crate::{
    config::Config,
    model::{
        CurrentConditions, DailyForecast, HOURLY_WINDOW, HourlyForecast, NEWS_LIMIT, NewsItem,
        ResolvedPlace, WeatherSnapshot,
    },
    provider::{FORECAST_DAYS, gnews, trim_base_url, weatherapi},
    query::LocationQuery,
};

/// Where the dashboard gets its data from.
#[async_trait]
pub trait DataSource: Send + Sync + Debug {
    async fn fetch_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot>;

    async fn fetch_news(&self, city: &str) -> Result<Vec<NewsItem>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataSourceKind {
    #[default]
    Live,
    Fixture,
}

impl DataSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSourceKind::Live => "live",
            DataSourceKind::Fixture => "fixture",
        }
    }

    pub const fn all() -> &'static [DataSourceKind] {
        &[DataSourceKind::Live, DataSourceKind::Fixture]
    }
}

impl std::fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DataSourceKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "live" => Ok(DataSourceKind::Live),
            "fixture" => Ok(DataSourceKind::Fixture),
            _ => Err(anyhow!(
                "Unknown data source '{value}'. Supported data sources: live, fixture."
            )),
        }
    }
}

/// Live data through the gateway's `/api/weather` and `/api/news`.
#[derive(Debug, Clone)]
pub struct GatewaySource {
    base_url: String,
    http: Client,
}

impl GatewaySource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the gateway")?;

        Ok(Self { base_url: trim_base_url(base_url), http })
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to gateway ({path})"))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(anyhow!("Gateway {path} request failed with status {status}: {body}"));
        }

        res.json()
            .await
            .with_context(|| format!("Failed to parse gateway {path} JSON"))
    }
}

#[async_trait]
impl DataSource for GatewaySource {
    async fn fetch_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot> {
        let body = self.get_json("/api/weather", &query.to_query_pairs()).await?;

        weatherapi::snapshot_from_json(&body).context("Weather response is missing expected fields")
    }

    async fn fetch_news(&self, city: &str) -> Result<Vec<NewsItem>> {
        let body = self.get_json("/api/news", &[("city", city.to_string())]).await?;

        gnews::items_from_json(&body).context("News response is missing expected fields")
    }
}

/// Fixed offline data for demos and tests. Place searches echo the name back.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    start: NaiveDate,
}

impl FixtureSource {
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    fn place_for(query: &LocationQuery) -> ResolvedPlace {
        match query {
            LocationQuery::Place { q } => {
                ResolvedPlace { name: q.clone(), region: String::new(), country: String::new() }
            }
            LocationQuery::Coordinates { .. } => ResolvedPlace {
                name: "San Francisco".to_string(),
                region: "California".to_string(),
                country: "United States of America".to_string(),
            },
        }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

const FIXTURE_CONDITIONS: [&str; 4] = ["Sunny", "Partly cloudy", "Light rain", "Windy"];

#[async_trait]
impl DataSource for FixtureSource {
    async fn fetch_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot> {
        let hourly = (0..HOURLY_WINDOW)
            .filter_map(|i| {
                self.start.and_hms_opt(i as u32, 0, 0).map(|time| HourlyForecast {
                    time,
                    temperature_f: 62.0 + i as f64,
                    condition: FIXTURE_CONDITIONS[i % 2].to_string(),
                })
            })
            .collect();

        let daily = (0..FORECAST_DAYS as usize)
            .map(|i| DailyForecast {
                date: self.start + DateSpan::days(i as i64),
                max_temperature_f: 75.0 - i as f64,
                min_temperature_f: 58.0 - i as f64,
                condition: FIXTURE_CONDITIONS[i % FIXTURE_CONDITIONS.len()].to_string(),
            })
            .collect();

        Ok(WeatherSnapshot {
            place: Self::place_for(query),
            current: CurrentConditions {
                temperature_f: 72.0,
                feels_like_f: 70.0,
                condition: "Sunny".to_string(),
                humidity_pct: 65,
                wind_speed_mph: 5.0,
                uv_index: 6.0,
            },
            hourly,
            daily,
        })
    }

    async fn fetch_news(&self, city: &str) -> Result<Vec<NewsItem>> {
        let slug = city.trim().to_lowercase().replace(' ', "-");
        let headlines = [
            format!("Heatwave expected to hit {city} next week"),
            format!("New weather station opens in {city}"),
            format!("Record rainfall recorded in {city} this month"),
        ];

        Ok(headlines
            .into_iter()
            .enumerate()
            .take(NEWS_LIMIT)
            .map(|(i, title)| NewsItem {
                title,
                url: format!("https://example.com/{slug}/{}", i + 1),
            })
            .collect())
    }
}

/// Construct the data source selected in the client configuration.
pub fn source_from_config(config: &Config) -> Result<Arc<dyn DataSource>> {
    let kind = config.data_source_kind()?;
    tracing::debug!(source = %kind, "selecting data source");

    let source: Arc<dyn DataSource> = match kind {
        DataSourceKind::Live => {
            Arc::new(GatewaySource::new(config.gateway_url(), config.request_timeout())?)
        }
        DataSourceKind::Fixture => Arc::new(FixtureSource::default()),
    };

    Ok(source)
}
