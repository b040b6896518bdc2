use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    error::ProviderError,
    model::{
        CurrentConditions, DailyForecast, HOURLY_WINDOW, HourlyForecast, ResolvedPlace,
        WeatherSnapshot,
    },
    provider::{FORECAST_DAYS, ProviderId, read_json, trim_base_url},
    query::LocationQuery,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

/// WeatherAPI.com forecast client.
#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: String, http: Client) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url);
        self
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn forecast(&self, query: &LocationQuery) -> Result<Value, ProviderError> {
        let q = query.to_provider_query();
        let days = FORECAST_DAYS.to_string();
        tracing::debug!(q = %q, days = %days, "requesting WeatherAPI forecast");

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", q.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::network(ProviderId::WeatherApi, e))?;

        read_json(ProviderId::WeatherApi, res).await
    }
}

/// Build a [`WeatherSnapshot`] from a `forecast.json` body.
pub fn snapshot_from_json(body: &Value) -> Result<WeatherSnapshot, serde_json::Error> {
    let parsed = WaForecastResponse::deserialize(body)?;

    let hourly: Vec<HourlyForecast> = parsed
        .forecast
        .forecastday
        .first()
        .map(|day| {
            day.hour
                .iter()
                .take(HOURLY_WINDOW)
                .map(|h| HourlyForecast {
                    time: h.time,
                    temperature_f: h.temp_f,
                    condition: h.condition.text.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let daily: Vec<DailyForecast> = parsed
        .forecast
        .forecastday
        .iter()
        .map(|d| DailyForecast {
            date: d.date,
            max_temperature_f: d.day.maxtemp_f,
            min_temperature_f: d.day.mintemp_f,
            condition: d.day.condition.text.clone(),
        })
        .collect();

    Ok(WeatherSnapshot {
        place: ResolvedPlace {
            name: parsed.location.name,
            region: parsed.location.region,
            country: parsed.location.country,
        },
        current: CurrentConditions {
            temperature_f: parsed.current.temp_f,
            feels_like_f: parsed.current.feelslike_f,
            condition: parsed.current.condition.text,
            humidity_pct: parsed.current.humidity,
            wind_speed_mph: parsed.current.wind_mph,
            uv_index: parsed.current.uv,
        },
        hourly,
        daily,
    })
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_f: f64,
    feelslike_f: f64,
    humidity: u8,
    wind_mph: f64,
    #[serde(default)]
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    #[serde(deserialize_with = "local_time")]
    time: NaiveDateTime,
    temp_f: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_f: f64,
    mintemp_f: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    #[serde(default)]
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

/// WeatherAPI reports local times as `2024-05-01 14:00`.
fn local_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M").map_err(serde::de::Error::custom)
}
