use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of hourly entries kept from the first forecast day.
pub const HOURLY_WINDOW: usize = 8;

/// Number of headlines shown on the dashboard.
pub const NEWS_LIMIT: usize = 5;

/// Place resolved by the weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub name: String,
    pub region: String,
    pub country: String,
}

/// Current conditions. Temperatures are in Fahrenheit as delivered upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_f: f64,
    pub feels_like_f: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mph: f64,
    pub uv_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: NaiveDateTime,
    pub temperature_f: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub max_temperature_f: f64,
    pub min_temperature_f: f64,
    pub condition: String,
}

/// Everything the dashboard knows about the weather at one place.
///
/// Never edited in place: a new search replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place: ResolvedPlace,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
}

impl WeatherSnapshot {
    /// Name used to drive the news search.
    pub fn city(&self) -> &str {
        self.place.name.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

/// Weather and news merged for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardViewModel {
    pub weather: Option<WeatherSnapshot>,
    pub news: Vec<NewsItem>,
    /// Non-fatal problems raised while loading, e.g. a failed news fetch.
    pub warnings: Vec<String>,
}

/// Who is looking at the dashboard. Passed explicitly into the views that
/// greet the user; there is no authentication behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub display_name: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        let name = name.trim();
        Self { display_name: (!name.is_empty()).then(|| name.to_string()) }
    }

    pub fn greeting(&self) -> Option<String> {
        self.display_name.as_ref().map(|name| format!("Welcome back, {name}!"))
    }
}
