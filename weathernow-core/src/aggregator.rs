//! Dashboard orchestration: resolve a location, fetch weather, then fetch
//! news for the place the weather provider resolved.
//!
//! Fetching is split into tickets so a caller can run the network half
//! without holding the dashboard. Each search bumps a generation counter;
//! results carrying an older generation are dropped on apply, so a slow
//! response can never overwrite a newer search.

use std::sync::Arc;

use crate::{
    display::{ConditionCategory, TemperatureUnit, recommendation_for_fahrenheit},
    error::QueryError,
    model::{DashboardViewModel, NewsItem, WeatherSnapshot},
    query::{LocationParams, LocationQuery},
    source::DataSource,
};

pub const NO_LOCATION_MESSAGE: &str = "No location specified. Please enter a city name.";
pub const INVALID_SEARCH_MESSAGE: &str = "Please enter a valid city name.";
pub const WEATHER_FAILED_MESSAGE: &str = "Failed to fetch weather data. Please try again.";
pub const NEWS_FAILED_MESSAGE: &str = "Unable to fetch news stories at this time.";
pub const NEWS_SKIPPED_MESSAGE: &str = "No place name was resolved, so no news was requested.";
pub const NO_STORIES_MESSAGE: &str = "No weather stories available at the moment.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Idle,
    /// Nothing to look up yet; waiting for a manual search.
    NoLocation,
    LoadingWeather,
    LoadingNews,
    Ready,
    /// The weather fetch failed. A manual search starts over.
    Error(String),
}

/// A weather fetch scheduled for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherTicket {
    generation: u64,
    query: LocationQuery,
}

/// A news fetch scheduled after a weather fetch in the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsTicket {
    generation: u64,
    city: String,
}

#[derive(Debug)]
pub struct WeatherFetched {
    generation: u64,
    result: anyhow::Result<WeatherSnapshot>,
}

#[derive(Debug)]
pub struct NewsFetched {
    generation: u64,
    result: anyhow::Result<Vec<NewsItem>>,
}

impl WeatherTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &LocationQuery {
        &self.query
    }

    pub async fn fetch(self, source: &dyn DataSource) -> WeatherFetched {
        let result = source.fetch_weather(&self.query).await;
        WeatherFetched { generation: self.generation, result }
    }
}

impl NewsTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub async fn fetch(self, source: &dyn DataSource) -> NewsFetched {
        let result = source.fetch_news(&self.city).await;
        NewsFetched { generation: self.generation, result }
    }
}

/// One dashboard session.
#[derive(Debug)]
pub struct Dashboard {
    source: Arc<dyn DataSource>,
    generation: u64,
    state: DashboardState,
    view: DashboardViewModel,
    unit: TemperatureUnit,
}

impl Dashboard {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            generation: 0,
            state: DashboardState::Idle,
            view: DashboardViewModel::default(),
            unit: TemperatureUnit::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn view(&self) -> &DashboardViewModel {
        &self.view
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> Arc<dyn DataSource> {
        Arc::clone(&self.source)
    }

    /// Inspect navigation parameters. Returns the weather fetch to run, if any.
    pub fn mount(&mut self, params: &LocationParams) -> Option<WeatherTicket> {
        match params.resolve() {
            Ok(query) => Some(self.begin(query)),
            Err(QueryError::MissingLocation) => {
                self.state = DashboardState::NoLocation;
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "rejected navigation parameters");
                self.state = DashboardState::Error(err.to_string());
                None
            }
        }
    }

    /// Manual search. Blank input leaves the current state untouched.
    pub fn submit_search(&mut self, input: &str) -> Result<WeatherTicket, QueryError> {
        let query = LocationQuery::place(input)?;
        Ok(self.begin(query))
    }

    /// Start a new generation, discarding whatever was shown or in flight.
    pub fn begin(&mut self, query: LocationQuery) -> WeatherTicket {
        self.generation += 1;
        self.state = DashboardState::LoadingWeather;
        self.view = DashboardViewModel::default();
        tracing::info!(generation = self.generation, query = %query, "loading weather");

        WeatherTicket { generation: self.generation, query }
    }

    /// Apply a weather result. Returns the news fetch to run next, if any.
    pub fn apply_weather(&mut self, fetched: WeatherFetched) -> Option<NewsTicket> {
        if fetched.generation != self.generation {
            tracing::debug!(
                stale = fetched.generation,
                current = self.generation,
                "dropping superseded weather result"
            );
            return None;
        }

        let snapshot = match fetched.result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "weather fetch failed");
                self.state = DashboardState::Error(WEATHER_FAILED_MESSAGE.to_string());
                return None;
            }
        };

        let city = snapshot.city().to_string();
        self.view.weather = Some(snapshot);

        if city.is_empty() {
            tracing::warn!("weather response resolved no place name, skipping news");
            self.view.warnings.push(NEWS_SKIPPED_MESSAGE.to_string());
            self.state = DashboardState::Ready;
            return None;
        }

        self.state = DashboardState::LoadingNews;
        Some(NewsTicket { generation: self.generation, city })
    }

    /// Apply a news result. A failure only adds a warning.
    pub fn apply_news(&mut self, fetched: NewsFetched) -> bool {
        if fetched.generation != self.generation {
            tracing::debug!(
                stale = fetched.generation,
                current = self.generation,
                "dropping superseded news result"
            );
            return false;
        }

        match fetched.result {
            Ok(news) => self.view.news = news,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "news fetch failed");
                self.view.news.clear();
                self.view.warnings.push(NEWS_FAILED_MESSAGE.to_string());
            }
        }

        self.state = DashboardState::Ready;
        true
    }

    /// Run both fetches for a ticket in order.
    pub async fn load(&mut self, ticket: WeatherTicket) {
        let source = self.source();
        let fetched = ticket.fetch(source.as_ref()).await;

        if let Some(news) = self.apply_weather(fetched) {
            let fetched = news.fetch(source.as_ref()).await;
            self.apply_news(fetched);
        }
    }

    /// Mount and load in one step.
    pub async fn open(&mut self, params: &LocationParams) {
        if let Some(ticket) = self.mount(params) {
            self.load(ticket).await;
        }
    }

    /// Manual search and load in one step.
    pub async fn search(&mut self, input: &str) -> Result<(), QueryError> {
        let ticket = self.submit_search(input)?;
        self.load(ticket).await;
        Ok(())
    }

    /// Switch the display unit. Never refetches.
    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// Current temperature in the display unit.
    pub fn current_temperature(&self) -> Option<String> {
        self.view.weather.as_ref().map(|w| self.unit.format(w.current.temperature_f))
    }

    pub fn recommendation(&self) -> Option<&'static str> {
        self.view
            .weather
            .as_ref()
            .map(|w| recommendation_for_fahrenheit(w.current.temperature_f, &w.current.condition))
    }

    pub fn current_category(&self) -> Option<ConditionCategory> {
        self.view.weather.as_ref().map(|w| ConditionCategory::from_condition(&w.current.condition))
    }
}
