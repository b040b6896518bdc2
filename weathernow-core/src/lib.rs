//! Core library for WeatherNow.
//!
//! This crate defines:
//! - Location queries and their validation
//! - Clients for the upstream weather and news providers
//! - The dashboard model and the weather-then-news aggregation flow
//! - Display transforms (units, condition icons, advice)
//! - Client configuration
//!
//! It is used by `weathernow-gateway` and `weathernow-cli`.

pub mod aggregator;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod source;

pub use aggregator::{Dashboard, DashboardState};
pub use config::Config;
pub use display::{ConditionCategory, TemperatureUnit};
pub use error::{ProviderError, QueryError};
pub use model::{DashboardViewModel, NewsItem, Session, WeatherSnapshot};
pub use provider::{NewsProvider, ProviderId, WeatherProvider};
pub use query::{LocationParams, LocationQuery};
pub use source::{DataSource, DataSourceKind};
