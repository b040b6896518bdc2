//! HTTP gateway in front of the weather and news providers.
//!
//! Provider keys live only in this process. Clients call `/api/weather` and
//! `/api/news` and get the provider JSON back untouched.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::{AppState, router};
