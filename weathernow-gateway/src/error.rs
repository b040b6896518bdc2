use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use weathernow_core::{ProviderError, QueryError};

/// Failures surfaced to gateway clients.
///
/// Upstream details are logged here and replaced by a generic message; the
/// client never sees provider bodies or URLs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(#[from] QueryError),

    /// Query string the extractor could not decode, e.g. a repeated key.
    #[error("{0}")]
    InvalidQuery(String),

    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: ProviderError,
    },
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl ApiError {
    pub fn weather_upstream(source: ProviderError) -> Self {
        ApiError::Upstream { message: "Error fetching weather data", source }
    }

    pub fn news_upstream(source: ProviderError) -> Self {
        ApiError::Upstream { message: "Error fetching news data", source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::BadRequest(_) | ApiError::InvalidQuery(_) => {
                tracing::info!(error = %self, "rejected request");
            }
            ApiError::Upstream { source, .. } => {
                tracing::warn!(
                    provider = %source.provider(),
                    timeout = source.is_timeout(),
                    error = %source,
                    "upstream call failed"
                );
            }
        }

        let body = Json(ErrorResponse { error: self.to_string() });
        (status, body).into_response()
    }
}
