use thiserror::Error;

use crate::provider::ProviderId;

/// Client input rejected before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Missing location parameters")]
    MissingLocation,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Missing city parameter")]
    MissingCity,
}

/// A single upstream call that did not produce a usable JSON body.
///
/// Network errors are stored with their URL stripped: provider URLs carry the
/// API key in the query string.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Network {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: ProviderId,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{provider} returned a malformed body: {reason}")]
    Malformed { provider: ProviderId, reason: String },
}

impl ProviderError {
    pub fn network(provider: ProviderId, source: reqwest::Error) -> Self {
        ProviderError::Network { provider, source: source.without_url() }
    }

    pub fn provider(&self) -> ProviderId {
        match self {
            ProviderError::Network { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Malformed { provider, .. } => *provider,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Network { source, .. } if source.is_timeout())
    }
}
