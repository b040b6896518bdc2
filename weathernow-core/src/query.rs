use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Where to look up the weather: coordinates or a free-text place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationQuery {
    Coordinates { lat: f64, lon: f64 },
    Place { q: String },
}

/// Raw location parameters as they arrive in a query string.
///
/// Values stay strings so that malformed numbers surface as a
/// [`QueryError`] instead of an extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub q: Option<String>,
}

impl LocationQuery {
    pub fn coordinates(lat: f64, lon: f64) -> Result<Self, QueryError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(QueryError::InvalidCoordinates(format!(
                "latitude {lat} is outside -90..90"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(QueryError::InvalidCoordinates(format!(
                "longitude {lon} is outside -180..180"
            )));
        }

        Ok(LocationQuery::Coordinates { lat, lon })
    }

    pub fn place(q: &str) -> Result<Self, QueryError> {
        let q = q.trim();
        if q.is_empty() {
            return Err(QueryError::MissingLocation);
        }

        Ok(LocationQuery::Place { q: q.to_string() })
    }

    /// The `q` value the weather provider expects.
    pub fn to_provider_query(&self) -> String {
        match self {
            LocationQuery::Coordinates { lat, lon } => format!("{lat},{lon}"),
            LocationQuery::Place { q } => q.clone(),
        }
    }

    /// Query-string pairs for a gateway `/api/weather` request.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
            LocationQuery::Place { q } => vec![("q", q.clone())],
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
            LocationQuery::Place { q } => f.write_str(q),
        }
    }
}

impl LocationParams {
    pub fn from_coordinates(lat: f64, lon: f64) -> Self {
        Self { lat: Some(lat.to_string()), lon: Some(lon.to_string()), q: None }
    }

    pub fn from_place(q: impl Into<String>) -> Self {
        Self { q: Some(q.into()), ..Self::default() }
    }

    /// Resolve into a single query. Coordinates win when both forms are given.
    pub fn resolve(&self) -> Result<LocationQuery, QueryError> {
        let lat = non_blank(self.lat.as_deref());
        let lon = non_blank(self.lon.as_deref());

        if let (Some(lat), Some(lon)) = (lat, lon) {
            let lat = parse_coordinate("latitude", lat)?;
            let lon = parse_coordinate("longitude", lon)?;
            return LocationQuery::coordinates(lat, lon);
        }

        match non_blank(self.q.as_deref()) {
            Some(q) => LocationQuery::place(q),
            None => Err(QueryError::MissingLocation),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_coordinate(name: &str, value: &str) -> Result<f64, QueryError> {
    value
        .parse::<f64>()
        .map_err(|_| QueryError::InvalidCoordinates(format!("{name} '{value}' is not a number")))
}
