//! Upstream provider clients against a mock HTTP server.

use std::time::Duration;

use weathernow_core::{
    LocationQuery, NewsProvider, ProviderError, ProviderId, WeatherProvider,
    provider::{gnews::GNewsProvider, http_client, weatherapi::WeatherApiProvider},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "secret-key-123";

fn weather_provider(server: &MockServer) -> WeatherApiProvider {
    let http = http_client(Duration::from_secs(5)).unwrap();
    WeatherApiProvider::new(KEY.to_string(), http).with_base_url(server.uri())
}

fn news_provider(server: &MockServer) -> GNewsProvider {
    let http = http_client(Duration::from_secs(5)).unwrap();
    GNewsProvider::new(KEY.to_string(), http).with_base_url(server.uri())
}

#[tokio::test]
async fn forecast_by_place_sends_fixed_parameters() {
    let server = MockServer::start().await;
    let body = serde_json::json!({ "location": { "name": "Paris" }, "anything": [1, 2, 3] });

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("key", KEY))
        .and(query_param("q", "Paris"))
        .and(query_param("days", "7"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let query = LocationQuery::place("Paris").unwrap();
    let value = weather_provider(&server).forecast(&query).await.unwrap();

    assert_eq!(value, body);
}

#[tokio::test]
async fn forecast_by_coordinates_joins_lat_lon() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "48.8566,2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let query = LocationQuery::coordinates(48.8566, 2.3522).unwrap();
    weather_provider(&server).forecast(&query).await.unwrap();
}

#[tokio::test]
async fn forecast_non_success_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    let query = LocationQuery::place("Atlantis").unwrap();
    let err = weather_provider(&server).forecast(&query).await.unwrap_err();

    match &err {
        ProviderError::Status { provider, status, body } => {
            assert_eq!(*provider, ProviderId::WeatherApi);
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("No matching location"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn forecast_non_json_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let query = LocationQuery::place("Paris").unwrap();
    let err = weather_provider(&server).forecast(&query).await.unwrap_err();

    assert!(matches!(err, ProviderError::Malformed { provider: ProviderId::WeatherApi, .. }));
}

#[tokio::test]
async fn slow_upstream_times_out_without_leaking_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let http = http_client(Duration::from_millis(200)).unwrap();
    let provider = WeatherApiProvider::new(KEY.to_string(), http).with_base_url(server.uri());
    let query = LocationQuery::place("Paris").unwrap();

    let err = provider.forecast(&query).await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(!err.to_string().contains(KEY));
    assert!(!format!("{err:?}").contains(KEY));
}

#[tokio::test]
async fn news_search_appends_weather_and_caps_results() {
    let server = MockServer::start().await;
    let body = serde_json::json!({ "totalArticles": 1, "articles": [
        { "title": "Paris braces for storm", "url": "https://news.example/1" }
    ]});

    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .and(query_param("q", "Paris weather"))
        .and(query_param("token", KEY))
        .and(query_param("lang", "en"))
        .and(query_param("max", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let value = news_provider(&server).search("Paris").await.unwrap();

    assert_eq!(value, body);
}

#[tokio::test]
async fn news_server_error_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = news_provider(&server).search("Paris").await.unwrap_err();

    assert_eq!(err.provider(), ProviderId::GNews);
    assert!(err.to_string().contains("503"));
}
