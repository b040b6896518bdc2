//! Gateway routes against mocked upstream providers.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use weathernow_core::provider::{gnews::GNewsProvider, http_client, weatherapi::WeatherApiProvider};
use weathernow_gateway::{AppState, router};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WEATHER_KEY: &str = "weather-key-abc";
const NEWS_KEY: &str = "news-key-xyz";

fn app(weather_base: &str, news_base: &str) -> Router {
    let http = http_client(Duration::from_secs(5)).unwrap();
    let weather =
        WeatherApiProvider::new(WEATHER_KEY.to_string(), http.clone()).with_base_url(weather_base);
    let news = GNewsProvider::new(NEWS_KEY.to_string(), http).with_base_url(news_base);

    router(AppState::new(Arc::new(weather), Arc::new(news)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn weather_by_place_passes_body_through() {
    let upstream = MockServer::start().await;
    let provider_body = json!({
        "location": { "name": "Paris", "country": "France" },
        "current": { "temp_f": 68.0 },
        "extra": { "kept": true }
    });

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("key", WEATHER_KEY))
        .and(query_param("q", "Paris"))
        .and(query_param("days", "7"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get(app(&upstream.uri(), &upstream.uri()), "/api/weather?q=Paris").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, provider_body);
}

#[tokio::test]
async fn weather_by_coordinates_sends_lat_comma_lon() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "40.71,-74.01"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": 1 })))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, _) =
        get(app(&upstream.uri(), &upstream.uri()), "/api/weather?lat=40.71&lon=-74.01").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn weather_without_location_is_400_and_never_calls_upstream() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&upstream)
        .await;

    for uri in ["/api/weather", "/api/weather?q=", "/api/weather?lat=10", "/api/weather?q=%20%20"] {
        let (status, body) = get(app(&upstream.uri(), &upstream.uri()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": "Missing location parameters" }), "{uri}");
    }

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn weather_with_invalid_coordinates_is_400() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&upstream)
        .await;

    let (status, body) =
        get(app(&upstream.uri(), &upstream.uri()), "/api/weather?lat=abc&lon=2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid coordinates"));
}

#[tokio::test]
async fn repeated_query_keys_get_a_json_400() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&upstream)
        .await;

    let cases = [("/api/weather?q=Paris&q=Rome", "q"), ("/api/news?city=a&city=b", "city")];
    for (uri, field) in cases {
        let (status, body) = get(app(&upstream.uri(), &upstream.uri()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let message = body["error"].as_str().unwrap_or_default();
        assert!(message.contains(&format!("duplicate field `{field}`")), "{uri}: {body}");
    }
}

#[tokio::test]
async fn weather_upstream_failure_is_500_with_generic_message() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 2006, "message": "API key is invalid." }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get(app(&upstream.uri(), &upstream.uri()), "/api/weather?q=Paris").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error fetching weather data" }));
}

#[tokio::test]
async fn unreachable_upstream_does_not_leak_key() {
    // Nothing listens on port 9 of the loopback interface.
    let dead = "http://127.0.0.1:9";

    let (status, body) = get(app(dead, dead), "/api/weather?q=Paris").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains(WEATHER_KEY));
}

#[tokio::test]
async fn news_searches_city_weather() {
    let upstream = MockServer::start().await;
    let provider_body = json!({ "totalArticles": 2, "articles": [
        { "title": "Paris heatwave", "url": "https://n.example/1" },
        { "title": "Seine floods", "url": "https://n.example/2" }
    ]});

    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .and(query_param("q", "Paris weather"))
        .and(query_param("token", NEWS_KEY))
        .and(query_param("lang", "en"))
        .and(query_param("max", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get(app(&upstream.uri(), &upstream.uri()), "/api/news?city=Paris").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, provider_body);
}

#[tokio::test]
async fn news_without_city_is_400_and_never_calls_upstream() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&upstream)
        .await;

    for uri in ["/api/news", "/api/news?city=", "/api/news?city=+"] {
        let (status, body) = get(app(&upstream.uri(), &upstream.uri()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": "Missing city parameter" }), "{uri}");
    }
}

#[tokio::test]
async fn news_upstream_failure_is_500() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get(app(&upstream.uri(), &upstream.uri()), "/api/news?city=Paris").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error fetching news data" }));
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(app("http://127.0.0.1:9", "http://127.0.0.1:9"), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn cors_is_open() {
    let response = app("http://127.0.0.1:9", "http://127.0.0.1:9")
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://dashboard.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let allow = response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap();
    assert_eq!(allow, "*");
}
