//! End-to-end pipeline tests against a mock Open-Meteo server
//!
//! Both endpoints are pointed at one wiremock server. The scenarios cover
//! the happy path, the negative geocoding outcome, per-endpoint rejections,
//! transport failures, malformed forecast payloads, and the chart handoff.

use citycast::config::{ChartConfig, EndpointsConfig};
use citycast::{CitycastError, WeatherApiClient, draw_temperature_chart, fetch_city_forecast};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample geocoding response for a Paris lookup
fn paris_geocoding_response() -> serde_json::Value {
    serde_json::json!({
        "results": [
            {
                "id": 2988507,
                "name": "Paris",
                "latitude": 48.85,
                "longitude": 2.35,
                "country": "France",
                "country_code": "FR",
                "timezone": "Europe/Paris",
                "population": 2138551
            }
        ],
        "generationtime_ms": 0.7
    })
}

/// Sample 5-day forecast response matching the Paris coordinates
fn paris_forecast_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 48.85,
        "longitude": 2.35,
        "timezone": "Europe/Paris",
        "daily_units": {
            "time": "iso8601",
            "temperature_2m_max": "°C",
            "temperature_2m_min": "°C",
            "weathercode": "wmo code"
        },
        "daily": {
            "time": ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-04", "2025-06-05"],
            "temperature_2m_max": [20.0, 22.0, 19.0, 21.0, 23.0],
            "temperature_2m_min": [10.0, 11.0, 9.0, 10.0, 12.0],
            "weathercode": [0, 1, 3, 61, 71]
        }
    })
}

/// Create a client with both base URLs pointed at the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> WeatherApiClient {
    let endpoints = EndpointsConfig {
        geocoding_base_url: mock_server.uri(),
        forecast_base_url: mock_server.uri(),
        timeout_seconds: 5,
    };
    #[allow(clippy::expect_used)]
    WeatherApiClient::new(endpoints).expect("Failed to create client")
}

/// Mount a plain geocoding mock with the given response
async fn mount_geocoding(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

/// Mount a plain forecast mock with the given response
async fn mount_forecast(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_city_forecast_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocoding_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "48.85"))
        .and(query_param("longitude", "2.35"))
        .and(query_param(
            "daily",
            "temperature_2m_max,temperature_2m_min,weathercode",
        ))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let report = fetch_city_forecast(&client, "Paris").await.unwrap();

    assert_eq!(report.location.display_label(), "Paris, France");
    assert_eq!(report.days().len(), 5);

    let html = report.to_html();
    assert!(html.starts_with("<h3>📍 Paris, France</h3>"));
    assert!(html.contains("<strong>2025-06-01</strong>"));
    assert!(html.contains("L ☀️ 10°C / 50.0°F - H 20°C / 68.0°F"));
}

#[tokio::test]
async fn test_query_with_spaces_is_percent_encoded_on_the_wire() {
    let mock_server = MockServer::start().await;

    // The mock matches against the decoded parameter, so a hit proves the
    // query survived the encode/decode round trip intact
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {
                    "name": "New York",
                    "latitude": 40.71,
                    "longitude": -74.01,
                    "country": "United States"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let report = fetch_city_forecast(&client, "New York").await.unwrap();

    assert_eq!(report.location.display_label(), "New York, United States");
}

#[tokio::test]
async fn test_hit_without_country_presents_unknown() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"name": "Atlantis", "latitude": 0.0, "longitude": 0.0}
            ]
        })),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let report = fetch_city_forecast(&client, "Atlantis").await.unwrap();

    assert_eq!(report.location.display_label(), "Atlantis, Unknown");
}

// ============================================================================
// Query validation and negative geocoding outcomes
// ============================================================================

#[tokio::test]
async fn test_blank_query_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = fetch_city_forecast(&client, "   ").await;

    let err = result.unwrap_err();
    assert!(matches!(err, CitycastError::EmptyQuery));
    assert_eq!(err.user_message(), "❗ Please enter a valid city name.");
}

#[tokio::test]
async fn test_unknown_city_skips_the_forecast_call() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Nocity").await.unwrap_err();

    assert!(matches!(err, CitycastError::CityNotFound));
    assert_eq!(
        err.user_message(),
        "❌ City not found. Please check the spelling."
    );
}

#[tokio::test]
async fn test_missing_results_key_reads_as_not_found() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"generationtime_ms": 0.4})),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Nocity").await.unwrap_err();

    assert!(matches!(err, CitycastError::CityNotFound));
}

// ============================================================================
// Endpoint rejections and transport failures
// ============================================================================

#[tokio::test]
async fn test_geocoding_rejection_reads_failed_to_fetch_location() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Paris").await.unwrap_err();

    assert!(matches!(err, CitycastError::LocationFetch { .. }));
    assert_eq!(err.user_message(), "⚠️ Error: Failed to fetch location.");
}

#[tokio::test]
async fn test_forecast_rejection_reads_failed_to_fetch_weather_data() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_geocoding_response()),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(503).set_body_string("Service Unavailable"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Paris").await.unwrap_err();

    assert!(matches!(err, CitycastError::WeatherFetch { .. }));
    assert_eq!(err.user_message(), "⚠️ Error: Failed to fetch weather data.");
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Bind to grab a free port, then drop the listener so nothing answers
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoints = EndpointsConfig {
        geocoding_base_url: format!("http://{addr}"),
        forecast_base_url: format!("http://{addr}"),
        timeout_seconds: 5,
    };
    let client = WeatherApiClient::new(endpoints).unwrap();
    let err = fetch_city_forecast(&client, "Paris").await.unwrap_err();

    assert!(matches!(err, CitycastError::Transport { .. }));
    assert!(err.user_message().starts_with("⚠️ Error: "));
}

// ============================================================================
// Malformed forecast payloads
// ============================================================================

#[tokio::test]
async fn test_short_daily_series_is_malformed() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_geocoding_response()),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2025-06-01", "2025-06-02", "2025-06-03"],
                "temperature_2m_max": [20.0, 22.0, 19.0],
                "temperature_2m_min": [10.0, 11.0, 9.0],
                "weathercode": [0, 1, 3]
            }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Paris").await.unwrap_err();

    assert!(matches!(err, CitycastError::MalformedResponse { .. }));
    assert!(err.to_string().contains("expected 5 days"));
}

#[tokio::test]
async fn test_missing_daily_block_is_malformed() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_geocoding_response()),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"latitude": 48.85, "longitude": 2.35})),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Paris").await.unwrap_err();

    assert!(matches!(err, CitycastError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_null_daily_value_is_malformed() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_geocoding_response()),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-04", "2025-06-05"],
                "temperature_2m_max": [20.0, null, 19.0, 21.0, 23.0],
                "temperature_2m_min": [10.0, 11.0, 9.0, 10.0, 12.0],
                "weathercode": [0, 1, 3, 61, 71]
            }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Paris").await.unwrap_err();

    assert!(matches!(err, CitycastError::MalformedResponse { .. }));
    assert!(err.to_string().contains("null temperature_2m_max at index 1"));
}

#[tokio::test]
async fn test_misaligned_daily_series_is_malformed() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_geocoding_response()),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-04", "2025-06-05"],
                "temperature_2m_max": [20.0, 22.0, 19.0, 21.0, 23.0],
                "temperature_2m_min": [10.0, 11.0, 9.0, 10.0],
                "weathercode": [0, 1, 3, 61, 71]
            }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = fetch_city_forecast(&client, "Paris").await.unwrap_err();

    assert!(matches!(err, CitycastError::MalformedResponse { .. }));
    assert!(err.to_string().contains("misaligned"));
}

// ============================================================================
// Chart handoff
// ============================================================================

#[tokio::test]
async fn test_report_days_feed_the_chart() {
    let mock_server = MockServer::start().await;

    mount_geocoding(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_geocoding_response()),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(paris_forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let report = fetch_city_forecast(&client, "Paris").await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let options = ChartConfig {
        output_path: dir.path().join("forecast.svg").to_string_lossy().into_owned(),
        width: 860,
        height: 480,
    };
    let handle = draw_temperature_chart(None, report.days(), &options).unwrap();

    let svg = std::fs::read_to_string(handle.path()).unwrap();
    assert!(svg.contains("5-Day Temperature Forecast"));
    assert!(svg.contains("Min Temp (°C)"));
    assert!(svg.contains("Max Temp (°C)"));
}
