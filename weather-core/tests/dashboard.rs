//! End-to-end render tests against a mocked Open-Meteo.

use std::time::Duration;

use weather_core::{
    AlertTier, Config, Dashboard, Endpoints, Location, NoticeLevel, PageRequest,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, locations: Vec<Location>) -> Config {
    Config {
        timeout_secs: 1,
        suggestion_count: 5,
        endpoints: Endpoints {
            weather: server.uri(),
            geocoding: server.uri(),
            image: "https://image.pollinations.ai".into(),
        },
        locations,
    }
}

async fn mount_forecast(server: &MockServer, lat: &str, current: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", lat))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": current
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn extreme_cold_snow_renders_critical_card() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "34.1526",
        serde_json::json!({
            "temperature_2m": -15,
            "relative_humidity_2m": 40,
            "wind_speed_10m": 5,
            "weather_code": 71
        }),
    )
    .await;

    let config = config_for(&mock_server, vec![Location::new("Ladakh", 34.1526, 77.5771)]);
    let dashboard = Dashboard::from_config(&config).unwrap();
    let page = dashboard.render(&PageRequest::default()).await;

    assert!(page.notices.is_empty());
    assert_eq!(page.strategic.len(), 1);
    let card = &page.strategic[0];
    assert_eq!(card.description, "Slight snow");
    assert_eq!(card.alert.tier, AlertTier::Critical);
    assert_eq!(card.alert.label, "🔴 Critical");
    assert_eq!(card.alert.message, "Extreme cold conditions - Exercise caution");
    assert!(card.image_url.contains("Slight%20snow"));
}

#[tokio::test]
async fn timed_out_location_gets_message_and_no_card() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "27.3389",
        serde_json::json!({
            "temperature_2m": 12.3,
            "relative_humidity_2m": 70,
            "wind_speed_10m": 4.1,
            "weather_code": 3
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "34.0837"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let config = config_for(
        &mock_server,
        vec![Location::new("Sikkim", 27.3389, 88.6065), Location::new("Kashmir", 34.0837, 74.7973)],
    );
    let page = Dashboard::from_config(&config).unwrap().render(&PageRequest::default()).await;

    let names: Vec<_> = page.strategic.iter().map(|c| c.location.name.as_str()).collect();
    assert_eq!(names, ["Sikkim"]);
    assert_eq!(page.notices.len(), 1);
    assert_eq!(page.notices[0].level, NoticeLevel::Error);
    assert_eq!(page.notices[0].text, "Request timed out. Please try again.");
}

#[tokio::test]
async fn typed_query_lists_suggestions_and_search_fetches_first_hit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"name": "Tawang", "latitude": 27.5861, "longitude": 91.8594,
                 "admin1": "Arunachal Pradesh", "country": "India"},
                {"name": "Tawang Town", "latitude": 27.58, "longitude": 91.86, "country": "India"}
            ]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"name": "Tawang", "latitude": 27.5861, "longitude": 91.8594}]
        })))
        .mount(&mock_server)
        .await;
    mount_forecast(
        &mock_server,
        "27.5861",
        serde_json::json!({
            "temperature_2m": 8,
            "relative_humidity_2m": 81,
            "wind_speed_10m": 17.5,
            "weather_code": 61
        }),
    )
    .await;

    let config = config_for(&mock_server, vec![]);
    let request = PageRequest { q: Some("Tawang".into()), search: true, ..PageRequest::default() };
    let page = Dashboard::from_config(&config).unwrap().render(&request).await;

    let suggested: Vec<_> = page.suggestions.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(suggested, ["Tawang, Arunachal Pradesh, India", "Tawang Town, India"]);

    let card = page.result.expect("search should produce a card");
    assert_eq!(card.location.name, "Tawang");
    assert_eq!(card.description, "Slight rain");
    assert_eq!(card.alert.tier, AlertTier::Warning);
    assert_eq!(card.alert.message, "Moderate wind speeds - Monitor conditions");
    assert_eq!(page.notices.len(), 1);
    assert_eq!(page.notices[0].level, NoticeLevel::Success);
    assert_eq!(page.notices[0].text, "Found weather data for Tawang");
}

#[tokio::test]
async fn geocoding_outage_is_reported_without_failing_render() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, vec![]);
    let request = PageRequest { q: Some("Leh".into()), search: true, ..PageRequest::default() };
    let page = Dashboard::from_config(&config).unwrap().render(&request).await;

    let texts: Vec<_> = page.notices.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("Error fetching suggestions:"));
    assert_eq!(texts[1], "Error accessing geocoding service: 503");
    assert!(page.result.is_none());
}

#[tokio::test]
async fn unreachable_geocoder_reports_network_error() {
    let mut config = Config { timeout_secs: 2, locations: vec![], ..Config::default() };
    // Nothing listens on the discard port.
    config.endpoints.geocoding = "http://127.0.0.1:9".into();

    let outcome = Dashboard::from_config(&config).unwrap().search("Leh").await;

    assert!(outcome.card.is_none());
    assert_eq!(outcome.notices.len(), 1);
    assert_eq!(outcome.notices[0].level, NoticeLevel::Error);
    assert!(
        outcome.notices[0].text.starts_with("Network error:"),
        "got {:?}",
        outcome.notices[0].text
    );
}
