use birdscape::{AppConfig, BirdscapeError, GeoWindow, ObservationProvider, SpeciesResolver};
use httpmock::prelude::*;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        api_base: server.base_url(),
        api_key: "test-key".to_string(),
        audio_endpoint: format!("{}/v1/soundscapes", server.base_url()),
        lookup_timeout_secs: 1,
        generation_timeout_secs: 5,
        max_retries: 0,
    }
}

#[tokio::test]
async fn resolves_and_normalizes_observations() {
    let server = MockServer::start();
    let obs_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/obs/geo/recent")
            .header("X-eBirdApiToken", "test-key")
            .query_param("lat", "38.00")
            .query_param("lng", "-78.50")
            .query_param("dist", "25");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"speciesCode": "norcar", "comName": "Northern Cardinal", "sciName": "Cardinalis cardinalis"},
                {"speciesCode": "blujay", "comName": "Blue Jay", "sciName": "Cyanocitta cristata"}
            ]));
    });

    let resolver = SpeciesResolver::new(test_config(&server));
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let list = resolver.resolve(&window).await.unwrap();

    obs_mock.assert();
    // Alphabetical by common name.
    assert_eq!(list.common_names(), vec!["Blue Jay", "Northern Cardinal"]);
}

#[tokio::test]
async fn collapses_duplicate_codes_with_differing_case_and_whitespace() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/geo/recent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"speciesCode": "norcar", "comName": "Northern Cardinal", "sciName": "Cardinalis cardinalis"},
                {"speciesCode": "norcar", "comName": "  northern cardinal ", "sciName": "Cardinalis cardinalis"}
            ]));
    });

    let resolver = SpeciesResolver::new(test_config(&server));
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let list = resolver.resolve(&window).await.unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list.common_names(), vec!["Northern Cardinal"]);
}

#[tokio::test]
async fn empty_provider_response_is_an_empty_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/geo/recent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let resolver = SpeciesResolver::new(test_config(&server));
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let list = resolver.resolve(&window).await.unwrap();

    assert!(list.is_empty());
}

#[tokio::test]
async fn malformed_payload_is_an_invalid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/geo/recent");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"not\": \"an array\"}");
    });

    let resolver = SpeciesResolver::new(test_config(&server));
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let err = resolver.resolve(&window).await.unwrap_err();

    assert!(matches!(err, BirdscapeError::InvalidProviderResponse { .. }));
}

#[tokio::test]
async fn record_missing_required_fields_is_an_invalid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/geo/recent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"speciesCode": "norcar"}
            ]));
    });

    let resolver = SpeciesResolver::new(test_config(&server));
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let err = resolver.resolve(&window).await.unwrap_err();

    assert!(matches!(err, BirdscapeError::InvalidProviderResponse { .. }));
}

#[tokio::test]
async fn client_error_fails_immediately_without_retry() {
    let server = MockServer::start();
    let obs_mock = server.mock(|when, then| {
        when.method(GET).path("/data/obs/geo/recent");
        then.status(403);
    });

    let mut config = test_config(&server);
    config.max_retries = 2;
    let resolver = SpeciesResolver::new(config);
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let err = resolver.resolve(&window).await.unwrap_err();

    obs_mock.assert_hits(1);
    match err {
        BirdscapeError::ProviderUnavailable { status, .. } => assert_eq!(status, Some(403)),
        other => panic!("expected ProviderUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn server_errors_are_retried_up_to_the_bound() {
    let server = MockServer::start();
    let obs_mock = server.mock(|when, then| {
        when.method(GET).path("/data/obs/geo/recent");
        then.status(503);
    });

    let mut config = test_config(&server);
    config.max_retries = 2;
    let resolver = SpeciesResolver::new(config);
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let err = resolver.resolve(&window).await.unwrap_err();

    // Initial attempt plus two retries.
    obs_mock.assert_hits(3);
    assert!(matches!(
        err,
        BirdscapeError::ProviderUnavailable {
            status: Some(503),
            ..
        }
    ));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/geo/recent");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]))
            .delay(std::time::Duration::from_millis(1500));
    });

    let resolver = SpeciesResolver::new(test_config(&server));
    let window = GeoWindow::build(38.0, -78.5, 25.0).unwrap();
    let err = resolver.resolve(&window).await.unwrap_err();

    assert!(matches!(err, BirdscapeError::ProviderTimeout { .. }));
}
