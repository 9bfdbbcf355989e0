//! Integration tests for `HttpPlacesProvider` using wiremock HTTP mocks.

use std::sync::Arc;

use merchant_places::{
    AddressAutocomplete, AddressSearchProvider, AutocompleteSettings, HttpPlacesProvider,
    PlacesError, ProviderSettings, SearchOutcome, SEARCH_ERROR_MESSAGE,
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_provider(base_url: &str) -> HttpPlacesProvider {
    HttpPlacesProvider::new(&ProviderSettings {
        endpoint: format!("{base_url}/v2/geocode"),
        api_key: Some("test-key".into()),
        ..ProviderSettings::default()
    })
    .expect("provider construction should not fail")
}

fn milan_result() -> serde_json::Value {
    serde_json::json!({
        "ResultItems": [
            {
                "PlaceId": "abc123",
                "Title": "Via Roma 1, 20121 Milano MI, Italia",
                "Address": {
                    "Label": "Via Roma 1, 20121 Milano MI, Italia",
                    "Street": "Via Roma",
                    "AddressNumber": "1",
                    "Locality": "Milano",
                    "PostalCode": "20121",
                    "Region": { "Name": "Lombardia", "Code": "LOM" },
                    "SubRegion": { "Code": "MI", "Name": "Milano" }
                }
            },
            {
                "PlaceId": "def456",
                "Title": "Via Roma, Monza MB, Italia"
            }
        ]
    })
}

#[tokio::test]
async fn search_returns_parsed_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/geocode"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "QueryText": "via roma 1",
            "MaxResults": 5,
            "Filter": { "IncludeCountries": ["ITA"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(milan_result()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let response = provider.search("via roma 1").await.expect("should parse");

    assert_eq!(response.result_items.len(), 2);
    let first = &response.result_items[0];
    assert_eq!(first.place_id.as_deref(), Some("abc123"));
    let address = first.address.as_ref().expect("structured address");
    assert_eq!(address.street.as_deref(), Some("Via Roma"));
    assert_eq!(
        address.sub_region.as_ref().and_then(|s| s.code.as_deref()),
        Some("MI")
    );
    assert!(response.result_items[1].address.is_none());
}

#[tokio::test]
async fn search_with_empty_body_yields_no_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let response = provider.search("via roma 1").await.expect("should parse");

    assert!(response.result_items.is_empty());
}

#[tokio::test]
async fn search_surfaces_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let err = provider.search("via roma 1").await.unwrap_err();

    match err {
        PlacesError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn search_rejects_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let err = provider.search("via roma 1").await.unwrap_err();

    assert!(matches!(err, PlacesError::Deserialize(_)));
}

#[tokio::test]
async fn autocomplete_over_http_reports_fixed_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = Arc::new(test_provider(&server.uri()));
    let adapter = AddressAutocomplete::new(provider, &AutocompleteSettings::default());

    assert_eq!(adapter.search("via roma 1").await, SearchOutcome::Failed);

    let state = adapter.snapshot().await;
    assert!(state.options.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(SEARCH_ERROR_MESSAGE));
}

#[tokio::test]
async fn autocomplete_skips_short_queries_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(milan_result()))
        .expect(0)
        .mount(&server)
        .await;

    let provider = Arc::new(test_provider(&server.uri()));
    let adapter = AddressAutocomplete::new(provider, &AutocompleteSettings::default());

    assert_eq!(adapter.search("abcd").await, SearchOutcome::TooShort);
}
