//! Failure paths: upstream status, malformed bodies, transport errors, and
//! invalid configuration.

use std::sync::Arc;

use coinglance_core::{
    CoinGeckoClient, DashboardView, FetchErrorKind, FixtureHttpClient, HttpError, HttpResponse,
    MarketConfig, MarketDataSource, ValidationError, ViewStateController,
    UPSTREAM_STATUS_MESSAGE,
};

fn source_with(response: Result<HttpResponse, HttpError>) -> CoinGeckoClient {
    CoinGeckoClient::with_http_client(
        Arc::new(FixtureHttpClient::new(response)),
        MarketConfig::default(),
    )
}

#[tokio::test]
async fn non_success_status_uses_the_generic_message() {
    for status in [404, 429, 500, 503] {
        let source = source_with(Ok(HttpResponse::with_status(status, "{\"error\":\"nope\"}")));

        let err = source.fetch_top(10).await.expect_err("status must fail");

        assert_eq!(err.kind(), FetchErrorKind::Transport);
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.message(), UPSTREAM_STATUS_MESSAGE);
        assert_eq!(err.to_string(), "Failed to fetch cryptocurrency data");
    }
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let source = source_with(Ok(HttpResponse::ok_json("{not json")));

    let err = source.fetch_top(10).await.expect_err("body must fail");

    assert_eq!(err.kind(), FetchErrorKind::Parse);
    assert!(err.message().starts_with("failed to parse market data"));
}

#[tokio::test]
async fn json_object_instead_of_array_is_a_parse_error() {
    let source = source_with(Ok(HttpResponse::ok_json(r#"{"status":"ok"}"#)));

    let err = source.fetch_top(10).await.expect_err("object must fail");

    assert_eq!(err.kind(), FetchErrorKind::Parse);
}

#[tokio::test]
async fn transport_error_message_is_surfaced() {
    let source = source_with(Err(HttpError::new("network down")));

    let err = source.fetch_top(10).await.expect_err("transport must fail");

    assert_eq!(err.kind(), FetchErrorKind::Transport);
    assert_eq!(err.status(), None);
    assert_eq!(err.message(), "network down");
}

#[tokio::test]
async fn timeout_is_reported_as_transport_failure() {
    let source = source_with(Err(HttpError::timeout("request timed out after 10000ms")));
    let mut controller = ViewStateController::new();

    controller.load(&source, 10).await;

    assert_eq!(
        controller.view("anything"),
        DashboardView::Error {
            message: String::from("request timed out after 10000ms")
        }
    );
}

#[tokio::test]
async fn parse_failure_reaches_the_view_as_an_error() {
    let source = source_with(Ok(HttpResponse::ok_json("")));
    let mut controller = ViewStateController::new();

    controller.load(&source, 10).await;

    let view = controller.view("");
    assert!(
        matches!(&view, DashboardView::Error { message } if message.contains("parse")),
        "unexpected view {view:?}"
    );
}

#[test]
fn invalid_environment_values_are_rejected() {
    let lookup = |name: &str| match name {
        "COINGLANCE_PER_PAGE" => Some(String::from("ten")),
        _ => None,
    };

    let err = MarketConfig::from_lookup(lookup).expect_err("non-numeric per page");

    assert!(matches!(
        err,
        ValidationError::InvalidEnvValue {
            name: "COINGLANCE_PER_PAGE",
            ..
        }
    ));
}

#[test]
fn invalid_config_values_are_rejected() {
    let too_many = MarketConfig::default().with_per_page(251).validate();
    assert!(matches!(
        too_many,
        Err(ValidationError::InvalidPageSize { value: 251, .. })
    ));

    let zero_timeout = MarketConfig::default().with_timeout_ms(0).validate();
    assert!(matches!(zero_timeout, Err(ValidationError::ZeroTimeout)));

    let bad_url = MarketConfig::default().with_base_url("ftp://example").validate();
    assert!(matches!(bad_url, Err(ValidationError::InvalidBaseUrl { .. })));
}
