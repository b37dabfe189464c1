use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dosesense::application::ports::WebSearchClient;
use dosesense::infrastructure::http::RetryPolicy;
use dosesense::infrastructure::search::BingSearchClient;
use serde_json::json;

use crate::helpers::spawn_server;

type Recorded = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn search(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if headers.get("Ocp-Apim-Subscription-Key").is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    recorded.lock().unwrap().push(params);

    Json(json!({
        "webPages": {
            "value": [
                {
                    "name": "Aspirin - Uses",
                    "url": "https://drugs.com/aspirin",
                    "datePublishedDisplayText": "Jan 3, 2024",
                    "snippet": "Aspirin reduces fever."
                },
                {
                    "name": "Aspirin overview",
                    "url": "https://webmd.com/aspirin"
                }
            ]
        }
    }))
    .into_response()
}

async fn serve(router: Router) -> String {
    format!("{}/search", spawn_server(router).await)
}

#[tokio::test]
async fn given_sites_when_searching_then_query_is_site_restricted_and_hits_mapped() {
    let recorded: Recorded = Arc::default();
    let endpoint = serve(
        Router::new()
            .route("/search", get(search))
            .with_state(recorded.clone()),
    )
    .await;
    let client = BingSearchClient::new(&endpoint, "key", "config-7");
    let sites = vec!["drugs.com".to_string(), "webmd.com".to_string()];

    let outcome = client.search("aspirin", &sites).await;

    let hits = outcome.into_value_or_default();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].published_date, "Jan 3, 2024");
    assert_eq!(hits[1].snippet, "");

    let params = recorded.lock().unwrap()[0].clone();
    assert_eq!(params["q"], "(site:drugs.com OR site:webmd.com) aspirin");
    assert_eq!(params["customconfig"], "config-7");
    assert_eq!(params["mkt"], "en-US");
}

#[tokio::test]
async fn given_backend_error_when_searching_then_outcome_degrades() {
    let endpoint = serve(Router::new().route(
        "/search",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;
    let client = BingSearchClient::new(&endpoint, "key", "config").with_retry(RetryPolicy::none());

    let outcome = client.search("aspirin", &[]).await;

    assert!(outcome.is_degraded());
    assert_eq!(
        outcome.degraded_reason(),
        Some("search returned 500 Internal Server Error")
    );
}

#[tokio::test]
async fn given_response_without_web_pages_when_searching_then_empty_and_not_degraded() {
    let endpoint = serve(Router::new().route("/search", get(|| async { Json(json!({})) }))).await;
    let client = BingSearchClient::new(&endpoint, "key", "config");

    let outcome = client.search("aspirin", &[]).await;

    assert!(!outcome.is_degraded());
    assert!(outcome.into_value_or_default().is_empty());
}
