use std::time::Duration;

use dosesense::infrastructure::http::{RetryPolicy, is_transient_status};
use reqwest::StatusCode;

#[test]
fn given_default_policy_when_inspecting_then_two_retries_with_bounded_backoff() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_retries, 2);
    assert_eq!(policy.initial_backoff, Duration::from_millis(500));
    assert_eq!(policy.max_backoff, Duration::from_secs(8));
    assert_eq!(RetryPolicy::none().max_retries, 0);
}

#[test]
fn given_statuses_when_classifying_then_only_429_and_5xx_are_transient() {
    assert!(is_transient_status(StatusCode::TOO_MANY_REQUESTS));
    assert!(is_transient_status(StatusCode::SERVICE_UNAVAILABLE));
    assert!(is_transient_status(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(!is_transient_status(StatusCode::BAD_REQUEST));
    assert!(!is_transient_status(StatusCode::NOT_FOUND));
    assert!(!is_transient_status(StatusCode::OK));
}
