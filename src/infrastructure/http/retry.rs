use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};

pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Exponential backoff for outbound calls that may fail transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

pub fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Sends the request, retrying network errors, 429 and 5xx responses.
///
/// The last response is returned as-is once retries run out, so callers
/// still see the final status. A numeric `Retry-After` on 429 overrides the
/// computed backoff, capped at `max_backoff`.
pub async fn send_with_retry(
    request: RequestBuilder,
    policy: &RetryPolicy,
) -> Result<Response, reqwest::Error> {
    let mut backoff = policy.initial_backoff;
    let mut attempt = 0;

    loop {
        let Some(current) = request.try_clone() else {
            // Streaming bodies cannot be replayed.
            return request.send().await;
        };

        let wait = match current.send().await {
            Ok(response) if attempt < policy.max_retries && is_transient_status(response.status()) => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs);
                tracing::warn!(
                    status = %response.status(),
                    attempt,
                    "Transient upstream status, retrying"
                );
                retry_after.unwrap_or(backoff).min(policy.max_backoff)
            }
            Err(e) if attempt < policy.max_retries && (e.is_timeout() || e.is_connect() || e.is_request()) => {
                tracing::warn!(error = %e, attempt, "Upstream request failed, retrying");
                backoff
            }
            other => return other,
        };

        tokio::time::sleep(wait).await;
        backoff = (backoff * 2).min(policy.max_backoff);
        attempt += 1;
    }
}
