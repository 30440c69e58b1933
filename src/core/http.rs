use std::time::Duration;

use reqwest::Client;

use crate::utils::error::{BirdscapeError, Result};

/// Header the observation provider expects the API key in.
pub(crate) const API_KEY_HEADER: &str = "X-eBirdApiToken";

pub(crate) fn map_transport_error(e: reqwest::Error, timeout: Duration) -> BirdscapeError {
    if e.is_timeout() {
        BirdscapeError::ProviderTimeout {
            timeout_secs: timeout.as_secs(),
        }
    } else {
        BirdscapeError::ProviderUnavailable {
            status: e.status().map(|s| s.as_u16()),
            reason: e.to_string(),
        }
    }
}

/// One GET against a provider endpoint. Non-2xx statuses and transport
/// failures are mapped into the provider error taxonomy.
pub(crate) async fn get_body(
    client: &Client,
    url: &str,
    api_key: &str,
    timeout: Duration,
    query: &[(&str, String)],
) -> Result<String> {
    tracing::debug!("GET {}", url);
    let response = client
        .get(url)
        .header(API_KEY_HEADER, api_key)
        .query(query)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| map_transport_error(e, timeout))?;

    let status = response.status();
    tracing::debug!("provider response status: {}", status);
    if !status.is_success() {
        return Err(BirdscapeError::ProviderUnavailable {
            status: Some(status.as_u16()),
            reason: status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| map_transport_error(e, timeout))
}

/// `get_body` with a bounded retry loop: transient failures (timeouts,
/// transport errors, 5xx) are retried up to `max_retries` times with a
/// short linear backoff; 4xx responses fail immediately.
pub(crate) async fn get_body_with_retry(
    client: &Client,
    url: &str,
    api_key: &str,
    timeout: Duration,
    query: &[(&str, String)],
    max_retries: u32,
) -> Result<String> {
    let mut attempt = 0;
    loop {
        match get_body(client, url, api_key, timeout, query).await {
            Ok(body) => return Ok(body),
            Err(e) if e.is_transient() && attempt < max_retries => {
                attempt += 1;
                tracing::warn!(
                    "provider request failed ({}), retry {}/{}",
                    e,
                    attempt,
                    max_retries
                );
                tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
            }
            Err(e) => return Err(e),
        }
    }
}
