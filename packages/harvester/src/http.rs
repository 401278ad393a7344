//! HTTP client wrapper for talking to the EDINET API.

use std::thread;

use reqwest::blocking::{Client, Response};

use crate::config::{HarvestConfig, HTTP_TIMEOUT_SECS};
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("edinet-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Issue a GET request, retrying on any non-success status.
///
/// EDINET intermittently answers 403 under load, so every non-2xx status is
/// treated the same: sleep `retry_delay` and try again, up to `max_retries`
/// attempts. When all attempts fail the caller gets
/// [`HarvesterError::RetriesExhausted`] instead of the bad response.
/// Transport-level failures are not retried.
pub fn get_with_retry(
    client: &Client,
    config: &HarvestConfig,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Response> {
    let mut last_status = None;

    for attempt in 1..=config.max_retries {
        let response = client.get(url).query(query).send()?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(
            status = %status,
            attempt,
            max_retries = config.max_retries,
            url,
            delay_secs = config.retry_delay.as_secs(),
            "non-success response, sleeping before retry"
        );
        last_status = Some(status);

        if attempt < config.max_retries {
            thread::sleep(config.retry_delay);
        }
    }

    Err(HarvesterError::RetriesExhausted {
        attempts: config.max_retries,
        status: last_status.map(|s| s.as_u16()).unwrap_or_default(),
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client().is_ok());
    }
}
