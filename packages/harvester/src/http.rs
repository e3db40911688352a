//! HTTP client wrapper for talking to the geoserver.
//!
//! All requests are blocking and sequential. There is no retry logic: a
//! transport failure or non-200 response is immediately fatal for the
//! harvest of the service that issued the request.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("geosync-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Fetch an XML document from a capabilities endpoint.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to fetch
///
/// # Returns
/// The raw XML body, or `HarvesterError::DataSourceUnavailable` when the
/// server answers with anything other than HTTP 200.
pub fn fetch_xml(client: &Client, url: &str) -> Result<String> {
    tracing::debug!(url, "fetching capabilities document");

    let response = client.get(url).header(ACCEPT, "application/xml").send()?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(HarvesterError::DataSourceUnavailable {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.text()?)
}
