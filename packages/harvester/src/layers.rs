//! Discovery of geoserver workspaces from the portal taxonomy page.
//!
//! The set of workspaces to harvest is not known to the geoserver itself; it
//! is maintained as a taxonomy on the open-data portal. The page is plain
//! HTML where each workspace is rendered as an anchor inside
//! `<li class="geoserver-workspace">`.

use std::sync::LazyLock;

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::error::{HarvesterError, Result};

/// Selector for workspace anchors on the taxonomy page.
#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static WORKSPACE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.geoserver-workspace > a").expect("valid selector"));

/// Fetch the taxonomy page and extract the workspace names to harvest.
///
/// Any transport failure is fatal for the WFS harvest: without the layer
/// list there is nothing to iterate over, and there is no partial or retry
/// path.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `layers_uri` - URL of the taxonomy page
///
/// # Returns
/// Ordered list of workspace names, possibly empty.
pub fn discover_layers(client: &Client, layers_uri: &str) -> Result<Vec<String>> {
    tracing::debug!(layers_uri, "discovering geoserver workspaces");

    let response = client
        .get(layers_uri)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|source| HarvesterError::LayerDiscovery { source })?;
    let body = response
        .text()
        .map_err(|source| HarvesterError::LayerDiscovery { source })?;

    Ok(parse_layers(&body))
}

/// Extract workspace names from the taxonomy page HTML.
///
/// Parsing is tolerant of malformed markup. Anchors are collected in
/// document order; anchors with no text are dropped.
pub fn parse_layers(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&WORKSPACE_SELECTOR)
        .map(|anchor| anchor.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
