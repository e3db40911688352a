//! Configuration constants, URL builders and validation functions.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// Default base URL of the Nijmegen geoserver.
pub const DEFAULT_BASE_URL: &str = "https://services.nijmegen.nl";

/// Default URL of the taxonomy page listing the geoserver workspaces.
pub const DEFAULT_LAYERS_URI: &str = "https://opendata.nijmegen.nl/geoserver-workspaces";

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large capabilities documents and slow
/// connections.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Projection code used to select the bounding box of a WMS layer.
pub const PROJECTION_CODE: &str = "EPSG:28992";

/// Resolution pairs (width, height) for which WMS map resources are built.
pub const WMS_RESOLUTIONS: &[(u32, u32)] = &[(500, 400), (1000, 800)];

/// Base URL pattern: http(s) scheme, host, no trailing slash.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BASE_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/]+(/[^\s/]+)*$").expect("valid regex"));

/// Layer name pattern: geoserver workspace names are word characters and dashes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAYER_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w-]+$").expect("valid regex"));

/// Validate a geoserver base URL.
///
/// # Arguments
/// * `base_url` - The base URL to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(HarvesterError::InvalidBaseUrl)` if invalid
///
/// # Examples
/// ```
/// use geosync_harvester::config::validate_base_url;
///
/// assert!(validate_base_url("https://services.nijmegen.nl").is_ok());
/// assert!(validate_base_url("services.nijmegen.nl").is_err());
/// assert!(validate_base_url("https://services.nijmegen.nl/").is_err());
/// ```
pub fn validate_base_url(base_url: &str) -> Result<()> {
    if BASE_URL_PATTERN.is_match(base_url) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidBaseUrl(base_url.to_string()))
    }
}

/// Validate a geoserver workspace (layer) name.
///
/// # Arguments
/// * `layer` - The layer name to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(HarvesterError::InvalidLayerName)` if invalid
pub fn validate_layer_name(layer: &str) -> Result<()> {
    if LAYER_NAME_PATTERN.is_match(layer) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidLayerName(layer.to_string()))
    }
}

/// Build the WFS `GetCapabilities` URL for a layer.
///
/// # Arguments
/// * `base_url` - The geoserver base URL
/// * `layer` - The geoserver workspace name
pub fn wfs_capabilities_url(base_url: &str, layer: &str) -> String {
    format!("{base_url}/geoservices/{layer}/ows?service=WFS&version=1.1.0&request=GetCapabilities")
}

/// Build the WFS `GetFeature` URL for a feature type within a layer.
///
/// This URL doubles as the identifier of the harvested dataset.
///
/// # Arguments
/// * `base_url` - The geoserver base URL
/// * `layer` - The geoserver workspace name
/// * `feature_name` - The feature type name, without namespace prefix
pub fn wfs_feature_url(base_url: &str, layer: &str, feature_name: &str) -> String {
    format!(
        "{base_url}/geoservices/{layer}/ows?service=WFS&version=1.1.0&request=GetFeature&typeName={feature_name}"
    )
}

/// Build the single WMS `GetCapabilities` URL of the geoserver.
///
/// # Arguments
/// * `base_url` - The geoserver base URL
pub fn wms_capabilities_url(base_url: &str) -> String {
    format!("{base_url}/geoservices/wms/extern?service=WMS&version=1.1.0&request=GetCapabilities")
}

/// Build the WMS `GetMap` URL for a layer, without rendering parameters.
///
/// Used as the identifier of a WMS-derived dataset and as the URL ingredient
/// of the WMS description templates.
///
/// # Arguments
/// * `base_url` - The geoserver base URL
/// * `layer_name` - The WMS layer name
pub fn wms_layer_url(base_url: &str, layer_name: &str) -> String {
    format!(
        "{base_url}/geoservices/wms/extern?service=WMS&version=1.1.0&request=GetMap&layers={layer_name}"
    )
}

/// Build the full WMS `GetMap` URL for a layer at a specific resolution.
///
/// # Arguments
/// * `base_url` - The geoserver base URL
/// * `layer_name` - The WMS layer name
/// * `bounding_box` - Comma separated `minx,miny,maxx,maxy` coordinates
/// * `width` - Requested image width in pixels
/// * `height` - Requested image height in pixels
/// * `format` - Negotiated image output format
pub fn wms_map_url(
    base_url: &str,
    layer_name: &str,
    bounding_box: &str,
    width: u32,
    height: u32,
    format: &str,
) -> String {
    format!(
        "{base}&bbox={bounding_box}&width={width}&height={height}&srs={srs}&format={format}",
        base = wms_layer_url(base_url, layer_name),
        srs = PROJECTION_CODE,
        format = urlencoding::encode(format),
    )
}

/// Current timestamp for the `modificationDate` field.
///
/// Formatted as local civil time without offset (`%Y-%m-%dT%H:%M:%S`); the
/// harvester is expected to run on a host in the Europe/Amsterdam timezone.
pub fn modification_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}
