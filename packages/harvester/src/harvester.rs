//! Main harvester service that ties all components together.

use crate::config::{validate_base_url, DEFAULT_BASE_URL, DEFAULT_LAYERS_URI};
use crate::error::Result;
use crate::http::create_client;
use crate::types::HarvestRecord;
use crate::{wfs, wms};

/// Options for a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Geoserver base URL, without trailing slash.
    pub base_url: String,

    /// URL of the taxonomy page listing the geoserver workspaces.
    pub layers_uri: String,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            layers_uri: DEFAULT_LAYERS_URI.to_string(),
        }
    }
}

/// Harvest both services and merge the results.
///
/// WFS records come first, then WMS records, each sub-harvest preserving
/// its own internal ordering. A fatal error in either service aborts the
/// whole run without partial results.
///
/// # Arguments
/// * `options` - Harvest options
///
/// # Returns
/// The full ordered list of successfully built records; entities skipped by
/// the build rules are silently omitted (their notices are logged).
pub fn harvest(options: &HarvestOptions) -> Result<Vec<HarvestRecord>> {
    validate_base_url(&options.base_url)?;
    let client = create_client()?;

    let mut records = wfs::harvest(&client, &options.base_url, &options.layers_uri)?;
    records.extend(wms::harvest(&client, &options.base_url)?);

    Ok(records)
}

/// Harvest only the WFS service.
pub fn harvest_wfs(options: &HarvestOptions) -> Result<Vec<HarvestRecord>> {
    validate_base_url(&options.base_url)?;
    let client = create_client()?;

    wfs::harvest(&client, &options.base_url, &options.layers_uri)
}

/// Harvest only the WMS service.
pub fn harvest_wms(options: &HarvestOptions) -> Result<Vec<HarvestRecord>> {
    validate_base_url(&options.base_url)?;
    let client = create_client()?;

    wms::harvest(&client, &options.base_url)
}
