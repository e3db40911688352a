//! Error types for the harvester.
//!
//! Errors fall into two classes: fatal errors that abort the harvest of a
//! whole service (this type), and per-record skips which are modelled as a
//! [`crate::rules::Skip`] outcome rather than an error.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid geoserver base URL.
    #[error("Invalid base URL: '{0}'. Expected http(s)://host without trailing slash")]
    InvalidBaseUrl(String),

    /// Invalid geoserver workspace (layer) name.
    #[error("Invalid layer name: '{0}'. Expected a geoserver workspace name")]
    InvalidLayerName(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The geoserver answered with a non-200 status code.
    #[error("datasource responded with HTTP statuscode {status} for {url}")]
    DataSourceUnavailable { status: u16, url: String },

    /// The taxonomy page listing the geoserver workspaces could not be read.
    #[error("unable to determine layers to harvest: {source}")]
    LayerDiscovery {
        #[source]
        source: reqwest::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
