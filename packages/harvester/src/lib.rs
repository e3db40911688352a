//! GeoSync Harvester - Harvest dataset metadata from the Nijmegen geoserver.
//!
//! This crate discovers the geoserver workspaces published on the Nijmegen
//! open-data portal, fetches the WFS and WMS `GetCapabilities` documents and
//! converts every feature type and queryable layer into a normalized
//! dataset record for the downstream publisher. Publishing metadata that
//! data curators embed in the layer abstracts as `[Key: value]` bracket
//! tags is extracted and consumed along the way.
//!
//! # Example
//!
//! ```
//! use geosync_harvester::config;
//!
//! // Validate harvest inputs
//! assert!(config::validate_base_url("https://services.nijmegen.nl").is_ok());
//! assert!(config::validate_layer_name("wonen").is_ok());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants, URL builders and validation
//! - [`types`]: Core data types (DatasetRecord, Resource, Notices, etc.)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for talking to the geoserver
//! - [`layers`]: Workspace discovery from the portal taxonomy page
//! - [`xml`]: XML utilities and the OGC namespace table
//! - [`capabilities`]: Read-only views over capabilities documents
//! - [`pattern`]: Bracket-tag extraction from descriptions
//! - [`rules`]: Build rules applied to every record
//! - [`templates`]: Description templates
//! - [`wfs`]: WFS harvesting
//! - [`wms`]: WMS harvesting
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod capabilities;
pub mod cli;
pub mod config;
pub mod error;
pub mod harvester;
pub mod http;
pub mod layers;
pub mod pattern;
pub mod rules;
pub mod templates;
pub mod types;
pub mod wfs;
pub mod wms;
pub mod xml;

// Re-export main functions
pub use harvester::{harvest, harvest_wfs, harvest_wms, HarvestOptions};

// Re-export commonly used items
pub use error::{HarvesterError, Result};
pub use types::{DatasetRecord, HarvestRecord, Notices, Resource, ServiceKind};
