//! Core data types for the harvester.
//!
//! A [`DatasetRecord`] is created fresh for every discovered feature type or
//! WMS layer, mutated in place by the build rules and, when it survives the
//! pipeline, emitted as part of a [`HarvestRecord`]. Field names follow the
//! DCAT-oriented output contract of the downstream publisher.

use serde::Serialize;

/// The geoserver service a record was harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceKind {
    #[serde(rename = "WFS")]
    Wfs,

    #[serde(rename = "WMS")]
    Wms,
}

impl ServiceKind {
    /// Get the service name as used in OGC requests.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wfs => "WFS",
            Self::Wms => "WMS",
        }
    }
}

/// A downloadable or viewable representation of a dataset.
///
/// WFS records carry one resource per supported output format, WMS records
/// one per configured resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: String,

    pub description: String,

    pub format: String,

    #[serde(rename = "mediaType")]
    pub media_type: String,

    #[serde(rename = "accessURL")]
    pub access_url: String,

    #[serde(rename = "downloadURL")]
    pub download_url: Vec<String>,

    pub rights: String,
}

/// One dataset record in progress.
///
/// Created per discovered entity, never shared between entities. The
/// `geoserver_*` fields are provenance used by the build rules for URL
/// synthesis and are serialized alongside the DCAT fields for the
/// downstream publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRecord {
    pub geoserver_service: ServiceKind,

    pub geoserver_layer: String,

    pub identifier: String,

    pub title: String,

    pub description: String,

    #[serde(rename = "modificationDate")]
    pub modification_date: String,

    pub contact_point_name: String,

    pub contact_point_email: String,

    #[serde(rename = "accessRights")]
    pub access_rights: String,

    pub keyword: Vec<String>,

    pub theme: Vec<String>,

    #[serde(rename = "highValue")]
    pub high_value: bool,

    pub resources: Vec<Resource>,
}

impl DatasetRecord {
    /// Create an empty record for an entity of the given service and layer.
    #[must_use]
    pub fn new(service: ServiceKind, layer: impl Into<String>) -> Self {
        Self {
            geoserver_service: service,
            geoserver_layer: layer.into(),
            identifier: String::new(),
            title: String::new(),
            description: String::new(),
            modification_date: String::new(),
            contact_point_name: String::new(),
            contact_point_email: String::new(),
            access_rights: String::new(),
            keyword: Vec::new(),
            theme: Vec::new(),
            high_value: false,
            resources: Vec::new(),
        }
    }
}

/// Ordered, append-only log of human-readable notices for one entity.
///
/// Notices accumulate in pipeline execution order and are never removed or
/// reordered, also not when the entity is aborted; they are the diagnostic
/// record of why a dataset was built the way it was, or why it was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    entries: Vec<String>,
}

impl Notices {
    /// Create an empty notice log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notice.
    pub fn push(&mut self, notice: impl Into<String>) {
        self.entries.push(notice.into());
    }

    /// The notices appended so far, in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Consume the log into its entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A successfully built dataset record together with its notice log.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestRecord {
    #[serde(flatten)]
    pub dataset: DatasetRecord,

    #[serde(skip)]
    pub notices: Vec<String>,
}
