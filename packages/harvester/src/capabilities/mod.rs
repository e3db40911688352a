//! Read-only views over parsed capabilities documents.
//!
//! Each view wraps a borrowed XML tree and answers structural queries
//! without the caller needing namespace knowledge; lifetimes are bounded to
//! the HTTP response the document was parsed from.

pub mod wfs;
pub mod wms;

pub use wfs::{WfsCapabilities, WfsFeatureType};
pub use wms::{WmsCapabilities, WmsLayer};
