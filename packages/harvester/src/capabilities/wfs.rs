//! WFS `GetCapabilities` response parsing.

use roxmltree::{Document, Node};

use crate::xml::{
    child_text, find_child, find_children, get_text, local_name, query_all, query_nodes,
    query_single,
};

/// View over a WFS capabilities document.
pub struct WfsCapabilities<'a, 'input: 'a> {
    doc: &'a Document<'input>,
}

impl<'a, 'input: 'a> WfsCapabilities<'a, 'input> {
    /// Wrap a parsed capabilities document.
    pub fn new(doc: &'a Document<'input>) -> Self {
        Self { doc }
    }

    /// All feature types offered by the service, in document order.
    ///
    /// Feature types live under the `FeatureTypeList` container; a missing
    /// or empty container yields an empty list, not an error.
    pub fn feature_types(&self) -> Vec<WfsFeatureType<'a, 'input>> {
        let root = self.doc.root_element();

        let Some(list) = root
            .descendants()
            .find(|n| n.is_element() && local_name(*n) == "FeatureTypeList")
        else {
            return Vec::new();
        };

        find_children(list, "FeatureType")
            .map(|node| WfsFeatureType { node })
            .collect()
    }

    /// Name of the service contact point.
    pub fn contact_name(&self) -> String {
        query_single(
            self.doc.root_element(),
            "ows:ServiceProvider/ows:ServiceContact/ows:IndividualName",
        )
    }

    /// Organization behind the service contact point.
    pub fn contact_organization(&self) -> String {
        query_single(self.doc.root_element(), "ows:ServiceProvider/ows:ProviderName")
    }

    /// Email address of the service contact point.
    pub fn contact_email(&self) -> String {
        query_single(
            self.doc.root_element(),
            "ows:ServiceProvider/ows:ServiceContact/ows:ContactInfo/ows:Address/ows:ElectronicMailAddress",
        )
    }

    /// Access rights statement of the service.
    pub fn access_rights(&self) -> String {
        query_single(
            self.doc.root_element(),
            "ows:ServiceIdentification/ows:AccessConstraints",
        )
    }

    /// Keywords describing the service as a whole.
    pub fn service_keywords(&self) -> Vec<String> {
        query_all(
            self.doc.root_element(),
            "ows:ServiceIdentification/ows:Keywords/ows:Keyword",
        )
    }

    /// Output formats allowed on the `GetFeature` operation.
    ///
    /// Geoserver versions differ on whether the values sit directly under
    /// the `outputFormat` parameter or inside an `AllowedValues` wrapper;
    /// both shapes are read. Empty list when the metadata is absent.
    pub fn supported_output_formats(&self) -> Vec<String> {
        let root = self.doc.root_element();

        query_nodes(root, "ows:OperationsMetadata/ows:Operation")
            .into_iter()
            .filter(|operation| operation.attribute("name") == Some("GetFeature"))
            .flat_map(|operation| query_nodes(operation, "ows:Parameter"))
            .filter(|parameter| parameter.attribute("name") == Some("outputFormat"))
            .flat_map(|parameter| {
                parameter
                    .descendants()
                    .filter(|n| n.is_element() && local_name(*n) == "Value")
                    .map(get_text)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// View over one `FeatureType` element.
pub struct WfsFeatureType<'a, 'input: 'a> {
    node: Node<'a, 'input>,
}

impl WfsFeatureType<'_, '_> {
    /// The feature type name, stripped of a leading namespace prefix.
    ///
    /// The first `:` delimits prefix from local name: `"ns:Percelen"`
    /// becomes `"Percelen"`, a name without prefix is returned unchanged.
    pub fn name(&self) -> String {
        let name = child_text(self.node, "Name");

        match name.split_once(':') {
            Some((_, local)) => local.to_string(),
            None => name,
        }
    }

    /// The feature type title; empty string when absent.
    pub fn title(&self) -> String {
        child_text(self.node, "Title")
    }

    /// The feature type abstract; empty string when absent.
    pub fn abstract_text(&self) -> String {
        child_text(self.node, "Abstract")
    }

    /// Keywords scoped to this feature type.
    pub fn keywords(&self) -> Vec<String> {
        find_child(self.node, "Keywords")
            .map(|keywords| find_children(keywords, "Keyword").map(get_text).collect())
            .unwrap_or_default()
    }
}
