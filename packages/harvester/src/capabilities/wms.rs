//! WMS `GetCapabilities` response parsing.
//!
//! WMS 1.1.0 capabilities carry no XML namespaces, so all queries here
//! match on local names.

use roxmltree::{Document, Node};

use crate::config::PROJECTION_CODE;
use crate::xml::{child_text, find_children, get_text, local_name, query_nodes, query_single};

/// View over a WMS capabilities document.
pub struct WmsCapabilities<'a, 'input: 'a> {
    doc: &'a Document<'input>,
}

impl<'a, 'input: 'a> WmsCapabilities<'a, 'input> {
    /// Wrap a parsed capabilities document.
    pub fn new(doc: &'a Document<'input>) -> Self {
        Self { doc }
    }

    /// All layers flagged `queryable`, in document order.
    pub fn queryable_layers(&self) -> Vec<WmsLayer<'a, 'input>> {
        self.doc
            .root_element()
            .descendants()
            .filter(|n| {
                n.is_element()
                    && local_name(*n) == "Layer"
                    && n.attribute("queryable") == Some("1")
            })
            .map(|node| WmsLayer { node })
            .collect()
    }

    /// The person or department of the contact point.
    pub fn contact_person(&self) -> String {
        query_single(
            self.doc.root_element(),
            "ContactInformation/ContactPersonPrimary/ContactPerson",
        )
    }

    /// The organization behind the contact point.
    pub fn contact_organization(&self) -> String {
        query_single(
            self.doc.root_element(),
            "ContactInformation/ContactPersonPrimary/ContactOrganization",
        )
    }

    /// The email address of the contact point.
    pub fn contact_email(&self) -> String {
        query_single(
            self.doc.root_element(),
            "ContactInformation/ContactElectronicMailAddress",
        )
    }

    /// Access rights restrictions declared on the service.
    pub fn access_rights(&self) -> String {
        query_single(self.doc.root_element(), "Service/AccessConstraints")
    }

    /// The preferred `GetMap` output format.
    ///
    /// Prefers `image/png`, falls back to `image/jpeg`, and yields an empty
    /// string when the service supports neither.
    pub fn preferred_output_format(&self) -> String {
        let formats: Vec<String> = query_nodes(self.doc.root_element(), "Request/GetMap/Format")
            .iter()
            .map(|n| get_text(*n))
            .collect();

        for preferred in ["image/png", "image/jpeg"] {
            if formats.iter().any(|format| format == preferred) {
                return preferred.to_string();
            }
        }

        String::new()
    }
}

/// View over one queryable `Layer` element.
pub struct WmsLayer<'a, 'input: 'a> {
    node: Node<'a, 'input>,
}

impl WmsLayer<'_, '_> {
    /// The layer name; empty string when absent.
    pub fn name(&self) -> String {
        child_text(self.node, "Name")
    }

    /// The layer title; empty string when absent.
    pub fn title(&self) -> String {
        child_text(self.node, "Title")
    }

    /// The layer abstract; empty string when absent.
    pub fn abstract_text(&self) -> String {
        child_text(self.node, "Abstract")
    }

    /// The bounding box of the layer in the fixed projection.
    ///
    /// Scans the layer's `BoundingBox` elements for the one whose `SRS`
    /// attribute equals `EPSG:28992` and joins its four coordinates as
    /// `minx,miny,maxx,maxy`. Each coordinate is truncated to its first six
    /// characters; this lossy cut matches the values the downstream viewer
    /// expects and must not be widened. Empty string when no matching box
    /// exists.
    pub fn bounding_box(&self) -> String {
        for bounding_box in find_children(self.node, "BoundingBox") {
            if bounding_box.attribute("SRS") != Some(PROJECTION_CODE) {
                continue;
            }

            let coordinate = |name: &str| -> String {
                bounding_box
                    .attribute(name)
                    .unwrap_or_default()
                    .chars()
                    .take(6)
                    .collect()
            };

            return format!(
                "{},{},{},{}",
                coordinate("minx"),
                coordinate("miny"),
                coordinate("maxx"),
                coordinate("maxy")
            );
        }

        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_WMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMT_MS_Capabilities version="1.1.0">
  <Service>
    <Name>OGC:WMS</Name>
    <AccessConstraints>geen beperkingen</AccessConstraints>
    <ContactInformation>
      <ContactPersonPrimary>
        <ContactPerson>Geo Informatie</ContactPerson>
        <ContactOrganization>Gemeente Nijmegen</ContactOrganization>
      </ContactPersonPrimary>
      <ContactElectronicMailAddress>geo@nijmegen.nl</ContactElectronicMailAddress>
    </ContactInformation>
  </Service>
  <Capability>
    <Request>
      <GetMap>
        <Format>image/png</Format>
        <Format>image/jpeg</Format>
      </GetMap>
    </Request>
    <Layer>
      <Title>Nijmegen WMS</Title>
      <Layer queryable="1">
        <Name>stadsdelen</Name>
        <Title>Stadsdelen</Title>
        <Abstract>[Delen dataset: ja] Stadsdelen van Nijmegen.</Abstract>
        <BoundingBox SRS="EPSG:4326" minx="5.7" miny="51.7" maxx="6.0" maxy="51.9"/>
        <BoundingBox SRS="EPSG:28992" minx="176334.123" miny="420520.456" maxx="190432.789" maxy="432658.012"/>
      </Layer>
      <Layer>
        <Name>achtergrond</Name>
        <Title>Achtergrondkaart</Title>
      </Layer>
      <Layer queryable="1">
        <Name>wijken</Name>
        <Title>Wijken</Title>
        <Abstract>Wijkindeling.</Abstract>
      </Layer>
    </Layer>
  </Capability>
</WMT_MS_Capabilities>"#;

    #[test]
    fn test_queryable_layers() {
        let doc = Document::parse(SAMPLE_WMS).unwrap();
        let capabilities = WmsCapabilities::new(&doc);

        let layers = capabilities.queryable_layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].name(), "stadsdelen");
        assert_eq!(layers[1].name(), "wijken");
    }

    #[test]
    fn test_contact_queries() {
        let doc = Document::parse(SAMPLE_WMS).unwrap();
        let capabilities = WmsCapabilities::new(&doc);

        assert_eq!(capabilities.contact_person(), "Geo Informatie");
        assert_eq!(capabilities.contact_organization(), "Gemeente Nijmegen");
        assert_eq!(capabilities.contact_email(), "geo@nijmegen.nl");
        assert_eq!(capabilities.access_rights(), "geen beperkingen");
    }

    #[test]
    fn test_preferred_output_format_prefers_png() {
        let doc = Document::parse(SAMPLE_WMS).unwrap();
        let capabilities = WmsCapabilities::new(&doc);

        assert_eq!(capabilities.preferred_output_format(), "image/png");
    }

    #[test]
    fn test_preferred_output_format_falls_back_to_jpeg() {
        let xml = r#"<WMT_MS_Capabilities>
          <Capability>
            <Request><GetMap><Format>image/jpeg</Format><Format>image/tiff</Format></GetMap></Request>
          </Capability>
        </WMT_MS_Capabilities>"#;
        let doc = Document::parse(xml).unwrap();
        let capabilities = WmsCapabilities::new(&doc);

        assert_eq!(capabilities.preferred_output_format(), "image/jpeg");
    }

    #[test]
    fn test_preferred_output_format_absent() {
        let xml = r#"<WMT_MS_Capabilities>
          <Capability>
            <Request><GetMap><Format>image/tiff</Format></GetMap></Request>
          </Capability>
        </WMT_MS_Capabilities>"#;
        let doc = Document::parse(xml).unwrap();
        let capabilities = WmsCapabilities::new(&doc);

        assert_eq!(capabilities.preferred_output_format(), "");
    }

    #[test]
    fn test_bounding_box_selects_projection_and_truncates() {
        let doc = Document::parse(SAMPLE_WMS).unwrap();
        let capabilities = WmsCapabilities::new(&doc);
        let layers = capabilities.queryable_layers();

        assert_eq!(layers[0].bounding_box(), "176334,420520,190432,432658");
    }

    #[test]
    fn test_bounding_box_absent_projection() {
        let doc = Document::parse(SAMPLE_WMS).unwrap();
        let capabilities = WmsCapabilities::new(&doc);
        let layers = capabilities.queryable_layers();

        assert_eq!(layers[1].bounding_box(), "");
    }

    #[test]
    fn test_bounding_box_short_coordinates_kept_whole() {
        let xml = r#"<Layer queryable="1">
          <Name>klein</Name>
          <BoundingBox SRS="EPSG:28992" minx="1763" miny="4205" maxx="1904" maxy="4326"/>
        </Layer>"#;
        let doc = Document::parse(xml).unwrap();
        let layer = WmsLayer {
            node: doc.root_element(),
        };

        assert_eq!(layer.bounding_box(), "1763,4205,1904,4326");
    }
}
