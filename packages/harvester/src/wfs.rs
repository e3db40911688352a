//! WFS harvesting: one `GetCapabilities` request per discovered layer.

use reqwest::blocking::Client;
use roxmltree::Document;

use crate::capabilities::WfsCapabilities;
use crate::config::{modification_timestamp, validate_layer_name, wfs_capabilities_url, wfs_feature_url};
use crate::error::Result;
use crate::http::fetch_xml;
use crate::layers::discover_layers;
use crate::rules::run_pipeline;
use crate::types::{DatasetRecord, HarvestRecord, Notices, Resource, ServiceKind};

/// Harvest every feature type of every discovered layer.
///
/// Layers are resolved once from the taxonomy page; for each layer the WFS
/// capabilities document is fetched and every feature type is converted to
/// a dataset record and run through the build rules. Entities skipped by
/// the rules are dropped; a failed capability fetch aborts the whole WFS
/// harvest.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `base_url` - Geoserver base URL
/// * `layers_uri` - URL of the taxonomy page listing the workspaces
///
/// # Returns
/// Built records in document order, layers in taxonomy-page order.
pub fn harvest(client: &Client, base_url: &str, layers_uri: &str) -> Result<Vec<HarvestRecord>> {
    let layers = discover_layers(client, layers_uri)?;
    tracing::debug!(count = layers.len(), "discovered geoserver workspaces");

    let mut harvest = Vec::new();

    for layer in &layers {
        validate_layer_name(layer)?;

        let url = wfs_capabilities_url(base_url, layer);
        let xml = fetch_xml(client, &url)?;
        let doc = Document::parse(&xml)?;

        harvest.extend(harvest_document(&doc, base_url, layer));
    }

    Ok(harvest)
}

/// Convert every feature type of one capabilities document.
pub fn harvest_document(
    doc: &Document<'_>,
    base_url: &str,
    layer: &str,
) -> Vec<HarvestRecord> {
    let capabilities = WfsCapabilities::new(doc);

    // Service-level metadata is shared by every feature type in the document.
    let contact_name = capabilities.contact_name();
    let contact_organization = capabilities.contact_organization();
    let contact_email = capabilities.contact_email();
    let access_rights = capabilities.access_rights();
    let service_keywords = capabilities.service_keywords();
    let output_formats = capabilities.supported_output_formats();

    let mut records = Vec::new();

    for feature in capabilities.feature_types() {
        let name = feature.name();
        let identifier = wfs_feature_url(base_url, layer, &name);

        let mut record = DatasetRecord::new(ServiceKind::Wfs, layer);
        record.identifier = identifier.clone();
        record.title = humanize_title(&feature.title());
        record.description = feature.abstract_text();
        record.modification_date = modification_timestamp();
        record.contact_point_name = format!("{contact_name}, {contact_organization}");
        record.contact_point_email = contact_email.clone();
        record.access_rights = access_rights.clone();
        record.keyword = service_keywords
            .iter()
            .chain(feature.keywords().iter())
            .cloned()
            .collect();
        record.resources = output_formats
            .iter()
            .map(|format| {
                let access_url =
                    format!("{identifier}&outputFormat={}", urlencoding::encode(format));
                Resource {
                    title: format.clone(),
                    description: format.clone(),
                    format: format.clone(),
                    media_type: format.clone(),
                    download_url: vec![access_url.clone()],
                    access_url,
                    rights: access_rights.clone(),
                }
            })
            .collect();

        let mut notices = Notices::new();
        match run_pipeline(&mut record, base_url, &mut notices) {
            Ok(()) => records.push(HarvestRecord {
                dataset: record,
                notices: notices.into_vec(),
            }),
            Err(skip) => {
                tracing::debug!(
                    identifier = %identifier,
                    reason = %skip.reason,
                    notices = ?notices.as_slice(),
                    "dropping WFS entity"
                );
            }
        }
    }

    records
}

/// Turn a geoserver feature type title into a human-readable dataset title.
///
/// Underscores become spaces, the whole title is lowercased and the first
/// character is upper-cased again: `"PERCELEN_NIJMEGEN"` becomes
/// `"Percelen nijmegen"`.
fn humanize_title(title: &str) -> String {
    let lowered = title.replace('_', " ").to_lowercase();

    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE_URL: &str = "https://services.nijmegen.nl";

    const SAMPLE_WFS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:WFS_Capabilities version="1.1.0"
    xmlns:wfs="http://www.opengis.net/wfs/2.0"
    xmlns:ows="http://www.opengis.net/ows/1.1">
  <ows:ServiceIdentification>
    <ows:Keywords>
      <ows:Keyword>nijmegen</ows:Keyword>
    </ows:Keywords>
    <ows:AccessConstraints>geen beperkingen</ows:AccessConstraints>
  </ows:ServiceIdentification>
  <ows:ServiceProvider>
    <ows:ProviderName>Gemeente Nijmegen</ows:ProviderName>
    <ows:ServiceContact>
      <ows:IndividualName>Open Data Beheer</ows:IndividualName>
      <ows:ContactInfo>
        <ows:Address>
          <ows:ElectronicMailAddress>opendata@nijmegen.nl</ows:ElectronicMailAddress>
        </ows:Address>
      </ows:ContactInfo>
    </ows:ServiceContact>
  </ows:ServiceProvider>
  <ows:OperationsMetadata>
    <ows:Operation name="GetFeature">
      <ows:Parameter name="outputFormat">
        <ows:AllowedValues>
          <ows:Value>application/json</ows:Value>
          <ows:Value>csv</ows:Value>
        </ows:AllowedValues>
      </ows:Parameter>
    </ows:Operation>
  </ows:OperationsMetadata>
  <FeatureTypeList>
    <FeatureType>
      <Name>ws:PERCELEN_NIJMEGEN</Name>
      <Title>PERCELEN_NIJMEGEN</Title>
      <Abstract>[Delen dataset: ja] [Titel dataset: Percelen] Perceelgrenzen.</Abstract>
    </FeatureType>
    <FeatureType>
      <Name>ws:GEHEIM</Name>
      <Title>GEHEIM</Title>
      <Abstract>Interne laag zonder consent.</Abstract>
    </FeatureType>
  </FeatureTypeList>
</wfs:WFS_Capabilities>"#;

    #[test]
    fn test_humanize_title() {
        assert_eq!(humanize_title("PERCELEN_NIJMEGEN"), "Percelen nijmegen");
        assert_eq!(humanize_title("Stadsdelen"), "Stadsdelen");
        assert_eq!(humanize_title(""), "");
    }

    #[test]
    fn test_harvest_document_builds_consenting_entities_only() {
        let doc = Document::parse(SAMPLE_WFS).unwrap();
        let records = harvest_document(&doc, BASE_URL, "wonen");

        assert_eq!(records.len(), 1);
        let record = &records[0].dataset;
        assert_eq!(record.title, "Percelen");
        assert_eq!(
            record.identifier,
            "https://services.nijmegen.nl/geoservices/wonen/ows?service=WFS&version=1.1.0&request=GetFeature&typeName=PERCELEN_NIJMEGEN"
        );
        assert_eq!(record.contact_point_name, "Open Data Beheer, Gemeente Nijmegen");
        assert_eq!(record.contact_point_email, "opendata@nijmegen.nl");
        assert_eq!(record.access_rights, "geen beperkingen");
        assert_eq!(record.keyword, vec!["nijmegen".to_string()]);
        assert!(record.description.contains("De dataset Percelen"));
    }

    #[test]
    fn test_harvest_document_one_resource_per_output_format() {
        let doc = Document::parse(SAMPLE_WFS).unwrap();
        let records = harvest_document(&doc, BASE_URL, "wonen");

        let resources = &records[0].dataset.resources;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].format, "application/json");
        assert_eq!(
            resources[0].access_url,
            "https://services.nijmegen.nl/geoservices/wonen/ows?service=WFS&version=1.1.0&request=GetFeature&typeName=PERCELEN_NIJMEGEN&outputFormat=application%2Fjson"
        );
        assert_eq!(resources[0].download_url, vec![resources[0].access_url.clone()]);
        assert_eq!(resources[1].format, "csv");
        assert_eq!(resources[1].rights, "geen beperkingen");
    }

    #[test]
    fn test_harvest_document_empty_feature_list() {
        let xml = r#"<wfs:WFS_Capabilities xmlns:wfs="http://www.opengis.net/wfs/2.0"/>"#;
        let doc = Document::parse(xml).unwrap();

        assert!(harvest_document(&doc, BASE_URL, "wonen").is_empty());
    }
}
