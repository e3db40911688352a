//! WMS harvesting: a single `GetCapabilities` request for the whole service.

use reqwest::blocking::Client;
use roxmltree::Document;

use crate::capabilities::WmsCapabilities;
use crate::config::{
    modification_timestamp, wms_capabilities_url, wms_layer_url, wms_map_url, WMS_RESOLUTIONS,
};
use crate::error::Result;
use crate::http::fetch_xml;
use crate::rules::run_pipeline;
use crate::types::{DatasetRecord, HarvestRecord, Notices, Resource, ServiceKind};

/// Harvest every queryable layer of the WMS service.
///
/// The WMS exposes one capabilities document for all layers. Every
/// queryable layer is converted to a dataset record with one map resource
/// per configured resolution and run through the build rules.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `base_url` - Geoserver base URL
///
/// # Returns
/// Built records in document order.
pub fn harvest(client: &Client, base_url: &str) -> Result<Vec<HarvestRecord>> {
    let url = wms_capabilities_url(base_url);
    let xml = fetch_xml(client, &url)?;
    let doc = Document::parse(&xml)?;

    Ok(harvest_document(&doc, base_url))
}

/// Convert every queryable layer of one capabilities document.
pub fn harvest_document(doc: &Document<'_>, base_url: &str) -> Vec<HarvestRecord> {
    let capabilities = WmsCapabilities::new(doc);

    let contact_person = capabilities.contact_person();
    let contact_organization = capabilities.contact_organization();
    let contact_email = capabilities.contact_email();
    let access_rights = capabilities.access_rights();
    let output_format = capabilities.preferred_output_format();

    let mut records = Vec::new();

    for layer in capabilities.queryable_layers() {
        let name = layer.name();
        let identifier = wms_layer_url(base_url, &name);
        let bounding_box = layer.bounding_box();

        let mut record = DatasetRecord::new(ServiceKind::Wms, name.clone());
        record.identifier = identifier.clone();
        record.title = layer.title();
        record.description = layer.abstract_text();
        record.modification_date = modification_timestamp();
        record.contact_point_name = format!("{contact_person}, {contact_organization}");
        record.contact_point_email = contact_email.clone();
        record.access_rights = access_rights.clone();
        record.resources = WMS_RESOLUTIONS
            .iter()
            .map(|&(width, height)| {
                let access_url =
                    wms_map_url(base_url, &name, &bounding_box, width, height, &output_format);
                Resource {
                    title: format!("{width}x{height}"),
                    description: format!("{width}x{height}"),
                    format: output_format.clone(),
                    media_type: output_format.clone(),
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
                    "dropping WMS entity"
                );
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE_URL: &str = "https://services.nijmegen.nl";

    const SAMPLE_WMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMT_MS_Capabilities version="1.1.0">
  <Service>
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
        <Abstract>[Delen dataset: ja] [Omschrijving template: WMS-Kaart] Stadsdelen.</Abstract>
        <BoundingBox SRS="EPSG:28992" minx="176334.123" miny="420520.456" maxx="190432.789" maxy="432658.012"/>
      </Layer>
      <Layer queryable="1">
        <Name>intern</Name>
        <Title>Interne laag</Title>
        <Abstract>Geen consent aanwezig.</Abstract>
      </Layer>
    </Layer>
  </Capability>
</WMT_MS_Capabilities>"#;

    #[test]
    fn test_harvest_document_builds_consenting_layers_only() {
        let doc = Document::parse(SAMPLE_WMS).unwrap();
        let records = harvest_document(&doc, BASE_URL);

        assert_eq!(records.len(), 1);
        let record = &records[0].dataset;
        assert_eq!(record.geoserver_layer, "stadsdelen");
        assert_eq!(record.title, "Stadsdelen");
        assert_eq!(record.contact_point_name, "Geo Informatie, Gemeente Nijmegen");
        assert_eq!(record.contact_point_email, "geo@nijmegen.nl");
        assert!(record.description.contains("kaartmateriaal"));
    }

    #[test]
    fn test_harvest_document_one_resource_per_resolution() {
        let doc = Document::parse(SAMPLE_WMS).unwrap();
        let records = harvest_document(&doc, BASE_URL);

        let resources = &records[0].dataset.resources;
        assert_eq!(resources.len(), WMS_RESOLUTIONS.len());
        assert_eq!(resources[0].title, "500x400");
        assert_eq!(resources[0].format, "image/png");
        assert_eq!(
            resources[0].access_url,
            "https://services.nijmegen.nl/geoservices/wms/extern?service=WMS&version=1.1.0&request=GetMap&layers=stadsdelen&bbox=176334,420520,190432,432658&width=500&height=400&srs=EPSG:28992&format=image%2Fpng"
        );
        assert_eq!(resources[1].title, "1000x800");
    }

    #[test]
    fn test_harvest_document_no_queryable_layers() {
        let xml = r#"<WMT_MS_Capabilities><Capability><Layer><Name>a</Name></Layer></Capability></WMT_MS_Capabilities>"#;
        let doc = Document::parse(xml).unwrap();

        assert!(harvest_document(&doc, BASE_URL).is_empty());
    }
}
