//! Description templates.
//!
//! The final description of a dataset is not the harvested abstract but a
//! rendered template, selected by the `[Omschrijving template: ...]` tag in
//! that abstract. Templates are shipped with the crate and embedded at
//! compile time, so a missing template asset fails the build instead of a
//! harvest run. Substitution is positional: each argument replaces the next
//! `%s` placeholder.

const STANDAARD_TEMPLATE: &str = include_str!("../templates/standaard.tpl");
const WFS_TEMPLATE: &str = include_str!("../templates/wfs.tpl");
const WMS_TEMPLATE: &str = include_str!("../templates/wms.tpl");
const WMS_FOTO_TEMPLATE: &str = include_str!("../templates/wms_foto.tpl");
const WMS_KAART_TEMPLATE: &str = include_str!("../templates/wms_kaart.tpl");

/// The recognized description templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKey {
    /// Generic WMS layer.
    Wms,

    /// WMS layer rendering aerial photography.
    WmsFoto,

    /// WMS layer rendering map material.
    WmsKaart,

    /// WFS feature type.
    Wfs,

    /// Default template, used when no selector tag is present or the token
    /// is not recognized.
    Standaard,
}

impl TemplateKey {
    /// Parse the selector token of the `[Omschrijving template: ...]` tag.
    ///
    /// Unknown tokens fall back to [`TemplateKey::Standaard`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "WMS" => Self::Wms,
            "WMS-Foto" => Self::WmsFoto,
            "WMS-Kaart" => Self::WmsKaart,
            "WFS" => Self::Wfs,
            _ => Self::Standaard,
        }
    }

    /// The selector token of this template.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wms => "WMS",
            Self::WmsFoto => "WMS-Foto",
            Self::WmsKaart => "WMS-Kaart",
            Self::Wfs => "WFS",
            Self::Standaard => "Standaard",
        }
    }

    /// The raw template text.
    fn template(&self) -> &'static str {
        match self {
            Self::Wms => WMS_TEMPLATE,
            Self::WmsFoto => WMS_FOTO_TEMPLATE,
            Self::WmsKaart => WMS_KAART_TEMPLATE,
            Self::Wfs => WFS_TEMPLATE,
            Self::Standaard => STANDAARD_TEMPLATE,
        }
    }

    /// Number of `%s` placeholders this template expects.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.template().matches("%s").count()
    }
}

/// Render a template with positional substitution.
///
/// Each argument replaces the first remaining `%s` placeholder; surplus
/// placeholders are left as-is, surplus arguments are ignored.
///
/// # Examples
/// ```
/// use geosync_harvester::templates::{render, TemplateKey};
///
/// let text = render(TemplateKey::Standaard, &["Percelen"]);
/// assert!(text.contains("Percelen"));
/// assert!(!text.contains("%s"));
/// ```
#[must_use]
pub fn render(key: TemplateKey, args: &[&str]) -> String {
    let mut text = key.template().trim_end().to_string();

    for arg in args {
        text = text.replacen("%s", arg, 1);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token() {
        assert_eq!(TemplateKey::from_token("WMS"), TemplateKey::Wms);
        assert_eq!(TemplateKey::from_token("WMS-Foto"), TemplateKey::WmsFoto);
        assert_eq!(TemplateKey::from_token("WMS-Kaart"), TemplateKey::WmsKaart);
        assert_eq!(TemplateKey::from_token("WFS"), TemplateKey::Wfs);
        assert_eq!(TemplateKey::from_token("Standaard"), TemplateKey::Standaard);
    }

    #[test]
    fn test_from_token_unknown_falls_back_to_standaard() {
        assert_eq!(TemplateKey::from_token(""), TemplateKey::Standaard);
        assert_eq!(TemplateKey::from_token("wms"), TemplateKey::Standaard);
        assert_eq!(TemplateKey::from_token("PDF"), TemplateKey::Standaard);
    }

    #[test]
    fn test_from_token_trims_whitespace() {
        assert_eq!(TemplateKey::from_token(" WFS "), TemplateKey::Wfs);
    }

    #[test]
    fn test_placeholder_counts() {
        assert_eq!(TemplateKey::Standaard.placeholder_count(), 1);
        assert_eq!(TemplateKey::Wfs.placeholder_count(), 2);
        assert_eq!(TemplateKey::Wms.placeholder_count(), 2);
        assert_eq!(TemplateKey::WmsFoto.placeholder_count(), 2);
        assert_eq!(TemplateKey::WmsKaart.placeholder_count(), 2);
    }

    #[test]
    fn test_render_substitutes_positionally() {
        let text = render(
            TemplateKey::Wfs,
            &["Percelen", "https://services.nijmegen.nl/geoservices/wonen/ows"],
        );

        assert!(text.contains("De dataset Percelen"));
        assert!(text.contains("https://services.nijmegen.nl/geoservices/wonen/ows"));
        assert!(!text.contains("%s"));
    }

    #[test]
    fn test_render_ignores_surplus_arguments() {
        let text = render(TemplateKey::Standaard, &["Percelen", "surplus"]);

        assert!(text.contains("Percelen"));
        assert!(!text.contains("surplus"));
    }
}
