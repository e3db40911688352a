//! Build rules applied to every harvested record.
//!
//! Rules run in a fixed order: the preparation rule consumes the bracket
//! tags from the harvested description and the description rule renders the
//! final description from the selected template. The ordering dependency is
//! made explicit by [`ExtractedMetadata`], which the preparation rule
//! produces and the description rule consumes.
//!
//! A rule signals a per-record abort by returning [`Skip`]; the orchestrator
//! drops the entity and continues with the next one. A skip never fails the
//! harvest run.

use crate::config::{wfs_capabilities_url, wms_layer_url};
use crate::pattern::{
    extract, is_affirmative, split_themes, END_MARKER, HIGH_VALUE_MARKER, SHARING_MARKER,
    TEMPLATE_MARKER, THEME_MARKER, TITLE_MARKER,
};
use crate::templates::{render, TemplateKey};
use crate::types::{DatasetRecord, Notices};

/// Per-record abort signal.
///
/// Raised when a mandatory extraction fails; the record is discarded before
/// it reaches the result list, its notices are retained for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub reason: String,
}

impl Skip {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Metadata extracted from the harvested description by the preparation
/// rule, consumed by the description rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMetadata {
    /// The established dataset title: the `[Titel dataset: ...]` value when
    /// the tag is present, the harvested title otherwise.
    pub title: String,

    /// Themes from the `[Thema dataset: ...]` tag; empty when absent.
    pub themes: Vec<String>,

    /// Selected description template; `Standaard` when the selector tag is
    /// absent or carries an unknown token.
    pub template: TemplateKey,

    /// High-value flag; false when the tag is absent.
    pub high_value: bool,
}

/// First rule: consume the bracket tags from the harvested description.
///
/// Requires a non-empty description and an affirmative sharing-consent tag;
/// everything else is optional and falls back to a default with a notice.
pub struct PreparationRule;

impl PreparationRule {
    /// Stable property identifier used to prefix rule-level notices.
    pub const PROPERTY: &'static str = "preparation";

    /// Apply the rule to a record.
    ///
    /// On success the record's title, theme list and high-value flag are
    /// updated in place and the consumed tags are gone from its
    /// description; the returned [`ExtractedMetadata`] feeds the
    /// description rule.
    pub fn apply(
        record: &mut DatasetRecord,
        notices: &mut Notices,
    ) -> Result<ExtractedMetadata, Skip> {
        if record.description.trim().is_empty() {
            notices.push(format!("{}: no description harvested", Self::PROPERTY));
            return Err(Skip::new("no description harvested"));
        }

        let sharing = extract(&record.description, "sharing consent", SHARING_MARKER, END_MARKER);
        notices.push(sharing.notice.clone());

        let Some(consent) = sharing.value else {
            notices.push(format!("{}: sharing vocabulary absent", Self::PROPERTY));
            return Err(Skip::new("sharing vocabulary absent"));
        };
        record.description = sharing.text;

        if !is_affirmative(&consent) {
            notices.push(format!("{}: sharing declined", Self::PROPERTY));
            return Err(Skip::new("sharing declined"));
        }

        let title = extract(&record.description, "title", TITLE_MARKER, END_MARKER);
        notices.push(title.notice.clone());
        record.description = title.text;
        if let Some(value) = title.value {
            record.title = value;
        }

        let themes = extract(&record.description, "theme", THEME_MARKER, END_MARKER);
        notices.push(themes.notice.clone());
        record.description = themes.text;
        record.theme = themes.value.as_deref().map(split_themes).unwrap_or_default();

        let high_value = extract(&record.description, "high value", HIGH_VALUE_MARKER, END_MARKER);
        notices.push(high_value.notice.clone());
        record.description = high_value.text;
        record.high_value = high_value.value.as_deref().is_some_and(is_affirmative);

        let template = extract(
            &record.description,
            "description template",
            TEMPLATE_MARKER,
            END_MARKER,
        );
        notices.push(template.notice.clone());
        record.description = template.text;

        Ok(ExtractedMetadata {
            title: record.title.clone(),
            themes: record.theme.clone(),
            template: TemplateKey::from_token(template.value.as_deref().unwrap_or_default()),
            high_value: record.high_value,
        })
    }
}

/// Second rule: render the final description from the selected template.
///
/// Runs after [`PreparationRule`] has established the title. The rendered
/// text replaces the harvested description entirely.
pub struct DescriptionRule;

impl DescriptionRule {
    /// Stable property identifier used to prefix rule-level notices.
    pub const PROPERTY: &'static str = "description";

    /// Apply the rule to a record.
    pub fn apply(
        record: &mut DatasetRecord,
        metadata: &ExtractedMetadata,
        base_url: &str,
        notices: &mut Notices,
    ) {
        let title = metadata.title.as_str();
        let rendered = match metadata.template {
            TemplateKey::Standaard => render(metadata.template, &[title]),
            TemplateKey::Wfs => {
                let url = wfs_capabilities_url(base_url, &record.geoserver_layer);
                render(metadata.template, &[title, url.as_str()])
            }
            TemplateKey::Wms | TemplateKey::WmsFoto | TemplateKey::WmsKaart => {
                let url = wms_layer_url(base_url, &record.geoserver_layer);
                render(metadata.template, &[title, url.as_str()])
            }
        };

        notices.push(format!(
            "{}: rendered template '{}'",
            Self::PROPERTY,
            metadata.template.as_str()
        ));
        record.description = rendered;
    }
}

/// Run the full rule pipeline over a record.
///
/// # Arguments
/// * `record` - The record under construction, mutated in place
/// * `base_url` - Geoserver base URL, used for the template URL ingredients
/// * `notices` - The entity's notice log
///
/// # Returns
/// `Ok(())` when the record is fully built, `Err(Skip)` when a rule aborted
/// it. Notices accumulated up to the abort are retained in `notices`.
pub fn run_pipeline(
    record: &mut DatasetRecord,
    base_url: &str,
    notices: &mut Notices,
) -> Result<(), Skip> {
    let metadata = PreparationRule::apply(record, notices)?;
    DescriptionRule::apply(record, &metadata, base_url, notices);
    Ok(())
}
