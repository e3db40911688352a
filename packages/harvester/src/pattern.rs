//! Bracket-tag extraction from harvested descriptions.
//!
//! Data curators embed publishing metadata in the free-text abstract of a
//! feature type as `[Key: value]` tags. Consuming a tag is destructive: the
//! matched span is removed from the text and is not re-parsed.

/// Start marker of the sharing-consent tag.
pub const SHARING_MARKER: &str = "[Delen dataset:";

/// Start marker of the title tag.
pub const TITLE_MARKER: &str = "[Titel dataset:";

/// Start marker of the theme tag; the value is a comma separated list.
pub const THEME_MARKER: &str = "[Thema dataset:";

/// Start marker of the description-template selector tag.
pub const TEMPLATE_MARKER: &str = "[Omschrijving template:";

/// Start marker of the high-value flag tag.
pub const HIGH_VALUE_MARKER: &str = "[Dataset onderdeel High Value dataset:";

/// End marker shared by all tags.
pub const END_MARKER: &str = "]";

/// Outcome of a single tag extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The source text with the matched span removed, left-trimmed. Equal to
    /// the input when no tag was found.
    pub text: String,

    /// The trimmed tag value, or `None` when the tag was absent.
    pub value: Option<String>,

    /// Human-readable notice describing the outcome.
    pub notice: String,
}

/// Extract a single `[Key: value]` tag from a text.
///
/// The first occurrence of `start_marker` opens the tag and the first
/// occurrence of `end_marker` after it closes the tag, even if that
/// occurrence lies inside what a human would consider the value. Nested or
/// escaped end markers are not recognized.
///
/// # Arguments
/// * `text` - The text to search
/// * `key` - Human-readable key used in the notice
/// * `start_marker` - Literal opening marker, e.g. `[Titel dataset:`
/// * `end_marker` - Literal closing marker, e.g. `]`
///
/// # Examples
/// ```
/// use geosync_harvester::pattern::{extract, TITLE_MARKER, END_MARKER};
///
/// let result = extract("[Titel dataset: Percelen] rest", "title", TITLE_MARKER, END_MARKER);
/// assert_eq!(result.value.as_deref(), Some("Percelen"));
/// assert_eq!(result.text, "rest");
/// ```
pub fn extract(text: &str, key: &str, start_marker: &str, end_marker: &str) -> Extraction {
    let Some(start) = text.find(start_marker) else {
        return Extraction {
            text: text.to_string(),
            value: None,
            notice: format!("{key}: starting pattern absent"),
        };
    };

    let value_start = start + start_marker.len();
    let Some(end_offset) = text[value_start..].find(end_marker) else {
        return Extraction {
            text: text.to_string(),
            value: None,
            notice: format!("{key}: closing pattern absent"),
        };
    };
    let end = value_start + end_offset;

    let value = text[value_start..end].trim().to_string();

    let mut remainder = String::with_capacity(text.len());
    remainder.push_str(&text[..start]);
    remainder.push_str(&text[end + end_marker.len()..]);
    let remainder = remainder.trim_start().to_string();

    Extraction {
        text: remainder,
        notice: format!("{key}: extracted '{value}'"),
        value: Some(value),
    }
}

/// Interpret a tag value as a boolean.
///
/// The literal convention of the curators: a trimmed, case-insensitive
/// `"ja"` is true, anything else is false.
///
/// # Examples
/// ```
/// use geosync_harvester::pattern::is_affirmative;
///
/// assert!(is_affirmative(" JA "));
/// assert!(!is_affirmative("nee"));
/// assert!(!is_affirmative(""));
/// ```
pub fn is_affirmative(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("ja")
}

/// Split a theme tag value into individual themes.
///
/// Comma separated, each item trimmed; empty items are dropped.
pub fn split_themes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|theme| theme.trim().to_string())
        .filter(|theme| !theme.is_empty())
        .collect()
}
