//! Prompt templates for the coloring-page transformation
//!
//! The four templates are kept verbatim rather than assembled from
//! fragments: the plain/no-name case uses a different composition
//! instruction, and the mindful/no-name case keeps the double space left
//! where the label sentence was removed.

use crate::types::Style;

const MINDFUL_WITH_NAME: &str = concat!(
    "turn this photo into a line drawing suitable for a coloring page. ",
    "place the result inside a white box with a black outline. ",
    "just below the box write \"{name}\" in friendly white letters with black outlines suitable for a coloring page. ",
    "ensure these objects as a group are centered both horizontally and vertically ",
    "on top of an abstract mindful coloring page style background"
);

const MINDFUL_WITHOUT_NAME: &str = concat!(
    "turn this photo into a line drawing suitable for a coloring page. ",
    "place the result inside a white box with a black outline.  ",
    "ensure these objects as a group are centered both horizontally and vertically ",
    "on top of an abstract mindful coloring page style background"
);

const PLAIN_WITH_NAME: &str = concat!(
    "turn this photo into a line drawing suitable for a coloring page. ",
    "place the result inside a white box with a black outline. ",
    "just below the box write \"{name}\" in friendly white letters with black outlines suitable for a coloring page. ",
    "ensure these objects as a group are centered both horizontally and vertically ",
    "on top of a plain white background"
);

const PLAIN_WITHOUT_NAME: &str = concat!(
    "turn this photo into a line drawing suitable for a coloring page. ",
    "place the result as large as possible, whilst still looking elegant, ",
    "centrally on a plain white background"
);

/// Template lookup keyed by `(style, has_name)`
const fn template(style: Style, has_name: bool) -> &'static str {
    match (style, has_name) {
        (Style::Mindful, true) => MINDFUL_WITH_NAME,
        (Style::Mindful, false) => MINDFUL_WITHOUT_NAME,
        (Style::Plain, true) => PLAIN_WITH_NAME,
        (Style::Plain, false) => PLAIN_WITHOUT_NAME,
    }
}

/// Clean up a display name for the quoted label
///
/// Blank names count as absent. Double quotes would close the label early,
/// so they become single quotes.
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    let trimmed = name?.trim();
    (!trimmed.is_empty()).then(|| trimmed.replace('"', "'"))
}

/// Build the generation prompt for a style and optional name
pub fn compose_prompt(style: Style, name: Option<&str>) -> String {
    match normalize_name(name) {
        Some(name) => template(style, true).replace("{name}", &name),
        None => template(style, false).to_string(),
    }
}
