use axum::body::Bytes;
use serde::{Deserialize, Serialize};

/// Background style chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Abstract mindful coloring-page pattern behind the drawing
    Mindful,
    /// Plain white background
    Plain,
}

impl Style {
    /// Interpret the `background` form field
    ///
    /// Anything other than `mindful` selects the plain background.
    pub fn from_form_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("mindful") {
            Self::Mindful
        } else {
            Self::Plain
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mindful => "mindful",
            Self::Plain => "plain",
        }
    }
}

/// Uploaded photo
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Bytes,
    /// MIME type declared by the browser
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// One user submission
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub image: ImageUpload,
    pub name: Option<String>,
    pub style: Style,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerateResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
