use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Background style for the generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Mindful,
    #[default]
    Plain,
}

impl Style {
    /// Value sent in the `background` form field
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mindful => "mindful",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mindful" => Ok(Self::Mindful),
            "plain" => Ok(Self::Plain),
            other => Err(format!("unknown style '{other}', expected 'mindful' or 'plain'")),
        }
    }
}

/// Image selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl ImageFile {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    /// Read an image from disk, guessing its MIME type from the extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image")
            .to_owned();
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or("application/octet-stream", mime_for_extension)
            .to_owned();

        Ok(Self {
            bytes,
            file_name,
            content_type,
        })
    }
}

/// MIME type for common photo extensions
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Everything one generation request carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub image: ImageFile,
    pub name: String,
    pub style: Style,
}

/// Successful `/api/generate` response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}
