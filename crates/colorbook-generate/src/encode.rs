use base64::{Engine as _, engine::general_purpose};

use crate::types::ImageUpload;

/// MIME type used when the upload does not declare one
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Render an upload as `data:<mime>;base64,<payload>`
pub fn data_uri(image: &ImageUpload) -> String {
    let content_type = image
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(FALLBACK_CONTENT_TYPE);

    format!("data:{content_type};base64,{}", general_purpose::STANDARD.encode(&image.bytes))
}
