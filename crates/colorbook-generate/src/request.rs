use axum::{
    extract::{
        FromRequest, Multipart, Request,
        multipart::{Field, MultipartError},
    },
    http::{StatusCode, header::CONTENT_TYPE},
};

use crate::{
    error::GenerateError,
    types::{GenerationRequest, ImageUpload, Style},
};

/// Extractor for the coloring-page upload form
///
/// Reads the `image`, `name`, and `background` fields; anything else is
/// skipped. The first non-empty `image` part wins. Upload size is bounded by the router's body limit layer.
pub struct GenerationForm(pub GenerationRequest);

impl<S> FromRequest<S> for GenerationForm
where
    S: Send + Sync,
{
    type Rejection = GenerateError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err(GenerateError::InvalidRequest(
                "expected Content-Type: multipart/form-data".to_string(),
            ));
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| GenerateError::InvalidRequest(format!("failed to parse multipart form: {}", e.body_text())))?;

        let mut image: Option<ImageUpload> = None;
        let mut name: Option<String> = None;
        let mut style = Style::Plain;

        while let Some(field) = multipart.next_field().await.map_err(|e| malformed(&e))? {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "image" if image.is_none() => image = read_image(field).await?,
                "image" => tracing::debug!("ignoring additional image field"),
                "name" => name = Some(field.text().await.map_err(|e| malformed(&e))?),
                "background" => style = Style::from_form_value(&field.text().await.map_err(|e| malformed(&e))?),
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }

        let image = image.ok_or(GenerateError::MissingImage)?;

        tracing::debug!(
            bytes = image.bytes.len(),
            content_type = image.content_type.as_deref().unwrap_or("-"),
            style = style.as_str(),
            has_name = name.as_deref().is_some_and(|n| !n.trim().is_empty()),
            "parsed generation form"
        );

        Ok(Self(GenerationRequest { image, name, style }))
    }
}

/// An empty file part counts as no image at all
async fn read_image(field: Field<'_>) -> Result<Option<ImageUpload>, GenerateError> {
    let file_name = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);
    let bytes = field.bytes().await.map_err(|e| malformed(&e))?;

    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(ImageUpload {
        bytes,
        content_type,
        file_name,
    }))
}

fn malformed(e: &MultipartError) -> GenerateError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return GenerateError::PayloadTooLarge;
    }

    GenerateError::InvalidRequest(format!("failed to read multipart form: {}", e.body_text()))
}
