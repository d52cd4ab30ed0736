use reqwest::multipart::{Form, Part};
use url::Url;

use crate::error::{ColorbookClientError, Result, UNKNOWN_ERROR_MESSAGE};
use crate::types::{GenerateResponse, Submission};

/// Typed client for the Colorbook generation API
#[derive(Debug, Clone)]
pub struct ColorbookClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ColorbookClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ColorbookClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Submit one generation request and return the image URL
    ///
    /// Waits for the server to finish the whole job, which can take a
    /// minute or more.
    ///
    /// # Errors
    ///
    /// Returns [`ColorbookClientError::Api`] with the server's message on a
    /// non-2xx response, or a transport error
    pub async fn generate(&self, submission: &Submission) -> Result<String> {
        let url = make_url(&self.base_url, "/api/generate");

        let image = &submission.image;
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ColorbookClientError::Config(format!("invalid mime type: {e}")))?;

        let form = Form::new()
            .part("image", part)
            .text("name", submission.name.clone())
            .text("background", submission.style.as_str());

        tracing::debug!(%url, style = %submission.style, bytes = image.bytes.len(), "submitting generation request");

        let response = self.http.post(url).multipart(form).send().await?;

        let body: GenerateResponse = handle_error(response).await?.json().await?;

        Ok(body.image_url)
    }

    /// Fetch the generated image
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the download fails
    pub async fn download(&self, image_url: &str) -> Result<Vec<u8>> {
        let url =
            Url::parse(image_url).map_err(|e| ColorbookClientError::Config(format!("invalid image URL: {e}")))?;

        let response = self.http.get(url).send().await?;
        let bytes = handle_error(response).await?.bytes().await?;

        Ok(bytes.to_vec())
    }
}

fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

/// Check an HTTP response for errors
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(ColorbookClientError::Api {
        status: status.as_u16(),
        message: parse_error_body(&body),
    })
}

/// The server's `error` field, or a generic message when there is none
fn parse_error_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"].as_str().map(str::to_owned))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_owned())
}
