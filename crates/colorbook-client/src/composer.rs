//! Request composer state machine
//!
//! Mirrors the browser page: one image, an optional name, and a style
//! chosen at submit time. Only one submission can be in flight.

use crate::client::ColorbookClient;
use crate::error::ColorbookClientError;
use crate::types::{ImageFile, Style, Submission};

/// Shown when a style is chosen before an image
pub const MISSING_IMAGE_MESSAGE: &str = "Please select an image.";

/// What the composer is currently showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ComposerState {
    #[default]
    Idle,
    Loading {
        style: Style,
    },
    Success {
        image_url: String,
    },
    Error {
        message: String,
    },
}

impl ComposerState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

#[derive(Debug, Default)]
pub struct Composer {
    image: Option<ImageFile>,
    name: String,
    state: ComposerState,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    pub fn select_image(&mut self, image: ImageFile) {
        self.image = Some(image);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Start a submission for `style`
    ///
    /// Returns `None` while another submission is loading, or when no image
    /// is selected (the state then shows the missing-image error). Otherwise
    /// the previous result or error is cleared and the state moves to
    /// `Loading`.
    pub fn begin(&mut self, style: Style) -> Option<Submission> {
        if self.state.is_loading() {
            tracing::debug!(%style, "submission already in flight, ignoring");
            return None;
        }

        let Some(image) = self.image.clone() else {
            self.state = ComposerState::Error {
                message: MISSING_IMAGE_MESSAGE.to_owned(),
            };
            return None;
        };

        self.state = ComposerState::Loading { style };

        Some(Submission {
            image,
            name: self.name.clone(),
            style,
        })
    }

    /// Record the outcome of the in-flight submission
    pub fn finish(&mut self, result: Result<String, ColorbookClientError>) {
        self.state = match result {
            Ok(image_url) => ComposerState::Success { image_url },
            Err(e) => ComposerState::Error { message: e.to_string() },
        };
    }

    /// Begin, send through `client`, and finish
    ///
    /// Makes no network call when [`Composer::begin`] declines.
    pub async fn submit(&mut self, client: &ColorbookClient, style: Style) -> &ComposerState {
        if let Some(submission) = self.begin(style) {
            let result = client.generate(&submission).await;
            self.finish(result);
        }

        &self.state
    }
}
