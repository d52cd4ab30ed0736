/// Client-specific result type
pub type Result<T> = std::result::Result<T, ColorbookClientError>;

/// Shown when the server fails without an `error` field
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Errors from the Colorbook client
#[derive(Debug, thiserror::Error)]
pub enum ColorbookClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server's `error` message, verbatim
        message: String,
    },

    /// Reading the image from disk failed
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
