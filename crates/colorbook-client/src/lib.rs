#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust client for the Colorbook generator
//!
//! Provides the HTTP client for `/api/generate` and the composer state
//! machine the browser page also follows

mod client;
pub mod composer;
pub mod error;
pub mod types;

pub use client::ColorbookClient;
pub use composer::{Composer, ComposerState};
pub use error::{ColorbookClientError, Result};
pub use types::*;
