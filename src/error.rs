//! Error Handling Module
//!
//! Every stage of the Firefly pipeline fails with its own variant so callers
//! can tell a rejected request from a failed token exchange, a failed
//! generation call, an empty result or a broken asset download.
//!
//! # Example
//!
//! ```rust,ignore
//! use siumai_provider_firefly::error::FireflyError;
//!
//! let error = FireflyError::Generation { status: 403, body: "forbidden".into() };
//! assert_eq!(error.status_code(), Some(403));
//! ```

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, FireflyError>;

/// Errors produced by the Firefly image provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FireflyError {
    /// A request field is malformed or out of range.
    #[error("Validation error at `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The client-credentials exchange failed.
    #[error("Token request failed{}: {message}", status_suffix(.status))]
    Authentication {
        /// HTTP status, `None` when the identity endpoint was unreachable.
        status: Option<u16>,
        message: String,
    },

    /// A required call option is missing.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The generation endpoint answered with a non-success status.
    #[error("Adobe Firefly API error: {status} - {body}")]
    Generation { status: u16, body: String },

    /// The generation call succeeded but produced no outputs.
    #[error("No images returned from Adobe Firefly API")]
    NoImages,

    /// One of the generated assets could not be fetched.
    #[error("Failed to download image from {url}{}: {message}", status_suffix(.status))]
    Download {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// Transport failure while talking to the generation endpoint.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A remote endpoint returned a body that could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The provider could not be set up.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl FireflyError {
    /// Shorthand for a field-scoped validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Generation { status, .. } => Some(*status),
            Self::Authentication { status, .. } | Self::Download { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the error was raised before any network call.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidRequest(_))
    }

    /// Field path of a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FireflyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
