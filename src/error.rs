// src/error.rs

//! Unified error handling for the portfolio renderer.

use std::fmt;

use thiserror::Error;

/// Result type alias for portfolio operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The content store answered with a non-success status
    #[error("CMS error (status {status}): {message}")]
    Cms { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Fetched content shrank past the allowed threshold since the last build
    #[error(
        "Content guard triggered: {previous} -> {current} records ({drop_percent:.1}% drop > {threshold_percent}%)"
    )]
    ContentShrank {
        current: usize,
        previous: usize,
        drop_percent: f64,
        threshold_percent: u8,
    },

    /// Nothing was fetched although the previous build had content
    #[error("Content guard triggered: no records fetched (previous build had {previous})")]
    EmptyContent { previous: usize },
}

impl AppError {
    /// Create a CMS error from a response status and body.
    pub fn cms(status: u16, message: impl fmt::Display) -> Self {
        Self::Cms {
            status,
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_display() {
        let err = AppError::ContentShrank {
            current: 2,
            previous: 10,
            drop_percent: 80.0,
            threshold_percent: 50,
        };
        assert_eq!(
            err.to_string(),
            "Content guard triggered: 10 -> 2 records (80.0% drop > 50%)"
        );
    }

    #[test]
    fn test_cms_display() {
        let err = AppError::cms(503, "upstream unavailable");
        assert_eq!(
            err.to_string(),
            "CMS error (status 503): upstream unavailable"
        );
    }
}
