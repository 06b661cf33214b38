//! Error types for schema loading operations
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for schema loading and reference resolution
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Location does not exist
    #[error("Schema not found at '{location}'")]
    NotFound { location: String },

    /// Location exists but cannot hold a schema document
    #[error("'{location}' is a directory, not a schema document")]
    InvalidTarget { location: String },

    /// YAML decode failure for declared-YAML content
    #[error("Failed to parse YAML from '{location}': {source}")]
    YamlParseError {
        location: String,
        source: serde_yaml::Error,
    },

    /// JSON decode failure for declared-JSON content
    #[error("Failed to parse JSON from '{location}': {source}")]
    JsonParseError {
        location: String,
        source: serde_json::Error,
    },

    /// No declared format and every fallback decode failed
    #[error(
        "Cannot determine schema format for '{location}' (content type: {})",
        .hint.as_deref().unwrap_or("unspecified")
    )]
    UnknownFormat {
        location: String,
        hint: Option<String>,
    },

    /// Relative reference found in a document that has no base location
    #[error("Cannot resolve reference '{reference}': in-memory documents have no base location")]
    UnresolvableReference { reference: String },

    /// Network-level fetch failure, including non-success HTTP statuses
    #[error("Failed to fetch '{location}': {source}")]
    TransportError {
        location: String,
        source: reqwest::Error,
    },

    /// Raw string or join result is not a representable location
    #[error("Invalid location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    /// File I/O failure other than not-found
    #[error("Failed to read '{location}': {source}")]
    IoError {
        location: String,
        source: std::io::Error,
    },
}

impl LoaderError {
    /// Create a not-found error for a missing location
    pub fn not_found(location: String) -> Self {
        Self::NotFound { location }
    }

    /// Create an invalid-target error for a non-document location
    pub fn invalid_target(location: String) -> Self {
        Self::InvalidTarget { location }
    }

    /// Create a YAML parsing error with location context
    pub fn yaml_parse_error(location: String, source: serde_yaml::Error) -> Self {
        Self::YamlParseError { location, source }
    }

    /// Create a JSON parsing error with location context
    pub fn json_parse_error(location: String, source: serde_json::Error) -> Self {
        Self::JsonParseError { location, source }
    }

    /// Create an unknown-format error, keeping the declared hint if any
    pub fn unknown_format(location: String, hint: Option<String>) -> Self {
        Self::UnknownFormat { location, hint }
    }

    /// Create an unresolvable-reference error
    pub fn unresolvable_reference(reference: String) -> Self {
        Self::UnresolvableReference { reference }
    }

    /// Create a transport error with location context
    pub fn transport_error(location: String, source: reqwest::Error) -> Self {
        Self::TransportError { location, source }
    }

    /// Create an invalid-location error
    pub fn invalid_location(location: String, reason: String) -> Self {
        Self::InvalidLocation { location, reason }
    }

    /// Create an I/O error with location context
    pub fn io_error(location: String, source: std::io::Error) -> Self {
        Self::IoError { location, source }
    }

    /// Get the location associated with this error, if any
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::NotFound { location } => Some(location),
            Self::InvalidTarget { location } => Some(location),
            Self::YamlParseError { location, .. } => Some(location),
            Self::JsonParseError { location, .. } => Some(location),
            Self::UnknownFormat { location, .. } => Some(location),
            Self::TransportError { location, .. } => Some(location),
            Self::InvalidLocation { location, .. } => Some(location),
            Self::IoError { location, .. } => Some(location),
            Self::UnresolvableReference { .. } => None,
        }
    }
}
