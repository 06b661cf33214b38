//! Schema parsing functionality for YAML and JSON formats
//!
//! Content arrives as raw text plus an optional content-type hint. A
//! recognized hint makes that format authoritative: a decode failure is
//! fatal rather than a trigger for guessing. Without a usable hint the
//! parser sniffs, trying JSON before YAML.
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use std::path::Path;

use serde_json::Value;

use crate::loader::error::{LoaderError, LoaderResult};

/// Supported schema document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from a content-type hint.
    ///
    /// Matching is a case-insensitive substring check, so parameterized
    /// and vendored media types like `text/x-yaml; charset=utf-8` or
    /// `application/openapi+json` resolve correctly. Returns `None` for
    /// unrecognized hints.
    pub fn from_content_type(hint: &str) -> Option<Self> {
        let hint = hint.to_lowercase();
        if hint.contains("yaml") || hint.contains("yml") {
            Some(Format::Yaml)
        } else if hint.contains("json") {
            Some(Format::Json)
        } else {
            None
        }
    }

    /// Detect format from a file extension, `None` when unrecognized
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(extension) => match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Some(Format::Yaml),
                "json" => Some(Format::Json),
                _ => None,
            },
            None => None,
        }
    }

    /// Canonical content type declared for this format
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Yaml => "application/yaml",
            Format::Json => "application/json",
        }
    }
}

/// Schema parser with support for multiple formats
#[derive(Debug)]
pub struct SchemaParser;

impl SchemaParser {
    /// Create a new schema parser
    pub fn new() -> Self {
        Self
    }

    /// Parse schema content using the declared content-type hint, falling
    /// back to format sniffing when no recognizable hint is present
    pub fn parse(&self, content: &str, hint: Option<&str>, location: &str) -> LoaderResult<Value> {
        match hint.and_then(Format::from_content_type) {
            Some(Format::Yaml) => self.parse_yaml(content, location),
            Some(Format::Json) => self.parse_json(content, location),
            None => self.parse_with_fallback(content, hint, location),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, location: &str) -> LoaderResult<Value> {
        // First parse as YAML Value to catch YAML-specific errors
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(location.to_string(), e))?;

        // Convert to JSON Value for consistent handling
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(location.to_string(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, location: &str) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(location.to_string(), e))
    }

    /// Try JSON first (stricter format), then YAML. Content that decodes
    /// as neither fails with the hint preserved for diagnostics.
    fn parse_with_fallback(
        &self,
        content: &str,
        hint: Option<&str>,
        location: &str,
    ) -> LoaderResult<Value> {
        if let Ok(value) = serde_json::from_str(content) {
            return Ok(value);
        }

        if let Ok(yaml_value) = serde_yaml::from_str::<serde_yaml::Value>(content) {
            if let Ok(value) = serde_json::to_value(yaml_value) {
                return Ok(value);
            }
        }

        Err(LoaderError::unknown_format(
            location.to_string(),
            hint.map(|h| h.to_string()),
        ))
    }
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new()
    }
}
