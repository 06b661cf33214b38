//! Raw content retrieval for schema locations
//!
//! The fetcher turns a [`Location`](crate::loader::location::Location)
//! into raw text plus a content-type hint, without interpreting the
//! content. Local documents come from the filesystem with a hint derived
//! from the file extension; remote documents come over HTTP with the
//! hint taken from the response's Content-Type header.
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::location::Location;
use crate::loader::parser::Format;

/// User-Agent advertised on remote schema fetches
const USER_AGENT: &str = concat!("apiforge/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for remote schema fetches
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// HTTP method used for schema requests
    pub method: reqwest::Method,
    /// Custom request headers; non-string values are JSON-encoded on the wire
    pub headers: HashMap<String, Value>,
    /// Optional bearer token sent as an Authorization header
    pub auth: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            method: reqwest::Method::GET,
            headers: HashMap::new(),
            auth: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Raw fetched content plus the declared content-type hint
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Raw document text
    pub body: String,
    /// Declared content type, if the source provided one
    pub content_type: Option<String>,
}

/// Retrieves raw schema content for local and remote locations
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> LoaderResult<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a fetcher with custom configuration
    pub fn with_config(config: FetchConfig) -> LoaderResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LoaderError::transport_error("<client>".to_string(), e))?;

        Ok(Self { client, config })
    }

    /// Fetch raw content for a location
    pub async fn fetch(&self, location: &Location) -> LoaderResult<Fetched> {
        match location {
            Location::Local(url) => self.fetch_local(url).await,
            Location::Remote(url) => self.fetch_remote(url).await,
            Location::Virtual => Err(LoaderError::invalid_location(
                location.id().to_string(),
                "in-memory documents have no fetchable source".to_string(),
            )),
        }
    }

    async fn fetch_local(&self, url: &Url) -> LoaderResult<Fetched> {
        let path = url.to_file_path().map_err(|_| {
            LoaderError::invalid_location(url.to_string(), "not a filesystem path".to_string())
        })?;

        // Locations are validated at construction, but the file can vanish
        // between then and now
        let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoaderError::not_found(url.as_str().to_string())
            } else {
                LoaderError::io_error(url.as_str().to_string(), e)
            }
        })?;

        let content_type = Format::from_path(&path).map(|f| f.content_type().to_string());
        Ok(Fetched { body, content_type })
    }

    async fn fetch_remote(&self, url: &Url) -> LoaderResult<Fetched> {
        let response = self
            .client
            .request(self.config.method.clone(), url.clone())
            .headers(self.request_headers())
            .send()
            .await
            .map_err(|e| LoaderError::transport_error(url.as_str().to_string(), e))?
            .error_for_status()
            .map_err(|e| LoaderError::transport_error(url.as_str().to_string(), e))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = response
            .text()
            .await
            .map_err(|e| LoaderError::transport_error(url.as_str().to_string(), e))?;

        Ok(Fetched { body, content_type })
    }

    /// Assemble per-request headers: bearer auth first, then custom
    /// headers, so a configured Authorization value wins over the token
    fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(token) = &self.config.auth {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => {
                    log::warn!("Dropping Authorization header: {}", e);
                }
            }
        }

        for (name, value) in &self.config.headers {
            let text = match coerce_header_value(name, value) {
                Some(text) => text,
                None => continue,
            };
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&text),
            ) {
                (Ok(header_name), Ok(header_value)) => {
                    headers.insert(header_name, header_value);
                }
                _ => {
                    log::warn!("Dropping header '{}': not a valid HTTP header", name);
                }
            }
        }

        headers
    }
}

/// Coerce a configured header value to its on-wire string: strings pass
/// through unchanged, everything else is JSON-encoded. Returns `None`
/// when the value cannot be stringified.
fn coerce_header_value(name: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        other => match serde_json::to_string(other) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                log::warn!("Dropping header '{}': {}", name, e);
                None
            }
        },
    }
}
