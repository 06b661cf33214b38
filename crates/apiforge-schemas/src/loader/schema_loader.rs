//! Main schema loader composing fetching, parsing, scanning and
//! reference namespacing
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::loader::{
    error::LoaderResult,
    fetcher::{FetchConfig, Fetcher},
    location::Location,
    scanner::{ReferenceScanner, ScanContext, ScanSource, SchemaMap},
};

/// Configuration for schema loader behavior
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Remote fetch configuration: method, headers, auth, timeout
    pub http: FetchConfig,
    /// Documents from an earlier load, keyed by canonical identifier
    pub schemas: Option<SchemaMap>,
    /// Identifiers that count as already scanned
    pub visited: Option<HashSet<String>>,
}

/// Main schema loader: turns one root document into the complete map of
/// every document it transitively references, with all reference
/// pointers rewritten to their final namespaced form
#[derive(Debug)]
pub struct SchemaLoader {
    config: LoaderConfig,
    fetcher: Arc<Fetcher>,
    scanner: ReferenceScanner,
}

impl SchemaLoader {
    /// Create a new schema loader with default configuration
    pub fn new() -> LoaderResult<Self> {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a new schema loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> LoaderResult<Self> {
        let fetcher = Arc::new(Fetcher::with_config(config.http.clone())?);
        Ok(Self {
            config,
            fetcher,
            scanner: ReferenceScanner::new(),
        })
    }

    /// Load the document graph rooted at a raw location string, either a
    /// remote URL or a filesystem path
    pub async fn load(&self, source: &str) -> LoaderResult<SchemaMap> {
        let root = Location::parse(source)?;
        self.load_location(root).await
    }

    /// Load the document graph rooted at an already-canonical location
    pub async fn load_location(&self, root: Location) -> LoaderResult<SchemaMap> {
        let context = self.context(root.clone());
        self.scanner.scan(ScanSource::Location(root), &context).await
    }

    /// Load the document graph rooted at a caller-supplied in-memory
    /// document. The root has no base location: its own references must
    /// be absolute or same-document.
    pub async fn load_value(&self, document: Value) -> LoaderResult<SchemaMap> {
        let context = self.context(Location::Virtual);
        self.scanner.scan(ScanSource::Inline(document), &context).await
    }

    /// Get current configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fresh per-load context carrying cloned seed state, so loads never
    /// leak documents into each other through the loader
    fn context(&self, root: Location) -> ScanContext {
        ScanContext::with_seed(
            root,
            Arc::clone(&self.fetcher),
            self.config.schemas.clone().unwrap_or_default(),
            self.config.visited.clone().unwrap_or_default(),
        )
    }
}
