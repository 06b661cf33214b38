//! Apiforge Schemas - schema loading and reference resolution
//!
//! This crate is the front end of the Apiforge code generation pipeline.
//! It loads a root schema document and recursively resolves every
//! document it references, producing one flat map of parsed documents
//! ready for generation:
//! - **Locations**: remote URLs, filesystem paths, or in-memory documents
//! - **Formats**: YAML and JSON, detected from content types and
//!   extensions, with graceful fallback for undeclared content
//! - **References**: `$ref` pointers followed recursively and
//!   concurrently, fetched once per document, cycles included
//! - **Namespacing**: every pointer rewritten to the flattened address
//!   the generator consumes
//!
//! ## Quick Start
//!
//! ```no_run
//! use apiforge_schemas::SchemaLoader;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = SchemaLoader::new()?;
//!
//! // Load a root document and everything it references
//! let schemas = loader.load("./openapi.yaml").await?;
//!
//! // Entries are keyed by root-relative identifiers; the root itself
//! // keeps its canonical absolute identifier
//! for id in schemas.keys() {
//!     println!("loaded {}", id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Authenticated Sources
//!
//! Remote fetches can carry custom headers, a bearer token, and a
//! non-default HTTP method:
//!
//! ```no_run
//! use apiforge_schemas::{FetchConfig, LoaderConfig, SchemaLoader};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut http = FetchConfig::default();
//! http.auth = Some("api-token".to_string());
//! http.headers.insert("x-tenant".to_string(), "acme".into());
//!
//! let loader = SchemaLoader::with_config(LoaderConfig {
//!     http,
//!     ..Default::default()
//! })?;
//! let schemas = loader.load("https://example.com/api/openapi.yaml").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

pub mod loader;

// Re-export commonly used types for convenience
pub use loader::{
    FetchConfig, Fetched, Fetcher, Format, LoaderConfig, LoaderError, LoaderResult, Location,
    ReferenceScanner, ScanContext, ScanSource, SchemaLoader, SchemaMap, SchemaParser, REF_KEY,
    VIRTUAL_IDENTIFIER,
};
