//! Schema loading and reference resolution
//!
//! This module turns one root document into the complete set of documents
//! it transitively references:
//! - YAML and JSON parsing with content-type detection
//! - local and remote document fetching
//! - concurrent recursive reference scanning ($ref support)
//! - cycle breaking and fetch deduplication
//! - reference namespacing for code generation
//!
//! # Example Usage
//!
//! ```no_run
//! use apiforge_schemas::loader::SchemaLoader;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = SchemaLoader::new()?;
//! let schemas = loader.load("openapi.yaml").await?;
//! for (id, document) in &schemas {
//!     println!("{}: {}", id, serde_json::to_string_pretty(document)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod fetcher;
pub mod location;
pub mod parser;
pub mod scanner;
pub mod schema_loader;
pub mod transform;

pub use error::{LoaderError, LoaderResult};
pub use fetcher::{FetchConfig, Fetched, Fetcher};
pub use location::{Location, VIRTUAL_IDENTIFIER};
pub use parser::{Format, SchemaParser};
pub use scanner::{ReferenceScanner, ScanContext, ScanSource, SchemaMap, REF_KEY};
pub use schema_loader::{LoaderConfig, SchemaLoader};
pub use transform::namespace_references;
