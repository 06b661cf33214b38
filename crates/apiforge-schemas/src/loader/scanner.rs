//! Recursive reference scanning
//!
//! The scanner loads a root document and walks it for reference pointers,
//! fanning out concurrent scans for every document they name. A shared
//! visited set guarantees each location is fetched at most once per load
//! and breaks reference cycles. While walking, cross-document pointers are
//! rewritten in place to carry the canonical absolute identifier of their
//! target, so the later namespacing pass never needs to re-resolve
//! anything.
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::{try_join_all, BoxFuture};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::loader::error::LoaderResult;
use crate::loader::fetcher::Fetcher;
use crate::loader::location::Location;
use crate::loader::parser::SchemaParser;
use crate::loader::transform;

/// Reserved key marking a reference pointer
pub const REF_KEY: &str = "$ref";

/// Loaded documents keyed by their canonical identifier
pub type SchemaMap = HashMap<String, Value>;

/// Root input for a scan: a resolvable location or an in-memory document
#[derive(Debug, Clone)]
pub enum ScanSource {
    /// Document to fetch from its canonical location
    Location(Location),
    /// Caller-supplied document with no base location
    Inline(Value),
}

/// Shared state for one load session
#[derive(Debug, Clone)]
pub struct ScanContext {
    schemas: Arc<Mutex<SchemaMap>>,
    visited: Arc<Mutex<HashSet<String>>>,
    root: Location,
    fetcher: Arc<Fetcher>,
}

impl ScanContext {
    /// Create a fresh context rooted at `root`
    pub fn new(root: Location, fetcher: Arc<Fetcher>) -> Self {
        Self::with_seed(root, fetcher, SchemaMap::new(), HashSet::new())
    }

    /// Create a context pre-seeded with the results of an earlier load.
    /// Seeded identifiers count as visited and are never fetched again.
    pub fn with_seed(
        root: Location,
        fetcher: Arc<Fetcher>,
        schemas: SchemaMap,
        visited: HashSet<String>,
    ) -> Self {
        Self {
            schemas: Arc::new(Mutex::new(schemas)),
            visited: Arc::new(Mutex::new(visited)),
            root,
            fetcher,
        }
    }

    /// Root location of this load session
    pub fn root(&self) -> &Location {
        &self.root
    }

    /// Mark an identifier visited; `false` when it was already claimed.
    /// Insert-and-check under one lock, so two tasks racing on the same
    /// identifier cannot both win.
    async fn mark_visited(&self, key: &str) -> bool {
        self.visited.lock().await.insert(key.to_string())
    }

    /// Store a document under its identifier
    async fn store(&self, key: &str, document: Value) {
        self.schemas.lock().await.insert(key.to_string(), document);
    }

    /// Clone of the current schema map
    pub async fn snapshot(&self) -> SchemaMap {
        self.schemas.lock().await.clone()
    }
}

/// Recursive reference scanner: loads every reachable document once
#[derive(Debug, Default)]
pub struct ReferenceScanner {
    parser: SchemaParser,
}

impl ReferenceScanner {
    /// Create a new reference scanner
    pub fn new() -> Self {
        Self {
            parser: SchemaParser::new(),
        }
    }

    /// Load `source` and everything reachable from it, then return the
    /// completed schema map. When `source` is the context root, the
    /// namespacing pass runs before the map is returned.
    pub async fn scan(&self, source: ScanSource, context: &ScanContext) -> LoaderResult<SchemaMap> {
        self.scan_inner(source, context).await?;
        Ok(context.snapshot().await)
    }

    /// Boxed recursion point: child scans are ordinary scans of a located
    /// source
    fn scan_child<'a>(
        &'a self,
        location: Location,
        context: &'a ScanContext,
    ) -> BoxFuture<'a, LoaderResult<()>> {
        Box::pin(self.scan_inner(ScanSource::Location(location), context))
    }

    async fn scan_inner(&self, source: ScanSource, context: &ScanContext) -> LoaderResult<()> {
        let key = match &source {
            ScanSource::Inline(_) => Location::Virtual.id().to_string(),
            ScanSource::Location(location) => location.id().to_string(),
        };
        if !context.mark_visited(&key).await {
            // Already claimed by this session: dedups shared references
            // and terminates reference cycles
            return Ok(());
        }

        let (location, mut document) = match source {
            ScanSource::Inline(value) => (Location::Virtual, value),
            ScanSource::Location(location) => {
                let fetched = context.fetcher.fetch(&location).await?;
                let document =
                    self.parser
                        .parse(&fetched.body, fetched.content_type.as_deref(), location.id())?;
                (location, document)
            }
        };
        log::debug!("Scanned '{}'", key);

        // Absolutize cross-document pointers in place, collecting the
        // locations they name, before the document is stored
        let mut children: Vec<Location> = Vec::new();
        rewrite_document(&mut document, &location, &mut children)?;
        context.store(&key, document).await;

        let scans = children
            .into_iter()
            .map(|child| self.scan_child(child, context));
        try_join_all(scans).await?;

        if key == context.root.id() {
            // The whole reachable graph is loaded once the root's subtree
            // completes; finish with the namespacing pass
            let mut schemas = context.schemas.lock().await;
            transform::namespace_references(&mut schemas, &context.root);
        }
        Ok(())
    }
}

/// Depth-first walk rewriting cross-document reference pointers to their
/// canonical absolute form, collecting each child location on the way
fn rewrite_document(
    value: &mut Value,
    base: &Location,
    children: &mut Vec<Location>,
) -> LoaderResult<()> {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if key == REF_KEY {
                    if let Value::String(pointer) = entry {
                        if let Some(rewritten) = absolutize_pointer(pointer, base, children)? {
                            *pointer = rewritten;
                        }
                        continue;
                    }
                }
                rewrite_document(entry, base, children)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_document(item, base, children)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Rewrite one pointer's url-part to the canonical identifier of its
/// target. Returns `None` for strings that need no rewrite: non-pointer
/// values without a fragment delimiter, and same-document references,
/// which keep their bare `#/...` form until the namespacing pass.
fn absolutize_pointer(
    pointer: &str,
    base: &Location,
    children: &mut Vec<Location>,
) -> LoaderResult<Option<String>> {
    let (url_part, fragment) = match pointer.split_once('#') {
        Some(parts) => parts,
        None => return Ok(None),
    };
    if url_part.is_empty() {
        return Ok(None);
    }

    let child = base.join(url_part)?;
    let rewritten = format!("{}#{}", child.id(), fragment);
    log::debug!("Reference '{}' resolved to '{}'", pointer, child.id());
    children.push(child);
    Ok(Some(rewritten))
}
