//! Canonical schema document locations
//!
//! A location is the absolute, canonical identity of a document:
//! - `Remote`: an absolute http or https URL
//! - `Local`: an absolute filesystem path, held as a `file://` URL
//! - `Virtual`: a caller-supplied in-memory document with no real source
//!
//! Local locations are validated eagerly at construction time, so a
//! `Location` in hand always pointed at a readable document when it was
//! built.
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};

use url::Url;

use crate::loader::error::{LoaderError, LoaderResult};

/// Reserved identifier for caller-supplied in-memory documents
pub const VIRTUAL_IDENTIFIER: &str = "virtual://in-memory";

/// Check whether a raw string names a remote document
pub fn is_remote_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

/// Canonical absolute location of a schema document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Absolute http or https URL
    Remote(Url),
    /// Absolute filesystem path as a `file://` URL
    Local(Url),
    /// In-memory document without a base location
    Virtual,
}

impl Location {
    /// Parse a raw user-supplied string into a canonical location.
    ///
    /// Strings with an `http://` or `https://` prefix become remote
    /// locations; everything else is treated as a filesystem path,
    /// resolved against the current working directory and validated
    /// on the spot.
    pub fn parse(raw: &str) -> LoaderResult<Self> {
        if is_remote_url(raw) {
            let url = Url::parse(raw)
                .map_err(|e| LoaderError::invalid_location(raw.to_string(), e.to_string()))?;
            return Ok(Self::Remote(url));
        }
        Self::from_path(Path::new(raw))
    }

    /// Build a local location from a filesystem path.
    ///
    /// The path must name an existing file. Missing targets fail with
    /// `NotFound`, directories with `InvalidTarget`. Symlinks and `..`
    /// segments are collapsed so that equal documents always share one
    /// identifier.
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let absolute: PathBuf = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| LoaderError::io_error(path.display().to_string(), e))?
                .join(path)
        };

        let metadata = std::fs::metadata(&absolute).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoaderError::not_found(absolute.display().to_string())
            } else {
                LoaderError::io_error(absolute.display().to_string(), e)
            }
        })?;
        if metadata.is_dir() {
            return Err(LoaderError::invalid_target(absolute.display().to_string()));
        }

        let canonical = absolute
            .canonicalize()
            .map_err(|e| LoaderError::io_error(absolute.display().to_string(), e))?;
        let url = Url::from_file_path(&canonical).map_err(|_| {
            LoaderError::invalid_location(
                canonical.display().to_string(),
                "not representable as a file URL".to_string(),
            )
        })?;
        Ok(Self::Local(url))
    }

    /// Build a location from an already-absolute URL, dispatching on scheme
    fn from_url(url: Url) -> LoaderResult<Self> {
        match url.scheme() {
            "http" | "https" => Ok(Self::Remote(url)),
            "file" => {
                let path = url.to_file_path().map_err(|_| {
                    LoaderError::invalid_location(
                        url.to_string(),
                        "not a filesystem path".to_string(),
                    )
                })?;
                Self::from_path(&path)
            }
            other => Err(LoaderError::invalid_location(
                url.to_string(),
                format!("unsupported scheme '{}'", other),
            )),
        }
    }

    /// Resolve a reference url-part against this document's location.
    ///
    /// Absolute remote references resolve the same way from every base.
    /// Relative references join onto remote and local bases per standard
    /// URL semantics; joined local targets are validated like any other
    /// path. Virtual documents cannot anchor relative references.
    pub fn join(&self, reference: &str) -> LoaderResult<Self> {
        if is_remote_url(reference) {
            return Self::parse(reference);
        }
        match self {
            Self::Remote(base) | Self::Local(base) => {
                let joined = base.join(reference).map_err(|e| {
                    LoaderError::invalid_location(reference.to_string(), e.to_string())
                })?;
                Self::from_url(joined)
            }
            Self::Virtual => Err(LoaderError::unresolvable_reference(reference.to_string())),
        }
    }

    /// Canonical string identifier for this location
    pub fn id(&self) -> &str {
        match self {
            Self::Remote(url) | Self::Local(url) => url.as_str(),
            Self::Virtual => VIRTUAL_IDENTIFIER,
        }
    }

    /// Whether this is a remote location
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Whether this is a local location
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Whether this is the in-memory location
    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Make an identifier relative to the root document's directory.
///
/// Applies only when both the identifier and the root are local file URLs;
/// remote and virtual identifiers are kept absolute.
pub fn relative_id(id: &str, root: &Location) -> String {
    let root_url = match root {
        Location::Local(url) => url,
        _ => return id.to_string(),
    };
    if !id.starts_with("file:") {
        return id.to_string();
    }
    match Url::parse(id) {
        Ok(target) => root_url
            .make_relative(&target)
            .unwrap_or_else(|| id.to_string()),
        Err(_) => id.to_string(),
    }
}
