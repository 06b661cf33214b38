//! Final reference namespacing
//!
//! Once every reachable document is loaded, this pass rewrites each
//! reference pointer into the flattened address the code generator
//! consumes, and renames non-root map entries to root-relative
//! identifiers. Three pointer shapes come out of the scan phase:
//!
//! - cross-document to a non-root target: namespaced under `external`
//! - same-document inside a non-root document: also `external`, under
//!   the containing document's identifier
//! - root-internal (same-document in the root, or cross-document back
//!   to the root): a bare path expression
//!
//! The pass is idempotent: rewritten pointers carry no fragment
//! delimiter, so a second run leaves them alone.
//!
//! Copyright (c) 2025 Apiforge Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

use crate::loader::location::{self, Location};
use crate::loader::scanner::{SchemaMap, REF_KEY};

/// Rewrite every reference pointer in every collected document into its
/// final namespaced form; rename non-root entries to root-relative
/// identifiers. Renames move entries, they never duplicate them.
pub fn namespace_references(schemas: &mut SchemaMap, root: &Location) {
    let keys: Vec<String> = schemas.keys().cloned().collect();
    for key in keys {
        let mut document = match schemas.remove(&key) {
            Some(document) => document,
            None => continue,
        };
        let is_root = key == root.id();
        rewrite_pointers(&mut document, &key, is_root, root);

        let final_key = if is_root {
            key
        } else {
            location::relative_id(&key, root)
        };
        schemas.insert(final_key, document);
    }
}

fn rewrite_pointers(value: &mut Value, containing_key: &str, is_root: bool, root: &Location) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if key == REF_KEY {
                    if let Value::String(pointer) = entry {
                        if let Some(rewritten) =
                            namespaced_pointer(pointer, containing_key, is_root, root)
                        {
                            *pointer = rewritten;
                        }
                        continue;
                    }
                }
                rewrite_pointers(entry, containing_key, is_root, root);
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_pointers(item, containing_key, is_root, root);
            }
        }
        _ => {}
    }
}

/// Compute the final form of one pointer, or `None` when the pointer is
/// already final or has no flattened address (a bare `#` naming a whole
/// root document)
fn namespaced_pointer(
    pointer: &str,
    containing_key: &str,
    is_root: bool,
    root: &Location,
) -> Option<String> {
    let (url_part, fragment) = pointer.split_once('#')?;

    let mut parts: Vec<String> = fragment
        .split('/')
        .filter(|part| !part.is_empty())
        .map(unescape_part)
        .collect();

    if !url_part.is_empty() && url_part != root.id() {
        // Cross-document reference to a non-root target; every part is
        // kept as written
        return Some(external_address(
            &location::relative_id(url_part, root),
            &parts,
        ));
    }
    if url_part.is_empty() && !is_root {
        // Same-document reference inside a non-root document: its target
        // lives under the containing document's entry
        return Some(external_address(
            &location::relative_id(containing_key, root),
            &parts,
        ));
    }

    // Root-internal reference. Only here does the property shorthand
    // collapse: `.../Pet/properties/name` addresses the property entry
    // directly as `.../Pet/name`
    if parts.len() >= 2 && parts[parts.len() - 2] == "properties" {
        parts.remove(parts.len() - 2);
    }
    if parts.is_empty() {
        return None;
    }
    let mut address = parts[0].clone();
    for part in &parts[1..] {
        address.push_str(&format!("[\"{}\"]", part));
    }
    Some(address)
}

/// Flattened address of a path inside an external document
fn external_address(id: &str, parts: &[String]) -> String {
    let mut address = format!("external[\"{}\"]", id);
    for part in parts {
        address.push_str(&format!("[\"{}\"]", part));
    }
    address
}

/// Unescape JSON Pointer encoding (~1 for `/`, ~0 for `~`)
fn unescape_part(part: &str) -> String {
    part.replace("~1", "/").replace("~0", "~")
}
