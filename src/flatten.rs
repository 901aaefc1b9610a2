//! Module Graph Flattener for the Argus Analyzer
//!
//! Port of the chunk walk from the original JS plugin to Rust. Walks
//! every chunk's modules, converts each module's originating request to
//! a canonical `file://` identifier, and fills the overlay plus the
//! id -> identifier table the require scanner resolves against.
//!
//! Synthetic wrapper modules carry no originating request and are not
//! addressable; their direct dependencies are registered instead. One
//! bad module never aborts the pass.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::graph::{Compilation, Module, ModuleId};
use crate::overlay::Overlay;

lazy_static! {
    /// Windows absolute paths ("C:\..." or "C:/...") get three slashes
    /// and keep the drive letter as the first segment.
    static ref DRIVE_PREFIX_RE: Regex = Regex::new(r"^[A-Za-z]:").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODULE PATH TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// id -> canonical identifier, first registration wins.
#[derive(Debug, Default)]
pub struct ModulePathTable {
    by_id: HashMap<ModuleId, String>,
}

impl ModulePathTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping unless the id is already taken. Returns whether
    /// the registration happened.
    pub fn insert_first(&mut self, id: ModuleId, identifier: String) -> bool {
        if self.by_id.contains_key(&id) {
            return false;
        }
        self.by_id.insert(id, identifier);
        true
    }

    pub fn get(&self, id: &ModuleId) -> Option<&str> {
        self.by_id.get(id).map(|s| s.as_str())
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILE URI CONVERSION
// ═══════════════════════════════════════════════════════════════════════════════

fn encode_uri_path(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            ' ' => encoded.push_str("%20"),
            '#' => encoded.push_str("%23"),
            '?' => encoded.push_str("%3F"),
            _ => encoded.push(c),
        }
    }
    encoded
}

/// Canonical `file://` identifier for an originating request path.
pub fn to_file_uri(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let encoded = encode_uri_path(&normalized);

    if DRIVE_PREFIX_RE.is_match(&encoded) {
        format!("file:///{}", encoded)
    } else if encoded.starts_with('/') {
        format!("file://{}", encoded)
    } else {
        format!("file:///{}", encoded)
    }
}

/// Resolve a relative or root-relative import specifier against the
/// importing document's file URI. Bare package specifiers are not
/// addressable inside a bundle and yield None.
pub fn resolve_relative(base: &str, specifier: &str) -> Option<String> {
    if specifier.starts_with('/') {
        return Some(to_file_uri(specifier));
    }
    if !specifier.starts_with("./") && !specifier.starts_with("../") {
        return None;
    }

    let path = base.strip_prefix("file://")?;
    let mut segments: Vec<String> = path.split('/').map(|s| s.to_string()).collect();
    segments.pop(); // the importing document's own name

    for part in specifier.split('/') {
        match part {
            "." | "" => {}
            ".." => {
                // Never pop past the root segment.
                if segments.len() > 1 {
                    segments.pop();
                }
            }
            other => segments.push(encode_uri_path(other)),
        }
    }

    Some(format!("file://{}", segments.join("/")))
}

// ═══════════════════════════════════════════════════════════════════════════════
// FLATTENING
// ═══════════════════════════════════════════════════════════════════════════════

/// Walk the compilation's chunks and register every reachable,
/// addressable module in the overlay and the path table.
pub fn flatten_compilation(
    compilation: &Compilation,
    overlay: &mut Overlay,
    table: &mut ModulePathTable,
) {
    for chunk in &compilation.chunks {
        if chunk.modules.is_empty() {
            continue;
        }

        for module in &chunk.modules {
            if module.user_request.is_none() {
                // Synthetic wrapper: register what it wraps, not itself.
                for dependency in &module.dependencies {
                    if let Some(dep_module) = &dependency.module {
                        register_module(dep_module, overlay, table);
                    }
                }
            } else {
                register_module(module, overlay, table);
            }
        }
    }
}

fn register_module(module: &Module, overlay: &mut Overlay, table: &mut ModulePathTable) {
    let Some(id) = &module.id else {
        eprintln!("[ArgusNative] Skipping module without id");
        return;
    };

    if table.contains(id) {
        return;
    }

    let Some(request) = &module.user_request else {
        // Reached through a wrapper's dependency edge but still synthetic.
        return;
    };

    let Some(text) = module.source.as_ref().and_then(|s| s.source.as_ref()) else {
        eprintln!(
            "[ArgusNative] Source extraction failed for module {} ({}), skipping",
            id, request
        );
        return;
    };

    let identifier = to_file_uri(request);
    table.insert_first(id.clone(), identifier.clone());
    overlay.put(&identifier, text.clone());
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
