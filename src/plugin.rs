//! Plugin Shell for the Argus Analyzer
//!
//! Port of the JS plugin's compilation hook body to Rust. The JS side
//! binds to the bundler's "compilation produced, before final asset
//! emission" extension point, serializes the compilation, and calls
//! `analyze_compilation_native`; this module rebuilds the virtual file
//! system, derives the entry identifiers, and runs the driver.
//!
//! The recovered `Analysis` is returned to the caller - feeding features
//! back into the bundle graph is the host's decision, not ours.

#[cfg(feature = "napi")]
use napi_derive::napi;

use crate::analyze::{Analyzer, AnalyzerOptions};
use crate::flatten::{flatten_compilation, ModulePathTable};
use crate::graph::Compilation;
use crate::model::Analysis;
#[cfg(feature = "napi")]
use crate::model::ERR_GRAPH_INVALID;
use crate::overlay::Overlay;

/// An entry's originating request with one leading path separator
/// stripped, forming a package-relative entry identifier.
pub fn entry_identifier(request: &str) -> String {
    request
        .strip_prefix('/')
        .or_else(|| request.strip_prefix('\\'))
        .unwrap_or(request)
        .to_string()
}

/// Entry records either are modules themselves or own dependency edges
/// to exactly the modules that constitute them.
fn collect_entry_identifiers(compilation: &Compilation) -> Vec<String> {
    let mut identifiers = Vec::new();
    for entry in &compilation.entries {
        if let Some(request) = &entry.user_request {
            identifiers.push(entry_identifier(request));
        } else {
            for dependency in &entry.dependencies {
                if let Some(module) = &dependency.module {
                    if let Some(request) = &module.user_request {
                        identifiers.push(entry_identifier(request));
                    }
                }
            }
        }
    }
    identifiers
}

/// One full pass over a top-level compilation. Child compilations are
/// not analyzed and yield an empty result.
pub fn analyze_compilation(compilation: &Compilation, options: AnalyzerOptions) -> Analysis {
    if compilation.is_child {
        return Analysis::default();
    }

    let mut overlay = Overlay::new();
    let mut table = ModulePathTable::new();
    flatten_compilation(compilation, &mut overlay, &mut table);

    let entries = collect_entry_identifiers(compilation);
    Analyzer::new(overlay, table, options).analyze(&entries)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn analyze_compilation_native(
    compilation_json: serde_json::Value,
    options_json: Option<serde_json::Value>,
) -> napi::Result<serde_json::Value> {
    let compilation: Compilation = serde_json::from_value(compilation_json).map_err(|e| {
        napi::Error::from_reason(format!("{}: invalid compilation graph: {}", ERR_GRAPH_INVALID, e))
    })?;

    let options: AnalyzerOptions = match options_json {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| napi::Error::from_reason(format!("Invalid options: {}", e)))?,
        None => AnalyzerOptions::default(),
    };

    let analysis = analyze_compilation(&compilation, options);
    serde_json::to_value(analysis).map_err(|e| napi::Error::from_reason(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
