//! # Argus Analyzer Native Core
//!
//! Re-runs static analysis over bundled module contents to recover the
//! semantic features - bundler-internal require imports and inlined
//! HTML templates - that extension-based heuristics lose once sources
//! are concatenated into chunks.
//!
//! ## Ground Rules
//!
//! 1. **Virtual sources**: bundled modules exist only as bundler-internal
//!    objects. Their contents are registered in an in-memory overlay
//!    under canonical `file://` identifiers; every load is answered from
//!    memory.
//! 2. **First registration wins**: a module reached through several
//!    chunks registers exactly once. Synthetic wrapper modules are never
//!    registered; their direct dependencies are.
//! 3. **Forced dialect**: every overlay-backed document is parsed under
//!    one explicitly configured dialect. Identifiers' apparent file
//!    extensions are meaningless after bundling and are never consulted.
//! 4. **One parse per document**: the driver memoizes by identifier, so
//!    a document reached from several entries or imports is parsed at
//!    most once per pass.
//! 5. **Silent non-matches, loud failures**: a call shape a scanner
//!    cannot safely attribute is skipped without a warning; a module id
//!    missing from the path table warns; a document that fails to load
//!    or parse is dropped alone and the pass continues.
//! 6. **No cross-build state**: overlay, path table and feature set are
//!    allocated per compilation and discarded with it.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod analyze;
mod discovery;
mod flatten;
mod graph;
mod inline;
mod model;
mod overlay;
mod plugin;
mod scan;


// Internal Rust-to-Rust API (for embedding without the NAPI bridge)
pub use analyze::{resolve_identifier, scan_source, Analyzer, AnalyzerOptions, Dialect};
pub use discovery::analyze_bundle_dir;
pub use flatten::{flatten_compilation, to_file_uri, ModulePathTable};
pub use graph::{Chunk, Compilation, Dependency, Module, ModuleId, SourceBundle};
pub use inline::index_inline_document;
pub use model::{
    Analysis, AnalyzerError, DocumentFailure, DomModuleFeature, FeatureSet, ImportFeature,
    InlineDocumentFeature, SourceLocation, SourceRange, ERR_GRAPH_INVALID, ERR_IMPORT_UNRESOLVED,
    ERR_OVERLAY_NOT_FOUND, ERR_PARSE,
};
pub use overlay::Overlay;
pub use plugin::{analyze_compilation, entry_identifier};
pub use scan::{
    EsImportScanner, InlineTemplateScanner, LineIndex, RequireImportScanner, ScanOutput,
    ScannedDocument, JS_IMPORT_KIND, TEMPLATE_REGISTRY,
};

#[cfg(feature = "napi")]
pub use analyze::scan_source_native;
#[cfg(feature = "napi")]
pub use discovery::analyze_bundle_dir_native;
#[cfg(feature = "napi")]
pub use plugin::analyze_compilation_native;

#[cfg(feature = "napi")]
#[napi]
pub fn analyzer_bridge() -> String {
    "Argus Native Bridge Connected".to_string()
}
