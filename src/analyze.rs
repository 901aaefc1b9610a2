//! Analysis Driver for the Argus Analyzer
//!
//! Orchestrates one pass: load each document from the overlay, parse it
//! under a single forced dialect, run the scanner set over the single
//! resulting tree, follow the recovered import targets, and flatten
//! everything into one feature set.
//!
//! Bundled chunks no longer carry meaningful file extensions, so the
//! dialect is an explicit option applied to every document - never
//! inferred from the identifier. Each document is parsed at most once
//! per pass regardless of how many entries or imports reach it, and a
//! document that fails to load or parse is dropped alone; the pass
//! continues.

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::flatten::{to_file_uri, ModulePathTable};
use crate::inline::index_inline_document;
use crate::model::{Analysis, AnalyzerError, DocumentFailure, ERR_PARSE};
use crate::overlay::Overlay;
use crate::scan::{
    EsImportScanner, InlineTemplateScanner, LineIndex, RequireImportScanner, ScanOutput,
    ScannedDocument, TEMPLATE_REGISTRY,
};

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// The source dialect forced onto every overlay-backed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Js,
    Ts,
}

impl Dialect {
    pub fn source_type(self) -> SourceType {
        match self {
            Dialect::Js => SourceType::default().with_module(true).with_jsx(true),
            Dialect::Ts => SourceType::default()
                .with_module(true)
                .with_jsx(true)
                .with_typescript(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerOptions {
    pub dialect: Dialect,
    pub require_name: String,
    pub template_registry: String,
    pub follow_imports: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Js,
            require_name: "__webpack_require__".to_string(),
            template_registry: TEMPLATE_REGISTRY.to_string(),
            follow_imports: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SINGLE-DOCUMENT PIPELINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Entry identifiers arrive as package-relative paths ("src/entry.js");
/// overlay keys are canonical file URIs. Idempotent on canonical input.
pub fn resolve_identifier(identifier: &str) -> String {
    if identifier.starts_with("file://") {
        identifier.to_string()
    } else {
        to_file_uri(identifier)
    }
}

/// Parse one document under the forced dialect and run the scanner set
/// over the single resulting tree. Inline templates are additionally
/// indexed for dom-module declarations.
pub fn scan_source(
    identifier: &str,
    source: &str,
    table: &ModulePathTable,
    options: &AnalyzerOptions,
) -> Result<ScanOutput, AnalyzerError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, options.dialect.source_type()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let detail = ret
            .errors
            .first()
            .map(|e| format!("{:?}", e))
            .unwrap_or_else(|| "parser panicked".to_string());
        return Err(AnalyzerError::new(
            ERR_PARSE,
            &format!("Failed to parse {}: {}", identifier, detail),
            identifier,
            0,
            0,
        ));
    }

    let lines = LineIndex::new(source);
    let doc = ScannedDocument {
        identifier,
        source,
        lines: &lines,
        program: &ret.program,
    };

    let mut out = RequireImportScanner::new(&options.require_name, table).scan(&doc);
    out.merge(EsImportScanner.scan(&doc));
    out.merge(InlineTemplateScanner::new(&options.template_registry).scan(&doc));

    let mut dom_modules = Vec::new();
    for document in &out.features.inline_documents {
        dom_modules.extend(index_inline_document(identifier, document));
    }
    out.features.dom_modules.extend(dom_modules);

    Ok(out)
}

// ═══════════════════════════════════════════════════════════════════════════════
// DRIVER
// ═══════════════════════════════════════════════════════════════════════════════

pub struct Analyzer {
    overlay: Overlay,
    table: ModulePathTable,
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(overlay: Overlay, table: ModulePathTable, options: AnalyzerOptions) -> Self {
        Self {
            overlay,
            table,
            options,
        }
    }

    /// Run the pass over the given entry identifiers. When
    /// `follow_imports` is set, each recovered import target joins the
    /// worklist; the seen-set keeps the walk cycle-safe and guarantees
    /// at most one parse per identifier.
    pub fn analyze(&self, entries: &[String]) -> Analysis {
        let mut analysis = Analysis::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut worklist: VecDeque<String> =
            entries.iter().map(|e| resolve_identifier(e)).collect();

        while let Some(identifier) = worklist.pop_front() {
            if !seen.insert(identifier.clone()) {
                continue;
            }

            let source = match self.overlay.load(&identifier) {
                Ok(source) => source,
                Err(error) => {
                    analysis
                        .document_failures
                        .push(DocumentFailure { identifier, error });
                    continue;
                }
            };

            match scan_source(&identifier, source, &self.table, &self.options) {
                Ok(out) => {
                    if self.options.follow_imports {
                        for import in &out.features.imports {
                            if let Some(target) = &import.target {
                                if !seen.contains(target) {
                                    worklist.push_back(target.clone());
                                }
                            }
                        }
                    }
                    analysis.features.merge(out.features);
                    analysis.warnings.extend(out.warnings);
                    analysis.documents_scanned.push(identifier);
                }
                Err(error) => {
                    analysis
                        .document_failures
                        .push(DocumentFailure { identifier, error });
                }
            }
        }

        analysis
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn scan_source_native(
    source: String,
    file_path: String,
    options_json: Option<serde_json::Value>,
) -> napi::Result<serde_json::Value> {
    let options: AnalyzerOptions = match options_json {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| napi::Error::from_reason(format!("Invalid options: {}", e)))?,
        None => AnalyzerOptions::default(),
    };

    let table = ModulePathTable::new();
    let identifier = resolve_identifier(&file_path);
    let out = scan_source(&identifier, &source, &table, &options)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    Ok(serde_json::json!({
        "features": out.features,
        "warnings": out.warnings,
    }))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
