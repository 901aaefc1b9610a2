//! Data Model for the Argus Analyzer
//!
//! Shared types crossing every module boundary: source locations and
//! ranges, the typed analyzer error, and the feature variants recovered
//! from bundled chunks.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_OVERLAY_NOT_FOUND: &str = "A-ERR-OVERLAY-404";
pub const ERR_PARSE: &str = "A-ERR-PARSE-001";
pub const ERR_IMPORT_UNRESOLVED: &str = "A-ERR-IMPORT-UNRESOLVED";
pub const ERR_GRAPH_INVALID: &str = "A-ERR-GRAPH-001";

fn get_guarantee(code: &str) -> &'static str {
    match code {
        ERR_OVERLAY_NOT_FOUND => "Every identifier handed to the driver is backed by overlay contents.",
        ERR_PARSE => "Only documents that parse under the forced dialect contribute features.",
        ERR_IMPORT_UNRESOLVED => "Every emitted import either names its target or carries a warning.",
        ERR_GRAPH_INVALID => "The compilation graph deserializes before any module is registered.",
        _ => "Unknown invariant.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANALYZER ERROR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerError {
    pub code: String,
    pub message: String,
    pub guarantee: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl AnalyzerError {
    pub fn new(code: &str, message: &str, file: &str, line: u32, column: u32) -> Self {
        AnalyzerError {
            code: code.to_string(),
            message: message.to_string(),
            guarantee: get_guarantee(code).to_string(),
            file: file.to_string(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({}:{}:{})",
            self.code, self.message, self.file, self.line, self.column
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE LOCATIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// 1-based line/column position inside a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub file: String,
    pub start: SourceLocation,
    pub end: SourceLocation,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCANNED FEATURES
// ═══════════════════════════════════════════════════════════════════════════════

/// An import recovered from a chunk - either a bundler-internal require
/// call (`synthetic = true`; the bundler wrote it, no author did) or an
/// ES import declaration that survived bundling (`synthetic = false`).
///
/// `target` is the resolved source identifier of the imported module.
/// It is `None` when a require call's module id is absent from the path
/// table (which additionally surfaces an `A-ERR-IMPORT-UNRESOLVED`
/// warning) or when a declared import names a bare package.
/// `callee_range` covers the require callee in the synthetic form and
/// the module specifier literal in the declared form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct ImportFeature {
    pub kind: String,
    pub target: Option<String>,
    pub range: SourceRange,
    pub callee_range: SourceRange,
    pub binding: Option<String>,
    pub synthetic: bool,
}

/// An HTML template inlined into a chunk by the template loader.
///
/// `range` covers the template contents only - the literal's range shrunk
/// by one column on each side so the quote/backtick delimiters are
/// excluded. `container_range` covers the whole registration call in the
/// surrounding JS and stands in for a node backreference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct InlineDocumentFeature {
    pub language: String,
    pub contents: String,
    pub location: SourceLocation,
    pub attached_comment: Option<String>,
    pub range: SourceRange,
    pub container_language: String,
    pub container_range: SourceRange,
}

/// A `<dom-module id="...">` declaration found inside a recovered inline
/// template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct DomModuleFeature {
    pub id: String,
    pub source_identifier: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// AGGREGATES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub imports: Vec<ImportFeature>,
    pub inline_documents: Vec<InlineDocumentFeature>,
    pub dom_modules: Vec<DomModuleFeature>,
}

impl FeatureSet {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.inline_documents.is_empty() && self.dom_modules.is_empty()
    }

    /// Append all features from `other`, preserving order.
    pub fn merge(&mut self, other: FeatureSet) {
        self.imports.extend(other.imports);
        self.inline_documents.extend(other.inline_documents);
        self.dom_modules.extend(other.dom_modules);
    }
}

/// A document the driver gave up on. Only that document is lost; the
/// pass continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct DocumentFailure {
    pub identifier: String,
    pub error: AnalyzerError,
}

/// The result of one analysis pass. All state is scoped to the pass;
/// nothing is cached across builds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub features: FeatureSet,
    pub warnings: Vec<AnalyzerError>,
    pub document_failures: Vec<DocumentFailure>,
    pub documents_scanned: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyzerError::new(ERR_OVERLAY_NOT_FOUND, "no contents", "file:///a.js", 3, 7);
        let rendered = format!("{}", err);
        assert!(rendered.contains("A-ERR-OVERLAY-404"));
        assert!(rendered.contains("file:///a.js:3:7"));
    }

    #[test]
    fn test_feature_set_merge_preserves_order() {
        let mk = |target: &str| ImportFeature {
            kind: "js-import".to_string(),
            target: Some(target.to_string()),
            range: SourceRange {
                file: "file:///a.js".to_string(),
                start: SourceLocation { line: 1, column: 1 },
                end: SourceLocation { line: 1, column: 2 },
            },
            callee_range: SourceRange {
                file: "file:///a.js".to_string(),
                start: SourceLocation { line: 1, column: 1 },
                end: SourceLocation { line: 1, column: 2 },
            },
            binding: None,
            synthetic: true,
        };

        let mut first = FeatureSet::default();
        first.imports.push(mk("file:///one.js"));
        let mut second = FeatureSet::default();
        second.imports.push(mk("file:///two.js"));

        first.merge(second);
        assert_eq!(first.imports.len(), 2);
        assert_eq!(first.imports[0].target.as_deref(), Some("file:///one.js"));
        assert_eq!(first.imports[1].target.as_deref(), Some("file:///two.js"));
    }
}
