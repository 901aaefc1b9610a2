//! Bundle Directory Discovery for the Argus Analyzer
//!
//! Analyzes an already-emitted bundle on disk instead of a live
//! compilation: recursively finds the `.js` chunk files under a
//! directory and scans each one. No module graph exists in this mode,
//! so the path table is empty and every recovered require call is
//! reported unresolved, with its raw module id preserved in the
//! warning.

#[cfg(feature = "napi")]
use napi_derive::napi;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analyze::{scan_source, AnalyzerOptions};
use crate::flatten::{to_file_uri, ModulePathTable};
use crate::model::{Analysis, DocumentFailure};

/// Recursively find all .js chunk files in a directory.
fn find_chunk_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        if let Ok(entry) = entry {
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext == "js" {
                        files.push(path.to_path_buf());
                    }
                }
            }
        }
    }

    files
}

/// Scan every chunk file under `base_dir`. Documents are scanned in
/// parallel; results are merged in identifier order so the output is
/// deterministic.
pub fn analyze_bundle_dir(base_dir: &Path, options: &AnalyzerOptions) -> Analysis {
    if !base_dir.exists() {
        return Analysis::default();
    }

    let mut documents: Vec<(String, String)> = Vec::new();
    for path in find_chunk_files(base_dir) {
        match fs::read_to_string(&path) {
            Ok(text) => documents.push((to_file_uri(&path.to_string_lossy()), text)),
            Err(e) => {
                eprintln!("[ArgusNative] Failed to read chunk {:?}: {}", path, e);
                // Continue despite unreadable files
            }
        }
    }
    documents.sort_by(|a, b| a.0.cmp(&b.0));

    let table = ModulePathTable::new();
    let scans: Vec<_> = documents
        .par_iter()
        .map(|(identifier, source)| {
            (
                identifier.clone(),
                scan_source(identifier, source, &table, options),
            )
        })
        .collect();

    let mut analysis = Analysis::default();
    for (identifier, result) in scans {
        match result {
            Ok(out) => {
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

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn analyze_bundle_dir_native(
    base_dir: String,
    options_json: Option<serde_json::Value>,
) -> napi::Result<serde_json::Value> {
    let options: AnalyzerOptions = match options_json {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| napi::Error::from_reason(format!("Invalid options: {}", e)))?,
        None => AnalyzerOptions::default(),
    };

    let analysis = analyze_bundle_dir(Path::new(&base_dir), &options);
    serde_json::to_value(analysis).map_err(|e| napi::Error::from_reason(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ERR_IMPORT_UNRESOLVED;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "argus-discovery-{}-{}",
            name,
            std::process::id()
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_scans_every_chunk_deterministically() {
        let dir = scratch_dir("two-chunks");
        fs::write(dir.join("0.bundle.js"), "var a = 1;").unwrap();
        fs::write(dir.join("1.bundle.js"), "var b = 2;").unwrap();
        fs::write(dir.join("stats.json"), "{}").unwrap();

        let analysis = analyze_bundle_dir(&dir, &AnalyzerOptions::default());

        assert_eq!(analysis.documents_scanned.len(), 2);
        let mut sorted = analysis.documents_scanned.clone();
        sorted.sort();
        assert_eq!(analysis.documents_scanned, sorted);
        assert!(analysis.documents_scanned[0].ends_with("0.bundle.js"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_requires_are_unresolved_by_construction() {
        let dir = scratch_dir("unresolved");
        fs::write(dir.join("chunk.js"), "__webpack_require__(42);").unwrap();

        let analysis = analyze_bundle_dir(&dir, &AnalyzerOptions::default());

        assert_eq!(analysis.features.imports.len(), 1);
        assert_eq!(analysis.features.imports[0].target, None);
        assert_eq!(analysis.warnings.len(), 1);
        assert_eq!(analysis.warnings[0].code, ERR_IMPORT_UNRESOLVED);
        assert!(analysis.warnings[0].message.contains("42"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_yields_empty_analysis() {
        let analysis = analyze_bundle_dir(
            Path::new("/definitely/not/a/bundle/dir"),
            &AnalyzerOptions::default(),
        );
        assert!(analysis.features.is_empty());
        assert!(analysis.documents_scanned.is_empty());
    }
}
