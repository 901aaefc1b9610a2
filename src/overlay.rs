//! Virtual Source Overlay for the Argus Analyzer
//!
//! Stands in for a real filesystem: bundled modules only exist as
//! bundler-internal objects, so their contents are registered here under
//! canonical file URIs and every load the driver performs is answered
//! from memory. Nothing is persisted; an overlay lives for one pass.

use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::model::{AnalyzerError, ERR_OVERLAY_NOT_FOUND};

#[derive(Debug, Default)]
pub struct Overlay {
    contents: HashMap<String, String>,
    fingerprints: HashMap<String, String>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compute_fingerprint(source: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Register (or overwrite) the contents for an identifier.
    /// Last write wins. Overwriting with different contents is legal but
    /// logged, since the flattener's first-wins check never does it.
    pub fn put(&mut self, identifier: &str, text: String) {
        let fingerprint = Self::compute_fingerprint(&text);
        if let Some(previous) = self.fingerprints.get(identifier) {
            if previous != &fingerprint {
                eprintln!(
                    "[ArgusNative] Overlay contents replaced for {} ({} -> {})",
                    identifier,
                    &previous[..12],
                    &fingerprint[..12]
                );
            }
        }
        self.fingerprints.insert(identifier.to_string(), fingerprint);
        self.contents.insert(identifier.to_string(), text);
    }

    /// Contents for an identifier, or a typed miss.
    pub fn load(&self, identifier: &str) -> Result<&str, AnalyzerError> {
        match self.contents.get(identifier) {
            Some(text) => Ok(text),
            None => Err(AnalyzerError::new(
                ERR_OVERLAY_NOT_FOUND,
                &format!("No contents registered for {}", identifier),
                identifier,
                0,
                0,
            )),
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.contents.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.contents.keys().map(|k| k.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
