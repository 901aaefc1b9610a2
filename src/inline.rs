//! Inline Document Indexing for the Argus Analyzer
//!
//! Recovered inline templates are HTML fragments; the interesting
//! declarations inside them are `<dom-module id="...">` registrations.
//! This module parses a recovered template with html5ever and surfaces
//! those declarations as features, so a consumer can see which custom
//! element templates survived bundling without re-reading the chunk.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::model::{DomModuleFeature, InlineDocumentFeature};

/// Extract every dom-module declaration from one recovered template.
pub fn index_inline_document(
    identifier: &str,
    document: &InlineDocumentFeature,
) -> Vec<DomModuleFeature> {
    let dom = match parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut document.contents.as_bytes())
    {
        Ok(dom) => dom,
        Err(e) => {
            eprintln!(
                "[ArgusNative] Failed to parse inline template in {}: {}",
                identifier, e
            );
            return Vec::new();
        }
    };

    let mut modules = Vec::new();
    collect_dom_modules(&dom.document, identifier, &mut modules);
    modules
}

fn collect_dom_modules(handle: &Handle, identifier: &str, out: &mut Vec<DomModuleFeature>) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        if name.local.to_string() == "dom-module" {
            let id = attrs
                .borrow()
                .iter()
                .find(|attr| attr.name.local.to_string() == "id")
                .map(|attr| attr.value.to_string());

            match id {
                Some(id) if !id.is_empty() => out.push(DomModuleFeature {
                    id,
                    source_identifier: identifier.to_string(),
                }),
                // Anonymous dom-modules are not addressable.
                _ => {}
            }
        }
    }

    for child in handle.children.borrow().iter() {
        collect_dom_modules(child, identifier, out);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SourceLocation, SourceRange};

    fn inline(contents: &str) -> InlineDocumentFeature {
        let range = SourceRange {
            file: "file:///src/card.js".to_string(),
            start: SourceLocation { line: 1, column: 2 },
            end: SourceLocation { line: 1, column: 2 },
        };
        InlineDocumentFeature {
            language: "html".to_string(),
            contents: contents.to_string(),
            location: range.start.clone(),
            attached_comment: None,
            range: range.clone(),
            container_language: "js".to_string(),
            container_range: range,
        }
    }

    #[test]
    fn test_dom_module_id_is_surfaced() {
        let doc = inline("<dom-module id=\"x-card\"><template><div></div></template></dom-module>");
        let modules = index_inline_document("file:///src/card.js", &doc);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].id, "x-card");
        assert_eq!(modules[0].source_identifier, "file:///src/card.js");
    }

    #[test]
    fn test_multiple_dom_modules() {
        let doc = inline(
            "<dom-module id=\"x-one\"></dom-module><dom-module id=\"x-two\"></dom-module>",
        );
        let modules = index_inline_document("file:///src/pair.js", &doc);
        let ids: Vec<&str> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["x-one", "x-two"]);
    }

    #[test]
    fn test_anonymous_dom_module_is_skipped() {
        let doc = inline("<dom-module><template></template></dom-module>");
        let modules = index_inline_document("file:///src/anon.js", &doc);
        assert!(modules.is_empty());
    }

    #[test]
    fn test_plain_markup_yields_nothing() {
        let doc = inline("<div>hi</div>");
        let modules = index_inline_document("file:///src/plain.js", &doc);
        assert!(modules.is_empty());
    }
}
