//! Pattern Scanners for the Argus Analyzer
//!
//! The two syntax-shape matchers that recover features from bundled
//! chunks, plus their shared plumbing (line index, leading-comment
//! collection, binding collection).
//!
//! Scanners are visitor-passive: each registers interest in a handful of
//! node kinds, lets a single `oxc_ast_visit` traversal drive it, and
//! hands back whatever it collected. Unmatched call shapes are not
//! errors - they are shapes the scanner cannot safely attribute, and
//! they are skipped silently. The match predicates are standalone
//! functions so the non-match conditions stay unit-testable without a
//! traversal.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use oxc_ast::ast::{
    BindingIdentifier, BindingPattern, CallExpression, Expression, ExpressionStatement,
    ImportDeclaration, ImportDeclarationSpecifier, Program, VariableDeclarator,
};
use oxc_ast::Comment;
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};

use crate::flatten::{resolve_relative, ModulePathTable};
use crate::graph::ModuleId;
use crate::model::{
    AnalyzerError, FeatureSet, ImportFeature, InlineDocumentFeature, SourceLocation, SourceRange,
    ERR_IMPORT_UNRESOLVED,
};

/// Feature tag carried by every recovered require import.
pub const JS_IMPORT_KIND: &str = "js-import";

/// Registry object and methods matched by the inline-template scanner.
pub const TEMPLATE_REGISTRY: &str = "RegisterHtmlTemplate";
const TEMPLATE_METHODS: [&str; 2] = ["register", "toBody"];

lazy_static! {
    /// Doc-comment gutters: leading whitespace plus `*` at line start.
    static ref COMMENT_GUTTER_RE: Regex = Regex::new(r"(?m)^\s*\*\s?").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// LINE INDEX
// ═══════════════════════════════════════════════════════════════════════════════

/// Byte offset -> 1-based line/column, built once per document.
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { line_starts }
    }

    pub fn location(&self, offset: u32) -> SourceLocation {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        SourceLocation {
            line: line as u32 + 1,
            column: offset - self.line_starts[line] + 1,
        }
    }

    pub fn range(&self, file: &str, span: Span) -> SourceRange {
        SourceRange {
            file: file.to_string(),
            start: self.location(span.start),
            end: self.location(span.end),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCAN OUTPUT & DOCUMENT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct ScanOutput {
    pub features: FeatureSet,
    pub warnings: Vec<AnalyzerError>,
}

impl ScanOutput {
    pub fn merge(&mut self, other: ScanOutput) {
        self.features.merge(other.features);
        self.warnings.extend(other.warnings);
    }
}

/// A parsed document handed to the scanners. Borrowed wholesale so both
/// scanners share one parse.
pub struct ScannedDocument<'s, 'a> {
    pub identifier: &'s str,
    pub source: &'s str,
    pub lines: &'s LineIndex,
    pub program: &'s Program<'a>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// BINDING COLLECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Collects every binding introduced anywhere in a document: variable
/// declarations, function/class names, params, imports, catch clauses.
pub struct BindingCollector<'c> {
    pub symbols: &'c mut HashSet<String>,
}

impl<'c, 'a> Visit<'a> for BindingCollector<'c> {
    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        self.symbols.insert(ident.name.to_string());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMENT COLLECTION
// ═══════════════════════════════════════════════════════════════════════════════

fn clean_comment_text(raw: &str) -> String {
    let body = if let Some(rest) = raw.strip_prefix("//") {
        rest
    } else if let Some(rest) = raw.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else {
        raw
    };
    COMMENT_GUTTER_RE.replace_all(body, "").trim().to_string()
}

/// Text of the comments immediately preceding `node_start` - each
/// separated from the node (and from each other) by whitespace only -
/// cleaned of delimiters and gutters, joined by newlines.
pub(crate) fn leading_comment_text(
    source: &str,
    comments: &[Comment],
    node_start: u32,
) -> Option<String> {
    let mut collected: Vec<String> = Vec::new();
    let mut boundary = node_start;

    for comment in comments.iter().rev() {
        if comment.span.end > boundary {
            continue;
        }
        let gap = &source[comment.span.end as usize..boundary as usize];
        if !gap.trim().is_empty() {
            break;
        }
        let raw = &source[comment.span.start as usize..comment.span.end as usize];
        collected.push(clean_comment_text(raw));
        boundary = comment.span.start;
    }

    if collected.is_empty() {
        return None;
    }
    collected.reverse();
    Some(collected.join("\n"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// REQUIRE-IMPORT SCANNER
// ═══════════════════════════════════════════════════════════════════════════════

/// True when the call's callee is a bare identifier with the bundler's
/// internal require name.
pub(crate) fn is_require_call(call: &CallExpression, require_name: &str) -> bool {
    matches!(&call.callee, Expression::Identifier(ident) if ident.name.as_str() == require_name)
}

/// The call's sole numeric/string literal argument as a module id.
/// Calls whose argument is anything else are not addressable.
pub(crate) fn require_call_argument(call: &CallExpression) -> Option<ModuleId> {
    if call.arguments.len() != 1 {
        return None;
    }
    match call.arguments[0].as_expression()? {
        Expression::NumericLiteral(n) if n.value.fract() == 0.0 => {
            Some(ModuleId::Number(n.value as i64))
        }
        Expression::StringLiteral(s) => Some(ModuleId::Name(s.value.to_string())),
        _ => None,
    }
}

/// Matches bundler-internal require calls and resolves their module id
/// against the path table.
///
/// Only two parent shapes are recognized: a bare expression statement
/// and a variable declarator with a plain identifier target. A call used
/// inside a larger expression has no binding name the scanner could
/// safely attribute, so it is skipped.
pub struct RequireImportScanner<'t> {
    require_name: &'t str,
    table: &'t ModulePathTable,
}

impl<'t> RequireImportScanner<'t> {
    pub fn new(require_name: &'t str, table: &'t ModulePathTable) -> Self {
        Self {
            require_name,
            table,
        }
    }

    pub fn scan(&self, doc: &ScannedDocument) -> ScanOutput {
        // A document that rebinds the require name anywhere is not using
        // the bundler runtime; matching inside it would attribute
        // imports to user code.
        let mut symbols = HashSet::new();
        let mut collector = BindingCollector {
            symbols: &mut symbols,
        };
        collector.visit_program(doc.program);
        if symbols.contains(self.require_name) {
            return ScanOutput::default();
        }

        let mut visitor = RequireCallVisitor {
            require_name: self.require_name,
            table: self.table,
            identifier: doc.identifier,
            lines: doc.lines,
            out: ScanOutput::default(),
        };
        visitor.visit_program(doc.program);
        visitor.out
    }
}

struct RequireCallVisitor<'v> {
    require_name: &'v str,
    table: &'v ModulePathTable,
    identifier: &'v str,
    lines: &'v LineIndex,
    out: ScanOutput,
}

impl<'v> RequireCallVisitor<'v> {
    fn emit(&mut self, call: &CallExpression, binding: Option<String>) {
        let Some(module_id) = require_call_argument(call) else {
            return;
        };

        let target = self.table.get(&module_id).map(|s| s.to_string());
        if target.is_none() {
            let at = self.lines.location(call.span.start);
            self.out.warnings.push(AnalyzerError::new(
                ERR_IMPORT_UNRESOLVED,
                &format!(
                    "Module id {} is not present in the module path table",
                    module_id
                ),
                self.identifier,
                at.line,
                at.column,
            ));
        }

        self.out.features.imports.push(ImportFeature {
            kind: JS_IMPORT_KIND.to_string(),
            target,
            range: self.lines.range(self.identifier, call.span),
            callee_range: self.lines.range(self.identifier, call.callee.span()),
            binding,
            synthetic: true,
        });
    }
}

impl<'v, 'a> Visit<'a> for RequireCallVisitor<'v> {
    fn visit_expression_statement(&mut self, stmt: &ExpressionStatement<'a>) {
        if let Expression::CallExpression(call) = &stmt.expression {
            if is_require_call(call, self.require_name) {
                self.emit(call, None);
            }
        }
        walk::walk_expression_statement(self, stmt);
    }

    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if let Some(Expression::CallExpression(call)) = &decl.init {
            if is_require_call(call, self.require_name) {
                if let BindingPattern::BindingIdentifier(id) = &decl.id {
                    self.emit(call, Some(id.name.to_string()));
                }
                // Destructuring targets are left unmatched.
            }
        }
        walk::walk_variable_declarator(self, decl);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DECLARED-IMPORT SCANNER
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches author-written ES import declarations that survived into a
/// chunk - entry modules, mostly. Relative and root-relative specifiers
/// resolve against the importing document's identifier; bare package
/// specifiers are not addressable inside a bundle and keep no target.
pub struct EsImportScanner;

impl EsImportScanner {
    pub fn scan(&self, doc: &ScannedDocument) -> ScanOutput {
        let mut visitor = EsImportVisitor {
            identifier: doc.identifier,
            lines: doc.lines,
            out: ScanOutput::default(),
        };
        visitor.visit_program(doc.program);
        visitor.out
    }
}

struct EsImportVisitor<'v> {
    identifier: &'v str,
    lines: &'v LineIndex,
    out: ScanOutput,
}

impl<'v, 'a> Visit<'a> for EsImportVisitor<'v> {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        // The default or namespace local is the declaration's binding;
        // named-only imports bind no single identifier.
        let binding = decl.specifiers.as_ref().and_then(|specifiers| {
            specifiers.iter().find_map(|specifier| match specifier {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    Some(s.local.name.to_string())
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    Some(s.local.name.to_string())
                }
                ImportDeclarationSpecifier::ImportSpecifier(_) => None,
            })
        });

        self.out.features.imports.push(ImportFeature {
            kind: JS_IMPORT_KIND.to_string(),
            target: resolve_relative(self.identifier, decl.source.value.as_str()),
            range: self.lines.range(self.identifier, decl.span),
            callee_range: self.lines.range(self.identifier, decl.source.span),
            binding,
            synthetic: false,
        });

        walk::walk_import_declaration(self, decl);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// INLINE-TEMPLATE SCANNER
// ═══════════════════════════════════════════════════════════════════════════════

/// True when the call is `<registry>.register(x)` or `<registry>.toBody(x)`
/// with exactly one argument.
pub(crate) fn is_template_registration(call: &CallExpression, registry: &str) -> bool {
    let Expression::StaticMemberExpression(member) = &call.callee else {
        return false;
    };
    let Expression::Identifier(object) = &member.object else {
        return false;
    };
    object.name.as_str() == registry
        && TEMPLATE_METHODS.contains(&member.property.name.as_str())
        && call.arguments.len() == 1
}

/// The template text and the span of the literal that carries it.
/// Substitution-free template literals are accepted alongside plain
/// strings; anything dynamic is skipped.
pub(crate) fn template_argument(call: &CallExpression) -> Option<(String, Span)> {
    match call.arguments.first()?.as_expression()? {
        Expression::StringLiteral(lit) => Some((lit.value.to_string(), lit.span)),
        Expression::TemplateLiteral(tpl) if tpl.expressions.is_empty() && tpl.quasis.len() == 1 => {
            let quasi = &tpl.quasis[0];
            let text = quasi
                .value
                .cooked
                .as_ref()
                .unwrap_or(&quasi.value.raw)
                .to_string();
            Some((text, tpl.span))
        }
        _ => None,
    }
}

/// Matches inline HTML template registrations left behind by the
/// template loader and recovers the embedded document.
pub struct InlineTemplateScanner<'t> {
    registry: &'t str,
}

impl<'t> InlineTemplateScanner<'t> {
    pub fn new(registry: &'t str) -> Self {
        Self { registry }
    }

    pub fn scan(&self, doc: &ScannedDocument) -> ScanOutput {
        let mut visitor = TemplateCallVisitor {
            registry: self.registry,
            identifier: doc.identifier,
            source: doc.source,
            lines: doc.lines,
            comments: &doc.program.comments,
            out: ScanOutput::default(),
        };
        visitor.visit_program(doc.program);
        visitor.out
    }
}

struct TemplateCallVisitor<'v> {
    registry: &'v str,
    identifier: &'v str,
    source: &'v str,
    lines: &'v LineIndex,
    comments: &'v [Comment],
    out: ScanOutput,
}

impl<'v, 'a> Visit<'a> for TemplateCallVisitor<'v> {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if is_template_registration(call, self.registry) {
            if let Some((contents, literal_span)) = template_argument(call) {
                // Shrink by one column each side to drop the delimiters.
                let content_span =
                    Span::new(literal_span.start + 1, literal_span.end.saturating_sub(1));
                let range = self.lines.range(self.identifier, content_span);
                let location = range.start.clone();

                self.out.features.inline_documents.push(InlineDocumentFeature {
                    language: "html".to_string(),
                    contents,
                    location,
                    attached_comment: leading_comment_text(
                        self.source,
                        self.comments,
                        call.span.start,
                    ),
                    range,
                    container_language: "js".to_string(),
                    container_range: self.lines.range(self.identifier, call.span),
                });
            }
        }
        walk::walk_call_expression(self, call);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn with_document<F>(source: &str, check: F)
    where
        F: FnOnce(&ScannedDocument),
    {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true).with_jsx(true);
        let ret = Parser::new(&allocator, source, source_type).parse();
        assert!(ret.errors.is_empty(), "test source failed to parse");
        let lines = LineIndex::new(source);
        let doc = ScannedDocument {
            identifier: "file:///chunk.js",
            source,
            lines: &lines,
            program: &ret.program,
        };
        check(&doc);
    }

    fn table_with_module_3() -> ModulePathTable {
        let mut table = ModulePathTable::new();
        table.insert_first(ModuleId::Number(3), "file:///src/three.js".to_string());
        table
    }

    // ─── line index ───────────────────────────────────────────────────────────

    #[test]
    fn test_line_index_locations() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.location(0), SourceLocation { line: 1, column: 1 });
        assert_eq!(index.location(1), SourceLocation { line: 1, column: 2 });
        assert_eq!(index.location(3), SourceLocation { line: 2, column: 1 });
        assert_eq!(index.location(4), SourceLocation { line: 2, column: 2 });
    }

    // ─── require-import scanner ───────────────────────────────────────────────

    #[test]
    fn test_bare_statement_require_is_matched() {
        let table = table_with_module_3();
        with_document("__webpack_require__(3);", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert_eq!(out.features.imports.len(), 1);
            assert!(out.warnings.is_empty());

            let import = &out.features.imports[0];
            assert_eq!(import.kind, JS_IMPORT_KIND);
            assert_eq!(import.target.as_deref(), Some("file:///src/three.js"));
            assert_eq!(import.binding, None);
            assert!(import.synthetic);
            assert_eq!(import.range.start.column, 1);
            assert_eq!(import.callee_range.end.column, 20);
        });
    }

    #[test]
    fn test_declarator_require_captures_binding() {
        let table = table_with_module_3();
        with_document("var three = __webpack_require__(3);", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert_eq!(out.features.imports.len(), 1);
            assert_eq!(out.features.imports[0].binding.as_deref(), Some("three"));
        });
    }

    #[test]
    fn test_assignment_parent_is_not_matched() {
        let table = table_with_module_3();
        with_document("var x; x = __webpack_require__(3);", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert!(out.features.imports.is_empty());
        });
    }

    #[test]
    fn test_call_inside_larger_expression_is_not_matched() {
        let table = table_with_module_3();
        with_document("load(__webpack_require__(3));", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert!(out.features.imports.is_empty());
        });
    }

    #[test]
    fn test_destructured_declarator_is_not_matched() {
        let table = table_with_module_3();
        with_document("var { a } = __webpack_require__(3);", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert!(out.features.imports.is_empty());
        });
    }

    #[test]
    fn test_unresolved_id_warns_and_keeps_feature() {
        let table = ModulePathTable::new();
        with_document("__webpack_require__(9);", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert_eq!(out.features.imports.len(), 1);
            assert_eq!(out.features.imports[0].target, None);
            assert_eq!(out.warnings.len(), 1);
            assert_eq!(out.warnings[0].code, ERR_IMPORT_UNRESOLVED);
            assert!(out.warnings[0].message.contains('9'));
        });
    }

    #[test]
    fn test_non_literal_argument_is_not_addressable() {
        let table = table_with_module_3();
        with_document("var id = 3; __webpack_require__(id);", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert!(out.features.imports.is_empty());
            assert!(out.warnings.is_empty());
        });
    }

    #[test]
    fn test_string_id_resolves() {
        let mut table = ModulePathTable::new();
        table.insert_first(
            ModuleId::Name("./src/lib.js".to_string()),
            "file:///src/lib.js".to_string(),
        );
        with_document("var lib = __webpack_require__(\"./src/lib.js\");", |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert_eq!(out.features.imports.len(), 1);
            assert_eq!(
                out.features.imports[0].target.as_deref(),
                Some("file:///src/lib.js")
            );
        });
    }

    #[test]
    fn test_shadowed_require_name_matches_nothing() {
        let table = table_with_module_3();
        let source = "function __webpack_require__(id) { return id; }\n__webpack_require__(3);";
        with_document(source, |doc| {
            let out = RequireImportScanner::new("__webpack_require__", &table).scan(doc);
            assert!(out.features.imports.is_empty());
        });
    }

    // ─── declared-import scanner ──────────────────────────────────────────────

    #[test]
    fn test_default_import_resolves_relative_specifier() {
        with_document("import widget from './widget.js';", |doc| {
            let out = EsImportScanner.scan(doc);
            assert_eq!(out.features.imports.len(), 1);

            let import = &out.features.imports[0];
            assert_eq!(import.target.as_deref(), Some("file:///widget.js"));
            assert_eq!(import.binding.as_deref(), Some("widget"));
            assert!(!import.synthetic);
        });
    }

    #[test]
    fn test_named_only_import_has_no_binding() {
        with_document("import { a, b } from './pair.js';", |doc| {
            let out = EsImportScanner.scan(doc);
            assert_eq!(out.features.imports.len(), 1);
            assert_eq!(out.features.imports[0].binding, None);
        });
    }

    #[test]
    fn test_bare_package_import_keeps_no_target() {
        with_document("import lodash from 'lodash';", |doc| {
            let out = EsImportScanner.scan(doc);
            assert_eq!(out.features.imports.len(), 1);
            assert_eq!(out.features.imports[0].target, None);
            assert!(out.warnings.is_empty());
        });
    }

    // ─── inline-template scanner ──────────────────────────────────────────────

    #[test]
    fn test_register_with_leading_comment() {
        let source = "/* tpl */\nRegisterHtmlTemplate.register(\"<div>hi</div>\");";
        with_document(source, |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert_eq!(out.features.inline_documents.len(), 1);

            let tpl = &out.features.inline_documents[0];
            assert_eq!(tpl.language, "html");
            assert_eq!(tpl.contents, "<div>hi</div>");
            assert_eq!(tpl.attached_comment.as_deref(), Some("tpl"));
            assert_eq!(tpl.container_language, "js");

            // The content range excludes the surrounding quotes.
            let line = source.lines().nth(1).unwrap();
            let open = line.find('"').unwrap() as u32;
            assert_eq!(tpl.range.start.line, 2);
            assert_eq!(tpl.range.start.column, open + 2);
            let close = line.rfind('"').unwrap() as u32;
            assert_eq!(tpl.range.end.column, close + 1);
        });
    }

    #[test]
    fn test_to_body_single_argument_is_matched() {
        with_document("RegisterHtmlTemplate.toBody(\"<span></span>\");", |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert_eq!(out.features.inline_documents.len(), 1);
            assert!(out.features.inline_documents[0].attached_comment.is_none());
        });
    }

    #[test]
    fn test_arity_mismatch_is_not_matched() {
        with_document("RegisterHtmlTemplate.toBody(a, b);", |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert!(out.features.inline_documents.is_empty());
        });
    }

    #[test]
    fn test_other_members_are_not_matched() {
        with_document("RegisterHtmlTemplate.remove(\"<div></div>\");", |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert!(out.features.inline_documents.is_empty());
        });
    }

    #[test]
    fn test_template_literal_without_substitution() {
        with_document("RegisterHtmlTemplate.register(`<p>static</p>`);", |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert_eq!(out.features.inline_documents.len(), 1);
            assert_eq!(out.features.inline_documents[0].contents, "<p>static</p>");
        });
    }

    #[test]
    fn test_template_literal_with_substitution_is_skipped() {
        with_document("RegisterHtmlTemplate.register(`<p>${x}</p>`);", |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert!(out.features.inline_documents.is_empty());
        });
    }

    // ─── comment collection ───────────────────────────────────────────────────

    #[test]
    fn test_stacked_line_comments_join_with_newlines() {
        let source = "// first\n// second\nRegisterHtmlTemplate.register(\"<i></i>\");";
        with_document(source, |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert_eq!(
                out.features.inline_documents[0].attached_comment.as_deref(),
                Some("first\nsecond")
            );
        });
    }

    #[test]
    fn test_block_comment_gutter_is_stripped() {
        let source = "/**\n * card template\n */\nRegisterHtmlTemplate.register(\"<b></b>\");";
        with_document(source, |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert_eq!(
                out.features.inline_documents[0].attached_comment.as_deref(),
                Some("card template")
            );
        });
    }

    #[test]
    fn test_comment_separated_by_code_does_not_attach() {
        let source = "/* far */\nvar unrelated = 1;\nRegisterHtmlTemplate.register(\"<u></u>\");";
        with_document(source, |doc| {
            let out = InlineTemplateScanner::new(TEMPLATE_REGISTRY).scan(doc);
            assert!(out.features.inline_documents[0].attached_comment.is_none());
        });
    }
}
