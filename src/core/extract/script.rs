//! Script extractor for JS/TS/JSX/TSX.
//!
//! Walks the swc AST once and collects:
//! - string literals (`plain-string`)
//! - template literals with placeholders (`template`)
//! - JSX text, merged with adjacent `{expr}` children into one unit (`markup-text`)
//! - user-facing JSX attribute strings (`markup-attribute`)
//!
//! Import/export sources, `require()`/`import()` arguments, property keys,
//! TypeScript types, tagged templates, log calls, technical attributes, and
//! anything inside a translation wrapper call are never visited.

use std::sync::Arc;

use swc_common::errors::SourceMapper;
use swc_common::{BytePos, SourceMap, Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, ExportAll, Expr, ImportDecl, JSXAttr, JSXAttrName, JSXAttrValue, JSXElement,
    JSXElementChild, JSXElementName, JSXExpr, JSXExprContainer, JSXFragment, JSXText, Lit,
    MemberExpr, MemberProp, Module, ModuleExportName, NamedExport, PropName, Str, TaggedTpl, Tpl,
    TsEnumMemberId, TsImportEqualsDecl, TsModuleName, TsType, TsTypeAnn,
};
use swc_ecma_parser::Syntax;
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::complexity::{analyze, check_interpolation_count};
use crate::core::extract::{ExtractOptions, ExtractionOutput, Extractor};
use crate::core::parsers::script::{parse_script_source, syntax_for_path};
use crate::core::text::{ExtractedText, TextContext, TextKind};
use crate::utils::is_cjk_ideograph;
use crate::warnings::ExtractionWarning;

/// Objects whose method calls are logging.
const LOG_OBJECTS: &[&str] = &["console", "logger"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptExtractor;

impl Extractor for ScriptExtractor {
    fn extract(&self, content: &str, file: &str, options: &ExtractOptions) -> ExtractionOutput {
        extract_script(content, file, syntax_for_path(file), 0, options)
    }
}

/// Extract from script source whose first line is line `line_offset + 1` of `file`.
pub(crate) fn extract_script(
    content: &str,
    file: &str,
    syntax: Syntax,
    line_offset: usize,
    options: &ExtractOptions,
) -> ExtractionOutput {
    let source_map = Arc::new(SourceMap::default());
    match parse_script_source(content.to_string(), file, syntax, source_map) {
        Ok(parsed) => {
            ScriptVisitor::new(file, &parsed.source_map, options, line_offset).extract(&parsed.module)
        }
        Err(err) => {
            let mut warning = ExtractionWarning::parse_error(file, err);
            warning.line += line_offset;
            ExtractionOutput::failed(warning)
        }
    }
}

/// Placeholders, parameter context, and warnings for the expressions of one unit.
struct Interpolated {
    placeholders: Vec<String>,
    context: TextContext,
    warnings: Vec<ExtractionWarning>,
}

struct ScriptVisitor<'a> {
    file: &'a str,
    source_map: &'a SourceMap,
    options: &'a ExtractOptions,
    /// Added to every line, for script blocks embedded in other files.
    line_offset: usize,
    output: ExtractionOutput,
}

impl<'a> ScriptVisitor<'a> {
    fn new(
        file: &'a str,
        source_map: &'a SourceMap,
        options: &'a ExtractOptions,
        line_offset: usize,
    ) -> Self {
        Self {
            file,
            source_map,
            options,
            line_offset,
            output: ExtractionOutput::default(),
        }
    }

    fn extract(mut self, module: &Module) -> ExtractionOutput {
        self.visit_module(module);
        // Nested elements are visited before the runs around them are merged.
        self.output.texts.sort_by_key(|t| (t.line, t.column));
        self.output.warnings.sort_by_key(|w| (w.line, w.column));
        self.output
    }

    /// (1-based line, 0-based char column) in the host file.
    fn position(&self, pos: BytePos) -> (usize, usize) {
        let loc = self.source_map.lookup_char_pos(pos);
        (loc.line + self.line_offset, loc.col.0)
    }

    fn snippet(&self, span: Span) -> Option<String> {
        self.source_map.span_to_snippet(span).ok()
    }

    /// Record `text` if it passes the validity filter. Returns whether it was recorded.
    fn push_text(
        &mut self,
        text: &str,
        pos: BytePos,
        kind: TextKind,
        context: Option<TextContext>,
    ) -> bool {
        let text = text.trim();
        if !self.options.filter.is_valid_text(text) {
            return false;
        }
        let (line, column) = self.position(pos);
        let mut extracted = ExtractedText::new(text, self.file, line, column, kind);
        if let Some(context) = context {
            extracted = extracted.with_context(context);
        }
        self.output.texts.push(extracted);
        true
    }

    fn interpolate(&self, exprs: &[&Expr], unit_pos: BytePos) -> Interpolated {
        let mut interpolated = Interpolated {
            placeholders: Vec::with_capacity(exprs.len()),
            context: TextContext::default(),
            warnings: Vec::new(),
        };

        for (index, expr) in exprs.iter().enumerate() {
            let analysis = analyze(expr);
            interpolated.placeholders.push(
                self.options
                    .interpolation
                    .format_placeholder(index, analysis.name.as_deref()),
            );
            interpolated
                .context
                .params
                .push(analysis.name.clone().unwrap_or_else(|| index.to_string()));
            interpolated.context.complex |= analysis.is_complex();

            let (line, column) = self.position(expr.span().lo);
            if let Some(warning) =
                analysis.to_warning(self.file, line, column, self.snippet(expr.span()).as_deref())
            {
                interpolated.warnings.push(warning);
            }
        }

        let (line, column) = self.position(unit_pos);
        if let Some(warning) = check_interpolation_count(exprs.len(), self.file, line, column) {
            interpolated.warnings.push(warning);
        }
        interpolated
    }

    fn extract_jsx_children(&mut self, children: &[JSXElementChild]) {
        let mut run: Vec<&JSXElementChild> = Vec::new();
        for child in children {
            match child {
                JSXElementChild::JSXText(_) | JSXElementChild::JSXExprContainer(_) => run.push(child),
                _ => {
                    self.extract_jsx_run(&run);
                    run.clear();
                    child.visit_with(self);
                }
            }
        }
        self.extract_jsx_run(&run);
    }

    /// Handle a run of adjacent text and `{expr}` children.
    ///
    /// Text mixed with expressions becomes one unit with placeholders. Runs that
    /// already contain a wrapper call, or whose merged text is not valid, fall
    /// back to extracting each text on its own.
    fn extract_jsx_run(&mut self, run: &[&JSXElementChild]) {
        if run.is_empty() {
            return;
        }

        let exprs: Vec<&Expr> = run
            .iter()
            .filter_map(|child| match child {
                JSXElementChild::JSXExprContainer(JSXExprContainer {
                    expr: JSXExpr::Expr(expr),
                    ..
                }) if string_literal(expr).is_none() => Some(&**expr),
                _ => None,
            })
            .collect();

        let has_valid_text = run.iter().any(|child| {
            matches!(child, JSXElementChild::JSXText(text)
                if self.options.filter.is_valid_text(text.value.trim()))
        });

        if has_valid_text
            && !exprs.is_empty()
            && !exprs.iter().any(|expr| contains_wrapper_call(expr, self.options))
            && self.merge_jsx_run(run, &exprs)
        {
            for expr in exprs {
                expr.visit_with(self);
            }
            return;
        }

        for child in run {
            match child {
                JSXElementChild::JSXText(text) => self.extract_jsx_text(text),
                JSXElementChild::JSXExprContainer(container) => container.visit_with(self),
                _ => {}
            }
        }
    }

    fn merge_jsx_run(&mut self, run: &[&JSXElementChild], exprs: &[&Expr]) -> bool {
        let mut start: Option<BytePos> = None;
        let mut text = String::new();

        for child in run {
            match child {
                JSXElementChild::JSXText(node) => {
                    let cleaned = clean_jsx_text(&node.value);
                    if start.is_none() && !cleaned.trim().is_empty() {
                        start = Some(node.span.lo + leading_whitespace(&node.value));
                    }
                    text.push_str(&cleaned);
                }
                JSXElementChild::JSXExprContainer(JSXExprContainer {
                    expr: JSXExpr::Expr(expr),
                    span,
                    ..
                }) => {
                    start.get_or_insert(span.lo);
                    match string_literal(expr) {
                        Some(literal) => text.push_str(literal),
                        None => text.push_str(PLACEHOLDER_MARK),
                    }
                }
                _ => {}
            }
        }

        let Some(start) = start else {
            return false;
        };
        let interpolated = self.interpolate(exprs, start);
        let mut placeholders = interpolated.placeholders.iter();
        let text = text
            .split(PLACEHOLDER_MARK)
            .enumerate()
            .fold(String::new(), |mut acc, (i, segment)| {
                if i > 0 && let Some(placeholder) = placeholders.next() {
                    acc.push_str(placeholder);
                }
                acc.push_str(segment);
                acc
            });

        if self.push_text(&text, start, TextKind::MarkupText, Some(interpolated.context)) {
            self.output.warnings.extend(interpolated.warnings);
            true
        } else {
            false
        }
    }

    fn extract_jsx_text(&mut self, node: &JSXText) {
        let cleaned = clean_jsx_text(&node.value);
        if cleaned.trim().is_empty() {
            return;
        }
        let pos = node.span.lo + leading_whitespace(&node.value);
        self.push_text(&cleaned, pos, TextKind::MarkupText, None);
    }
}

/// Stands in for a placeholder while a merged JSX run is assembled.
const PLACEHOLDER_MARK: &str = "\u{0}";

impl<'a> Visit for ScriptVisitor<'a> {
    fn visit_import_decl(&mut self, _: &ImportDecl) {}

    fn visit_export_all(&mut self, _: &ExportAll) {}

    fn visit_named_export(&mut self, _: &NamedExport) {}

    fn visit_module_export_name(&mut self, _: &ModuleExportName) {}

    fn visit_ts_import_equals_decl(&mut self, _: &TsImportEqualsDecl) {}

    fn visit_ts_module_name(&mut self, _: &TsModuleName) {}

    fn visit_ts_enum_member_id(&mut self, _: &TsEnumMemberId) {}

    fn visit_ts_type(&mut self, _: &TsType) {}

    fn visit_ts_type_ann(&mut self, _: &TsTypeAnn) {}

    fn visit_tagged_tpl(&mut self, _: &TaggedTpl) {}

    fn visit_prop_name(&mut self, node: &PropName) {
        if let PropName::Computed(computed) = node {
            computed.visit_with(self);
        }
    }

    fn visit_member_expr(&mut self, node: &MemberExpr) {
        node.obj.visit_with(self);
        if let MemberProp::Computed(computed) = &node.prop
            && string_literal(&computed.expr).is_none()
        {
            computed.visit_with(self);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if is_wrapper_call(&node.callee, self.options) || is_ignored_call(&node.callee) {
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_str(&mut self, node: &Str) {
        if let Some(value) = node.value.as_str() {
            self.push_text(value, node.span.lo, TextKind::PlainString, None);
        }
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        let exprs: Vec<&Expr> = node.exprs.iter().map(|e| &**e).collect();
        let interpolated = self.interpolate(&exprs, node.span.lo);

        let mut text = String::new();
        for (i, quasi) in node.quasis.iter().enumerate() {
            let mut segment = quasi
                .cooked
                .as_ref()
                .and_then(|cooked| cooked.as_str())
                .unwrap_or(&*quasi.raw);
            if i > 0 && starts_with_padded_cjk(segment) {
                segment = segment.trim_start();
            }
            if i < exprs.len() && ends_with_padded_cjk(segment) {
                segment = segment.trim_end();
            }
            text.push_str(segment);
            if let Some(placeholder) = interpolated.placeholders.get(i) {
                text.push_str(placeholder);
            }
        }

        let context = (!exprs.is_empty()).then(|| interpolated.context.clone());
        if self.push_text(&text, node.span.lo, TextKind::Template, context) {
            self.output.warnings.extend(interpolated.warnings);
        }

        for expr in &node.exprs {
            expr.visit_with(self);
        }
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        node.opening.visit_with(self);

        if let JSXElementName::Ident(ident) = &node.opening.name
            && matches!(ident.sym.as_str(), "style" | "script")
        {
            return;
        }

        self.extract_jsx_children(&node.children);
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        self.extract_jsx_children(&node.children);
    }

    fn visit_jsx_text(&mut self, _: &JSXText) {}

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        if let JSXExpr::Expr(expr) = &node.expr
            && let Expr::Lit(Lit::Str(s)) = &**expr
        {
            if let Some(value) = s.value.as_str() {
                self.push_text(value, s.span.lo, TextKind::MarkupText, None);
            }
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let attr_name = match &node.name {
            JSXAttrName::Ident(ident) => ident.sym.to_string(),
            JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
        };
        if self.options.is_skipped_attribute(&attr_name) {
            return;
        }

        match &node.value {
            Some(JSXAttrValue::Str(s)) => {
                if let Some(value) = s.value.as_str() {
                    self.push_text(value, s.span.lo, TextKind::MarkupAttribute, None);
                }
            }
            Some(JSXAttrValue::JSXExprContainer(container)) => {
                if let JSXExpr::Expr(expr) = &container.expr {
                    match &**expr {
                        Expr::Lit(Lit::Str(s)) => {
                            if let Some(value) = s.value.as_str() {
                                self.push_text(value, s.span.lo, TextKind::MarkupAttribute, None);
                            }
                        }
                        other => other.visit_with(self),
                    }
                }
            }
            Some(other) => other.visit_with(self),
            None => {}
        }
    }
}

/// Wrapper calls: `t(...)`, `i18n.t(...)`, `this.$t(...)`, or any configured name.
fn is_wrapper_call(callee: &Callee, options: &ExtractOptions) -> bool {
    let Callee::Expr(expr) = callee else {
        return false;
    };
    match &**expr {
        Expr::Ident(ident) => options.is_wrapper(ident.sym.as_str()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => {
                options.is_wrapper(prop.sym.as_str())
                    || member_path(member).is_some_and(|path| options.is_wrapper(&path))
            }
            _ => false,
        },
        _ => false,
    }
}

/// `require()`, dynamic `import()`, `debug()`, and log calls such as
/// `console.log`, `this.logger.info` or `window.console.warn`.
fn is_ignored_call(callee: &Callee) -> bool {
    match callee {
        Callee::Import(_) => true,
        Callee::Expr(expr) => match &**expr {
            Expr::Ident(ident) => matches!(ident.sym.as_str(), "require" | "debug"),
            Expr::Member(member) => is_log_object(&member.obj),
            _ => false,
        },
        _ => false,
    }
}

/// The object of a method call names a logger, as an identifier or as the
/// last property of a member chain.
fn is_log_object(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(ident) => LOG_OBJECTS.contains(&ident.sym.as_str()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => LOG_OBJECTS.contains(&prop.sym.as_str()),
            _ => false,
        },
        _ => false,
    }
}

/// Dotted path of a static member chain: `i18n.t`, `this.$t`.
fn member_path(member: &MemberExpr) -> Option<String> {
    let MemberProp::Ident(prop) = &member.prop else {
        return None;
    };
    let object = match &*member.obj {
        Expr::Ident(ident) => ident.sym.to_string(),
        Expr::This(_) => "this".to_string(),
        Expr::Member(inner) => member_path(inner)?,
        _ => return None,
    };
    Some(format!("{}.{}", object, prop.sym))
}

struct WrapperCallFinder<'a> {
    options: &'a ExtractOptions,
    found: bool,
}

impl<'a> Visit for WrapperCallFinder<'a> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if is_wrapper_call(&node.callee, self.options) {
            self.found = true;
            return;
        }
        node.visit_children_with(self);
    }
}

fn contains_wrapper_call(expr: &Expr, options: &ExtractOptions) -> bool {
    let mut finder = WrapperCallFinder {
        options,
        found: false,
    };
    expr.visit_with(&mut finder);
    finder.found
}

fn string_literal(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str(),
        _ => None,
    }
}

/// Normalize JSX text the way JSX renders it: lines are trimmed, blank lines
/// dropped, and the rest joined by single spaces. Text without a newline is
/// kept as written so spacing next to expressions survives.
pub(crate) fn clean_jsx_text(raw: &str) -> String {
    if !raw.contains('\n') {
        return raw.to_string();
    }
    let lines: Vec<&str> = raw.split('\n').collect();
    let last = lines.len() - 1;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let line = if i == 0 { *line } else { line.trim_start() };
            if i == last { line } else { line.trim_end() }
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn leading_whitespace(raw: &str) -> BytePos {
    BytePos((raw.len() - raw.trim_start().len()) as u32)
}

/// `"欢迎 "`: whitespace after a CJK character, before a placeholder.
fn ends_with_padded_cjk(segment: &str) -> bool {
    segment.ends_with(char::is_whitespace)
        && segment
            .trim_end()
            .chars()
            .next_back()
            .is_some_and(is_cjk_ideograph)
}

/// `" 条"`: whitespace after a placeholder, before a CJK character.
fn starts_with_padded_cjk(segment: &str) -> bool {
    segment.starts_with(char::is_whitespace)
        && segment
            .trim_start()
            .chars()
            .next()
            .is_some_and(is_cjk_ideograph)
}
