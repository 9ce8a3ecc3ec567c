//! Vue single-file component extractor.
//!
//! The file is split into regions instead of being parsed as a whole:
//! `<script>` blocks go through the script extractor with their line numbers
//! shifted into the file, and the `<template>` region is pattern-matched for
//! text between tags and static user-facing attributes. `{{ expr }}` inside
//! text becomes a placeholder, exactly like `${expr}` in a template literal.
//! Bound attributes (`:title`, `v-bind:title`) are left alone.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use swc_common::SourceMap;
use swc_ecma_ast::{Expr, ModuleItem, Stmt};
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax};

use crate::core::complexity::{analyze, check_interpolation_count};
use crate::core::extract::script::extract_script;
use crate::core::extract::{ExtractOptions, ExtractionOutput, Extractor};
use crate::core::parsers::script::parse_script_source;
use crate::core::text::{ExtractedText, TextContext, TextKind};
use crate::utils::{build_line_index, normalize_whitespace, offset_to_line_col};
use crate::warnings::{ExtractionWarning, WarningKind};

static SCRIPT_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script([^>]*)>([\s\S]*?)</script>").unwrap());

static LANG_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"lang\s*=\s*["']?(\w+)"#).unwrap());

static TEMPLATE_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<template[^>]*>").unwrap());

static HTML_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").unwrap());

static TEXT_BETWEEN_TAGS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">([^<>]+)<").unwrap());

static MUSTACHE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([\s\S]*?)\}\}").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[A-Za-z][^<>]*>").unwrap());

/// Static attribute preceded by whitespace, so `:title` and `@click` never match.
static STATIC_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s([A-Za-z][\w\-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HybridExtractor;

impl Extractor for HybridExtractor {
    fn extract(&self, content: &str, file: &str, options: &ExtractOptions) -> ExtractionOutput {
        let line_index = build_line_index(content);
        let mut output = ExtractionOutput::default();

        for caps in SCRIPT_BLOCK_REGEX.captures_iter(content) {
            let (Some(attrs), Some(body)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let line_offset = offset_to_line_col(content, &line_index, body.start()).0 - 1;
            let script = extract_script(
                body.as_str(),
                file,
                script_syntax(attrs.as_str()),
                line_offset,
                options,
            );
            // A broken script block poisons the whole component.
            if script.warnings.iter().any(|w| w.kind == WarningKind::ParseError) {
                return script;
            }
            output.append(script);
        }

        if let Some((start, end)) = template_region(content) {
            let template = blank_comments(&content[start..end]);
            extract_template(&template, start, content, &line_index, file, options, &mut output);
        }

        output.texts.sort_by_key(|t| (t.line, t.column));
        output
    }
}

/// Byte range of the template content: after the first `<template ...>` and
/// before the last `</template>`, so nested `<template v-if>` blocks stay inside.
fn template_region(content: &str) -> Option<(usize, usize)> {
    let open = TEMPLATE_OPEN_REGEX.find(content)?;
    let close = content.rfind("</template>")?;
    (close >= open.end()).then_some((open.end(), close))
}

fn script_syntax(attrs: &str) -> Syntax {
    let lang = LANG_ATTR_REGEX
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());
    match lang.as_deref() {
        Some("ts") => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Replace comments with spaces, keeping newlines so offsets stay valid.
fn blank_comments(template: &str) -> String {
    HTML_COMMENT_REGEX
        .replace_all(template, |caps: &regex::Captures| {
            caps[0]
                .chars()
                .map(|c| match c {
                    '\n' => "\n".to_string(),
                    other => " ".repeat(other.len_utf8()),
                })
                .collect::<String>()
        })
        .into_owned()
}

fn extract_template(
    template: &str,
    base: usize,
    content: &str,
    line_index: &[usize],
    file: &str,
    options: &ExtractOptions,
    output: &mut ExtractionOutput,
) {
    let position = |offset: usize| offset_to_line_col(content, line_index, base + offset);

    for caps in TEXT_BETWEEN_TAGS_REGEX.captures_iter(template) {
        let Some(m) = caps.get(1) else {
            continue;
        };
        let raw = m.as_str();
        if raw.trim().is_empty() {
            continue;
        }

        let unit = interpolate_mustaches(raw, m.start(), file, options, &position);
        let text = normalize_whitespace(&unit.text);
        if !options.filter.is_valid_text(&text) {
            continue;
        }
        let leading = raw.len() - raw.trim_start().len();
        let (line, column) = position(m.start() + leading);
        let mut extracted = ExtractedText::new(text, file, line, column, TextKind::MarkupText);
        if let Some(context) = unit.context {
            extracted = extracted.with_context(context);
        }
        output.texts.push(extracted);
        output.warnings.extend(unit.warnings);
    }

    for tag in TAG_REGEX.find_iter(template) {
        for caps in STATIC_ATTR_REGEX.captures_iter(tag.as_str()) {
            let (Some(name), Some(value)) = (caps.get(1), caps.get(2).or_else(|| caps.get(3))) else {
                continue;
            };
            if !options.is_text_attribute(name.as_str())
                || options.is_skipped_attribute(name.as_str())
            {
                continue;
            }
            let raw = value.as_str();
            if !options.filter.is_valid_text(raw.trim()) {
                continue;
            }
            let leading = raw.len() - raw.trim_start().len();
            let (line, column) = position(tag.start() + value.start() + leading);
            output.texts.push(ExtractedText::new(
                raw.trim(),
                file,
                line,
                column,
                TextKind::MarkupAttribute,
            ));
        }
    }
}

/// Template text with its mustaches turned into placeholders.
struct TemplateUnit {
    text: String,
    context: Option<TextContext>,
    warnings: Vec<ExtractionWarning>,
}

/// Replace every `{{ expr }}` in `raw` (found at template offset `offset`)
/// with a placeholder, naming and classifying each expression the way
/// template literal expressions are.
fn interpolate_mustaches(
    raw: &str,
    offset: usize,
    file: &str,
    options: &ExtractOptions,
    position: &dyn Fn(usize) -> (usize, usize),
) -> TemplateUnit {
    let mut unit = TemplateUnit {
        text: String::with_capacity(raw.len()),
        context: None,
        warnings: Vec::new(),
    };
    let mut context = TextContext::default();
    let mut last = 0;
    let mut count = 0;

    for caps in MUSTACHE_REGEX.captures_iter(raw) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let source = inner.as_str().trim();
        let leading = inner.as_str().len() - inner.as_str().trim_start().len();
        let (line, column) = position(offset + inner.start() + leading);

        let analysis = parse_expression(source, file).map(|expr| analyze(&expr));
        let name = analysis.as_ref().and_then(|a| a.name.clone());
        unit.text.push_str(&raw[last..whole.start()]);
        unit.text.push_str(&options.interpolation.format_placeholder(count, name.as_deref()));
        context.params.push(name.unwrap_or_else(|| count.to_string()));
        match analysis {
            Some(analysis) => {
                context.complex |= analysis.is_complex();
                unit.warnings.extend(analysis.to_warning(file, line, column, Some(source)));
            }
            None => context.complex = true,
        }

        last = whole.end();
        count += 1;
    }
    unit.text.push_str(&raw[last..]);

    if count > 0 {
        let leading = raw.len() - raw.trim_start().len();
        let (line, column) = position(offset + leading);
        unit.warnings.extend(check_interpolation_count(count, file, line, column));
        unit.context = Some(context);
    }
    unit
}

/// Parse a template expression on its own; `None` when it is not valid script.
fn parse_expression(source: &str, file: &str) -> Option<Box<Expr>> {
    let parsed = parse_script_source(
        format!("({});", source),
        file,
        Syntax::Es(EsSyntax::default()),
        Arc::new(SourceMap::default()),
    )
    .ok()?;
    parsed.module.body.into_iter().next().and_then(|item| match item {
        ModuleItem::Stmt(Stmt::Expr(stmt)) => Some(stmt.expr),
        _ => None,
    })
}
