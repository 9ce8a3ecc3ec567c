//! Plain HTML extractor.
//!
//! Walks the `tl` DOM and collects text nodes plus the configured
//! user-facing attributes. Content of non-rendering and code-like elements
//! is skipped entirely.

use tl::{Bytes, HTMLTag, Node, NodeHandle, Parser};

use crate::core::extract::{ExtractOptions, ExtractionOutput, Extractor};
use crate::core::parsers::markup::{decode_text, parse_markup, source_offset};
use crate::core::text::{ExtractedText, TextKind};
use crate::utils::{build_line_index, normalize_whitespace, offset_to_line_col};
use crate::warnings::ExtractionWarning;

/// Elements whose content is never user-facing text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "code", "pre"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkupExtractor;

impl Extractor for MarkupExtractor {
    fn extract(&self, content: &str, file: &str, options: &ExtractOptions) -> ExtractionOutput {
        let dom = match parse_markup(content) {
            Ok(dom) => dom,
            Err(err) => {
                return ExtractionOutput::failed(ExtractionWarning::parse_error(
                    file,
                    format!("{:#}", err),
                ));
            }
        };
        let mut walker = MarkupWalker {
            content,
            parser: dom.parser(),
            line_index: build_line_index(content),
            file,
            options,
            output: ExtractionOutput::default(),
        };
        walker.walk(dom.children());

        let mut output = walker.output;
        // Attributes come out of a hash map.
        output.texts.sort_by_key(|t| (t.line, t.column));
        output
    }
}

struct MarkupWalker<'a, 'p> {
    content: &'a str,
    parser: &'p Parser<'a>,
    line_index: Vec<usize>,
    file: &'a str,
    options: &'a ExtractOptions,
    output: ExtractionOutput,
}

impl<'a, 'p> MarkupWalker<'a, 'p> {
    fn walk<'h>(&mut self, handles: impl IntoIterator<Item = &'h NodeHandle>) {
        for handle in handles {
            match handle.get(self.parser) {
                Some(Node::Tag(tag)) => self.visit_element(tag),
                Some(Node::Raw(text)) => self.visit_text(text),
                Some(Node::Comment(_)) | None => {}
            }
        }
    }

    fn visit_text(&mut self, text: &Bytes<'a>) {
        let Some(raw) = text.try_as_utf8_str() else {
            return;
        };
        let Some(offset) = source_offset(self.content, raw.as_bytes()) else {
            return;
        };
        let leading = raw.len() - raw.trim_start().len();
        self.push(&normalize_whitespace(&decode_text(raw)), offset + leading, TextKind::MarkupText);
    }

    fn visit_element(&mut self, element: &HTMLTag<'a>) {
        for (name, value) in element.attributes().iter() {
            let Some(value) = value else {
                continue;
            };
            if !self.options.is_text_attribute(&name) || self.options.is_skipped_attribute(&name) {
                continue;
            }
            let Some(offset) = source_offset(self.content, value.as_bytes()) else {
                continue;
            };
            let leading = value.len() - value.trim_start().len();
            self.push(decode_text(&value).trim(), offset + leading, TextKind::MarkupAttribute);
        }

        let name = element.name().as_utf8_str().to_ascii_lowercase();
        if !SKIPPED_ELEMENTS.contains(&name.as_str()) {
            self.walk(element.children().top().iter());
        }
    }

    fn push(&mut self, text: &str, offset: usize, kind: TextKind) {
        if text.is_empty() || !self.options.filter.is_valid_text(text) {
            return;
        }
        let (line, column) = offset_to_line_col(self.content, &self.line_index, offset);
        self.output
            .texts
            .push(ExtractedText::new(text, self.file, line, column, kind));
    }
}
