//! Per-file text extraction.
//!
//! Each dialect has its own extractor behind the [`Extractor`] trait:
//!
//! - `script`: JS/TS/JSX/TSX via the swc AST
//! - `hybrid`: Vue single-file components (script block + template region)
//! - `markup`: plain HTML via the `tl` DOM
//!
//! Extraction never fails. A file that cannot be parsed produces a
//! `parse-error` warning and no texts, and every call returns its own
//! warnings instead of accumulating them in shared state.

pub mod hybrid;
pub mod markup;
pub mod orchestrator;
pub mod script;


use std::collections::HashSet;
use std::path::Path;

use enum_dispatch::enum_dispatch;

use crate::core::interpolation::Interpolation;
use crate::core::text::ExtractedText;
use crate::core::validity::TextFilter;
use crate::warnings::ExtractionWarning;

pub use hybrid::HybridExtractor;
pub use markup::MarkupExtractor;
pub use orchestrator::{ExtractionResult, Orchestrator};
pub use script::ScriptExtractor;

/// Attributes that never carry user-facing text, in any dialect.
pub const TECHNICAL_ATTRIBUTES: &[&str] = &[
    "className",
    "class",
    "id",
    "key",
    "ref",
    "style",
    "src",
    "href",
    "type",
    "name",
    "htmlFor",
    "for",
    "role",
];

/// Default user-facing attributes for markup dialects.
pub fn default_text_attributes() -> Vec<String> {
    ["title", "alt", "placeholder", "aria-label"]
        .map(String::from)
        .to_vec()
}

/// Everything an extractor needs besides the file itself.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub filter: TextFilter,
    pub interpolation: Interpolation,
    /// Translation wrapper names such as `t`; text inside these calls is never extracted.
    pub wrapper_functions: HashSet<String>,
    /// Extra attributes to skip on top of [`TECHNICAL_ATTRIBUTES`].
    pub skip_attributes: HashSet<String>,
    /// User-facing attributes extracted from markup.
    pub text_attributes: Vec<String>,
}

impl ExtractOptions {
    pub fn new(filter: TextFilter, interpolation: Interpolation) -> Self {
        Self {
            filter,
            interpolation,
            wrapper_functions: HashSet::from(["t".to_string(), "$t".to_string()]),
            skip_attributes: HashSet::new(),
            text_attributes: default_text_attributes(),
        }
    }

    pub fn is_wrapper(&self, name: &str) -> bool {
        self.wrapper_functions.contains(name)
    }

    /// Technical attributes, `data-*`, and configured skips.
    pub fn is_skipped_attribute(&self, name: &str) -> bool {
        TECHNICAL_ATTRIBUTES.contains(&name)
            || name.starts_with("data-")
            || self.skip_attributes.contains(name)
    }

    pub fn is_text_attribute(&self, name: &str) -> bool {
        self.text_attributes
            .iter()
            .any(|attr| attr.eq_ignore_ascii_case(name))
    }
}

/// Texts and warnings from one extraction call.
#[derive(Debug, Default)]
pub struct ExtractionOutput {
    pub texts: Vec<ExtractedText>,
    pub warnings: Vec<ExtractionWarning>,
}

impl ExtractionOutput {
    /// Zero texts and a single warning, for files that could not be processed.
    pub fn failed(warning: ExtractionWarning) -> Self {
        Self {
            texts: Vec::new(),
            warnings: vec![warning],
        }
    }

    pub fn append(&mut self, other: ExtractionOutput) {
        self.texts.extend(other.texts);
        self.warnings.extend(other.warnings);
    }
}

#[enum_dispatch]
pub trait Extractor {
    /// Extract translatable text from one file's content.
    fn extract(&self, content: &str, file: &str, options: &ExtractOptions) -> ExtractionOutput;
}

#[enum_dispatch(Extractor)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyExtractor {
    Script(ScriptExtractor),
    Hybrid(HybridExtractor),
    Markup(MarkupExtractor),
}

impl AnyExtractor {
    /// Pick the extractor for a file by extension.
    pub fn for_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs" | "mts" | "cts" => {
                Some(ScriptExtractor.into())
            }
            "vue" => Some(HybridExtractor.into()),
            "html" | "htm" => Some(MarkupExtractor.into()),
            _ => None,
        }
    }
}

/// True for file extensions some extractor handles.
pub fn is_supported_file(path: &Path) -> bool {
    AnyExtractor::for_path(path).is_some()
}
