use serde::{Deserialize, Serialize};

/// Where a piece of extracted text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextKind {
    PlainString,
    Template,
    MarkupText,
    MarkupAttribute,
}

/// Parameters derived from the expressions embedded in a template or merged
/// markup unit, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContext {
    pub params: Vec<String>,
    /// At least one embedded expression was classified as complex.
    pub complex: bool,
}

/// One occurrence of translatable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    pub text: String,
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
    #[serde(rename = "type")]
    pub kind: TextKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<TextContext>,
}

impl ExtractedText {
    pub fn new(text: impl Into<String>, file: &str, line: usize, column: usize, kind: TextKind) -> Self {
        Self {
            text: text.into(),
            file: file.to_string(),
            line,
            column,
            kind,
            context: None,
        }
    }

    pub fn with_context(mut self, context: TextContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Parameter names recorded for this occurrence, empty for plain text.
    pub fn params(&self) -> &[String] {
        self.context.as_ref().map(|c| c.params.as_slice()).unwrap_or(&[])
    }
}
