//! Warning types produced while extracting and translating text.
//!
//! Warnings never abort a run. Each extraction call returns its own list, the
//! pipeline aggregates them, and the CLI both prints a preview and persists the
//! full set as a warning log.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ============================================================
// Severity and Kind
// ============================================================

/// Severity level of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What an extraction or translation warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    ComplexExpression,
    NestedTemplate,
    ConditionalExpression,
    FunctionCall,
    TooManyInterpolations,
    BinaryExpression,
    ParseError,
    TranslationFailed,
    UnsupportedFile,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningKind::ComplexExpression => "complex-expression",
            WarningKind::NestedTemplate => "nested-template",
            WarningKind::ConditionalExpression => "conditional-expression",
            WarningKind::FunctionCall => "function-call",
            WarningKind::TooManyInterpolations => "too-many-interpolations",
            WarningKind::BinaryExpression => "binary-expression",
            WarningKind::ParseError => "parse-error",
            WarningKind::TranslationFailed => "translation-failed",
            WarningKind::UnsupportedFile => "unsupported-file",
        };
        f.write_str(name)
    }
}

// ============================================================
// Warning record
// ============================================================

/// A non-fatal signal about an extraction decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
    /// Source snippet of the offending expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ExtractionWarning {
    pub fn new(
        kind: WarningKind,
        severity: Severity,
        message: impl Into<String>,
        file: &str,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            file: file.to_string(),
            line,
            column,
            code: None,
            suggestion: None,
        }
    }

    /// A file that could not be parsed. Always severity error, reported at 1:0
    /// unless the parser gave a better position.
    pub fn parse_error(file: &str, error: impl fmt::Display) -> Self {
        Self::new(
            WarningKind::ParseError,
            Severity::Error,
            format!("Failed to parse file: {}", error),
            file,
            1,
            0,
        )
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

// ============================================================
// Warning log
// ============================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningSummary {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_type: BTreeMap<WarningKind, usize>,
}

impl WarningSummary {
    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}

/// Persisted form of all warnings of one run.
///
/// Files are keyed by path in sorted order so the log is stable between runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WarningLog {
    pub summary: WarningSummary,
    pub files: BTreeMap<String, Vec<ExtractionWarning>>,
}

impl WarningLog {
    pub fn from_warnings<'a>(warnings: impl IntoIterator<Item = &'a ExtractionWarning>) -> Self {
        let mut log = WarningLog::default();
        for warning in warnings {
            log.summary.total += 1;
            *log.summary.by_severity.entry(warning.severity).or_default() += 1;
            *log.summary.by_type.entry(warning.kind).or_default() += 1;
            log.files
                .entry(warning.file.clone())
                .or_default()
                .push(warning.clone());
        }
        log
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total == 0
    }

    /// Write the log as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize warnings")?;
        fs::write(path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }
}
