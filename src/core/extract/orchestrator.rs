//! Dispatches files to the extractor for their dialect and merges the results.

use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::core::extract::{AnyExtractor, ExtractOptions, ExtractionOutput, Extractor};
use crate::core::text::ExtractedText;
use crate::warnings::{ExtractionWarning, Severity, WarningKind};

/// Aggregated result of extracting a set of files.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    /// All occurrences, grouped by file in path order, then by position.
    pub texts: Vec<ExtractedText>,
    pub warnings: Vec<ExtractionWarning>,
    pub files_processed: usize,
}

impl ExtractionResult {
    pub fn has_errors(&self) -> bool {
        self.warnings.iter().any(|w| w.severity == Severity::Error)
    }
}

pub struct Orchestrator {
    options: ExtractOptions,
}

impl Orchestrator {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract from in-memory content. `file` picks the dialect and is used as
    /// the reported path.
    pub fn extract_content(&self, file: &str, content: &str) -> ExtractionOutput {
        match AnyExtractor::for_path(Path::new(file)) {
            Some(extractor) => extractor.extract(content, file, &self.options),
            None => ExtractionOutput::failed(ExtractionWarning::new(
                WarningKind::UnsupportedFile,
                Severity::Info,
                "No extractor for this file type",
                file,
                1,
                0,
            )),
        }
    }

    /// Read `root/file` and extract from it. Read failures become warnings.
    pub fn extract_file(&self, root: &Path, file: &str) -> ExtractionOutput {
        match fs::read_to_string(root.join(file)) {
            Ok(content) => self.extract_content(file, &content),
            Err(err) => ExtractionOutput::failed(ExtractionWarning::new(
                WarningKind::ParseError,
                Severity::Error,
                format!("Failed to read file: {}", err),
                file,
                1,
                0,
            )),
        }
    }

    /// Extract every file in parallel; output order follows the sorted file list.
    pub fn extract_files(&self, root: &Path, files: &[String]) -> ExtractionResult {
        let mut sorted: Vec<&String> = files.iter().collect();
        sorted.sort();

        let outputs: Vec<ExtractionOutput> = sorted
            .par_iter()
            .map(|file| self.extract_file(root, file))
            .collect();

        let mut result = ExtractionResult {
            files_processed: sorted.len(),
            ..Default::default()
        };
        for output in outputs {
            result.texts.extend(output.texts);
            result.warnings.extend(output.warnings);
        }
        result
    }
}
