//! Console output for the CLI commands.
//!
//! Every printer has a `_to` variant writing to any [`Write`] so output can be
//! captured in tests. Colors follow `colored`'s environment handling
//! (`NO_COLOR`, `CLICOLOR_FORCE`).

use std::io::{self, Write};

use colored::Colorize;

use crate::core::pipeline::{ExtractionRun, RunSummary};
use crate::utils::truncate_to_width;
use crate::warnings::{ExtractionWarning, Severity, WarningLog};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Maximum number of warnings shown without `-v`.
const MAX_WARNINGS_DISPLAY: usize = 10;

/// Display width of a text preview.
const PREVIEW_WIDTH: usize = 60;

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Print every extracted occurrence, grouped by file.
pub fn print_texts(run: &ExtractionRun) {
    print_texts_to(run, &mut io::stdout().lock());
}

pub fn print_texts_to<W: Write>(run: &ExtractionRun, writer: &mut W) {
    let texts = &run.result.texts;
    if texts.is_empty() {
        let _ = writeln!(
            writer,
            "No translatable text found in {}",
            plural(run.files.len(), "file")
        );
        return;
    }

    let location_width = texts
        .iter()
        .map(|t| format!("{}:{}", t.line, t.column + 1).len())
        .max()
        .unwrap_or(0);

    let mut current_file: Option<&str> = None;
    for text in texts {
        if current_file != Some(text.file.as_str()) {
            let _ = writeln!(writer, "{}", text.file.bold());
            current_file = Some(text.file.as_str());
        }
        let location = format!(
            "{:<width$}",
            format!("{}:{}", text.line, text.column + 1),
            width = location_width
        );
        let _ = writeln!(
            writer,
            "  {}  {}",
            location.dimmed(),
            truncate_to_width(&text.text, PREVIEW_WIDTH)
        );
    }

    let files_with_text = texts
        .iter()
        .map(|t| t.file.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Found {} ({} unique) in {} of {}",
            plural(texts.len(), "text"),
            run.unique.len(),
            files_with_text,
            plural(run.files.len(), "file")
        )
        .green()
    );
}

/// Print warnings cargo-style to stderr.
pub fn print_warnings(warnings: &[ExtractionWarning], verbose: bool) {
    print_warnings_to(warnings, verbose, &mut io::stderr().lock());
}

pub fn print_warnings_to<W: Write>(warnings: &[ExtractionWarning], verbose: bool, writer: &mut W) {
    if warnings.is_empty() {
        return;
    }

    let shown = if verbose {
        warnings.len()
    } else {
        warnings.len().min(MAX_WARNINGS_DISPLAY)
    };
    for warning in &warnings[..shown] {
        print_warning(warning, writer);
    }

    let hidden = warnings.len() - shown;
    if hidden > 0 {
        let _ = writeln!(
            writer,
            "... and {} more (use {} to show all)",
            plural(hidden, "warning"),
            "-v".cyan()
        );
    }

    let summary = WarningLog::from_warnings(warnings).summary;
    let _ = writeln!(
        writer,
        "{} {}: {} error, {} warning, {} info",
        "warning:".bold().yellow(),
        plural(summary.total, "diagnostic"),
        summary.count(Severity::Error),
        summary.count(Severity::Warning),
        summary.count(Severity::Info)
    );
}

fn print_warning<W: Write>(warning: &ExtractionWarning, writer: &mut W) {
    let severity = match warning.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().blue(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity,
        warning.message,
        warning.kind.to_string().dimmed().cyan()
    );
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        warning.file,
        warning.line,
        warning.column + 1
    );
    if let Some(code) = &warning.code {
        let _ = writeln!(
            writer,
            "   {} {} {}",
            "=".blue(),
            "code:".bold(),
            truncate_to_width(code, PREVIEW_WIDTH)
        );
    }
    if let Some(suggestion) = &warning.suggestion {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "help:".bold(), suggestion);
    }
}

/// Print the outcome of a full run.
pub fn print_run_summary(summary: &RunSummary) {
    print_run_summary_to(summary, &mut io::stdout().lock());
}

pub fn print_run_summary_to<W: Write>(summary: &RunSummary, writer: &mut W) {
    if summary.dry_run {
        let _ = writeln!(
            writer,
            "{} dry run, no files were written",
            "note:".bold().cyan()
        );
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} ({} unique) from {}",
            plural(summary.total_texts, "text"),
            summary.unique_texts,
            plural(summary.files_scanned, "file")
        )
        .green()
    );

    if summary.unique_texts == 0 {
        return;
    }

    let _ = writeln!(
        writer,
        "  keys: {} new, {} reused",
        summary.new_keys, summary.reused_keys
    );

    let language_width = summary
        .languages
        .iter()
        .map(|l| l.language.len())
        .max()
        .unwrap_or(0);
    for language in &summary.languages {
        let _ = writeln!(
            writer,
            "  {:<width$}  {} {} (+{})  {}",
            language.language,
            language.total,
            if language.total == 1 { "entry" } else { "entries" },
            language.added,
            language.path.display().to_string().dimmed(),
            width = language_width
        );
        if let Some(patch) = &language.patch_path {
            let _ = writeln!(
                writer,
                "  {:<width$}  patch {}",
                "",
                patch.display().to_string().dimmed(),
                width = language_width
            );
        }
    }

    if !summary.dry_run {
        let _ = writeln!(
            writer,
            "  warnings: {}",
            summary.warnings_path.display().to_string().dimmed()
        );
        let _ = writeln!(
            writer,
            "  report: {}",
            summary.report_path.display().to_string().dimmed()
        );
    }
}
