//! End-to-end run: scan, extract, dedupe, translate, key, write catalogs.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::core::catalog::{Catalog, CatalogStore};
use crate::core::extract::{ExtractionResult, Orchestrator};
use crate::core::file_scanner::scan_files;
use crate::core::keys::{KeyGenerator, KeyRegistry, KeyRequest, KeyStrategy};
use crate::core::text::ExtractedText;
use crate::core::translate::{TranslationManager, Translator};
use crate::warnings::{ExtractionWarning, WarningLog};

pub const WARNINGS_FILE_NAME: &str = "warnings.json";
pub const REPORT_FILE_NAME: &str = "extraction-report.json";

/// Scanned files plus everything extracted from them.
#[derive(Debug)]
pub struct ExtractionRun {
    pub files: Vec<String>,
    pub result: ExtractionResult,
    /// First occurrence of each distinct text, in extraction order.
    pub unique: Vec<ExtractedText>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_files: usize,
    pub total_texts: usize,
    pub unique_texts: usize,
}

/// Contents of `extraction-report.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport<'a> {
    pub summary: ReportSummary,
    pub by_file: BTreeMap<&'a str, Vec<&'a ExtractedText>>,
}

impl ExtractionRun {
    pub fn report(&self) -> ExtractionReport<'_> {
        let mut by_file: BTreeMap<&str, Vec<&ExtractedText>> = BTreeMap::new();
        for text in &self.result.texts {
            by_file.entry(text.file.as_str()).or_default().push(text);
        }
        ExtractionReport {
            summary: ReportSummary {
                total_files: by_file.len(),
                total_texts: self.result.texts.len(),
                unique_texts: self.unique.len(),
            },
            by_file,
        }
    }
}

/// Per-language outcome of a run.
#[derive(Debug)]
pub struct LanguageSummary {
    pub language: String,
    pub path: PathBuf,
    /// Entries in the full catalog after the merge.
    pub total: usize,
    /// Keys this run added.
    pub added: usize,
    pub patch_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub total_texts: usize,
    pub unique_texts: usize,
    pub new_keys: usize,
    pub reused_keys: usize,
    pub languages: Vec<LanguageSummary>,
    /// Extraction and translation warnings together.
    pub warnings: Vec<ExtractionWarning>,
    pub warnings_path: PathBuf,
    pub report_path: PathBuf,
    pub dry_run: bool,
}

pub struct Pipeline<'a> {
    config: &'a Config,
    root: PathBuf,
    verbose: bool,
    key_strategy: Option<Arc<dyn KeyStrategy>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            verbose: false,
            key_strategy: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_key_strategy(mut self, strategy: Arc<dyn KeyStrategy>) -> Self {
        self.key_strategy = Some(strategy);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store(&self) -> CatalogStore {
        CatalogStore::new(
            self.root.join(&self.config.output_dir),
            self.root.join(&self.config.patch_dir),
        )
    }

    /// Scan the source root and extract every supported file.
    pub fn extract(&self) -> Result<ExtractionRun> {
        let options = self.config.extract_options()?;
        let scan = scan_files(
            &self.root,
            &self.config.includes,
            &self.config.excludes,
            self.verbose,
        );
        if self.verbose {
            eprintln!(
                "Scanned {} files ({} skipped)",
                scan.files.len(),
                scan.skipped_count
            );
        }

        let result = Orchestrator::new(options).extract_files(&self.root, &scan.files);
        let unique = dedupe(&result.texts);
        Ok(ExtractionRun {
            files: scan.files,
            result,
            unique,
        })
    }

    /// Full run. With `dry_run`, nothing is written.
    pub fn run(&self, translator: Box<dyn Translator>, dry_run: bool) -> Result<RunSummary> {
        let run = self.extract()?;
        let store = self.store();
        let mut warnings = run.result.warnings.clone();

        let manager = TranslationManager::new(
            translator,
            self.config.interpolation()?,
            &self.config.source_language,
        );
        let mut translations: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        if !run.unique.is_empty() {
            for target in &self.config.target_languages {
                let outcome = manager.translate_all(&run.unique, target);
                warnings.extend(outcome.warnings);
                translations.insert(target.as_str(), outcome.translations);
            }
        }

        let source_language = self.config.source_language.as_str();
        let mut registry = KeyRegistry::from_catalog(&store.load(source_language)?);
        let mut generator = KeyGenerator::new(self.config.key_config(), self.config.interpolation()?);
        if let Some(strategy) = &self.key_strategy {
            generator = generator.with_strategy(Arc::clone(strategy));
        }
        let key_translations = self
            .config
            .key_language()
            .and_then(|lang| translations.get(lang));

        let mut catalogs: Vec<(&str, Catalog)> = std::iter::once(source_language)
            .chain(self.config.target_languages.iter().map(String::as_str))
            .map(|lang| (lang, Catalog::default()))
            .collect();
        let mut new_keys = 0;
        let mut reused_keys = 0;

        for (index, text) in run.unique.iter().enumerate() {
            if registry.key_for(&text.text).is_some() {
                reused_keys += 1;
            } else {
                new_keys += 1;
            }
            let key = generator.assign(
                &mut registry,
                KeyRequest {
                    source_text: &text.text,
                    file: &text.file,
                    translated_text: key_translations.map(|t| t[index].as_str()),
                    params: text.params(),
                },
            );

            for (lang, catalog) in catalogs.iter_mut() {
                let value = match translations.get(*lang) {
                    Some(translated) if *lang != source_language => translated[index].as_str(),
                    _ => text.text.as_str(),
                };
                catalog.insert(&key, value);
            }
        }

        let mut languages = Vec::new();
        let mut seen = HashSet::new();
        for (lang, entries) in &catalogs {
            if !seen.insert(*lang) {
                continue;
            }
            let merged = store.merge(lang, entries)?;
            let patch_path = if dry_run || run.unique.is_empty() {
                None
            } else {
                store.write(lang, &merged.full)?;
                store.write_patch(lang, &merged.patch)?
            };
            languages.push(LanguageSummary {
                language: lang.to_string(),
                path: store.catalog_path(lang),
                total: merged.full.len(),
                added: merged.patch.len(),
                patch_path,
            });
        }

        let output_dir = self.root.join(&self.config.output_dir);
        let warnings_path = output_dir.join(WARNINGS_FILE_NAME);
        let report_path = output_dir.join(REPORT_FILE_NAME);
        if !dry_run {
            WarningLog::from_warnings(&warnings).save(&warnings_path)?;
            save_report(&run.report(), &report_path)?;
        }

        Ok(RunSummary {
            files_scanned: run.files.len(),
            total_texts: run.result.texts.len(),
            unique_texts: run.unique.len(),
            new_keys,
            reused_keys,
            languages,
            warnings,
            warnings_path,
            report_path,
            dry_run,
        })
    }
}

/// First occurrence of each text, compared after trimming.
pub fn dedupe(texts: &[ExtractedText]) -> Vec<ExtractedText> {
    let mut seen: HashSet<&str> = HashSet::new();
    texts
        .iter()
        .filter(|t| seen.insert(t.text.trim()))
        .cloned()
        .collect()
}

fn save_report(report: &ExtractionReport<'_>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", path.display()))
}
