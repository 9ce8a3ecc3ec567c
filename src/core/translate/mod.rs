//! Translation through a pluggable backend.
//!
//! The [`TranslationManager`] never fails: placeholders are converted to the
//! configured wire format on the way out and back on the way in, and any
//! backend error or blank answer falls back to the source text with a
//! `translation-failed` warning.

pub mod providers;

use anyhow::Result;

use crate::core::interpolation::Interpolation;
use crate::core::text::ExtractedText;
use crate::warnings::{ExtractionWarning, Severity, WarningKind};

pub use providers::{GlossaryTranslator, NoopTranslator, ProviderKind, build_translator};

pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;

    /// One result per input, in order.
    fn translate_batch(&self, texts: &[String], source: &str, target: &str) -> Vec<Result<String>> {
        texts
            .iter()
            .map(|text| self.translate(text, source, target))
            .collect()
    }
}

/// Translations for one target language, aligned with the input texts.
#[derive(Debug, Default)]
pub struct TranslationOutcome {
    pub translations: Vec<String>,
    pub warnings: Vec<ExtractionWarning>,
}

pub struct TranslationManager {
    translator: Box<dyn Translator>,
    interpolation: Interpolation,
    source_language: String,
}

impl TranslationManager {
    pub fn new(
        translator: Box<dyn Translator>,
        interpolation: Interpolation,
        source_language: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            interpolation,
            source_language: source_language.into(),
        }
    }

    /// Translate every unique text into `target`.
    pub fn translate_all(&self, texts: &[ExtractedText], target: &str) -> TranslationOutcome {
        if target == self.source_language {
            return TranslationOutcome {
                translations: texts.iter().map(|t| t.text.clone()).collect(),
                warnings: Vec::new(),
            };
        }

        let wire: Vec<String> = texts
            .iter()
            .map(|t| self.interpolation.to_translation_format(&t.text))
            .collect();
        let mut results = self
            .translator
            .translate_batch(&wire, &self.source_language, target)
            .into_iter();

        let mut outcome = TranslationOutcome::default();
        for text in texts {
            match results.next() {
                Some(Ok(translated)) if !translated.trim().is_empty() => outcome
                    .translations
                    .push(self.interpolation.from_translation_format(&translated)),
                failed => {
                    let reason = match failed {
                        Some(Err(err)) => format!("{:#}", err),
                        Some(Ok(_)) => "empty translation returned".to_string(),
                        None => "no result returned".to_string(),
                    };
                    outcome.warnings.push(
                        ExtractionWarning::new(
                            WarningKind::TranslationFailed,
                            Severity::Warning,
                            format!(
                                "Translation to {} via {} failed: {}",
                                target,
                                self.translator.name(),
                                reason
                            ),
                            &text.file,
                            text.line,
                            text.column,
                        )
                        .with_code(&text.text)
                        .with_suggestion("The source text is used until a translation is provided"),
                    );
                    outcome.translations.push(text.text.clone());
                }
            }
        }
        outcome
    }
}
