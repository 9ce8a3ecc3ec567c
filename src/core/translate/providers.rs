use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::interpolation::Interpolation;
use crate::core::translate::Translator;

/// Translation backends that ship with the crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Every target catalog starts as a copy of the source text.
    #[default]
    None,
    /// Lookups in a local JSON glossary.
    Glossary,
}

/// Returns the source text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn name(&self) -> &str {
        "none"
    }

    fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Offline translator backed by a `{ "<lang>": { "<source>": "<target>" } }` file.
///
/// Glossary entries are written with canonical placeholders (`欢迎{{0}}`), so
/// incoming wire text is converted back before the lookup and the answer is
/// sent out in wire form again.
#[derive(Debug, Clone, Default)]
pub struct GlossaryTranslator {
    entries: HashMap<String, HashMap<String, String>>,
    interpolation: Interpolation,
}

impl GlossaryTranslator {
    pub fn new(entries: HashMap<String, HashMap<String, String>>) -> Self {
        Self {
            entries,
            interpolation: Interpolation::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read glossary: {}", path.display()))?;
        let entries = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse glossary: {}", path.display()))?;
        Ok(Self::new(entries))
    }

    /// Placeholder syntax the entries are matched against.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

impl Translator for GlossaryTranslator {
    fn name(&self) -> &str {
        "glossary"
    }

    fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String> {
        let canonical = self.interpolation.from_translation_format(text);
        match self.entries.get(target).and_then(|terms| terms.get(&canonical)) {
            Some(translated) => Ok(self.interpolation.to_translation_format(translated)),
            None => bail!("no glossary entry for '{}' in {}", canonical, target),
        }
    }
}

/// Build the configured provider. Relative glossary paths resolve against `root`.
pub fn build_translator(
    kind: ProviderKind,
    glossary: Option<&str>,
    interpolation: &Interpolation,
    root: &Path,
) -> Result<Box<dyn Translator>> {
    match kind {
        ProviderKind::None => Ok(Box::new(NoopTranslator)),
        ProviderKind::Glossary => {
            let Some(glossary) = glossary else {
                bail!("The glossary provider requires a glossary path");
            };
            Ok(Box::new(
                GlossaryTranslator::load(&root.join(glossary))?
                    .with_interpolation(interpolation.clone()),
            ))
        }
    }
}
