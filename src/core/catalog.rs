//! Per-language catalogs: flat `key -> text` JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
    Unchanged,
}

/// Flat key→text mapping for one language, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Map<String, Value>,
}

impl Catalog {
    /// Load a catalog file; a missing file is an empty catalog.
    ///
    /// Non-string values are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
        let Value::Object(map) = value else {
            bail!("Root of catalog must be an object: {}", path.display());
        };

        Ok(Self {
            entries: map.into_iter().filter(|(_, v)| v.is_string()).collect(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: &str, text: &str) -> KeyAction {
        let action = match self.get(key) {
            None => KeyAction::Added,
            Some(existing) if existing == text => KeyAction::Unchanged,
            Some(_) => KeyAction::Updated,
        };
        self.entries
            .insert(key.to_string(), Value::String(text.to_string()));
        action
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|text| (k.as_str(), text)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write with 2-space indentation and a trailing newline, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize catalog")?;

        fs::write(path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        Ok(())
    }
}

/// Result of merging one run's entries into a language's catalog.
#[derive(Debug, Default)]
pub struct MergedCatalog {
    /// Previous entries plus this run's, previous order first.
    pub full: Catalog,
    /// Only the keys this run added.
    pub patch: Catalog,
}

/// Where full and patch catalogs live.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    output_dir: PathBuf,
    patch_dir: PathBuf,
}

impl CatalogStore {
    pub fn new(output_dir: impl Into<PathBuf>, patch_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            patch_dir: patch_dir.into(),
        }
    }

    pub fn catalog_path(&self, language: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", language))
    }

    pub fn patch_path(&self, language: &str) -> PathBuf {
        self.patch_dir.join(format!("{}.json", language))
    }

    pub fn load(&self, language: &str) -> Result<Catalog> {
        Catalog::load(&self.catalog_path(language))
    }

    /// Merge `entries` into the stored catalog for `language` without writing.
    pub fn merge(&self, language: &str, entries: &Catalog) -> Result<MergedCatalog> {
        let mut full = self.load(language)?;
        let mut patch = Catalog::default();
        for (key, text) in entries.iter() {
            if full.insert(key, text) == KeyAction::Added {
                patch.insert(key, text);
            }
        }
        Ok(MergedCatalog { full, patch })
    }

    pub fn write(&self, language: &str, catalog: &Catalog) -> Result<PathBuf> {
        let path = self.catalog_path(language);
        catalog.save(&path)?;
        Ok(path)
    }

    /// Write a patch catalog. Nothing is written for an empty patch.
    pub fn write_patch(&self, language: &str, patch: &Catalog) -> Result<Option<PathBuf>> {
        if patch.is_empty() {
            return Ok(None);
        }
        let path = self.patch_path(language);
        patch.save(&path)?;
        Ok(Some(path))
    }
}
