use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::extract::{ExtractOptions, default_text_attributes};
use crate::core::interpolation::{Interpolation, InterpolationConfig};
use crate::core::keys::{CounterStyle, KeyConfig, KeyStyle, PrefixOnly};
use crate::core::translate::ProviderKind;
use crate::core::validity::TextFilter;

pub const CONFIG_FILE_NAME: &str = ".autoi18nrc.json";

/// Keys shorter than this cannot hold a path and a readable text segment.
pub const MIN_KEY_MAX_LENGTH: usize = 16;

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.*",
    "**/*.spec.*",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    /// Glossary file for the `glossary` provider, relative to the source root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glossary: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_patch_dir")]
    pub patch_dir: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub key_style: KeyStyle,
    #[serde(default = "default_key_max_length")]
    pub key_max_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub counter_style: CounterStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_only: Option<PrefixOnly>,
    #[serde(default)]
    pub interpolation: InterpolationConfig,
    #[serde(default = "default_wrapper_functions")]
    pub wrapper_functions: Vec<String>,
    #[serde(default)]
    pub skip_attributes: Vec<String>,
    #[serde(default = "default_text_attributes")]
    pub text_attributes: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default)]
    pub translation: TranslationConfig,
}

fn default_source_language() -> String {
    "zh-CN".to_string()
}

fn default_target_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_output_dir() -> String {
    "i18n/strings".to_string()
}

fn default_patch_dir() -> String {
    "i18n/patches".to_string()
}

fn default_excludes() -> Vec<String> {
    ["**/dist/**", "**/build/**"]
        .iter()
        .chain(TEST_FILE_PATTERNS)
        .map(|p| p.to_string())
        .collect()
}

fn default_key_max_length() -> usize {
    50
}

fn default_wrapper_functions() -> Vec<String> {
    ["t", "$t"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            app_name: None,
            output_dir: default_output_dir(),
            patch_dir: default_patch_dir(),
            includes: Vec::new(),
            excludes: default_excludes(),
            key_style: KeyStyle::default(),
            key_max_length: default_key_max_length(),
            key_prefix: None,
            counter_style: CounterStyle::default(),
            prefix_only: None,
            interpolation: InterpolationConfig::default(),
            wrapper_functions: default_wrapper_functions(),
            skip_attributes: Vec::new(),
            text_attributes: default_text_attributes(),
            ignore_texts: Vec::new(),
            translation: TranslationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.target_languages.is_empty() {
            bail!("'targetLanguages' must list at least one language");
        }

        for pattern in &self.excludes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'excludes': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal paths, so `app/[locale]` is valid.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.key_max_length < MIN_KEY_MAX_LENGTH {
            bail!(
                "'keyMaxLength' must be at least {} (got {})",
                MIN_KEY_MAX_LENGTH,
                self.key_max_length
            );
        }

        if self.translation.provider == ProviderKind::Glossary && self.translation.glossary.is_none()
        {
            bail!("The glossary provider requires 'translation.glossary' to be set");
        }

        Ok(())
    }

    pub fn interpolation(&self) -> Result<Interpolation> {
        Interpolation::new(self.interpolation.clone())
    }

    pub fn extract_options(&self) -> Result<ExtractOptions> {
        let interpolation = self.interpolation()?;
        let filter = TextFilter::new(&self.source_language, interpolation.clone())
            .with_ignore_texts(&self.ignore_texts);
        let mut options = ExtractOptions::new(filter, interpolation);
        options.wrapper_functions = self.wrapper_functions.iter().cloned().collect();
        options.skip_attributes = self.skip_attributes.iter().cloned().collect::<HashSet<_>>();
        options.text_attributes = self.text_attributes.clone();
        Ok(options)
    }

    pub fn key_config(&self) -> KeyConfig {
        KeyConfig {
            style: self.key_style,
            max_length: self.key_max_length,
            prefix: self.key_prefix.clone(),
            app_name: self.app_name.clone(),
            counter_style: self.counter_style,
            prefix_only: self.prefix_only.clone(),
        }
    }

    /// Language whose translations name the keys: `en` when targeted,
    /// otherwise the first target.
    pub fn key_language(&self) -> Option<&str> {
        self.target_languages
            .iter()
            .find(|lang| lang.as_str() == "en")
            .or_else(|| self.target_languages.first())
            .map(String::as_str)
    }

    /// Pretty JSON as written by `init`, with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self).context("Failed to generate config.")?;
        Ok(format!("{}\n", json))
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
