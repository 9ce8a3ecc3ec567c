//! Placeholder model for dynamic expressions embedded in extracted text.
//!
//! A template such as `` `欢迎 ${username}` `` is extracted as `欢迎{{0}}` (or
//! `欢迎{{username}}` in named mode). Placeholders must survive a round-trip
//! through a translation backend, so they can be temporarily converted into a
//! wire-safe syntax such as `<ph id="0"/>` and converted back afterwards.

use std::fmt;
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Wire-safe placeholder syntax used only while text is at the translation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationFormat {
    /// `<ph id="0"/>`
    Xml,
    /// `[0]`
    Bracket,
    /// `{translation_prefix}0{translation_suffix}`
    Custom,
}

/// Interpolation settings as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Use names derived from the source expression instead of indices.
    #[serde(default)]
    pub named_params: bool,
    /// Append `_{name}` for each parameter to generated keys.
    #[serde(default)]
    pub include_params_in_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_format: Option<TranslationFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_suffix: Option<String>,
}

fn default_prefix() -> String {
    "{{".to_string()
}

fn default_suffix() -> String {
    "}}".to_string()
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            suffix: default_suffix(),
            named_params: false,
            include_params_in_key: false,
            translation_format: None,
            translation_prefix: None,
            translation_suffix: None,
        }
    }
}

/// Custom placeholder renderer: `(index, name) -> placeholder`.
pub type PlaceholderFormatter = Arc<dyn Fn(usize, Option<&str>) -> String + Send + Sync>;

const DEFAULT_CUSTOM_PREFIX: &str = "__PH";
const DEFAULT_CUSTOM_SUFFIX: &str = "__";
const ID_PATTERN: &str = r"(\d+|[A-Za-z_][A-Za-z0-9_]*)";

static DEFAULT_PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\d+|[A-Za-z_][A-Za-z0-9_]*)\}\}").expect("valid regex"));

/// The single source of truth for placeholder rendering and wire-format conversion.
///
/// Regexes are compiled once at construction; the handler is cheap to clone
/// and safe to share between threads.
#[derive(Clone)]
pub struct Interpolation {
    config: InterpolationConfig,
    formatter: Option<PlaceholderFormatter>,
    placeholder_regex: Regex,
    wire_regex: Option<Regex>,
}

impl fmt::Debug for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpolation")
            .field("config", &self.config)
            .field("custom_formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Default for Interpolation {
    fn default() -> Self {
        Self {
            config: InterpolationConfig::default(),
            formatter: None,
            placeholder_regex: DEFAULT_PLACEHOLDER_REGEX.clone(),
            wire_regex: None,
        }
    }
}

impl Interpolation {
    pub fn new(config: InterpolationConfig) -> Result<Self> {
        let placeholder_regex = Regex::new(&format!(
            "{}{}{}",
            regex::escape(&config.prefix),
            ID_PATTERN,
            regex::escape(&config.suffix)
        ))
        .context("Failed to build placeholder pattern")?;

        let wire_regex = match config.translation_format {
            Some(format) => Some(
                Regex::new(&wire_pattern(&config, format))
                    .context("Failed to build translation format pattern")?,
            ),
            None => None,
        };

        Ok(Self {
            config,
            formatter: None,
            placeholder_regex,
            wire_regex,
        })
    }

    /// Install a custom placeholder renderer.
    pub fn with_formatter(mut self, formatter: PlaceholderFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn config(&self) -> &InterpolationConfig {
        &self.config
    }

    /// Render the placeholder for the `index`-th expression.
    ///
    /// Named mode only applies when a non-numeric name is available; numeric
    /// names are positional.
    pub fn format_placeholder(&self, index: usize, name: Option<&str>) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter(index, name);
        }
        match name {
            Some(name) if self.config.named_params && !is_numeric(name) => {
                format!("{}{}{}", self.config.prefix, name, self.config.suffix)
            }
            _ => format!("{}{}{}", self.config.prefix, index, self.config.suffix),
        }
    }

    /// Matches `prefix (digits | identifier) suffix`; capture 1 is the id.
    pub fn placeholder_regex(&self) -> &Regex {
        &self.placeholder_regex
    }

    pub fn strip_placeholders(&self, text: &str) -> String {
        self.placeholder_regex.replace_all(text, "").into_owned()
    }

    pub fn has_placeholders(&self, text: &str) -> bool {
        self.placeholder_regex.is_match(text)
    }

    /// All placeholder ids in order of appearance.
    pub fn placeholder_ids(&self, text: &str) -> Vec<String> {
        self.placeholder_regex
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// `_{name}` for each parameter when params are part of keys.
    pub fn key_params_suffix(&self, param_names: &[String]) -> String {
        if !self.config.include_params_in_key {
            return String::new();
        }
        param_names.iter().map(|name| format!("_{{{}}}", name)).collect()
    }

    fn format_for_translation(&self, id: &str) -> String {
        match self.config.translation_format {
            Some(TranslationFormat::Xml) => format!("<ph id=\"{}\"/>", id),
            Some(TranslationFormat::Bracket) => format!("[{}]", id),
            Some(TranslationFormat::Custom) => format!(
                "{}{}{}",
                self.config
                    .translation_prefix
                    .as_deref()
                    .unwrap_or(DEFAULT_CUSTOM_PREFIX),
                id,
                self.config
                    .translation_suffix
                    .as_deref()
                    .unwrap_or(DEFAULT_CUSTOM_SUFFIX)
            ),
            None => self.canonical(id),
        }
    }

    /// Canonical placeholder for an id that came back from the wire.
    fn canonical(&self, id: &str) -> String {
        match id.parse::<usize>() {
            Ok(index) => self.format_placeholder(index, None),
            Err(_) => format!("{}{}{}", self.config.prefix, id, self.config.suffix),
        }
    }

    /// Replace canonical placeholders with the wire-safe syntax.
    ///
    /// Identity when no translation format is configured.
    pub fn to_translation_format(&self, text: &str) -> String {
        if self.config.translation_format.is_none() {
            return text.to_string();
        }
        self.placeholder_regex
            .replace_all(text, |caps: &Captures| self.format_for_translation(&caps[1]))
            .into_owned()
    }

    /// Reverse of [`Self::to_translation_format`].
    ///
    /// Fragments that do not match the wire syntax are left untouched.
    pub fn from_translation_format(&self, text: &str) -> String {
        let Some(regex) = &self.wire_regex else {
            return text.to_string();
        };
        regex
            .replace_all(text, |caps: &Captures| self.canonical(&caps[1]))
            .into_owned()
    }
}

fn wire_pattern(config: &InterpolationConfig, format: TranslationFormat) -> String {
    match format {
        // Backends reshuffle whitespace, drop or swap quotes, and change case.
        TranslationFormat::Xml => {
            format!(r#"(?i)<\s*ph\s*id\s*=\s*["']?{}["']?\s*/\s*>"#, ID_PATTERN)
        }
        TranslationFormat::Bracket => format!(r"\[{}\]", ID_PATTERN),
        TranslationFormat::Custom => format!(
            "{}{}{}",
            regex::escape(
                config
                    .translation_prefix
                    .as_deref()
                    .unwrap_or(DEFAULT_CUSTOM_PREFIX)
            ),
            ID_PATTERN,
            regex::escape(
                config
                    .translation_suffix
                    .as_deref()
                    .unwrap_or(DEFAULT_CUSTOM_SUFFIX)
            )
        ),
    }
}

fn is_numeric(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_format(format: TranslationFormat) -> Interpolation {
        Interpolation::new(InterpolationConfig {
            translation_format: Some(format),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_format_placeholder_indexed() {
        let interp = Interpolation::default();
        assert_eq!(interp.format_placeholder(0, None), "{{0}}");
        assert_eq!(interp.format_placeholder(2, Some("name")), "{{2}}");
    }

    #[test]
    fn test_format_placeholder_named() {
        let interp = Interpolation::new(InterpolationConfig {
            named_params: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(interp.format_placeholder(0, Some("username")), "{{username}}");
        assert_eq!(interp.format_placeholder(1, None), "{{1}}");
        // numeric names are positional
        assert_eq!(interp.format_placeholder(3, Some("7")), "{{3}}");
    }

    #[test]
    fn test_custom_prefix_suffix() {
        let interp = Interpolation::new(InterpolationConfig {
            prefix: "%{".to_string(),
            suffix: "}".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(interp.format_placeholder(1, None), "%{1}");
        assert_eq!(interp.strip_placeholders("a %{1} b %{name}"), "a  b ");
        assert!(!interp.has_placeholders("{{0}}"));
    }

    #[test]
    fn test_custom_formatter() {
        let interp = Interpolation::default().with_formatter(Arc::new(|index, name| {
            format!("${}:{}", index, name.unwrap_or("_"))
        }));
        assert_eq!(interp.format_placeholder(4, Some("n")), "$4:n");
        assert_eq!(interp.format_placeholder(0, None), "$0:_");
    }

    #[test]
    fn test_placeholder_ids() {
        let interp = Interpolation::default();
        assert_eq!(
            interp.placeholder_ids("{{0}} of {{count}} and {{ bad }}"),
            vec!["0".to_string(), "count".to_string()]
        );
    }

    #[test]
    fn test_key_params_suffix() {
        let names = vec!["username".to_string(), "count".to_string()];
        assert_eq!(Interpolation::default().key_params_suffix(&names), "");

        let interp = Interpolation::new(InterpolationConfig {
            include_params_in_key: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(interp.key_params_suffix(&names), "_{username}_{count}");
        assert_eq!(interp.key_params_suffix(&[]), "");
    }

    #[test]
    fn test_no_translation_format_is_identity() {
        let interp = Interpolation::default();
        let text = "共{{0}}条, <ph id=\"1\"/>";
        assert_eq!(interp.to_translation_format(text), text);
        assert_eq!(interp.from_translation_format(text), text);
    }

    #[test]
    fn test_xml_round_trip() {
        let interp = with_format(TranslationFormat::Xml);
        let text = "你好 {{0}}，你有 {{count}} 条消息";
        let wire = interp.to_translation_format(text);
        assert_eq!(wire, "你好 <ph id=\"0\"/>，你有 <ph id=\"count\"/> 条消息");
        assert_eq!(interp.from_translation_format(&wire), text);
    }

    #[test]
    fn test_xml_tolerates_backend_noise() {
        let interp = with_format(TranslationFormat::Xml);
        assert_eq!(
            interp.from_translation_format("Hello <ph id = \"0\" />, <PH ID=1/> and <ph id='name'/>"),
            "Hello {{0}}, {{1}} and {{name}}"
        );
    }

    #[test]
    fn test_malformed_wire_fragments_untouched() {
        let interp = with_format(TranslationFormat::Xml);
        let text = "broken <ph id=\"0\" and <ph/> stays";
        assert_eq!(interp.from_translation_format(text), text);
    }

    #[test]
    fn test_bracket_and_custom_round_trip() {
        let text = "{{0}} items in {{1}}";
        for format in [TranslationFormat::Bracket, TranslationFormat::Custom] {
            let interp = with_format(format);
            let wire = interp.to_translation_format(text);
            assert!(!wire.contains("{{"), "{:?} left canonical syntax: {}", format, wire);
            assert_eq!(interp.from_translation_format(&wire), text);
        }

        let custom = Interpolation::new(InterpolationConfig {
            translation_format: Some(TranslationFormat::Custom),
            translation_prefix: Some("@@".to_string()),
            translation_suffix: Some("@@".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(custom.to_translation_format("a {{0}}"), "a @@0@@");
    }

    #[test]
    fn test_round_trip_over_built_strings() {
        let segments = ["", "当前", " level ", "：", "x"];
        for format in [
            TranslationFormat::Xml,
            TranslationFormat::Bracket,
            TranslationFormat::Custom,
        ] {
            let interp = with_format(format);
            for n in 0..4 {
                let mut built = String::new();
                for i in 0..n {
                    built.push_str(segments[i % segments.len()]);
                    built.push_str(&interp.format_placeholder(i, None));
                }
                built.push_str("尾");
                let wire = interp.to_translation_format(&built);
                assert_eq!(interp.from_translation_format(&wire), built);
            }
        }
    }
}
