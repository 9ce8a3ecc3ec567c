//! Key generation.
//!
//! Three modes, checked in order:
//!
//! 1. A custom [`KeyStrategy`] builds the whole key; collisions are retried
//!    with a bumped counter.
//! 2. Prefix-only: `{prefix}{zero-padded counter}`.
//! 3. Path mode: `[prefix.][app.]path.camelText[_param]*[.counter]`.
//!
//! Reuse of existing keys happens before any of these: a source text found in
//! the registry's reverse index keeps its key.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::interpolation::Interpolation;
use crate::core::keys::naming::{app_segment, path_segment, smart_truncate, to_camel_case};
use crate::core::keys::registry::KeyRegistry;

/// Retries granted to a custom strategy before a suffix is forced.
const MAX_STRATEGY_ATTEMPTS: usize = 100;

/// The text segment is never truncated below this many chars.
const MIN_TEXT_LENGTH: usize = 8;

/// Fallback text segment when neither text camel-cases to anything.
const FALLBACK_TEXT: &str = "text";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyle {
    #[default]
    Dot,
    Underscore,
}

impl KeyStyle {
    pub fn separator(self) -> &'static str {
        match self {
            KeyStyle::Dot => ".",
            KeyStyle::Underscore => "_",
        }
    }
}

/// When to append a disambiguating counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterStyle {
    /// Never; colliding keys are accepted as is.
    None,
    /// On every key.
    Always,
    /// Only when the key is already taken.
    #[default]
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixOnly {
    pub prefix: String,
    #[serde(default = "default_padding")]
    pub padding: usize,
    /// Share one counter across the run instead of counting per key.
    #[serde(default)]
    pub global_counter: bool,
}

fn default_padding() -> usize {
    5
}

/// Key layout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConfig {
    pub style: KeyStyle,
    pub max_length: usize,
    pub prefix: Option<String>,
    pub app_name: Option<String>,
    pub counter_style: CounterStyle,
    pub prefix_only: Option<PrefixOnly>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            style: KeyStyle::Dot,
            max_length: 50,
            prefix: None,
            app_name: None,
            counter_style: CounterStyle::Auto,
            prefix_only: None,
        }
    }
}

/// Everything a custom strategy gets to build a key from.
#[derive(Debug, Clone)]
pub struct KeyParams<'a> {
    /// App and path segments, already joined.
    pub base: &'a str,
    /// Camel-cased, truncated text segment.
    pub text: &'a str,
    /// 0 on the first attempt, bumped after each collision.
    pub counter: usize,
    pub params: &'a [String],
    pub file: &'a str,
    pub source_text: &'a str,
    pub translated_text: &'a str,
}

/// User-supplied key builder.
pub trait KeyStrategy: Send + Sync {
    fn generate(&self, params: &KeyParams<'_>) -> String;
}

impl<F> KeyStrategy for F
where
    F: Fn(&KeyParams<'_>) -> String + Send + Sync,
{
    fn generate(&self, params: &KeyParams<'_>) -> String {
        self(params)
    }
}

/// One text that needs a key.
#[derive(Debug, Clone, Copy)]
pub struct KeyRequest<'a> {
    pub source_text: &'a str,
    pub file: &'a str,
    /// Translation into the key language, when there is one.
    pub translated_text: Option<&'a str>,
    pub params: &'a [String],
}

#[derive(Clone)]
pub struct KeyGenerator {
    config: KeyConfig,
    interpolation: Interpolation,
    strategy: Option<Arc<dyn KeyStrategy>>,
}

impl fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("config", &self.config)
            .field("strategy", &self.strategy.is_some())
            .finish()
    }
}

impl KeyGenerator {
    pub fn new(config: KeyConfig, interpolation: Interpolation) -> Self {
        Self {
            config,
            interpolation,
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn KeyStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn config(&self) -> &KeyConfig {
        &self.config
    }

    /// Key for a source text: the existing one if the registry knows the text,
    /// otherwise a newly generated one. Either way the key ends up registered.
    pub fn assign(&self, registry: &mut KeyRegistry, request: KeyRequest<'_>) -> String {
        if let Some(existing) = registry.key_for(request.source_text) {
            return existing.to_string();
        }
        let key = self.generate(registry, request);
        registry.register(request.source_text, &key);
        key
    }

    /// Build a new key without consulting the reverse index.
    pub fn generate(&self, registry: &mut KeyRegistry, request: KeyRequest<'_>) -> String {
        let param_suffix = self.interpolation.key_params_suffix(request.params);

        if let Some(strategy) = &self.strategy {
            return self.generate_custom(strategy.as_ref(), registry, request);
        }
        if let Some(prefix_only) = &self.config.prefix_only {
            return generate_prefix_only(prefix_only, &param_suffix, registry);
        }

        let mut head: Vec<String> = Vec::new();
        if let Some(prefix) = self.config.prefix.as_deref().filter(|p| !p.is_empty()) {
            head.push(prefix.to_string());
        }
        let base = self.base(request.file);
        if !base.is_empty() {
            head.push(base);
        }
        let text = self.text_segment(request);

        let key = self.fit(&head, &text, &param_suffix);
        match self.config.counter_style {
            CounterStyle::None => key,
            CounterStyle::Auto if !registry.contains(&key) => key,
            CounterStyle::Auto | CounterStyle::Always => {
                let sep = self.config.style.separator();
                (1..)
                    .map(|n| self.fit(&head, &text, &format!("{}{}{}", param_suffix, sep, n)))
                    .find(|candidate| !registry.contains(candidate))
                    .unwrap_or(key)
            }
        }
    }

    /// Join the head segments, the text segment and `tail` within `max_length`.
    ///
    /// The text keeps room for at least `MIN_TEXT_LENGTH` chars; when the head
    /// leaves less than that, trailing head segments are dropped until the key
    /// fits. `tail` (params and counter) is never cut.
    fn fit(&self, head: &[String], text: &str, tail: &str) -> String {
        let sep = self.config.style.separator();
        let available = self.config.max_length.saturating_sub(tail.len());
        let mut segments: Vec<&str> = head
            .iter()
            .flat_map(|segment| segment.split(sep))
            .filter(|segment| !segment.is_empty())
            .collect();

        let budget = available
            .saturating_sub(head_length(&segments, sep))
            .max(MIN_TEXT_LENGTH.min(available));
        let text = smart_truncate(text, budget);
        while !segments.is_empty() && head_length(&segments, sep) + text.len() > available {
            segments.pop();
        }

        let mut key = segments.join(sep);
        if !key.is_empty() {
            key.push_str(sep);
        }
        key.push_str(&text);
        key.push_str(tail);
        key
    }

    fn base(&self, file: &str) -> String {
        let sep = self.config.style.separator();
        let mut segments = Vec::new();
        if let Some(app) = self.config.app_name.as_deref().map(app_segment)
            && !app.is_empty()
        {
            segments.push(app);
        }
        let path = path_segment(file, sep);
        if !path.is_empty() {
            segments.push(path);
        }
        segments.join(sep)
    }

    /// Camel-cased translation, else camel-cased source text, else `text`.
    fn text_segment(&self, request: KeyRequest<'_>) -> String {
        request
            .translated_text
            .into_iter()
            .chain([request.source_text])
            .map(|text| to_camel_case(&self.interpolation.strip_placeholders(text)))
            .find(|segment| !segment.is_empty())
            .unwrap_or_else(|| FALLBACK_TEXT.to_string())
    }

    fn generate_custom(
        &self,
        strategy: &dyn KeyStrategy,
        registry: &KeyRegistry,
        request: KeyRequest<'_>,
    ) -> String {
        let base = self.base(request.file);
        let text = smart_truncate(&self.text_segment(request), self.config.max_length);
        let translated_text = request.translated_text.unwrap_or(request.source_text);

        let mut last = String::new();
        for counter in 0..MAX_STRATEGY_ATTEMPTS {
            let key = strategy.generate(&KeyParams {
                base: &base,
                text: &text,
                counter,
                params: request.params,
                file: request.file,
                source_text: request.source_text,
                translated_text,
            });
            if !registry.contains(&key) {
                return key;
            }
            last = key;
        }

        self.forced_suffix(&last, registry)
    }

    /// `{key}{sep}{n}` for the smallest `n >= 1` not yet taken, with `key` cut
    /// so the suffix stays within `max_length`.
    fn forced_suffix(&self, key: &str, registry: &KeyRegistry) -> String {
        let sep = self.config.style.separator();
        let mut n = 1;
        loop {
            let suffix = format!("{}{}", sep, n);
            let room = self.config.max_length.saturating_sub(suffix.len());
            let cut = key
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .take_while(|&end| end <= room)
                .last()
                .unwrap_or(0);
            let candidate = format!("{}{}", key[..cut].trim_end_matches(sep), suffix);
            if !registry.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Length of the head segments, each followed by a separator.
fn head_length(segments: &[&str], sep: &str) -> usize {
    segments.iter().map(|s| s.len() + sep.len()).sum()
}

fn generate_prefix_only(config: &PrefixOnly, param_suffix: &str, registry: &mut KeyRegistry) -> String {
    let render = |n: usize| {
        format!(
            "{}{:0width$}{}",
            config.prefix,
            n,
            param_suffix,
            width = config.padding
        )
    };

    if config.global_counter {
        loop {
            let key = render(registry.next_counter());
            if !registry.contains(&key) {
                return key;
            }
        }
    }

    let mut n = 1;
    loop {
        let key = render(n);
        if !registry.contains(&key) {
            return key;
        }
        n += 1;
    }
}
