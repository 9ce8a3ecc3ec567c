//! Decides whether a candidate fragment is human-readable text worth translating.
//!
//! Cheap structural checks (length, paths, hex colors, extensions) run first to
//! throw out code-shaped tokens. The final gate is script-based: a fragment is
//! only kept when it contains characters of the configured source language.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::interpolation::Interpolation;
use crate::utils::{contains_cjk, contains_hangul, contains_kana};

static PUNCT_ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-_.]+$").expect("valid regex"));

static SHORT_LATIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,2}$").expect("valid regex"));

static URL_OR_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://|/|\./|\.\./|~/)").expect("valid regex"));

/// Anything that opens like a package or dotfile name: `@scope/pkg`, `@vue`, `.env`.
static MODULE_SPECIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[@.][A-Za-z0-9_\-/]+").expect("valid regex"));

static FILE_EXTENSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.[A-Za-z0-9]+$").expect("valid regex"));

static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$")
        .expect("valid regex")
});

/// Script family a source language is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceScript {
    Chinese,
    Japanese,
    Korean,
    /// Any other language. No heuristic separates prose from identifiers in
    /// Latin-like scripts, so every candidate is rejected.
    Unsupported,
}

impl SourceScript {
    pub fn from_language(language: &str) -> Self {
        let lang = language.to_ascii_lowercase();
        if lang.starts_with("zh") {
            SourceScript::Chinese
        } else if lang.starts_with("ja") {
            SourceScript::Japanese
        } else if lang.starts_with("ko") {
            SourceScript::Korean
        } else {
            SourceScript::Unsupported
        }
    }

    fn accepts(self, text: &str) -> bool {
        match self {
            SourceScript::Chinese => contains_cjk(text),
            SourceScript::Japanese => contains_kana(text) || contains_cjk(text),
            SourceScript::Korean => contains_hangul(text),
            SourceScript::Unsupported => false,
        }
    }
}

/// Text validity filter bound to one source language.
#[derive(Debug, Clone)]
pub struct TextFilter {
    script: SourceScript,
    interpolation: Interpolation,
    ignore_texts: HashSet<String>,
}

impl TextFilter {
    pub fn new(source_language: &str, interpolation: Interpolation) -> Self {
        Self {
            script: SourceScript::from_language(source_language),
            interpolation,
            ignore_texts: HashSet::new(),
        }
    }

    pub fn with_ignore_texts(mut self, ignore_texts: &[String]) -> Self {
        self.ignore_texts = ignore_texts.iter().map(|t| t.trim().to_string()).collect();
        self
    }

    pub fn script(&self) -> SourceScript {
        self.script
    }

    pub fn is_valid_text(&self, text: &str) -> bool {
        let original = text.trim();
        let stripped = self.interpolation.strip_placeholders(text);
        let stripped = stripped.trim();

        if stripped.chars().count() < 2 {
            return false;
        }
        if PUNCT_ONLY_REGEX.is_match(stripped) || SHORT_LATIN_REGEX.is_match(stripped) {
            return false;
        }
        if URL_OR_PATH_REGEX.is_match(original) || MODULE_SPECIFIER_REGEX.is_match(original) {
            return false;
        }
        if FILE_EXTENSION_REGEX.is_match(stripped) || HEX_COLOR_REGEX.is_match(stripped) {
            return false;
        }
        if self.ignore_texts.contains(original) {
            return false;
        }
        self.script.accepts(stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(language: &str) -> TextFilter {
        TextFilter::new(language, Interpolation::default())
    }

    #[test]
    fn test_boundaries() {
        let zh = filter("zh-CN");
        assert!(!zh.is_valid_text("ab"));
        assert!(!zh.is_valid_text("OK"));
        assert!(zh.is_valid_text("你好"));
        assert!(!zh.is_valid_text("Hello"));
        assert!(!zh.is_valid_text("你"));
        assert!(!zh.is_valid_text("   "));
    }

    #[test]
    fn test_placeholders_do_not_count() {
        let zh = filter("zh-CN");
        assert!(!zh.is_valid_text("{{0}}{{1}}"));
        assert!(!zh.is_valid_text("好{{0}}"));
        assert!(zh.is_valid_text("欢迎{{0}}"));
    }

    #[test]
    fn test_code_shaped_tokens() {
        let zh = filter("zh-CN");
        assert!(!zh.is_valid_text("12-34_5.6"));
        assert!(!zh.is_valid_text(".json"));
        assert!(!zh.is_valid_text("#fff"));
        assert!(!zh.is_valid_text("#A0B1C2"));
        assert!(!zh.is_valid_text("@scope/pkg"));
        assert!(!zh.is_valid_text("./中文/路径"));
        assert!(!zh.is_valid_text("/首页"));
    }

    #[test]
    fn test_package_and_dotfile_prefixes() {
        let zh = filter("zh-CN");
        assert!(!zh.is_valid_text("@scope 中文说明"));
        assert!(!zh.is_valid_text(".env 配置"));
        assert!(!zh.is_valid_text("@vue/cli 脚手架"));
        // Only ASCII word characters count as a specifier.
        assert!(zh.is_valid_text("@张三 你好"));
        assert!(zh.is_valid_text("。欢迎回来"));
    }

    #[test]
    fn test_url_rejected_under_every_language() {
        for lang in ["zh-CN", "ja", "ko-KR", "en", "fr"] {
            let f = filter(lang);
            assert!(!f.is_valid_text("https://example.com/path"), "{}", lang);
            assert!(!f.is_valid_text("http://例子.中国/路径"), "{}", lang);
        }
    }

    #[test]
    fn test_language_gates() {
        let ja = filter("ja-JP");
        assert!(ja.is_valid_text("こんにちは"));
        assert!(ja.is_valid_text("漢字"));
        assert!(!ja.is_valid_text("안녕하세요"));

        let ko = filter("ko");
        assert!(ko.is_valid_text("안녕하세요"));
        assert!(!ko.is_valid_text("你好"));

        let zh = filter("zh-TW");
        assert!(!zh.is_valid_text("こんにちは"));
    }

    #[test]
    fn test_latin_source_language_rejects_everything() {
        let en = filter("en");
        assert_eq!(en.script(), SourceScript::Unsupported);
        assert!(!en.is_valid_text("Hello world"));
        assert!(!en.is_valid_text("你好"));
    }

    #[test]
    fn test_ignore_texts() {
        let zh = filter("zh-CN").with_ignore_texts(&[" 测试 ".to_string()]);
        assert!(!zh.is_valid_text("测试"));
        assert!(!zh.is_valid_text("  测试\n"));
        assert!(zh.is_valid_text("测试一下"));
    }
}
