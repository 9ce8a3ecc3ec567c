//! Text and path transformations that make up the segments of a key.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").unwrap());

static SOURCE_EXTENSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([mc]?[jt]sx?|vue|html?)$").unwrap());

static ROOT_DIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(src|app|pages|components)/").unwrap());

/// Share of the text budget, counted from the end, searched for a camelCase boundary.
const BOUNDARY_WINDOW: f64 = 0.4;

/// Camel-case ASCII words: `"Welcome back!"` becomes `welcomeBack`.
///
/// Anything outside `[A-Za-z0-9_]` and whitespace is dropped, so CJK text
/// yields an empty string.
pub fn to_camel_case(text: &str) -> String {
    let cleaned = NON_WORD_REGEX.replace_all(text, "");
    cleaned
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                return word.to_lowercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Cut `text` to at most `max` chars, preferring to end right before a
/// camelCase word boundary that falls in the last part of the budget.
pub fn smart_truncate(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return text.to_string();
    }

    let window_start = max - (max as f64 * BOUNDARY_WINDOW) as usize;
    let boundary = (window_start.max(1)..=max)
        .rev()
        .find(|&i| chars[i].is_ascii_uppercase());

    chars[..boundary.unwrap_or(max)].iter().collect()
}

/// Key segment derived from a source path.
///
/// `src/pages/home.tsx` becomes `pages.home` with a `.` separator: the
/// extension, a leading `./` and one root directory are stripped, and the
/// remaining components are joined. Characters that do not belong in a key
/// are dropped from each component.
pub fn path_segment(file: &str, separator: &str) -> String {
    let normalized = file.replace('\\', "/");
    let trimmed = normalized.trim_start_matches("./");
    let without_ext = SOURCE_EXTENSION_REGEX.replace(trimmed, "");
    let without_root = ROOT_DIR_REGEX.replace(&without_ext, "");

    without_root
        .split('/')
        .map(|component| {
            component
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
                .collect::<String>()
        })
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// App name as a key segment: lowercase, word characters only.
pub fn app_segment(app_name: &str) -> String {
    app_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase()
}
