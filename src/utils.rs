//! Common utility functions shared across the codebase.

use unicode_width::UnicodeWidthChar;

/// Checks if the text contains at least one CJK unified ideograph.
///
/// # Examples
///
/// ```
/// use autoi18n::utils::contains_cjk;
///
/// assert!(contains_cjk("你好"));
/// assert!(contains_cjk("Hello 世界"));
/// assert!(!contains_cjk("Hello"));
/// assert!(!contains_cjk("こんにちは"));
/// ```
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_ideograph)
}

/// Checks if the text contains hiragana or katakana.
pub fn contains_kana(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}'))
}

/// Checks if the text contains Hangul syllables or jamo.
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
    })
}

pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
}

/// Collapses every whitespace run into a single space and trims both ends.
///
/// ```
/// use autoi18n::utils::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Hello \n\t world "), "Hello world");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build an index of line start byte offsets.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Convert a byte offset into a (1-based line, 0-based column) pair.
///
/// The column counts characters, not bytes.
pub fn offset_to_line_col(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    };
    let line_start = line_index[line.saturating_sub(1).min(line_index.len() - 1)];
    let column = content
        .get(line_start..offset.min(content.len()))
        .map(|s| s.chars().count())
        .unwrap_or(0);
    (line, column)
}

/// Truncate text to a maximum display width, appending `…` when cut.
///
/// Width is measured in terminal columns so CJK characters count double.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            let rest: usize = text
                .chars()
                .skip(out.chars().count())
                .map(|c| c.width().unwrap_or(0))
                .sum();
            if width + rest <= max_width {
                out.extend(text.chars().skip(out.chars().count()));
                return out;
            }
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}
