//! HTML parsing with `tl`.
//!
//! `tl` builds its DOM without copying the input: tag sources, text nodes
//! and attribute values are all slices of the original string, so a node's
//! position is recovered from where its slice starts.

use std::borrow::Cow;

use anyhow::{Context, Result};
use tl::{ParserOptions, VDom};

pub fn parse_markup(source: &str) -> Result<VDom<'_>> {
    tl::parse(source, ParserOptions::default()).context("Failed to parse markup")
}

/// Byte offset in `source` of a slice the parser borrowed from it.
pub fn source_offset(source: &str, part: &[u8]) -> Option<usize> {
    let start = (part.as_ptr() as usize).checked_sub(source.as_ptr() as usize)?;
    (start + part.len() <= source.len()).then_some(start)
}

/// Text as rendered: character references like `&amp;` resolved.
pub fn decode_text(raw: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_offsets_point_into_source() {
        let source = "<p title=\"提示\">你好</p>";
        let dom = parse_markup(source).unwrap();
        let parser = dom.parser();

        let tag = dom
            .nodes()
            .iter()
            .find_map(|node| node.as_tag())
            .unwrap();
        let (_, title) = tag
            .attributes()
            .iter()
            .find(|(name, _)| name == "title")
            .unwrap();
        let title = title.unwrap();
        assert_eq!(source_offset(source, title.as_bytes()), Some(10));

        let children = tag.children();
        let text = children
            .top()
            .iter()
            .find_map(|handle| handle.get(parser)?.as_raw())
            .unwrap();
        assert_eq!(source_offset(source, text.as_bytes()), Some(18));

        assert_eq!(source_offset(source, "elsewhere".as_bytes()), None);
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text("第一段 &amp; 说明"), "第一段 & 说明");
        assert_eq!(decode_text("&lt;b&gt; &#x4F60;"), "<b> 你");
        assert_eq!(decode_text("纯文本"), "纯文本");
    }
}
