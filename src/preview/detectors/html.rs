//! HTML detection.
//!
//! Not rule-table driven: HTML confidence comes from structural checks
//! followed by a tag count.

use std::sync::OnceLock;

use regex::Regex;

use crate::preview::regex_detector::compile;
use crate::preview::traits::ContentDetector;
use crate::preview::types::{ContentTypeResult, InferredContentType};

/// Confidence when the content opens with a doctype.
pub const DOCTYPE_CONFIDENCE: f32 = 1.0;
/// Confidence for a complete `<html>…</html>` pair.
pub const FULL_STRUCTURE_CONFIDENCE: f32 = 0.95;
/// `(min_tag_count, confidence)` tiers for loose markup.
pub const TAG_COUNT_TIERS: [(usize, f32); 2] = [(5, 0.9), (2, 0.7)];
/// Confidence for a single recognized tag at the very start of the content.
pub const SINGLE_TAG_CONFIDENCE: f32 = 0.5;

fn re_doctype() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)^\s*<!DOCTYPE\s+html"))
}

/// Whether `content` opens with an HTML doctype, after optional whitespace.
///
/// Shared with the renderers so that anything classified by its doctype is
/// also passed through as a complete document.
pub fn has_doctype(content: &str) -> bool {
    re_doctype().is_match(content)
}

fn re_full_structure() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?is)<html[\s>].*</html>"))
}

fn re_known_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(
            r"(?i)<\s*(html|head|body|div|span|p|a|h[1-6]|script|style|link|meta|table|form|input|button|img|ul|ol|li|nav|header|footer|main|section|article|aside)\b[^>]*>",
        )
    })
}

fn re_self_closing() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)<\s*(br|hr|img|input|meta|link)\s*/?>"))
}

/// Number of recognized tags plus self-closing void tags.
///
/// A bare `<img>` is counted by both patterns.
pub fn tag_count(content: &str) -> usize {
    re_known_tag().find_iter(content).count() + re_self_closing().find_iter(content).count()
}

/// Detects HTML documents and fragments.
pub struct HtmlDetector;

impl ContentDetector for HtmlDetector {
    fn content_type(&self) -> InferredContentType {
        InferredContentType::Html
    }

    fn display_name(&self) -> &str {
        "HTML"
    }

    fn detect(&self, content: &str) -> ContentTypeResult {
        let trimmed = content.trim();
        let html = |confidence| ContentTypeResult::new(InferredContentType::Html, confidence);

        if has_doctype(trimmed) {
            return html(DOCTYPE_CONFIDENCE);
        }
        if re_full_structure().is_match(trimmed) {
            return html(FULL_STRUCTURE_CONFIDENCE);
        }

        let count = tag_count(trimmed);
        for (min_count, confidence) in TAG_COUNT_TIERS {
            if count >= min_count {
                return html(confidence);
            }
        }
        if count == 1 && trimmed.starts_with('<') {
            return html(SINGLE_TAG_CONFIDENCE);
        }
        ContentTypeResult::none(InferredContentType::Html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confidence(content: &str) -> f32 {
        HtmlDetector.detect(content).confidence
    }

    #[test]
    fn test_doctype_is_definitive() {
        assert_eq!(confidence("  \n<!doctype html>\n<p>x</p>"), 1.0);
    }

    #[test]
    fn test_full_structure() {
        assert_eq!(confidence("<html lang=\"en\"><body></body></html>"), 0.95);
    }

    #[test]
    fn test_tag_count_tiers() {
        assert_eq!(
            confidence("<div><span>a</span><p>b</p><ul><li>c</li></ul></div>"),
            0.9
        );
        assert_eq!(confidence("<div>a</div> and <span>b</span>"), 0.7);
        assert_eq!(confidence("<section>lonely"), 0.5);
    }

    #[test]
    fn test_single_tag_not_at_start() {
        assert_eq!(confidence("some text <div> here"), 0.0);
    }

    #[test]
    fn test_void_tags_count_twice() {
        assert_eq!(tag_count("<img>"), 2);
        assert_eq!(tag_count("<br/>"), 1);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(confidence("just words, 3 < 4"), 0.0);
    }
}
