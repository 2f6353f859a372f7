//! Built-in Markdown detection rules.
//!
//! Every rule contributes its weight once when present; two or more header
//! lines add a bonus. Confidence is `min(score / MARKDOWN_SCORE_DIVISOR, 1)`.

use crate::preview::regex_detector::{RegexDetector, RegexDetectorBuilder, RuleSpec};
use crate::preview::types::InferredContentType;

/// Score at which Markdown confidence saturates at 1.0.
pub const MARKDOWN_SCORE_DIVISOR: f32 = 4.0;

const HEADER: &str = r"(?m)^#{1,6}[ \t]+\S.*$";

/// Weighted Markdown signals.
pub const MARKDOWN_RULES: &[RuleSpec] = &[
    RuleSpec::primary("md_header", HEADER, 2.0, "ATX header (# through ######)"),
    RuleSpec::primary("md_link", r"\[[^\]\n]+\]\([^)\n]+\)", 3.0, "Inline link [text](url)"),
    RuleSpec::primary("md_image", r"!\[[^\]\n]*\]\([^)\n]+\)", 3.0, "Image ![alt](src)"),
    RuleSpec::primary("md_fenced_code", r"(?s)```.*?```", 3.0, "Fenced code block"),
    RuleSpec::primary("md_inline_code", r"`[^`\n]+`", 1.0, "Inline code span"),
    RuleSpec::primary("md_bold", r"\*\*[^*\n]+\*\*|__[^_\n]+__", 1.0, "Bold emphasis"),
    RuleSpec::primary("md_italic", r"\*[^*\n]+\*|_[^_\n]+_", 1.0, "Italic emphasis"),
    RuleSpec::primary("md_unordered_list", r"(?m)^[ \t]*[-*+][ \t]+\S.*$", 1.5, "Bullet list item"),
    RuleSpec::primary("md_ordered_list", r"(?m)^[ \t]*\d+\.[ \t]+\S.*$", 1.5, "Numbered list item"),
    RuleSpec::primary("md_blockquote", r"(?m)^>[ \t]+\S.*$", 2.0, "Blockquote line"),
    RuleSpec::primary("md_horizontal_rule", r"(?m)^[-*_]{3,}[ \t]*$", 1.0, "Horizontal rule"),
    RuleSpec::primary("md_table", r"\|.+\|[\r\n]+\|[-:| ]+\|", 3.0, "Pipe table with separator row"),
    RuleSpec {
        min_matches: 2,
        ..RuleSpec::primary("md_multiple_headers", HEADER, 2.0, "Two or more header lines")
    },
];

/// Create the built-in Markdown detector.
pub fn create_markdown_detector() -> RegexDetector {
    RegexDetectorBuilder::new(InferredContentType::Markdown, "Markdown")
        .rules(MARKDOWN_RULES)
        .normalized(MARKDOWN_SCORE_DIVISOR)
        .build()
}
