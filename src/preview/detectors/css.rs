//! Built-in CSS detection rules.
//!
//! Four primary signals each add 1.0. Three or more `{` add one more point,
//! but only once at least two primary signals matched.

use crate::preview::regex_detector::{RegexDetector, RegexDetectorBuilder, RuleSpec};
use crate::preview::types::InferredContentType;

/// `(min_score, confidence)` tiers.
pub const CSS_TIERS: &[(f32, f32)] = &[(3.0, 0.9), (2.0, 0.6)];

/// Primary signals needed before the brace count contributes.
pub const CSS_SUPPORTING_REQUIRES: usize = 2;

/// Weighted CSS signals.
pub const CSS_RULES: &[RuleSpec] = &[
    RuleSpec::primary("css_selector_block", r"[.#]?[a-zA-Z_-]+\s*\{[^}]*\}", 1.0, "Selector followed by a block"),
    RuleSpec::primary("css_at_rule", r"@(media|keyframes|import|font-face)\s", 1.0, "At-rule"),
    RuleSpec::primary("css_color_value", r":\s*(#[0-9a-fA-F]{3,8}|rgba?\(|hsla?\()", 1.0, "Color value"),
    RuleSpec::primary(
        "css_unit_declaration",
        r":[^;{}\n]*\d(px|em|rem|%|vh|vw)\b[^;{}\n]*;",
        1.0,
        "Declaration with a length unit",
    ),
    RuleSpec {
        min_matches: 3,
        strength: crate::preview::regex_detector::RuleStrength::Supporting,
        ..RuleSpec::primary("css_many_blocks", r"\{", 1.0, "Three or more blocks")
    },
];

/// Create the built-in CSS detector.
pub fn create_css_detector() -> RegexDetector {
    RegexDetectorBuilder::new(InferredContentType::Css, "CSS")
        .rules(CSS_RULES)
        .supporting_requires(CSS_SUPPORTING_REQUIRES)
        .tiers(CSS_TIERS)
        .build()
}
