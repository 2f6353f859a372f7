//! Built-in JavaScript detection rules.

use crate::preview::regex_detector::{RegexDetector, RegexDetectorBuilder, RuleSpec};
use crate::preview::types::InferredContentType;

/// `(min_score, confidence)` tiers.
pub const JAVASCRIPT_TIERS: &[(f32, f32)] = &[(3.0, 0.9), (1.5, 0.6)];

/// Weighted JavaScript signals.
pub const JAVASCRIPT_RULES: &[RuleSpec] = &[
    RuleSpec::primary(
        "js_keyword",
        r"\b(function|const|let|var|class|import|export|return|if|else|for|while|switch)\b",
        1.0,
        "Declaration or control-flow keyword",
    ),
    RuleSpec::primary("js_arrow_function", r"=>\s*[{(\w]", 1.0, "Arrow function"),
    RuleSpec::primary("js_promise_chain", r"\.\s*(then|catch|finally)\s*\(", 1.0, "Promise chain"),
    RuleSpec::primary(
        "js_console_call",
        r"\bconsole\.(log|error|warn|info|debug)\s*\(",
        1.5,
        "console call",
    ),
    RuleSpec::primary(
        "js_dom_call",
        r"\bdocument\.(getElementById|getElementsBy\w+|querySelector(All)?|createElement|addEventListener)\s*\(",
        1.5,
        "DOM API call",
    ),
    RuleSpec::primary("js_global_object", r"\b(window|globalThis)\.", 0.5, "Global object reference"),
    RuleSpec::primary(
        "js_builtin_constructor",
        r"\bnew\s+(Promise|Map|Set|WeakMap|Array|Object|Date|Error|RegExp|URL)\s*\(",
        1.0,
        "Built-in constructor call",
    ),
    RuleSpec::primary("js_async", r"\basync\s+(function\b|\()|\bawait\s+", 1.0, "async / await"),
];

/// Create the built-in JavaScript detector.
pub fn create_javascript_detector() -> RegexDetector {
    RegexDetectorBuilder::new(InferredContentType::JavaScript, "JavaScript")
        .rules(JAVASCRIPT_RULES)
        .tiers(JAVASCRIPT_TIERS)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::traits::ContentDetector;

    #[test]
    fn test_script() {
        let js = "const btn = document.querySelector('#go');\nbtn.addEventListener('click', () => {\n  console.log('hi');\n});";
        assert_eq!(create_javascript_detector().detect(js).confidence, 0.9);
    }

    #[test]
    fn test_medium_signal() {
        let js = "fetch(url).then(r => r.json())";
        let detector = create_javascript_detector();
        assert_eq!(
            detector.score(js).matched_rules,
            vec!["js_arrow_function", "js_promise_chain"]
        );
        assert_eq!(detector.detect(js).confidence, 0.6);
    }

    #[test]
    fn test_prose_with_keyword_is_not_script() {
        let prose = "We waited for the bus while it rained.";
        assert_eq!(create_javascript_detector().detect(prose).confidence, 0.0);
    }
}
