//! Built-in React component detection rules.

use crate::preview::regex_detector::{RegexDetector, RegexDetectorBuilder, RuleSpec};
use crate::preview::types::InferredContentType;

/// `(min_score, confidence)` tiers.
pub const REACT_TIERS: &[(f32, f32)] = &[(5.0, 0.95), (3.0, 0.75)];

/// Weighted component-source signals.
pub const REACT_RULES: &[RuleSpec] = &[
    RuleSpec::primary("react_jsx_tag", r"<[A-Z][\w.]*[\s/>]|<>", 1.5, "Component tag or fragment"),
    RuleSpec::primary(
        "react_import",
        r#"import\s+(React\b|\{[^}]*\buse[A-Z])[^;\n]*from\s*['"]react['"]"#,
        2.0,
        "Framework import (default or hooks)",
    ),
    RuleSpec::primary(
        "react_class_component",
        r"class\s+\w+\s+extends\s+(React\.)?(Pure)?Component\b",
        2.0,
        "Class component",
    ),
    RuleSpec::primary("react_create_element", r"React\.createElement\s*\(", 1.5, "createElement call"),
    RuleSpec::primary("react_event_prop", r"\son[A-Z]\w*=\{", 1.5, "Event handler prop"),
    RuleSpec::primary(
        "react_hook_call",
        r"\buse(State|Effect|Context|Reducer|Callback|Memo|Ref|LayoutEffect|Id|Transition|DeferredValue)\s*\(",
        1.5,
        "Hook call",
    ),
    RuleSpec::primary("react_return_jsx", r"return\s*\(?\s*<[A-Za-z>]", 2.0, "return wrapping JSX"),
];

/// Create the built-in React detector.
pub fn create_react_detector() -> RegexDetector {
    RegexDetectorBuilder::new(InferredContentType::React, "React")
        .rules(REACT_RULES)
        .tiers(REACT_TIERS)
        .build()
}
