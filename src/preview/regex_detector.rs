//! Standard regex-based content detector with weighted confidence scoring.
//!
//! `RegexDetector` is the concrete `ContentDetector` behind the Markdown, CSS,
//! JavaScript and React detectors. It evaluates a table of `DetectionRule`s
//! against raw content, sums the weights of the rules that fire, and maps the
//! sum to a confidence through a `ScoreMapping` (threshold tiers or a
//! normalizing divisor).

use regex::Regex;

use super::traits::ContentDetector;
use super::types::{ContentTypeResult, InferredContentType};

/// How strong a signal a detection rule provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStrength {
    /// Counts on its own.
    Primary,
    /// Only counts once enough primary rules have matched
    /// (see [`RegexDetectorBuilder::supporting_requires`]).
    Supporting,
}

/// A single weighted regex rule.
///
/// `Clone` is not derived because `regex::Regex` clones are not free; use
/// `id` to refer to a rule.
#[derive(Debug)]
pub struct DetectionRule {
    /// Unique ID for this rule within its detector.
    pub id: &'static str,
    /// The compiled pattern.
    pub pattern: Regex,
    /// Score contributed when the rule fires.
    pub weight: f32,
    /// Number of non-overlapping matches needed for the rule to fire.
    pub min_matches: usize,
    /// Whether the rule needs corroboration.
    pub strength: RuleStrength,
    /// Human-readable description.
    pub description: &'static str,
}

impl DetectionRule {
    /// A primary rule that fires on the first match.
    pub fn new(id: &'static str, pattern: &str, weight: f32, description: &'static str) -> Self {
        Self {
            id,
            pattern: compile(pattern),
            weight,
            min_matches: 1,
            strength: RuleStrength::Primary,
            description,
        }
    }

    /// Require at least `n` matches before the rule fires.
    pub fn min_matches(mut self, n: usize) -> Self {
        self.min_matches = n.max(1);
        self
    }

    /// Mark the rule as supporting.
    pub fn supporting(mut self) -> Self {
        self.strength = RuleStrength::Supporting;
        self
    }

    /// Whether the rule fires for `content`.
    pub fn fires(&self, content: &str) -> bool {
        if self.min_matches <= 1 {
            self.pattern.is_match(content)
        } else {
            self.pattern.find_iter(content).take(self.min_matches).count() >= self.min_matches
        }
    }
}

/// Static description of a built-in rule, compiled by
/// [`RegexDetectorBuilder::rules`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSpec {
    pub id: &'static str,
    pub pattern: &'static str,
    pub weight: f32,
    pub min_matches: usize,
    pub strength: RuleStrength,
    pub description: &'static str,
}

impl RuleSpec {
    /// A primary rule that fires on the first match.
    pub const fn primary(
        id: &'static str,
        pattern: &'static str,
        weight: f32,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            pattern,
            weight,
            min_matches: 1,
            strength: RuleStrength::Primary,
            description,
        }
    }

    /// Compile into a `DetectionRule`.
    pub fn compile(&self) -> DetectionRule {
        DetectionRule {
            id: self.id,
            pattern: compile(self.pattern),
            weight: self.weight,
            min_matches: self.min_matches.max(1),
            strength: self.strength,
            description: self.description,
        }
    }
}

/// Compile a built-in pattern.
///
/// Built-in patterns are literals covered by the detector tests.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in detection pattern is valid and should always compile")
}

/// Minimum score that maps to a confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceTier {
    /// Inclusive lower bound on the summed rule weight.
    pub min_score: f32,
    /// Confidence reported when the score reaches `min_score`.
    pub confidence: f32,
}

/// Maps a summed rule weight to a confidence.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreMapping {
    /// First tier (ordered by descending `min_score`) whose bound is met wins;
    /// below every tier the confidence is zero.
    Tiers(Vec<ConfidenceTier>),
    /// `min(score / divisor, 1.0)`.
    Normalized { divisor: f32 },
}

impl ScoreMapping {
    /// Confidence for a raw score.
    pub fn confidence(&self, score: f32) -> f32 {
        match self {
            ScoreMapping::Tiers(tiers) => tiers
                .iter()
                .find(|tier| score >= tier.min_score)
                .map(|tier| tier.confidence)
                .unwrap_or(0.0),
            ScoreMapping::Normalized { divisor } => (score / divisor).min(1.0),
        }
    }
}

/// Outcome of evaluating a rule table, before mapping to a confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScore {
    /// Sum of the weights of fired rules.
    pub score: f32,
    /// IDs of fired rules, in table order.
    pub matched_rules: Vec<&'static str>,
}

/// A regex-based detector with weighted confidence scoring.
pub struct RegexDetector {
    content_type: InferredContentType,
    display_name: String,
    rules: Vec<DetectionRule>,
    mapping: ScoreMapping,
    supporting_requires: usize,
}

impl RegexDetector {
    /// Evaluate the rule table against `content`.
    pub fn score(&self, content: &str) -> RuleScore {
        let mut score = 0.0;
        let mut primary_matches = 0;
        let mut matched_rules = Vec::new();

        for rule in self.rules.iter().filter(|r| r.strength == RuleStrength::Primary) {
            if rule.fires(content) {
                score += rule.weight;
                primary_matches += 1;
                matched_rules.push(rule.id);
            }
        }

        if primary_matches >= self.supporting_requires {
            for rule in self
                .rules
                .iter()
                .filter(|r| r.strength == RuleStrength::Supporting)
            {
                if rule.fires(content) {
                    score += rule.weight;
                    matched_rules.push(rule.id);
                }
            }
        }

        RuleScore {
            score,
            matched_rules,
        }
    }

    /// The score-to-confidence mapping.
    pub fn mapping(&self) -> &ScoreMapping {
        &self.mapping
    }
}

impl ContentDetector for RegexDetector {
    fn content_type(&self) -> InferredContentType {
        self.content_type
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn detect(&self, content: &str) -> ContentTypeResult {
        let RuleScore {
            score,
            matched_rules,
        } = self.score(content);
        let confidence = self.mapping.confidence(score);
        crate::debug_trace!(
            "CLASSIFY",
            "{}: score={:.2} confidence={:.2} rules={:?}",
            self.display_name,
            score,
            confidence,
            matched_rules
        );
        ContentTypeResult::new(self.content_type, confidence)
    }

    fn detection_rules(&self) -> &[DetectionRule] {
        &self.rules
    }
}

/// Builder for constructing `RegexDetector` instances.
pub struct RegexDetectorBuilder {
    content_type: InferredContentType,
    display_name: String,
    rules: Vec<DetectionRule>,
    mapping: ScoreMapping,
    supporting_requires: usize,
}

impl RegexDetectorBuilder {
    /// Create a new builder for the given type and display name.
    pub fn new(content_type: InferredContentType, display_name: impl Into<String>) -> Self {
        Self {
            content_type,
            display_name: display_name.into(),
            rules: Vec::new(),
            mapping: ScoreMapping::Normalized { divisor: 1.0 },
            supporting_requires: 1,
        }
    }

    /// Add a detection rule.
    pub fn rule(mut self, rule: DetectionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add every rule of a static table, in order.
    pub fn rules(mut self, specs: &[RuleSpec]) -> Self {
        self.rules.extend(specs.iter().map(RuleSpec::compile));
        self
    }

    /// Map scores through descending `(min_score, confidence)` tiers.
    pub fn tiers(mut self, tiers: &[(f32, f32)]) -> Self {
        let mut tiers: Vec<ConfidenceTier> = tiers
            .iter()
            .map(|&(min_score, confidence)| ConfidenceTier {
                min_score,
                confidence,
            })
            .collect();
        tiers.sort_by(|a, b| b.min_score.total_cmp(&a.min_score));
        self.mapping = ScoreMapping::Tiers(tiers);
        self
    }

    /// Map scores as `min(score / divisor, 1.0)`.
    pub fn normalized(mut self, divisor: f32) -> Self {
        self.mapping = ScoreMapping::Normalized { divisor };
        self
    }

    /// Number of primary matches needed before supporting rules count (default: 1).
    pub fn supporting_requires(mut self, n: usize) -> Self {
        self.supporting_requires = n;
        self
    }

    /// Build the `RegexDetector`.
    pub fn build(self) -> RegexDetector {
        RegexDetector {
            content_type: self.content_type,
            display_name: self.display_name,
            rules: self.rules,
            mapping: self.mapping,
            supporting_requires: self.supporting_requires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rule_detector() -> RegexDetector {
        RegexDetectorBuilder::new(InferredContentType::Markdown, "Markdown")
            .rule(DetectionRule::new("md_header", r"(?m)^#{1,6}\s", 2.0, "header"))
            .rule(DetectionRule::new("md_bold", r"\*\*[^*]+\*\*", 1.0, "bold"))
            .normalized(4.0)
            .build()
    }

    #[test]
    fn test_basic_scoring() {
        let detector = two_rule_detector();
        let score = detector.score("# Hello\nThis is **bold** text");
        assert_eq!(score.score, 3.0);
        assert_eq!(score.matched_rules, vec!["md_header", "md_bold"]);
        let result = detector.detect("# Hello\nThis is **bold** text");
        assert!((result.confidence - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_match_is_zero() {
        let detector = two_rule_detector();
        assert_eq!(detector.detect("plain words").confidence, 0.0);
    }

    #[test]
    fn test_tiers_pick_highest_reached() {
        let mapping = ScoreMapping::Tiers(vec![
            ConfidenceTier {
                min_score: 3.0,
                confidence: 0.9,
            },
            ConfidenceTier {
                min_score: 1.5,
                confidence: 0.6,
            },
        ]);
        assert_eq!(mapping.confidence(4.0), 0.9);
        assert_eq!(mapping.confidence(3.0), 0.9);
        assert_eq!(mapping.confidence(2.0), 0.6);
        assert_eq!(mapping.confidence(1.0), 0.0);
    }

    #[test]
    fn test_builder_sorts_tiers_descending() {
        let detector = RegexDetectorBuilder::new(InferredContentType::Css, "CSS")
            .tiers(&[(2.0, 0.6), (3.0, 0.9)])
            .build();
        match detector.mapping() {
            ScoreMapping::Tiers(tiers) => {
                assert_eq!(tiers[0].min_score, 3.0);
                assert_eq!(tiers[1].min_score, 2.0);
            }
            other => panic!("unexpected mapping {other:?}"),
        }
    }

    #[test]
    fn test_min_matches() {
        let rule = DetectionRule::new("braces", r"\{", 1.0, "braces").min_matches(3);
        assert!(!rule.fires("{ {"));
        assert!(rule.fires("{ { {"));
    }

    #[test]
    fn test_supporting_rule_needs_corroboration() {
        let detector = RegexDetectorBuilder::new(InferredContentType::Css, "CSS")
            .rule(DetectionRule::new("a", "alpha", 1.0, "a"))
            .rule(DetectionRule::new("b", "beta", 1.0, "b"))
            .rule(DetectionRule::new("s", "gamma", 1.0, "s").supporting())
            .supporting_requires(2)
            .tiers(&[(3.0, 0.9)])
            .build();

        assert_eq!(detector.score("alpha gamma").score, 1.0);
        assert_eq!(detector.score("alpha beta gamma").score, 3.0);
        assert_eq!(detector.detect("alpha beta gamma").confidence, 0.9);
    }
}
