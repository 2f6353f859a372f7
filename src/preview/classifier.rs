//! Content type classification.
//!
//! `Classifier` decides an [`InferredContentType`] for `(content, filename)`:
//!
//! 1. A definitive extension (`html`, `md`, `json`, `css`, `jsx`, `tsx`, …)
//!    is returned immediately.
//! 2. A script extension (`js`, `ts`, …) is a hint: only the JavaScript and
//!    React detectors vote.
//! 3. Otherwise every built-in detector scores the content; the highest
//!    confidence wins, earliest detector on ties, if it reaches the threshold.
//! 4. Below the threshold, a coarse character-class count separates generic
//!    source code from plain text.

use std::sync::OnceLock;

use gist_preview_config::ClassifierConfig;
use regex::Regex;

use super::detectors::default_detectors;
use super::regex_detector::compile;
use super::traits::ContentDetector;
use super::types::{ContentTypeResult, InferredContentType, file_extension};

/// How a filename extension steers classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionRule {
    /// The extension alone decides the type.
    Definitive(InferredContentType),
    /// A script file: JavaScript unless the content reads as a component.
    ScriptHint,
}

/// Extension table consulted before any content scoring.
pub const EXTENSION_RULES: &[(&str, ExtensionRule)] = &[
    ("html", ExtensionRule::Definitive(InferredContentType::Html)),
    ("htm", ExtensionRule::Definitive(InferredContentType::Html)),
    ("md", ExtensionRule::Definitive(InferredContentType::Markdown)),
    ("markdown", ExtensionRule::Definitive(InferredContentType::Markdown)),
    ("json", ExtensionRule::Definitive(InferredContentType::Json)),
    ("css", ExtensionRule::Definitive(InferredContentType::Css)),
    ("jsx", ExtensionRule::Definitive(InferredContentType::React)),
    ("tsx", ExtensionRule::Definitive(InferredContentType::React)),
    ("js", ExtensionRule::ScriptHint),
    ("mjs", ExtensionRule::ScriptHint),
    ("cjs", ExtensionRule::ScriptHint),
    ("ts", ExtensionRule::ScriptHint),
    ("mts", ExtensionRule::ScriptHint),
    ("cts", ExtensionRule::ScriptHint),
];

/// Minimum React confidence for a hinted script file to count as a component.
pub const SCRIPT_HINT_REACT_THRESHOLD: f32 = 0.5;

/// Look up the extension rule for a lowercased extension.
pub fn extension_rule(ext: &str) -> Option<ExtensionRule> {
    EXTENSION_RULES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, rule)| *rule)
}

fn re_code_punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"[{}\[\]();]"))
}

fn re_code_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(r"\b(function|class|import|export|const|let|var|def|return|if|else|for|while)\b")
    })
}

fn re_code_operator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"[=<>!]+"))
}

/// Match counts for the generic-code fallback, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeSignals {
    /// Brackets, parentheses and semicolons.
    pub punctuation: usize,
    /// Common source keywords across languages.
    pub keywords: usize,
    /// Runs of comparison / assignment operator characters.
    pub operators: usize,
}

impl CodeSignals {
    /// Count every category in `content`.
    pub fn count(content: &str) -> Self {
        Self {
            punctuation: re_code_punctuation().find_iter(content).count(),
            keywords: re_code_keyword().find_iter(content).count(),
            operators: re_code_operator().find_iter(content).count(),
        }
    }

    /// Number of categories with strictly more than `min_matches` matches.
    pub fn qualifying(&self, min_matches: usize) -> usize {
        [self.punctuation, self.keywords, self.operators]
            .into_iter()
            .filter(|&n| n > min_matches)
            .count()
    }
}

/// Ordered detector table plus acceptance thresholds.
pub struct Classifier {
    detectors: Vec<Box<dyn ContentDetector>>,
    config: ClassifierConfig,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl Classifier {
    /// Classifier with the built-in detectors.
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_detectors(default_detectors(), config)
    }

    /// Classifier with a custom detector table, evaluated in the given order.
    pub fn with_detectors(
        detectors: Vec<Box<dyn ContentDetector>>,
        config: ClassifierConfig,
    ) -> Self {
        Self { detectors, config }
    }

    /// Active thresholds.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Number of detectors.
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Classify `content` named `filename`. Total; defaults to `Text`.
    pub fn classify(&self, content: &str, filename: &str) -> InferredContentType {
        let ext = file_extension(filename);
        match extension_rule(&ext) {
            Some(ExtensionRule::Definitive(content_type)) => {
                crate::debug_log!(
                    "CLASSIFY",
                    "{}: extension .{} -> {}",
                    filename,
                    ext,
                    content_type
                );
                content_type
            }
            Some(ExtensionRule::ScriptHint) => self.classify_script(content, filename),
            None => self.classify_content(content, filename),
        }
    }

    /// Best detector verdict over the whole table.
    ///
    /// Only a strictly greater confidence replaces the current best, so the
    /// earlier detector wins on ties.
    pub fn best_match(&self, content: &str) -> Option<ContentTypeResult> {
        let mut best: Option<ContentTypeResult> = None;
        for detector in &self.detectors {
            let result = detector.detect(content);
            crate::debug_trace!(
                "CLASSIFY",
                "detector {} confidence={:.2}",
                detector.display_name(),
                result.confidence
            );
            let dominated = match &best {
                Some(current) => result.confidence > current.confidence,
                None => true,
            };
            if dominated {
                best = Some(result);
            }
        }
        best
    }

    fn classify_content(&self, content: &str, filename: &str) -> InferredContentType {
        if let Some(best) = self
            .best_match(content)
            .filter(|r| r.confidence >= self.config.confidence_threshold)
        {
            crate::debug_log!(
                "CLASSIFY",
                "{}: scored {} confidence={:.2}",
                filename,
                best.content_type,
                best.confidence
            );
            return best.content_type;
        }

        let signals = CodeSignals::count(content);
        let qualifying = signals.qualifying(self.config.code_fallback_min_matches);
        let content_type = if qualifying >= self.config.code_fallback_min_categories {
            InferredContentType::Code
        } else {
            InferredContentType::Text
        };
        crate::debug_log!(
            "CLASSIFY",
            "{}: below threshold, fallback {:?} -> {}",
            filename,
            signals,
            content_type
        );
        content_type
    }

    fn classify_script(&self, content: &str, filename: &str) -> InferredContentType {
        let confidence_of = |wanted: InferredContentType| {
            self.detectors
                .iter()
                .find(|d| d.content_type() == wanted)
                .map(|d| d.detect(content).confidence)
                .unwrap_or(0.0)
        };
        let js = confidence_of(InferredContentType::JavaScript);
        let react = confidence_of(InferredContentType::React);
        let content_type = if react >= SCRIPT_HINT_REACT_THRESHOLD && react >= js {
            InferredContentType::React
        } else {
            InferredContentType::JavaScript
        };
        crate::debug_log!(
            "CLASSIFY",
            "{}: script hint js={:.2} react={:.2} -> {}",
            filename,
            js,
            react,
            content_type
        );
        content_type
    }
}

/// Classify with the default thresholds.
pub fn classify(content: &str, filename: &str) -> InferredContentType {
    static DEFAULT: OnceLock<Classifier> = OnceLock::new();
    DEFAULT.get_or_init(Classifier::default).classify(content, filename)
}
