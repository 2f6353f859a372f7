//! Core data types for the preview pipeline.

use std::fmt;

/// A single named text file of a bundle.
///
/// Identity is the filename within its bundle. Files are immutable once
/// constructed; the pipeline only ever borrows them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    /// Filename, unique within the bundle.
    pub filename: String,
    /// Full text content.
    pub content: String,
}

impl File {
    /// Create a file from a name and its content.
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Lowercased extension after the last `.`, or `""` when there is none.
    pub fn extension(&self) -> String {
        file_extension(&self.filename)
    }
}

/// Lowercased substring after the last `.` of `filename`; `""` if it has no dot.
pub fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// The classifier's judgment of what a file contains.
///
/// Derived, never stored: always recomputed from `(content, filename)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferredContentType {
    Html,
    Markdown,
    Json,
    Css,
    JavaScript,
    /// Component source in the JSX / TSX dialect.
    React,
    /// Source code of an unrecognized language.
    Code,
    /// Anything else.
    Text,
}

impl InferredContentType {
    /// Every variant, in detector evaluation order followed by the fallbacks.
    pub const ALL: [InferredContentType; 8] = [
        InferredContentType::Html,
        InferredContentType::Markdown,
        InferredContentType::Json,
        InferredContentType::Css,
        InferredContentType::JavaScript,
        InferredContentType::React,
        InferredContentType::Code,
        InferredContentType::Text,
    ];

    /// Stable lowercase identifier (`"html"`, `"markdown"`, …).
    pub fn as_str(&self) -> &'static str {
        match self {
            InferredContentType::Html => "html",
            InferredContentType::Markdown => "markdown",
            InferredContentType::Json => "json",
            InferredContentType::Css => "css",
            InferredContentType::JavaScript => "javascript",
            InferredContentType::React => "react",
            InferredContentType::Code => "code",
            InferredContentType::Text => "text",
        }
    }

    /// Human-readable label for badges and listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            InferredContentType::Html => "HTML",
            InferredContentType::Markdown => "Markdown",
            InferredContentType::Json => "JSON",
            InferredContentType::Css => "CSS",
            InferredContentType::JavaScript => "JavaScript",
            InferredContentType::React => "React",
            InferredContentType::Code => "Code",
            InferredContentType::Text => "Text",
        }
    }

    /// Whether the rendered document is a live page rather than a source view.
    pub fn renders_as_web_page(&self) -> bool {
        matches!(
            self,
            InferredContentType::Html | InferredContentType::Markdown | InferredContentType::React
        )
    }
}

impl fmt::Display for InferredContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detector's verdict. Internal to classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentTypeResult {
    /// The type this detector votes for.
    pub content_type: InferredContentType,
    /// Confidence score from 0.0 to 1.0.
    pub confidence: f32,
}

impl ContentTypeResult {
    /// A verdict with the given confidence, clamped into `[0, 1]`.
    pub fn new(content_type: InferredContentType, confidence: f32) -> Self {
        Self {
            content_type,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// A zero-confidence verdict.
    pub fn none(content_type: InferredContentType) -> Self {
        Self::new(content_type, 0.0)
    }
}

/// A complete, standalone HTML document ready for a sandboxed frame.
///
/// Every synthesizer returns a full document; none produce fragments that
/// expect further merging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    /// The document markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the markup.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RenderedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_suffix() {
        assert_eq!(file_extension("index.HTML"), "html");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("Makefile"), "");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn test_result_confidence_is_clamped() {
        let r = ContentTypeResult::new(InferredContentType::Markdown, 1.75);
        assert_eq!(r.confidence, 1.0);
        let r = ContentTypeResult::new(InferredContentType::Markdown, -0.5);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_type_identifiers() {
        assert_eq!(InferredContentType::JavaScript.as_str(), "javascript");
        assert_eq!(InferredContentType::Json.display_name(), "JSON");
        assert_eq!(InferredContentType::React.to_string(), "react");
        assert!(InferredContentType::Markdown.renders_as_web_page());
        assert!(!InferredContentType::Css.renders_as_web_page());
    }
}
