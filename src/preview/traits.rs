//! Core traits for the preview pipeline.

use super::regex_detector::DetectionRule;
use super::types::{ContentTypeResult, InferredContentType, RenderedDocument};

/// Scores how strongly a piece of content looks like one specific type.
///
/// Implementations must be `Send + Sync` so a classifier can be shared
/// across threads.
pub trait ContentDetector: Send + Sync {
    /// The type this detector votes for.
    fn content_type(&self) -> InferredContentType;

    /// Human-readable name for diagnostics.
    fn display_name(&self) -> &str;

    /// Score raw content. Always returns a verdict; zero confidence means
    /// "not this type".
    fn detect(&self, content: &str) -> ContentTypeResult;

    /// The weighted rules powering this detector, for inspection in tests
    /// and diagnostics. Detectors that do not use rule tables return `&[]`.
    fn detection_rules(&self) -> &[DetectionRule] {
        &[]
    }
}

/// Turns the content of one file into a standalone HTML document.
///
/// Renderers are total: malformed input degrades to escaped or raw output
/// rather than an error. The component renderer reports transform failures
/// as an error document.
pub trait ContentRenderer: Send + Sync {
    /// The content type this renderer handles.
    fn content_type(&self) -> InferredContentType;

    /// Human-readable name for diagnostics.
    fn display_name(&self) -> &str;

    /// Render `content`; `filename` feeds headers, badges and error messages.
    fn render(&self, content: &str, filename: &str) -> RenderedDocument;
}
