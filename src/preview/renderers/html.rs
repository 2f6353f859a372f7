//! Markup renderer.

use super::{is_full_document, minimal_shell};
use crate::preview::traits::ContentRenderer;
use crate::preview::types::{InferredContentType, RenderedDocument};

/// Passes full documents through untouched and wraps fragments in a minimal
/// shell with the reset stylesheet.
pub struct HtmlRenderer;

impl ContentRenderer for HtmlRenderer {
    fn content_type(&self) -> InferredContentType {
        InferredContentType::Html
    }

    fn display_name(&self) -> &str {
        "HTML"
    }

    fn render(&self, content: &str, _filename: &str) -> RenderedDocument {
        if is_full_document(content) {
            return RenderedDocument::new(content.to_string());
        }
        RenderedDocument::new(minimal_shell(content, "", None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document_unchanged() {
        let doc = "<!DOCTYPE html>\n<html><body><p>x</p></body></html>";
        assert_eq!(HtmlRenderer.render(doc, "index.html").as_str(), doc);
    }

    #[test]
    fn test_fragment_wrapped() {
        let out = HtmlRenderer.render("<h1>Hi</h1>", "frag.html");
        assert!(out.as_str().starts_with("<!DOCTYPE html>"));
        assert!(out.as_str().contains("<body>\n  <h1>Hi</h1>\n</body>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let once = HtmlRenderer.render("<p>frag</p>", "a.html");
        let twice = HtmlRenderer.render(once.as_str(), "a.html");
        assert_eq!(once, twice);
    }
}
