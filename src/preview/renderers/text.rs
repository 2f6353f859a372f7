//! Plain text renderer.

use super::{escape_html, file_header, page};
use crate::preview::traits::ContentRenderer;
use crate::preview::types::{InferredContentType, RenderedDocument};

const TEXT_CSS: &str = r#"
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: 'Inter', system-ui, -apple-system, sans-serif; background: #0f172a; color: #e2e8f0; min-height: 100vh; padding: 2rem; }
    .text-header {
      display: flex;
      align-items: center;
      gap: 0.75rem;
      padding-bottom: 1rem;
      margin-bottom: 1.5rem;
      border-bottom: 1px solid rgba(148, 163, 184, 0.2);
    }
    .file-info { display: flex; align-items: center; gap: 0.75rem; }
    .file-icon { width: 1.25rem; height: 1.25rem; color: #94a3b8; }
    .file-name { font-weight: 600; font-size: 0.875rem; color: #f1f5f9; }
    .text-content { white-space: pre-wrap; word-wrap: break-word; line-height: 1.7; }
  "#;

/// Escaped text with whitespace preserved under a filename header.
pub struct TextRenderer;

impl ContentRenderer for TextRenderer {
    fn content_type(&self) -> InferredContentType {
        InferredContentType::Text
    }

    fn display_name(&self) -> &str {
        "Text"
    }

    fn render(&self, content: &str, filename: &str) -> RenderedDocument {
        let body = format!(
            "{}\n  <div class=\"text-content\">{}</div>",
            file_header("text-header", filename, None),
            escape_html(content)
        );
        RenderedDocument::new(page(filename, TEXT_CSS, "", &body))
    }
}
