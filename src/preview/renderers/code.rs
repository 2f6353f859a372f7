//! Source listing renderer for stylesheets, scripts and unrecognized code.

use super::{escape_html, file_header, page};
use crate::preview::bundle::language_for_extension;
use crate::preview::traits::ContentRenderer;
use crate::preview::types::{InferredContentType, RenderedDocument, file_extension};

const CODE_CSS: &str = r#"
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: 'JetBrains Mono', ui-monospace, monospace; background: #0f172a; color: #e2e8f0; min-height: 100vh; }
    .code-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 0.75rem 1.25rem;
      background: rgba(99, 102, 241, 0.12);
      border-bottom: 1px solid rgba(99, 102, 241, 0.2);
    }
    .file-info { display: flex; align-items: center; gap: 0.75rem; }
    .file-icon { width: 1.25rem; height: 1.25rem; color: #818cf8; }
    .file-name { font-family: 'Inter', system-ui, sans-serif; font-weight: 600; font-size: 0.875rem; color: #f1f5f9; }
    .language-badge {
      font-family: 'Inter', system-ui, sans-serif;
      font-size: 0.75rem;
      padding: 0.25rem 0.625rem;
      border: 1px solid rgba(99, 102, 241, 0.3);
      border-radius: 9999px;
      color: #a5b4fc;
      text-transform: uppercase;
    }
    .code-container { display: flex; overflow-x: auto; font-size: 0.875rem; line-height: 1.65; }
    .line-numbers {
      display: flex;
      flex-direction: column;
      padding: 1.25rem 0;
      border-right: 1px solid rgba(99, 102, 241, 0.15);
      user-select: none;
      position: sticky;
      left: 0;
      background: #0f172a;
    }
    .line-number { padding: 0 1rem; text-align: right; color: #475569; min-width: 3.5rem; }
    .code-content { flex: 1; padding: 1.25rem 1.5rem; }
    .code-line { display: block; white-space: pre; }
    .code-line:hover { background: rgba(99, 102, 241, 0.08); }
  "#;

/// Line-numbered listing with a language badge.
///
/// One instance is registered per content type it covers (css, javascript,
/// code); the output does not depend on which.
pub struct SourceRenderer {
    content_type: InferredContentType,
}

impl SourceRenderer {
    pub fn new(content_type: InferredContentType) -> Self {
        Self { content_type }
    }
}

/// Gutter and code columns for escaped `content`, one entry per `\n`-split
/// line.
fn listing(content: &str) -> (String, String) {
    let escaped = escape_html(content);
    let mut gutter = String::new();
    let mut code = String::with_capacity(escaped.len() * 2);
    for (i, line) in escaped.split('\n').enumerate() {
        let number = i + 1;
        if i > 0 {
            gutter.push('\n');
            code.push('\n');
        }
        gutter.push_str(&format!("<span class=\"line-number\">{number}</span>"));
        let line = if line.is_empty() { " " } else { line };
        code.push_str(&format!(
            "<span class=\"code-line\" data-line=\"{number}\">{line}</span>"
        ));
    }
    (gutter, code)
}

impl ContentRenderer for SourceRenderer {
    fn content_type(&self) -> InferredContentType {
        self.content_type
    }

    fn display_name(&self) -> &str {
        "Source"
    }

    fn render(&self, content: &str, filename: &str) -> RenderedDocument {
        let language = language_for_extension(&file_extension(filename));
        let (gutter, code) = listing(content);
        let body = format!(
            "{}\n  <div class=\"code-container\">\n    <div class=\"line-numbers\">{gutter}</div>\n    <div class=\"code-content\"><code>{code}</code></div>\n  </div>",
            file_header("code-header", filename, Some(language))
        );
        RenderedDocument::new(page(filename, CODE_CSS, "", &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(content: &str, filename: &str) -> String {
        SourceRenderer::new(InferredContentType::Code)
            .render(content, filename)
            .into_string()
    }

    #[test]
    fn test_one_line_number_per_line() {
        let html = render("a\nb\n\nc", "x.py");
        assert_eq!(html.matches("class=\"line-number\"").count(), 4);
        assert!(html.contains("<span class=\"line-number\">4</span>"));
        assert!(html.contains("<span class=\"code-line\" data-line=\"3\"> </span>"));
    }

    #[test]
    fn test_trailing_newline_counts_as_line() {
        let html = render("x\n", "a.js");
        assert_eq!(html.matches("class=\"line-number\"").count(), 2);
    }

    #[test]
    fn test_language_badge() {
        assert!(render("fn main() {}", "main.rs").contains("<span class=\"language-badge\">rust</span>"));
        assert!(render("???", "notes.weird").contains("<span class=\"language-badge\">plaintext</span>"));
    }

    #[test]
    fn test_content_is_escaped() {
        let html = render("if (a < b && c) {}", "a.js");
        assert!(html.contains("if (a &lt; b &amp;&amp; c) {}"));
    }
}
