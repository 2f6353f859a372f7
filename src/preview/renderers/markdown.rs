//! Markdown renderer (CommonMark + GFM via `pulldown-cmark`).

use std::sync::OnceLock;

use gist_preview_config::MarkdownConfig;
use pulldown_cmark::{CowStr, Event, Options, Parser, html};
use regex::Regex;

use super::page;
use crate::preview::regex_detector::compile;
use crate::preview::traits::ContentRenderer;
use crate::preview::types::{InferredContentType, RenderedDocument};

const MARKDOWN_CSS: &str = r#"
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: 'Inter', system-ui, -apple-system, sans-serif;
      line-height: 1.7;
      color: #e2e8f0;
      background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);
      padding: 2.5rem;
      min-height: 100vh;
    }
    .markdown-body { max-width: 48rem; margin: 0 auto; }
    h1, h2, h3, h4, h5, h6 {
      font-weight: 600;
      line-height: 1.3;
      margin-top: 2rem;
      margin-bottom: 1rem;
      color: #f1f5f9;
    }
    h1 { font-size: 2.25rem; border-bottom: 2px solid rgba(99, 102, 241, 0.4); padding-bottom: 0.75rem; margin-top: 0; }
    h2 { font-size: 1.75rem; border-bottom: 1px solid rgba(99, 102, 241, 0.25); padding-bottom: 0.5rem; }
    h3 { font-size: 1.375rem; }
    h4 { font-size: 1.125rem; }
    h6 { font-size: 0.875rem; color: #94a3b8; }
    p { margin-bottom: 1rem; }
    a { color: #818cf8; text-decoration: none; }
    a:hover { color: #a5b4fc; text-decoration: underline; }
    code {
      font-family: 'JetBrains Mono', ui-monospace, monospace;
      font-size: 0.875em;
      background: rgba(99, 102, 241, 0.15);
      padding: 0.2em 0.4em;
      border-radius: 0.375rem;
      color: #c4b5fd;
    }
    pre {
      background: rgba(15, 23, 42, 0.8);
      border: 1px solid rgba(99, 102, 241, 0.2);
      border-radius: 0.75rem;
      padding: 1.25rem;
      overflow-x: auto;
      margin: 1.5rem 0;
    }
    pre code { background: transparent; padding: 0; color: #e2e8f0; line-height: 1.6; }
    blockquote {
      border-left: 4px solid #6366f1;
      background: rgba(99, 102, 241, 0.1);
      margin: 1.5rem 0;
      padding: 1rem 1.5rem;
      color: #cbd5e1;
      font-style: italic;
    }
    ul, ol { margin: 1rem 0; padding-left: 2rem; }
    li { margin: 0.5rem 0; }
    li::marker { color: #6366f1; }
    hr { border: none; height: 1px; background: rgba(99, 102, 241, 0.4); margin: 2.5rem 0; }
    table { width: 100%; border-collapse: collapse; margin: 1.5rem 0; }
    th, td { border: 1px solid rgba(99, 102, 241, 0.2); padding: 0.75rem 1rem; text-align: left; }
    th { background: rgba(99, 102, 241, 0.15); font-weight: 600; color: #f1f5f9; }
    img { max-width: 100%; height: auto; border-radius: 0.75rem; }
    input[type="checkbox"] { margin-right: 0.5rem; accent-color: #6366f1; }
  "#;

/// Raw HTML tags GFM's tag filter neutralizes.
fn re_disallowed_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(
            r"(?i)<(/?(?:title|textarea|style|xmp|iframe|noembed|noframes|script|plaintext))([\s/>]|$)",
        )
    })
}

/// Escape the opening `<` of disallowed raw HTML tags.
pub fn filter_disallowed_tags(raw: &str) -> String {
    re_disallowed_tag()
        .replace_all(raw, "&lt;$1$2")
        .into_owned()
}

/// Renders Markdown into a styled reading page.
pub struct MarkdownRenderer {
    config: MarkdownConfig,
}

impl MarkdownRenderer {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    fn options(&self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.config.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.config.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.config.task_lists);
        options
    }

    /// The HTML body fragment for `content`.
    pub fn to_html(&self, content: &str) -> String {
        let hard_breaks = self.config.hard_breaks;
        let tag_filter = self.config.gfm_tag_filter;
        let events = Parser::new_ext(content, self.options()).map(|event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            Event::Html(raw) if tag_filter => {
                Event::Html(CowStr::from(filter_disallowed_tags(&raw)))
            }
            Event::InlineHtml(raw) if tag_filter => {
                Event::InlineHtml(CowStr::from(filter_disallowed_tags(&raw)))
            }
            other => other,
        });

        let mut body = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut body, events);
        body
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(MarkdownConfig::default())
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn content_type(&self) -> InferredContentType {
        InferredContentType::Markdown
    }

    fn display_name(&self) -> &str {
        "Markdown"
    }

    fn render(&self, content: &str, filename: &str) -> RenderedDocument {
        let body = format!("  <div class=\"markdown-body\">{}</div>", self.to_html(content));
        RenderedDocument::new(page(filename, MARKDOWN_CSS, "", &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_and_lists() {
        let html = MarkdownRenderer::default().to_html("# T\n## S\n- a\n- b");
        assert!(html.contains("<h1>T</h1>"));
        assert!(html.contains("<h2>S</h2>"));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_soft_breaks_become_line_breaks() {
        let html = MarkdownRenderer::default().to_html("one\ntwo");
        assert!(html.contains("one<br />"));

        let config = MarkdownConfig {
            hard_breaks: false,
            ..MarkdownConfig::default()
        };
        let html = MarkdownRenderer::new(config).to_html("one\ntwo");
        assert!(!html.contains("<br"));
    }

    #[test]
    fn test_gfm_extensions() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_tag_filter() {
        assert_eq!(
            filter_disallowed_tags("<script>alert(1)</script>"),
            "&lt;script>alert(1)&lt;/script>"
        );
        assert_eq!(filter_disallowed_tags("<scripts>"), "<scripts>");
        assert_eq!(filter_disallowed_tags("<em>ok</em>"), "<em>ok</em>");

        let html = MarkdownRenderer::default().to_html("<iframe src=\"x\"></iframe>\n");
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_render_wraps_in_document() {
        let doc = MarkdownRenderer::default().render("# Title", "README.md");
        assert!(doc.as_str().starts_with("<!DOCTYPE html>"));
        assert!(doc.as_str().contains("<title>README.md</title>"));
        assert!(doc.as_str().contains("<div class=\"markdown-body\"><h1>Title</h1>"));
    }
}
