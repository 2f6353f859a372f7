//! Per-type document synthesizers and the dispatch table over them.
//!
//! Every renderer produces a complete standalone HTML document. Shared page
//! scaffolding (escaping, the minimal shell, the file header) lives here so
//! the individual renderers only describe their own body and stylesheet.

use std::collections::HashMap;
use std::sync::OnceLock;

use gist_preview_config::PreviewConfig;

use super::classifier;
use super::detectors::html::has_doctype;
use super::traits::ContentRenderer;
use super::types::{InferredContentType, RenderedDocument};

pub mod code;
pub mod component;
pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

pub use code::SourceRenderer;
pub use component::ComponentRenderer;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use text::TextRenderer;

/// Stylesheet every generated shell starts from.
pub const RESET_CSS: &str = "* { box-sizing: border-box; margin: 0; padding: 0; }\n    body { font-family: system-ui, -apple-system, sans-serif; }";

/// Document icon shown next to file names in page headers.
const FILE_ICON: &str = r#"<svg class="file-icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M14.5 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7.5L14.5 2z"/><polyline points="14,2 14,8 20,8"/></svg>"#;

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Whether `content` is already a full document (doctype or `<html` opener).
pub fn is_full_document(content: &str) -> bool {
    has_doctype(content) || has_html_opener(&content.to_ascii_lowercase())
}

/// `<html` followed by whitespace, `>` or end of input. Expects lowercased input.
fn has_html_opener(lower: &str) -> bool {
    lower.match_indices("<html").any(|(i, m)| {
        lower[i + m.len()..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '>')
    })
}

/// Minimal document around a markup fragment: reset stylesheet, any extra
/// css, the markup, then an optional classic script.
pub fn minimal_shell(markup: &str, extra_css: &str, script: Option<&str>) -> String {
    let mut style = String::from(RESET_CSS);
    if !extra_css.is_empty() {
        style.push_str("\n    ");
        style.push_str(extra_css);
    }
    let script = script
        .map(|js| format!("\n  <script>{js}</script>"))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <style>\n    {style}\n  </style>\n</head>\n<body>\n  {markup}{script}\n</body>\n</html>"
    )
}

/// A styled page: `<head>` with the given stylesheet (plus optional extra
/// head markup) and the given body.
pub(crate) fn page(title: &str, css: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <title>{}</title>{head_extra}\n  <style>{css}</style>\n</head>\n<body>\n{body}\n</body>\n</html>",
        escape_html(title)
    )
}

/// Header bar with the file icon, the escaped file name and an optional badge.
pub(crate) fn file_header(class: &str, filename: &str, badge: Option<&str>) -> String {
    let badge = badge
        .map(|b| format!("\n    <span class=\"language-badge\">{}</span>", escape_html(b)))
        .unwrap_or_default();
    format!(
        "  <div class=\"{class}\">\n    <div class=\"file-info\">{FILE_ICON}<span class=\"file-name\">{}</span></div>{badge}\n  </div>",
        escape_html(filename)
    )
}

/// Renderers keyed by the content type they handle.
pub struct RendererRegistry {
    renderers: HashMap<InferredContentType, Box<dyn ContentRenderer>>,
}

impl RendererRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// One renderer per content type, configured from `config`.
    pub fn new(config: &PreviewConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(HtmlRenderer));
        registry.register(Box::new(MarkdownRenderer::new(config.markdown.clone())));
        registry.register(Box::new(JsonRenderer));
        for content_type in [
            InferredContentType::Css,
            InferredContentType::JavaScript,
            InferredContentType::Code,
        ] {
            registry.register(Box::new(SourceRenderer::new(content_type)));
        }
        registry.register(Box::new(ComponentRenderer::new(config.cdn.clone())));
        registry.register(Box::new(TextRenderer));
        registry
    }

    /// Register a renderer, replacing any previous one for its content type.
    pub fn register(&mut self, renderer: Box<dyn ContentRenderer>) {
        self.renderers.insert(renderer.content_type(), renderer);
    }

    pub fn get(&self, content_type: InferredContentType) -> Option<&dyn ContentRenderer> {
        self.renderers.get(&content_type).map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render with the renderer for `content_type`, falling back to plain
    /// text when none is registered.
    pub fn render_as(
        &self,
        content_type: InferredContentType,
        content: &str,
        filename: &str,
    ) -> RenderedDocument {
        match self.get(content_type) {
            Some(renderer) => {
                crate::debug_log!(
                    "RENDER",
                    "{} as {} via {}",
                    filename,
                    content_type,
                    renderer.display_name()
                );
                renderer.render(content, filename)
            }
            None => {
                crate::debug_info!(
                    "RENDER",
                    "no renderer for {}, using text for {}",
                    content_type,
                    filename
                );
                TextRenderer.render(content, filename)
            }
        }
    }
}

fn default_registry() -> &'static RendererRegistry {
    static REGISTRY: OnceLock<RendererRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| RendererRegistry::new(&PreviewConfig::default()))
}

/// Classify `content` and render it with the default configuration.
pub fn render(content: &str, filename: &str) -> RenderedDocument {
    let content_type = classifier::classify(content, filename);
    default_registry().render_as(content_type, content, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_full_document_detection() {
        assert!(is_full_document("  <!DOCTYPE html><p>x</p>"));
        assert!(is_full_document("<!DOCTYPE\nhtml>\n<p>x</p>"));
        assert!(is_full_document("<!doctype  html><p>x</p>"));
        assert!(is_full_document("\t<!DocType\thtml><p>x</p>"));
        assert!(!is_full_document("<!doctypehtml><p>x</p>"));
        assert!(is_full_document("<HTML lang=\"en\"><body></body></HTML>"));
        assert!(is_full_document("<html>"));
        assert!(!is_full_document("<htmlfoo>"));
        assert!(!is_full_document("<p>html</p>"));
    }

    #[test]
    fn test_doctype_detected_document_is_not_rewrapped() {
        for content in ["<!DOCTYPE\nhtml>\n<p>x</p>", "<!doctype  html><p>x</p>"] {
            assert_eq!(
                classifier::classify(content, "snippet"),
                InferredContentType::Html
            );
            assert_eq!(render(content, "snippet").as_str(), content);
        }
    }

    #[test]
    fn test_minimal_shell() {
        let doc = minimal_shell("<p>hi</p>", "p { color: red; }", Some("go();"));
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("box-sizing: border-box"));
        assert!(doc.contains("p { color: red; }"));
        assert!(doc.contains("<p>hi</p>\n  <script>go();</script>"));
    }

    #[test]
    fn test_registry_covers_every_type() {
        let registry = RendererRegistry::new(&PreviewConfig::default());
        for content_type in InferredContentType::ALL {
            assert!(
                registry.get(content_type).is_some(),
                "missing renderer for {content_type}"
            );
        }
        assert_eq!(registry.len(), InferredContentType::ALL.len());
    }

    #[test]
    fn test_empty_registry_falls_back_to_text() {
        let registry = RendererRegistry::empty();
        let doc = registry.render_as(InferredContentType::Json, "<b>", "a.json");
        assert!(doc.as_str().contains("&lt;b&gt;"));
        assert!(doc.as_str().contains("text-content"));
    }
}
