//! JSON renderer with syntax highlighting.
//!
//! Content is re-serialized with two-space indentation when it parses and
//! shown raw otherwise. Highlighting runs over the escaped text in a single
//! pass, so it works the same on malformed input.

use super::{file_header, page};
use crate::preview::traits::ContentRenderer;
use crate::preview::types::{InferredContentType, RenderedDocument};

const JSON_CSS: &str = r#"
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: 'JetBrains Mono', ui-monospace, monospace; background: #0f172a; color: #e2e8f0; min-height: 100vh; }
    .json-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 0.75rem 1.25rem;
      background: rgba(52, 211, 153, 0.12);
      border-bottom: 1px solid rgba(52, 211, 153, 0.2);
    }
    .file-info { display: flex; align-items: center; gap: 0.75rem; }
    .file-icon { width: 1.25rem; height: 1.25rem; color: #34d399; }
    .file-name { font-family: 'Inter', system-ui, sans-serif; font-weight: 600; font-size: 0.875rem; color: #f1f5f9; }
    .language-badge {
      font-family: 'Inter', system-ui, sans-serif;
      font-size: 0.75rem;
      padding: 0.25rem 0.625rem;
      border: 1px solid rgba(52, 211, 153, 0.3);
      border-radius: 9999px;
      color: #6ee7b7;
      text-transform: uppercase;
    }
    .json-content { padding: 1.5rem; font-size: 0.875rem; line-height: 1.65; overflow-x: auto; }
    pre { white-space: pre-wrap; word-wrap: break-word; }
    .json-key { color: #93c5fd; }
    .json-string { color: #86efac; }
    .json-number { color: #fcd34d; }
    .json-boolean { color: #f472b6; }
    .json-null { color: #a78bfa; }
    .json-punctuation { color: #64748b; }
  "#;

/// Pretty-prints and highlights JSON.
pub struct JsonRenderer;

/// Two-space indented form of `content`, or `content` itself when it does
/// not parse.
pub fn format_json(content: &str) -> String {
    serde_json::from_str::<serde_json::Value>(content)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| content.to_string())
}

fn span(out: &mut String, class: &str, text: &str) {
    out.push_str("<span class=\"json-");
    out.push_str(class);
    out.push_str("\">");
    out.push_str(text);
    out.push_str("</span>");
}

/// Escape `&`, `<` and `>`, then wrap keys, strings, numbers, booleans,
/// `null` and punctuation in `json-*` spans.
pub fn highlight_json(json: &str) -> String {
    let escaped = json
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    let chars: Vec<char> = escaped.chars().collect();
    let mut out = String::with_capacity(escaped.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i = (i + 1).min(chars.len());
                let token: String = chars[start..i].iter().collect();
                let mut next = i;
                while next < chars.len() && chars[next].is_whitespace() {
                    next += 1;
                }
                let class = if chars.get(next) == Some(&':') {
                    "key"
                } else {
                    "string"
                };
                span(&mut out, class, &token);
            }
            '-' | '0'..='9' => {
                let start = i;
                i += 1;
                while i < chars.len()
                    && (chars[i].is_ascii_digit() || matches!(chars[i], '.' | 'e' | 'E' | '+' | '-'))
                {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                span(&mut out, "number", &token);
            }
            '{' | '}' | '[' | ']' | ',' | ':' => {
                span(&mut out, "punctuation", &c.to_string());
                i += 1;
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match word.as_str() {
                    "true" | "false" => span(&mut out, "boolean", &word),
                    "null" => span(&mut out, "null", &word),
                    _ => out.push_str(&word),
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

impl ContentRenderer for JsonRenderer {
    fn content_type(&self) -> InferredContentType {
        InferredContentType::Json
    }

    fn display_name(&self) -> &str {
        "JSON"
    }

    fn render(&self, content: &str, filename: &str) -> RenderedDocument {
        let highlighted = highlight_json(&format_json(content));
        let body = format!(
            "{}\n  <div class=\"json-content\"><pre>{highlighted}</pre></div>",
            file_header("json-header", filename, Some("JSON"))
        );
        RenderedDocument::new(page(filename, JSON_CSS, "", &body))
    }
}
