//! Shared integration test helpers for gist-preview.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{web_bundle, GIST_PAYLOAD};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers is used per file.

#![allow(dead_code)]

use gist_preview::preview::{Bundle, File};

pub const INDEX_HTML: &str = "<!DOCTYPE html>\n<html>\n<head>\n  <title>Counter</title>\n</head>\n<body>\n  <h1 id=\"count\">0</h1>\n  <button id=\"inc\">+1</button>\n</body>\n</html>";

pub const STYLES_CSS: &str = "body { font-family: sans-serif; }\nh1 { color: #333; }";

pub const SCRIPT_JS: &str = "document.getElementById('inc').addEventListener('click', () => {\n  const el = document.getElementById('count');\n  el.textContent = Number(el.textContent) + 1;\n});";

/// Gist payload shaped like the gists API response, trimmed to the fields
/// the bundle decoder reads plus a few it ignores.
pub const GIST_PAYLOAD: &str = r#"{
  "id": "f00dfeed",
  "description": "counter demo",
  "public": true,
  "owner": { "login": "someone", "id": 1 },
  "files": {
    "index.html": {
      "filename": "index.html",
      "type": "text/html",
      "size": 160,
      "content": "<!DOCTYPE html>\n<html>\n<head><title>Counter</title></head>\n<body><h1>0</h1></body>\n</html>"
    },
    "styles.css": {
      "filename": "styles.css",
      "size": 20,
      "content": "h1 { color: red; }"
    },
    "script.js": {
      "filename": "script.js",
      "size": 20,
      "content": "console.log('loaded');"
    }
  }
}"#;

/// The three-file counter bundle: markup, stylesheet and script.
pub fn web_bundle() -> Bundle {
    Bundle::new(
        "counter",
        vec![
            File::new("index.html", INDEX_HTML),
            File::new("styles.css", STYLES_CSS),
            File::new("script.js", SCRIPT_JS),
        ],
    )
}
