//! Shared test helpers for preview tests.
//!
//! This module is gated with `#[cfg(test)]` and provides canonical factory
//! functions used across the preview test modules. Import with:
//!
//! ```ignore
//! use crate::preview::testing::{sample_bundle, test_config};
//! ```

use gist_preview_config::PreviewConfig;

use super::bundle::Bundle;
use super::types::File;

/// Returns a `PreviewConfig` suitable for pipeline unit tests.
///
/// Defaults everywhere, with a small cache so eviction is easy to reach.
pub fn test_config() -> PreviewConfig {
    let mut config = PreviewConfig::default();
    config.cache.max_entries = 8;
    config
}

/// A three-file web bundle: a full HTML page, one stylesheet and one script.
pub fn sample_bundle() -> Bundle {
    Bundle::new(
        "sample",
        vec![
            File::new(
                "index.html",
                "<!DOCTYPE html>\n<html>\n<head><title>Demo</title></head>\n<body>\n<h1>Hello</h1>\n</body>\n</html>",
            ),
            File::new("styles.css", "body { margin: 0; }"),
            File::new("script.js", "console.log('ready');"),
        ],
    )
}

/// A single React component file.
pub fn component_file() -> File {
    File::new(
        "App.jsx",
        "import React, { useState } from 'react';\n\nexport default function App() {\n  const [n, setN] = useState(0);\n  return <button onClick={() => setN(n + 1)}>{n}</button>;\n}\n",
    )
}
