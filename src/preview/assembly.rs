//! Preview assembly: merge a markup file's sibling stylesheets and scripts
//! into one self-contained document.

use super::renderers::minimal_shell;
use super::types::{File, RenderedDocument};

/// Contents of `files` joined with `\n`, in order.
pub fn join_contents<'a>(files: impl IntoIterator<Item = &'a File>) -> String {
    files
        .into_iter()
        .map(|f| f.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert `insertion` before the first case-insensitive occurrence of
/// `marker`. Returns `None` when the marker is absent.
fn insert_before(document: &str, marker: &str, insertion: &str) -> Option<String> {
    let at = document.to_ascii_lowercase().find(marker)?;
    let mut out = String::with_capacity(document.len() + insertion.len());
    out.push_str(&document[..at]);
    out.push_str(insertion);
    out.push_str(&document[at..]);
    Some(out)
}

/// Merge stylesheet and script text into `markup`.
///
/// A full document (`<html` present) gets `<style>` injected before
/// `</head>` and `<script>` before `</body>`, each skipped when empty or
/// when its exact text already appears in the document. Anything else is
/// wrapped in a minimal shell. Merging an already merged document changes
/// nothing.
pub fn merge_assets(markup: &str, css: &str, js: &str) -> String {
    if !markup.to_ascii_lowercase().contains("<html") {
        crate::debug_log!("ASSEMBLY", "fragment markup, building shell");
        let script = (!js.is_empty()).then_some(js);
        return minimal_shell(markup, css, script);
    }

    let mut document = markup.to_string();
    if !css.is_empty() && !document.contains(css) {
        match insert_before(&document, "</head>", &format!("<style>{css}</style>")) {
            Some(merged) => document = merged,
            None => crate::debug_info!("ASSEMBLY", "no </head>, stylesheets not injected"),
        }
    }
    if !js.is_empty() && !document.contains(js) {
        match insert_before(&document, "</body>", &format!("<script>{js}</script>")) {
            Some(merged) => document = merged,
            None => crate::debug_info!("ASSEMBLY", "no </body>, scripts not injected"),
        }
    }
    document
}

/// Assemble a markup file with its sibling stylesheets and scripts, each
/// group concatenated in the order given.
pub fn assemble<'a>(
    markup: &str,
    stylesheets: impl IntoIterator<Item = &'a File>,
    scripts: impl IntoIterator<Item = &'a File>,
) -> RenderedDocument {
    let css = join_contents(stylesheets);
    let js = join_contents(scripts);
    crate::debug_log!(
        "ASSEMBLY",
        "merging {} bytes of css and {} bytes of js",
        css.len(),
        js.len()
    );
    RenderedDocument::new(merge_assets(markup, &css, &js))
}
