//! Gist preview framework.
//!
//! Infers what each file of a gist is (markup, Markdown, JSON, stylesheet,
//! script, component, source code, prose) and turns it into a standalone
//! HTML document meant for a sandboxed display surface. Built on the same
//! pluggable split as a detector/renderer registry: `ContentDetector`
//! scores content, `ContentRenderer` synthesizes documents.
//!
//! # Module Structure
//!
//! ## Detection Layer
//! - [`detectors`]: Built-in detectors (`HtmlDetector`, `JsonDetector` and
//!   the regex-table detectors for Markdown, CSS, JavaScript and React).
//! - [`regex_detector`]: Weighted rule tables with confidence tiers.
//! - [`classifier`]: Extension rules, detector voting and the code/text
//!   fallback.
//!
//! ## Transformation Layer
//! - [`transpiler`]: JSX/TSX to plain JavaScript plus import extraction.
//!
//! ## Rendering Layer
//! - [`renderers`]: One document synthesizer per content type and the
//!   `RendererRegistry` dispatching between them.
//! - [`assembly`]: Merges a markup file with sibling stylesheets and scripts.
//!
//! ## Pipeline Layer
//! - [`pipeline`]: `PreviewPipeline`: config, classifier, renderers and the
//!   render cache behind one facade.
//! - [`cache`]: LRU memo of rendered documents.
//! - [`bundle`]: The gist bundle model and its payload decoder.
//!
//! ## Shared Types
//! - [`traits`]: `ContentDetector` and `ContentRenderer`.
//! - [`types`]: `File`, `InferredContentType`, `ContentTypeResult`,
//!   `RenderedDocument`.

pub mod assembly;
pub mod bundle;
pub mod cache;
pub mod classifier;
pub mod detectors;
pub mod pipeline;
pub mod regex_detector;
pub mod renderers;
pub mod traits;
pub mod transpiler;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use assembly::{assemble, merge_assets};
pub use bundle::{Bundle, display_type, is_previewable, language_for_extension};
pub use cache::{CacheStats, RenderCache};
pub use classifier::{Classifier, classify};
pub use pipeline::PreviewPipeline;
pub use renderers::{RendererRegistry, render};
pub use traits::{ContentDetector, ContentRenderer};
pub use transpiler::{TranspileError, TranspileErrorKind, TranspiledModule, transpile};
pub use types::{ContentTypeResult, File, InferredContentType, RenderedDocument};

/// Sandbox policy for the display surface: scripts run, same-origin access
/// stays disabled.
pub const SANDBOX_POLICY: &str = "allow-scripts";
