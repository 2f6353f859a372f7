// Library exports for the gist-preview binary, tests and embedding callers.

/// Crate version, reported by the CLI and the debug log.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod error;
pub mod preview;

pub use error::PreviewError;
pub use preview::{
    Bundle, File, InferredContentType, PreviewPipeline, RenderedDocument, SANDBOX_POLICY,
    classify, render, transpile,
};
