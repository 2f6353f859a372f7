//! Configuration system for the gist-preview content pipeline.
//!
//! This crate provides configuration loading, saving, and default values
//! for the classifier, the document synthesizers, the component bootstrap
//! CDN, the render cache, and logging. It includes:
//!
//! - [`PreviewConfig`]: the top-level `config.yaml` document
//! - Per-section types ([`ClassifierConfig`], [`MarkdownConfig`], [`CdnConfig`],
//!   [`CacheConfig`])
//! - [`LogLevel`] for the log bridge
//! - [`ConfigError`] for typed load/save failures

pub mod config;
pub mod error;
mod types;

pub use config::{CacheConfig, CdnConfig, ClassifierConfig, MarkdownConfig, PreviewConfig};
pub use error::ConfigError;
pub use types::LogLevel;
