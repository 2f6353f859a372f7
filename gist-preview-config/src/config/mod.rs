//! Preview pipeline configuration.
//!
//! Maps to `config.yaml` in the gist-preview config directory.
//!
//! # Sub-modules
//!
//! - [`persistence`]: `impl PreviewConfig` methods for load/save and path resolution

pub mod persistence;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::LogLevel;

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_confidence_threshold() -> f32 {
    0.5
}

fn default_code_fallback_min_matches() -> usize {
    5
}

fn default_code_fallback_min_categories() -> usize {
    2
}

fn default_cdn_base_url() -> String {
    "https://esm.sh".to_string()
}

fn default_react_version() -> String {
    "18.2.0".to_string()
}

fn default_cache_max_entries() -> usize {
    64
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Content classification settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Markdown engine options.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Module CDN used by the component bootstrap document.
    #[serde(default)]
    pub cdn: CdnConfig,

    /// Render cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Verbosity of the debug log.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl PreviewConfig {
    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.classifier.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Validation(format!(
                "classifier.confidence_threshold must be within 0.0..=1.0, got {threshold}"
            )));
        }
        if self.classifier.code_fallback_min_categories == 0 {
            return Err(ConfigError::Validation(
                "classifier.code_fallback_min_categories must be > 0".to_string(),
            ));
        }
        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries must be > 0 when the cache is enabled".to_string(),
            ));
        }
        if !self.cdn.base_url.starts_with("https://") && !self.cdn.base_url.starts_with("http://")
        {
            return Err(ConfigError::Validation(format!(
                "cdn.base_url must be an http(s) URL, got {:?}",
                self.cdn.base_url
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Classifier thresholds.
///
/// Detector weights are fixed tables in the classifier itself; only the
/// acceptance thresholds are tunable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum detector confidence (0.0–1.0) for a scored classification.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// A code-fallback category qualifies with more than this many matches.
    #[serde(default = "default_code_fallback_min_matches")]
    pub code_fallback_min_matches: usize,

    /// Number of qualifying categories needed to classify as generic code.
    #[serde(default = "default_code_fallback_min_categories")]
    pub code_fallback_min_categories: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            code_fallback_min_matches: default_code_fallback_min_matches(),
            code_fallback_min_categories: default_code_fallback_min_categories(),
        }
    }
}

/// GitHub-flavored Markdown extensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Pipe tables.
    #[serde(default = "default_true")]
    pub tables: bool,

    /// `~~strikethrough~~`.
    #[serde(default = "default_true")]
    pub strikethrough: bool,

    /// `- [x]` task list items.
    #[serde(default = "default_true")]
    pub task_lists: bool,

    /// Render single newlines inside paragraphs as `<br>`.
    #[serde(default = "default_true")]
    pub hard_breaks: bool,

    /// Neutralize raw `<script>`, `<iframe>`, `<style>`… tags (GFM tag filter).
    #[serde(default = "default_true")]
    pub gfm_tag_filter: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            task_lists: true,
            hard_breaks: true,
            gfm_tag_filter: true,
        }
    }
}

/// ES module CDN for the component bootstrap import map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Base URL; bare specifiers resolve to `{base_url}/{specifier}`.
    #[serde(default = "default_cdn_base_url")]
    pub base_url: String,

    /// Version pinned for the framework's core, runtime, and client modules.
    #[serde(default = "default_react_version")]
    pub react_version: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: default_cdn_base_url(),
            react_version: default_react_version(),
        }
    }
}

/// Render cache settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Memoize rendered documents per `(filename, content)`.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of cached documents before LRU eviction.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_cache_max_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PreviewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.classifier.confidence_threshold, 0.5);
        assert_eq!(config.cdn.base_url, "https://esm.sh");
        assert_eq!(config.cdn.react_version, "18.2.0");
        assert_eq!(config.cache.max_entries, 64);
        assert_eq!(config.log_level, LogLevel::Off);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "classifier:\n  confidence_threshold: 0.7\nmarkdown:\n  hard_breaks: false\n";
        let config: PreviewConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.classifier.confidence_threshold, 0.7);
        assert_eq!(config.classifier.code_fallback_min_matches, 5);
        assert!(!config.markdown.hard_breaks);
        assert!(config.markdown.tables);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = PreviewConfig::default();
        config.classifier.confidence_threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("confidence_threshold"));
    }

    #[test]
    fn test_zero_cache_entries_rejected_only_when_enabled() {
        let mut config = PreviewConfig::default();
        config.cache.max_entries = 0;
        assert!(config.validate().is_err());
        config.cache.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_http_cdn_rejected() {
        let mut config = PreviewConfig::default();
        config.cdn.base_url = "file:///tmp".to_string();
        assert!(config.validate().is_err());
    }
}
