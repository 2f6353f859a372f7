//! Preview pipeline facade.
//!
//! `PreviewPipeline` owns the configuration, a classifier, the renderer
//! registry and an optional render cache, and wires them together:
//!
//! 1. **Classify** each file (extension first, then detectors)
//! 2. **Render** through the registry, memoized per `(filename, content)`
//! 3. **Assemble** markup files with their sibling stylesheets and scripts

use parking_lot::Mutex;

use gist_preview_config::PreviewConfig;

use super::assembly;
use super::bundle::{Bundle, is_previewable};
use super::cache::{CacheStats, RenderCache, content_key};
use super::classifier::Classifier;
use super::renderers::RendererRegistry;
use super::types::{File, InferredContentType, RenderedDocument};
use crate::error::PreviewError;

/// Configured classifier, renderers and render cache.
pub struct PreviewPipeline {
    config: PreviewConfig,
    classifier: Classifier,
    renderers: RendererRegistry,
    cache: Option<Mutex<RenderCache>>,
}

impl Default for PreviewPipeline {
    fn default() -> Self {
        Self::new(PreviewConfig::default())
    }
}

impl PreviewPipeline {
    pub fn new(config: PreviewConfig) -> Self {
        let classifier = Classifier::new(config.classifier.clone());
        let renderers = RendererRegistry::new(&config);
        let cache = config
            .cache
            .enabled
            .then(|| Mutex::new(RenderCache::new(config.cache.max_entries)));
        crate::debug_info!(
            "RENDER",
            "pipeline ready: {} renderers, cache {}",
            renderers.len(),
            if cache.is_some() { "on" } else { "off" }
        );
        Self {
            config,
            classifier,
            renderers,
            cache,
        }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn classify(&self, file: &File) -> InferredContentType {
        self.classifier.classify(&file.content, &file.filename)
    }

    /// Classify and render `content` as a standalone document.
    pub fn render(&self, content: &str, filename: &str) -> RenderedDocument {
        let Some(cache) = &self.cache else {
            return self.render_uncached(content, filename);
        };

        let key = content_key(filename, content);
        if let Some(document) = cache.lock().get(key) {
            crate::debug_trace!("RENDER", "cache hit for {}", filename);
            return document.clone();
        }

        let content_type = self.classifier.classify(content, filename);
        let document = self.renderers.render_as(content_type, content, filename);
        cache.lock().put(key, content_type, document.clone());
        document
    }

    pub fn render_file(&self, file: &File) -> RenderedDocument {
        self.render(&file.content, &file.filename)
    }

    fn render_uncached(&self, content: &str, filename: &str) -> RenderedDocument {
        let content_type = self.classifier.classify(content, filename);
        self.renderers.render_as(content_type, content, filename)
    }

    /// Preview one file of a bundle.
    ///
    /// Markup files (`html`/`htm`) are merged with every stylesheet and
    /// script in the bundle; anything else is rendered on its own.
    pub fn preview(&self, bundle: &Bundle, filename: &str) -> Result<RenderedDocument, PreviewError> {
        let file = bundle
            .file(filename)
            .ok_or_else(|| PreviewError::FileNotFound(filename.to_string()))?;
        if is_previewable(&file.filename) {
            crate::debug_log!("ASSEMBLY", "assembling {} from bundle {}", filename, bundle.id);
            Ok(assembly::assemble(
                &file.content,
                bundle.stylesheets(),
                bundle.scripts(),
            ))
        } else {
            Ok(self.render_file(file))
        }
    }

    /// Preview the bundle's default file (first previewable, else first).
    pub fn preview_default(&self, bundle: &Bundle) -> Result<RenderedDocument, PreviewError> {
        let file = bundle.default_file().ok_or(PreviewError::NothingToPreview)?;
        self.preview(bundle, &file.filename)
    }

    /// Cache statistics, `None` when caching is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.lock().stats())
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }
}
