//! Module import bookkeeping: framework import removal and import maps.

use gist_preview_config::CdnConfig;
use serde_json::{Map, Value, json};
use swc_core::ecma::ast::{Module, ModuleDecl, ModuleItem, NamedExport};

/// Framework modules the bootstrap document provides globally.
///
/// Imports of these are removed from transformed code.
pub const FRAMEWORK_MODULES: &[&str] = &[
    "react",
    "react-dom",
    "react-dom/client",
    "react/jsx-runtime",
    "react/jsx-dev-runtime",
];

/// Whether `specifier` names one of the [`FRAMEWORK_MODULES`].
pub fn is_framework_module(specifier: &str) -> bool {
    FRAMEWORK_MODULES.contains(&specifier)
}

/// Bare package specifiers (`lodash`, `@scope/pkg/sub`) resolve through the
/// import map; relative paths and URLs do not.
pub fn is_bare_specifier(specifier: &str) -> bool {
    !specifier.is_empty()
        && !specifier.starts_with('.')
        && !specifier.starts_with('/')
        && !specifier.contains(':')
}

/// CDN URL for a framework module at the configured version.
fn framework_url(specifier: &str, cdn: &CdnConfig) -> String {
    let base = cdn.base_url.trim_end_matches('/');
    let version = &cdn.react_version;
    match specifier.split_once('/') {
        Some((package, subpath)) => format!("{base}/{package}@{version}/{subpath}"),
        None => format!("{base}/{specifier}@{version}"),
    }
}

/// Specifier → URL table for a `<script type="importmap">` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportMap {
    entries: Vec<(String, String)>,
}

impl ImportMap {
    /// Framework modules first, then one entry per bare third-party import,
    /// in first-seen order.
    pub fn build(imports: &[String], cdn: &CdnConfig) -> Self {
        let mut entries: Vec<(String, String)> = FRAMEWORK_MODULES
            .iter()
            .map(|m| (m.to_string(), framework_url(m, cdn)))
            .collect();
        let base = cdn.base_url.trim_end_matches('/');
        for specifier in imports {
            if !is_bare_specifier(specifier) || entries.iter().any(|(s, _)| s == specifier) {
                continue;
            }
            entries.push((specifier.clone(), format!("{base}/{specifier}")));
        }
        Self { entries }
    }

    /// URL mapped for `specifier`.
    pub fn get(&self, specifier: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == specifier)
            .map(|(_, url)| url.as_str())
    }

    /// Number of mapped specifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `{"imports": {...}}` pretty-printed with two-space indentation.
    pub fn to_json(&self) -> String {
        let imports: Map<String, Value> = self
            .entries
            .iter()
            .map(|(s, url)| (s.clone(), Value::String(url.clone())))
            .collect();
        serde_json::to_string_pretty(&json!({ "imports": imports }))
            .unwrap_or_else(|_| String::from("{\"imports\":{}}"))
    }
}

/// Drop imports of the framework modules. Returns how many were removed.
pub(super) fn remove_framework_imports(module: &mut Module) -> usize {
    let before = module.body.len();
    module.body.retain(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
            !is_framework_module(&import.src.value)
        }
        _ => true,
    });
    before - module.body.len()
}

/// Specifiers the module still loads at runtime, first-seen order, no
/// duplicates. Re-exports (`export ... from`) count as loads.
pub(super) fn collect_imports(module: &Module) -> Vec<String> {
    let mut imports: Vec<String> = Vec::new();
    for item in &module.body {
        let ModuleItem::ModuleDecl(decl) = item else {
            continue;
        };
        let src = match decl {
            ModuleDecl::Import(import) if !import.type_only => &import.src,
            ModuleDecl::ExportNamed(NamedExport {
                src: Some(src),
                type_only: false,
                ..
            }) => src,
            ModuleDecl::ExportAll(export) if !export.type_only => &export.src,
            _ => continue,
        };
        let specifier = src.value.to_string();
        if !is_framework_module(&specifier) && !imports.contains(&specifier) {
            imports.push(specifier);
        }
    }
    imports
}
