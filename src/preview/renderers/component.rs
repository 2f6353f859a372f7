//! Component renderer: transforms JSX / TSX source and wraps it in a
//! bootstrap document that loads React from the CDN import map and mounts
//! the component's entry point.
//!
//! Document layout:
//!
//! 1. `<script type="importmap">` for the framework modules plus every bare
//!    third-party import of the component.
//! 2. A classic script installing `error` / `unhandledrejection` listeners,
//!    so failures show in place of a blank frame.
//! 3. A runtime module that exposes React, its hooks and a `ReactDOM` shim
//!    as globals (the component's own framework imports were removed) and
//!    defines the error boundary wrapper.
//! 4. The component module, with exports rewritten into local bindings and
//!    an appended entry lookup that mounts the first [`EntryPoint`] found.

use std::fmt;
use std::sync::OnceLock;

use gist_preview_config::CdnConfig;
use regex::{Captures, Regex};

use super::{escape_html, page};
use crate::preview::regex_detector::compile;
use crate::preview::traits::ContentRenderer;
use crate::preview::transpiler::{ImportMap, TranspileError, TranspiledModule, transpile};
use crate::preview::types::{InferredContentType, RenderedDocument};

/// Binding the default export is rewritten into when it has no name.
pub const DEFAULT_EXPORT_BINDING: &str = "__default_export__";

/// Object literal holding the component module's named exports.
pub const NAMED_EXPORTS_BINDING: &str = "__named_exports__";

/// React APIs installed as globals for code whose framework imports were
/// removed.
pub const FRAMEWORK_GLOBALS: &[&str] = &[
    "useState",
    "useEffect",
    "useLayoutEffect",
    "useInsertionEffect",
    "useRef",
    "useMemo",
    "useCallback",
    "useContext",
    "useReducer",
    "useId",
    "useTransition",
    "useDeferredValue",
    "useImperativeHandle",
    "useSyncExternalStore",
    "useDebugValue",
    "createContext",
    "createElement",
    "cloneElement",
    "isValidElement",
    "createRef",
    "forwardRef",
    "memo",
    "lazy",
    "startTransition",
    "Children",
    "Fragment",
    "StrictMode",
    "Suspense",
    "Component",
    "PureComponent",
];

/// Where the bootstrap looks for the component to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// `export default …`.
    DefaultExport,
    /// A top-level binding with this name, exported or not.
    Symbol(&'static str),
    /// A named export with this exported name.
    NamedExport(&'static str),
}

/// Lookup order; the first candidate that resolves wins.
pub const ENTRY_POINTS: &[EntryPoint] = &[
    EntryPoint::DefaultExport,
    EntryPoint::Symbol("App"),
    EntryPoint::NamedExport("App"),
    EntryPoint::Symbol("Component"),
];

impl EntryPoint {
    /// JavaScript expression yielding the candidate or `undefined`.
    fn lookup(&self, exports: &ExportTable) -> String {
        match self {
            EntryPoint::DefaultExport => exports
                .default
                .clone()
                .unwrap_or_else(|| "undefined".to_string()),
            EntryPoint::Symbol(name) => {
                format!("(typeof {name} !== \"undefined\" ? {name} : undefined)")
            }
            EntryPoint::NamedExport(name) => format!("{NAMED_EXPORTS_BINDING}[\"{name}\"]"),
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::DefaultExport => f.write_str("default export"),
            EntryPoint::Symbol(name) => write!(f, "symbol `{name}`"),
            EntryPoint::NamedExport(name) => write!(f, "named export `{name}`"),
        }
    }
}

/// Exports found while rewriting a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    /// Local binding holding the default export.
    pub default: Option<String>,
    /// `(exported name, local binding)` pairs.
    pub named: Vec<(String, String)>,
}

impl ExportTable {
    fn add_named(&mut self, exported: &str, local: &str) {
        if !self.named.iter().any(|(e, _)| e == exported) {
            self.named.push((exported.to_string(), local.to_string()));
        }
    }

    /// `const __named_exports__ = {…};`
    fn declaration(&self) -> String {
        let entries: Vec<String> = self
            .named
            .iter()
            .map(|(exported, local)| format!("\"{exported}\": {local}"))
            .collect();
        format!("const {NAMED_EXPORTS_BINDING} = {{{}}};", entries.join(", "))
    }
}

fn re_default_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(
            r"(?m)^([ \t]*)export[ \t]+default[ \t]+((?:async[ \t]+)?function\*?|class)[ \t]+([A-Za-z_$][\w$]*)",
        )
    })
}

fn re_default_expression() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?m)^([ \t]*)export[ \t]+default[ \t]+"))
}

fn re_named_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(
            r"(?m)^([ \t]*)export[ \t]+((?:async[ \t]+)?function\*?|class|const|let|var)[ \t]+([A-Za-z_$][\w$]*)",
        )
    })
}

fn re_export_list() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        compile(r#"(?m)^([ \t]*)export[ \t]*\{([^}]*)\}([ \t]*from[ \t]*["'][^"']*["'])?[ \t]*;?"#)
    })
}

/// Rewrite top-level `export` forms into plain bindings the bootstrap can
/// reach. Re-exports (`export … from`) are left alone.
pub fn rewrite_exports(code: &str) -> (String, ExportTable) {
    let mut exports = ExportTable::default();

    let code = re_default_declaration().replace_all(code, |caps: &Captures| {
        exports.default = Some(caps[3].to_string());
        format!("{}{} {}", &caps[1], &caps[2], &caps[3])
    });
    let code = re_default_expression().replace_all(&code, |caps: &Captures| {
        exports.default = Some(DEFAULT_EXPORT_BINDING.to_string());
        format!("{}const {DEFAULT_EXPORT_BINDING} = ", &caps[1])
    });
    let code = re_named_declaration().replace_all(&code, |caps: &Captures| {
        exports.add_named(&caps[3], &caps[3]);
        format!("{}{} {}", &caps[1], &caps[2], &caps[3])
    });
    let code = re_export_list().replace_all(&code, |caps: &Captures| {
        if caps.get(3).is_some() {
            return caps[0].to_string();
        }
        for entry in caps[2].split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (local, exported) = match entry.split_once(" as ") {
                Some((local, exported)) => (local.trim(), exported.trim()),
                None => (entry, entry),
            };
            if exported == "default" {
                exports.default = Some(local.to_string());
            } else {
                exports.add_named(exported, local);
            }
        }
        caps[1].to_string()
    });

    (code.into_owned(), exports)
}

fn re_script_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)</(script)"))
}

/// Keep `code` from terminating its enclosing `<script>` element.
pub fn escape_script_content(code: &str) -> String {
    re_script_close().replace_all(code, r"<\/$1").into_owned()
}

const COMPONENT_CSS: &str = r#"
    * { box-sizing: border-box; }
    html, body { margin: 0; padding: 0; }
    body { font-family: system-ui, -apple-system, sans-serif; }
    .preview-error {
      margin: 1.5rem;
      padding: 1rem 1.25rem;
      border: 1px solid #fca5a5;
      border-radius: 0.5rem;
      background: #fef2f2;
      color: #991b1b;
    }
    .preview-error pre { margin-top: 0.75rem; white-space: pre-wrap; word-break: break-word; font-size: 0.8125rem; }
    .preview-placeholder { margin: 3rem auto; max-width: 28rem; text-align: center; color: #64748b; }
  "#;

const ERROR_LISTENERS: &str = r#"(function () {
      function showPreviewError(title, detail) {
        var root = document.getElementById("root");
        if (!root) return;
        var box = document.createElement("div");
        box.className = "preview-error";
        var heading = document.createElement("strong");
        heading.textContent = title;
        var pre = document.createElement("pre");
        pre.textContent = detail;
        box.appendChild(heading);
        box.appendChild(pre);
        root.replaceChildren(box);
      }
      window.__showPreviewError__ = showPreviewError;
      window.addEventListener("error", function (event) {
        var error = event.error;
        showPreviewError("Runtime error", (error && error.stack) || event.message || String(error));
      });
      window.addEventListener("unhandledrejection", function (event) {
        var reason = event.reason;
        showPreviewError("Unhandled promise rejection", (reason && reason.stack) || String(reason));
      });
    })();"#;

const RUNTIME_MODULE: &str = r#"import React from "react";
    import * as ReactDOMClient from "react-dom/client";

    let mountedByComponent = false;
    const createRoot = (container, options) => {
      mountedByComponent = true;
      return ReactDOMClient.createRoot(container, options);
    };
    window.React = React;
    window.createRoot = createRoot;
    window.hydrateRoot = ReactDOMClient.hydrateRoot;
    window.ReactDOM = {
      createRoot,
      hydrateRoot: ReactDOMClient.hydrateRoot,
      render: (element, container) => createRoot(container).render(element),
    };
    for (const name of __FRAMEWORK_GLOBALS__) {
      if (!(name in window)) window[name] = React[name];
    }

    class PreviewErrorBoundary extends React.Component {
      constructor(props) {
        super(props);
        this.state = { error: null };
      }
      static getDerivedStateFromError(error) {
        return { error };
      }
      componentDidCatch(error) {
        console.error(error);
      }
      render() {
        const error = this.state.error;
        if (error) {
          return React.createElement(
            "div",
            { className: "preview-error" },
            React.createElement("strong", null, "Render error"),
            React.createElement("pre", null, String((error && error.stack) || error)),
          );
        }
        return this.props.children;
      }
    }

    function withErrorBoundary(Inner) {
      return function PreviewRoot(props) {
        return React.createElement(PreviewErrorBoundary, null, React.createElement(Inner, props));
      };
    }
    window.__withErrorBoundary__ = withErrorBoundary;

    window.__mountPreview__ = (entry) => {
      const root = document.getElementById("root");
      if (entry && !mountedByComponent) {
        ReactDOMClient.createRoot(root).render(React.createElement(withErrorBoundary(entry)));
        return;
      }
      setTimeout(() => {
        if (!root.hasChildNodes()) {
          root.innerHTML = '<div class="preview-placeholder">__PLACEHOLDER__</div>';
        }
      }, 100);
    };"#;

/// Shown when the component neither exposes an entry point nor mounts anything.
pub const PLACEHOLDER_TEXT: &str =
    "Nothing to display. Export a component as default or name it App.";

/// Transforms and mounts component source.
pub struct ComponentRenderer {
    cdn: CdnConfig,
}

impl ComponentRenderer {
    pub fn new(cdn: CdnConfig) -> Self {
        Self { cdn }
    }

    /// The bootstrap document for a transformed module.
    pub fn bootstrap_document(&self, module: &TranspiledModule, filename: &str) -> String {
        let bare: Vec<String> = module.bare_imports().map(str::to_string).collect();
        let import_map = ImportMap::build(&bare, &self.cdn);
        let (code, exports) = rewrite_exports(&module.code);
        crate::debug_trace!(
            "RENDER",
            "{} exports: default={:?} named={:?}",
            filename,
            exports.default,
            exports.named
        );

        let candidates: Vec<String> = ENTRY_POINTS.iter().map(|e| e.lookup(&exports)).collect();
        let component_module = format!(
            "{code}\n\n{}\nconst __entry__ = [\n  {}\n].find((c) => c != null && c !== React.Component && c !== React.PureComponent);\nwindow.__mountPreview__(__entry__);",
            exports.declaration(),
            candidates.join(",\n  ")
        );

        let globals = serde_json::to_string(FRAMEWORK_GLOBALS).unwrap_or_else(|_| "[]".into());
        let runtime = RUNTIME_MODULE
            .replace("__FRAMEWORK_GLOBALS__", &globals)
            .replace("__PLACEHOLDER__", &escape_html(PLACEHOLDER_TEXT));

        let head = format!(
            "\n  <script type=\"importmap\">\n{}\n  </script>\n  <script>\n    {ERROR_LISTENERS}\n  </script>",
            escape_script_content(&import_map.to_json())
        );
        let body = format!(
            "  <div id=\"root\"></div>\n  <script type=\"module\">\n    {runtime}\n  </script>\n  <script type=\"module\">\n{}\n  </script>",
            escape_script_content(&component_module)
        );
        page(filename, COMPONENT_CSS, &head, &body)
    }

    /// Document describing a failed transform. Every field is escaped.
    pub fn error_document(&self, error: &TranspileError, filename: &str) -> String {
        let body = format!(
            "  <div class=\"preview-error\">\n    <strong>{}</strong>\n    <p>Could not transform <code>{}</code></p>\n    <pre>{}</pre>\n  </div>",
            escape_html(error.kind.as_str()),
            escape_html(filename),
            escape_html(&error.message)
        );
        page(filename, COMPONENT_CSS, "", &body)
    }
}

impl Default for ComponentRenderer {
    fn default() -> Self {
        Self::new(CdnConfig::default())
    }
}

impl ContentRenderer for ComponentRenderer {
    fn content_type(&self) -> InferredContentType {
        InferredContentType::React
    }

    fn display_name(&self) -> &str {
        "React component"
    }

    fn render(&self, content: &str, filename: &str) -> RenderedDocument {
        let html = match transpile(content, filename) {
            Ok(module) => self.bootstrap_document(&module, filename),
            Err(err) => {
                crate::debug_error!("RENDER", "{}: {}", filename, err);
                self.error_document(&err, filename)
            }
        };
        RenderedDocument::new(html)
    }
}
