//! Component source transformer.
//!
//! Turns JSX / TSX component source into plain JavaScript that a browser can
//! load as a module: JSX becomes `React.createElement` calls, TypeScript-only
//! syntax is erased, and imports of the UI framework itself are removed
//! because the bootstrap document provides it globally. Every other import
//! is kept and reported so the caller can resolve it through an import map.
//!
//! Parsing, lowering and printing are done with swc. Types are erased, not
//! checked.

mod emit;
mod imports;
mod syntax;

use std::fmt;

use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::SourceMap;
use swc_core::ecma::ast::Program;
use thiserror::Error;

pub use imports::{FRAMEWORK_MODULES, ImportMap, is_bare_specifier, is_framework_module};

use crate::preview::types::file_extension;

/// Element factory used for every element.
pub const CREATE_ELEMENT: &str = "React.createElement";
/// Type passed for `<>…</>`.
pub const FRAGMENT: &str = "React.Fragment";

/// Which syntax extensions a source file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub jsx: bool,
    pub typescript: bool,
}

impl Dialect {
    /// `.tsx` enables both; `.ts`, `.mts` and `.cts` are TypeScript without
    /// JSX (so `<T>x` is a type assertion); everything else is JSX.
    pub fn from_filename(filename: &str) -> Self {
        match file_extension(filename).as_str() {
            "tsx" => Self {
                jsx: true,
                typescript: true,
            },
            "ts" | "mts" | "cts" => Self {
                jsx: false,
                typescript: true,
            },
            _ => Self {
                jsx: true,
                typescript: false,
            },
        }
    }
}

/// Category of a transform failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranspileErrorKind {
    /// Malformed source.
    SyntaxError,
    /// Valid TypeScript the transformer cannot erase (enums, namespaces).
    UnsupportedSyntax,
}

impl TranspileErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranspileErrorKind::SyntaxError => "SyntaxError",
            TranspileErrorKind::UnsupportedSyntax => "UnsupportedSyntax",
        }
    }
}

impl fmt::Display for TranspileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed transform.
///
/// `message` reads `filename: description (line:column)` with a 1-based line
/// and a 0-based column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TranspileError {
    pub kind: TranspileErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl TranspileError {
    pub(crate) fn new(
        kind: TranspileErrorKind,
        filename: &str,
        description: String,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            message: format!("{filename}: {description} ({line}:{column})"),
            line,
            column,
        }
    }
}

/// Successfully transformed module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspiledModule {
    /// Plain JavaScript, still an ES module.
    pub code: String,
    /// Non-framework import specifiers in first-seen order, including
    /// relative ones.
    pub imports: Vec<String>,
}

impl TranspiledModule {
    /// Bare package specifiers among [`imports`](Self::imports).
    pub fn bare_imports(&self) -> impl Iterator<Item = &str> {
        self.imports
            .iter()
            .map(String::as_str)
            .filter(|s| is_bare_specifier(s))
    }
}

pub type TranspileOutcome = Result<TranspiledModule, TranspileError>;

/// Transform component source. The dialect comes from `filename`.
pub fn transpile(code: &str, filename: &str) -> TranspileOutcome {
    let dialect = Dialect::from_filename(filename);
    crate::debug_log!(
        "TRANSPILE",
        "{} ({} bytes, jsx={}, typescript={})",
        filename,
        code.len(),
        dialect.jsx,
        dialect.typescript
    );

    match run(code, filename, dialect) {
        Ok(module) => {
            crate::debug_trace!("TRANSPILE", "{} kept imports: {:?}", filename, module.imports);
            Ok(module)
        }
        Err(err) => {
            crate::debug_info!("TRANSPILE", "{} failed: {}", filename, err);
            Err(err)
        }
    }
}

fn run(code: &str, filename: &str, dialect: Dialect) -> TranspileOutcome {
    let cm: Lrc<SourceMap> = Default::default();
    let comments = SingleThreadedComments::default();

    let mut module = syntax::parse_module(&cm, &comments, code, filename, dialect)?;
    if dialect.typescript {
        syntax::check_supported(&cm, &module, filename)?;
    }
    let removed = imports::remove_framework_imports(&mut module);
    if removed > 0 {
        crate::debug_trace!("TRANSPILE", "{} dropped {} framework imports", filename, removed);
    }

    let program = emit::lower(&cm, &comments, module, dialect);
    let imports = match &program {
        Program::Module(module) => imports::collect_imports(module),
        Program::Script(_) => Vec::new(),
    };
    let code = emit::print(&cm, &comments, &program).map_err(|err| {
        TranspileError::new(
            TranspileErrorKind::SyntaxError,
            filename,
            format!("cannot print output: {err}"),
            1,
            0,
        )
    })?;
    Ok(TranspiledModule { code, imports })
}
