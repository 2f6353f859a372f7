//! Parsing component source into an ES module tree.

use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, Span, Spanned};
use swc_core::ecma::ast::{EsVersion, Module, TsEnumDecl, TsModuleDecl};
use swc_core::ecma::parser::error::Error as ParseError;
use swc_core::ecma::parser::{EsSyntax, Syntax, TsSyntax, parse_file_as_module};
use swc_core::ecma::visit::{Visit, VisitWith};

use super::{Dialect, TranspileError, TranspileErrorKind};

/// Parser syntax for a dialect.
pub(super) fn syntax_for(dialect: Dialect) -> Syntax {
    if dialect.typescript {
        Syntax::Typescript(TsSyntax {
            tsx: dialect.jsx,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: dialect.jsx,
            ..Default::default()
        })
    }
}

/// Parse `code` as a module. Recovered errors count as failures.
pub(super) fn parse_module(
    cm: &Lrc<SourceMap>,
    comments: &SingleThreadedComments,
    code: &str,
    filename: &str,
    dialect: Dialect,
) -> Result<Module, TranspileError> {
    let fm = cm.new_source_file(
        FileName::Custom(filename.to_string()).into(),
        code.to_string(),
    );
    let mut recovered = Vec::new();
    let parsed = parse_file_as_module(
        &fm,
        syntax_for(dialect),
        EsVersion::latest(),
        Some(comments),
        &mut recovered,
    );
    let module = parsed.map_err(|err| syntax_error(cm, filename, err))?;
    match recovered.into_iter().next() {
        Some(err) => Err(syntax_error(cm, filename, err)),
        None => Ok(module),
    }
}

/// Map a parser error to a positioned [`TranspileError`].
fn syntax_error(cm: &SourceMap, filename: &str, err: ParseError) -> TranspileError {
    let description = err.kind().msg().into_owned();
    let (line, column) = position(cm, err.span());
    TranspileError::new(
        TranspileErrorKind::SyntaxError,
        filename,
        description,
        line,
        column,
    )
}

/// 1-based line, 0-based column of the start of `span`.
fn position(cm: &SourceMap, span: Span) -> (usize, usize) {
    let loc = cm.lookup_char_pos(span.lo);
    (loc.line, loc.col.0)
}

/// Finds TypeScript constructs that compile to runtime code of their own.
///
/// Ambient (`declare`) enums and namespaces only describe types and are
/// erased like any other declaration.
#[derive(Default)]
struct RuntimeTypeScript {
    found: Option<(Span, &'static str)>,
}

impl Visit for RuntimeTypeScript {
    fn visit_ts_enum_decl(&mut self, decl: &TsEnumDecl) {
        if !decl.declare && self.found.is_none() {
            self.found = Some((decl.span, "enum declarations are not supported"));
        }
    }

    fn visit_ts_module_decl(&mut self, decl: &TsModuleDecl) {
        if decl.declare || decl.global {
            return;
        }
        if self.found.is_none() {
            self.found = Some((decl.span, "namespace declarations are not supported"));
        }
    }
}

/// Reject enums and namespaces instead of emitting code for them.
pub(super) fn check_supported(
    cm: &SourceMap,
    module: &Module,
    filename: &str,
) -> Result<(), TranspileError> {
    let mut finder = RuntimeTypeScript::default();
    module.visit_with(&mut finder);
    match finder.found {
        Some((span, description)) => {
            let (line, column) = position(cm, span);
            Err(TranspileError::new(
                TranspileErrorKind::UnsupportedSyntax,
                filename,
                description.to_string(),
                line,
                column,
            ))
        }
        None => Ok(()),
    }
}
