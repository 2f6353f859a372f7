//! Lowering passes and printing. JSX is lowered before types are erased.

use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{GLOBALS, Globals, Mark, SourceMap};
use swc_core::ecma::ast::{EsVersion, Module, Program};
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as CodegenConfig, Emitter, Node};
use swc_core::ecma::transforms::base::fixer::fixer;
use swc_core::ecma::transforms::base::hygiene::hygiene;
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::transforms::react::{self, Runtime};
use swc_core::ecma::transforms::typescript::typescript;

use super::Dialect;

/// Classic runtime: `React.createElement` and `React.Fragment` are the
/// default pragmas. Spread attributes stay object spreads so no helper
/// functions are injected.
fn jsx_options() -> react::Options {
    react::Options {
        runtime: Some(Runtime::Classic),
        use_spread: Some(true),
        ..Default::default()
    }
}

/// Imports are kept as written apart from `type` specifiers, and no
/// `export {}` marker is appended to modules left without exports.
fn strip_config() -> typescript::Config {
    typescript::Config {
        verbatim_module_syntax: true,
        no_empty_export: true,
        ..Default::default()
    }
}

/// Lower JSX and erase types according to `dialect`.
pub(super) fn lower(
    cm: &Lrc<SourceMap>,
    comments: &SingleThreadedComments,
    module: Module,
    dialect: Dialect,
) -> Program {
    GLOBALS.set(&Globals::new(), || {
        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();

        let mut program = Program::Module(module).apply(resolver(
            unresolved_mark,
            top_level_mark,
            dialect.typescript,
        ));
        if dialect.jsx {
            program = program.apply(react::react(
                cm.clone(),
                None::<&SingleThreadedComments>,
                jsx_options(),
                top_level_mark,
                unresolved_mark,
            ));
        }
        if dialect.typescript {
            program = program.apply(typescript(strip_config(), unresolved_mark, top_level_mark));
        }
        program.apply(hygiene()).apply(fixer(Some(comments)))
    })
}

/// Print `program` as JavaScript, keeping source comments.
pub(super) fn print(
    cm: &Lrc<SourceMap>,
    comments: &SingleThreadedComments,
    program: &Program,
) -> std::io::Result<String> {
    let mut cfg = CodegenConfig::default();
    cfg.target = EsVersion::latest();

    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg,
            cm: cm.clone(),
            comments: Some(comments),
            wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
        };
        program.emit_with(&mut emitter)?;
    }
    Ok(String::from_utf8_lossy(&buf).trim_end().to_string())
}
