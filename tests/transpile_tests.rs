use gist_preview::preview::transpiler::{
    Dialect, ImportMap, TranspileErrorKind, TranspiledModule, is_bare_specifier,
    is_framework_module, transpile,
};
use gist_preview_config::CdnConfig;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::ast::EsVersion;
use swc_core::ecma::parser::{Syntax, parse_file_as_module};

/// Transpile and check that the output loads as a plain ES module.
fn ok(code: &str, filename: &str) -> TranspiledModule {
    let module = match transpile(code, filename) {
        Ok(module) => module,
        Err(err) => panic!("transpile failed: {err}"),
    };
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom("out.js".to_string()).into(),
        module.code.clone(),
    );
    let mut recovered = Vec::new();
    let parsed = parse_file_as_module(
        &fm,
        Syntax::Es(Default::default()),
        EsVersion::latest(),
        None,
        &mut recovered,
    );
    assert!(
        parsed.is_ok() && recovered.is_empty(),
        "{filename} output is not plain JavaScript:\n{}",
        module.code
    );
    module
}

fn compact(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_counter_component() {
    let source = "import React, { useState } from 'react';\n\nexport default function Counter() {\n  const [count, setCount] = useState(0);\n  return (\n    <div className=\"counter\">\n      <button onClick={() => setCount(count + 1)}>+1</button>\n      <span>{count}</span>\n    </div>\n  );\n}\n";
    let module = ok(source, "Counter.jsx");
    assert!(!module.code.contains("from 'react'"));
    assert!(module.code.contains("export default function Counter()"));
    let code = compact(&module.code);
    assert!(code.contains(&compact("React.createElement(\"div\", {className: \"counter\"}")));
    assert!(code.contains(&compact(
        "React.createElement(\"button\", {onClick: () => setCount(count + 1)}, \"+1\")"
    )));
    assert!(code.contains(&compact("React.createElement(\"span\", null, count)")));
    assert!(!module.code.contains("<div"));
    assert!(module.imports.is_empty());
}

#[test]
fn test_member_expression_tag() {
    let module = ok("x = <motion.div animate={a} />;", "Anim.jsx");
    assert_eq!(
        compact(&module.code),
        compact("x = React.createElement(motion.div, {animate: a});")
    );
}

#[test]
fn test_import_collection_order() {
    let source = "import confetti from 'canvas-confetti';\nimport { format } from 'date-fns';\nimport { helper } from './helper.js';\nimport confettiAgain from 'canvas-confetti';\nimport { createRoot } from 'react-dom/client';";
    let module = ok(source, "App.jsx");
    assert_eq!(
        module.imports,
        vec![
            "canvas-confetti".to_string(),
            "date-fns".to_string(),
            "./helper.js".to_string(),
        ]
    );
    assert_eq!(
        module.bare_imports().collect::<Vec<_>>(),
        vec!["canvas-confetti", "date-fns"]
    );
}

#[test]
fn test_import_map_includes_framework_and_bare_imports() {
    let map = ImportMap::build(&["lodash".to_string()], &CdnConfig::default());
    assert_eq!(map.get("react"), Some("https://esm.sh/react@18.2.0"));
    assert_eq!(map.get("lodash"), Some("https://esm.sh/lodash"));
    assert!(map.to_json().contains("\"imports\""));
}

#[test]
fn test_specifier_predicates() {
    assert!(is_framework_module("react"));
    assert!(is_framework_module("react-dom/client"));
    assert!(!is_framework_module("preact"));
    assert!(is_bare_specifier("@scope/pkg"));
    assert!(!is_bare_specifier("./local"));
    assert!(!is_bare_specifier("/abs.js"));
    assert!(!is_bare_specifier("https://cdn.example/x.js"));
}

#[test]
fn test_tsx_component() {
    let source = "type Props = { label: string };\n\nexport function Badge({ label }: Props) {\n  return <span className=\"badge\">{label}</span>;\n}\n";
    let module = ok(source, "Badge.tsx");
    assert!(!module.code.contains("type Props"));
    assert!(module.code.contains("export function Badge({ label })"));
    assert!(compact(&module.code).contains(&compact(
        "React.createElement(\"span\", {className: \"badge\"}, label)"
    )));
}

#[test]
fn test_ts_file_has_no_jsx() {
    assert_eq!(
        Dialect::from_filename("util.ts"),
        Dialect {
            jsx: false,
            typescript: true
        }
    );
    let module = ok("const a = b < c && d > e;", "util.ts");
    assert_eq!(compact(&module.code), compact("const a = b < c && d > e;"));
}

#[test]
fn test_unclosed_element_reports_position() {
    let err = transpile("function App() { return <div> }", "App.jsx")
        .expect_err("unclosed element");
    assert_eq!(err.kind, TranspileErrorKind::SyntaxError);
    assert_eq!(err.line, 1);
    assert!(err.message.starts_with("App.jsx: "));
    assert!(err.to_string().starts_with("SyntaxError: App.jsx: "));
}

#[test]
fn test_error_line_counts_newlines() {
    let err = transpile("const a = 1;\nconst b = 2;\nx = <a></b>;", "multi.jsx")
        .expect_err("mismatched tag");
    assert_eq!(err.line, 3);
    assert!(err.message.contains("(3:"));
}

#[test]
fn test_namespace_is_unsupported() {
    let err = transpile("namespace Util { export const x = 1; }", "u.ts").expect_err("namespace");
    assert_eq!(err.kind, TranspileErrorKind::UnsupportedSyntax);
}

#[test]
fn test_labels_and_object_literals_in_tsx() {
    let source = "export function Loop({ rows }: { rows: number[][] }) {\n  scan: for (const row of rows) {\n    for (const cell of row) {\n      if (cell < 0) break scan;\n    }\n  }\n  if (rows.length) { done: 1 }\n  const style = { color: 'red' };\n  return <div style={style} />;\n}\n";
    let code = compact(&ok(source, "Loop.tsx").code);
    assert!(code.contains("scan:for(constrowofrows)"), "{code}");
    assert!(code.contains("breakscan;"), "{code}");
    assert!(code.contains("done:1"), "{code}");
    assert!(code.contains("conststyle={color:'red'};"), "{code}");
    assert!(code.contains("exportfunctionLoop({rows})"), "{code}");
}

#[test]
fn test_this_and_optional_parameters_erased() {
    let source = "export function onClick(this: HTMLElement, event?: MouseEvent, ...rest: unknown[]): void {\n  this.classList.toggle('on');\n}\n";
    let code = compact(&ok(source, "handlers.ts").code);
    assert!(code.contains("exportfunctiononClick(event,...rest){"), "{code}");
    assert!(code.contains("this.classList.toggle('on');"), "{code}");
}

#[test]
fn test_every_dialect_emits_plain_javascript() {
    let cases = [
        ("App.jsx", "export default function App() {\n  return <><h1 title=\"a\">Hi</h1>{[1, 2].map(n => <i key={n}>{n}</i>)}</>;\n}\n"),
        ("App.tsx", "import { useState } from 'react';\ninterface P { n?: number }\nexport default function App({ n = 0 }: P) {\n  const [v, setV] = useState<number>(n);\n  return <button onClick={() => setV(v + 1)}>{v as number}</button>;\n}\n"),
        ("util.ts", "export const clamp = <T extends number>(x: T, lo: T, hi: T): number => Math.min(Math.max(x, lo), hi);\nexport type Pair = [number, number];\n"),
        ("legacy.js", "const el = <p>plain {'js'}</p>;\nexport { el };\n"),
    ];
    for (filename, source) in cases {
        let module = ok(source, filename);
        assert!(!module.code.contains("interface"), "{filename}");
        assert!(!module.code.contains("<p>"), "{filename}");
    }
}

