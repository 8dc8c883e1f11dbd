//! Parser integration tests.
//!
//! Runs whole sources through the scanner and parser and checks tree shape,
//! token coverage, arena accounting and diagnostic chains.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::types::ForFlavor;
use esgram_ast::visit::{check_module_coverage, check_script_coverage, module_shape, script_shape};
use esgram_core::arena::AstArena;
use esgram_core::intern::Interner;
use esgram_diagnostics::{ErrorKind, Production};
use esgram_parser::{parse_module, parse_script, Parser, ParserOptions};
use esgram_scanner::tokenize;

fn module_shape_of(source: &str) -> Vec<(u32, SyntaxKind)> {
    let arena = AstArena::new();
    let interner = Interner::new();
    let module = parse_module(&arena, &interner, source)
        .unwrap_or_else(|e| panic!("failed to parse {source:?}: {e:?}"));
    module_shape(module)
}

fn assert_module_covers(source: &str) -> usize {
    let arena = AstArena::new();
    let interner = Interner::new();
    let module = parse_module(&arena, &interner, source)
        .unwrap_or_else(|e| panic!("failed to parse {source:?}: {e:?}"));
    check_module_coverage(module).unwrap_or_else(|v| panic!("coverage violation in {source:?}: {v:?}"))
}

fn only_expression<'a>(script: &'a Script<'a>) -> Expression<'a> {
    assert_eq!(script.statements.len(), 1);
    match script.statements[0] {
        Statement::Expression(stmt) => stmt.expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

// ============================================================================
// Whole programs
// ============================================================================

const PROGRAM: &str = r#"
import { readFile } from "fs";
import * as path from "path";

const DEFAULTS = { encoding: "utf8", retries: 3 };

export class Loader extends Base {
    static #count = 0;
    cache = new Map();

    constructor(root) {
        super(root);
        this.root = root;
    }

    get size() { return this.cache.size; }

    async *entries() {
        for await (const [key, value] of this.cache) {
            yield { key, value };
        }
    }

    static {
        Loader.#count++;
    }
}

export async function load(file, { encoding = DEFAULTS.encoding, ...rest } = {}) {
    let attempts = 0;
    while (attempts < DEFAULTS.retries) {
        try {
            return await readFile(path.join(file), encoding);
        } catch {
            attempts += 1;
        } finally {
            log?.(`attempt ${attempts} of ${DEFAULTS.retries}`);
        }
    }
    throw new Error("unreachable: " + file);
}

export default (x, y = 1) => x ** y;
"#;

#[test]
fn test_program_parses_and_covers() {
    let nodes = assert_module_covers(PROGRAM);
    assert!(nodes > 100);
}

#[test]
fn test_parse_is_deterministic() {
    assert_eq!(module_shape_of(PROGRAM), module_shape_of(PROGRAM));
}

#[test]
fn test_parse_is_independent_of_prior_parses() {
    let arena = AstArena::new();
    let interner = Interner::new();
    parse_module(&arena, &interner, "let x = [a, b] + c;").unwrap();
    parse_module(&arena, &interner, "syntax error (").unwrap_err();
    let module = parse_module(&arena, &interner, PROGRAM).unwrap();
    assert_eq!(module_shape(module), module_shape_of(PROGRAM));
}

#[test]
fn test_root_spans_every_token() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let stream = tokenize("a; b;");
    let script = Parser::new(&arena, &interner, &stream).parse_script().unwrap();
    assert_eq!(script.data.range, stream.full_range());
}

#[test]
fn test_empty_sources() {
    let arena = AstArena::new();
    let interner = Interner::new();
    assert!(parse_script(&arena, &interner, "").unwrap().statements.is_empty());
    assert!(parse_module(&arena, &interner, "  // nothing\n").unwrap().items.is_empty());
}

#[test]
fn test_script_shape() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let script = parse_script(&arena, &interner, "a = b + 1;").unwrap();
    assert_eq!(
        script_shape(script),
        vec![
            (0, SyntaxKind::Script),
            (1, SyntaxKind::ExpressionStatement),
            (2, SyntaxKind::AssignmentExpression),
            (3, SyntaxKind::Identifier),
            (3, SyntaxKind::AdditiveExpression),
            (4, SyntaxKind::Identifier),
            (4, SyntaxKind::NumericLiteral),
        ]
    );
    check_script_coverage(script).unwrap();
}

// ============================================================================
// For statements
// ============================================================================

#[test]
fn test_for_flavors() {
    let cases = [
        ("for (;;) {}", ForFlavor::Classic),
        ("for (var i = 0; i < n; i++) {}", ForFlavor::ClassicVar),
        ("for (let i = 0, j = 1; ; ) {}", ForFlavor::ClassicLexical),
        ("for (i = 0; i < n; ) {}", ForFlavor::ClassicExpression),
        ("for (var k in o) {}", ForFlavor::InVar),
        ("for (var k = 0 in o) {}", ForFlavor::InVarInitializer),
        ("for (const k in o) {}", ForFlavor::InLexical),
        ("for (a.b in o) {}", ForFlavor::InTarget),
        ("for (var v of list) {}", ForFlavor::OfVar),
        ("for (let [a, b] of pairs) {}", ForFlavor::OfLexical),
        ("for ({ a } of list) {}", ForFlavor::OfTarget),
        ("for await (var v of stream) {}", ForFlavor::AwaitOfVar),
        ("for await (const v of stream) {}", ForFlavor::AwaitOfLexical),
        ("for await (v of stream) {}", ForFlavor::AwaitOfTarget),
    ];
    for (source, flavor) in cases {
        let arena = AstArena::new();
        let interner = Interner::new();
        let module = parse_module(&arena, &interner, source)
            .unwrap_or_else(|e| panic!("failed to parse {source:?}: {e:?}"));
        let ModuleItem::Statement(Statement::For(stmt)) = module.items[0] else {
            panic!("expected a for statement in {source:?}");
        };
        assert_eq!(stmt.flavor(), flavor, "{source}");
        check_module_coverage(module).unwrap();
    }
}

#[test]
fn test_for_await_requires_of() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let err = parse_module(&arena, &interner, "for await (x in o) {}").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Expected(SyntaxKind::OfKeyword));
}

#[test]
fn test_for_of_rejects_multiple_bindings() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let err = parse_module(&arena, &interner, "for (let a, b of list) {}").unwrap_err();
    assert!(err.find(Production::ForStatement).is_some());
}

#[test]
fn test_let_as_for_target_in_script() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let script = parse_script(&arena, &interner, "for (let in o) {}").unwrap();
    let Statement::For(stmt) = script.statements[0] else { panic!() };
    assert_eq!(stmt.flavor(), ForFlavor::InTarget);
}

// ============================================================================
// Cover grammars
// ============================================================================

#[test]
fn test_async_arrow_and_async_call() {
    let arena = AstArena::new();
    let interner = Interner::new();

    let script = parse_script(&arena, &interner, "async (a, b) => a;").unwrap();
    let Expression::Arrow(arrow) = only_expression(script) else { panic!() };
    assert!(arrow.is_async);
    let ArrowParameters::Formal(params) = arrow.params else { panic!() };
    assert_eq!(params.items.len(), 2);

    let script = parse_script(&arena, &interner, "async x => x;").unwrap();
    let Expression::Arrow(arrow) = only_expression(script) else { panic!() };
    assert!(arrow.is_async);
    assert!(matches!(arrow.params, ArrowParameters::Identifier(_)));

    let script = parse_script(&arena, &interner, "async (a, b);").unwrap();
    assert!(matches!(only_expression(script), Expression::Call(_)));

    let script = parse_script(&arena, &interner, "(async function () {});").unwrap();
    let Expression::Parenthesized(paren) = only_expression(script) else { panic!() };
    let Expression::Function(f) = paren.expression else { panic!() };
    assert!(f.is_async && f.name.is_none());

    let script = parse_script(&arena, &interner, "async => async;").unwrap();
    let Expression::Arrow(arrow) = only_expression(script) else { panic!() };
    assert!(!arrow.is_async);
}

#[test]
fn test_parenthesized_expression_is_not_an_arrow() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let script = parse_script(&arena, &interner, "(a, b);").unwrap();
    let Expression::Parenthesized(paren) = only_expression(script) else { panic!() };
    assert!(matches!(paren.expression, Expression::Sequence(_)));
}

#[test]
fn test_destructuring_assignment_vs_literal() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let script = parse_script(&arena, &interner, "[a, { b }] = pair;").unwrap();
    let Expression::Assignment(assign) = only_expression(script) else { panic!() };
    assert!(matches!(assign.target, AssignmentTarget::Array(_)));

    let script = parse_script(&arena, &interner, "[a, b].map(f);").unwrap();
    assert!(matches!(only_expression(script), Expression::Call(_)));
}

// ============================================================================
// Arena accounting
// ============================================================================

#[test]
fn test_discarded_alternatives_are_abandoned() {
    let arena = AstArena::new();
    let interner = Interner::new();
    // `i` is first read as the target of a `for-in`/`for-of` head.
    parse_script(&arena, &interner, "for (i = 0; i < n; i++);").unwrap();
    let stats = arena.stats();
    assert!(stats.abandoned > 0);
    assert_eq!(stats.allocated, stats.live + stats.abandoned);
}

#[test]
fn test_unambiguous_parse_abandons_nothing() {
    let arena = AstArena::new();
    let interner = Interner::new();
    parse_script(&arena, &interner, "var a = 1; if (a) b(); else c();").unwrap();
    assert_eq!(arena.stats().abandoned, 0);
}

#[test]
fn test_nested_literals_are_not_reparsed() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let depth = 20;
    let source = format!("x = {}{{ a: [b] }}{} + c;", "[{ k: ".repeat(depth), " }]".repeat(depth));
    parse_script(&arena, &interner, &source).unwrap();
    let stats = arena.stats();
    assert_eq!(stats.abandoned, 0);
    assert!(stats.allocated < 8 * depth + 16, "{stats}");
}

#[test]
fn test_failed_parse_leaves_nothing_live() {
    let arena = AstArena::new();
    let interner = Interner::new();
    parse_script(&arena, &interner, "var a = 1; var b = ;").unwrap_err();
    let stats = arena.stats();
    assert_eq!(stats.live, 0);
    assert_eq!(stats.abandoned, stats.allocated);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_nesting_limit() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let source = format!("{}1{};", "(".repeat(40), ")".repeat(40));
    let stream = tokenize(&source);

    let err = Parser::new(&arena, &interner, &stream)
        .with_options(ParserOptions {
            max_depth: 16,
            ..ParserOptions::default()
        })
        .parse_script()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NestingTooDeep);
    assert_eq!(err.productions()[0], Production::Script);

    Parser::new(&arena, &interner, &stream).parse_script().unwrap();
}

#[test]
fn test_annotations_are_skipped() {
    let source = r#"
        function pick<T, K extends keyof T>(obj: T, keys: K[]): Pick<T, K> {
            const out: Partial<T> = {};
            return out as any;
        }
        class Box<T> implements Container<T> {
            private readonly value: T;
            constructor(public label: string, value?: T) { this.value = value; }
            abstract get size(): number;
        }
        const id = <T,>(x: T): T => x;
    "#;
    let arena = AstArena::new();
    let interner = Interner::new();
    let stream = tokenize(source);
    let result = Parser::new(&arena, &interner, &stream).parse_script();
    // `as` casts are outside the skipped subset.
    assert!(result.is_err());

    let source = source.replace(" as any", "");
    let stream = tokenize(&source);
    let script = Parser::new(&arena, &interner, &stream).parse_script().unwrap();
    assert_eq!(script.statements.len(), 3);
    check_script_coverage(script).unwrap();

    let err = Parser::new(&arena, &interner, &stream)
        .with_options(ParserOptions::strict())
        .parse_script()
        .unwrap_err();
    assert!(err.depth() > 1);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_diagnostic_chain_is_outermost_first() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let err = parse_script(&arena, &interner, "function f() { if (a) { return 1 + ; } }").unwrap_err();
    let productions = err.productions();
    assert_eq!(productions.first(), Some(&Production::Script));
    let function = productions
        .iter()
        .position(|p| *p == Production::FunctionDeclaration)
        .unwrap();
    let if_statement = productions.iter().position(|p| *p == Production::IfStatement).unwrap();
    let ret = productions.iter().position(|p| *p == Production::ReturnStatement).unwrap();
    assert!(function < if_statement && if_statement < ret);
    assert!(!err.chain().any(|d| d.is_not_applicable()));
}

#[test]
fn test_diagnostic_reports_offending_token() {
    let arena = AstArena::new();
    let interner = Interner::new();
    let err = parse_script(&arena, &interner, "let x = ;").unwrap_err();
    let leaf = err.leaf();
    assert_eq!(leaf.token.kind, SyntaxKind::SemicolonToken);
    assert_eq!(leaf.token.offset, 8);
}

#[test]
fn test_module_only_syntax_in_script() {
    let arena = AstArena::new();
    let interner = Interner::new();
    assert!(parse_script(&arena, &interner, "import x from \"m\";").is_err());
    assert!(parse_script(&arena, &interner, "export const a = 1;").is_err());
    parse_script(&arena, &interner, "import(\"m\").then(f);").unwrap();
}
