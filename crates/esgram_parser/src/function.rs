//! Function declarations, expressions and bodies.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_diagnostics::{ErrorKind, Production};

use crate::context::Context;
use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};

impl<'a, 't> Parser<'a, 't> {
    /// `[async] function [*] name (params) { body }`. The name may be left
    /// out only where `name_optional` is set (`export default function`).
    pub(crate) fn parse_function_declaration(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        name_optional: bool,
    ) -> PResult<&'a Function<'a>> {
        self.parse_function(
            c,
            ctx,
            SyntaxKind::FunctionDeclaration,
            Production::FunctionDeclaration,
            name_optional,
        )
    }

    pub(crate) fn parse_function_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a Function<'a>> {
        self.parse_function(
            c,
            ctx,
            SyntaxKind::FunctionExpression,
            Production::FunctionExpression,
            true,
        )
    }

    fn parse_function(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        kind: SyntaxKind,
        production: Production,
        name_optional: bool,
    ) -> PResult<&'a Function<'a>> {
        self.within(c, production, |c| {
            let start = c.start();
            let is_async = c.accept(SyntaxKind::AsyncKeyword);
            if is_async && c.line_break_before_next() {
                return self.fail(c, production, ErrorKind::LineTerminatorNotPermitted);
            }
            self.expect(c, SyntaxKind::FunctionKeyword, production)?;
            let is_generator = c.accept(SyntaxKind::AsteriskToken);
            let body_ctx = ctx.function(is_async, is_generator);

            // An expression's own name is bound inside it, so its modifiers
            // decide whether `yield` and `await` can name it.
            let name_ctx = if kind == SyntaxKind::FunctionExpression { body_ctx } else { ctx };
            let name = if name_optional && !Self::is_identifier(c.peek_kind(), name_ctx) {
                None
            } else {
                Some(self.parse_identifier(c, name_ctx, production)?)
            };

            let type_parameters = self.parse_type_parameters(c)?;
            let params = self.parse_formal_parameters(c, body_ctx)?;
            let return_type = self.parse_return_type(c)?;
            let body = if c.at(SyntaxKind::OpenBraceToken) {
                Some(self.parse_function_body(c, body_ctx)?)
            } else if kind == SyntaxKind::FunctionDeclaration && self.options.annotations {
                // Overload signature.
                self.consume_semicolon(c, production)?;
                None
            } else {
                self.expect(c, SyntaxKind::OpenBraceToken, Production::FunctionBody)?;
                None
            };

            Ok(&*self.arena.alloc(Function {
                data: NodeData::new(kind, c.range_from(start)),
                is_async,
                is_generator,
                name,
                type_parameters,
                params,
                return_type,
                body,
            }))
        })
    }

    /// `: Type` after a parameter list.
    pub(crate) fn parse_return_type(&self, c: &mut Cursor<'t>) -> PResult<Option<&'a TypeAnnotation>> {
        if c.at(SyntaxKind::ColonToken) {
            self.parse_annotation(c, false)
        } else {
            Ok(None)
        }
    }

    /// `{ statements }` of a function, method or arrow, under the body's
    /// own context.
    pub(crate) fn parse_function_body(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a FunctionBody<'a>> {
        self.within(c, Production::FunctionBody, |c| {
            let start = c.start();
            self.expect(c, SyntaxKind::OpenBraceToken, Production::FunctionBody)?;
            let statements = self.parse_statements_until_brace(c, ctx)?;
            self.expect(c, SyntaxKind::CloseBraceToken, Production::FunctionBody)?;
            Ok(&*self.arena.alloc(FunctionBody {
                data: NodeData::new(SyntaxKind::FunctionBody, c.range_from(start)),
                statements,
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_module, parse_script, Parser, ParserOptions};
    use esgram_ast::node::*;
    use esgram_ast::syntax_kind::SyntaxKind;
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_diagnostics::{ErrorKind, Production};

    #[test]
    fn test_function_modifiers() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "async function* f() {} function g() {}").unwrap();
        let Statement::Function(f) = script.statements[0] else { panic!() };
        assert!(f.is_async && f.is_generator);
        assert_eq!(f.data.kind, SyntaxKind::FunctionDeclaration);
        let Statement::Function(g) = script.statements[1] else { panic!() };
        assert!(!g.is_async && !g.is_generator);
    }

    #[test]
    fn test_async_line_break_is_an_identifier() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "async\nfunction f() {}").unwrap();
        assert_eq!(script.statements.len(), 2);
        assert!(matches!(script.statements[0], Statement::Expression(_)));
        assert!(matches!(script.statements[1], Statement::Function(_)));
    }

    #[test]
    fn test_declaration_requires_name() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "function () {}").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoIdentifier);
        assert_eq!(err.leaf().production, Production::FunctionDeclaration);
    }

    #[test]
    fn test_yield_and_await_scoping() {
        let arena = AstArena::new();
        let interner = Interner::new();
        // `yield` is an identifier outside generators, `await` outside async
        // functions of a script.
        parse_script(&arena, &interner, "function f() { var yield = 1, await = 2; }").unwrap();
        let err = parse_script(&arena, &interner, "function* f() { var yield; }").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoIdentifier);
        let module = parse_module(&arena, &interner, "await x; async function f() { await y; }").unwrap();
        assert_eq!(module.items.len(), 2);
    }

    #[test]
    fn test_overload_signatures() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script =
            parse_script(&arena, &interner, "function f(a: string): void;\nfunction f(a) {}").unwrap();
        let Statement::Function(overload) = script.statements[0] else { panic!() };
        assert!(overload.body.is_none());
        assert!(overload.return_type.is_some());

        let stream = esgram_scanner::tokenize("function f();");
        let err = Parser::new(&arena, &interner, &stream)
            .with_options(ParserOptions::strict())
            .parse_script()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Expected(SyntaxKind::OpenBraceToken));
    }
}
