//! Classes and the member modifier cascade shared with object literals.
//!
//! A member may be introduced by `static`, then `async`, then one of `get`,
//! `set` or `*`. Every one of those keywords (except `*`) is also a valid
//! member name, so the cascade is greedy and then looks at what follows:
//! when the next token can only come after a name, the last keyword was the
//! name and the modifier state steps back exactly once.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::types::MethodKind;
use esgram_core::text::TokenIndex;
use esgram_diagnostics::{ErrorKind, Production};

use crate::context::Context;
use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};
use crate::utilities::ends_member_modifiers;

/// Member words of annotated classes that are skipped in front of a member.
const ANNOTATION_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "readonly",
    "abstract",
    "override",
    "declare",
    "accessor",
];

/// Modifier keywords in front of a class or object member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Modifiers {
    pub is_static: bool,
    pub is_async: bool,
    pub is_generator: bool,
    pub accessor: Option<MethodKind>,
}

impl Modifiers {
    /// Whether the modifiers force the member to be a method.
    pub(crate) fn is_method(&self) -> bool {
        self.is_async || self.is_generator || self.accessor.is_some()
    }

    fn method_kind(&self) -> MethodKind {
        self.accessor
            .unwrap_or_else(|| MethodKind::from_modifiers(self.is_async, self.is_generator))
    }

    /// The state after one more modifier keyword, or `None` if `kind` cannot
    /// follow the modifiers seen so far.
    fn advance(self, kind: SyntaxKind, allow_static: bool) -> Option<Modifiers> {
        let mut next = self;
        match kind {
            SyntaxKind::StaticKeyword if allow_static && self == Modifiers::default() => next.is_static = true,
            SyntaxKind::AsyncKeyword if !self.is_method() => next.is_async = true,
            SyntaxKind::GetKeyword if !self.is_method() => next.accessor = Some(MethodKind::Getter),
            SyntaxKind::SetKeyword if !self.is_method() => next.accessor = Some(MethodKind::Setter),
            SyntaxKind::AsteriskToken if !self.is_generator && self.accessor.is_none() => next.is_generator = true,
            _ => return None,
        }
        Some(next)
    }
}

impl<'a, 't> Parser<'a, 't> {
    /// Consume the member modifier cascade. Never fails: keywords that turn
    /// out to be the member's name are left unconsumed.
    pub(crate) fn parse_member_modifiers(&self, c: &mut Cursor<'t>, allow_static: bool) -> Modifiers {
        let mut state = Modifiers::default();
        let mut previous = None;
        let mut last = None;
        loop {
            let kind = c.peek_kind();
            if kind == SyntaxKind::AsyncKeyword && c.line_break_after_next() {
                break;
            }
            let Some(next) = state.advance(kind, allow_static) else {
                break;
            };
            previous = Some((state, *c));
            c.skip();
            state = next;
            last = Some(kind);
        }

        if let (Some((rolled_back, before)), Some(last)) = (previous, last) {
            let name_follows = ends_member_modifiers(c.peek_kind()) || c.line_break_before_next();
            if last != SyntaxKind::AsteriskToken && name_follows {
                *c = before;
                return rolled_back;
            }
        }
        state
    }

    /// Everything after a method's name: parameters, return type and body.
    pub(crate) fn parse_method_rest(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        start: TokenIndex,
        modifiers: Modifiers,
        key: PropertyKey<'a>,
        in_class: bool,
    ) -> PResult<&'a MethodDefinition<'a>> {
        self.within(c, Production::MethodDefinition, |c| {
            let kind = modifiers.method_kind();
            if self.options.annotations {
                c.accept(SyntaxKind::QuestionToken);
            }
            let type_parameters = self.parse_type_parameters(c)?;
            let body_ctx = ctx.function(kind.is_async(), kind.is_generator());
            let params = self.parse_formal_parameters(c, body_ctx)?;
            match kind {
                MethodKind::Getter if !params.is_empty() => {
                    return self.fail(c, Production::MethodDefinition, ErrorKind::GetterParameters);
                }
                MethodKind::Setter if params.len() != 1 => {
                    return self.fail(c, Production::MethodDefinition, ErrorKind::SetterParameters);
                }
                _ => {}
            }
            let return_type = self.parse_return_type(c)?;

            let body = if c.at(SyntaxKind::OpenBraceToken) {
                Some(self.parse_function_body(c, body_ctx)?)
            } else if in_class && self.options.annotations {
                self.consume_semicolon(c, Production::MethodDefinition)?;
                None
            } else {
                self.expect(c, SyntaxKind::OpenBraceToken, Production::FunctionBody)?;
                None
            };

            Ok(&*self.arena.alloc(MethodDefinition {
                data: NodeData::new(SyntaxKind::MethodDefinition, c.range_from(start)),
                is_static: modifiers.is_static,
                kind,
                key,
                type_parameters,
                params,
                return_type,
                body,
            }))
        })
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn parse_class_declaration(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        name_optional: bool,
    ) -> PResult<&'a Class<'a>> {
        self.parse_class(c, ctx, SyntaxKind::ClassDeclaration, Production::ClassDeclaration, name_optional)
    }

    pub(crate) fn parse_class_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a Class<'a>> {
        self.parse_class(c, ctx, SyntaxKind::ClassExpression, Production::ClassExpression, true)
    }

    fn parse_class(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        kind: SyntaxKind,
        production: Production,
        name_optional: bool,
    ) -> PResult<&'a Class<'a>> {
        self.within(c, production, |c| {
            let start = c.start();
            self.expect(c, SyntaxKind::ClassKeyword, production)?;

            let names_class = Self::is_identifier(c.peek_kind(), ctx)
                && !(self.options.annotations && c.at(SyntaxKind::ImplementsKeyword));
            let name = if names_class {
                Some(self.parse_identifier(c, ctx, production)?)
            } else if name_optional {
                None
            } else {
                return self.fail(c, production, ErrorKind::NoIdentifier);
            };

            let type_parameters = self.parse_type_parameters(c)?;
            let heritage = if c.at(SyntaxKind::ExtendsKeyword) {
                Some(self.parse_class_heritage(c, ctx)?)
            } else {
                None
            };
            let implements = self.parse_implements_clause(c)?;
            let body = self.parse_class_body(c, ctx)?;

            Ok(&*self.arena.alloc(Class {
                data: NodeData::new(kind, c.range_from(start)),
                name,
                type_parameters,
                heritage,
                implements,
                body,
            }))
        })
    }

    fn parse_class_heritage(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a ClassHeritage<'a>> {
        self.within(c, Production::ClassHeritage, |c| {
            let start = c.start();
            c.skip();
            let expression = self.parse_left_hand_side_expression(c, ctx)?;
            let type_arguments = self.parse_type_parameters(c)?;
            Ok(&*self.arena.alloc(ClassHeritage {
                data: NodeData::new(SyntaxKind::ClassHeritage, c.range_from(start)),
                expression,
                type_arguments,
            }))
        })
    }

    fn parse_class_body(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a ClassBody<'a>> {
        self.within(c, Production::ClassBody, |c| {
            let start = c.start();
            self.expect(c, SyntaxKind::OpenBraceToken, Production::ClassBody)?;
            let mut members = Vec::new();
            while !c.at(SyntaxKind::CloseBraceToken) && !c.is_eof() {
                members.push(self.parse_class_element(c, ctx)?);
            }
            self.expect(c, SyntaxKind::CloseBraceToken, Production::ClassBody)?;
            Ok(&*self.arena.alloc(ClassBody {
                data: NodeData::new(SyntaxKind::ClassBody, c.range_from(start)),
                members: self.arena.alloc_slice(members),
            }))
        })
    }

    fn parse_class_element(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<ClassElement<'a>> {
        self.within(c, Production::ClassElement, |c| {
            let start = c.start();
            if c.accept(SyntaxKind::SemicolonToken) {
                return Ok(ClassElement::Empty(self.arena.alloc(EmptyClassElement {
                    data: NodeData::new(SyntaxKind::EmptyClassElement, c.range_from(start)),
                })));
            }
            if c.at(SyntaxKind::StaticKeyword) && c.peek_nth_kind(1) == SyntaxKind::OpenBraceToken {
                c.skip();
                c.skip();
                let statements = self.parse_statements_until_brace(c, ctx.class_initializer())?;
                self.expect(c, SyntaxKind::CloseBraceToken, Production::ClassElement)?;
                return Ok(ClassElement::StaticBlock(self.arena.alloc(StaticBlock {
                    data: NodeData::new(SyntaxKind::StaticBlock, c.range_from(start)),
                    statements,
                })));
            }

            self.skip_annotation_modifiers(c);
            let modifiers = self.parse_member_modifiers(c, true);
            let key = self.parse_property_key(c, ctx, true)?;
            let is_method = modifiers.is_method()
                || c.at_any(&[SyntaxKind::OpenParenToken, SyntaxKind::LessThanToken])
                || (c.at(SyntaxKind::QuestionToken) && c.peek_nth_kind(1) == SyntaxKind::OpenParenToken);
            if is_method {
                let method = self.parse_method_rest(c, ctx, start, modifiers, key, true)?;
                return Ok(ClassElement::Method(method));
            }

            self.within(c, Production::FieldDefinition, |c| {
                let annotation = self.parse_annotation(c, true)?;
                let initializer = self.parse_initializer(c, ctx.class_initializer())?;
                self.consume_semicolon(c, Production::FieldDefinition)?;
                Ok(ClassElement::Field(self.arena.alloc(FieldDefinition {
                    data: NodeData::new(SyntaxKind::FieldDefinition, c.range_from(start)),
                    is_static: modifiers.is_static,
                    key,
                    annotation,
                    initializer,
                })))
            })
        })
    }

    /// Skip accessibility and similar words of annotated classes, unless the
    /// word is the member's own name.
    fn skip_annotation_modifiers(&self, c: &mut Cursor<'t>) {
        if !self.options.annotations {
            return;
        }
        while ANNOTATION_MODIFIERS.contains(&c.peek().text)
            && !ends_member_modifiers(c.peek_nth_kind(1))
            && !c.line_break_after_next()
        {
            c.skip();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_script, Parser, ParserOptions};
    use esgram_ast::node::*;
    use esgram_ast::syntax_kind::SyntaxKind;
    use esgram_ast::types::MethodKind;
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_diagnostics::{ErrorKind, Production};

    fn with_members(source: &str, check: impl FnOnce(&[ClassElement<'_>], &Interner)) {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, source).unwrap();
        let Statement::Class(class) = script.statements[0] else {
            panic!("expected a class in {source}");
        };
        check(class.body.members, &interner);
    }

    fn key_name(key: &PropertyKey<'_>, interner: &Interner) -> String {
        let PropertyKey::Identifier(id) = key else {
            panic!("expected an identifier key");
        };
        interner.resolve(id.name).to_string()
    }

    #[test]
    fn test_static_field() {
        with_members("class a {static b}", |members, interner| {
            assert_eq!(members.len(), 1);
            let ClassElement::Field(field) = members[0] else { panic!() };
            assert!(field.is_static);
            assert!(field.initializer.is_none());
            assert_eq!(key_name(&field.key, interner), "b");
        });
    }

    #[test]
    fn test_modifier_words_as_member_names() {
        with_members("class A { static; get() {} set = 1; async\nx() {} static async() {} }", |members, interner| {
            let ClassElement::Field(stat) = members[0] else { panic!() };
            assert!(!stat.is_static);
            assert_eq!(key_name(&stat.key, interner), "static");
            assert_eq!(stat.data.range.len(), 2);

            let ClassElement::Method(get) = members[1] else { panic!() };
            assert_eq!(get.kind, MethodKind::Normal);
            assert_eq!(key_name(&get.key, interner), "get");

            let ClassElement::Field(set) = members[2] else { panic!() };
            assert!(set.initializer.is_some());

            let ClassElement::Field(async_field) = members[3] else { panic!() };
            assert_eq!(key_name(&async_field.key, interner), "async");
            let ClassElement::Method(x) = members[4] else { panic!() };
            assert_eq!(x.kind, MethodKind::Normal);

            let ClassElement::Method(static_async) = members[5] else { panic!() };
            assert!(static_async.is_static);
            assert_eq!(static_async.kind, MethodKind::Normal);
            assert_eq!(key_name(&static_async.key, interner), "async");
        });
    }

    #[test]
    fn test_full_modifier_cascade() {
        with_members(
            "class A { static async *gen() {} static get x() {} set x(v) {} async m() {} *g() {} }",
            |members, _| {
                let kinds: Vec<(bool, MethodKind)> = members
                    .iter()
                    .map(|m| match m {
                        ClassElement::Method(m) => (m.is_static, m.kind),
                        other => panic!("expected a method, got {other:?}"),
                    })
                    .collect();
                assert_eq!(
                    kinds,
                    vec![
                        (true, MethodKind::AsyncGenerator),
                        (true, MethodKind::Getter),
                        (false, MethodKind::Setter),
                        (false, MethodKind::Async),
                        (false, MethodKind::Generator),
                    ]
                );
            },
        );
    }

    #[test]
    fn test_static_block_and_private_members() {
        with_members("class A { #x = 1; static { init(); } #m() { return this.#x; } ; }", |members, _| {
            assert_eq!(members.len(), 4);
            assert!(matches!(members[0], ClassElement::Field(FieldDefinition { key: PropertyKey::Private(_), .. })));
            let ClassElement::StaticBlock(block) = members[1] else { panic!() };
            assert_eq!(block.statements.len(), 1);
            assert!(matches!(members[2], ClassElement::Method(_)));
            assert!(matches!(members[3], ClassElement::Empty(_)));
        });
    }

    #[test]
    fn test_accessor_arity() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "class A { get x(a) {} }").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::GetterParameters);
        let err = parse_script(&arena, &interner, "class A { set x() {} }").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SetterParameters);
        let err = parse_script(&arena, &interner, "class A { get x = 1 }").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Expected(SyntaxKind::OpenParenToken));
    }

    #[test]
    fn test_missing_class_name_chain() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "class{}").unwrap_err();
        assert_eq!(
            err.productions(),
            vec![Production::Script, Production::Statement, Production::ClassDeclaration]
        );
        assert_eq!(err.kind(), &ErrorKind::NoIdentifier);
        assert_eq!(err.leaf().token.kind, SyntaxKind::OpenBraceToken);
    }

    #[test]
    fn test_heritage_and_annotations() {
        with_members(
            "class A<T> extends B.C<T> implements D, E { private readonly x: number; constructor(public y: T) { super(); } m?(): void; }",
            |members, interner| {
                assert_eq!(members.len(), 3);
                let ClassElement::Field(x) = members[0] else { panic!() };
                assert!(x.annotation.is_some());
                let ClassElement::Method(ctor) = members[1] else { panic!() };
                assert_eq!(key_name(&ctor.key, interner), "constructor");
                let ClassElement::Method(overload) = members[2] else { panic!() };
                assert!(overload.body.is_none());
            },
        );

        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "class A extends B {}").unwrap();
        let Statement::Class(class) = script.statements[0] else { panic!() };
        assert!(class.heritage.is_some());
        assert!(class.implements.is_none());
    }

    #[test]
    fn test_class_expression_without_name() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let stream = esgram_scanner::tokenize("x = class { m() {} };");
        let script = Parser::new(&arena, &interner, &stream)
            .with_options(ParserOptions::strict())
            .parse_script()
            .unwrap();
        let Statement::Expression(stmt) = script.statements[0] else { panic!() };
        let Expression::Assignment(assign) = stmt.expression else { panic!() };
        let Expression::Class(class) = assign.value else { panic!() };
        assert!(class.name.is_none());
        assert_eq!(class.data.kind, SyntaxKind::ClassExpression);
    }
}
