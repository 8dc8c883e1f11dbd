//! Binding patterns, formal parameters and assignment patterns.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_diagnostics::{ErrorKind, Production};

use crate::context::Context;
use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};

/// Parameter modifiers of annotated constructors (`constructor(private x)`).
const PARAMETER_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

/// Tokens after which a nested literal in a pattern is itself a pattern.
const TARGET_FOLLOWERS: &[SyntaxKind] = &[
    SyntaxKind::EqualsToken,
    SyntaxKind::CommaToken,
    SyntaxKind::CloseBracketToken,
    SyntaxKind::CloseBraceToken,
    SyntaxKind::InKeyword,
    SyntaxKind::OfKeyword,
];

/// Tokens that may end an element of an assignment pattern.
const ELEMENT_FOLLOWERS: &[SyntaxKind] = &[
    SyntaxKind::EqualsToken,
    SyntaxKind::CommaToken,
    SyntaxKind::CloseBracketToken,
    SyntaxKind::CloseBraceToken,
];

impl<'a, 't> Parser<'a, 't> {
    // ========================================================================
    // Binding patterns
    // ========================================================================

    /// A binding identifier or a destructuring pattern.
    pub(crate) fn parse_binding_target(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<BindingTarget<'a>> {
        let _guard = self.enter(c, Production::BindingPattern)?;
        match c.peek_kind() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(c, ctx),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(c, ctx),
            _ => Ok(BindingTarget::Identifier(
                self.parse_identifier(c, ctx, Production::BindingElement)?,
            )),
        }
    }

    /// A binding target with an optional default. `annotated` allows a
    /// `?`/`!` marker and a type annotation after the target.
    pub(crate) fn parse_binding_element(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        annotated: bool,
    ) -> PResult<&'a BindingElement<'a>> {
        self.within(c, Production::BindingElement, |c| {
            let start = c.start();
            let target = self.parse_binding_target(c, ctx)?;
            let annotation = if annotated { self.parse_annotation(c, true)? } else { None };
            let initializer = self.parse_initializer(c, ctx)?;
            Ok(&*self.arena.alloc(BindingElement {
                data: NodeData::new(SyntaxKind::BindingElement, c.range_from(start)),
                target,
                annotation,
                initializer,
            }))
        })
    }

    /// `= AssignmentExpression`, if present.
    pub(crate) fn parse_initializer(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Option<Expression<'a>>> {
        if !c.accept(SyntaxKind::EqualsToken) {
            return Ok(None);
        }
        Ok(Some(self.parse_assignment_expression(c, ctx)?))
    }

    fn parse_binding_rest(&self, c: &mut Cursor<'t>, ctx: Context, annotated: bool) -> PResult<&'a BindingRest<'a>> {
        let start = c.start();
        c.skip();
        let target = self.parse_binding_target(c, ctx)?;
        let annotation = if annotated { self.parse_annotation(c, false)? } else { None };
        if c.at(SyntaxKind::EqualsToken) {
            return self.fail(c, Production::BindingElement, ErrorKind::RestInitializer);
        }
        Ok(self.arena.alloc(BindingRest {
            data: NodeData::new(SyntaxKind::BindingRest, c.range_from(start)),
            target,
            annotation,
        }))
    }

    fn parse_object_binding_pattern(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<BindingTarget<'a>> {
        self.within(c, Production::BindingPattern, |c| {
            let start = c.start();
            c.skip();
            let inner = ctx.with(Context::IN);
            let mut properties = Vec::new();
            let mut rest = None;
            while !c.at(SyntaxKind::CloseBraceToken) {
                if c.at(SyntaxKind::DotDotDotToken) {
                    rest = Some(self.parse_binding_rest(c, inner, false)?);
                    if !c.at(SyntaxKind::CloseBraceToken) {
                        return self.fail(c, Production::BindingPattern, ErrorKind::RestNotLast);
                    }
                    break;
                }
                properties.push(self.parse_binding_property(c, inner)?);
                if !c.at(SyntaxKind::CloseBraceToken) {
                    self.expect(c, SyntaxKind::CommaToken, Production::BindingPattern)?;
                }
            }
            self.expect(c, SyntaxKind::CloseBraceToken, Production::BindingPattern)?;
            Ok(BindingTarget::Object(self.arena.alloc(ObjectBindingPattern {
                data: NodeData::new(SyntaxKind::ObjectBindingPattern, c.range_from(start)),
                properties: self.arena.alloc_slice(properties),
                rest,
            })))
        })
    }

    fn parse_binding_property(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<ObjectBindingEntry<'a>> {
        if Self::is_identifier(c.peek_kind(), ctx) && c.peek_nth_kind(1) != SyntaxKind::ColonToken {
            return Ok(ObjectBindingEntry::Shorthand(self.parse_binding_element(c, ctx, false)?));
        }
        let start = c.start();
        let key = self.parse_property_key(c, ctx, false)?;
        self.expect(c, SyntaxKind::ColonToken, Production::BindingPattern)?;
        let value = self.parse_binding_element(c, ctx, false)?;
        Ok(ObjectBindingEntry::Property(self.arena.alloc(BindingProperty {
            data: NodeData::new(SyntaxKind::BindingProperty, c.range_from(start)),
            key,
            value,
        })))
    }

    fn parse_array_binding_pattern(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<BindingTarget<'a>> {
        self.within(c, Production::BindingPattern, |c| {
            let start = c.start();
            c.skip();
            let inner = ctx.with(Context::IN);
            let mut elements = Vec::new();
            let mut rest = None;
            while !c.at(SyntaxKind::CloseBracketToken) {
                if c.accept(SyntaxKind::CommaToken) {
                    elements.push(None);
                    continue;
                }
                if c.at(SyntaxKind::DotDotDotToken) {
                    rest = Some(self.parse_binding_rest(c, inner, false)?);
                    if !c.at(SyntaxKind::CloseBracketToken) {
                        return self.fail(c, Production::BindingPattern, ErrorKind::RestNotLast);
                    }
                    break;
                }
                elements.push(Some(self.parse_binding_element(c, inner, false)?));
                if !c.at(SyntaxKind::CloseBracketToken) {
                    self.expect(c, SyntaxKind::CommaToken, Production::BindingPattern)?;
                }
            }
            self.expect(c, SyntaxKind::CloseBracketToken, Production::BindingPattern)?;
            Ok(BindingTarget::Array(self.arena.alloc(ArrayBindingPattern {
                data: NodeData::new(SyntaxKind::ArrayBindingPattern, c.range_from(start)),
                elements: self.arena.alloc_slice(elements),
                rest,
            })))
        })
    }

    // ========================================================================
    // Formal parameters
    // ========================================================================

    /// `( params )` of a function, method or arrow. `ctx` is the context of
    /// the function body, so defaults see its `yield`/`await` flags.
    pub(crate) fn parse_formal_parameters(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
    ) -> PResult<&'a FormalParameters<'a>> {
        self.within(c, Production::FormalParameters, |c| {
            let start = c.start();
            self.expect(c, SyntaxKind::OpenParenToken, Production::FormalParameters)?;
            let this_param = self.parse_this_parameter(c)?;
            if this_param.is_some() && !c.at(SyntaxKind::CloseParenToken) {
                self.expect(c, SyntaxKind::CommaToken, Production::FormalParameters)?;
            }

            let mut items = Vec::new();
            let mut rest = None;
            while !c.at(SyntaxKind::CloseParenToken) {
                self.skip_parameter_modifiers(c);
                if c.at(SyntaxKind::DotDotDotToken) {
                    rest = Some(self.parse_binding_rest(c, ctx, true)?);
                    if !c.at(SyntaxKind::CloseParenToken) {
                        return self.fail(c, Production::FormalParameters, ErrorKind::RestNotLast);
                    }
                    break;
                }
                items.push(self.parse_binding_element(c, ctx, true)?);
                if !c.at(SyntaxKind::CloseParenToken) {
                    self.expect(c, SyntaxKind::CommaToken, Production::FormalParameters)?;
                }
            }
            self.expect(c, SyntaxKind::CloseParenToken, Production::FormalParameters)?;
            Ok(&*self.arena.alloc(FormalParameters {
                data: NodeData::new(SyntaxKind::FormalParameters, c.range_from(start)),
                this_param,
                items: self.arena.alloc_slice(items),
                rest,
            }))
        })
    }

    /// Skip accessibility and `readonly` words in front of a parameter name.
    fn skip_parameter_modifiers(&self, c: &mut Cursor<'t>) {
        if !self.options.annotations {
            return;
        }
        while PARAMETER_MODIFIERS.contains(&c.peek().text)
            && matches!(
                c.peek_nth_kind(1),
                kind if kind.is_identifier_like()
                    || kind == SyntaxKind::OpenBraceToken
                    || kind == SyntaxKind::OpenBracketToken
            )
        {
            c.skip();
        }
    }

    // ========================================================================
    // Assignment patterns
    // ========================================================================

    /// An object or array literal reinterpreted as a destructuring target.
    pub(crate) fn parse_assignment_pattern(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
    ) -> PResult<AssignmentTarget<'a>> {
        let _guard = self.enter(c, Production::AssignmentPattern)?;
        self.within(c, Production::AssignmentPattern, |c| match c.peek_kind() {
            SyntaxKind::OpenBraceToken => self.parse_object_assignment_pattern(c, ctx),
            SyntaxKind::OpenBracketToken => self.parse_array_assignment_pattern(c, ctx),
            _ => self.unexpected(c, Production::AssignmentPattern),
        })
    }

    fn parse_object_assignment_pattern(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<AssignmentTarget<'a>> {
        let start = c.start();
        c.skip();
        let inner = ctx.with(Context::IN);
        let mut properties = Vec::new();
        let mut rest = None;
        while !c.at(SyntaxKind::CloseBraceToken) {
            if c.at(SyntaxKind::DotDotDotToken) {
                rest = Some(self.parse_assignment_rest(c, inner)?);
                if !c.at(SyntaxKind::CloseBraceToken) {
                    return self.fail(c, Production::AssignmentPattern, ErrorKind::RestNotLast);
                }
                break;
            }
            properties.push(self.parse_assignment_property(c, inner)?);
            if !c.at(SyntaxKind::CloseBraceToken) {
                self.expect(c, SyntaxKind::CommaToken, Production::AssignmentPattern)?;
            }
        }
        self.expect(c, SyntaxKind::CloseBraceToken, Production::AssignmentPattern)?;
        Ok(AssignmentTarget::Object(self.arena.alloc(ObjectAssignmentPattern {
            data: NodeData::new(SyntaxKind::ObjectAssignmentPattern, c.range_from(start)),
            properties: self.arena.alloc_slice(properties),
            rest,
        })))
    }

    fn parse_assignment_property(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<ObjectAssignmentEntry<'a>> {
        let start = c.start();
        if Self::is_identifier(c.peek_kind(), ctx) && c.peek_nth_kind(1) != SyntaxKind::ColonToken {
            let index = c.skip();
            let target = AssignmentTarget::Simple(Expression::Identifier(self.identifier_at(c, index)));
            let initializer = self.parse_initializer(c, ctx)?;
            return Ok(ObjectAssignmentEntry::Shorthand(self.arena.alloc(AssignmentElement {
                data: NodeData::new(SyntaxKind::AssignmentElement, c.range_from(start)),
                target,
                initializer,
            })));
        }
        let key = self.parse_property_key(c, ctx, false)?;
        self.expect(c, SyntaxKind::ColonToken, Production::AssignmentPattern)?;
        let value = self.parse_assignment_element(c, ctx)?;
        Ok(ObjectAssignmentEntry::Property(self.arena.alloc(AssignmentProperty {
            data: NodeData::new(SyntaxKind::AssignmentProperty, c.range_from(start)),
            key,
            value,
        })))
    }

    fn parse_array_assignment_pattern(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<AssignmentTarget<'a>> {
        let start = c.start();
        c.skip();
        let inner = ctx.with(Context::IN);
        let mut elements = Vec::new();
        let mut rest = None;
        while !c.at(SyntaxKind::CloseBracketToken) {
            if c.accept(SyntaxKind::CommaToken) {
                elements.push(None);
                continue;
            }
            if c.at(SyntaxKind::DotDotDotToken) {
                rest = Some(self.parse_assignment_rest(c, inner)?);
                if !c.at(SyntaxKind::CloseBracketToken) {
                    return self.fail(c, Production::AssignmentPattern, ErrorKind::RestNotLast);
                }
                break;
            }
            elements.push(Some(self.parse_assignment_element(c, inner)?));
            if !c.at(SyntaxKind::CloseBracketToken) {
                self.expect(c, SyntaxKind::CommaToken, Production::AssignmentPattern)?;
            }
        }
        self.expect(c, SyntaxKind::CloseBracketToken, Production::AssignmentPattern)?;
        Ok(AssignmentTarget::Array(self.arena.alloc(ArrayAssignmentPattern {
            data: NodeData::new(SyntaxKind::ArrayAssignmentPattern, c.range_from(start)),
            elements: self.arena.alloc_slice(elements),
            rest,
        })))
    }

    fn parse_assignment_element(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a AssignmentElement<'a>> {
        let start = c.start();
        let at = *c;
        let target = self.parse_assignment_target(c, ctx)?;
        self.end_of_assignment_element(&at, c)?;
        let initializer = self.parse_initializer(c, ctx)?;
        Ok(self.arena.alloc(AssignmentElement {
            data: NodeData::new(SyntaxKind::AssignmentElement, c.range_from(start)),
            target,
            initializer,
        }))
    }

    fn parse_assignment_rest(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a AssignmentRest<'a>> {
        let start = c.start();
        c.skip();
        let at = *c;
        let target = self.parse_assignment_target(c, ctx)?;
        self.end_of_assignment_element(&at, c)?;
        if c.at(SyntaxKind::EqualsToken) {
            return self.fail(c, Production::AssignmentPattern, ErrorKind::RestInitializer);
        }
        Ok(self.arena.alloc(AssignmentRest {
            data: NodeData::new(SyntaxKind::AssignmentRest, c.range_from(start)),
            target,
        }))
    }

    /// Whether the cursor is at `[` or `{` and the token after its matching
    /// closer is one of `followers`.
    pub(crate) fn is_pattern_ahead(&self, c: &Cursor<'t>, followers: &[SyntaxKind]) -> bool {
        c.at_any(&[SyntaxKind::OpenBraceToken, SyntaxKind::OpenBracketToken])
            && self.lookahead(c, |probe| self.skip_balanced(probe).is_ok() && probe.at_any(followers))
    }

    /// A nested pattern or a simple target. `[a][0]` inside a pattern is a
    /// member access, so a nested pattern only counts when a pattern
    /// delimiter follows it.
    pub(crate) fn parse_assignment_target(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
    ) -> PResult<AssignmentTarget<'a>> {
        if self.is_pattern_ahead(c, TARGET_FOLLOWERS) {
            return self.parse_assignment_pattern(c, ctx);
        }
        let at = *c;
        let expression = self.parse_left_hand_side_expression(c, ctx)?;
        if !expression.is_simple_assignment_target() {
            return self.fail(&at, Production::AssignmentPattern, ErrorKind::InvalidAssignmentTarget);
        }
        Ok(AssignmentTarget::Simple(expression))
    }

    /// Fail unless the element that began at `at` is followed by a token
    /// that may end a pattern element.
    fn end_of_assignment_element(&self, at: &Cursor<'t>, c: &Cursor<'t>) -> PResult<()> {
        if c.at_any(ELEMENT_FOLLOWERS) {
            return Ok(());
        }
        self.fail(at, Production::AssignmentPattern, ErrorKind::InvalidAssignmentTarget)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_script;
    use esgram_ast::node::*;
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_diagnostics::ErrorKind;

    fn first_declarator<'a>(script: &'a Script<'a>) -> &'a VariableDeclarator<'a> {
        let Statement::Variable(declaration) = script.statements[0] else {
            panic!("expected a variable declaration");
        };
        declaration.declarators[0]
    }

    #[test]
    fn test_nested_binding_patterns() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "var { a, b: [c, , d = 1], ...e } = f;").unwrap();
        let BindingTarget::Object(object) = first_declarator(script).target else {
            panic!("expected an object pattern");
        };
        assert_eq!(object.properties.len(), 2);
        assert!(object.rest.is_some());
        let ObjectBindingEntry::Property(property) = object.properties[1] else {
            panic!("expected a keyed property");
        };
        let BindingTarget::Array(array) = property.value.target else {
            panic!("expected an array pattern");
        };
        assert_eq!(array.elements.len(), 3);
        assert!(array.elements[1].is_none());
        assert!(array.elements[2].unwrap().initializer.is_some());
    }

    #[test]
    fn test_rest_must_be_last() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "let [...a, b] = c;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RestNotLast);
        let err = parse_script(&arena, &interner, "function f(...a = 1) {}").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RestInitializer);
    }

    #[test]
    fn test_formal_parameters_with_annotations() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(
            &arena,
            &interner,
            "function f(this: Window, a?: string, { b }: T = {}, ...rest: number[]) {}",
        )
        .unwrap();
        let Statement::Function(function) = script.statements[0] else {
            panic!("expected a function");
        };
        assert!(function.params.this_param.is_some());
        assert_eq!(function.params.items.len(), 2);
        assert_eq!(function.params.len(), 3);
        assert!(function.params.items[0].annotation.is_some());
        assert!(function.params.items[1].initializer.is_some());
        assert!(function.params.rest.unwrap().annotation.is_some());
    }

    #[test]
    fn test_assignment_pattern_targets() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "[a.b, [c][0], { d: e.f } = {}] = g;").unwrap();
        let Statement::Expression(statement) = script.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::Assignment(assignment) = statement.expression else {
            panic!("expected an assignment");
        };
        let AssignmentTarget::Array(array) = assignment.target else {
            panic!("expected an array pattern");
        };
        assert!(matches!(array.elements[0].unwrap().target, AssignmentTarget::Simple(_)));
        assert!(matches!(
            array.elements[1].unwrap().target,
            AssignmentTarget::Simple(Expression::Member(_))
        ));
        let third = array.elements[2].unwrap();
        assert!(matches!(third.target, AssignmentTarget::Object(_)));
        assert!(third.initializer.is_some());
    }

    #[test]
    fn test_invalid_pattern_element() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "[a + b] = c;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidAssignmentTarget);
        let err = parse_script(&arena, &interner, "[[a] + b] = c;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidAssignmentTarget);
    }

    #[test]
    fn test_assignment_rest_must_be_last() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "[...a, b] = c;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RestNotLast);
        let err = parse_script(&arena, &interner, "({...a, b} = c);").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RestNotLast);
        let err = parse_script(&arena, &interner, "[x, [...a, b]] = c;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RestNotLast);
        let err = parse_script(&arena, &interner, "[...a = 1] = c;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RestInitializer);
    }

    #[test]
    fn test_deeply_nested_literals_are_built_once() {
        let depth = 40;
        let source = format!("{}a + b{};", "[".repeat(depth), "]".repeat(depth));
        let arena = AstArena::new();
        let interner = Interner::new();
        parse_script(&arena, &interner, &source).unwrap();
        let stats = arena.stats();
        assert_eq!(stats.abandoned, 0);
        assert!(stats.allocated < 4 * depth, "allocated {} nodes", stats.allocated);
    }

    #[test]
    fn test_deeply_nested_assignment_pattern() {
        let depth = 40;
        let source = format!("{}a{} = b;", "[".repeat(depth), "]".repeat(depth));
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, &source).unwrap();
        assert_eq!(arena.stats().abandoned, 0);

        let Statement::Expression(statement) = script.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::Assignment(assignment) = statement.expression else {
            panic!("expected an assignment");
        };
        let mut target = assignment.target;
        let mut levels = 0;
        while let AssignmentTarget::Array(array) = target {
            levels += 1;
            target = array.elements[0].unwrap().target;
        }
        assert_eq!(levels, depth);
        assert!(matches!(target, AssignmentTarget::Simple(Expression::Identifier(_))));
    }
}
