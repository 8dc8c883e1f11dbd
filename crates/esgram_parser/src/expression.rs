//! Expression grammar: assignment down to primary expressions.
//!
//! Binary operators are parsed by precedence climbing over [`BinaryLevel`]:
//! an operand absorbs every following operator that binds at least as
//! tightly as the level it was entered at, so a lone operand passes through
//! unwrapped. Arrow functions and destructuring assignments are cover
//! grammars resolved on checkpoints.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::types::*;
use esgram_core::text::{TokenIndex, TokenRange};
use esgram_diagnostics::{ErrorKind, Production};

use crate::context::Context;
use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};
use crate::precedence::{binary_operator_at, is_right_associative, right_operand_level};
use crate::utilities::is_start_of_expression;

impl<'a, 't> Parser<'a, 't> {
    /// Expression: one or more assignment expressions separated by commas.
    pub(crate) fn parse_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        self.within(c, Production::Expression, |c| {
            let start = c.start();
            let first = self.parse_assignment_expression(c, ctx)?;
            if !c.at(SyntaxKind::CommaToken) {
                return Ok(first);
            }
            let mut expressions = vec![first];
            while c.accept(SyntaxKind::CommaToken) {
                expressions.push(self.parse_assignment_expression(c, ctx)?);
            }
            Ok(Expression::Sequence(self.arena.alloc(SequenceExpression {
                data: NodeData::new(SyntaxKind::SequenceExpression, c.range_from(start)),
                expressions: self.arena.alloc_slice(expressions),
            })))
        })
    }

    pub(crate) fn parse_assignment_expression(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
    ) -> PResult<Expression<'a>> {
        let _guard = self.enter(c, Production::AssignmentExpression)?;

        if c.at(SyntaxKind::YieldKeyword) && ctx.contains(Context::YIELD) {
            return self.parse_yield_expression(c, ctx);
        }
        if self.is_arrow_ahead(c, ctx) {
            return self.parse_arrow_function(c, ctx);
        }

        let start = c.start();
        // Cover grammar: a bracketed literal whose closer is followed by `=`
        // is an assignment pattern. Only tokens are scanned to decide.
        if self.is_pattern_ahead(c, &[SyntaxKind::EqualsToken]) {
            let target = self.parse_assignment_pattern(c, ctx)?;
            c.skip();
            let value = self.parse_assignment_expression(c, ctx)?;
            return Ok(self.assignment(c, start, AssignmentOperator::Assign, target, value));
        }

        let mark = self.arena.mark();
        let mut fork = c.checkpoint();
        let conditional = self.parse_conditional_expression(&mut fork, ctx)?;

        // Cover grammar: a lone identifier or parenthesized form followed by
        // `=>` is the parameter list of an arrow function.
        if matches!(conditional, Expression::Identifier(_) | Expression::Parenthesized(_))
            && fork.at(SyntaxKind::EqualsGreaterThanToken)
            && !fork.line_break_before_next()
        {
            self.arena.abandon_since(mark);
            return self.parse_arrow_function(c, ctx);
        }

        let Some(operator) = AssignmentOperator::from_token(fork.peek_kind()) else {
            c.commit(fork);
            return Ok(conditional);
        };
        if !conditional.is_simple_assignment_target() {
            self.arena.abandon_since(mark);
            return self.fail(c, Production::AssignmentExpression, ErrorKind::InvalidAssignmentTarget);
        }
        c.commit(fork);
        c.skip();
        let value = self.parse_assignment_expression(c, ctx)?;
        Ok(self.assignment(c, start, operator, AssignmentTarget::Simple(conditional), value))
    }

    fn assignment(
        &self,
        c: &Cursor<'t>,
        start: TokenIndex,
        operator: AssignmentOperator,
        target: AssignmentTarget<'a>,
        value: Expression<'a>,
    ) -> Expression<'a> {
        Expression::Assignment(self.arena.alloc(AssignmentExpression {
            data: NodeData::new(SyntaxKind::AssignmentExpression, c.range_from(start)),
            operator,
            target,
            value,
        }))
    }

    fn parse_yield_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        let start = c.start();
        c.skip();
        let mut delegate = false;
        let mut argument = None;
        if !c.line_break_before_next() {
            delegate = c.accept(SyntaxKind::AsteriskToken);
            if delegate || is_start_of_expression(c.peek_kind()) {
                argument = Some(self.parse_assignment_expression(c, ctx)?);
            }
        }
        Ok(Expression::Yield(self.arena.alloc(YieldExpression {
            data: NodeData::new(SyntaxKind::YieldExpression, c.range_from(start)),
            delegate,
            argument,
        })))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Whether an arrow function starts at the cursor: `x =>`,
    /// `async x =>`, or a parenthesized list (optionally with type
    /// parameters and a return type) followed by `=>`.
    fn is_arrow_ahead(&self, c: &Cursor<'t>, ctx: Context) -> bool {
        let first = c.peek_kind();
        if Self::is_identifier(first, ctx) {
            let second = c.peek_nth_kind(1);
            if second == SyntaxKind::EqualsGreaterThanToken {
                return true;
            }
            if first != SyntaxKind::AsyncKeyword || c.line_break_after_next() {
                return false;
            }
            if Self::is_identifier(second, ctx) {
                return c.peek_nth_kind(2) == SyntaxKind::EqualsGreaterThanToken;
            }
            if second == SyntaxKind::OpenParenToken
                || (second == SyntaxKind::LessThanToken && self.options.annotations)
            {
                return self.lookahead(c, |probe| {
                    probe.skip();
                    self.is_parenthesized_arrow(probe)
                });
            }
            return false;
        }
        if first == SyntaxKind::OpenParenToken
            || (first == SyntaxKind::LessThanToken && self.options.annotations)
        {
            return self.lookahead(c, |probe| self.is_parenthesized_arrow(probe));
        }
        false
    }

    fn is_parenthesized_arrow(&self, probe: &mut Cursor<'t>) -> bool {
        if probe.at(SyntaxKind::LessThanToken) && self.skip_balanced(probe).is_err() {
            return false;
        }
        if !probe.at(SyntaxKind::OpenParenToken) || self.skip_balanced(probe).is_err() {
            return false;
        }
        if probe.at(SyntaxKind::ColonToken) && self.options.annotations {
            probe.skip();
            if self.skip_type(probe).is_err() {
                return false;
            }
        }
        probe.at(SyntaxKind::EqualsGreaterThanToken)
    }

    pub(crate) fn parse_arrow_function(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        self.within(c, Production::ArrowFunction, |c| {
            let start = c.start();
            let is_async = c.at(SyntaxKind::AsyncKeyword)
                && c.peek_nth_kind(1) != SyntaxKind::EqualsGreaterThanToken;
            if is_async {
                c.skip();
            }
            let body_ctx = ctx.function(is_async, false);

            // Type parameters of a generic arrow only widen the arrow's span.
            if c.at(SyntaxKind::LessThanToken) && self.options.annotations {
                self.skip_balanced(c)?;
            }
            let params = if c.at(SyntaxKind::OpenParenToken) {
                ArrowParameters::Formal(self.parse_formal_parameters(c, body_ctx)?)
            } else {
                ArrowParameters::Identifier(self.parse_identifier(c, ctx, Production::ArrowFunction)?)
            };
            let return_type = if c.at(SyntaxKind::ColonToken) {
                self.parse_annotation(c, false)?
            } else {
                None
            };

            if c.line_break_before_next() {
                return self.fail(c, Production::ArrowFunction, ErrorKind::LineTerminatorNotPermitted);
            }
            self.expect(c, SyntaxKind::EqualsGreaterThanToken, Production::ArrowFunction)?;

            let body = if c.at(SyntaxKind::OpenBraceToken) {
                ArrowBody::Block(self.parse_function_body(c, body_ctx)?)
            } else {
                let mut concise = body_ctx.without(Context::RETURN | Context::IN);
                concise.set(Context::IN, ctx.contains(Context::IN));
                ArrowBody::Expression(self.parse_assignment_expression(c, concise)?)
            };

            Ok(Expression::Arrow(self.arena.alloc(ArrowFunction {
                data: NodeData::new(SyntaxKind::ArrowFunction, c.range_from(start)),
                is_async,
                params,
                return_type,
                body,
            })))
        })
    }

    // ========================================================================
    // Conditional and binary ladder
    // ========================================================================

    fn parse_conditional_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        let start = c.start();
        let test = self.parse_binary_expression(c, ctx, BinaryLevel::LogicalOr)?;
        if !c.accept(SyntaxKind::QuestionToken) {
            return Ok(test);
        }
        let consequent = self.parse_assignment_expression(c, ctx.with(Context::IN))?;
        self.expect(c, SyntaxKind::ColonToken, Production::ConditionalExpression)?;
        let alternate = self.parse_assignment_expression(c, ctx)?;
        Ok(Expression::Conditional(self.arena.alloc(ConditionalExpression {
            data: NodeData::new(SyntaxKind::ConditionalExpression, c.range_from(start)),
            test,
            consequent,
            alternate,
        })))
    }

    /// A binary expression whose operators all bind at least as tightly as
    /// `min`.
    fn parse_binary_expression(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        min: BinaryLevel,
    ) -> PResult<Expression<'a>> {
        let start = c.start();
        let mut left = if c.at(SyntaxKind::PrivateName) {
            // `#x in o` is the only place a private name stands alone.
            if c.peek_nth_kind(1) != SyntaxKind::InKeyword
                || binary_operator_at(SyntaxKind::InKeyword, min, ctx).is_none()
            {
                return self.unexpected(c, Production::PrimaryExpression);
            }
            Expression::PrivateName(self.parse_private_name(c))
        } else {
            self.parse_unary_expression(c, ctx)?
        };
        while let Some(operator) = binary_operator_at(c.peek_kind(), min, ctx) {
            let level = operator.level();
            if is_right_associative(level) && matches!(left, Expression::Unary(_) | Expression::Await(_)) {
                // `-a ** b` is ambiguous and needs parentheses.
                return self.fail(c, Production::UnaryExpression, ErrorKind::UnexpectedToken);
            }
            c.skip();
            let right = self.parse_binary_expression(c, ctx, right_operand_level(level))?;
            left = Expression::Binary(self.arena.alloc(BinaryExpression {
                data: NodeData::new(operator.node_kind(), c.range_from(start)),
                operator,
                left,
                right,
            }));
        }
        Ok(left)
    }

    // ========================================================================
    // Unary and update
    // ========================================================================

    pub(crate) fn parse_unary_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        let _guard = self.enter(c, Production::UnaryExpression)?;
        let start = c.start();
        if let Some(operator) = UnaryOperator::from_token(c.peek_kind()) {
            c.skip();
            let argument = self.parse_unary_expression(c, ctx)?;
            return Ok(Expression::Unary(self.arena.alloc(UnaryExpression {
                data: NodeData::new(SyntaxKind::UnaryExpression, c.range_from(start)),
                operator,
                argument,
            })));
        }
        if c.at(SyntaxKind::AwaitKeyword) && ctx.contains(Context::AWAIT) {
            c.skip();
            let argument = self.parse_unary_expression(c, ctx)?;
            return Ok(Expression::Await(self.arena.alloc(AwaitExpression {
                data: NodeData::new(SyntaxKind::AwaitExpression, c.range_from(start)),
                argument,
            })));
        }
        self.parse_update_expression(c, ctx)
    }

    fn parse_update_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        let start = c.start();
        if let Some(operator) = UpdateOperator::from_token(c.peek_kind()) {
            c.skip();
            let target = *c;
            let argument = self.parse_unary_expression(c, ctx)?;
            if !argument.is_simple_assignment_target() {
                return self.fail(&target, Production::UnaryExpression, ErrorKind::InvalidAssignmentTarget);
            }
            return Ok(self.update(c, start, operator, true, argument));
        }

        let expression = self.parse_left_hand_side_expression(c, ctx)?;
        if c.line_break_before_next() {
            return Ok(expression);
        }
        let Some(operator) = UpdateOperator::from_token(c.peek_kind()) else {
            return Ok(expression);
        };
        if !expression.is_simple_assignment_target() {
            return self.fail(c, Production::UnaryExpression, ErrorKind::InvalidAssignmentTarget);
        }
        c.skip();
        Ok(self.update(c, start, operator, false, expression))
    }

    fn update(
        &self,
        c: &Cursor<'t>,
        start: TokenIndex,
        operator: UpdateOperator,
        prefix: bool,
        argument: Expression<'a>,
    ) -> Expression<'a> {
        Expression::Update(self.arena.alloc(UpdateExpression {
            data: NodeData::new(SyntaxKind::UpdateExpression, c.range_from(start)),
            operator,
            prefix,
            argument,
        }))
    }

    // ========================================================================
    // Left-hand-side expressions
    // ========================================================================

    /// New, call and member chains.
    pub(crate) fn parse_left_hand_side_expression(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
    ) -> PResult<Expression<'a>> {
        let start = c.start();
        let head = self.parse_chain_head(c, ctx)?;
        self.parse_chain_tail(c, ctx, start, head, true)
    }

    fn parse_chain_head(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        let start = c.start();
        match c.peek_kind() {
            SyntaxKind::NewKeyword => self.parse_new_expression(c, ctx),
            SyntaxKind::SuperKeyword => {
                c.skip();
                if !c.at_any(&[
                    SyntaxKind::DotToken,
                    SyntaxKind::OpenBracketToken,
                    SyntaxKind::OpenParenToken,
                ]) {
                    return self.unexpected(c, Production::LeftHandSideExpression);
                }
                Ok(Expression::Super(self.arena.alloc(SuperExpression {
                    data: NodeData::new(SyntaxKind::SuperExpression, c.range_from(start)),
                })))
            }
            SyntaxKind::ImportKeyword => match c.peek_nth_kind(1) {
                SyntaxKind::DotToken => {
                    if !ctx.contains(Context::MODULE) {
                        return self.unexpected(c, Production::LeftHandSideExpression);
                    }
                    c.skip();
                    c.skip();
                    self.expect(c, SyntaxKind::MetaKeyword, Production::LeftHandSideExpression)?;
                    Ok(self.meta_property(c, start, MetaPropertyKind::ImportMeta))
                }
                SyntaxKind::OpenParenToken => self.parse_import_call(c, ctx),
                _ => self.unexpected(c, Production::LeftHandSideExpression),
            },
            _ => self.parse_primary_expression(c, ctx),
        }
    }

    fn meta_property(&self, c: &Cursor<'t>, start: TokenIndex, meta: MetaPropertyKind) -> Expression<'a> {
        Expression::MetaProperty(self.arena.alloc(MetaProperty {
            data: NodeData::new(SyntaxKind::MetaProperty, c.range_from(start)),
            meta,
        }))
    }

    /// `import(source)` or `import(source, options)`.
    fn parse_import_call(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        self.within(c, Production::Arguments, |c| {
            let start = c.start();
            c.skip();
            self.expect(c, SyntaxKind::OpenParenToken, Production::Arguments)?;
            let inner = ctx.with(Context::IN);
            let source = self.parse_assignment_expression(c, inner)?;
            let mut options = None;
            if c.accept(SyntaxKind::CommaToken) && !c.at(SyntaxKind::CloseParenToken) {
                options = Some(self.parse_assignment_expression(c, inner)?);
                c.accept(SyntaxKind::CommaToken);
            }
            self.expect(c, SyntaxKind::CloseParenToken, Production::Arguments)?;
            Ok(Expression::ImportCall(self.arena.alloc(ImportCall {
                data: NodeData::new(SyntaxKind::ImportCall, c.range_from(start)),
                source,
                options,
            })))
        })
    }

    /// `new.target`, `new Callee`, `new Callee(args)`.
    fn parse_new_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        let start = c.start();
        c.skip();
        if c.accept(SyntaxKind::DotToken) {
            self.expect(c, SyntaxKind::TargetKeyword, Production::LeftHandSideExpression)?;
            return Ok(self.meta_property(c, start, MetaPropertyKind::NewTarget));
        }

        let callee_start = c.start();
        let head = if c.at(SyntaxKind::ImportKeyword) {
            // `new import(...)` is not a constructor call.
            return self.unexpected(c, Production::LeftHandSideExpression);
        } else {
            self.parse_chain_head(c, ctx)?
        };
        let callee = self.parse_chain_tail(c, ctx, callee_start, head, false)?;
        if c.at(SyntaxKind::QuestionDotToken) {
            // An optional chain cannot be constructed.
            return self.unexpected(c, Production::LeftHandSideExpression);
        }
        let arguments = if c.at(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments(c, ctx)?)
        } else {
            None
        };
        Ok(Expression::New(self.arena.alloc(NewExpression {
            data: NodeData::new(SyntaxKind::NewExpression, c.range_from(start)),
            callee,
            arguments,
        })))
    }

    /// Extend `head` with member accesses, tagged templates and, when
    /// `calls` is set, call arguments and optional chains. The first token
    /// that continues none of them ends the chain.
    fn parse_chain_tail(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        start: TokenIndex,
        head: Expression<'a>,
        calls: bool,
    ) -> PResult<Expression<'a>> {
        let mut expression = head;
        loop {
            expression = match c.peek_kind() {
                SyntaxKind::DotToken => {
                    c.skip();
                    let property = self.parse_member_name(c)?;
                    self.member(c, start, expression, property, false)
                }
                SyntaxKind::OpenBracketToken => {
                    c.skip();
                    let property = self.parse_expression(c, ctx.with(Context::IN))?;
                    self.expect(c, SyntaxKind::CloseBracketToken, Production::LeftHandSideExpression)?;
                    self.member(c, start, expression, MemberProperty::Computed(property), false)
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    if expression.is_optional_chain() {
                        return self.unexpected(c, Production::LeftHandSideExpression);
                    }
                    let quasi = self.parse_template_literal(c, ctx)?;
                    Expression::TaggedTemplate(self.arena.alloc(TaggedTemplateExpression {
                        data: NodeData::new(SyntaxKind::TaggedTemplateExpression, c.range_from(start)),
                        tag: expression,
                        quasi,
                    }))
                }
                SyntaxKind::OpenParenToken if calls => {
                    let arguments = self.parse_arguments(c, ctx)?;
                    self.call(c, start, expression, arguments, false)
                }
                SyntaxKind::QuestionDotToken if calls => {
                    c.skip();
                    match c.peek_kind() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments(c, ctx)?;
                            self.call(c, start, expression, arguments, true)
                        }
                        SyntaxKind::OpenBracketToken => {
                            c.skip();
                            let property = self.parse_expression(c, ctx.with(Context::IN))?;
                            self.expect(c, SyntaxKind::CloseBracketToken, Production::LeftHandSideExpression)?;
                            self.member(c, start, expression, MemberProperty::Computed(property), true)
                        }
                        _ => {
                            let property = self.parse_member_name(c)?;
                            self.member(c, start, expression, property, true)
                        }
                    }
                }
                _ => return Ok(expression),
            };
        }
    }

    fn parse_member_name(&self, c: &mut Cursor<'t>) -> PResult<MemberProperty<'a>> {
        if c.at(SyntaxKind::PrivateName) {
            return Ok(MemberProperty::Private(self.parse_private_name(c)));
        }
        Ok(MemberProperty::Name(
            self.parse_identifier_name(c, Production::LeftHandSideExpression)?,
        ))
    }

    pub(crate) fn parse_private_name(&self, c: &mut Cursor<'t>) -> &'a PrivateName {
        let index = c.skip();
        let text = c.token(index).text;
        self.arena.alloc(PrivateName {
            data: NodeData::new(SyntaxKind::PrivateName, TokenRange::single(index)),
            name: self.atom(text.strip_prefix('#').unwrap_or(text)),
        })
    }

    fn member(
        &self,
        c: &Cursor<'t>,
        start: TokenIndex,
        object: Expression<'a>,
        property: MemberProperty<'a>,
        optional: bool,
    ) -> Expression<'a> {
        Expression::Member(self.arena.alloc(MemberExpression {
            data: NodeData::new(SyntaxKind::MemberExpression, c.range_from(start)),
            object,
            property,
            optional,
        }))
    }

    fn call(
        &self,
        c: &Cursor<'t>,
        start: TokenIndex,
        callee: Expression<'a>,
        arguments: &'a Arguments<'a>,
        optional: bool,
    ) -> Expression<'a> {
        Expression::Call(self.arena.alloc(CallExpression {
            data: NodeData::new(SyntaxKind::CallExpression, c.range_from(start)),
            callee,
            arguments,
            optional,
        }))
    }

    pub(crate) fn parse_arguments(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a Arguments<'a>> {
        self.within(c, Production::Arguments, |c| {
            let start = c.start();
            self.expect(c, SyntaxKind::OpenParenToken, Production::Arguments)?;
            let inner = ctx.with(Context::IN);
            let mut items = Vec::new();
            while !c.at(SyntaxKind::CloseParenToken) {
                let item = if c.at(SyntaxKind::DotDotDotToken) {
                    Argument::Spread(self.parse_spread_element(c, inner)?)
                } else {
                    Argument::Expression(self.parse_assignment_expression(c, inner)?)
                };
                items.push(item);
                if !c.accept(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.expect(c, SyntaxKind::CloseParenToken, Production::Arguments)?;
            Ok(&*self.arena.alloc(Arguments {
                data: NodeData::new(SyntaxKind::Arguments, c.range_from(start)),
                items: self.arena.alloc_slice(items),
            }))
        })
    }

    fn parse_spread_element(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a SpreadElement<'a>> {
        let start = c.start();
        c.skip();
        let argument = self.parse_assignment_expression(c, ctx)?;
        Ok(self.arena.alloc(SpreadElement {
            data: NodeData::new(SyntaxKind::SpreadElement, c.range_from(start)),
            argument,
        }))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        let kind = c.peek_kind();
        match kind {
            SyntaxKind::ThisKeyword => {
                let index = c.skip();
                Ok(Expression::This(self.arena.alloc(ThisExpression {
                    data: NodeData::new(SyntaxKind::ThisExpression, TokenRange::single(index)),
                })))
            }
            SyntaxKind::AsyncKeyword
                if c.peek_nth_kind(1) == SyntaxKind::FunctionKeyword && !c.line_break_after_next() =>
            {
                Ok(Expression::Function(self.parse_function_expression(c, ctx)?))
            }
            SyntaxKind::FunctionKeyword => Ok(Expression::Function(self.parse_function_expression(c, ctx)?)),
            SyntaxKind::ClassKeyword => Ok(Expression::Class(self.parse_class_expression(c, ctx)?)),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                Ok(Expression::Template(self.parse_template_literal(c, ctx)?))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(c, ctx),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(c, ctx),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(c, ctx),
            _ if LiteralKind::from_token(kind).is_some() => {
                Ok(Expression::Literal(self.parse_literal(c, Production::PrimaryExpression)?))
            }
            _ if Self::is_identifier(kind, ctx) => {
                let index = c.skip();
                Ok(Expression::Identifier(self.identifier_at(c, index)))
            }
            _ => self.unexpected(c, Production::PrimaryExpression),
        }
    }

    fn parse_parenthesized_expression(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        self.within(c, Production::ParenthesizedExpression, |c| {
            let start = c.start();
            c.skip();
            let expression = self.parse_expression(c, ctx.with(Context::IN))?;
            self.expect(c, SyntaxKind::CloseParenToken, Production::ParenthesizedExpression)?;
            Ok(Expression::Parenthesized(self.arena.alloc(ParenthesizedExpression {
                data: NodeData::new(SyntaxKind::ParenthesizedExpression, c.range_from(start)),
                expression,
            })))
        })
    }

    pub(crate) fn parse_template_literal(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
    ) -> PResult<&'a TemplateLiteral<'a>> {
        self.within(c, Production::TemplateLiteral, |c| {
            let start = c.start();
            let mut quasis = Vec::new();
            let mut expressions = Vec::new();
            if c.at(SyntaxKind::NoSubstitutionTemplateLiteral) {
                quasis.push(c.skip());
            } else {
                quasis.push(c.skip());
                loop {
                    expressions.push(self.parse_expression(c, ctx.with(Context::IN))?);
                    match c.peek_kind() {
                        SyntaxKind::TemplateMiddle => quasis.push(c.skip()),
                        SyntaxKind::TemplateTail => {
                            quasis.push(c.skip());
                            break;
                        }
                        _ => {
                            self.expect(c, SyntaxKind::TemplateTail, Production::TemplateLiteral)?;
                        }
                    }
                }
            }
            Ok(&*self.arena.alloc(TemplateLiteral {
                data: NodeData::new(SyntaxKind::TemplateLiteral, c.range_from(start)),
                quasis: self.arena.alloc_slice(quasis),
                expressions: self.arena.alloc_slice(expressions),
            }))
        })
    }

    fn parse_array_literal(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        self.within(c, Production::ArrayLiteral, |c| {
            let start = c.start();
            c.skip();
            let inner = ctx.with(Context::IN);
            let mut elements = Vec::new();
            while !c.at(SyntaxKind::CloseBracketToken) {
                if c.accept(SyntaxKind::CommaToken) {
                    elements.push(ArrayElement::Hole);
                    continue;
                }
                let element = if c.at(SyntaxKind::DotDotDotToken) {
                    ArrayElement::Spread(self.parse_spread_element(c, inner)?)
                } else {
                    ArrayElement::Expression(self.parse_assignment_expression(c, inner)?)
                };
                elements.push(element);
                if !c.at(SyntaxKind::CloseBracketToken) {
                    self.expect(c, SyntaxKind::CommaToken, Production::ArrayLiteral)?;
                }
            }
            c.skip();
            Ok(Expression::Array(self.arena.alloc(ArrayLiteral {
                data: NodeData::new(SyntaxKind::ArrayLiteral, c.range_from(start)),
                elements: self.arena.alloc_slice(elements),
            })))
        })
    }

    fn parse_object_literal(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Expression<'a>> {
        self.within(c, Production::ObjectLiteral, |c| {
            let start = c.start();
            c.skip();
            let mut properties = Vec::new();
            while !c.at(SyntaxKind::CloseBraceToken) {
                properties.push(self.parse_property_definition(c, ctx)?);
                if !c.at(SyntaxKind::CloseBraceToken) {
                    self.expect(c, SyntaxKind::CommaToken, Production::ObjectLiteral)?;
                }
            }
            c.skip();
            Ok(Expression::Object(self.arena.alloc(ObjectLiteral {
                data: NodeData::new(SyntaxKind::ObjectLiteral, c.range_from(start)),
                properties: self.arena.alloc_slice(properties),
            })))
        })
    }

    fn parse_property_definition(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<ObjectProperty<'a>> {
        self.within(c, Production::PropertyDefinition, |c| {
            let start = c.start();
            let inner = ctx.with(Context::IN);
            if c.at(SyntaxKind::DotDotDotToken) {
                return Ok(ObjectProperty::Spread(self.parse_spread_element(c, inner)?));
            }

            let modifiers = self.parse_member_modifiers(c, false);
            let key_kind = c.peek_kind();
            let key = self.parse_property_key(c, ctx, false)?;
            if modifiers.is_method() || c.at(SyntaxKind::OpenParenToken) || c.at(SyntaxKind::LessThanToken) {
                let method = self.parse_method_rest(c, ctx, start, modifiers, key, false)?;
                return Ok(ObjectProperty::Method(method));
            }

            match (key, c.peek_kind()) {
                (_, SyntaxKind::ColonToken) => {
                    c.skip();
                    let value = self.parse_assignment_expression(c, inner)?;
                    Ok(ObjectProperty::Property(self.arena.alloc(PropertyAssignment {
                        data: NodeData::new(SyntaxKind::PropertyAssignment, c.range_from(start)),
                        key,
                        value,
                    })))
                }
                (PropertyKey::Identifier(name), SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken)
                    if Self::is_identifier(key_kind, ctx) =>
                {
                    Ok(ObjectProperty::Shorthand(self.arena.alloc(ShorthandProperty {
                        data: NodeData::new(SyntaxKind::ShorthandProperty, c.range_from(start)),
                        name,
                    })))
                }
                _ => self.unexpected(c, Production::PropertyDefinition),
            }
        })
    }

    /// A property name: identifier name, string, number, computed key, or
    /// (in classes) a private name.
    pub(crate) fn parse_property_key(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        allow_private: bool,
    ) -> PResult<PropertyKey<'a>> {
        match c.peek_kind() {
            SyntaxKind::StringLiteral => Ok(PropertyKey::String(self.parse_literal(c, Production::PropertyName)?)),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                Ok(PropertyKey::Numeric(self.parse_literal(c, Production::PropertyName)?))
            }
            SyntaxKind::PrivateName if allow_private => Ok(PropertyKey::Private(self.parse_private_name(c))),
            SyntaxKind::OpenBracketToken => {
                let start = c.start();
                c.skip();
                let expression = self.parse_assignment_expression(c, ctx.with(Context::IN))?;
                self.expect(c, SyntaxKind::CloseBracketToken, Production::PropertyName)?;
                Ok(PropertyKey::Computed(self.arena.alloc(ComputedPropertyName {
                    data: NodeData::new(SyntaxKind::ComputedPropertyName, c.range_from(start)),
                    expression,
                })))
            }
            kind if kind.is_identifier_name() => {
                Ok(PropertyKey::Identifier(self.parse_identifier_name(c, Production::PropertyName)?))
            }
            SyntaxKind::Unknown => self.fail(c, Production::PropertyName, ErrorKind::InvalidToken),
            _ => self.fail(c, Production::PropertyName, ErrorKind::NoIdentifier),
        }
    }
}
