//! Statements and declarations.
//!
//! A statement is chosen by its leading keyword where one exists. The
//! remaining forms (labelled statements, `let` used as an identifier,
//! expression statements) and the heads of `for` loops are told apart by
//! ordered resolution over checkpoints.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::types::VariableKind;
use esgram_diagnostics::{ErrorKind, Production};

use crate::context::Context;
use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};

impl<'a, 't> Parser<'a, 't> {
    /// A statement or a declaration, as found in blocks and function bodies.
    pub(crate) fn parse_statement_list_item(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::Statement, |c| match c.peek_kind() {
            SyntaxKind::FunctionKeyword => Ok(Statement::Function(self.parse_function_declaration(c, ctx, false)?)),
            SyntaxKind::AsyncKeyword
                if c.peek_nth_kind(1) == SyntaxKind::FunctionKeyword && !c.line_break_after_next() =>
            {
                Ok(Statement::Function(self.parse_function_declaration(c, ctx, false)?))
            }
            SyntaxKind::ClassKeyword => Ok(Statement::Class(self.parse_class_declaration(c, ctx, false)?)),
            SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                let lexical = |c: &mut Cursor<'t>| self.parse_lexical_statement(c, ctx);
                let statement = |c: &mut Cursor<'t>| self.parse_statement(c, ctx);
                self.resolve_required(c, Production::Statement, &[&lexical, &statement])
            }
            _ => self.parse_statement(c, ctx),
        })
    }

    /// The declaration kind starting at the cursor, if `let` or `const`
    /// begins a lexical declaration there. `let` followed by anything but a
    /// binding is an identifier.
    fn lexical_kind_at(c: &Cursor<'t>, ctx: Context) -> Option<VariableKind> {
        match c.peek_kind() {
            SyntaxKind::ConstKeyword => Some(VariableKind::Const),
            SyntaxKind::LetKeyword => {
                let next = c.peek_nth_kind(1);
                let binds = next == SyntaxKind::OpenBracketToken
                    || next == SyntaxKind::OpenBraceToken
                    || Self::is_identifier(next, ctx);
                binds.then_some(VariableKind::Let)
            }
            _ => None,
        }
    }

    fn parse_lexical_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        let Some(kind) = Self::lexical_kind_at(c, ctx) else {
            return self.not_applicable(c, Production::LexicalDeclaration);
        };
        let declaration =
            self.parse_variable_statement(c, ctx.with(Context::IN), kind, Production::LexicalDeclaration)?;
        Ok(Statement::Variable(declaration))
    }

    /// A `var`, `let` or `const` keyword followed by its declarators, as
    /// used in a `for` head.
    pub(crate) fn parse_variable_declaration(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        kind: VariableKind,
        production: Production,
    ) -> PResult<&'a VariableDeclaration<'a>> {
        self.variable_declaration(c, ctx, kind, production, false)
    }

    /// A declaration in statement position. Its range includes the
    /// terminating semicolon, when present.
    pub(crate) fn parse_variable_statement(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        kind: VariableKind,
        production: Production,
    ) -> PResult<&'a VariableDeclaration<'a>> {
        self.variable_declaration(c, ctx, kind, production, true)
    }

    fn variable_declaration(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        kind: VariableKind,
        production: Production,
        terminated: bool,
    ) -> PResult<&'a VariableDeclaration<'a>> {
        self.within(c, production, |c| {
            let start = c.start();
            c.skip();
            let mut declarators = Vec::new();
            loop {
                let declarator_start = c.start();
                let target = self.parse_binding_target(c, ctx)?;
                let annotation = self.parse_annotation(c, true)?;
                let init = self.parse_initializer(c, ctx)?;
                declarators.push(&*self.arena.alloc(VariableDeclarator {
                    data: NodeData::new(SyntaxKind::VariableDeclarator, c.range_from(declarator_start)),
                    target,
                    annotation,
                    init,
                }));
                if !c.accept(SyntaxKind::CommaToken) {
                    break;
                }
            }
            if terminated {
                self.consume_semicolon(c, production)?;
            }
            Ok(&*self.arena.alloc(VariableDeclaration {
                data: NodeData::new(SyntaxKind::VariableDeclaration, c.range_from(start)),
                kind,
                declarators: self.arena.alloc_slice(declarators),
            }))
        })
    }

    /// A statement proper: no lexical, class or (outside the legacy
    /// extension) function declarations.
    pub(crate) fn parse_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        let _guard = self.enter(c, Production::Statement)?;
        self.within(c, Production::Statement, |c| match c.peek_kind() {
            SyntaxKind::OpenBraceToken => Ok(Statement::Block(self.parse_block(c, ctx)?)),
            SyntaxKind::SemicolonToken => {
                let start = c.start();
                c.skip();
                Ok(Statement::Empty(self.arena.alloc(EmptyStatement {
                    data: NodeData::new(SyntaxKind::EmptyStatement, c.range_from(start)),
                })))
            }
            SyntaxKind::VarKeyword => {
                let declaration = self.parse_variable_statement(
                    c,
                    ctx.with(Context::IN),
                    VariableKind::Var,
                    Production::VariableStatement,
                )?;
                Ok(Statement::Variable(declaration))
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(c, ctx),
            SyntaxKind::DoKeyword => self.parse_do_while_statement(c, ctx),
            SyntaxKind::WhileKeyword => self.parse_while_statement(c, ctx),
            SyntaxKind::ForKeyword => self.parse_for_statement(c, ctx),
            SyntaxKind::ContinueKeyword => self.parse_continue_statement(c, ctx),
            SyntaxKind::BreakKeyword => self.parse_break_statement(c, ctx),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(c, ctx),
            SyntaxKind::WithKeyword => self.parse_with_statement(c, ctx),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(c, ctx),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(c, ctx),
            SyntaxKind::TryKeyword => self.parse_try_statement(c, ctx),
            SyntaxKind::DebuggerKeyword => {
                let start = c.start();
                c.skip();
                self.consume_semicolon(c, Production::DebuggerStatement)?;
                Ok(Statement::Debugger(self.arena.alloc(DebuggerStatement {
                    data: NodeData::new(SyntaxKind::DebuggerStatement, c.range_from(start)),
                })))
            }
            SyntaxKind::FunctionKeyword if self.options.annex_b => {
                Ok(Statement::Function(self.parse_function_declaration(c, ctx, false)?))
            }
            SyntaxKind::ClassKeyword => self.unexpected(c, Production::Statement),
            _ => {
                let labelled = |c: &mut Cursor<'t>| self.parse_labelled_statement(c, ctx);
                let expression = |c: &mut Cursor<'t>| self.parse_expression_statement(c, ctx);
                self.resolve_required(c, Production::Statement, &[&labelled, &expression])
            }
        })
    }

    pub(crate) fn parse_block(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a Block<'a>> {
        self.within(c, Production::Block, |c| {
            let start = c.start();
            self.expect(c, SyntaxKind::OpenBraceToken, Production::Block)?;
            let statements = self.parse_statements_until_brace(c, ctx)?;
            self.expect(c, SyntaxKind::CloseBraceToken, Production::Block)?;
            Ok(&*self.arena.alloc(Block {
                data: NodeData::new(SyntaxKind::Block, c.range_from(start)),
                statements,
            }))
        })
    }

    /// Statement list items up to (not including) a closing brace or the
    /// end of input.
    pub(crate) fn parse_statements_until_brace(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
    ) -> PResult<NodeList<'a, Statement<'a>>> {
        let mut statements = Vec::new();
        while !c.at(SyntaxKind::CloseBraceToken) && !c.is_eof() {
            statements.push(self.parse_statement_list_item(c, ctx)?);
        }
        Ok(self.arena.alloc_slice(statements))
    }

    fn parse_labelled_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        if !Self::is_identifier(c.peek_kind(), ctx) || c.peek_nth_kind(1) != SyntaxKind::ColonToken {
            return self.not_applicable(c, Production::LabelledStatement);
        }
        self.within(c, Production::LabelledStatement, |c| {
            let start = c.start();
            let label = self.parse_identifier(c, ctx, Production::LabelledStatement)?;
            c.skip();
            let body = self.parse_statement(c, ctx)?;
            Ok(Statement::Labelled(self.arena.alloc(LabelledStatement {
                data: NodeData::new(SyntaxKind::LabelledStatement, c.range_from(start)),
                label,
                body,
            })))
        })
    }

    fn parse_expression_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        let refused = match c.peek_kind() {
            SyntaxKind::OpenBraceToken | SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword => true,
            SyntaxKind::LetKeyword => c.peek_nth_kind(1) == SyntaxKind::OpenBracketToken,
            SyntaxKind::AsyncKeyword => {
                c.peek_nth_kind(1) == SyntaxKind::FunctionKeyword && !c.line_break_after_next()
            }
            _ => false,
        };
        if refused {
            return self.not_applicable(c, Production::ExpressionStatement);
        }
        self.within(c, Production::ExpressionStatement, |c| {
            let start = c.start();
            let expression = self.parse_expression(c, ctx.with(Context::IN))?;
            self.consume_semicolon(c, Production::ExpressionStatement)?;
            Ok(Statement::Expression(self.arena.alloc(ExpressionStatement {
                data: NodeData::new(SyntaxKind::ExpressionStatement, c.range_from(start)),
                expression,
            })))
        })
    }

    /// `( Expression )` as used by `if`, `while`, `with` and `switch`.
    fn parse_parenthesized_head(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        production: Production,
    ) -> PResult<Expression<'a>> {
        self.expect(c, SyntaxKind::OpenParenToken, production)?;
        let expression = self.parse_expression(c, ctx.with(Context::IN))?;
        self.expect(c, SyntaxKind::CloseParenToken, production)?;
        Ok(expression)
    }

    fn parse_if_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::IfStatement, |c| {
            let start = c.start();
            c.skip();
            let test = self.parse_parenthesized_head(c, ctx, Production::IfStatement)?;
            let consequent = self.parse_statement(c, ctx)?;
            let alternate = if c.accept(SyntaxKind::ElseKeyword) {
                Some(self.parse_statement(c, ctx)?)
            } else {
                None
            };
            Ok(Statement::If(self.arena.alloc(IfStatement {
                data: NodeData::new(SyntaxKind::IfStatement, c.range_from(start)),
                test,
                consequent,
                alternate,
            })))
        })
    }

    fn parse_do_while_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::DoWhileStatement, |c| {
            let start = c.start();
            c.skip();
            let body = self.parse_statement(c, ctx)?;
            self.expect(c, SyntaxKind::WhileKeyword, Production::DoWhileStatement)?;
            let test = self.parse_parenthesized_head(c, ctx, Production::DoWhileStatement)?;
            // The semicolon after `do ... while (x)` is always optional.
            c.accept(SyntaxKind::SemicolonToken);
            Ok(Statement::DoWhile(self.arena.alloc(DoWhileStatement {
                data: NodeData::new(SyntaxKind::DoWhileStatement, c.range_from(start)),
                body,
                test,
            })))
        })
    }

    fn parse_while_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::WhileStatement, |c| {
            let start = c.start();
            c.skip();
            let test = self.parse_parenthesized_head(c, ctx, Production::WhileStatement)?;
            let body = self.parse_statement(c, ctx)?;
            Ok(Statement::While(self.arena.alloc(WhileStatement {
                data: NodeData::new(SyntaxKind::WhileStatement, c.range_from(start)),
                test,
                body,
            })))
        })
    }

    fn parse_with_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::WithStatement, |c| {
            let start = c.start();
            c.skip();
            let object = self.parse_parenthesized_head(c, ctx, Production::WithStatement)?;
            let body = self.parse_statement(c, ctx)?;
            Ok(Statement::With(self.arena.alloc(WithStatement {
                data: NodeData::new(SyntaxKind::WithStatement, c.range_from(start)),
                object,
                body,
            })))
        })
    }

    // ========================================================================
    // for
    // ========================================================================

    fn parse_for_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::ForStatement, |c| {
            let start = c.start();
            c.skip();
            let is_await = c.at(SyntaxKind::AwaitKeyword) && ctx.contains(Context::AWAIT);
            if is_await {
                c.skip();
            }
            self.expect(c, SyntaxKind::OpenParenToken, Production::ForStatement)?;

            let enumeration = |c: &mut Cursor<'t>| self.parse_for_enumeration(c, ctx, is_await);
            let classic = |c: &mut Cursor<'t>| self.parse_for_classic(c, ctx);
            let head = if is_await {
                self.resolve_required(c, Production::ForStatement, &[&enumeration])?
            } else {
                self.resolve_required(c, Production::ForStatement, &[&enumeration, &classic])?
            };

            self.expect(c, SyntaxKind::CloseParenToken, Production::ForStatement)?;
            let body = self.parse_statement(c, ctx)?;
            Ok(Statement::For(self.arena.alloc(ForStatement {
                data: NodeData::new(SyntaxKind::ForStatement, c.range_from(start)),
                head,
                body,
            })))
        })
    }

    /// A `var`, `let` or `const` declaration in a `for` head, parsed without
    /// the `in` operator. The sentinel when none starts here.
    fn parse_for_declaration(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a VariableDeclaration<'a>> {
        let head = ctx.without(Context::IN);
        if c.at(SyntaxKind::VarKeyword) {
            return self.parse_variable_declaration(c, head, VariableKind::Var, Production::VariableDeclaration);
        }
        match Self::lexical_kind_at(c, ctx) {
            Some(kind) => self.parse_variable_declaration(c, head, kind, Production::LexicalDeclaration),
            None => self.not_applicable(c, Production::VariableDeclaration),
        }
    }

    /// `left in right`, `left of right` or (with `await`) `left of right`.
    fn parse_for_enumeration(&self, c: &mut Cursor<'t>, ctx: Context, is_await: bool) -> PResult<ForHead<'a>> {
        // `for (async of` only starts a classic head, as in `async of => {}`.
        if !is_await && c.at(SyntaxKind::AsyncKeyword) && c.peek_nth_kind(1) == SyntaxKind::OfKeyword {
            return self.not_applicable(c, Production::ForStatement);
        }
        let declaration = |c: &mut Cursor<'t>| -> PResult<ForBinding<'a>> {
            Ok(ForBinding::Variable(self.parse_for_declaration(c, ctx)?))
        };
        let target = |c: &mut Cursor<'t>| -> PResult<ForBinding<'a>> {
            let head = ctx.without(Context::IN);
            if self.is_pattern_ahead(c, &[SyntaxKind::InKeyword, SyntaxKind::OfKeyword]) {
                return Ok(ForBinding::Target(self.parse_assignment_pattern(c, head)?));
            }
            self.speculate(c, Production::ForStatement, |c| {
                Ok(ForBinding::Target(self.parse_assignment_target(c, head)?))
            })
        };
        let left = self.resolve(c, Production::ForStatement, &[&declaration, &target])?;

        let is_in = match c.peek_kind() {
            SyntaxKind::OfKeyword => false,
            SyntaxKind::InKeyword if !is_await => true,
            _ if is_await => {
                return self.fail(c, Production::ForStatement, ErrorKind::Expected(SyntaxKind::OfKeyword));
            }
            _ => return self.not_applicable(c, Production::ForStatement),
        };

        if let ForBinding::Variable(declaration) = left {
            let legacy_initializer =
                is_in && declaration.kind == VariableKind::Var && self.options.annex_b;
            let valid = declaration.declarators.len() == 1
                && (declaration.declarators[0].init.is_none() || legacy_initializer);
            if !valid {
                return self.fail(c, Production::ForStatement, ErrorKind::InvalidForBinding);
            }
        }

        c.skip();
        let inner = ctx.with(Context::IN);
        if is_in {
            let right = self.parse_expression(c, inner)?;
            Ok(ForHead::In { left, right })
        } else {
            let right = self.parse_assignment_expression(c, inner)?;
            Ok(ForHead::Of { is_await, left, right })
        }
    }

    /// `init; test; update`
    fn parse_for_classic(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<ForHead<'a>> {
        let init = if c.at(SyntaxKind::SemicolonToken) {
            None
        } else {
            let declaration = |c: &mut Cursor<'t>| -> PResult<ForInit<'a>> {
                Ok(ForInit::Variable(self.parse_for_declaration(c, ctx)?))
            };
            let expression = |c: &mut Cursor<'t>| -> PResult<ForInit<'a>> {
                Ok(ForInit::Expression(self.parse_expression(c, ctx.without(Context::IN))?))
            };
            Some(self.resolve_required(c, Production::ForStatement, &[&declaration, &expression])?)
        };
        self.expect(c, SyntaxKind::SemicolonToken, Production::ForStatement)?;

        let inner = ctx.with(Context::IN);
        let test = if c.at(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_expression(c, inner)?)
        };
        self.expect(c, SyntaxKind::SemicolonToken, Production::ForStatement)?;
        let update = if c.at(SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.parse_expression(c, inner)?)
        };
        Ok(ForHead::Classic { init, test, update })
    }

    // ========================================================================
    // Jumps
    // ========================================================================

    /// An optional label on the same line as `continue` or `break`.
    fn parse_jump_label(&self, c: &mut Cursor<'t>, ctx: Context) -> Option<&'a Identifier> {
        if c.line_break_before_next() || !Self::is_identifier(c.peek_kind(), ctx) {
            return None;
        }
        let index = c.skip();
        Some(self.identifier_at(c, index))
    }

    fn parse_continue_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        let start = c.start();
        c.skip();
        let label = self.parse_jump_label(c, ctx);
        self.consume_semicolon(c, Production::ContinueStatement)?;
        Ok(Statement::Continue(self.arena.alloc(ContinueStatement {
            data: NodeData::new(SyntaxKind::ContinueStatement, c.range_from(start)),
            label,
        })))
    }

    fn parse_break_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        let start = c.start();
        c.skip();
        let label = self.parse_jump_label(c, ctx);
        self.consume_semicolon(c, Production::BreakStatement)?;
        Ok(Statement::Break(self.arena.alloc(BreakStatement {
            data: NodeData::new(SyntaxKind::BreakStatement, c.range_from(start)),
            label,
        })))
    }

    fn parse_return_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        if !ctx.contains(Context::RETURN) && !self.options.allow_return_outside_function {
            return self.fail(c, Production::ReturnStatement, ErrorKind::ReturnOutsideFunction);
        }
        self.within(c, Production::ReturnStatement, |c| {
            let start = c.start();
            c.skip();
            // A line terminator after `return` ends the statement.
            let argument = if c.at(SyntaxKind::SemicolonToken)
                || c.at(SyntaxKind::CloseBraceToken)
                || c.is_eof()
                || c.line_break_before_next()
            {
                None
            } else {
                Some(self.parse_expression(c, ctx.with(Context::IN))?)
            };
            self.consume_semicolon(c, Production::ReturnStatement)?;
            Ok(Statement::Return(self.arena.alloc(ReturnStatement {
                data: NodeData::new(SyntaxKind::ReturnStatement, c.range_from(start)),
                argument,
            })))
        })
    }

    fn parse_throw_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::ThrowStatement, |c| {
            let start = c.start();
            c.skip();
            if c.line_break_before_next() {
                return self.fail(c, Production::ThrowStatement, ErrorKind::LineTerminatorNotPermitted);
            }
            let argument = self.parse_expression(c, ctx.with(Context::IN))?;
            self.consume_semicolon(c, Production::ThrowStatement)?;
            Ok(Statement::Throw(self.arena.alloc(ThrowStatement {
                data: NodeData::new(SyntaxKind::ThrowStatement, c.range_from(start)),
                argument,
            })))
        })
    }

    // ========================================================================
    // switch and try
    // ========================================================================

    fn parse_switch_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::SwitchStatement, |c| {
            let start = c.start();
            c.skip();
            let discriminant = self.parse_parenthesized_head(c, ctx, Production::SwitchStatement)?;
            self.expect(c, SyntaxKind::OpenBraceToken, Production::SwitchStatement)?;

            let mut cases = Vec::new();
            let mut seen_default = false;
            while !c.at(SyntaxKind::CloseBraceToken) {
                let case_start = c.start();
                let (kind, test) = match c.peek_kind() {
                    SyntaxKind::CaseKeyword => {
                        c.skip();
                        (SyntaxKind::CaseClause, Some(self.parse_expression(c, ctx.with(Context::IN))?))
                    }
                    SyntaxKind::DefaultKeyword => {
                        if seen_default {
                            return self.fail(c, Production::SwitchStatement, ErrorKind::DuplicateDefault);
                        }
                        seen_default = true;
                        c.skip();
                        (SyntaxKind::DefaultClause, None)
                    }
                    _ => return self.unexpected(c, Production::SwitchStatement),
                };
                self.expect(c, SyntaxKind::ColonToken, Production::SwitchStatement)?;

                let mut consequent = Vec::new();
                while !c.at_any(&[
                    SyntaxKind::CaseKeyword,
                    SyntaxKind::DefaultKeyword,
                    SyntaxKind::CloseBraceToken,
                    SyntaxKind::EndOfFileToken,
                ]) {
                    consequent.push(self.parse_statement_list_item(c, ctx)?);
                }
                cases.push(&*self.arena.alloc(SwitchCase {
                    data: NodeData::new(kind, c.range_from(case_start)),
                    test,
                    consequent: self.arena.alloc_slice(consequent),
                }));
            }
            c.skip();

            Ok(Statement::Switch(self.arena.alloc(SwitchStatement {
                data: NodeData::new(SyntaxKind::SwitchStatement, c.range_from(start)),
                discriminant,
                cases: self.arena.alloc_slice(cases),
            })))
        })
    }

    fn parse_try_statement(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        self.within(c, Production::TryStatement, |c| {
            let start = c.start();
            c.skip();
            let block = self.parse_block(c, ctx)?;

            let handler = if c.at(SyntaxKind::CatchKeyword) {
                let catch_start = c.start();
                c.skip();
                let mut param = None;
                let mut annotation = None;
                if c.accept(SyntaxKind::OpenParenToken) {
                    param = Some(self.parse_binding_target(c, ctx)?);
                    annotation = self.parse_annotation(c, false)?;
                    self.expect(c, SyntaxKind::CloseParenToken, Production::TryStatement)?;
                }
                let body = self.parse_block(c, ctx)?;
                Some(&*self.arena.alloc(CatchClause {
                    data: NodeData::new(SyntaxKind::CatchClause, c.range_from(catch_start)),
                    param,
                    annotation,
                    body,
                }))
            } else {
                None
            };
            let finalizer = if c.accept(SyntaxKind::FinallyKeyword) {
                Some(self.parse_block(c, ctx)?)
            } else {
                None
            };
            if handler.is_none() && finalizer.is_none() {
                return self.fail(c, Production::TryStatement, ErrorKind::MissingCatchOrFinally);
            }

            Ok(Statement::Try(self.arena.alloc(TryStatement {
                data: NodeData::new(SyntaxKind::TryStatement, c.range_from(start)),
                block,
                handler,
                finalizer,
            })))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_script, Parser, ParserOptions};
    use esgram_ast::node::*;
    use esgram_ast::syntax_kind::SyntaxKind;
    use esgram_ast::types::*;
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_diagnostics::{ErrorKind, Production};

    fn parse_with<'a>(
        arena: &'a AstArena,
        interner: &Interner,
        source: &str,
        options: ParserOptions,
    ) -> Result<&'a Script<'a>, esgram_diagnostics::Diagnostic> {
        let stream = esgram_scanner::tokenize(source);
        Parser::new(arena, interner, &stream).with_options(options).parse_script()
    }

    #[test]
    fn test_return_terminated_by_line_break() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "function f() { return\n1; }").unwrap();
        let Statement::Function(function) = script.statements[0] else { panic!() };
        let body = function.body.unwrap();
        assert_eq!(body.statements.len(), 2);
        let Statement::Return(ret) = body.statements[0] else { panic!() };
        assert!(ret.argument.is_none());
        assert!(matches!(body.statements[1], Statement::Expression(_)));
    }

    #[test]
    fn test_return_outside_function() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "return 1;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ReturnOutsideFunction);

        let options = ParserOptions {
            allow_return_outside_function: true,
            ..ParserOptions::default()
        };
        let script = parse_with(&arena, &interner, "return 1;", options).unwrap();
        assert!(matches!(script.statements[0], Statement::Return(_)));
    }

    #[test]
    fn test_let_as_identifier() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "let = 1; let\nx = 2; let(y);").unwrap();
        assert!(matches!(script.statements[0], Statement::Expression(_)));
        let Statement::Variable(declaration) = script.statements[1] else { panic!() };
        assert_eq!(declaration.kind, VariableKind::Let);
        assert!(matches!(script.statements[2], Statement::Expression(_)));
    }

    #[test]
    fn test_labels_and_jumps() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script =
            parse_script(&arena, &interner, "outer: while (a) { continue outer; break\nouter; }").unwrap();
        let Statement::Labelled(labelled) = script.statements[0] else { panic!() };
        let Statement::While(while_loop) = labelled.body else { panic!() };
        let Statement::Block(block) = while_loop.body else { panic!() };
        let Statement::Continue(cont) = block.statements[0] else { panic!() };
        assert!(cont.label.is_some());
        let Statement::Break(brk) = block.statements[1] else { panic!() };
        assert!(brk.label.is_none());
        assert_eq!(block.statements.len(), 3);
    }

    #[test]
    fn test_switch_clauses() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script =
            parse_script(&arena, &interner, "switch (x) { case 1: case 2: a(); break; default: b(); }").unwrap();
        let Statement::Switch(switch) = script.statements[0] else { panic!() };
        assert_eq!(switch.cases.len(), 3);
        assert!(switch.cases[0].consequent.is_empty());
        assert_eq!(switch.cases[1].consequent.len(), 2);
        assert_eq!(switch.cases[2].data.kind, SyntaxKind::DefaultClause);

        let err = parse_script(&arena, &interner, "switch (x) { default: default: }").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateDefault);
    }

    #[test]
    fn test_try_forms() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script =
            parse_script(&arena, &interner, "try {} catch {} try {} catch ({ a }) {} finally {}").unwrap();
        let Statement::Try(first) = script.statements[0] else { panic!() };
        assert!(first.handler.unwrap().param.is_none());
        let Statement::Try(second) = script.statements[1] else { panic!() };
        assert!(matches!(second.handler.unwrap().param, Some(BindingTarget::Object(_))));
        assert!(second.finalizer.is_some());

        let err = parse_script(&arena, &interner, "try {}").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MissingCatchOrFinally);
    }

    #[test]
    fn test_throw_requires_same_line() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "throw\nx;").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::LineTerminatorNotPermitted);
        assert_eq!(err.leaf().production, Production::ThrowStatement);
    }

    #[test]
    fn test_for_binding_validation() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_script(&arena, &interner, "for (let a, b of c);").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidForBinding);
        let err = parse_script(&arena, &interner, "for (let a = 1 in c);").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidForBinding);

        let script = parse_script(&arena, &interner, "for (var a = 1 in c);").unwrap();
        let Statement::For(for_in) = script.statements[0] else { panic!() };
        assert_eq!(for_in.flavor(), ForFlavor::InVarInitializer);
        let err = parse_with(&arena, &interner, "for (var a = 1 in c);", ParserOptions::strict()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidForBinding);
    }

    #[test]
    fn test_for_head_starting_with_async_of() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "for (async of => {}; ;) ;").unwrap();
        let Statement::For(for_stmt) = script.statements[0] else { panic!() };
        assert_eq!(for_stmt.flavor(), ForFlavor::ClassicExpression);
        let ForHead::Classic { init: Some(ForInit::Expression(init)), .. } = for_stmt.head else { panic!() };
        assert!(matches!(init, Expression::Arrow(_)));

        assert!(parse_script(&arena, &interner, "for (async of x);").is_err());

        let script = parse_script(&arena, &interner, "async function f() { for await (async of x); }").unwrap();
        let Statement::Function(function) = script.statements[0] else { panic!() };
        let Statement::For(for_stmt) = function.body.unwrap().statements[0] else { panic!() };
        assert_eq!(for_stmt.flavor(), ForFlavor::AwaitOfTarget);
    }

    #[test]
    fn test_for_pattern_targets() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "for ([a, { b }] of c);").unwrap();
        let Statement::For(for_stmt) = script.statements[0] else { panic!() };
        assert_eq!(for_stmt.flavor(), ForFlavor::OfTarget);
        let ForHead::Of { left: ForBinding::Target(AssignmentTarget::Array(array)), .. } = for_stmt.head else {
            panic!()
        };
        assert_eq!(array.elements.len(), 2);

        let err = parse_script(&arena, &interner, "for ([...a, b] of c);").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RestNotLast);
    }

    #[test]
    fn test_function_in_statement_position() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "if (a) function f() {}").unwrap();
        let Statement::If(if_stmt) = script.statements[0] else { panic!() };
        assert!(matches!(if_stmt.consequent, Statement::Function(_)));

        let err = parse_with(&arena, &interner, "if (a) function f() {}", ParserOptions::strict()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidConstruct);
        let err = parse_script(&arena, &interner, "if (a) class C {}").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_do_while_semicolon_is_optional() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let script = parse_script(&arena, &interner, "do x(); while (y) z();").unwrap();
        assert_eq!(script.statements.len(), 2);
    }
}
