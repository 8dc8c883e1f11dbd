//! The parser driver and the helpers shared by every grammar layer.
//!
//! Grammar productions live in sibling modules as further `impl` blocks on
//! [`Parser`]. Every production takes the cursor it advances and the
//! [`Context`] it runs under, and returns either its node or a diagnostic.

use std::cell::Cell;

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::token::TokenStream;
use esgram_ast::types::LiteralKind;
use esgram_core::arena::{ArenaMark, AstArena};
use esgram_core::intern::{Atom, Interner};
use esgram_core::text::{TokenIndex, TokenRange};
use esgram_diagnostics::{Diagnostic, ErrorKind, Production, TokenRef};
use tracing::debug;

use crate::context::Context;
use crate::cursor::Cursor;
use crate::options::ParserOptions;

/// Result of a production.
pub type PResult<T> = Result<T, Diagnostic>;

/// Add an entry for `production` to a diagnostic, unless its outermost entry
/// already names that production.
pub(crate) fn wrap(diagnostic: Diagnostic, production: Production, token: TokenRef) -> Diagnostic {
    if diagnostic.production == production {
        diagnostic
    } else {
        diagnostic.wrap(production, token)
    }
}

/// The parser turns a token stream into an arena-allocated `Module` or
/// `Script`.
pub struct Parser<'a, 't> {
    pub(crate) arena: &'a AstArena,
    interner: Interner,
    tokens: &'t TokenStream<'t>,
    pub(crate) options: ParserOptions,
    /// Current nesting of guarded productions.
    depth: Cell<u32>,
}

/// Decrements the nesting depth when a guarded production returns.
pub(crate) struct DepthGuard<'p> {
    depth: &'p Cell<u32>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl<'a, 't> Parser<'a, 't> {
    pub fn new(arena: &'a AstArena, interner: &Interner, tokens: &'t TokenStream<'t>) -> Self {
        Self {
            arena,
            interner: interner.clone(),
            tokens,
            options: ParserOptions::default(),
            depth: Cell::new(0),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse the token stream as a module.
    pub fn parse_module(&self) -> PResult<&'a Module<'a>> {
        debug!(tokens = self.tokens.len(), "parsing module");
        let mark = self.arena.mark();
        let mut c = Cursor::new(self.tokens.tokens());
        let token = c.token_ref();
        let ctx = Context::module();

        let result = self.parse_module_root(&mut c, ctx);
        self.finish(result, mark, Production::Module, token)
    }

    /// Parse the token stream as a script: no `import` or `export`
    /// declarations.
    pub fn parse_script(&self) -> PResult<&'a Script<'a>> {
        debug!(tokens = self.tokens.len(), "parsing script");
        let mark = self.arena.mark();
        let mut c = Cursor::new(self.tokens.tokens());
        let token = c.token_ref();
        let ctx = Context::script();

        let result = self.parse_script_root(&mut c, ctx);
        self.finish(result, mark, Production::Script, token)
    }

    fn parse_module_root(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a Module<'a>> {
        let mut items = Vec::new();
        while !c.is_eof() {
            items.push(self.parse_module_item(c, ctx)?);
        }
        Ok(self.arena.alloc(Module {
            data: NodeData::new(SyntaxKind::Module, self.tokens.full_range()),
            items: self.arena.alloc_slice(items),
        }))
    }

    fn parse_script_root(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a Script<'a>> {
        let mut statements = Vec::new();
        while !c.is_eof() {
            statements.push(self.parse_statement_list_item(c, ctx)?);
        }
        Ok(self.arena.alloc(Script {
            data: NodeData::new(SyntaxKind::Script, self.tokens.full_range()),
            statements: self.arena.alloc_slice(statements),
        }))
    }

    fn finish<T>(
        &self,
        result: PResult<T>,
        mark: ArenaMark,
        production: Production,
        token: TokenRef,
    ) -> PResult<T> {
        match result {
            Ok(root) => {
                let stats = self.arena.stats();
                debug!(live = stats.live, abandoned = stats.abandoned, "parse succeeded");
                Ok(root)
            }
            Err(diagnostic) => {
                let abandoned = self.arena.abandon_since(mark);
                let diagnostic = wrap(Self::settle(diagnostic), production, token);
                debug!(error = %diagnostic.kind(), at = %diagnostic.leaf().token, abandoned, "parse failed");
                Err(diagnostic)
            }
        }
    }

    /// Turn an unresolved "not applicable" sentinel into a real diagnostic.
    pub(crate) fn settle(diagnostic: Diagnostic) -> Diagnostic {
        if diagnostic.is_not_applicable() {
            Diagnostic::error(diagnostic.production, diagnostic.token, ErrorKind::InvalidConstruct)
        } else {
            diagnostic
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Run `f`, wrapping any diagnostic it returns with `production`.
    pub(crate) fn within<T>(
        &self,
        c: &mut Cursor<'t>,
        production: Production,
        f: impl FnOnce(&mut Cursor<'t>) -> PResult<T>,
    ) -> PResult<T> {
        let token = c.token_ref();
        f(c).map_err(|d| wrap(d, production, token))
    }

    pub(crate) fn fail<T>(&self, c: &Cursor<'t>, production: Production, kind: ErrorKind) -> PResult<T> {
        Err(Diagnostic::error(production, c.token_ref(), kind))
    }

    /// The next token does not fit `production`.
    pub(crate) fn unexpected<T>(&self, c: &Cursor<'t>, production: Production) -> PResult<T> {
        let kind = if c.at(SyntaxKind::Unknown) {
            ErrorKind::InvalidToken
        } else {
            ErrorKind::UnexpectedToken
        };
        self.fail(c, production, kind)
    }

    pub(crate) fn not_applicable<T>(&self, c: &Cursor<'t>, production: Production) -> PResult<T> {
        Err(Diagnostic::not_applicable(production, c.token_ref()))
    }

    /// Consume a token of `kind` or fail with a structural diagnostic.
    pub(crate) fn expect(
        &self,
        c: &mut Cursor<'t>,
        kind: SyntaxKind,
        production: Production,
    ) -> PResult<TokenIndex> {
        if c.at(kind) {
            return Ok(c.skip());
        }
        let error = match c.peek_kind() {
            SyntaxKind::Unknown => ErrorKind::InvalidToken,
            _ if kind == SyntaxKind::Identifier => ErrorKind::NoIdentifier,
            _ => ErrorKind::Expected(kind),
        };
        self.fail(c, production, error)
    }

    /// Automatic semicolon insertion: a statement ends at an explicit `;`,
    /// before a `}`, at end of input, or where a line terminator was crossed.
    pub(crate) fn consume_semicolon(&self, c: &mut Cursor<'t>, production: Production) -> PResult<()> {
        if c.accept(SyntaxKind::SemicolonToken)
            || c.at(SyntaxKind::CloseBraceToken)
            || c.is_eof()
            || c.line_break_before_next()
        {
            return Ok(());
        }
        if c.at(SyntaxKind::Unknown) {
            return self.fail(c, production, ErrorKind::InvalidToken);
        }
        self.fail(c, production, ErrorKind::Expected(SyntaxKind::SemicolonToken))
    }

    /// Count one level of nesting, failing once the configured maximum is
    /// reached.
    pub(crate) fn enter(&self, c: &Cursor<'t>, production: Production) -> PResult<DepthGuard<'_>> {
        let depth = self.depth.get();
        if depth >= self.options.max_depth {
            return self.fail(c, production, ErrorKind::NestingTooDeep);
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }

    // ========================================================================
    // Leaves
    // ========================================================================

    #[inline]
    pub(crate) fn atom(&self, text: &str) -> Atom {
        self.interner.intern(text)
    }

    /// Whether `kind` may be used as an identifier reference or binding name
    /// under `ctx`.
    pub(crate) fn is_identifier(kind: SyntaxKind, ctx: Context) -> bool {
        match kind {
            SyntaxKind::YieldKeyword => !ctx.contains(Context::YIELD),
            SyntaxKind::AwaitKeyword => !ctx.contains(Context::AWAIT),
            _ => kind.is_identifier_like(),
        }
    }

    /// Build an identifier node for the token at `index`.
    pub(crate) fn identifier_at(&self, c: &Cursor<'t>, index: TokenIndex) -> &'a Identifier {
        self.arena.alloc(Identifier {
            data: NodeData::new(SyntaxKind::Identifier, TokenRange::single(index)),
            name: self.atom(c.token(index).text),
        })
    }

    /// An identifier reference or binding identifier.
    pub(crate) fn parse_identifier(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        production: Production,
    ) -> PResult<&'a Identifier> {
        if !Self::is_identifier(c.peek_kind(), ctx) {
            let kind = if c.at(SyntaxKind::Unknown) {
                ErrorKind::InvalidToken
            } else {
                ErrorKind::NoIdentifier
            };
            return self.fail(c, production, kind);
        }
        let index = c.skip();
        Ok(self.identifier_at(c, index))
    }

    /// Any identifier name, reserved words included.
    pub(crate) fn parse_identifier_name(
        &self,
        c: &mut Cursor<'t>,
        production: Production,
    ) -> PResult<&'a Identifier> {
        if !c.peek_kind().is_identifier_name() {
            return self.fail(c, production, ErrorKind::NoIdentifier);
        }
        let index = c.skip();
        Ok(self.identifier_at(c, index))
    }

    /// A single-token literal; the node kind is the token kind.
    pub(crate) fn parse_literal(&self, c: &mut Cursor<'t>, production: Production) -> PResult<&'a Literal> {
        let kind = c.peek_kind();
        let Some(literal) = LiteralKind::from_token(kind) else {
            return self.unexpected(c, production);
        };
        let index = c.skip();
        Ok(self.arena.alloc(Literal {
            data: NodeData::new(kind, TokenRange::single(index)),
            literal,
            raw: self.atom(c.token(index).text),
        }))
    }

    /// A string literal, as used for module specifiers.
    pub(crate) fn parse_string_literal(
        &self,
        c: &mut Cursor<'t>,
        production: Production,
    ) -> PResult<&'a Literal> {
        if !c.at(SyntaxKind::StringLiteral) {
            self.expect(c, SyntaxKind::StringLiteral, production)?;
        }
        self.parse_literal(c, production)
    }
}
