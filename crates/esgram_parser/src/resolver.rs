//! Ordered-alternative resolution.
//!
//! Each candidate runs on its own checkpoint forked from the same position.
//! A candidate whose lookahead does not match returns the "not applicable"
//! sentinel; the resolver then discards its checkpoint, accounts the nodes
//! it allocated as abandoned, and moves on. The first candidate that
//! succeeds or fails with a genuine diagnostic decides the outcome.

use esgram_diagnostics::{Diagnostic, Production};
use tracing::trace;

use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};

/// One candidate production.
pub(crate) type Alternative<'f, 't, T> = &'f dyn Fn(&mut Cursor<'t>) -> PResult<T>;

impl<'a, 't> Parser<'a, 't> {
    /// Try `alternatives` in order from the current position. Returns the
    /// sentinel if none applies.
    pub(crate) fn resolve<T>(
        &self,
        c: &mut Cursor<'t>,
        production: Production,
        alternatives: &[Alternative<'_, 't, T>],
    ) -> PResult<T> {
        for (index, alternative) in alternatives.iter().enumerate() {
            let mark = self.arena.mark();
            let mut fork = c.checkpoint();
            match alternative(&mut fork) {
                Ok(value) => {
                    trace!(%production, alternative = index, range = ?fork.range(), "committed");
                    c.commit(fork);
                    return Ok(value);
                }
                Err(diagnostic) if diagnostic.is_not_applicable() => {
                    let abandoned = self.arena.abandon_since(mark);
                    trace!(%production, alternative = index, abandoned, "not applicable");
                }
                Err(diagnostic) => {
                    let abandoned = self.arena.abandon_since(mark);
                    trace!(%production, alternative = index, abandoned, "failed");
                    return Err(diagnostic);
                }
            }
        }
        self.not_applicable(c, production)
    }

    /// Like [`Parser::resolve`], but a parse where no alternative applies is
    /// an error rather than the sentinel.
    pub(crate) fn resolve_required<T>(
        &self,
        c: &mut Cursor<'t>,
        production: Production,
        alternatives: &[Alternative<'_, 't, T>],
    ) -> PResult<T> {
        self.resolve(c, production, alternatives).map_err(Self::settle)
    }

    /// Run a candidate whose failures of any kind only mean "this shape does
    /// not apply here". Used where no keyword identifies the production.
    pub(crate) fn speculate<T>(
        &self,
        c: &mut Cursor<'t>,
        production: Production,
        candidate: impl Fn(&mut Cursor<'t>) -> PResult<T>,
    ) -> PResult<T> {
        candidate(c).map_err(|d| Diagnostic::not_applicable(production, d.token))
    }

    /// Run `probe` on a checkpoint that is always discarded.
    pub(crate) fn lookahead<R>(&self, c: &Cursor<'t>, probe: impl FnOnce(&mut Cursor<'t>) -> R) -> R {
        let mark = self.arena.mark();
        let mut fork = c.checkpoint();
        let result = probe(&mut fork);
        self.arena.abandon_since(mark);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgram_ast::syntax_kind::SyntaxKind;
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_diagnostics::ErrorKind;
    use esgram_scanner::tokenize;

    #[test]
    fn test_first_applicable_alternative_wins() {
        let stream = tokenize("a b");
        let arena = AstArena::new();
        let interner = Interner::new();
        let parser = Parser::new(&arena, &interner, &stream);
        let mut c = Cursor::new(stream.tokens());

        let keyword = |c: &mut Cursor<'_>| -> PResult<u32> {
            if c.at(SyntaxKind::ClassKeyword) {
                c.skip();
                Ok(1)
            } else {
                Err(Diagnostic::not_applicable(Production::ClassDeclaration, c.token_ref()))
            }
        };
        let name = |c: &mut Cursor<'_>| -> PResult<u32> {
            c.skip();
            Ok(2)
        };
        let result = parser.resolve(&mut c, Production::Statement, &[&keyword, &name]);
        assert_eq!(result, Ok(2));
        assert_eq!(c.peek().text, "b");
    }

    #[test]
    fn test_genuine_failure_stops_resolution() {
        let stream = tokenize("a");
        let arena = AstArena::new();
        let interner = Interner::new();
        let parser = Parser::new(&arena, &interner, &stream);
        let mut c = Cursor::new(stream.tokens());

        let failing = |c: &mut Cursor<'_>| -> PResult<u32> {
            c.skip();
            Err(Diagnostic::error(Production::Expression, c.token_ref(), ErrorKind::UnexpectedToken))
        };
        let never = |_: &mut Cursor<'_>| -> PResult<u32> { Ok(7) };
        let result = parser.resolve(&mut c, Production::Statement, &[&failing, &never]);
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::UnexpectedToken);
        assert_eq!(c.peek().text, "a");
    }

    #[test]
    fn test_no_alternative_applies() {
        let stream = tokenize("a");
        let arena = AstArena::new();
        let interner = Interner::new();
        let parser = Parser::new(&arena, &interner, &stream);
        let mut c = Cursor::new(stream.tokens());

        let never = |c: &mut Cursor<'_>| -> PResult<u32> {
            Err(Diagnostic::not_applicable(Production::Block, c.token_ref()))
        };
        let sentinel = parser.resolve(&mut c, Production::Statement, &[&never]).unwrap_err();
        assert!(sentinel.is_not_applicable());
        let settled = parser.resolve_required(&mut c, Production::Statement, &[&never]).unwrap_err();
        assert_eq!(settled.kind(), &ErrorKind::InvalidConstruct);
        assert_eq!(settled.production, Production::Statement);
    }

    #[test]
    fn test_discarded_nodes_are_abandoned() {
        let stream = tokenize("a");
        let arena = AstArena::new();
        let interner = Interner::new();
        let parser = Parser::new(&arena, &interner, &stream);
        let mut c = Cursor::new(stream.tokens());

        let allocating = |c: &mut Cursor<'_>| -> PResult<()> {
            arena.alloc(1u8);
            arena.alloc(2u8);
            Err(Diagnostic::not_applicable(Production::Block, c.token_ref()))
        };
        let sentinel = parser.resolve(&mut c, Production::Statement, &[&allocating]).unwrap_err();
        assert!(sentinel.is_not_applicable());
        assert_eq!(c.peek().text, "a");
        let stats = arena.stats();
        assert_eq!((stats.allocated, stats.live, stats.abandoned), (2, 0, 2));
    }
}
