//! Checkpointing cursor over a token stream.
//!
//! A [`Cursor`] is a plain value: forking a checkpoint copies it, and the
//! only way a parent observes a child's progress is [`Cursor::commit`].
//! Dropping a checkpoint without committing is how the grammar backtracks.

use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::token::Token;
use esgram_core::text::{TokenIndex, TokenRange};
use esgram_diagnostics::TokenRef;

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t> {
    tokens: &'t [Token<'t>],
    /// First significant token at the time this checkpoint was forked.
    start: TokenIndex,
    /// Next unconsumed token, possibly trivia.
    pos: TokenIndex,
    /// One past the last consumed significant token.
    last_end: TokenIndex,
}

impl<'t> Cursor<'t> {
    /// Create a cursor at the beginning of `tokens`, which must end with an
    /// end-of-input token.
    pub fn new(tokens: &'t [Token<'t>]) -> Self {
        let mut cursor = Self {
            tokens,
            start: 0,
            pos: 0,
            last_end: 0,
        };
        cursor.start = cursor.peek_index();
        cursor
    }

    /// Index of the next significant token.
    pub fn peek_index(&self) -> TokenIndex {
        let mut index = self.pos as usize;
        while index + 1 < self.tokens.len() && self.tokens[index].is_trivia() {
            index += 1;
        }
        index as TokenIndex
    }

    /// The next significant token, crossing trivia. Once the input is
    /// exhausted this is the end-of-input token.
    pub fn peek(&self) -> &'t Token<'t> {
        self.token(self.peek_index())
    }

    #[inline]
    pub fn peek_kind(&self) -> SyntaxKind {
        self.peek().kind
    }

    /// The `n`th significant token ahead; `peek_nth(0)` is `peek()`.
    pub fn peek_nth(&self, n: usize) -> &'t Token<'t> {
        let mut probe = *self;
        for _ in 0..n {
            if probe.is_eof() {
                break;
            }
            probe.skip();
        }
        probe.peek()
    }

    #[inline]
    pub fn peek_nth_kind(&self, n: usize) -> SyntaxKind {
        self.peek_nth(n).kind
    }

    /// The next significant token, unless a line terminator comes first.
    pub fn peek_same_line(&self) -> Option<&'t Token<'t>> {
        if self.line_break_before_next() {
            None
        } else {
            Some(self.peek())
        }
    }

    /// Whether a line terminator separates the last consumed token from the
    /// next significant one.
    pub fn line_break_before_next(&self) -> bool {
        let end = self.peek_index();
        self.tokens[self.pos as usize..end as usize]
            .iter()
            .any(Token::is_line_break)
    }

    /// Whether a line terminator separates the next significant token from
    /// the one after it.
    pub fn line_break_after_next(&self) -> bool {
        let mut probe = *self;
        probe.skip();
        probe.line_break_before_next()
    }

    #[inline]
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.peek_kind())
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.at(SyntaxKind::EndOfFileToken)
    }

    /// Consume the next token iff it has the given kind.
    pub fn accept(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.skip();
            true
        } else {
            false
        }
    }

    /// Consume the next token iff it is one of `kinds`, returning its kind.
    pub fn accept_any(&mut self, kinds: &[SyntaxKind]) -> Option<SyntaxKind> {
        let kind = self.peek_kind();
        if kinds.contains(&kind) {
            self.skip();
            Some(kind)
        } else {
            None
        }
    }

    /// Consume one significant token and return its index. The end-of-input
    /// token is never consumed.
    pub fn skip(&mut self) -> TokenIndex {
        let index = self.peek_index();
        if self.token(index).kind != SyntaxKind::EndOfFileToken {
            self.pos = index + 1;
            self.last_end = index + 1;
        }
        index
    }

    /// Fork a checkpoint at the current position.
    pub fn checkpoint(&self) -> Cursor<'t> {
        Cursor {
            start: self.peek_index(),
            ..*self
        }
    }

    /// Advance to the end of a checkpoint forked from this cursor.
    pub fn commit(&mut self, child: Cursor<'t>) {
        debug_assert!(child.pos >= self.pos);
        self.pos = child.pos;
        self.last_end = child.last_end;
    }

    /// Tokens consumed since this checkpoint was forked.
    pub fn range(&self) -> TokenRange {
        self.range_from(self.start)
    }

    /// Index where the next node would start.
    #[inline]
    pub fn start(&self) -> TokenIndex {
        self.peek_index()
    }

    /// The range of a node that started at `start` and ends with the last
    /// consumed token.
    pub fn range_from(&self, start: TokenIndex) -> TokenRange {
        if self.last_end <= start {
            TokenRange::empty(start)
        } else {
            TokenRange::new(start, self.last_end)
        }
    }

    /// Whether anything was consumed since this checkpoint was forked.
    pub fn progressed(&self) -> bool {
        self.last_end > self.start
    }

    /// Whether anything was consumed since the node starting at `start`
    /// began.
    pub fn progressed_since(&self, start: TokenIndex) -> bool {
        self.last_end > start
    }

    /// Position after the last consumed token; equal positions mean equal
    /// progress.
    #[inline]
    pub fn position(&self) -> TokenIndex {
        self.pos
    }

    #[inline]
    pub fn token(&self, index: TokenIndex) -> &'t Token<'t> {
        &self.tokens[index as usize]
    }

    /// A diagnostic reference to the next significant token.
    pub fn token_ref(&self) -> TokenRef {
        let index = self.peek_index();
        TokenRef::new(index, self.token(index))
    }

    /// Number of tokens in the underlying stream.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgram_scanner::tokenize;

    #[test]
    fn test_peek_skips_trivia() {
        let stream = tokenize("  a /* c */ b");
        let mut c = Cursor::new(stream.tokens());
        assert_eq!(c.peek().text, "a");
        assert_eq!(c.skip(), 1);
        assert_eq!(c.peek().text, "b");
        assert_eq!(c.peek_nth(1).kind, SyntaxKind::EndOfFileToken);
        assert!(!c.line_break_before_next());
    }

    #[test]
    fn test_discarded_checkpoint_leaves_parent() {
        let stream = tokenize("a b c");
        let mut c = Cursor::new(stream.tokens());
        c.skip();
        let mut fork = c.checkpoint();
        fork.skip();
        fork.skip();
        assert_eq!(fork.range(), TokenRange::new(2, 5));
        assert_eq!(c.peek().text, "b");
        c.commit(fork);
        assert!(c.is_eof());
    }

    #[test]
    fn test_line_breaks() {
        let stream = tokenize("a /*\n*/ b\nc");
        let mut c = Cursor::new(stream.tokens());
        c.skip();
        assert!(c.line_break_before_next());
        assert!(c.peek_same_line().is_none());
        c.skip();
        assert!(c.line_break_before_next());
    }

    #[test]
    fn test_eof_is_never_consumed() {
        let stream = tokenize("a");
        let mut c = Cursor::new(stream.tokens());
        c.skip();
        let before = c.position();
        c.skip();
        assert_eq!(c.position(), before);
        assert_eq!(c.range_from(0), TokenRange::new(0, 1));
    }

    #[test]
    fn test_range_of_empty_checkpoint() {
        let stream = tokenize(" x");
        let c = Cursor::new(stream.tokens());
        let fork = c.checkpoint();
        assert!(fork.range().is_empty());
        assert!(!fork.progressed());
    }
}
