//! Lexical tokens and the token stream the parser consumes.
//!
//! Tokens are produced outside the parser by any [`TokenSource`]. The stream
//! keeps trivia (whitespace, line breaks, comments) so that node ranges,
//! which are ranges of token indices, cover the source text exactly.

use crate::syntax_kind::SyntaxKind;
use esgram_core::text::{Position, TextPos, TextSpan, TokenIndex, TokenRange};

/// An immutable lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: SyntaxKind,
    /// Raw source text of the token.
    pub text: &'s str,
    /// Byte offset of the first character.
    pub offset: TextPos,
    /// Line and column of the first character.
    pub position: Position,
}

impl<'s> Token<'s> {
    pub fn new(kind: SyntaxKind, text: &'s str, offset: TextPos, position: Position) -> Self {
        Self {
            kind,
            text,
            offset,
            position,
        }
    }

    /// The byte offset just past this token.
    #[inline]
    pub fn end(&self) -> TextPos {
        self.offset + self.text.len() as TextPos
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.offset, self.text.len() as TextPos)
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Whether this token separates two lines for automatic semicolon
    /// insertion: a line terminator, or a multi-line comment spanning one.
    pub fn is_line_break(&self) -> bool {
        match self.kind {
            SyntaxKind::NewLineTrivia => true,
            SyntaxKind::MultiLineCommentTrivia => self
                .text
                .chars()
                .any(|ch| matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')),
            _ => false,
        }
    }
}

/// A producer of tokens, typically a scanner.
///
/// Implementations keep returning [`SyntaxKind::EndOfFileToken`] once the
/// input is exhausted.
pub trait TokenSource<'s> {
    fn next_token(&mut self) -> Token<'s>;
}

/// A fully drained token source, ending in exactly one end-of-input token.
#[derive(Debug, Clone)]
pub struct TokenStream<'s> {
    tokens: Vec<Token<'s>>,
}

impl<'s> TokenStream<'s> {
    /// Drain `source` until it reports end of input.
    pub fn collect(mut source: impl TokenSource<'s>) -> Self {
        let mut tokens = Vec::new();
        loop {
            let token = source.next_token();
            let done = token.kind == SyntaxKind::EndOfFileToken;
            tokens.push(token);
            if done {
                break;
            }
        }
        Self { tokens }
    }

    /// Build a stream from tokens produced elsewhere. Anything after the
    /// first end-of-input token is dropped; one is appended if missing.
    pub fn from_tokens(mut tokens: Vec<Token<'s>>) -> Self {
        match tokens
            .iter()
            .position(|t| t.kind == SyntaxKind::EndOfFileToken)
        {
            Some(eof) => tokens.truncate(eof + 1),
            None => {
                let (offset, position) = match tokens.last() {
                    Some(last) => (last.end(), last.position),
                    None => (0, Position::new(1, 1)),
                };
                tokens.push(Token::new(SyntaxKind::EndOfFileToken, "", offset, position));
            }
        }
        Self { tokens }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token<'s>] {
        &self.tokens
    }

    #[inline]
    pub fn get(&self, index: TokenIndex) -> Option<&Token<'s>> {
        self.tokens.get(index as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true for a well-formed stream, which holds at least the
    /// end-of-input token.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The range covering every token, end of input included.
    pub fn full_range(&self) -> TokenRange {
        TokenRange::new(0, self.tokens.len() as TokenIndex)
    }

    /// Number of non-trivia tokens, end of input included.
    pub fn significant_len(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_trivia()).count()
    }

    /// The byte span covered by a token range.
    pub fn span(&self, range: TokenRange) -> TextSpan {
        let tokens = &self.tokens[range.to_range()];
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => TextSpan::from_bounds(first.offset, last.end()),
            _ => {
                let at = self
                    .tokens
                    .get(range.start as usize)
                    .map_or(0, |t| t.offset);
                TextSpan::new(at, 0)
            }
        }
    }

    /// The source text covered by a token range, trivia included.
    pub fn text(&self, range: TokenRange) -> String {
        self.tokens[range.to_range()]
            .iter()
            .map(|t| t.text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: SyntaxKind, text: &str, offset: TextPos) -> Token<'_> {
        Token::new(kind, text, offset, Position::new(1, offset + 1))
    }

    struct Fixed<'s> {
        tokens: Vec<Token<'s>>,
        next: usize,
    }

    impl<'s> TokenSource<'s> for Fixed<'s> {
        fn next_token(&mut self) -> Token<'s> {
            let token = self.tokens[self.next.min(self.tokens.len() - 1)];
            self.next += 1;
            token
        }
    }

    #[test]
    fn test_collect_stops_at_end_of_input() {
        let source = Fixed {
            tokens: vec![
                tok(SyntaxKind::Identifier, "a", 0),
                tok(SyntaxKind::WhitespaceTrivia, " ", 1),
                tok(SyntaxKind::EndOfFileToken, "", 2),
            ],
            next: 0,
        };
        let stream = TokenStream::collect(source);
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.significant_len(), 2);
        assert_eq!(stream.text(stream.full_range()), "a ");
    }

    #[test]
    fn test_from_tokens_appends_single_eof() {
        let stream = TokenStream::from_tokens(vec![tok(SyntaxKind::Identifier, "ab", 0)]);
        assert_eq!(stream.len(), 2);
        let eof = stream.get(1).unwrap();
        assert_eq!(eof.kind, SyntaxKind::EndOfFileToken);
        assert_eq!(eof.offset, 2);

        let stream = TokenStream::from_tokens(vec![
            tok(SyntaxKind::EndOfFileToken, "", 0),
            tok(SyntaxKind::EndOfFileToken, "", 0),
        ]);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_multi_line_comment_line_break() {
        assert!(tok(SyntaxKind::MultiLineCommentTrivia, "/*\n*/", 0).is_line_break());
        assert!(!tok(SyntaxKind::MultiLineCommentTrivia, "/**/", 0).is_line_break());
        assert!(tok(SyntaxKind::NewLineTrivia, "\n", 0).is_line_break());
    }

    #[test]
    fn test_span_of_range() {
        let stream = TokenStream::from_tokens(vec![
            tok(SyntaxKind::Identifier, "ab", 0),
            tok(SyntaxKind::WhitespaceTrivia, " ", 2),
            tok(SyntaxKind::Identifier, "c", 3),
        ]);
        assert_eq!(stream.span(TokenRange::new(0, 3)), TextSpan::new(0, 4));
        assert_eq!(stream.span(TokenRange::empty(2)), TextSpan::new(3, 0));
    }
}
