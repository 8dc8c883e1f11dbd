//! Source positions and token ranges.
//!
//! Nodes do not store byte offsets. They store the span of token indices
//! they consumed; byte spans are derived from the tokens when needed (for
//! diagnostics or printing).

use std::fmt;
use std::ops::Range;

/// A byte offset into the source text.
pub type TextPos = u32;

/// An index into a token stream.
pub type TokenIndex = u32;

/// Line and column of a token, both 1-based.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A byte span in source text, defined by a start offset and a length.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// The end offset of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end() as usize
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// A contiguous run of tokens `[start, end)`, trivia included.
///
/// Every AST node owns exactly the token range it consumed. Ranges of
/// sibling nodes never overlap and always nest inside their parent.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TokenRange {
    pub start: TokenIndex,
    pub end: TokenIndex,
}

impl TokenRange {
    #[inline]
    pub fn new(start: TokenIndex, end: TokenIndex) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// A range covering a single token.
    #[inline]
    pub fn single(index: TokenIndex) -> Self {
        Self {
            start: index,
            end: index + 1,
        }
    }

    #[inline]
    pub fn empty(at: TokenIndex) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this range.
    #[inline]
    pub fn contains(&self, other: TokenRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The smallest range covering both ranges.
    pub fn cover(&self, other: TokenRange) -> TokenRange {
        TokenRange::new(self.start.min(other.start), self.end.max(other.end))
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}..#{}", self.start, self.end)
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_range() {
        let range = TokenRange::new(3, 7);
        assert_eq!(range.len(), 4);
        assert!(range.contains(TokenRange::new(3, 5)));
        assert!(range.contains(TokenRange::empty(7)));
        assert!(!range.contains(TokenRange::new(6, 8)));
        assert_eq!(range.cover(TokenRange::single(9)), TokenRange::new(3, 10));
    }

    #[test]
    fn test_text_span_from_bounds() {
        let span = TextSpan::from_bounds(5, 15);
        assert_eq!(span.length, 10);
        assert_eq!(span.to_range(), 5..15);
    }
}
