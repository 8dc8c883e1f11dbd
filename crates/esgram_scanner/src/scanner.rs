//! The ECMAScript scanner.
//!
//! Converts source text into a stream of tokens, trivia included. Every
//! character of the input belongs to exactly one token, so concatenating the
//! text of all tokens reproduces the source.

use crate::char_codes::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::token::{Token, TokenSource, TokenStream};
use esgram_core::text::{Position, TextPos};

/// The scanner converts ECMAScript source text into tokens.
pub struct Scanner<'s> {
    /// The source text being scanned.
    text: &'s str,
    /// Byte offset of the next unscanned character.
    pos: usize,
    /// Start of the token being scanned.
    token_start: usize,
    /// Line and column of `pos`.
    line: u32,
    column: u32,
    /// The last non-trivia token, used to tell `/` from a regular expression.
    previous: Option<SyntaxKind>,
    /// Open `{` counts, one entry per enclosing template substitution.
    template_braces: Vec<u32>,
    finished: bool,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            pos: 0,
            token_start: 0,
            line: 1,
            column: 1,
            previous: None,
            template_braces: Vec::new(),
            finished: false,
        }
    }

    /// Scan the whole input into a token stream.
    pub fn tokenize(text: &'s str) -> TokenStream<'s> {
        TokenStream::collect(Scanner::new(text))
    }

    /// Get the full source text length.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Look at the character `offset` characters past the current position.
    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(offset)
    }

    /// Advance past one character.
    #[inline]
    fn bump(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    #[inline]
    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    /// Advance while `pred` holds.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.current_char() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Build the token spanning `token_start..pos` and advance line and
    /// column past it.
    fn finish_token(&mut self, kind: SyntaxKind) -> Token<'s> {
        let text = &self.text[self.token_start..self.pos];
        let token = Token::new(
            kind,
            text,
            self.token_start as TextPos,
            Position::new(self.line, self.column),
        );
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == CARRIAGE_RETURN && chars.peek() == Some(&LINE_FEED) {
                continue;
            }
            if is_line_break(ch) {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        if !kind.is_trivia() {
            self.previous = Some(kind);
        }
        token
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> Token<'s> {
        self.token_start = self.pos;
        if self.is_eof() {
            self.finished = true;
            return self.finish_token(SyntaxKind::EndOfFileToken);
        }

        let Some(ch) = self.current_char() else {
            return self.finish_token(SyntaxKind::EndOfFileToken);
        };
        let kind = match ch {
            '#' if self.pos == 0 && self.char_at(1) == Some('!') => {
                self.eat_while(|c| !is_line_break(c));
                SyntaxKind::ShebangTrivia
            }
            CARRIAGE_RETURN => {
                self.bump();
                if self.current_char() == Some(LINE_FEED) {
                    self.bump();
                }
                SyntaxKind::NewLineTrivia
            }
            c if is_line_break(c) => {
                self.bump();
                SyntaxKind::NewLineTrivia
            }
            c if is_white_space_single_line(c) => {
                self.eat_while(is_white_space_single_line);
                SyntaxKind::WhitespaceTrivia
            }
            '/' if self.char_at(1) == Some('/') => {
                self.eat_while(|c| !is_line_break(c));
                SyntaxKind::SingleLineCommentTrivia
            }
            '/' if self.char_at(1) == Some('*') => self.scan_multi_line_comment(),

            '(' => { self.bump(); SyntaxKind::OpenParenToken }
            ')' => { self.bump(); SyntaxKind::CloseParenToken }
            '{' => {
                self.bump();
                if let Some(depth) = self.template_braces.last_mut() {
                    *depth += 1;
                }
                SyntaxKind::OpenBraceToken
            }
            '}' => self.scan_close_brace(),
            '[' => { self.bump(); SyntaxKind::OpenBracketToken }
            ']' => { self.bump(); SyntaxKind::CloseBracketToken }
            ';' => { self.bump(); SyntaxKind::SemicolonToken }
            ',' => { self.bump(); SyntaxKind::CommaToken }
            '~' => { self.bump(); SyntaxKind::TildeToken }
            '@' => { self.bump(); SyntaxKind::AtToken }
            ':' => { self.bump(); SyntaxKind::ColonToken }
            '#' => self.scan_private_name(),

            '.' => self.scan_dot(),
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_doubled_or_assign('+', SyntaxKind::PlusToken, SyntaxKind::PlusPlusToken, SyntaxKind::PlusEqualsToken),
            '-' => self.scan_doubled_or_assign('-', SyntaxKind::MinusToken, SyntaxKind::MinusMinusToken, SyntaxKind::MinusEqualsToken),
            '*' => self.scan_asterisk(),
            '/' => self.scan_slash(),
            '%' => self.scan_with_assign(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken),
            '&' => self.scan_logical('&', SyntaxKind::AmpersandToken, SyntaxKind::AmpersandEqualsToken, SyntaxKind::AmpersandAmpersandToken, SyntaxKind::AmpersandAmpersandEqualsToken),
            '|' => self.scan_logical('|', SyntaxKind::BarToken, SyntaxKind::BarEqualsToken, SyntaxKind::BarBarToken, SyntaxKind::BarBarEqualsToken),
            '^' => self.scan_with_assign(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken),

            '\'' | '"' => self.scan_string_literal(ch),
            '`' => {
                self.bump();
                self.scan_template_continuation(
                    SyntaxKind::NoSubstitutionTemplateLiteral,
                    SyntaxKind::TemplateHead,
                )
            }

            '0'..='9' => self.scan_number(),

            c if is_identifier_start(c) || c == '\\' => self.scan_identifier(),

            _ => {
                self.bump();
                SyntaxKind::Unknown
            }
        };

        self.finish_token(kind)
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_multi_line_comment(&mut self) -> SyntaxKind {
        self.bump_n(2);
        while !self.is_eof() {
            if self.current_char() == Some('*') && self.char_at(1) == Some('/') {
                self.bump_n(2);
                return SyntaxKind::MultiLineCommentTrivia;
            }
            self.bump();
        }
        SyntaxKind::Unknown
    }

    fn scan_close_brace(&mut self) -> SyntaxKind {
        match self.template_braces.last_mut() {
            Some(0) => {
                self.template_braces.pop();
                self.bump();
                self.scan_template_continuation(SyntaxKind::TemplateTail, SyntaxKind::TemplateMiddle)
            }
            Some(depth) => {
                *depth -= 1;
                self.bump();
                SyntaxKind::CloseBraceToken
            }
            None => {
                self.bump();
                SyntaxKind::CloseBraceToken
            }
        }
    }

    fn scan_private_name(&mut self) -> SyntaxKind {
        self.bump();
        match self.current_char() {
            Some(c) if is_identifier_start(c) => {
                self.eat_while(is_identifier_part);
                SyntaxKind::PrivateName
            }
            _ => SyntaxKind::Unknown,
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('.') && self.char_at(2) == Some('.') {
            self.bump_n(3);
            SyntaxKind::DotDotDotToken
        } else if self.char_at(1).map_or(false, is_digit) {
            self.scan_number()
        } else {
            self.bump();
            SyntaxKind::DotToken
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('?') {
            if self.char_at(2) == Some('=') {
                self.bump_n(3);
                SyntaxKind::QuestionQuestionEqualsToken
            } else {
                self.bump_n(2);
                SyntaxKind::QuestionQuestionToken
            }
        } else if self.char_at(1) == Some('.') && !self.char_at(2).map_or(false, is_digit) {
            self.bump_n(2);
            SyntaxKind::QuestionDotToken
        } else {
            self.bump();
            SyntaxKind::QuestionToken
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('<') {
            if self.char_at(2) == Some('=') {
                self.bump_n(3);
                SyntaxKind::LessThanLessThanEqualsToken
            } else {
                self.bump_n(2);
                SyntaxKind::LessThanLessThanToken
            }
        } else if self.char_at(1) == Some('=') {
            self.bump_n(2);
            SyntaxKind::LessThanEqualsToken
        } else {
            self.bump();
            SyntaxKind::LessThanToken
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2), self.char_at(3)) {
            (Some('>'), Some('>'), Some('=')) => {
                self.bump_n(4);
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
            }
            (Some('>'), Some('>'), _) => {
                self.bump_n(3);
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            }
            (Some('>'), Some('='), _) => {
                self.bump_n(3);
                SyntaxKind::GreaterThanGreaterThanEqualsToken
            }
            (Some('>'), _, _) => {
                self.bump_n(2);
                SyntaxKind::GreaterThanGreaterThanToken
            }
            (Some('='), _, _) => {
                self.bump_n(2);
                SyntaxKind::GreaterThanEqualsToken
            }
            _ => {
                self.bump();
                SyntaxKind::GreaterThanToken
            }
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.bump_n(3);
                SyntaxKind::EqualsEqualsEqualsToken
            } else {
                self.bump_n(2);
                SyntaxKind::EqualsEqualsToken
            }
        } else if self.char_at(1) == Some('>') {
            self.bump_n(2);
            SyntaxKind::EqualsGreaterThanToken
        } else {
            self.bump();
            SyntaxKind::EqualsToken
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            if self.char_at(2) == Some('=') {
                self.bump_n(3);
                SyntaxKind::ExclamationEqualsEqualsToken
            } else {
                self.bump_n(2);
                SyntaxKind::ExclamationEqualsToken
            }
        } else {
            self.bump();
            SyntaxKind::ExclamationToken
        }
    }

    /// `+`, `++`, `+=` and the `-` family.
    fn scan_doubled_or_assign(
        &mut self,
        ch: char,
        single: SyntaxKind,
        doubled: SyntaxKind,
        assign: SyntaxKind,
    ) -> SyntaxKind {
        if self.char_at(1) == Some(ch) {
            self.bump_n(2);
            doubled
        } else if self.char_at(1) == Some('=') {
            self.bump_n(2);
            assign
        } else {
            self.bump();
            single
        }
    }

    fn scan_with_assign(&mut self, single: SyntaxKind, assign: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            self.bump_n(2);
            assign
        } else {
            self.bump();
            single
        }
    }

    /// `&`, `&=`, `&&`, `&&=` and the `|` family.
    fn scan_logical(
        &mut self,
        ch: char,
        single: SyntaxKind,
        assign: SyntaxKind,
        doubled: SyntaxKind,
        doubled_assign: SyntaxKind,
    ) -> SyntaxKind {
        if self.char_at(1) == Some(ch) {
            if self.char_at(2) == Some('=') {
                self.bump_n(3);
                doubled_assign
            } else {
                self.bump_n(2);
                doubled
            }
        } else {
            self.scan_with_assign(single, assign)
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('*') {
            if self.char_at(2) == Some('=') {
                self.bump_n(3);
                SyntaxKind::AsteriskAsteriskEqualsToken
            } else {
                self.bump_n(2);
                SyntaxKind::AsteriskAsteriskToken
            }
        } else {
            self.scan_with_assign(SyntaxKind::AsteriskToken, SyntaxKind::AsteriskEqualsToken)
        }
    }

    /// Whether a `/` at this point starts a regular expression rather than
    /// a division, judged by the previous significant token.
    fn regex_allowed(&self) -> bool {
        let Some(previous) = self.previous else {
            return true;
        };
        match previous {
            SyntaxKind::Identifier
            | SyntaxKind::PrivateName
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegularExpressionLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateTail
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => false,
            kind => !kind.is_identifier_like(),
        }
    }

    fn scan_slash(&mut self) -> SyntaxKind {
        if self.regex_allowed() {
            return self.scan_regular_expression();
        }
        self.scan_with_assign(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken)
    }

    fn scan_regular_expression(&mut self) -> SyntaxKind {
        self.bump();
        let mut in_character_class = false;
        loop {
            let Some(ch) = self.current_char() else {
                return SyntaxKind::Unknown;
            };
            if is_line_break(ch) {
                return SyntaxKind::Unknown;
            }
            self.bump();
            match ch {
                '\\' => {
                    if self.current_char().map_or(false, |c| !is_line_break(c)) {
                        self.bump();
                    }
                }
                '[' => in_character_class = true,
                ']' => in_character_class = false,
                '/' if !in_character_class => break,
                _ => {}
            }
        }
        self.eat_while(is_identifier_part);
        SyntaxKind::RegularExpressionLiteral
    }

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        self.bump();
        loop {
            let Some(ch) = self.current_char() else {
                return SyntaxKind::Unknown;
            };
            if ch == quote {
                self.bump();
                return SyntaxKind::StringLiteral;
            }
            if ch == '\\' {
                self.bump();
                // A line continuation may escape CR LF as a pair.
                if self.current_char() == Some(CARRIAGE_RETURN) && self.char_at(1) == Some(LINE_FEED) {
                    self.bump();
                }
                self.bump();
                continue;
            }
            if ch == LINE_FEED || ch == CARRIAGE_RETURN {
                return SyntaxKind::Unknown;
            }
            self.bump();
        }
    }

    /// Scan template characters up to the closing backtick (`end`) or the
    /// next `${` (`substitution`). The opening delimiter is already consumed.
    fn scan_template_continuation(
        &mut self,
        end: SyntaxKind,
        substitution: SyntaxKind,
    ) -> SyntaxKind {
        loop {
            let Some(ch) = self.current_char() else {
                return SyntaxKind::Unknown;
            };
            match ch {
                '`' => {
                    self.bump();
                    return end;
                }
                '$' if self.char_at(1) == Some('{') => {
                    self.bump_n(2);
                    self.template_braces.push(0);
                    return substitution;
                }
                '\\' => self.bump_n(2),
                _ => self.bump(),
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        if self.current_char() == Some('0') {
            let radix_digit: Option<fn(char) -> bool> = match self.char_at(1) {
                Some('x' | 'X') => Some(is_hex_digit),
                Some('b' | 'B') => Some(is_binary_digit),
                Some('o' | 'O') => Some(is_octal_digit),
                _ => None,
            };
            if let Some(is_radix_digit) = radix_digit {
                self.bump_n(2);
                self.eat_while(|c| is_radix_digit(c) || c == '_');
                return self.scan_bigint_suffix();
            }
        }

        self.scan_digits();
        if self.current_char() == Some('.') {
            self.bump();
            self.scan_digits();
        }

        // Exponent
        if let Some('e' | 'E') = self.current_char() {
            let signed = matches!(self.char_at(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.char_at(digit_at).map_or(false, is_digit) {
                self.bump_n(digit_at);
                self.scan_digits();
            }
        }

        self.scan_bigint_suffix()
    }

    fn scan_bigint_suffix(&mut self) -> SyntaxKind {
        if self.current_char() == Some('n') {
            self.bump();
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        }
    }

    fn scan_digits(&mut self) {
        self.eat_while(|c| is_digit(c) || c == '_');
    }

    /// Scan a `\uXXXX` or `\u{X...}` escape inside an identifier.
    fn scan_unicode_escape(&mut self) -> bool {
        if self.current_char() != Some('\\') || self.char_at(1) != Some('u') {
            return false;
        }
        self.bump_n(2);
        if self.current_char() == Some('{') {
            self.bump();
            self.eat_while(is_hex_digit);
            if self.current_char() != Some('}') {
                return false;
            }
            self.bump();
            return true;
        }
        for _ in 0..4 {
            match self.current_char() {
                Some(c) if is_hex_digit(c) => self.bump(),
                _ => return false,
            }
        }
        true
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut escaped = false;
        loop {
            match self.current_char() {
                Some('\\') => {
                    if !self.scan_unicode_escape() {
                        return SyntaxKind::Unknown;
                    }
                    escaped = true;
                }
                Some(c) if is_identifier_part(c) || (self.pos == start && is_identifier_start(c)) => {
                    self.bump();
                }
                _ => break,
            }
        }

        // An escaped keyword is an ordinary identifier.
        if escaped {
            return SyntaxKind::Identifier;
        }
        SyntaxKind::from_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }
}

impl<'s> TokenSource<'s> for Scanner<'s> {
    fn next_token(&mut self) -> Token<'s> {
        if self.finished {
            self.token_start = self.pos;
            return self.finish_token(SyntaxKind::EndOfFileToken);
        }
        self.scan()
    }
}
