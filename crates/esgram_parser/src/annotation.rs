//! Skipping of embedded type-annotation syntax.
//!
//! Types are never parsed into nodes. A small type grammar finds where a
//! type ends, and the tokens it covers become one opaque [`TypeAnnotation`]
//! span. Bracketed parts (object types, tuples, parameter lists, type
//! arguments) are skipped by balancing.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_core::text::TokenIndex;
use esgram_diagnostics::{ErrorKind, Production};

use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};

const PRODUCTION: Production = Production::TypeAnnotation;

/// Words that prefix a type operand.
const TYPE_OPERATORS: &[&str] = &["keyof", "readonly", "unique", "infer", "asserts"];

impl<'a, 't> Parser<'a, 't> {
    fn annotation_from(&self, c: &Cursor<'t>, start: TokenIndex) -> &'a TypeAnnotation {
        self.arena.alloc(TypeAnnotation {
            data: NodeData::new(SyntaxKind::TypeAnnotation, c.range_from(start)),
        })
    }

    /// `: Type`, optionally preceded by a `?` or `!` marker when `markers`
    /// is set. Returns `None` when neither follows.
    pub(crate) fn parse_annotation(
        &self,
        c: &mut Cursor<'t>,
        markers: bool,
    ) -> PResult<Option<&'a TypeAnnotation>> {
        let start = c.start();
        if markers && self.options.annotations {
            c.accept_any(&[SyntaxKind::QuestionToken, SyntaxKind::ExclamationToken]);
        }
        if c.at(SyntaxKind::ColonToken) {
            if !self.options.annotations {
                return self.fail(c, PRODUCTION, ErrorKind::AnnotationsDisabled);
            }
            c.skip();
            self.skip_type(c)?;
        }
        if c.progressed_since(start) {
            Ok(Some(self.annotation_from(c, start)))
        } else {
            Ok(None)
        }
    }

    /// Type parameters or type arguments: a balanced `<...>` span.
    pub(crate) fn parse_type_parameters(&self, c: &mut Cursor<'t>) -> PResult<Option<&'a TypeAnnotation>> {
        if !self.options.annotations || !c.at(SyntaxKind::LessThanToken) {
            return Ok(None);
        }
        let start = c.start();
        self.skip_balanced(c)?;
        Ok(Some(self.annotation_from(c, start)))
    }

    /// A leading `this: Type` parameter.
    pub(crate) fn parse_this_parameter(&self, c: &mut Cursor<'t>) -> PResult<Option<&'a TypeAnnotation>> {
        if !self.options.annotations
            || !c.at(SyntaxKind::ThisKeyword)
            || c.peek_nth_kind(1) != SyntaxKind::ColonToken
        {
            return Ok(None);
        }
        let start = c.start();
        c.skip();
        c.skip();
        self.skip_type(c)?;
        Ok(Some(self.annotation_from(c, start)))
    }

    /// `implements A, B<C>`
    pub(crate) fn parse_implements_clause(&self, c: &mut Cursor<'t>) -> PResult<Option<&'a TypeAnnotation>> {
        if !self.options.annotations || !c.at(SyntaxKind::ImplementsKeyword) {
            return Ok(None);
        }
        let start = c.start();
        c.skip();
        loop {
            self.skip_type(c)?;
            if !c.accept(SyntaxKind::CommaToken) {
                break;
            }
        }
        Ok(Some(self.annotation_from(c, start)))
    }

    /// Skip one type: a union or intersection of operands, a conditional
    /// type, or a function type.
    pub(crate) fn skip_type(&self, c: &mut Cursor<'t>) -> PResult<()> {
        let _guard = self.enter(c, PRODUCTION)?;
        self.skip_union_type(c)?;
        if c.at(SyntaxKind::ExtendsKeyword) && !c.line_break_before_next() {
            c.skip();
            self.skip_union_type(c)?;
            self.expect(c, SyntaxKind::QuestionToken, PRODUCTION)?;
            self.skip_type(c)?;
            self.expect(c, SyntaxKind::ColonToken, PRODUCTION)?;
            self.skip_type(c)?;
        }
        Ok(())
    }

    fn skip_union_type(&self, c: &mut Cursor<'t>) -> PResult<()> {
        c.accept_any(&[SyntaxKind::BarToken, SyntaxKind::AmpersandToken]);
        loop {
            self.skip_type_operand(c)?;
            if c.accept_any(&[SyntaxKind::BarToken, SyntaxKind::AmpersandToken]).is_none() {
                return Ok(());
            }
        }
    }

    fn skip_type_operand(&self, c: &mut Cursor<'t>) -> PResult<()> {
        let _guard = self.enter(c, PRODUCTION)?;
        let token = c.peek();
        if token.kind.is_identifier_like()
            && TYPE_OPERATORS.contains(&token.text)
            && Self::starts_type(c.peek_nth_kind(1))
        {
            c.skip();
            return self.skip_type_operand(c);
        }

        match token.kind {
            SyntaxKind::OpenParenToken => {
                self.skip_balanced(c)?;
                if c.accept(SyntaxKind::EqualsGreaterThanToken) {
                    return self.skip_type(c);
                }
            }
            SyntaxKind::LessThanToken => {
                self.skip_balanced(c)?;
                if !c.at(SyntaxKind::OpenParenToken) {
                    return self.expect(c, SyntaxKind::OpenParenToken, PRODUCTION).map(drop);
                }
                self.skip_balanced(c)?;
                self.expect(c, SyntaxKind::EqualsGreaterThanToken, PRODUCTION)?;
                return self.skip_type(c);
            }
            SyntaxKind::NewKeyword => {
                c.skip();
                return self.skip_type_operand(c);
            }
            SyntaxKind::TypeOfKeyword => {
                c.skip();
                self.skip_type_reference(c)?;
            }
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken => self.skip_balanced(c)?,
            SyntaxKind::MinusToken => {
                c.skip();
                if c.accept_any(&[SyntaxKind::NumericLiteral, SyntaxKind::BigIntLiteral]).is_none() {
                    return self.unexpected(c, PRODUCTION);
                }
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                c.skip();
            }
            SyntaxKind::TemplateHead => self.skip_template_type(c)?,
            kind if kind.is_identifier_name() => {
                self.skip_type_reference(c)?;
                if c.peek().text == "is" && !c.line_break_before_next() {
                    c.skip();
                    self.skip_type(c)?;
                }
            }
            _ => return self.unexpected(c, PRODUCTION),
        }

        // Array and indexed-access suffixes.
        while c.at(SyntaxKind::OpenBracketToken) && !c.line_break_before_next() {
            self.skip_balanced(c)?;
        }
        Ok(())
    }

    /// `A.B.C<Args>`, or `import("m")` after `typeof`.
    fn skip_type_reference(&self, c: &mut Cursor<'t>) -> PResult<()> {
        let first = c.peek_kind();
        if !first.is_identifier_name() {
            return self.unexpected(c, PRODUCTION);
        }
        c.skip();
        if first == SyntaxKind::ImportKeyword && c.at(SyntaxKind::OpenParenToken) {
            self.skip_balanced(c)?;
        }
        while c.accept(SyntaxKind::DotToken) {
            if !c.peek_kind().is_identifier_name() {
                return self.fail(c, PRODUCTION, ErrorKind::NoIdentifier);
            }
            c.skip();
        }
        if c.at(SyntaxKind::LessThanToken) && !c.line_break_before_next() {
            self.skip_balanced(c)?;
        }
        Ok(())
    }

    fn skip_template_type(&self, c: &mut Cursor<'t>) -> PResult<()> {
        c.skip();
        loop {
            self.skip_type(c)?;
            match c.peek_kind() {
                SyntaxKind::TemplateMiddle => {
                    c.skip();
                }
                SyntaxKind::TemplateTail => {
                    c.skip();
                    return Ok(());
                }
                _ => return self.expect(c, SyntaxKind::TemplateTail, PRODUCTION).map(drop),
            }
        }
    }

    /// Skip from an opening `(`, `[`, `{` or `<` to its matching closer.
    /// Inside `<...>`, `>>` and `>>>` close two and three levels.
    pub(crate) fn skip_balanced(&self, c: &mut Cursor<'t>) -> PResult<()> {
        let open = c.peek_kind();
        let close = match open {
            SyntaxKind::OpenParenToken => SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken => SyntaxKind::CloseBracketToken,
            SyntaxKind::OpenBraceToken => SyntaxKind::CloseBraceToken,
            SyntaxKind::LessThanToken => SyntaxKind::GreaterThanToken,
            _ => return self.unexpected(c, PRODUCTION),
        };
        let angle = open == SyntaxKind::LessThanToken;
        let mut depth: i32 = 0;
        loop {
            depth += match c.peek_kind() {
                SyntaxKind::EndOfFileToken => {
                    return self.fail(c, PRODUCTION, ErrorKind::Expected(close));
                }
                SyntaxKind::Unknown => return self.fail(c, PRODUCTION, ErrorKind::InvalidToken),
                SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => 1,
                SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken | SyntaxKind::CloseBraceToken => -1,
                SyntaxKind::LessThanToken if angle => 1,
                SyntaxKind::GreaterThanToken if angle => -1,
                SyntaxKind::GreaterThanGreaterThanToken if angle => -2,
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken if angle => -3,
                _ => 0,
            };
            c.skip();
            if depth <= 0 {
                return Ok(());
            }
        }
    }

    fn starts_type(kind: SyntaxKind) -> bool {
        kind.is_identifier_name()
            || matches!(
                kind,
                SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::MinusToken
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_scanner::tokenize;

    /// Skip one type from the start of `source` and return the text that
    /// follows it.
    fn rest_after_type(source: &str) -> String {
        let stream = tokenize(source);
        let arena = AstArena::new();
        let interner = Interner::new();
        let parser = Parser::new(&arena, &interner, &stream);
        let mut c = Cursor::new(stream.tokens());
        parser.skip_type(&mut c).unwrap();
        stream.tokens()[c.position() as usize..]
            .iter()
            .map(|t| t.text)
            .collect::<String>()
    }

    #[test]
    fn test_skips_simple_and_generic_types() {
        assert_eq!(rest_after_type("number = 1"), " = 1");
        assert_eq!(rest_after_type("Map<string, Array<number>> = m"), " = m");
        assert_eq!(rest_after_type("A.B<C>[] )"), " )");
        assert_eq!(rest_after_type("Array<Array<T>>, b"), ", b");
    }

    #[test]
    fn test_skips_compound_types() {
        assert_eq!(rest_after_type("string | { a: number } {"), " {");
        assert_eq!(rest_after_type("(a: T) => void, x"), ", x");
        assert_eq!(rest_after_type("<T>(a: T) => T;"), ";");
        assert_eq!(rest_after_type("keyof T & readonly string[] ="), " =");
        assert_eq!(rest_after_type("T extends U ? X : Y)"), ")");
        assert_eq!(rest_after_type("x is string {"), " {");
        assert_eq!(rest_after_type("-1 | 'a' ;"), " ;");
    }

    #[test]
    fn test_array_suffix_stops_at_line_break() {
        assert_eq!(rest_after_type("T\n[k]"), "\n[k]");
    }

    #[test]
    fn test_unbalanced_type_fails() {
        let stream = tokenize("Array<T");
        let arena = AstArena::new();
        let interner = Interner::new();
        let parser = Parser::new(&arena, &interner, &stream);
        let mut c = Cursor::new(stream.tokens());
        let err = parser.skip_type(&mut c).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Expected(SyntaxKind::GreaterThanToken));
        assert_eq!(err.production, Production::TypeAnnotation);
    }

    #[test]
    fn test_deep_types_hit_the_nesting_limit() {
        let arena = AstArena::new();
        let interner = Interner::new();

        let shallow = format!("{}T;", "keyof ".repeat(20));
        assert_eq!(rest_after_type(&shallow), ";");

        for source in [
            format!("{}T;", "keyof ".repeat(400)),
            format!("{}T;", "new () => ".repeat(400)),
            format!("{}X : Y;", "A extends B ? ".repeat(400)),
        ] {
            let stream = tokenize(&source);
            let parser = Parser::new(&arena, &interner, &stream);
            let mut c = Cursor::new(stream.tokens());
            let err = parser.skip_type(&mut c).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NestingTooDeep);
            assert_eq!(err.production, Production::TypeAnnotation);
        }
    }

    #[test]
    fn test_annotation_span_includes_marker() {
        let stream = tokenize("?: string)");
        let arena = AstArena::new();
        let interner = Interner::new();
        let parser = Parser::new(&arena, &interner, &stream);
        let mut c = Cursor::new(stream.tokens());
        let annotation = parser.parse_annotation(&mut c, true).unwrap().unwrap();
        assert_eq!(annotation.data.range.start, 0);
        assert_eq!(annotation.data.range.end, 4);
        assert!(c.at(SyntaxKind::CloseParenToken));
    }
}
