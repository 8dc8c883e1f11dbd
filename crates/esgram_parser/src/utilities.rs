//! Parser utility functions.

use esgram_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start an expression. Used to decide whether a
/// `yield` has an operand.
pub fn is_start_of_expression(kind: SyntaxKind) -> bool {
    if kind.is_identifier_like() || kind.is_literal() {
        return true;
    }
    matches!(
        kind,
        SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::TemplateHead
            | SyntaxKind::PrivateName
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::LessThanToken
            | SyntaxKind::Unknown
    )
}

/// Check if a token kind ends a class or object member name list, meaning
/// a modifier keyword in front of it is the member's own name.
pub fn ends_member_modifiers(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken
            | SyntaxKind::EqualsToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::ColonToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::CommaToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::EndOfFileToken
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_starts() {
        assert!(is_start_of_expression(SyntaxKind::Identifier));
        assert!(is_start_of_expression(SyntaxKind::TemplateHead));
        assert!(is_start_of_expression(SyntaxKind::YieldKeyword));
        assert!(!is_start_of_expression(SyntaxKind::CloseParenToken));
        assert!(!is_start_of_expression(SyntaxKind::SemicolonToken));
        assert!(!is_start_of_expression(SyntaxKind::InKeyword));
    }

    #[test]
    fn test_member_modifier_terminators() {
        assert!(ends_member_modifiers(SyntaxKind::OpenParenToken));
        assert!(ends_member_modifiers(SyntaxKind::CloseBraceToken));
        assert!(!ends_member_modifiers(SyntaxKind::Identifier));
        assert!(!ends_member_modifiers(SyntaxKind::AsteriskToken));
    }
}
