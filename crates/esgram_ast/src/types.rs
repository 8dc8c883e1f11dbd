//! Closed tag enums carried by AST nodes.
//!
//! Each enum is `#[repr(u8)]` and exhaustive: a node holds exactly one tag.

use crate::syntax_kind::SyntaxKind;

/// Binary operators, grouped by precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BinaryOperator {
    // LogicalOr level
    LogicalOr,
    Coalesce,
    // LogicalAnd
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    // Equality
    Equality,
    Inequality,
    StrictEquality,
    StrictInequality,
    // Relational
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    InstanceOf,
    In,
    // Shift
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    // Additive
    Addition,
    Subtraction,
    // Multiplicative
    Multiplication,
    Division,
    Remainder,
    Exponentiation,
}

/// Precedence levels of the binary ladder, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BinaryLevel {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponentiation,
}

impl BinaryLevel {
    /// The next tighter level, if any.
    pub fn tighter(self) -> Option<BinaryLevel> {
        use BinaryLevel::*;
        Some(match self {
            LogicalOr => LogicalAnd,
            LogicalAnd => BitwiseOr,
            BitwiseOr => BitwiseXor,
            BitwiseXor => BitwiseAnd,
            BitwiseAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Exponentiation,
            Exponentiation => return None,
        })
    }
}

impl BinaryOperator {
    pub fn from_token(kind: SyntaxKind) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        let op = match kind {
            SyntaxKind::BarBarToken => LogicalOr,
            SyntaxKind::QuestionQuestionToken => Coalesce,
            SyntaxKind::AmpersandAmpersandToken => LogicalAnd,
            SyntaxKind::BarToken => BitwiseOr,
            SyntaxKind::CaretToken => BitwiseXor,
            SyntaxKind::AmpersandToken => BitwiseAnd,
            SyntaxKind::EqualsEqualsToken => Equality,
            SyntaxKind::ExclamationEqualsToken => Inequality,
            SyntaxKind::EqualsEqualsEqualsToken => StrictEquality,
            SyntaxKind::ExclamationEqualsEqualsToken => StrictInequality,
            SyntaxKind::LessThanToken => LessThan,
            SyntaxKind::GreaterThanToken => GreaterThan,
            SyntaxKind::LessThanEqualsToken => LessThanEqual,
            SyntaxKind::GreaterThanEqualsToken => GreaterThanEqual,
            SyntaxKind::InstanceOfKeyword => InstanceOf,
            SyntaxKind::InKeyword => In,
            SyntaxKind::LessThanLessThanToken => ShiftLeft,
            SyntaxKind::GreaterThanGreaterThanToken => ShiftRight,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ShiftRightUnsigned,
            SyntaxKind::PlusToken => Addition,
            SyntaxKind::MinusToken => Subtraction,
            SyntaxKind::AsteriskToken => Multiplication,
            SyntaxKind::SlashToken => Division,
            SyntaxKind::PercentToken => Remainder,
            SyntaxKind::AsteriskAsteriskToken => Exponentiation,
            _ => return None,
        };
        Some(op)
    }

    pub fn level(self) -> BinaryLevel {
        use BinaryOperator::*;
        match self {
            LogicalOr | Coalesce => BinaryLevel::LogicalOr,
            LogicalAnd => BinaryLevel::LogicalAnd,
            BitwiseOr => BinaryLevel::BitwiseOr,
            BitwiseXor => BinaryLevel::BitwiseXor,
            BitwiseAnd => BinaryLevel::BitwiseAnd,
            Equality | Inequality | StrictEquality | StrictInequality => BinaryLevel::Equality,
            LessThan | GreaterThan | LessThanEqual | GreaterThanEqual | InstanceOf | In => {
                BinaryLevel::Relational
            }
            ShiftLeft | ShiftRight | ShiftRightUnsigned => BinaryLevel::Shift,
            Addition | Subtraction => BinaryLevel::Additive,
            Multiplication | Division | Remainder => BinaryLevel::Multiplicative,
            Exponentiation => BinaryLevel::Exponentiation,
        }
    }

    /// The node kind of a binary expression built from this operator.
    pub fn node_kind(self) -> SyntaxKind {
        if self == BinaryOperator::Coalesce {
            return SyntaxKind::CoalesceExpression;
        }
        match self.level() {
            BinaryLevel::LogicalOr => SyntaxKind::LogicalOrExpression,
            BinaryLevel::LogicalAnd => SyntaxKind::LogicalAndExpression,
            BinaryLevel::BitwiseOr => SyntaxKind::BitwiseOrExpression,
            BinaryLevel::BitwiseXor => SyntaxKind::BitwiseXorExpression,
            BinaryLevel::BitwiseAnd => SyntaxKind::BitwiseAndExpression,
            BinaryLevel::Equality => SyntaxKind::EqualityExpression,
            BinaryLevel::Relational => SyntaxKind::RelationalExpression,
            BinaryLevel::Shift => SyntaxKind::ShiftExpression,
            BinaryLevel::Additive => SyntaxKind::AdditiveExpression,
            BinaryLevel::Multiplicative => SyntaxKind::MultiplicativeExpression,
            BinaryLevel::Exponentiation => SyntaxKind::ExponentiationExpression,
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOperator::LogicalOr | BinaryOperator::LogicalAnd | BinaryOperator::Coalesce
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AssignmentOperator {
    Assign,
    Addition,
    Subtraction,
    Multiplication,
    Exponentiation,
    Division,
    Remainder,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalOr,
    LogicalAnd,
    Coalesce,
}

impl AssignmentOperator {
    pub fn from_token(kind: SyntaxKind) -> Option<AssignmentOperator> {
        use AssignmentOperator::*;
        let op = match kind {
            SyntaxKind::EqualsToken => Assign,
            SyntaxKind::PlusEqualsToken => Addition,
            SyntaxKind::MinusEqualsToken => Subtraction,
            SyntaxKind::AsteriskEqualsToken => Multiplication,
            SyntaxKind::AsteriskAsteriskEqualsToken => Exponentiation,
            SyntaxKind::SlashEqualsToken => Division,
            SyntaxKind::PercentEqualsToken => Remainder,
            SyntaxKind::LessThanLessThanEqualsToken => ShiftLeft,
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ShiftRight,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ShiftRightUnsigned,
            SyntaxKind::AmpersandEqualsToken => BitwiseAnd,
            SyntaxKind::BarEqualsToken => BitwiseOr,
            SyntaxKind::CaretEqualsToken => BitwiseXor,
            SyntaxKind::BarBarEqualsToken => LogicalOr,
            SyntaxKind::AmpersandAmpersandEqualsToken => LogicalAnd,
            SyntaxKind::QuestionQuestionEqualsToken => Coalesce,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UnaryOperator {
    Delete,
    Void,
    TypeOf,
    Plus,
    Minus,
    BitwiseNot,
    LogicalNot,
}

impl UnaryOperator {
    pub fn from_token(kind: SyntaxKind) -> Option<UnaryOperator> {
        let op = match kind {
            SyntaxKind::DeleteKeyword => UnaryOperator::Delete,
            SyntaxKind::VoidKeyword => UnaryOperator::Void,
            SyntaxKind::TypeOfKeyword => UnaryOperator::TypeOf,
            SyntaxKind::PlusToken => UnaryOperator::Plus,
            SyntaxKind::MinusToken => UnaryOperator::Minus,
            SyntaxKind::TildeToken => UnaryOperator::BitwiseNot,
            SyntaxKind::ExclamationToken => UnaryOperator::LogicalNot,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn from_token(kind: SyntaxKind) -> Option<UpdateOperator> {
        match kind {
            SyntaxKind::PlusPlusToken => Some(UpdateOperator::Increment),
            SyntaxKind::MinusMinusToken => Some(UpdateOperator::Decrement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LiteralKind {
    Null,
    Boolean,
    Numeric,
    BigInt,
    String,
    RegExp,
}

impl LiteralKind {
    pub fn from_token(kind: SyntaxKind) -> Option<LiteralKind> {
        let lit = match kind {
            SyntaxKind::NullKeyword => LiteralKind::Null,
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => LiteralKind::Boolean,
            SyntaxKind::NumericLiteral => LiteralKind::Numeric,
            SyntaxKind::BigIntLiteral => LiteralKind::BigInt,
            SyntaxKind::StringLiteral => LiteralKind::String,
            SyntaxKind::RegularExpressionLiteral => LiteralKind::RegExp,
            _ => return None,
        };
        Some(lit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn is_lexical(self) -> bool {
        self != VariableKind::Var
    }
}

/// The kind of a method in a class body or object literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MethodKind {
    Normal,
    Generator,
    Async,
    AsyncGenerator,
    Getter,
    Setter,
}

impl MethodKind {
    pub fn from_modifiers(is_async: bool, is_generator: bool) -> MethodKind {
        match (is_async, is_generator) {
            (false, false) => MethodKind::Normal,
            (false, true) => MethodKind::Generator,
            (true, false) => MethodKind::Async,
            (true, true) => MethodKind::AsyncGenerator,
        }
    }

    pub fn is_async(self) -> bool {
        matches!(self, MethodKind::Async | MethodKind::AsyncGenerator)
    }

    pub fn is_generator(self) -> bool {
        matches!(self, MethodKind::Generator | MethodKind::AsyncGenerator)
    }

    pub fn is_accessor(self) -> bool {
        matches!(self, MethodKind::Getter | MethodKind::Setter)
    }
}

/// The fourteen shapes of a `for` statement head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ForFlavor {
    /// `for (; ; )`
    Classic,
    /// `for (var x = 0; ; )`
    ClassicVar,
    /// `for (let x = 0; ; )`
    ClassicLexical,
    /// `for (x = 0; ; )`
    ClassicExpression,
    /// `for (var x in o)`
    InVar,
    /// `for (var x = e in o)`, accepted under Annex B.
    InVarInitializer,
    /// `for (let x in o)`
    InLexical,
    /// `for (x.y in o)`
    InTarget,
    /// `for (var x of o)`
    OfVar,
    OfLexical,
    OfTarget,
    /// `for await (var x of o)`
    AwaitOfVar,
    AwaitOfLexical,
    AwaitOfTarget,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MetaPropertyKind {
    NewTarget,
    ImportMeta,
}

/// The shape of an import declaration's clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImportForm {
    /// `import "m"`
    SideEffect,
    /// `import a from "m"`
    Default,
    /// `import * as ns from "m"`
    Namespace,
    /// `import { a } from "m"`
    Named,
    /// `import a, * as ns from "m"`
    DefaultAndNamespace,
    /// `import a, { b } from "m"`
    DefaultAndNamed,
}

/// The shape of an export declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExportForm {
    /// `export * from "m"`
    All,
    /// `export * as ns from "m"`
    AllAs,
    /// `export { a }`
    Named,
    /// `export { a } from "m"`
    NamedFrom,
    /// `export default ...`
    Default,
    /// `export var|let|const|function|class ...`
    Declaration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_levels() {
        let op = BinaryOperator::from_token(SyntaxKind::QuestionQuestionToken).unwrap();
        assert_eq!(op.level(), BinaryLevel::LogicalOr);
        assert_eq!(op.node_kind(), SyntaxKind::CoalesceExpression);
        let op = BinaryOperator::from_token(SyntaxKind::InKeyword).unwrap();
        assert_eq!(op.node_kind(), SyntaxKind::RelationalExpression);
        assert!(BinaryLevel::LogicalOr < BinaryLevel::Exponentiation);
        assert_eq!(BinaryLevel::Exponentiation.tighter(), None);
    }

    #[test]
    fn test_assignment_operator_covers_token_range() {
        let mut count = 0;
        for raw in SyntaxKind::FIRST_ASSIGNMENT as u16..=SyntaxKind::LAST_ASSIGNMENT as u16 {
            let kind = [
                SyntaxKind::EqualsToken,
                SyntaxKind::PlusEqualsToken,
                SyntaxKind::MinusEqualsToken,
                SyntaxKind::AsteriskEqualsToken,
                SyntaxKind::AsteriskAsteriskEqualsToken,
                SyntaxKind::SlashEqualsToken,
                SyntaxKind::PercentEqualsToken,
                SyntaxKind::LessThanLessThanEqualsToken,
                SyntaxKind::GreaterThanGreaterThanEqualsToken,
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
                SyntaxKind::AmpersandEqualsToken,
                SyntaxKind::BarEqualsToken,
                SyntaxKind::CaretEqualsToken,
                SyntaxKind::BarBarEqualsToken,
                SyntaxKind::AmpersandAmpersandEqualsToken,
                SyntaxKind::QuestionQuestionEqualsToken,
            ][(raw - SyntaxKind::FIRST_ASSIGNMENT as u16) as usize];
            assert!(AssignmentOperator::from_token(kind).is_some());
            count += 1;
        }
        assert_eq!(count, 16);
    }

    #[test]
    fn test_method_kind_modifiers() {
        assert_eq!(MethodKind::from_modifiers(true, true), MethodKind::AsyncGenerator);
        assert!(MethodKind::Getter.is_accessor());
        assert!(!MethodKind::Async.is_generator());
    }
}
