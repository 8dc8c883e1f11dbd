//! Operator precedence for the binary ladder.

use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::types::{BinaryLevel, BinaryOperator};

use crate::context::Context;

/// The binary operator at the next token if it binds at least as tightly
/// as `min`.
///
/// `in` is only an operator when the context allows it, so that the
/// initializer of a `for` head stops in front of it.
pub fn binary_operator_at(kind: SyntaxKind, min: BinaryLevel, ctx: Context) -> Option<BinaryOperator> {
    if kind == SyntaxKind::InKeyword && !ctx.contains(Context::IN) {
        return None;
    }
    BinaryOperator::from_token(kind).filter(|op| op.level() >= min)
}

/// Whether operands at `level` associate to the right.
#[inline]
pub fn is_right_associative(level: BinaryLevel) -> bool {
    level == BinaryLevel::Exponentiation
}

/// The loosest level the right operand of an operator at `level` may
/// contain without parentheses.
pub fn right_operand_level(level: BinaryLevel) -> BinaryLevel {
    if is_right_associative(level) {
        level
    } else {
        level.tighter().unwrap_or(level)
    }
}
