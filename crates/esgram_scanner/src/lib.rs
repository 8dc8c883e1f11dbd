//! esgram_scanner: Lexer/tokenizer for ECMAScript source code.
//!
//! Produces a lossless token stream from source text, with support for:
//! - Trivia tokens (whitespace, newlines, comments, shebang)
//! - Template literals with nested substitutions
//! - Regular expression literals
//! - Private names and Unicode identifiers

mod char_codes;
mod scanner;

pub use scanner::Scanner;

use esgram_ast::token::TokenStream;

/// Scan `source` into a complete token stream ending in a single EOF token.
pub fn tokenize(source: &str) -> TokenStream<'_> {
    Scanner::tokenize(source)
}
