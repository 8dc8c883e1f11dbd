//! esgram_parser: recursive descent parser for ECMAScript.
//!
//! Parses token streams from the scanner into an arena-allocated AST.
//! Ambiguous productions are resolved by forking the token cursor, trying
//! each candidate in order and committing the first that applies. Nodes
//! built by discarded candidates stay in the arena and are counted as
//! abandoned.

mod annotation;
mod binding;
mod class;
mod context;
mod cursor;
mod expression;
mod function;
mod module;
mod options;
mod parser;
mod precedence;
mod resolver;
mod statement;
mod utilities;

pub use context::Context;
pub use cursor::Cursor;
pub use options::ParserOptions;
pub use parser::{PResult, Parser};

use esgram_ast::node::{Module, Script};
use esgram_core::arena::AstArena;
use esgram_core::intern::Interner;
use esgram_scanner::tokenize;

/// Tokenize and parse `source` as a module with default options.
pub fn parse_module<'a>(arena: &'a AstArena, interner: &Interner, source: &str) -> PResult<&'a Module<'a>> {
    let stream = tokenize(source);
    Parser::new(arena, interner, &stream).parse_module()
}

/// Tokenize and parse `source` as a script with default options.
pub fn parse_script<'a>(arena: &'a AstArena, interner: &Interner, source: &str) -> PResult<&'a Script<'a>> {
    let stream = tokenize(source);
    Parser::new(arena, interner, &stream).parse_script()
}
