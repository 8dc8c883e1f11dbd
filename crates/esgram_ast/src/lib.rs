//! esgram_ast: syntax kinds, tokens and AST node definitions for ECMAScript.
//!
//! Nodes are allocated in an [`esgram_core::AstArena`] and annotated with the
//! token range they consumed.

pub mod node;
pub mod syntax_kind;
pub mod token;
pub mod types;
pub mod visit;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use token::{Token, TokenSource, TokenStream};
pub use types::*;
