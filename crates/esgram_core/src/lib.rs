//! esgram_core: Core utilities for the esgram ECMAScript parser.
//!
//! Provides the node arena, name interning and the token-range and
//! source-position types shared by every other crate.

pub mod arena;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use arena::{ArenaMark, ArenaStats, AstArena};
pub use intern::{Atom, Interner};
pub use text::{Position, TextPos, TextSpan, TokenIndex, TokenRange};
