//! Name interning.
//!
//! Identifier and property names are interned so that AST nodes carry a
//! four-byte handle instead of borrowed text, and duplicate-name checks
//! compare integers.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// An interned name. Comparing two atoms is an integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Atom(Spur);

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({:?})", self.0)
    }
}

/// Thread-safe name interner.
///
/// Cloning is cheap and shares the table, so parses running on different
/// threads can intern into the same set of names.
#[derive(Clone)]
pub struct Interner {
    rodeo: Arc<ThreadedRodeo>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a name, returning the existing atom if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> Atom {
        Atom(self.rodeo.get_or_intern(s))
    }

    /// Look up a name without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<Atom> {
        self.rodeo.get(s).map(Atom)
    }

    /// Resolve an atom back to its text.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.rodeo.resolve(&atom.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let interner = Interner::new();
        let a = interner.intern("value");
        let b = interner.intern("value");
        let c = interner.intern("other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(c), "other");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_clones_share_table() {
        let interner = Interner::new();
        let clone = interner.clone();
        let a = clone.intern("shared");
        assert_eq!(interner.get("shared"), Some(a));
        assert!(interner.get("missing").is_none());
    }
}
