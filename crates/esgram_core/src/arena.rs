//! Arena allocation for syntax trees.
//!
//! Every AST node produced by a parse is allocated from one bump arena.
//! Speculative productions allocate freely; when their checkpoint is
//! discarded the nodes they created become unreachable and are accounted as
//! abandoned. The bytes are reclaimed all at once by [`AstArena::reset`],
//! which lets one arena serve many consecutive parses.

use bumpalo::Bump;
use std::cell::Cell;
use std::fmt;

/// A snapshot of the arena's live-node count, taken when a checkpoint forks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct ArenaMark(usize);

/// Node accounting for one arena.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ArenaStats {
    /// Nodes allocated since the last reset.
    pub allocated: usize,
    /// Nodes still reachable from committed work.
    pub live: usize,
    /// Nodes created under checkpoints that were later discarded.
    pub abandoned: usize,
}

impl fmt::Display for ArenaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} allocated, {} live, {} abandoned",
            self.allocated, self.live, self.abandoned
        )
    }
}

/// The arena owning all nodes of a single in-flight parse.
///
/// The arena is deliberately `!Sync`: one arena per parse is the sharing
/// boundary, so independent parses on different threads each need their own.
pub struct AstArena {
    bump: Bump,
    allocated: Cell<usize>,
    live: Cell<usize>,
}

impl AstArena {
    /// Create a new arena with default capacity.
    pub fn new() -> Self {
        Self {
            bump: Bump::new(),
            allocated: Cell::new(0),
            live: Cell::new(0),
        }
    }

    /// Create a new arena with the specified initial capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
            allocated: Cell::new(0),
            live: Cell::new(0),
        }
    }

    /// Allocate one node and count it as live.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.allocated.set(self.allocated.get() + 1);
        self.live.set(self.live.get() + 1);
        self.bump.alloc(val)
    }

    /// Move a list of already-counted nodes into the arena.
    ///
    /// Lists are containers, not nodes, so they do not touch the counters.
    pub fn alloc_slice<T>(&self, items: Vec<T>) -> &[T] {
        if items.is_empty() {
            return &[];
        }
        bumpalo::collections::Vec::from_iter_in(items, &self.bump).into_bump_slice()
    }

    /// Remember the current live count so that a later discard can release
    /// everything allocated after this point.
    #[inline]
    pub fn mark(&self) -> ArenaMark {
        ArenaMark(self.live.get())
    }

    /// Account every node allocated since `mark` as abandoned and return how
    /// many there were. Nodes already abandoned by a nested discard are not
    /// counted again.
    pub fn abandon_since(&self, mark: ArenaMark) -> usize {
        let live = self.live.get();
        let released = live.saturating_sub(mark.0);
        self.live.set(live - released);
        released
    }

    /// Current node accounting.
    pub fn stats(&self) -> ArenaStats {
        let allocated = self.allocated.get();
        let live = self.live.get();
        ArenaStats {
            allocated,
            live,
            abandoned: allocated - live,
        }
    }

    /// Returns the total bytes allocated in this arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Release every node at once, keeping the memory for the next parse.
    pub fn reset(&mut self) {
        self.bump.reset();
        self.allocated.set(0);
        self.live.set(0);
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AstArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstArena")
            .field("stats", &self.stats())
            .field("bytes", &self.allocated_bytes())
            .finish()
    }
}
