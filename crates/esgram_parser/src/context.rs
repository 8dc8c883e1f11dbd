//! Grammar context flags.

use bitflags::bitflags;

bitflags! {
    /// Parameters of the grammar that nested productions inherit or reset.
    ///
    /// A context is an immutable value: a production that changes a flag
    /// passes the modified copy to its children and never touches its own.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Context: u8 {
        /// `yield` is an operator (generator bodies).
        const YIELD = 1 << 0;
        /// `await` is an operator (async bodies, module top level).
        const AWAIT = 1 << 1;
        /// `in` is a relational operator (everywhere except `for` heads).
        const IN = 1 << 2;
        /// `return` is allowed.
        const RETURN = 1 << 3;
        /// Module code.
        const MODULE = 1 << 4;
    }
}

impl Context {
    /// Context of a script's top level.
    pub fn script() -> Self {
        Context::IN
    }

    /// Context of a module's top level.
    pub fn module() -> Self {
        Context::IN | Context::AWAIT | Context::MODULE
    }

    /// Context of a function body with the given modifiers.
    pub fn function(self, is_async: bool, is_generator: bool) -> Self {
        let mut ctx = (self & Context::MODULE) | Context::IN | Context::RETURN;
        ctx.set(Context::AWAIT, is_async);
        ctx.set(Context::YIELD, is_generator);
        ctx
    }

    /// Context of a class field initializer or static block.
    pub fn class_initializer(self) -> Self {
        (self & Context::MODULE) | Context::IN
    }

    #[inline]
    pub fn with(self, flags: Context) -> Self {
        self | flags
    }

    #[inline]
    pub fn without(self, flags: Context) -> Self {
        self - flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_context_resets_flags() {
        let outer = Context::module().with(Context::YIELD);
        let inner = outer.without(Context::IN).function(false, false);
        assert!(inner.contains(Context::IN | Context::RETURN | Context::MODULE));
        assert!(!inner.intersects(Context::YIELD | Context::AWAIT));

        let generator = Context::script().function(true, true);
        assert!(generator.contains(Context::YIELD | Context::AWAIT));
    }
}
