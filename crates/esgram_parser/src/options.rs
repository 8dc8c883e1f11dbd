//! Parser configuration.

/// Options controlling what the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting of statements and expressions before the parse fails
    /// with a diagnostic instead of exhausting the stack.
    pub max_depth: u32,
    /// Skip embedded type-annotation syntax (type parameters, parameter and
    /// return annotations, overload signatures).
    pub annotations: bool,
    /// Accept `return` at the top level.
    pub allow_return_outside_function: bool,
    /// Accept the legacy `for (var x = init in object)` form and function
    /// declarations as `if` bodies.
    pub annex_b: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            annotations: true,
            allow_return_outside_function: false,
            annex_b: true,
        }
    }
}

impl ParserOptions {
    /// Plain ECMAScript: no annotation syntax, no legacy forms.
    pub fn strict() -> Self {
        Self {
            annotations: false,
            annex_b: false,
            ..Self::default()
        }
    }
}
