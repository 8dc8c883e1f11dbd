//! esgram_diagnostics: structured parse errors.
//!
//! A parse failure is a chain of [`Diagnostic`]s. The outermost entry names
//! the entry production (`Module` or `Script`); every wrapping production on
//! the way down adds its own entry, and the innermost entry carries the leaf
//! [`ErrorKind`] and the offending token. Diagnostics are plain data: they
//! compare by value and render through `miette`.

use esgram_ast::{SyntaxKind, Token};
use esgram_core::text::{Position, TextPos, TokenIndex};
use std::fmt;
use thiserror::Error;

/// The grammar production that raised or wrapped a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Script,
    Module,
    ModuleItem,
    ImportDeclaration,
    ImportClause,
    ExportDeclaration,
    ExportClause,
    Statement,
    Block,
    VariableStatement,
    VariableDeclaration,
    LexicalDeclaration,
    ExpressionStatement,
    IfStatement,
    DoWhileStatement,
    WhileStatement,
    ForStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    LabelledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,
    FunctionDeclaration,
    FunctionExpression,
    FunctionBody,
    ArrowFunction,
    ClassDeclaration,
    ClassExpression,
    ClassHeritage,
    ClassBody,
    ClassElement,
    MethodDefinition,
    FieldDefinition,
    FormalParameters,
    BindingPattern,
    BindingElement,
    AssignmentPattern,
    Expression,
    AssignmentExpression,
    ConditionalExpression,
    UnaryExpression,
    LeftHandSideExpression,
    PrimaryExpression,
    ParenthesizedExpression,
    ArrayLiteral,
    ObjectLiteral,
    PropertyDefinition,
    PropertyName,
    TemplateLiteral,
    Arguments,
    TypeAnnotation,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The token a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenRef {
    pub index: TokenIndex,
    pub kind: SyntaxKind,
    pub offset: TextPos,
    pub len: TextPos,
    pub position: Position,
}

impl TokenRef {
    pub fn new(index: TokenIndex, token: &Token<'_>) -> Self {
        Self {
            index,
            kind: token.kind,
            offset: token.offset,
            len: token.text.len() as TextPos,
            position: token.position,
        }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

/// Leaf error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, miette::Diagnostic)]
pub enum ErrorKind {
    #[error("identifier expected")]
    #[diagnostic(code(esgram::no_identifier))]
    NoIdentifier,

    #[error("{0} expected")]
    #[diagnostic(code(esgram::expected))]
    Expected(SyntaxKind),

    #[error("unexpected token")]
    #[diagnostic(code(esgram::unexpected_token))]
    UnexpectedToken,

    #[error("invalid or unterminated token")]
    #[diagnostic(code(esgram::invalid_token))]
    InvalidToken,

    /// Internal sentinel: the production does not apply here and the caller
    /// may try another alternative. Never returned from an entry point.
    #[error("production not applicable")]
    #[diagnostic(code(esgram::not_applicable))]
    NotApplicable,

    #[error("no production applies at this position")]
    #[diagnostic(code(esgram::invalid_construct))]
    InvalidConstruct,

    #[error("invalid assignment target")]
    #[diagnostic(code(esgram::invalid_assignment_target))]
    InvalidAssignmentTarget,

    #[error("a switch statement may only have one default clause")]
    #[diagnostic(code(esgram::duplicate_default))]
    DuplicateDefault,

    #[error("duplicate binding '{0}'")]
    #[diagnostic(code(esgram::duplicate_binding))]
    DuplicateBinding(String),

    #[error("a rest element must be last")]
    #[diagnostic(code(esgram::rest_not_last))]
    RestNotLast,

    #[error("a rest element cannot have an initializer")]
    #[diagnostic(code(esgram::rest_initializer))]
    RestInitializer,

    #[error("'return' outside of a function")]
    #[diagnostic(code(esgram::return_outside_function))]
    ReturnOutsideFunction,

    #[error("line terminator not permitted before this token")]
    #[diagnostic(code(esgram::line_terminator))]
    LineTerminatorNotPermitted,

    #[error("a getter cannot have parameters")]
    #[diagnostic(code(esgram::getter_parameters))]
    GetterParameters,

    #[error("a setter must have exactly one parameter")]
    #[diagnostic(code(esgram::setter_parameters))]
    SetterParameters,

    #[error("'try' requires a 'catch' or 'finally' clause")]
    #[diagnostic(code(esgram::missing_catch_or_finally))]
    MissingCatchOrFinally,

    #[error("a 'for-in' or 'for-of' head must declare exactly one binding")]
    #[diagnostic(code(esgram::invalid_for_binding))]
    InvalidForBinding,

    #[error("type annotations are not enabled")]
    #[diagnostic(code(esgram::annotations_disabled))]
    AnnotationsDisabled,

    #[error("nesting exceeds the configured maximum depth")]
    #[diagnostic(code(esgram::nesting_too_deep))]
    NestingTooDeep,
}

/// What a diagnostic wraps: a leaf error or a deeper diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    #[error(transparent)]
    Error(ErrorKind),
    #[error(transparent)]
    Diagnostic(Box<Diagnostic>),
}

/// One entry in a diagnostic chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("in {production} at {token}")]
pub struct Diagnostic {
    pub production: Production,
    pub token: TokenRef,
    #[source]
    pub cause: Cause,
}

impl Diagnostic {
    /// A leaf diagnostic.
    pub fn error(production: Production, token: TokenRef, kind: ErrorKind) -> Self {
        Self {
            production,
            token,
            cause: Cause::Error(kind),
        }
    }

    /// The "not applicable" sentinel.
    pub fn not_applicable(production: Production, token: TokenRef) -> Self {
        Self::error(production, token, ErrorKind::NotApplicable)
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self.cause, Cause::Error(ErrorKind::NotApplicable))
    }

    /// Add an outer entry naming `production`. The sentinel is returned
    /// unchanged so that callers can still recognise it.
    pub fn wrap(self, production: Production, token: TokenRef) -> Self {
        if self.is_not_applicable() {
            return self;
        }
        Self {
            production,
            token,
            cause: Cause::Diagnostic(Box::new(self)),
        }
    }

    /// Iterate the chain from this entry inwards.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost entry.
    pub fn leaf(&self) -> &Diagnostic {
        let mut current = self;
        while let Cause::Diagnostic(inner) = &current.cause {
            current = inner;
        }
        current
    }

    /// The leaf error kind of the chain.
    pub fn kind(&self) -> &ErrorKind {
        let mut current = self;
        loop {
            match &current.cause {
                Cause::Error(kind) => return kind,
                Cause::Diagnostic(inner) => current = inner,
            }
        }
    }

    /// The first entry, from the outside in, raised by `production`.
    pub fn find(&self, production: Production) -> Option<&Diagnostic> {
        self.chain().find(|d| d.production == production)
    }

    /// Production names along the chain, outermost first.
    pub fn productions(&self) -> Vec<Production> {
        self.chain().map(|d| d.production).collect()
    }

    pub fn depth(&self) -> usize {
        self.chain().count()
    }
}

/// Iterator over a diagnostic chain, outermost first.
pub struct Chain<'d> {
    next: Option<&'d Diagnostic>,
}

impl<'d> Iterator for Chain<'d> {
    type Item = &'d Diagnostic;

    fn next(&mut self) -> Option<&'d Diagnostic> {
        let current = self.next?;
        self.next = match &current.cause {
            Cause::Diagnostic(inner) => Some(inner),
            Cause::Error(_) => None,
        };
        Some(current)
    }
}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        miette::Diagnostic::code(self.kind())
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let span = miette::SourceSpan::new(
            (self.token.offset as usize).into(),
            self.token.len as usize,
        );
        let label = miette::LabeledSpan::new_with_span(Some(self.production.to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }

    fn diagnostic_source(&self) -> Option<&dyn miette::Diagnostic> {
        match &self.cause {
            Cause::Diagnostic(inner) => Some(inner.as_ref()),
            Cause::Error(kind) => Some(kind),
        }
    }
}
