//! AST node definitions.
//!
//! Nodes live in the parse's arena and reference their children through
//! `&'a` references and `&'a [T]` slices. Every node carries a [`NodeData`]
//! holding its kind and the token range it consumed. Alternatives are enums
//! whose variants hold a reference to the chosen node.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use esgram_core::intern::Atom;
use esgram_core::text::{TokenIndex, TokenRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Tokens consumed by this node, from its first to its last significant
    /// token.
    pub range: TokenRange,
}

impl NodeData {
    #[inline]
    pub fn new(kind: SyntaxKind, range: TokenRange) -> Self {
        Self { kind, range }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Roots
// ============================================================================

#[derive(Debug)]
pub struct Script<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct Module<'a> {
    pub data: NodeData,
    pub items: NodeList<'a, ModuleItem<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleItem<'a> {
    Import(&'a ImportDeclaration<'a>),
    Export(Export<'a>),
    Statement(Statement<'a>),
}

// ============================================================================
// Names
// ============================================================================

/// An identifier reference, binding name, label or property name.
#[derive(Debug)]
pub struct Identifier {
    pub data: NodeData,
    pub name: Atom,
}

/// A `#name` class member name.
#[derive(Debug)]
pub struct PrivateName {
    pub data: NodeData,
    /// The name without its leading `#`.
    pub name: Atom,
}

/// A span of type-annotation syntax that was skipped without being parsed.
#[derive(Debug)]
pub struct TypeAnnotation {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyKey<'a> {
    Identifier(&'a Identifier),
    String(&'a Literal),
    Numeric(&'a Literal),
    Computed(&'a ComputedPropertyName<'a>),
    Private(&'a PrivateName),
}

impl<'a> PropertyKey<'a> {
    /// The statically known name of this key, if it has one.
    pub fn static_name(&self) -> Option<Atom> {
        match self {
            PropertyKey::Identifier(id) => Some(id.name),
            PropertyKey::String(lit) | PropertyKey::Numeric(lit) => Some(lit.raw),
            PropertyKey::Computed(_) | PropertyKey::Private(_) => None,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Identifier(&'a Identifier),
    This(&'a ThisExpression),
    Super(&'a SuperExpression),
    Literal(&'a Literal),
    /// `#x`, only as the left operand of `in`.
    PrivateName(&'a PrivateName),
    Template(&'a TemplateLiteral<'a>),
    Array(&'a ArrayLiteral<'a>),
    Object(&'a ObjectLiteral<'a>),
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    Parenthesized(&'a ParenthesizedExpression<'a>),
    Member(&'a MemberExpression<'a>),
    Call(&'a CallExpression<'a>),
    TaggedTemplate(&'a TaggedTemplateExpression<'a>),
    New(&'a NewExpression<'a>),
    MetaProperty(&'a MetaProperty),
    ImportCall(&'a ImportCall<'a>),
    Update(&'a UpdateExpression<'a>),
    Unary(&'a UnaryExpression<'a>),
    Await(&'a AwaitExpression<'a>),
    Binary(&'a BinaryExpression<'a>),
    Conditional(&'a ConditionalExpression<'a>),
    Assignment(&'a AssignmentExpression<'a>),
    Arrow(&'a ArrowFunction<'a>),
    Yield(&'a YieldExpression<'a>),
    Sequence(&'a SequenceExpression<'a>),
}

#[derive(Debug)]
pub struct ThisExpression {
    pub data: NodeData,
}

/// `super`, only ever the object of a member access or the callee of a call.
#[derive(Debug)]
pub struct SuperExpression {
    pub data: NodeData,
}

/// A single-token literal. The node kind is the token kind.
#[derive(Debug)]
pub struct Literal {
    pub data: NodeData,
    pub literal: LiteralKind,
    /// Raw source text, quotes and escapes included.
    pub raw: Atom,
}

#[derive(Debug)]
pub struct TemplateLiteral<'a> {
    pub data: NodeData,
    /// Indices of the template pieces (head, middles, tail) in source order.
    pub quasis: NodeList<'a, TokenIndex>,
    pub expressions: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ArrayLiteral<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ArrayElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrayElement<'a> {
    Hole,
    Expression(Expression<'a>),
    Spread(&'a SpreadElement<'a>),
}

#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub argument: Expression<'a>,
}

#[derive(Debug)]
pub struct ObjectLiteral<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectProperty<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectProperty<'a> {
    Property(&'a PropertyAssignment<'a>),
    Shorthand(&'a ShorthandProperty<'a>),
    Method(&'a MethodDefinition<'a>),
    Spread(&'a SpreadElement<'a>),
}

/// `key: value`
#[derive(Debug)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub key: PropertyKey<'a>,
    pub value: Expression<'a>,
}

#[derive(Debug)]
pub struct ShorthandProperty<'a> {
    pub data: NodeData,
    pub name: &'a Identifier,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct MemberExpression<'a> {
    pub data: NodeData,
    pub object: Expression<'a>,
    pub property: MemberProperty<'a>,
    /// Accessed through `?.`.
    pub optional: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum MemberProperty<'a> {
    Name(&'a Identifier),
    Private(&'a PrivateName),
    Computed(Expression<'a>),
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub callee: Expression<'a>,
    pub arguments: &'a Arguments<'a>,
    pub optional: bool,
}

/// A parenthesized argument list.
#[derive(Debug)]
pub struct Arguments<'a> {
    pub data: NodeData,
    pub items: NodeList<'a, Argument<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum Argument<'a> {
    Expression(Expression<'a>),
    Spread(&'a SpreadElement<'a>),
}

#[derive(Debug)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: Expression<'a>,
    pub quasi: &'a TemplateLiteral<'a>,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub callee: Expression<'a>,
    /// `None` for `new X` without parentheses.
    pub arguments: Option<&'a Arguments<'a>>,
}

#[derive(Debug)]
pub struct MetaProperty {
    pub data: NodeData,
    pub meta: MetaPropertyKind,
}

/// Dynamic `import(source)` or `import(source, options)`.
#[derive(Debug)]
pub struct ImportCall<'a> {
    pub data: NodeData,
    pub source: Expression<'a>,
    pub options: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct UpdateExpression<'a> {
    pub data: NodeData,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Expression<'a>,
}

#[derive(Debug)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: UnaryOperator,
    pub argument: Expression<'a>,
}

#[derive(Debug)]
pub struct AwaitExpression<'a> {
    pub data: NodeData,
    pub argument: Expression<'a>,
}

/// A binary operation. The node kind names the precedence level.
#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub operator: BinaryOperator,
    pub left: Expression<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub test: Expression<'a>,
    pub consequent: Expression<'a>,
    pub alternate: Expression<'a>,
}

#[derive(Debug)]
pub struct AssignmentExpression<'a> {
    pub data: NodeData,
    pub operator: AssignmentOperator,
    pub target: AssignmentTarget<'a>,
    pub value: Expression<'a>,
}

#[derive(Debug)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub is_async: bool,
    pub params: ArrowParameters<'a>,
    pub return_type: Option<&'a TypeAnnotation>,
    pub body: ArrowBody<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrowParameters<'a> {
    /// `x => ...`
    Identifier(&'a Identifier),
    /// `(a, b) => ...`
    Formal(&'a FormalParameters<'a>),
}

#[derive(Debug, Clone, Copy)]
pub enum ArrowBody<'a> {
    Expression(Expression<'a>),
    Block(&'a FunctionBody<'a>),
}

#[derive(Debug)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    /// `yield*`
    pub delegate: bool,
    pub argument: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct SequenceExpression<'a> {
    pub data: NodeData,
    pub expressions: NodeList<'a, Expression<'a>>,
}

// ============================================================================
// Binding and Assignment Patterns
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum BindingTarget<'a> {
    Identifier(&'a Identifier),
    Object(&'a ObjectBindingPattern<'a>),
    Array(&'a ArrayBindingPattern<'a>),
}

#[derive(Debug)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectBindingEntry<'a>>,
    pub rest: Option<&'a BindingRest<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectBindingEntry<'a> {
    /// `{ a }` or `{ a = 1 }`; the element's target is an identifier.
    Shorthand(&'a BindingElement<'a>),
    /// `{ key: target }`
    Property(&'a BindingProperty<'a>),
}

#[derive(Debug)]
pub struct BindingProperty<'a> {
    pub data: NodeData,
    pub key: PropertyKey<'a>,
    pub value: &'a BindingElement<'a>,
}

#[derive(Debug)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    /// `None` marks a hole.
    pub elements: NodeList<'a, Option<&'a BindingElement<'a>>>,
    pub rest: Option<&'a BindingRest<'a>>,
}

/// A binding target with an optional default value.
#[derive(Debug)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub target: BindingTarget<'a>,
    pub annotation: Option<&'a TypeAnnotation>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct BindingRest<'a> {
    pub data: NodeData,
    pub target: BindingTarget<'a>,
    pub annotation: Option<&'a TypeAnnotation>,
}

#[derive(Debug)]
pub struct FormalParameters<'a> {
    pub data: NodeData,
    /// A skipped leading `this: T` parameter.
    pub this_param: Option<&'a TypeAnnotation>,
    pub items: NodeList<'a, &'a BindingElement<'a>>,
    pub rest: Option<&'a BindingRest<'a>>,
}

impl<'a> FormalParameters<'a> {
    /// Number of parameters, rest included.
    pub fn len(&self) -> usize {
        self.items.len() + usize::from(self.rest.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy)]
pub enum AssignmentTarget<'a> {
    /// An identifier, member access or parenthesized simple target.
    Simple(Expression<'a>),
    Object(&'a ObjectAssignmentPattern<'a>),
    Array(&'a ArrayAssignmentPattern<'a>),
}

#[derive(Debug)]
pub struct ObjectAssignmentPattern<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectAssignmentEntry<'a>>,
    pub rest: Option<&'a AssignmentRest<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectAssignmentEntry<'a> {
    Shorthand(&'a AssignmentElement<'a>),
    Property(&'a AssignmentProperty<'a>),
}

#[derive(Debug)]
pub struct AssignmentProperty<'a> {
    pub data: NodeData,
    pub key: PropertyKey<'a>,
    pub value: &'a AssignmentElement<'a>,
}

#[derive(Debug)]
pub struct ArrayAssignmentPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Option<&'a AssignmentElement<'a>>>,
    pub rest: Option<&'a AssignmentRest<'a>>,
}

#[derive(Debug)]
pub struct AssignmentElement<'a> {
    pub data: NodeData,
    pub target: AssignmentTarget<'a>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct AssignmentRest<'a> {
    pub data: NodeData,
    pub target: AssignmentTarget<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Block(&'a Block<'a>),
    Empty(&'a EmptyStatement),
    Expression(&'a ExpressionStatement<'a>),
    If(&'a IfStatement<'a>),
    DoWhile(&'a DoWhileStatement<'a>),
    While(&'a WhileStatement<'a>),
    For(&'a ForStatement<'a>),
    Continue(&'a ContinueStatement<'a>),
    Break(&'a BreakStatement<'a>),
    Return(&'a ReturnStatement<'a>),
    With(&'a WithStatement<'a>),
    Switch(&'a SwitchStatement<'a>),
    Labelled(&'a LabelledStatement<'a>),
    Throw(&'a ThrowStatement<'a>),
    Try(&'a TryStatement<'a>),
    Debugger(&'a DebuggerStatement),
    Variable(&'a VariableDeclaration<'a>),
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct EmptyStatement {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
}

#[derive(Debug)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub test: Expression<'a>,
    pub consequent: Statement<'a>,
    pub alternate: Option<Statement<'a>>,
}

#[derive(Debug)]
pub struct DoWhileStatement<'a> {
    pub data: NodeData,
    pub body: Statement<'a>,
    pub test: Expression<'a>,
}

#[derive(Debug)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub test: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub head: ForHead<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ForHead<'a> {
    /// `for (init; test; update)`
    Classic {
        init: Option<ForInit<'a>>,
        test: Option<Expression<'a>>,
        update: Option<Expression<'a>>,
    },
    /// `for (left in right)`
    In {
        left: ForBinding<'a>,
        right: Expression<'a>,
    },
    /// `for (left of right)` or `for await (left of right)`
    Of {
        is_await: bool,
        left: ForBinding<'a>,
        right: Expression<'a>,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum ForInit<'a> {
    Variable(&'a VariableDeclaration<'a>),
    Expression(Expression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub enum ForBinding<'a> {
    /// A single-declarator `var`, `let` or `const` declaration.
    Variable(&'a VariableDeclaration<'a>),
    Target(AssignmentTarget<'a>),
}

impl<'a> ForStatement<'a> {
    pub fn flavor(&self) -> ForFlavor {
        fn by_binding(
            left: &ForBinding<'_>,
            var: ForFlavor,
            lexical: ForFlavor,
            target: ForFlavor,
        ) -> ForFlavor {
            match left {
                ForBinding::Variable(decl) if decl.kind == VariableKind::Var => var,
                ForBinding::Variable(_) => lexical,
                ForBinding::Target(_) => target,
            }
        }

        match &self.head {
            ForHead::Classic { init, .. } => match init {
                None => ForFlavor::Classic,
                Some(ForInit::Variable(decl)) if decl.kind == VariableKind::Var => {
                    ForFlavor::ClassicVar
                }
                Some(ForInit::Variable(_)) => ForFlavor::ClassicLexical,
                Some(ForInit::Expression(_)) => ForFlavor::ClassicExpression,
            },
            ForHead::In { left, .. } => {
                if let ForBinding::Variable(decl) = left {
                    if decl.declarators.iter().any(|d| d.init.is_some()) {
                        return ForFlavor::InVarInitializer;
                    }
                }
                by_binding(left, ForFlavor::InVar, ForFlavor::InLexical, ForFlavor::InTarget)
            }
            ForHead::Of {
                is_await: false,
                left,
                ..
            } => by_binding(left, ForFlavor::OfVar, ForFlavor::OfLexical, ForFlavor::OfTarget),
            ForHead::Of {
                is_await: true,
                left,
                ..
            } => by_binding(
                left,
                ForFlavor::AwaitOfVar,
                ForFlavor::AwaitOfLexical,
                ForFlavor::AwaitOfTarget,
            ),
        }
    }
}

#[derive(Debug)]
pub struct ContinueStatement<'a> {
    pub data: NodeData,
    pub label: Option<&'a Identifier>,
}

#[derive(Debug)]
pub struct BreakStatement<'a> {
    pub data: NodeData,
    pub label: Option<&'a Identifier>,
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub argument: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct WithStatement<'a> {
    pub data: NodeData,
    pub object: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub discriminant: Expression<'a>,
    pub cases: NodeList<'a, &'a SwitchCase<'a>>,
}

/// A `case` clause, or the `default` clause when `test` is `None`.
#[derive(Debug)]
pub struct SwitchCase<'a> {
    pub data: NodeData,
    pub test: Option<Expression<'a>>,
    pub consequent: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct LabelledStatement<'a> {
    pub data: NodeData,
    pub label: &'a Identifier,
    pub body: Statement<'a>,
}

#[derive(Debug)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub argument: Expression<'a>,
}

#[derive(Debug)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub block: &'a Block<'a>,
    pub handler: Option<&'a CatchClause<'a>>,
    pub finalizer: Option<&'a Block<'a>>,
}

#[derive(Debug)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub param: Option<BindingTarget<'a>>,
    pub annotation: Option<&'a TypeAnnotation>,
    pub body: &'a Block<'a>,
}

#[derive(Debug)]
pub struct DebuggerStatement {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub kind: VariableKind,
    pub declarators: NodeList<'a, &'a VariableDeclarator<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclarator<'a> {
    pub data: NodeData,
    pub target: BindingTarget<'a>,
    pub annotation: Option<&'a TypeAnnotation>,
    pub init: Option<Expression<'a>>,
}

// ============================================================================
// Functions and Classes
// ============================================================================

/// A function declaration or expression. The node kind tells which.
#[derive(Debug)]
pub struct Function<'a> {
    pub data: NodeData,
    pub is_async: bool,
    pub is_generator: bool,
    pub name: Option<&'a Identifier>,
    pub type_parameters: Option<&'a TypeAnnotation>,
    pub params: &'a FormalParameters<'a>,
    pub return_type: Option<&'a TypeAnnotation>,
    /// `None` for an overload signature.
    pub body: Option<&'a FunctionBody<'a>>,
}

#[derive(Debug)]
pub struct FunctionBody<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

/// A class declaration or expression. The node kind tells which.
#[derive(Debug)]
pub struct Class<'a> {
    pub data: NodeData,
    pub name: Option<&'a Identifier>,
    pub type_parameters: Option<&'a TypeAnnotation>,
    pub heritage: Option<&'a ClassHeritage<'a>>,
    /// A skipped `implements` clause.
    pub implements: Option<&'a TypeAnnotation>,
    pub body: &'a ClassBody<'a>,
}

/// `extends Expression<TypeArguments>`
#[derive(Debug)]
pub struct ClassHeritage<'a> {
    pub data: NodeData,
    pub expression: Expression<'a>,
    pub type_arguments: Option<&'a TypeAnnotation>,
}

#[derive(Debug)]
pub struct ClassBody<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ClassElement<'a> {
    Method(&'a MethodDefinition<'a>),
    Field(&'a FieldDefinition<'a>),
    StaticBlock(&'a StaticBlock<'a>),
    Empty(&'a EmptyClassElement),
}

/// A class method or an object literal method, getter or setter.
#[derive(Debug)]
pub struct MethodDefinition<'a> {
    pub data: NodeData,
    pub is_static: bool,
    pub kind: MethodKind,
    pub key: PropertyKey<'a>,
    pub type_parameters: Option<&'a TypeAnnotation>,
    pub params: &'a FormalParameters<'a>,
    pub return_type: Option<&'a TypeAnnotation>,
    /// `None` for an overload signature.
    pub body: Option<&'a FunctionBody<'a>>,
}

#[derive(Debug)]
pub struct FieldDefinition<'a> {
    pub data: NodeData,
    pub is_static: bool,
    pub key: PropertyKey<'a>,
    pub annotation: Option<&'a TypeAnnotation>,
    pub initializer: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct StaticBlock<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

/// A stray `;` in a class body.
#[derive(Debug)]
pub struct EmptyClassElement {
    pub data: NodeData,
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    /// `None` for a side-effect import.
    pub clause: Option<ImportClause<'a>>,
    pub source: &'a Literal,
}

impl<'a> ImportDeclaration<'a> {
    pub fn form(&self) -> ImportForm {
        match self.clause {
            None => ImportForm::SideEffect,
            Some(ImportClause::Default(_)) => ImportForm::Default,
            Some(ImportClause::Namespace(_)) => ImportForm::Namespace,
            Some(ImportClause::Named(_)) => ImportForm::Named,
            Some(ImportClause::DefaultAndNamespace(..)) => ImportForm::DefaultAndNamespace,
            Some(ImportClause::DefaultAndNamed(..)) => ImportForm::DefaultAndNamed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ImportClause<'a> {
    Default(&'a Identifier),
    Namespace(&'a NamespaceImport<'a>),
    Named(&'a NamedImports<'a>),
    DefaultAndNamespace(&'a Identifier, &'a NamespaceImport<'a>),
    DefaultAndNamed(&'a Identifier, &'a NamedImports<'a>),
}

/// `* as local`
#[derive(Debug)]
pub struct NamespaceImport<'a> {
    pub data: NodeData,
    pub local: &'a Identifier,
}

#[derive(Debug)]
pub struct NamedImports<'a> {
    pub data: NodeData,
    pub specifiers: NodeList<'a, &'a ImportSpecifier<'a>>,
}

/// `imported as local`, or just `local`.
#[derive(Debug)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub imported: Option<ModuleExportName<'a>>,
    pub local: &'a Identifier,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleExportName<'a> {
    Identifier(&'a Identifier),
    String(&'a Literal),
}

impl<'a> ModuleExportName<'a> {
    pub fn name(&self) -> Atom {
        match self {
            ModuleExportName::Identifier(id) => id.name,
            ModuleExportName::String(lit) => lit.raw,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Export<'a> {
    All(&'a ExportAllDeclaration<'a>),
    Named(&'a ExportNamedDeclaration<'a>),
    Default(&'a ExportDefaultDeclaration<'a>),
    Declaration(&'a ExportDeclaration<'a>),
}

impl<'a> Export<'a> {
    pub fn form(&self) -> ExportForm {
        match self {
            Export::All(n) if n.exported.is_some() => ExportForm::AllAs,
            Export::All(_) => ExportForm::All,
            Export::Named(n) if n.source.is_some() => ExportForm::NamedFrom,
            Export::Named(_) => ExportForm::Named,
            Export::Default(_) => ExportForm::Default,
            Export::Declaration(_) => ExportForm::Declaration,
        }
    }
}

/// `export * from "m"` or `export * as name from "m"`
#[derive(Debug)]
pub struct ExportAllDeclaration<'a> {
    pub data: NodeData,
    pub exported: Option<ModuleExportName<'a>>,
    pub source: &'a Literal,
}

/// `export { a, b as c }` with an optional `from "m"`.
#[derive(Debug)]
pub struct ExportNamedDeclaration<'a> {
    pub data: NodeData,
    pub specifiers: NodeList<'a, &'a ExportSpecifier<'a>>,
    pub source: Option<&'a Literal>,
}

#[derive(Debug)]
pub struct ExportSpecifier<'a> {
    pub data: NodeData,
    pub local: ModuleExportName<'a>,
    pub exported: Option<ModuleExportName<'a>>,
}

#[derive(Debug)]
pub struct ExportDefaultDeclaration<'a> {
    pub data: NodeData,
    pub value: ExportDefaultValue<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ExportDefaultValue<'a> {
    Function(&'a Function<'a>),
    Class(&'a Class<'a>),
    Expression(Expression<'a>),
}

/// `export` followed by a variable, function or class declaration.
#[derive(Debug)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub declaration: Statement<'a>,
}

// ============================================================================
// Node accessors
// ============================================================================

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::This(n) => &n.data,
            Expression::Super(n) => &n.data,
            Expression::Literal(n) => &n.data,
            Expression::PrivateName(n) => &n.data,
            Expression::Template(n) => &n.data,
            Expression::Array(n) => &n.data,
            Expression::Object(n) => &n.data,
            Expression::Function(n) => &n.data,
            Expression::Class(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::Member(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::TaggedTemplate(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::MetaProperty(n) => &n.data,
            Expression::ImportCall(n) => &n.data,
            Expression::Update(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Await(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Assignment(n) => &n.data,
            Expression::Arrow(n) => &n.data,
            Expression::Yield(n) => &n.data,
            Expression::Sequence(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn range(&self) -> TokenRange {
        self.data().range
    }

    /// Whether this expression may appear on the left of `=`: an
    /// identifier, a member access, or one of those in parentheses.
    /// Optional chains are excluded.
    pub fn is_simple_assignment_target(&self) -> bool {
        match self {
            Expression::Identifier(_) => true,
            Expression::Member(m) => !m.optional && !m.object.is_optional_chain(),
            Expression::Parenthesized(p) => p.expression.is_simple_assignment_target(),
            _ => false,
        }
    }

    /// Whether this expression is part of an optional chain.
    pub fn is_optional_chain(&self) -> bool {
        match self {
            Expression::Member(m) => m.optional || m.object.is_optional_chain(),
            Expression::Call(c) => c.optional || c.callee.is_optional_chain(),
            _ => false,
        }
    }
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::Block(n) => &n.data,
            Statement::Empty(n) => &n.data,
            Statement::Expression(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::DoWhile(n) => &n.data,
            Statement::While(n) => &n.data,
            Statement::For(n) => &n.data,
            Statement::Continue(n) => &n.data,
            Statement::Break(n) => &n.data,
            Statement::Return(n) => &n.data,
            Statement::With(n) => &n.data,
            Statement::Switch(n) => &n.data,
            Statement::Labelled(n) => &n.data,
            Statement::Throw(n) => &n.data,
            Statement::Try(n) => &n.data,
            Statement::Debugger(n) => &n.data,
            Statement::Variable(n) => &n.data,
            Statement::Function(n) => &n.data,
            Statement::Class(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn range(&self) -> TokenRange {
        self.data().range
    }
}

impl<'a> ModuleItem<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ModuleItem::Import(n) => &n.data,
            ModuleItem::Export(e) => e.data(),
            ModuleItem::Statement(s) => s.data(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn range(&self) -> TokenRange {
        self.data().range
    }
}

impl<'a> Export<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Export::All(n) => &n.data,
            Export::Named(n) => &n.data,
            Export::Default(n) => &n.data,
            Export::Declaration(n) => &n.data,
        }
    }
}

impl<'a> PropertyKey<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            PropertyKey::Identifier(n) => &n.data,
            PropertyKey::String(n) | PropertyKey::Numeric(n) => &n.data,
            PropertyKey::Computed(n) => &n.data,
            PropertyKey::Private(n) => &n.data,
        }
    }
}

impl<'a> BindingTarget<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            BindingTarget::Identifier(n) => &n.data,
            BindingTarget::Object(n) => &n.data,
            BindingTarget::Array(n) => &n.data,
        }
    }
}

impl<'a> AssignmentTarget<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            AssignmentTarget::Simple(e) => e.data(),
            AssignmentTarget::Object(n) => &n.data,
            AssignmentTarget::Array(n) => &n.data,
        }
    }
}

impl<'a> ClassElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ClassElement::Method(n) => &n.data,
            ClassElement::Field(n) => &n.data,
            ClassElement::StaticBlock(n) => &n.data,
            ClassElement::Empty(n) => &n.data,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            ClassElement::Method(n) => n.is_static,
            ClassElement::Field(n) => n.is_static,
            ClassElement::StaticBlock(_) => true,
            ClassElement::Empty(_) => false,
        }
    }
}
