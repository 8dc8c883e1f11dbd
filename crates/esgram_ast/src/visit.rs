//! AST visitor trait for traversing the syntax tree.
//!
//! Default implementations walk every child in source order and report each
//! node to [`Visit::enter`] before its children and [`Visit::leave`] after.
//! Visitors that only need kinds and ranges implement those two hooks.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use esgram_core::text::{TokenIndex, TokenRange};
use std::fmt;

pub trait Visit<'a> {
    /// Called when a node is entered, before its children.
    fn enter(&mut self, _node: &NodeData) {}

    /// Called after all children of a node were visited.
    fn leave(&mut self, _node: &NodeData) {}

    /// Enter and leave a node that has no children.
    fn visit_leaf(&mut self, node: &NodeData) {
        self.enter(node);
        self.leave(node);
    }

    // -- Roots --

    fn visit_script(&mut self, node: &Script<'a>) {
        self.enter(&node.data);
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
        self.leave(&node.data);
    }

    fn visit_module(&mut self, node: &Module<'a>) {
        self.enter(&node.data);
        for item in node.items.iter() {
            self.visit_module_item(item);
        }
        self.leave(&node.data);
    }

    fn visit_module_item(&mut self, item: &ModuleItem<'a>) {
        match item {
            ModuleItem::Import(n) => self.visit_import_declaration(n),
            ModuleItem::Export(n) => self.visit_export(n),
            ModuleItem::Statement(n) => self.visit_statement(n),
        }
    }

    // -- Names --

    fn visit_identifier(&mut self, node: &Identifier) {
        self.visit_leaf(&node.data);
    }

    fn visit_literal(&mut self, node: &Literal) {
        self.visit_leaf(&node.data);
    }

    fn visit_type_annotation(&mut self, node: &TypeAnnotation) {
        self.visit_leaf(&node.data);
    }

    fn visit_property_key(&mut self, key: &PropertyKey<'a>) {
        match key {
            PropertyKey::Identifier(n) => self.visit_identifier(n),
            PropertyKey::String(n) | PropertyKey::Numeric(n) => self.visit_literal(n),
            PropertyKey::Computed(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.expression);
                self.leave(&n.data);
            }
            PropertyKey::Private(n) => self.visit_leaf(&n.data),
        }
    }

    // -- Statements --

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        match stmt {
            Statement::Block(n) => self.visit_block(n),
            Statement::Empty(n) => self.visit_leaf(&n.data),
            Statement::Debugger(n) => self.visit_leaf(&n.data),
            Statement::Variable(n) => self.visit_variable_declaration(n),
            Statement::Function(n) => self.visit_function(n),
            Statement::Class(n) => self.visit_class(n),
            Statement::Expression(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.expression);
                self.leave(&n.data);
            }
            Statement::If(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.test);
                self.visit_statement(&n.consequent);
                if let Some(alt) = &n.alternate {
                    self.visit_statement(alt);
                }
                self.leave(&n.data);
            }
            Statement::DoWhile(n) => {
                self.enter(&n.data);
                self.visit_statement(&n.body);
                self.visit_expression(&n.test);
                self.leave(&n.data);
            }
            Statement::While(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.test);
                self.visit_statement(&n.body);
                self.leave(&n.data);
            }
            Statement::For(n) => self.visit_for_statement(n),
            Statement::Continue(n) => {
                self.enter(&n.data);
                if let Some(label) = n.label {
                    self.visit_identifier(label);
                }
                self.leave(&n.data);
            }
            Statement::Break(n) => {
                self.enter(&n.data);
                if let Some(label) = n.label {
                    self.visit_identifier(label);
                }
                self.leave(&n.data);
            }
            Statement::Return(n) => {
                self.enter(&n.data);
                if let Some(arg) = &n.argument {
                    self.visit_expression(arg);
                }
                self.leave(&n.data);
            }
            Statement::With(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.object);
                self.visit_statement(&n.body);
                self.leave(&n.data);
            }
            Statement::Switch(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.discriminant);
                for case in n.cases.iter() {
                    self.enter(&case.data);
                    if let Some(test) = &case.test {
                        self.visit_expression(test);
                    }
                    for stmt in case.consequent.iter() {
                        self.visit_statement(stmt);
                    }
                    self.leave(&case.data);
                }
                self.leave(&n.data);
            }
            Statement::Labelled(n) => {
                self.enter(&n.data);
                self.visit_identifier(n.label);
                self.visit_statement(&n.body);
                self.leave(&n.data);
            }
            Statement::Throw(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.argument);
                self.leave(&n.data);
            }
            Statement::Try(n) => {
                self.enter(&n.data);
                self.visit_block(n.block);
                if let Some(handler) = n.handler {
                    self.enter(&handler.data);
                    if let Some(param) = &handler.param {
                        self.visit_binding_target(param);
                    }
                    if let Some(ann) = handler.annotation {
                        self.visit_type_annotation(ann);
                    }
                    self.visit_block(handler.body);
                    self.leave(&handler.data);
                }
                if let Some(finalizer) = n.finalizer {
                    self.visit_block(finalizer);
                }
                self.leave(&n.data);
            }
        }
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        self.enter(&node.data);
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
        self.leave(&node.data);
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration<'a>) {
        self.enter(&node.data);
        for decl in node.declarators.iter() {
            self.enter(&decl.data);
            self.visit_binding_target(&decl.target);
            if let Some(ann) = decl.annotation {
                self.visit_type_annotation(ann);
            }
            if let Some(init) = &decl.init {
                self.visit_expression(init);
            }
            self.leave(&decl.data);
        }
        self.leave(&node.data);
    }

    fn visit_for_statement(&mut self, node: &ForStatement<'a>) {
        self.enter(&node.data);
        match &node.head {
            ForHead::Classic { init, test, update } => {
                match init {
                    Some(ForInit::Variable(decl)) => self.visit_variable_declaration(decl),
                    Some(ForInit::Expression(expr)) => self.visit_expression(expr),
                    None => {}
                }
                if let Some(test) = test {
                    self.visit_expression(test);
                }
                if let Some(update) = update {
                    self.visit_expression(update);
                }
            }
            ForHead::In { left, right } | ForHead::Of { left, right, .. } => {
                match left {
                    ForBinding::Variable(decl) => self.visit_variable_declaration(decl),
                    ForBinding::Target(target) => self.visit_assignment_target(target),
                }
                self.visit_expression(right);
            }
        }
        self.visit_statement(&node.body);
        self.leave(&node.data);
    }

    // -- Functions and classes --

    fn visit_function(&mut self, node: &Function<'a>) {
        self.enter(&node.data);
        if let Some(name) = node.name {
            self.visit_identifier(name);
        }
        if let Some(tp) = node.type_parameters {
            self.visit_type_annotation(tp);
        }
        self.visit_formal_parameters(node.params);
        if let Some(ret) = node.return_type {
            self.visit_type_annotation(ret);
        }
        if let Some(body) = node.body {
            self.visit_function_body(body);
        }
        self.leave(&node.data);
    }

    fn visit_function_body(&mut self, node: &FunctionBody<'a>) {
        self.enter(&node.data);
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
        self.leave(&node.data);
    }

    fn visit_formal_parameters(&mut self, node: &FormalParameters<'a>) {
        self.enter(&node.data);
        if let Some(this_param) = node.this_param {
            self.visit_type_annotation(this_param);
        }
        for param in node.items.iter() {
            self.visit_binding_element(param);
        }
        if let Some(rest) = node.rest {
            self.visit_binding_rest(rest);
        }
        self.leave(&node.data);
    }

    fn visit_class(&mut self, node: &Class<'a>) {
        self.enter(&node.data);
        if let Some(name) = node.name {
            self.visit_identifier(name);
        }
        if let Some(tp) = node.type_parameters {
            self.visit_type_annotation(tp);
        }
        if let Some(heritage) = node.heritage {
            self.enter(&heritage.data);
            self.visit_expression(&heritage.expression);
            if let Some(args) = heritage.type_arguments {
                self.visit_type_annotation(args);
            }
            self.leave(&heritage.data);
        }
        if let Some(implements) = node.implements {
            self.visit_type_annotation(implements);
        }
        self.enter(&node.body.data);
        for member in node.body.members.iter() {
            self.visit_class_element(member);
        }
        self.leave(&node.body.data);
        self.leave(&node.data);
    }

    fn visit_class_element(&mut self, member: &ClassElement<'a>) {
        match member {
            ClassElement::Method(n) => self.visit_method_definition(n),
            ClassElement::Field(n) => {
                self.enter(&n.data);
                self.visit_property_key(&n.key);
                if let Some(ann) = n.annotation {
                    self.visit_type_annotation(ann);
                }
                if let Some(init) = &n.initializer {
                    self.visit_expression(init);
                }
                self.leave(&n.data);
            }
            ClassElement::StaticBlock(n) => {
                self.enter(&n.data);
                for stmt in n.statements.iter() {
                    self.visit_statement(stmt);
                }
                self.leave(&n.data);
            }
            ClassElement::Empty(n) => self.visit_leaf(&n.data),
        }
    }

    fn visit_method_definition(&mut self, node: &MethodDefinition<'a>) {
        self.enter(&node.data);
        self.visit_property_key(&node.key);
        if let Some(tp) = node.type_parameters {
            self.visit_type_annotation(tp);
        }
        self.visit_formal_parameters(node.params);
        if let Some(ret) = node.return_type {
            self.visit_type_annotation(ret);
        }
        if let Some(body) = node.body {
            self.visit_function_body(body);
        }
        self.leave(&node.data);
    }

    // -- Patterns --

    fn visit_binding_target(&mut self, target: &BindingTarget<'a>) {
        match target {
            BindingTarget::Identifier(n) => self.visit_identifier(n),
            BindingTarget::Object(n) => {
                self.enter(&n.data);
                for entry in n.properties.iter() {
                    match entry {
                        ObjectBindingEntry::Shorthand(el) => self.visit_binding_element(el),
                        ObjectBindingEntry::Property(prop) => {
                            self.enter(&prop.data);
                            self.visit_property_key(&prop.key);
                            self.visit_binding_element(prop.value);
                            self.leave(&prop.data);
                        }
                    }
                }
                if let Some(rest) = n.rest {
                    self.visit_binding_rest(rest);
                }
                self.leave(&n.data);
            }
            BindingTarget::Array(n) => {
                self.enter(&n.data);
                for el in n.elements.iter().flatten() {
                    self.visit_binding_element(el);
                }
                if let Some(rest) = n.rest {
                    self.visit_binding_rest(rest);
                }
                self.leave(&n.data);
            }
        }
    }

    fn visit_binding_element(&mut self, node: &BindingElement<'a>) {
        self.enter(&node.data);
        self.visit_binding_target(&node.target);
        if let Some(ann) = node.annotation {
            self.visit_type_annotation(ann);
        }
        if let Some(init) = &node.initializer {
            self.visit_expression(init);
        }
        self.leave(&node.data);
    }

    fn visit_binding_rest(&mut self, node: &BindingRest<'a>) {
        self.enter(&node.data);
        self.visit_binding_target(&node.target);
        if let Some(ann) = node.annotation {
            self.visit_type_annotation(ann);
        }
        self.leave(&node.data);
    }

    fn visit_assignment_target(&mut self, target: &AssignmentTarget<'a>) {
        match target {
            AssignmentTarget::Simple(expr) => self.visit_expression(expr),
            AssignmentTarget::Object(n) => {
                self.enter(&n.data);
                for entry in n.properties.iter() {
                    match entry {
                        ObjectAssignmentEntry::Shorthand(el) => self.visit_assignment_element(el),
                        ObjectAssignmentEntry::Property(prop) => {
                            self.enter(&prop.data);
                            self.visit_property_key(&prop.key);
                            self.visit_assignment_element(prop.value);
                            self.leave(&prop.data);
                        }
                    }
                }
                if let Some(rest) = n.rest {
                    self.enter(&rest.data);
                    self.visit_assignment_target(&rest.target);
                    self.leave(&rest.data);
                }
                self.leave(&n.data);
            }
            AssignmentTarget::Array(n) => {
                self.enter(&n.data);
                for el in n.elements.iter().flatten() {
                    self.visit_assignment_element(el);
                }
                if let Some(rest) = n.rest {
                    self.enter(&rest.data);
                    self.visit_assignment_target(&rest.target);
                    self.leave(&rest.data);
                }
                self.leave(&n.data);
            }
        }
    }

    fn visit_assignment_element(&mut self, node: &AssignmentElement<'a>) {
        self.enter(&node.data);
        self.visit_assignment_target(&node.target);
        if let Some(init) = &node.initializer {
            self.visit_expression(init);
        }
        self.leave(&node.data);
    }

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        match expr {
            Expression::Identifier(n) => self.visit_identifier(n),
            Expression::Literal(n) => self.visit_literal(n),
            Expression::This(n) => self.visit_leaf(&n.data),
            Expression::Super(n) => self.visit_leaf(&n.data),
            Expression::MetaProperty(n) => self.visit_leaf(&n.data),
            Expression::PrivateName(n) => self.visit_leaf(&n.data),
            Expression::Template(n) => self.visit_template_literal(n),
            Expression::Function(n) => self.visit_function(n),
            Expression::Class(n) => self.visit_class(n),
            Expression::Arrow(n) => self.visit_arrow_function(n),
            Expression::Array(n) => {
                self.enter(&n.data);
                for el in n.elements.iter() {
                    match el {
                        ArrayElement::Hole => {}
                        ArrayElement::Expression(e) => self.visit_expression(e),
                        ArrayElement::Spread(s) => self.visit_spread(s),
                    }
                }
                self.leave(&n.data);
            }
            Expression::Object(n) => {
                self.enter(&n.data);
                for prop in n.properties.iter() {
                    match prop {
                        ObjectProperty::Property(p) => {
                            self.enter(&p.data);
                            self.visit_property_key(&p.key);
                            self.visit_expression(&p.value);
                            self.leave(&p.data);
                        }
                        ObjectProperty::Shorthand(p) => {
                            self.enter(&p.data);
                            self.visit_identifier(p.name);
                            self.leave(&p.data);
                        }
                        ObjectProperty::Method(m) => self.visit_method_definition(m),
                        ObjectProperty::Spread(s) => self.visit_spread(s),
                    }
                }
                self.leave(&n.data);
            }
            Expression::Parenthesized(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.expression);
                self.leave(&n.data);
            }
            Expression::Member(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.object);
                match &n.property {
                    MemberProperty::Name(id) => self.visit_identifier(id),
                    MemberProperty::Private(p) => self.visit_leaf(&p.data),
                    MemberProperty::Computed(e) => self.visit_expression(e),
                }
                self.leave(&n.data);
            }
            Expression::Call(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.callee);
                self.visit_arguments(n.arguments);
                self.leave(&n.data);
            }
            Expression::TaggedTemplate(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.tag);
                self.visit_template_literal(n.quasi);
                self.leave(&n.data);
            }
            Expression::New(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.callee);
                if let Some(args) = n.arguments {
                    self.visit_arguments(args);
                }
                self.leave(&n.data);
            }
            Expression::ImportCall(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.source);
                if let Some(options) = &n.options {
                    self.visit_expression(options);
                }
                self.leave(&n.data);
            }
            Expression::Update(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.argument);
                self.leave(&n.data);
            }
            Expression::Unary(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.argument);
                self.leave(&n.data);
            }
            Expression::Await(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.argument);
                self.leave(&n.data);
            }
            Expression::Binary(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.left);
                self.visit_expression(&n.right);
                self.leave(&n.data);
            }
            Expression::Conditional(n) => {
                self.enter(&n.data);
                self.visit_expression(&n.test);
                self.visit_expression(&n.consequent);
                self.visit_expression(&n.alternate);
                self.leave(&n.data);
            }
            Expression::Assignment(n) => {
                self.enter(&n.data);
                self.visit_assignment_target(&n.target);
                self.visit_expression(&n.value);
                self.leave(&n.data);
            }
            Expression::Yield(n) => {
                self.enter(&n.data);
                if let Some(arg) = &n.argument {
                    self.visit_expression(arg);
                }
                self.leave(&n.data);
            }
            Expression::Sequence(n) => {
                self.enter(&n.data);
                for e in n.expressions.iter() {
                    self.visit_expression(e);
                }
                self.leave(&n.data);
            }
        }
    }

    fn visit_arrow_function(&mut self, node: &ArrowFunction<'a>) {
        self.enter(&node.data);
        match &node.params {
            ArrowParameters::Identifier(id) => self.visit_identifier(id),
            ArrowParameters::Formal(params) => self.visit_formal_parameters(params),
        }
        if let Some(ret) = node.return_type {
            self.visit_type_annotation(ret);
        }
        match &node.body {
            ArrowBody::Expression(e) => self.visit_expression(e),
            ArrowBody::Block(b) => self.visit_function_body(b),
        }
        self.leave(&node.data);
    }

    fn visit_template_literal(&mut self, node: &TemplateLiteral<'a>) {
        self.enter(&node.data);
        for e in node.expressions.iter() {
            self.visit_expression(e);
        }
        self.leave(&node.data);
    }

    fn visit_arguments(&mut self, node: &Arguments<'a>) {
        self.enter(&node.data);
        for arg in node.items.iter() {
            match arg {
                Argument::Expression(e) => self.visit_expression(e),
                Argument::Spread(s) => self.visit_spread(s),
            }
        }
        self.leave(&node.data);
    }

    fn visit_spread(&mut self, node: &SpreadElement<'a>) {
        self.enter(&node.data);
        self.visit_expression(&node.argument);
        self.leave(&node.data);
    }

    // -- Modules --

    fn visit_import_declaration(&mut self, node: &ImportDeclaration<'a>) {
        self.enter(&node.data);
        match &node.clause {
            Some(ImportClause::Default(id)) => self.visit_identifier(id),
            Some(ImportClause::Namespace(ns)) => self.visit_namespace_import(ns),
            Some(ImportClause::Named(named)) => self.visit_named_imports(named),
            Some(ImportClause::DefaultAndNamespace(id, ns)) => {
                self.visit_identifier(id);
                self.visit_namespace_import(ns);
            }
            Some(ImportClause::DefaultAndNamed(id, named)) => {
                self.visit_identifier(id);
                self.visit_named_imports(named);
            }
            None => {}
        }
        self.visit_literal(node.source);
        self.leave(&node.data);
    }

    fn visit_namespace_import(&mut self, node: &NamespaceImport<'a>) {
        self.enter(&node.data);
        self.visit_identifier(node.local);
        self.leave(&node.data);
    }

    fn visit_named_imports(&mut self, node: &NamedImports<'a>) {
        self.enter(&node.data);
        for spec in node.specifiers.iter() {
            self.enter(&spec.data);
            if let Some(imported) = &spec.imported {
                self.visit_module_export_name(imported);
            }
            self.visit_identifier(spec.local);
            self.leave(&spec.data);
        }
        self.leave(&node.data);
    }

    fn visit_export(&mut self, export: &Export<'a>) {
        match export {
            Export::All(n) => {
                self.enter(&n.data);
                if let Some(exported) = &n.exported {
                    self.visit_module_export_name(exported);
                }
                self.visit_literal(n.source);
                self.leave(&n.data);
            }
            Export::Named(n) => {
                self.enter(&n.data);
                for spec in n.specifiers.iter() {
                    self.enter(&spec.data);
                    self.visit_module_export_name(&spec.local);
                    if let Some(exported) = &spec.exported {
                        self.visit_module_export_name(exported);
                    }
                    self.leave(&spec.data);
                }
                if let Some(source) = n.source {
                    self.visit_literal(source);
                }
                self.leave(&n.data);
            }
            Export::Default(n) => {
                self.enter(&n.data);
                match &n.value {
                    ExportDefaultValue::Function(f) => self.visit_function(f),
                    ExportDefaultValue::Class(c) => self.visit_class(c),
                    ExportDefaultValue::Expression(e) => self.visit_expression(e),
                }
                self.leave(&n.data);
            }
            Export::Declaration(n) => {
                self.enter(&n.data);
                self.visit_statement(&n.declaration);
                self.leave(&n.data);
            }
        }
    }

    fn visit_module_export_name(&mut self, name: &ModuleExportName<'a>) {
        match name {
            ModuleExportName::Identifier(id) => self.visit_identifier(id),
            ModuleExportName::String(lit) => self.visit_literal(lit),
        }
    }
}

// ============================================================================
// Coverage checking
// ============================================================================

/// A node whose range breaks the coverage invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageViolation {
    pub parent: NodeData,
    pub child: NodeData,
    /// End of the previous sibling, or the parent's start.
    pub cursor: TokenIndex,
}

impl fmt::Display for CoverageViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} escapes {:?} {:?} (next free token #{})",
            self.child.kind, self.child.range, self.parent.kind, self.parent.range, self.cursor
        )
    }
}

struct Frame {
    data: NodeData,
    cursor: TokenIndex,
}

/// Checks that every node's children are ordered, non-overlapping and
/// contained in the node's range.
#[derive(Default)]
pub struct CoverageChecker {
    stack: Vec<Frame>,
    violation: Option<CoverageViolation>,
    nodes: usize,
}

impl CoverageChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes seen so far.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn finish(self) -> Result<usize, CoverageViolation> {
        match self.violation {
            Some(v) => Err(v),
            None => Ok(self.nodes),
        }
    }
}

impl<'a> Visit<'a> for CoverageChecker {
    fn enter(&mut self, node: &NodeData) {
        self.nodes += 1;
        if let Some(parent) = self.stack.last_mut() {
            let ok = parent.cursor <= node.range.start && parent.data.range.contains(node.range);
            if !ok && self.violation.is_none() {
                self.violation = Some(CoverageViolation {
                    parent: parent.data,
                    child: *node,
                    cursor: parent.cursor,
                });
            }
            parent.cursor = parent.cursor.max(node.range.end);
        }
        self.stack.push(Frame {
            data: *node,
            cursor: node.range.start,
        });
    }

    fn leave(&mut self, _node: &NodeData) {
        self.stack.pop();
    }
}

/// Verify the coverage invariant over a module, returning the node count.
pub fn check_module_coverage(module: &Module<'_>) -> Result<usize, CoverageViolation> {
    let mut checker = CoverageChecker::new();
    checker.visit_module(module);
    checker.finish()
}

/// Verify the coverage invariant over a script, returning the node count.
pub fn check_script_coverage(script: &Script<'_>) -> Result<usize, CoverageViolation> {
    let mut checker = CoverageChecker::new();
    checker.visit_script(script);
    checker.finish()
}

// ============================================================================
// Shape collection
// ============================================================================

/// Collects node kinds in pre-order, with their nesting depth.
#[derive(Default)]
pub struct ShapeCollector {
    pub shape: Vec<(u32, SyntaxKind)>,
    depth: u32,
}

impl<'a> Visit<'a> for ShapeCollector {
    fn enter(&mut self, node: &NodeData) {
        self.shape.push((self.depth, node.kind));
        self.depth += 1;
    }

    fn leave(&mut self, _node: &NodeData) {
        self.depth -= 1;
    }
}

/// The pre-order kind shape of a module.
pub fn module_shape(module: &Module<'_>) -> Vec<(u32, SyntaxKind)> {
    let mut collector = ShapeCollector::default();
    collector.visit_module(module);
    collector.shape
}

/// The pre-order kind shape of a script.
pub fn script_shape(script: &Script<'_>) -> Vec<(u32, SyntaxKind)> {
    let mut collector = ShapeCollector::default();
    collector.visit_script(script);
    collector.shape
}

/// Collects every node's range, keyed by kind, in pre-order.
#[derive(Default)]
pub struct RangeCollector {
    pub nodes: Vec<(SyntaxKind, TokenRange)>,
}

impl<'a> Visit<'a> for RangeCollector {
    fn enter(&mut self, node: &NodeData) {
        self.nodes.push((node.kind, node.range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgram_core::intern::Interner;

    fn data(kind: SyntaxKind, start: u32, end: u32) -> NodeData {
        NodeData::new(kind, TokenRange::new(start, end))
    }

    #[test]
    fn test_coverage_accepts_ordered_children() {
        let interner = Interner::new();
        let a = Identifier {
            data: data(SyntaxKind::Identifier, 0, 1),
            name: interner.intern("a"),
        };
        let b = Identifier {
            data: data(SyntaxKind::Identifier, 2, 3),
            name: interner.intern("b"),
        };
        let binary = BinaryExpression {
            data: data(SyntaxKind::AdditiveExpression, 0, 3),
            operator: crate::types::BinaryOperator::Addition,
            left: Expression::Identifier(&a),
            right: Expression::Identifier(&b),
        };
        let stmt = ExpressionStatement {
            data: data(SyntaxKind::ExpressionStatement, 0, 4),
            expression: Expression::Binary(&binary),
        };
        let statements = [Statement::Expression(&stmt)];
        let script = Script {
            data: data(SyntaxKind::Script, 0, 5),
            statements: &statements,
        };
        assert_eq!(check_script_coverage(&script), Ok(5));
        assert_eq!(
            script_shape(&script),
            vec![
                (0, SyntaxKind::Script),
                (1, SyntaxKind::ExpressionStatement),
                (2, SyntaxKind::AdditiveExpression),
                (3, SyntaxKind::Identifier),
                (3, SyntaxKind::Identifier),
            ]
        );
    }

    #[test]
    fn test_coverage_rejects_overlap() {
        let interner = Interner::new();
        let a = Identifier {
            data: data(SyntaxKind::Identifier, 0, 2),
            name: interner.intern("a"),
        };
        let b = Identifier {
            data: data(SyntaxKind::Identifier, 1, 3),
            name: interner.intern("b"),
        };
        let binary = BinaryExpression {
            data: data(SyntaxKind::AdditiveExpression, 0, 3),
            operator: crate::types::BinaryOperator::Addition,
            left: Expression::Identifier(&a),
            right: Expression::Identifier(&b),
        };
        let stmt = ExpressionStatement {
            data: data(SyntaxKind::ExpressionStatement, 0, 3),
            expression: Expression::Binary(&binary),
        };
        let statements = [Statement::Expression(&stmt)];
        let script = Script {
            data: data(SyntaxKind::Script, 0, 4),
            statements: &statements,
        };
        let violation = check_script_coverage(&script).unwrap_err();
        assert_eq!(violation.child.range, TokenRange::new(1, 3));
        assert_eq!(violation.cursor, 2);
    }
}
