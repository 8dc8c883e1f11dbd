//! Import and export declarations.
//!
//! `import.meta` and `import(...)` are expressions; a module item that
//! starts with one of them goes to the statement grammar.

use esgram_ast::node::*;
use esgram_ast::syntax_kind::SyntaxKind;
use esgram_ast::types::VariableKind;
use esgram_core::intern::Atom;
use esgram_core::text::TokenIndex;
use esgram_diagnostics::{Diagnostic, ErrorKind, Production, TokenRef};
use rustc_hash::FxHashSet;

use crate::context::Context;
use crate::cursor::Cursor;
use crate::parser::{PResult, Parser};

impl<'a, 't> Parser<'a, 't> {
    pub(crate) fn parse_module_item(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<ModuleItem<'a>> {
        self.within(c, Production::ModuleItem, |c| match c.peek_kind() {
            SyntaxKind::ImportKeyword
                if !matches!(c.peek_nth_kind(1), SyntaxKind::DotToken | SyntaxKind::OpenParenToken) =>
            {
                Ok(ModuleItem::Import(self.parse_import_declaration(c, ctx)?))
            }
            SyntaxKind::ExportKeyword => Ok(ModuleItem::Export(self.parse_export_declaration(c, ctx)?)),
            _ => Ok(ModuleItem::Statement(self.parse_statement_list_item(c, ctx)?)),
        })
    }

    /// Record a name bound or exported by a declaration, failing on the
    /// second occurrence.
    fn declare_name(
        &self,
        c: &Cursor<'t>,
        names: &mut FxHashSet<Atom>,
        name: Atom,
        at: TokenIndex,
        production: Production,
    ) -> PResult<()> {
        if names.insert(name) {
            return Ok(());
        }
        let token = c.token(at);
        Err(Diagnostic::error(
            production,
            TokenRef::new(at, token),
            ErrorKind::DuplicateBinding(token.text.to_string()),
        ))
    }

    // ========================================================================
    // import
    // ========================================================================

    fn parse_import_declaration(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<&'a ImportDeclaration<'a>> {
        self.within(c, Production::ImportDeclaration, |c| {
            let start = c.start();
            c.skip();
            let clause = if c.at(SyntaxKind::StringLiteral) {
                None
            } else {
                let clause = self.parse_import_clause(c, ctx)?;
                self.expect(c, SyntaxKind::FromKeyword, Production::ImportDeclaration)?;
                Some(clause)
            };
            let source = self.parse_string_literal(c, Production::ImportDeclaration)?;
            self.consume_semicolon(c, Production::ImportDeclaration)?;
            Ok(&*self.arena.alloc(ImportDeclaration {
                data: NodeData::new(SyntaxKind::ImportDeclaration, c.range_from(start)),
                clause,
                source,
            }))
        })
    }

    fn parse_import_clause(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<ImportClause<'a>> {
        self.within(c, Production::ImportClause, |c| {
            let mut locals = FxHashSet::default();
            let default = if Self::is_identifier(c.peek_kind(), ctx) {
                let local = self.parse_identifier(c, ctx, Production::ImportClause)?;
                self.declare_name(c, &mut locals, local.name, local.data.range.start, Production::ImportClause)?;
                if !c.accept(SyntaxKind::CommaToken) {
                    return Ok(ImportClause::Default(local));
                }
                Some(local)
            } else {
                None
            };

            match (default, c.peek_kind()) {
                (None, SyntaxKind::AsteriskToken) => {
                    Ok(ImportClause::Namespace(self.parse_namespace_import(c, ctx, &mut locals)?))
                }
                (Some(local), SyntaxKind::AsteriskToken) => Ok(ImportClause::DefaultAndNamespace(
                    local,
                    self.parse_namespace_import(c, ctx, &mut locals)?,
                )),
                (None, SyntaxKind::OpenBraceToken) => {
                    Ok(ImportClause::Named(self.parse_named_imports(c, ctx, &mut locals)?))
                }
                (Some(local), SyntaxKind::OpenBraceToken) => Ok(ImportClause::DefaultAndNamed(
                    local,
                    self.parse_named_imports(c, ctx, &mut locals)?,
                )),
                _ => self.unexpected(c, Production::ImportClause),
            }
        })
    }

    /// `* as local`
    fn parse_namespace_import(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        locals: &mut FxHashSet<Atom>,
    ) -> PResult<&'a NamespaceImport<'a>> {
        let start = c.start();
        c.skip();
        self.expect(c, SyntaxKind::AsKeyword, Production::ImportClause)?;
        let local = self.parse_identifier(c, ctx, Production::ImportClause)?;
        self.declare_name(c, locals, local.name, local.data.range.start, Production::ImportClause)?;
        Ok(self.arena.alloc(NamespaceImport {
            data: NodeData::new(SyntaxKind::NamespaceImport, c.range_from(start)),
            local,
        }))
    }

    /// `{ a, b as c, "d" as e }`
    fn parse_named_imports(
        &self,
        c: &mut Cursor<'t>,
        ctx: Context,
        locals: &mut FxHashSet<Atom>,
    ) -> PResult<&'a NamedImports<'a>> {
        let start = c.start();
        c.skip();
        let mut specifiers = Vec::new();
        while !c.at(SyntaxKind::CloseBraceToken) {
            let specifier_start = c.start();
            let imported = if c.at(SyntaxKind::StringLiteral) || c.peek_nth_kind(1) == SyntaxKind::AsKeyword {
                let imported = self.parse_module_export_name(c)?;
                self.expect(c, SyntaxKind::AsKeyword, Production::ImportClause)?;
                Some(imported)
            } else {
                None
            };
            let local = self.parse_identifier(c, ctx, Production::ImportClause)?;
            self.declare_name(c, locals, local.name, local.data.range.start, Production::ImportClause)?;
            specifiers.push(&*self.arena.alloc(ImportSpecifier {
                data: NodeData::new(SyntaxKind::ImportSpecifier, c.range_from(specifier_start)),
                imported,
                local,
            }));
            if !c.at(SyntaxKind::CloseBraceToken) {
                self.expect(c, SyntaxKind::CommaToken, Production::ImportClause)?;
            }
        }
        c.skip();
        Ok(self.arena.alloc(NamedImports {
            data: NodeData::new(SyntaxKind::NamedImports, c.range_from(start)),
            specifiers: self.arena.alloc_slice(specifiers),
        }))
    }

    /// An identifier name (reserved words included) or a string literal.
    fn parse_module_export_name(&self, c: &mut Cursor<'t>) -> PResult<ModuleExportName<'a>> {
        if c.at(SyntaxKind::StringLiteral) {
            return Ok(ModuleExportName::String(self.parse_literal(c, Production::ExportClause)?));
        }
        Ok(ModuleExportName::Identifier(
            self.parse_identifier_name(c, Production::ExportClause)?,
        ))
    }

    // ========================================================================
    // export
    // ========================================================================

    fn parse_export_declaration(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Export<'a>> {
        self.within(c, Production::ExportDeclaration, |c| {
            let start = c.start();
            c.skip();
            match c.peek_kind() {
                SyntaxKind::AsteriskToken => self.parse_export_all(c, start),
                SyntaxKind::OpenBraceToken => self.parse_export_named(c, start),
                SyntaxKind::DefaultKeyword => self.parse_export_default(c, ctx, start),
                _ => {
                    let declaration = self.parse_exported_declaration(c, ctx)?;
                    Ok(Export::Declaration(self.arena.alloc(ExportDeclaration {
                        data: NodeData::new(SyntaxKind::ExportDeclaration, c.range_from(start)),
                        declaration,
                    })))
                }
            }
        })
    }

    /// `* from "m"` or `* as name from "m"`
    fn parse_export_all(&self, c: &mut Cursor<'t>, start: TokenIndex) -> PResult<Export<'a>> {
        c.skip();
        let exported = if c.accept(SyntaxKind::AsKeyword) {
            Some(self.parse_module_export_name(c)?)
        } else {
            None
        };
        self.expect(c, SyntaxKind::FromKeyword, Production::ExportDeclaration)?;
        let source = self.parse_string_literal(c, Production::ExportDeclaration)?;
        self.consume_semicolon(c, Production::ExportDeclaration)?;
        Ok(Export::All(self.arena.alloc(ExportAllDeclaration {
            data: NodeData::new(SyntaxKind::ExportAllDeclaration, c.range_from(start)),
            exported,
            source,
        })))
    }

    /// `{ a, b as c } [from "m"]`
    fn parse_export_named(&self, c: &mut Cursor<'t>, start: TokenIndex) -> PResult<Export<'a>> {
        let specifiers = self.within(c, Production::ExportClause, |c| {
            c.skip();
            let mut exported_names = FxHashSet::default();
            let mut specifiers = Vec::new();
            while !c.at(SyntaxKind::CloseBraceToken) {
                let specifier_start = c.start();
                let local = self.parse_module_export_name(c)?;
                let exported = if c.accept(SyntaxKind::AsKeyword) {
                    Some(self.parse_module_export_name(c)?)
                } else {
                    None
                };
                let public = exported.unwrap_or(local);
                let at = match public {
                    ModuleExportName::Identifier(id) => id.data.range.start,
                    ModuleExportName::String(lit) => lit.data.range.start,
                };
                self.declare_name(c, &mut exported_names, public.name(), at, Production::ExportClause)?;
                specifiers.push(&*self.arena.alloc(ExportSpecifier {
                    data: NodeData::new(SyntaxKind::ExportSpecifier, c.range_from(specifier_start)),
                    local,
                    exported,
                }));
                if !c.at(SyntaxKind::CloseBraceToken) {
                    self.expect(c, SyntaxKind::CommaToken, Production::ExportClause)?;
                }
            }
            c.skip();
            Ok(specifiers)
        })?;

        let source = if c.accept(SyntaxKind::FromKeyword) {
            Some(self.parse_string_literal(c, Production::ExportDeclaration)?)
        } else {
            None
        };
        self.consume_semicolon(c, Production::ExportDeclaration)?;
        Ok(Export::Named(self.arena.alloc(ExportNamedDeclaration {
            data: NodeData::new(SyntaxKind::ExportNamedDeclaration, c.range_from(start)),
            specifiers: self.arena.alloc_slice(specifiers),
            source,
        })))
    }

    /// `default` followed by a function, a class or an expression.
    fn parse_export_default(&self, c: &mut Cursor<'t>, ctx: Context, start: TokenIndex) -> PResult<Export<'a>> {
        c.skip();
        let value = match c.peek_kind() {
            SyntaxKind::FunctionKeyword => ExportDefaultValue::Function(self.parse_function_declaration(c, ctx, true)?),
            SyntaxKind::AsyncKeyword
                if c.peek_nth_kind(1) == SyntaxKind::FunctionKeyword && !c.line_break_after_next() =>
            {
                ExportDefaultValue::Function(self.parse_function_declaration(c, ctx, true)?)
            }
            SyntaxKind::ClassKeyword => ExportDefaultValue::Class(self.parse_class_declaration(c, ctx, true)?),
            _ => {
                let expression = self.parse_assignment_expression(c, ctx.with(Context::IN))?;
                self.consume_semicolon(c, Production::ExportDeclaration)?;
                ExportDefaultValue::Expression(expression)
            }
        };
        Ok(Export::Default(self.arena.alloc(ExportDefaultDeclaration {
            data: NodeData::new(SyntaxKind::ExportDefaultDeclaration, c.range_from(start)),
            value,
        })))
    }

    /// The declaration after `export`: `var`, `let`, `const`, a function or
    /// a class.
    fn parse_exported_declaration(&self, c: &mut Cursor<'t>, ctx: Context) -> PResult<Statement<'a>> {
        match c.peek_kind() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                let (kind, production) = match c.peek_kind() {
                    SyntaxKind::VarKeyword => (VariableKind::Var, Production::VariableStatement),
                    SyntaxKind::LetKeyword => (VariableKind::Let, Production::LexicalDeclaration),
                    _ => (VariableKind::Const, Production::LexicalDeclaration),
                };
                let declaration = self.parse_variable_statement(c, ctx.with(Context::IN), kind, production)?;
                Ok(Statement::Variable(declaration))
            }
            SyntaxKind::FunctionKeyword => Ok(Statement::Function(self.parse_function_declaration(c, ctx, false)?)),
            SyntaxKind::AsyncKeyword
                if c.peek_nth_kind(1) == SyntaxKind::FunctionKeyword && !c.line_break_after_next() =>
            {
                Ok(Statement::Function(self.parse_function_declaration(c, ctx, false)?))
            }
            SyntaxKind::ClassKeyword => Ok(Statement::Class(self.parse_class_declaration(c, ctx, false)?)),
            _ => self.unexpected(c, Production::ExportDeclaration),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_module;
    use esgram_ast::node::*;
    use esgram_ast::types::{ExportForm, ImportForm, MetaPropertyKind};
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_diagnostics::{ErrorKind, Production};

    #[test]
    fn test_import_forms() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let module = parse_module(
            &arena,
            &interner,
            r#"import "a"; import b from "b"; import * as c from "c"; import { d, e as f, "g" as h } from "d";
               import i, * as j from "i"; import k, { l } from "k";"#,
        )
        .unwrap();
        let forms: Vec<ImportForm> = module
            .items
            .iter()
            .map(|item| match item {
                ModuleItem::Import(import) => import.form(),
                other => panic!("expected an import, got {other:?}"),
            })
            .collect();
        assert_eq!(
            forms,
            vec![
                ImportForm::SideEffect,
                ImportForm::Default,
                ImportForm::Namespace,
                ImportForm::Named,
                ImportForm::DefaultAndNamespace,
                ImportForm::DefaultAndNamed,
            ]
        );
    }

    #[test]
    fn test_export_forms() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let module = parse_module(
            &arena,
            &interner,
            r#"export * from "a"; export * as b from "b"; export { c, d as e }; export { f } from "f";
               export default function () {} export const g = 1; export class H {}"#,
        )
        .unwrap();
        let forms: Vec<ExportForm> = module
            .items
            .iter()
            .map(|item| match item {
                ModuleItem::Export(export) => export.form(),
                other => panic!("expected an export, got {other:?}"),
            })
            .collect();
        assert_eq!(
            forms,
            vec![
                ExportForm::All,
                ExportForm::AllAs,
                ExportForm::Named,
                ExportForm::NamedFrom,
                ExportForm::Default,
                ExportForm::Declaration,
                ExportForm::Declaration,
            ]
        );
    }

    #[test]
    fn test_export_default_expression_and_anonymous_class() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let module = parse_module(&arena, &interner, "export default class {}").unwrap();
        let ModuleItem::Export(Export::Default(default)) = module.items[0] else { panic!() };
        let ExportDefaultValue::Class(class) = default.value else { panic!() };
        assert!(class.name.is_none());

        let module = parse_module(&arena, &interner, "export default a + b;").unwrap();
        let ModuleItem::Export(Export::Default(default)) = module.items[0] else { panic!() };
        assert!(matches!(default.value, ExportDefaultValue::Expression(Expression::Binary(_))));
    }

    #[test]
    fn test_duplicate_import_binding() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_module(&arena, &interner, r#"import a, { b as a } from "m";"#).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateBinding("a".to_string()));
        assert_eq!(
            err.productions(),
            vec![
                Production::Module,
                Production::ModuleItem,
                Production::ImportDeclaration,
                Production::ImportClause,
            ]
        );
    }

    #[test]
    fn test_duplicate_export_name() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_module(&arena, &interner, "export { a, b as a };").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateBinding("a".to_string()));
        assert_eq!(err.leaf().production, Production::ExportClause);

        parse_module(&arena, &interner, "export { a as b, b as a };").unwrap();
    }

    #[test]
    fn test_import_meta_and_dynamic_import_are_statements() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let module = parse_module(&arena, &interner, r#"import.meta.url; import("./m").then(f);"#).unwrap();
        let ModuleItem::Statement(Statement::Expression(meta)) = module.items[0] else { panic!() };
        let Expression::Member(member) = meta.expression else { panic!() };
        let Expression::MetaProperty(property) = member.object else { panic!() };
        assert_eq!(property.meta, MetaPropertyKind::ImportMeta);

        let ModuleItem::Statement(Statement::Expression(call)) = module.items[1] else { panic!() };
        let Expression::Call(then) = call.expression else { panic!() };
        let Expression::Member(member) = then.callee else { panic!() };
        assert!(matches!(member.object, Expression::ImportCall(_)));

        parse_module(&arena, &interner, "export function f() { return () => import.meta; }").unwrap();
        parse_module(&arena, &interner, "class C { x = import.meta; }").unwrap();
    }

    #[test]
    fn test_import_requires_from() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let err = parse_module(&arena, &interner, r#"import a "m";"#).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::Expected(esgram_ast::syntax_kind::SyntaxKind::FromKeyword)
        );
    }
}
