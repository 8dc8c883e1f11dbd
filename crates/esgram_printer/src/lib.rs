//! esgram_printer: AST to text output.
//!
//! Prints a parsed tree back to text using only node kinds, children and
//! token ranges. Exact printing reproduces the source covered by the root,
//! trivia included. Normalized printing puts each top-level item on its own
//! line with single spaces between significant tokens, keeping a line break
//! wherever the source had one so automatic semicolon insertion is
//! unaffected.

use esgram_ast::node::{Module, NodeData, Script};
use esgram_ast::token::TokenStream;
use esgram_core::text::TokenRange;

/// Options for the printer.
pub struct PrinterOptions {
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline after the last item.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// A tree root the printer can walk.
#[derive(Clone, Copy)]
pub enum Root<'r, 'a> {
    Module(&'r Module<'a>),
    Script(&'r Script<'a>),
}

impl<'r, 'a> Root<'r, 'a> {
    fn data(&self) -> &NodeData {
        match self {
            Root::Module(m) => &m.data,
            Root::Script(s) => &s.data,
        }
    }

    /// Ranges of the top-level items, in source order.
    fn item_ranges(&self) -> Vec<TokenRange> {
        match self {
            Root::Module(m) => m.items.iter().map(|item| item.range()).collect(),
            Root::Script(s) => s.statements.iter().map(|stmt| stmt.range()).collect(),
        }
    }
}

impl<'r, 'a> From<&'r Module<'a>> for Root<'r, 'a> {
    fn from(module: &'r Module<'a>) -> Self {
        Root::Module(module)
    }
}

impl<'r, 'a> From<&'r Script<'a>> for Root<'r, 'a> {
    fn from(script: &'r Script<'a>) -> Self {
        Root::Script(script)
    }
}

/// The printer converts a parsed tree back to text.
pub struct Printer<'t, 's> {
    output: String,
    options: PrinterOptions,
    tokens: &'t TokenStream<'s>,
}

impl<'t, 's> Printer<'t, 's> {
    pub fn new(tokens: &'t TokenStream<'s>) -> Self {
        Self::with_options(tokens, PrinterOptions::default())
    }

    pub fn with_options(tokens: &'t TokenStream<'s>, options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            options,
            tokens,
        }
    }

    /// The source text covered by the root range.
    pub fn print_exact<'r, 'a>(&mut self, root: impl Into<Root<'r, 'a>>) -> String
    where
        'a: 'r,
    {
        let root = root.into();
        self.output.clear();
        self.write_range_exact(root.data().range);
        std::mem::take(&mut self.output)
    }

    /// One top-level item per line, single spaces between significant
    /// tokens, comments dropped.
    pub fn print_normalized<'r, 'a>(&mut self, root: impl Into<Root<'r, 'a>>) -> String
    where
        'a: 'r,
    {
        let root = root.into();
        self.output.clear();
        for (i, range) in root.item_ranges().into_iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.write_range_normalized(range);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    fn write_range_exact(&mut self, range: TokenRange) {
        let tokens = self.tokens.tokens();
        for token in &tokens[range.to_range()] {
            self.output.push_str(token.text);
        }
    }

    fn write_range_normalized(&mut self, range: TokenRange) {
        let tokens = self.tokens.tokens();
        let mut started = false;
        let mut line_break = false;
        for token in &tokens[range.to_range()] {
            if token.is_trivia() {
                line_break |= token.is_line_break();
                continue;
            }
            if started {
                if line_break {
                    self.write_newline();
                } else {
                    self.write(" ");
                }
            }
            self.write(token.text);
            started = true;
            line_break = false;
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }
}

/// Reproduce the source text of a parsed root.
pub fn print_exact<'r, 'a: 'r>(tokens: &TokenStream<'_>, root: impl Into<Root<'r, 'a>>) -> String {
    Printer::new(tokens).print_exact(root)
}

/// Print a parsed root in normalized form with default options.
pub fn print_normalized<'r, 'a: 'r>(tokens: &TokenStream<'_>, root: impl Into<Root<'r, 'a>>) -> String {
    Printer::new(tokens).print_normalized(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgram_ast::visit::{module_shape, script_shape};
    use esgram_core::arena::AstArena;
    use esgram_core::intern::Interner;
    use esgram_parser::Parser;
    use esgram_scanner::tokenize;

    const SAMPLE: &str = r#"// leading comment
import { a, b as c } from "m";

export default class Point extends Base {
    static origin = new Point(0, 0);
    #x = 0;   /* private */
    get x() { return this.#x; }
    async *walk(steps = 1) {
        for (let i = 0; i < steps; i++) yield this.#x + i;
    }
}

export const label = `(${a}, ${c})`, re = /[a-z]+/gi;
function f() {
    return
    a + b
}
"#;

    #[test]
    fn test_print_exact_reproduces_source() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let stream = tokenize(SAMPLE);
        let module = Parser::new(&arena, &interner, &stream).parse_module().unwrap();
        assert_eq!(print_exact(&stream, module), SAMPLE);
    }

    #[test]
    fn test_print_normalized_one_item_per_line() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let stream = tokenize("let   a = 1 ;  /* x */ let b=[ 1,2 ];");
        let script = Parser::new(&arena, &interner, &stream).parse_script().unwrap();
        assert_eq!(print_normalized(&stream, script), "let a = 1 ;\nlet b = [ 1 , 2 ] ;\n");
    }

    #[test]
    fn test_print_normalized_keeps_line_breaks() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let stream = tokenize("function f() {\n  return\n  1\n}");
        let script = Parser::new(&arena, &interner, &stream).parse_script().unwrap();
        assert_eq!(print_normalized(&stream, script), "function f ( ) {\nreturn\n1\n}\n");
    }

    #[test]
    fn test_round_trip_preserves_shape() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let stream = tokenize(SAMPLE);
        let module = Parser::new(&arena, &interner, &stream).parse_module().unwrap();
        let printed = print_normalized(&stream, module);

        let reparsed_stream = tokenize(&printed);
        let reparsed = Parser::new(&arena, &interner, &reparsed_stream)
            .parse_module()
            .unwrap();
        assert_eq!(module_shape(module), module_shape(reparsed));
        assert_eq!(print_normalized(&reparsed_stream, reparsed), printed);
    }

    #[test]
    fn test_custom_options() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let stream = tokenize("a\nb");
        let script = Parser::new(&arena, &interner, &stream).parse_script().unwrap();
        assert_eq!(script_shape(script).len(), 5);
        let options = PrinterOptions {
            new_line: "\r\n".to_string(),
            trailing_newline: false,
        };
        let printed = Printer::with_options(&stream, options).print_normalized(script);
        assert_eq!(printed, "a\r\nb");
    }

    #[test]
    fn test_empty_root() {
        let arena = AstArena::new();
        let interner = Interner::new();
        let stream = tokenize("  // only a comment\n");
        let script = Parser::new(&arena, &interner, &stream).parse_script().unwrap();
        assert_eq!(print_normalized(&stream, script), "");
        assert_eq!(print_exact(&stream, script), "  // only a comment\n");
    }
}
