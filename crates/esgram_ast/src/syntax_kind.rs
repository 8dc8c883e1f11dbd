//! SyntaxKind enum: token kinds and AST node kinds.
//!
//! Token kinds come first, ordered so that related groups (trivia, literals,
//! punctuation, assignment operators, reserved words, contextual keywords)
//! form contiguous ranges. Node kinds follow.

/// The kind of a token or AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken = 1,

    // Trivia
    WhitespaceTrivia = 2,
    NewLineTrivia = 3,
    SingleLineCommentTrivia = 4,
    MultiLineCommentTrivia = 5,
    ShebangTrivia = 6,

    // Literals
    NumericLiteral = 7,
    BigIntLiteral = 8,
    StringLiteral = 9,
    RegularExpressionLiteral = 10,
    NoSubstitutionTemplateLiteral = 11,
    TemplateHead = 12,
    TemplateMiddle = 13,
    TemplateTail = 14,

    // Punctuation
    OpenBraceToken = 15,
    CloseBraceToken = 16,
    OpenParenToken = 17,
    CloseParenToken = 18,
    OpenBracketToken = 19,
    CloseBracketToken = 20,
    DotToken = 21,
    DotDotDotToken = 22,
    SemicolonToken = 23,
    CommaToken = 24,
    QuestionDotToken = 25,
    LessThanToken = 26,
    GreaterThanToken = 27,
    LessThanEqualsToken = 28,
    GreaterThanEqualsToken = 29,
    EqualsEqualsToken = 30,
    ExclamationEqualsToken = 31,
    EqualsEqualsEqualsToken = 32,
    ExclamationEqualsEqualsToken = 33,
    EqualsGreaterThanToken = 34,
    PlusToken = 35,
    MinusToken = 36,
    AsteriskToken = 37,
    AsteriskAsteriskToken = 38,
    SlashToken = 39,
    PercentToken = 40,
    PlusPlusToken = 41,
    MinusMinusToken = 42,
    LessThanLessThanToken = 43,
    GreaterThanGreaterThanToken = 44,
    GreaterThanGreaterThanGreaterThanToken = 45,
    AmpersandToken = 46,
    BarToken = 47,
    CaretToken = 48,
    ExclamationToken = 49,
    TildeToken = 50,
    AmpersandAmpersandToken = 51,
    BarBarToken = 52,
    QuestionToken = 53,
    ColonToken = 54,
    AtToken = 55,
    QuestionQuestionToken = 56,

    // Assignment operators
    EqualsToken = 57,
    PlusEqualsToken = 58,
    MinusEqualsToken = 59,
    AsteriskEqualsToken = 60,
    AsteriskAsteriskEqualsToken = 61,
    SlashEqualsToken = 62,
    PercentEqualsToken = 63,
    LessThanLessThanEqualsToken = 64,
    GreaterThanGreaterThanEqualsToken = 65,
    GreaterThanGreaterThanGreaterThanEqualsToken = 66,
    AmpersandEqualsToken = 67,
    BarEqualsToken = 68,
    CaretEqualsToken = 69,
    BarBarEqualsToken = 70,
    AmpersandAmpersandEqualsToken = 71,
    QuestionQuestionEqualsToken = 72,

    // Identifiers
    Identifier = 73,
    PrivateName = 74,

    // Reserved words
    BreakKeyword = 75,
    CaseKeyword = 76,
    CatchKeyword = 77,
    ClassKeyword = 78,
    ConstKeyword = 79,
    ContinueKeyword = 80,
    DebuggerKeyword = 81,
    DefaultKeyword = 82,
    DeleteKeyword = 83,
    DoKeyword = 84,
    ElseKeyword = 85,
    EnumKeyword = 86,
    ExportKeyword = 87,
    ExtendsKeyword = 88,
    FalseKeyword = 89,
    FinallyKeyword = 90,
    ForKeyword = 91,
    FunctionKeyword = 92,
    IfKeyword = 93,
    ImportKeyword = 94,
    InKeyword = 95,
    InstanceOfKeyword = 96,
    NewKeyword = 97,
    NullKeyword = 98,
    ReturnKeyword = 99,
    SuperKeyword = 100,
    SwitchKeyword = 101,
    ThisKeyword = 102,
    ThrowKeyword = 103,
    TrueKeyword = 104,
    TryKeyword = 105,
    TypeOfKeyword = 106,
    VarKeyword = 107,
    VoidKeyword = 108,
    WhileKeyword = 109,
    WithKeyword = 110,

    // Strict mode reserved words
    ImplementsKeyword = 111,
    InterfaceKeyword = 112,
    LetKeyword = 113,
    PackageKeyword = 114,
    PrivateKeyword = 115,
    ProtectedKeyword = 116,
    PublicKeyword = 117,
    StaticKeyword = 118,
    YieldKeyword = 119,

    // Contextual keywords
    AsKeyword = 120,
    AsyncKeyword = 121,
    AwaitKeyword = 122,
    FromKeyword = 123,
    GetKeyword = 124,
    MetaKeyword = 125,
    OfKeyword = 126,
    SetKeyword = 127,
    TargetKeyword = 128,

    // Roots
    Script = 150,
    Module = 151,

    // Names and skipped type syntax
    ComputedPropertyName = 152,
    TypeAnnotation = 153,

    // Expressions
    ThisExpression = 160,
    SuperExpression = 161,
    ArrayLiteral = 162,
    ObjectLiteral = 163,
    PropertyAssignment = 164,
    ShorthandProperty = 165,
    SpreadElement = 166,
    TemplateLiteral = 167,
    ParenthesizedExpression = 168,
    MemberExpression = 169,
    CallExpression = 170,
    Arguments = 171,
    TaggedTemplateExpression = 172,
    NewExpression = 173,
    MetaProperty = 174,
    ImportCall = 175,
    UpdateExpression = 176,
    UnaryExpression = 177,
    AwaitExpression = 178,
    ExponentiationExpression = 179,
    MultiplicativeExpression = 180,
    AdditiveExpression = 181,
    ShiftExpression = 182,
    RelationalExpression = 183,
    EqualityExpression = 184,
    BitwiseAndExpression = 185,
    BitwiseXorExpression = 186,
    BitwiseOrExpression = 187,
    LogicalAndExpression = 188,
    LogicalOrExpression = 189,
    CoalesceExpression = 190,
    ConditionalExpression = 191,
    AssignmentExpression = 192,
    ArrowFunction = 193,
    YieldExpression = 194,
    SequenceExpression = 195,

    // Patterns
    ObjectBindingPattern = 200,
    ArrayBindingPattern = 201,
    BindingElement = 202,
    BindingProperty = 203,
    BindingRest = 204,
    FormalParameters = 205,
    ObjectAssignmentPattern = 206,
    ArrayAssignmentPattern = 207,
    AssignmentElement = 208,
    AssignmentProperty = 209,
    AssignmentRest = 210,

    // Statements
    Block = 220,
    EmptyStatement = 221,
    ExpressionStatement = 222,
    IfStatement = 223,
    DoWhileStatement = 224,
    WhileStatement = 225,
    ForStatement = 226,
    ContinueStatement = 227,
    BreakStatement = 228,
    ReturnStatement = 229,
    WithStatement = 230,
    SwitchStatement = 231,
    CaseClause = 232,
    DefaultClause = 233,
    LabelledStatement = 234,
    ThrowStatement = 235,
    TryStatement = 236,
    CatchClause = 237,
    DebuggerStatement = 238,
    VariableDeclaration = 239,
    VariableDeclarator = 240,

    // Functions and classes
    FunctionDeclaration = 250,
    FunctionExpression = 251,
    FunctionBody = 252,
    ClassDeclaration = 253,
    ClassExpression = 254,
    ClassHeritage = 255,
    ClassBody = 256,
    MethodDefinition = 257,
    FieldDefinition = 258,
    StaticBlock = 259,
    EmptyClassElement = 260,

    // Modules
    ImportDeclaration = 270,
    NamespaceImport = 271,
    NamedImports = 272,
    ImportSpecifier = 273,
    ExportAllDeclaration = 274,
    ExportNamedDeclaration = 275,
    ExportDefaultDeclaration = 276,
    ExportDeclaration = 277,
    ExportSpecifier = 278,
}

impl SyntaxKind {
    pub const FIRST_TRIVIA_TOKEN: SyntaxKind = SyntaxKind::WhitespaceTrivia;
    pub const LAST_TRIVIA_TOKEN: SyntaxKind = SyntaxKind::ShebangTrivia;
    pub const FIRST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NumericLiteral;
    pub const LAST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const FIRST_TEMPLATE_TOKEN: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const LAST_TEMPLATE_TOKEN: SyntaxKind = SyntaxKind::TemplateTail;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::ImplementsKeyword;
    pub const LAST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AsKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::TargetKeyword;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::TargetKeyword;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::TargetKeyword;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::Script;

    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whether this kind represents trivia (whitespace, line breaks, comments).
    #[inline]
    pub fn is_trivia(self) -> bool {
        self.in_range(Self::FIRST_TRIVIA_TOKEN, Self::LAST_TRIVIA_TOKEN)
    }

    /// Whether this kind represents a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        self.in_range(Self::FIRST_LITERAL_TOKEN, Self::LAST_LITERAL_TOKEN)
    }

    /// Whether this kind represents a template token.
    #[inline]
    pub fn is_template(self) -> bool {
        self.in_range(Self::FIRST_TEMPLATE_TOKEN, Self::LAST_TEMPLATE_TOKEN)
    }

    /// Whether this kind represents a punctuation token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    /// Whether this kind represents an assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.in_range(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    /// Whether this kind is any keyword, reserved or contextual.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Whether this kind is a reserved word that can never name a binding.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self.in_range(Self::FIRST_RESERVED_WORD, Self::LAST_RESERVED_WORD)
    }

    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.in_range(Self::FIRST_CONTEXTUAL_KEYWORD, Self::LAST_CONTEXTUAL_KEYWORD)
    }

    /// Whether a token of this kind can be used as an identifier reference or
    /// binding name. `yield` and `await` are included; the parser rejects them
    /// in generator and async contexts.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier
            || self.in_range(Self::FIRST_FUTURE_RESERVED_WORD, Self::LAST_CONTEXTUAL_KEYWORD)
    }

    /// Whether a token of this kind can be a property name after `.` or as an
    /// object key: identifiers and every keyword.
    #[inline]
    pub fn is_identifier_name(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    /// Whether this kind is a token kind (as opposed to a node kind).
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) <= Self::LAST_TOKEN as u16
    }

    #[inline]
    pub fn is_node(self) -> bool {
        (self as u16) >= Self::FIRST_NODE as u16
    }

    /// Whether this token kind terminates a line for automatic semicolon
    /// insertion. Multi-line comments count only when they contain a line
    /// break, which the token text must be inspected for.
    #[inline]
    pub fn is_line_terminator(self) -> bool {
        self == SyntaxKind::NewLineTrivia
    }

    /// Map keyword text to its kind.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "debugger" => SyntaxKind::DebuggerKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "delete" => SyntaxKind::DeleteKeyword,
            "do" => SyntaxKind::DoKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "export" => SyntaxKind::ExportKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "for" => SyntaxKind::ForKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "instanceof" => SyntaxKind::InstanceOfKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "super" => SyntaxKind::SuperKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "var" => SyntaxKind::VarKeyword,
            "void" => SyntaxKind::VoidKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "with" => SyntaxKind::WithKeyword,
            "implements" => SyntaxKind::ImplementsKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "let" => SyntaxKind::LetKeyword,
            "package" => SyntaxKind::PackageKeyword,
            "private" => SyntaxKind::PrivateKeyword,
            "protected" => SyntaxKind::ProtectedKeyword,
            "public" => SyntaxKind::PublicKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "yield" => SyntaxKind::YieldKeyword,
            "as" => SyntaxKind::AsKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "await" => SyntaxKind::AwaitKeyword,
            "from" => SyntaxKind::FromKeyword,
            "get" => SyntaxKind::GetKeyword,
            "meta" => SyntaxKind::MetaKeyword,
            "of" => SyntaxKind::OfKeyword,
            "set" => SyntaxKind::SetKeyword,
            "target" => SyntaxKind::TargetKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// The fixed text of a punctuation token.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            _ => return None,
        };
        Some(text)
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.punctuation_text() {
            Some(text) => write!(f, "'{}'", text),
            None => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(SyntaxKind::from_keyword("class"), Some(SyntaxKind::ClassKeyword));
        assert_eq!(SyntaxKind::from_keyword("of"), Some(SyntaxKind::OfKeyword));
        assert_eq!(SyntaxKind::from_keyword("constructor"), None);
    }

    #[test]
    fn test_identifier_like() {
        assert!(SyntaxKind::Identifier.is_identifier_like());
        assert!(SyntaxKind::AsyncKeyword.is_identifier_like());
        assert!(SyntaxKind::LetKeyword.is_identifier_like());
        assert!(!SyntaxKind::ClassKeyword.is_identifier_like());
        assert!(SyntaxKind::ClassKeyword.is_identifier_name());
        assert!(!SyntaxKind::PrivateName.is_identifier_name());
    }

    #[test]
    fn test_kind_groups() {
        assert!(SyntaxKind::MultiLineCommentTrivia.is_trivia());
        assert!(!SyntaxKind::EndOfFileToken.is_trivia());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
        assert!(SyntaxKind::TemplateMiddle.is_template());
        assert!(SyntaxKind::ClassBody.is_node());
        assert!(!SyntaxKind::TargetKeyword.is_node());
    }

    #[test]
    fn test_display() {
        assert_eq!(SyntaxKind::OpenBraceToken.to_string(), "'{'");
        assert_eq!(SyntaxKind::Identifier.to_string(), "Identifier");
    }
}
