//! Syntax kinds: the closed set of token, trivia and node tags.

/// Tag of a token, trivia piece or node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
#[allow(non_camel_case_types, reason = "kinds mirror the grammar's token names")]
pub enum SyntaxKind {
    // Trivia
    WHITESPACE,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    /// Structured trivia holding a directive node.
    DIRECTIVE_TRIVIA,

    // Literals and names
    IDENT,
    INT_LITERAL,
    REAL_LITERAL,
    STRING_LITERAL,
    CHAR_LITERAL,

    // Keywords
    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    STRUCT_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    STATIC_KW,
    CONST_KW,
    VOID_KW,
    BOOL_KW,
    INT_KW,
    LONG_KW,
    DOUBLE_KW,
    CHAR_KW,
    STRING_KW,
    OBJECT_KW,
    VAR_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    DO_KW,
    FOR_KW,
    SWITCH_KW,
    CASE_KW,
    DEFAULT_KW,
    BREAK_KW,
    CONTINUE_KW,
    RETURN_KW,
    GOTO_KW,
    TRY_KW,
    CATCH_KW,
    FINALLY_KW,
    THROW_KW,
    NEW_KW,
    THIS_KW,
    BASE_KW,
    NULL_KW,
    TRUE_KW,
    FALSE_KW,
    TYPEOF_KW,

    // Punctuation
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    SEMICOLON,
    COMMA,
    DOT,
    COLON,
    QUESTION,

    // Operators
    EQ,
    EQ2,
    NEQ,
    LT,
    LT_EQ,
    GT,
    GT_EQ,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    BANG,
    TILDE,
    AMP,
    PIPE,
    CARET,
    AMP2,
    PIPE2,
    PLUS_EQ,
    MINUS_EQ,
    PLUS2,
    MINUS2,

    // Directive tokens (inside structured trivia)
    HASH,
    DIRECTIVE_KEYWORD,
    /// Free text after `#region`, `#pragma`, ...
    DIRECTIVE_MESSAGE,

    /// Character the lexer could not match.
    UNKNOWN,
    EOF,

    // Nodes
    COMPILATION_UNIT,
    USING_DIRECTIVE,
    CLASS_DECL,
    FIELD_DECL,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    PARAM_LIST,
    PARAM,
    PREDEFINED_TYPE,
    NAMED_TYPE,
    ARRAY_TYPE,
    VARIABLE_DECLARATOR,
    BLOCK,
    LOCAL_DECL_STMT,
    EXPR_STMT,
    IF_STMT,
    ELSE_CLAUSE,
    WHILE_STMT,
    DO_STMT,
    FOR_STMT,
    SWITCH_STMT,
    SWITCH_SECTION,
    CASE_LABEL,
    DEFAULT_LABEL,
    BREAK_STMT,
    CONTINUE_STMT,
    RETURN_STMT,
    GOTO_STMT,
    LABELED_STMT,
    TRY_STMT,
    CATCH_CLAUSE,
    FINALLY_CLAUSE,
    THROW_STMT,
    EMPTY_STMT,
    LITERAL_EXPR,
    NAME_EXPR,
    MEMBER_ACCESS_EXPR,
    CALL_EXPR,
    ARG_LIST,
    ELEMENT_ACCESS_EXPR,
    BINARY_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    ASSIGN_EXPR,
    CONDITIONAL_EXPR,
    PAREN_EXPR,
    NEW_EXPR,
    THIS_EXPR,
    BASE_EXPR,
    TYPEOF_EXPR,
    REGION_DIRECTIVE,
    END_REGION_DIRECTIVE,
    IF_DIRECTIVE,
    ELSE_DIRECTIVE,
    ENDIF_DIRECTIVE,
    DEFINE_DIRECTIVE,
    PRAGMA_DIRECTIVE,
    BAD_DIRECTIVE,
    /// Tokens the parser could not place.
    ERROR,
}

#[allow(clippy::enum_glob_use, reason = "kind tables read better unqualified")]
use SyntaxKind::*;

impl SyntaxKind {
    /// Every kind, in declaration order.
    pub const ALL: [SyntaxKind; 148] = [
        WHITESPACE, NEWLINE, LINE_COMMENT, BLOCK_COMMENT, DIRECTIVE_TRIVIA, IDENT, INT_LITERAL,
        REAL_LITERAL, STRING_LITERAL, CHAR_LITERAL, USING_KW, NAMESPACE_KW, CLASS_KW, STRUCT_KW,
        PUBLIC_KW, PRIVATE_KW, STATIC_KW, CONST_KW, VOID_KW, BOOL_KW, INT_KW, LONG_KW, DOUBLE_KW,
        CHAR_KW, STRING_KW, OBJECT_KW, VAR_KW, IF_KW, ELSE_KW, WHILE_KW, DO_KW, FOR_KW, SWITCH_KW,
        CASE_KW, DEFAULT_KW, BREAK_KW, CONTINUE_KW, RETURN_KW, GOTO_KW, TRY_KW, CATCH_KW,
        FINALLY_KW, THROW_KW, NEW_KW, THIS_KW, BASE_KW, NULL_KW, TRUE_KW, FALSE_KW, TYPEOF_KW,
        L_BRACE, R_BRACE, L_PAREN, R_PAREN, L_BRACKET, R_BRACKET, SEMICOLON, COMMA, DOT, COLON,
        QUESTION, EQ, EQ2, NEQ, LT, LT_EQ, GT, GT_EQ, PLUS, MINUS, STAR, SLASH, PERCENT, BANG,
        TILDE, AMP, PIPE, CARET, AMP2, PIPE2, PLUS_EQ, MINUS_EQ, PLUS2, MINUS2, HASH,
        DIRECTIVE_KEYWORD, DIRECTIVE_MESSAGE, UNKNOWN, EOF, COMPILATION_UNIT, USING_DIRECTIVE,
        CLASS_DECL, FIELD_DECL, METHOD_DECL, CONSTRUCTOR_DECL, PARAM_LIST, PARAM, PREDEFINED_TYPE,
        NAMED_TYPE, ARRAY_TYPE, VARIABLE_DECLARATOR, BLOCK, LOCAL_DECL_STMT, EXPR_STMT, IF_STMT,
        ELSE_CLAUSE, WHILE_STMT, DO_STMT, FOR_STMT, SWITCH_STMT, SWITCH_SECTION, CASE_LABEL,
        DEFAULT_LABEL, BREAK_STMT, CONTINUE_STMT, RETURN_STMT, GOTO_STMT, LABELED_STMT, TRY_STMT,
        CATCH_CLAUSE, FINALLY_CLAUSE, THROW_STMT, EMPTY_STMT, LITERAL_EXPR, NAME_EXPR,
        MEMBER_ACCESS_EXPR, CALL_EXPR, ARG_LIST, ELEMENT_ACCESS_EXPR, BINARY_EXPR, PREFIX_EXPR,
        POSTFIX_EXPR, ASSIGN_EXPR, CONDITIONAL_EXPR, PAREN_EXPR, NEW_EXPR, THIS_EXPR, BASE_EXPR,
        TYPEOF_EXPR, REGION_DIRECTIVE, END_REGION_DIRECTIVE, IF_DIRECTIVE, ELSE_DIRECTIVE,
        ENDIF_DIRECTIVE, DEFINE_DIRECTIVE, PRAGMA_DIRECTIVE, BAD_DIRECTIVE, ERROR,
    ];

    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            WHITESPACE | NEWLINE | LINE_COMMENT | BLOCK_COMMENT | DIRECTIVE_TRIVIA
        )
    }

    pub fn is_keyword(self) -> bool {
        (self as u16) >= (USING_KW as u16) && (self as u16) <= (TYPEOF_KW as u16)
    }

    /// Keywords that transfer control.
    pub fn is_control_keyword(self) -> bool {
        matches!(
            self,
            IF_KW
                | ELSE_KW
                | WHILE_KW
                | DO_KW
                | FOR_KW
                | SWITCH_KW
                | CASE_KW
                | DEFAULT_KW
                | BREAK_KW
                | CONTINUE_KW
                | RETURN_KW
                | GOTO_KW
                | TRY_KW
                | CATCH_KW
                | FINALLY_KW
                | THROW_KW
        )
    }

    /// Keywords naming a predefined type.
    pub fn is_predefined_type(self) -> bool {
        matches!(
            self,
            VOID_KW | BOOL_KW | INT_KW | LONG_KW | DOUBLE_KW | CHAR_KW | STRING_KW | OBJECT_KW
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            INT_LITERAL | REAL_LITERAL | STRING_LITERAL | CHAR_LITERAL
        )
    }

    pub fn is_punctuation(self) -> bool {
        (self as u16) >= (L_BRACE as u16) && (self as u16) <= (QUESTION as u16)
    }

    pub fn is_operator(self) -> bool {
        (self as u16) >= (EQ as u16) && (self as u16) <= (MINUS2 as u16)
    }

    /// Tokens carry text; everything from `COMPILATION_UNIT` on is a node.
    pub fn is_token(self) -> bool {
        !self.is_trivia() && (self as u16) < (COMPILATION_UNIT as u16)
    }

    pub fn is_node(self) -> bool {
        (self as u16) >= (COMPILATION_UNIT as u16)
    }

    pub fn is_directive(self) -> bool {
        (self as u16) >= (REGION_DIRECTIVE as u16) && (self as u16) <= (BAD_DIRECTIVE as u16)
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "using" => USING_KW,
            "namespace" => NAMESPACE_KW,
            "class" => CLASS_KW,
            "struct" => STRUCT_KW,
            "public" => PUBLIC_KW,
            "private" => PRIVATE_KW,
            "static" => STATIC_KW,
            "const" => CONST_KW,
            "void" => VOID_KW,
            "bool" => BOOL_KW,
            "int" => INT_KW,
            "long" => LONG_KW,
            "double" => DOUBLE_KW,
            "char" => CHAR_KW,
            "string" => STRING_KW,
            "object" => OBJECT_KW,
            "var" => VAR_KW,
            "if" => IF_KW,
            "else" => ELSE_KW,
            "while" => WHILE_KW,
            "do" => DO_KW,
            "for" => FOR_KW,
            "switch" => SWITCH_KW,
            "case" => CASE_KW,
            "default" => DEFAULT_KW,
            "break" => BREAK_KW,
            "continue" => CONTINUE_KW,
            "return" => RETURN_KW,
            "goto" => GOTO_KW,
            "try" => TRY_KW,
            "catch" => CATCH_KW,
            "finally" => FINALLY_KW,
            "throw" => THROW_KW,
            "new" => NEW_KW,
            "this" => THIS_KW,
            "base" => BASE_KW,
            "null" => NULL_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "typeof" => TYPEOF_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// Fixed source text of punctuation, operators and keywords.
    pub fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            L_BRACE => "{",
            R_BRACE => "}",
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACKET => "[",
            R_BRACKET => "]",
            SEMICOLON => ";",
            COMMA => ",",
            DOT => ".",
            COLON => ":",
            QUESTION => "?",
            EQ => "=",
            EQ2 => "==",
            NEQ => "!=",
            LT => "<",
            LT_EQ => "<=",
            GT => ">",
            GT_EQ => ">=",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            PERCENT => "%",
            BANG => "!",
            TILDE => "~",
            AMP => "&",
            PIPE => "|",
            CARET => "^",
            AMP2 => "&&",
            PIPE2 => "||",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            PLUS2 => "++",
            MINUS2 => "--",
            HASH => "#",
            _ => return self.keyword_text(),
        };
        Some(text)
    }

    fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            USING_KW => "using",
            NAMESPACE_KW => "namespace",
            CLASS_KW => "class",
            STRUCT_KW => "struct",
            PUBLIC_KW => "public",
            PRIVATE_KW => "private",
            STATIC_KW => "static",
            CONST_KW => "const",
            VOID_KW => "void",
            BOOL_KW => "bool",
            INT_KW => "int",
            LONG_KW => "long",
            DOUBLE_KW => "double",
            CHAR_KW => "char",
            STRING_KW => "string",
            OBJECT_KW => "object",
            VAR_KW => "var",
            IF_KW => "if",
            ELSE_KW => "else",
            WHILE_KW => "while",
            DO_KW => "do",
            FOR_KW => "for",
            SWITCH_KW => "switch",
            CASE_KW => "case",
            DEFAULT_KW => "default",
            BREAK_KW => "break",
            CONTINUE_KW => "continue",
            RETURN_KW => "return",
            GOTO_KW => "goto",
            TRY_KW => "try",
            CATCH_KW => "catch",
            FINALLY_KW => "finally",
            THROW_KW => "throw",
            NEW_KW => "new",
            THIS_KW => "this",
            BASE_KW => "base",
            NULL_KW => "null",
            TRUE_KW => "true",
            FALSE_KW => "false",
            TYPEOF_KW => "typeof",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable name for diagnostics, e.g. `` `;` `` or `identifier`.
    pub fn describe(self) -> String {
        match self {
            IDENT => "identifier".to_owned(),
            INT_LITERAL | REAL_LITERAL => "number".to_owned(),
            STRING_LITERAL => "string literal".to_owned(),
            CHAR_LITERAL => "character literal".to_owned(),
            EOF => "end of file".to_owned(),
            _ => match self.fixed_text() {
                Some(text) => format!("`{text}`"),
                None => format!("{self:?}"),
            },
        }
    }
}
