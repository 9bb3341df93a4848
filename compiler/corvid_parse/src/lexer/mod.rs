//! Lexer built on logos.
//!
//! Produces the token stream the parser consumes. Every byte of the source
//! ends up in exactly one token or trivia piece:
//!
//! - a token's *trailing* trivia runs up to and including the first newline
//!   after it;
//! - everything else between two tokens is the *leading* trivia of the second;
//! - trivia after the last token belongs to the `EOF` token.
//!
//! Preprocessor directives become structured trivia (see [`directive`]).

mod directive;

use corvid_diagnostic::{Diagnostic, ErrorCode};
use corvid_ir::Span;
use corvid_syntax::{SyntaxKind, Trivia};
use logos::Logos;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Closure {
    Closed,
    Unclosed,
}

/// Raw token from logos, before trivia is attached.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[regex(r"[ \t\r\f]+")]
    Whitespace,
    #[token("\n")]
    Newline,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment(Closure),
    #[regex(r"#[^\n]*")]
    Directive,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+[lL]?")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[dD]?")]
    Real,
    #[token("\"", |lex| quoted(lex, '"'))]
    Str(Closure),
    #[token("'", |lex| quoted(lex, '\''))]
    Char(Closure),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,

    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
}

fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> Closure {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Closure::Closed
        }
        None => {
            lex.bump(lex.remainder().len());
            Closure::Unclosed
        }
    }
}

/// Scan a quoted literal up to its closing quote or the end of the line.
fn quoted(lex: &mut logos::Lexer<'_, RawToken>, quote: char) -> Closure {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next_if(|&(_, next)| next != '\n');
            }
            '\n' => {
                lex.bump(i);
                return Closure::Unclosed;
            }
            c if c == quote => {
                lex.bump(i + 1);
                return Closure::Closed;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Closure::Unclosed
}

impl RawToken {
    fn syntax_kind(self, text: &str) -> SyntaxKind {
        match self {
            RawToken::Whitespace => SyntaxKind::WHITESPACE,
            RawToken::Newline => SyntaxKind::NEWLINE,
            RawToken::LineComment => SyntaxKind::LINE_COMMENT,
            RawToken::BlockComment(_) => SyntaxKind::BLOCK_COMMENT,
            RawToken::Directive => SyntaxKind::DIRECTIVE_TRIVIA,
            RawToken::Ident => SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::IDENT),
            RawToken::Int => SyntaxKind::INT_LITERAL,
            RawToken::Real => SyntaxKind::REAL_LITERAL,
            RawToken::Str(_) => SyntaxKind::STRING_LITERAL,
            RawToken::Char(_) => SyntaxKind::CHAR_LITERAL,
            RawToken::LBrace => SyntaxKind::L_BRACE,
            RawToken::RBrace => SyntaxKind::R_BRACE,
            RawToken::LParen => SyntaxKind::L_PAREN,
            RawToken::RParen => SyntaxKind::R_PAREN,
            RawToken::LBracket => SyntaxKind::L_BRACKET,
            RawToken::RBracket => SyntaxKind::R_BRACKET,
            RawToken::Semicolon => SyntaxKind::SEMICOLON,
            RawToken::Comma => SyntaxKind::COMMA,
            RawToken::Dot => SyntaxKind::DOT,
            RawToken::Colon => SyntaxKind::COLON,
            RawToken::Question => SyntaxKind::QUESTION,
            RawToken::Eq => SyntaxKind::EQ,
            RawToken::EqEq => SyntaxKind::EQ2,
            RawToken::NotEq => SyntaxKind::NEQ,
            RawToken::Lt => SyntaxKind::LT,
            RawToken::LtEq => SyntaxKind::LT_EQ,
            RawToken::Gt => SyntaxKind::GT,
            RawToken::GtEq => SyntaxKind::GT_EQ,
            RawToken::Plus => SyntaxKind::PLUS,
            RawToken::Minus => SyntaxKind::MINUS,
            RawToken::Star => SyntaxKind::STAR,
            RawToken::Slash => SyntaxKind::SLASH,
            RawToken::Percent => SyntaxKind::PERCENT,
            RawToken::Bang => SyntaxKind::BANG,
            RawToken::Tilde => SyntaxKind::TILDE,
            RawToken::Amp => SyntaxKind::AMP,
            RawToken::Pipe => SyntaxKind::PIPE,
            RawToken::Caret => SyntaxKind::CARET,
            RawToken::AmpAmp => SyntaxKind::AMP2,
            RawToken::PipePipe => SyntaxKind::PIPE2,
            RawToken::PlusEq => SyntaxKind::PLUS_EQ,
            RawToken::MinusEq => SyntaxKind::MINUS_EQ,
            RawToken::PlusPlus => SyntaxKind::PLUS2,
            RawToken::MinusMinus => SyntaxKind::MINUS2,
        }
    }
}

/// A token with its trivia, ready to become a green token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexedToken<'src> {
    pub kind: SyntaxKind,
    pub text: &'src str,
    /// Span of `text`, trivia excluded.
    pub span: Span,
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
}

/// Output of [`lex`]. The last token is always `EOF`.
#[derive(Clone, Debug, Default)]
pub struct LexOutput<'src> {
    pub tokens: Vec<LexedToken<'src>>,
    pub errors: Vec<Diagnostic>,
}

impl LexOutput<'_> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "source files are limited to u32 offsets"
)]
fn span_of(range: std::ops::Range<usize>) -> Span {
    Span::new(range.start as u32, range.end as u32)
}

/// Lex `source` into tokens with attached trivia.
pub fn lex(source: &str) -> LexOutput<'_> {
    let mut output = LexOutput::default();
    let mut leading: Vec<Trivia> = Vec::new();
    // Whether the last token still accepts trailing trivia.
    let mut trailing_open = false;

    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let span = span_of(lexer.span());
        let text = lexer.slice();

        let kind = match result {
            Ok(raw) => {
                report_unclosed(raw, span, &mut output.errors);
                raw.syntax_kind(text)
            }
            Err(()) => SyntaxKind::UNKNOWN,
        };

        if kind.is_trivia() {
            let trivia = if kind == SyntaxKind::DIRECTIVE_TRIVIA {
                directive::directive_trivia(text, span, &mut output.errors)
            } else {
                Trivia::new(kind, text)
            };
            match output.tokens.last_mut() {
                Some(last) if trailing_open && kind != SyntaxKind::DIRECTIVE_TRIVIA => {
                    last.trailing.push(trivia);
                    trailing_open = kind != SyntaxKind::NEWLINE;
                }
                _ => {
                    trailing_open = false;
                    leading.push(trivia);
                }
            }
            continue;
        }

        output.tokens.push(LexedToken {
            kind,
            text,
            span,
            leading: std::mem::take(&mut leading),
            trailing: Vec::new(),
        });
        trailing_open = true;
    }

    output.tokens.push(LexedToken {
        kind: SyntaxKind::EOF,
        text: "",
        span: span_of(source.len()..source.len()),
        leading,
        trailing: Vec::new(),
    });
    tracing::trace!(tokens = output.tokens.len(), errors = output.errors.len(), "lexed");
    output
}

fn report_unclosed(raw: RawToken, span: Span, errors: &mut Vec<Diagnostic>) {
    let (code, what) = match raw {
        RawToken::BlockComment(Closure::Unclosed) => (ErrorCode::E1004, "block comment"),
        RawToken::Str(Closure::Unclosed) => (ErrorCode::E1005, "string literal"),
        RawToken::Char(Closure::Unclosed) => (ErrorCode::E1006, "character literal"),
        _ => return,
    };
    errors.push(
        Diagnostic::error(code)
            .with_message(format!("unterminated {what}"))
            .with_label(span, format!("{what} starts here")),
    );
}
