//! Recursive-descent parser producing green trees.
//!
//! The parser never fails. Missing tokens are inserted as zero-width tokens,
//! tokens that fit nowhere are wrapped in `ERROR` nodes, and every problem is
//! recorded as a diagnostic. The resulting tree always spells out the source
//! text exactly.
//!
//! # Module Structure
//!
//! - `mod.rs`: token cursor, tree building and error helpers
//! - `items.rs`: compilation unit, usings, classes and members
//! - `statements.rs`: statements and blocks
//! - `expressions.rs`: precedence climbing over expressions
//! - `types.rs`: type syntax
//! - `token_set.rs`: token bitsets for lookahead and recovery

mod expressions;
mod items;
mod statements;
pub(crate) mod token_set;
mod types;

use corvid_diagnostic::{expected_token, unexpected_token, Diagnostic};
use corvid_ir::Span;
use corvid_syntax::{Checkpoint, GreenNode, GreenToken, SyntaxKind, TreeBuilder};

use crate::lexer::LexedToken;
use token_set::TokenSet;

pub(crate) struct Parser<'t, 'src> {
    tokens: &'t [LexedToken<'src>],
    pos: usize,
    builder: TreeBuilder,
    errors: Vec<Diagnostic>,
    /// Offset of the last reported error, to avoid cascades at one position.
    last_error_at: Option<u32>,
}

impl<'t, 'src> Parser<'t, 'src> {
    pub(crate) fn new(tokens: &'t [LexedToken<'src>]) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == SyntaxKind::EOF),
            "token stream must end with EOF"
        );
        Parser {
            tokens,
            pos: 0,
            builder: TreeBuilder::new(),
            errors: Vec::new(),
            last_error_at: None,
        }
    }

    pub(crate) fn finish(self) -> (GreenNode, Vec<Diagnostic>) {
        (self.builder.finish(), self.errors)
    }

    // Cursor

    /// Kind of the token `n` ahead of the current one; `EOF` past the end.
    fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map_or(SyntaxKind::EOF, |t| t.kind)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    fn at_end(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(Span::DUMMY, |t| t.span)
    }

    fn position(&self) -> usize {
        self.pos
    }

    /// Move the current token into the tree. `EOF` is only consumed by
    /// [`Parser::bump_eof`].
    fn bump(&mut self) {
        let tokens = self.tokens;
        let Some(token) = tokens.get(self.pos) else {
            return;
        };
        if token.kind == SyntaxKind::EOF {
            return;
        }
        self.push_token(token);
        self.pos += 1;
    }

    fn bump_eof(&mut self) {
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            debug_assert_eq!(token.kind, SyntaxKind::EOF);
            self.push_token(token);
            self.pos += 1;
        }
    }

    fn push_token(&mut self, token: &LexedToken<'_>) {
        self.builder.token(token.kind, token.text, &token.leading, &token.trailing);
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, or insert it as a missing token and report.
    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_expected(&kind.describe());
        self.builder.push(GreenToken::missing(kind));
        false
    }

    // Tree building

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind);
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind);
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn missing(&mut self, kind: SyntaxKind) {
        self.builder.push(GreenToken::missing(kind));
    }

    // Errors

    fn report(&mut self, diagnostic: Diagnostic) {
        let at = self.current_span().start;
        if self.last_error_at == Some(at) {
            return;
        }
        self.last_error_at = Some(at);
        self.errors.push(diagnostic);
    }

    fn error_expected(&mut self, expected: &str) {
        let span = self.current_span();
        let found = self.current().describe();
        self.report(expected_token(span, expected, &found));
    }

    /// Report the current token and wrap it in an `ERROR` node, unless it is
    /// in `recovery` (or is `EOF`), in which case nothing is consumed.
    fn error_recover(&mut self, recovery: TokenSet) {
        let span = self.current_span();
        let found = self.current().describe();
        self.report(unexpected_token(span, &found));
        if self.at_end() || self.at_set(recovery) {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    // Lookahead

    /// Index just past a type starting `offset` tokens ahead, if one starts
    /// there. Types are predefined keywords or dotted names, followed by any
    /// number of `[]`.
    fn scan_type(&self, offset: usize) -> Option<usize> {
        let mut n = offset;
        let first = self.nth(n);
        if token_set::PREDEFINED_TYPES.contains(first) {
            n += 1;
        } else if first == SyntaxKind::IDENT {
            n += 1;
            while self.nth(n) == SyntaxKind::DOT && self.nth(n + 1) == SyntaxKind::IDENT {
                n += 2;
            }
        } else {
            return None;
        }
        while self.nth(n) == SyntaxKind::L_BRACKET && self.nth(n + 1) == SyntaxKind::R_BRACKET {
            n += 2;
        }
        Some(n)
    }

    /// A type followed by a name: a declaration rather than an expression.
    fn at_declaration(&self) -> bool {
        self.scan_type(0)
            .is_some_and(|end| self.nth(end) == SyntaxKind::IDENT)
    }
}
