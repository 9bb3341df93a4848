//! Expressions, by precedence climbing.
//!
//! From loosest to tightest: assignment (right associative), conditional
//! `?:`, the binary operators of [`binary_precedence`], prefix operators,
//! then postfix member access, calls, indexing and `++`/`--`.

use corvid_diagnostic::{Diagnostic, ErrorCode};
use corvid_stack::ensure_sufficient_stack;
use corvid_syntax::SyntaxKind;

use super::token_set::{LITERALS, PREDEFINED_TYPES, PREFIX_OPS};
use super::Parser;

/// Binding strength of a binary operator; higher binds tighter.
fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    let precedence = match kind {
        SyntaxKind::PIPE2 => 1,
        SyntaxKind::AMP2 => 2,
        SyntaxKind::PIPE => 3,
        SyntaxKind::CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ2 | SyntaxKind::NEQ => 6,
        SyntaxKind::LT | SyntaxKind::LT_EQ | SyntaxKind::GT | SyntaxKind::GT_EQ => 7,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 8,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 9,
        _ => return None,
    };
    Some(precedence)
}

fn is_assignment_op(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::EQ | SyntaxKind::PLUS_EQ | SyntaxKind::MINUS_EQ)
}

impl Parser<'_, '_> {
    /// Parse an expression.
    ///
    /// Uses `ensure_sufficient_stack` to survive deeply nested input.
    pub(super) fn parse_expr(&mut self) {
        ensure_sufficient_stack(|| self.parse_assignment());
    }

    fn parse_assignment(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_conditional();
        if is_assignment_op(self.current()) {
            self.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
            self.bump();
            self.parse_expr();
            self.finish_node();
        }
    }

    fn parse_conditional(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(1);
        if self.at(SyntaxKind::QUESTION) {
            self.start_node_at(checkpoint, SyntaxKind::CONDITIONAL_EXPR);
            self.bump();
            self.parse_expr();
            self.expect(SyntaxKind::COLON);
            self.parse_expr();
            self.finish_node();
        }
    }

    fn parse_binary(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_prefix();
        while let Some(precedence) = binary_precedence(self.current()) {
            if precedence < min_precedence {
                break;
            }
            self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
            self.bump();
            self.parse_binary(precedence + 1);
            self.finish_node();
        }
    }

    fn parse_prefix(&mut self) {
        if self.at_set(PREFIX_OPS) {
            self.start_node(SyntaxKind::PREFIX_EXPR);
            self.bump();
            ensure_sufficient_stack(|| self.parse_prefix());
            self.finish_node();
        } else {
            self.parse_postfix();
        }
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();
        loop {
            match self.current() {
                SyntaxKind::DOT => {
                    self.start_node_at(checkpoint, SyntaxKind::MEMBER_ACCESS_EXPR);
                    self.bump();
                    self.expect(SyntaxKind::IDENT);
                }
                SyntaxKind::L_PAREN => {
                    self.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                    self.parse_arg_list();
                }
                SyntaxKind::L_BRACKET => {
                    self.start_node_at(checkpoint, SyntaxKind::ELEMENT_ACCESS_EXPR);
                    self.bump();
                    self.parse_expr();
                    while self.eat(SyntaxKind::COMMA) {
                        self.parse_expr();
                    }
                    self.expect(SyntaxKind::R_BRACKET);
                }
                SyntaxKind::PLUS2 | SyntaxKind::MINUS2 => {
                    self.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                    self.bump();
                }
                _ => break,
            }
            self.finish_node();
        }
    }

    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            self.parse_expr();
            while self.eat(SyntaxKind::COMMA) {
                self.parse_expr();
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    fn parse_primary(&mut self) {
        let kind = self.current();
        if LITERALS.contains(kind) {
            self.start_node(SyntaxKind::LITERAL_EXPR);
            self.bump();
            self.finish_node();
            return;
        }
        match kind {
            SyntaxKind::IDENT => {
                self.start_node(SyntaxKind::NAME_EXPR);
                self.bump();
                self.finish_node();
            }
            // `int.MaxValue`, `string.Empty`
            _ if PREDEFINED_TYPES.contains(kind) => {
                self.start_node(SyntaxKind::NAME_EXPR);
                self.parse_element_type();
                self.finish_node();
            }
            SyntaxKind::THIS_KW => {
                self.start_node(SyntaxKind::THIS_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::BASE_KW => {
                self.start_node(SyntaxKind::BASE_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::NEW_KW => self.parse_new(),
            SyntaxKind::TYPEOF_KW => {
                self.start_node(SyntaxKind::TYPEOF_EXPR);
                self.bump();
                self.expect(SyntaxKind::L_PAREN);
                self.parse_type();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            _ => {
                let span = self.current_span();
                let found = kind.describe();
                self.report(
                    Diagnostic::error(ErrorCode::E1003)
                        .with_message(format!("expected expression, found {found}"))
                        .with_label(span, "expected expression"),
                );
                self.start_node(SyntaxKind::NAME_EXPR);
                self.missing(SyntaxKind::IDENT);
                self.finish_node();
            }
        }
    }

    /// `new T(args)`, `new T[n]`, `new T[] { a, b }`
    fn parse_new(&mut self) {
        self.start_node(SyntaxKind::NEW_EXPR);
        self.bump();
        self.parse_element_type();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_arg_list();
        } else if self.eat(SyntaxKind::L_BRACKET) {
            if !self.at(SyntaxKind::R_BRACKET) {
                self.parse_expr();
            }
            self.expect(SyntaxKind::R_BRACKET);
            if self.eat(SyntaxKind::L_BRACE) {
                if !self.at(SyntaxKind::R_BRACE) {
                    self.parse_expr();
                    while self.eat(SyntaxKind::COMMA) {
                        if self.at(SyntaxKind::R_BRACE) {
                            break;
                        }
                        self.parse_expr();
                    }
                }
                self.expect(SyntaxKind::R_BRACE);
            }
        } else {
            self.error_expected("`(` or `[`");
            self.missing(SyntaxKind::L_PAREN);
        }
        self.finish_node();
    }
}
