//! Statements and blocks.

use corvid_stack::ensure_sufficient_stack;
use corvid_syntax::SyntaxKind;

use super::token_set::{TokenSet, EXPR_START, STMT_RECOVERY};
use super::Parser;

impl Parser<'_, '_> {
    /// Parse one statement.
    ///
    /// Statements nest through blocks and control flow, so each level runs
    /// under `ensure_sufficient_stack`.
    pub(super) fn parse_statement(&mut self) {
        ensure_sufficient_stack(|| self.parse_statement_inner());
    }

    fn parse_statement_inner(&mut self) {
        match self.current() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::SEMICOLON => self.single_token_statement(SyntaxKind::EMPTY_STMT),
            SyntaxKind::IF_KW => self.parse_if(),
            SyntaxKind::WHILE_KW => self.parse_while(),
            SyntaxKind::DO_KW => self.parse_do(),
            SyntaxKind::FOR_KW => self.parse_for(),
            SyntaxKind::SWITCH_KW => self.parse_switch(),
            SyntaxKind::BREAK_KW => self.keyword_statement(SyntaxKind::BREAK_STMT),
            SyntaxKind::CONTINUE_KW => self.keyword_statement(SyntaxKind::CONTINUE_STMT),
            SyntaxKind::RETURN_KW => self.parse_return_like(SyntaxKind::RETURN_STMT),
            SyntaxKind::THROW_KW => self.parse_return_like(SyntaxKind::THROW_STMT),
            SyntaxKind::GOTO_KW => self.parse_goto(),
            SyntaxKind::TRY_KW => self.parse_try(),
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::COLON => self.parse_labeled(),
            SyntaxKind::CONST_KW => self.parse_local_declaration(),
            _ if self.at_declaration() => self.parse_local_declaration(),
            _ if self.at_set(EXPR_START) => {
                self.start_node(SyntaxKind::EXPR_STMT);
                self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            _ => self.error_recover(STMT_RECOVERY),
        }
    }

    pub(super) fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.expect(SyntaxKind::L_BRACE);
        self.parse_statements_until(|p| p.at(SyntaxKind::R_BRACE));
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Parse statements until `stop` holds or the input ends, always making
    /// progress.
    fn parse_statements_until(&mut self, stop: impl Fn(&Self) -> bool) {
        while !self.at_end() && !stop(self) {
            let before = self.position();
            self.parse_statement();
            if self.position() == before {
                if self.at(SyntaxKind::R_BRACE) {
                    break;
                }
                self.start_node(SyntaxKind::ERROR);
                self.bump();
                self.finish_node();
            }
        }
    }

    fn single_token_statement(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// `break;` and `continue;`
    fn keyword_statement(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// `return [expr];` and `throw [expr];`
    fn parse_return_like(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        if !self.at(SyntaxKind::SEMICOLON) && self.at_set(EXPR_START) {
            self.parse_expr();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// `goto label;`, `goto case expr;`, `goto default;`
    fn parse_goto(&mut self) {
        self.start_node(SyntaxKind::GOTO_STMT);
        self.bump();
        if self.eat(SyntaxKind::CASE_KW) {
            self.parse_expr();
        } else if !self.eat(SyntaxKind::DEFAULT_KW) {
            self.expect(SyntaxKind::IDENT);
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_labeled(&mut self) {
        self.start_node(SyntaxKind::LABELED_STMT);
        self.bump();
        self.bump();
        if self.at(SyntaxKind::R_BRACE) || self.at_end() {
            self.error_expected("statement");
            self.missing(SyntaxKind::SEMICOLON);
        } else {
            self.parse_statement();
        }
        self.finish_node();
    }

    fn parse_local_declaration(&mut self) {
        self.start_node(SyntaxKind::LOCAL_DECL_STMT);
        self.eat(SyntaxKind::CONST_KW);
        self.parse_type();
        self.parse_declarators();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_parenthesized_condition(&mut self) {
        self.expect(SyntaxKind::L_PAREN);
        self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
    }

    fn parse_embedded_statement(&mut self) {
        if self.at(SyntaxKind::R_BRACE) || self.at_end() {
            self.error_expected("statement");
            self.start_node(SyntaxKind::EMPTY_STMT);
            self.missing(SyntaxKind::SEMICOLON);
            self.finish_node();
        } else {
            self.parse_statement();
        }
    }

    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IF_STMT);
        self.bump();
        self.parse_parenthesized_condition();
        self.parse_embedded_statement();
        if self.at(SyntaxKind::ELSE_KW) {
            self.start_node(SyntaxKind::ELSE_CLAUSE);
            self.bump();
            self.parse_embedded_statement();
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_while(&mut self) {
        self.start_node(SyntaxKind::WHILE_STMT);
        self.bump();
        self.parse_parenthesized_condition();
        self.parse_embedded_statement();
        self.finish_node();
    }

    fn parse_do(&mut self) {
        self.start_node(SyntaxKind::DO_STMT);
        self.bump();
        self.parse_embedded_statement();
        self.expect(SyntaxKind::WHILE_KW);
        self.parse_parenthesized_condition();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// `for (init; condition; increments) body`; every clause may be empty.
    fn parse_for(&mut self) {
        self.start_node(SyntaxKind::FOR_STMT);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);

        if self.at_declaration() {
            self.start_node(SyntaxKind::LOCAL_DECL_STMT);
            self.parse_type();
            self.parse_declarators();
            self.finish_node();
        } else if !self.at(SyntaxKind::SEMICOLON) {
            self.parse_expr_list();
        }
        self.expect(SyntaxKind::SEMICOLON);

        if !self.at(SyntaxKind::SEMICOLON) {
            self.parse_expr();
        }
        self.expect(SyntaxKind::SEMICOLON);

        if !self.at(SyntaxKind::R_PAREN) {
            self.parse_expr_list();
        }
        self.expect(SyntaxKind::R_PAREN);
        self.parse_embedded_statement();
        self.finish_node();
    }

    fn parse_expr_list(&mut self) {
        self.parse_expr();
        while self.eat(SyntaxKind::COMMA) {
            self.parse_expr();
        }
    }

    fn parse_switch(&mut self) {
        self.start_node(SyntaxKind::SWITCH_STMT);
        self.bump();
        self.parse_parenthesized_condition();
        self.expect(SyntaxKind::L_BRACE);
        while !self.at(SyntaxKind::R_BRACE) && !self.at_end() {
            if self.at(SyntaxKind::CASE_KW) || self.at(SyntaxKind::DEFAULT_KW) {
                self.parse_switch_section();
            } else {
                self.error_recover(TokenSet::EMPTY);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_switch_section(&mut self) {
        self.start_node(SyntaxKind::SWITCH_SECTION);
        while self.at(SyntaxKind::CASE_KW) || self.at(SyntaxKind::DEFAULT_KW) {
            if self.at(SyntaxKind::CASE_KW) {
                self.start_node(SyntaxKind::CASE_LABEL);
                self.bump();
                self.parse_expr();
            } else {
                self.start_node(SyntaxKind::DEFAULT_LABEL);
                self.bump();
            }
            self.expect(SyntaxKind::COLON);
            self.finish_node();
        }
        self.parse_statements_until(|p| {
            p.at(SyntaxKind::CASE_KW) || p.at(SyntaxKind::DEFAULT_KW) || p.at(SyntaxKind::R_BRACE)
        });
        self.finish_node();
    }

    fn parse_try(&mut self) {
        self.start_node(SyntaxKind::TRY_STMT);
        self.bump();
        self.parse_block();
        let mut handlers = 0;
        while self.at(SyntaxKind::CATCH_KW) {
            self.start_node(SyntaxKind::CATCH_CLAUSE);
            self.bump();
            if self.eat(SyntaxKind::L_PAREN) {
                self.parse_type();
                self.eat(SyntaxKind::IDENT);
                self.expect(SyntaxKind::R_PAREN);
            }
            self.parse_block();
            self.finish_node();
            handlers += 1;
        }
        if self.at(SyntaxKind::FINALLY_KW) {
            self.start_node(SyntaxKind::FINALLY_CLAUSE);
            self.bump();
            self.parse_block();
            self.finish_node();
            handlers += 1;
        }
        if handlers == 0 {
            self.error_expected("`catch` or `finally`");
        }
        self.finish_node();
    }
}
