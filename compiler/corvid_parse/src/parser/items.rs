//! Compilation units, using directives, classes and members.
//!
//! Besides classes, a compilation unit may hold top-level members and
//! statements, which script-style submissions execute in order.

use corvid_syntax::SyntaxKind;

use super::token_set::{TokenSet, MODIFIERS};
use super::Parser;

impl Parser<'_, '_> {
    pub(crate) fn parse_compilation_unit(&mut self) {
        self.start_node(SyntaxKind::COMPILATION_UNIT);
        while self.at(SyntaxKind::USING_KW) {
            self.parse_using();
        }
        while !self.at_end() {
            let before = self.position();
            if self.at_member_start() {
                self.parse_member();
            } else {
                self.parse_statement();
            }
            if self.position() == before {
                self.error_recover(TokenSet::EMPTY);
            }
        }
        self.bump_eof();
        self.finish_node();
    }

    fn parse_using(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);
        self.bump();
        self.expect(SyntaxKind::IDENT);
        while self.eat(SyntaxKind::DOT) {
            self.expect(SyntaxKind::IDENT);
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Whether a top-level item is a member rather than a statement.
    fn at_member_start(&self) -> bool {
        if self.at(SyntaxKind::CONST_KW) {
            return false;
        }
        self.at_set(MODIFIERS)
            || self.at(SyntaxKind::CLASS_KW)
            || self.at(SyntaxKind::STRUCT_KW)
            || self.scan_type(0).is_some_and(|end| {
                self.nth(end) == SyntaxKind::IDENT && self.nth(end + 1) == SyntaxKind::L_PAREN
            })
    }

    fn parse_member(&mut self) {
        let checkpoint = self.checkpoint();
        while self.at_set(MODIFIERS) {
            self.bump();
        }

        if self.at(SyntaxKind::CLASS_KW) || self.at(SyntaxKind::STRUCT_KW) {
            self.start_node_at(checkpoint, SyntaxKind::CLASS_DECL);
            self.parse_class_rest();
        } else if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
            self.start_node_at(checkpoint, SyntaxKind::CONSTRUCTOR_DECL);
            self.bump();
            self.parse_param_list();
            self.parse_member_body();
        } else if self.scan_type(0).is_some() {
            self.parse_type();
            if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
                self.start_node_at(checkpoint, SyntaxKind::METHOD_DECL);
                self.bump();
                self.parse_param_list();
                self.parse_member_body();
            } else {
                self.start_node_at(checkpoint, SyntaxKind::FIELD_DECL);
                self.parse_declarators();
                self.expect(SyntaxKind::SEMICOLON);
            }
        } else {
            self.start_node_at(checkpoint, SyntaxKind::ERROR);
            self.error_expected("member declaration");
            if !self.at_end() && !self.at(SyntaxKind::R_BRACE) {
                self.bump();
            }
        }
        self.finish_node();
    }

    /// After the modifiers of a class: `class Name [: Base] { members }`.
    fn parse_class_rest(&mut self) {
        self.bump();
        self.expect(SyntaxKind::IDENT);
        if self.eat(SyntaxKind::COLON) {
            self.parse_type();
        }
        self.expect(SyntaxKind::L_BRACE);
        while !self.at(SyntaxKind::R_BRACE) && !self.at_end() {
            let before = self.position();
            self.parse_member();
            if self.position() == before {
                self.error_recover(TokenSet::EMPTY);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
    }

    fn parse_member_body(&mut self) {
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.expect(SyntaxKind::SEMICOLON);
        }
    }

    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.start_node(SyntaxKind::PARAM);
                self.parse_type();
                self.expect(SyntaxKind::IDENT);
                self.finish_node();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// `a = 1, b` in field and local declarations.
    pub(super) fn parse_declarators(&mut self) {
        loop {
            self.start_node(SyntaxKind::VARIABLE_DECLARATOR);
            self.expect(SyntaxKind::IDENT);
            if self.eat(SyntaxKind::EQ) {
                self.parse_expr();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
}
