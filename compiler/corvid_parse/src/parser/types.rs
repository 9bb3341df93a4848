//! Type syntax: `int`, `System.String`, `Foo[][]`.

use corvid_syntax::SyntaxKind;

use super::token_set::PREDEFINED_TYPES;
use super::Parser;

impl Parser<'_, '_> {
    /// Parse a type, including array suffixes.
    pub(super) fn parse_type(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_element_type();
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.start_node_at(checkpoint, SyntaxKind::ARRAY_TYPE);
            self.bump();
            self.bump();
            self.finish_node();
        }
    }

    /// Parse a type without array suffixes (the element type of `new T[n]`).
    pub(super) fn parse_element_type(&mut self) {
        if self.at_set(PREDEFINED_TYPES) {
            self.start_node(SyntaxKind::PREDEFINED_TYPE);
            self.bump();
            self.finish_node();
            return;
        }

        self.start_node(SyntaxKind::NAMED_TYPE);
        if self.at(SyntaxKind::IDENT) {
            self.bump();
            while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
                self.bump();
                self.bump();
            }
        } else {
            self.error_expected("type");
            self.missing(SyntaxKind::IDENT);
        }
        self.finish_node();
    }
}
