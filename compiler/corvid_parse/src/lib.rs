//! Corvid parser.
//!
//! [`parse`] turns source text into a green tree plus diagnostics. It never
//! fails: malformed input yields `ERROR` nodes and zero-width missing tokens,
//! and the tree's text is always exactly the input.
//!
//! [`reparse`] parses an edited document and reuses every member and
//! statement subtree of the previous tree whose text did not change, so that
//! [`corvid_syntax::compute_change_range`] sees them as incrementally
//! identical.

mod incremental;
pub mod lexer;
mod parser;

use corvid_diagnostic::Diagnostic;
use corvid_syntax::{GreenNode, SyntaxNode};

pub use incremental::{reparse, reparse_text};

/// Result of parsing one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<Diagnostic>,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode<'_> {
        SyntaxNode::new_root(&self.green)
    }

    /// Lexer and parser diagnostics, in source order per phase.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Diagnostic::is_error)
    }

    /// The parsed text.
    pub fn text(&self) -> String {
        self.green.text()
    }
}

/// Parse a whole document.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Parse {
    let lexed = lexer::lex(source);
    let mut parser = parser::Parser::new(&lexed.tokens);
    parser.parse_compilation_unit();
    let (green, parse_errors) = parser.finish();

    let mut errors = lexed.errors;
    errors.extend(parse_errors);
    tracing::debug!(errors = errors.len(), "parsed");
    Parse { green, errors }
}
