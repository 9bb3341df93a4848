use std::fmt;

use super::{text_width, GreenNode};
use crate::SyntaxKind;

#[derive(Clone, PartialEq, Eq, Hash)]
enum TriviaRepr {
    Text(Box<str>),
    Structured(GreenNode),
}

/// A piece of trivia: whitespace, a comment, or a structured directive.
///
/// Structured trivia wraps a node (e.g. `#region Setup`) whose tokens can be
/// classified like any other tokens.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Trivia {
    kind: SyntaxKind,
    repr: TriviaRepr,
}

impl Trivia {
    pub fn new(kind: SyntaxKind, text: &str) -> Self {
        debug_assert!(kind.is_trivia() && kind != SyntaxKind::DIRECTIVE_TRIVIA);
        Trivia {
            kind,
            repr: TriviaRepr::Text(text.into()),
        }
    }

    pub fn whitespace(text: &str) -> Self {
        Self::new(SyntaxKind::WHITESPACE, text)
    }

    pub fn newline(text: &str) -> Self {
        Self::new(SyntaxKind::NEWLINE, text)
    }

    pub fn structured(node: GreenNode) -> Self {
        debug_assert!(node.kind().is_directive());
        Trivia {
            kind: SyntaxKind::DIRECTIVE_TRIVIA,
            repr: TriviaRepr::Structured(node),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        match &self.repr {
            TriviaRepr::Text(text) => text_width(text),
            TriviaRepr::Structured(node) => node.full_width(),
        }
    }

    pub fn structure(&self) -> Option<&GreenNode> {
        match &self.repr {
            TriviaRepr::Text(_) => None,
            TriviaRepr::Structured(node) => Some(node),
        }
    }

    pub fn has_structure(&self) -> bool {
        matches!(self.repr, TriviaRepr::Structured(_))
    }

    pub fn write_text(&self, out: &mut String) {
        match &self.repr {
            TriviaRepr::Text(text) => out.push_str(text),
            TriviaRepr::Structured(node) => node.write_full_text(out),
        }
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

impl fmt::Debug for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            TriviaRepr::Text(text) => write!(f, "{:?} {:?}", self.kind, text),
            TriviaRepr::Structured(node) => write!(f, "{:?} {node:?}", self.kind),
        }
    }
}
