//! Immutable green tree.
//!
//! Green elements know their kind, text and width but not their position, so
//! an unchanged subtree can be shared between the trees of two document
//! versions. Sharing is by `Arc`: two elements are *incrementally identical*
//! when they are the same allocation, which is what
//! [`GreenElement::is_incrementally_identical`] checks. Structural equality
//! (`==`) is a separate, deeper question.

use std::fmt;
use std::sync::Arc;

use crate::SyntaxKind;

mod trivia;

pub use trivia::Trivia;

#[expect(
    clippy::cast_possible_truncation,
    reason = "source files are limited to u32 offsets"
)]
pub(crate) fn text_width(text: &str) -> u32 {
    debug_assert!(u32::try_from(text.len()).is_ok());
    text.len() as u32
}

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    leading: Box<[Trivia]>,
    trailing: Box<[Trivia]>,
    leading_width: u32,
    trailing_width: u32,
}

/// A token with its attached trivia.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken(Arc<GreenTokenData>);

impl GreenToken {
    pub fn new(kind: SyntaxKind, text: &str, leading: Vec<Trivia>, trailing: Vec<Trivia>) -> Self {
        let leading_width = leading.iter().map(Trivia::width).sum();
        let trailing_width = trailing.iter().map(Trivia::width).sum();
        GreenToken(Arc::new(GreenTokenData {
            kind,
            text: text.into(),
            leading: leading.into_boxed_slice(),
            trailing: trailing.into_boxed_slice(),
            leading_width,
            trailing_width,
        }))
    }

    /// Zero-width token inserted by error recovery.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self::new(kind, "", Vec::new(), Vec::new())
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Token text without trivia.
    #[inline]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    #[inline]
    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.0.leading
    }

    #[inline]
    pub fn trailing_trivia(&self) -> &[Trivia] {
        &self.0.trailing
    }

    #[inline]
    pub fn leading_width(&self) -> u32 {
        self.0.leading_width
    }

    #[inline]
    pub fn trailing_width(&self) -> u32 {
        self.0.trailing_width
    }

    /// Width of the token text alone.
    #[inline]
    pub fn width(&self) -> u32 {
        text_width(&self.0.text)
    }

    /// Width including leading and trailing trivia.
    #[inline]
    pub fn full_width(&self) -> u32 {
        self.0.leading_width + self.width() + self.0.trailing_width
    }

    /// Inserted by error recovery: no text, and not the end-of-file marker.
    pub fn is_missing(&self) -> bool {
        self.0.text.is_empty() && self.0.kind != SyntaxKind::EOF
    }

    #[inline]
    pub fn ptr_eq(&self, other: &GreenToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn write_full_text(&self, out: &mut String) {
        for trivia in self.leading_trivia() {
            trivia.write_text(out);
        }
        out.push_str(self.text());
        for trivia in self.trailing_trivia() {
            trivia.write_text(out);
        }
    }

    /// Copy of this token with different trivia.
    #[must_use]
    pub fn with_trivia(&self, leading: Vec<Trivia>, trailing: Vec<Trivia>) -> GreenToken {
        GreenToken::new(self.kind(), self.text(), leading, trailing)
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.kind(), self.text())
    }
}

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    full_width: u32,
    children: Box<[GreenElement]>,
}

/// An interior node. Children are in source order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        let full_width = children.iter().map(GreenElement::full_width).sum();
        GreenNode(Arc::new(GreenNodeData {
            kind,
            full_width,
            children: children.into_boxed_slice(),
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        self.0.full_width
    }

    #[inline]
    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    #[inline]
    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// First token in document order, skipping nodes without tokens.
    pub fn first_token(&self) -> Option<&GreenToken> {
        let mut stack: Vec<&GreenElement> = self.children().iter().rev().collect();
        while let Some(element) = stack.pop() {
            match element {
                GreenElement::Token(token) => return Some(token),
                GreenElement::Node(node) => stack.extend(node.children().iter().rev()),
            }
        }
        None
    }

    pub fn last_token(&self) -> Option<&GreenToken> {
        let mut stack: Vec<&GreenElement> = self.children().iter().collect();
        while let Some(element) = stack.pop() {
            match element {
                GreenElement::Token(token) => return Some(token),
                GreenElement::Node(node) => stack.extend(node.children().iter()),
            }
        }
        None
    }

    pub fn leading_trivia_width(&self) -> u32 {
        self.first_token().map_or(0, GreenToken::leading_width)
    }

    pub fn trailing_trivia_width(&self) -> u32 {
        self.last_token().map_or(0, GreenToken::trailing_width)
    }

    /// Width without the first token's leading and last token's trailing trivia.
    pub fn width(&self) -> u32 {
        self.full_width()
            .saturating_sub(self.leading_trivia_width() + self.trailing_trivia_width())
    }

    /// Full source text, trivia included.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.full_width() as usize);
        self.write_full_text(&mut out);
        out
    }

    pub fn write_full_text(&self, out: &mut String) {
        let mut stack: Vec<&GreenElement> = self.children().iter().rev().collect();
        while let Some(element) = stack.pop() {
            match element {
                GreenElement::Token(token) => token.write_full_text(out),
                GreenElement::Node(node) => stack.extend(node.children().iter().rev()),
            }
        }
    }

    /// Copy of this node with child `index` replaced.
    ///
    /// Every other child stays incrementally identical.
    #[must_use]
    pub fn replace_child(&self, index: usize, child: GreenElement) -> GreenNode {
        let mut children = self.children().to_vec();
        children[index] = child;
        GreenNode::new(self.kind(), children)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.full_width())
    }
}

/// A node or a token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(node) => node.kind(),
            GreenElement::Token(token) => token.kind(),
        }
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        match self {
            GreenElement::Node(node) => node.full_width(),
            GreenElement::Token(token) => token.full_width(),
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            GreenElement::Node(node) => Some(node),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(_) => None,
        }
    }

    /// Same underlying allocation, reused across an edit.
    #[inline]
    pub fn is_incrementally_identical(&self, other: &GreenElement) -> bool {
        match (self, other) {
            (GreenElement::Node(a), GreenElement::Node(b)) => a.ptr_eq(b),
            (GreenElement::Token(a), GreenElement::Token(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}
