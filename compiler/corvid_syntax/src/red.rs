//! Positioned views over a green tree.
//!
//! A view pairs a borrowed green element with its absolute offset (the start
//! of its full span, leading trivia included). Views are `Copy` and carry no
//! parent pointer; code that needs context registers on the enclosing node.

use corvid_ir::Span;

use crate::green::{GreenElement, GreenNode, GreenToken, Trivia};
use crate::SyntaxKind;

#[derive(Copy, Clone, Debug)]
pub struct SyntaxNode<'a> {
    green: &'a GreenNode,
    offset: u32,
}

impl<'a> SyntaxNode<'a> {
    /// View of a tree root at offset 0.
    pub fn new_root(green: &'a GreenNode) -> Self {
        SyntaxNode { green, offset: 0 }
    }

    pub fn new(green: &'a GreenNode, offset: u32) -> Self {
        SyntaxNode { green, offset }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &'a GreenNode {
        self.green
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn full_span(&self) -> Span {
        Span::at(self.offset, self.green.full_width())
    }

    /// Span without the outer leading and trailing trivia.
    pub fn span(&self) -> Span {
        let start = self.offset + self.green.leading_trivia_width();
        Span::at(start, self.green.width())
    }

    /// Children in document order with their absolute offsets.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxElement<'a>> + 'a {
        let mut offset = self.offset;
        let offsets: Vec<u32> = self
            .green
            .children()
            .iter()
            .map(|child| {
                let start = offset;
                offset += child.full_width();
                start
            })
            .collect();
        self.green
            .children()
            .iter()
            .zip(offsets)
            .map(|(child, offset)| SyntaxElement::new(child, offset))
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.children().filter_map(SyntaxElement::into_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.children().filter_map(SyntaxElement::into_token)
    }

    /// First direct child token of `kind`.
    pub fn child_token(&self, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
        self.child_tokens().find(|t| t.kind() == kind)
    }

    /// First direct child node of `kind`.
    pub fn child_node(&self, kind: SyntaxKind) -> Option<SyntaxNode<'a>> {
        self.child_nodes().find(|n| n.kind() == kind)
    }

    /// All tokens below this node in document order.
    pub fn descendant_tokens(&self) -> Vec<SyntaxToken<'a>> {
        let mut tokens = Vec::new();
        let mut stack: Vec<SyntaxElement<'a>> = self.children().rev().collect();
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => tokens.push(token),
                SyntaxElement::Node(node) => stack.extend(node.children().rev()),
            }
        }
        tokens
    }

    /// Token whose full span contains `offset`. At a boundary the token to
    /// the right wins; at the end of the text the last token is returned.
    pub fn token_at_offset(&self, offset: u32) -> Option<SyntaxToken<'a>> {
        let mut current = *self;
        loop {
            let mut next = None;
            for child in current.children() {
                let span = child.full_span();
                if span.contains(offset) || (span.end == offset && span.end == self.full_span().end)
                {
                    next = Some(child);
                    break;
                }
            }
            match next? {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => current = node,
            }
        }
    }

    pub fn text(&self) -> String {
        self.green.text()
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SyntaxToken<'a> {
    green: &'a GreenToken,
    offset: u32,
}

impl<'a> SyntaxToken<'a> {
    pub fn new(green: &'a GreenToken, offset: u32) -> Self {
        SyntaxToken { green, offset }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &'a GreenToken {
        self.green
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.green.text()
    }

    pub fn full_span(&self) -> Span {
        Span::at(self.offset, self.green.full_width())
    }

    /// Span of the token text alone.
    pub fn span(&self) -> Span {
        Span::at(self.offset + self.green.leading_width(), self.green.width())
    }

    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn leading_trivia(&self) -> impl Iterator<Item = SyntaxTrivia<'a>> + 'a {
        trivia_views(self.green.leading_trivia(), self.offset)
    }

    pub fn trailing_trivia(&self) -> impl Iterator<Item = SyntaxTrivia<'a>> + 'a {
        trivia_views(self.green.trailing_trivia(), self.span().end)
    }
}

fn trivia_views(pieces: &[Trivia], start: u32) -> impl Iterator<Item = SyntaxTrivia<'_>> {
    let mut offset = start;
    pieces.iter().map(move |trivia| {
        let view = SyntaxTrivia { trivia, offset };
        offset += trivia.width();
        view
    })
}

#[derive(Copy, Clone, Debug)]
pub struct SyntaxTrivia<'a> {
    trivia: &'a Trivia,
    offset: u32,
}

impl<'a> SyntaxTrivia<'a> {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.trivia.kind()
    }

    pub fn span(&self) -> Span {
        Span::at(self.offset, self.trivia.width())
    }

    pub fn green(&self) -> &'a Trivia {
        self.trivia
    }

    /// The directive node of structured trivia, positioned in the document.
    pub fn structure(&self) -> Option<SyntaxNode<'a>> {
        self.trivia
            .structure()
            .map(|node| SyntaxNode::new(node, self.offset))
    }

    pub fn text(&self) -> String {
        self.trivia.text()
    }
}

#[derive(Copy, Clone, Debug)]
pub enum SyntaxElement<'a> {
    Node(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

impl<'a> SyntaxElement<'a> {
    pub fn new(green: &'a GreenElement, offset: u32) -> Self {
        match green {
            GreenElement::Node(node) => SyntaxElement::Node(SyntaxNode::new(node, offset)),
            GreenElement::Token(token) => SyntaxElement::Token(SyntaxToken::new(token, offset)),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn full_span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.full_span(),
            SyntaxElement::Token(token) => token.full_span(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode<'a>> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken<'a>> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TreeBuilder;

    /// `  x = 1;\n`
    fn statement() -> GreenNode {
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::EXPR_STMT);
        builder.start_node(SyntaxKind::ASSIGN_EXPR);
        builder.token(SyntaxKind::IDENT, "x", &[Trivia::whitespace("  ")], &[Trivia::whitespace(" ")]);
        builder.token(SyntaxKind::EQ, "=", &[], &[Trivia::whitespace(" ")]);
        builder.token(SyntaxKind::INT_LITERAL, "1", &[], &[]);
        builder.finish_node();
        builder.token(SyntaxKind::SEMICOLON, ";", &[], &[Trivia::newline("\n")]);
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn offsets_accumulate_across_children() {
        let green = statement();
        let root = SyntaxNode::new_root(&green);
        assert_eq!(root.full_span(), Span::new(0, 9));
        assert_eq!(root.span(), Span::new(2, 8));

        let tokens = root.descendant_tokens();
        let spans: Vec<Span> = tokens.iter().map(SyntaxToken::span).collect();
        assert_eq!(
            spans,
            vec![Span::new(2, 3), Span::new(4, 5), Span::new(6, 7), Span::new(7, 8)]
        );
    }

    #[test]
    fn trivia_views_are_positioned() {
        let green = statement();
        let root = SyntaxNode::new_root(&green);
        let semi = root.child_token(SyntaxKind::SEMICOLON);
        let trailing: Vec<Span> = semi
            .iter()
            .flat_map(SyntaxToken::trailing_trivia)
            .map(|t| t.span())
            .collect();
        assert_eq!(trailing, vec![Span::new(8, 9)]);

        let first = root.descendant_tokens()[0];
        let leading: Vec<Span> = first.leading_trivia().map(|t| t.span()).collect();
        assert_eq!(leading, vec![Span::new(0, 2)]);
    }

    #[test]
    fn token_at_offset_prefers_right_token() {
        let green = statement();
        let root = SyntaxNode::new_root(&green);
        let kind_at = |offset| root.token_at_offset(offset).map(|t| t.kind());
        assert_eq!(kind_at(0), Some(SyntaxKind::IDENT));
        assert_eq!(kind_at(4), Some(SyntaxKind::EQ));
        assert_eq!(kind_at(7), Some(SyntaxKind::SEMICOLON));
        assert_eq!(kind_at(9), Some(SyntaxKind::SEMICOLON));
        assert_eq!(kind_at(10), None);
    }
}
