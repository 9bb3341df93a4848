//! Bottom-up construction of green trees from parser events.

use crate::green::{GreenElement, GreenNode, GreenToken, Trivia};
use crate::SyntaxKind;

/// Position in the child buffer for wrapping already-built children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Builds a green tree from `start_node` / `token` / `finish_node` events.
///
/// A node's children are the elements pushed between its start and finish.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Start a node whose first child is the element pushed at `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        debug_assert!(
            checkpoint.0 <= self.children.len(),
            "checkpoint {} past end of buffer ({})",
            checkpoint.0,
            self.children.len()
        );
        if let Some(&(_, first_child)) = self.parents.last() {
            debug_assert!(
                checkpoint.0 >= first_child,
                "checkpoint precedes the currently open node"
            );
        }
        self.parents.push((kind, checkpoint.0));
    }

    pub fn finish_node(&mut self) {
        debug_assert!(
            !self.parents.is_empty(),
            "finish_node without matching start_node"
        );
        let Some((kind, first_child)) = self.parents.pop() else {
            return;
        };
        let children = self.children.split_off(first_child);
        self.children
            .push(GreenElement::Node(GreenNode::new(kind, children)));
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str, leading: &[Trivia], trailing: &[Trivia]) {
        let token = GreenToken::new(kind, text, leading.to_vec(), trailing.to_vec());
        self.children.push(GreenElement::Token(token));
    }

    /// Push a prebuilt token or node, e.g. one reused from a previous tree.
    pub fn push(&mut self, element: impl Into<GreenElement>) {
        self.children.push(element.into());
    }

    /// Number of currently open nodes.
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Finish the tree. A single root node is returned as is; anything else
    /// (several roots, or leftover open nodes) is wrapped in an `ERROR` node.
    pub fn finish(mut self) -> GreenNode {
        debug_assert!(self.parents.is_empty(), "unfinished nodes: {:?}", self.parents);
        while !self.parents.is_empty() {
            self.finish_node();
        }
        if self.children.len() == 1 {
            if let Some(GreenElement::Node(root)) = self.children.pop() {
                return root;
            }
        }
        GreenNode::new(SyntaxKind::ERROR, self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_wraps_earlier_children() {
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::EXPR_STMT);
        let checkpoint = builder.checkpoint();
        builder.start_node(SyntaxKind::NAME_EXPR);
        builder.token(SyntaxKind::IDENT, "a", &[], &[]);
        builder.finish_node();
        builder.token(SyntaxKind::PLUS, "+", &[], &[]);
        builder.start_node(SyntaxKind::NAME_EXPR);
        builder.token(SyntaxKind::IDENT, "b", &[], &[]);
        builder.finish_node();
        builder.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        builder.finish_node();
        builder.token(SyntaxKind::SEMICOLON, ";", &[], &[]);
        builder.finish_node();

        let root = builder.finish();
        assert_eq!(root.kind(), SyntaxKind::EXPR_STMT);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(root.text(), "a+b;");
    }

    #[test]
    fn pushed_elements_keep_identity() {
        let reused = GreenNode::new(
            SyntaxKind::EMPTY_STMT,
            vec![GreenToken::new(SyntaxKind::SEMICOLON, ";", Vec::new(), Vec::new()).into()],
        );
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::BLOCK);
        builder.push(reused.clone());
        builder.finish_node();
        let root = builder.finish();
        assert!(root.children()[0]
            .as_node()
            .is_some_and(|node| node.ptr_eq(&reused)));
    }
}
