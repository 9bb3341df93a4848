//! Identity-preserving reparse.
//!
//! The new text is parsed from scratch, then every token and every member or
//! statement node of the fresh tree is swapped for its counterpart in the old
//! tree when the two are structurally equal and sit at corresponding
//! positions: entirely before the edit (same offset) or entirely after it
//! (offset shifted by the edit's delta). Elements touching the edit are never
//! reused, so the change range computed against the old tree always covers
//! the edit.

use corvid_stack::ensure_sufficient_stack;
use corvid_syntax::{GreenElement, GreenNode, GreenToken, SyntaxKind, TextChange, TextChangeError};
use rustc_hash::FxHashMap;

use crate::{parse, Parse};

/// Node kinds worth reusing: declarations and statements.
fn is_reusable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::USING_DIRECTIVE
            | SyntaxKind::CLASS_DECL
            | SyntaxKind::FIELD_DECL
            | SyntaxKind::METHOD_DECL
            | SyntaxKind::CONSTRUCTOR_DECL
            | SyntaxKind::BLOCK
            | SyntaxKind::LOCAL_DECL_STMT
            | SyntaxKind::EXPR_STMT
            | SyntaxKind::IF_STMT
            | SyntaxKind::WHILE_STMT
            | SyntaxKind::DO_STMT
            | SyntaxKind::FOR_STMT
            | SyntaxKind::SWITCH_STMT
            | SyntaxKind::SWITCH_SECTION
            | SyntaxKind::BREAK_STMT
            | SyntaxKind::CONTINUE_STMT
            | SyntaxKind::RETURN_STMT
            | SyntaxKind::GOTO_STMT
            | SyntaxKind::LABELED_STMT
            | SyntaxKind::TRY_STMT
            | SyntaxKind::THROW_STMT
            | SyntaxKind::EMPTY_STMT
    )
}

type ReuseKey = (u32, SyntaxKind, u32);

/// Reusable elements of the old tree, keyed by `(offset, kind, full width)`.
struct ReuseIndex {
    nodes: FxHashMap<ReuseKey, GreenNode>,
    tokens: FxHashMap<ReuseKey, GreenToken>,
}

impl ReuseIndex {
    fn new(root: &GreenNode) -> Self {
        let mut nodes = FxHashMap::default();
        let mut tokens = FxHashMap::default();
        let mut stack = vec![(root, 0u32)];
        while let Some((node, offset)) = stack.pop() {
            if is_reusable(node.kind()) {
                nodes
                    .entry((offset, node.kind(), node.full_width()))
                    .or_insert_with(|| node.clone());
            }
            let mut child_offset = offset;
            for child in node.children() {
                match child {
                    GreenElement::Node(child_node) => stack.push((child_node, child_offset)),
                    GreenElement::Token(token) => {
                        tokens
                            .entry((child_offset, token.kind(), token.full_width()))
                            .or_insert_with(|| token.clone());
                    }
                }
                child_offset += child.full_width();
            }
        }
        ReuseIndex { nodes, tokens }
    }
}

struct Reuser<'a> {
    index: &'a ReuseIndex,
    change: &'a TextChange,
    reused: usize,
}

impl Reuser<'_> {
    /// Old-text offset of a node at `offset` in the new text, if the node lies
    /// wholly outside the edit.
    fn old_offset(&self, offset: u32, width: u32) -> Option<u32> {
        let edit_start = self.change.span.start;
        let new_edit_end = edit_start + self.change.new_len();
        if offset + width <= edit_start {
            Some(offset)
        } else if offset >= new_edit_end {
            Some(offset - new_edit_end + self.change.span.end)
        } else {
            None
        }
    }

    fn find_old_node(&self, node: &GreenNode, offset: u32) -> Option<GreenNode> {
        if !is_reusable(node.kind()) {
            return None;
        }
        let old_offset = self.old_offset(offset, node.full_width())?;
        let old = self
            .index
            .nodes
            .get(&(old_offset, node.kind(), node.full_width()))?;
        (old == node).then(|| old.clone())
    }

    fn find_old_token(&self, token: &GreenToken, offset: u32) -> Option<GreenToken> {
        let old_offset = self.old_offset(offset, token.full_width())?;
        let old = self
            .index
            .tokens
            .get(&(old_offset, token.kind(), token.full_width()))?;
        (old == token).then(|| old.clone())
    }

    /// `node` with reusable descendants swapped for old nodes.
    fn rebuild(&mut self, node: &GreenNode, offset: u32) -> GreenNode {
        if let Some(old) = self.find_old_node(node, offset) {
            self.reused += 1;
            return old;
        }

        let mut changed = false;
        let mut children = Vec::with_capacity(node.children().len());
        let mut child_offset = offset;
        for child in node.children() {
            let rebuilt = match child {
                GreenElement::Node(child_node) => {
                    let rebuilt = ensure_sufficient_stack(|| self.rebuild(child_node, child_offset));
                    changed |= !rebuilt.ptr_eq(child_node);
                    GreenElement::Node(rebuilt)
                }
                GreenElement::Token(token) => match self.find_old_token(token, child_offset) {
                    Some(old) => {
                        changed = true;
                        GreenElement::Token(old)
                    }
                    None => child.clone(),
                },
            };
            child_offset += child.full_width();
            children.push(rebuilt);
        }

        if changed {
            GreenNode::new(node.kind(), children)
        } else {
            node.clone()
        }
    }
}

/// Parse `old` with `change` applied, reusing unchanged subtrees of `old`.
pub fn reparse(old: &Parse, change: &TextChange) -> Result<Parse, TextChangeError> {
    let new_text = change.apply(&old.text())?;
    Ok(reparse_with(old, change, &new_text))
}

/// Parse `new_text`, reusing unchanged subtrees of `old`.
///
/// The edit is taken to be the smallest one that turns the old text into
/// `new_text`.
pub fn reparse_text(old: &Parse, new_text: &str) -> Parse {
    let change = TextChange::between(&old.text(), new_text);
    reparse_with(old, &change, new_text)
}

#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(start = change.span.start, old_len = change.span.len(), new_len = change.new_len())
)]
fn reparse_with(old: &Parse, change: &TextChange, new_text: &str) -> Parse {
    if change.span.is_empty() && change.new_text.is_empty() {
        return old.clone();
    }

    let fresh = parse(new_text);
    let index = ReuseIndex::new(old.green());
    let mut reuser = Reuser {
        index: &index,
        change,
        reused: 0,
    };
    let green = reuser.rebuild(fresh.green(), 0);
    tracing::debug!(reused = reuser.reused, "reparsed");

    Parse {
        green,
        errors: fresh.errors,
    }
}

#[cfg(test)]
mod tests;
