//! Incremental syntactic reclassification.
//!
//! After an edit only the text inside the change range is known to differ,
//! but tags of unchanged tokens can depend on their surroundings: a name is
//! a field name or a method name depending on the declaration around it. So
//! the change range is widened to the innermost member or statement that
//! encloses it and still spans the same text, with the same kind, in both
//! versions. Outside that region the parse is taken to be unchanged and the
//! cached tags are shifted instead of recomputed.

use corvid_classify::{classify, ClassifiedSpan, ClassifierRegistry};
use corvid_ir::{CancellationToken, Cancelled, Span};
use corvid_syntax::{ChangeRange, SyntaxKind, SyntaxNode};

/// Members and statements: the nodes whose tags never depend on text
/// outside them.
fn is_boundary(kind: SyntaxKind) -> bool {
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

/// The region to reclassify, as `(old span, new span)`.
pub(super) fn dirty_region(
    old_root: SyntaxNode<'_>,
    new_root: SyntaxNode<'_>,
    range: ChangeRange,
) -> (Span, Span) {
    let changed = range.new_span();
    let to_old = |span: Span| Span::new(span.start, span.end - range.new_len + range.span.len());

    let mut region = None;
    for node in enclosing_nodes(new_root, changed).into_iter().rev() {
        if !is_boundary(node.kind()) {
            continue;
        }
        if has_node(old_root, to_old(node.full_span()), node.kind()) {
            region = Some(node.full_span());
            break;
        }
    }
    let Some(mut region) = region else {
        return (old_root.full_span(), new_root.full_span());
    };

    // A string's embedded language can be chosen by a comment in the
    // trailing trivia of the token before it. The next token's own trailing
    // trivia cannot change its tags.
    if let Some(next) = new_root.token_at_offset(region.end) {
        if next.full_span().start == region.end {
            region = region.merge(next.span());
        }
    }
    (to_old(region), region)
}

/// Nodes whose full span contains `span`, outermost first.
fn enclosing_nodes(root: SyntaxNode<'_>, span: Span) -> Vec<SyntaxNode<'_>> {
    let mut path = vec![root];
    let mut current = root;
    while let Some(child) = current
        .child_nodes()
        .find(|child| child.full_span().contains_span(span))
    {
        path.push(child);
        current = child;
    }
    path
}

fn has_node(root: SyntaxNode<'_>, full_span: Span, kind: SyntaxKind) -> bool {
    enclosing_nodes(root, full_span)
        .iter()
        .any(|node| node.kind() == kind && node.full_span() == full_span)
}

/// Merge the cached tags of the old text with fresh tags for the dirty
/// region of the new tree.
#[tracing::instrument(level = "debug", skip_all, fields(old = %old_region, new = %new_region))]
pub(super) fn reclassify(
    cached: &[ClassifiedSpan],
    range: ChangeRange,
    new_root: SyntaxNode<'_>,
    old_region: Span,
    new_region: Span,
    registry: &ClassifierRegistry,
    cancel: &CancellationToken,
) -> Result<Vec<ClassifiedSpan>, Cancelled> {
    let fresh = classify(new_root, &[new_region], registry, None, cancel)?;
    let mut merged: Vec<ClassifiedSpan> = cached
        .iter()
        .filter(|classified| !classified.span.intersects(old_region))
        .filter_map(|classified| {
            let span = range.adjust_span(classified.span)?;
            Some(ClassifiedSpan::new(span, classified.ty))
        })
        .collect();
    let kept = merged.len();
    merged.extend(fresh);
    sort_spans(&mut merged);
    tracing::debug!(kept, total = merged.len(), "reclassified");
    Ok(merged)
}

/// Order by span, then tag, without duplicates.
pub(crate) fn sort_spans(spans: &mut Vec<ClassifiedSpan>) {
    spans.sort_by(|a, b| (a.span, a.ty).cmp(&(b.span, b.ty)));
    spans.dedup();
}
