use std::time::Duration;

use corvid_ir::{CancellationToken, Cancelled, Span};
use pretty_assertions::assert_eq;

use super::{compute_change_range, ChangeRange, ChangeRangeOptions};
use crate::green::{GreenElement, GreenNode, GreenToken, Trivia};
use crate::SyntaxKind;

fn ident(text: &str) -> GreenElement {
    GreenToken::new(SyntaxKind::IDENT, text, Vec::new(), vec![Trivia::whitespace(" ")]).into()
}

fn stmt(text: &str) -> GreenElement {
    let semi = GreenToken::new(SyntaxKind::SEMICOLON, ";", Vec::new(), vec![Trivia::newline("\n")]);
    GreenNode::new(SyntaxKind::EXPR_STMT, vec![ident(text), semi.into()]).into()
}

fn root(children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(SyntaxKind::COMPILATION_UNIT, children)
}

fn compute(old: &GreenNode, new: &GreenNode) -> ChangeRange {
    match compute_change_range(old, new, &ChangeRangeOptions::default(), &CancellationToken::new()) {
        Ok(range) => range,
        Err(Cancelled) => panic!("not cancelled"),
    }
}

#[test]
fn identical_roots_have_no_change() {
    let tree = root(vec![stmt("a")]);
    assert_eq!(compute(&tree, &tree.clone()), ChangeRange::NONE);
    assert!(ChangeRange::NONE.is_empty());
}

#[test]
fn changed_middle_statement() {
    // "a ;\n" is 4 bytes wide, "bb ;\n" is 5.
    let a = stmt("a");
    let c = stmt("c");
    let old = root(vec![a.clone(), stmt("b"), c.clone()]);
    let new = root(vec![a, stmt("bb"), c]);

    let range = compute(&old, &new);
    assert_eq!(range, ChangeRange::new(Span::new(4, 8), 5));
    assert_eq!(range.new_span(), Span::new(4, 9));
    assert_eq!(range.delta(), 1);
}

#[test]
fn equal_but_not_identical_counts_as_changed() {
    let old = root(vec![stmt("a"), stmt("b")]);
    let new = root(vec![stmt("a"), stmt("b")]);
    assert_eq!(old, new);
    assert_eq!(compute(&old, &new), ChangeRange::new(Span::new(0, 8), 8));
}

#[test]
fn descends_into_rebuilt_parents() {
    let a = stmt("a");
    let c = stmt("c");
    let class_old = GreenNode::new(SyntaxKind::BLOCK, vec![a.clone(), stmt("b"), c.clone()]);
    let class_new = GreenNode::new(SyntaxKind::BLOCK, vec![a, stmt("x"), c]);
    let old = root(vec![class_old.into()]);
    let new = root(vec![class_new.into()]);

    assert_eq!(compute(&old, &new), ChangeRange::new(Span::new(4, 8), 4));
}

#[test]
fn descends_into_token_of_rebuilt_statement() {
    let semi: GreenElement =
        GreenToken::new(SyntaxKind::SEMICOLON, ";", Vec::new(), Vec::new()).into();
    let old = root(vec![GreenNode::new(SyntaxKind::EXPR_STMT, vec![ident("a"), semi.clone()]).into()]);
    let new = root(vec![GreenNode::new(SyntaxKind::EXPR_STMT, vec![ident("abc"), semi]).into()]);

    // The shared `;` is found by the right sweep.
    assert_eq!(compute(&old, &new), ChangeRange::new(Span::new(0, 2), 4));
}

#[test]
fn overlapping_sweeps_are_clamped() {
    let a = stmt("a");
    let b = stmt("b");
    let old = root(vec![a.clone(), b.clone()]);
    let new = root(vec![a, b.clone(), b]);

    // Left claims "a ;\nb ;\n", right claims the trailing "b ;\n".
    assert_eq!(compute(&old, &new), ChangeRange::new(Span::new(8, 8), 4));
}

#[test]
fn deletion_produces_empty_new_len() {
    let a = stmt("a");
    let c = stmt("c");
    let old = root(vec![a.clone(), stmt("b"), c.clone()]);
    let new = root(vec![a, c]);

    assert_eq!(compute(&old, &new), ChangeRange::new(Span::new(4, 8), 0));
}

#[test]
fn cancellation_is_propagated() {
    let old = root(vec![stmt("a")]);
    let new = root(vec![stmt("b")]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = compute_change_range(&old, &new, &ChangeRangeOptions::default(), &cancel);
    assert_eq!(result, Err(Cancelled));
}

#[test]
fn zero_timeout_reports_whole_document() {
    let a = stmt("a");
    let old = root(vec![a.clone(), stmt("b")]);
    let new = root(vec![a, stmt("cc")]);
    let options = ChangeRangeOptions::default().with_timeout(Duration::ZERO);

    let range = compute_change_range(&old, &new, &options, &CancellationToken::new());
    assert_eq!(range, Ok(ChangeRange::new(Span::new(0, 8), 9)));
}

#[test]
fn adjust_span_keeps_shifts_and_drops() {
    let range = ChangeRange::new(Span::new(10, 20), 15);
    assert_eq!(range.adjust_span(Span::new(0, 5)), Some(Span::new(0, 5)));
    assert_eq!(range.adjust_span(Span::new(25, 30)), Some(Span::new(30, 35)));
    assert_eq!(range.adjust_span(Span::new(5, 10)), None);
    assert_eq!(range.adjust_span(Span::new(15, 18)), None);
    assert_eq!(range.adjust_span(Span::new(20, 22)), None);
    assert_eq!(ChangeRange::NONE.adjust_span(Span::new(0, 3)), Some(Span::new(0, 3)));
}
