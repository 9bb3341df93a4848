use corvid_ir::{CancellationToken, Span};
use corvid_syntax::{compute_change_range, ChangeRangeOptions, GreenElement, GreenNode, SyntaxKind, TextChange};
use pretty_assertions::assert_eq;

use super::{reparse, reparse_text};
use crate::parse;

const SOURCE: &str = "\
class C {
    void M() {
        int a = 1;
        int b = 2;
    }
    void N() { }
}
";

fn nodes_of_kind(root: &GreenNode, kind: SyntaxKind) -> Vec<GreenNode> {
    let mut found = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if node.kind() == kind {
            found.push(node.clone());
        }
        for child in node.children().iter().rev() {
            if let GreenElement::Node(child) = child {
                stack.push(child.clone());
            }
        }
    }
    found
}

fn offset_of(text: &str, needle: &str) -> u32 {
    let offset = text.find(needle).map_or(0, |i| i);
    u32::try_from(offset).unwrap_or(0)
}

#[test]
fn unchanged_statements_and_members_are_reused() {
    let old = parse(SOURCE);
    let at = offset_of(SOURCE, "2;");
    let change = TextChange::new(Span::at(at, 1), "3");
    let new = reparse(&old, &change).unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(new.text(), SOURCE.replace("2;", "3;"));
    assert!(new.errors().is_empty());

    let old_locals = nodes_of_kind(old.green(), SyntaxKind::LOCAL_DECL_STMT);
    let new_locals = nodes_of_kind(new.green(), SyntaxKind::LOCAL_DECL_STMT);
    assert!(new_locals[0].ptr_eq(&old_locals[0]));
    assert!(!new_locals[1].ptr_eq(&old_locals[1]));

    let old_methods = nodes_of_kind(old.green(), SyntaxKind::METHOD_DECL);
    let new_methods = nodes_of_kind(new.green(), SyntaxKind::METHOD_DECL);
    assert!(!new_methods[0].ptr_eq(&old_methods[0]));
    assert!(new_methods[1].ptr_eq(&old_methods[1]));
}

#[test]
fn nodes_after_the_edit_are_reused_when_shifted() {
    let old = parse(SOURCE);
    let at = offset_of(SOURCE, "a = 1");
    let change = TextChange::new(Span::at(at, 1), "alpha");
    let new = reparse(&old, &change).unwrap_or_else(|e| panic!("{e}"));

    let old_locals = nodes_of_kind(old.green(), SyntaxKind::LOCAL_DECL_STMT);
    let new_locals = nodes_of_kind(new.green(), SyntaxKind::LOCAL_DECL_STMT);
    assert!(!new_locals[0].ptr_eq(&old_locals[0]));
    assert!(new_locals[1].ptr_eq(&old_locals[1]));
}

#[test]
fn change_range_covers_the_edit() {
    let old = parse(SOURCE);
    let at = offset_of(SOURCE, "2;");
    let change = TextChange::new(Span::at(at, 1), "42");
    let new = reparse(&old, &change).unwrap_or_else(|e| panic!("{e}"));

    let range = compute_change_range(
        old.green(),
        new.green(),
        &ChangeRangeOptions::default(),
        &CancellationToken::new(),
    );
    let Ok(range) = range else {
        panic!("not cancelled");
    };
    assert!(range.span.contains_span(change.span));
    // Only the second local changed.
    let b_start = offset_of(SOURCE, "int b");
    assert!(range.span.start >= b_start);
    assert!(range.span.end <= offset_of(SOURCE, "    }\n    void N"));
}

#[test]
fn empty_edit_returns_the_old_tree() {
    let old = parse(SOURCE);
    let new = reparse_text(&old, SOURCE);
    assert!(new.green().ptr_eq(old.green()));
}

#[test]
fn reparse_text_matches_a_fresh_parse() {
    let old = parse(SOURCE);
    let edited = SOURCE.replace("void N() { }", "int N() { return 0; }");
    let new = reparse_text(&old, &edited);
    assert_eq!(new.green(), parse(&edited).green());
}

#[test]
fn out_of_bounds_edit_is_rejected() {
    let old = parse("int x;");
    assert!(reparse(&old, &TextChange::insert(100, "y")).is_err());
}
