use corvid_ir::bound::{BoundId, BoundKind, ConstValue, LocalRange};
use corvid_ir::symbols::LabelId;
use rustc_hash::FxHashSet;

use super::*;
use crate::test_helpers::Fixture;

fn set(labels: &[LabelId]) -> FxHashSet<LabelId> {
    labels.iter().copied().collect()
}

fn goto(fx: &mut Fixture, label: LabelId) -> BoundId {
    fx.statement(BoundKind::Goto { label })
}

fn block(fx: &mut Fixture, statements: &[BoundId]) -> BoundId {
    let statements = fx.arena.alloc_list(statements.iter().copied());
    fx.statement(BoundKind::Block {
        locals: LocalRange::EMPTY,
        statements,
    })
}

#[test]
fn goto_without_declaration_is_unmatched() {
    let mut fx = Fixture::new();
    let target = fx.user_label("L");
    let jump = goto(&mut fx, target);
    let body = fx.use_param(0);
    let root = block(&mut fx, &[body, jump]);

    assert_eq!(find_unmatched_labels(&fx.arena, root, None), set(&[target]));
}

#[test]
fn declaration_anywhere_in_subtree_matches() {
    let mut fx = Fixture::new();
    let target = fx.user_label("L");
    let declaration = fx.statement(BoundKind::Label { label: target });
    let inner = block(&mut fx, &[declaration]);
    let condition = fx.param(1);
    let jump = fx.statement(BoundKind::ConditionalGoto {
        condition,
        jump_if_true: true,
        label: target,
    });
    let root = block(&mut fx, &[jump, inner]);

    assert!(find_unmatched_labels(&fx.arena, root, None).is_empty());
}

#[test]
fn labeled_statement_declares_its_label() {
    let mut fx = Fixture::new();
    let target = fx.user_label("retry");
    let jump = goto(&mut fx, target);
    let labeled = fx.statement(BoundKind::Labeled {
        label: target,
        body: jump,
    });

    assert!(find_unmatched_labels(&fx.arena, labeled, None).is_empty());
    assert_eq!(find_unmatched_labels(&fx.arena, jump, None), set(&[target]));
}

#[test]
fn switch_declares_break_and_case_labels() {
    let mut fx = Fixture::new();
    let case = fx.user_label("case_1");
    let done = fx.user_label("break");
    let outside = fx.user_label("outer");
    let case_label = fx.statement(BoundKind::SwitchLabel {
        value: Some(ConstValue::Int(1)),
        label: case,
    });
    let to_case = goto(&mut fx, case);
    let to_break = goto(&mut fx, done);
    let to_outside = goto(&mut fx, outside);
    let labels = fx.arena.alloc_list([case_label]);
    let statements = fx.arena.alloc_list([to_case, to_break, to_outside]);
    let section = fx.statement(BoundKind::SwitchSection { labels, statements });
    let expr = fx.param(0);
    let sections = fx.arena.alloc_list([section]);
    let switch = fx.statement(BoundKind::Switch {
        expr,
        sections,
        break_label: done,
    });

    assert_eq!(find_unmatched_labels(&fx.arena, switch, None), set(&[outside]));
}

#[test]
fn loops_declare_break_and_continue() {
    let mut fx = Fixture::new();
    let brk = fx.user_label("break");
    let cont = fx.user_label("continue");
    let to_break = goto(&mut fx, brk);
    let to_continue = goto(&mut fx, cont);
    let body = block(&mut fx, &[to_continue, to_break]);
    let condition = fx.param(1);
    let while_loop = fx.statement(BoundKind::While {
        condition,
        body,
        break_label: brk,
        continue_label: cont,
    });

    assert!(find_unmatched_labels(&fx.arena, while_loop, None).is_empty());
    assert_eq!(
        find_unmatched_labels(&fx.arena, body, None),
        set(&[brk, cont])
    );
}

#[test]
fn cached_subtrees_are_not_reentered() {
    let mut fx = Fixture::new();
    let declared_inside = fx.user_label("inside");
    let cached_only = fx.user_label("cached");
    let declaration = fx.statement(BoundKind::Label {
        label: declared_inside,
    });
    let inner = block(&mut fx, &[declaration]);
    let jump = goto(&mut fx, declared_inside);
    let root = block(&mut fx, &[inner, jump]);

    let mut cache = UnmatchedLabelCache::new();
    cache.insert(inner, set(&[cached_only]));

    // The declaration inside `inner` is never seen, so the jump stays unmatched.
    assert_eq!(
        find_unmatched_labels(&fx.arena, root, Some(&cache)),
        set(&[declared_inside, cached_only])
    );
    assert!(find_unmatched_labels(&fx.arena, root, None).is_empty());
}

#[test]
fn is_relocatable_memoizes() {
    let mut fx = Fixture::new();
    let target = fx.user_label("L");
    let jump = goto(&mut fx, target);
    let body = fx.use_param(0);
    let closed = block(&mut fx, &[body]);
    let open = block(&mut fx, &[jump]);

    let mut cache = UnmatchedLabelCache::new();
    assert!(is_relocatable(&fx.arena, closed, &mut cache));
    assert!(!is_relocatable(&fx.arena, open, &mut cache));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(open), Some(&set(&[target])));
    assert!(!is_relocatable(&fx.arena, open, &mut cache));
}

#[test]
fn deeply_nested_blocks_use_explicit_stack() {
    let mut fx = Fixture::new();
    let target = fx.user_label("deep");
    let mut node = goto(&mut fx, target);
    for _ in 0..50_000 {
        node = block(&mut fx, &[node]);
    }

    assert_eq!(find_unmatched_labels(&fx.arena, node, None), set(&[target]));
}
