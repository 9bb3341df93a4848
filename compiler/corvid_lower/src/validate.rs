//! Debug-build checks on lowered trees.

use corvid_ir::bound::{BoundArena, BoundId, BoundKind};

use crate::find_unmatched_labels;

/// Assert that `root` is fully lowered.
///
/// No structured statement may remain and every child must be allocated.
/// Unless the tree carries errors, every goto must land on a label inside
/// `root`. Release builds skip the walk.
pub(crate) fn validate_lowered(arena: &BoundArena, root: BoundId) {
    if !cfg!(debug_assertions) || !root.is_valid() {
        return;
    }
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let kind = arena.kind(id);
        debug_assert!(
            !is_structured(&kind),
            "`{}` survived control-flow lowering",
            kind.name()
        );
        for child in arena.children(id) {
            debug_assert!(
                (child.raw() as usize) < arena.len(),
                "`{}` has an unallocated child {}",
                kind.name(),
                child.raw()
            );
            stack.push(child);
        }
    }

    if !arena.has_errors(root) {
        let unmatched = find_unmatched_labels(arena, root, None);
        debug_assert!(
            unmatched.is_empty(),
            "lowered body jumps to {} undeclared label(s)",
            unmatched.len()
        );
    }
}

fn is_structured(kind: &BoundKind) -> bool {
    matches!(
        kind,
        BoundKind::If { .. }
            | BoundKind::While { .. }
            | BoundKind::DoWhile { .. }
            | BoundKind::For { .. }
            | BoundKind::Switch { .. }
            | BoundKind::SwitchSection { .. }
            | BoundKind::SwitchLabel { .. }
            | BoundKind::Labeled { .. }
    )
}
