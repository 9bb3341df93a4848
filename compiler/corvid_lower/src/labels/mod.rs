//! Unmatched-label search.
//!
//! A subtree may be moved (hoisted into a synthesized method, duplicated
//! into a finally handler) only if every jump inside it lands inside it.
//! [`find_unmatched_labels`] returns the labels a subtree jumps to without
//! declaring.
//!
//! Declarations are label statements, labeled statements, switch labels,
//! the break label of a switch, and the break and continue labels of loops.
//! `break` and `continue` inside a loop are gotos to those.
//!
//! The walk uses an explicit stack. Subtrees found in an
//! [`UnmatchedLabelCache`] contribute their cached result and are not
//! re-entered.

use corvid_ir::bound::{BoundArena, BoundId, BoundKind};
use corvid_ir::symbols::LabelId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Unmatched labels of already analyzed subtrees.
#[derive(Clone, Debug, Default)]
pub struct UnmatchedLabelCache {
    results: FxHashMap<BoundId, FxHashSet<LabelId>>,
}

impl UnmatchedLabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: BoundId) -> Option<&FxHashSet<LabelId>> {
        self.results.get(&id)
    }

    pub fn insert(&mut self, id: BoundId, unmatched: FxHashSet<LabelId>) {
        self.results.insert(id, unmatched);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}

/// Labels jumped to inside `root` but declared outside it.
pub fn find_unmatched_labels(
    arena: &BoundArena,
    root: BoundId,
    cache: Option<&UnmatchedLabelCache>,
) -> FxHashSet<LabelId> {
    let mut referenced = FxHashSet::default();
    let mut declared = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !id.is_valid() {
            continue;
        }
        if let Some(cached) = cache.and_then(|cache| cache.get(id)) {
            referenced.extend(cached.iter().copied());
            continue;
        }

        match arena.kind(id) {
            BoundKind::Goto { label } | BoundKind::ConditionalGoto { label, .. } => {
                referenced.insert(label);
            }
            BoundKind::Label { label }
            | BoundKind::Labeled { label, .. }
            | BoundKind::SwitchLabel { label, .. }
            | BoundKind::Switch {
                break_label: label, ..
            } => {
                declared.insert(label);
            }
            BoundKind::While {
                break_label,
                continue_label,
                ..
            }
            | BoundKind::DoWhile {
                break_label,
                continue_label,
                ..
            }
            | BoundKind::For {
                break_label,
                continue_label,
                ..
            } => {
                declared.insert(break_label);
                declared.insert(continue_label);
            }
            _ => {}
        }

        let children = arena.children(id);
        stack.extend(children.into_iter().rev());
    }

    referenced.retain(|label| !declared.contains(label));
    referenced
}

/// Whether `id` can be moved without separating a jump from its target.
///
/// The result for `id` is memoized in `cache`.
pub fn is_relocatable(arena: &BoundArena, id: BoundId, cache: &mut UnmatchedLabelCache) -> bool {
    if let Some(cached) = cache.get(id) {
        return cached.is_empty();
    }
    let unmatched = find_unmatched_labels(arena, id, Some(&*cache));
    let relocatable = unmatched.is_empty();
    tracing::trace!(node = id.raw(), unmatched = unmatched.len(), "label analysis");
    cache.insert(id, unmatched);
    relocatable
}

#[cfg(test)]
mod tests;
