use smallvec::SmallVec;

use super::{BoundFlags, BoundId, BoundKind, BoundRange, LocalRange};
use crate::symbols::{LocalId, TypeId};
use crate::Span;

/// Struct-of-arrays storage for bound nodes.
///
/// Statements carry `TypeId::INVALID` as their type.
#[derive(Clone, Default, Debug)]
pub struct BoundArena {
    kinds: Vec<BoundKind>,
    spans: Vec<Span>,
    types: Vec<TypeId>,
    flags: Vec<BoundFlags>,
    lists: Vec<BoundId>,
    local_lists: Vec<LocalId>,
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "arena indices never exceed u32"
)]
fn to_u32(len: usize) -> u32 {
    debug_assert!(len < u32::MAX as usize);
    len as u32
}

impl BoundArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: BoundKind, span: Span, ty: TypeId, flags: BoundFlags) -> BoundId {
        let id = BoundId::new(to_u32(self.kinds.len()));
        self.kinds.push(kind);
        self.spans.push(span);
        self.types.push(ty);
        self.flags.push(flags);
        id
    }

    /// Store a list of node IDs and return its range.
    pub fn alloc_list(&mut self, ids: impl IntoIterator<Item = BoundId>) -> BoundRange {
        let start = self.lists.len();
        self.lists.extend(ids);
        BoundRange::new(to_u32(start), to_u32(self.lists.len() - start))
    }

    pub fn alloc_locals(&mut self, locals: impl IntoIterator<Item = LocalId>) -> LocalRange {
        let start = self.local_lists.len();
        self.local_lists.extend(locals);
        LocalRange::new(to_u32(start), to_u32(self.local_lists.len() - start))
    }

    #[inline]
    pub fn kind(&self, id: BoundId) -> BoundKind {
        self.kinds[id.index()]
    }

    #[inline]
    pub fn span(&self, id: BoundId) -> Span {
        self.spans[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: BoundId) -> TypeId {
        self.types[id.index()]
    }

    #[inline]
    pub fn flags(&self, id: BoundId) -> BoundFlags {
        self.flags[id.index()]
    }

    #[inline]
    pub fn is_compiler_generated(&self, id: BoundId) -> bool {
        self.flags(id).contains(BoundFlags::COMPILER_GENERATED)
    }

    #[inline]
    pub fn has_errors(&self, id: BoundId) -> bool {
        self.flags(id).contains(BoundFlags::HAS_ERRORS)
    }

    #[inline]
    pub fn list(&self, range: BoundRange) -> &[BoundId] {
        &self.lists[range.to_range()]
    }

    #[inline]
    pub fn locals(&self, range: LocalRange) -> &[LocalId] {
        &self.local_lists[range.to_range()]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Direct children in evaluation order. Absent optional children are skipped.
    pub fn children(&self, id: BoundId) -> SmallVec<[BoundId; 4]> {
        let mut out: SmallVec<[BoundId; 4]> = SmallVec::new();
        let mut push = |child: BoundId| {
            if child.is_valid() {
                out.push(child);
            }
        };
        match self.kind(id) {
            BoundKind::Literal(_)
            | BoundKind::DefaultValue
            | BoundKind::Local(_)
            | BoundKind::Parameter(_)
            | BoundKind::ThisRef
            | BoundKind::BaseRef
            | BoundKind::TypeOf { .. }
            | BoundKind::Goto { .. }
            | BoundKind::Label { .. }
            | BoundKind::SwitchLabel { .. }
            | BoundKind::NoOp => {}
            BoundKind::FieldAccess { receiver, .. }
            | BoundKind::PropertyAccess { receiver, .. } => push(receiver),
            BoundKind::Call { receiver, args, .. } => {
                push(receiver);
                self.list(args).iter().copied().for_each(&mut push);
            }
            BoundKind::ObjectCreation { args: list, .. }
            | BoundKind::ArrayCreation { elements: list, .. }
            | BoundKind::BadExpression { children: list }
            | BoundKind::Block {
                statements: list, ..
            }
            | BoundKind::StatementList { statements: list } => {
                self.list(list).iter().copied().for_each(&mut push);
            }
            BoundKind::Switch { expr, sections, .. } => {
                push(expr);
                self.list(sections).iter().copied().for_each(&mut push);
            }
            BoundKind::Assignment { target, value } => {
                push(target);
                push(value);
            }
            BoundKind::Binary { left, right, .. } => {
                push(left);
                push(right);
            }
            BoundKind::Unary { operand, .. } | BoundKind::Conversion { operand, .. } => {
                push(operand);
            }
            BoundKind::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                push(condition);
                push(when_true);
                push(when_false);
            }
            BoundKind::ArrayAccess { array, index } => {
                push(array);
                push(index);
            }
            BoundKind::Sequence {
                side_effects,
                value,
                ..
            } => {
                self.list(side_effects).iter().copied().for_each(&mut push);
                push(value);
            }
            BoundKind::ExpressionStatement { expr } | BoundKind::Throw { expr } => push(expr),
            BoundKind::LocalDeclaration { initializer, .. } => push(initializer),
            BoundKind::Return { value } => push(value),
            BoundKind::ConditionalGoto { condition, .. } => push(condition),
            BoundKind::Labeled { body, .. } => push(body),
            BoundKind::If {
                condition,
                consequence,
                alternative,
            } => {
                push(condition);
                push(consequence);
                push(alternative);
            }
            BoundKind::While {
                condition, body, ..
            } => {
                push(condition);
                push(body);
            }
            BoundKind::DoWhile {
                body, condition, ..
            } => {
                push(body);
                push(condition);
            }
            BoundKind::For {
                initializer,
                condition,
                increment,
                body,
                ..
            } => {
                push(initializer);
                push(condition);
                push(body);
                push(increment);
            }
            BoundKind::SwitchSection { labels, statements } => {
                self.list(labels).iter().copied().for_each(&mut push);
                self.list(statements).iter().copied().for_each(&mut push);
            }
            BoundKind::Try {
                try_block,
                catches,
                finally_block,
            } => {
                push(try_block);
                self.list(catches).iter().copied().for_each(&mut push);
                push(finally_block);
            }
            BoundKind::CatchBlock { body, .. } => push(body),
            BoundKind::SequencePoint { statement } => push(statement),
        }
        out
    }
}
