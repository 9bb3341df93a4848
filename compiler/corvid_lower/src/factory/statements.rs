//! Statements and the label/goto shapes structured control flow lowers to.

use corvid_ir::bound::{BoundArena, BoundId, BoundKind, ConstValue};
use corvid_ir::symbols::{LabelId, LabelSymbol, LocalId, TypeId};
use corvid_ir::Span;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::SyntheticFactory;
use crate::members::{WellKnownMember, WellKnownType};
use crate::MissingPredefinedMember;

/// Jump targets of a loop. Missing labels are generated when needed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopLabels {
    pub break_label: Option<LabelId>,
    pub continue_label: Option<LabelId>,
}

impl LoopLabels {
    /// Labels as stored on bound loops, where `INVALID` means absent.
    pub fn from_bound(break_label: LabelId, continue_label: LabelId) -> Self {
        LoopLabels {
            break_label: break_label.is_valid().then_some(break_label),
            continue_label: continue_label.is_valid().then_some(continue_label),
        }
    }
}

impl SyntheticFactory<'_> {
    pub fn block(&mut self, statements: &[BoundId]) -> BoundId {
        self.block_with_locals(&[], statements)
    }

    pub fn block_with_locals(&mut self, locals: &[LocalId], statements: &[BoundId]) -> BoundId {
        let locals = self.arena.alloc_locals(locals.iter().copied());
        let statements = self.arena.alloc_list(statements.iter().copied());
        self.alloc_statement(BoundKind::Block { locals, statements })
    }

    pub fn statement_list(&mut self, statements: &[BoundId]) -> BoundId {
        let statements = self.arena.alloc_list(statements.iter().copied());
        self.alloc_statement(BoundKind::StatementList { statements })
    }

    pub fn expression_statement(&mut self, expr: BoundId) -> BoundId {
        self.alloc_statement(BoundKind::ExpressionStatement { expr })
    }

    /// `target = value;`
    pub fn assign(&mut self, target: BoundId, value: BoundId) -> BoundId {
        let assignment = self.assignment(target, value);
        self.expression_statement(assignment)
    }

    pub fn local_declaration(&mut self, local: LocalId, initializer: Option<BoundId>) -> BoundId {
        self.alloc_statement(BoundKind::LocalDeclaration {
            local,
            initializer: initializer.unwrap_or(BoundId::INVALID),
        })
    }

    pub fn return_(&mut self, value: Option<BoundId>) -> BoundId {
        self.alloc_statement(BoundKind::Return {
            value: value.unwrap_or(BoundId::INVALID),
        })
    }

    pub fn goto(&mut self, label: LabelId) -> BoundId {
        self.alloc_statement(BoundKind::Goto { label })
    }

    pub fn conditional_goto(
        &mut self,
        condition: BoundId,
        jump_if_true: bool,
        label: LabelId,
    ) -> BoundId {
        self.alloc_statement(BoundKind::ConditionalGoto {
            condition,
            jump_if_true,
            label,
        })
    }

    pub fn label(&mut self, label: LabelId) -> BoundId {
        self.alloc_statement(BoundKind::Label { label })
    }

    /// `throw expr;`, or a rethrow without an expression.
    pub fn throw(&mut self, expr: Option<BoundId>) -> BoundId {
        self.alloc_statement(BoundKind::Throw {
            expr: expr.unwrap_or(BoundId::INVALID),
        })
    }

    pub fn no_op(&mut self) -> BoundId {
        self.alloc_statement(BoundKind::NoOp)
    }

    /// Debugger stop at `span` around `statement`.
    pub fn sequence_point(&mut self, span: Span, statement: BoundId) -> BoundId {
        let saved = self.set_span(span);
        let id = self.alloc_statement(BoundKind::SequencePoint { statement });
        self.set_span(saved);
        id
    }

    pub fn try_catch_finally(
        &mut self,
        try_block: BoundId,
        catches: &[BoundId],
        finally_block: Option<BoundId>,
    ) -> BoundId {
        debug_assert!(
            !catches.is_empty() || finally_block.is_some(),
            "try statement without handlers"
        );
        let catches = self.arena.alloc_list(catches.iter().copied());
        self.alloc_statement(BoundKind::Try {
            try_block,
            catches,
            finally_block: finally_block.unwrap_or(BoundId::INVALID),
        })
    }

    pub fn catch_block(
        &mut self,
        exception_type: Option<TypeId>,
        local: Option<LocalId>,
        body: BoundId,
    ) -> BoundId {
        self.alloc_statement(BoundKind::CatchBlock {
            exception_type,
            local,
            body,
        })
    }

    /// `catch (System.Exception)` around `body`.
    pub fn catch_all(&mut self, body: BoundId) -> Result<BoundId, MissingPredefinedMember> {
        let exception = self.well_known_type(WellKnownType::SystemException)?;
        Ok(self.catch_block(Some(exception), None, body))
    }

    /// Fresh label named `{prefix}_{n}`, unique within this factory.
    pub fn generate_label(&mut self, prefix: &str) -> LabelId {
        self.next_label += 1;
        let name = self.symbols.intern(&format!("{prefix}_{}", self.next_label));
        self.symbols.add_label(LabelSymbol {
            name,
            generated: true,
        })
    }

    // Control flow

    /// ```text
    /// if !condition goto alternative;
    /// consequence;
    /// goto after;
    /// alternative:
    /// alternative;
    /// after:
    /// ```
    ///
    /// Without an alternative: `if !condition goto after; consequence; after:`.
    pub fn if_(
        &mut self,
        condition: BoundId,
        consequence: BoundId,
        alternative: Option<BoundId>,
    ) -> BoundId {
        let mut statements: SmallVec<[BoundId; 6]> = SmallVec::new();
        match alternative {
            Some(alternative) => {
                let alternative_label = self.generate_label("alternative");
                let after = self.generate_label("after");
                statements.push(self.conditional_goto(condition, false, alternative_label));
                statements.push(consequence);
                statements.push(self.goto(after));
                statements.push(self.label(alternative_label));
                statements.push(alternative);
                statements.push(self.label(after));
            }
            None => {
                let after = self.generate_label("after");
                statements.push(self.conditional_goto(condition, false, after));
                statements.push(consequence);
                statements.push(self.label(after));
            }
        }
        self.statement_list(&statements)
    }

    /// ```text
    /// initializer;
    /// goto check;
    /// start:
    /// body;
    /// continue:
    /// increment;
    /// check:
    /// if condition goto start;
    /// break:
    /// ```
    ///
    /// A missing condition jumps back unconditionally. The continue and break
    /// labels are emitted only when given.
    pub fn for_loop(
        &mut self,
        initializer: Option<BoundId>,
        condition: Option<BoundId>,
        increment: Option<BoundId>,
        body: BoundId,
        labels: LoopLabels,
    ) -> BoundId {
        let start = self.generate_label("start");
        let check = self.generate_label("check");
        let mut statements: SmallVec<[BoundId; 9]> = SmallVec::new();
        statements.extend(initializer);
        statements.push(self.goto(check));
        statements.push(self.label(start));
        statements.push(body);
        if let Some(continue_label) = labels.continue_label {
            statements.push(self.label(continue_label));
        }
        statements.extend(increment);
        statements.push(self.label(check));
        statements.push(match condition {
            Some(condition) => self.conditional_goto(condition, true, start),
            None => self.goto(start),
        });
        if let Some(break_label) = labels.break_label {
            statements.push(self.label(break_label));
        }
        self.statement_list(&statements)
    }

    /// ```text
    /// goto continue;
    /// start:
    /// body;
    /// continue:
    /// if condition goto start;
    /// break:
    /// ```
    pub fn while_loop(&mut self, condition: BoundId, body: BoundId, labels: LoopLabels) -> BoundId {
        let continue_label = labels
            .continue_label
            .unwrap_or_else(|| self.generate_label("continue"));
        let start = self.generate_label("start");
        let mut statements: SmallVec<[BoundId; 6]> = SmallVec::new();
        statements.push(self.goto(continue_label));
        statements.push(self.label(start));
        statements.push(body);
        statements.push(self.label(continue_label));
        statements.push(self.conditional_goto(condition, true, start));
        if let Some(break_label) = labels.break_label {
            statements.push(self.label(break_label));
        }
        self.statement_list(&statements)
    }

    /// ```text
    /// start:
    /// body;
    /// continue:
    /// if condition goto start;
    /// break:
    /// ```
    pub fn do_while_loop(
        &mut self,
        body: BoundId,
        condition: BoundId,
        labels: LoopLabels,
    ) -> BoundId {
        let start = self.generate_label("start");
        let mut statements: SmallVec<[BoundId; 5]> = SmallVec::new();
        statements.push(self.label(start));
        statements.push(body);
        if let Some(continue_label) = labels.continue_label {
            statements.push(self.label(continue_label));
        }
        statements.push(self.conditional_goto(condition, true, start));
        if let Some(break_label) = labels.break_label {
            statements.push(self.label(break_label));
        }
        self.statement_list(&statements)
    }

    /// `case value:` or, without a value, `default:`.
    pub fn switch_label(&mut self, value: Option<ConstValue>, label: LabelId) -> BoundId {
        self.alloc_statement(BoundKind::SwitchLabel { value, label })
    }

    pub fn switch_section(&mut self, labels: &[BoundId], statements: &[BoundId]) -> BoundId {
        let labels = self.arena.alloc_list(labels.iter().copied());
        let statements = self.arena.alloc_list(statements.iter().copied());
        self.alloc_statement(BoundKind::SwitchSection { labels, statements })
    }

    /// Switch statement over `sections`.
    ///
    /// Case values must be pairwise distinct across all sections, with at
    /// most one `default`. Debug builds assert this.
    pub fn switch(&mut self, expr: BoundId, sections: &[BoundId], break_label: LabelId) -> BoundId {
        debug_assert_distinct_case_labels(self.arena, sections);
        let sections = self.arena.alloc_list(sections.iter().copied());
        self.alloc_statement(BoundKind::Switch {
            expr,
            sections,
            break_label,
        })
    }

    /// ```text
    /// try { body } finally { if (resource != null) ((IDisposable)resource).Dispose(); }
    /// ```
    ///
    /// The null check is omitted for value types.
    pub fn using_finally(
        &mut self,
        resource: LocalId,
        body: BoundId,
    ) -> Result<BoundId, MissingPredefinedMember> {
        let dispose = self.well_known_method(WellKnownMember::IDisposableDispose)?;
        let disposable = self.symbols.method(dispose).containing_type;
        let resource_ty = self.symbols.local(resource).ty;

        let receiver = self.local(resource);
        let receiver = self.convert(receiver, disposable);
        let call = self.call(receiver, dispose, &[]);
        let mut cleanup = self.expression_statement(call);
        if self.symbols.type_symbol(resource_ty).is_reference_type() {
            let value = self.local(resource);
            let null = self.null();
            let not_null = self.not_equals(value, null);
            cleanup = self.if_(not_null, cleanup, None);
        }
        let finally_block = self.block(&[cleanup]);
        Ok(self.try_catch_finally(body, &[], Some(finally_block)))
    }
}

/// Debug-build check that no case value appears twice among `sections`.
pub(crate) fn debug_assert_distinct_case_labels(arena: &BoundArena, sections: &[BoundId]) {
    if !cfg!(debug_assertions) {
        return;
    }
    let mut seen: FxHashSet<Option<ConstValue>> = FxHashSet::default();
    for &section in sections {
        let kind = arena.kind(section);
        debug_assert!(
            matches!(kind, BoundKind::SwitchSection { .. }),
            "switch section expected, found {}",
            kind.name()
        );
        let BoundKind::SwitchSection { labels, .. } = kind else {
            continue;
        };
        for &label in arena.list(labels) {
            if let BoundKind::SwitchLabel { value, .. } = arena.kind(label) {
                let first = seen.insert(value);
                debug_assert!(
                    first,
                    "duplicate switch label {}",
                    value.map_or_else(|| "default".to_owned(), |v| format!("case {v:?}"))
                );
            }
        }
    }
}
