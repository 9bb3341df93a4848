//! Control-flow lowering.
//!
//! [`lower_method_body`] replaces structured statements with labels and
//! gotos. `if`, the three loops, labeled statements and `switch` disappear;
//! a `try` with both catches and a finally becomes a try-finally around a
//! try-catch. Everything else is kept, and subtrees without structured
//! statements are reused as is.
//!
//! A switch evaluates its expression once into a temporary, dispatches with
//! one conditional goto per case, and falls back to `default` (or past the
//! switch). String cases compare with `string.op_Equality`.

use corvid_ir::bound::{BoundId, BoundKind, BoundRange, ConstValue};
use corvid_ir::symbols::{LabelId, LocalId, MethodId, SpecialType, TypeId};
use corvid_ir::{CancellationToken, Cancelled};
use corvid_stack::ensure_sufficient_stack;

use crate::factory::debug_assert_distinct_case_labels;
use crate::{LoopLabels, LowerError, SpecialMember, SyntheticFactory};

/// Lower the body of `method`.
///
/// A library member the rewrite needs but cannot find is reported to the
/// factory's sink, and the body is replaced by an error block. Cancellation
/// is checked before every statement.
#[tracing::instrument(level = "debug", skip_all, fields(method = method.raw()))]
pub fn lower_method_body(
    factory: &mut SyntheticFactory<'_>,
    method: MethodId,
    body: BoundId,
    cancel: &CancellationToken,
) -> Result<BoundId, Cancelled> {
    factory.set_method(method);
    let lowered = ControlFlowLowerer {
        factory: &mut *factory,
        cancel,
    }
    .lower(body);
    match lowered {
        Ok(lowered) => {
            crate::validate::validate_lowered(factory.arena(), lowered);
            Ok(lowered)
        }
        Err(LowerError::Cancelled(cancelled)) => {
            tracing::debug!("lowering cancelled");
            Err(cancelled)
        }
        Err(LowerError::MissingMember(missing)) => {
            factory.report(missing.into_diagnostic());
            let span = if body.is_valid() {
                factory.arena().span(body)
            } else {
                factory.span()
            };
            let saved = factory.set_span(span);
            let error_body = factory.error_block();
            factory.set_span(saved);
            Ok(error_body)
        }
    }
}

struct ControlFlowLowerer<'f, 'a> {
    factory: &'f mut SyntheticFactory<'a>,
    cancel: &'f CancellationToken,
}

impl ControlFlowLowerer<'_, '_> {
    fn lower(&mut self, id: BoundId) -> Result<BoundId, LowerError> {
        if !id.is_valid() {
            return Ok(id);
        }
        self.cancel.check()?;
        ensure_sufficient_stack(|| {
            let span = self.factory.arena().span(id);
            let saved = self.factory.set_span(span);
            let lowered = self.lower_statement(id);
            self.factory.set_span(saved);
            lowered
        })
    }

    fn lower_optional(&mut self, id: BoundId) -> Result<Option<BoundId>, LowerError> {
        if id.is_valid() {
            self.lower(id).map(Some)
        } else {
            Ok(None)
        }
    }

    fn lower_statement(&mut self, id: BoundId) -> Result<BoundId, LowerError> {
        match self.factory.arena().kind(id) {
            BoundKind::Block { locals, statements } => Ok(match self.lower_list(statements)? {
                Some(statements) => {
                    let statements = self.factory.alloc_list(&statements);
                    self.factory.rebuild(id, BoundKind::Block { locals, statements })
                }
                None => id,
            }),
            BoundKind::StatementList { statements } => Ok(match self.lower_list(statements)? {
                Some(statements) => {
                    let statements = self.factory.alloc_list(&statements);
                    self.factory
                        .rebuild(id, BoundKind::StatementList { statements })
                }
                None => id,
            }),
            BoundKind::SequencePoint { statement } => {
                let lowered = self.lower(statement)?;
                Ok(if lowered == statement {
                    id
                } else {
                    self.factory.rebuild(
                        id,
                        BoundKind::SequencePoint {
                            statement: lowered,
                        },
                    )
                })
            }
            BoundKind::Labeled { label, body } => {
                let body = self.lower(body)?;
                let label = self.factory.label(label);
                Ok(self.factory.statement_list(&[label, body]))
            }
            BoundKind::If {
                condition,
                consequence,
                alternative,
            } => {
                let consequence = self.lower(consequence)?;
                let alternative = self.lower_optional(alternative)?;
                Ok(self.factory.if_(condition, consequence, alternative))
            }
            BoundKind::While {
                condition,
                body,
                break_label,
                continue_label,
            } => {
                let body = self.lower(body)?;
                let labels = LoopLabels::from_bound(break_label, continue_label);
                Ok(self.factory.while_loop(condition, body, labels))
            }
            BoundKind::DoWhile {
                body,
                condition,
                break_label,
                continue_label,
            } => {
                let body = self.lower(body)?;
                let labels = LoopLabels::from_bound(break_label, continue_label);
                Ok(self.factory.do_while_loop(body, condition, labels))
            }
            BoundKind::For {
                initializer,
                condition,
                increment,
                body,
                break_label,
                continue_label,
            } => {
                let initializer = self.lower_optional(initializer)?;
                let increment = self.lower_optional(increment)?;
                let body = self.lower(body)?;
                let condition = condition.is_valid().then_some(condition);
                let labels = LoopLabels::from_bound(break_label, continue_label);
                Ok(self
                    .factory
                    .for_loop(initializer, condition, increment, body, labels))
            }
            BoundKind::Switch {
                expr,
                sections,
                break_label,
            } => self.lower_switch(expr, sections, break_label),
            BoundKind::Try {
                try_block,
                catches,
                finally_block,
            } => self.lower_try(id, try_block, catches, finally_block),
            _ => Ok(id),
        }
    }

    /// Lowered statements of `range`, or `None` if none of them changed.
    fn lower_list(&mut self, range: BoundRange) -> Result<Option<Vec<BoundId>>, LowerError> {
        let original = self.factory.arena().list(range).to_vec();
        let mut changed = false;
        let mut lowered = Vec::with_capacity(original.len());
        for statement in original {
            let new = self.lower(statement)?;
            changed |= new != statement;
            lowered.push(new);
        }
        Ok(changed.then_some(lowered))
    }

    fn lower_try(
        &mut self,
        id: BoundId,
        try_block: BoundId,
        catches: BoundRange,
        finally_block: BoundId,
    ) -> Result<BoundId, LowerError> {
        let try_block = self.lower(try_block)?;
        let mut handlers = Vec::new();
        for catch in self.factory.arena().list(catches).to_vec() {
            handlers.push(self.lower_catch(catch)?);
        }
        let finally_block = self.lower_optional(finally_block)?;

        if handlers.is_empty() || finally_block.is_none() {
            let catches = self.factory.alloc_list(&handlers);
            return Ok(self.factory.rebuild(
                id,
                BoundKind::Try {
                    try_block,
                    catches,
                    finally_block: finally_block.unwrap_or(BoundId::INVALID),
                },
            ));
        }
        let inner = self.factory.try_catch_finally(try_block, &handlers, None);
        let protected = self.factory.block(&[inner]);
        Ok(self
            .factory
            .try_catch_finally(protected, &[], finally_block))
    }

    fn lower_catch(&mut self, catch: BoundId) -> Result<BoundId, LowerError> {
        let BoundKind::CatchBlock {
            exception_type,
            local,
            body,
        } = self.factory.arena().kind(catch)
        else {
            return Ok(catch);
        };
        let lowered = self.lower(body)?;
        Ok(if lowered == body {
            catch
        } else {
            self.factory.rebuild(
                catch,
                BoundKind::CatchBlock {
                    exception_type,
                    local,
                    body: lowered,
                },
            )
        })
    }

    /// ```text
    /// {
    ///     T tmp;
    ///     tmp = expr;
    ///     if (tmp == 1) goto case_1;
    ///     goto default_2;        // or the break label
    ///     case_1:
    ///     ...
    ///     default_2:
    ///     ...
    ///     break:
    /// }
    /// ```
    fn lower_switch(
        &mut self,
        expr: BoundId,
        sections: BoundRange,
        break_label: LabelId,
    ) -> Result<BoundId, LowerError> {
        let sections = self.factory.arena().list(sections).to_vec();
        debug_assert_distinct_case_labels(self.factory.arena(), &sections);
        let break_label = if break_label.is_valid() {
            break_label
        } else {
            self.factory.generate_label("break")
        };
        let governing = self.factory.arena().ty(expr);
        let (temp, store) = self.factory.store_to_temp(expr);

        let mut dispatch = vec![self.factory.expression_statement(store)];
        let mut bodies = Vec::new();
        let mut default = None;
        for section in sections {
            let BoundKind::SwitchSection { labels, statements } = self.factory.arena().kind(section)
            else {
                continue;
            };
            for case in self.factory.arena().list(labels).to_vec() {
                let BoundKind::SwitchLabel { value, label } = self.factory.arena().kind(case) else {
                    continue;
                };
                bodies.push(self.factory.label(label));
                match value {
                    Some(value) => {
                        let test = self.case_test(temp, value, governing)?;
                        dispatch.push(self.factory.conditional_goto(test, true, label));
                    }
                    None => default = Some(label),
                }
            }
            for statement in self.factory.arena().list(statements).to_vec() {
                bodies.push(self.lower(statement)?);
            }
        }
        dispatch.push(self.factory.goto(default.unwrap_or(break_label)));
        dispatch.extend(bodies);
        dispatch.push(self.factory.label(break_label));
        Ok(self.factory.block_with_locals(&[temp], &dispatch))
    }

    fn case_test(
        &mut self,
        temp: LocalId,
        value: ConstValue,
        governing: TypeId,
    ) -> Result<BoundId, LowerError> {
        let left = self.factory.local(temp);
        if let ConstValue::Str(_) = value {
            let equality = self.factory.special_method(SpecialMember::StringEquality)?;
            let string = self.factory.special_type(SpecialType::String);
            let right = self.factory.literal(value, string);
            return Ok(self.factory.static_call(equality, &[left, right]));
        }
        let right = self.factory.literal(value, governing);
        Ok(self.factory.equals(left, right))
    }
}

#[cfg(test)]
mod tests;
