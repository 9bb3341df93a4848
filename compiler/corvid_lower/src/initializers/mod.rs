//! Constructor initializer rewriting.
//!
//! Field initializers and the top-level statements of a script run at the
//! start of the constructor. [`rewrite_constructor_initializers`] turns them
//! into one statement each, in declaration order:
//!
//! - `field = value` becomes `this.field = value;` (or `C.field = value;`
//!   for static fields) under a sequence point on the field's declarator
//! - a global statement is kept as is, except that the trailing non-void
//!   expression statement of a submission is stored into the submission
//!   constructor's result parameter

use corvid_ir::bound::{BoundId, BoundInitializer, BoundKind};
use corvid_ir::symbols::{FieldId, MethodId, MethodKind};
use corvid_ir::Span;

use crate::SyntheticFactory;

/// Parameter of a submission constructor receiving the trailing expression's value.
const SUBMISSION_RESULT_PARAMETER: u32 = 1;

/// Rewrite `initializers` into a statement list for the constructor `ctor`.
///
/// `ctor` must be a constructor-like method; debug builds assert this.
#[tracing::instrument(level = "debug", skip_all, fields(count = initializers.len()))]
pub fn rewrite_constructor_initializers(
    factory: &mut SyntheticFactory<'_>,
    ctor: MethodId,
    initializers: &[BoundInitializer],
) -> BoundId {
    let kind = factory.symbols().method(ctor).kind;
    debug_assert!(
        kind.is_constructor_like(),
        "initializers belong to a constructor, not a {kind:?} method"
    );
    factory.set_method(ctor);

    let captures_result = kind == MethodKind::SubmissionConstructor;
    let last = initializers.len().checked_sub(1);
    let statements: Vec<BoundId> = initializers
        .iter()
        .enumerate()
        .map(|(index, initializer)| match *initializer {
            BoundInitializer::Field {
                field,
                value,
                declarator,
            } => field_initializer(factory, field, value, declarator),
            BoundInitializer::GlobalStatement { statement }
                if captures_result && Some(index) == last =>
            {
                submission_result(factory, statement)
            }
            BoundInitializer::GlobalStatement { statement } => statement,
        })
        .collect();

    factory.statement_list(&statements)
}

fn field_initializer(
    factory: &mut SyntheticFactory<'_>,
    field: FieldId,
    value: BoundId,
    declarator: Span,
) -> BoundId {
    let saved = factory.set_span(declarator);
    let symbol = factory.symbols().field(field);
    let (is_static, ty) = (symbol.is_static, symbol.ty);

    let target = if is_static {
        factory.static_field(field)
    } else {
        let this = factory.this();
        factory.field(this, field)
    };
    let value = factory.convert(value, ty);
    let assignment = factory.assign(target, value);
    let statement = factory.sequence_point(declarator, assignment);

    factory.set_span(saved);
    statement
}

/// `result = expr;` for a trailing non-void expression statement, otherwise
/// `statement` unchanged.
fn submission_result(factory: &mut SyntheticFactory<'_>, statement: BoundId) -> BoundId {
    let BoundKind::ExpressionStatement { expr } = factory.arena().kind(statement) else {
        return statement;
    };
    if factory.symbols().is_void(factory.arena().ty(expr)) {
        return statement;
    }
    let result_ty = factory.current_method().and_then(|ctor| {
        factory
            .symbols()
            .method(ctor)
            .params
            .get(SUBMISSION_RESULT_PARAMETER as usize)
            .map(|param| param.ty)
    });
    debug_assert!(
        result_ty.is_some(),
        "submission constructor without a result parameter"
    );
    let Some(result_ty) = result_ty else {
        return statement;
    };

    let span = factory.arena().span(statement);
    let saved = factory.set_span(span);
    let target = factory.parameter(SUBMISSION_RESULT_PARAMETER);
    let value = factory.convert(expr, result_ty);
    let replacement = factory.assign(target, value);
    factory.set_span(saved);
    replacement
}

#[cfg(test)]
mod tests;
