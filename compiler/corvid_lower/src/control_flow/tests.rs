#![allow(clippy::unwrap_used)]

use corvid_diagnostic::ErrorCode;
use corvid_ir::bound::{BoundId, BoundKind, BoundRange, ConstValue, LocalRange};
use corvid_ir::symbols::{LabelId, MethodKind, MethodSymbol, ParameterSymbol, SpecialType};
use corvid_ir::{CancellationToken, Cancelled, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::Fixture;

fn block(fx: &mut Fixture, statements: &[BoundId]) -> BoundId {
    let statements = fx.arena.alloc_list(statements.iter().copied());
    fx.statement(BoundKind::Block {
        locals: LocalRange::EMPTY,
        statements,
    })
}

fn lower(fx: &mut Fixture, body: BoundId) -> Result<BoundId, Cancelled> {
    let run = fx.run;
    let mut factory = fx.factory_in(run);
    lower_method_body(&mut factory, run, body, &CancellationToken::new())
}

fn section(fx: &mut Fixture, cases: &[(Option<ConstValue>, LabelId)], body: &[BoundId]) -> BoundId {
    let labels: Vec<BoundId> = cases
        .iter()
        .map(|&(value, label)| fx.statement(BoundKind::SwitchLabel { value, label }))
        .collect();
    let labels = fx.arena.alloc_list(labels);
    let statements = fx.arena.alloc_list(body.iter().copied());
    fx.statement(BoundKind::SwitchSection { labels, statements })
}

fn switch(fx: &mut Fixture, expr: BoundId, sections: &[BoundId], break_label: LabelId) -> BoundId {
    let sections: BoundRange = fx.arena.alloc_list(sections.iter().copied());
    fx.statement(BoundKind::Switch {
        expr,
        sections,
        break_label,
    })
}

#[test]
fn if_else_becomes_conditional_gotos() {
    let mut fx = Fixture::new();
    let condition = fx.param(1);
    let consequence = fx.use_param(0);
    let alternative = fx.use_param(1);
    let if_ = fx.statement(BoundKind::If {
        condition,
        consequence,
        alternative,
    });
    let body = block(&mut fx, &[if_]);

    let lowered = lower(&mut fx, body).unwrap();
    assert_eq!(
        fx.dump(lowered),
        "\
{
    if !(flag) goto alternative_1;
    x;
    goto after_2;
    alternative_1:
    flag;
    after_2:
}"
    );
}

#[test]
fn rebuilt_user_nodes_keep_span_and_flags() {
    let mut fx = Fixture::new();
    let condition = fx.param(1);
    let consequence = fx.use_param(0);
    let if_ = fx.statement(BoundKind::If {
        condition,
        consequence,
        alternative: BoundId::INVALID,
    });
    let body = block(&mut fx, &[if_]);

    let lowered = lower(&mut fx, body).unwrap();
    assert_ne!(lowered, body);
    assert_eq!(fx.arena.span(lowered), Span::new(1, 2));
    assert!(!fx.arena.is_compiler_generated(lowered));
}

#[test]
fn subtrees_without_structured_statements_are_reused() {
    let mut fx = Fixture::new();
    let statement = fx.use_param(0);
    let inner = block(&mut fx, &[statement]);
    let body = block(&mut fx, &[inner]);
    let nodes = fx.arena.len();

    assert_eq!(lower(&mut fx, body).unwrap(), body);
    assert_eq!(fx.arena.len(), nodes);
}

#[test]
fn while_loop_with_break_and_continue() {
    let mut fx = Fixture::new();
    let brk = fx.user_label("brk");
    let cont = fx.user_label("cont");
    let condition = fx.param(1);
    let exit = fx.statement(BoundKind::Goto { label: brk });
    let exit_if = fx.statement(BoundKind::If {
        condition,
        consequence: exit,
        alternative: BoundId::INVALID,
    });
    let work = fx.use_param(0);
    let body = block(&mut fx, &[exit_if, work]);
    let loop_condition = fx.param(1);
    let while_ = fx.statement(BoundKind::While {
        condition: loop_condition,
        body,
        break_label: brk,
        continue_label: cont,
    });

    let lowered = lower(&mut fx, while_).unwrap();
    assert_eq!(
        fx.dump(lowered),
        "\
goto cont;
start_2:
{
    if !(flag) goto after_1;
    goto brk;
    after_1:
    x;
}
cont:
if (flag) goto start_2;
brk:"
    );
}

#[test]
fn for_loop_without_labels() {
    let mut fx = Fixture::new();
    let initializer = fx.use_param(0);
    let condition = fx.param(1);
    let increment = fx.use_param(1);
    let body = fx.use_param(0);
    let for_ = fx.statement(BoundKind::For {
        initializer,
        condition,
        increment,
        body,
        break_label: LabelId::INVALID,
        continue_label: LabelId::INVALID,
    });

    let lowered = lower(&mut fx, for_).unwrap();
    assert_eq!(
        fx.dump(lowered),
        "\
x;
goto check_2;
start_1:
x;
flag;
check_2:
if (flag) goto start_1;"
    );
}

#[test]
fn do_while_emits_continue_label() {
    let mut fx = Fixture::new();
    let cont = fx.user_label("cont");
    let body = fx.use_param(0);
    let condition = fx.param(1);
    let do_ = fx.statement(BoundKind::DoWhile {
        body,
        condition,
        break_label: LabelId::INVALID,
        continue_label: cont,
    });

    let lowered = lower(&mut fx, do_).unwrap();
    assert_eq!(
        fx.dump(lowered),
        "start_1:\nx;\ncont:\nif (flag) goto start_1;"
    );
}

#[test]
fn labeled_statement_splits_into_label_and_body() {
    let mut fx = Fixture::new();
    let retry = fx.user_label("retry");
    let body = fx.use_param(0);
    let labeled = fx.statement(BoundKind::Labeled { label: retry, body });

    let lowered = lower(&mut fx, labeled).unwrap();
    assert_eq!(fx.dump(lowered), "retry:\nx;");
}

#[test]
fn switch_dispatches_through_a_temporary() {
    let mut fx = Fixture::new();
    let one = fx.user_label("case_one");
    let other = fx.user_label("dflt");
    let brk = fx.user_label("brk");
    let work = fx.use_param(0);
    let exit = fx.statement(BoundKind::Goto { label: brk });
    let first = section(&mut fx, &[(Some(ConstValue::Int(1)), one)], &[work, exit]);
    let fallback = fx.use_param(1);
    let second = section(&mut fx, &[(None, other)], &[fallback]);
    let expr = fx.param(0);
    let switch = switch(&mut fx, expr, &[first, second], brk);
    let tmp = format!("tmp{}", fx.symbols.local_count());

    let lowered = lower(&mut fx, switch).unwrap();
    assert_eq!(
        fx.dump(lowered),
        format!(
            "\
{{
    int {tmp};
    {tmp} = x;
    if ({tmp} == 1) goto case_one;
    goto dflt;
    case_one:
    x;
    goto brk;
    dflt:
    flag;
    brk:
}}"
        )
    );
}

#[test]
fn switch_without_default_falls_through_to_generated_break() {
    let mut fx = Fixture::new();
    let one = fx.user_label("one");
    let two = fx.user_label("two");
    let work = fx.use_param(0);
    let first = section(
        &mut fx,
        &[(Some(ConstValue::Int(1)), one), (Some(ConstValue::Int(2)), two)],
        &[work],
    );
    let expr = fx.param(0);
    let switch = switch(&mut fx, expr, &[first], LabelId::INVALID);
    let tmp = format!("tmp{}", fx.symbols.local_count());

    let lowered = lower(&mut fx, switch).unwrap();
    assert_eq!(
        fx.dump(lowered),
        format!(
            "\
{{
    int {tmp};
    {tmp} = x;
    if ({tmp} == 1) goto one;
    if ({tmp} == 2) goto two;
    goto break_1;
    one:
    two:
    x;
    break_1:
}}"
        )
    );
}

fn string_switch(fx: &mut Fixture) -> BoundId {
    let case = fx.user_label("hello");
    let brk = fx.user_label("brk");
    let work = fx.use_param(0);
    let hello = fx.symbols.intern("hello");
    let first = section(fx, &[(Some(ConstValue::Str(hello)), case)], &[work]);
    let string = fx.ty(SpecialType::String);
    let subject = fx.symbols.intern("subject");
    let expr = fx.node(BoundKind::Literal(ConstValue::Str(subject)), string);
    switch(fx, expr, &[first], brk)
}

#[test]
fn string_switch_compares_with_op_equality() {
    let mut fx = Fixture::new();
    let string = fx.ty(SpecialType::String);
    let bool_ty = fx.ty(SpecialType::Bool);
    let params = vec![
        ParameterSymbol {
            name: fx.symbols.intern("a"),
            ty: string,
        },
        ParameterSymbol {
            name: fx.symbols.intern("b"),
            ty: string,
        },
    ];
    fx.symbols.add_method(MethodSymbol {
        name: fx.symbols.intern("op_Equality"),
        containing_type: string,
        kind: MethodKind::Ordinary,
        is_static: true,
        params,
        return_type: bool_ty,
        enclosing: None,
    });
    let switch = string_switch(&mut fx);
    let tmp = format!("tmp{}", fx.symbols.local_count());

    let lowered = lower(&mut fx, switch).unwrap();
    assert!(fx.diagnostics.is_empty());
    assert_eq!(
        fx.dump(lowered),
        format!(
            "\
{{
    string {tmp};
    {tmp} = \"subject\";
    if (string.op_Equality({tmp}, \"hello\")) goto hello;
    goto brk;
    hello:
    x;
    brk:
}}"
        )
    );
}

#[test]
fn missing_string_equality_reports_and_yields_error_body() {
    let mut fx = Fixture::new();
    let switch = string_switch(&mut fx);
    let body = block(&mut fx, &[switch]);

    let lowered = lower(&mut fx, body).unwrap();
    assert!(fx.arena.has_errors(lowered));
    assert_eq!(fx.arena.span(lowered), Span::new(1, 2));
    assert_eq!(fx.dump(lowered), "{\n    <bad>;\n}");

    let diagnostics = fx.diagnostics.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2001);
    assert!(diagnostics[0].message.contains("System.String.op_Equality"));
}

#[test]
fn try_with_catch_and_finally_is_split() {
    let mut fx = Fixture::new();
    let protected = fx.use_param(0);
    let try_block = block(&mut fx, &[protected]);
    let handler = fx.use_param(1);
    let handler = block(&mut fx, &[handler]);
    let catch = fx.statement(BoundKind::CatchBlock {
        exception_type: None,
        local: None,
        body: handler,
    });
    let cleanup = fx.use_param(0);
    let finally_block = block(&mut fx, &[cleanup]);
    let catches = fx.arena.alloc_list([catch]);
    let try_ = fx.statement(BoundKind::Try {
        try_block,
        catches,
        finally_block,
    });

    let lowered = lower(&mut fx, try_).unwrap();
    assert_eq!(
        fx.dump(lowered),
        "\
try
{
    try
    {
        x;
    }
    catch
    {
        flag;
    }
}
finally
{
    x;
}"
    );
}

#[test]
fn catch_bodies_are_lowered() {
    let mut fx = Fixture::new();
    let protected = fx.use_param(0);
    let try_block = block(&mut fx, &[protected]);
    let label = fx.user_label("again");
    let work = fx.use_param(1);
    let labeled = fx.statement(BoundKind::Labeled { label, body: work });
    let handler = block(&mut fx, &[labeled]);
    let catch = fx.statement(BoundKind::CatchBlock {
        exception_type: None,
        local: None,
        body: handler,
    });
    let catches = fx.arena.alloc_list([catch]);
    let try_ = fx.statement(BoundKind::Try {
        try_block,
        catches,
        finally_block: BoundId::INVALID,
    });

    let lowered = lower(&mut fx, try_).unwrap();
    assert_eq!(
        fx.dump(lowered),
        "\
try
{
    x;
}
catch
{
    again:
    flag;
}"
    );
}

#[test]
fn cancellation_stops_lowering() {
    let mut fx = Fixture::new();
    let body = fx.use_param(0);
    let run = fx.run;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut factory = fx.factory_in(run);
    assert_eq!(
        lower_method_body(&mut factory, run, body, &cancel),
        Err(Cancelled)
    );
}

#[test]
fn deeply_nested_ifs_lower_without_overflow() {
    let mut fx = Fixture::new();
    let mut node = fx.use_param(0);
    for _ in 0..20_000 {
        let condition = fx.param(1);
        node = fx.statement(BoundKind::If {
            condition,
            consequence: node,
            alternative: BoundId::INVALID,
        });
    }

    let lowered = lower(&mut fx, node).unwrap();
    assert!(matches!(
        fx.arena.kind(lowered),
        BoundKind::StatementList { .. }
    ));
}
