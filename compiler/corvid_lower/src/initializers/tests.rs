use corvid_ir::bound::{BinaryOp, BoundId, BoundInitializer, BoundKind};
use corvid_ir::symbols::{MethodId, MethodKind, MethodSymbol, ParameterSymbol, SpecialType};
use corvid_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::Fixture;

fn submission_ctor(fx: &mut Fixture) -> MethodId {
    let object = fx.ty(SpecialType::Object);
    let void = fx.ty(SpecialType::Void);
    let params = vec![
        ParameterSymbol {
            name: fx.symbols.intern("submissionArray"),
            ty: object,
        },
        ParameterSymbol {
            name: fx.symbols.intern("result"),
            ty: object,
        },
    ];
    let symbol = MethodSymbol {
        name: fx.symbols.intern(".ctor"),
        containing_type: fx.class,
        kind: MethodKind::SubmissionConstructor,
        is_static: false,
        params,
        return_type: void,
        enclosing: None,
    };
    fx.symbols.add_method(symbol)
}

fn void_call_statement(fx: &mut Fixture) -> BoundId {
    let void = fx.ty(SpecialType::Void);
    let log = fx.symbols.add_method(MethodSymbol {
        name: fx.symbols.intern("Log"),
        containing_type: fx.class,
        kind: MethodKind::Ordinary,
        is_static: true,
        params: Vec::new(),
        return_type: void,
        enclosing: None,
    });
    let args = fx.arena.alloc_list([]);
    let call = fx.node(
        BoundKind::Call {
            receiver: BoundId::INVALID,
            method: log,
            args,
        },
        void,
    );
    fx.statement(BoundKind::ExpressionStatement { expr: call })
}

fn expression_statement(fx: &mut Fixture, value: i64) -> BoundId {
    let expr = fx.int(value);
    fx.statement(BoundKind::ExpressionStatement { expr })
}

fn statements(fx: &Fixture, list: BoundId) -> Vec<BoundId> {
    let BoundKind::StatementList { statements } = fx.arena.kind(list) else {
        panic!("expected a statement list, found {:?}", fx.arena.kind(list));
    };
    fx.arena.list(statements).to_vec()
}

#[test]
fn field_initializers_assign_through_this_in_order() {
    let mut fx = Fixture::new();
    let ctor = fx.ctor;
    let int = fx.ty(SpecialType::Int);
    let a = fx.add_field("a", SpecialType::Int, false);
    let b = fx.add_field("b", SpecialType::Int, false);

    let one = fx.int(1);
    let this = fx.node(BoundKind::ThisRef, fx.class);
    let read_a = fx.node(BoundKind::FieldAccess { receiver: this, field: a }, int);
    let also_one = fx.int(1);
    let sum = fx.node(
        BoundKind::Binary {
            op: BinaryOp::Add,
            left: read_a,
            right: also_one,
        },
        int,
    );
    let initializers = [
        BoundInitializer::Field {
            field: a,
            value: one,
            declarator: Span::new(14, 19),
        },
        BoundInitializer::Field {
            field: b,
            value: sum,
            declarator: Span::new(32, 41),
        },
    ];

    let mut factory = fx.factory_in(ctor);
    let rewritten = rewrite_constructor_initializers(&mut factory, ctor, &initializers);
    drop(factory);

    assert_eq!(fx.dump_in(ctor, rewritten), "this.a = 1;\nthis.b = this.a + 1;");
    let statements = statements(&fx, rewritten);
    assert_eq!(statements.len(), 2);
    for (statement, declarator) in statements.iter().zip([Span::new(14, 19), Span::new(32, 41)]) {
        let BoundKind::SequencePoint { statement: inner } = fx.arena.kind(*statement) else {
            panic!("expected a sequence point");
        };
        assert!(fx.arena.is_compiler_generated(*statement));
        assert!(fx.arena.is_compiler_generated(inner));
        assert_eq!(fx.arena.span(*statement), declarator);
        assert_eq!(fx.arena.span(inner), declarator);
        assert!(matches!(fx.arena.kind(inner), BoundKind::ExpressionStatement { .. }));
    }
}

#[test]
fn static_field_initializer_uses_type_receiver() {
    let mut fx = Fixture::new();
    let class = fx.class;
    let void = fx.ty(SpecialType::Void);
    let cctor = fx.symbols.add_method(MethodSymbol {
        name: fx.symbols.intern(".cctor"),
        containing_type: class,
        kind: MethodKind::StaticConstructor,
        is_static: true,
        params: Vec::new(),
        return_type: void,
        enclosing: None,
    });
    let count = fx.add_field("count", SpecialType::Long, true);
    let seven = fx.int(7);

    let mut factory = fx.factory_in(cctor);
    let rewritten = rewrite_constructor_initializers(
        &mut factory,
        cctor,
        &[BoundInitializer::Field {
            field: count,
            value: seven,
            declarator: Span::new(0, 9),
        }],
    );
    drop(factory);

    assert_eq!(fx.dump_in(cctor, rewritten), "C.count = (long)7;");
}

#[test]
fn global_statements_pass_through() {
    let mut fx = Fixture::new();
    let ctor = fx.ctor;
    let first = expression_statement(&mut fx, 1);
    let second = expression_statement(&mut fx, 2);
    let initializers = [
        BoundInitializer::GlobalStatement { statement: first },
        BoundInitializer::GlobalStatement { statement: second },
    ];

    let mut factory = fx.factory_in(ctor);
    let rewritten = rewrite_constructor_initializers(&mut factory, ctor, &initializers);
    drop(factory);

    assert_eq!(statements(&fx, rewritten), vec![first, second]);
}

#[test]
fn submission_captures_trailing_expression_into_result_parameter() {
    let mut fx = Fixture::new();
    let ctor = submission_ctor(&mut fx);
    let first = expression_statement(&mut fx, 1);
    let last = expression_statement(&mut fx, 42);
    let initializers = [
        BoundInitializer::GlobalStatement { statement: first },
        BoundInitializer::GlobalStatement { statement: last },
    ];

    let mut factory = fx.factory_in(ctor);
    let rewritten = rewrite_constructor_initializers(&mut factory, ctor, &initializers);
    drop(factory);

    let statements = statements(&fx, rewritten);
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0], first, "only the last initializer is captured");
    assert!(fx.arena.is_compiler_generated(statements[1]));
    assert_eq!(fx.dump_in(ctor, rewritten), "1;\nresult = (object)42;");
}

#[test]
fn submission_keeps_trailing_void_statement() {
    let mut fx = Fixture::new();
    let ctor = submission_ctor(&mut fx);
    let statement = void_call_statement(&mut fx);

    let mut factory = fx.factory_in(ctor);
    let rewritten = rewrite_constructor_initializers(
        &mut factory,
        ctor,
        &[BoundInitializer::GlobalStatement { statement }],
    );
    drop(factory);

    assert_eq!(statements(&fx, rewritten), vec![statement]);
}

#[test]
fn submission_capture_requires_last_position() {
    let mut fx = Fixture::new();
    let ctor = submission_ctor(&mut fx);
    let value = expression_statement(&mut fx, 5);
    let field = fx.add_field("f", SpecialType::Int, false);
    let two = fx.int(2);
    let initializers = [
        BoundInitializer::GlobalStatement { statement: value },
        BoundInitializer::Field {
            field,
            value: two,
            declarator: Span::new(0, 5),
        },
    ];

    let mut factory = fx.factory_in(ctor);
    let rewritten = rewrite_constructor_initializers(&mut factory, ctor, &initializers);
    drop(factory);

    let statements = statements(&fx, rewritten);
    assert_eq!(statements[0], value);
    assert_eq!(fx.dump_in(ctor, rewritten), "5;\nthis.f = 2;");
}

#[test]
fn initializer_lists_longer_than_u16() {
    let mut fx = Fixture::new();
    let ctor = fx.ctor;
    let count = usize::from(u16::MAX) + 10;
    let initializers: Vec<BoundInitializer> = (0..count)
        .map(|i| BoundInitializer::GlobalStatement {
            statement: expression_statement(&mut fx, i64::try_from(i).unwrap_or_default()),
        })
        .collect();

    let mut factory = fx.factory_in(ctor);
    let rewritten = rewrite_constructor_initializers(&mut factory, ctor, &initializers);
    drop(factory);

    let statements = statements(&fx, rewritten);
    assert_eq!(statements.len(), count);
    let BoundInitializer::GlobalStatement { statement: last } = initializers[count - 1] else {
        unreachable!();
    };
    assert_eq!(statements[count - 1], last);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "initializers belong to a constructor")]
fn ordinary_methods_are_rejected() {
    let mut fx = Fixture::new();
    let run = fx.run;
    let mut factory = fx.factory_in(run);
    rewrite_constructor_initializers(&mut factory, run, &[]);
}
