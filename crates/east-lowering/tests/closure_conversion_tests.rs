//! End-to-end lowering tests exercising closure conversion (spec §4.2) over
//! hand-built AST roots, independent of the analyzer.

use east_ast::{builder, Literal, Param};
use east_common::{SourceLocation, Span};
use east_ir::IrKind;
use east_types::Type;

fn loc() -> SourceLocation {
    SourceLocation::synthetic()
}

fn span() -> Span {
    Span::dummy()
}

#[test]
fn outer_let_captured_by_inner_function() {
    // { let x: Integer = 0; function(): Integer => x }
    let inner = builder::function(
        loc(), span(),
        vec![],
        Type::integer(),
        builder::variable(loc(), span(), Type::integer(), "x"),
    );
    let root = builder::block(
        loc(), span(),
        Type::integer(),
        vec![
            builder::let_binding(
                loc(), span(),
                "x",
                false,
                Type::integer(),
                builder::value(loc(), span(), Literal::Integer("0".into())),
            ),
            inner,
        ],
    );

    let ir = east_lowering::lower(&root);
    let IrKind::Block(statements) = &ir.kind else { panic!("expected block") };
    let IrKind::Let { def: x_def, .. } = &statements[0].kind else { panic!("expected let") };
    let IrKind::Function { captures, .. } = &statements[1].kind else { panic!("expected function") };

    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].name.as_str(), "x");
    assert_eq!(captures[0].var_id, x_def.var_id);
}

#[test]
fn parameter_is_not_captured() {
    let param = Param::new("n", Type::integer(), false);
    let f = builder::function(
        loc(), span(),
        vec![param],
        Type::integer(),
        builder::variable(loc(), span(), Type::integer(), "n"),
    );

    let ir = east_lowering::lower(&f);
    let IrKind::Function { captures, params, .. } = &ir.kind else { panic!("expected function") };
    assert!(captures.is_empty());
    assert_eq!(params.len(), 1);
}

#[test]
fn nested_functions_compose_a_transitive_capture() {
    // function(): Integer => { function(): Integer => x }
    // The middle function captures `x` from a grandparent block purely by
    // passing it through: its own capture list must list `x` too, since it
    // is itself free inside the middle function's body (spec §4.2, "Nested
    // functions compose").
    let innermost = builder::function(
        loc(), span(),
        vec![],
        Type::integer(),
        builder::variable(loc(), span(), Type::integer(), "x"),
    );
    let middle = builder::function(loc(), span(), vec![], Type::integer(), innermost);
    let root = builder::block(
        loc(), span(),
        Type::integer(),
        vec![
            builder::let_binding(
                loc(), span(),
                "x",
                false,
                Type::integer(),
                builder::value(loc(), span(), Literal::Integer("0".into())),
            ),
            middle,
        ],
    );

    let ir = east_lowering::lower(&root);
    let IrKind::Block(statements) = &ir.kind else { panic!("expected block") };
    let IrKind::Function { captures: middle_captures, body: middle_body, .. } = &statements[1].kind
    else {
        panic!("expected function")
    };
    assert_eq!(middle_captures.len(), 1);
    assert_eq!(middle_captures[0].name.as_str(), "x");

    let IrKind::Function { captures: inner_captures, .. } = &middle_body.kind else {
        panic!("expected inner function")
    };
    assert_eq!(inner_captures.len(), 1);
    assert_eq!(inner_captures[0].name.as_str(), "x");
    assert_eq!(inner_captures[0].var_id, middle_captures[0].var_id);
}

#[test]
fn lowering_is_deterministic_on_equal_asts() {
    let build = || {
        builder::let_binding(
            loc(), span(),
            "x",
            false,
            Type::integer(),
            builder::value(loc(), span(), Literal::Integer("1".into())),
        )
    };
    let a = east_lowering::lower(&build());
    let b = east_lowering::lower(&build());
    match (&a.kind, &b.kind) {
        (IrKind::Let { def: da, .. }, IrKind::Let { def: db, .. }) => {
            assert_eq!(da.name, db.name);
            assert_eq!(da.mutable, db.mutable);
        }
        _ => panic!("expected let nodes"),
    }
}
