//! Async-soundness tests (spec §8 property 3): `is_async == true` on a node
//! iff the node itself is `CallAsync`/an async platform call, or any
//! visited subterm has `is_async == true`.

use east_analyzer::{analyze, BuiltinTable, PlatformSignature, PlatformTable};
use east_ast::{builder, Literal};
use east_common::{SourceLocation, Span};
use east_ir::IrKind;
use east_types::Type;

fn loc() -> SourceLocation {
    SourceLocation::synthetic()
}

fn span() -> Span {
    Span::dummy()
}

/// A synchronous platform call never marks its node (or its caller) async.
#[test]
fn sync_platform_call_is_not_async() {
    let platform = PlatformTable::new([PlatformSignature::sync("now", vec![], Type::integer())]).unwrap();
    let builtins = BuiltinTable::empty();
    let call = builder::platform_call(loc(), span(), Type::integer(), "now", vec![]);
    let ir = east_lowering::lower(&call);
    analyze(&ir, &platform, &builtins).expect("should type-check");
    assert!(!ir.is_async());
}

/// An async platform call marks its own node async even with no async
/// arguments.
#[test]
fn async_platform_call_is_async() {
    let platform = PlatformTable::new([PlatformSignature::r#async("fetch", vec![Type::string()], Type::integer())]).unwrap();
    let builtins = BuiltinTable::empty();
    let call = builder::platform_call(
        loc(), span(),
        Type::integer(),
        "fetch",
        vec![builder::value(loc(), span(), Literal::String("url".into()))],
    );
    let ir = east_lowering::lower(&call);
    analyze(&ir, &platform, &builtins).expect("should type-check");
    assert!(ir.is_async());
}

/// `Call` (the synchronous call form) is async iff one of its arguments is
/// async, even though the callee itself is a plain `Function`.
#[test]
fn sync_call_is_async_only_if_an_argument_is() {
    let platform = PlatformTable::new([PlatformSignature::r#async("fetch", vec![], Type::string())]).unwrap();
    let builtins = BuiltinTable::empty();

    let arg = builder::call_async(
        loc(), span(),
        Type::string(),
        builder::variable(loc(), span(), Type::async_function([], Type::string()), "fetch_fn"),
        vec![],
    );
    let callee = builder::variable(loc(), span(), Type::function([Type::string()], Type::boolean()), "is_empty");
    let call = builder::call(loc(), span(), Type::boolean(), callee, vec![arg]);

    let wrapped = builder::function(
        loc(), span(),
        vec![
            east_ast::Param::new("fetch_fn", Type::async_function([], Type::string()), false),
            east_ast::Param::new("is_empty", Type::function([Type::string()], Type::boolean()), false),
        ],
        Type::boolean(),
        call,
    );

    let ir = east_lowering::lower(&wrapped);
    analyze(&ir, &platform, &builtins).expect("should type-check");

    let IrKind::Function { body, .. } = &ir.kind else { panic!("expected function") };
    assert!(body.is_async());
    let IrKind::Call { args, .. } = &body.kind else { panic!("expected call") };
    assert!(args[0].is_async());
}

/// `CallAsync` is always async, regardless of its arguments.
#[test]
fn call_async_is_always_async() {
    let platform = PlatformTable::empty();
    let builtins = BuiltinTable::empty();
    let call = builder::call_async(
        loc(), span(),
        Type::integer(),
        builder::variable(loc(), span(), Type::async_function([], Type::integer()), "f"),
        vec![],
    );
    let wrapped = builder::function(
        loc(), span(),
        vec![east_ast::Param::new("f", Type::async_function([], Type::integer()), false)],
        Type::integer(),
        call,
    );
    let ir = east_lowering::lower(&wrapped);
    analyze(&ir, &platform, &builtins).expect("should type-check");
    let IrKind::Function { body, .. } = &ir.kind else { panic!("expected function") };
    assert!(body.is_async());
}

/// `is_async` does not leak out of a `Function`/`AsyncFunction` node itself:
/// *defining* an async function is sync even though the function's body is
/// async (spec §4.3: "defining an async function is itself sync; calling it
/// synchronously via `CallAsync` marks the caller async").
#[test]
fn defining_an_async_function_is_itself_sync() {
    let platform = PlatformTable::new([PlatformSignature::r#async("fetch", vec![], Type::integer())]).unwrap();
    let builtins = BuiltinTable::empty();
    let inner_call = builder::platform_call(loc(), span(), Type::integer(), "fetch", vec![]);
    let async_fn = builder::async_function(loc(), span(), vec![], Type::integer(), inner_call);
    let root = builder::block(loc(), span(), async_fn.ty.clone(), vec![async_fn]);

    let ir = east_lowering::lower(&root);
    analyze(&ir, &platform, &builtins).expect("should type-check");

    let IrKind::Block(statements) = &ir.kind else { panic!("expected block") };
    assert!(!statements[0].is_async());
    let IrKind::AsyncFunction { body, .. } = &statements[0].kind else { panic!("expected async function") };
    assert!(body.is_async());
    assert!(!ir.is_async());
}

/// Contagion flows through `IfElse`: one async branch marks the whole node
/// async even when the predicate and the other branches are sync.
#[test]
fn if_else_is_async_if_any_branch_is() {
    let platform = PlatformTable::new([PlatformSignature::r#async("fetch", vec![], Type::integer())]).unwrap();
    let builtins = BuiltinTable::empty();

    let predicate = builder::value(loc(), span(), Literal::Boolean(true));
    let then_branch = builder::platform_call(loc(), span(), Type::integer(), "fetch", vec![]);
    let else_branch = builder::value(loc(), span(), Literal::Integer("0".into()));
    let if_else = builder::if_else(loc(), span(), Type::integer(), vec![(predicate, then_branch)], Some(else_branch));

    let ir = east_lowering::lower(&if_else);
    analyze(&ir, &platform, &builtins).expect("should type-check");
    assert!(ir.is_async());

    let IrKind::IfElse { branches, else_branch, .. } = &ir.kind else { panic!("expected if/else") };
    assert!(!branches[0].0.is_async());
    assert!(branches[0].1.is_async());
    assert!(!else_branch.as_ref().unwrap().is_async());
}
