//! End-to-end tests over the aggregated `east` crate's public surface:
//! build an AST through `east::ast::builder`, run it through
//! `east::compile`, and check the enriched IR it hands back.

use east::analyzer::{BuiltinTable, PlatformTable};
use east::ast::{builder, Literal, Param};
use east::common::{SourceLocation, Span};
use east::ir::IrKind;
use east::types::Type;

fn loc() -> SourceLocation {
    SourceLocation::synthetic()
}

fn span() -> Span {
    Span::dummy()
}

#[test]
fn compile_identity_function_end_to_end() {
    let ast = builder::function(
        loc(), span(),
        vec![Param::new("n", Type::integer(), false)],
        Type::integer(),
        builder::variable(loc(), span(), Type::integer(), "n"),
    );
    let platform = PlatformTable::empty();
    let builtins = BuiltinTable::empty();
    let ir = east::compile(&ast, &platform, &builtins).expect("should compile");
    assert!(!ir.is_async());
    let IrKind::Function { params, .. } = &ir.kind else { panic!("expected function") };
    assert!(!params[0].is_captured());
}

#[test]
fn compile_surfaces_the_underlying_analyze_error() {
    let value = builder::value(loc(), span(), Literal::Integer("1".into()));
    let bad_cast = builder::cast(loc(), span(), Type::integer(), value);
    let platform = PlatformTable::empty();
    let builtins = BuiltinTable::empty();
    let err = east::compile(&bad_cast, &platform, &builtins).unwrap_err();
    assert!(err.message.contains("unnecessary cast"));
}
