//! The canned end-to-end scenarios from spec §8 (E1-E6), built once here so
//! both the `east` binary and its test suite drive the same fixtures.
//!
//! Three (E1, E3, E4) are expected to compile cleanly; three (E2 is a
//! capture-inspection scenario rather than an error case, E5 and E6) are
//! expected to fail with a specific [`east::analyzer::ErrorKind`] — the
//! driver treats both outcomes as "ran successfully", it just reports which
//! one happened.

use east::analyzer::{BuiltinTable, PlatformKind, PlatformSignature, PlatformTable};
use east::ast::{builder, AstNode, Literal, Param};
use east::common::{Atom, SourceLocation, Span};
use east::types::Type;

fn loc() -> SourceLocation {
    SourceLocation::synthetic()
}

fn span() -> Span {
    Span::dummy()
}

/// One scenario: a name, the AST to run through `east::compile`, and the
/// platform table it needs (most need none).
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub ast: AstNode,
    pub platform: PlatformTable,
}

/// E1 — Identity integer function.
fn e1() -> Scenario {
    let ast = builder::function(
        loc(), span(),
        vec![Param::new("n", Type::integer(), false)],
        Type::integer(),
        builder::variable(loc(), span(), Type::integer(), "n"),
    );
    Scenario {
        name: "E1",
        description: "identity integer function",
        ast,
        platform: PlatformTable::empty(),
    }
}

/// E2 — Capture of an outer variable by a nested function.
fn e2() -> Scenario {
    let inner_ty = Type::function(Vec::<Type>::new(), Type::integer());
    let inner = builder::function(
        loc(), span(),
        vec![],
        Type::integer(),
        builder::variable(loc(), span(), Type::integer(), "x"),
    );
    let ast = builder::block(
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
            builder::let_binding(loc(), span(), "get_x", false, inner_ty.clone(), inner),
            builder::call(
                loc(), span(),
                Type::integer(),
                builder::variable(loc(), span(), inner_ty, "get_x"),
                vec![],
            ),
        ],
    );
    Scenario {
        name: "E2",
        description: "outer let captured by a nested function, called at block end",
        ast,
        platform: PlatformTable::empty(),
    }
}

/// E3 — Async contagion through a block.
fn e3() -> Scenario {
    let fetch_ty = Type::async_function([Type::string()], Type::integer());
    let call = builder::call_async(
        loc(), span(),
        Type::integer(),
        builder::variable(loc(), span(), fetch_ty.clone(), "fetch"),
        vec![builder::value(loc(), span(), Literal::String("url".into()))],
    );
    let zero = builder::value(loc(), span(), Literal::Integer("0".into()));
    let block = builder::block(loc(), span(), Type::integer(), vec![call, zero]);
    let ast = builder::function(loc(), span(), vec![Param::new("fetch", fetch_ty, false)], Type::integer(), block);
    Scenario {
        name: "E3",
        description: "CallAsync marks its enclosing block async",
        ast,
        platform: PlatformTable::empty(),
    }
}

fn cons_list_type() -> Type {
    Type::recursive(|self_ty| {
        Type::variant([
            (Atom::from("nil"), Type::null()),
            (
                Atom::from("cons"),
                Type::r#struct([(Atom::from("head"), Type::boolean()), (Atom::from("tail"), self_ty)]),
            ),
        ])
    })
}

/// E4 — Match over a recursively-typed cons list.
fn e4() -> Scenario {
    let list_ty = cons_list_type();
    let expanded = east::types::expand(&list_ty);
    let nil = builder::new_variant(loc(), span(), expanded.clone(), "nil", builder::value(loc(), span(), Literal::Null));
    let subject = builder::wrap_recursive(loc(), span(), list_ty, nil);
    let ast = builder::match_(
        loc(), span(),
        Type::boolean(),
        subject,
        vec![
            builder::match_case("nil", "_n", builder::value(loc(), span(), Literal::Boolean(false))),
            builder::match_case(
                "cons",
                "c",
                builder::value(loc(), span(), Literal::Boolean(true)),
            ),
        ],
    );
    Scenario { name: "E4", description: "match over a recursive cons-list type", ast, platform: PlatformTable::empty() }
}

/// E5 — Shape error: `Match` on a non-`Variant` subject.
fn e5() -> Scenario {
    let subject = builder::value(loc(), span(), Literal::Integer("1".into()));
    let ast = builder::match_(loc(), span(), Type::null(), subject, vec![]);
    Scenario { name: "E5", description: "match on an Integer subject (expect ShapeError)", ast, platform: PlatformTable::empty() }
}

/// E6 — Subtype error: an unnecessary identity cast.
fn e6() -> Scenario {
    let value = builder::value(loc(), span(), Literal::Integer("1".into()));
    let ast = builder::cast(loc(), span(), Type::integer(), value);
    Scenario { name: "E6", description: "Integer cast to Integer (expect SubtypeError)", ast, platform: PlatformTable::empty() }
}

/// All six scenarios, in spec order.
pub fn all() -> Vec<Scenario> {
    vec![e1(), e2(), e3(), e4(), e5(), e6()]
}

/// An empty builtin table: none of the canned scenarios call a builtin.
pub fn builtins() -> BuiltinTable {
    BuiltinTable::empty()
}

/// Kept for parity with a host registry that would populate a non-empty
/// platform table; none of the scenarios currently need a named platform
/// function, but this shows the shape a real one would take.
#[allow(dead_code)]
fn example_platform_table() -> PlatformTable {
    PlatformTable::new([PlatformSignature {
        name: Atom::from("fetch"),
        inputs: vec![Type::string()],
        output: Type::integer(),
        kind: PlatformKind::Async,
    }])
    .expect("no duplicate names in this fixed table")
}
