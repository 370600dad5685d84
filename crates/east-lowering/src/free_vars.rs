//! Free-variable analysis over an AST subtree (spec §4.2: "A free-variable
//! analysis visits the body collecting every variable reference whose
//! definition lies outside the function's own parameter and local-definition
//! set").
//!
//! This is purely syntactic — it only needs the shape of the tree, not any
//! resolved identity — and is run once per `Function`/`AsyncFunction` node
//! on that node's `body`. The caller subtracts the function's own parameter
//! names to get its capture set (`free_vars(body) \ parameters`).

use east_ast::{AstKind, AstNode};
use east_common::Atom;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

/// Every variable name referenced in `node` that is not bound by a `Let`,
/// parameter, loop variable, match binding, or catch binding inside `node`
/// itself. Order is first-reference order (spec §4.2: "Capture order is
/// stable and deterministic").
pub fn free_vars(node: &AstNode) -> IndexSet<Atom> {
    let mut free = IndexSet::default();
    let mut bound = FxHashSet::default();
    collect(node, &mut bound, &mut free);
    free
}

fn collect(node: &AstNode, bound: &mut FxHashSet<Atom>, free: &mut IndexSet<Atom>) {
    match &node.kind {
        AstKind::Value(_) | AstKind::Break | AstKind::Continue => {}

        AstKind::Variable { name } => {
            if !bound.contains(name) {
                free.insert(name.clone());
            }
        }

        AstKind::Let { name, init, .. } => {
            collect(init, bound, free);
            bound.insert(name.clone());
        }

        AstKind::Assign { name, value } => {
            collect(value, bound, free);
            if !bound.contains(name) {
                free.insert(name.clone());
            }
        }

        AstKind::Block(stmts) => {
            let mut local = bound.clone();
            for stmt in stmts {
                collect(stmt, &mut local, free);
            }
        }

        AstKind::As { value } => collect(value, bound, free),

        AstKind::Platform { args, .. } => {
            for arg in args {
                collect(arg, bound, free);
            }
        }

        AstKind::Function { params, body } | AstKind::AsyncFunction { params, body } => {
            let mut inner = bound.clone();
            for param in params {
                inner.insert(param.name.clone());
            }
            collect(body, &mut inner, free);
        }

        AstKind::Call { callee, args } | AstKind::CallAsync { callee, args } => {
            collect(callee, bound, free);
            for arg in args {
                collect(arg, bound, free);
            }
        }

        AstKind::Builtin { args, .. } => {
            for arg in args {
                collect(arg, bound, free);
            }
        }

        AstKind::Return(value) => collect(value, bound, free),

        AstKind::Error { message } => collect(message, bound, free),

        AstKind::TryCatch { try_body, catch_message_name, catch_stack_name, catch_body, finally } => {
            collect(try_body, bound, free);
            let mut catch_bound = bound.clone();
            catch_bound.insert(catch_message_name.clone());
            catch_bound.insert(catch_stack_name.clone());
            collect(catch_body, &mut catch_bound, free);
            if let Some(finally) = finally {
                collect(finally, bound, free);
            }
        }

        AstKind::NewRef(value) => collect(value, bound, free),

        AstKind::NewArray(values) | AstKind::NewSet(values) => {
            for value in values {
                collect(value, bound, free);
            }
        }

        AstKind::NewDict(entries) => {
            for (key, value) in entries {
                collect(key, bound, free);
                collect(value, bound, free);
            }
        }

        AstKind::Struct(fields) => {
            for (_, value) in fields {
                collect(value, bound, free);
            }
        }

        AstKind::Variant { payload, .. } => collect(payload, bound, free),

        AstKind::GetField { base, .. } => collect(base, bound, free),

        AstKind::Match { subject, cases } => {
            collect(subject, bound, free);
            for case in cases {
                let mut case_bound = bound.clone();
                case_bound.insert(case.bound_name.clone());
                collect(&case.body, &mut case_bound, free);
            }
        }

        AstKind::ForArray { collection, item_name, body }
        | AstKind::ForSet { collection, item_name, body } => {
            collect(collection, bound, free);
            let mut inner = bound.clone();
            inner.insert(item_name.clone());
            collect(body, &mut inner, free);
        }

        AstKind::ForDict { collection, key_name, value_name, body } => {
            collect(collection, bound, free);
            let mut inner = bound.clone();
            inner.insert(key_name.clone());
            inner.insert(value_name.clone());
            collect(body, &mut inner, free);
        }

        AstKind::While { predicate, body } => {
            collect(predicate, bound, free);
            collect(body, bound, free);
        }

        AstKind::IfElse { branches, else_branch } => {
            for (predicate, body) in branches {
                collect(predicate, bound, free);
                collect(body, bound, free);
            }
            if let Some(else_branch) = else_branch {
                collect(else_branch, bound, free);
            }
        }

        AstKind::WrapRecursive(value) | AstKind::UnwrapRecursive(value) => {
            collect(value, bound, free)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use east_ast::builder;
    use east_ast::Literal;
    use east_common::{SourceLocation, Span};
    use east_types::Type;

    fn loc() -> SourceLocation {
        SourceLocation::synthetic()
    }

    fn span() -> Span {
        Span::dummy()
    }

    #[test]
    fn variable_outside_any_binding_is_free() {
        let node = builder::variable(loc(), span(), Type::integer(), "x");
        let free = free_vars(&node);
        assert_eq!(free.iter().map(|a| a.as_str()).collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn let_bound_name_is_not_free_after_its_own_binding() {
        let body = builder::block(
            loc(), span(),
            Type::integer(),
            vec![
                builder::let_binding(
                    loc(), span(),
                    "x",
                    false,
                    Type::integer(),
                    builder::value(loc(), span(), Literal::Integer("1".into())),
                ),
                builder::variable(loc(), span(), Type::integer(), "x"),
            ],
        );
        assert!(free_vars(&body).is_empty());
    }

    #[test]
    fn function_parameter_shadows_outer_reference() {
        let param = east_ast::Param::new("x", Type::integer(), false);
        let f = builder::function(
            loc(), span(),
            vec![param],
            Type::integer(),
            builder::variable(loc(), span(), Type::integer(), "x"),
        );
        assert!(free_vars(&f).is_empty());
    }

    #[test]
    fn nested_function_capture_is_visible_as_free_in_outer_body() {
        let inner = builder::function(
            loc(), span(),
            vec![],
            Type::integer(),
            builder::variable(loc(), span(), Type::integer(), "x"),
        );
        let outer_body = builder::block(loc(), span(), Type::integer(), vec![inner]);
        let free = free_vars(&outer_body);
        assert_eq!(free.iter().map(|a| a.as_str()).collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn capture_order_is_first_reference_order() {
        let body = builder::block(
            loc(), span(),
            Type::integer(),
            vec![
                builder::variable(loc(), span(), Type::integer(), "b"),
                builder::variable(loc(), span(), Type::integer(), "a"),
                builder::variable(loc(), span(), Type::integer(), "b"),
            ],
        );
        let free = free_vars(&body);
        assert_eq!(free.iter().map(|a| a.as_str()).collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
