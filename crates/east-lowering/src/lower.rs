//! AST → IR lowering / closure conversion (spec §4.2).
//!
//! Walks an [`AstNode`] tree once, producing an [`IrNode`] tree in which
//! every variable reference carries a [`VarId`] tied to its definition and
//! every `Function`/`AsyncFunction` node carries an explicit capture list.
//! This pass performs no type checking (spec §4.2, "The lowerer does not
//! type-check; the analyzer performs all validation") — where it needs a
//! type to build an IR node (a `Let`'s bound variable, a loop variable, a
//! `Match` case's bound variable), it reads the already-assigned type off
//! the relevant AST node rather than deriving one.

use east_ast::{AstKind, AstNode, MatchCase, Param};
use east_common::Atom;
use east_ir::{Capture, IrKind, IrMatchCase, IrNode, VarDef, VarId};
use east_types::{stack_trace, Type, TypeKind};
use rustc_hash::FxHashSet;
use tracing::debug_span;

use crate::free_vars::free_vars;
use crate::scope::LoweringScope;

/// Lowers a complete AST root to IR. Each call starts a fresh variable-id
/// namespace and a fresh (empty) lowering scope.
pub fn lower(ast: &AstNode) -> IrNode {
    let _span = debug_span!("lower").entered();
    let mut scope = LoweringScope::new();
    lower_node(ast, &mut scope)
}

fn lower_node(ast: &AstNode, scope: &mut LoweringScope) -> IrNode {
    let kind = lower_kind(ast, scope);
    IrNode::new(ast.location.clone(), ast.span, ast.ty.clone(), kind)
}

fn lower_kind(ast: &AstNode, scope: &mut LoweringScope) -> IrKind {
    match &ast.kind {
        AstKind::Value(literal) => IrKind::Value(literal.clone()),

        AstKind::Variable { name } => {
            let (var_id, mutable) = resolve_or_dangling(scope, name);
            IrKind::Variable { var_id, name: name.clone(), mutable }
        }

        AstKind::Let { name, mutable, declared_type, init } => {
            let init_ir = lower_node(init, scope);
            let def = VarDef::new(name.clone(), declared_type.clone(), *mutable);
            scope.insert(name.clone(), def.var_id, declared_type.clone(), *mutable);
            IrKind::Let { def, init: Box::new(init_ir) }
        }

        AstKind::Assign { name, value } => {
            let value_ir = lower_node(value, scope);
            let (var_id, _mutable) = resolve_or_dangling(scope, name);
            IrKind::Assign { var_id, name: name.clone(), value: Box::new(value_ir) }
        }

        AstKind::Block(statements) => {
            scope.push();
            let ir_statements = statements.iter().map(|s| lower_node(s, scope)).collect();
            scope.pop();
            IrKind::Block(ir_statements)
        }

        AstKind::As { value } => IrKind::As { value: Box::new(lower_node(value, scope)) },

        AstKind::Platform { name, args } => {
            IrKind::Platform { name: name.clone(), args: lower_all(args, scope) }
        }

        AstKind::Function { params, body } => {
            let (param_defs, captures, body_ir) = lower_function_like(params, body, scope);
            IrKind::Function { params: param_defs, captures, body: Box::new(body_ir) }
        }

        AstKind::AsyncFunction { params, body } => {
            let (param_defs, captures, body_ir) = lower_function_like(params, body, scope);
            IrKind::AsyncFunction { params: param_defs, captures, body: Box::new(body_ir) }
        }

        AstKind::Call { callee, args } => {
            IrKind::Call { callee: Box::new(lower_node(callee, scope)), args: lower_all(args, scope) }
        }

        AstKind::CallAsync { callee, args } => {
            IrKind::CallAsync { callee: Box::new(lower_node(callee, scope)), args: lower_all(args, scope) }
        }

        AstKind::Builtin { name, args } => {
            IrKind::Builtin { name: name.clone(), args: lower_all(args, scope) }
        }

        AstKind::Return(value) => IrKind::Return(Box::new(lower_node(value, scope))),

        AstKind::Break => IrKind::Break,
        AstKind::Continue => IrKind::Continue,

        AstKind::Error { message } => IrKind::Error { message: Box::new(lower_node(message, scope)) },

        AstKind::TryCatch { try_body, catch_message_name, catch_stack_name, catch_body, finally } => {
            let try_ir = lower_node(try_body, scope);

            let message_def = VarDef::new(catch_message_name.clone(), Type::string(), false);
            let stack_def = VarDef::new(catch_stack_name.clone(), stack_trace(), false);

            scope.push();
            scope.insert(catch_message_name.clone(), message_def.var_id, Type::string(), false);
            scope.insert(catch_stack_name.clone(), stack_def.var_id, stack_trace(), false);
            let catch_ir = lower_node(catch_body, scope);
            scope.pop();

            let finally_ir = finally.as_ref().map(|f| Box::new(lower_node(f, scope)));

            IrKind::TryCatch {
                try_body: Box::new(try_ir),
                catch_message: message_def,
                catch_stack: stack_def,
                catch_body: Box::new(catch_ir),
                finally: finally_ir,
            }
        }

        AstKind::NewRef(value) => IrKind::NewRef(Box::new(lower_node(value, scope))),
        AstKind::NewArray(values) => IrKind::NewArray(lower_all(values, scope)),
        AstKind::NewSet(values) => IrKind::NewSet(lower_all(values, scope)),

        AstKind::NewDict(entries) => IrKind::NewDict(
            entries.iter().map(|(k, v)| (lower_node(k, scope), lower_node(v, scope))).collect(),
        ),

        AstKind::Struct(fields) => IrKind::Struct(
            fields.iter().map(|(name, value)| (name.clone(), lower_node(value, scope))).collect(),
        ),

        AstKind::Variant { case, payload } => {
            IrKind::Variant { case: case.clone(), payload: Box::new(lower_node(payload, scope)) }
        }

        AstKind::GetField { base, field } => {
            IrKind::GetField { base: Box::new(lower_node(base, scope)), field: field.clone() }
        }

        AstKind::Match { subject, cases } => {
            let subject_ir = lower_node(subject, scope);
            let ir_cases = cases
                .iter()
                .map(|case| lower_match_case(case, &subject.ty, scope))
                .collect();
            IrKind::Match { subject: Box::new(subject_ir), cases: ir_cases }
        }

        AstKind::ForArray { collection, item_name, body } => {
            let collection_ir = lower_node(collection, scope);
            let item_ty = container_element_type(&collection.ty);
            let def = VarDef::new(item_name.clone(), item_ty.clone(), false);
            scope.push();
            scope.insert(item_name.clone(), def.var_id, item_ty, false);
            let body_ir = lower_node(body, scope);
            scope.pop();
            IrKind::ForArray { collection: Box::new(collection_ir), item: def, body: Box::new(body_ir) }
        }

        AstKind::ForSet { collection, item_name, body } => {
            let collection_ir = lower_node(collection, scope);
            let item_ty = container_element_type(&collection.ty);
            let def = VarDef::new(item_name.clone(), item_ty.clone(), false);
            scope.push();
            scope.insert(item_name.clone(), def.var_id, item_ty, false);
            let body_ir = lower_node(body, scope);
            scope.pop();
            IrKind::ForSet { collection: Box::new(collection_ir), item: def, body: Box::new(body_ir) }
        }

        AstKind::ForDict { collection, key_name, value_name, body } => {
            let collection_ir = lower_node(collection, scope);
            let (key_ty, value_ty) = container_dict_types(&collection.ty);
            let key_def = VarDef::new(key_name.clone(), key_ty.clone(), false);
            let value_def = VarDef::new(value_name.clone(), value_ty.clone(), false);
            scope.push();
            scope.insert(key_name.clone(), key_def.var_id, key_ty, false);
            scope.insert(value_name.clone(), value_def.var_id, value_ty, false);
            let body_ir = lower_node(body, scope);
            scope.pop();
            IrKind::ForDict {
                collection: Box::new(collection_ir),
                key: key_def,
                value: value_def,
                body: Box::new(body_ir),
            }
        }

        AstKind::While { predicate, body } => IrKind::While {
            predicate: Box::new(lower_node(predicate, scope)),
            body: Box::new(lower_node(body, scope)),
        },

        AstKind::IfElse { branches, else_branch } => {
            let ir_branches = branches
                .iter()
                .map(|(predicate, body)| (lower_node(predicate, scope), lower_node(body, scope)))
                .collect();
            let ir_else = else_branch.as_ref().map(|e| Box::new(lower_node(e, scope)));
            IrKind::IfElse { branches: ir_branches, else_branch: ir_else }
        }

        AstKind::WrapRecursive(value) => IrKind::WrapRecursive(Box::new(lower_node(value, scope))),
        AstKind::UnwrapRecursive(value) => {
            IrKind::UnwrapRecursive(Box::new(lower_node(value, scope)))
        }
    }
}

fn lower_all(nodes: &[AstNode], scope: &mut LoweringScope) -> Vec<IrNode> {
    nodes.iter().map(|n| lower_node(n, scope)).collect()
}

/// Looks up `name` in the lowering scope. A name with no binding anywhere
/// (ill-formed input, since the lowerer itself never rejects anything) gets
/// a fresh, unlinked `VarId`; the analyzer's own name resolution over the
/// IR will fail it with a scope error (spec §4.2, "Failure mode").
fn resolve_or_dangling(scope: &LoweringScope, name: &Atom) -> (VarId, bool) {
    match scope.resolve(name) {
        Some(binding) => (binding.var_id, binding.mutable),
        None => (VarId::fresh(), false),
    }
}

fn lower_function_like(
    params: &[Param],
    body: &AstNode,
    scope: &mut LoweringScope,
) -> (Vec<VarDef>, Vec<Capture>, IrNode) {
    let param_names: FxHashSet<Atom> = params.iter().map(|p| p.name.clone()).collect();
    let mut free = free_vars(body);
    free.retain(|name| !param_names.contains(name));

    let captures: Vec<Capture> = free
        .iter()
        .filter_map(|name| {
            scope.resolve(name).map(|binding| Capture {
                var_id: binding.var_id,
                name: name.clone(),
                ty: binding.ty.clone(),
                mutable: binding.mutable,
            })
        })
        .collect();

    scope.push();
    for capture in &captures {
        scope.insert(capture.name.clone(), capture.var_id, capture.ty.clone(), capture.mutable);
    }

    let param_defs: Vec<VarDef> = params
        .iter()
        .map(|param| {
            let def = VarDef::new(param.name.clone(), param.ty.clone(), param.mutable);
            scope.insert(param.name.clone(), def.var_id, param.ty.clone(), param.mutable);
            def
        })
        .collect();

    let body_ir = lower_node(body, scope);
    scope.pop();

    (param_defs, captures, body_ir)
}

fn lower_match_case(case: &MatchCase, subject_ty: &Type, scope: &mut LoweringScope) -> IrMatchCase {
    let payload_ty = variant_case_type(subject_ty, &case.case);
    let def = VarDef::new(case.bound_name.clone(), payload_ty.clone(), false);
    scope.push();
    scope.insert(case.bound_name.clone(), def.var_id, payload_ty, false);
    let body_ir = lower_node(&case.body, scope);
    scope.pop();
    IrMatchCase { case: case.case.clone(), bound: def, body: body_ir }
}

/// The declared payload type of one case of a (possibly recursively
/// wrapped) variant type. Falls back to `Never` if `subject_ty` does not
/// actually expand to a `Variant` containing `case` — the analyzer's own
/// `Match` contract check is what surfaces that as a diagnostic; this is
/// only reached while building the IR node, not while validating it.
fn variant_case_type(subject_ty: &Type, case: &Atom) -> Type {
    match east_types::expand(subject_ty).kind() {
        TypeKind::Variant(cases) => cases
            .iter()
            .find(|(name, _)| name == case)
            .map(|(_, ty)| ty.clone())
            .unwrap_or_else(Type::never),
        _ => Type::never(),
    }
}

fn container_element_type(container_ty: &Type) -> Type {
    match east_types::expand(container_ty).kind() {
        TypeKind::Array(element) | TypeKind::Set(element) => element.clone(),
        _ => Type::never(),
    }
}

fn container_dict_types(container_ty: &Type) -> (Type, Type) {
    match east_types::expand(container_ty).kind() {
        TypeKind::Dict(key, value) => (key.clone(), value.clone()),
        _ => (Type::never(), Type::never()),
    }
}
