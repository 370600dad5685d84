//! A thin constructor-level builder surface.
//!
//! This is deliberately *not* the fluent, ergonomic DSL a host embedding East
//! would offer callers (that surface is out of scope, spec §1) — it is a
//! minimal, direct set of constructor functions over [`AstNode`], sufficient
//! for `east-lowering`/`east-analyzer`'s tests and for a host's real builder
//! to be implemented against.

use east_common::{Atom, SourceLocation, Span};
use east_types::Type;

use crate::ast::{AstKind, AstNode, MatchCase, Param};
use crate::literal::Literal;

pub fn value(location: SourceLocation, span: Span, literal: Literal) -> AstNode {
    let ty = literal.tag();
    AstNode::new(location, span, ty, AstKind::Value(literal))
}

pub fn variable(location: SourceLocation, span: Span, ty: Type, name: impl Into<Atom>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::Variable { name: name.into() })
}

pub fn let_binding(
    location: SourceLocation,
    span: Span,
    name: impl Into<Atom>,
    mutable: bool,
    declared_type: Type,
    init: AstNode,
) -> AstNode {
    AstNode::new(
        location,
        span,
        Type::null(),
        AstKind::Let { name: name.into(), mutable, declared_type, init: Box::new(init) },
    )
}

pub fn assign(location: SourceLocation, span: Span, name: impl Into<Atom>, value: AstNode) -> AstNode {
    AstNode::new(
        location,
        span,
        Type::null(),
        AstKind::Assign { name: name.into(), value: Box::new(value) },
    )
}

pub fn block(location: SourceLocation, span: Span, ty: Type, statements: Vec<AstNode>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::Block(statements))
}

pub fn cast(location: SourceLocation, span: Span, target: Type, value: AstNode) -> AstNode {
    AstNode::new(location, span, target, AstKind::As { value: Box::new(value) })
}

pub fn platform_call(
    location: SourceLocation,
    span: Span,
    output: Type,
    name: impl Into<Atom>,
    args: Vec<AstNode>,
) -> AstNode {
    AstNode::new(location, span, output, AstKind::Platform { name: name.into(), args })
}

pub fn function(
    location: SourceLocation,
    span: Span,
    params: Vec<Param>,
    output: Type,
    body: AstNode,
) -> AstNode {
    let ty = Type::function(params.iter().map(|p| p.ty.clone()), output);
    AstNode::new(location, span, ty, AstKind::Function { params, body: Box::new(body) })
}

pub fn async_function(
    location: SourceLocation,
    span: Span,
    params: Vec<Param>,
    output: Type,
    body: AstNode,
) -> AstNode {
    let ty = Type::async_function(params.iter().map(|p| p.ty.clone()), output);
    AstNode::new(location, span, ty, AstKind::AsyncFunction { params, body: Box::new(body) })
}

pub fn call(location: SourceLocation, span: Span, result: Type, callee: AstNode, args: Vec<AstNode>) -> AstNode {
    AstNode::new(location, span, result, AstKind::Call { callee: Box::new(callee), args })
}

pub fn call_async(
    location: SourceLocation,
    span: Span,
    result: Type,
    callee: AstNode,
    args: Vec<AstNode>,
) -> AstNode {
    AstNode::new(location, span, result, AstKind::CallAsync { callee: Box::new(callee), args })
}

pub fn builtin_call(
    location: SourceLocation,
    span: Span,
    result: Type,
    name: impl Into<Atom>,
    args: Vec<AstNode>,
) -> AstNode {
    AstNode::new(location, span, result, AstKind::Builtin { name: name.into(), args })
}

pub fn return_(location: SourceLocation, span: Span, value: AstNode) -> AstNode {
    AstNode::new(location, span, Type::never(), AstKind::Return(Box::new(value)))
}

pub fn break_(location: SourceLocation, span: Span) -> AstNode {
    AstNode::new(location, span, Type::never(), AstKind::Break)
}

pub fn continue_(location: SourceLocation, span: Span) -> AstNode {
    AstNode::new(location, span, Type::never(), AstKind::Continue)
}

pub fn error(location: SourceLocation, span: Span, message: AstNode) -> AstNode {
    AstNode::new(location, span, Type::never(), AstKind::Error { message: Box::new(message) })
}

#[allow(clippy::too_many_arguments)]
pub fn try_catch(
    location: SourceLocation,
    span: Span,
    ty: Type,
    try_body: AstNode,
    catch_message_name: impl Into<Atom>,
    catch_stack_name: impl Into<Atom>,
    catch_body: AstNode,
    finally: Option<AstNode>,
) -> AstNode {
    AstNode::new(
        location,
        span,
        ty,
        AstKind::TryCatch {
            try_body: Box::new(try_body),
            catch_message_name: catch_message_name.into(),
            catch_stack_name: catch_stack_name.into(),
            catch_body: Box::new(catch_body),
            finally: finally.map(Box::new),
        },
    )
}

pub fn new_ref(location: SourceLocation, span: Span, ty: Type, value: AstNode) -> AstNode {
    AstNode::new(location, span, ty, AstKind::NewRef(Box::new(value)))
}

pub fn new_array(location: SourceLocation, span: Span, ty: Type, elements: Vec<AstNode>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::NewArray(elements))
}

pub fn new_set(location: SourceLocation, span: Span, ty: Type, elements: Vec<AstNode>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::NewSet(elements))
}

pub fn new_dict(location: SourceLocation, span: Span, ty: Type, entries: Vec<(AstNode, AstNode)>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::NewDict(entries))
}

pub fn new_struct(location: SourceLocation, span: Span, ty: Type, fields: Vec<(Atom, AstNode)>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::Struct(fields))
}

pub fn new_variant(
    location: SourceLocation,
    span: Span,
    ty: Type,
    case: impl Into<Atom>,
    payload: AstNode,
) -> AstNode {
    AstNode::new(location, span, ty, AstKind::Variant { case: case.into(), payload: Box::new(payload) })
}

pub fn get_field(location: SourceLocation, span: Span, ty: Type, base: AstNode, field: impl Into<Atom>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::GetField { base: Box::new(base), field: field.into() })
}

pub fn match_(location: SourceLocation, span: Span, ty: Type, subject: AstNode, cases: Vec<MatchCase>) -> AstNode {
    AstNode::new(location, span, ty, AstKind::Match { subject: Box::new(subject), cases })
}

pub fn for_array(
    location: SourceLocation,
    span: Span,
    collection: AstNode,
    item_name: impl Into<Atom>,
    body: AstNode,
) -> AstNode {
    AstNode::new(
        location,
        span,
        Type::null(),
        AstKind::ForArray { collection: Box::new(collection), item_name: item_name.into(), body: Box::new(body) },
    )
}

pub fn for_set(
    location: SourceLocation,
    span: Span,
    collection: AstNode,
    item_name: impl Into<Atom>,
    body: AstNode,
) -> AstNode {
    AstNode::new(
        location,
        span,
        Type::null(),
        AstKind::ForSet { collection: Box::new(collection), item_name: item_name.into(), body: Box::new(body) },
    )
}

pub fn for_dict(
    location: SourceLocation,
    span: Span,
    collection: AstNode,
    key_name: impl Into<Atom>,
    value_name: impl Into<Atom>,
    body: AstNode,
) -> AstNode {
    AstNode::new(
        location,
        span,
        Type::null(),
        AstKind::ForDict {
            collection: Box::new(collection),
            key_name: key_name.into(),
            value_name: value_name.into(),
            body: Box::new(body),
        },
    )
}

pub fn while_loop(location: SourceLocation, span: Span, predicate: AstNode, body: AstNode) -> AstNode {
    AstNode::new(
        location,
        span,
        Type::null(),
        AstKind::While { predicate: Box::new(predicate), body: Box::new(body) },
    )
}

pub fn if_else(
    location: SourceLocation,
    span: Span,
    ty: Type,
    branches: Vec<(AstNode, AstNode)>,
    else_branch: Option<AstNode>,
) -> AstNode {
    AstNode::new(location, span, ty, AstKind::IfElse { branches, else_branch: else_branch.map(Box::new) })
}

pub fn wrap_recursive(location: SourceLocation, span: Span, recursive_ty: Type, value: AstNode) -> AstNode {
    AstNode::new(location, span, recursive_ty, AstKind::WrapRecursive(Box::new(value)))
}

pub fn unwrap_recursive(location: SourceLocation, span: Span, body_ty: Type, value: AstNode) -> AstNode {
    AstNode::new(location, span, body_ty, AstKind::UnwrapRecursive(Box::new(value)))
}

pub fn match_case(case: impl Into<Atom>, bound_name: impl Into<Atom>, body: AstNode) -> MatchCase {
    MatchCase { case: case.into(), bound_name: bound_name.into(), body }
}
