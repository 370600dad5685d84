//! The semantic analyzer (spec §4.3) — the hardest part of the pipeline.
//!
//! A single recursive pass over an [`IrNode`] tree that validates every
//! typing and scoping rule, computes `is_async` contagion, and marks which
//! variable definitions are captured by inner functions. Nothing here
//! allocates a second tree: `is_async`/`captured` are atomics already
//! present on the IR (see `east-ir`), so analysis is "enrich in place, then
//! hand back a read-only view" (spec §9, "Duplicate work avoidance").
//!
//! Grounded on `tsz-checker`'s `CheckerState`-holds-shared-mutable-state
//! idiom (`crates/tsz-checker/src/context.rs`): one state struct threaded by
//! reference through a dispatch-by-node-kind visitor, rather than a
//! visitor-trait-per-node-kind design.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use east_common::limits::MAX_VISITING_DEPTH;
use east_common::{Atom, SourceLocation};
use east_ir::{IrKind, IrNode, VarId};
use east_types::{is_data_type, is_subtype, is_type_equal, Type, TypeKind};

use crate::builtin::BuiltinTable;
use crate::error::AnalyzeError;
use crate::options::AnalyzerOptions;
use crate::platform::PlatformTable;
use crate::scope::Scope;

/// An IR tree that has passed [`analyze`]. A lightweight proof token, not a
/// copy: `is_async`/`captured` were enriched in place on the borrowed tree
/// (spec §6.1).
#[derive(Clone, Copy)]
pub struct AnalyzedIr<'a> {
    root: &'a IrNode,
}

impl<'a> AnalyzedIr<'a> {
    pub fn root(&self) -> &'a IrNode {
        self.root
    }
}

/// Runs the semantic analyzer over `ir` with the default [`AnalyzerOptions`].
pub fn analyze<'a>(
    ir: &'a IrNode,
    platform: &PlatformTable,
    builtins: &BuiltinTable,
) -> Result<AnalyzedIr<'a>, AnalyzeError> {
    analyze_with_options(ir, platform, builtins, AnalyzerOptions::default())
}

pub fn analyze_with_options<'a>(
    ir: &'a IrNode,
    platform: &PlatformTable,
    builtins: &BuiltinTable,
    options: AnalyzerOptions,
) -> Result<AnalyzedIr<'a>, AnalyzeError> {
    let _span = tracing::debug_span!("analyze").entered();
    let state = State::new(platform, builtins, options);
    let root_scope = Scope::root();
    state.visit(ir, &root_scope, None)?;
    debug!("analyze pass complete");
    Ok(AnalyzedIr { root: ir })
}

/// The analyzer's mutable working state for one `analyze()` call (spec
/// §4.3's "State" list), minus the scope chain — that is threaded through
/// `visit`'s call stack directly rather than stored here, since each
/// recursive call owns exactly the frames live on its own stack (spec §9,
/// "Scope chains... discarded on return").
struct State<'t> {
    platform: &'t PlatformTable,
    builtins: &'t BuiltinTable,
    options: AnalyzerOptions,
    /// Per-variable working map: defining var id -> its `captured` flag
    /// (spec §4.3). Populated whenever a binding is introduced (`Let`,
    /// function parameter, loop variable, `Match` case binding, `TryCatch`
    /// catch bindings); consulted whenever a reference crosses a function
    /// boundary into an outer definition.
    captured_cells: std::cell::RefCell<rustc_hash::FxHashMap<VarId, &'t AtomicBool>>,
    /// IR node pointers currently on the recursion stack, to catch a cyclic
    /// IR graph (spec §5: "the IR is expected to be a DAG for expressions
    /// and a tree for statements; cycles indicate a bug in the lowerer").
    visiting: std::cell::RefCell<FxHashSet<usize>>,
    next_function_id: std::cell::Cell<u32>,
}

/// A guard node's location plus a short label, used to build consistent
/// error messages without repeating `format!` boilerplate at every call
/// site.
type VisitResult = Result<bool, AnalyzeError>;

impl<'t> State<'t> {
    fn new(platform: &'t PlatformTable, builtins: &'t BuiltinTable, options: AnalyzerOptions) -> Self {
        State {
            platform,
            builtins,
            options,
            captured_cells: std::cell::RefCell::new(rustc_hash::FxHashMap::default()),
            visiting: std::cell::RefCell::new(FxHashSet::default()),
            next_function_id: std::cell::Cell::new(1),
        }
    }

    fn register_def(&self, var_id: VarId, cell: &'t AtomicBool) {
        self.captured_cells.borrow_mut().insert(var_id, cell);
    }

    fn mark_captured(&self, var_id: VarId) {
        if let Some(cell) = self.captured_cells.borrow().get(&var_id) {
            cell.store(true, Ordering::Relaxed);
        }
    }

    /// Value-flow type check: `actual` may freely be `Never` regardless of
    /// `expected` (spec §3.5, "Never flows transparently").
    fn check_flow(
        &self,
        actual: &Type,
        expected: &Type,
        loc: &SourceLocation,
        site: &str,
    ) -> Result<(), AnalyzeError> {
        if actual.is_never() || is_type_equal(actual, expected) {
            Ok(())
        } else {
            Err(AnalyzeError::type_mismatch(
                loc.clone(),
                format!("expected {expected}, found {actual} in {site}"),
            ))
        }
    }

    /// Structural type-to-type check with no `Never` exception: used where
    /// both sides are declarations (a variable's context type, a struct
    /// field's declared type, a function parameter's type), not a computed
    /// value flowing into a context.
    fn check_declared(
        &self,
        actual: &Type,
        expected: &Type,
        loc: &SourceLocation,
        site: &str,
    ) -> Result<(), AnalyzeError> {
        if is_type_equal(actual, expected) {
            Ok(())
        } else {
            Err(AnalyzeError::type_mismatch(
                loc.clone(),
                format!("expected {expected}, found {actual} in {site}"),
            ))
        }
    }

    fn enter(&self, node: &IrNode) -> Result<(), AnalyzeError> {
        if !self.options.detect_cycles {
            return Ok(());
        }
        let mut visiting = self.visiting.borrow_mut();
        if visiting.len() >= MAX_VISITING_DEPTH {
            return Err(AnalyzeError::ir_invariant(
                node.location.clone(),
                format!("IR recursion depth exceeds {MAX_VISITING_DEPTH}, refusing to continue"),
            ));
        }
        if !visiting.insert(node.ptr()) {
            return Err(AnalyzeError::ir_invariant(
                node.location.clone(),
                "cyclic IR reference detected",
            ));
        }
        Ok(())
    }

    fn leave(&self, node: &IrNode) {
        if self.options.detect_cycles {
            self.visiting.borrow_mut().remove(&node.ptr());
        }
    }

    /// Visits `node`, returning whether it is async (spec §4.3's
    /// "Async propagation"). Also stores that result on `node.is_async`.
    fn visit<'p>(
        &self,
        node: &'t IrNode,
        scope: &Scope<'p>,
        expected_return: Option<&Type>,
    ) -> VisitResult {
        self.enter(node)?;
        let result = self.visit_kind(node, scope, expected_return);
        self.leave(node);
        let is_async = result?;
        node.is_async.store(is_async, Ordering::Relaxed);
        Ok(is_async)
    }

    fn visit_kind<'p>(
        &self,
        node: &'t IrNode,
        scope: &Scope<'p>,
        expected_return: Option<&Type>,
    ) -> VisitResult {
        let loc = &node.location;
        match &node.kind {
            IrKind::Value(literal) => {
                let tag = literal.tag();
                if !is_type_equal(&tag, &node.ty) {
                    return Err(AnalyzeError::ir_invariant(
                        loc.clone(),
                        format!("literal tag {tag} does not match declared type {}", node.ty),
                    ));
                }
                Ok(false)
            }

            IrKind::Variable { var_id, name, mutable } => {
                let entry = scope
                    .resolve(name)
                    .ok_or_else(|| AnalyzeError::scope(loc.clone(), format!("variable '{name}' not in scope")))?;
                self.check_declared(&entry.ty, &node.ty, loc, &format!("reference to '{name}'"))?;
                if entry.mutable != *mutable {
                    return Err(AnalyzeError::scope(
                        loc.clone(),
                        format!("mutability mismatch for variable '{name}'"),
                    ));
                }
                if entry.function_id != scope.function_id {
                    self.mark_captured(*var_id);
                }
                let _ = entry.var_id;
                Ok(false)
            }

            IrKind::Let { def, init } => {
                let init_async = self.visit(init, scope, expected_return)?;
                self.check_flow(&init.ty, &def.ty, loc, &format!("let '{}'", def.name))?;
                if scope.is_bound_locally(&def.name) {
                    return Err(AnalyzeError::scope(
                        loc.clone(),
                        format!("'{}' is already bound in this block", def.name),
                    ));
                }
                self.register_def(def.var_id, &def.captured);
                scope.insert(def.name.clone(), def.var_id, def.ty.clone(), def.mutable);
                Ok(init_async)
            }

            IrKind::Assign { var_id, name, value } => {
                let value_async = self.visit(value, scope, expected_return)?;
                let entry = scope
                    .resolve(name)
                    .ok_or_else(|| AnalyzeError::scope(loc.clone(), format!("variable '{name}' not in scope")))?;
                if !entry.mutable {
                    return Err(AnalyzeError::scope(
                        loc.clone(),
                        format!("cannot assign to immutable variable '{name}'"),
                    ));
                }
                self.check_flow(&value.ty, &entry.ty, loc, &format!("assignment to '{name}'"))?;
                if entry.function_id != scope.function_id {
                    self.mark_captured(*var_id);
                }
                Ok(value_async)
            }

            IrKind::Block(statements) => {
                let block_scope = scope.nested();
                let mut is_async = false;
                for (i, stmt) in statements.iter().enumerate() {
                    is_async |= self.visit(stmt, &block_scope, expected_return)?;
                    if i + 1 == statements.len() {
                        if stmt.ty.is_never() {
                            if !node.ty.is_never() {
                                return Err(AnalyzeError::type_mismatch(
                                    loc.clone(),
                                    format!(
                                        "block diverges (last statement is Never) but is declared {}",
                                        node.ty
                                    ),
                                ));
                            }
                        } else {
                            self.check_declared(&stmt.ty, &node.ty, loc, "block result")?;
                        }
                    }
                }
                Ok(is_async)
            }

            IrKind::As { value } => {
                let value_async = self.visit(value, scope, expected_return)?;
                if value.ty.is_never() {
                    return Err(AnalyzeError::subtype(loc.clone(), "cannot cast a Never value"));
                }
                if is_type_equal(&value.ty, &node.ty) {
                    return Err(AnalyzeError::subtype(
                        loc.clone(),
                        format!("unnecessary cast: {} is already {}", value.ty, node.ty),
                    ));
                }
                if !is_subtype(&value.ty, &node.ty) {
                    return Err(AnalyzeError::subtype(
                        loc.clone(),
                        format!("{} is not a subtype of {}", value.ty, node.ty),
                    ));
                }
                Ok(value_async)
            }

            IrKind::Platform { name, args } => {
                trace!(%name, "resolving platform call");
                let signature = self.platform.get(name).ok_or_else(|| {
                    AnalyzeError::scope(loc.clone(), format!("unknown platform function '{name}'"))
                })?;
                if args.len() != signature.inputs.len() {
                    return Err(AnalyzeError::shape(
                        loc.clone(),
                        format!(
                            "platform function '{name}' expects {} argument(s), found {}",
                            signature.inputs.len(),
                            args.len()
                        ),
                    ));
                }
                let mut is_async = signature.is_async();
                for (arg, expected) in args.iter().zip(signature.inputs.iter()) {
                    is_async |= self.visit(arg, scope, expected_return)?;
                    self.check_flow(&arg.ty, expected, &arg.location, &format!("argument to '{name}'"))?;
                }
                self.check_declared(&node.ty, &signature.output, loc, &format!("result of '{name}'"))?;
                Ok(is_async)
            }

            IrKind::Function { params, captures, body } => {
                self.visit_function_like(node, false, params, captures, body, scope)
            }

            IrKind::AsyncFunction { params, captures, body } => {
                self.visit_function_like(node, true, params, captures, body, scope)
            }

            IrKind::Call { callee, args } => {
                let callee_async = self.visit(callee, scope, expected_return)?;
                let TypeKind::Function(inputs, output) = callee.ty.kind() else {
                    return Err(AnalyzeError::shape(
                        callee.location.clone(),
                        format!("expected Function, found {}", callee.ty),
                    ));
                };
                let mut is_async = callee_async;
                self.check_call_args(args, inputs, scope, expected_return, &mut is_async)?;
                self.check_declared(&node.ty, output, loc, "call result")?;
                Ok(is_async)
            }

            IrKind::CallAsync { callee, args } => {
                let callee_async = self.visit(callee, scope, expected_return)?;
                let TypeKind::AsyncFunction(inputs, output) = callee.ty.kind() else {
                    return Err(AnalyzeError::shape(
                        callee.location.clone(),
                        format!("expected AsyncFunction, found {}", callee.ty),
                    ));
                };
                let mut is_async = callee_async;
                self.check_call_args(args, inputs, scope, expected_return, &mut is_async)?;
                self.check_declared(&node.ty, output, loc, "call result")?;
                Ok(true)
            }

            IrKind::Builtin { name, args } => {
                let signature = self
                    .builtins
                    .get(name)
                    .ok_or_else(|| AnalyzeError::ir_invariant(loc.clone(), format!("unknown builtin '{name}'")))?;
                if args.len() != signature.inputs.len() {
                    return Err(AnalyzeError::shape(
                        loc.clone(),
                        format!(
                            "builtin '{name}' expects {} argument(s), found {}",
                            signature.inputs.len(),
                            args.len()
                        ),
                    ));
                }
                let mut is_async = false;
                for (arg, expected) in args.iter().zip(signature.inputs.iter()) {
                    is_async |= self.visit(arg, scope, expected_return)?;
                    self.check_flow(&arg.ty, expected, &arg.location, &format!("argument to '{name}'"))?;
                }
                self.check_declared(&node.ty, &signature.output, loc, &format!("result of '{name}'"))?;
                Ok(is_async)
            }

            IrKind::Return(value) => {
                let value_async = self.visit(value, scope, expected_return)?;
                let Some(expected) = expected_return else {
                    return Err(AnalyzeError::control_flow(loc.clone(), "return outside a function"));
                };
                self.check_flow(&value.ty, expected, loc, "return value")?;
                Ok(value_async)
            }

            IrKind::Break | IrKind::Continue => Ok(false),

            IrKind::Error { message } => {
                let message_async = self.visit(message, scope, expected_return)?;
                self.check_flow(&message.ty, &Type::string(), loc, "error message")?;
                Ok(message_async)
            }

            IrKind::TryCatch { try_body, catch_message, catch_stack, catch_body, finally } => {
                let try_async = self.visit(try_body, scope, expected_return)?;

                self.check_declared(&catch_message.ty, &Type::string(), loc, "catch message variable")?;
                self.check_declared(&catch_stack.ty, &east_types::stack_trace(), loc, "catch stack variable")?;

                let catch_scope = scope.nested();
                self.register_def(catch_message.var_id, &catch_message.captured);
                self.register_def(catch_stack.var_id, &catch_stack.captured);
                catch_scope.insert(catch_message.name.clone(), catch_message.var_id, catch_message.ty.clone(), catch_message.mutable);
                catch_scope.insert(catch_stack.name.clone(), catch_stack.var_id, catch_stack.ty.clone(), catch_stack.mutable);
                let catch_async = self.visit(catch_body, &catch_scope, expected_return)?;

                if try_body.ty.is_never() {
                    self.check_flow(&try_body.ty, &node.ty, loc, "try body")?;
                } else {
                    self.check_declared(&try_body.ty, &node.ty, loc, "try body")?;
                }
                if catch_body.ty.is_never() {
                    self.check_flow(&catch_body.ty, &node.ty, loc, "catch body")?;
                } else {
                    self.check_declared(&catch_body.ty, &node.ty, loc, "catch body")?;
                }
                if try_body.ty.is_never() && catch_body.ty.is_never() && !node.ty.is_never() {
                    return Err(AnalyzeError::control_flow(
                        loc.clone(),
                        "try and catch both diverge but the try/catch is not declared Never",
                    ));
                }

                let mut is_async = try_async || catch_async;
                if let Some(finally) = finally {
                    is_async |= self.visit(finally, scope, expected_return)?;
                }
                Ok(is_async)
            }

            IrKind::NewRef(value) => {
                let TypeKind::Ref(inner) = node.ty.kind() else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("expected Ref, found {}", node.ty)));
                };
                let value_async = self.visit(value, scope, expected_return)?;
                self.check_flow(&value.ty, inner, loc, "ref value")?;
                Ok(value_async)
            }

            IrKind::NewArray(values) => {
                let TypeKind::Array(elem) = node.ty.kind() else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("expected Array, found {}", node.ty)));
                };
                let mut is_async = false;
                for value in values {
                    is_async |= self.visit(value, scope, expected_return)?;
                    self.check_flow(&value.ty, elem, &value.location, "array element")?;
                }
                Ok(is_async)
            }

            IrKind::NewSet(values) => {
                let TypeKind::Set(key) = node.ty.kind() else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("expected Set, found {}", node.ty)));
                };
                if !is_data_type(key) {
                    return Err(AnalyzeError::shape(loc.clone(), format!("Set key type {key} is not a data type")));
                }
                let mut is_async = false;
                for value in values {
                    is_async |= self.visit(value, scope, expected_return)?;
                    self.check_flow(&value.ty, key, &value.location, "set element")?;
                }
                Ok(is_async)
            }

            IrKind::NewDict(entries) => {
                let TypeKind::Dict(key, value_ty) = node.ty.kind() else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("expected Dict, found {}", node.ty)));
                };
                if !is_data_type(key) {
                    return Err(AnalyzeError::shape(loc.clone(), format!("Dict key type {key} is not a data type")));
                }
                let mut is_async = false;
                for (k, v) in entries {
                    is_async |= self.visit(k, scope, expected_return)?;
                    is_async |= self.visit(v, scope, expected_return)?;
                    self.check_flow(&k.ty, key, &k.location, "dict key")?;
                    self.check_flow(&v.ty, value_ty, &v.location, "dict value")?;
                }
                Ok(is_async)
            }

            IrKind::Struct(fields) => {
                let TypeKind::Struct(declared) = node.ty.kind() else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("expected Struct, found {}", node.ty)));
                };
                if fields.len() != declared.len()
                    || fields.iter().zip(declared.iter()).any(|((n1, _), (n2, _))| n1 != n2)
                {
                    return Err(AnalyzeError::ir_invariant(
                        loc.clone(),
                        "struct construction field order differs from the type's declaration order",
                    ));
                }
                let mut is_async = false;
                for ((_, value), (name, declared_ty)) in fields.iter().zip(declared.iter()) {
                    is_async |= self.visit(value, scope, expected_return)?;
                    self.check_flow(&value.ty, declared_ty, &value.location, &format!("field '{name}'"))?;
                }
                Ok(is_async)
            }

            IrKind::Variant { case, payload } => {
                let TypeKind::Variant(cases) = node.ty.kind() else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("expected Variant, found {}", node.ty)));
                };
                let Some((_, case_ty)) = cases.iter().find(|(name, _)| name == case) else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("unknown variant case '{case}'")));
                };
                let payload_async = self.visit(payload, scope, expected_return)?;
                self.check_flow(&payload.ty, case_ty, loc, &format!("case '{case}' payload"))?;
                Ok(payload_async)
            }

            IrKind::GetField { base, field } => {
                let base_async = self.visit(base, scope, expected_return)?;
                let expanded = east_types::expand(&base.ty);
                let TypeKind::Struct(fields) = expanded.kind() else {
                    return Err(AnalyzeError::shape(
                        base.location.clone(),
                        format!("expected Struct, found {}", base.ty),
                    ));
                };
                let Some((_, field_ty)) = fields.iter().find(|(name, _)| name == field) else {
                    return Err(AnalyzeError::shape(loc.clone(), format!("unknown field '{field}'")));
                };
                self.check_declared(&node.ty, field_ty, loc, &format!("field '{field}'"))?;
                Ok(base_async)
            }

            IrKind::Match { subject, cases } => self.visit_match(node, subject, cases, scope, expected_return),

            IrKind::ForArray { collection, item, body } => {
                self.visit_for_single(node, collection, item, body, scope, expected_return, true)
            }
            IrKind::ForSet { collection, item, body } => {
                self.visit_for_single(node, collection, item, body, scope, expected_return, false)
            }

            IrKind::ForDict { collection, key, value, body } => {
                let collection_async = self.visit(collection, scope, expected_return)?;
                let expanded = east_types::expand(&collection.ty);
                let TypeKind::Dict(declared_key, declared_value) = expanded.kind() else {
                    return Err(AnalyzeError::shape(
                        collection.location.clone(),
                        format!("expected Dict, found {}", collection.ty),
                    ));
                };
                self.check_declared(&key.ty, declared_key, loc, "for-dict key variable")?;
                self.check_declared(&value.ty, declared_value, loc, "for-dict value variable")?;
                let body_scope = scope.nested();
                self.register_def(key.var_id, &key.captured);
                self.register_def(value.var_id, &value.captured);
                body_scope.insert(key.name.clone(), key.var_id, key.ty.clone(), key.mutable);
                body_scope.insert(value.name.clone(), value.var_id, value.ty.clone(), value.mutable);
                let body_async = self.visit(body, &body_scope, expected_return)?;
                Ok(collection_async || body_async)
            }

            IrKind::While { predicate, body } => {
                let predicate_async = self.visit(predicate, scope, expected_return)?;
                self.check_flow(&predicate.ty, &Type::boolean(), &predicate.location, "while predicate")?;
                let body_async = self.visit(body, &scope.nested(), expected_return)?;
                Ok(predicate_async || body_async)
            }

            IrKind::IfElse { branches, else_branch } => {
                let mut is_async = false;
                let mut all_never = else_branch.is_none();
                for (predicate, body) in branches {
                    is_async |= self.visit(predicate, scope, expected_return)?;
                    self.check_flow(&predicate.ty, &Type::boolean(), &predicate.location, "if predicate")?;
                    is_async |= self.visit(body, &scope.nested(), expected_return)?;
                    self.check_flow(&body.ty, &node.ty, &body.location, "if branch")?;
                    if !body.ty.is_never() {
                        all_never = false;
                    }
                }
                if let Some(else_branch) = else_branch {
                    is_async |= self.visit(else_branch, &scope.nested(), expected_return)?;
                    self.check_flow(&else_branch.ty, &node.ty, &else_branch.location, "else branch")?;
                    if !else_branch.ty.is_never() {
                        all_never = false;
                    }
                }
                if all_never && !node.ty.is_never() {
                    return Err(AnalyzeError::control_flow(
                        loc.clone(),
                        "every branch diverges but the if/else is not declared Never",
                    ));
                }
                if !all_never && node.ty.is_never() {
                    return Err(AnalyzeError::control_flow(
                        loc.clone(),
                        "if/else is declared Never but some branch does not diverge",
                    ));
                }
                Ok(is_async)
            }

            IrKind::WrapRecursive(value) => {
                let value_async = self.visit(value, scope, expected_return)?;
                let expanded = east_types::expand(&node.ty);
                self.check_declared(&value.ty, &expanded, loc, "recursive wrap")?;
                Ok(value_async)
            }

            IrKind::UnwrapRecursive(value) => {
                let value_async = self.visit(value, scope, expected_return)?;
                if !matches!(value.ty.kind(), TypeKind::Recursive(_)) {
                    return Err(AnalyzeError::shape(
                        value.location.clone(),
                        format!("expected Recursive, found {}", value.ty),
                    ));
                }
                let expanded = east_types::expand(&value.ty);
                self.check_declared(&node.ty, &expanded, loc, "recursive unwrap")?;
                Ok(value_async)
            }
        }
    }

    fn check_call_args<'p>(
        &self,
        args: &'t [IrNode],
        inputs: &[Type],
        scope: &Scope<'p>,
        expected_return: Option<&Type>,
        is_async: &mut bool,
    ) -> Result<(), AnalyzeError> {
        if args.len() != inputs.len() {
            return Err(AnalyzeError::shape(
                args.first().map(|a| a.location.clone()).unwrap_or_else(SourceLocation::synthetic),
                format!("call expects {} argument(s), found {}", inputs.len(), args.len()),
            ));
        }
        for (arg, expected) in args.iter().zip(inputs.iter()) {
            *is_async |= self.visit(arg, scope, expected_return)?;
            self.check_flow(&arg.ty, expected, &arg.location, "call argument")?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn visit_function_like<'p>(
        &self,
        node: &'t IrNode,
        is_async_fn: bool,
        params: &'t [east_ir::VarDef],
        captures: &'t [east_ir::Capture],
        body: &'t IrNode,
        scope: &Scope<'p>,
    ) -> VisitResult {
        let loc = &node.location;
        let (inputs, output) = match node.ty.kind() {
            TypeKind::Function(inputs, output) if !is_async_fn => (inputs, output),
            TypeKind::AsyncFunction(inputs, output) if is_async_fn => (inputs, output),
            _ => {
                return Err(AnalyzeError::shape(
                    loc.clone(),
                    format!(
                        "declared type {} does not match {} node",
                        node.ty,
                        if is_async_fn { "AsyncFunction" } else { "Function" }
                    ),
                ));
            }
        };
        if params.len() != inputs.len() {
            return Err(AnalyzeError::shape(
                loc.clone(),
                format!("function declares {} parameter(s) but its type has {}", params.len(), inputs.len()),
            ));
        }
        for (param, expected) in params.iter().zip(inputs.iter()) {
            self.check_declared(&param.ty, expected, loc, &format!("parameter '{}'", param.name))?;
        }

        for capture in captures {
            let entry = scope.resolve(&capture.name).ok_or_else(|| {
                AnalyzeError::scope(loc.clone(), format!("capture '{}' not found in outer scope", capture.name))
            })?;
            if entry.var_id != capture.var_id {
                return Err(AnalyzeError::scope(
                    loc.clone(),
                    format!("capture '{}' does not refer to its outer definition", capture.name),
                ));
            }
            self.check_declared(&entry.ty, &capture.ty, loc, &format!("capture '{}'", capture.name))?;
            if entry.mutable != capture.mutable {
                return Err(AnalyzeError::scope(
                    loc.clone(),
                    format!("capture '{}' mutability does not match its outer definition", capture.name),
                ));
            }
            self.mark_captured(capture.var_id);
        }

        let function_id = self.next_function_id.get();
        self.next_function_id.set(function_id + 1);
        let fn_scope = Scope::function_root(function_id);
        for capture in captures {
            fn_scope.insert(capture.name.clone(), capture.var_id, capture.ty.clone(), capture.mutable);
        }
        for param in params {
            self.register_def(param.var_id, &param.captured);
            fn_scope.insert(param.name.clone(), param.var_id, param.ty.clone(), param.mutable);
        }

        trace!(function_id, is_async_fn, "entering function body");
        let _ = self.visit(body, &fn_scope, Some(output))?;
        if body.ty.is_never() {
            self.check_flow(&body.ty, output, loc, "function body")?;
        } else {
            self.check_declared(&body.ty, output, loc, "function body")?;
        }
        trace!(function_id, is_async_fn, "leaving function body");

        // Defining a function never itself suspends (spec §4.3).
        Ok(false)
    }

    fn visit_match<'p>(
        &self,
        node: &'t IrNode,
        subject: &'t IrNode,
        cases: &'t [east_ir::IrMatchCase],
        scope: &Scope<'p>,
        expected_return: Option<&Type>,
    ) -> VisitResult {
        let loc = &node.location;
        let subject_async = self.visit(subject, scope, expected_return)?;
        let expanded = east_types::expand(&subject.ty);
        let TypeKind::Variant(declared_cases) = expanded.kind() else {
            return Err(AnalyzeError::shape(
                subject.location.clone(),
                format!("expected Variant, found {}", subject.ty),
            ));
        };

        let mut declared_names: Vec<&Atom> = declared_cases.iter().map(|(name, _)| name).collect();
        declared_names.sort();
        let mut given_names: Vec<&Atom> = cases.iter().map(|c| &c.case).collect();
        given_names.sort();
        if declared_names != given_names {
            return Err(AnalyzeError::shape(loc.clone(), "match is not exhaustive over the variant's cases"));
        }

        let mut is_async = subject_async;
        let mut all_never = !cases.is_empty();
        for case in cases {
            let (_, case_ty) = declared_cases
                .iter()
                .find(|(name, _)| name == &case.case)
                .expect("exhaustiveness already checked above");
            self.check_declared(&case.bound.ty, case_ty, loc, &format!("case '{}' binding", case.case))?;

            let case_scope = scope.nested();
            self.register_def(case.bound.var_id, &case.bound.captured);
            case_scope.insert(case.bound.name.clone(), case.bound.var_id, case.bound.ty.clone(), case.bound.mutable);
            is_async |= self.visit(&case.body, &case_scope, expected_return)?;
            self.check_flow(&case.body.ty, &node.ty, &case.body.location, &format!("case '{}' body", case.case))?;
            if !case.body.ty.is_never() {
                all_never = false;
            }
        }

        if all_never && !node.ty.is_never() {
            return Err(AnalyzeError::control_flow(
                loc.clone(),
                "every match case diverges but the match is not declared Never",
            ));
        }
        if !all_never && node.ty.is_never() {
            return Err(AnalyzeError::control_flow(
                loc.clone(),
                "match is declared Never but some case does not diverge",
            ));
        }
        Ok(is_async)
    }

    #[allow(clippy::too_many_arguments)]
    fn visit_for_single<'p>(
        &self,
        node: &'t IrNode,
        collection: &'t IrNode,
        item: &'t east_ir::VarDef,
        body: &'t IrNode,
        scope: &Scope<'p>,
        expected_return: Option<&Type>,
        is_array: bool,
    ) -> VisitResult {
        let loc = &node.location;
        let collection_async = self.visit(collection, scope, expected_return)?;
        let expanded = east_types::expand(&collection.ty);
        let declared_elem = match expanded.kind() {
            TypeKind::Array(elem) if is_array => elem,
            TypeKind::Set(elem) if !is_array => elem,
            _ => {
                let expected_kind = if is_array { "Array" } else { "Set" };
                return Err(AnalyzeError::shape(
                    collection.location.clone(),
                    format!("expected {expected_kind}, found {}", collection.ty),
                ));
            }
        };
        self.check_declared(&item.ty, declared_elem, loc, "for-loop variable")?;
        let body_scope = scope.nested();
        self.register_def(item.var_id, &item.captured);
        body_scope.insert(item.name.clone(), item.var_id, item.ty.clone(), item.mutable);
        let body_async = self.visit(body, &body_scope, expected_return)?;
        Ok(collection_async || body_async)
    }
}
