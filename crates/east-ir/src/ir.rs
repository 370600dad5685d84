//! The IR node set (spec §3.4).
//!
//! Shaped like [`east_ast::AstKind`] node-for-node, with two differences: every
//! variable reference and definition carries a resolved [`VarId`] instead of
//! (or in addition to) a bare name, and every `Function`/`AsyncFunction` node
//! carries an explicit [`Capture`] list computed during lowering. Both the
//! lowerer and the analyzer operate on this tree; the analyzer never
//! allocates a second tree, it fills in `is_async`/`captured` on this one.

use std::sync::atomic::{AtomicBool, Ordering};

use east_common::{Atom, SourceLocation, Span};
use east_ast::Literal;
use east_types::Type;

use crate::var::{Capture, VarDef, VarId};

/// One case of an IR `Match`: the case name, the binding introduced for its
/// payload, and the body visited with that binding in scope.
#[derive(Debug)]
pub struct IrMatchCase {
    pub case: Atom,
    pub bound: VarDef,
    pub body: IrNode,
}

/// A node in the IR. `is_async` starts `false` and is set by the analyzer
/// (spec §4.3, "Async propagation"); nothing upstream of analysis reads it.
/// Backed by an atomic rather than a `Cell` so the whole tree is `Sync`,
/// which `east-analyzer::analyze_many` relies on to hand disjoint roots to
/// separate threads (spec §5).
#[derive(Debug)]
pub struct IrNode {
    pub location: SourceLocation,
    pub span: Span,
    pub ty: Type,
    pub is_async: AtomicBool,
    pub kind: IrKind,
}

#[derive(Debug)]
pub enum IrKind {
    Value(Literal),
    Variable { var_id: VarId, name: Atom, mutable: bool },
    Let { def: VarDef, init: Box<IrNode> },
    Assign { var_id: VarId, name: Atom, value: Box<IrNode> },
    Block(Vec<IrNode>),
    As { value: Box<IrNode> },
    Platform { name: Atom, args: Vec<IrNode> },
    Function { params: Vec<VarDef>, captures: Vec<Capture>, body: Box<IrNode> },
    AsyncFunction { params: Vec<VarDef>, captures: Vec<Capture>, body: Box<IrNode> },
    Call { callee: Box<IrNode>, args: Vec<IrNode> },
    CallAsync { callee: Box<IrNode>, args: Vec<IrNode> },
    Builtin { name: Atom, args: Vec<IrNode> },
    Return(Box<IrNode>),
    Break,
    Continue,
    Error { message: Box<IrNode> },
    TryCatch {
        try_body: Box<IrNode>,
        catch_message: VarDef,
        catch_stack: VarDef,
        catch_body: Box<IrNode>,
        finally: Option<Box<IrNode>>,
    },
    NewRef(Box<IrNode>),
    NewArray(Vec<IrNode>),
    NewSet(Vec<IrNode>),
    NewDict(Vec<(IrNode, IrNode)>),
    Struct(Vec<(Atom, IrNode)>),
    Variant { case: Atom, payload: Box<IrNode> },
    GetField { base: Box<IrNode>, field: Atom },
    Match { subject: Box<IrNode>, cases: Vec<IrMatchCase> },
    ForArray { collection: Box<IrNode>, item: VarDef, body: Box<IrNode> },
    ForSet { collection: Box<IrNode>, item: VarDef, body: Box<IrNode> },
    ForDict { collection: Box<IrNode>, key: VarDef, value: VarDef, body: Box<IrNode> },
    While { predicate: Box<IrNode>, body: Box<IrNode> },
    IfElse { branches: Vec<(IrNode, IrNode)>, else_branch: Option<Box<IrNode>> },
    WrapRecursive(Box<IrNode>),
    UnwrapRecursive(Box<IrNode>),
}

impl IrNode {
    pub fn new(location: SourceLocation, span: Span, ty: Type, kind: IrKind) -> Self {
        IrNode { location, span, ty, is_async: AtomicBool::new(false), kind }
    }

    pub fn is_async(&self) -> bool {
        self.is_async.load(Ordering::Relaxed)
    }

    pub fn mark_async(&self) {
        self.is_async.store(true, Ordering::Relaxed);
    }

    /// Stable identity for this node within one IR tree, used by the
    /// analyzer's cyclic-IR detector (spec §5).
    pub fn ptr(&self) -> usize {
        self as *const IrNode as usize
    }
}
