//! Statement nodes: control flow, storage lifetime, and pipeline staging.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::IrError;
use super::expr::Expr;
use super::types::Type;

/// Scheduling intent attached to a loop. Never executed by this crate.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForKind {
    Serial,
    Parallel,
    Unrolled,
    Vectorized,
}

impl fmt::Display for ForKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            ForKind::Serial => "for",
            ForKind::Parallel => "parallel",
            ForKind::Unrolled => "unrolled",
            ForKind::Vectorized => "vectorized",
        };
        f.write_str(keyword)
    }
}

/// One dimension of a realized region.
#[derive(Clone, Debug)]
pub struct Range {
    pub min: Expr,
    pub extent: Expr,
}

impl Range {
    pub fn new(min: impl Into<Expr>, extent: impl Into<Expr>) -> Self {
        Self {
            min: min.into(),
            extent: extent.into(),
        }
    }
}

/// The closed set of statement kinds.
#[derive(Clone, Debug)]
pub enum StmtNode {
    LetStmt {
        name: String,
        value: Expr,
        body: Stmt,
    },
    PrintStmt {
        prefix: String,
        args: Vec<Expr>,
    },
    AssertStmt {
        condition: Expr,
        message: String,
    },
    /// Realization phases of `buffer`: produce, optional update, consume.
    Pipeline {
        buffer: String,
        produce: Stmt,
        update: Option<Stmt>,
        consume: Stmt,
    },
    For {
        name: String,
        min: Expr,
        extent: Expr,
        kind: ForKind,
        body: Stmt,
    },
    Store {
        buffer: String,
        index: Expr,
        value: Expr,
    },
    /// Pre-lowering write to a multi-dimensional function.
    Provide {
        buffer: String,
        args: Vec<Expr>,
        value: Expr,
    },
    /// `buffer` lives for the duration of `body`.
    Allocate {
        buffer: String,
        ty: Type,
        size: Expr,
        body: Stmt,
    },
    Realize {
        buffer: String,
        bounds: Vec<Range>,
        body: Stmt,
    },
    /// `rest == None` marks the last statement of the chain.
    Block {
        first: Stmt,
        rest: Option<Stmt>,
    },
}

/// Shared handle to an immutable statement node.
#[derive(Clone, Debug)]
pub struct Stmt(Arc<StmtNode>);

impl Stmt {
    /// Wrap a node without validation; see [`crate::ir::check::check_stmt`].
    pub fn new(node: StmtNode) -> Self {
        Stmt(Arc::new(node))
    }

    pub fn node(&self) -> &StmtNode {
        &self.0
    }

    pub fn same_node(&self, other: &Stmt) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn let_stmt(name: impl Into<String>, value: Expr, body: Stmt) -> Self {
        Self::new(StmtNode::LetStmt {
            name: name.into(),
            value,
            body,
        })
    }

    pub fn print(prefix: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::new(StmtNode::PrintStmt {
            prefix: prefix.into(),
            args,
        })
    }

    pub fn assert(condition: Expr, message: impl Into<String>) -> Result<Self, IrError> {
        if !condition.ty().is_bool() {
            return Err(IrError::NotBoolean {
                op: "assert",
                found: condition.ty(),
            });
        }
        Ok(Self::new(StmtNode::AssertStmt {
            condition,
            message: message.into(),
        }))
    }

    pub fn pipeline(
        buffer: impl Into<String>,
        produce: Stmt,
        update: Option<Stmt>,
        consume: Stmt,
    ) -> Self {
        Self::new(StmtNode::Pipeline {
            buffer: buffer.into(),
            produce,
            update,
            consume,
        })
    }

    /// Build a loop; `min` and `extent` must be integer-typed.
    pub fn for_loop(
        name: impl Into<String>,
        min: impl Into<Expr>,
        extent: impl Into<Expr>,
        kind: ForKind,
        body: Stmt,
    ) -> Result<Self, IrError> {
        let name = name.into();
        let min = min.into();
        let extent = extent.into();
        for (which, bound) in [("min", &min), ("extent", &extent)] {
            if !bound.ty().is_integer() {
                return Err(IrError::NonIntegerLoopBound {
                    var: name,
                    which,
                    found: bound.ty(),
                });
            }
        }
        Ok(Self::new(StmtNode::For {
            name,
            min,
            extent,
            kind,
            body,
        }))
    }

    pub fn store(buffer: impl Into<String>, index: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        Self::new(StmtNode::Store {
            buffer: buffer.into(),
            index: index.into(),
            value: value.into(),
        })
    }

    pub fn provide(buffer: impl Into<String>, args: Vec<Expr>, value: impl Into<Expr>) -> Self {
        Self::new(StmtNode::Provide {
            buffer: buffer.into(),
            args,
            value: value.into(),
        })
    }

    pub fn allocate(buffer: impl Into<String>, ty: Type, size: impl Into<Expr>, body: Stmt) -> Self {
        Self::new(StmtNode::Allocate {
            buffer: buffer.into(),
            ty,
            size: size.into(),
            body,
        })
    }

    pub fn realize(buffer: impl Into<String>, bounds: Vec<Range>, body: Stmt) -> Self {
        Self::new(StmtNode::Realize {
            buffer: buffer.into(),
            bounds,
            body,
        })
    }

    pub fn block(first: Stmt, rest: Option<Stmt>) -> Self {
        Self::new(StmtNode::Block { first, rest })
    }

    /// Fold statements into a right-nested `Block` chain. A single statement
    /// is returned unwrapped; an empty list yields `None`.
    pub fn sequence(stmts: Vec<Stmt>) -> Option<Self> {
        let mut iter = stmts.into_iter().rev();
        let last = iter.next()?;
        Some(iter.fold(last, |rest, first| Self::block(first, Some(rest))))
    }
}
