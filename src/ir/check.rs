//! Well-formedness checks for IR built through the unchecked constructors.
//!
//! Collects every violation instead of stopping at the first one.

use std::collections::HashSet;

use super::error::IrError;
use super::expr::{CallKind, Expr, ExprNode};
use super::stmt::{Stmt, StmtNode};
use super::visit::{walk_expr, walk_stmt, Visitor};

pub fn check_expr(expr: &Expr) -> Result<(), Vec<IrError>> {
    let mut checker = Checker::default();
    checker.visit_expr(expr);
    checker.finish()
}

pub fn check_stmt(stmt: &Stmt) -> Result<(), Vec<IrError>> {
    let mut scoped = ScopedBuffers::default();
    scoped.visit_stmt(stmt);

    let mut checker = Checker {
        scoped: scoped.0,
        ..Checker::default()
    };
    checker.visit_stmt(stmt);
    checker.finish()
}

/// Names introduced anywhere in the graph by `Allocate` or `Realize`.
#[derive(Default)]
struct ScopedBuffers(HashSet<String>);

impl Visitor for ScopedBuffers {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt.node() {
            StmtNode::Allocate { buffer, .. } | StmtNode::Realize { buffer, .. } => {
                self.0.insert(buffer.clone());
            }
            _ => {}
        }
        walk_stmt(self, stmt);
    }
}

struct OpenScope {
    buffer: String,
    /// Dimensionality for `Realize`; `None` for flat allocations.
    dims: Option<usize>,
}

#[derive(Default)]
struct Checker {
    scoped: HashSet<String>,
    open: Vec<OpenScope>,
    errors: Vec<IrError>,
}

impl Checker {
    fn finish(self) -> Result<(), Vec<IrError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn innermost(&self, buffer: &str) -> Option<&OpenScope> {
        self.open.iter().rev().find(|s| s.buffer == buffer)
    }

    fn reference(&mut self, buffer: &str) {
        if self.scoped.contains(buffer) && self.innermost(buffer).is_none() {
            self.errors.push(IrError::OutOfScope(buffer.to_string()));
        }
    }

    /// Ramp and Broadcast widen a scalar into at least one lane.
    fn vector_operand(&mut self, op: &'static str, operand: &Expr, lanes: u16) {
        if lanes == 0 {
            self.errors.push(IrError::ZeroLanes { op });
        }
        if !operand.ty().is_scalar() {
            self.errors.push(IrError::NotScalar {
                op,
                found: operand.ty(),
            });
        }
    }

    fn with_scope(&mut self, buffer: &str, dims: Option<usize>, body: &Stmt) {
        self.open.push(OpenScope {
            buffer: buffer.to_string(),
            dims,
        });
        self.visit_stmt(body);
        self.open.pop();
    }
}

impl Visitor for Checker {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr.node() {
            ExprNode::Binary { op, a, b } => {
                if a.ty() != b.ty() {
                    self.errors.push(IrError::TypeMismatch {
                        op: op.name(),
                        lhs: a.ty(),
                        rhs: b.ty(),
                    });
                } else if op.is_logical() && !a.ty().is_bool() {
                    self.errors.push(IrError::NotBoolean {
                        op: op.name(),
                        found: a.ty(),
                    });
                }
            }
            ExprNode::Not(a) if !a.ty().is_bool() => {
                self.errors.push(IrError::NotBoolean {
                    op: "not",
                    found: a.ty(),
                });
            }
            ExprNode::Select {
                condition,
                true_value,
                false_value,
            } => {
                if !condition.ty().is_bool() {
                    self.errors.push(IrError::NotBoolean {
                        op: "select",
                        found: condition.ty(),
                    });
                }
                if true_value.ty() != false_value.ty() {
                    self.errors.push(IrError::TypeMismatch {
                        op: "select",
                        lhs: true_value.ty(),
                        rhs: false_value.ty(),
                    });
                }
            }
            ExprNode::Ramp {
                base,
                stride,
                lanes,
            } => {
                self.vector_operand("ramp", base, *lanes);
                if base.ty() != stride.ty() {
                    self.errors.push(IrError::TypeMismatch {
                        op: "ramp",
                        lhs: base.ty(),
                        rhs: stride.ty(),
                    });
                }
            }
            ExprNode::Broadcast { value, lanes } => self.vector_operand("broadcast", value, *lanes),
            ExprNode::Load { buffer, .. } => self.reference(buffer),
            ExprNode::Call {
                name,
                kind: CallKind::Producer | CallKind::Image,
                ..
            } => self.reference(name),
            _ => {}
        }
        walk_expr(self, expr);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt.node() {
            StmtNode::Allocate {
                buffer, size, body, ..
            } => {
                self.visit_expr(size);
                self.with_scope(buffer, None, body);
                return;
            }
            StmtNode::Realize {
                buffer,
                bounds,
                body,
            } => {
                for range in bounds {
                    self.visit_expr(&range.min);
                    self.visit_expr(&range.extent);
                }
                self.with_scope(buffer, Some(bounds.len()), body);
                return;
            }
            StmtNode::For {
                name, min, extent, ..
            } => {
                for (which, bound) in [("min", min), ("extent", extent)] {
                    if !bound.ty().is_integer() {
                        self.errors.push(IrError::NonIntegerLoopBound {
                            var: name.clone(),
                            which,
                            found: bound.ty(),
                        });
                    }
                }
            }
            StmtNode::AssertStmt { condition, .. } if !condition.ty().is_bool() => {
                self.errors.push(IrError::NotBoolean {
                    op: "assert",
                    found: condition.ty(),
                });
            }
            StmtNode::Pipeline { buffer, .. } | StmtNode::Store { buffer, .. } => {
                self.reference(buffer);
            }
            StmtNode::Provide { buffer, args, .. } => {
                self.reference(buffer);
                if let Some(expected) = self.innermost(buffer).and_then(|s| s.dims) {
                    if expected != args.len() {
                        self.errors.push(IrError::DimensionMismatch {
                            buffer: buffer.clone(),
                            expected,
                            found: args.len(),
                        });
                    }
                }
            }
            _ => {}
        }
        walk_stmt(self, stmt);
    }
}
