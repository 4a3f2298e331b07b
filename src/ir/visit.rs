//! Read-only traversal over expression and statement graphs.
//!
//! Override `visit_expr` / `visit_stmt` and call the matching `walk_*`
//! function to continue into children. The walkers match exhaustively, so
//! adding a node kind breaks every traversal until it is handled.

use super::expr::{Expr, ExprNode};
use super::stmt::{Stmt, StmtNode};

pub trait Visitor {
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }
}

/// Visit every direct child expression of `expr`, in print order.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr.node() {
        ExprNode::IntImm(_) | ExprNode::FloatImm(_) | ExprNode::Var { .. } => {}
        ExprNode::Cast { value, .. } => visitor.visit_expr(value),
        ExprNode::Binary { a, b, .. } => {
            visitor.visit_expr(a);
            visitor.visit_expr(b);
        }
        ExprNode::Not(a) => visitor.visit_expr(a),
        ExprNode::Select {
            condition,
            true_value,
            false_value,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(true_value);
            visitor.visit_expr(false_value);
        }
        ExprNode::Load { index, .. } => visitor.visit_expr(index),
        ExprNode::Ramp { base, stride, .. } => {
            visitor.visit_expr(base);
            visitor.visit_expr(stride);
        }
        ExprNode::Broadcast { value, .. } => visitor.visit_expr(value),
        ExprNode::Call { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprNode::Let { value, body, .. } => {
            visitor.visit_expr(value);
            visitor.visit_expr(body);
        }
    }
}

/// Visit every direct child of `stmt`, expressions before nested bodies.
pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt.node() {
        StmtNode::LetStmt { value, body, .. } => {
            visitor.visit_expr(value);
            visitor.visit_stmt(body);
        }
        StmtNode::PrintStmt { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        StmtNode::AssertStmt { condition, .. } => visitor.visit_expr(condition),
        StmtNode::Pipeline {
            produce,
            update,
            consume,
            ..
        } => {
            visitor.visit_stmt(produce);
            if let Some(update) = update {
                visitor.visit_stmt(update);
            }
            visitor.visit_stmt(consume);
        }
        StmtNode::For {
            min, extent, body, ..
        } => {
            visitor.visit_expr(min);
            visitor.visit_expr(extent);
            visitor.visit_stmt(body);
        }
        StmtNode::Store { index, value, .. } => {
            visitor.visit_expr(index);
            visitor.visit_expr(value);
        }
        StmtNode::Provide { args, value, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
            visitor.visit_expr(value);
        }
        StmtNode::Allocate { size, body, .. } => {
            visitor.visit_expr(size);
            visitor.visit_stmt(body);
        }
        StmtNode::Realize { bounds, body, .. } => {
            for range in bounds {
                visitor.visit_expr(&range.min);
                visitor.visit_expr(&range.extent);
            }
            visitor.visit_stmt(body);
        }
        StmtNode::Block { first, rest } => {
            visitor.visit_stmt(first);
            if let Some(rest) = rest {
                visitor.visit_stmt(rest);
            }
        }
    }
}
