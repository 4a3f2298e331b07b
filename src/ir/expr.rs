//! Expression nodes.
//!
//! An [`Expr`] is a cheap, cloneable handle to an immutable node. Clones share
//! the node, so a subexpression may appear under several parents and the
//! expression graph is a DAG rather than a tree.

use std::ops;
use std::sync::Arc;

use super::error::IrError;
use super::types::Type;

// ─── Operators ─────────────────────────────────────────────────────

/// Two-operand expression kinds.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum BinOp {
    // ── Arithmetic ──
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Min,
    Max,

    // ── Comparison ──
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // ── Logical ──
    And,
    Or,
}

impl BinOp {
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::Mod => "mod",
            BinOp::Min => "min",
            BinOp::Max => "max",
            BinOp::Eq => "eq",
            BinOp::Ne => "ne",
            BinOp::Lt => "lt",
            BinOp::Le => "le",
            BinOp::Gt => "gt",
            BinOp::Ge => "ge",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

/// What a [`ExprNode::Call`] refers to.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum CallKind {
    /// An ordinary external function (e.g. `sin`).
    Extern,
    /// A read from another pipeline stage's buffer.
    Producer,
    /// A read from an input image.
    Image,
}

// ─── Nodes ─────────────────────────────────────────────────────────

/// The closed set of expression kinds.
#[derive(Clone, Debug)]
pub enum ExprNode {
    IntImm(i32),
    FloatImm(f32),
    Cast {
        ty: Type,
        value: Expr,
    },
    Var {
        ty: Type,
        name: String,
    },
    Binary {
        op: BinOp,
        a: Expr,
        b: Expr,
    },
    Not(Expr),
    Select {
        condition: Expr,
        true_value: Expr,
        false_value: Expr,
    },
    Load {
        ty: Type,
        buffer: String,
        index: Expr,
    },
    Ramp {
        base: Expr,
        stride: Expr,
        lanes: u16,
    },
    Broadcast {
        value: Expr,
        lanes: u16,
    },
    Call {
        ty: Type,
        name: String,
        args: Vec<Expr>,
        kind: CallKind,
    },
    Let {
        name: String,
        value: Expr,
        body: Expr,
    },
}

impl ExprNode {
    /// Result type of this node, computed from its fields and children.
    fn result_type(&self) -> Type {
        match self {
            ExprNode::IntImm(_) => Type::int(32),
            ExprNode::FloatImm(_) => Type::float(32),
            ExprNode::Cast { ty, .. } | ExprNode::Var { ty, .. } => *ty,
            ExprNode::Load { ty, .. } | ExprNode::Call { ty, .. } => *ty,
            ExprNode::Binary { op, a, .. } => {
                if op.is_comparison() {
                    Type {
                        lanes: a.ty().lanes,
                        ..Type::bool()
                    }
                } else {
                    a.ty()
                }
            }
            ExprNode::Not(a) => a.ty(),
            ExprNode::Select { true_value, .. } => true_value.ty(),
            // Lane counts stay unchecked here; `check_expr` reports zero lanes.
            ExprNode::Ramp { base, lanes, .. } => Type {
                lanes: *lanes,
                ..base.ty()
            },
            ExprNode::Broadcast { value, lanes } => Type {
                lanes: *lanes,
                ..value.ty()
            },
            ExprNode::Let { body, .. } => body.ty(),
        }
    }
}

#[derive(Debug)]
struct ExprInner {
    ty: Type,
    node: ExprNode,
}

/// Shared handle to an immutable expression node.
#[derive(Clone, Debug)]
pub struct Expr(Arc<ExprInner>);

impl Expr {
    /// Wrap a node without validating operand types.
    ///
    /// Prefer the checked constructors; graphs built through this entry point
    /// can be validated afterwards with [`crate::ir::check::check_expr`].
    pub fn new(node: ExprNode) -> Self {
        let ty = node.result_type();
        Expr(Arc::new(ExprInner { ty, node }))
    }

    pub fn node(&self) -> &ExprNode {
        &self.0.node
    }

    pub fn ty(&self) -> Type {
        self.0.ty
    }

    /// True when both handles point at the same node.
    pub fn same_node(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // ── Leaves ──

    pub fn int(value: i32) -> Self {
        Self::new(ExprNode::IntImm(value))
    }

    pub fn float(value: f32) -> Self {
        Self::new(ExprNode::FloatImm(value))
    }

    pub fn var(ty: Type, name: impl Into<String>) -> Self {
        Self::new(ExprNode::Var {
            ty,
            name: name.into(),
        })
    }

    pub fn cast(ty: Type, value: Expr) -> Self {
        Self::new(ExprNode::Cast { ty, value })
    }

    // ── Checked composites ──

    /// Build a two-operand node. Operands must share a type; `And`/`Or`
    /// additionally require boolean operands.
    pub fn binary(op: BinOp, a: Expr, b: Expr) -> Result<Self, IrError> {
        if a.ty() != b.ty() {
            return Err(IrError::TypeMismatch {
                op: op.name(),
                lhs: a.ty(),
                rhs: b.ty(),
            });
        }
        if op.is_logical() && !a.ty().is_bool() {
            return Err(IrError::NotBoolean {
                op: op.name(),
                found: a.ty(),
            });
        }
        Ok(Self::new(ExprNode::Binary { op, a, b }))
    }

    pub fn min(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Min, a, b)
    }

    pub fn max(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Max, a, b)
    }

    pub fn eq(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Eq, a, b)
    }

    pub fn ne(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Ne, a, b)
    }

    pub fn lt(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Lt, a, b)
    }

    pub fn le(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Le, a, b)
    }

    pub fn gt(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Gt, a, b)
    }

    pub fn ge(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Ge, a, b)
    }

    pub fn and(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::And, a, b)
    }

    pub fn or(a: Expr, b: Expr) -> Result<Self, IrError> {
        Self::binary(BinOp::Or, a, b)
    }

    pub fn not(a: Expr) -> Result<Self, IrError> {
        if !a.ty().is_bool() {
            return Err(IrError::NotBoolean {
                op: "not",
                found: a.ty(),
            });
        }
        Ok(Self::new(ExprNode::Not(a)))
    }

    pub fn select(condition: Expr, true_value: Expr, false_value: Expr) -> Result<Self, IrError> {
        if !condition.ty().is_bool() {
            return Err(IrError::NotBoolean {
                op: "select",
                found: condition.ty(),
            });
        }
        if true_value.ty() != false_value.ty() {
            return Err(IrError::TypeMismatch {
                op: "select",
                lhs: true_value.ty(),
                rhs: false_value.ty(),
            });
        }
        Ok(Self::new(ExprNode::Select {
            condition,
            true_value,
            false_value,
        }))
    }

    pub fn load(ty: Type, buffer: impl Into<String>, index: Expr) -> Self {
        Self::new(ExprNode::Load {
            ty,
            buffer: buffer.into(),
            index,
        })
    }

    /// `lanes` consecutive values `base, base + stride, ...`.
    pub fn ramp(base: Expr, stride: Expr, lanes: u16) -> Result<Self, IrError> {
        if lanes == 0 {
            return Err(IrError::ZeroLanes { op: "ramp" });
        }
        if !base.ty().is_scalar() {
            return Err(IrError::NotScalar {
                op: "ramp",
                found: base.ty(),
            });
        }
        if base.ty() != stride.ty() {
            return Err(IrError::TypeMismatch {
                op: "ramp",
                lhs: base.ty(),
                rhs: stride.ty(),
            });
        }
        Ok(Self::new(ExprNode::Ramp {
            base,
            stride,
            lanes,
        }))
    }

    pub fn broadcast(value: Expr, lanes: u16) -> Result<Self, IrError> {
        if lanes == 0 {
            return Err(IrError::ZeroLanes { op: "broadcast" });
        }
        if !value.ty().is_scalar() {
            return Err(IrError::NotScalar {
                op: "broadcast",
                found: value.ty(),
            });
        }
        Ok(Self::new(ExprNode::Broadcast { value, lanes }))
    }

    pub fn call(ty: Type, name: impl Into<String>, args: Vec<Expr>, kind: CallKind) -> Self {
        Self::new(ExprNode::Call {
            ty,
            name: name.into(),
            args,
            kind,
        })
    }

    /// `let name = value in body`.
    pub fn let_in(name: impl Into<String>, value: Expr, body: Expr) -> Self {
        Self::new(ExprNode::Let {
            name: name.into(),
            value,
            body,
        })
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::int(value)
    }
}

impl From<f32> for Expr {
    fn from(value: f32) -> Self {
        Expr::float(value)
    }
}

impl From<&Expr> for Expr {
    fn from(value: &Expr) -> Self {
        value.clone()
    }
}

// ─── Operator sugar ────────────────────────────────────────────────
//
// Mismatched operand types here are construction bugs, not recoverable
// conditions; use `Expr::binary` to handle them as errors.

fn build_or_panic(op: BinOp, a: Expr, b: Expr) -> Expr {
    match Expr::binary(op, a, b) {
        Ok(expr) => expr,
        Err(err) => panic!("malformed IR: {}", err),
    }
}

macro_rules! impl_arith_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Expr>> ops::$trait<T> for Expr {
            type Output = Expr;

            fn $method(self, rhs: T) -> Expr {
                build_or_panic($op, self, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::$trait<T> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: T) -> Expr {
                build_or_panic($op, self.clone(), rhs.into())
            }
        }
    };
}

impl_arith_op!(Add, add, BinOp::Add);
impl_arith_op!(Sub, sub, BinOp::Sub);
impl_arith_op!(Mul, mul, BinOp::Mul);
impl_arith_op!(Div, div, BinOp::Div);
impl_arith_op!(Rem, rem, BinOp::Mod);

impl ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        match Expr::not(self) {
            Ok(expr) => expr,
            Err(err) => panic!("malformed IR: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var(Type::int(32), "x")
    }

    #[test]
    fn test_immediate_types() {
        assert_eq!(Expr::int(3).ty(), Type::int(32));
        assert_eq!(Expr::float(0.5).ty(), Type::float(32));
    }

    #[test]
    fn test_arithmetic_keeps_operand_type() {
        let e = x() + 3;
        assert_eq!(e.ty(), Type::int(32));
        assert!(matches!(e.node(), ExprNode::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn test_comparison_is_boolean_with_lanes() {
        let v = Expr::var(Type::float(32).vector(4), "v");
        let c = Expr::lt(v.clone(), v).unwrap();
        assert_eq!(c.ty(), Type::bool().vector(4));
    }

    #[test]
    fn test_binary_type_mismatch() {
        let err = Expr::binary(BinOp::Add, x(), Expr::float(1.0)).unwrap_err();
        assert_eq!(
            err,
            IrError::TypeMismatch {
                op: "add",
                lhs: Type::int(32),
                rhs: Type::float(32),
            }
        );
    }

    #[test]
    fn test_logic_requires_bool() {
        assert!(matches!(
            Expr::and(x(), x()),
            Err(IrError::NotBoolean { op: "and", .. })
        ));
        assert!(Expr::not(x()).is_err());
        let c = Expr::gt(x(), Expr::int(0)).unwrap();
        assert!(Expr::and(c.clone(), c.clone()).is_ok());
        assert_eq!((!c).ty(), Type::bool());
    }

    #[test]
    #[should_panic(expected = "malformed IR")]
    fn test_operator_panics_on_mismatch() {
        let _ = x() + 1.5f32;
    }

    #[test]
    fn test_select_checks() {
        let c = Expr::eq(x(), Expr::int(1)).unwrap();
        assert!(Expr::select(x(), x(), x()).is_err());
        assert!(Expr::select(c.clone(), x(), Expr::float(0.0)).is_err());
        let s = Expr::select(c, x(), Expr::int(0)).unwrap();
        assert_eq!(s.ty(), Type::int(32));
    }

    #[test]
    fn test_ramp_and_broadcast_widen() {
        let r = Expr::ramp(x(), Expr::int(1), 4).unwrap();
        assert_eq!(r.ty(), Type::int(32).vector(4));
        let b = Expr::broadcast(Expr::float(2.0), 8).unwrap();
        assert_eq!(b.ty(), Type::float(32).vector(8));
        assert!(matches!(
            Expr::broadcast(Expr::int(1), 0),
            Err(IrError::ZeroLanes { .. })
        ));
        assert!(matches!(
            Expr::broadcast(r, 2),
            Err(IrError::NotScalar { .. })
        ));
    }

    #[test]
    fn test_let_takes_body_type() {
        let e = Expr::let_in("t", Expr::float(1.0), Expr::int(2));
        assert_eq!(e.ty(), Type::int(32));
    }

    #[test]
    fn test_shared_subexpression() {
        let shared = x() * 2;
        let sum = &shared + shared.clone();
        match sum.node() {
            ExprNode::Binary { a, b, .. } => assert!(a.same_node(b)),
            other => panic!("expected Binary, got {:?}", other),
        }
    }
}
