//! Intermediate representation: typed expression and statement graphs.
//!
//! Nodes are immutable and reference-counted. Passes outside this crate build
//! and rewrite them; here they are only represented, checked, and printed.

pub mod check;
pub mod error;
pub mod expr;
pub mod printer;
pub mod stmt;
pub mod types;
pub mod visit;

pub use error::IrError;
pub use expr::{BinOp, CallKind, Expr, ExprNode};
pub use printer::{print_expr, print_stmt, Printer};
pub use stmt::{ForKind, Range, Stmt, StmtNode};
pub use types::{Type, TypeKind};
