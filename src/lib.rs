//! IR core for a data-parallel image-processing compiler.
//!
//! - [`ir`]: typed expression/statement graphs and their canonical printer.
//! - [`trace`]: runtime trace events, the recording sink, and the golden matcher.

pub mod config;
pub mod ir;
pub mod trace;

pub use config::TraceConfig;
pub use ir::{
    print_expr, print_stmt, BinOp, CallKind, Expr, ExprNode, ForKind, IrError, Printer, Range,
    Stmt, StmtNode, Type, TypeKind,
};
pub use trace::{compare_traces, EventKind, RawEvent, TraceError, TraceEvent, TraceSink};
