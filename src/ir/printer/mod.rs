//! Canonical text rendering of IR.
//!
//! Output is a pure function of the graph shape: shared subexpressions are
//! printed in full at every occurrence, and printing the same graph twice
//! yields identical text. Statement indentation is passed down the recursion
//! as a plain value, so every nested body returns to its parent's indent.

mod expr;
mod stmt;

#[cfg(test)]
mod tests;

use std::fmt;

use super::expr::Expr;
use super::stmt::Stmt;

/// Spaces added for each nested statement body.
const INDENT_STEP: usize = 2;

/// Streams IR text into any `fmt::Write` sink.
pub struct Printer<'w, W: fmt::Write + ?Sized> {
    out: &'w mut W,
}

impl<'w, W: fmt::Write + ?Sized> Printer<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self { out }
    }

    pub fn print_expr(&mut self, expr: &Expr) -> fmt::Result {
        self.emit_expr(expr)
    }

    /// Print a statement starting at column zero. Every line ends in `\n`.
    pub fn print_stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        self.emit_stmt(stmt, 0)
    }

    fn emit_indent(&mut self, indent: usize) -> fmt::Result {
        write!(self.out, "{:width$}", "", width = indent)
    }

    /// Comma-separated expressions, no surrounding delimiters.
    fn emit_list(&mut self, exprs: &[Expr]) -> fmt::Result {
        for (i, e) in exprs.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.emit_expr(e)?;
        }
        Ok(())
    }
}

pub fn print_expr(expr: &Expr) -> String {
    expr.to_string()
}

pub fn print_stmt(stmt: &Stmt) -> String {
    stmt.to_string()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).print_expr(self)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).print_stmt(self)
    }
}
