use std::fmt;

use super::{Printer, INDENT_STEP};
use crate::ir::stmt::{Stmt, StmtNode};

impl<W: fmt::Write + ?Sized> Printer<'_, W> {
    pub(super) fn emit_stmt(&mut self, stmt: &Stmt, indent: usize) -> fmt::Result {
        let inner = indent + INDENT_STEP;
        match stmt.node() {
            StmtNode::LetStmt { name, value, body } => {
                self.emit_indent(indent)?;
                write!(self.out, "let {} = ", name)?;
                self.emit_expr(value)?;
                self.out.write_char('\n')?;
                self.emit_stmt(body, indent)
            }
            StmtNode::PrintStmt { prefix, args } => {
                self.emit_indent(indent)?;
                write!(self.out, "print({}", prefix)?;
                for arg in args {
                    self.out.write_str(", ")?;
                    self.emit_expr(arg)?;
                }
                self.out.write_str(")\n")
            }
            StmtNode::AssertStmt { condition, message } => {
                self.emit_indent(indent)?;
                self.out.write_str("assert(")?;
                self.emit_expr(condition)?;
                writeln!(self.out, ", \"{}\")", message)
            }
            StmtNode::Pipeline {
                buffer,
                produce,
                update,
                consume,
            } => {
                self.emit_indent(indent)?;
                writeln!(self.out, "produce {} {{", buffer)?;
                self.emit_stmt(produce, inner)?;
                if let Some(update) = update {
                    self.emit_indent(indent)?;
                    self.out.write_str("} update {\n")?;
                    self.emit_stmt(update, inner)?;
                }
                self.emit_indent(indent)?;
                self.out.write_str("} consume {\n")?;
                self.emit_stmt(consume, inner)?;
                self.emit_indent(indent)?;
                self.out.write_str("}\n")
            }
            StmtNode::For {
                name,
                min,
                extent,
                kind,
                body,
            } => {
                self.emit_indent(indent)?;
                write!(self.out, "{} ({}, ", kind, name)?;
                self.emit_expr(min)?;
                self.out.write_str(", ")?;
                self.emit_expr(extent)?;
                self.out.write_str(") {\n")?;
                self.emit_stmt(body, inner)?;
                self.emit_indent(indent)?;
                self.out.write_str("}\n")
            }
            StmtNode::Store {
                buffer,
                index,
                value,
            } => {
                self.emit_indent(indent)?;
                write!(self.out, "{}[", buffer)?;
                self.emit_expr(index)?;
                self.out.write_str("] = ")?;
                self.emit_expr(value)?;
                self.out.write_char('\n')
            }
            StmtNode::Provide {
                buffer,
                args,
                value,
            } => {
                self.emit_indent(indent)?;
                write!(self.out, "{}(", buffer)?;
                self.emit_list(args)?;
                self.out.write_str(") = ")?;
                self.emit_expr(value)?;
                self.out.write_char('\n')
            }
            // The body stays at the allocation's own indent.
            StmtNode::Allocate {
                buffer,
                ty,
                size,
                body,
            } => {
                self.emit_indent(indent)?;
                write!(self.out, "allocate {}[{} * ", buffer, ty)?;
                self.emit_expr(size)?;
                self.out.write_str("]\n")?;
                self.emit_stmt(body, indent)?;
                self.emit_indent(indent)?;
                writeln!(self.out, "free {}", buffer)
            }
            StmtNode::Realize {
                buffer,
                bounds,
                body,
            } => {
                self.emit_indent(indent)?;
                write!(self.out, "realize {}(", buffer)?;
                for (i, range) in bounds.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    self.out.write_char('[')?;
                    self.emit_expr(&range.min)?;
                    self.out.write_str(", ")?;
                    self.emit_expr(&range.extent)?;
                    self.out.write_char(']')?;
                }
                self.out.write_str(") {\n")?;
                self.emit_stmt(body, inner)?;
                self.emit_indent(indent)?;
                self.out.write_str("}\n")
            }
            StmtNode::Block { first, rest } => {
                self.emit_stmt(first, indent)?;
                match rest {
                    Some(rest) => self.emit_stmt(rest, indent),
                    None => Ok(()),
                }
            }
        }
    }
}
