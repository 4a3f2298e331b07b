use std::fmt;

use super::Printer;
use crate::ir::expr::{BinOp, Expr, ExprNode};

/// How a two-operand node is spelled.
enum BinaryForm {
    /// `(a<sym>b)`; the symbol carries its own spacing.
    Infix(&'static str),
    /// `name(a, b)`.
    Call(&'static str),
}

fn binary_form(op: BinOp) -> BinaryForm {
    match op {
        BinOp::Add => BinaryForm::Infix(" + "),
        BinOp::Sub => BinaryForm::Infix(" - "),
        BinOp::Mul => BinaryForm::Infix("*"),
        BinOp::Div => BinaryForm::Infix("/"),
        BinOp::Mod => BinaryForm::Infix(" % "),
        BinOp::Min => BinaryForm::Call("min"),
        BinOp::Max => BinaryForm::Call("max"),
        BinOp::Eq => BinaryForm::Infix(" == "),
        BinOp::Ne => BinaryForm::Infix(" != "),
        BinOp::Lt => BinaryForm::Infix(" < "),
        BinOp::Le => BinaryForm::Infix(" <= "),
        BinOp::Gt => BinaryForm::Infix(" > "),
        BinOp::Ge => BinaryForm::Infix(" >= "),
        BinOp::And => BinaryForm::Infix(" && "),
        BinOp::Or => BinaryForm::Infix(" || "),
    }
}

impl<W: fmt::Write + ?Sized> Printer<'_, W> {
    pub(super) fn emit_expr(&mut self, expr: &Expr) -> fmt::Result {
        match expr.node() {
            ExprNode::IntImm(v) => write!(self.out, "{}", v),
            ExprNode::FloatImm(v) => self.emit_float(*v),
            ExprNode::Cast { ty, value } => {
                write!(self.out, "{}(", ty)?;
                self.emit_expr(value)?;
                self.out.write_char(')')
            }
            // Type is elided.
            ExprNode::Var { name, .. } => self.out.write_str(name),
            ExprNode::Binary { op, a, b } => match binary_form(*op) {
                BinaryForm::Infix(symbol) => {
                    self.out.write_char('(')?;
                    self.emit_expr(a)?;
                    self.out.write_str(symbol)?;
                    self.emit_expr(b)?;
                    self.out.write_char(')')
                }
                BinaryForm::Call(name) => {
                    write!(self.out, "{}(", name)?;
                    self.emit_expr(a)?;
                    self.out.write_str(", ")?;
                    self.emit_expr(b)?;
                    self.out.write_char(')')
                }
            },
            ExprNode::Not(a) => {
                self.out.write_char('!')?;
                self.emit_expr(a)
            }
            ExprNode::Select {
                condition,
                true_value,
                false_value,
            } => {
                self.out.write_str("select(")?;
                self.emit_expr(condition)?;
                self.out.write_str(", ")?;
                self.emit_expr(true_value)?;
                self.out.write_str(", ")?;
                self.emit_expr(false_value)?;
                self.out.write_char(')')
            }
            ExprNode::Load { buffer, index, .. } => {
                write!(self.out, "{}[", buffer)?;
                self.emit_expr(index)?;
                self.out.write_char(']')
            }
            ExprNode::Ramp {
                base,
                stride,
                lanes,
            } => {
                self.out.write_str("ramp(")?;
                self.emit_expr(base)?;
                self.out.write_str(", ")?;
                self.emit_expr(stride)?;
                write!(self.out, ", {})", lanes)
            }
            ExprNode::Broadcast { value, lanes } => {
                self.out.write_str("broadcast(")?;
                self.emit_expr(value)?;
                write!(self.out, ", {})", lanes)
            }
            ExprNode::Call { name, args, .. } => {
                write!(self.out, "{}(", name)?;
                self.emit_list(args)?;
                self.out.write_char(')')
            }
            ExprNode::Let { name, value, body } => {
                write!(self.out, "(let {} = ", name)?;
                self.emit_expr(value)?;
                self.out.write_str(" in ")?;
                self.emit_expr(body)?;
                self.out.write_char(')')
            }
        }
    }

    /// Shortest round-trip decimal; non-finite values as `inf`, `-inf`, `nan`.
    fn emit_float(&mut self, v: f32) -> fmt::Result {
        if v.is_nan() {
            self.out.write_str("nan")
        } else if v.is_infinite() {
            self.out.write_str(if v > 0.0 { "inf" } else { "-inf" })
        } else {
            self.out.write_str(&general_form(f64::from(v)))
        }
    }
}

/// Significant digits in float literals.
const FLOAT_DIGITS: i32 = 6;

/// `%g` rendering: `FLOAT_DIGITS` significant digits with trailing zeros
/// dropped, in exponent form (`1e+10`, `1e-07`) when the decimal exponent is
/// below -4 or at least `FLOAT_DIGITS`.
fn general_form(v: f64) -> String {
    // Rounding first settles the exponent, e.g. 999999.7 becomes 1.00000e6.
    let sci = format!("{:.*e}", (FLOAT_DIGITS - 1) as usize, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= FLOAT_DIGITS {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (FLOAT_DIGITS - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, v)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
