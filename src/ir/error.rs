//! Error types for IR construction and well-formedness checking.

use super::types::Type;

/// Errors raised while building or checking IR.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IrError {
    /// A type with zero bits or zero lanes.
    #[error("invalid type: {bits} bits, {lanes} lanes")]
    InvalidType { bits: u8, lanes: u16 },

    /// A runtime type code outside Int/UInt/Float.
    #[error("unknown type code {0}")]
    UnknownTypeCode(u8),

    /// Operands of a binary node disagree on type.
    #[error("type mismatch in {op}: {lhs} vs {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: Type,
        rhs: Type,
    },

    /// An operand that must be boolean is not.
    #[error("{op} expects a boolean operand, found {found}")]
    NotBoolean { op: &'static str, found: Type },

    /// Loop bounds must be integer-typed.
    #[error("loop `{var}` has non-integer {which}: {found}")]
    NonIntegerLoopBound {
        var: String,
        which: &'static str,
        found: Type,
    },

    /// A vector-forming node with zero lanes.
    #[error("{op} requires at least one lane")]
    ZeroLanes { op: &'static str },

    /// A Ramp or Broadcast built from a vector operand.
    #[error("{op} expects a scalar operand, found {found}")]
    NotScalar { op: &'static str, found: Type },

    /// A buffer scoped by Allocate/Realize is touched outside that scope.
    #[error("buffer `{0}` referenced outside its allocation scope")]
    OutOfScope(String),

    /// A Provide whose coordinate count differs from the enclosing Realize.
    #[error("provide to `{buffer}` uses {found} coordinates, realize declares {expected}")]
    DimensionMismatch {
        buffer: String,
        expected: usize,
        found: usize,
    },
}
