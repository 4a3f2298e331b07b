//! Numeric type descriptor shared by every IR node.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::IrError;

/// Scalar kind of a [`Type`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Int,
    UInt,
    Float,
}

impl TypeKind {
    /// Numeric code used by the runtime trace interface (0 = Int, 1 = UInt, 2 = Float).
    pub fn code(self) -> u8 {
        match self {
            TypeKind::Int => 0,
            TypeKind::UInt => 1,
            TypeKind::Float => 2,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, IrError> {
        match code {
            0 => Ok(TypeKind::Int),
            1 => Ok(TypeKind::UInt),
            2 => Ok(TypeKind::Float),
            other => Err(IrError::UnknownTypeCode(other)),
        }
    }

    fn letter(self) -> char {
        match self {
            TypeKind::Int => 'i',
            TypeKind::UInt => 'u',
            TypeKind::Float => 'f',
        }
    }
}

/// A scalar or SIMD vector type: kind, bit width, lane count.
///
/// `lanes > 1` denotes a vector. Booleans are represented as `u1`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    pub kind: TypeKind,
    pub bits: u8,
    pub lanes: u16,
}

impl Type {
    /// Build a type, rejecting zero widths and zero lane counts.
    pub fn new(kind: TypeKind, bits: u8, lanes: u16) -> Result<Self, IrError> {
        if bits == 0 || lanes == 0 {
            return Err(IrError::InvalidType { bits, lanes });
        }
        Ok(Self { kind, bits, lanes })
    }

    pub const fn int(bits: u8) -> Self {
        debug_assert!(bits > 0, "zero-width type");
        Self {
            kind: TypeKind::Int,
            bits,
            lanes: 1,
        }
    }

    pub const fn uint(bits: u8) -> Self {
        debug_assert!(bits > 0, "zero-width type");
        Self {
            kind: TypeKind::UInt,
            bits,
            lanes: 1,
        }
    }

    pub const fn float(bits: u8) -> Self {
        debug_assert!(bits > 0, "zero-width type");
        Self {
            kind: TypeKind::Float,
            bits,
            lanes: 1,
        }
    }

    /// The boolean type, a one-bit unsigned integer.
    pub const fn bool() -> Self {
        Self::uint(1)
    }

    /// Same element type with `lanes` lanes. Use [`Type::new`] for lane
    /// counts that are not known to be positive.
    pub fn vector(self, lanes: u16) -> Self {
        debug_assert!(lanes > 0, "zero-lane type");
        Self { lanes, ..self }
    }

    /// The scalar element type of a vector (identity on scalars).
    pub fn element_of(self) -> Self {
        self.vector(1)
    }

    pub fn is_vector(&self) -> bool {
        self.lanes > 1
    }

    pub fn is_scalar(&self) -> bool {
        self.lanes == 1
    }

    pub fn is_int(&self) -> bool {
        self.kind == TypeKind::Int
    }

    pub fn is_uint(&self) -> bool {
        self.kind == TypeKind::UInt
    }

    pub fn is_float(&self) -> bool {
        self.kind == TypeKind::Float
    }

    pub fn is_bool(&self) -> bool {
        self.kind == TypeKind::UInt && self.bits == 1
    }

    /// Signed or unsigned integer, excluding booleans.
    pub fn is_integer(&self) -> bool {
        (self.is_int() || self.is_uint()) && !self.is_bool()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.letter(), self.bits)?;
        if self.lanes > 1 {
            write!(f, "x{}", self.lanes)?;
        }
        Ok(())
    }
}
