//! Error types for trace recording and golden-trace verification.

use crate::ir::TypeKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraceError {
    // ── Malformed callback input ──
    #[error("unknown trace event code {0}")]
    UnknownEventCode(i32),

    #[error("unknown trace type code {0}")]
    UnknownTypeCode(i32),

    #[error("{count} integer arguments exceed the limit of {max}")]
    TooManyArgs { count: usize, max: usize },

    #[error("{lanes} lanes outside the supported range 1..={max}")]
    BadLaneCount { lanes: i32, max: usize },

    #[error("unsupported value width: {kind:?} with {bits} bits")]
    UnsupportedWidth { kind: TypeKind, bits: i32 },

    #[error("value buffer holds {available} bytes, {needed} needed")]
    ValueBufferTooShort { needed: usize, available: usize },

    // ── Verification failures ──
    #[error("trace length mismatch: expected {expected} events, recorded {actual}\n{report}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        report: String,
    },

    #[error("traces differ at event {index}:\n{report}")]
    EventMismatch { index: usize, report: String },
}
