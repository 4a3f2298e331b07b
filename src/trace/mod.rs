//! Execution-trace schema, recording sink, and golden-trace matcher.
//!
//! An instrumented runtime reports every load, store, and realization phase
//! through [`TraceSink::record`]. Tests then compare the recorded log with a
//! hand-verified golden sequence using [`compare_traces`].

pub mod error;
pub mod event;
pub mod matcher;
pub mod sink;


pub use error::TraceError;
pub use event::{EventKind, GoldenRow, TraceEvent};
pub use matcher::{compare_traces, float_match, render_report};
pub use sink::{RawEvent, TraceSink};
