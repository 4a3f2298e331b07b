//! Settings for trace recording and golden-trace comparison.

use serde::{Deserialize, Serialize};

/// Limits and tolerances applied by [`crate::trace::TraceSink`] and
/// [`crate::trace::compare_traces`].
///
/// Missing fields fall back to the defaults when deserialized, so a harness
/// may override only what it needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Absolute per-lane tolerance for float values.
    pub float_tolerance: f32,
    /// Maximum integer coordinates carried by one event.
    pub max_int_args: usize,
    /// Maximum SIMD lanes carried by one event.
    pub max_lanes: usize,
}

impl TraceConfig {
    /// Fixed storage width of an event's coordinate and value arrays.
    pub const SLOTS: usize = 4;
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            float_tolerance: 0.001,
            max_int_args: Self::SLOTS,
            max_lanes: Self::SLOTS,
        }
    }
}
