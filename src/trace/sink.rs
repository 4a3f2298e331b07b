//! Append-only event log filled by the runtime's instrumentation callback.

use parking_lot::Mutex;
use bytemuck::pod_read_unaligned as read;
use tracing::{debug, trace};

use super::error::TraceError;
use super::event::{decode_type, EventKind, TraceEvent};
use super::matcher::compare_traces;
use crate::config::TraceConfig;
use crate::ir::{Type, TypeKind};

/// Arguments of one instrumentation callback, as the runtime passes them.
///
/// `values` holds `lanes` contiguous `f32` values in native byte order,
/// whatever the element type. `type_code`, `bits` and `lanes` describe the
/// traced buffer. Phase markers may pass an empty slice.
#[derive(Clone, Copy, Debug)]
pub struct RawEvent<'a> {
    pub function: &'a str,
    pub event_code: i32,
    pub type_code: i32,
    pub bits: i32,
    pub lanes: i32,
    pub value_index: i32,
    pub values: &'a [u8],
    pub int_args: &'a [i32],
}

impl TraceEvent {
    /// Decode raw callback arguments. Lane values are always read as `f32`.
    pub fn decode(raw: &RawEvent<'_>, config: &TraceConfig) -> Result<Self, TraceError> {
        Self::decode_with(raw, config, |ty, bytes| {
            read_lanes(bytes, std::mem::size_of::<f32>(), ty.lanes, |chunk| {
                Some(read::<f32>(chunk))
            })
        })
    }

    /// Like [`TraceEvent::decode`], but for runtimes that pass values in
    /// their element type. Each lane is reinterpreted per `type_code` and
    /// `bits`, then widened to `f32`.
    pub fn decode_typed(raw: &RawEvent<'_>, config: &TraceConfig) -> Result<Self, TraceError> {
        Self::decode_with(raw, config, decode_typed_values)
    }

    fn decode_with(
        raw: &RawEvent<'_>,
        config: &TraceConfig,
        decode_values: impl FnOnce(Type, &[u8]) -> Result<[f32; TraceConfig::SLOTS], TraceError>,
    ) -> Result<Self, TraceError> {
        let event = EventKind::from_code(raw.event_code)?;
        let ty = decode_type(raw.type_code, raw.bits, raw.lanes, config.max_lanes)?;

        let max_args = config.max_int_args.min(TraceConfig::SLOTS);
        if raw.int_args.len() > max_args {
            return Err(TraceError::TooManyArgs {
                count: raw.int_args.len(),
                max: max_args,
            });
        }
        let mut int_args = [0; TraceConfig::SLOTS];
        int_args[..raw.int_args.len()].copy_from_slice(raw.int_args);

        let values = if raw.values.is_empty() && !event.is_memory_access() {
            [0.0; TraceConfig::SLOTS]
        } else {
            decode_values(ty, raw.values)?
        };

        Ok(Self {
            func: raw.function.as_bytes().first().copied().unwrap_or(0),
            event,
            ty,
            value_index: raw.value_index,
            num_int_args: raw.int_args.len() as u8,
            int_args,
            values,
        })
    }
}

/// Read `lanes` chunks of `size` bytes, converting each with `lane`.
fn read_lanes(
    bytes: &[u8],
    size: usize,
    lanes: u16,
    lane: impl Fn(&[u8]) -> Option<f32>,
) -> Result<[f32; TraceConfig::SLOTS], TraceError> {
    let needed = size * usize::from(lanes);
    if bytes.len() < needed {
        return Err(TraceError::ValueBufferTooShort {
            needed,
            available: bytes.len(),
        });
    }

    let mut values = [0.0; TraceConfig::SLOTS];
    for (slot, chunk) in values.iter_mut().zip(bytes[..needed].chunks_exact(size)) {
        // Width was validated before reading.
        *slot = lane(chunk).unwrap_or_default();
    }
    Ok(values)
}

fn decode_typed_values(ty: Type, bytes: &[u8]) -> Result<[f32; TraceConfig::SLOTS], TraceError> {
    let size = match (ty.kind, ty.bits) {
        (TypeKind::UInt, 1) => 1,
        (TypeKind::Float, 32 | 64) | (TypeKind::Int | TypeKind::UInt, 8 | 16 | 32 | 64) => {
            usize::from(ty.bits / 8)
        }
        _ => {
            return Err(TraceError::UnsupportedWidth {
                kind: ty.kind,
                bits: i32::from(ty.bits),
            })
        }
    };
    read_lanes(bytes, size, ty.lanes, |chunk| typed_lane(ty, chunk))
}

fn typed_lane(ty: Type, chunk: &[u8]) -> Option<f32> {
    Some(match (ty.kind, ty.bits) {
        (TypeKind::Int, 8) => read::<i8>(chunk) as f32,
        (TypeKind::Int, 16) => read::<i16>(chunk) as f32,
        (TypeKind::Int, 32) => read::<i32>(chunk) as f32,
        (TypeKind::Int, 64) => read::<i64>(chunk) as f32,
        (TypeKind::UInt, 1 | 8) => read::<u8>(chunk) as f32,
        (TypeKind::UInt, 16) => read::<u16>(chunk) as f32,
        (TypeKind::UInt, 32) => read::<u32>(chunk) as f32,
        (TypeKind::UInt, 64) => read::<u64>(chunk) as f32,
        (TypeKind::Float, 32) => read::<f32>(chunk),
        (TypeKind::Float, 64) => read::<f64>(chunk) as f32,
        _ => return None,
    })
}

/// Injectable, thread-safe trace log scoped to one pipeline execution.
///
/// Appends are serialized by a lock, so the recorded order is the order in
/// which concurrent loop iterations actually reported. Events are never
/// removed or rewritten; [`TraceSink::reset`] clears the log before a new run.
#[derive(Debug, Default)]
pub struct TraceSink {
    config: TraceConfig,
    events: Mutex<Vec<TraceEvent>>,
}

impl TraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TraceConfig) -> Self {
        Self {
            config,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Instrumentation callback entry point.
    pub fn record(&self, raw: RawEvent<'_>) -> Result<(), TraceError> {
        let event = TraceEvent::decode(&raw, &self.config)?;
        self.record_event(event);
        Ok(())
    }

    pub fn record_event(&self, event: TraceEvent) {
        let mut events = self.events.lock();
        trace!(index = events.len(), %event, "trace event");
        events.push(event);
    }

    /// Clear the log at the start of a fresh run.
    pub fn reset(&self) {
        let mut events = self.events.lock();
        debug!(discarded = events.len(), "trace sink reset");
        events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Copy of the events recorded so far.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events.into_inner()
    }

    /// Compare the recorded log against a golden sequence.
    pub fn verify(&self, golden: &[TraceEvent]) -> Result<(), TraceError> {
        let events = self.events.lock();
        compare_traces(golden, &events, &self.config)
    }
}
