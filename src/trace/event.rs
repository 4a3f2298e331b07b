//! Fixed-shape record of one runtime-observed operation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TraceError;
use crate::config::TraceConfig;
use crate::ir::{Type, TypeKind};

const SLOTS: usize = TraceConfig::SLOTS;

/// What the runtime observed. Codes match the instrumentation ABI.
///
/// Per buffer the markers nest as
/// `BeginRealization → Produce → Update* → Consume → EndConsume → EndRealization`,
/// with `Load`/`Store` interleaved inside the produce, update and consume phases.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Load,
    Store,
    BeginRealization,
    EndRealization,
    Produce,
    Update,
    Consume,
    EndConsume,
}

impl EventKind {
    pub fn code(self) -> i32 {
        match self {
            EventKind::Load => 0,
            EventKind::Store => 1,
            EventKind::BeginRealization => 2,
            EventKind::EndRealization => 3,
            EventKind::Produce => 4,
            EventKind::Update => 5,
            EventKind::Consume => 6,
            EventKind::EndConsume => 7,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, TraceError> {
        Ok(match code {
            0 => EventKind::Load,
            1 => EventKind::Store,
            2 => EventKind::BeginRealization,
            3 => EventKind::EndRealization,
            4 => EventKind::Produce,
            5 => EventKind::Update,
            6 => EventKind::Consume,
            7 => EventKind::EndConsume,
            other => return Err(TraceError::UnknownEventCode(other)),
        })
    }

    /// Human-readable name used in trace dumps.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Load => "Load",
            EventKind::Store => "Store",
            EventKind::BeginRealization => "Begin realization",
            EventKind::EndRealization => "End realization",
            EventKind::Produce => "Produce",
            EventKind::Update => "Update",
            EventKind::Consume => "Consume",
            EventKind::EndConsume => "End consume",
        }
    }

    /// Loads and stores carry lane values; every other kind is a phase marker.
    pub fn is_memory_access(self) -> bool {
        matches!(self, EventKind::Load | EventKind::Store)
    }

    pub fn is_realization_marker(self) -> bool {
        !self.is_memory_access()
    }
}

/// Literal golden-table row:
/// `(func, event, type_code, bits, lanes, value_index, num_int_args, int_args, values)`.
pub type GoldenRow = (u8, i32, i32, i32, i32, i32, i32, [i32; SLOTS], [f32; SLOTS]);

/// One recorded trace event.
///
/// `func` keeps only the first byte of the function name, so functions that
/// share an initial letter are indistinguishable here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub func: u8,
    pub event: EventKind,
    pub ty: Type,
    /// Tuple component the value belongs to.
    pub value_index: i32,
    pub num_int_args: u8,
    /// Coordinates, zero-padded past `num_int_args`.
    pub int_args: [i32; SLOTS],
    /// One value per lane, zero-padded past `ty.lanes`.
    pub values: [f32; SLOTS],
}

impl TraceEvent {
    /// Build an event from a golden-table row, validating every code.
    pub fn from_golden(row: GoldenRow) -> Result<Self, TraceError> {
        let (func, event, type_code, bits, lanes, value_index, num_int_args, int_args, values) =
            row;
        let event = EventKind::from_code(event)?;
        let ty = decode_type(type_code, bits, lanes, SLOTS)?;
        let num_int_args = usize::try_from(num_int_args)
            .ok()
            .filter(|n| *n <= SLOTS)
            .ok_or(TraceError::TooManyArgs {
                count: num_int_args.max(0) as usize,
                max: SLOTS,
            })?;
        Ok(Self {
            func,
            event,
            ty,
            value_index,
            num_int_args: num_int_args as u8,
            int_args,
            values,
        })
    }

    /// Function identifier as a character.
    pub fn func_char(&self) -> char {
        char::from(self.func)
    }

    pub fn int_args(&self) -> &[i32] {
        &self.int_args[..self.num_int_args as usize]
    }

    pub fn lane_values(&self) -> &[f32] {
        &self.values[..(self.ty.lanes as usize).min(SLOTS)]
    }

    /// Render as a golden-table row, ready to paste into a test.
    pub fn to_source(&self) -> String {
        let ints: Vec<_> = self.int_args.iter().map(|v| v.to_string()).collect();
        let floats: Vec<_> = self.values.iter().map(|v| format!("{:.6}", v)).collect();
        format!(
            "{{{}, {}, {}, {}, {}, {}, {}, {{{}}}, {{{}}}}},",
            self.func,
            self.event.code(),
            self.ty.kind.code(),
            self.ty.bits,
            self.ty.lanes,
            self.value_index,
            self.num_int_args,
            ints.join(", "),
            floats.join(", ")
        )
    }
}

/// `Load g.0[1, 2] [0.500000, 0.250000]`
impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}[",
            self.event.label(),
            self.func_char(),
            self.value_index
        )?;
        for (i, arg) in self.int_args().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str("] [")?;
        for (i, value) in self.lane_values().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:.6}", value)?;
        }
        f.write_str("]")
    }
}

/// Validate raw type fields into a [`Type`] with at most `max_lanes` lanes.
pub(super) fn decode_type(
    type_code: i32,
    bits: i32,
    lanes: i32,
    max_lanes: usize,
) -> Result<Type, TraceError> {
    let kind = u8::try_from(type_code)
        .ok()
        .and_then(|code| TypeKind::from_code(code).ok())
        .ok_or(TraceError::UnknownTypeCode(type_code))?;
    let max_lanes = max_lanes.min(SLOTS);
    let lane_count = u16::try_from(lanes)
        .ok()
        .filter(|n| *n >= 1 && usize::from(*n) <= max_lanes)
        .ok_or(TraceError::BadLaneCount {
            lanes,
            max: max_lanes,
        })?;
    let bit_width = u8::try_from(bits)
        .ok()
        .filter(|b| *b > 0)
        .ok_or(TraceError::UnsupportedWidth { kind, bits })?;
    Ok(Type {
        kind,
        bits: bit_width,
        lanes: lane_count,
    })
}
