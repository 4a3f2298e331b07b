//! Approximate event equality and golden-sequence comparison.

use tracing::warn;

use super::error::TraceError;
use super::event::TraceEvent;
use crate::config::TraceConfig;

const RULE: &str = "-------------------------------";
const MARKER: &str = " ===> ";

/// Strict absolute-tolerance comparison: `|a - b| < tolerance`.
pub fn float_match(a: f32, b: f32, tolerance: f32) -> bool {
    (a - tolerance) < b && (a + tolerance) > b
}

impl TraceEvent {
    /// Integer fields exactly, every float slot within `tolerance`.
    pub fn matches(&self, other: &TraceEvent, tolerance: f32) -> bool {
        self.func == other.func
            && self.event == other.event
            && self.ty == other.ty
            && self.value_index == other.value_index
            && self.num_int_args == other.num_int_args
            && self.int_args == other.int_args
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| float_match(*a, *b, tolerance))
    }
}

/// Check a recorded trace against a golden sequence.
///
/// A length difference fails before any event is compared. Otherwise the
/// first diverging event is reported with both sequences printed in full.
pub fn compare_traces(
    expected: &[TraceEvent],
    actual: &[TraceEvent],
    config: &TraceConfig,
) -> Result<(), TraceError> {
    if expected.len() != actual.len() {
        warn!(
            expected = expected.len(),
            actual = actual.len(),
            "trace length mismatch"
        );
        return Err(TraceError::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
            report: render_report(expected, actual, None),
        });
    }

    let diverged = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| !e.matches(a, config.float_tolerance));
    match diverged {
        None => Ok(()),
        Some(index) => {
            warn!(index, "trace diverges from golden sequence");
            Err(TraceError::EventMismatch {
                index,
                report: render_report(expected, actual, Some(index)),
            })
        }
    }
}

/// Both sequences one event per line, the line at `marked` flagged.
pub fn render_report(
    expected: &[TraceEvent],
    actual: &[TraceEvent],
    marked: Option<usize>,
) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nCorrect trace:\n");
    render_sequence(&mut out, expected, marked);
    out.push_str(RULE);
    out.push_str("\nTrace encountered:\n");
    render_sequence(&mut out, actual, marked);
    out.push_str(RULE);
    out.push('\n');
    out
}

fn render_sequence(out: &mut String, events: &[TraceEvent], marked: Option<usize>) {
    for (i, event) in events.iter().enumerate() {
        if Some(i) == marked {
            out.push_str(MARKER);
        } else {
            out.push_str(&" ".repeat(MARKER.len()));
        }
        out.push_str(&event.to_string());
        out.push('\n');
    }
}
