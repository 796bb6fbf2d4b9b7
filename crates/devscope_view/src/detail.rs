//! Text detail for the events at the cursor.

use std::fmt;

use devscope_foundation::{TransitionKind, Value};
use devscope_trace::Series;

/// One event at the cursor time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailEntry {
    /// The event's value.
    pub value: Value,
    /// The event's transition kind.
    pub kind: TransitionKind,
}

/// Everything the series records at one instant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionDetail {
    /// The cursor time.
    pub time: f64,
    /// Events whose time equals the cursor, in trace order.
    pub entries: Vec<DetailEntry>,
    /// Time of the next event after the cursor.
    pub next_time: Option<f64>,
}

impl TransitionDetail {
    /// Collects the detail for `time`.
    #[must_use]
    pub fn at(series: &Series<'_>, time: f64) -> Self {
        Self {
            time,
            entries: series
                .at(time)
                .iter()
                .map(|e| DetailEntry {
                    value: e.value.clone(),
                    kind: e.kind,
                })
                .collect(),
            next_time: series.time_after(time),
        }
    }

    /// Returns true if no event happens at the cursor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for TransitionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "TIME: {:.4}", self.time)?;
            writeln!(f, "STATE: {}", entry.value)?;
            match entry.kind {
                TransitionKind::Internal => {
                    writeln!(f, "Internal Transition:")?;
                    match self.next_time {
                        Some(next) => writeln!(f, "  Time Next: {next:?}")?,
                        None => writeln!(f, "  Time Next: N/A")?,
                    }
                }
                TransitionKind::External => writeln!(f, "External Transition")?,
            }
        }
        Ok(())
    }
}
