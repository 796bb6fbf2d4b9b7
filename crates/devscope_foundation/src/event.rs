//! Flat trace events.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Whether a value change came from an internal or an external transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransitionKind {
    /// Internal transition (`IN` in traces).
    Internal,
    /// External transition (`EX` in traces).
    External,
}

impl TransitionKind {
    /// Returns the short tag used in trace files.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Internal => "IN",
            Self::External => "EX",
        }
    }

    /// Returns true for internal transitions.
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TransitionKind {
    type Err = String;

    /// Accepts `IN`/`EX` and `INTERNAL`/`EXTERNAL`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("IN") || tag.eq_ignore_ascii_case("INTERNAL") {
            Ok(Self::Internal)
        } else if tag.eq_ignore_ascii_case("EX") || tag.eq_ignore_ascii_case("EXTERNAL") {
            Ok(Self::External)
        } else {
            Err(tag.to_string())
        }
    }
}

/// One `(time, model, kind, path, value)` record.
///
/// A source record with `N` leaf attributes expands into `N` events that
/// share `time`, `model`, `kind`, and `record`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    /// Simulated time.
    pub time: f64,
    /// Dot-delimited model identifier.
    pub model: Arc<str>,
    /// Transition classification.
    pub kind: TransitionKind,
    /// Dot-delimited attribute path inside the model's state.
    pub path: Arc<str>,
    /// Attribute value.
    pub value: Value,
    /// Zero-based index of the source record this event came from.
    pub record: usize,
}

impl Event {
    /// Creates a new event.
    #[must_use]
    pub fn new(
        time: f64,
        model: impl Into<Arc<str>>,
        kind: TransitionKind,
        path: impl Into<Arc<str>>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            time,
            model: model.into(),
            kind,
            path: path.into(),
            value: value.into(),
            record: 0,
        }
    }

    /// Sets the source record index.
    #[must_use]
    pub const fn with_record(mut self, record: usize) -> Self {
        self.record = record;
        self
    }

    /// Returns true if this event belongs to the given series.
    #[must_use]
    pub fn belongs_to(&self, model: &str, path: &str) -> bool {
        &*self.model == model && &*self.path == path
    }
}
