//! Time cursor navigation over one series.
//!
//! Every move is a total function of `(series, current time)`. Moves on an
//! empty series leave the cursor where it is, and so do moves without a
//! qualifying neighbor, which makes them idempotent at the ends.

use devscope_trace::Series;
use tracing::trace;

/// A movable position on the time axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    time: f64,
}

impl Cursor {
    /// Creates a cursor at the given time.
    ///
    /// Non-finite times are treated as the origin.
    #[must_use]
    pub fn at(time: f64) -> Self {
        Self {
            time: if time.is_finite() { time } else { 0.0 },
        }
    }

    /// Returns the current time.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Moves the cursor to an arbitrary time.
    pub fn set(&mut self, time: f64) {
        *self = Self::at(time);
    }

    /// Moves to the timeline origin.
    ///
    /// The origin is not necessarily an event time.
    pub fn first(&mut self, series: &Series<'_>) -> f64 {
        if !series.is_empty() {
            self.move_to(0.0, "first");
        }
        self.time
    }

    /// Moves to the greatest event time strictly before the cursor.
    pub fn prev(&mut self, series: &Series<'_>) -> f64 {
        if let Some(time) = series.time_before(self.time) {
            self.move_to(time, "prev");
        }
        self.time
    }

    /// Moves to the least event time strictly after the cursor.
    pub fn next(&mut self, series: &Series<'_>) -> f64 {
        if let Some(time) = series.time_after(self.time) {
            self.move_to(time, "next");
        }
        self.time
    }

    /// Moves to the greatest event time in the series.
    pub fn last(&mut self, series: &Series<'_>) -> f64 {
        if let Some(time) = series.last_time() {
            self.move_to(time, "last");
        }
        self.time
    }

    fn move_to(&mut self, time: f64, step: &'static str) {
        trace!(from = self.time, to = time, step, "cursor moved");
        self.time = time;
    }
}
