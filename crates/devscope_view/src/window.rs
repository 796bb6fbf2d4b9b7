//! Boundary-aware time windowing.
//!
//! A window is centred on the cursor and clipped at the origin. Selection
//! reaches one event past each nominal bound so that the step function has a
//! defined level where the visible range starts and ends; the visible axis
//! itself never grows past the nominal bounds.

use devscope_foundation::Event;
use devscope_trace::Series;

use crate::config::sanitize_width;

/// The nominal time window around a cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    /// Cursor time the window was built around.
    pub cursor: f64,
    /// Window width.
    pub width: f64,
    /// Nominal lower bound, never negative.
    pub lower: f64,
    /// Nominal upper bound, `lower + width`.
    pub upper: f64,
}

impl Window {
    /// Builds the nominal window `[max(cursor - width/2, 0), lower + width]`.
    #[must_use]
    pub fn around(cursor: f64, width: f64) -> Self {
        let width = sanitize_width(width);
        let lower = (cursor - width / 2.0).max(0.0);
        Self {
            cursor,
            width,
            lower,
            upper: lower + width,
        }
    }

    /// Returns true if `time` lies inside the nominal bounds (inclusive).
    #[must_use]
    pub fn contains(&self, time: f64) -> bool {
        self.lower <= time && time <= self.upper
    }

    /// Selects the events to display from a series.
    ///
    /// The selection covers `[effective_lower, effective_upper]` inclusive,
    /// where the effective bounds are the nearest event times strictly
    /// outside the nominal window, or the nominal bounds if none exist.
    #[must_use]
    pub fn select<'s, 'a>(&self, series: &'s Series<'a>) -> Windowed<'s, 'a> {
        let effective_lower = series.time_before(self.lower).unwrap_or(self.lower);
        let effective_upper = series.time_after(self.upper).unwrap_or(self.upper);
        Windowed {
            window: *self,
            effective_lower,
            effective_upper,
            events: series.between(effective_lower, effective_upper),
        }
    }
}

/// The events selected by a [`Window`].
#[derive(Clone, Copy, Debug)]
pub struct Windowed<'s, 'a> {
    /// The nominal window.
    pub window: Window,
    /// Lower bound after extension to the bordering event.
    pub effective_lower: f64,
    /// Upper bound after extension to the bordering event.
    pub effective_upper: f64,
    events: &'s [&'a Event],
}

impl<'s, 'a> Windowed<'s, 'a> {
    /// Returns the selected events, time-ascending.
    #[must_use]
    pub const fn events(&self) -> &'s [&'a Event] {
        self.events
    }

    /// Returns the number of selected events.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns true if the selection reaches an event above the nominal window.
    #[must_use]
    pub fn extends_above(&self) -> bool {
        self.effective_upper > self.window.upper
    }

    /// Returns the displayed time range.
    ///
    /// This is the nominal window intersected with the selected data. When
    /// the intersection is empty or a single instant, the nominal window is
    /// shown instead.
    #[must_use]
    pub fn x_limits(&self) -> Option<(f64, f64)> {
        let first = self.events.first()?.time;
        let last = self.events.last()?.time;
        let lower = first.max(self.window.lower);
        let upper = last.min(self.window.upper);
        if lower < upper {
            Some((lower, upper))
        } else {
            Some((self.window.lower, self.window.upper))
        }
    }

    /// Returns the distinct selected times, ascending.
    #[must_use]
    pub fn distinct_times(&self) -> Vec<f64> {
        let mut times: Vec<f64> = self.events.iter().map(|e| e.time).collect();
        times.dedup();
        times
    }
}
