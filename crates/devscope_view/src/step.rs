//! Stairstep (zero-order hold) reconstruction of a windowed series.
//!
//! The curve is a list of disjoint segments instead of one polyline with gap
//! sentinels: a horizontal hold for each value, then a vertical jump at the
//! next event's time. Renderers draw each segment on its own, so no diagonal
//! ever connects two levels.

use devscope_foundation::{Event, TransitionKind, Value};

use crate::ticks::ValueScale;

/// A point in `(time, axis position)` space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Time coordinate.
    pub time: f64,
    /// Value-axis coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(time: f64, y: f64) -> Self {
        Self { time, y }
    }
}

/// Whether a segment holds a level or jumps between levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SegmentKind {
    /// Horizontal: the value is constant over a time span.
    Hold,
    /// Vertical: the value changes at one instant.
    Jump,
}

/// One straight piece of the stairstep.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Hold or jump.
    pub kind: SegmentKind,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

/// An event drawn as an isolated dot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// Event time.
    pub time: f64,
    /// Value-axis position.
    pub y: f64,
    /// The event's value.
    pub value: Value,
}

/// The stairstep geometry of one view.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepFunction {
    /// Holds and jumps in time order.
    pub segments: Vec<Segment>,
    /// Internal transition events.
    pub internal: Vec<Marker>,
    /// External transition events.
    pub external: Vec<Marker>,
    /// Time the final level was carried to, if past the last event.
    pub hold_end: Option<f64>,
}

impl StepFunction {
    /// Builds the stairstep for time-ascending events.
    ///
    /// With `hold_until`, the final level is carried to that time when at
    /// least two events were placed and the last one lies before it. Events
    /// whose value has no position on `scale` are skipped.
    #[must_use]
    pub fn build(events: &[&Event], scale: &ValueScale, hold_until: Option<f64>) -> Self {
        let placed: Vec<(&Event, f64)> = events
            .iter()
            .filter_map(|&e| scale.position(&e.value).map(|y| (e, y)))
            .collect();

        let mut step = Self::default();
        for pair in placed.windows(2) {
            let (current, y0) = pair[0];
            let (next, y1) = pair[1];
            step.segments.push(Segment {
                kind: SegmentKind::Hold,
                start: Point::new(current.time, y0),
                end: Point::new(next.time, y0),
            });
            step.segments.push(Segment {
                kind: SegmentKind::Jump,
                start: Point::new(next.time, y0),
                end: Point::new(next.time, y1),
            });
        }

        if let (Some(until), [_, .., (last, y)]) = (hold_until, placed.as_slice()) {
            if last.time < until {
                step.segments.push(Segment {
                    kind: SegmentKind::Hold,
                    start: Point::new(last.time, *y),
                    end: Point::new(until, *y),
                });
                step.hold_end = Some(until);
            }
        }

        for &(event, y) in &placed {
            let marker = Marker {
                time: event.time,
                y,
                value: event.value.clone(),
            };
            match event.kind {
                TransitionKind::Internal => step.internal.push(marker),
                TransitionKind::External => step.external.push(marker),
            }
        }
        step
    }

    /// Iterates the horizontal segments.
    pub fn holds(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Hold)
    }

    /// Iterates the vertical segments.
    pub fn jumps(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.kind == SegmentKind::Jump)
    }

    /// Returns the smallest and largest value-axis position of any point.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.internal
            .iter()
            .chain(&self.external)
            .map(|m| m.y)
            .fold(None, |range, y| match range {
                None => Some((y, y)),
                Some((lo, hi)) => Some((f64::min(lo, y), f64::max(hi, y))),
            })
    }
}
