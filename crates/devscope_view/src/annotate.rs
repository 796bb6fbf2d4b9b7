//! Transition arrows between stairstep levels.

use devscope_foundation::Event;

use crate::step::Point;
use crate::ticks::ValueScale;

/// Shape of a transition arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArrowStyle {
    /// Curved arrow for an increase.
    Up,
    /// Curved arrow for a decrease.
    Down,
    /// Small arc for a transition that left the value unchanged.
    SelfLoop,
}

impl ArrowStyle {
    /// Picks the style for a value delta.
    #[must_use]
    pub fn for_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::SelfLoop
        }
    }
}

/// A directed marker from the level before a transition to the level after.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrow {
    /// The previous level at the transition time.
    pub start: Point,
    /// The new level at the transition time.
    pub end: Point,
    /// Shape.
    pub style: ArrowStyle,
}

impl Arrow {
    /// Value change across the transition.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.end.y - self.start.y
    }
}

/// Derives one arrow per internal transition strictly inside the window.
///
/// The first and last events have no arrow: the first has no known level
/// before it and the last is usually a bordering event.
#[must_use]
pub fn annotate(events: &[&Event], scale: &ValueScale) -> Vec<Arrow> {
    let placed: Vec<(&Event, f64)> = events
        .iter()
        .filter_map(|&e| scale.position(&e.value).map(|y| (e, y)))
        .collect();
    if placed.len() < 3 {
        return Vec::new();
    }

    placed
        .windows(2)
        .take(placed.len() - 2)
        .filter(|pair| pair[1].0.kind.is_internal())
        .map(|pair| {
            let (_, before) = pair[0];
            let (event, after) = pair[1];
            Arrow {
                start: Point::new(event.time, before),
                end: Point::new(event.time, after),
                style: ArrowStyle::for_delta(after - before),
            }
        })
        .collect()
}
