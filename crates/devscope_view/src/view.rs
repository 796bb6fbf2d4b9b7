//! The view payload handed to renderers.
//!
//! [`compute_view`] is a pure function of the store, the selection, the
//! cursor, and the configuration. Empty selections and empty windows are not
//! errors; they produce [`ViewOutcome::Clear`] so the renderer resets.

use devscope_trace::{Series, TraceStore};
use tracing::debug;

use crate::annotate::{Arrow, annotate};
use crate::config::ViewConfig;
use crate::cursor::Cursor;
use crate::selection::Selection;
use crate::step::{Point, StepFunction};
use crate::ticks::{Tick, TickPolicy, ValueScale};
use crate::window::Window;

/// Why there is nothing to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClearReason {
    /// No model and attribute are both selected.
    NoSelection,
    /// The window holds no events.
    EmptyWindow,
}

/// The result of computing a view.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", content = "view", rename_all = "snake_case"))]
pub enum ViewOutcome {
    /// The renderer should clear its plot.
    Clear(ClearReason),
    /// A view is ready.
    Ready(Box<View>),
}

impl ViewOutcome {
    /// Returns the view if one is ready.
    #[must_use]
    pub fn view(&self) -> Option<&View> {
        match self {
            Self::Ready(view) => Some(view),
            Self::Clear(_) => None,
        }
    }

    /// Consumes the outcome, returning the view if one is ready.
    #[must_use]
    pub fn into_view(self) -> Option<View> {
        match self {
            Self::Ready(view) => Some(*view),
            Self::Clear(_) => None,
        }
    }

    /// Returns the clear reason if there is no view.
    #[must_use]
    pub const fn clear_reason(&self) -> Option<ClearReason> {
        match self {
            Self::Clear(reason) => Some(*reason),
            Self::Ready(_) => None,
        }
    }
}

/// Everything needed to draw one windowed series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct View {
    /// `"<model>: <path>"`.
    pub title: String,
    /// Selected model.
    pub model: String,
    /// Selected attribute path.
    pub path: String,
    /// Cursor time.
    pub cursor: f64,
    /// Nominal window.
    pub window: Window,
    /// Window after extension to the bordering events.
    pub effective: (f64, f64),
    /// Displayed time range.
    pub x_limits: (f64, f64),
    /// Displayed value range, padded.
    pub y_limits: (f64, f64),
    /// Time axis ticks.
    pub x_ticks: Vec<Tick>,
    /// Value axis ticks.
    pub y_ticks: Vec<Tick>,
    /// How values map to the value axis.
    pub scale: ValueScale,
    /// Stairstep geometry and event markers.
    pub step: StepFunction,
    /// Transition arrows.
    pub arrows: Vec<Arrow>,
    /// Vertical line at the cursor spanning the value range.
    pub cursor_line: (Point, Point),
    /// Number of selected events, bordering events included.
    pub event_count: usize,
}

/// Computes the view for the active selection.
#[must_use]
pub fn compute_view(
    store: &TraceStore,
    selection: &Selection,
    cursor: Cursor,
    config: &ViewConfig,
) -> ViewOutcome {
    let Some((model, path)) = selection.active() else {
        debug!("no active selection; clearing view");
        return ViewOutcome::Clear(ClearReason::NoSelection);
    };
    view_of_series(&store.series_for(model, path), cursor.time(), config)
}

/// Computes the view of one series around `cursor`.
#[must_use]
pub fn view_of_series(series: &Series<'_>, cursor: f64, config: &ViewConfig) -> ViewOutcome {
    let window = Window::around(cursor, config.window_width);
    let windowed = window.select(series);
    let events = windowed.events();

    let Some(mut x_limits) = windowed.x_limits() else {
        debug!(
            model = series.model(),
            path = series.path(),
            lower = window.lower,
            upper = window.upper,
            "window is empty; clearing view"
        );
        return ViewOutcome::Clear(ClearReason::EmptyWindow);
    };

    let scale = ValueScale::for_values(events.iter().map(|e| &e.value));
    let hold_until = (!windowed.extends_above()).then_some(window.upper);
    let step = StepFunction::build(events, &scale, hold_until);
    if let Some(end) = step.hold_end {
        x_limits.1 = x_limits.1.max(end);
    }

    let Some((low, high)) = step.value_range() else {
        return ViewOutcome::Clear(ClearReason::EmptyWindow);
    };
    let y_limits = (low - config.value_padding, high + config.value_padding);

    let policy = TickPolicy::new(config.tick_limit);
    let x_ticks = policy.time_ticks(&windowed.distinct_times(), x_limits);
    let y_ticks = policy.value_ticks(&scale, events.iter().map(|e| &e.value));
    let arrows = annotate(events, &scale);

    debug!(
        model = series.model(),
        path = series.path(),
        events = events.len(),
        segments = step.segments.len(),
        arrows = arrows.len(),
        "view computed"
    );

    ViewOutcome::Ready(Box::new(View {
        title: format!("{}: {}", series.model(), series.path()),
        model: series.model().to_string(),
        path: series.path().to_string(),
        cursor,
        window,
        effective: (windowed.effective_lower, windowed.effective_upper),
        x_limits,
        y_limits,
        x_ticks,
        y_ticks,
        scale,
        step,
        arrows,
        cursor_line: (Point::new(cursor, y_limits.0), Point::new(cursor, y_limits.1)),
        event_count: events.len(),
    }))
}
