//! Windowed views over devscope trace series.
//!
//! This crate provides:
//! - [`Cursor`] - First/previous/next/last navigation over a series
//! - [`Window`] - Boundary-aware event selection around the cursor
//! - [`StepFunction`] - Stairstep geometry with separate event markers
//! - [`TickPolicy`] - Categorical and numeric axis ticks
//! - [`annotate`] - Transition arrows between levels
//! - [`compute_view`] - The full view payload for the active selection
//!
//! Every computation here is total: empty selections and empty windows
//! yield [`ViewOutcome::Clear`] rather than an error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod annotate;
pub mod config;
pub mod cursor;
pub mod detail;
pub mod selection;
pub mod step;
pub mod ticks;
pub mod view;
pub mod window;

pub use annotate::{Arrow, ArrowStyle, annotate};
pub use config::ViewConfig;
pub use cursor::Cursor;
pub use detail::{DetailEntry, TransitionDetail};
pub use selection::{Selection, SelectionChange};
pub use step::{Marker, Point, Segment, SegmentKind, StepFunction};
pub use ticks::{Tick, TickPolicy, ValueScale};
pub use view::{ClearReason, View, ViewOutcome, compute_view, view_of_series};
pub use window::{Window, Windowed};
