//! Integration tests for the view layer.
//!
//! Exercises windowing, tick selection, cursor navigation, and full view
//! computation over stores built in memory.

mod navigation;
mod properties;
mod ticks;

use devscope::foundation::{Event, TransitionKind, Value};
use devscope::trace::TraceStore;

/// Builds a single-series store `m`/`p` from `(time, value)` pairs.
pub fn series_store<V: Into<Value> + Clone>(points: &[(f64, V)]) -> TraceStore {
    TraceStore::new(
        points
            .iter()
            .enumerate()
            .map(|(i, (t, v))| {
                let kind = if i % 2 == 0 {
                    TransitionKind::Internal
                } else {
                    TransitionKind::External
                };
                Event::new(*t, "m", kind, "p", v.clone()).with_record(i)
            })
            .collect(),
    )
}
