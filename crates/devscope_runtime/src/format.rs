//! View output formatters.
//!
//! Provides human-readable and JSON renderings of computed views.

use std::fmt::Write;

use devscope_foundation::{Error, ErrorKind, Result};
use devscope_view::{ClearReason, SegmentKind, TransitionDetail, View, ViewOutcome};

// =============================================================================
// View Formatter Trait
// =============================================================================

/// Trait for formatting view outcomes.
pub trait ViewFormatter {
    /// Formats a view outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_outcome(&self, outcome: &ViewOutcome) -> Result<String>;

    /// Formats the transition detail at the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_detail(&self, detail: &TransitionDetail) -> Result<String>;
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats views as plain text.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to list every stairstep segment.
    pub show_segments: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to list every segment.
    #[must_use]
    pub fn with_segments(mut self) -> Self {
        self.show_segments = true;
        self
    }

    fn format_view(&self, view: &View) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", view.title);
        let _ = writeln!(
            out,
            "  cursor {:?}  window [{:?}, {:?}]  shown [{:?}, {:?}]",
            view.cursor, view.window.lower, view.window.upper, view.x_limits.0, view.x_limits.1
        );
        let _ = writeln!(out, "  time ticks:  {}", join_labels(&view.x_ticks));
        let _ = writeln!(out, "  value ticks: {}", join_labels(&view.y_ticks));

        let holds: Vec<String> = view
            .step
            .holds()
            .map(|s| format!("{:?}-{:?} @ {}", s.start.time, s.end.time, label_at(view, s.start.y)))
            .collect();
        let _ = writeln!(out, "  holds: {}", holds.join(", "));
        let _ = writeln!(
            out,
            "  markers: {} internal, {} external, {} arrows",
            view.step.internal.len(),
            view.step.external.len(),
            view.arrows.len()
        );

        if self.show_segments {
            for segment in &view.step.segments {
                let kind = match segment.kind {
                    SegmentKind::Hold => "hold",
                    SegmentKind::Jump => "jump",
                };
                let _ = writeln!(
                    out,
                    "    {kind} ({:?}, {:?}) -> ({:?}, {:?})",
                    segment.start.time, segment.start.y, segment.end.time, segment.end.y
                );
            }
        }
        out
    }
}

/// Joins tick labels with spaces.
fn join_labels(ticks: &[devscope_view::Tick]) -> String {
    ticks
        .iter()
        .map(|t| t.label.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the label of the value-axis tick at `y`, falling back to the number.
fn label_at(view: &View, y: f64) -> String {
    view.y_ticks
        .iter()
        .find(|t| t.position.total_cmp(&y).is_eq())
        .map_or_else(|| format!("{y:?}"), |t| t.label.clone())
}

impl ViewFormatter for HumanFormatter {
    fn format_outcome(&self, outcome: &ViewOutcome) -> Result<String> {
        Ok(match outcome {
            ViewOutcome::Ready(view) => self.format_view(view),
            ViewOutcome::Clear(ClearReason::NoSelection) => {
                "(nothing selected: choose a model and an attribute)\n".to_string()
            }
            ViewOutcome::Clear(ClearReason::EmptyWindow) => "(no events in window)\n".to_string(),
        })
    }

    fn format_detail(&self, detail: &TransitionDetail) -> Result<String> {
        if detail.is_empty() {
            return Ok(format!("no event at {:.4}\n", detail.time));
        }
        Ok(detail.to_string())
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats views as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to pretty-print JSON.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter (compact by default).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn encode<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| Error::new(ErrorKind::Internal(format!("JSON encoding failed: {e}"))))
    }
}

impl ViewFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &ViewOutcome) -> Result<String> {
        self.encode(outcome)
    }

    fn format_detail(&self, detail: &TransitionDetail) -> Result<String> {
        self.encode(detail)
    }
}
