//! Configuration for view computation.

/// Default window width in simulated time units.
pub const DEFAULT_WINDOW_WIDTH: f64 = 10.0;

/// Default number of distinct values below which every value gets a tick.
pub const DEFAULT_TICK_LIMIT: usize = 20;

/// Default padding added above and below the value range.
pub const DEFAULT_VALUE_PADDING: f64 = 0.5;

/// Configuration for view computation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewConfig {
    /// Width of the nominal time window.
    pub window_width: f64,

    /// Axes with fewer distinct entries than this get a tick per entry.
    pub tick_limit: usize,

    /// Padding added to both ends of the value axis.
    pub value_padding: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            tick_limit: DEFAULT_TICK_LIMIT,
            value_padding: DEFAULT_VALUE_PADDING,
        }
    }
}

impl ViewConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the window width.
    ///
    /// Negative widths clamp to zero; NaN or infinite widths fall back to the
    /// default.
    #[must_use]
    pub fn with_window_width(mut self, width: f64) -> Self {
        self.window_width = sanitize_width(width);
        self
    }

    /// Builder method to set the tick limit.
    #[must_use]
    pub fn with_tick_limit(mut self, limit: usize) -> Self {
        self.tick_limit = limit;
        self
    }

    /// Builder method to set the value padding.
    #[must_use]
    pub fn with_value_padding(mut self, padding: f64) -> Self {
        self.value_padding = if padding.is_finite() { padding.abs() } else { DEFAULT_VALUE_PADDING };
        self
    }
}

/// Clamps a user-supplied window width into the accepted range.
#[must_use]
pub fn sanitize_width(width: f64) -> f64 {
    if !width.is_finite() {
        DEFAULT_WINDOW_WIDTH
    } else {
        width.max(0.0)
    }
}
