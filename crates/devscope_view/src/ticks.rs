//! Value scales and axis tick selection.

use devscope_foundation::Value;

use crate::config::DEFAULT_TICK_LIMIT;

/// How values are placed on the vertical axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "categories", rename_all = "lowercase"))]
pub enum ValueScale {
    /// Every value is a real number and sits at its own magnitude.
    Numeric,
    /// Values sit at the index of their text in a lexically sorted list.
    Categorical(Vec<String>),
}

impl ValueScale {
    /// Chooses the scale for a set of observed values.
    ///
    /// The scale is numeric only if every value is numeric. An empty set is
    /// numeric.
    pub fn for_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let values: Vec<&Value> = values.into_iter().collect();
        if values.iter().all(|v| v.is_numeric()) {
            return Self::Numeric;
        }
        let mut categories: Vec<String> = values.iter().map(ToString::to_string).collect();
        categories.sort();
        categories.dedup();
        Self::Categorical(categories)
    }

    /// Returns true for a categorical scale.
    #[must_use]
    pub const fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical(_))
    }

    /// Returns the axis position of a value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, value: &Value) -> Option<f64> {
        match self {
            Self::Numeric => value.as_number(),
            Self::Categorical(categories) => {
                let text = value.to_string();
                categories
                    .binary_search(&text)
                    .ok()
                    .map(|index| index as f64)
            }
        }
    }
}

/// One axis tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick {
    /// Axis position.
    pub position: f64,
    /// Label text.
    pub label: String,
}

impl Tick {
    /// Creates a tick.
    #[must_use]
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }

    /// Creates a tick labelled with its own position.
    #[must_use]
    pub fn numeric(position: f64) -> Self {
        Self::new(position, format_number(position))
    }
}

/// Formats a number the way axis labels spell it.
#[must_use]
pub fn format_number(n: f64) -> String {
    format!("{n:?}")
}

/// Chooses tick positions for both axes.
///
/// Axes with fewer distinct entries than the limit get one tick per entry;
/// denser axes get ticks at their extremes only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickPolicy {
    limit: usize,
}

impl Default for TickPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_LIMIT)
    }
}

impl TickPolicy {
    /// Creates a policy with the given limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Returns the limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Time axis ticks.
    ///
    /// `times` are the distinct selected times, ascending, bordering events
    /// included; the limit applies to all of them. Times outside `limits`
    /// are not displayed and get no tick.
    #[must_use]
    pub fn time_ticks(&self, times: &[f64], limits: (f64, f64)) -> Vec<Tick> {
        let (lower, upper) = limits;
        if times.len() >= self.limit {
            return Self::extremes(lower, upper);
        }
        times
            .iter()
            .copied()
            .filter(|&t| lower <= t && t <= upper)
            .map(Tick::numeric)
            .collect()
    }

    /// Value axis ticks for values placed on `scale`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value_ticks<'a, I>(&self, scale: &ValueScale, values: I) -> Vec<Tick>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        match scale {
            ValueScale::Categorical(categories) => {
                if categories.len() < self.limit {
                    categories
                        .iter()
                        .enumerate()
                        .map(|(i, label)| Tick::new(i as f64, label.clone()))
                        .collect()
                } else {
                    let (Some(first), Some(last)) = (categories.first(), categories.last()) else {
                        return Vec::new();
                    };
                    vec![
                        Tick::new(0.0, first.clone()),
                        Tick::new((categories.len() - 1) as f64, last.clone()),
                    ]
                }
            }
            ValueScale::Numeric => {
                let mut placed: Vec<(f64, &Value)> = values
                    .into_iter()
                    .filter_map(|v| v.as_number().map(|n| (n, v)))
                    .collect();
                placed.sort_by(|a, b| a.0.total_cmp(&b.0));
                placed.dedup_by(|a, b| a.0.total_cmp(&b.0).is_eq());

                if placed.len() < self.limit {
                    placed
                        .into_iter()
                        .map(|(n, v)| Tick::new(n, v.to_string()))
                        .collect()
                } else {
                    let (Some(&(min, _)), Some(&(max, _))) = (placed.first(), placed.last()) else {
                        return Vec::new();
                    };
                    Self::extremes(min, max)
                }
            }
        }
    }

    fn extremes(min: f64, max: f64) -> Vec<Tick> {
        if min.total_cmp(&max).is_eq() {
            vec![Tick::numeric(min)]
        } else {
            vec![Tick::numeric(min), Tick::numeric(max)]
        }
    }
}
