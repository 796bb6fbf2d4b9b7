//! The in-memory trace store.
//!
//! Owns every event of a session, sorted by time, and answers the three
//! queries the view layer needs: which models exist, which attribute paths
//! a model has, and the time-ordered series of one `(model, path)` pair.
//! The store is immutable after construction, so it indexes once up front.

use std::collections::HashMap;
use std::sync::Arc;

use devscope_foundation::{Event, Result};
use tracing::debug;

use crate::loader::TraceLoader;

/// Read-only store of all events for a session.
#[derive(Clone, Debug, Default)]
pub struct TraceStore {
    /// All events, time-ascending, ties in emission order.
    events: Vec<Event>,
    /// Distinct models in first-seen order.
    models: Vec<Arc<str>>,
    /// Distinct paths per model in first-seen order.
    paths: HashMap<Arc<str>, Vec<Arc<str>>>,
    /// Event indices per `(model, path)`.
    series: HashMap<(Arc<str>, Arc<str>), Vec<usize>>,
}

impl TraceStore {
    /// Builds a store from events.
    ///
    /// Events are stably sorted by time, so input that is already sorted
    /// (as [`TraceLoader`] output is) keeps its order exactly.
    #[must_use]
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut models = Vec::new();
        let mut paths: HashMap<Arc<str>, Vec<Arc<str>>> = HashMap::new();
        let mut series: HashMap<(Arc<str>, Arc<str>), Vec<usize>> = HashMap::new();

        for (index, event) in events.iter().enumerate() {
            let key = (event.model.clone(), event.path.clone());
            let indices = series.entry(key).or_default();
            if indices.is_empty() {
                let model_paths = paths.entry(event.model.clone()).or_default();
                if model_paths.is_empty() {
                    models.push(event.model.clone());
                }
                model_paths.push(event.path.clone());
            }
            indices.push(index);
        }

        debug!(
            events = events.len(),
            models = models.len(),
            series = series.len(),
            "indexed trace store"
        );

        Self {
            events,
            models,
            paths,
            series,
        }
    }

    /// Loads an XML trace file into a store.
    ///
    /// # Errors
    ///
    /// Propagates load and parse errors from [`TraceLoader::load_path`].
    pub fn load(loader: &TraceLoader, path: impl AsRef<std::path::Path>) -> Result<Self> {
        loader.load_path(path).map(Self::new)
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the store holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns all events, time-ascending.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the distinct models in first-seen order.
    #[must_use]
    pub fn models_present(&self) -> Vec<&str> {
        self.models.iter().map(|m| &**m).collect()
    }

    /// Returns the distinct attribute paths of a model in first-seen order.
    ///
    /// Unknown models have no paths.
    #[must_use]
    pub fn paths_for(&self, model: &str) -> Vec<&str> {
        self.paths
            .get(model)
            .map(|paths| paths.iter().map(|p| &**p).collect())
            .unwrap_or_default()
    }

    /// Returns true if the model has a series for the path.
    #[must_use]
    pub fn has_series(&self, model: &str, path: &str) -> bool {
        self.series
            .contains_key(&(Arc::<str>::from(model), Arc::<str>::from(path)))
    }

    /// Returns all events of one `(model, path)` pair, time-ascending.
    #[must_use]
    pub fn series_for<'a>(&'a self, model: &'a str, path: &'a str) -> Series<'a> {
        let key = (Arc::<str>::from(model), Arc::<str>::from(path));
        let events = self
            .series
            .get(&key)
            .map(|indices| indices.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default();
        Series {
            model,
            path,
            events,
        }
    }

    /// Returns the time span covered by the whole trace.
    #[must_use]
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((self.events.first()?.time, self.events.last()?.time))
    }
}

/// All events of one `(model, path)` pair, time-ascending.
#[derive(Clone, Debug)]
pub struct Series<'a> {
    model: &'a str,
    path: &'a str,
    events: Vec<&'a Event>,
}

impl<'a> Series<'a> {
    /// Returns the model name.
    #[must_use]
    pub const fn model(&self) -> &'a str {
        self.model
    }

    /// Returns the attribute path.
    #[must_use]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there are no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the events.
    #[must_use]
    pub fn events(&self) -> &[&'a Event] {
        &self.events
    }

    /// Iterates the events.
    pub fn iter(&self) -> impl Iterator<Item = &'a Event> + '_ {
        self.events.iter().copied()
    }

    /// Iterates event times (with duplicates).
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.events.iter().map(|e| e.time)
    }

    /// Returns the earliest event time.
    #[must_use]
    pub fn first_time(&self) -> Option<f64> {
        self.events.first().map(|e| e.time)
    }

    /// Returns the latest event time.
    #[must_use]
    pub fn last_time(&self) -> Option<f64> {
        self.events.last().map(|e| e.time)
    }

    /// Returns the greatest event time strictly before `time`.
    #[must_use]
    pub fn time_before(&self, time: f64) -> Option<f64> {
        let end = self.events.partition_point(|e| e.time < time);
        end.checked_sub(1).map(|i| self.events[i].time)
    }

    /// Returns the least event time strictly after `time`.
    #[must_use]
    pub fn time_after(&self, time: f64) -> Option<f64> {
        let start = self.events.partition_point(|e| e.time <= time);
        self.events.get(start).map(|e| e.time)
    }

    /// Returns the events whose time equals `time` exactly.
    #[must_use]
    pub fn at(&self, time: f64) -> &[&'a Event] {
        let start = self.events.partition_point(|e| e.time < time);
        let end = self.events.partition_point(|e| e.time <= time);
        &self.events[start..end]
    }

    /// Returns the events with `lower <= time <= upper`.
    #[must_use]
    pub fn between(&self, lower: f64, upper: f64) -> &[&'a Event] {
        let start = self.events.partition_point(|e| e.time < lower);
        let end = self.events.partition_point(|e| e.time <= upper);
        if start >= end {
            &[]
        } else {
            &self.events[start..end]
        }
    }
}
