//! Session state for one loaded trace.
//!
//! The session owns the read-only [`TraceStore`] together with the mutable
//! state a user changes while browsing it: the active selection, the time
//! cursor, and the view configuration. Every view is recomputed from that
//! state on request and never cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use devscope_foundation::Result;
use devscope_trace::{Hierarchy, LoaderConfig, Series, TraceLoader, TraceStore};
use devscope_view::{
    Cursor, Selection, SelectionChange, TransitionDetail, ViewConfig, ViewOutcome, compute_view,
    config::sanitize_width,
};
use tracing::{debug, info};

/// Session state for browsing one trace.
#[derive(Debug)]
pub struct Session {
    /// All events of the trace.
    store: TraceStore,

    /// Selection tree over model names.
    models: Hierarchy,

    /// Selection trees over attribute paths, per model.
    paths: HashMap<String, Hierarchy>,

    /// Active model and attribute.
    selection: Selection,

    /// Time cursor.
    cursor: Cursor,

    /// View settings.
    config: ViewConfig,

    /// Where the trace was loaded from.
    source: Option<PathBuf>,
}

impl Session {
    /// Creates a session over an already loaded store.
    #[must_use]
    pub fn new(store: TraceStore) -> Self {
        let models = Hierarchy::from_paths(store.models_present());
        let paths = store
            .models_present()
            .into_iter()
            .map(|model| (model.to_string(), Hierarchy::from_paths(store.paths_for(model))))
            .collect();
        Self {
            store,
            models,
            paths,
            selection: Selection::new(),
            cursor: Cursor::default(),
            config: ViewConfig::default(),
            source: None,
        }
    }

    /// Loads a trace file into a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid trace.
    pub fn open(path: impl AsRef<Path>, config: LoaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let loader = TraceLoader::with_config(config);
        let store = TraceStore::load(&loader, path)?;
        info!(path = %path.display(), events = store.len(), "trace opened");
        let mut session = Self::new(store);
        session.source = Some(path.to_path_buf());
        Ok(session)
    }

    /// Loads trace text into a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid trace.
    pub fn from_xml(xml: &str, config: LoaderConfig) -> Result<Self> {
        let events = TraceLoader::with_config(config).load_str(xml)?;
        Ok(Self::new(TraceStore::new(events)))
    }

    /// Builder method to set the view configuration.
    #[must_use]
    pub fn with_view_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the trace store.
    #[must_use]
    pub const fn store(&self) -> &TraceStore {
        &self.store
    }

    /// Returns the file the trace came from.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Returns the active selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the cursor.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the view configuration.
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the model selection tree.
    #[must_use]
    pub const fn models(&self) -> &Hierarchy {
        &self.models
    }

    /// Returns the attribute selection tree of the selected model.
    #[must_use]
    pub fn attributes(&self) -> Option<&Hierarchy> {
        self.paths.get(self.selection.model()?)
    }

    /// Selects a model and resets the attribute.
    pub fn select_model(&mut self, model: &str) -> SelectionChange {
        self.selection.select_model(model, &self.models)
    }

    /// Selects an attribute of the selected model.
    pub fn select_attribute(&mut self, path: &str) -> SelectionChange {
        let Some(paths) = self.selection.model().and_then(|m| self.paths.get(m)) else {
            return SelectionChange::Ignored;
        };
        self.selection.select_attribute(path, paths)
    }

    /// Moves the cursor to the origin.
    pub fn first(&mut self) -> f64 {
        self.navigate(Cursor::first)
    }

    /// Moves the cursor to the previous event time.
    pub fn prev(&mut self) -> f64 {
        self.navigate(Cursor::prev)
    }

    /// Moves the cursor to the next event time.
    pub fn next(&mut self) -> f64 {
        self.navigate(Cursor::next)
    }

    /// Moves the cursor to the last event time.
    pub fn last(&mut self) -> f64 {
        self.navigate(Cursor::last)
    }

    /// Moves the cursor to an arbitrary time.
    pub fn set_time(&mut self, time: f64) -> f64 {
        self.cursor.set(time);
        self.cursor.time()
    }

    /// Sets the window width, clamped to the accepted range.
    pub fn set_window(&mut self, width: f64) -> f64 {
        self.config.window_width = sanitize_width(width);
        debug!(width = self.config.window_width, "window width changed");
        self.config.window_width
    }

    /// Computes the view for the current state.
    #[must_use]
    pub fn view(&self) -> ViewOutcome {
        compute_view(&self.store, &self.selection, self.cursor, &self.config)
    }

    /// Returns the transition detail at the cursor.
    #[must_use]
    pub fn detail(&self) -> Option<TransitionDetail> {
        let series = self.active_series()?;
        Some(TransitionDetail::at(&series, self.cursor.time()))
    }

    /// Returns the series of the active selection.
    #[must_use]
    pub fn active_series(&self) -> Option<Series<'_>> {
        let (model, path) = self.selection.active()?;
        Some(self.store.series_for(model, path))
    }

    /// Words offered by command completion: model leaves and the selected
    /// model's attribute leaves.
    #[must_use]
    pub fn completion_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.models.leaves().into_iter().map(String::from).collect();
        if let Some(paths) = self.attributes() {
            words.extend(paths.leaves().into_iter().map(String::from));
        }
        words
    }

    fn navigate(&mut self, step: fn(&mut Cursor, &Series<'_>) -> f64) -> f64 {
        let Some((model, path)) = self.selection.active() else {
            return self.cursor.time();
        };
        let series = self.store.series_for(model, path);
        step(&mut self.cursor, &series)
    }
}
