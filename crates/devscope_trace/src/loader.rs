//! XML trace loading.
//!
//! Reads `<event>` records from the root element of a trace document,
//! flattens each record's `<state>` snapshot, and expands every record into
//! one [`Event`] per leaf attribute. The result is stably sorted by time, so
//! events sharing a timestamp keep their document order.

use std::fs;
use std::path::Path;

use devscope_foundation::{
    Error, ErrorContext, Event, LoadError, ParseError, Result, TransitionKind,
};
use roxmltree::{Document, Node};
use tracing::{debug, info};
use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::attribute::{AttributeNode, AttributeValue};
use crate::flatten::{DEFAULT_MAX_DEPTH, Flattener};

// =============================================================================
// Loader Configuration
// =============================================================================

/// Largest attribute nesting depth the loader accepts, whatever the
/// configuration says.
///
/// The XML tree is built recursively, so element depth must stay well inside
/// the stack of a default thread.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Configuration for the trace loader.
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// Maximum attribute nesting depth accepted by the flattener.
    pub max_depth: usize,
    /// Name reported in error context (usually the file path).
    pub source_name: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            source_name: None,
        }
    }
}

impl LoaderConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the maximum nesting depth, capped at
    /// [`MAX_NESTING_DEPTH`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_NESTING_DEPTH);
        self
    }

    /// Returns the nesting depth actually enforced.
    #[must_use]
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_NESTING_DEPTH)
    }

    /// Builder method to set the source name.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// One top-level record of a trace, before flattening.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRecord {
    /// Dot-delimited model identifier.
    pub model: String,
    /// Transition classification.
    pub kind: TransitionKind,
    /// Simulated time.
    pub time: f64,
    /// Top-level attributes of the state snapshot.
    pub state: Vec<AttributeNode>,
    /// Line and column of the record in its source, when known.
    pub position: Option<(u32, u32)>,
}

// =============================================================================
// Trace Loader
// =============================================================================

/// Loads traces into time-sorted event lists.
#[derive(Clone, Debug, Default)]
pub struct TraceLoader {
    config: LoaderConfig,
}

impl TraceLoader {
    /// Creates a loader with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with custom configuration.
    #[must_use]
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Reads and loads a trace file.
    ///
    /// The path becomes the source name unless one is configured.
    ///
    /// # Errors
    ///
    /// Returns a load error if the file cannot be read or any record is
    /// malformed, and a parse error if any snapshot is malformed.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Event>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            Error::load(LoadError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        let loader = if self.config.source_name.is_some() {
            self.clone()
        } else {
            Self::with_config(
                self.config
                    .clone()
                    .with_source_name(path.display().to_string()),
            )
        };
        loader.load_str(&source)
    }

    /// Loads a trace from XML text.
    ///
    /// # Errors
    ///
    /// See [`TraceLoader::load_path`].
    pub fn load_str(&self, xml: &str) -> Result<Vec<Event>> {
        let records = self.read_records(xml)?;
        self.expand(&records)
    }

    /// Parses XML text into unflattened records.
    ///
    /// # Errors
    ///
    /// Returns a load error for malformed XML or records missing a model,
    /// kind, time, or state element, and a parse error if elements nest
    /// deeper than the configured attribute depth allows.
    pub fn read_records(&self, xml: &str) -> Result<Vec<TraceRecord>> {
        self.check_depth(xml)?;
        let document = Document::parse(xml).map_err(|e| {
            let pos = e.pos();
            Error::load(LoadError::Xml(e.to_string()))
                .with_context(self.context().with_position(pos.row, pos.col))
        })?;

        let records = document
            .root_element()
            .children()
            .filter(|node| node.has_tag_name("event"))
            .enumerate()
            .map(|(index, node)| self.read_record(&document, index, node))
            .collect::<Result<Vec<_>>>()?;

        debug!(records = records.len(), "read trace records");
        Ok(records)
    }

    /// Expands records into events, one per flattened leaf, sorted by time.
    ///
    /// # Errors
    ///
    /// Returns a parse error if any snapshot fails to flatten.
    pub fn expand(&self, records: &[TraceRecord]) -> Result<Vec<Event>> {
        let flattener = Flattener::new().with_max_depth(self.config.effective_max_depth());
        let mut events = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let state = flattener.flatten(&record.state).map_err(|e| {
                let mut context = e.context.clone().unwrap_or_default();
                if let Some(source) = &self.config.source_name {
                    context.source = Some(source.clone());
                }
                if context.line.is_none() {
                    if let Some((line, column)) = record.position {
                        context = context.with_position(line, column);
                    }
                }
                e.with_context(context)
            })?;

            let model: std::sync::Arc<str> = record.model.as_str().into();
            events.extend(state.into_iter().map(|(path, value)| {
                Event::new(record.time, model.clone(), record.kind, path, value)
                    .with_record(index)
            }));
        }

        // Stable: equal times keep parse order.
        events.sort_by(|a, b| a.time.total_cmp(&b.time));

        info!(
            records = records.len(),
            events = events.len(),
            "loaded trace"
        );
        Ok(events)
    }

    /// Rejects documents nested deeper than attribute nesting can explain,
    /// before any tree is built.
    ///
    /// `trace`, `event` and `state` take three levels; each nested attribute
    /// adds an `attribute` and a `value` element; the innermost scalar adds
    /// its `attribute` and one level of `name`/`type`/`value` children.
    fn check_depth(&self, xml: &str) -> Result<()> {
        let max_depth = self.config.effective_max_depth();
        let limit = 2 * max_depth + 5;
        let mut depth = 0_usize;

        for token in Tokenizer::from(xml) {
            let token = token.map_err(|e| {
                let pos = e.pos();
                Error::load(LoadError::Xml(e.to_string()))
                    .with_context(self.context().with_position(pos.row, pos.col))
            })?;
            match token {
                Token::ElementStart { span, .. } => {
                    depth += 1;
                    if depth > limit {
                        let (line, column) = text_position(xml, span.start());
                        return Err(Error::parse(ParseError::DepthExceeded { limit: max_depth })
                            .with_context(self.context().with_position(line, column)));
                    }
                }
                Token::ElementEnd {
                    end: ElementEnd::Close(..) | ElementEnd::Empty,
                    ..
                } => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        Ok(())
    }

    fn context(&self) -> ErrorContext {
        let context = ErrorContext::new();
        match &self.config.source_name {
            Some(name) => context.with_source(name.clone()),
            None => context,
        }
    }

    fn position(document: &Document<'_>, node: Node<'_, '_>) -> (u32, u32) {
        let pos = document.text_pos_at(node.range().start);
        (pos.row, pos.col)
    }

    fn read_record(
        &self,
        document: &Document<'_>,
        index: usize,
        node: Node<'_, '_>,
    ) -> Result<TraceRecord> {
        let (line, column) = Self::position(document, node);
        let fail = |error: LoadError| {
            Error::load(error).with_context(self.context().with_position(line, column))
        };

        let required = |field: &'static str| {
            child_text(node, field)
                .filter(|text| !text.trim().is_empty())
                .ok_or_else(|| fail(LoadError::MissingField { record: index, field }))
        };

        let model = required("model")?.trim().to_string();
        let kind_text = required("kind")?;
        let kind = kind_text.parse::<TransitionKind>().map_err(|text| {
            fail(LoadError::UnknownKind {
                record: index,
                text,
            })
        })?;
        let time_text = required("time")?;
        let time = time_text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .ok_or_else(|| {
                fail(LoadError::InvalidTime {
                    record: index,
                    text: time_text.trim().to_string(),
                })
            })?;

        let state_node = child(node, "state").ok_or_else(|| {
            fail(LoadError::MissingField {
                record: index,
                field: "state",
            })
        })?;

        Ok(TraceRecord {
            model,
            kind,
            time,
            state: read_attributes(document, state_node),
            position: Some((line, column)),
        })
    }
}

// =============================================================================
// Attribute Reading
// =============================================================================

/// One-based line and column (in characters) of a byte offset.
fn text_position(text: &str, offset: usize) -> (u32, u32) {
    let before = &text[..offset];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line = before.matches('\n').count() + 1;
    let column = before[line_start..].chars().count() + 1;
    (
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    )
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child(node, tag).map(|c| c.text().unwrap_or(""))
}

/// Reads the `<attribute>` children of `parent` without recursion: nested
/// values are filled in from an explicit work list.
fn read_attributes(document: &Document<'_>, parent: Node<'_, '_>) -> Vec<AttributeNode> {
    // Each entry: (xml node, path of child indices from the root list).
    let mut roots = Vec::new();
    let mut work: Vec<(Node<'_, '_>, Vec<usize>)> = Vec::new();

    for (i, node) in parent
        .children()
        .filter(|c| c.has_tag_name("attribute"))
        .enumerate()
    {
        roots.push(read_attribute_shallow(document, node));
        work.push((node, vec![i]));
    }

    while let Some((node, address)) = work.pop() {
        let Some(value_node) = child(node, "value") else {
            continue;
        };
        let nested: Vec<Node<'_, '_>> = value_node
            .children()
            .filter(|c| c.has_tag_name("attribute"))
            .collect();
        if nested.is_empty() {
            continue;
        }

        let children: Vec<AttributeNode> = nested
            .iter()
            .map(|n| read_attribute_shallow(document, *n))
            .collect();
        if let Some(target) = node_at(&mut roots, &address) {
            target.value = Some(AttributeValue::Nested(children));
        }
        for (i, n) in nested.into_iter().enumerate() {
            let mut child_address = address.clone();
            child_address.push(i);
            work.push((n, child_address));
        }
    }

    roots
}

/// Reads name, type, category, and scalar text of one attribute element.
fn read_attribute_shallow(document: &Document<'_>, node: Node<'_, '_>) -> AttributeNode {
    let (line, column) = TraceLoader::position(document, node);
    AttributeNode {
        name: child_text(node, "name").map(|s| s.trim().to_string()),
        type_tag: child_text(node, "type").map(|s| s.trim().to_string()),
        category: node.attribute("category").map(str::to_string),
        value: child_text(node, "value").map(|s| AttributeValue::Text(s.to_string())),
        position: Some((line, column)),
    }
}

fn node_at<'a>(roots: &'a mut [AttributeNode], address: &[usize]) -> Option<&'a mut AttributeNode> {
    let (first, rest) = address.split_first()?;
    let mut current = roots.get_mut(*first)?;
    for &i in rest {
        let node = current;
        current = match &mut node.value {
            Some(AttributeValue::Nested(children)) => children.get_mut(i)?,
            _ => return None,
        };
    }
    Some(current)
}
