//! Attribute tree flattening with type coercion.
//!
//! A snapshot such as
//!
//! ```text
//! phase  = "busy"            (String, P)
//! job    = { id = 3 }        (nested)
//! ```
//!
//! flattens to `[("phase", "busy"), ("job.id", 3)]`. The walk is an explicit
//! depth-first traversal bounded by [`Flattener::max_depth`], so adversarial
//! nesting fails with [`ParseError::DepthExceeded`] instead of overflowing
//! the stack.

use std::collections::HashMap;

use devscope_foundation::{Error, ErrorContext, ParseError, Result, Value};

use crate::attribute::{AttributeNode, AttributeValue};

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Flattened snapshot: dotted path to value, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatState {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl FlatState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value; a repeated path keeps its first position and takes
    /// the new value.
    pub fn insert(&mut self, path: String, value: Value) {
        if let Some(&slot) = self.index.get(&path) {
            self.entries[slot].1 = value;
        } else {
            self.index.insert(path.clone(), self.entries.len());
            self.entries.push((path, value));
        }
    }

    /// Looks up a value by dotted path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.index.get(path).map(|&slot| &self.entries[slot].1)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(path, value)| (path.as_str(), value))
    }

    /// Returns the paths in first-seen order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|(path, _)| path.as_str()).collect()
    }
}

impl IntoIterator for FlatState {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Flattens nested attribute trees into [`FlatState`]s.
#[derive(Clone, Copy, Debug)]
pub struct Flattener {
    max_depth: usize,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

/// One level of the traversal: remaining siblings plus the dotted prefix.
struct Frame<'a> {
    nodes: std::slice::Iter<'a, AttributeNode>,
    prefix: Option<String>,
    name: Option<&'a str>,
}

impl Flattener {
    /// Creates a flattener with the default depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Builder method to set the depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Flattens the top-level attributes of one snapshot.
    ///
    /// # Errors
    ///
    /// Returns a parse error if a node lacks a name, a scalar lacks a type
    /// tag, category, or value, a primary integer/float does not convert,
    /// or nesting exceeds the depth limit.
    pub fn flatten(&self, attributes: &[AttributeNode]) -> Result<FlatState> {
        let mut state = FlatState::new();
        let mut stack = vec![Frame {
            nodes: attributes.iter(),
            prefix: None,
            name: None,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(node) = frame.nodes.next() else {
                stack.pop();
                continue;
            };

            let Some(name) = node.name.as_deref() else {
                return Err(Self::fail(ParseError::MissingName, node, &stack));
            };
            let path = match &frame.prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name.to_string(),
            };

            match &node.value {
                Some(AttributeValue::Nested(children)) => {
                    if stack.len() > self.max_depth {
                        return Err(Self::fail(
                            ParseError::DepthExceeded {
                                limit: self.max_depth,
                            },
                            node,
                            &stack,
                        ));
                    }
                    stack.push(Frame {
                        nodes: children.iter(),
                        prefix: Some(path),
                        name: Some(name),
                    });
                }
                Some(AttributeValue::Text(text)) => {
                    let value = Self::coerce(node, name, text)
                        .map_err(|error| Self::fail(error, node, &stack))?;
                    state.insert(path, value);
                }
                None => {
                    return Err(Self::fail(
                        ParseError::MissingValue {
                            attribute: name.to_string(),
                        },
                        node,
                        &stack,
                    ));
                }
            }
        }

        Ok(state)
    }

    /// Applies the type coercion rule to one scalar.
    fn coerce(node: &AttributeNode, name: &str, text: &str) -> std::result::Result<Value, ParseError> {
        let Some(type_tag) = node.type_tag.as_deref() else {
            return Err(ParseError::MissingTypeTag {
                attribute: name.to_string(),
            });
        };
        let Some(category) = node.category.as_deref() else {
            return Err(ParseError::MissingCategory {
                attribute: name.to_string(),
            });
        };

        if category != crate::attribute::PRIMARY_CATEGORY {
            return Ok(Value::string(text));
        }

        match type_tag {
            "Integer" => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ParseError::InvalidInteger {
                    attribute: name.to_string(),
                    text: text.to_string(),
                }),
            "Float" => text
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ParseError::InvalidFloat {
                    attribute: name.to_string(),
                    text: text.to_string(),
                }),
            "Boolean" => Ok(Value::Bool(text.trim() == "True")),
            _ => Ok(Value::string(text)),
        }
    }

    /// Wraps a parse error with the node position and the chain of
    /// enclosing attribute names.
    fn fail(error: ParseError, node: &AttributeNode, stack: &[Frame<'_>]) -> Error {
        let mut context = ErrorContext::new();
        if let Some((line, column)) = node.position {
            context = context.with_position(line, column);
        }
        for name in stack.iter().filter_map(|frame| frame.name) {
            context = context.with_frame(name);
        }
        if let Some(name) = node.name.as_deref() {
            context = context.with_frame(name);
        }
        Error::parse(error).with_context(context)
    }
}
