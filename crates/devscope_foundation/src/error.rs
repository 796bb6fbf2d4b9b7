//! Error types for devscope.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Both error families are fatal for a session: a trace either loads
//! completely or not at all.

use std::fmt;

use thiserror::Error;

/// Result alias used across the devscope crates.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for devscope operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, replacing any existing context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an error from a malformed attribute tree.
    #[must_use]
    pub fn parse(error: ParseError) -> Self {
        Self::new(ErrorKind::Parse(error))
    }

    /// Creates an error from a malformed or unreadable trace source.
    #[must_use]
    pub fn load(error: LoadError) -> Self {
        Self::new(ErrorKind::Load(error))
    }

    /// Returns true if this is an attribute tree error.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse(_))
    }

    /// Returns true if this is a trace source error.
    #[must_use]
    pub const fn is_load(&self) -> bool {
        matches!(self.kind, ErrorKind::Load(_))
    }

    /// Renders the error together with its context, one item per line.
    #[must_use]
    pub fn report(&self) -> String {
        match &self.context {
            Some(context) => format!("{self}\n{context}").trim_end().to_string(),
            None => self.to_string(),
        }
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::parse(error)
    }
}

impl From<LoadError> for Error {
    fn from(error: LoadError) -> Self {
        Self::load(error)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed attribute tree inside a state snapshot.
    #[error("parse error: {0}")]
    Parse(ParseError),

    /// Malformed top-level record or unreadable source.
    #[error("load error: {0}")]
    Load(LoadError),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised while flattening one attribute tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An attribute element has no name.
    #[error("attribute without a name")]
    MissingName,

    /// A scalar attribute has no type tag.
    #[error("attribute '{attribute}' has no type tag")]
    MissingTypeTag {
        /// The attribute name.
        attribute: String,
    },

    /// An attribute has no value node.
    #[error("attribute '{attribute}' has no value")]
    MissingValue {
        /// The attribute name.
        attribute: String,
    },

    /// A scalar attribute has no category tag.
    #[error("attribute '{attribute}' has no category")]
    MissingCategory {
        /// The attribute name.
        attribute: String,
    },

    /// An `Integer` attribute whose text is not an integer.
    #[error("attribute '{attribute}': '{text}' is not a valid integer")]
    InvalidInteger {
        /// The attribute name.
        attribute: String,
        /// The offending text.
        text: String,
    },

    /// A `Float` attribute whose text is not a real number.
    #[error("attribute '{attribute}': '{text}' is not a valid float")]
    InvalidFloat {
        /// The attribute name.
        attribute: String,
        /// The offending text.
        text: String,
    },

    /// Nesting went deeper than the configured limit.
    #[error("attribute nesting deeper than {limit} levels")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

/// Errors raised while reading the trace source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("failed to read '{path}': {message}")]
    Io {
        /// The path that was read.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },

    /// The source is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// A record is missing a required child element.
    #[error("event record {record} is missing <{field}>")]
    MissingField {
        /// Zero-based index of the record in the source.
        record: usize,
        /// The missing element name.
        field: &'static str,
    },

    /// A record's time is not a real number.
    #[error("event record {record} has invalid time '{text}'")]
    InvalidTime {
        /// Zero-based index of the record in the source.
        record: usize,
        /// The offending text.
        text: String,
    },

    /// A record's kind tag is not a known transition kind.
    #[error("event record {record} has unknown kind '{text}'")]
    UnknownKind {
        /// Zero-based index of the record in the source.
        record: usize,
        /// The offending text.
        text: String,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Line number in source (1-indexed).
    pub line: Option<u32>,
    /// Column number in source (1-indexed).
    pub column: Option<u32>,
    /// Attribute names leading to the failing node, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line, self.column) {
            (Some(source), Some(line), Some(col)) => write!(f, "at {source}:{line}:{col}")?,
            (Some(source), _, _) => write!(f, "at {source}")?,
            (None, Some(line), Some(col)) => write!(f, "at {line}:{col}")?,
            _ => {}
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            write!(f, "  in attribute {}", self.stack.join("."))?;
        }
        Ok(())
    }
}
